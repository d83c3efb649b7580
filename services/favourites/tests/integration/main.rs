mod helpers;
mod peer_client_test;
