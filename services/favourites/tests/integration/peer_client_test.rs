use std::collections::HashMap;
use std::time::Duration;

use serde_json::json;

use shop_domain::id::{ProductId, UserId};
use shop_favourites::domain::repository::EnrichmentPort;
use shop_favourites::error::FetchError;
use shop_favourites::infra::http::HttpEnrichmentClient;
use shop_testing::peer::{StubPeer, StubResponse, product_body, user_body};

fn client(users: &StubPeer, products: &StubPeer, timeout: Duration) -> HttpEnrichmentClient {
    HttpEnrichmentClient::new(&users.base_url(), &products.base_url(), timeout).unwrap()
}

#[tokio::test]
async fn should_decode_user_and_product_payloads() {
    let users = StubPeer::spawn(HashMap::from([(1, StubResponse::Json(user_body(1)))])).await;
    let products =
        StubPeer::spawn(HashMap::from([(100, StubResponse::Json(product_body(100)))])).await;
    let client = client(&users, &products, Duration::from_secs(2));

    let user = client.fetch_user(UserId(1)).await.unwrap();
    let product = client.fetch_product(ProductId(100)).await.unwrap();

    assert_eq!(user.user_id, UserId(1));
    assert_eq!(user.details["email"], "john.doe@example.com");
    assert_eq!(product.product_id, ProductId(100));
    assert_eq!(product.details["productTitle"], "Test Product");
    assert_eq!(users.hits(), 1);
    assert_eq!(products.hits(), 1);
}

#[tokio::test]
async fn should_report_error_status() {
    let users = StubPeer::spawn(HashMap::new()).await;
    let products = StubPeer::spawn(HashMap::from([(100, StubResponse::Status(500))])).await;
    let client = client(&users, &products, Duration::from_secs(2));

    let missing = client.fetch_user(UserId(1)).await.unwrap_err();
    let broken = client.fetch_product(ProductId(100)).await.unwrap_err();

    assert_eq!(missing, FetchError::Status(404));
    assert_eq!(broken, FetchError::Status(500));
}

#[tokio::test]
async fn should_report_undecodable_body() {
    let users =
        StubPeer::spawn(HashMap::from([(1, StubResponse::Json(json!({ "name": "x" })))])).await;
    let products = StubPeer::spawn(HashMap::new()).await;
    let client = client(&users, &products, Duration::from_secs(2));

    let err = client.fetch_user(UserId(1)).await.unwrap_err();

    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn should_time_out_slow_peer() {
    let users = StubPeer::spawn(HashMap::from([(
        1,
        StubResponse::Delayed(Duration::from_secs(5), user_body(1)),
    )]))
    .await;
    let products = StubPeer::spawn(HashMap::new()).await;
    let client = client(&users, &products, Duration::from_millis(200));

    let err = client.fetch_user(UserId(1)).await.unwrap_err();

    assert_eq!(err, FetchError::Timeout);
}

#[tokio::test]
async fn should_report_transport_error_when_peer_is_down() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let closed = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let client =
        HttpEnrichmentClient::new(&closed, &closed, Duration::from_secs(2)).unwrap();

    let err = client.fetch_product(ProductId(100)).await.unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)));
}
