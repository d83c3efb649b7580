pub mod favourite;
