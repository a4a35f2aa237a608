use std::io::Write;
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use productlist_core::ProductId;
use productlist_infra::product_store::{InMemoryProductStore, JsonFileProductStore};
use productlist_infra::AppConfig;
use productlist_products::Product;
use reqwest::StatusCode;
use rust_decimal::Decimal;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(app: axum::Router) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn with_catalog() -> Self {
        let store = InMemoryProductStore::from_products(catalog());
        Self::spawn(productlist_api::app::build_app_with_repository(Arc::new(store))).await
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        reqwest::Client::new()
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn product(id: &str, name: &str, price: i64, day: i64) -> Product {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Product::new(ProductId::new(id), name, Decimal::new(price, 0), base + Duration::days(day))
}

fn catalog() -> Vec<Product> {
    vec![
        product("3", "Monitor", 300, 1).with_rating(Decimal::new(3, 0)),
        product("1", "Laptop Pro", 2200, 3)
            .with_specification("Color", "Silver")
            .with_rating(Decimal::new(4, 0))
            .with_rating(Decimal::new(5, 0)),
        product("5", "Keyboard", 80, 0),
        product("2", "Laptop Air", 1800, 4).with_specification("Color", "Gold"),
        product("4", "Mouse", 40, 2).with_rating(Decimal::new(5, 0)),
    ]
}

fn ids(body: &serde_json::Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|p| p["productId"].as_str().unwrap())
        .collect()
}

async fn assert_envelope(res: reqwest::Response, status: StatusCode, message: &str) {
    assert_eq!(res.status(), status);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], message);
    assert_eq!(body["statusCode"], status.as_u16().to_string());
    assert!(body["timestamp"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::with_catalog().await;
    assert_eq!(srv.get("/health").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn list_defaults_to_newest_first() {
    let srv = TestServer::with_catalog().await;

    let res = srv.get("/products").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(ids(&body), ["2", "1", "4", "3", "5"]);
}

#[tokio::test]
async fn list_pages_by_price() {
    let srv = TestServer::with_catalog().await;

    let res = srv.get("/products?page=1&size=2&sort=price&direction=ASC").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(ids(&body), ["3", "2"]);
}

#[tokio::test]
async fn list_with_literal_date_creation_keeps_load_order() {
    let srv = TestServer::with_catalog().await;

    let body: serde_json::Value = srv
        .get("/products?sort=dateCreation")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(ids(&body), ["3", "1", "5", "2", "4"]);
}

#[tokio::test]
async fn get_by_id_returns_product_with_average() {
    let srv = TestServer::with_catalog().await;

    let res = srv.get("/products/1").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["name"], "Laptop Pro");
    assert_eq!(body["averageRating"].as_f64(), Some(4.5));
    assert_eq!(body["specificationsList"][0]["value"], "Silver");
}

#[tokio::test]
async fn get_by_unknown_id_is_not_found() {
    let srv = TestServer::with_catalog().await;

    let res = srv.get("/products/missing").await;
    assert_envelope(res, StatusCode::NOT_FOUND, "Product not found for ID: missing").await;
}

#[tokio::test]
async fn search_combines_filters() {
    let srv = TestServer::with_catalog().await;

    let res = srv
        .get("/products/search?name=laptop&priceMin=2000&priceMax=0&ratingMin=3.8&ratingMax=5")
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(ids(&body), ["1"]);
}

#[tokio::test]
async fn search_by_specification() {
    let srv = TestServer::with_catalog().await;

    let body: serde_json::Value = srv
        .get("/products/search?name=laptop&specifications=color:gold")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(ids(&body), ["2"]);
}

#[tokio::test]
async fn search_without_name_is_bad_request() {
    let srv = TestServer::with_catalog().await;

    for path in ["/products/search", "/products/search?name="] {
        let res = srv.get(path).await;
        assert_envelope(res, StatusCode::BAD_REQUEST, "Product name cannot be null or empty").await;
    }
}

#[tokio::test]
async fn search_without_matches_is_not_found() {
    let srv = TestServer::with_catalog().await;

    let res = srv.get("/products/search?name=tablet").await;
    assert_envelope(res, StatusCode::NOT_FOUND, "No products found matching the criteria").await;
}

#[tokio::test]
async fn unreadable_dataset_is_internal_error_on_every_route() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileProductStore::open(dir.path().join("absent.json"));
    let srv = TestServer::spawn(productlist_api::app::build_app_with_repository(Arc::new(store))).await;

    for path in ["/products", "/products/1", "/products/search?name=laptop"] {
        let res = srv.get(path).await;
        assert_envelope(res, StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").await;
    }
}

#[tokio::test]
async fn configured_json_dataset_is_served() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        br#"[
            {"productId": "a", "name": "Desk Lamp", "price": 25.5,
             "datCreation": "2024-03-01T10:00:00.000+0000", "datUpdate": 1709287200000,
             "specificationsList": null,
             "ratingList": [{"ratingId": "r1", "productId": "a", "evaluation": 4.25, "customerId": "c1"}]}
        ]"#,
    )
    .unwrap();
    let path = file.path().to_string_lossy().into_owned();
    let config = AppConfig::from_lookup(|key| (key == "PRODUCT_LIST_FILE").then(|| path.clone())).unwrap();
    let srv = TestServer::spawn(productlist_api::app::build_app(&config)).await;

    let body: serde_json::Value = srv.get("/products/a").await.json().await.unwrap();
    assert_eq!(body["name"], "Desk Lamp");
    assert_eq!(body["averageRating"].as_f64(), Some(4.25));
    assert_eq!(body["specificationsList"], serde_json::json!([]));
    assert_eq!(body["datCreation"], "2024-03-01T10:00:00.000Z");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_first_requests_share_one_file_load() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        br#"[
            {"productId": "a", "name": "Desk Lamp", "price": 25, "datCreation": "2024-03-01"},
            {"productId": "b", "name": "Floor Lamp", "price": 90, "datCreation": "2024-03-02"}
        ]"#,
    )
    .unwrap();
    let store = Arc::new(JsonFileProductStore::open(file.path()));
    let srv = TestServer::spawn(productlist_api::app::build_app_with_repository(store.clone())).await;

    let client = reqwest::Client::new();
    let requests: Vec<_> = (0..16)
        .map(|i| {
            let url = if i % 2 == 0 {
                format!("{}/products", srv.base_url)
            } else {
                format!("{}/products/search?name=lamp", srv.base_url)
            };
            let client = client.clone();
            tokio::spawn(async move { client.get(url).send().await.unwrap().status() })
        })
        .collect();

    for request in requests {
        assert_eq!(request.await.unwrap(), StatusCode::OK);
    }
    assert!(store.is_loaded());
    assert_eq!(srv.get("/health").await.status(), StatusCode::OK);
}
