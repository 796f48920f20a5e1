use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use catalog_core::ProductId;
use catalog_products::{Draft, Field, ProductType, to_create_payload};
use catalog_service::{CatalogConfig, CatalogService, HttpCatalogService, Listing, ServiceError};
use serde_json::{Value, json};

#[derive(Clone, Default)]
struct Recorded {
    bodies: Arc<Mutex<Vec<Value>>>,
    auth: Arc<Mutex<Vec<String>>>,
}

struct StubServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl StubServer {
    async fn spawn(app: Router) -> Self {
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

    fn client(&self) -> HttpCatalogService {
        let config = CatalogConfig::new(self.base_url.clone()).with_token("test-token");
        HttpCatalogService::new(config).unwrap()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn list_products() -> Json<Value> {
    Json(json!([
        {"id": 1, "sku": "JVC200123", "name": "Acme DISC", "price": "1.00",
         "type": "DVD", "sizeMB": "700"},
        {"id": 2, "sku": "GGWP0007", "name": "War and Peace", "price": "20.00",
         "type": "Book", "weightKG": "2"},
        {"id": 3, "sku": "TR120555", "name": "Chair", "price": "40.00",
         "type": "Furniture", "heightCM": "24", "widthCM": "45", "lengthCM": "15"}
    ]))
}

async fn add_product(
    State(rec): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        rec.auth.lock().unwrap().push(auth.to_string());
    }
    rec.bodies.lock().unwrap().push(body);
    Json(json!({"message": "Product added successfully"}))
}

async fn delete_products(
    State(rec): State<Recorded>,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    let refuses = body["ids"].as_array().is_some_and(|ids| ids.contains(&json!(99)));
    rec.bodies.lock().unwrap().push(body);
    if refuses {
        (StatusCode::OK, "cannot delete 99".to_string())
    } else {
        (StatusCode::NO_CONTENT, String::new())
    }
}

fn catalog_app(rec: Recorded) -> Router {
    Router::new()
        .route("/fetch_products.php", get(list_products))
        .route("/add_product.php", post(add_product))
        .route("/delete_products.php", delete(delete_products))
        .with_state(rec)
}

#[tokio::test]
async fn list_decodes_every_variant() {
    let srv = StubServer::spawn(catalog_app(Recorded::default())).await;

    let products = match srv.client().list().await.unwrap() {
        Listing::Products(products) => products,
        other => panic!("expected products, got {other:?}"),
    };

    let types: Vec<ProductType> = products.iter().map(|p| p.product_type()).collect();
    assert_eq!(types, vec![ProductType::Dvd, ProductType::Book, ProductType::Furniture]);
}

#[tokio::test]
async fn non_array_list_body_is_malformed() {
    let app = Router::new().route(
        "/fetch_products.php",
        get(|| async { Json(json!({"error": "db down"})) }),
    );
    let srv = StubServer::spawn(app).await;

    let listing = srv.client().list().await.unwrap();
    assert_eq!(listing, Listing::Malformed(json!({"error": "db down"})));
}

#[tokio::test]
async fn html_list_body_is_malformed() {
    let app = Router::new().route("/fetch_products.php", get(|| async { "<html>oops</html>" }));
    let srv = StubServer::spawn(app).await;

    let listing = srv.client().list().await.unwrap();
    assert!(matches!(listing, Listing::Malformed(Value::String(_))));
}

#[tokio::test]
async fn list_server_error_is_a_status_error() {
    let app = Router::new().route(
        "/fetch_products.php",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let srv = StubServer::spawn(app).await;

    let err = srv.client().list().await.unwrap_err();
    assert_eq!(err, ServiceError::status(500, "boom"));
}

#[tokio::test]
async fn create_posts_only_the_active_variant_fields() {
    let rec = Recorded::default();
    let srv = StubServer::spawn(catalog_app(rec.clone())).await;

    // Leftover DVD size must not travel with a Book.
    let mut draft = Draft::new();
    for (field, value) in [
        (Field::SizeMb, "700"),
        (Field::Type, "Book"),
        (Field::Sku, "B-1"),
        (Field::Name, "Novel"),
        (Field::Price, "12.50"),
        (Field::WeightKg, "0.8"),
    ] {
        draft.set(field, value).unwrap();
    }
    let payload = to_create_payload(&draft).unwrap();

    let ack = srv.client().create(&payload).await.unwrap();
    assert_eq!(ack.message, "Product added successfully");

    let bodies = rec.bodies.lock().unwrap().clone();
    assert_eq!(bodies.len(), 1);
    let sent = bodies[0].as_object().unwrap();
    let mut keys: Vec<&str> = sent.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["name", "price", "sku", "type", "weightKG"]);
    assert_eq!(sent["type"], "Book");

    let auth = rec.auth.lock().unwrap().clone();
    assert_eq!(auth, vec!["Bearer test-token".to_string()]);
}

#[tokio::test]
async fn delete_sends_ids_and_accepts_204() {
    let rec = Recorded::default();
    let srv = StubServer::spawn(catalog_app(rec.clone())).await;

    srv.client()
        .delete(&[ProductId::from(1u64), ProductId::from("abc")])
        .await
        .unwrap();

    let bodies = rec.bodies.lock().unwrap().clone();
    assert_eq!(bodies, vec![json!({"ids": [1, "abc"]})]);
}

#[tokio::test]
async fn odd_numeric_ids_survive_list_and_delete() {
    let rec = Recorded::default();
    let app = Router::new()
        .route(
            "/fetch_products.php",
            get(|| async {
                Json(json!([
                    {"id": -1, "sku": "N", "name": "Neg", "price": 1,
                     "type": "DVD", "sizeMB": 1},
                    {"id": 1.5, "sku": "F", "name": "Frac", "price": 1,
                     "type": "Book", "weightKG": 1},
                    {"id": "x-2", "sku": "T", "name": "Text", "price": 1,
                     "type": "DVD", "sizeMB": 1}
                ]))
            }),
        )
        .route("/delete_products.php", delete(delete_products))
        .with_state(rec.clone());
    let srv = StubServer::spawn(app).await;
    let client = srv.client();

    let products = client.list().await.unwrap().into_products();
    assert_eq!(products.len(), 3);
    let ids: Vec<ProductId> = products.into_iter().map(|p| p.id).collect();

    client.delete(&ids).await.unwrap();

    let bodies = rec.bodies.lock().unwrap().clone();
    assert_eq!(bodies, vec![json!({"ids": [-1, 1.5, "x-2"]})]);
}

#[tokio::test]
async fn delete_without_204_is_a_failure() {
    let srv = StubServer::spawn(catalog_app(Recorded::default())).await;

    let err = srv.client().delete(&[ProductId::from(99u64)]).await.unwrap_err();
    assert_eq!(err, ServiceError::status(200, "cannot delete 99"));
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpCatalogService::new(CatalogConfig::new(format!("http://{addr}"))).unwrap();
    let err = client.list().await.unwrap_err();
    assert!(matches!(err, ServiceError::Network(_)));
}
