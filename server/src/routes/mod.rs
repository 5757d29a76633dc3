//! HTTP route definitions.

mod admin;
mod cart;
mod catalog;
mod health;

use crate::AppState;
use axum::Router;

/// Create all application routes.
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(catalog::routes())
        .merge(admin::routes())
        .merge(cart::routes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::StaticCatalog;
    use crate::config::{Config, DEFAULT_CATALOG_API_URL};
    use crate::storage::{MemorySlotStore, SlotStore};
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    };
    use catalog_engine::{Category, Product};
    use serde_json::{json, Value};
    use std::sync::{atomic::Ordering, Arc};
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
        store: Arc<MemorySlotStore>,
        catalog: Arc<StaticCatalog>,
    }

    fn product(id: i64, title: &str, category: Category, image: &str) -> Product {
        Product::new(id, title, 120.0, "from upstream", category, vec![image.to_string()])
    }

    /// Two clean shoes, a placeholder image, an unclean category, a misc category.
    fn upstream() -> Vec<Product> {
        let shoes = Category::new(4, "Shoes");
        vec![
            product(1, "Runner", shoes.clone(), "https://i.imgur.com/1.jpg"),
            product(2, "Boot", shoes, "https://i.imgur.com/2.jpg"),
            product(
                3,
                "Placeholder",
                Category::new(1, "Clothes"),
                "https://placeimg.com/640/480/any",
            ),
            product(4, "Probe", Category::new(5, "testing"), "https://i.imgur.com/4.jpg"),
            product(5, "Widget", Category::new(6, "New-23"), "https://i.imgur.com/5.jpg"),
        ]
    }

    fn test_app(catalog: StaticCatalog) -> TestApp {
        let store = Arc::new(MemorySlotStore::new());
        let catalog = Arc::new(catalog);
        let config = Config {
            host: "127.0.0.1".into(),
            port: 0,
            database_url: None,
            catalog_api_url: DEFAULT_CATALOG_API_URL.into(),
        };

        let slots: Arc<dyn SlotStore> = store.clone();
        let source: Arc<dyn crate::catalog::CatalogSource> = catalog.clone();
        let router = create_routes().with_state(AppState::new(slots, source, config));

        TestApp {
            router,
            store,
            catalog,
        }
    }

    async fn send(app: &TestApp, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = body
            .map(|b| Body::from(b.to_string()))
            .unwrap_or_else(Body::empty);
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap();

        let response = app.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn get(app: &TestApp, uri: &str) -> (StatusCode, Value) {
        send(app, Method::GET, uri, None).await
    }

    fn ids(products: &Value) -> Vec<i64> {
        products
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_i64().unwrap())
            .collect()
    }

    fn lamp() -> Value {
        json!({
            "title": "Lamp",
            "price": 40,
            "description": "Desk lamp",
            "category": {"id": 999, "name": "Local"},
            "images": []
        })
    }

    #[tokio::test]
    async fn health_reports_memory_storage() {
        let app = test_app(StaticCatalog::new(upstream()));
        let (status, body) = get(&app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "memory");
    }

    #[tokio::test]
    async fn home_hides_invalid_images() {
        let app = test_app(StaticCatalog::new(upstream()));
        let (status, body) = get(&app, "/catalog/home").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body["products"]), vec![1, 2, 4, 5]);
        assert_eq!(body["remote"], json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn home_is_limited_to_eight() {
        let many = (1..=12)
            .map(|i| product(i, "p", Category::new(4, "Shoes"), "https://i.imgur.com/p.jpg"))
            .collect();
        let app = test_app(StaticCatalog::new(many));

        let (_, body) = get(&app, "/catalog/home").await;
        assert_eq!(ids(&body["products"]), (1..=8).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn shop_hides_unclean_categories() {
        let app = test_app(StaticCatalog::new(upstream()));
        let (status, body) = get(&app, "/catalog/shop").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body["products"]), vec![1, 2, 5]);
        assert_eq!(body["total"], 3);
        assert_eq!(body["categories"], json!(["All", "Shoes", "Others"]));
    }

    #[tokio::test]
    async fn shop_category_search_and_paging() {
        let app = test_app(StaticCatalog::new(upstream()));

        let (_, body) = get(&app, "/catalog/shop?category=Others").await;
        assert_eq!(ids(&body["products"]), vec![5]);

        let (_, body) = get(&app, "/catalog/shop?search=BOOT").await;
        assert_eq!(ids(&body["products"]), vec![2]);

        let (_, body) = get(&app, "/catalog/shop?offset=1&limit=1").await;
        assert_eq!(ids(&body["products"]), vec![2]);
        assert_eq!(body["total"], 3);
    }

    #[tokio::test]
    async fn create_puts_local_product_first() {
        let app = test_app(StaticCatalog::new(upstream()));

        let (status, created) = send(&app, Method::POST, "/admin/products", Some(lamp())).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_i64().unwrap();
        assert!(id < 0);

        let (_, body) = get(&app, "/admin/products").await;
        let products = body["products"].as_array().unwrap();
        assert_eq!(products.len(), 6);
        assert_eq!(products[0]["id"], id);
        assert_eq!(products[0]["origin"], "local");
        assert_eq!(products[1]["origin"], "remote");

        // Overrides bypass the image filter
        let (_, home) = get(&app, "/catalog/home").await;
        assert_eq!(ids(&home["products"])[0], id);

        assert_eq!(app.catalog.uploads.load(Ordering::SeqCst), 1);
        let stored = app.store.get("local_products").await.unwrap().unwrap();
        assert!(stored.contains("Desk lamp"));
    }

    #[tokio::test]
    async fn create_resolves_category_against_upstream() {
        let mut catalog = StaticCatalog::new(upstream());
        catalog.categories = vec![Category::new(4, "Shoes")];
        let app = test_app(catalog);

        let mut draft = lamp();
        draft["category"] = json!({"id": 4, "name": "whatever"});
        let (_, created) = send(&app, Method::POST, "/admin/products", Some(draft)).await;
        assert_eq!(created["category"], json!({"id": 4, "name": "Shoes"}));

        let mut draft = lamp();
        draft["category"] = json!({"id": 77, "name": "Unknown"});
        let (_, created) = send(&app, Method::POST, "/admin/products", Some(draft)).await;
        assert_eq!(created["category"], json!({"id": 999, "name": "Local"}));
    }

    #[tokio::test]
    async fn create_rejects_invalid_draft() {
        let app = test_app(StaticCatalog::new(upstream()));
        let mut draft = lamp();
        draft["title"] = json!("  ");

        let (status, body) = send(&app, Method::POST, "/admin/products", Some(draft)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("title"));
        assert!(app.store.get("local_products").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn edited_remote_product_shows_on_detail() {
        let app = test_app(StaticCatalog::new(upstream()));

        let patch = json!({"title": "Runner X"});
        let (status, edited) = send(&app, Method::PUT, "/admin/products/1", Some(patch)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(edited["title"], "Runner X");
        assert_eq!(edited["price"], 120.0);

        let (status, detail) = get(&app, "/catalog/products/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["product"]["title"], "Runner X");
        assert_eq!(detail["origin"], "local");
        assert_eq!(ids(&detail["related"]), vec![2]);

        let (_, admin) = get(&app, "/admin/products").await;
        assert_eq!(admin["products"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn edit_rejects_empty_and_unknown() {
        let app = test_app(StaticCatalog::new(upstream()));

        let (status, _) = send(&app, Method::PUT, "/admin/products/1", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let patch = json!({"price": 1});
        let (status, _) = send(&app, Method::PUT, "/admin/products/77", Some(patch)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_hides_remote_product() {
        let app = test_app(StaticCatalog::new(upstream()));

        let (status, body) = send(&app, Method::DELETE, "/admin/products/2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["effect"], "suppressed");

        let (_, body) = send(&app, Method::DELETE, "/admin/products/2", None).await;
        assert_eq!(body["effect"], "alreadyDeleted");

        let (status, _) = get(&app, "/catalog/products/2").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let patch = json!({"title": "Back"});
        let (status, _) = send(&app, Method::PUT, "/admin/products/2", Some(patch)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, stats) = get(&app, "/admin/stats").await;
        assert_eq!(stats["productCount"], 4);
        assert_eq!(stats["deletedCount"], 1);
        assert_eq!(stats["localCount"], 0);
    }

    #[tokio::test]
    async fn deleting_an_edit_restores_remote() {
        let app = test_app(StaticCatalog::new(upstream()));
        send(&app, Method::PUT, "/admin/products/1", Some(json!({"title": "Edited"}))).await;

        let (_, body) = send(&app, Method::DELETE, "/admin/products/1", None).await;
        assert_eq!(body["effect"], "removedOverride");

        let (_, detail) = get(&app, "/catalog/products/1").await;
        assert_eq!(detail["product"]["title"], "Runner");
        assert_eq!(detail["origin"], "remote");
    }

    #[tokio::test]
    async fn unavailable_upstream_still_serves_overrides() {
        let app = test_app(StaticCatalog::unavailable());
        send(&app, Method::POST, "/admin/products", Some(lamp())).await;

        let (status, home) = get(&app, "/catalog/home").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(home["products"].as_array().unwrap().len(), 1);
        assert_eq!(home["remote"]["status"], "unavailable");

        let (status, _) = get(&app, "/admin/categories").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn cart_flow() {
        let app = test_app(StaticCatalog::new(upstream()));

        send(&app, Method::POST, "/cart/items", Some(json!({"productId": 1}))).await;
        let (status, cart) = send(&app, Method::POST, "/cart/items", Some(json!({"productId": 1}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cart["count"], 2);
        assert_eq!(cart["total"], 240.0);
        assert_eq!(cart["items"][0]["quantity"], 2);

        let (_, cart) = send(&app, Method::PATCH, "/cart/items/1", Some(json!({"change": -5}))).await;
        assert_eq!(cart["items"][0]["quantity"], 1);

        let (status, summary) = send(&app, Method::POST, "/cart/checkout", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary["count"], 1);
        assert_eq!(summary["total"], 120.0);

        let (_, cart) = get(&app, "/cart").await;
        assert_eq!(cart["count"], 0);

        let (status, _) = send(&app, Method::POST, "/cart/checkout", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn cart_rejects_unknown_products() {
        let app = test_app(StaticCatalog::new(upstream()));

        let (status, _) = send(&app, Method::POST, "/cart/items", Some(json!({"productId": 99}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::DELETE, "/cart/items/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cart_keeps_local_products() {
        let app = test_app(StaticCatalog::new(upstream()));
        let (_, created) = send(&app, Method::POST, "/admin/products", Some(lamp())).await;
        let id = created["id"].as_i64().unwrap();

        send(&app, Method::POST, "/cart/items", Some(json!({"productId": id}))).await;
        send(&app, Method::POST, "/cart/items", Some(json!({"productId": 2}))).await;

        let (_, cart) = send(&app, Method::DELETE, "/cart/items/2", None).await;
        assert_eq!(ids(&cart["items"]), vec![id]);

        let (_, cart) = send(&app, Method::DELETE, "/cart", None).await;
        assert_eq!(cart["count"], 0);
    }
}
