use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::redirect::Policy;

use stockroom_core::Entity;
use stockroom_infra::{Config, InventoryStore, SqliteInventoryStore};

struct TestServer {
    base_url: String,
    store: Arc<SqliteInventoryStore>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, backed by a private in-memory database and bound
        // to an ephemeral port.
        let store = Arc::new(
            SqliteInventoryStore::connect(&Config::in_memory())
                .await
                .expect("failed to open store"),
        );
        let app = stockroom_api::app::build_app(store.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            store,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(Policy::none())
        .build()
        .unwrap()
}

async fn add_product(srv: &TestServer, client: &reqwest::Client, name: &str, qty: &str, price: &str) -> reqwest::Response {
    client
        .post(srv.url("/add"))
        .form(&[("name", name), ("quantity", qty), ("price", price)])
        .send()
        .await
        .unwrap()
}

async fn lookup_id(srv: &TestServer, client: &reqwest::Client, name: &str) -> i64 {
    let res = client
        .get(srv.url("/get_product_id"))
        .query(&[("product_name", name)])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    body["product_id"].as_i64().unwrap()
}

async fn post_transaction(
    srv: &TestServer,
    client: &reqwest::Client,
    product_id: &str,
    kind: &str,
    qty: &str,
) -> reqwest::Response {
    client
        .post(srv.url("/transaction"))
        .form(&[
            ("product_id", product_id),
            ("transaction_type", kind),
            ("quantity", qty),
        ])
        .send()
        .await
        .unwrap()
}

fn location(res: &reqwest::Response) -> &str {
    res.headers()
        .get(reqwest::header::LOCATION)
        .expect("missing Location header")
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn().await;
    let res = client().get(srv.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn add_product_redirects_home_and_renders() {
    let srv = TestServer::spawn().await;
    let client = client();

    let res = add_product(&srv, &client, "Widget", "10", "2.5").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");

    let html = client.get(srv.url("/")).send().await.unwrap().text().await.unwrap();
    assert!(html.contains("Widget"));

    let table = client
        .get(srv.url("/products"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(table.contains("<td>Widget</td>"));
    assert!(table.contains("<td>10</td>"));
}

#[tokio::test]
async fn add_product_rejects_malformed_numbers() {
    let srv = TestServer::spawn().await;
    let client = client();

    let res = add_product(&srv, &client, "Widget", "ten", "2.5").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = add_product(&srv, &client, "Widget", "1", "-1").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    assert!(srv.store.list_products().await.unwrap().is_empty());
}

#[tokio::test]
async fn widget_sale_lifecycle() {
    let srv = TestServer::spawn().await;
    let client = client();

    add_product(&srv, &client, "Widget", "10", "2.5").await;
    let id = lookup_id(&srv, &client, "Widget").await;

    let res = post_transaction(&srv, &client, &id.to_string(), "sale", "4").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");

    let res = post_transaction(&srv, &client, &id.to_string(), "sale", "100").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = res.text().await.unwrap();
    assert!(body.starts_with("Insufficient stock for sale"));

    let products = srv.store.list_products().await.unwrap();
    assert_eq!(products[0].quantity(), 6);
    assert_eq!(srv.store.list_transactions().await.unwrap().len(), 1);

    let history = client
        .get(srv.url("/transaction_history"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(history.contains("Widget"));
    assert!(history.contains("sale"));
}

#[tokio::test]
async fn transaction_for_unknown_product_is_plain_text_not_found() {
    let srv = TestServer::spawn().await;
    let client = client();

    let res = post_transaction(&srv, &client, "999", "purchase", "1").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "Product with ID 999 not found");
}

#[tokio::test]
async fn transaction_rejects_unknown_type() {
    let srv = TestServer::spawn().await;
    let client = client();

    add_product(&srv, &client, "Widget", "10", "2.5").await;
    let id = lookup_id(&srv, &client, "Widget").await;

    let res = post_transaction(&srv, &client, &id.to_string(), "refund", "1").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(srv.store.list_transactions().await.unwrap().is_empty());
}

#[tokio::test]
async fn get_product_id_misses_with_json_error() {
    let srv = TestServer::spawn().await;
    let client = client();

    let res = client
        .get(srv.url("/get_product_id?product_name=Nonexistent"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Product not found");

    let res = client.get(srv.url("/get_product_id")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_routes_redirect_and_tolerate_missing_rows() {
    let srv = TestServer::spawn().await;
    let client = client();

    add_product(&srv, &client, "Widget", "10", "2.5").await;
    let id = lookup_id(&srv, &client, "Widget").await;
    post_transaction(&srv, &client, &id.to_string(), "purchase", "5").await;
    let tx_id = srv.store.list_transactions().await.unwrap()[0].id();

    let res = client
        .get(srv.url(&format!("/delete_transaction/{tx_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/transaction_history");

    // Deleting a transaction leaves the purchased stock in place.
    assert_eq!(srv.store.list_products().await.unwrap()[0].quantity(), 15);

    for _ in 0..2 {
        let res = client
            .get(srv.url(&format!("/delete/{id}")))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), "/products");
    }
    assert!(srv.store.list_products().await.unwrap().is_empty());

    let res = client.get(srv.url("/delete/not-a-number")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
