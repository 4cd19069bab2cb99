//! # formcraft-server
//!
//! HTTP endpoints and command-line tool for formcraft.
//!
//! | Method | Path                | Handler                      |
//! |--------|---------------------|------------------------------|
//! | POST   | `/api/forms`        | [`handlers::create_form`]    |
//! | GET    | `/api/forms`        | [`handlers::list_forms`]     |
//! | GET    | `/api/forms/{slug}` | [`handlers::get_form`]       |
//! | GET    | `/forms/{slug}`     | [`handlers::show_form`]      |
//! | GET    | `/health`           | [`handlers::health`]         |

pub mod commands;
pub mod config;
pub mod handlers;
pub mod http;

use std::sync::Arc;

use formcraft_core::{FormSchemaManager, FormStore};
use formcraft_router::{BodyLimitMiddleware, LoggingMiddleware, Router};

pub use config::ServerConfig;

/// Builds the router for all endpoints over a shared manager.
pub fn build_router<S>(manager: Arc<FormSchemaManager<S>>, config: &ServerConfig) -> Router
where
    S: FormStore + 'static,
{
    let create = Arc::clone(&manager);
    let list = Arc::clone(&manager);
    let get = Arc::clone(&manager);
    let show = manager;

    Router::new()
        .middleware(LoggingMiddleware)
        .middleware(BodyLimitMiddleware::new(config.max_body_bytes))
        .get("/health", handlers::health)
        .post("/api/forms", move |req| {
            handlers::create_form(Arc::clone(&create), req)
        })
        .get("/api/forms", move |_req| handlers::list_forms(Arc::clone(&list)))
        .get("/api/forms/{slug}", move |req| {
            handlers::get_form(Arc::clone(&get), req)
        })
        .get("/forms/{slug}", move |req| {
            handlers::show_form(Arc::clone(&show), req)
        })
}

#[cfg(test)]
mod tests {
    use formcraft_core::MemoryFormStore;
    use formcraft_router::Request;
    use serde_json::{json, Value};

    use super::*;

    fn router() -> Router {
        let manager = Arc::new(FormSchemaManager::new(MemoryFormStore::new()));
        build_router(manager, &ServerConfig::default())
    }

    fn feedback() -> Value {
        json!({
            "title": "Customer Feedback!!!",
            "fields": [
                {"label": "Name", "type": "TEXT", "required": true, "order": 9},
                {"label": "Rating", "type": "RADIO", "required": true,
                 "options": ["Good", "Bad"]},
                {"label": "Email", "type": "email"}
            ]
        })
    }

    async fn create(router: &Router, body: &Value) -> formcraft_router::Response {
        router
            .handle(Request::post_json("/api/forms", body).unwrap())
            .await
    }

    #[tokio::test]
    async fn test_health() {
        let res = router().handle(Request::get("/health")).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body_string(), Some("ok".to_string()));
    }

    #[tokio::test]
    async fn test_create_returns_normalized_definition() {
        let router = router();
        let res = create(&router, &feedback()).await;
        assert_eq!(res.status, 201);

        let body = res.body_json().unwrap();
        assert_eq!(body["slug"], "customer-feedback");
        assert_eq!(body["title"], "Customer Feedback!!!");
        assert_eq!(body["response_count"], 0);
        let fields = body["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0]["order"], 0);
        assert_eq!(fields[1]["order"], 1);
        assert_eq!(fields[2]["type"], "EMAIL");
        assert_eq!(fields[1]["options"], json!(["Good", "Bad"]));
    }

    #[tokio::test]
    async fn test_create_duplicate_is_conflict() {
        let router = router();
        assert_eq!(create(&router, &feedback()).await.status, 201);

        let res = create(&router, &feedback()).await;
        assert_eq!(res.status, 409);
        assert_eq!(res.body_json().unwrap()["error"], "slug-conflict");
    }

    #[tokio::test]
    async fn test_create_validation_errors() {
        let router = router();
        let cases = [
            (json!({"title": "  ", "fields": [{"type": "TEXT"}]}), "missing-title"),
            (json!({"title": "Empty", "fields": []}), "missing-fields"),
            (json!({"title": "Bad", "fields": [{"type": "DATE"}]}), "invalid-field-type"),
            (json!({"title": "Bad", "fields": [{"label": "A"}]}), "invalid-field-type"),
            (json!({"title": "Bad", "fields": [{"type": 5}]}), "invalid-field-type"),
            (json!({"title": "!!!", "fields": [{"type": "TEXT"}]}), "unslugifiable-title"),
            (
                json!({"title": "Ok", "slug": "Not Canonical", "fields": [{"type": "TEXT"}]}),
                "invalid-slug",
            ),
        ];

        for (body, reason) in cases {
            let res = create(&router, &body).await;
            assert_eq!(res.status, 400, "{reason}");
            assert_eq!(res.body_json().unwrap()["error"], reason);
        }

        let list = router.handle(Request::get("/api/forms")).await;
        assert_eq!(list.body_json().unwrap(), json!([]));
    }

    #[tokio::test]
    async fn test_create_ignores_client_order_values() {
        let router = router();
        let body = json!({
            "title": "Odd Orders",
            "fields": [
                {"label": "A", "type": "TEXT", "order": 1.5},
                {"label": "B", "type": "TEXT", "order": null},
                {"label": "C", "type": "TEXT", "order": "3"},
                {"label": "D", "type": "TEXT", "order": 1e30}
            ]
        });

        let res = create(&router, &body).await;
        assert_eq!(res.status, 201);
        let body = res.body_json().unwrap();
        let orders: Vec<u64> = body["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["order"].as_u64().unwrap())
            .collect();
        assert_eq!(orders, [0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_create_malformed_body() {
        let res = router()
            .handle(Request::post("/api/forms").body("{\"title\": "))
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body_json().unwrap()["error"], "invalid-body");
    }

    #[tokio::test]
    async fn test_create_oversized_body() {
        let manager = Arc::new(FormSchemaManager::new(MemoryFormStore::new()));
        let router = build_router(manager, &ServerConfig::default().max_body_bytes(16));

        let res = create(&router, &feedback()).await;
        assert_eq!(res.status, 413);
    }

    #[tokio::test]
    async fn test_get_and_list() {
        let router = router();
        create(&router, &feedback()).await;
        create(
            &router,
            &json!({"title": "Signup", "fields": [{"label": "Email", "type": "EMAIL"}]}),
        )
        .await;

        let res = router
            .handle(Request::get("/api/forms/customer-feedback"))
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body_json().unwrap()["fields"][0]["label"], "Name");

        let res = router.handle(Request::get("/api/forms")).await;
        let slugs: Vec<String> = res
            .body_json()
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["slug"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(slugs, ["signup", "customer-feedback"]);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let res = router().handle(Request::get("/api/forms/nope")).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body_json().unwrap()["error"], "not-found");
    }

    #[tokio::test]
    async fn test_show_form_renders_html() {
        let router = router();
        create(&router, &feedback()).await;

        let res = router.handle(Request::get("/forms/customer-feedback")).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.content_type(), Some("text/html; charset=utf-8"));
        let html = res.body_string().unwrap();
        assert!(html.contains("/forms/customer-feedback"));
        assert!(html.contains(r#"type="radio""#));

        let res = router
            .handle(Request::get("/forms/customer-feedback").query_param("action", "/collect"))
            .await;
        assert!(res.body_string().unwrap().contains("/collect"));

        let res = router.handle(Request::get("/forms/missing")).await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn test_unknown_route_and_method() {
        let router = router();
        assert_eq!(router.handle(Request::get("/nope")).await.status, 404);
        assert_eq!(router.handle(Request::post("/health")).await.status, 405);
    }
}
