#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use formcraft_core::FormSchemaManager;
use formcraft_router::{Request, Response, Router};
use formcraft_server::{build_router, ServerConfig};
use formcraft_sqlite::SqliteFormStore;
use serde_json::Value;

pub fn database_url(dir: &Path) -> String {
    format!("sqlite:{}", dir.join("forms.sqlite3").display())
}

pub async fn sqlite_router(url: &str) -> Router {
    let store = SqliteFormStore::connect(url, 2)
        .await
        .unwrap_or_else(|e| panic!("Failed to open {url}: {e}"));
    build_router(
        Arc::new(FormSchemaManager::new(store)),
        &ServerConfig::default(),
    )
}

pub async fn post_form(router: &Router, body: &Value) -> Response {
    router
        .handle(Request::post_json("/api/forms", body).expect("serializable body"))
        .await
}

pub async fn get_json(router: &Router, path: &str) -> (u16, Value) {
    let res = router.handle(Request::get(path)).await;
    let body = res.body_json().unwrap_or(Value::Null);
    (res.status, body)
}
