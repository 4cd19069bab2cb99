//! Request handlers for the form endpoints.

use std::sync::Arc;

use formcraft_core::{FormSchemaManager, FormStore, NewForm, SchemaError};
use formcraft_forms::render_page;
use formcraft_router::{Request, Response};
use tracing::debug;

/// Manager shared between handlers.
pub type SharedManager<S> = Arc<FormSchemaManager<S>>;

/// Maps a schema error to its HTTP status.
pub fn status_for(err: &SchemaError) -> u16 {
    match err {
        SchemaError::Validation(_) => 400,
        SchemaError::SlugTaken(_) => 409,
        SchemaError::NotFound(_) => 404,
        SchemaError::Storage(_) => 500,
    }
}

/// JSON error response `{"error": reason, "message": ...}` for a schema error.
///
/// Storage failures display only a generic message; the cause is logged by
/// the manager.
pub fn error_response(err: &SchemaError) -> Response {
    Response::error(status_for(err), err.reason_code(), &err.to_string())
}

/// `POST /api/forms`
pub async fn create_form<S: FormStore>(manager: SharedManager<S>, req: Request) -> Response {
    let input: NewForm = match req.json() {
        Ok(input) => input,
        Err(err) => {
            debug!(error = %err, "Rejected create request body");
            return Response::error(400, "invalid-body", &err.to_string());
        }
    };

    match manager.create_definition(input).await {
        Ok(definition) => Response::created(&definition),
        Err(err) => error_response(&err),
    }
}

/// `GET /api/forms`
pub async fn list_forms<S: FormStore>(manager: SharedManager<S>) -> Response {
    match manager.list_definitions().await {
        Ok(definitions) => Response::json(&definitions),
        Err(err) => error_response(&err),
    }
}

/// `GET /api/forms/{slug}`
pub async fn get_form<S: FormStore>(manager: SharedManager<S>, req: Request) -> Response {
    let Ok(slug) = req.params.require("slug") else {
        return Response::not_found();
    };

    match manager.get_definition_by_slug(slug).await {
        Ok(definition) => Response::json(&definition),
        Err(err) => error_response(&err),
    }
}

/// `GET /forms/{slug}`: the fillable HTML form.
///
/// The form posts to the `action` query parameter, or back to the page's
/// own path when absent.
pub async fn show_form<S: FormStore>(manager: SharedManager<S>, req: Request) -> Response {
    let Ok(slug) = req.params.require("slug") else {
        return Response::not_found();
    };

    match manager.get_definition_by_slug(slug).await {
        Ok(definition) => {
            let action = req.get_query("action").unwrap_or(&req.path);
            Response::html(render_page(&definition, action))
        }
        Err(SchemaError::NotFound(_)) => Response::not_found(),
        Err(_) => Response::internal_server_error(),
    }
}

/// `GET /health`
pub async fn health(_req: Request) -> Response {
    Response::text("ok")
}

#[cfg(test)]
mod tests {
    use formcraft_core::{StoreError, ValidationError};

    use super::*;

    #[test]
    fn test_status_mapping() {
        let validation = SchemaError::Validation(ValidationError::MissingTitle);
        assert_eq!(status_for(&validation), 400);
        assert_eq!(status_for(&SchemaError::SlugTaken("a".into())), 409);
        assert_eq!(status_for(&SchemaError::NotFound("a".into())), 404);
        let storage = SchemaError::Storage(StoreError::backend(std::io::Error::other("disk gone")));
        assert_eq!(status_for(&storage), 500);
    }

    #[test]
    fn test_storage_error_body_is_generic() {
        let storage = SchemaError::Storage(StoreError::backend(std::io::Error::other(
            "database is locked at /var/lib/forms.db",
        )));
        let res = error_response(&storage);
        let body = res.body_string().unwrap();
        assert!(body.contains("storage-error"));
        assert!(!body.contains("/var/lib"));
        assert!(!body.contains("locked"));
    }

    #[test]
    fn test_validation_reason_code() {
        let err = SchemaError::Validation(ValidationError::InvalidFieldType {
            index: 2,
            value: "DATE".into(),
        });
        let res = error_response(&err);
        assert_eq!(res.status, 400);
        assert_eq!(res.body_json().unwrap()["error"], "invalid-field-type");
    }
}
