//! API root, documentation and health check.

use actix_web::HttpResponse;
use utoipa::OpenApi;

use crate::constants::{MSG_API_DOCS_PATH, MSG_API_ROOT, MSG_SERVER_RUNNING};
use crate::models::{ApiRootResponse, HealthResponse};
use crate::openapi::ApiDoc;

/// API root
#[utoipa::path(
    get,
    path = "/api",
    tag = "Health",
    responses(
        (status = 200, description = "API root", body = ApiRootResponse)
    )
)]
pub async fn api_root() -> HttpResponse {
    HttpResponse::Ok().json(ApiRootResponse {
        message: MSG_API_ROOT.to_string(),
        docs: MSG_API_DOCS_PATH.to_string(),
    })
}

/// OpenAPI document of the API
#[utoipa::path(
    get,
    path = "/api/docs",
    tag = "Health",
    responses(
        (status = 200, description = "OpenAPI document")
    )
)]
pub async fn api_docs() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Health check
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server is running", body = HealthResponse)
    )
)]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: MSG_SERVER_RUNNING.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};

    #[actix_web::test]
    async fn test_api_root() {
        let app = test::init_service(App::new().route("/api", web::get().to(api_root))).await;
        let req = test::TestRequest::get().uri("/api").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            serde_json::json!({ "message": "This is api root.", "docs": "/api/docs" })
        );
    }

    #[actix_web::test]
    async fn test_docs_list_bank_paths() {
        let app = test::init_service(App::new().route("/api/docs", web::get().to(api_docs))).await;
        let req = test::TestRequest::get().uri("/api/docs").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["paths"]["/api/v1/banks"].is_object());
        assert!(body["paths"]["/api/v1/employees/{id}/attendance"].is_object());
    }
}
