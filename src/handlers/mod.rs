//! HTTP request handlers organized by domain.

pub mod bank_account_handler;
pub mod bank_handler;
pub mod employee_handler;
pub mod purchase_order_handler;
pub mod root_handler;
pub mod supplier_handler;

pub use bank_account_handler::*;
pub use bank_handler::*;
pub use employee_handler::*;
pub use purchase_order_handler::*;
pub use root_handler::*;
pub use supplier_handler::*;

use actix_web::{http::header, HttpRequest, HttpResponse};
use serde_json::Value;

/// 201 response with a `Location` header pointing at the new record.
fn created(req: &HttpRequest, id: &str, body: Value) -> HttpResponse {
    let location = format!("{}/{}", req.path().trim_end_matches('/'), id);
    HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::{self, TestRequest};
    use actix_web::{web, App};
    use serde_json::json;

    use crate::errors::ApiError;
    use crate::models::BankResponse;
    use crate::rest::{build_item, ListQuery};

    async fn show_bank(query: ListQuery) -> Result<HttpResponse, ApiError> {
        let bank = BankResponse {
            id: "507f1f77bcf86cd799439011".to_string(),
            name: "Banco Nación".to_string(),
            bcra_code: Some("011".to_string()),
            cuit: Some("30500010912".to_string()),
        };
        Ok(HttpResponse::Ok().json(build_item(&bank, &query)?))
    }

    #[test]
    fn test_created_location() {
        let req = TestRequest::post().uri("/api/v1/banks/").to_http_request();
        let resp = created(&req, "abc", json!({ "id": "abc" }));
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/api/v1/banks/abc"
        );
    }

    #[actix_web::test]
    async fn test_select_on_single_item() {
        let app = test::init_service(App::new().route("/bank", web::get().to(show_bank))).await;
        let req = TestRequest::get().uri("/bank?select=name").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            json!({ "id": "507f1f77bcf86cd799439011", "name": "Banco Nación" })
        );
    }

    #[actix_web::test]
    async fn test_omit_on_single_item() {
        let app = test::init_service(App::new().route("/bank", web::get().to(show_bank))).await;
        let req = TestRequest::get()
            .uri("/bank?omit=cuit&omit=bcra_code,id")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            json!({ "id": "507f1f77bcf86cd799439011", "name": "Banco Nación" })
        );
    }

    #[actix_web::test]
    async fn test_malformed_page_on_single_item() {
        let app = test::init_service(App::new().route("/bank", web::get().to(show_bank))).await;
        let req = TestRequest::get().uri("/bank?page=first").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
