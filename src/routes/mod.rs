use actix_web::web;

use crate::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("", web::get().to(handlers::api_root))
            .route("/docs", web::get().to(handlers::api_docs))
            .route("/health", web::get().to(handlers::health_check))
            .service(
                web::scope("/v1")
                    // Banks; account types must be registered before /{id}
                    .service(
                        web::scope("/banks")
                            .route("", web::get().to(handlers::list_banks))
                            .route("", web::post().to(handlers::create_bank))
                            .route("/account_types", web::get().to(handlers::list_account_types))
                            .route("/account_types", web::post().to(handlers::create_account_type))
                            .route("/account_types/{id}", web::get().to(handlers::get_account_type))
                            .route(
                                "/account_types/{id}",
                                web::patch().to(handlers::update_account_type),
                            )
                            .route(
                                "/account_types/{id}",
                                web::delete().to(handlers::delete_account_type),
                            )
                            .route("/{id}", web::get().to(handlers::get_bank))
                            .route("/{id}", web::patch().to(handlers::update_bank))
                            .route("/{id}", web::delete().to(handlers::delete_bank)),
                    )
                    .service(
                        web::scope("/bank_accounts")
                            .route("", web::get().to(handlers::list_bank_accounts))
                            .route("", web::post().to(handlers::create_bank_account))
                            .route("/{id}", web::get().to(handlers::get_bank_account))
                            .route("/{id}", web::delete().to(handlers::delete_bank_account)),
                    )
                    .service(
                        web::scope("/suppliers")
                            .route("", web::get().to(handlers::list_suppliers))
                            .route("", web::post().to(handlers::create_supplier))
                            .route("/{id}", web::get().to(handlers::get_supplier))
                            .route("/{id}", web::patch().to(handlers::update_supplier))
                            .route("/{id}", web::delete().to(handlers::delete_supplier))
                            .route("/{id}/orders", web::get().to(handlers::list_supplier_orders))
                            .route("/{id}/orders", web::post().to(handlers::create_supplier_order))
                            .route(
                                "/{id}/orders/{order_id}",
                                web::get().to(handlers::get_supplier_order),
                            )
                            .route(
                                "/{id}/bank_accounts",
                                web::get().to(handlers::list_supplier_bank_accounts),
                            ),
                    )
                    .service(
                        web::scope("/purchases/orders")
                            .route("", web::get().to(handlers::list_orders))
                            .route("", web::post().to(handlers::create_order))
                            .route("/{id}", web::get().to(handlers::get_order))
                            .route("/{id}", web::patch().to(handlers::update_order)),
                    )
                    .service(
                        web::scope("/employees")
                            .route("", web::get().to(handlers::list_employees))
                            .route("", web::post().to(handlers::create_employee))
                            .route("/{id}", web::get().to(handlers::get_employee))
                            .route("/{id}", web::patch().to(handlers::update_employee))
                            .route("/{id}", web::delete().to(handlers::delete_employee))
                            .route("/{id}/attendance", web::get().to(handlers::get_attendance))
                            .route("/{id}/attendance", web::post().to(handlers::record_punch)),
                    ),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use mongodb::Client;
    use serde_json::{json, Value};

    use crate::constants::{
        CODE_INVALID_BODY, CODE_INVALID_PARAMETER, CODE_NOT_FOUND, ERR_ACCOUNT_TYPE_NOT_FOUND,
        ERR_BANK_NOT_FOUND, ERR_REQUIRED_FIELD,
    };
    use crate::errors::{json_error_handler, query_error_handler};
    use crate::repositories::Repositories;
    use crate::services::{
        AccountTypeService, BankAccountService, BankService, EmployeeService,
        PurchaseOrderService, SupplierService,
    };

    /// The application as `main` wires it. The client connects lazily and
    /// every request below is answered before the database is reached.
    macro_rules! app {
        () => {{
            let uri = "mongodb://127.0.0.1:27017/?serverSelectionTimeoutMS=200";
            let client = Client::with_uri_str(uri).await.unwrap();
            let repositories = Repositories::new(&client.database("nobix_test"));
            test::init_service(
                App::new()
                    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                    .app_data(web::Data::new(BankService::new(&repositories)))
                    .app_data(web::Data::new(AccountTypeService::new(&repositories)))
                    .app_data(web::Data::new(BankAccountService::new(&repositories)))
                    .app_data(web::Data::new(SupplierService::new(&repositories)))
                    .app_data(web::Data::new(PurchaseOrderService::new(&repositories)))
                    .app_data(web::Data::new(EmployeeService::new(&repositories)))
                    .configure(configure_routes),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn test_non_numeric_page_size_is_bad_request() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/v1/banks?per_page=abc")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], CODE_INVALID_PARAMETER);
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn test_unknown_enum_code_is_bad_request() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/suppliers")
            .set_json(json!({ "name": "Acme", "fiscal_type": "FISCAL_BOGUS" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], CODE_INVALID_BODY);
        assert!(body["error"].as_str().unwrap().contains("FISCAL_BOGUS"));
    }

    #[actix_web::test]
    async fn test_malformed_json_is_bad_request() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/banks")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"name\":")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], CODE_INVALID_BODY);
    }

    #[actix_web::test]
    async fn test_non_numeric_month_is_bad_request() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/v1/employees/5f0000000000000000000000/attendance?month=x")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], CODE_INVALID_PARAMETER);
    }

    #[actix_web::test]
    async fn test_missing_required_field_is_unprocessable() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/suppliers")
            .set_json(json!({ "notes": "no name" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["messages"]["name"][0], ERR_REQUIRED_FIELD);
    }

    #[actix_web::test]
    async fn test_account_types_are_not_taken_as_bank_ids() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/v1/banks/account_types/nope")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], ERR_ACCOUNT_TYPE_NOT_FOUND);
        assert_eq!(body["code"], CODE_NOT_FOUND);

        let req = test::TestRequest::get().uri("/api/v1/banks/nope").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["error"], ERR_BANK_NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_unknown_route_is_not_found() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/v1/nothing").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
