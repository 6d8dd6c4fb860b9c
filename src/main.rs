mod config;
mod constants;
mod errors;
mod handlers;
mod models;
mod openapi;
mod repositories;
mod rest;
mod routes;
mod services;
mod utils;
mod validators;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;
use mongodb::{bson::doc, Client};

use crate::config::CONFIG;
use crate::errors::{json_error_handler, query_error_handler};
use crate::repositories::Repositories;
use crate::services::{
    AccountTypeService, BankAccountService, BankService, EmployeeService, PurchaseOrderService,
    SupplierService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Loads .env before the logger reads RUST_LOG
    lazy_static::initialize(&CONFIG);
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    info!("Connecting to MongoDB...");
    let client = Client::with_uri_str(&CONFIG.mongodb_uri)
        .await
        .expect("Failed to connect to MongoDB");

    let db = client.database(&CONFIG.database_name);

    db.run_command(doc! { "ping": 1 })
        .await
        .expect("Failed to ping MongoDB");
    info!("Connected to MongoDB successfully!");

    let repositories = Repositories::new(&db);
    repositories
        .create_indexes()
        .await
        .expect("Failed to create MongoDB indexes");

    let bank_service = web::Data::new(BankService::new(&repositories));
    let account_type_service = web::Data::new(AccountTypeService::new(&repositories));
    let bank_account_service = web::Data::new(BankAccountService::new(&repositories));
    let supplier_service = web::Data::new(SupplierService::new(&repositories));
    let order_service = web::Data::new(PurchaseOrderService::new(&repositories));
    let employee_service = web::Data::new(EmployeeService::new(&repositories));

    let server_addr = format!("{}:{}", CONFIG.server_host, CONFIG.server_port);
    info!("Starting server at http://{}", server_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(bank_service.clone())
            .app_data(account_type_service.clone())
            .app_data(bank_account_service.clone())
            .app_data(supplier_service.clone())
            .app_data(order_service.clone())
            .app_data(employee_service.clone())
            .configure(routes::configure_routes)
    })
    .bind(&server_addr)?
    .run()
    .await
}
