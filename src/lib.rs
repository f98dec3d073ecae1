//! HR administration proxy for an Odoo ERP.
//!
//! Relays employee, department, payroll and attendance operations from the
//! browser to the ERP's XML-RPC interface, and ships the matching client
//! facade.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod odoo;
pub mod xmlrpc;

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use odoo::OdooClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub odoo: Arc<OdooClient>,
    pub config: Arc<Config>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone PSK for the auth layer
    let psk = state.config.api_psk.clone();

    let odoo_routes = Router::new()
        // Employees
        .route(
            "/employees",
            get(api::list_employees).post(api::create_employee),
        )
        .route(
            "/employees/{id}",
            get(api::get_employee)
                .put(api::update_employee)
                .delete(api::delete_employee),
        )
        // Departments
        .route(
            "/departments",
            get(api::list_departments).post(api::create_department),
        )
        .route(
            "/departments/{id}",
            get(api::get_department)
                .put(api::update_department)
                .delete(api::delete_department),
        )
        // Payroll
        .route("/contracts", get(api::list_contracts))
        .route(
            "/payroll",
            get(api::list_payslips).post(api::create_contract),
        )
        .route(
            "/payroll/{id}",
            get(api::get_contract)
                .put(api::update_contract)
                .delete(api::delete_contract),
        )
        // Attendance, jobs, dashboard
        .route("/attendance", get(api::list_attendances))
        .route("/jobs", get(api::list_jobs))
        .route("/stats", get(api::get_stats))
        .route("/test", get(api::test_connection))
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api/odoo", odoo_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
