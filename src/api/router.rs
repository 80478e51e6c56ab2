use axum::{
    body::Body,
    extract::Request,
    handler::Handler,
    http::{header::{AUTHORIZATION, CONTENT_TYPE}, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::guards::{authenticate, require_admin, require_manager};
use crate::api::handlers::{
    auth, client, general_settings, health, ldap, project, quote, sale, settings, task, user, work_unit,
};
use tower_http::{
    classify::ServerErrorsFailureClass,
    cors::CorsLayer,
    trace::TraceLayer,
};
use tracing::{info_span, Span, error, info, warn};
use uuid::Uuid;

fn cors_layer(frontend_url: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    match HeaderValue::from_str(frontend_url) {
        Ok(origin) => cors.allow_origin(origin),
        Err(_) => {
            warn!("FRONTEND_URL is not a valid origin, CORS disabled: {}", frontend_url);
            cors
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    // Everything here requires at least the manager role.
    let manager_routes = Router::new()
        // Work units
        .route("/api/work-units", get(work_unit::list_work_units)
            .post(work_unit::create_work_unit.layer(from_fn(require_admin))))
        .route("/api/work-units/{id}", get(work_unit::get_work_unit)
            .put(work_unit::update_work_unit.layer(from_fn(require_admin)))
            .delete(work_unit::delete_work_unit.layer(from_fn(require_admin))))
        .route("/api/work-units/{id}/users", get(work_unit::list_work_unit_users)
            .post(work_unit::update_work_unit_users.layer(from_fn(require_admin))))

        // Quotes & Sales
        .route("/api/quotes", get(quote::list_quotes).post(quote::create_quote))
        .route("/api/quotes/{id}", put(quote::update_quote).delete(quote::delete_quote))
        .route("/api/sales", get(sale::list_sales).post(sale::create_sale))
        .route("/api/sales/{id}", put(sale::update_sale).delete(sale::delete_sale))
        .route_layer(from_fn(require_manager));

    let admin_routes = Router::new()
        .route("/api/ldap/config", get(ldap::get_config).put(ldap::update_config))
        .route("/api/ldap/sync", post(ldap::sync))
        .route_layer(from_fn(require_admin));

    let protected = Router::new()
        .route("/api/auth/me", get(auth::me))

        // Users
        .route("/api/users", get(user::list_users)
            .post(user::create_user.layer(from_fn(require_admin))))
        .route("/api/users/{id}", delete(user::delete_user.layer(from_fn(require_admin))))
        .route("/api/users/{id}/assignments", get(user::get_assignments)
            .post(user::update_assignments.layer(from_fn(require_manager))))

        // Clients, projects, tasks
        .route("/api/clients", get(client::list_clients)
            .post(client::create_client.layer(from_fn(require_manager))))
        .route("/api/clients/{id}", delete(client::delete_client.layer(from_fn(require_admin))))
        .route("/api/projects", get(project::list_projects)
            .post(project::create_project.layer(from_fn(require_manager))))
        .route("/api/projects/{id}", delete(project::delete_project.layer(from_fn(require_admin))))
        .route("/api/tasks", get(task::list_tasks).post(task::create_task))
        .route("/api/tasks/{id}", put(task::update_task).delete(task::delete_task))

        // Settings
        .route("/api/settings", get(settings::get_settings).put(settings::update_settings))
        .route("/api/settings/password", put(settings::change_password))
        .route("/api/general-settings", get(general_settings::get_general_settings)
            .put(general_settings::update_general_settings.layer(from_fn(require_admin))))

        .merge(manager_routes)
        .merge(admin_routes)
        .route_layer(from_fn_with_state(state.clone(), authenticate));

    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/auth/login", post(auth::login))
        .merge(protected)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(cors_layer(&state.config.frontend_url))
        .with_state(state)
}
