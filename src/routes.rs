// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, auth, pages, profile, quiz},
    state::AppState,
    utils::session::{admin_middleware, auth_middleware},
};

/// Assembles the main application router.
///
/// * Public pages, login forms and the question API.
/// * Student routes behind the session check.
/// * Admin routes behind the session check and the admin check.
/// * Global middleware (Trace, CORS) and shared state.
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:5000"),
        HeaderValue::from_static("http://127.0.0.1:5000"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    let public_routes = Router::new()
        .route("/", get(pages::home))
        .route(
            "/student-login",
            get(auth::student_login_page).post(auth::student_login),
        )
        .route(
            "/login",
            get(auth::student_login_page).post(auth::student_login),
        )
        .route(
            "/admin-login",
            get(auth::admin_login_page).post(auth::admin_login),
        )
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/quiz/{subject}", get(quiz::quiz_page))
        .route("/api/questions/{subject}", get(quiz::get_questions));

    let student_routes = Router::new()
        .route("/logout", get(auth::logout))
        .route("/profile", get(profile::profile))
        .route("/api/student/analytics", get(profile::get_student_analytics))
        .route("/api/student/results", get(profile::get_student_results))
        .route("/api/quiz/progress", post(quiz::save_quiz_progress))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let admin_routes = Router::new()
        .route("/admin", get(admin::dashboard))
        .route("/admin/marks/upload", post(admin::upload_marks))
        .route("/admin/users/{id}/delete", post(admin::delete_user))
        .route("/admin/users/{id}/toggle-admin", post(admin::toggle_admin))
        .route("/admin/quiz/{subject}/toggle", post(admin::toggle_quiz))
        .route("/admin/questions/add", post(admin::add_question))
        .route("/admin/questions/delete", post(admin::delete_question))
        .route("/api/admin/analytics", get(admin::get_admin_analytics))
        // Double middleware protection: Auth first, then Admin check
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(student_routes)
        .merge(admin_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
