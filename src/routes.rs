// src/routes.rs

use axum::{
    Router, http::Method, middleware,
    routing::{delete, get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, auth, result, student, teacher},
    models::user::Role,
    state::AppState,
    utils::jwt::{auth_middleware, require_role},
};

/// Assembles the main application router.
///
/// * Public routes: register/login and the quiz catalog for taking.
/// * Role-scoped groups each get the same guard pair: authentication
///   first, then the required role.
/// * Applies global middleware (Trace, CORS) and injects `AppState`.
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    // Answer keys never travel through these two routes.
    let catalog_routes = Router::new()
        .route("/quizzes", get(student::list_quizzes))
        .route("/quiz/{quiz_id}/questions", get(student::quiz_questions));

    let admin_routes = Router::new()
        .route("/admin/users", get(admin::list_users))
        .route("/admin/user/{id}", delete(admin::delete_user))
        .route_layer(middleware::from_fn(|req, next| {
            require_role(Role::Admin, req, next)
        }))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let teacher_routes = Router::new()
        .route("/teacher/quiz", post(teacher::create_quiz))
        .route("/teacher/question", post(teacher::add_question))
        .route(
            "/teacher/quiz/{quiz_id}/questions",
            get(teacher::list_questions),
        )
        .route_layer(middleware::from_fn(|req, next| {
            require_role(Role::Teacher, req, next)
        }))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let student_routes = Router::new()
        .route("/student/attempt/{quiz_id}", post(student::attempt_quiz))
        .route("/results/{student_id}", get(result::view_results))
        .route_layer(middleware::from_fn(|req, next| {
            require_role(Role::Student, req, next)
        }))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(auth_routes)
        .merge(catalog_routes)
        .merge(admin_routes)
        .merge(teacher_routes)
        .merge(student_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
