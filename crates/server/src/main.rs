// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use bookstore_api::{
    ApiError, AuthenticationService, BookRequest, BookResponse, CreateOrderRequest,
    CustomerResponse, LoginRequest, LoginResponse, OrderResponse, RegisterRequest,
    UpdateCustomerRequest, UpdateOrderBooksRequest, UpdateOrderStatusRequest, create_book,
    create_order, delete_book, delete_customer, delete_order, get_book, get_customer, get_order,
    list_books, list_customer_orders, list_customers, list_orders, search_books, update_book,
    update_customer, update_order_books, update_order_status,
};
use bookstore_persistence::Persistence;

mod seed;
mod session;

use session::{BearerToken, CurrentPrincipal};

/// Bookstore Server - HTTP server for the bookstore back-office
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Load the sample catalog into an empty store on startup
    #[arg(long)]
    seed: bool,

    /// Ensure an admin account exists for this email on startup
    #[arg(long, requires = "admin_password")]
    create_admin: Option<String>,

    /// Password for the admin account created by --create-admin
    #[arg(long)]
    admin_password: Option<String>,
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a mutex; a handler holds the lock
/// for its whole authorize-validate-price-persist sequence, so a single
/// order mutation is atomic with respect to other requests.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
}

/// Query parameters for catalog search.
#[derive(Debug, Deserialize)]
struct SearchQuery {
    /// Case-insensitive substring matched against title and authors.
    query: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidInput { .. }
            | ApiError::UnknownBook { .. }
            | ApiError::PasswordPolicyViolation { .. } => StatusCode::BAD_REQUEST,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Auth handlers
// ============================================================================

/// Handler for POST `/api/auth/register`.
async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), HttpError> {
    info!("Handling register request");

    let mut persistence = app_state.persistence.lock().await;
    let response: CustomerResponse = AuthenticationService::register(&mut persistence, &req)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/api/auth/login`.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!("Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = AuthenticationService::login(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/auth/logout`.
///
/// Always succeeds, including for callers with no session at all.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    BearerToken(token): BearerToken,
) -> Result<StatusCode, HttpError> {
    info!("Handling logout request");

    let mut persistence = app_state.persistence.lock().await;
    AuthenticationService::logout(&mut persistence, token.as_deref())?;
    drop(persistence);

    Ok(StatusCode::OK)
}

// ============================================================================
// Catalog handlers
// ============================================================================

/// Handler for GET `/api/books`.
async fn handle_list_books(
    AxumState(app_state): AxumState<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> Result<Json<Vec<BookResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: Vec<BookResponse> = list_books(&mut persistence, &principal)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/books/search`.
async fn handle_search_books(
    AxumState(app_state): AxumState<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<BookResponse>>, HttpError> {
    info!(query = %params.query, "Handling search_books request");

    let mut persistence = app_state.persistence.lock().await;
    let response: Vec<BookResponse> = search_books(&mut persistence, &principal, &params.query)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/books/{book_id}`.
async fn handle_get_book(
    AxumState(app_state): AxumState<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(book_id): Path<i64>,
) -> Result<Json<BookResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: BookResponse = get_book(&mut persistence, &principal, book_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/books`.
async fn handle_create_book(
    AxumState(app_state): AxumState<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Json(req): Json<BookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), HttpError> {
    info!(title = %req.title, "Handling create_book request");

    let mut persistence = app_state.persistence.lock().await;
    let response: BookResponse = create_book(&mut persistence, &principal, &req)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for PUT `/api/books/{book_id}`.
async fn handle_update_book(
    AxumState(app_state): AxumState<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(book_id): Path<i64>,
    Json(req): Json<BookRequest>,
) -> Result<Json<BookResponse>, HttpError> {
    info!(book_id, "Handling update_book request");

    let mut persistence = app_state.persistence.lock().await;
    let response: BookResponse = update_book(&mut persistence, &principal, book_id, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/api/books/{book_id}`.
async fn handle_delete_book(
    AxumState(app_state): AxumState<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(book_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    info!(book_id, "Handling delete_book request");

    let mut persistence = app_state.persistence.lock().await;
    delete_book(&mut persistence, &principal, book_id)?;
    drop(persistence);

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Customer handlers
// ============================================================================

/// Handler for GET `/api/customers`.
async fn handle_list_customers(
    AxumState(app_state): AxumState<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> Result<Json<Vec<CustomerResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: Vec<CustomerResponse> = list_customers(&mut persistence, &principal)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/customers/{customer_id}`.
async fn handle_get_customer(
    AxumState(app_state): AxumState<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(customer_id): Path<i64>,
) -> Result<Json<CustomerResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: CustomerResponse = get_customer(&mut persistence, &principal, customer_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/api/customers/{customer_id}`.
async fn handle_update_customer(
    AxumState(app_state): AxumState<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(customer_id): Path<i64>,
    Json(req): Json<UpdateCustomerRequest>,
) -> Result<Json<CustomerResponse>, HttpError> {
    info!(customer_id, "Handling update_customer request");

    let mut persistence = app_state.persistence.lock().await;
    let response: CustomerResponse =
        update_customer(&mut persistence, &principal, customer_id, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/api/customers/{customer_id}`.
async fn handle_delete_customer(
    AxumState(app_state): AxumState<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(customer_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    info!(customer_id, "Handling delete_customer request");

    let mut persistence = app_state.persistence.lock().await;
    delete_customer(&mut persistence, &principal, customer_id)?;
    drop(persistence);

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET `/api/customers/{customer_id}/orders`.
async fn handle_list_customer_orders(
    AxumState(app_state): AxumState<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(customer_id): Path<i64>,
) -> Result<Json<Vec<OrderResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: Vec<OrderResponse> =
        list_customer_orders(&mut persistence, &principal, customer_id)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Order handlers
// ============================================================================

/// Handler for POST `/api/orders`.
async fn handle_create_order(
    AxumState(app_state): AxumState<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), HttpError> {
    info!(books = req.book_ids.len(), "Handling create_order request");

    let mut persistence = app_state.persistence.lock().await;
    let response: OrderResponse = create_order(&mut persistence, &principal, &req)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/api/orders`.
async fn handle_list_orders(
    AxumState(app_state): AxumState<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> Result<Json<Vec<OrderResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: Vec<OrderResponse> = list_orders(&mut persistence, &principal)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/orders/{order_id}`.
async fn handle_get_order(
    AxumState(app_state): AxumState<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(order_id): Path<i64>,
) -> Result<Json<OrderResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: OrderResponse = get_order(&mut persistence, &principal, order_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/api/orders/{order_id}`.
///
/// Replaces the order's book set and reprices it.
async fn handle_update_order_books(
    AxumState(app_state): AxumState<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(order_id): Path<i64>,
    Json(req): Json<UpdateOrderBooksRequest>,
) -> Result<Json<OrderResponse>, HttpError> {
    info!(order_id, "Handling update_order_books request");

    let mut persistence = app_state.persistence.lock().await;
    let response: OrderResponse =
        update_order_books(&mut persistence, &principal, order_id, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PATCH `/api/orders/{order_id}/status`.
async fn handle_update_order_status(
    AxumState(app_state): AxumState<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(order_id): Path<i64>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> Result<Json<OrderResponse>, HttpError> {
    info!(order_id, status = %req.status, "Handling update_order_status request");

    let mut persistence = app_state.persistence.lock().await;
    let response: OrderResponse =
        update_order_status(&mut persistence, &principal, order_id, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/api/orders/{order_id}`.
async fn handle_delete_order(
    AxumState(app_state): AxumState<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(order_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    info!(order_id, "Handling delete_order request");

    let mut persistence = app_state.persistence.lock().await;
    delete_order(&mut persistence, &principal, order_id)?;
    drop(persistence);

    Ok(StatusCode::NO_CONTENT)
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/auth/register", post(handle_register))
        .route("/api/auth/login", post(handle_login))
        .route("/api/auth/logout", post(handle_logout))
        .route("/api/books", get(handle_list_books).post(handle_create_book))
        .route("/api/books/search", get(handle_search_books))
        .route(
            "/api/books/{book_id}",
            get(handle_get_book)
                .put(handle_update_book)
                .delete(handle_delete_book),
        )
        .route("/api/customers", get(handle_list_customers))
        .route(
            "/api/customers/{customer_id}",
            get(handle_get_customer)
                .put(handle_update_customer)
                .delete(handle_delete_customer),
        )
        .route(
            "/api/customers/{customer_id}/orders",
            get(handle_list_customer_orders),
        )
        .route("/api/orders", get(handle_list_orders).post(handle_create_order))
        .route(
            "/api/orders/{order_id}",
            get(handle_get_order)
                .put(handle_update_order_books)
                .delete(handle_delete_order),
        )
        .route(
            "/api/orders/{order_id}/status",
            patch(handle_update_order_status),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing bookstore server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    // Bootstrap an admin account if requested
    if let Some(admin_email) = &args.create_admin {
        let admin_password: &str = args
            .admin_password
            .as_deref()
            .ok_or("--admin-password is required with --create-admin")?;
        seed::ensure_admin(&mut persistence, admin_email, admin_password)?;
    }

    // Load the sample catalog if requested
    if args.seed {
        seed::seed_catalog(&mut persistence)?;
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use tower::ServiceExt;

    const ADMIN_EMAIL: &str = "admin@bookstore.test";
    const ADMIN_PASSWORD: &str = "opening-the-store";
    const CUSTOMER_PASSWORD: &str = "correct-horse-battery";

    /// Helper to create test app state with in-memory persistence and a
    /// bootstrapped admin.
    fn create_test_app_state() -> AppState {
        let mut persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        seed::ensure_admin(&mut persistence, ADMIN_EMAIL, ADMIN_PASSWORD)
            .expect("Failed to bootstrap admin");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
        }
    }

    fn request(
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn login(app: &Router, email: &str, password: &str) -> String {
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/auth/login",
                None,
                Some(serde_json::json!({ "email": email, "password": password })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let login: LoginResponse = body_json(response).await;
        login.token
    }

    async fn register_customer(app: &Router, email: &str) -> CustomerResponse {
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/auth/register",
                None,
                Some(serde_json::json!({
                    "email": email,
                    "password": CUSTOMER_PASSWORD,
                    "given_name": "John",
                    "surname": "Smith",
                    "country": "United States",
                    "city": "New York",
                    "street": "Broadway",
                    "house_number": "123",
                    "phone": "2125551234",
                    "birth_date": "1985-05-15"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::CREATED);
        body_json(response).await
    }

    async fn create_test_book(app: &Router, admin_token: &str, price: &str, isbn: &str) -> BookResponse {
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/books",
                Some(admin_token),
                Some(serde_json::json!({
                    "title": "The Great Gatsby",
                    "authors": ["F. Scott Fitzgerald"],
                    "price": price,
                    "release_date": "1925-04-10",
                    "isbn": isbn,
                    "stock": 15
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::CREATED);
        body_json(response).await
    }

    #[tokio::test]
    async fn test_register_login_and_order_flow() {
        let app: Router = build_router(create_test_app_state());

        let admin_token: String = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
        let book: BookResponse =
            create_test_book(&app, &admin_token, "12.99", "9780743273565").await;

        let customer: CustomerResponse = register_customer(&app, "john@example.com").await;
        let token: String = login(&app, "john@example.com", CUSTOMER_PASSWORD).await;

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/orders",
                Some(&token),
                Some(serde_json::json!({ "book_ids": [book.id, book.id] })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::CREATED);

        let order: OrderResponse = body_json(response).await;
        assert_eq!(order.customer_id, customer.id);
        assert_eq!(order.status, "pending");
        assert_eq!(order.order_value.to_string(), "25.98");
    }

    #[tokio::test]
    async fn test_anonymous_order_creation_is_forbidden() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(request(
                "POST",
                "/api/orders",
                None,
                Some(serde_json::json!({ "book_ids": [1] })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);

        let error: ErrorResponse = body_json(response).await;
        assert!(error.error);
    }

    #[tokio::test]
    async fn test_anonymous_catalog_read_is_open() {
        let app: Router = build_router(create_test_app_state());
        let admin_token: String = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
        create_test_book(&app, &admin_token, "12.99", "9780743273565").await;

        let response = app
            .clone()
            .oneshot(request("GET", "/api/books", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let books: Vec<BookResponse> = body_json(response).await;
        assert_eq!(books.len(), 1);

        let response = app
            .oneshot(request("GET", "/api/books/search?query=gatsby", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let found: Vec<BookResponse> = body_json(response).await;
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_catalog_write_requires_admin() {
        let app: Router = build_router(create_test_app_state());
        register_customer(&app, "john@example.com").await;
        let token: String = login(&app, "john@example.com", CUSTOMER_PASSWORD).await;

        let response = app
            .oneshot(request(
                "POST",
                "/api/books",
                Some(&token),
                Some(serde_json::json!({
                    "title": "Unauthorized",
                    "authors": ["Nobody"],
                    "price": "9.99",
                    "release_date": "2000-01-01",
                    "isbn": "9780000000001",
                    "stock": 1
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_foreign_order_read_looks_like_missing_order() {
        let app: Router = build_router(create_test_app_state());
        let admin_token: String = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
        let book: BookResponse =
            create_test_book(&app, &admin_token, "12.99", "9780743273565").await;

        register_customer(&app, "alice@example.com").await;
        register_customer(&app, "bob@example.com").await;
        let alice_token: String = login(&app, "alice@example.com", CUSTOMER_PASSWORD).await;
        let bob_token: String = login(&app, "bob@example.com", CUSTOMER_PASSWORD).await;

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/orders",
                Some(&alice_token),
                Some(serde_json::json!({ "book_ids": [book.id] })),
            ))
            .await
            .unwrap();
        let order: OrderResponse = body_json(response).await;

        // Bob's read of Alice's order and a read of a nonexistent order
        // produce identical status codes and body shapes.
        let denied = app
            .clone()
            .oneshot(request(
                "GET",
                &format!("/api/orders/{}", order.id),
                Some(&bob_token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(denied.status(), HttpStatusCode::NOT_FOUND);
        let denied_body: ErrorResponse = body_json(denied).await;

        let missing = app
            .clone()
            .oneshot(request(
                "GET",
                "/api/orders/99999",
                Some(&bob_token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(missing.status(), HttpStatusCode::NOT_FOUND);
        let missing_body: ErrorResponse = body_json(missing).await;

        assert!(denied_body.error && missing_body.error);

        // The owner still reads it fine.
        let allowed = app
            .oneshot(request(
                "GET",
                &format!("/api/orders/{}", order.id),
                Some(&alice_token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(allowed.status(), HttpStatusCode::OK);
    }

    #[tokio::test]
    async fn test_status_update_is_admin_only_and_lifecycle_checked() {
        let app: Router = build_router(create_test_app_state());
        let admin_token: String = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
        let book: BookResponse =
            create_test_book(&app, &admin_token, "12.99", "9780743273565").await;

        register_customer(&app, "alice@example.com").await;
        let alice_token: String = login(&app, "alice@example.com", CUSTOMER_PASSWORD).await;

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/orders",
                Some(&alice_token),
                Some(serde_json::json!({ "book_ids": [book.id] })),
            ))
            .await
            .unwrap();
        let order: OrderResponse = body_json(response).await;
        let status_uri: String = format!("/api/orders/{}/status", order.id);

        // The owner may not drive the lifecycle.
        let by_owner = app
            .clone()
            .oneshot(request(
                "PATCH",
                &status_uri,
                Some(&alice_token),
                Some(serde_json::json!({ "status": "processing" })),
            ))
            .await
            .unwrap();
        assert_eq!(by_owner.status(), HttpStatusCode::FORBIDDEN);

        // Unknown status values fail validation.
        let bad_value = app
            .clone()
            .oneshot(request(
                "PATCH",
                &status_uri,
                Some(&admin_token),
                Some(serde_json::json!({ "status": "misplaced" })),
            ))
            .await
            .unwrap();
        assert_eq!(bad_value.status(), HttpStatusCode::BAD_REQUEST);

        // Skipping a lifecycle step is rejected.
        let skipped = app
            .clone()
            .oneshot(request(
                "PATCH",
                &status_uri,
                Some(&admin_token),
                Some(serde_json::json!({ "status": "delivered" })),
            ))
            .await
            .unwrap();
        assert_eq!(skipped.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);

        // The legal single step forward succeeds.
        let forward = app
            .clone()
            .oneshot(request(
                "PATCH",
                &status_uri,
                Some(&admin_token),
                Some(serde_json::json!({ "status": "processing" })),
            ))
            .await
            .unwrap();
        assert_eq!(forward.status(), HttpStatusCode::OK);
        let updated: OrderResponse = body_json(forward).await;
        assert_eq!(updated.status, "processing");
    }

    #[tokio::test]
    async fn test_logout_then_act_as_anonymous() {
        let app: Router = build_router(create_test_app_state());
        register_customer(&app, "alice@example.com").await;
        let token: String = login(&app, "alice@example.com", CUSTOMER_PASSWORD).await;

        let logout = app
            .clone()
            .oneshot(request("POST", "/api/auth/logout", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(logout.status(), HttpStatusCode::OK);

        // The token is dead: order creation now fails as anonymous.
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/orders",
                Some(&token),
                Some(serde_json::json!({ "book_ids": [1] })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);

        // Logging out twice is fine, with or without a token.
        let again = app
            .clone()
            .oneshot(request("POST", "/api/auth/logout", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(again.status(), HttpStatusCode::OK);
        let anonymous = app
            .oneshot(request("POST", "/api/auth/logout", None, None))
            .await
            .unwrap();
        assert_eq!(anonymous.status(), HttpStatusCode::OK);
    }

    #[tokio::test]
    async fn test_login_failures_are_uniform() {
        let app: Router = build_router(create_test_app_state());
        register_customer(&app, "alice@example.com").await;

        let wrong_password = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/auth/login",
                None,
                Some(serde_json::json!({
                    "email": "alice@example.com",
                    "password": "not-the-password"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(wrong_password.status(), HttpStatusCode::UNAUTHORIZED);
        let wrong_body: ErrorResponse = body_json(wrong_password).await;

        let unknown_email = app
            .oneshot(request(
                "POST",
                "/api/auth/login",
                None,
                Some(serde_json::json!({
                    "email": "nobody@example.com",
                    "password": CUSTOMER_PASSWORD
                })),
            ))
            .await
            .unwrap();
        assert_eq!(unknown_email.status(), HttpStatusCode::UNAUTHORIZED);
        let unknown_body: ErrorResponse = body_json(unknown_email).await;

        assert_eq!(wrong_body.message, unknown_body.message);
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let app: Router = build_router(create_test_app_state());
        register_customer(&app, "alice@example.com").await;

        let response = app
            .oneshot(request(
                "POST",
                "/api/auth/register",
                None,
                Some(serde_json::json!({
                    "email": "alice@example.com",
                    "password": CUSTOMER_PASSWORD,
                    "given_name": "Alice",
                    "surname": "Again",
                    "country": "United States",
                    "city": "New York",
                    "street": "Broadway",
                    "house_number": "123",
                    "phone": "2125551234",
                    "birth_date": "1985-05-15"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_customer_order_listing_scope() {
        let app: Router = build_router(create_test_app_state());
        let admin_token: String = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
        let book: BookResponse =
            create_test_book(&app, &admin_token, "12.99", "9780743273565").await;

        let alice: CustomerResponse = register_customer(&app, "alice@example.com").await;
        register_customer(&app, "bob@example.com").await;
        let alice_token: String = login(&app, "alice@example.com", CUSTOMER_PASSWORD).await;
        let bob_token: String = login(&app, "bob@example.com", CUSTOMER_PASSWORD).await;

        app.clone()
            .oneshot(request(
                "POST",
                "/api/orders",
                Some(&alice_token),
                Some(serde_json::json!({ "book_ids": [book.id] })),
            ))
            .await
            .unwrap();

        let orders_uri: String = format!("/api/customers/{}/orders", alice.id);

        let own = app
            .clone()
            .oneshot(request("GET", &orders_uri, Some(&alice_token), None))
            .await
            .unwrap();
        assert_eq!(own.status(), HttpStatusCode::OK);
        let orders: Vec<OrderResponse> = body_json(own).await;
        assert_eq!(orders.len(), 1);

        let foreign = app
            .clone()
            .oneshot(request("GET", &orders_uri, Some(&bob_token), None))
            .await
            .unwrap();
        assert_eq!(foreign.status(), HttpStatusCode::NOT_FOUND);

        let by_admin = app
            .oneshot(request("GET", &orders_uri, Some(&admin_token), None))
            .await
            .unwrap();
        assert_eq!(by_admin.status(), HttpStatusCode::OK);
    }
}
