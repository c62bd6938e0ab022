//! HTTP routes
//!
//! | Prefix           | Access                          |
//! |------------------|---------------------------------|
//! | `/health`        | public                          |
//! | `/api/auth`      | login public, `me` signed in    |
//! | `/api/register`  | public (rate limited)           |
//! | `/api/seller`    | seller or admin                 |
//! | `/api/cashier`   | cashier or admin                |
//! | `/api/admin`     | admin                           |

pub mod admin;
pub mod auth;
pub mod cashier;
pub mod health;
pub mod register;
pub mod seller;

use axum::routing::{get, post, put};
use axum::{Router, middleware};
use http::{HeaderName, HeaderValue};
use shared::error::AppError;
use shared::models::Role;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::auth::rate_limit::{login_rate_limit, register_rate_limit};
use crate::auth::{require_auth, require_role};
use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, AppError>;

const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn seller_routes() -> Router<AppState> {
    Router::new()
        .route("/api/seller/vouchers", get(seller::list_vouchers))
        .route("/api/seller/vouchers/{code}", get(seller::get_voucher))
        .route("/api/seller/vouchers/{code}/activate", post(seller::activate))
        .route_layer(middleware::from_fn(require_role(Role::Seller)))
}

fn cashier_routes() -> Router<AppState> {
    Router::new()
        .route("/api/cashier/vouchers/{code}", get(cashier::check_voucher))
        .route("/api/cashier/menu", get(cashier::menu))
        .route("/api/cashier/quote", post(cashier::quote))
        .route("/api/cashier/redeem", post(cashier::redeem))
        .route_layer(middleware::from_fn(require_role(Role::Cashier)))
}

fn admin_routes() -> Router<AppState> {
    use admin::{audit, menu, reports, sellers, transactions, users, vouchers};

    Router::new()
        // Vouchers
        .route("/api/admin/vouchers", get(vouchers::list).post(vouchers::create))
        .route("/api/admin/vouchers/generate", post(vouchers::generate))
        .route("/api/admin/vouchers/assign", post(vouchers::assign))
        .route("/api/admin/vouchers/export", get(vouchers::export))
        .route(
            "/api/admin/vouchers/{code}",
            get(vouchers::get).put(vouchers::update).delete(vouchers::delete),
        )
        .route("/api/admin/vouchers/{code}/transactions", get(vouchers::history))
        // Ledger
        .route("/api/admin/transactions", get(transactions::list))
        .route("/api/admin/transactions/export", get(transactions::export))
        // Sellers
        .route("/api/admin/sellers", get(sellers::list))
        .route("/api/admin/sellers/{id}", get(sellers::get).delete(sellers::delete))
        .route("/api/admin/sellers/{id}/accept", post(sellers::accept))
        .route("/api/admin/sellers/{id}/vouchers", get(sellers::vouchers))
        // Users
        .route("/api/admin/users", get(users::list).post(users::create))
        .route("/api/admin/users/{id}", put(users::update).delete(users::delete))
        // Menu
        .route("/api/admin/menu", get(menu::list).post(menu::create))
        .route("/api/admin/menu/{id}", put(menu::update).delete(menu::delete))
        // Reports
        .route("/api/admin/reports/vouchers", get(reports::vouchers))
        .route("/api/admin/reports/transactions", get(reports::transactions))
        .route("/api/admin/reports/sellers", get(reports::sellers))
        // Audit
        .route("/api/admin/audit-log", get(audit::audit_log))
        .route_layer(middleware::from_fn(require_role(Role::Admin)))
}

fn cors_layer(allowed_origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match allowed_origin.and_then(|o| HeaderValue::from_str(o).ok()) {
        Some(origin) => layer.allow_origin(origin),
        None => layer.allow_origin(Any),
    }
}

/// Build the application router with all middleware and state
pub fn create_router(state: AppState, cors_origin: Option<&str>) -> Router {
    let login = Router::new()
        .route("/api/auth/login", post(auth::login))
        .route_layer(middleware::from_fn_with_state(state.clone(), login_rate_limit));

    let registration = Router::new()
        .route("/api/register", post(register::register))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            register_rate_limit,
        ));

    // Role layers run inside require_auth
    let protected = Router::new()
        .route("/api/auth/me", get(auth::me))
        .merge(seller_routes())
        .merge(cashier_routes())
        .merge(admin_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(login)
        .merge(registration)
        .merge(protected)
        .layer(cors_layer(cors_origin))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(REQUEST_ID))
        .layer(SetRequestIdLayer::new(REQUEST_ID, MakeRequestUuid))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use shared::error::ErrorCode;
    use shared::models::UserInfo;
    use tower::ServiceExt;

    use crate::auth::rate_limit::LOGIN_MAX_PER_MINUTE;
    use crate::state::tests::lazy_state;

    fn token(state: &AppState, role: Role, seller_id: Option<i64>) -> String {
        state
            .jwt
            .generate_token(&UserInfo {
                id: 7,
                username: format!("{role}-user"),
                role,
                seller_id,
            })
            .unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    fn get_with(uri: &str, bearer: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(t) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = create_router(lazy_state(), None);
        let response = app.oneshot(get_with("/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let app = create_router(lazy_state(), None);
        let (status, body) = send(app, get_with("/api/admin/vouchers", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], ErrorCode::NotAuthenticated.code());
    }

    #[tokio::test]
    async fn test_garbage_token_is_rejected() {
        let app = create_router(lazy_state(), None);
        let (status, body) = send(app, get_with("/api/cashier/menu", Some("not.a.jwt"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], ErrorCode::TokenInvalid.code());
    }

    #[tokio::test]
    async fn test_cashier_cannot_reach_admin_routes() {
        let state = lazy_state();
        let t = token(&state, Role::Cashier, None);
        let app = create_router(state, None);
        let (status, body) = send(app, get_with("/api/admin/reports/vouchers", Some(&t))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], ErrorCode::AdminRequired.code());
        assert_eq!(body["details"]["required_role"], "admin");
    }

    #[tokio::test]
    async fn test_seller_cannot_redeem() {
        let state = lazy_state();
        let t = token(&state, Role::Seller, Some(3));
        let app = create_router(state, None);
        let req = Request::builder()
            .method("POST")
            .uri("/api/cashier/redeem")
            .header(header::AUTHORIZATION, format!("Bearer {t}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"code":"ABC","branch":"sedati","lines":[]}"#))
            .unwrap();
        let (status, body) = send(app, req).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], ErrorCode::RoleRequired.code());
    }

    #[tokio::test]
    async fn test_cashier_cannot_activate() {
        let state = lazy_state();
        let t = token(&state, Role::Cashier, None);
        let app = create_router(state, None);
        let req = Request::builder()
            .method("POST")
            .uri("/api/seller/vouchers/ABC123/activate")
            .header(header::AUTHORIZATION, format!("Bearer {t}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"buyer_name":"Budi","buyer_phone":"081234567"}"#))
            .unwrap();
        let (status, _) = send(app, req).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_without_seller_link_cannot_list_seller_vouchers() {
        let state = lazy_state();
        let t = token(&state, Role::Admin, None);
        let app = create_router(state, None);
        let (status, body) = send(app, get_with("/api/seller/vouchers", Some(&t))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], ErrorCode::SellerAccountRequired.code());
    }

    #[tokio::test]
    async fn test_me_returns_identity() {
        let state = lazy_state();
        let t = token(&state, Role::Seller, Some(3));
        let app = create_router(state, None);
        let (status, body) = send(app, get_with("/api/auth/me", Some(&t))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "seller-user");
        assert_eq!(body["role"], "seller");
        assert_eq!(body["seller_id"], 3);
    }

    #[tokio::test]
    async fn test_login_rate_limited() {
        let state = lazy_state();
        for _ in 0..LOGIN_MAX_PER_MINUTE {
            state.rate_limiter.check("login", "198.51.100.4", LOGIN_MAX_PER_MINUTE, 60).await;
        }
        let app = create_router(state, None);
        let req = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header("x-forwarded-for", "198.51.100.4")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"username":"admin","password":"secret123"}"#))
            .unwrap();
        let (status, body) = send(app, req).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["code"], ErrorCode::TooManyRequests.code());
    }

    #[tokio::test]
    async fn test_login_validates_before_lookup() {
        let app = create_router(lazy_state(), None);
        let req = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"username":"","password":""}"#))
            .unwrap();
        let (status, body) = send(app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], ErrorCode::ValidationFailed.code());
    }

    #[tokio::test]
    async fn test_padded_short_username_rejected() {
        let state = lazy_state();
        let t = token(&state, Role::Admin, None);
        let app = create_router(state, None);
        let req = Request::builder()
            .method("POST")
            .uri("/api/admin/users")
            .header(header::AUTHORIZATION, format!("Bearer {t}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"username":"  ab  ","password":"secret123","role":"cashier"}"#,
            ))
            .unwrap();
        let (status, body) = send(app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], ErrorCode::ValueOutOfRange.code());
        assert_eq!(body["details"]["field"], "username");
    }

    #[tokio::test]
    async fn test_reversed_report_range_rejected() {
        let state = lazy_state();
        let t = token(&state, Role::Admin, None);
        let app = create_router(state, None);
        let (status, body) = send(
            app,
            get_with(
                "/api/admin/reports/transactions?from=2024-06-10&to=2024-06-01",
                Some(&t),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], ErrorCode::InvalidDateRange.code());
    }
}
