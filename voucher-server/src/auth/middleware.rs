//! Authentication middleware and role gating

use std::future::Future;
use std::pin::Pin;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use shared::error::{AppError, ErrorCode};
use shared::models::Role;

use super::{CurrentUser, JwtError, JwtService};
use crate::state::AppState;

/// Require a valid `Authorization: Bearer <token>` header.
///
/// On success the [`CurrentUser`] is inserted into the request extensions.
/// Missing header → `NotAuthenticated`, expired → `TokenExpired`,
/// anything else → `TokenInvalid`.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            tracing::warn!(target: "security", event = "auth_missing", uri = %req.uri());
            return Err(AppError::not_authenticated());
        }
    };

    let claims = state.jwt.validate_token(token).map_err(|e| {
        tracing::warn!(target: "security", event = "auth_failed", error = %e, uri = %req.uri());
        match e {
            JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })?;

    let user = CurrentUser::try_from(claims)
        .map_err(|e| AppError::invalid_token(format!("Malformed token claims: {e}")))?;
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Role gate, layered inside [`require_auth`].
///
/// Admin passes every gate. Others must hold `role` exactly.
///
/// ```ignore
/// Router::new()
///     .route("/api/cashier/redeem", post(cashier::redeem))
///     .route_layer(middleware::from_fn(require_role(Role::Cashier)));
/// ```
pub fn require_role(
    role: Role,
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or_else(AppError::not_authenticated)?;

            if !user.role.satisfies(role) {
                tracing::warn!(
                    target: "security",
                    event = "role_denied",
                    user_id = user.id,
                    username = %user.username,
                    user_role = %user.role,
                    required_role = %role,
                );
                let code = if role == Role::Admin {
                    ErrorCode::AdminRequired
                } else {
                    ErrorCode::RoleRequired
                };
                return Err(AppError::new(code).with_detail("required_role", role.as_str()));
            }

            Ok(next.run(req).await)
        })
    }
}

/// Handlers take `CurrentUser` directly; the value comes from
/// [`require_auth`].
impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(AppError::not_authenticated)
    }
}
