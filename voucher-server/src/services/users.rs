//! Session login and user account management

use serde::Serialize;
use serde_json::json;
use shared::error::{AppError, ErrorCode};
use shared::models::{Role, User, UserInfo};

use super::audit;
use crate::auth::CurrentUser;
use crate::db;
use crate::error::{ServiceResult, on_foreign_key, on_unique};
use crate::state::AppState;
use crate::util::{dummy_verify, hash_password, verify_password};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const USERNAME_LEN: std::ops::RangeInclusive<usize> = 3..=32;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub user: UserInfo,
}

pub fn normalize_username(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Length is checked on the normalized name
fn check_username(username: &str) -> Result<(), AppError> {
    if !USERNAME_LEN.contains(&username.chars().count()) {
        return Err(AppError::new(ErrorCode::ValueOutOfRange)
            .with_detail("field", "username")
            .with_detail("min", *USERNAME_LEN.start())
            .with_detail("max", *USERNAME_LEN.end()));
    }
    Ok(())
}

fn check_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort).with_detail("min", MIN_PASSWORD_LEN));
    }
    Ok(())
}

fn hash(password: &str) -> Result<String, AppError> {
    hash_password(password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })
}

/// Verify credentials and issue a session token
pub async fn login(
    state: &AppState,
    username: &str,
    password: &str,
    ip: &str,
) -> ServiceResult<LoginResponse> {
    let username = normalize_username(username);
    let Some(user) = db::users::find_by_username(&state.pool, &username).await? else {
        dummy_verify(password);
        tracing::warn!(target: "security", event = "login_failed", username = %username, ip = %ip, reason = "unknown_user");
        return Err(AppError::invalid_credentials().into());
    };

    if !verify_password(password, &user.hashed_password) {
        tracing::warn!(target: "security", event = "login_failed", username = %username, ip = %ip, reason = "bad_password");
        return Err(AppError::invalid_credentials().into());
    }
    if !user.is_active {
        tracing::warn!(target: "security", event = "login_disabled", username = %username, ip = %ip);
        return Err(AppError::new(ErrorCode::AccountDisabled).into());
    }

    let info = UserInfo::from(&user);
    let token = state.jwt.generate_token(&info).map_err(|e| {
        tracing::error!("JWT creation failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    tracing::info!(user_id = user.id, username = %user.username, role = %user.role, "User logged in");
    audit(&state.pool, Some(user.id), "login", json!({}), Some(ip)).await;

    Ok(LoginResponse {
        token,
        expires_in: state.jwt.expires_in(),
        user: info,
    })
}

pub async fn list(state: &AppState) -> ServiceResult<Vec<User>> {
    Ok(db::users::list(&state.pool).await?)
}

pub async fn create(
    state: &AppState,
    admin: &CurrentUser,
    username: &str,
    password: &str,
    role: Role,
    seller_id: Option<i64>,
) -> ServiceResult<User> {
    let username = normalize_username(username);
    check_username(&username)?;
    check_password(password)?;

    let seller_id = match role {
        Role::Seller => {
            let id = seller_id.ok_or_else(|| {
                AppError::new(ErrorCode::RequiredField).with_detail("field", "seller_id")
            })?;
            let seller = super::sellers::get(state, id).await?;
            if !seller.is_accepted() {
                return Err(AppError::new(ErrorCode::SellerNotAccepted)
                    .with_detail("seller_id", id)
                    .into());
            }
            Some(id)
        }
        Role::Admin | Role::Cashier => None,
    };

    let hashed = hash(password)?;
    let now = shared::util::now_millis();
    let user = db::users::create(&state.pool, &username, &hashed, role, seller_id, now)
        .await
        .map_err(on_unique(ErrorCode::UsernameExists))?;

    tracing::info!(user_id = user.id, username = %user.username, role = %role, "User created");
    audit(
        &state.pool,
        Some(admin.id),
        "user_created",
        json!({ "user_id": user.id, "username": user.username, "role": role }),
        None,
    )
    .await;

    Ok(user)
}

/// Change a password and/or the active flag
pub async fn update(
    state: &AppState,
    admin: &CurrentUser,
    id: i64,
    password: Option<&str>,
    is_active: Option<bool>,
) -> ServiceResult<User> {
    if id == admin.id && is_active == Some(false) {
        return Err(AppError::with_message(
            ErrorCode::CannotDeleteSelf,
            "Cannot disable your own account",
        )
        .into());
    }
    let hashed = match password {
        Some(p) => {
            check_password(p)?;
            Some(hash(p)?)
        }
        None => None,
    };

    let user = db::users::update(&state.pool, id, hashed.as_deref(), is_active)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound).with_detail("user_id", id))?;

    tracing::info!(user_id = id, user = %admin.username, "User updated");
    audit(
        &state.pool,
        Some(admin.id),
        "user_updated",
        json!({ "user_id": id, "password_changed": hashed.is_some(), "is_active": is_active }),
        None,
    )
    .await;

    Ok(user)
}

pub async fn delete(state: &AppState, admin: &CurrentUser, id: i64) -> ServiceResult<()> {
    if id == admin.id {
        return Err(AppError::new(ErrorCode::CannotDeleteSelf).into());
    }

    let deleted = db::users::delete(&state.pool, id)
        .await
        .map_err(on_foreign_key(AppError::invalid_request(
            "User has recorded transactions; disable the account instead",
        )))?;
    if !deleted {
        return Err(AppError::new(ErrorCode::UserNotFound)
            .with_detail("user_id", id)
            .into());
    }

    tracing::info!(user_id = id, user = %admin.username, "User deleted");
    audit(&state.pool, Some(admin.id), "user_deleted", json!({ "user_id": id }), None).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_length_counts_trimmed_name() {
        assert_eq!(normalize_username("  Kasir01 "), "kasir01");
        assert!(check_username(&normalize_username("  abc  ")).is_ok());

        let err = check_username(&normalize_username("  ab  ")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);

        let long = "x".repeat(33);
        assert!(check_username(&normalize_username(&long)).is_err());
        assert!(check_username(&"x".repeat(32)).is_ok());
    }

    #[test]
    fn test_password_minimum() {
        assert_eq!(
            check_password("short").unwrap_err().code,
            ErrorCode::PasswordTooShort
        );
        assert!(check_password("cukup-panjang").is_ok());
    }
}
