//! Auth API Handlers

use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::error::ApiError;
use shared::response::ApiResponse;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Admin, AdminCreate, AdminInfo};
use crate::db::repository::AdminRepository;
use crate::utils::AppResult;

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Login payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Serialize)]
pub struct LoginData {
    pub token: String,
    pub admin: AdminInfo,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginData>>> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::validation("Email and password are required"));
    }

    let repo = AdminRepository::new(state.get_db());
    let admin = repo
        .find_by_email(&req.email)
        .await
        .map_err(ApiError::from)?;

    // Fixed delay before inspecting the result (timing attacks)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent email enumeration
    let admin = match admin {
        Some(admin) => {
            let password_valid = admin
                .verify_password(&req.password)
                .map_err(|e| ApiError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                tracing::warn!(email = %req.email, "Login failed - invalid credentials");
                return Err(ApiError::unauthorized("Invalid email or password"));
            }

            if !admin.is_active {
                return Err(ApiError::forbidden("Account has been disabled"));
            }

            admin
        }
        None => {
            tracing::warn!(email = %req.email, "Login failed - unknown email");
            return Err(ApiError::unauthorized("Invalid email or password"));
        }
    };

    repo.touch_last_login(&admin.id_string())
        .await
        .map_err(ApiError::from)?;

    let token = state
        .jwt_service
        .generate_token(&admin)
        .map_err(|e| ApiError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(email = %admin.email, role = %admin.role, "Admin logged in");

    Ok(Json(ApiResponse::ok_with_message(
        LoginData {
            token,
            admin: AdminInfo::from(&admin),
        },
        "Login successful",
    )))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<AdminInfo>>> {
    let repo = AdminRepository::new(state.get_db());
    let admin = repo
        .find_by_id(&user.id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Admin"))?;

    Ok(Json(ApiResponse::ok(AdminInfo::from(&admin))))
}

/// Password update payload
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

/// PUT /api/auth/update-password
pub async fn update_password(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<UpdatePasswordRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    req.validate()
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let repo = AdminRepository::new(state.get_db());
    let admin = repo
        .find_by_id(&user.id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Admin"))?;

    let current_valid = admin
        .verify_password(&req.current_password)
        .map_err(|e| ApiError::internal(format!("Password verification failed: {}", e)))?;
    if !current_valid {
        return Err(ApiError::unauthorized("Current password is incorrect"));
    }

    let password_hash = Admin::hash_password(&req.new_password)
        .map_err(|e| ApiError::internal(format!("Could not hash password: {}", e)))?;
    repo.update_password(&admin.id_string(), password_hash)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ApiResponse::message_only("Password updated successfully")))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<AdminCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<AdminInfo>>)> {
    if !user.is_super_admin() {
        return Err(ApiError::forbidden(format!(
            "Role {} cannot register admin accounts",
            user.role
        )));
    }

    req.validate()
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let repo = AdminRepository::new(state.get_db());
    let admin = repo.create(req).await.map_err(ApiError::from)?;

    tracing::info!(email = %admin.email, created_by = %user.email, "Admin account registered");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            AdminInfo::from(&admin),
            "Admin created successfully",
        )),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::db::models::AdminRole;

    async fn state_with_admin() -> ServerState {
        let state = ServerState::initialize_in_memory(&Config::from_env()).await;
        AdminRepository::new(state.get_db())
            .create(AdminCreate {
                name: "Administrador".to_string(),
                email: "admin@refugio.com.br".to_string(),
                password: "admin123456".to_string(),
                role: Some(AdminRole::SuperAdmin),
            })
            .await
            .unwrap();
        state
    }

    async fn try_login(state: &ServerState, email: &str, password: &str) -> AppResult<LoginData> {
        login(
            State(state.clone()),
            Json(LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            }),
        )
        .await
        .map(|Json(response)| response.data.unwrap())
    }

    #[tokio::test]
    async fn login_issues_a_valid_token() {
        let state = state_with_admin().await;

        let data = try_login(&state, "admin@refugio.com.br", "admin123456")
            .await
            .unwrap();
        assert_eq!(data.admin.email, "admin@refugio.com.br");

        let claims = state.jwt_service.validate_token(&data.token).unwrap();
        assert_eq!(claims.email, "admin@refugio.com.br");
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_are_indistinguishable() {
        let state = state_with_admin().await;

        let wrong_password = try_login(&state, "admin@refugio.com.br", "not-the-password")
            .await
            .unwrap_err();
        let unknown_email = try_login(&state, "ghost@refugio.com.br", "admin123456")
            .await
            .unwrap_err();

        assert_eq!(wrong_password.client_message(), unknown_email.client_message());
        assert_eq!(wrong_password.status_code(), unknown_email.status_code());
    }

    #[tokio::test]
    async fn disabled_accounts_cannot_login() {
        let state = state_with_admin().await;
        state
            .get_db()
            .query("UPDATE admin SET isActive = false")
            .await
            .unwrap();

        let err = try_login(&state, "admin@refugio.com.br", "admin123456")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden { .. }));
    }
}
