//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{LoginRequest, LoginResponse, RegisterRequest};
use crate::application::identity::UserService;
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};

/// Auth handler state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub users: Arc<UserService>,
}

#[utoipa::path(
    post,
    path = "/users/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<String>),
        (status = 409, description = "Username already taken"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<String>>), (StatusCode, Json<ApiResponse<String>>)> {
    match state.users.register(&request.username, &request.password).await {
        Ok(_) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success("User registered successfully".to_string())),
        )),
        Err(e) => {
            let status = match &e {
                DomainError::DuplicateUser(_) => StatusCode::CONFLICT,
                DomainError::Validation(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Err((status, Json(ApiResponse::error(e.to_string()))))
        }
    }
}

#[utoipa::path(
    post,
    path = "/users/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, (StatusCode, Json<ApiResponse<LoginResponse>>)> {
    match state.users.login(&request.username, &request.password).await {
        Ok(auth) => Ok(Json(ApiResponse::success(LoginResponse {
            token: auth.token,
            expires_in: auth.expires_in,
        }))),
        Err(e) => {
            let status = match &e {
                DomainError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Err((status, Json(ApiResponse::error(e.to_string()))))
        }
    }
}
