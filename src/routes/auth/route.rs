use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::{ConnectInfo, Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use uuid::Uuid;

use super::dto::{
    AccountResponse, LoginRequest, LoginResponse, MeResponse, PortalAccessRequest,
    ProfileSummary, SignupRequest, SignupResponse,
};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::AppError;
use crate::extractor::AuthClaims;
use crate::repositories::{StudentRepository, TeacherRepository};
use crate::services::profile::{Profile, ProfileKind, display_name};
use crate::services::NewAccount;
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/v1/auth/signup", post(signup))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/me", get(me))
        .route(
            "/api/v1/accounts/{id}/portal-access",
            put(update_portal_access),
        )
}

/// Create an account (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = SignupResponse),
        (status = 400, description = "Missing password for an admin account or invalid profile"),
        (status = 409, description = "Email already registered"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
pub async fn signup(
    State(state): State<AppState>,
    claims: AuthClaims,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    claims.require_role(&[RoleEnum::Admin])?;

    let profile = match payload.profile_id {
        Some(profile_id) => Some(load_profile(&state, payload.role, profile_id).await?),
        None => None,
    };

    let provisioned = state
        .provisioner()
        .create_account(
            NewAccount {
                email: payload.email,
                role: payload.role,
                password: payload.password,
                first_name: payload.first_name,
                last_name: payload.last_name,
            },
            profile,
            payload.send_credentials_email,
        )
        .await?;

    let display_name = display_name(&provisioned.account, provisioned.profile.as_ref());

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            account: provisioned.account.into(),
            display_name,
            generated_password: provisioned.generated_password,
        }),
    ))
}

/// Login endpoint - returns JWT token
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account deactivated")
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let provisioner = state.provisioner();
    let account = provisioner
        .authenticate(&payload.email, &payload.password, Some(addr.ip().to_string()))
        .await?;

    let profile = provisioner.resolve_profile(&account).await?;
    let access_token = state
        .jwt
        .encode_token(account.account_id, &account.email, account.role)?;

    tracing::info!(account_id = %account.account_id, "Login successful");

    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt.expires_in(),
        account_id: account.account_id,
        display_name: display_name(&account, profile.as_ref()),
        email: account.email,
        role: account.role,
    }))
}

/// Current account with its linked profile
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current account", body = MeResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
pub async fn me(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
) -> Result<Json<MeResponse>, AppError> {
    let provisioner = state.provisioner();
    let account = provisioner.find_account(claims.account_id()?).await?;
    let profile = provisioner.resolve_profile(&account).await?;

    Ok(Json(MeResponse {
        display_name: display_name(&account, profile.as_ref()),
        profile: profile.as_ref().map(ProfileSummary::from),
        account: account.into(),
    }))
}

/// Enable or disable portal login for an account (admin only)
#[utoipa::path(
    put,
    path = "/api/v1/accounts/{id}/portal-access",
    params(("id" = Uuid, Path, description = "Account id")),
    request_body = PortalAccessRequest,
    responses(
        (status = 200, description = "Portal access updated", body = AccountResponse),
        (status = 404, description = "Account not found"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
pub async fn update_portal_access(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(account_id): Path<Uuid>,
    Json(payload): Json<PortalAccessRequest>,
) -> Result<Json<AccountResponse>, AppError> {
    claims.require_role(&[RoleEnum::Admin])?;

    let account = state
        .provisioner()
        .set_portal_access(account_id, payload.enabled)
        .await?;

    Ok(Json(account.into()))
}

async fn load_profile(
    state: &AppState,
    role: RoleEnum,
    profile_id: Uuid,
) -> Result<Profile, AppError> {
    match ProfileKind::for_role(role) {
        Some(ProfileKind::Teacher) => TeacherRepository::new(state.db.clone())
            .find_by_id(profile_id)
            .await?
            .map(Profile::Teacher)
            .ok_or_else(|| AppError::NotFound("Teacher".to_string())),
        Some(ProfileKind::Student) => StudentRepository::new(state.db.clone())
            .find_by_id(profile_id)
            .await?
            .map(Profile::Student)
            .ok_or_else(|| AppError::NotFound("Student".to_string())),
        None => Err(AppError::FieldValidation(
            "Admin accounts cannot be linked to a profile".to_string(),
        )),
    }
}
