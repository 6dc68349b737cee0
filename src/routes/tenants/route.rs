use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use super::dto::{CreateTenantRequest, TenantResponse};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::AppError;
use crate::extractor::AuthClaims;
use crate::repositories::{TenantRepository, is_unique_violation};
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/v1/tenants", get(list_tenants).post(create_tenant))
        .route(
            "/api/v1/tenants/{id}",
            get(get_tenant).delete(deactivate_tenant),
        )
}

#[utoipa::path(
    get,
    path = "/api/v1/tenants",
    responses(
        (status = 200, description = "Tenants retrieved successfully", body = Vec<TenantResponse>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Tenants"
)]
pub async fn list_tenants(
    State(state): State<AppState>,
    claims: AuthClaims,
) -> Result<Json<Vec<TenantResponse>>, AppError> {
    claims.require_role(&[RoleEnum::Admin])?;

    let tenants = TenantRepository::new(state.db.clone()).find_all().await?;
    Ok(Json(tenants.into_iter().map(TenantResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/tenants",
    request_body = CreateTenantRequest,
    responses(
        (status = 201, description = "Tenant created", body = TenantResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Tenant code already registered"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Tenants"
)]
pub async fn create_tenant(
    State(state): State<AppState>,
    claims: AuthClaims,
    Json(payload): Json<CreateTenantRequest>,
) -> Result<(StatusCode, Json<TenantResponse>), AppError> {
    claims.require_role(&[RoleEnum::Admin])?;

    let record = payload.into_record()?;
    let tenant_repo = TenantRepository::new(state.db.clone());
    let code = record.code.clone();

    if tenant_repo.find_by_code(&code).await?.is_some() {
        return Err(duplicate_code(&code));
    }

    let tenant = tenant_repo.create(record).await.map_err(|e| {
        if is_unique_violation(&e) {
            duplicate_code(&code)
        } else {
            AppError::Database(e)
        }
    })?;

    tracing::info!(tenant_id = %tenant.tenant_id, code = %tenant.code, "Tenant created");
    Ok((StatusCode::CREATED, Json(tenant.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/tenants/{id}",
    params(("id" = Uuid, Path, description = "Tenant id")),
    responses(
        (status = 200, description = "Tenant found", body = TenantResponse),
        (status = 404, description = "Tenant not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tenants"
)]
pub async fn get_tenant(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(tenant_id): Path<Uuid>,
) -> Result<Json<TenantResponse>, AppError> {
    claims.require_role(&[RoleEnum::Admin])?;

    let tenant = TenantRepository::new(state.db.clone())
        .find_by_id(tenant_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tenant".to_string()))?;

    Ok(Json(tenant.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/tenants/{id}",
    params(("id" = Uuid, Path, description = "Tenant id")),
    responses(
        (status = 200, description = "Tenant deactivated", body = TenantResponse),
        (status = 404, description = "Tenant not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Tenants"
)]
pub async fn deactivate_tenant(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(tenant_id): Path<Uuid>,
) -> Result<Json<TenantResponse>, AppError> {
    claims.require_role(&[RoleEnum::Admin])?;

    let tenant_repo = TenantRepository::new(state.db.clone());
    let tenant = tenant_repo
        .find_by_id(tenant_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tenant".to_string()))?;
    let tenant = tenant_repo.deactivate(tenant).await?;

    tracing::info!(tenant_id = %tenant.tenant_id, "Tenant deactivated");
    Ok(Json(tenant.into()))
}

fn duplicate_code(code: &str) -> AppError {
    AppError::DuplicateIdentity(format!("A tenant with code {code} already exists"))
}
