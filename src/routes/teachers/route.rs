use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State, multipart::Field},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use uuid::Uuid;

use super::dto::{
    BulkUploadResponse, CreateTeacherRequest, CreateTeacherResponse, ResetPasswordResponse,
    TeacherListResponse, TeacherQueryParams, TeacherResponse, TemplateQueryParams,
    UpdateTeacherRequest,
};
use crate::config::MAX_UPLOAD_SIZE_BYTES;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::teacher;
use crate::error::AppError;
use crate::extractor::AuthClaims;
use crate::repositories::{TeacherRepository, TeacherUpdate};
use crate::services::bulk_import::{ImportOptions, TemplateFormat, UploadedFile};
use crate::state::AppState;

// Room for the multipart envelope around a file at the import limit.
const BULK_BODY_LIMIT: usize = MAX_UPLOAD_SIZE_BYTES + 1024 * 1024;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/v1/teachers", get(list_teachers).post(create_teacher))
        .route("/api/v1/teachers/template", get(download_template))
        .route(
            "/api/v1/teachers/bulk",
            post(bulk_upload_teachers).layer(DefaultBodyLimit::max(BULK_BODY_LIMIT)),
        )
        .route(
            "/api/v1/teachers/{id}",
            get(get_teacher).put(update_teacher).delete(delete_teacher),
        )
        .route(
            "/api/v1/teachers/{id}/reset-password",
            post(reset_teacher_password),
        )
}

/// List active teachers with pagination and search
#[utoipa::path(
    get,
    path = "/api/v1/teachers",
    params(TeacherQueryParams),
    responses(
        (status = 200, description = "Teachers retrieved successfully", body = TeacherListResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
pub async fn list_teachers(
    State(state): State<AppState>,
    claims: AuthClaims,
    Query(params): Query<TeacherQueryParams>,
) -> Result<Json<TeacherListResponse>, AppError> {
    claims.require_role(&[RoleEnum::Admin, RoleEnum::Teacher])?;

    let page_size = params.page_size.clamp(1, 100);
    let (teachers, total) = TeacherRepository::new(state.db.clone())
        .search(params.page, page_size, params.search)
        .await?;

    Ok(Json(TeacherListResponse {
        teachers: teachers.into_iter().map(TeacherResponse::from).collect(),
        total,
        page: params.page.max(1),
        page_size,
    }))
}

/// Register a single teacher, optionally with a portal account
#[utoipa::path(
    post,
    path = "/api/v1/teachers",
    request_body = CreateTeacherRequest,
    responses(
        (status = 201, description = "Teacher created", body = CreateTeacherResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Email already in use"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
pub async fn create_teacher(
    State(state): State<AppState>,
    claims: AuthClaims,
    Json(payload): Json<CreateTeacherRequest>,
) -> Result<(StatusCode, Json<CreateTeacherResponse>), AppError> {
    claims.require_role(&[RoleEnum::Admin])?;

    let create_account = payload.create_user_account;
    let send_email = payload.send_credentials_email;
    let registration = state
        .teacher_service()
        .register(payload.into_values(), create_account, send_email)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateTeacherResponse {
            account_id: registration.account.map(|a| a.account_id),
            teacher: registration.teacher.into(),
            generated_password: registration.generated_password,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/teachers/{id}",
    params(("id" = Uuid, Path, description = "Teacher id")),
    responses(
        (status = 200, description = "Teacher found", body = TeacherResponse),
        (status = 404, description = "Teacher not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
pub async fn get_teacher(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(teacher_id): Path<Uuid>,
) -> Result<Json<TeacherResponse>, AppError> {
    claims.require_role(&[RoleEnum::Admin, RoleEnum::Teacher])?;

    let teacher = find_teacher(&state, teacher_id).await?;
    Ok(Json(teacher.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/teachers/{id}",
    params(("id" = Uuid, Path, description = "Teacher id")),
    request_body = UpdateTeacherRequest,
    responses(
        (status = 200, description = "Teacher updated", body = TeacherResponse),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Teacher not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
pub async fn update_teacher(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(teacher_id): Path<Uuid>,
    Json(payload): Json<UpdateTeacherRequest>,
) -> Result<Json<TeacherResponse>, AppError> {
    claims.require_role(&[RoleEnum::Admin])?;

    let updates = TeacherUpdate::from(payload);
    validate_update(&updates)?;

    let teacher = find_teacher(&state, teacher_id).await?;
    let teacher = TeacherRepository::new(state.db.clone())
        .update(teacher, updates)
        .await?;

    tracing::info!(teacher_id = %teacher.teacher_id, "Teacher updated");
    Ok(Json(teacher.into()))
}

/// Soft delete; a linked account loses portal access
#[utoipa::path(
    delete,
    path = "/api/v1/teachers/{id}",
    params(("id" = Uuid, Path, description = "Teacher id")),
    responses(
        (status = 204, description = "Teacher deactivated"),
        (status = 404, description = "Teacher not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
pub async fn delete_teacher(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(teacher_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    claims.require_role(&[RoleEnum::Admin])?;

    let teacher = find_teacher(&state, teacher_id).await?;
    let account_id = teacher.account_id;
    TeacherRepository::new(state.db.clone())
        .soft_delete(teacher)
        .await?;

    if let Some(account_id) = account_id {
        state
            .provisioner()
            .set_portal_access(account_id, false)
            .await?;
    }

    tracing::info!(teacher_id = %teacher_id, "Teacher deactivated");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/teachers/{id}/reset-password",
    params(("id" = Uuid, Path, description = "Teacher id")),
    responses(
        (status = 200, description = "Password reset; the new password is returned once", body = ResetPasswordResponse),
        (status = 400, description = "Teacher has no portal account"),
        (status = 404, description = "Teacher not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
pub async fn reset_teacher_password(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(teacher_id): Path<Uuid>,
) -> Result<Json<ResetPasswordResponse>, AppError> {
    claims.require_role(&[RoleEnum::Admin])?;

    let new_password = state
        .teacher_service()
        .reset_portal_password(teacher_id)
        .await?;

    Ok(Json(ResetPasswordResponse {
        message: "Password reset successfully".to_string(),
        new_password,
    }))
}

/// Bulk import teachers from an .xlsx or .csv file
#[utoipa::path(
    post,
    path = "/api/v1/teachers/bulk",
    request_body(content = String, content_type = "multipart/form-data", description = "Multipart form data with fields: file (binary), create_user_accounts (bool, default true), send_credentials_email (bool, default true)"),
    responses(
        (status = 200, description = "File processed; see errors for rejected rows", body = BulkUploadResponse),
        (status = 400, description = "Unsupported format or missing columns"),
        (status = 413, description = "File too large"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
pub async fn bulk_upload_teachers(
    State(state): State<AppState>,
    claims: AuthClaims,
    mut multipart: Multipart,
) -> Result<Json<BulkUploadResponse>, AppError> {
    claims.require_role(&[RoleEnum::Admin])?;

    let mut file: Option<UploadedFile> = None;
    let mut options = ImportOptions::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::FieldValidation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes: Bytes = field.bytes().await.map_err(|e| {
                    AppError::FieldValidation(format!("Failed to read uploaded file: {e}"))
                })?;
                file = Some(UploadedFile {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            "create_user_accounts" => {
                options.create_accounts = parse_flag(&name, &field_text(field).await?)?;
            }
            "send_credentials_email" => {
                options.send_emails = parse_flag(&name, &field_text(field).await?)?;
            }
            _ => {}
        }
    }

    let file =
        file.ok_or_else(|| AppError::FieldValidation("file: This field is required".to_string()))?;

    let outcome = state.importer().process(&file, options).await?;
    Ok(Json(outcome.into()))
}

/// Download the import template
#[utoipa::path(
    get,
    path = "/api/v1/teachers/template",
    params(TemplateQueryParams),
    responses(
        (status = 200, description = "Template file as an attachment"),
        (status = 400, description = "Unknown format")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
pub async fn download_template(
    claims: AuthClaims,
    Query(params): Query<TemplateQueryParams>,
) -> Result<Response, AppError> {
    claims.require_role(&[RoleEnum::Admin])?;

    let format = TemplateFormat::parse(params.format.as_deref())?;
    let body = format.render()?;

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.file_name()),
            ),
        ],
        body,
    )
        .into_response())
}

async fn find_teacher(
    state: &AppState,
    teacher_id: Uuid,
) -> Result<teacher::Model, AppError> {
    TeacherRepository::new(state.db.clone())
        .find_by_id(teacher_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Teacher".to_string()))
}

async fn field_text(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::FieldValidation(format!("Invalid multipart field: {e}")))
}

fn parse_flag(name: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(AppError::FieldValidation(format!(
            "{name}: '{other}' is not a valid boolean"
        ))),
    }
}

fn validate_update(updates: &TeacherUpdate) -> Result<(), AppError> {
    let mut problems = Vec::new();
    for (field, value) in [
        ("first_name", &updates.first_name),
        ("last_name", &updates.last_name),
    ] {
        if let Some(value) = value {
            if !(2..=100).contains(&value.chars().count()) {
                problems.push(format!("{field}: Must be between 2 and 100 characters"));
            }
        }
    }
    if let Some(address) = &updates.address {
        if address.chars().count() > 255 {
            problems.push("address: Ensure this field has no more than 255 characters".to_string());
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::FieldValidation(problems.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_form_spellings() {
        assert!(parse_flag("create_user_accounts", "TRUE").unwrap());
        assert!(!parse_flag("create_user_accounts", "0").unwrap());
        assert!(parse_flag("create_user_accounts", "maybe").is_err());
    }

    #[test]
    fn update_rejects_short_names() {
        let updates = TeacherUpdate {
            first_name: Some("A".to_string()),
            ..Default::default()
        };
        let err = validate_update(&updates).unwrap_err();
        assert!(err.to_string().starts_with("first_name:"));
        assert!(validate_update(&TeacherUpdate::default()).is_ok());
    }
}
