use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use super::dto::{
    CreateStudentRequest, CreateStudentResponse, StudentListResponse, StudentQueryParams,
    StudentResponse,
};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::AppError;
use crate::extractor::AuthClaims;
use crate::repositories::StudentRepository;
use crate::routes::teachers::dto::ResetPasswordResponse;
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/v1/students", get(list_students).post(create_student))
        .route(
            "/api/v1/students/{id}/reset-password",
            post(reset_student_password),
        )
}

#[utoipa::path(
    get,
    path = "/api/v1/students",
    params(StudentQueryParams),
    responses(
        (status = 200, description = "Students retrieved successfully", body = StudentListResponse),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn list_students(
    State(state): State<AppState>,
    claims: AuthClaims,
    Query(params): Query<StudentQueryParams>,
) -> Result<Json<StudentListResponse>, AppError> {
    claims.require_role(&[RoleEnum::Admin, RoleEnum::Teacher])?;

    let page_size = params.page_size.clamp(1, 100);
    let (students, total) = StudentRepository::new(state.db.clone())
        .find_all_with_pagination(params.page, page_size)
        .await?;

    Ok(Json(StudentListResponse {
        students: students.into_iter().map(StudentResponse::from).collect(),
        total,
        page: params.page.max(1),
        page_size,
    }))
}

/// Register a student with a generated `STU` code
#[utoipa::path(
    post,
    path = "/api/v1/students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = CreateStudentResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Email already in use"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn create_student(
    State(state): State<AppState>,
    claims: AuthClaims,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<CreateStudentResponse>), AppError> {
    claims.require_role(&[RoleEnum::Admin])?;

    let create_account = payload.create_account();
    let send_email = payload.send_credentials_email;
    let registration = state
        .student_service()
        .register(payload.into_record()?, create_account, send_email)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateStudentResponse {
            account_id: registration.account.map(|a| a.account_id),
            student: registration.student.into(),
            generated_password: registration.generated_password,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/students/{id}/reset-password",
    params(("id" = Uuid, Path, description = "Student id")),
    responses(
        (status = 200, description = "Password reset; the new password is returned once", body = ResetPasswordResponse),
        (status = 400, description = "Student has no portal account"),
        (status = 404, description = "Student not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn reset_student_password(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(student_id): Path<Uuid>,
) -> Result<Json<ResetPasswordResponse>, AppError> {
    claims.require_role(&[RoleEnum::Admin])?;

    let new_password = state
        .student_service()
        .reset_portal_password(student_id)
        .await?;

    Ok(Json(ResetPasswordResponse {
        message: "Password reset successfully".to_string(),
        new_password,
    }))
}
