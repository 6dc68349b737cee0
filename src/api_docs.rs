use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::entities::sea_orm_active_enums::{
    EmploymentStatus, Gender, Ownership, Qualification, RoleEnum, TenantType,
};
use crate::routes::auth::dto as auth_dto;
use crate::routes::health::route as health_route;
use crate::routes::students::dto as student_dto;
use crate::routes::teachers::dto as teacher_dto;
use crate::routes::tenants::dto as tenant_dto;
use crate::services::bulk_import::IssuedCredential;
use crate::services::profile::{ProfileKind, ProfileRef};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "School Manager API",
        version = "0.1.0",
        description = "Accounts, teachers, students and tenants of a school management system"
    ),
    paths(
        crate::routes::health::route::health_check,
        crate::routes::auth::route::signup,
        crate::routes::auth::route::login,
        crate::routes::auth::route::me,
        crate::routes::auth::route::update_portal_access,
        crate::routes::teachers::route::list_teachers,
        crate::routes::teachers::route::create_teacher,
        crate::routes::teachers::route::get_teacher,
        crate::routes::teachers::route::update_teacher,
        crate::routes::teachers::route::delete_teacher,
        crate::routes::teachers::route::reset_teacher_password,
        crate::routes::teachers::route::bulk_upload_teachers,
        crate::routes::teachers::route::download_template,
        crate::routes::students::route::list_students,
        crate::routes::students::route::create_student,
        crate::routes::students::route::reset_student_password,
        crate::routes::tenants::route::list_tenants,
        crate::routes::tenants::route::create_tenant,
        crate::routes::tenants::route::get_tenant,
        crate::routes::tenants::route::deactivate_tenant,
    ),
    components(schemas(
        RoleEnum,
        Gender,
        Qualification,
        EmploymentStatus,
        TenantType,
        Ownership,
        ProfileKind,
        ProfileRef,
        IssuedCredential,
        health_route::HealthResponse,
        auth_dto::SignupRequest,
        auth_dto::SignupResponse,
        auth_dto::LoginRequest,
        auth_dto::LoginResponse,
        auth_dto::MeResponse,
        auth_dto::PortalAccessRequest,
        auth_dto::AccountResponse,
        auth_dto::ProfileSummary,
        teacher_dto::TeacherResponse,
        teacher_dto::TeacherListResponse,
        teacher_dto::CreateTeacherRequest,
        teacher_dto::CreateTeacherResponse,
        teacher_dto::UpdateTeacherRequest,
        teacher_dto::ResetPasswordResponse,
        teacher_dto::BulkUploadResponse,
        student_dto::StudentResponse,
        student_dto::StudentListResponse,
        student_dto::CreateStudentRequest,
        student_dto::CreateStudentResponse,
        tenant_dto::TenantResponse,
        tenant_dto::CreateTenantRequest,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Signup, login and portal access"),
        (name = "Teachers", description = "Teacher records, bulk import and templates"),
        (name = "Students", description = "Student records"),
        (name = "Tenants", description = "School registry")
    )
)]
pub struct ApiDoc;
