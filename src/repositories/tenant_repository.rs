use crate::entities::sea_orm_active_enums::{Ownership, TenantType};
use crate::entities::tenant;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

pub struct TenantRepository {
    db: DatabaseConnection,
}

pub struct NewTenant {
    pub name: String,
    pub code: String,
    pub tenant_type: TenantType,
    pub ownership: Ownership,
    pub digital_address: Option<String>,
    pub physical_address: Option<String>,
    pub headmaster_name: String,
    pub email: String,
    pub phone: String,
    pub motto: Option<String>,
}

impl TenantRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<tenant::Model>, DbErr> {
        tenant::Entity::find()
            .order_by_asc(tenant::Column::Name)
            .all(&self.db)
            .await
    }

    pub async fn find_by_id(&self, tenant_id: Uuid) -> Result<Option<tenant::Model>, DbErr> {
        tenant::Entity::find_by_id(tenant_id).one(&self.db).await
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Option<tenant::Model>, DbErr> {
        tenant::Entity::find()
            .filter(tenant::Column::Code.eq(code))
            .one(&self.db)
            .await
    }

    pub async fn create(&self, record: NewTenant) -> Result<tenant::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let tenant_model = tenant::ActiveModel {
            tenant_id: Set(Uuid::new_v4()),
            name: Set(record.name),
            code: Set(record.code),
            tenant_type: Set(record.tenant_type),
            ownership: Set(record.ownership),
            digital_address: Set(record.digital_address),
            physical_address: Set(record.physical_address),
            headmaster_name: Set(record.headmaster_name),
            email: Set(record.email),
            phone: Set(record.phone),
            motto: Set(record.motto),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        tenant_model.insert(&self.db).await
    }

    pub async fn deactivate(&self, tenant: tenant::Model) -> Result<tenant::Model, DbErr> {
        let mut active_tenant: tenant::ActiveModel = tenant.into();
        active_tenant.is_active = Set(false);
        active_tenant.updated_at = Set(Utc::now().naive_utc());
        active_tenant.update(&self.db).await
    }
}
