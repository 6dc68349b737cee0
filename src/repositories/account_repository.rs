use crate::entities::account;
use crate::entities::sea_orm_active_enums::RoleEnum;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub struct AccountRepository {
    db: DatabaseConnection,
}

/// Column values for a new account row. The password is already hashed.
pub struct NewAccountRecord {
    pub email: String,
    pub password_hash: String,
    pub role: RoleEnum,
    pub first_name: String,
    pub last_name: String,
}

impl AccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn get_connection(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn find_by_id(&self, account_id: Uuid) -> Result<Option<account::Model>, DbErr> {
        account::Entity::find_by_id(account_id).one(&self.db).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<account::Model>, DbErr> {
        account::Entity::find()
            .filter(account::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    pub async fn exists_by_email(&self, email: &str) -> Result<bool, DbErr> {
        let count = account::Entity::find()
            .filter(account::Column::Email.eq(email))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        account::Entity::find().count(&self.db).await
    }

    pub async fn find_by_role(&self, role: RoleEnum) -> Result<Vec<account::Model>, DbErr> {
        account::Entity::find()
            .filter(account::Column::Role.eq(role))
            .order_by_asc(account::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    pub async fn create(&self, record: NewAccountRecord) -> Result<account::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let account_model = account::ActiveModel {
            account_id: Set(Uuid::new_v4()),
            email: Set(record.email),
            password_hash: Set(record.password_hash),
            role: Set(record.role),
            first_name: Set(record.first_name),
            last_name: Set(record.last_name),
            is_active: Set(true),
            is_active_portal: Set(true),
            last_login: Set(None),
            last_login_ip: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        account_model.insert(&self.db).await
    }

    pub async fn update_password_hash(
        &self,
        account: account::Model,
        password_hash: String,
    ) -> Result<account::Model, DbErr> {
        let mut active_account: account::ActiveModel = account.into();
        active_account.password_hash = Set(password_hash);
        active_account.updated_at = Set(Utc::now().naive_utc());
        active_account.update(&self.db).await
    }

    pub async fn record_login(
        &self,
        account: account::Model,
        ip_address: Option<String>,
    ) -> Result<account::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let mut active_account: account::ActiveModel = account.into();
        active_account.last_login = Set(Some(now));
        active_account.last_login_ip = Set(ip_address);
        active_account.update(&self.db).await
    }

    pub async fn set_portal_access(
        &self,
        account: account::Model,
        enabled: bool,
    ) -> Result<account::Model, DbErr> {
        let mut active_account: account::ActiveModel = account.into();
        active_account.is_active_portal = Set(enabled);
        active_account.updated_at = Set(Utc::now().naive_utc());
        active_account.update(&self.db).await
    }
}
