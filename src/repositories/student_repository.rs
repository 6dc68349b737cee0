use crate::entities::sea_orm_active_enums::Gender;
use crate::entities::student;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

pub struct StudentRepository {
    db: DatabaseConnection,
}

#[derive(Debug, Clone)]
pub struct NewStudent {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub national_id_number: Option<String>,
    pub admission_date: NaiveDate,
}

impl StudentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, student_id: Uuid) -> Result<Option<student::Model>, DbErr> {
        student::Entity::find_by_id(student_id)
            .filter(student::Column::IsActive.eq(true))
            .one(&self.db)
            .await
    }

    pub async fn find_by_account_id(
        &self,
        account_id: Uuid,
    ) -> Result<Option<student::Model>, DbErr> {
        student::Entity::find()
            .filter(student::Column::AccountId.eq(account_id))
            .one(&self.db)
            .await
    }

    pub async fn find_all_with_pagination(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<(Vec<student::Model>, u64), DbErr> {
        let query = student::Entity::find().filter(student::Column::IsActive.eq(true));
        let total = query.clone().count(&self.db).await?;

        let offset = (page.max(1) - 1) * page_size;
        let students = query
            .order_by_asc(student::Column::StudentCode)
            .limit(page_size as u64)
            .offset(offset as u64)
            .all(&self.db)
            .await?;

        Ok((students, total))
    }

    pub async fn create(
        &self,
        student_code: String,
        record: NewStudent,
    ) -> Result<student::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let student_model = student::ActiveModel {
            student_id: Set(Uuid::new_v4()),
            student_code: Set(student_code),
            account_id: Set(None),
            first_name: Set(record.first_name),
            middle_name: Set(record.middle_name),
            last_name: Set(record.last_name),
            gender: Set(record.gender),
            date_of_birth: Set(record.date_of_birth),
            phone: Set(record.phone),
            address: Set(record.address),
            email: Set(record.email),
            national_id_number: Set(record.national_id_number),
            admission_date: Set(record.admission_date),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        student_model.insert(&self.db).await
    }

    pub async fn link_account(
        &self,
        student: student::Model,
        account_id: Uuid,
    ) -> Result<student::Model, DbErr> {
        let mut active_student: student::ActiveModel = student.into();
        active_student.account_id = Set(Some(account_id));
        active_student.updated_at = Set(Utc::now().naive_utc());
        active_student.update(&self.db).await
    }
}
