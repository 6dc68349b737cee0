use crate::entities::sea_orm_active_enums::{EmploymentStatus, Gender, Qualification};
use crate::entities::teacher;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

pub struct TeacherRepository {
    db: DatabaseConnection,
}

/// A validated teacher record waiting for its employee id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTeacher {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub national_id_number: Option<String>,
    pub qualification: Qualification,
    pub specialization: String,
    pub employment_status: EmploymentStatus,
    pub hire_date: NaiveDate,
}

impl TeacherRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Active teachers only.
    pub async fn find_by_id(&self, teacher_id: Uuid) -> Result<Option<teacher::Model>, DbErr> {
        teacher::Entity::find_by_id(teacher_id)
            .filter(teacher::Column::IsActive.eq(true))
            .one(&self.db)
            .await
    }

    pub async fn find_by_account_id(
        &self,
        account_id: Uuid,
    ) -> Result<Option<teacher::Model>, DbErr> {
        teacher::Entity::find()
            .filter(teacher::Column::AccountId.eq(account_id))
            .one(&self.db)
            .await
    }

    pub async fn exists_by_email(&self, email: &str) -> Result<bool, DbErr> {
        let count = teacher::Entity::find()
            .filter(teacher::Column::Email.eq(email))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    pub async fn exists_by_national_id(&self, national_id_number: &str) -> Result<bool, DbErr> {
        let count = teacher::Entity::find()
            .filter(teacher::Column::NationalIdNumber.eq(national_id_number))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        teacher::Entity::find().count(&self.db).await
    }

    /// Paginated listing of active teachers, optionally filtered by a search term
    /// matched against names, employee id, email and specialization.
    pub async fn search(
        &self,
        page: u32,
        page_size: u32,
        search: Option<String>,
    ) -> Result<(Vec<teacher::Model>, u64), DbErr> {
        let mut query = teacher::Entity::find().filter(teacher::Column::IsActive.eq(true));

        if let Some(term) = search.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(teacher::Column::FirstName.contains(&term))
                    .add(teacher::Column::LastName.contains(&term))
                    .add(teacher::Column::EmployeeId.contains(&term))
                    .add(teacher::Column::Email.contains(&term))
                    .add(teacher::Column::Specialization.contains(&term)),
            );
        }

        let total = query.clone().count(&self.db).await?;

        let offset = (page.max(1) - 1) * page_size;
        let teachers = query
            .order_by_asc(teacher::Column::LastName)
            .order_by_asc(teacher::Column::FirstName)
            .limit(page_size as u64)
            .offset(offset as u64)
            .all(&self.db)
            .await?;

        Ok((teachers, total))
    }

    pub async fn create(
        &self,
        employee_id: String,
        record: NewTeacher,
    ) -> Result<teacher::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let teacher_model = teacher::ActiveModel {
            teacher_id: Set(Uuid::new_v4()),
            employee_id: Set(employee_id),
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
            qualification: Set(record.qualification),
            specialization: Set(record.specialization),
            employment_status: Set(record.employment_status),
            hire_date: Set(record.hire_date),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        teacher_model.insert(&self.db).await
    }

    pub async fn link_account(
        &self,
        teacher: teacher::Model,
        account_id: Uuid,
    ) -> Result<teacher::Model, DbErr> {
        let mut active_teacher: teacher::ActiveModel = teacher.into();
        active_teacher.account_id = Set(Some(account_id));
        active_teacher.updated_at = Set(Utc::now().naive_utc());
        active_teacher.update(&self.db).await
    }

    pub async fn update(
        &self,
        teacher: teacher::Model,
        updates: TeacherUpdate,
    ) -> Result<teacher::Model, DbErr> {
        let mut active_teacher: teacher::ActiveModel = teacher.into();

        if let Some(first_name) = updates.first_name {
            active_teacher.first_name = Set(first_name);
        }
        if let Some(middle_name) = updates.middle_name {
            active_teacher.middle_name = Set(Some(middle_name));
        }
        if let Some(last_name) = updates.last_name {
            active_teacher.last_name = Set(last_name);
        }
        if let Some(phone) = updates.phone {
            active_teacher.phone = Set(Some(phone));
        }
        if let Some(address) = updates.address {
            active_teacher.address = Set(Some(address));
        }
        if let Some(qualification) = updates.qualification {
            active_teacher.qualification = Set(qualification);
        }
        if let Some(specialization) = updates.specialization {
            active_teacher.specialization = Set(specialization);
        }
        if let Some(employment_status) = updates.employment_status {
            active_teacher.employment_status = Set(employment_status);
        }

        active_teacher.updated_at = Set(Utc::now().naive_utc());
        active_teacher.update(&self.db).await
    }

    /// Soft delete: the row stays, the flag goes down.
    pub async fn soft_delete(&self, teacher: teacher::Model) -> Result<teacher::Model, DbErr> {
        let mut active_teacher: teacher::ActiveModel = teacher.into();
        active_teacher.is_active = Set(false);
        active_teacher.updated_at = Set(Utc::now().naive_utc());
        active_teacher.update(&self.db).await
    }
}

#[derive(Debug, Default)]
pub struct TeacherUpdate {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub qualification: Option<Qualification>,
    pub specialization: Option<String>,
    pub employment_status: Option<EmploymentStatus>,
}
