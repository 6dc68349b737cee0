use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Student::StudentId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Student::StudentCode)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Student::AccountId).uuid().null().unique_key())
                    .col(ColumnDef::new(Student::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Student::MiddleName).string_len(100).null())
                    .col(ColumnDef::new(Student::LastName).string_len(100).not_null())
                    .col(ColumnDef::new(Student::Gender).string_len(1).not_null())
                    .col(ColumnDef::new(Student::DateOfBirth).date().not_null())
                    .col(ColumnDef::new(Student::Phone).string_len(15).null())
                    .col(ColumnDef::new(Student::Address).string_len(255).null())
                    .col(
                        ColumnDef::new(Student::Email)
                            .string_len(128)
                            .null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Student::NationalIdNumber)
                            .string_len(15)
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Student::AdmissionDate).date().not_null())
                    .col(
                        ColumnDef::new(Student::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Student::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Student::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_account")
                            .from_tbl(Student::Table)
                            .from_col(Student::AccountId)
                            .to_tbl(Account::Table)
                            .to_col(Account::AccountId)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Student::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Student {
    Table,
    StudentId,
    StudentCode,
    AccountId,
    FirstName,
    MiddleName,
    LastName,
    Gender,
    DateOfBirth,
    Phone,
    Address,
    Email,
    NationalIdNumber,
    AdmissionDate,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Account {
    Table,
    AccountId,
}
