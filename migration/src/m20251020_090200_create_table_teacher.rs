use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Teacher::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teacher::TeacherId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Teacher::EmployeeId)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Teacher::AccountId).uuid().null().unique_key())
                    .col(ColumnDef::new(Teacher::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Teacher::MiddleName).string_len(100).null())
                    .col(ColumnDef::new(Teacher::LastName).string_len(100).not_null())
                    .col(ColumnDef::new(Teacher::Gender).string_len(1).not_null())
                    .col(ColumnDef::new(Teacher::DateOfBirth).date().not_null())
                    .col(ColumnDef::new(Teacher::Phone).string_len(15).null())
                    .col(ColumnDef::new(Teacher::Address).string_len(255).null())
                    .col(
                        ColumnDef::new(Teacher::Email)
                            .string_len(128)
                            .null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Teacher::NationalIdNumber)
                            .string_len(15)
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Teacher::Qualification).string_len(20).not_null())
                    .col(ColumnDef::new(Teacher::Specialization).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Teacher::EmploymentStatus)
                            .string_len(20)
                            .not_null()
                            .default("permanent"),
                    )
                    .col(ColumnDef::new(Teacher::HireDate).date().not_null())
                    .col(
                        ColumnDef::new(Teacher::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Teacher::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Teacher::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teacher_account")
                            .from_tbl(Teacher::Table)
                            .from_col(Teacher::AccountId)
                            .to_tbl(Account::Table)
                            .to_col(Account::AccountId)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_teacher_created_at")
                    .table(Teacher::Table)
                    .col(Teacher::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_teacher_created_at")
                    .table(Teacher::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Teacher::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Teacher {
    Table,
    TeacherId,
    EmployeeId,
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
    Qualification,
    Specialization,
    EmploymentStatus,
    HireDate,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Account {
    Table,
    AccountId,
}
