use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tenant::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tenant::TenantId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tenant::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Tenant::Code)
                            .string_len(10)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Tenant::TenantType).string_len(20).not_null())
                    .col(ColumnDef::new(Tenant::Ownership).string_len(20).not_null())
                    .col(ColumnDef::new(Tenant::DigitalAddress).string_len(50).null())
                    .col(ColumnDef::new(Tenant::PhysicalAddress).string_len(255).null())
                    .col(ColumnDef::new(Tenant::HeadmasterName).string_len(255).not_null())
                    .col(ColumnDef::new(Tenant::Email).string_len(254).not_null())
                    .col(ColumnDef::new(Tenant::Phone).string_len(20).not_null())
                    .col(ColumnDef::new(Tenant::Motto).string_len(255).null())
                    .col(
                        ColumnDef::new(Tenant::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Tenant::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Tenant::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tenant::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Tenant {
    Table,
    TenantId,
    Name,
    Code,
    TenantType,
    Ownership,
    DigitalAddress,
    PhysicalAddress,
    HeadmasterName,
    Email,
    Phone,
    Motto,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
