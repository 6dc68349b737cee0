use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const SEQUENCES: [&str; 2] = ["teacher", "student"];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(IdSequence::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IdSequence::Name)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(IdSequence::LastValue)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        let mut seed = Query::insert();
        seed.into_table(IdSequence::Table)
            .columns([IdSequence::Name, IdSequence::LastValue]);
        for name in SEQUENCES {
            seed.values([name.into(), 0i64.into()])
                .map_err(|e| DbErr::Migration(e.to_string()))?;
        }
        manager.exec_stmt(seed).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(IdSequence::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum IdSequence {
    Table,
    Name,
    LastValue,
}
