use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Properties::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Properties::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Properties::LandlordId).uuid().not_null())
                    .col(
                        ColumnDef::new(Properties::Address)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Properties::Status)
                            .string_len(20)
                            .not_null()
                            .default("vacant"),
                    )
                    .col(
                        ColumnDef::new(Properties::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Properties::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_properties_landlord_id")
                            .from(Properties::Table, Properties::LandlordId)
                            .to(Landlords::Table, Landlords::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Properties::Table)
                    .name("idx_properties_landlord_id")
                    .col(Properties::LandlordId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .table(Properties::Table)
                    .name("idx_properties_landlord_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Properties::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Properties {
    Table,
    Id,
    LandlordId,
    Address,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Landlords {
    Table,
    Id,
}
