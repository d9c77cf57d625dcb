use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // subscriptions は状態スナップショットの追記専用テーブル
        manager
            .create_table(
                Table::create()
                    .table(Subscriptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subscriptions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::Seq)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Subscriptions::LandlordId).uuid().not_null())
                    .col(
                        ColumnDef::new(Subscriptions::Status)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::Reason)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscriptions_landlord_id")
                            .from(Subscriptions::Table, Subscriptions::LandlordId)
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
                    .table(Subscriptions::Table)
                    .name("idx_subscriptions_landlord_id_seq")
                    .col(Subscriptions::LandlordId)
                    .col((Subscriptions::Seq, IndexOrder::Desc))
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
                    .table(Subscriptions::Table)
                    .name("idx_subscriptions_landlord_id_seq")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Subscriptions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Subscriptions {
    Table,
    Id,
    Seq,
    LandlordId,
    Status,
    IsActive,
    Reason,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Landlords {
    Table,
    Id,
}
