use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // rent_terms は追記専用。更新・削除はしない
        manager
            .create_table(
                Table::create()
                    .table(RentTerms::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(RentTerms::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(RentTerms::Seq)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .unique_key(), // 作成順序
                    )
                    .col(ColumnDef::new(RentTerms::TenancyId).uuid().not_null())
                    .col(ColumnDef::new(RentTerms::Amount).big_integer().not_null())
                    .col(ColumnDef::new(RentTerms::DueDate).date().not_null())
                    .col(
                        ColumnDef::new(RentTerms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rent_terms_tenancy_id")
                            .from(RentTerms::Table, RentTerms::TenancyId)
                            .to(Tenancies::Table, Tenancies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // (tenancy_id, seq DESC) で最新行をO(1)で取得
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(RentTerms::Table)
                    .name("idx_rent_terms_tenancy_id_seq")
                    .col(RentTerms::TenancyId)
                    .col((RentTerms::Seq, IndexOrder::Desc))
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
                    .table(RentTerms::Table)
                    .name("idx_rent_terms_tenancy_id_seq")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RentTerms::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RentTerms {
    Table,
    Id,
    Seq,
    TenancyId,
    Amount,
    DueDate,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Tenancies {
    Table,
    Id,
}
