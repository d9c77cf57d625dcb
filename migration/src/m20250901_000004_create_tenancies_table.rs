use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tenancies::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tenancies::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Tenancies::Seq)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .unique_key(), // 作成順序
                    )
                    .col(ColumnDef::new(Tenancies::PropertyId).uuid().not_null())
                    .col(ColumnDef::new(Tenancies::TenantId).uuid().not_null())
                    .col(
                        ColumnDef::new(Tenancies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tenancies_property_id")
                            .from(Tenancies::Table, Tenancies::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tenancies_tenant_id")
                            .from(Tenancies::Table, Tenancies::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // テナントごとの最新テナンシー検索用
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Tenancies::Table)
                    .name("idx_tenancies_tenant_id_seq")
                    .col(Tenancies::TenantId)
                    .col((Tenancies::Seq, IndexOrder::Desc))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Tenancies::Table)
                    .name("idx_tenancies_property_id")
                    .col(Tenancies::PropertyId)
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
                    .table(Tenancies::Table)
                    .name("idx_tenancies_property_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .table(Tenancies::Table)
                    .name("idx_tenancies_tenant_id_seq")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Tenancies::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Tenancies {
    Table,
    Id,
    Seq,
    PropertyId,
    TenantId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Properties {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Tenants {
    Table,
    Id,
}
