use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Accounts::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Accounts::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Accounts::PasswordHash)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Accounts::Role).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Accounts::ApprovalStatus)
                            .string_len(20)
                            .null(), // 管理者アカウントのみ値を持つ
                    )
                    .col(
                        ColumnDef::new(Accounts::ApprovalTokenHash)
                            .string_len(64)
                            .null(), // 承認後はnullに戻す
                    )
                    .col(
                        ColumnDef::new(Accounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Accounts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Accounts::Table)
                    .name("idx_accounts_email")
                    .col(Accounts::Email)
                    .to_owned(),
            )
            .await?;

        // 承認トークンによる検索用インデックス
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Accounts::Table)
                    .name("idx_accounts_approval_token_hash")
                    .col(Accounts::ApprovalTokenHash)
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
                    .table(Accounts::Table)
                    .name("idx_accounts_approval_token_hash")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .table(Accounts::Table)
                    .name("idx_accounts_email")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    Email,
    PasswordHash,
    Role,
    ApprovalStatus,
    ApprovalTokenHash,
    CreatedAt,
    UpdatedAt,
}
