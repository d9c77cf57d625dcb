// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// アカウント関連マイグレーション
mod m20250901_000001_create_accounts_table;
mod m20250901_000002_create_landlords_and_tenants_tables;

// 物件・テナンシー・家賃台帳
mod m20250901_000003_create_properties_table;
mod m20250901_000004_create_tenancies_table;
mod m20250901_000005_create_rent_terms_table;

// サブスクリプション状態スナップショット
mod m20250901_000006_create_subscriptions_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // 1. 基本テーブル作成（依存関係なし）
            Box::new(m20250901_000001_create_accounts_table::Migration),
            // 2. accountsに依存するテーブル
            Box::new(m20250901_000002_create_landlords_and_tenants_tables::Migration),
            // 3. 物件とテナンシー
            Box::new(m20250901_000003_create_properties_table::Migration),
            Box::new(m20250901_000004_create_tenancies_table::Migration),
            // 4. 追記専用テーブル
            Box::new(m20250901_000005_create_rent_terms_table::Migration),
            Box::new(m20250901_000006_create_subscriptions_table::Migration),
        ]
    }
}
