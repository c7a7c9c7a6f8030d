use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Insert starter currencies
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO currency (code, symbol, created_at, updated_at)
            VALUES
                ('USD', '$', NOW(), NOW()),
                ('EUR', '€', NOW(), NOW()),
                ('GBP', '£', NOW(), NOW()),
                ('INR', '₹', NOW(), NOW())
            ON CONFLICT (code) DO NOTHING
            "#,
            )
            .await?;

        // Insert starter categories
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO main_category (name, created_at, updated_at)
            VALUES
                ('tv, audio & cameras', NOW(), NOW()),
                ('appliances', NOW(), NOW()),
                ('stores', NOW(), NOW())
            ON CONFLICT (name) DO NOTHING
            "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO sub_category (name, main_category_id, created_at, updated_at)
            VALUES
                ('cameras & photography', (SELECT id FROM main_category WHERE name = 'tv, audio & cameras'), NOW(), NOW()),
                ('speakers', (SELECT id FROM main_category WHERE name = 'tv, audio & cameras'), NOW(), NOW()),
                ('televisions', (SELECT id FROM main_category WHERE name = 'tv, audio & cameras'), NOW(), NOW()),
                ('refrigerators', (SELECT id FROM main_category WHERE name = 'appliances'), NOW(), NOW()),
                ('washing machines', (SELECT id FROM main_category WHERE name = 'appliances'), NOW(), NOW()),
                ('men''s fashion', (SELECT id FROM main_category WHERE name = 'stores'), NOW(), NOW()),
                ('women''s fashion', (SELECT id FROM main_category WHERE name = 'stores'), NOW(), NOW())
            ON CONFLICT (name) DO NOTHING
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            DELETE FROM sub_category
            WHERE name IN (
                'cameras & photography', 'speakers', 'televisions',
                'refrigerators', 'washing machines',
                'men''s fashion', 'women''s fashion'
            )
            "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "DELETE FROM main_category WHERE name IN ('tv, audio & cameras', 'appliances', 'stores')",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "DELETE FROM currency WHERE code IN ('USD', 'EUR', 'GBP', 'INR')",
            )
            .await?;

        Ok(())
    }
}
