use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create currency table
        manager
            .create_table(
                Table::create()
                    .table(Currency::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Currency::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string(Currency::Code).unique_key())
                    .col(string(Currency::Symbol))
                    .col(
                        timestamp_with_time_zone(Currency::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Currency::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create main_category table
        manager
            .create_table(
                Table::create()
                    .table(MainCategory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MainCategory::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string(MainCategory::Name).unique_key())
                    .col(
                        timestamp_with_time_zone(MainCategory::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(MainCategory::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create sub_category table
        manager
            .create_table(
                Table::create()
                    .table(SubCategory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubCategory::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string(SubCategory::Name).unique_key())
                    .col(big_integer(SubCategory::MainCategoryId))
                    .col(
                        timestamp_with_time_zone(SubCategory::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(SubCategory::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sub_category_main_category")
                            .from(SubCategory::Table, SubCategory::MainCategoryId)
                            .to(MainCategory::Table, MainCategory::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create product table
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Product::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string(Product::Name))
                    .col(big_integer(Product::SubCategoryId))
                    .col(big_integer(Product::CurrencyId))
                    .col(integer(Product::StockNumber).default(0))
                    .col(string_null(Product::Image))
                    .col(double(Product::DiscountPrice).default(0.0))
                    .col(double(Product::ActualPrice).default(0.0))
                    .col(big_integer(Product::Version).default(1))
                    .col(
                        timestamp_with_time_zone(Product::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Product::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_sub_category")
                            .from(Product::Table, Product::SubCategoryId)
                            .to(SubCategory::Table, SubCategory::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_currency")
                            .from(Product::Table, Product::CurrencyId)
                            .to(Currency::Table, Currency::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create indexes
        manager
            .create_index(
                Index::create()
                    .name("idx_product_sub_category_id")
                    .table(Product::Table)
                    .col(Product::SubCategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_currency_id")
                    .table(Product::Table)
                    .col(Product::CurrencyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sub_category_main_category_id")
                    .table(SubCategory::Table)
                    .col(SubCategory::MainCategoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Product::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SubCategory::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(MainCategory::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Currency::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Currency {
    Table,
    Id,
    Code,
    Symbol,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum MainCategory {
    Table,
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SubCategory {
    Table,
    Id,
    Name,
    MainCategoryId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Product {
    Table,
    Id,
    Name,
    SubCategoryId,
    CurrencyId,
    StockNumber,
    Image,
    DiscountPrice,
    ActualPrice,
    Version,
    CreatedAt,
    UpdatedAt,
}
