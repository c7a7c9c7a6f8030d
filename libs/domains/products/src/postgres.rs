use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    TransactionTrait,
};

use crate::entity::{currency, main_category, product, sub_category};
use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, DeleteProduct, Filter, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Postgres-backed [`ProductRepository`].
///
/// Writes rely on the database for all cross-request mutual exclusion: update
/// and delete are one conditional statement on `(id, version)`, and create and
/// update resolve association names to foreign keys inside one transaction.
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_err(op: &str, err: DbErr) -> ProductError {
    ProductError::Internal(format!("{op}: {err}"))
}

/// Product row joined with its associations.
#[derive(Debug, FromQueryResult)]
struct ProductRow {
    id: i64,
    name: String,
    stock_number: i32,
    image: Option<String>,
    discount_price: f64,
    actual_price: f64,
    version: i64,
    sub_category: String,
    main_category: String,
    currency_code: String,
    currency_symbol: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            main_category: row.main_category,
            sub_category: row.sub_category,
            stock_number: row.stock_number,
            image: row.image,
            discount_price: row.discount_price,
            actual_price: row.actual_price,
            currency_code: row.currency_code,
            currency_symbol: row.currency_symbol,
            version: row.version,
        }
    }
}

fn select_joined() -> sea_orm::Select<product::Entity> {
    product::Entity::find()
        .join(JoinType::InnerJoin, product::Relation::SubCategory.def())
        .join(JoinType::InnerJoin, sub_category::Relation::MainCategory.def())
        .join(JoinType::InnerJoin, product::Relation::Currency.def())
        .select_only()
        .columns([
            product::Column::Id,
            product::Column::Name,
            product::Column::StockNumber,
            product::Column::Image,
            product::Column::DiscountPrice,
            product::Column::ActualPrice,
            product::Column::Version,
        ])
        .column_as(sub_category::Column::Name, "sub_category")
        .column_as(main_category::Column::Name, "main_category")
        .column_as(currency::Column::Code, "currency_code")
        .column_as(currency::Column::Symbol, "currency_symbol")
}

async fn sub_category_id<C: ConnectionTrait>(conn: &C, name: &str) -> ProductResult<i64> {
    sub_category::Entity::find()
        .filter(sub_category::Column::Name.eq(name))
        .one(conn)
        .await
        .map_err(|e| db_err("select sub-category id", e))?
        .map(|m| m.id)
        .ok_or_else(|| ProductError::AssociationNotFound(name.to_string()))
}

async fn currency_id<C: ConnectionTrait>(conn: &C, code: &str) -> ProductResult<i64> {
    currency::Entity::find()
        .filter(currency::Column::Code.eq(code))
        .one(conn)
        .await
        .map_err(|e| db_err("select currency id", e))?
        .map(|m| m.id)
        .ok_or_else(|| ProductError::AssociationNotFound(code.to_string()))
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let row = select_joined()
            .filter(product::Column::Id.eq(id))
            .into_model::<ProductRow>()
            .one(&self.db)
            .await
            .map_err(|e| db_err("select product by id", e))?;

        Ok(row.map(Product::from))
    }

    async fn list(&self, filter: Filter) -> ProductResult<(i64, Vec<Product>)> {
        let total = product::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| db_err("count products", e))? as i64;

        if total == 0 {
            return Ok((0, Vec::new()));
        }

        // OFFSET must be non-negative; negative pages are clamped here, not
        // in the normalizer.
        let rows = select_joined()
            .order_by_asc(product::Column::Id)
            .limit(filter.limit().max(0) as u64)
            .offset(filter.offset().max(0) as u64)
            .into_model::<ProductRow>()
            .all(&self.db)
            .await
            .map_err(|e| db_err("select products", e))?;

        Ok((total, rows.into_iter().map(Product::from).collect()))
    }

    async fn create(&self, input: CreateProduct) -> ProductResult<i64> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_err("begin transaction", e))?;

        // Names are resolved inside the transaction, so an association that
        // vanished after the service's existence check still surfaces as
        // AssociationNotFound rather than a broken foreign key.
        let sub_category_id = sub_category_id(&txn, &input.sub_category).await?;
        let currency_id = currency_id(&txn, &input.currency_code).await?;

        let now = chrono::Utc::now();
        let row = product::ActiveModel {
            name: Set(input.name),
            stock_number: Set(input.stock_number),
            image: Set(input.image),
            discount_price: Set(input.discount_price),
            actual_price: Set(input.actual_price),
            sub_category_id: Set(sub_category_id),
            currency_id: Set(currency_id),
            version: Set(1),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        let res = product::Entity::insert(row)
            .exec(&txn)
            .await
            .map_err(|e| db_err("insert product", e))?;

        txn.commit()
            .await
            .map_err(|e| db_err("commit create product", e))?;

        tracing::info!(product_id = res.last_insert_id, "created product");
        Ok(res.last_insert_id)
    }

    async fn update(&self, input: UpdateProduct) -> ProductResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_err("begin transaction", e))?;

        let mut update = product::Entity::update_many()
            .filter(product::Column::Id.eq(input.id))
            .filter(product::Column::Version.eq(input.version))
            .col_expr(product::Column::Version, Expr::value(input.version + 1))
            .col_expr(
                product::Column::UpdatedAt,
                Expr::value(chrono::Utc::now()),
            );

        if let Some(name) = input.name {
            update = update.col_expr(product::Column::Name, Expr::value(name));
        }
        if let Some(sub_category) = input.sub_category {
            let id = sub_category_id(&txn, &sub_category).await?;
            update = update.col_expr(product::Column::SubCategoryId, Expr::value(id));
        }
        if let Some(stock_number) = input.stock_number {
            update = update.col_expr(product::Column::StockNumber, Expr::value(stock_number));
        }
        if let Some(image) = input.image {
            update = update.col_expr(product::Column::Image, Expr::value(image));
        }
        if let Some(discount_price) = input.discount_price {
            update = update.col_expr(product::Column::DiscountPrice, Expr::value(discount_price));
        }
        if let Some(actual_price) = input.actual_price {
            update = update.col_expr(product::Column::ActualPrice, Expr::value(actual_price));
        }
        if let Some(currency_code) = input.currency_code {
            let id = currency_id(&txn, &currency_code).await?;
            update = update.col_expr(product::Column::CurrencyId, Expr::value(id));
        }

        let res = update
            .exec(&txn)
            .await
            .map_err(|e| db_err("update product", e))?;

        // Zero matched rows: missing id or stale version, reported alike.
        if res.rows_affected == 0 {
            return Err(ProductError::EditConflict);
        }

        txn.commit()
            .await
            .map_err(|e| db_err("commit update product", e))?;

        tracing::info!(product_id = input.id, version = input.version + 1, "updated product");
        Ok(())
    }

    async fn delete(&self, input: DeleteProduct) -> ProductResult<()> {
        let res = product::Entity::delete_many()
            .filter(product::Column::Id.eq(input.id))
            .filter(product::Column::Version.eq(input.version))
            .exec(&self.db)
            .await
            .map_err(|e| db_err("delete product", e))?;

        if res.rows_affected == 0 {
            return Err(ProductError::EditConflict);
        }

        tracing::info!(product_id = input.id, "deleted product");
        Ok(())
    }

    async fn sub_category_exists(&self, name: &str) -> ProductResult<bool> {
        let count = sub_category::Entity::find()
            .filter(sub_category::Column::Name.eq(name))
            .count(&self.db)
            .await
            .map_err(|e| db_err("count sub-categories", e))?;

        Ok(count > 0)
    }

    async fn currency_code_exists(&self, code: &str) -> ProductResult<bool> {
        let count = currency::Entity::find()
            .filter(currency::Column::Code.eq(code))
            .count(&self.db)
            .await
            .map_err(|e| db_err("count currencies", e))?;

        Ok(count > 0)
    }
}
