use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, DeleteProduct, Filter, Product, UpdateProduct};

/// Store contract for product persistence and association lookups.
///
/// Implementations own identity assignment and the atomic version check:
/// update and delete are a single compare-and-swap on `(id, version)`, and a
/// write matching zero rows reports [`ProductError::EditConflict`] without
/// distinguishing "row missing" from "stale version".
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fetch one product with its denormalized category/currency fields.
    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Total count plus one page of products, in one logical call. The page
    /// respects `filter.limit()`/`filter.offset()`; the count ignores them.
    async fn list(&self, filter: Filter) -> ProductResult<(i64, Vec<Product>)>;

    /// Insert a row, resolving association names to internal ids in the same
    /// transaction. A missing association reports
    /// [`ProductError::AssociationNotFound`].
    async fn create(&self, input: CreateProduct) -> ProductResult<i64>;

    /// Conditional write: `WHERE id = ? AND version = ?`, setting
    /// `version = version + 1` and any present fields.
    async fn update(&self, input: UpdateProduct) -> ProductResult<()>;

    /// Conditional delete on `(id, version)`.
    async fn delete(&self, input: DeleteProduct) -> ProductResult<()>;

    async fn sub_category_exists(&self, name: &str) -> ProductResult<bool>;

    async fn currency_code_exists(&self, code: &str) -> ProductResult<bool>;
}

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    products: HashMap<i64, Product>,
    /// sub-category name -> main-category name
    sub_categories: HashMap<String, String>,
    /// currency code -> symbol
    currencies: HashMap<String, String>,
}

/// In-memory implementation of [`ProductRepository`] for development and
/// tests. The write lock doubles as the storage-level compare-and-swap: a
/// racing update either sees the old version inside the critical section and
/// wins, or sees the bumped version and loses with an edit conflict.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a sub-category association under the given main category.
    pub async fn seed_sub_category(&self, name: &str, main_category: &str) {
        let mut state = self.state.write().await;
        state
            .sub_categories
            .insert(name.to_string(), main_category.to_string());
    }

    /// Seed a currency association.
    pub async fn seed_currency(&self, code: &str, symbol: &str) {
        let mut state = self.state.write().await;
        state
            .currencies
            .insert(code.to_string(), symbol.to_string());
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let state = self.state.read().await;
        Ok(state.products.get(&id).cloned())
    }

    async fn list(&self, filter: Filter) -> ProductResult<(i64, Vec<Product>)> {
        let state = self.state.read().await;
        let total = state.products.len() as i64;

        let mut rows: Vec<Product> = state.products.values().cloned().collect();
        rows.sort_by_key(|p| p.id);

        // SQL OFFSET cannot be negative; clamp at the query boundary. The
        // normalizer deliberately passes negative pages through.
        let offset = filter.offset().max(0) as usize;
        let limit = filter.limit().max(0) as usize;
        let rows = rows.into_iter().skip(offset).take(limit).collect();

        Ok((total, rows))
    }

    async fn create(&self, input: CreateProduct) -> ProductResult<i64> {
        let mut state = self.state.write().await;

        let main_category = state
            .sub_categories
            .get(&input.sub_category)
            .cloned()
            .ok_or_else(|| ProductError::AssociationNotFound(input.sub_category.clone()))?;
        let currency_symbol = state
            .currencies
            .get(&input.currency_code)
            .cloned()
            .ok_or_else(|| ProductError::AssociationNotFound(input.currency_code.clone()))?;

        state.next_id += 1;
        let id = state.next_id;
        state.products.insert(
            id,
            Product {
                id,
                name: input.name,
                main_category,
                sub_category: input.sub_category,
                stock_number: input.stock_number,
                image: input.image,
                discount_price: input.discount_price,
                actual_price: input.actual_price,
                currency_code: input.currency_code,
                currency_symbol,
                version: 1,
            },
        );

        tracing::info!(product_id = id, "created product");
        Ok(id)
    }

    async fn update(&self, input: UpdateProduct) -> ProductResult<()> {
        let mut state = self.state.write().await;

        // Associations are resolved before the version check, mirroring the
        // relational adapter's transaction order.
        let main_category = match &input.sub_category {
            Some(name) => Some(
                state
                    .sub_categories
                    .get(name)
                    .cloned()
                    .ok_or_else(|| ProductError::AssociationNotFound(name.clone()))?,
            ),
            None => None,
        };
        let currency_symbol = match &input.currency_code {
            Some(code) => Some(
                state
                    .currencies
                    .get(code)
                    .cloned()
                    .ok_or_else(|| ProductError::AssociationNotFound(code.clone()))?,
            ),
            None => None,
        };

        let product = match state.products.get_mut(&input.id) {
            Some(p) if p.version == input.version => p,
            _ => return Err(ProductError::EditConflict),
        };

        if let Some(name) = input.name {
            product.name = name;
        }
        if let Some(sub_category) = input.sub_category {
            product.sub_category = sub_category;
            product.main_category = main_category.unwrap();
        }
        if let Some(stock_number) = input.stock_number {
            product.stock_number = stock_number;
        }
        if let Some(image) = input.image {
            product.image = Some(image);
        }
        if let Some(discount_price) = input.discount_price {
            product.discount_price = discount_price;
        }
        if let Some(actual_price) = input.actual_price {
            product.actual_price = actual_price;
        }
        if let Some(currency_code) = input.currency_code {
            product.currency_code = currency_code;
            product.currency_symbol = currency_symbol.unwrap();
        }
        product.version += 1;

        tracing::info!(product_id = input.id, version = product.version, "updated product");
        Ok(())
    }

    async fn delete(&self, input: DeleteProduct) -> ProductResult<()> {
        let mut state = self.state.write().await;

        match state.products.get(&input.id) {
            Some(p) if p.version == input.version => {
                state.products.remove(&input.id);
                tracing::info!(product_id = input.id, "deleted product");
                Ok(())
            }
            _ => Err(ProductError::EditConflict),
        }
    }

    async fn sub_category_exists(&self, name: &str) -> ProductResult<bool> {
        let state = self.state.read().await;
        Ok(state.sub_categories.contains_key(name))
    }

    async fn currency_code_exists(&self, code: &str) -> ProductResult<bool> {
        let state = self.state.read().await;
        Ok(state.currencies.contains_key(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded_repo() -> InMemoryProductRepository {
        let repo = InMemoryProductRepository::new();
        repo.seed_sub_category("toys & baby products", "Toys & Games")
            .await;
        repo.seed_currency("VND", "₫").await;
        repo.seed_currency("USD", "$").await;
        repo
    }

    fn songoku() -> CreateProduct {
        CreateProduct {
            name: "Songoku".to_string(),
            sub_category: "toys & baby products".to_string(),
            stock_number: 10,
            image: None,
            discount_price: 0.0,
            actual_price: 50000.0,
            currency_code: "VND".to_string(),
        }
    }

    #[tokio::test]
    async fn create_denormalizes_associations() {
        let repo = seeded_repo().await;
        let id = repo.create(songoku()).await.unwrap();

        let product = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(product.id, id);
        assert_eq!(product.main_category, "Toys & Games");
        assert_eq!(product.currency_symbol, "₫");
        assert_eq!(product.version, 1);
    }

    #[tokio::test]
    async fn create_rejects_unknown_association() {
        let repo = seeded_repo().await;

        let mut input = songoku();
        input.sub_category = "no such category".to_string();
        let err = repo.create(input).await.unwrap_err();
        assert!(matches!(err, ProductError::AssociationNotFound(_)));

        let mut input = songoku();
        input.currency_code = "CHF".to_string();
        let err = repo.create(input).await.unwrap_err();
        assert!(matches!(err, ProductError::AssociationNotFound(_)));

        // Nothing was written.
        let (total, _) = repo.list(Filter::default().normalize()).await.unwrap();
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn update_bumps_version_by_exactly_one() {
        let repo = seeded_repo().await;
        let id = repo.create(songoku()).await.unwrap();

        repo.update(UpdateProduct {
            id,
            name: Some("G-Shock".to_string()),
            sub_category: None,
            stock_number: Some(100),
            image: None,
            discount_price: None,
            actual_price: None,
            currency_code: Some("USD".to_string()),
            version: 1,
        })
        .await
        .unwrap();

        let product = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(product.name, "G-Shock");
        assert_eq!(product.currency_symbol, "$");
        assert_eq!(product.version, 2);
        // Untouched fields survive.
        assert_eq!(product.sub_category, "toys & baby products");
        assert_eq!(product.actual_price, 50000.0);
    }

    #[tokio::test]
    async fn stale_version_and_missing_row_both_conflict() {
        let repo = seeded_repo().await;
        let id = repo.create(songoku()).await.unwrap();

        let stale = UpdateProduct {
            id,
            name: None,
            sub_category: None,
            stock_number: Some(1),
            image: None,
            discount_price: None,
            actual_price: None,
            currency_code: None,
            version: 99,
        };
        assert!(matches!(
            repo.update(stale.clone()).await,
            Err(ProductError::EditConflict)
        ));

        let missing = UpdateProduct { id: id + 1, version: 1, ..stale };
        assert!(matches!(
            repo.update(missing).await,
            Err(ProductError::EditConflict)
        ));
    }

    #[tokio::test]
    async fn delete_is_version_checked() {
        let repo = seeded_repo().await;
        let id = repo.create(songoku()).await.unwrap();

        assert!(matches!(
            repo.delete(DeleteProduct { id, version: 2 }).await,
            Err(ProductError::EditConflict)
        ));
        repo.delete(DeleteProduct { id, version: 1 }).await.unwrap();
        assert!(repo.get_by_id(id).await.unwrap().is_none());

        // Deleting again looks identical to a stale version.
        assert!(matches!(
            repo.delete(DeleteProduct { id, version: 1 }).await,
            Err(ProductError::EditConflict)
        ));
    }

    #[tokio::test]
    async fn list_pages_are_stable_and_counted() {
        let repo = seeded_repo().await;
        let first = repo.create(songoku()).await.unwrap();
        let mut second_input = songoku();
        second_input.name = "G-Shock".to_string();
        let second = repo.create(second_input).await.unwrap();

        let (total, rows) = repo.list(Filter { page: 1, page_size: 1 }).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, first);

        let (_, rows) = repo.list(Filter { page: 2, page_size: 1 }).await.unwrap();
        assert_eq!(rows[0].id, second);

        let (total, rows) = repo.list(Filter { page: 3, page_size: 1 }).await.unwrap();
        assert_eq!(total, 2);
        assert!(rows.is_empty());
    }
}
