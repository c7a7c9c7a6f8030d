use std::sync::Arc;

use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, DeleteProduct, Filter, Metadata, Product, UpdateProduct};
use crate::repository::ProductRepository;
use crate::validation::ValidationError;

/// Application service for the product catalog.
///
/// Stateless and safe for concurrent use: it holds no mutable state of its
/// own and delegates all per-row mutual exclusion to the repository's
/// version-checked writes. It never retries; on [`ProductError::EditConflict`]
/// the caller is expected to re-read the current version and resubmit.
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Fetch a single product.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// List one page of products plus pagination metadata.
    ///
    /// The filter is normalized first, so metadata always reflects the
    /// bounds actually used. A page past the end yields an empty slice with
    /// metadata still describing the true total and last page.
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: Filter) -> ProductResult<(Vec<Product>, Metadata)> {
        let filter = filter.normalize();
        let (total, products) = self.repository.list(filter).await?;
        let metadata = Metadata::compute(total, filter.page, filter.page_size);

        Ok((products, metadata))
    }

    /// Validate and create a product.
    ///
    /// Both referenced associations are checked up front so a bad reference
    /// comes back as a field-scoped validation error. The repository resolves
    /// the names again inside its transaction; if an association vanished in
    /// between, the resulting [`ProductError::AssociationNotFound`] is
    /// surfaced unchanged.
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<i64> {
        input.validate()?;

        if !self
            .repository
            .sub_category_exists(&input.sub_category)
            .await?
        {
            return Err(ValidationError::field("sub_category", "does not exist").into());
        }

        if !self
            .repository
            .currency_code_exists(&input.currency_code)
            .await?
        {
            return Err(ValidationError::field("currency_code", "does not exist").into());
        }

        self.repository.create(input).await
    }

    /// Validate and apply a version-checked update. An [`ProductError::EditConflict`]
    /// from the repository is returned verbatim; it covers both a missing row
    /// and a stale version.
    #[instrument(skip(self, input), fields(product_id = input.id))]
    pub async fn update_product(&self, input: UpdateProduct) -> ProductResult<()> {
        input.validate()?;

        self.repository.update(input).await
    }

    /// Validate and apply a version-checked delete, same contract as update.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, input: DeleteProduct) -> ProductResult<()> {
        input.validate()?;

        self.repository.delete(input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;

    fn songoku() -> Product {
        Product {
            id: 1,
            name: "Songoku".to_string(),
            main_category: "Toys & Games".to_string(),
            sub_category: "toys & baby products".to_string(),
            stock_number: 10,
            image: None,
            discount_price: 0.0,
            actual_price: 50000.0,
            currency_code: "VND".to_string(),
            currency_symbol: "₫".to_string(),
            version: 1,
        }
    }

    fn create_input() -> CreateProduct {
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
    async fn get_product_found() {
        let mut repo = MockProductRepository::new();
        let want = songoku();
        let returned = want.clone();
        repo.expect_get_by_id()
            .with(eq(1))
            .returning(move |_| Ok(Some(returned.clone())));

        let service = ProductService::new(repo);
        let got = service.get_product(1).await.unwrap();
        assert_eq!(got, want);
    }

    #[tokio::test]
    async fn get_product_miss_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let service = ProductService::new(repo);
        let err = service.get_product(42).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(42)));
    }

    #[tokio::test]
    async fn list_normalizes_filter_before_querying() {
        let mut repo = MockProductRepository::new();
        repo.expect_list()
            .with(eq(Filter { page: 1, page_size: 50 }))
            .returning(|_| Ok((2, vec![songoku()])));

        let service = ProductService::new(repo);
        let (products, metadata) = service
            .list_products(Filter { page: 0, page_size: 0 })
            .await
            .unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(
            metadata,
            Metadata {
                current_page: 1,
                first_page: 1,
                last_page: 1,
                page_size: 50,
                total_records: 2,
            }
        );
    }

    #[tokio::test]
    async fn list_past_the_end_keeps_true_metadata() {
        let mut repo = MockProductRepository::new();
        repo.expect_list()
            .with(eq(Filter { page: 3, page_size: 1 }))
            .returning(|_| Ok((2, Vec::new())));

        let service = ProductService::new(repo);
        let (products, metadata) = service
            .list_products(Filter { page: 3, page_size: 1 })
            .await
            .unwrap();

        assert!(products.is_empty());
        assert_eq!(metadata.total_records, 2);
        assert_eq!(metadata.last_page, 2);
        assert_eq!(metadata.current_page, 3);
    }

    #[tokio::test]
    async fn create_checks_associations_then_delegates() {
        let mut repo = MockProductRepository::new();
        repo.expect_sub_category_exists()
            .with(eq("toys & baby products"))
            .returning(|_| Ok(true));
        repo.expect_currency_code_exists()
            .with(eq("VND"))
            .returning(|_| Ok(true));
        repo.expect_create()
            .with(eq(create_input()))
            .returning(|_| Ok(1));

        let service = ProductService::new(repo);
        let id = service.create_product(create_input()).await.unwrap();
        assert_eq!(id, 1);
    }

    #[tokio::test]
    async fn create_with_invalid_fields_never_touches_the_store() {
        let repo = MockProductRepository::new();
        let service = ProductService::new(repo);

        let input = CreateProduct {
            name: String::new(),
            sub_category: String::new(),
            stock_number: -1,
            image: Some("%notexists$".to_string()),
            discount_price: -1.0,
            actual_price: -1.0,
            currency_code: "GAY".to_string(),
        };

        let err = service.create_product(input).await.unwrap_err();
        match err {
            ProductError::Validation(e) => assert_eq!(e.field_errors.len(), 7),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_with_unknown_sub_category_names_the_field() {
        let mut repo = MockProductRepository::new();
        repo.expect_sub_category_exists().returning(|_| Ok(false));

        let service = ProductService::new(repo);
        let err = service.create_product(create_input()).await.unwrap_err();
        match err {
            ProductError::Validation(e) => {
                assert_eq!(e.field_errors.get("sub_category").unwrap(), "does not exist");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_with_unknown_currency_names_the_field() {
        let mut repo = MockProductRepository::new();
        repo.expect_sub_category_exists().returning(|_| Ok(true));
        repo.expect_currency_code_exists().returning(|_| Ok(false));

        let service = ProductService::new(repo);
        let err = service.create_product(create_input()).await.unwrap_err();
        match err {
            ProductError::Validation(e) => {
                assert_eq!(e.field_errors.get("currency_code").unwrap(), "does not exist");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_association_race_surfaces_from_the_store() {
        let mut repo = MockProductRepository::new();
        repo.expect_sub_category_exists().returning(|_| Ok(true));
        repo.expect_currency_code_exists().returning(|_| Ok(true));
        repo.expect_create()
            .returning(|input| Err(ProductError::AssociationNotFound(input.sub_category)));

        let service = ProductService::new(repo);
        let err = service.create_product(create_input()).await.unwrap_err();
        assert!(matches!(err, ProductError::AssociationNotFound(_)));
    }

    #[tokio::test]
    async fn update_propagates_edit_conflict_verbatim() {
        let mut repo = MockProductRepository::new();
        repo.expect_update()
            .returning(|_| Err(ProductError::EditConflict));

        let service = ProductService::new(repo);
        let input = UpdateProduct {
            id: 1,
            name: None,
            sub_category: None,
            stock_number: Some(5),
            image: None,
            discount_price: None,
            actual_price: None,
            currency_code: None,
            version: 1,
        };
        let err = service.update_product(input).await.unwrap_err();
        assert!(matches!(err, ProductError::EditConflict));
    }

    #[tokio::test]
    async fn update_with_bad_token_never_touches_the_store() {
        let repo = MockProductRepository::new();
        let service = ProductService::new(repo);

        let input = UpdateProduct {
            id: 0,
            name: None,
            sub_category: None,
            stock_number: None,
            image: None,
            discount_price: None,
            actual_price: None,
            currency_code: None,
            version: 0,
        };
        let err = service.update_product(input).await.unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_validates_then_delegates() {
        let mut repo = MockProductRepository::new();
        repo.expect_delete()
            .with(eq(DeleteProduct { id: 1, version: 1 }))
            .returning(|_| Ok(()));

        let service = ProductService::new(repo);
        service
            .delete_product(DeleteProduct { id: 1, version: 1 })
            .await
            .unwrap();

        let err = service
            .delete_product(DeleteProduct { id: 0, version: 0 })
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }
}
