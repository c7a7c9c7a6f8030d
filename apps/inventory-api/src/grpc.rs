//! gRPC adapter for the inventory service

use async_trait::async_trait;
use domain_products::{
    CreateProduct, DeleteProduct, Filter, Metadata, Product, ProductError, ProductRepository,
    ProductService, UpdateProduct, ValidationError,
};
use rpc::inventory;
use rpc::inventory::inventory_service_server::InventoryService;
use tonic::{Code, Request, Response, Status};
use tonic_types::{ErrorDetails, StatusExt};

/// gRPC implementation of InventoryService
pub struct InventoryGrpcService<R: ProductRepository> {
    service: ProductService<R>,
}

impl<R: ProductRepository> InventoryGrpcService<R> {
    pub fn new(service: ProductService<R>) -> Self {
        Self { service }
    }
}

fn product_to_proto(product: Product) -> inventory::Product {
    inventory::Product {
        id: product.id,
        name: product.name,
        main_category: product.main_category,
        sub_category: product.sub_category,
        stock_number: product.stock_number,
        image: product.image.unwrap_or_default(),
        discount_price: product.discount_price,
        actual_price: product.actual_price,
        currency_code: product.currency_code,
        currency_symbol: product.currency_symbol,
        version: product.version,
    }
}

fn metadata_to_proto(metadata: Metadata) -> inventory::Metadata {
    inventory::Metadata {
        current_page: metadata.current_page as i32,
        first_page: metadata.first_page as i32,
        last_page: metadata.last_page as i32,
        page_size: metadata.page_size as i32,
        total_records: metadata.total_records,
    }
}

fn filter_from_proto(pagination: Option<inventory::Pagination>) -> Filter {
    let pagination = pagination.unwrap_or_default();
    Filter {
        page: i64::from(pagination.page),
        page_size: i64::from(pagination.page_size),
    }
}

fn validation_status(err: &ValidationError) -> Status {
    let mut details = ErrorDetails::new();
    for (field, message) in &err.field_errors {
        details.add_bad_request_violation(field, message);
    }
    Status::with_error_details(Code::InvalidArgument, "validation failed", details)
}

/// Map a domain error onto a gRPC status.
///
/// Internal errors are logged and replaced with an opaque message so
/// storage details never leak to clients.
fn status_from_error(err: ProductError) -> Status {
    match err {
        ProductError::NotFound(id) => Status::not_found(format!("product {id} not found")),
        ProductError::Validation(ref validation) => validation_status(validation),
        ProductError::AssociationNotFound(field) => {
            let mut details = ErrorDetails::new();
            details.add_bad_request_violation(&field, "does not exist");
            Status::with_error_details(Code::InvalidArgument, "validation failed", details)
        }
        ProductError::EditConflict => {
            Status::failed_precondition("record was modified or deleted, re-read and retry")
        }
        ProductError::Internal(message) => {
            tracing::error!(error = %message, "internal error");
            Status::internal("internal server error")
        }
    }
}

#[async_trait]
impl<R: ProductRepository + 'static> InventoryService for InventoryGrpcService<R> {
    async fn get_product_by_id(
        &self,
        request: Request<inventory::GetProductByIdRequest>,
    ) -> Result<Response<inventory::GetProductByIdResponse>, Status> {
        let req = request.into_inner();

        let product = self
            .service
            .get_product(req.id)
            .await
            .map_err(status_from_error)?;

        Ok(Response::new(inventory::GetProductByIdResponse {
            product: Some(product_to_proto(product)),
        }))
    }

    async fn get_products(
        &self,
        request: Request<inventory::GetProductsRequest>,
    ) -> Result<Response<inventory::GetProductsResponse>, Status> {
        let filter = filter_from_proto(request.into_inner().pagination);

        let (products, metadata) = self
            .service
            .list_products(filter)
            .await
            .map_err(status_from_error)?;

        Ok(Response::new(inventory::GetProductsResponse {
            products: products.into_iter().map(product_to_proto).collect(),
            metadata: Some(metadata_to_proto(metadata)),
        }))
    }

    async fn create_product(
        &self,
        request: Request<inventory::CreateProductRequest>,
    ) -> Result<Response<inventory::CreateProductResponse>, Status> {
        let req = request.into_inner();

        let input = CreateProduct {
            name: req.name,
            sub_category: req.sub_category,
            stock_number: req.stock_number,
            image: req.image,
            discount_price: req.discount_price,
            actual_price: req.actual_price,
            currency_code: req.currency_code,
        };

        let id = self
            .service
            .create_product(input)
            .await
            .map_err(status_from_error)?;

        Ok(Response::new(inventory::CreateProductResponse { id }))
    }

    async fn update_product(
        &self,
        request: Request<inventory::UpdateProductRequest>,
    ) -> Result<Response<inventory::UpdateProductResponse>, Status> {
        let req = request.into_inner();

        let input = UpdateProduct {
            id: req.id,
            name: req.name,
            sub_category: req.sub_category,
            stock_number: req.stock_number,
            image: req.image,
            discount_price: req.discount_price,
            actual_price: req.actual_price,
            currency_code: req.currency_code,
            version: req.version,
        };

        self.service
            .update_product(input)
            .await
            .map_err(status_from_error)?;

        Ok(Response::new(inventory::UpdateProductResponse {}))
    }

    async fn delete_product(
        &self,
        request: Request<inventory::DeleteProductRequest>,
    ) -> Result<Response<inventory::DeleteProductResponse>, Status> {
        let req = request.into_inner();

        self.service
            .delete_product(DeleteProduct {
                id: req.id,
                version: req.version,
            })
            .await
            .map_err(status_from_error)?;

        Ok(Response::new(inventory::DeleteProductResponse {}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_products::InMemoryProductRepository;

    async fn seeded_service() -> InventoryGrpcService<InMemoryProductRepository> {
        let repository = InMemoryProductRepository::new();
        repository
            .seed_sub_category("speakers", "tv, audio & cameras")
            .await;
        repository.seed_currency("USD", "$").await;
        InventoryGrpcService::new(ProductService::new(repository))
    }

    fn valid_create_request() -> inventory::CreateProductRequest {
        inventory::CreateProductRequest {
            name: "bookshelf speaker".to_string(),
            sub_category: "speakers".to_string(),
            stock_number: 3,
            image: None,
            discount_price: 79.0,
            actual_price: 99.0,
            currency_code: "USD".to_string(),
        }
    }

    #[tokio::test]
    async fn create_and_get_round_trip() {
        let service = seeded_service().await;

        let created = service
            .create_product(Request::new(valid_create_request()))
            .await
            .unwrap()
            .into_inner();

        let fetched = service
            .get_product_by_id(Request::new(inventory::GetProductByIdRequest {
                id: created.id,
            }))
            .await
            .unwrap()
            .into_inner()
            .product
            .unwrap();

        assert_eq!(fetched.name, "bookshelf speaker");
        assert_eq!(fetched.main_category, "tv, audio & cameras");
        assert_eq!(fetched.currency_symbol, "$");
        assert_eq!(fetched.version, 1);
    }

    #[tokio::test]
    async fn missing_product_maps_to_not_found() {
        let service = seeded_service().await;

        let status = service
            .get_product_by_id(Request::new(inventory::GetProductByIdRequest { id: 42 }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn invalid_create_carries_field_violations() {
        let service = seeded_service().await;

        let request = inventory::CreateProductRequest {
            name: String::new(),
            sub_category: "speakers".to_string(),
            stock_number: -1,
            image: None,
            discount_price: 79.0,
            actual_price: 99.0,
            currency_code: "GAY".to_string(),
        };

        let status = service
            .create_product(Request::new(request))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::InvalidArgument);
        let bad_request = status.get_details_bad_request().unwrap();
        let fields: Vec<_> = bad_request
            .field_violations
            .iter()
            .map(|v| v.field.as_str())
            .collect();
        assert_eq!(fields, vec!["currency_code", "name", "stock_number"]);
    }

    #[tokio::test]
    async fn unknown_sub_category_is_field_scoped() {
        let service = seeded_service().await;

        let mut request = valid_create_request();
        request.sub_category = "toasters".to_string();

        let status = service
            .create_product(Request::new(request))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::InvalidArgument);
        let bad_request = status.get_details_bad_request().unwrap();
        assert_eq!(bad_request.field_violations[0].field, "sub_category");
    }

    #[tokio::test]
    async fn stale_update_maps_to_failed_precondition() {
        let service = seeded_service().await;

        let created = service
            .create_product(Request::new(valid_create_request()))
            .await
            .unwrap()
            .into_inner();

        let status = service
            .update_product(Request::new(inventory::UpdateProductRequest {
                id: created.id,
                name: Some("renamed".to_string()),
                sub_category: None,
                stock_number: None,
                image: None,
                discount_price: None,
                actual_price: None,
                currency_code: None,
                version: 7,
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::FailedPrecondition);
    }

    #[tokio::test]
    async fn list_returns_metadata() {
        let service = seeded_service().await;

        for _ in 0..3 {
            service
                .create_product(Request::new(valid_create_request()))
                .await
                .unwrap();
        }

        let response = service
            .get_products(Request::new(inventory::GetProductsRequest {
                pagination: Some(inventory::Pagination {
                    page: 1,
                    page_size: 2,
                }),
            }))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(response.products.len(), 2);
        let metadata = response.metadata.unwrap();
        assert_eq!(metadata.total_records, 3);
        assert_eq!(metadata.last_page, 2);
    }
}
