//! Products Domain
//!
//! Application/domain core of the product-catalog inventory service.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │ gRPC adapter│  ← transport (apps/inventory-api)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← validation, association checks, orchestration
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │ Repository  │  ← store contract (Postgres + in-memory impls)
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │   Models    │  ← entities, DTOs, filter/metadata, rule sets
//! └─────────────┘
//! ```
//!
//! Writes use optimistic concurrency: every product row carries a version,
//! updates and deletes are conditional on it, and a conflict is reported as
//! [`ProductError::EditConflict`] for the caller to retry with fresh data.

pub mod entity;
pub mod error;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use models::{
    CreateProduct, DeleteProduct, Filter, Metadata, Product, UpdateProduct, DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE,
};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
pub use validation::{Rules, ValidationError};
