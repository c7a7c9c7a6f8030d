use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::validation::{rule, Rules, ValidationError};

pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Catalog product as exposed to callers. Category and currency fields are
/// denormalized from their association rows on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identity, immutable.
    pub id: i64,
    pub name: String,
    pub main_category: String,
    pub sub_category: String,
    pub stock_number: i32,
    pub image: Option<String>,
    pub discount_price: f64,
    pub actual_price: f64,
    pub currency_code: String,
    pub currency_symbol: String,
    /// Optimistic-concurrency token: starts at 1, +1 per successful update,
    /// never changed by reads.
    pub version: i64,
}

/// Writable subset of [`Product`]. The store assigns id and version;
/// `main_category` and `currency_symbol` are derived from the referenced
/// sub-category and currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub sub_category: String,
    pub stock_number: i32,
    pub image: Option<String>,
    pub discount_price: f64,
    pub actual_price: f64,
    pub currency_code: String,
}

/// Targeted update. `None` leaves a field unchanged; present values are
/// validated. The write succeeds only if `version` matches the stored row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProduct {
    pub id: i64,
    pub name: Option<String>,
    pub sub_category: Option<String>,
    pub stock_number: Option<i32>,
    pub image: Option<String>,
    pub discount_price: Option<f64>,
    pub actual_price: Option<f64>,
    pub currency_code: Option<String>,
    pub version: i64,
}

/// Version-checked delete, same contract as [`UpdateProduct`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteProduct {
    pub id: i64,
    pub version: i64,
}

static CREATE_RULES: LazyLock<Rules<CreateProduct>> = LazyLock::new(|| {
    Rules::new()
        .field("name", |p: &CreateProduct| rule::required(&p.name))
        .field("sub_category", |p: &CreateProduct| {
            rule::required(&p.sub_category)
        })
        .field("stock_number", |p: &CreateProduct| {
            rule::at_least(p.stock_number, 0)
        })
        .field("image", |p: &CreateProduct| {
            p.image.as_deref().and_then(rule::uri)
        })
        .field("discount_price", |p: &CreateProduct| {
            rule::at_least(p.discount_price, 0.0)
        })
        .field("actual_price", |p: &CreateProduct| {
            rule::greater_than(p.actual_price, 0.0)
        })
        .field("currency_code", |p: &CreateProduct| {
            rule::iso4217(&p.currency_code)
        })
});

static UPDATE_RULES: LazyLock<Rules<UpdateProduct>> = LazyLock::new(|| {
    Rules::new()
        .field("id", |p: &UpdateProduct| rule::at_least(p.id, 1))
        .field("version", |p: &UpdateProduct| rule::at_least(p.version, 1))
        .field("name", |p: &UpdateProduct| {
            p.name.as_deref().and_then(rule::required)
        })
        .field("sub_category", |p: &UpdateProduct| {
            p.sub_category.as_deref().and_then(rule::required)
        })
        .field("stock_number", |p: &UpdateProduct| {
            p.stock_number.and_then(|n| rule::at_least(n, 0))
        })
        .field("image", |p: &UpdateProduct| {
            p.image.as_deref().and_then(rule::uri)
        })
        .field("discount_price", |p: &UpdateProduct| {
            p.discount_price.and_then(|n| rule::at_least(n, 0.0))
        })
        .field("actual_price", |p: &UpdateProduct| {
            p.actual_price.and_then(|n| rule::greater_than(n, 0.0))
        })
        .field("currency_code", |p: &UpdateProduct| {
            p.currency_code.as_deref().and_then(rule::iso4217)
        })
});

static DELETE_RULES: LazyLock<Rules<DeleteProduct>> = LazyLock::new(|| {
    Rules::new()
        .field("id", |p: &DeleteProduct| rule::at_least(p.id, 1))
        .field("version", |p: &DeleteProduct| rule::at_least(p.version, 1))
});

impl CreateProduct {
    pub fn validate(&self) -> Result<(), ValidationError> {
        CREATE_RULES.check(self)
    }
}

impl UpdateProduct {
    pub fn validate(&self) -> Result<(), ValidationError> {
        UPDATE_RULES.check(self)
    }
}

impl DeleteProduct {
    pub fn validate(&self) -> Result<(), ValidationError> {
        DELETE_RULES.check(self)
    }
}

/// Page selector for product listings. Zero means "unset"; see
/// [`Filter::normalize`]. Negative values are passed through untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub page: i64,
    pub page_size: i64,
}

impl Filter {
    /// Clamp unset/oversized inputs to safe bounds: an unset page becomes 1,
    /// an unset page size becomes [`DEFAULT_PAGE_SIZE`], anything above
    /// [`MAX_PAGE_SIZE`] is clamped down.
    pub fn normalize(mut self) -> Self {
        if self.page_size == 0 {
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        if self.page_size > MAX_PAGE_SIZE {
            self.page_size = MAX_PAGE_SIZE;
        }
        if self.page == 0 {
            self.page = 1;
        }
        self
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// Row offset for the selected page, computed in 64-bit arithmetic.
    /// Negative pages produce a negative offset here; storage adapters clamp
    /// at the query boundary since SQL OFFSET must be non-negative.
    pub fn offset(&self) -> i64 {
        self.page_size * (self.page - 1)
    }
}

/// Pagination summary derived from a total count. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub current_page: i64,
    pub first_page: i64,
    pub last_page: i64,
    pub page_size: i64,
    pub total_records: i64,
}

impl Metadata {
    /// Compute metadata for a result set. A zero total yields the zero value:
    /// no page exists. There is deliberately no check that
    /// `page <= last_page`; a request past the end returns an empty page with
    /// metadata still describing the true last page.
    pub fn compute(total: i64, page: i64, page_size: i64) -> Self {
        if total == 0 {
            return Self::default();
        }

        Self {
            current_page: page,
            first_page: 1,
            last_page: (total + page_size - 1) / page_size,
            page_size,
            total_records: total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_fills_defaults() {
        let filter = Filter { page: 0, page_size: 0 }.normalize();
        assert_eq!(filter, Filter { page: 1, page_size: 50 });
    }

    #[test]
    fn normalize_clamps_oversized_page_size() {
        let filter = Filter { page: 2, page_size: 500 }.normalize();
        assert_eq!(filter, Filter { page: 2, page_size: 100 });
    }

    #[test]
    fn normalize_passes_negative_page_through() {
        // Known quirk: negative pages are not clamped. Pinned here so a
        // change in behavior is a conscious decision.
        let filter = Filter { page: -1, page_size: 50 }.normalize();
        assert_eq!(filter.page, -1);
        assert_eq!(filter.offset(), -100);
    }

    #[test]
    fn limit_and_offset() {
        let filter = Filter { page: 3, page_size: 25 };
        assert_eq!(filter.limit(), 25);
        assert_eq!(filter.offset(), 50);
    }

    #[test]
    fn metadata_zero_total_has_no_pages() {
        assert_eq!(Metadata::compute(0, 7, 20), Metadata::default());
    }

    #[test]
    fn metadata_rounds_last_page_up() {
        let meta = Metadata::compute(2, 1, 1);
        assert_eq!(meta.last_page, 2);
        assert_eq!(meta.first_page, 1);
        assert_eq!(meta.total_records, 2);

        let meta = Metadata::compute(2, 2, 1);
        assert_eq!(meta.current_page, 2);

        let meta = Metadata::compute(101, 1, 50);
        assert_eq!(meta.last_page, 3);
    }

    #[test]
    fn create_collects_all_seven_invalid_fields() {
        let input = CreateProduct {
            name: String::new(),
            sub_category: String::new(),
            stock_number: -1,
            image: Some("%notexists$".to_string()),
            discount_price: -1.0,
            actual_price: 0.0,
            currency_code: "GAY".to_string(),
        };

        let err = input.validate().unwrap_err();
        let fields: Vec<&str> = err.field_errors.keys().map(String::as_str).collect();
        assert_eq!(
            fields,
            vec![
                "actual_price",
                "currency_code",
                "discount_price",
                "image",
                "name",
                "stock_number",
                "sub_category",
            ]
        );
    }

    #[test]
    fn create_accepts_valid_input() {
        let input = CreateProduct {
            name: "Songoku".to_string(),
            sub_category: "toys & baby products".to_string(),
            stock_number: 10,
            image: None,
            discount_price: 0.0,
            actual_price: 50000.0,
            currency_code: "VND".to_string(),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn update_validates_only_present_fields() {
        let input = UpdateProduct {
            id: 1,
            name: None,
            sub_category: None,
            stock_number: None,
            image: None,
            discount_price: None,
            actual_price: None,
            currency_code: None,
            version: 1,
        };
        assert!(input.validate().is_ok());

        let input = UpdateProduct {
            stock_number: Some(-5),
            actual_price: Some(0.0),
            ..input
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.field_errors.len(), 2);
        assert!(err.field_errors.contains_key("stock_number"));
        assert!(err.field_errors.contains_key("actual_price"));
    }

    #[test]
    fn update_requires_id_and_version() {
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
        let err = input.validate().unwrap_err();
        assert!(err.field_errors.contains_key("id"));
        assert!(err.field_errors.contains_key("version"));
    }

    #[test]
    fn delete_requires_id_and_version() {
        assert!(DeleteProduct { id: 1, version: 1 }.validate().is_ok());
        let err = DeleteProduct { id: 0, version: 0 }.validate().unwrap_err();
        assert_eq!(err.field_errors.len(), 2);
    }
}
