//! Explicit per-request validation rules.
//!
//! Each request type owns a rule set: an ordered list of
//! `(field name, predicate)` pairs evaluated in a single pass. Every failing
//! field lands in the returned [`ValidationError`], keyed by the wire
//! (snake_case) field name, so callers can surface the full set of problems
//! at once instead of fixing them one round-trip at a time.

use std::collections::BTreeMap;
use std::fmt;

use validator::ValidateUrl;

type Check<T> = Box<dyn Fn(&T) -> Option<String> + Send + Sync>;

/// A composable rule set for one request type.
pub struct Rules<T> {
    checks: Vec<(&'static str, Check<T>)>,
}

impl<T> Rules<T> {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Attach a predicate to a field. The predicate returns `Some(message)`
    /// when the field is invalid.
    pub fn field<F>(mut self, name: &'static str, check: F) -> Self
    where
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        self.checks.push((name, Box::new(check)));
        self
    }

    /// Evaluate every rule, collecting all violations.
    pub fn check(&self, value: &T) -> Result<(), ValidationError> {
        let mut field_errors = BTreeMap::new();
        for (name, check) in &self.checks {
            if let Some(message) = check(value) {
                field_errors.insert((*name).to_string(), message);
            }
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { field_errors })
        }
    }
}

impl<T> Default for Rules<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// One message per invalid field, keyed by the wire field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field_errors: BTreeMap<String, String>,
}

impl ValidationError {
    /// A single-field error, used when an existence check against the store
    /// fails for a referenced association.
    pub fn field(name: &str, message: &str) -> Self {
        let mut field_errors = BTreeMap::new();
        field_errors.insert(name.to_string(), message.to_string());
        Self { field_errors }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.field_errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Field predicates shared by the request rule sets.
pub mod rule {
    use super::ValidateUrl;

    pub fn required(value: &str) -> Option<String> {
        if value.trim().is_empty() {
            Some("is a required field".to_string())
        } else {
            None
        }
    }

    pub fn at_least<N>(value: N, min: N) -> Option<String>
    where
        N: PartialOrd + std::fmt::Display,
    {
        if value < min {
            Some(format!("must be {min} or greater"))
        } else {
            None
        }
    }

    pub fn greater_than<N>(value: N, min: N) -> Option<String>
    where
        N: PartialOrd + std::fmt::Display,
    {
        if value <= min {
            Some(format!("must be greater than {min}"))
        } else {
            None
        }
    }

    /// Valid only when non-empty; an empty string means "unset".
    pub fn uri(value: &str) -> Option<String> {
        if value.is_empty() || value.validate_url() {
            None
        } else {
            Some("must be a valid URI".to_string())
        }
    }

    pub fn iso4217(code: &str) -> Option<String> {
        if super::ISO_4217_CODES.binary_search(&code).is_ok() {
            None
        } else {
            Some("must be a valid ISO 4217 currency code".to_string())
        }
    }
}

/// Active ISO 4217 alphabetic codes, sorted for binary search.
#[rustfmt::skip]
const ISO_4217_CODES: &[&str] = &[
    "AED", "AFN", "ALL", "AMD", "ANG", "AOA", "ARS", "AUD", "AWG", "AZN",
    "BAM", "BBD", "BDT", "BGN", "BHD", "BIF", "BMD", "BND", "BOB", "BOV",
    "BRL", "BSD", "BTN", "BWP", "BYN", "BZD", "CAD", "CDF", "CHE", "CHF",
    "CHW", "CLF", "CLP", "CNY", "COP", "COU", "CRC", "CUC", "CUP", "CVE",
    "CZK", "DJF", "DKK", "DOP", "DZD", "EGP", "ERN", "ETB", "EUR", "FJD",
    "FKP", "GBP", "GEL", "GHS", "GIP", "GMD", "GNF", "GTQ", "GYD", "HKD",
    "HNL", "HTG", "HUF", "IDR", "ILS", "INR", "IQD", "IRR", "ISK", "JMD",
    "JOD", "JPY", "KES", "KGS", "KHR", "KMF", "KPW", "KRW", "KWD", "KYD",
    "KZT", "LAK", "LBP", "LKR", "LRD", "LSL", "LYD", "MAD", "MDL", "MGA",
    "MKD", "MMK", "MNT", "MOP", "MRU", "MUR", "MVR", "MWK", "MXN", "MXV",
    "MYR", "MZN", "NAD", "NGN", "NIO", "NOK", "NPR", "NZD", "OMR", "PAB",
    "PEN", "PGK", "PHP", "PKR", "PLN", "PYG", "QAR", "RON", "RSD", "RUB",
    "RWF", "SAR", "SBD", "SCR", "SDG", "SEK", "SGD", "SHP", "SLE", "SLL",
    "SOS", "SRD", "SSP", "STN", "SVC", "SYP", "SZL", "THB", "TJS", "TMT",
    "TND", "TOP", "TRY", "TTD", "TWD", "TZS", "UAH", "UGX", "USD", "USN",
    "UYI", "UYU", "UYW", "UZS", "VED", "VES", "VND", "VUV", "WST", "XAF",
    "XAG", "XAU", "XBA", "XBB", "XBC", "XBD", "XCD", "XDR", "XOF", "XPD",
    "XPF", "XSU", "XUA", "XXX", "YER", "ZAR", "ZMW", "ZWL",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_every_failing_field() {
        struct Req {
            name: String,
            count: i32,
        }

        let rules: Rules<Req> = Rules::new()
            .field("name", |r: &Req| rule::required(&r.name))
            .field("count", |r: &Req| rule::at_least(r.count, 0));

        let err = rules
            .check(&Req {
                name: String::new(),
                count: -1,
            })
            .unwrap_err();

        assert_eq!(err.field_errors.len(), 2);
        assert!(err.field_errors.contains_key("name"));
        assert!(err.field_errors.contains_key("count"));

        assert!(rules
            .check(&Req {
                name: "ok".to_string(),
                count: 0,
            })
            .is_ok());
    }

    #[test]
    fn iso4217_checks_membership_not_just_shape() {
        assert!(rule::iso4217("VND").is_none());
        assert!(rule::iso4217("USD").is_none());
        // Three uppercase letters but not an assigned code.
        assert!(rule::iso4217("GAY").is_some());
        assert!(rule::iso4217("usd").is_some());
        assert!(rule::iso4217("").is_some());
    }

    #[test]
    fn uri_rule_skips_empty_values() {
        assert!(rule::uri("").is_none());
        assert!(rule::uri("https://cdn.ebisaan.dev/img/1.png").is_none());
        assert!(rule::uri("%notexists$").is_some());
    }

    #[test]
    fn display_joins_fields_in_order() {
        let mut field_errors = BTreeMap::new();
        field_errors.insert("a".to_string(), "bad".to_string());
        field_errors.insert("b".to_string(), "worse".to_string());
        let err = ValidationError { field_errors };
        assert_eq!(err.to_string(), "a: bad; b: worse");
    }
}
