//! Form/query DTOs.
//!
//! Everything arrives as text. Each DTO converts itself into a validated
//! domain value or a `DomainError::Validation`; handlers never coerce fields
//! themselves.

use serde::Deserialize;

use stockroom_core::{DomainError, DomainResult, ProductId, TransactionId};
use stockroom_inventory::{NewProduct, NewTransaction, TransactionType};

// -------------------------
// Request DTOs
// -------------------------

/// `POST /add`
#[derive(Debug, Default, Deserialize)]
pub struct AddProductForm {
    pub name: Option<String>,
    pub quantity: Option<String>,
    pub price: Option<String>,
}

impl AddProductForm {
    pub fn parse(self) -> DomainResult<NewProduct> {
        let name = required("name", self.name)?;
        let quantity = parse_i64("quantity", &required("quantity", self.quantity)?)?;
        let price = parse_f64("price", &required("price", self.price)?)?;
        NewProduct::new(name, quantity, price)
    }
}

/// `POST /transaction`
#[derive(Debug, Default, Deserialize)]
pub struct TransactionForm {
    pub product_id: Option<String>,
    pub transaction_type: Option<String>,
    pub quantity: Option<String>,
}

impl TransactionForm {
    pub fn parse(self) -> DomainResult<NewTransaction> {
        let product_id: ProductId = required("product_id", self.product_id)?.parse()?;
        let transaction_type: TransactionType =
            required("transaction_type", self.transaction_type)?
                .trim()
                .parse()?;
        let quantity = parse_i64("quantity", &required("quantity", self.quantity)?)?;
        NewTransaction::new(product_id, transaction_type, quantity)
    }
}

/// `GET /get_product_id?product_name=...`
#[derive(Debug, Default, Deserialize)]
pub struct ProductLookupQuery {
    pub product_name: Option<String>,
}

impl ProductLookupQuery {
    pub fn parse(self) -> DomainResult<String> {
        self.product_name
            .ok_or_else(|| DomainError::validation("product_name is required"))
    }
}

pub fn parse_product_id(raw: &str) -> DomainResult<ProductId> {
    raw.parse()
}

pub fn parse_transaction_id(raw: &str) -> DomainResult<TransactionId> {
    raw.parse()
}

fn required(field: &'static str, value: Option<String>) -> DomainResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(DomainError::validation(format!("{field} is required"))),
    }
}

fn parse_i64(field: &'static str, raw: &str) -> DomainResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| DomainError::validation(format!("{field} must be an integer")))
}

fn parse_f64(field: &'static str, raw: &str) -> DomainResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| DomainError::validation(format!("{field} must be a number")))
}
