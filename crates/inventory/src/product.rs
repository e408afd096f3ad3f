use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, ProductId};

use crate::transaction::{NewTransaction, TransactionType};

/// Validated input for creating a product.
///
/// Construction is the only way to get one, so anything holding a
/// `NewProduct` can insert it without re-checking.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    name: String,
    quantity: i64,
    price: f64,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, quantity: i64, price: f64) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        if !price.is_finite() || price < 0.0 {
            return Err(DomainError::validation(
                "price must be a non-negative number",
            ));
        }
        Ok(Self {
            name,
            quantity,
            price,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn price(&self) -> f64 {
        self.price
    }
}

/// An inventory item with its on-hand quantity.
///
/// `quantity` is never negative; the store only ever writes a value produced
/// by [`Product::quantity_after`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    quantity: i64,
    price: f64,
}

impl Product {
    /// Rehydrate a product from persisted state.
    pub fn from_parts(id: ProductId, name: String, quantity: i64, price: f64) -> Self {
        Self {
            id,
            name,
            quantity,
            price,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Decide the quantity after applying `tx`, without mutating anything.
    ///
    /// Purchases always succeed (barring integer overflow). A sale larger than
    /// the on-hand quantity is rejected whole.
    pub fn quantity_after(&self, tx: &NewTransaction) -> DomainResult<i64> {
        if tx.product_id() != self.id {
            return Err(DomainError::validation("transaction targets another product"));
        }

        match tx.transaction_type() {
            TransactionType::Purchase => self
                .quantity
                .checked_add(tx.quantity())
                .ok_or_else(|| DomainError::validation("quantity overflow")),
            TransactionType::Sale => {
                if self.quantity >= tx.quantity() {
                    Ok(self.quantity - tx.quantity())
                } else {
                    Err(DomainError::insufficient_stock(tx.quantity(), self.quantity))
                }
            }
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}
