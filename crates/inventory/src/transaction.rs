use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, ProductId, TransactionId};

/// Direction of a stock movement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Stock increase.
    Purchase,
    /// Stock decrease; rejected if it would drive the quantity below zero.
    Sale,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Purchase => "purchase",
            TransactionType::Sale => "sale",
        }
    }
}

impl core::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "purchase" => Ok(TransactionType::Purchase),
            "sale" => Ok(TransactionType::Sale),
            other => Err(DomainError::validation(format!(
                "transaction_type must be one of: purchase, sale (got {other:?})"
            ))),
        }
    }
}

/// A validated request to move stock for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    product_id: ProductId,
    transaction_type: TransactionType,
    quantity: i64,
}

impl NewTransaction {
    pub fn new(
        product_id: ProductId,
        transaction_type: TransactionType,
        quantity: i64,
    ) -> DomainResult<Self> {
        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        Ok(Self {
            product_id,
            transaction_type,
            quantity,
        })
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}

/// Immutable record of an applied stock movement.
///
/// `product_id` is a weak reference: it named an existing product when the
/// record was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    product_id: ProductId,
    transaction_type: TransactionType,
    quantity: i64,
    timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Rehydrate a transaction from persisted state.
    pub fn from_parts(
        id: TransactionId,
        product_id: ProductId,
        transaction_type: TransactionType,
        quantity: i64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            product_id,
            transaction_type,
            quantity,
            timestamp,
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl Entity for Transaction {
    type Id = TransactionId;

    fn id(&self) -> TransactionId {
        self.id
    }
}
