pub mod processor;

use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::PaymentMethod;

pub use processor::{PaymentPreview, PaymentProcessor, PaymentReceipt};

/// validated payment request, ready to apply to an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub amount: Money,
    pub payment_method: PaymentMethod,
    pub payment_reference: Option<String>,
    pub notes: Option<String>,
}

impl PaymentRequest {
    pub fn new(amount: Money, payment_method: PaymentMethod) -> Self {
        Self {
            amount,
            payment_method,
            payment_reference: None,
            notes: None,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.payment_reference = Some(reference.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
