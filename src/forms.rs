use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::payments::PaymentRequest;
use crate::types::PaymentMethod;

/// per-field validation messages, keyed by field name
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// outcome of validating raw form input
///
/// invalid input makes no network call and no state change; the original
/// input rides back inside the rejection so the form can redisplay it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "camelCase")]
pub enum Validated<R, F> {
    Valid { data: R },
    Invalid(FormRejection<F>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRejection<F> {
    pub message: String,
    pub field_errors: FieldErrors,
    pub input: F,
}

impl<R, F> Validated<R, F> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validated::Valid { .. })
    }

    pub fn into_result(self) -> Result<R, FormRejection<F>> {
        match self {
            Validated::Valid { data } => Ok(data),
            Validated::Invalid(rejection) => Err(rejection),
        }
    }
}

/// collects field errors while a form is checked
#[derive(Debug, Default)]
pub struct FieldErrorBag {
    errors: FieldErrors,
}

impl FieldErrorBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }

    /// required, non-blank text field
    pub fn require<'a>(&mut self, field: &str, value: &'a str) -> Option<&'a str> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.add(field, format!("{field} is required"));
            None
        } else {
            Some(trimmed)
        }
    }

    /// required positive money amount
    pub fn require_positive_amount(&mut self, field: &str, value: &str) -> Option<Money> {
        let raw = self.require(field, value)?;
        match Money::from_str_exact(raw) {
            Ok(amount) if amount.is_positive() => Some(amount),
            Ok(_) => {
                self.add(field, format!("{field} must be greater than zero"));
                None
            }
            Err(_) => {
                self.add(field, format!("{field} must be a valid amount"));
                None
            }
        }
    }

    /// required payment method name
    pub fn require_payment_method(&mut self, field: &str, value: &str) -> Option<PaymentMethod> {
        let raw = self.require(field, value)?;
        match PaymentMethod::from_str(raw) {
            Ok(method) => Some(method),
            Err(()) => {
                self.add(field, format!("{field} is not a recognized payment method"));
                None
            }
        }
    }
}

/// raw payment entry form, exactly as typed at the counter
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentForm {
    pub amount: String,
    pub payment_method: String,
    pub payment_reference: Option<String>,
    pub notes: Option<String>,
}

impl PaymentForm {
    /// validate into a dispatchable request, or echo the input back
    pub fn validate(self) -> Validated<PaymentRequest, PaymentForm> {
        let mut bag = FieldErrorBag::new();

        let amount = bag.require_positive_amount("amount", &self.amount);
        let method = bag.require_payment_method("paymentMethod", &self.payment_method);

        match (amount, method) {
            (Some(amount), Some(method)) if bag.is_empty() => Validated::Valid {
                data: PaymentRequest {
                    amount,
                    payment_method: method,
                    payment_reference: self
                        .payment_reference
                        .as_deref()
                        .map(str::trim)
                        .filter(|r| !r.is_empty())
                        .map(String::from),
                    notes: self.notes.clone(),
                },
            },
            _ => Validated::Invalid(FormRejection {
                message: "please correct the highlighted fields".to_string(),
                field_errors: bag.into_errors(),
                input: self,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn form(amount: &str, method: &str) -> PaymentForm {
        PaymentForm {
            amount: amount.to_string(),
            payment_method: method.to_string(),
            payment_reference: None,
            notes: None,
        }
    }

    #[test]
    fn test_valid_form_maps_to_request() {
        let validated = form(" 250.50 ", "cash").validate();
        let request = validated.into_result().unwrap();
        assert_eq!(request.amount, Money::from_decimal(dec!(250.50)));
        assert_eq!(request.payment_method, PaymentMethod::Cash);
    }

    #[test]
    fn test_missing_amount_is_field_error() {
        let rejected = form("", "CASH").validate().into_result().unwrap_err();
        assert_eq!(
            rejected.field_errors.get("amount").unwrap(),
            &vec!["amount is required".to_string()]
        );
        // input echoed back untouched
        assert_eq!(rejected.input.payment_method, "CASH");
    }

    #[test]
    fn test_non_numeric_and_non_positive_amounts() {
        let not_a_number = form("abc", "CASH").validate().into_result().unwrap_err();
        assert!(not_a_number.field_errors.contains_key("amount"));

        let zero = form("0", "CASH").validate().into_result().unwrap_err();
        assert_eq!(
            zero.field_errors.get("amount").unwrap(),
            &vec!["amount must be greater than zero".to_string()]
        );

        let negative = form("-5", "CASH").validate().into_result().unwrap_err();
        assert!(negative.field_errors.contains_key("amount"));
    }

    #[test]
    fn test_unknown_method_is_field_error() {
        let rejected = form("100", "BARTER").validate().into_result().unwrap_err();
        assert!(rejected.field_errors.contains_key("paymentMethod"));
    }

    #[test]
    fn test_multiple_errors_reported_together() {
        let rejected = form("", "").validate().into_result().unwrap_err();
        assert_eq!(rejected.field_errors.len(), 2);
    }

    #[test]
    fn test_blank_reference_dropped() {
        let mut raw = form("100", "CARD");
        raw.payment_reference = Some("   ".to_string());
        let request = raw.validate().into_result().unwrap();
        assert_eq!(request.payment_reference, None);
    }
}
