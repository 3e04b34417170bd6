use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// backend primary key for an order
pub type OrderId = i64;

/// backend primary key for a payment
pub type PaymentId = i64;

/// order types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// paid and collected at the counter
    ImmediateSale,
    /// paid now, goods collected later
    FutureCollection,
    /// deposit plus scheduled installments before collection
    Layaway,
    /// price quote, no stock or money movement
    Quotation,
}

/// order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// created, nothing paid yet
    Pending,
    /// confirmed by the branch
    Confirmed,
    /// some money received, balance remains
    PartiallyPaid,
    /// balance cleared, goods not yet collected
    FullyPaid,
    /// stock reserved and ready at the branch
    ReadyForCollection,
    /// goods handed over
    Completed,
    /// cancelled before settlement
    Cancelled,
    /// payments reversed after the fact
    Reversed,
}

impl OrderStatus {
    /// terminal statuses are immutable thereafter
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Completed | OrderStatus::Cancelled | OrderStatus::Reversed
        )
    }
}

/// payment methods accepted at the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
    MobileMoney,
    Mixed,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Card => "CARD",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
            PaymentMethod::MobileMoney => "MOBILE_MONEY",
            PaymentMethod::Mixed => "MIXED",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CASH" => Ok(PaymentMethod::Cash),
            "CARD" => Ok(PaymentMethod::Card),
            "BANK_TRANSFER" => Ok(PaymentMethod::BankTransfer),
            "MOBILE_MONEY" => Ok(PaymentMethod::MobileMoney),
            "MIXED" => Ok(PaymentMethod::Mixed),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Reversed.is_terminal());
        assert!(!OrderStatus::PartiallyPaid.is_terminal());
        assert!(!OrderStatus::FullyPaid.is_terminal());
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_string(&OrderType::FutureCollection).unwrap();
        assert_eq!(json, "\"FUTURE_COLLECTION\"");

        let status: OrderStatus = serde_json::from_str("\"READY_FOR_COLLECTION\"").unwrap();
        assert_eq!(status, OrderStatus::ReadyForCollection);
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("cash".parse::<PaymentMethod>(), Ok(PaymentMethod::Cash));
        assert_eq!(
            "BANK_TRANSFER".parse::<PaymentMethod>(),
            Ok(PaymentMethod::BankTransfer)
        );
        assert!("IOU".parse::<PaymentMethod>().is_err());
    }
}
