use thiserror::Error;

use crate::decimal::Money;
use crate::types::{OrderId, OrderStatus};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrderError {
    #[error("order not found: {id}")]
    OrderNotFound {
        id: OrderId,
    },

    #[error("invalid payment amount: {amount}")]
    InvalidAmount {
        amount: Money,
    },

    #[error("amount exceeds balance: balance {balance}, requested {requested}")]
    AmountExceedsBalance {
        balance: Money,
        requested: Money,
    },

    #[error("order already settled")]
    OrderAlreadySettled,

    #[error("order not payable: current status is {status:?}")]
    OrderNotPayable {
        status: OrderStatus,
    },

    #[error("invalid schedule: {message}")]
    InvalidSchedule {
        message: String,
    },

    #[error("schedule missing for layaway order {id}")]
    ScheduleMissing {
        id: OrderId,
    },
}

pub type Result<T> = std::result::Result<T, OrderError>;
