use chrono::{DateTime, Duration, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::decimal::Money;
use crate::errors::{OrderError, Result};

use super::{Installment, LayawaySchedule};

/// builds a layaway schedule at order-creation time
///
/// the per-installment amount is `(total - deposit) / n` floored to currency
/// precision; the rounding remainder lands on the final installment so that
/// `deposit + sum(installments) == total` holds exactly.
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    total_amount: Money,
    deposit_amount: Money,
    number_of_installments: u32,
    frequency_days: u32,
    first_installment_date: DateTime<Utc>,
}

impl ScheduleBuilder {
    pub fn new(
        total_amount: Money,
        deposit_amount: Money,
        number_of_installments: u32,
        frequency_days: u32,
        first_installment_date: DateTime<Utc>,
    ) -> Self {
        Self {
            total_amount,
            deposit_amount,
            number_of_installments,
            frequency_days,
            first_installment_date,
        }
    }

    pub fn build(self) -> Result<LayawaySchedule> {
        self.validate()?;

        let n = self.number_of_installments;
        let financed = self.total_amount - self.deposit_amount;
        // floored, never rounded up: the remainder belongs to the last installment
        let per = financed.as_decimal() / Decimal::from(n);
        let base = Money::from_decimal(per.round_dp_with_strategy(2, RoundingStrategy::ToZero));

        let mut installments = Vec::with_capacity(n as usize);
        let mut scheduled = Money::ZERO;

        for i in 0..n {
            let is_last = i == n - 1;
            // remainder lands on the last installment
            let expected = if is_last { financed - scheduled } else { base };
            scheduled += expected;

            installments.push(Installment {
                installment_number: i + 1,
                due_date: self.first_installment_date
                    + Duration::days((i as i64) * self.frequency_days as i64),
                expected_amount: expected,
                paid: false,
                paid_amount: None,
                paid_date: None,
            });
        }

        let final_payment_date = installments
            .last()
            .map(|i| i.due_date)
            .unwrap_or(self.first_installment_date);

        Ok(LayawaySchedule {
            deposit_amount: self.deposit_amount,
            installment_amount: base,
            number_of_installments: n,
            installment_frequency_days: self.frequency_days,
            first_installment_date: self.first_installment_date,
            final_payment_date,
            installments,
        })
    }

    fn validate(&self) -> Result<()> {
        if !self.total_amount.is_positive() {
            return Err(OrderError::InvalidSchedule {
                message: format!("total amount must be positive, got {}", self.total_amount),
            });
        }
        if self.deposit_amount.is_negative() {
            return Err(OrderError::InvalidSchedule {
                message: format!("deposit cannot be negative, got {}", self.deposit_amount),
            });
        }
        if self.deposit_amount >= self.total_amount {
            return Err(OrderError::InvalidSchedule {
                message: format!(
                    "deposit {} must be below total {}",
                    self.deposit_amount, self.total_amount
                ),
            });
        }
        if self.number_of_installments == 0 {
            return Err(OrderError::InvalidSchedule {
                message: "at least one installment required".to_string(),
            });
        }
        if self.frequency_days == 0 {
            return Err(OrderError::InvalidSchedule {
                message: "installment frequency must be at least one day".to_string(),
            });
        }
        Ok(())
    }
}
