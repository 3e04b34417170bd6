use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{OrderError, Result};
use crate::events::{Event, EventStore};
use crate::order::{Order, Payment};
use crate::types::{OrderStatus, PaymentId};

use super::PaymentRequest;

/// outcome of an accepted payment
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    pub payment_id: PaymentId,
    pub amount_applied: Money,
    pub balance_after: Money,
    pub status_after: OrderStatus,
    /// installment numbers newly marked paid by this payment
    pub settled_installments: Vec<u32>,
    pub payment_date: DateTime<Utc>,
}

/// pure projection of what a payment would do, for client-side preview
///
/// the authoritative `process` call re-validates against current state; this
/// never substitutes for it.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentPreview {
    pub balance_after: Money,
    pub status_after: OrderStatus,
    pub would_settle: Vec<u32>,
}

/// applies incoming payments to an order and keeps its state consistent
pub struct PaymentProcessor;

impl PaymentProcessor {
    pub fn new() -> Self {
        Self
    }

    /// apply a payment to the order
    ///
    /// on any error the order is left exactly as it was.
    pub fn process(
        &self,
        order: &mut Order,
        request: PaymentRequest,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Result<PaymentReceipt> {
        self.validate(order, request.amount)?;

        let now = time_provider.now();
        let payment_id = order.next_payment_id();
        let reference = request
            .payment_reference
            .unwrap_or_else(|| format!("PMT-{}", Uuid::new_v4()));

        order.record_payment(Payment {
            id: payment_id,
            amount: request.amount,
            payment_method: request.payment_method,
            payment_reference: Some(reference),
            notes: request.notes,
            payment_date: now,
            reversed: false,
        });

        events.emit(Event::PaymentReceived {
            order_id: order.id,
            payment_id,
            amount: request.amount,
            method: request.payment_method,
            balance_after: order.balance_amount,
            timestamp: now,
        });

        let settled_installments = self.settle_covered_installments(order, now, events);

        let new_status = Self::status_after(order.status, order.paid_amount, order.balance_amount);
        if new_status != order.status {
            let old_status = order.status;
            order.update_status(new_status, now);
            events.emit(Event::StatusChanged {
                order_id: order.id,
                old_status,
                new_status,
                timestamp: now,
            });
        }

        if order.is_settled() {
            events.emit(Event::OrderSettled {
                order_id: order.id,
                final_payment: request.amount,
                timestamp: now,
            });
        }

        Ok(PaymentReceipt {
            payment_id,
            amount_applied: request.amount,
            balance_after: order.balance_amount,
            status_after: order.status,
            settled_installments,
            payment_date: now,
        })
    }

    /// project the effect of a payment without touching the order
    pub fn preview(&self, order: &Order, amount: Money) -> Result<PaymentPreview> {
        self.validate(order, amount)?;

        let paid_after = order.paid_amount + amount;
        let balance_after = (order.total_amount - paid_after).max(Money::ZERO);

        let would_settle = match &order.layaway_schedule {
            Some(schedule) => {
                let mut funds = paid_after - schedule.deposit_amount;
                let mut numbers = Vec::new();
                for installment in &schedule.installments {
                    if funds < installment.expected_amount {
                        break;
                    }
                    funds -= installment.expected_amount;
                    if !installment.paid {
                        numbers.push(installment.installment_number);
                    }
                }
                numbers
            }
            None => Vec::new(),
        };

        Ok(PaymentPreview {
            balance_after,
            status_after: Self::status_after(order.status, paid_after, balance_after),
            would_settle,
        })
    }

    fn validate(&self, order: &Order, amount: Money) -> Result<()> {
        if !order.can_accept_payment() {
            return Err(OrderError::OrderNotPayable {
                status: order.status,
            });
        }
        if order.is_settled() {
            return Err(OrderError::OrderAlreadySettled);
        }
        if !amount.is_positive() {
            return Err(OrderError::InvalidAmount { amount });
        }
        if amount > order.balance_amount {
            return Err(OrderError::AmountExceedsBalance {
                balance: order.balance_amount,
                requested: amount,
            });
        }
        Ok(())
    }

    /// re-derive installment coverage from the order totals
    ///
    /// funds available to installments are everything paid beyond the
    /// deposit; the deposit is covered first, at schedule creation. walking
    /// in ascending number order, an installment is marked paid only when
    /// the remaining funds fully cover it — a partial remainder carries to
    /// the next payment instead of marking anything paid.
    fn settle_covered_installments(
        &self,
        order: &mut Order,
        now: DateTime<Utc>,
        events: &mut EventStore,
    ) -> Vec<u32> {
        let order_id = order.id;
        let paid_amount = order.paid_amount;

        let schedule = match order.layaway_schedule.as_mut() {
            Some(s) => s,
            None => return Vec::new(),
        };

        let mut funds = paid_amount - schedule.deposit_amount;
        let mut settled = Vec::new();

        for installment in schedule.installments.iter_mut() {
            if funds < installment.expected_amount {
                break;
            }
            funds -= installment.expected_amount;

            if !installment.paid {
                installment.paid = true;
                installment.paid_amount = Some(installment.expected_amount);
                installment.paid_date = Some(now);
                settled.push(installment.installment_number);

                events.emit(Event::InstallmentSettled {
                    order_id,
                    installment_number: installment.installment_number,
                    amount: installment.expected_amount,
                    timestamp: now,
                });
            }
        }

        settled
    }

    fn status_after(current: OrderStatus, paid: Money, balance: Money) -> OrderStatus {
        if balance.is_zero() {
            OrderStatus::FullyPaid
        } else if paid.is_positive() {
            OrderStatus::PartiallyPaid
        } else {
            current
        }
    }
}

impl Default for PaymentProcessor {
    fn default() -> Self {
        Self::new()
    }
}
