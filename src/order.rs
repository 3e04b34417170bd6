use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::schedule::LayawaySchedule;
use crate::types::{OrderId, OrderStatus, OrderType, PaymentId, PaymentMethod};

/// one payment applied to an order; appended, never mutated except `reversed`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub amount: Money,
    pub payment_method: PaymentMethod,
    pub payment_reference: Option<String>,
    pub notes: Option<String>,
    pub payment_date: DateTime<Utc>,
    pub reversed: bool,
}

/// order aggregate as mirrored from the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub total_amount: Money,
    pub paid_amount: Money,
    pub balance_amount: Money,
    /// chronological, insertion order
    pub payments: Vec<Payment>,
    /// present only for layaway orders
    pub layaway_schedule: Option<LayawaySchedule>,
    pub created_at: DateTime<Utc>,
    pub last_status_change: DateTime<Utc>,
}

impl Order {
    /// create a fresh order with nothing paid
    pub fn new(
        id: OrderId,
        order_number: String,
        order_type: OrderType,
        total_amount: Money,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            order_number,
            order_type,
            status: OrderStatus::Pending,
            total_amount,
            paid_amount: Money::ZERO,
            balance_amount: total_amount,
            payments: Vec::new(),
            layaway_schedule: None,
            created_at,
            last_status_change: created_at,
        }
    }

    /// attach a layaway schedule; the deposit counts as paid at creation
    pub fn with_schedule(mut self, schedule: LayawaySchedule) -> Self {
        self.paid_amount = schedule.deposit_amount;
        self.balance_amount = self.total_amount - schedule.deposit_amount;
        self.layaway_schedule = Some(schedule);
        self
    }

    /// check whether the order can still take money
    pub fn can_accept_payment(&self) -> bool {
        !self.status.is_terminal()
    }

    /// check whether the balance is cleared
    pub fn is_settled(&self) -> bool {
        self.balance_amount.is_zero()
    }

    /// next payment id, sequential within this order
    pub fn next_payment_id(&self) -> PaymentId {
        self.payments.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    /// update status and stamp the change
    pub fn update_status(&mut self, new_status: OrderStatus, timestamp: DateTime<Utc>) {
        self.status = new_status;
        self.last_status_change = timestamp;
    }

    /// append a payment and rebalance; the invariant
    /// `balance_amount == total_amount - paid_amount` holds afterwards
    pub fn record_payment(&mut self, payment: Payment) {
        self.paid_amount += payment.amount;
        self.balance_amount = (self.total_amount - self.paid_amount).max(Money::ZERO);
        self.payments.push(payment);
    }

    /// sum of non-reversed payments
    pub fn effective_payments(&self) -> Money {
        self.payments
            .iter()
            .filter(|p| !p.reversed)
            .map(|p| p.amount)
            .fold(Money::ZERO, |acc, x| acc + x)
    }
}

/// serializable flat view of an order for table rows and detail pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: OrderId,
    pub order_number: String,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub total_amount: Money,
    pub paid_amount: Money,
    pub balance_amount: Money,
    pub payment_count: usize,
    pub last_payment_date: Option<DateTime<Utc>>,
    pub next_due_date: Option<DateTime<Utc>>,
    pub next_due_amount: Option<Money>,
}

impl OrderView {
    pub fn from_order(order: &Order) -> Self {
        let next_unpaid = order
            .layaway_schedule
            .as_ref()
            .and_then(|s| s.next_unpaid());

        OrderView {
            id: order.id,
            order_number: order.order_number.clone(),
            order_type: order.order_type,
            status: order.status,
            total_amount: order.total_amount,
            paid_amount: order.paid_amount,
            balance_amount: order.balance_amount,
            payment_count: order.payments.len(),
            last_payment_date: order.payments.last().map(|p| p.payment_date),
            next_due_date: next_unpaid.map(|i| i.due_date),
            next_due_amount: next_unpaid.map(|i| i.expected_amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ScheduleBuilder;
    use chrono::TimeZone;

    fn cash(id: PaymentId, amount: Money, date: DateTime<Utc>) -> Payment {
        Payment {
            id,
            amount,
            payment_method: PaymentMethod::Cash,
            payment_reference: None,
            notes: None,
            payment_date: date,
            reversed: false,
        }
    }

    #[test]
    fn test_balance_invariant_on_record() {
        let t0 = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let mut order = Order::new(
            1,
            "ORD-0001".to_string(),
            OrderType::ImmediateSale,
            Money::from_major(1000),
            t0,
        );

        order.record_payment(cash(1, Money::from_major(400), t0));
        assert_eq!(order.paid_amount, Money::from_major(400));
        assert_eq!(
            order.balance_amount,
            order.total_amount - order.paid_amount
        );

        order.record_payment(cash(2, Money::from_major(600), t0));
        assert_eq!(order.balance_amount, Money::ZERO);
        assert!(order.is_settled());
    }

    #[test]
    fn test_deposit_counts_as_paid() {
        let t0 = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let schedule = ScheduleBuilder::new(
            Money::from_major(1200),
            Money::from_major(200),
            5,
            30,
            t0,
        )
        .build()
        .unwrap();

        let order = Order::new(
            7,
            "ORD-0007".to_string(),
            OrderType::Layaway,
            Money::from_major(1200),
            t0,
        )
        .with_schedule(schedule);

        assert_eq!(order.paid_amount, Money::from_major(200));
        assert_eq!(order.balance_amount, Money::from_major(1000));
    }

    #[test]
    fn test_terminal_orders_refuse_payment() {
        let t0 = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let mut order = Order::new(
            2,
            "ORD-0002".to_string(),
            OrderType::FutureCollection,
            Money::from_major(500),
            t0,
        );
        order.update_status(OrderStatus::Cancelled, t0);
        assert!(!order.can_accept_payment());
    }

    #[test]
    fn test_effective_payments_skip_reversed() {
        let t0 = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let mut order = Order::new(
            3,
            "ORD-0003".to_string(),
            OrderType::ImmediateSale,
            Money::from_major(300),
            t0,
        );
        order.record_payment(cash(1, Money::from_major(100), t0));
        let mut second = cash(2, Money::from_major(50), t0);
        second.reversed = true;
        order.record_payment(second);

        assert_eq!(order.effective_payments(), Money::from_major(100));
    }

    #[test]
    fn test_order_json_round_trip() {
        let t0 = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let mut order = Order::new(
            4,
            "ORD-0004".to_string(),
            OrderType::ImmediateSale,
            Money::from_major(250),
            t0,
        );
        order.record_payment(cash(1, Money::from_major(100), t0));

        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains("\"orderNumber\":\"ORD-0004\""));
        assert!(json.contains("\"IMMEDIATE_SALE\""));

        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
    }
}
