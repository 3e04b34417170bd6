use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Ratio};
use crate::order::Order;

/// aggregate payment view; computed at read time, never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    pub total_expected: Money,
    pub total_paid: Money,
    pub remaining_balance: Money,
    pub payment_progress: Ratio,
    pub paid_installments: usize,
    pub overdue_installments: usize,
    pub total_installments: usize,
    pub fully_paid: bool,
    pub next_due_date: Option<DateTime<Utc>>,
    pub next_due_amount: Option<Money>,
}

/// derives a PaymentSummary from an order without mutating it
///
/// idempotent: unchanged inputs yield `==`-identical summaries. overdue
/// counts are computed against the clock passed in, not stored state.
pub struct SummaryAggregator;

impl SummaryAggregator {
    /// summarize against the supplied time provider
    pub fn summarize(order: &Order, time_provider: &SafeTimeProvider) -> PaymentSummary {
        Self::summarize_at(order, time_provider.now())
    }

    /// summarize against an explicit instant
    pub fn summarize_at(order: &Order, now: DateTime<Utc>) -> PaymentSummary {
        let total_expected = order.total_amount;
        let total_paid = order.paid_amount;
        let remaining_balance = (total_expected - total_paid).max(Money::ZERO);
        let payment_progress = total_paid.ratio_of(total_expected).clamp_unit();

        let schedule = order.layaway_schedule.as_ref();
        let next_unpaid = schedule.and_then(|s| s.next_unpaid());

        PaymentSummary {
            total_expected,
            total_paid,
            remaining_balance,
            payment_progress,
            paid_installments: schedule.map(|s| s.paid_count()).unwrap_or(0),
            overdue_installments: schedule.map(|s| s.overdue_count(now)).unwrap_or(0),
            total_installments: schedule.map(|s| s.installments.len()).unwrap_or(0),
            fully_paid: remaining_balance.is_zero(),
            next_due_date: next_unpaid.map(|i| i.due_date),
            next_due_amount: next_unpaid.map(|i| i.expected_amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ScheduleBuilder;
    use crate::types::OrderType;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn layaway_order() -> Order {
        let t0 = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let schedule = ScheduleBuilder::new(
            Money::from_major(1200),
            Money::from_major(200),
            5,
            30,
            t0 + Duration::days(30),
        )
        .build()
        .unwrap();

        Order::new(
            11,
            "ORD-0011".to_string(),
            OrderType::Layaway,
            Money::from_major(1200),
            t0,
        )
        .with_schedule(schedule)
    }

    #[test]
    fn test_summary_fields() {
        let order = layaway_order();
        let now = order.created_at;
        let summary = SummaryAggregator::summarize_at(&order, now);

        assert_eq!(summary.total_expected, Money::from_major(1200));
        assert_eq!(summary.total_paid, Money::from_major(200));
        assert_eq!(summary.remaining_balance, Money::from_major(1000));
        assert_eq!(
            summary.payment_progress.as_decimal(),
            dec!(200) / dec!(1200)
        );
        assert_eq!(summary.total_installments, 5);
        assert_eq!(summary.paid_installments, 0);
        assert_eq!(summary.overdue_installments, 0);
        assert!(!summary.fully_paid);
        assert_eq!(
            summary.next_due_date,
            Some(order.created_at + Duration::days(30))
        );
        assert_eq!(summary.next_due_amount, Some(Money::from_major(200)));
    }

    #[test]
    fn test_summary_is_idempotent() {
        let order = layaway_order();
        let now = order.created_at + Duration::days(45);

        let first = SummaryAggregator::summarize_at(&order, now);
        let second = SummaryAggregator::summarize_at(&order, now);
        assert_eq!(first, second);
    }

    #[test]
    fn test_overdue_counted_at_read_time() {
        let order = layaway_order();

        // first installment due at day 30; read at day 45
        let now = order.created_at + Duration::days(45);
        let summary = SummaryAggregator::summarize_at(&order, now);
        assert_eq!(summary.overdue_installments, 1);

        // same order read before the due date shows none
        let earlier = order.created_at + Duration::days(10);
        let summary = SummaryAggregator::summarize_at(&order, earlier);
        assert_eq!(summary.overdue_installments, 0);
    }

    #[test]
    fn test_zero_total_progress() {
        let t0 = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let order = Order::new(
            12,
            "ORD-0012".to_string(),
            OrderType::Quotation,
            Money::ZERO,
            t0,
        );
        let summary = SummaryAggregator::summarize_at(&order, t0);
        assert_eq!(summary.payment_progress, Ratio::ZERO);
        assert!(summary.fully_paid);
    }

    #[test]
    fn test_no_schedule_means_no_installments() {
        let t0 = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let order = Order::new(
            13,
            "ORD-0013".to_string(),
            OrderType::ImmediateSale,
            Money::from_major(400),
            t0,
        );
        let summary = SummaryAggregator::summarize_at(&order, t0);
        assert_eq!(summary.total_installments, 0);
        assert_eq!(summary.next_due_date, None);
        assert_eq!(summary.next_due_amount, None);
    }
}
