pub mod builder;
pub mod summary;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;

pub use builder::ScheduleBuilder;
pub use summary::{PaymentSummary, SummaryAggregator};

/// one scheduled payment within a layaway schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    /// 1-based, unique within the schedule, ordering = due-date ordering
    pub installment_number: u32,
    pub due_date: DateTime<Utc>,
    pub expected_amount: Money,
    pub paid: bool,
    pub paid_amount: Option<Money>,
    pub paid_date: Option<DateTime<Utc>>,
}

impl Installment {
    /// overdue is derived at read time, never stored
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.paid && self.due_date < now
    }
}

/// layaway schedule attached one-to-one to a layaway order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayawaySchedule {
    pub deposit_amount: Money,
    pub installment_amount: Money,
    pub number_of_installments: u32,
    pub installment_frequency_days: u32,
    pub first_installment_date: DateTime<Utc>,
    pub final_payment_date: DateTime<Utc>,
    /// length = number_of_installments, ascending installment_number
    pub installments: Vec<Installment>,
}

impl LayawaySchedule {
    /// total the schedule accounts for: deposit plus every installment
    pub fn scheduled_total(&self) -> Money {
        self.installments
            .iter()
            .map(|i| i.expected_amount)
            .fold(self.deposit_amount, |acc, x| acc + x)
    }

    /// first unpaid installment in ascending number order
    pub fn next_unpaid(&self) -> Option<&Installment> {
        self.installments.iter().find(|i| !i.paid)
    }

    pub fn paid_count(&self) -> usize {
        self.installments.iter().filter(|i| i.paid).count()
    }

    pub fn overdue_count(&self, now: DateTime<Utc>) -> usize {
        self.installments.iter().filter(|i| i.is_overdue(now)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn installment(number: u32, due: DateTime<Utc>, paid: bool) -> Installment {
        Installment {
            installment_number: number,
            due_date: due,
            expected_amount: Money::from_major(100),
            paid,
            paid_amount: paid.then(|| Money::from_major(100)),
            paid_date: paid.then(|| due),
        }
    }

    #[test]
    fn test_overdue_derivation() {
        let due = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let later = due + Duration::days(3);
        let earlier = due - Duration::days(3);

        let unpaid = installment(1, due, false);
        assert!(unpaid.is_overdue(later));
        assert!(!unpaid.is_overdue(earlier));

        // paid installments are never overdue, whatever the date
        let paid = installment(1, due, true);
        assert!(!paid.is_overdue(later));
    }

    #[test]
    fn test_next_unpaid_selection() {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let schedule = LayawaySchedule {
            deposit_amount: Money::from_major(100),
            installment_amount: Money::from_major(100),
            number_of_installments: 4,
            installment_frequency_days: 30,
            first_installment_date: base,
            final_payment_date: base + Duration::days(90),
            installments: vec![
                installment(1, base, true),
                installment(2, base + Duration::days(30), true),
                installment(3, base + Duration::days(60), false),
                installment(4, base + Duration::days(90), false),
            ],
        };

        let next = schedule.next_unpaid().unwrap();
        assert_eq!(next.installment_number, 3);
        assert_eq!(next.due_date, base + Duration::days(60));
        assert_eq!(schedule.paid_count(), 2);
    }
}
