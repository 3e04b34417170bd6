use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{OrderId, OrderStatus, PaymentId, PaymentMethod};

/// all events that can be emitted while working an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    PaymentReceived {
        order_id: OrderId,
        payment_id: PaymentId,
        amount: Money,
        method: PaymentMethod,
        balance_after: Money,
        timestamp: DateTime<Utc>,
    },
    InstallmentSettled {
        order_id: OrderId,
        installment_number: u32,
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    OrderSettled {
        order_id: OrderId,
        final_payment: Money,
        timestamp: DateTime<Utc>,
    },
    StatusChanged {
        order_id: OrderId,
        old_status: OrderStatus,
        new_status: OrderStatus,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_take_events_drains_store() {
        let mut store = EventStore::new();
        let ts = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        store.emit(Event::StatusChanged {
            order_id: 1,
            old_status: OrderStatus::Pending,
            new_status: OrderStatus::PartiallyPaid,
            timestamp: ts,
        });

        assert_eq!(store.events().len(), 1);
        let taken = store.take_events();
        assert_eq!(taken.len(), 1);
        assert!(store.events().is_empty());
    }
}
