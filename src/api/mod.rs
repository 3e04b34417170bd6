pub mod page;

use std::collections::BTreeMap;

use hourglass_rs::SafeTimeProvider;
use thiserror::Error;

use crate::errors::OrderError;
use crate::events::{Event, EventStore};
use crate::order::{Order, OrderView};
use crate::payments::{PaymentProcessor, PaymentRequest};
use crate::schedule::{LayawaySchedule, PaymentSummary, SummaryAggregator};
use crate::types::OrderId;

pub use page::{Page, PageRequest, SortDirection};

/// errors crossing the gateway boundary
///
/// business errors carry a single user-facing message; transport errors are
/// surfaced generically and retried by hand. expected failures are values,
/// never panics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    Business(#[from] OrderError),

    #[error("unexpected error, try again: {message}")]
    Transport {
        message: String,
    },
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// seam to the backend order service
///
/// the backend re-validates every payment against authoritative state before
/// committing; the client-side preview is advisory only.
pub trait OrderGateway {
    fn fetch_order(&self, id: OrderId) -> ApiResult<Order>;

    fn fetch_schedule(&self, id: OrderId) -> ApiResult<LayawaySchedule>;

    fn fetch_summary(
        &self,
        id: OrderId,
        time_provider: &SafeTimeProvider,
    ) -> ApiResult<PaymentSummary>;

    /// apply a payment and return the updated order
    fn submit_payment(
        &mut self,
        id: OrderId,
        request: PaymentRequest,
        time_provider: &SafeTimeProvider,
    ) -> ApiResult<Order>;

    fn list_orders(&self, request: &PageRequest) -> ApiResult<Page<OrderView>>;
}

/// in-process gateway holding authoritative order state
///
/// stands in for the remote service in tests and demos; runs the same
/// processor the real backend would, so every submission is re-validated
/// against current balances.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    orders: BTreeMap<OrderId, Order>,
    events: EventStore,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_order(&mut self, order: Order) {
        self.orders.insert(order.id, order);
    }

    /// drain events emitted by processed payments
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }
}

impl OrderGateway for InMemoryGateway {
    fn fetch_order(&self, id: OrderId) -> ApiResult<Order> {
        self.orders
            .get(&id)
            .cloned()
            .ok_or(ApiError::Business(OrderError::OrderNotFound { id }))
    }

    fn fetch_schedule(&self, id: OrderId) -> ApiResult<LayawaySchedule> {
        let order = self.fetch_order(id)?;
        order
            .layaway_schedule
            .ok_or(ApiError::Business(OrderError::ScheduleMissing { id }))
    }

    fn fetch_summary(
        &self,
        id: OrderId,
        time_provider: &SafeTimeProvider,
    ) -> ApiResult<PaymentSummary> {
        let order = self.fetch_order(id)?;
        Ok(SummaryAggregator::summarize(&order, time_provider))
    }

    fn submit_payment(
        &mut self,
        id: OrderId,
        request: PaymentRequest,
        time_provider: &SafeTimeProvider,
    ) -> ApiResult<Order> {
        let order = self
            .orders
            .get_mut(&id)
            .ok_or(ApiError::Business(OrderError::OrderNotFound { id }))?;

        let processor = PaymentProcessor::new();
        processor.process(order, request, time_provider, &mut self.events)?;

        Ok(order.clone())
    }

    fn list_orders(&self, request: &PageRequest) -> ApiResult<Page<OrderView>> {
        let views: Vec<OrderView> = self.orders.values().map(OrderView::from_order).collect();
        Ok(Page::from_items(views, request))
    }
}
