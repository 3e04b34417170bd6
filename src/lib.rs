pub mod api;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod forms;
pub mod order;
pub mod payments;
pub mod schedule;
pub mod types;

// re-export key types
pub use api::{ApiError, ApiResult, InMemoryGateway, OrderGateway, Page, PageRequest, SortDirection};
pub use decimal::{Money, Ratio};
pub use errors::{OrderError, Result};
pub use events::{Event, EventStore};
pub use forms::{FieldErrors, FormRejection, PaymentForm, Validated};
pub use order::{Order, OrderView, Payment};
pub use payments::{PaymentPreview, PaymentProcessor, PaymentReceipt, PaymentRequest};
pub use schedule::{
    Installment, LayawaySchedule, PaymentSummary, ScheduleBuilder, SummaryAggregator,
};
pub use types::{OrderId, OrderStatus, OrderType, PaymentId, PaymentMethod};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
