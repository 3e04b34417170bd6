/// time control - deterministic overdue detection with controlled time
use chrono::{Duration, TimeZone, Utc};
use layaway_rs::{
    EventStore, Money, Order, OrderType, PaymentMethod, PaymentProcessor, PaymentRequest,
    SafeTimeProvider, ScheduleBuilder, SummaryAggregator, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // create controlled time for testing
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();
    let mut events = EventStore::new();
    let processor = PaymentProcessor::new();

    println!("starting date: {}", time.now().format("%Y-%m-%d"));

    let schedule = ScheduleBuilder::new(
        Money::from_major(900),
        Money::from_major(100),
        4,
        30,
        time.now() + Duration::days(30),
    )
    .build()?;

    let mut order = Order::new(
        9,
        "ORD-0009".to_string(),
        OrderType::Layaway,
        Money::from_major(900),
        time.now(),
    )
    .with_schedule(schedule);

    // advance past the first two due dates without paying
    controller.advance(Duration::days(65));
    println!("advanced to: {}", time.now().format("%Y-%m-%d"));

    let summary = SummaryAggregator::summarize(&order, &time);
    println!("overdue installments: {}", summary.overdue_installments);

    // catch up with one payment covering both
    processor.process(
        &mut order,
        PaymentRequest::new(Money::from_major(400), PaymentMethod::Cash),
        &time,
        &mut events,
    )?;

    let summary = SummaryAggregator::summarize(&order, &time);
    println!(
        "after catch-up: {} paid, {} overdue, next due {:?}",
        summary.paid_installments, summary.overdue_installments, summary.next_due_date
    );

    Ok(())
}
