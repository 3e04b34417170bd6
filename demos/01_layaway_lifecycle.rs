/// layaway lifecycle - deposit, installments, settlement
use chrono::Duration;
use layaway_rs::{
    EventStore, Money, Order, OrderType, PaymentMethod, PaymentProcessor, PaymentRequest,
    SafeTimeProvider, ScheduleBuilder, SummaryAggregator, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);
    let mut events = EventStore::new();
    let processor = PaymentProcessor::new();

    // 1,200 of roofing sheets: 200 deposit, 5 monthly installments of 200
    let schedule = ScheduleBuilder::new(
        Money::from_major(1_200),
        Money::from_major(200),
        5,
        30,
        time.now() + Duration::days(30),
    )
    .build()?;

    println!("=== schedule ===");
    for installment in &schedule.installments {
        println!(
            "  #{} due {} amount {}",
            installment.installment_number,
            installment.due_date.format("%Y-%m-%d"),
            installment.expected_amount
        );
    }

    let mut order = Order::new(
        7,
        "ORD-0007".to_string(),
        OrderType::Layaway,
        Money::from_major(1_200),
        time.now(),
    )
    .with_schedule(schedule);

    // customer pays two and a half installments' worth
    let receipt = processor.process(
        &mut order,
        PaymentRequest::new(Money::from_major(500), PaymentMethod::MobileMoney),
        &time,
        &mut events,
    )?;
    println!("\nsettled installments: {:?}", receipt.settled_installments);

    let summary = SummaryAggregator::summarize(&order, &time);
    println!("progress: {}", summary.payment_progress);
    println!(
        "paid {}/{} installments, next due {:?}",
        summary.paid_installments, summary.total_installments, summary.next_due_date
    );

    // clear the balance
    let balance = order.balance_amount;
    processor.process(
        &mut order,
        PaymentRequest::new(balance, PaymentMethod::Cash),
        &time,
        &mut events,
    )?;

    let summary = SummaryAggregator::summarize(&order, &time);
    println!("\nfully paid: {}, status {:?}", summary.fully_paid, order.status);

    println!("\n=== events ===");
    for event in events.take_events() {
        println!("  {:?}", event);
    }

    Ok(())
}
