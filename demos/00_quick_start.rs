/// quick start - minimal example to get started
use layaway_rs::{
    EventStore, Money, Order, OrderType, PaymentMethod, PaymentProcessor, PaymentRequest,
    SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);
    let mut events = EventStore::new();

    // a 1,000 immediate sale
    let mut order = Order::new(
        1,
        "ORD-0001".to_string(),
        OrderType::ImmediateSale,
        Money::from_major(1_000),
        time.now(),
    );

    // take a cash payment at the counter
    let processor = PaymentProcessor::new();
    let receipt = processor.process(
        &mut order,
        PaymentRequest::new(Money::from_major(400), PaymentMethod::Cash),
        &time,
        &mut events,
    )?;

    println!("paid {}, balance {}", receipt.amount_applied, receipt.balance_after);
    println!("{}", serde_json::to_string_pretty(&order)?);

    Ok(())
}
