/// gateway - form validation through to authoritative payment submission
use chrono::{Duration, TimeZone, Utc};
use layaway_rs::{
    InMemoryGateway, Money, Order, OrderGateway, OrderType, PageRequest, PaymentForm,
    SafeTimeProvider, ScheduleBuilder, TimeSource, Validated,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap(),
    ));

    let schedule = ScheduleBuilder::new(
        Money::from_major(2_000),
        Money::from_major(500),
        6,
        14,
        time.now() + Duration::days(14),
    )
    .build()?;

    let mut gateway = InMemoryGateway::new();
    gateway.insert_order(
        Order::new(
            42,
            "ORD-0042".to_string(),
            OrderType::Layaway,
            Money::from_major(2_000),
            time.now(),
        )
        .with_schedule(schedule),
    );

    // a typo in the amount never reaches the gateway
    let bad = PaymentForm {
        amount: "25O".to_string(),
        payment_method: "CASH".to_string(),
        payment_reference: None,
        notes: None,
    };
    if let Validated::Invalid(rejection) = bad.validate() {
        println!("rejected: {:?}", rejection.field_errors);
    }

    // a clean form dispatches and the gateway re-validates server-side
    let good = PaymentForm {
        amount: "250".to_string(),
        payment_method: "CASH".to_string(),
        payment_reference: Some("TILL-7".to_string()),
        notes: None,
    };
    if let Validated::Valid { data } = good.validate() {
        let updated = gateway.submit_payment(42, data, &time)?;
        println!("paid {}, balance {}", updated.paid_amount, updated.balance_amount);
    }

    let summary = gateway.fetch_summary(42, &time)?;
    println!("progress {}", summary.payment_progress);

    let page = gateway.list_orders(&PageRequest::new(0, 10))?;
    println!("{} order(s) listed", page.total_elements);

    Ok(())
}
