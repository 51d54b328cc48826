//! Order Lifecycle Integration Tests
//!
//! Drives orders through the wired container on a simulated clock: creation,
//! venue events, fills, expiry and the repository's snapshot history.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::TimeDelta;
use rust_decimal_macros::dec;
use test_case::test_case;

use execution_core::config::load_config_from_string;
use execution_core::domain::order_execution::{
    Fill, OrderEvent, OrderRepository, OrderSide, OrderStatus,
};
use execution_core::domain::shared::{
    ClientOrderId, Currency, FillId, InstrumentId, LiquiditySide, Money, Price, Quantity,
    Timestamp, VenueOrderId,
};
use execution_core::{Clock, Container, CreateOrderDto, ErrorCode, SimulatedClock};

const CONFIG: &str = r#"
identity:
  trader_id: TESTER-000
  strategy_id: S-001
commission:
  model: MAKER_TAKER
  maker_rate: "0.00025"
  taker_rate: "0.00075"
instruments:
  - { id: AUD/USD.SIM, quote_currency: USD, price_precision: 5 }
  - { id: USD/JPY.SIM, quote_currency: JPY, price_precision: 3 }
"#;

struct Harness {
    clock: Arc<SimulatedClock>,
    container: Container,
}

impl Harness {
    fn new() -> Self {
        let config = load_config_from_string(CONFIG).unwrap();
        let clock = Arc::new(SimulatedClock::new(t0()));
        let container = Container::from_config(&config, clock.clone()).unwrap();
        Self { clock, container }
    }

    fn market_buy(&self, qty: i64) -> ClientOrderId {
        self.container
            .create_order_use_case()
            .execute(&CreateOrderDto::market(
                instrument(),
                OrderSide::Buy,
                Quantity::from_i64(qty),
            ))
            .unwrap()
            .client_order_id()
            .clone()
    }

    fn apply(&self, id: &ClientOrderId, event: OrderEvent) -> OrderStatus {
        self.container
            .apply_event_use_case()
            .execute(id, event)
            .unwrap()
            .order
            .status()
    }

    fn accepted(&self, qty: i64) -> ClientOrderId {
        let id = self.market_buy(qty);
        self.apply(&id, OrderEvent::Submitted);
        self.apply(
            &id,
            OrderEvent::Accepted {
                venue_order_id: VenueOrderId::new("V-1"),
            },
        );
        id
    }

    fn status(&self, id: &ClientOrderId) -> OrderStatus {
        self.container
            .order_repo()
            .find_by_id(id)
            .unwrap()
            .unwrap()
            .status()
    }
}

fn t0() -> Timestamp {
    Timestamp::parse("2026-01-19T09:30:00Z").unwrap()
}

fn instrument() -> InstrumentId {
    InstrumentId::new("AUD/USD.SIM")
}

fn fill(id: &str, qty: i64, price: rust_decimal::Decimal) -> OrderEvent {
    OrderEvent::Filled(
        Fill::new(
            FillId::new(id),
            Quantity::from_i64(qty),
            Price::new(price),
            LiquiditySide::Taker,
            Currency::USD,
        )
        .unwrap(),
    )
}

// =============================================================================
// Happy path
// =============================================================================

#[test]
fn market_order_runs_to_filled() {
    let h = Harness::new();

    let order = h
        .container
        .create_order_use_case()
        .execute(&CreateOrderDto::market(
            instrument(),
            OrderSide::Buy,
            Quantity::from_i64(100_000),
        ))
        .unwrap();
    assert_eq!(order.status(), OrderStatus::Initialized);
    assert_eq!(order.created_at(), t0());
    let id = order.client_order_id().clone();

    assert_eq!(h.apply(&id, OrderEvent::Submitted), OrderStatus::Submitted);
    assert_eq!(
        h.apply(
            &id,
            OrderEvent::Accepted {
                venue_order_id: VenueOrderId::new("V-42"),
            }
        ),
        OrderStatus::Accepted
    );

    let fill_time = t0().checked_add(TimeDelta::seconds(5)).unwrap();
    h.clock.advance_to(fill_time).unwrap();
    let report = h
        .container
        .apply_event_use_case()
        .execute(&id, fill("E-1", 100_000, dec!(0.80010)))
        .unwrap();

    assert_eq!(report.order.status(), OrderStatus::Filled);
    assert_eq!(report.order.updated_at(), fill_time);
    assert_eq!(report.order.filled_qty(), Quantity::from_i64(100_000));
    assert_eq!(report.order.avg_px(), Some(Price::new(dec!(0.80010))));
    // 100000 * 0.80010 * 0.00075 = 60.0075, half-even to cents
    assert_eq!(report.commission, Some(Money::new(dec!(60.01), Currency::USD)));
}

#[test]
fn each_order_gets_a_distinct_identity() {
    let h = Harness::new();
    let a = h.market_buy(1);
    let b = h.market_buy(1);
    assert_ne!(a, b);
    assert!(a.as_str().ends_with("-000001"));
    assert!(b.as_str().ends_with("-000002"));
}

#[test]
fn repository_keeps_one_snapshot_per_transition() {
    let h = Harness::new();
    let id = h.accepted(100);
    h.apply(&id, fill("E-1", 100, dec!(1)));

    let history = h.container.order_repo().history(&id).unwrap();
    let statuses: Vec<_> = history.iter().map(|o| o.status()).collect();
    assert_eq!(
        statuses,
        vec![
            OrderStatus::Initialized,
            OrderStatus::Submitted,
            OrderStatus::Accepted,
            OrderStatus::Filled,
        ]
    );
}

#[test]
fn accepted_order_is_found_by_venue_id() {
    let h = Harness::new();
    let id = h.accepted(100);

    let report = h
        .container
        .apply_event_use_case()
        .execute_for_venue_order(&VenueOrderId::new("V-1"), OrderEvent::Canceled)
        .unwrap();

    assert_eq!(report.order.client_order_id(), &id);
    assert_eq!(report.order.status(), OrderStatus::Canceled);
}

// =============================================================================
// Fills
// =============================================================================

#[test]
fn two_fills_accumulate_to_filled() {
    let h = Harness::new();
    let id = h.accepted(100_000);

    assert_eq!(
        h.apply(&id, fill("E-1", 40_000, dec!(0.80000))),
        OrderStatus::PartiallyFilled
    );
    assert_eq!(
        h.apply(&id, fill("E-2", 60_000, dec!(0.80010))),
        OrderStatus::Filled
    );

    let order = h.container.order_repo().find_by_id(&id).unwrap().unwrap();
    assert_eq!(order.fills().len(), 2);
    assert!(order.leaves_qty().is_zero());
    // (40000 * 0.80000 + 60000 * 0.80010) / 100000
    assert_eq!(order.avg_px(), Some(Price::new(dec!(0.80006))));
}

#[test]
fn overfill_rejected_and_state_unchanged() {
    let h = Harness::new();
    let id = h.accepted(100_000);
    h.apply(&id, fill("E-1", 40_000, dec!(0.8)));

    let err = h
        .container
        .apply_event_use_case()
        .execute(&id, fill("E-2", 60_001, dec!(0.8)))
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::Overfill);
    let order = h.container.order_repo().find_by_id(&id).unwrap().unwrap();
    assert_eq!(order.status(), OrderStatus::PartiallyFilled);
    assert_eq!(order.filled_qty(), Quantity::from_i64(40_000));
}

#[test]
fn partial_fill_retained_after_cancel() {
    let h = Harness::new();
    let id = h.accepted(100);
    h.apply(&id, fill("E-1", 30, dec!(1)));

    let report = h
        .container
        .apply_event_use_case()
        .execute(&id, OrderEvent::Canceled)
        .unwrap();

    assert_eq!(report.order.status(), OrderStatus::Canceled);
    assert_eq!(report.order.filled_qty(), Quantity::from_i64(30));
    assert_eq!(report.commission, None);
}

fn accepted_usdjpy(h: &Harness) -> ClientOrderId {
    let id = h
        .container
        .create_order_use_case()
        .execute(&CreateOrderDto::market(
            InstrumentId::new("USD/JPY.SIM"),
            OrderSide::Buy,
            Quantity::from_i64(1_000_000),
        ))
        .unwrap()
        .client_order_id()
        .clone();
    h.apply(&id, OrderEvent::Submitted);
    h.apply(
        &id,
        OrderEvent::Accepted {
            venue_order_id: VenueOrderId::new("V-JPY"),
        },
    );
    id
}

fn usdjpy_fill(quote: Currency) -> OrderEvent {
    OrderEvent::Filled(
        Fill::new(
            FillId::new("E-1"),
            Quantity::from_i64(1_000_000),
            Price::new(dec!(95.000)),
            LiquiditySide::Taker,
            quote,
        )
        .unwrap(),
    )
}

#[test]
fn commission_is_charged_in_the_instrument_quote_currency() {
    let h = Harness::new();
    let id = accepted_usdjpy(&h);

    let report = h
        .container
        .apply_event_use_case()
        .execute(&id, usdjpy_fill(Currency::JPY))
        .unwrap();

    // 1_000_000 * 95.000 * 0.00075
    assert_eq!(report.commission, Some(Money::new(dec!(71250), Currency::JPY)));
}

#[test]
fn fill_quoted_in_the_wrong_currency_is_rejected() {
    let h = Harness::new();
    let id = accepted_usdjpy(&h);

    let err = h
        .container
        .apply_event_use_case()
        .execute(&id, usdjpy_fill(Currency::USD))
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::InvalidCommissionInput);
    assert_eq!(h.status(&id), OrderStatus::Accepted);
    assert_eq!(h.container.order_repo().history(&id).unwrap().len(), 3);
}

#[test]
fn decoded_fill_with_negative_quantity_never_reaches_the_order() {
    let h = Harness::new();
    let id = h.accepted(100);
    let json = r#"{"type":"FILLED","fill_id":"E-1","quantity":"-40","price":"1.0",
        "liquidity_side":"TAKER","quote_currency":"USD"}"#;

    let decoded = serde_json::from_str::<OrderEvent>(json);

    assert!(decoded.is_err());
    assert_eq!(h.status(&id), OrderStatus::Accepted);
    let valid = json.replace("-40", "40");
    let event: OrderEvent = serde_json::from_str(&valid).unwrap();
    assert_eq!(h.apply(&id, event), OrderStatus::PartiallyFilled);
}

// =============================================================================
// Terminal states
// =============================================================================

fn drive_to(h: &Harness, terminal: OrderStatus) -> ClientOrderId {
    match terminal {
        OrderStatus::Rejected => {
            let id = h.market_buy(100);
            h.apply(&id, OrderEvent::Submitted);
            h.apply(
                &id,
                OrderEvent::Rejected {
                    reason: "insufficient margin".to_string(),
                },
            );
            id
        }
        OrderStatus::Canceled => {
            let id = h.accepted(100);
            h.apply(&id, OrderEvent::Canceled);
            id
        }
        OrderStatus::Expired => {
            let id = h.accepted(100);
            h.apply(&id, OrderEvent::Expired);
            id
        }
        _ => {
            let id = h.accepted(100);
            h.apply(&id, fill("E-0", 100, dec!(1)));
            id
        }
    }
}

#[test_case(OrderStatus::Filled, OrderEvent::Canceled ; "filled then canceled")]
#[test_case(OrderStatus::Filled, OrderEvent::Submitted ; "filled then submitted")]
#[test_case(OrderStatus::Canceled, OrderEvent::Expired ; "canceled then expired")]
#[test_case(OrderStatus::Canceled, fill("E-9", 1, dec!(1)) ; "canceled then filled")]
#[test_case(OrderStatus::Rejected, OrderEvent::Accepted { venue_order_id: VenueOrderId::new("V-9") } ; "rejected then accepted")]
#[test_case(OrderStatus::Rejected, OrderEvent::Canceled ; "rejected then canceled")]
#[test_case(OrderStatus::Expired, fill("E-9", 1, dec!(1)) ; "expired then filled")]
#[test_case(OrderStatus::Expired, OrderEvent::Expired ; "expired then expired")]
fn terminal_states_reject_every_event(terminal: OrderStatus, event: OrderEvent) {
    let h = Harness::new();
    let id = drive_to(&h, terminal);
    let versions_before = h.container.order_repo().history(&id).unwrap().len();

    let err = h
        .container
        .apply_event_use_case()
        .execute(&id, event)
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
    assert_eq!(h.status(&id), terminal);
    assert_eq!(
        h.container.order_repo().history(&id).unwrap().len(),
        versions_before
    );
}

#[test]
fn event_for_unknown_order_is_not_found() {
    let h = Harness::new();
    let err = h
        .container
        .apply_event_use_case()
        .execute(
            &ClientOrderId::new("O-TESTER-000.S-001-20260119-999999"),
            OrderEvent::Submitted,
        )
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::OrderNotFound);
}

// =============================================================================
// Expiry
// =============================================================================

#[test]
fn scheduled_expiry_fires_on_the_simulated_clock() {
    let h = Harness::new();
    let id = h.accepted(100);
    let deadline = t0().checked_add(TimeDelta::minutes(15)).unwrap();

    h.container
        .schedule_expiry_use_case()
        .schedule(&id, deadline)
        .unwrap();
    h.clock
        .advance_to(t0().checked_add(TimeDelta::minutes(14)).unwrap())
        .unwrap();
    assert_eq!(h.status(&id), OrderStatus::Accepted);

    h.clock
        .advance_to(t0().checked_add(TimeDelta::hours(1)).unwrap())
        .unwrap();
    let order = h.container.order_repo().find_by_id(&id).unwrap().unwrap();
    assert_eq!(order.status(), OrderStatus::Expired);
    assert_eq!(order.updated_at(), deadline);
    assert_eq!(h.clock.timer_count(), 0);
}

#[test]
fn fill_before_deadline_cancels_expiry() {
    let h = Harness::new();
    let id = h.accepted(100);
    let deadline = t0().checked_add(TimeDelta::minutes(15)).unwrap();
    h.container
        .schedule_expiry_use_case()
        .schedule(&id, deadline)
        .unwrap();

    h.apply(&id, fill("E-1", 100, dec!(1)));
    assert_eq!(h.clock.timer_count(), 0);

    let events = h
        .clock
        .advance_to(t0().checked_add(TimeDelta::hours(1)).unwrap())
        .unwrap();
    assert!(events.is_empty());
    assert_eq!(h.status(&id), OrderStatus::Filled);
}
