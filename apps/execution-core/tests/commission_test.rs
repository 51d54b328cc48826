//! Commission Model Integration Tests

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use test_case::test_case;

use execution_core::config::load_config_from_string;
use execution_core::domain::commission::{
    CommissionModel, GenericCommissionModel, MakerTakerCommissionModel, MinimumCommissions,
};
use execution_core::domain::shared::{
    Currency, Instrument, InstrumentId, LiquiditySide, Money, Price, Quantity,
};

fn gbpusd() -> Instrument {
    Instrument::new(InstrumentId::new("GBP/USD.FXCM"), Currency::USD, 5, 0).unwrap()
}

fn taker(model: &dyn CommissionModel, qty: i64, price: Decimal) -> Money {
    model
        .calculate(
            &gbpusd(),
            Quantity::from_i64(qty),
            Price::new(price),
            Decimal::ONE,
            LiquiditySide::Taker,
            Currency::USD,
        )
        .unwrap()
}

#[test_case(dec!(0.00002), 1_000_000, dec!(1.00000), dec!(20.00) ; "generic one million at par")]
#[test_case(dec!(0.00002), 1_000_000, dec!(1.63000), dec!(32.60) ; "generic one million cable")]
#[test_case(dec!(0.00075), 1_000_000, dec!(1.63000), dec!(1222.50) ; "taker rate as flat rate")]
#[test_case(dec!(0.00002), 1, dec!(1.00000), dec!(0.00) ; "tiny fill rounds to zero")]
fn generic_rate_on_notional(rate: Decimal, qty: i64, price: Decimal, expected: Decimal) {
    let model = GenericCommissionModel::new(rate).unwrap();
    assert_eq!(taker(&model, qty, price), Money::new(expected, Currency::USD));
}

#[test_case(LiquiditySide::Maker, dec!(460.00) ; "maker")]
#[test_case(LiquiditySide::Taker, dec!(750.00) ; "taker")]
fn maker_taker_selects_rate_by_liquidity(side: LiquiditySide, expected: Decimal) {
    let model = MakerTakerCommissionModel::new(dec!(0.00046), dec!(0.00075)).unwrap();
    let commission = model
        .calculate(
            &gbpusd(),
            Quantity::from_i64(1_000_000),
            Price::new(dec!(1.00000)),
            Decimal::ONE,
            side,
            Currency::USD,
        )
        .unwrap();
    assert_eq!(commission, Money::new(expected, Currency::USD));
}

#[test]
fn configured_model_matches_direct_construction() {
    let config = load_config_from_string(
        r#"
commission:
  model: MAKER_TAKER
  maker_rate: "0.00046"
  taker_rate: "0.00075"
  minimums:
    - { currency: USD, amount: "2.00" }
"#,
    )
    .unwrap();
    let model = config.commission.build().unwrap();

    assert_eq!(
        taker(model.as_ref(), 1_000_000, dec!(1.63000)),
        Money::new(dec!(1222.50), Currency::USD)
    );
    assert_eq!(
        taker(model.as_ref(), 1_000, dec!(1.00000)),
        Money::new(dec!(2.00), Currency::USD)
    );
}

proptest! {
    #[test]
    fn minimum_is_a_floor_not_a_surcharge(
        qty in 1i64..5_000_000,
        price_ticks in 0i64..300_000,
        rate_bps in 0i64..100,
        minimum_cents in 0i64..10_000,
    ) {
        let price = Decimal::new(price_ticks, 5);
        let rate = Decimal::new(rate_bps, 4);
        let minimum = Money::new(Decimal::new(minimum_cents, 2), Currency::USD);

        let plain = GenericCommissionModel::new(rate).unwrap();
        let floored = GenericCommissionModel::new(rate).unwrap().with_minimums(
            MinimumCommissions::new().with_currency_minimum(minimum).unwrap(),
        );

        let base = taker(&plain, qty, price);
        let clamped = taker(&floored, qty, price);

        prop_assert!(!base.is_negative());
        if base.amount() >= minimum.amount() {
            prop_assert_eq!(clamped, base);
        } else {
            prop_assert_eq!(clamped, minimum);
        }
    }

    #[test]
    fn commission_scales_with_exchange_rate(
        qty in 1i64..1_000_000,
        rate_ppm in 1i64..1_000,
    ) {
        let model = GenericCommissionModel::new(Decimal::new(rate_ppm, 6)).unwrap();
        let in_quote = model
            .calculate(&gbpusd(), Quantity::from_i64(qty), Price::new(Decimal::ONE), Decimal::ONE, LiquiditySide::Taker, Currency::USD)
            .unwrap();
        let doubled = model
            .calculate(&gbpusd(), Quantity::from_i64(qty), Price::new(dec!(2)), dec!(0.5), LiquiditySide::Taker, Currency::USD)
            .unwrap();
        prop_assert_eq!(in_quote, doubled);
    }
}

#[test]
fn invalid_fill_terms_rejected() {
    let model = GenericCommissionModel::default();
    let zero_qty = model.calculate(
        &gbpusd(),
        Quantity::ZERO,
        Price::new(dec!(1)),
        Decimal::ONE,
        LiquiditySide::Taker,
        Currency::USD,
    );
    let zero_rate = model.calculate(
        &gbpusd(),
        Quantity::from_i64(1),
        Price::new(dec!(1)),
        Decimal::ZERO,
        LiquiditySide::Taker,
        Currency::USD,
    );
    assert!(zero_qty.is_err());
    assert!(zero_rate.is_err());
}
