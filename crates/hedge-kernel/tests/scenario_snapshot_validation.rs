//! Scenario: opt-in snapshot validation fails loudly
//!
//! The arithmetic primitives trust their input.  `PortfolioSnapshot::validated`
//! is the validating path: it must reject bad input outright and must never
//! merge or drop a duplicate position.

use hedge_kernel::{KernelError, Money, PortfolioSnapshot, Position};

fn p(id: &str, qty: i64, px: i64) -> Position {
    Position::new(id, qty, Money::new(px))
}

#[test]
fn duplicate_asset_id_is_rejected_not_merged() {
    let err = PortfolioSnapshot::validated(
        Money::new(1_000_000),
        vec![p("SPY", 100, 500_000), p("SPY", 50, 500_000)],
    )
    .unwrap_err();

    assert!(!err.is_overflow());
    assert_eq!(err.code(), "KERNEL_INPUT_DUPLICATE_ASSET_ID");
}

#[test]
fn negative_mark_is_rejected() {
    let err = PortfolioSnapshot::validated(Money::ZERO, vec![p("BAD", 1, -500_000)]).unwrap_err();
    assert_eq!(
        err,
        KernelError::NegativeMarkPrice {
            asset_id: "BAD".into(),
            mark_price: Money::new(-500_000),
        }
    );
}

#[test]
fn empty_asset_id_is_rejected() {
    let err = PortfolioSnapshot::validated(Money::ZERO, vec![p("", 1, 1)]).unwrap_err();
    assert_eq!(err, KernelError::EmptyAssetId { index: Some(0) });
}

#[test]
fn trusting_path_computes_with_negative_mark() {
    let snap = PortfolioSnapshot::new(Money::ZERO, vec![p("BAD", 2, -500_000)]);
    assert_eq!(snap.nav(), Ok(Money::new(-1_000_000)));
}

#[test]
fn valid_snapshot_round_trips_unchanged() {
    let positions = vec![p("SPY", 100, 500_000), p("AAPL", -50, 1_800_000), p("CASHLIKE", 0, 0)];
    let snap = PortfolioSnapshot::validated(Money::new(42), positions.clone()).unwrap();
    assert_eq!(snap.clone().into_positions(), positions);
    assert_eq!(snap.nav(), Ok(Money::new(42 + 50_000_000 - 90_000_000)));
}

#[test]
fn validated_empty_book_is_fine() {
    let snap = PortfolioSnapshot::validated(Money::new(7), vec![]).unwrap();
    assert!(snap.is_empty());
    assert_eq!(snap.nav(), Ok(Money::new(7)));
}
