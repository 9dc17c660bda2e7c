//! Scenario: concurrent callers
//!
//! Valuation is pure, so many threads valuing the same book (and racing on
//! initialization) must all see identical results with no locking.

use std::sync::Arc;
use std::thread;

use hedge_kernel::{contract, initialize_kernel, Money, PortfolioSnapshot, Position};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn kernel_types_are_send_and_sync() {
    assert_send_sync::<Money>();
    assert_send_sync::<Position>();
    assert_send_sync::<PortfolioSnapshot>();
    assert_send_sync::<hedge_kernel::KernelError>();
}

#[test]
fn threads_agree_on_nav() {
    let positions: Vec<Position> = (0..200)
        .map(|i| Position::new(format!("A{i:03}"), i - 100, Money::new(10_000 + i * 7)))
        .collect();
    let snap = Arc::new(PortfolioSnapshot::validated(Money::new(1_000_000), positions).unwrap());
    let expected = snap.nav().unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let s = Arc::clone(&snap);
            thread::spawn(move || {
                initialize_kernel();
                (0..100).map(|_| s.nav().unwrap()).collect::<Vec<_>>()
            })
        })
        .collect();

    for h in handles {
        for nav in h.join().unwrap() {
            assert_eq!(nav, expected);
        }
    }
    assert_eq!(contract().money_scale, Money::SCALE);
}
