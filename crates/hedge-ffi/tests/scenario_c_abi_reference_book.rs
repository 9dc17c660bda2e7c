//! Scenario: a host drives the reference book through the C ABI.
//!
//! # Invariant under test
//! The C exports give the same answers as the Rust kernel for the book
//! {SPY 100 @ 50.0000, AAPL 50 @ 180.0000, cash 100.0000}, and an overflow
//! leaves the caller's out-parameter untouched.

use std::ffi::CString;
use std::ptr;

use hedge_ffi::{
    hedge_get_position, hedge_initialize, hedge_portfolio_nav, hedge_sum_position_values,
    HedgePosition, HEDGE_NOT_FOUND, HEDGE_OK, HEDGE_OVERFLOW,
};

struct Book {
    _ids: Vec<CString>,
    rows: Vec<HedgePosition>,
}

fn book(legs: &[(&str, i64, i64)]) -> Book {
    let ids: Vec<CString> = legs.iter().map(|(id, _, _)| CString::new(*id).unwrap()).collect();
    let rows = legs
        .iter()
        .zip(&ids)
        .map(|((_, q, p), id)| HedgePosition {
            asset_id: id.as_ptr(),
            quantity: *q,
            mark_price: *p,
        })
        .collect();
    Book { _ids: ids, rows }
}

#[test]
fn nav_and_sum_match_kernel() {
    hedge_initialize();
    let b = book(&[("SPY", 100, 500_000), ("AAPL", 50, 1_800_000)]);

    let mut sum = 0_i64;
    let st = unsafe { hedge_sum_position_values(b.rows.as_ptr(), b.rows.len(), &mut sum) };
    assert_eq!(st, HEDGE_OK);
    assert_eq!(sum, 140_000_000);

    let mut nav = 0_i64;
    let st = unsafe { hedge_portfolio_nav(1_000_000, b.rows.as_ptr(), b.rows.len(), &mut nav) };
    assert_eq!(st, HEDGE_OK);
    assert_eq!(nav, 141_000_000);
}

#[test]
fn lookup_returns_index_of_first_exact_match() {
    let b = book(&[("SPY", 100, 500_000), ("AAPL", 50, 1_800_000), ("AAPL", 1, 1)]);

    let aapl = CString::new("AAPL").unwrap();
    let mut idx = usize::MAX;
    let st = unsafe { hedge_get_position(b.rows.as_ptr(), b.rows.len(), aapl.as_ptr(), &mut idx) };
    assert_eq!(st, HEDGE_OK);
    assert_eq!(idx, 1);

    let tsla = CString::new("TSLA").unwrap();
    let mut idx = usize::MAX;
    let st = unsafe { hedge_get_position(b.rows.as_ptr(), b.rows.len(), tsla.as_ptr(), &mut idx) };
    assert_eq!(st, HEDGE_NOT_FOUND);
    assert_eq!(idx, usize::MAX);

    let lower = CString::new("spy").unwrap();
    let st = unsafe { hedge_get_position(b.rows.as_ptr(), b.rows.len(), lower.as_ptr(), &mut idx) };
    assert_eq!(st, HEDGE_NOT_FOUND);
}

#[test]
fn lookup_in_empty_book_is_not_found() {
    let id = CString::new("SPY").unwrap();
    let mut idx = 0_usize;
    let st = unsafe { hedge_get_position(ptr::null(), 0, id.as_ptr(), &mut idx) };
    assert_eq!(st, HEDGE_NOT_FOUND);
}

#[test]
fn overflowing_book_reports_overflow_and_leaves_out_untouched() {
    let b = book(&[("BIG", 1, i64::MAX), ("ONE", 1, 1)]);

    let mut sum = 42_i64;
    let st = unsafe { hedge_sum_position_values(b.rows.as_ptr(), b.rows.len(), &mut sum) };
    assert_eq!(st, HEDGE_OVERFLOW);
    assert_eq!(sum, 42);

    let fits = book(&[("BIG", 1, i64::MAX)]);
    let mut nav = 42_i64;
    let st = unsafe { hedge_portfolio_nav(1, fits.rows.as_ptr(), fits.rows.len(), &mut nav) };
    assert_eq!(st, HEDGE_OVERFLOW);
    assert_eq!(nav, 42);
}
