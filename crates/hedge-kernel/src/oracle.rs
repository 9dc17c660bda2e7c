//! Reference oracle for differential testing.
//!
//! An independent re-implementation of the valuation contract that shares no
//! arithmetic with [`crate::valuation`]: every product and sum is computed
//! exactly in `i128` (which cannot overflow for i64 operands) and then
//! range-checked against the Money bounds at the same steps the kernel
//! checks.  It works on raw integers only, the way a second implementation
//! in another language would see the data.
//!
//! `None` means "out of the Money range".
//!
//! ```
//! use hedge_kernel::oracle;
//!
//! let legs = [(100, 500_000), (50, 1_800_000)];
//! assert_eq!(oracle::calc_nav(1_000_000, legs), Some(141_000_000));
//! ```

use crate::error::KernelError;
use crate::money::Money;
use crate::types::{PortfolioSnapshot, Position};

const MONEY_MIN: i128 = i64::MIN as i128;
const MONEY_MAX: i128 = i64::MAX as i128;

fn narrow(x: i128) -> Option<i64> {
    if (MONEY_MIN..=MONEY_MAX).contains(&x) {
        Some(x as i64)
    } else {
        None
    }
}

pub fn position_value(quantity: i64, mark_price: i64) -> Option<i64> {
    narrow(quantity as i128 * mark_price as i128)
}

/// Left-to-right sum of `(quantity, mark_price)` legs; each partial sum must
/// stay in range.
pub fn sum_position_values<I>(legs: I) -> Option<i64>
where
    I: IntoIterator<Item = (i64, i64)>,
{
    let mut acc: i128 = 0;
    for (qty, px) in legs {
        let v = position_value(qty, px)?;
        acc = narrow(acc + v as i128)? as i128;
    }
    narrow(acc)
}

pub fn calc_nav<I>(cash: i64, legs: I) -> Option<i64>
where
    I: IntoIterator<Item = (i64, i64)>,
{
    let pv = sum_position_values(legs)?;
    narrow(cash as i128 + pv as i128)
}

/// Index of the first id equal to `asset_id`.
pub fn get_position_index<'a, I>(asset_ids: I, asset_id: &str) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = asset_id.as_bytes();
    asset_ids
        .into_iter()
        .enumerate()
        .filter(|(_, id)| id.len() == needle.len())
        .find(|(_, id)| id.bytes().zip(needle.iter()).all(|(a, &b)| a == b))
        .map(|(i, _)| i)
}

/// Raw `(quantity, mark_price)` legs of a position slice.
pub fn legs(positions: &[Position]) -> Vec<(i64, i64)> {
    positions
        .iter()
        .map(|p| (p.quantity(), p.mark_price().raw()))
        .collect()
}

/// Kernel result next to oracle result for one snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrossCheck {
    pub kernel_positions_value: Result<Money, KernelError>,
    pub oracle_positions_value: Option<i64>,
    pub kernel_nav: Result<Money, KernelError>,
    pub oracle_nav: Option<i64>,
}

impl CrossCheck {
    /// Both sides agree on every value, and on which steps overflow.
    pub fn agrees(&self) -> bool {
        same(&self.kernel_positions_value, self.oracle_positions_value)
            && same(&self.kernel_nav, self.oracle_nav)
    }
}

fn same(kernel: &Result<Money, KernelError>, oracle: Option<i64>) -> bool {
    match (kernel, oracle) {
        (Ok(k), Some(o)) => k.raw() == o,
        (Err(e), None) => e.is_overflow(),
        _ => false,
    }
}

/// Run kernel and oracle over the same snapshot.
pub fn cross_check(snapshot: &PortfolioSnapshot) -> CrossCheck {
    let legs = legs(snapshot.positions());
    CrossCheck {
        kernel_positions_value: snapshot.positions_value(),
        oracle_positions_value: sum_position_values(legs.iter().copied()),
        kernel_nav: snapshot.nav(),
        oracle_nav: calc_nav(snapshot.cash().raw(), legs),
    }
}
