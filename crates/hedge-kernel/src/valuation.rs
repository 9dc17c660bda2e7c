//! Valuation primitives.
//!
//! Pure functions of their arguments: no IO, no time, no shared state.  Every
//! multiplication and every addition is checked; the first step whose true
//! result leaves the Money range stops the computation with a
//! [`KernelError`] overflow variant.

use tracing::debug;

use crate::error::KernelError;
use crate::money::Money;
use crate::types::{Position, Quantity};

/// Value of one position: `quantity * mark_price`.
///
/// The sign of `mark_price` is not checked here; a negative mark propagates
/// into the product.  Zero quantity is exactly zero for every price.
pub fn position_value(quantity: Quantity, mark_price: Money) -> Result<Money, KernelError> {
    mark_price.checked_mul_qty(quantity).ok_or_else(|| {
        debug!(quantity, mark_price = mark_price.raw(), "position value overflow");
        KernelError::MulOverflow {
            quantity,
            mark_price,
        }
    })
}

/// Σ position_value over `positions`, folded left to right from zero.
///
/// Every partial sum must fit the Money range.  When they all do, the total
/// is the mathematical sum and therefore the same for any ordering of
/// `positions`.
pub fn sum_position_values(positions: &[Position]) -> Result<Money, KernelError> {
    positions
        .iter()
        .enumerate()
        .try_fold(Money::ZERO, |partial, (index, p)| {
            let addend = position_value(p.quantity(), p.mark_price())?;
            partial.checked_add(addend).ok_or_else(|| {
                debug!(
                    index,
                    partial = partial.raw(),
                    addend = addend.raw(),
                    "position sum overflow"
                );
                KernelError::SumOverflow {
                    index,
                    partial,
                    addend,
                }
            })
        })
}

/// Net asset value: `cash + sum_position_values(positions)`.
pub fn calc_nav(cash: Money, positions: &[Position]) -> Result<Money, KernelError> {
    let positions_value = sum_position_values(positions)?;
    cash.checked_add(positions_value).ok_or_else(|| {
        debug!(
            cash = cash.raw(),
            positions_value = positions_value.raw(),
            "nav overflow"
        );
        KernelError::NavOverflow {
            cash,
            positions_value,
        }
    })
}

/// First position whose `asset_id` equals `asset_id` byte for byte.
///
/// Linear scan; `None` when nothing matches.
pub fn get_position<'a>(positions: &'a [Position], asset_id: &str) -> Option<&'a Position> {
    positions.iter().find(|p| p.asset_id() == asset_id)
}
