use std::collections::BTreeMap;

use crate::error::KernelError;
use crate::money::Money;
use crate::valuation;

/// Signed unit count: +long, -short, 0 flat.  Whole units only.
pub type Quantity = i64;

/// A held position, marked at a trusted price.
///
/// mark_price is price per unit in basis points.
/// Fields are private: a `Position` never changes after construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    asset_id: String,
    quantity: Quantity,
    mark_price: Money,
}

impl Position {
    /// Trusting constructor: takes the upstream-validated values as is.
    pub fn new<S: Into<String>>(asset_id: S, quantity: Quantity, mark_price: Money) -> Self {
        Self {
            asset_id: asset_id.into(),
            quantity,
            mark_price,
        }
    }

    /// Validating constructor: rejects an empty `asset_id` and a negative
    /// `mark_price`.
    pub fn try_new<S: Into<String>>(
        asset_id: S,
        quantity: Quantity,
        mark_price: Money,
    ) -> Result<Self, KernelError> {
        let p = Self::new(asset_id, quantity, mark_price);
        p.check(None)?;
        Ok(p)
    }

    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn mark_price(&self) -> Money {
        self.mark_price
    }

    pub fn is_flat(&self) -> bool {
        self.quantity == 0
    }

    /// `quantity * mark_price`, checked.
    pub fn value(&self) -> Result<Money, KernelError> {
        valuation::position_value(self.quantity, self.mark_price)
    }

    fn check(&self, index: Option<usize>) -> Result<(), KernelError> {
        if self.asset_id.is_empty() {
            return Err(KernelError::EmptyAssetId { index });
        }
        if self.mark_price.is_negative() {
            return Err(KernelError::NegativeMarkPrice {
                asset_id: self.asset_id.clone(),
                mark_price: self.mark_price,
            });
        }
        Ok(())
    }
}

/// Cash plus positions: the unit of one valuation request.
///
/// Position order is kept as supplied (for audit/display); it never changes
/// a computed result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PortfolioSnapshot {
    cash: Money,
    positions: Vec<Position>,
}

impl PortfolioSnapshot {
    /// Trusting constructor.  Duplicate or malformed positions are the
    /// caller's problem.
    pub fn new(cash: Money, positions: Vec<Position>) -> Self {
        Self { cash, positions }
    }

    /// Validating constructor.
    ///
    /// Fails on the first empty `asset_id`, negative `mark_price`, or
    /// repeated `asset_id`.  Nothing is merged or dropped: a snapshot either
    /// comes back exactly as given or not at all.
    pub fn validated(cash: Money, positions: Vec<Position>) -> Result<Self, KernelError> {
        check_positions(&positions)?;
        Ok(Self { cash, positions })
    }

    pub fn cash(&self) -> Money {
        self.cash
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Σ quantity * mark_price.
    pub fn positions_value(&self) -> Result<Money, KernelError> {
        valuation::sum_position_values(&self.positions)
    }

    /// cash + Σ quantity * mark_price.
    pub fn nav(&self) -> Result<Money, KernelError> {
        valuation::calc_nav(self.cash, &self.positions)
    }

    pub fn get(&self, asset_id: &str) -> Option<&Position> {
        valuation::get_position(&self.positions, asset_id)
    }

    pub fn into_positions(self) -> Vec<Position> {
        self.positions
    }
}

fn check_positions(positions: &[Position]) -> Result<(), KernelError> {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    for (i, p) in positions.iter().enumerate() {
        p.check(Some(i))?;
        if let Some(&first) = seen.get(p.asset_id()) {
            return Err(KernelError::DuplicateAssetId {
                asset_id: p.asset_id.clone(),
                first,
                second: i,
            });
        }
        seen.insert(p.asset_id(), i);
    }
    Ok(())
}
