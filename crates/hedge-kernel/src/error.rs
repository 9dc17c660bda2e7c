use std::fmt;

use crate::money::Money;
use crate::types::Quantity;

/// Everything the kernel can report.
///
/// Two classes:
/// - arithmetic overflow (`MulOverflow`, `SumOverflow`, `NavOverflow`):
///   the true result does not fit the Money range.  Raised by every
///   valuation path.
/// - input violations (`EmptyAssetId`, `NegativeMarkPrice`,
///   `DuplicateAssetId`): raised only by the validating constructors
///   ([`Position::try_new`](crate::Position::try_new),
///   [`PortfolioSnapshot::validated`](crate::PortfolioSnapshot::validated)).
///   The arithmetic primitives trust their input and never produce these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// `quantity * mark_price` left the Money range.
    MulOverflow { quantity: Quantity, mark_price: Money },
    /// Adding the value of the position at `index` to the running total
    /// left the Money range.
    SumOverflow {
        index: usize,
        partial: Money,
        addend: Money,
    },
    /// `cash + positions_value` left the Money range.
    NavOverflow { cash: Money, positions_value: Money },
    /// `index` is `None` when the position was built on its own.
    EmptyAssetId { index: Option<usize> },
    NegativeMarkPrice { asset_id: String, mark_price: Money },
    /// `first` and `second` are positions within the snapshot.
    DuplicateAssetId {
        asset_id: String,
        first: usize,
        second: usize,
    },
}

impl KernelError {
    /// True for the arithmetic class.  Callers reject the snapshot rather
    /// than emit a result.
    pub fn is_overflow(&self) -> bool {
        matches!(
            self,
            Self::MulOverflow { .. } | Self::SumOverflow { .. } | Self::NavOverflow { .. }
        )
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MulOverflow { .. } => "KERNEL_OVERFLOW_MUL",
            Self::SumOverflow { .. } => "KERNEL_OVERFLOW_SUM",
            Self::NavOverflow { .. } => "KERNEL_OVERFLOW_NAV",
            Self::EmptyAssetId { .. } => "KERNEL_INPUT_EMPTY_ASSET_ID",
            Self::NegativeMarkPrice { .. } => "KERNEL_INPUT_NEGATIVE_MARK",
            Self::DuplicateAssetId { .. } => "KERNEL_INPUT_DUPLICATE_ASSET_ID",
        }
    }
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MulOverflow {
                quantity,
                mark_price,
            } => write!(
                f,
                "{}: position value {quantity} x {} out of range",
                self.code(),
                mark_price.raw()
            ),
            Self::SumOverflow {
                index,
                partial,
                addend,
            } => write!(
                f,
                "{}: adding position #{index} ({}) to partial sum {} out of range",
                self.code(),
                addend.raw(),
                partial.raw()
            ),
            Self::NavOverflow {
                cash,
                positions_value,
            } => write!(
                f,
                "{}: cash {} + positions value {} out of range",
                self.code(),
                cash.raw(),
                positions_value.raw()
            ),
            Self::EmptyAssetId { index: Some(i) } => {
                write!(f, "{}: position #{i} has an empty asset_id", self.code())
            }
            Self::EmptyAssetId { index: None } => {
                write!(f, "{}: asset_id must not be empty", self.code())
            }
            Self::NegativeMarkPrice {
                asset_id,
                mark_price,
            } => write!(
                f,
                "{}: {asset_id} mark_price must be >= 0, got {}",
                self.code(),
                mark_price.raw()
            ),
            Self::DuplicateAssetId {
                asset_id,
                first,
                second,
            } => write!(
                f,
                "{}: {asset_id} appears at positions #{first} and #{second}",
                self.code()
            ),
        }
    }
}

impl std::error::Error for KernelError {}
