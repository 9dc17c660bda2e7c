//! hedge-kernel
//!
//! Fixed-point portfolio accounting kernel.
//! - Money is i64 basis points of currency (1 unit = 10_000)
//! - position value, position-value sum, NAV, position lookup
//! - every multiplication and addition is checked; overflow is an error,
//!   never a wrapped or clamped value
//! - pure deterministic logic (no IO, no time, no shared mutable state)
//! - `oracle`: independent i128 reference implementation for differential
//!   testing
//!
//! ```
//! use hedge_kernel::{calc_nav, Money, Position};
//!
//! let book = [
//!     Position::new("SPY", 100, Money::new(500_000)),
//!     Position::new("AAPL", 50, Money::new(1_800_000)),
//! ];
//! assert_eq!(calc_nav(Money::new(1_000_000), &book), Ok(Money::new(141_000_000)));
//! ```

mod error;
mod init;
mod money;
mod types;
mod valuation;

pub mod oracle;

pub use error::KernelError;
pub use init::{contract, initialize_kernel, is_initialized, KernelContract};
pub use money::Money;
pub use types::{PortfolioSnapshot, Position, Quantity};
pub use valuation::{calc_nav, get_position, position_value, sum_position_values};
