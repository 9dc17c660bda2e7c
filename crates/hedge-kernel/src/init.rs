//! One-time kernel initialization.
//!
//! The valuation functions need no runtime state.  This hook marks the
//! boundary between the caller's process and the kernel's execution
//! environment: it publishes the kernel's arithmetic contract once, under a
//! `OnceLock`, no matter how many threads race to call it first.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use tracing::info;

use crate::money::Money;

static CONTRACT: OnceLock<KernelContract> = OnceLock::new();
static INIT_RUNS: AtomicUsize = AtomicUsize::new(0);

/// The fixed numeric contract every conforming kernel must share.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KernelContract {
    pub version: &'static str,
    /// Basis points per currency unit.
    pub money_scale: i64,
    pub money_min: Money,
    pub money_max: Money,
}

impl KernelContract {
    const fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            money_scale: Money::SCALE,
            money_min: Money::MIN,
            money_max: Money::MAX,
        }
    }
}

/// Idempotent; safe from any thread, any number of times.
pub fn initialize_kernel() {
    let _ = contract();
}

/// Contract published at initialization (initializes on first use).
pub fn contract() -> &'static KernelContract {
    CONTRACT.get_or_init(|| {
        INIT_RUNS.fetch_add(1, Ordering::SeqCst);
        let c = KernelContract::current();
        info!(
            version = c.version,
            money_scale = c.money_scale,
            "accounting kernel initialized"
        );
        c
    })
}

pub fn is_initialized() -> bool {
    CONTRACT.get().is_some()
}

#[cfg(test)]
pub(crate) fn init_runs() -> usize {
    INIT_RUNS.load(Ordering::SeqCst)
}
