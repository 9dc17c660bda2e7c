//! hedge-ffi
//!
//! C ABI over `hedge-kernel`, for hosts that link the kernel as a shared
//! library.
//!
//! - every export returns an `i32` status; `HEDGE_OK` is the only status
//!   under which an out-parameter is written
//! - `positions == NULL` with `len == 0` is an empty book
//! - exports initialize the kernel lazily, so calling `hedge_initialize`
//!   first is allowed but not required
//! - nothing in here panics; kernel arithmetic is checked end to end

use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr;
use std::slice;

use hedge_kernel::{KernelError, Money, Position};
use tracing::debug;

pub const HEDGE_OK: i32 = 0;
pub const HEDGE_OVERFLOW: i32 = 1;
pub const HEDGE_NOT_FOUND: i32 = 2;
pub const HEDGE_NULL_POINTER: i32 = 3;
pub const HEDGE_INVALID_UTF8: i32 = 4;
pub const HEDGE_INVALID_INPUT: i32 = 5;

/// One position as laid out by the host.
///
/// `asset_id` must point at a NUL-terminated UTF-8 string that outlives the
/// call. `mark_price` is in basis points.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct HedgePosition {
    pub asset_id: *const c_char,
    pub quantity: i64,
    pub mark_price: i64,
}

/// Run the kernel's one-time setup. Idempotent and thread-safe.
#[no_mangle]
pub extern "C" fn hedge_initialize() {
    hedge_kernel::initialize_kernel();
}

/// `quantity * mark_price` into `*out`.
///
/// # Safety
/// `out` must be null or valid for a single `i64` write.
#[no_mangle]
pub unsafe extern "C" fn hedge_position_value(quantity: i64, mark_price: i64, out: *mut i64) -> i32 {
    hedge_kernel::initialize_kernel();
    if out.is_null() {
        return HEDGE_NULL_POINTER;
    }
    match hedge_kernel::position_value(quantity, Money::new(mark_price)) {
        Ok(v) => {
            *out = v.raw();
            HEDGE_OK
        }
        Err(e) => status_of(&e),
    }
}

/// Sum of every position's value into `*out`.
///
/// # Safety
/// `positions` must be null (only with `len == 0`) or valid for `len` reads
/// of `HedgePosition`, each with a valid `asset_id`. `out` must be null or
/// valid for a single `i64` write.
#[no_mangle]
pub unsafe extern "C" fn hedge_sum_position_values(
    positions: *const HedgePosition,
    len: usize,
    out: *mut i64,
) -> i32 {
    hedge_kernel::initialize_kernel();
    if out.is_null() {
        return HEDGE_NULL_POINTER;
    }
    let book = match read_positions(positions, len) {
        Ok(b) => b,
        Err(status) => return status,
    };
    match hedge_kernel::sum_position_values(&book) {
        Ok(v) => {
            *out = v.raw();
            HEDGE_OK
        }
        Err(e) => status_of(&e),
    }
}

/// `cash + sum(position values)` into `*out`.
///
/// # Safety
/// Same contract as [`hedge_sum_position_values`].
#[no_mangle]
pub unsafe extern "C" fn hedge_portfolio_nav(
    cash: i64,
    positions: *const HedgePosition,
    len: usize,
    out: *mut i64,
) -> i32 {
    hedge_kernel::initialize_kernel();
    if out.is_null() {
        return HEDGE_NULL_POINTER;
    }
    let book = match read_positions(positions, len) {
        Ok(b) => b,
        Err(status) => return status,
    };
    match hedge_kernel::calc_nav(Money::new(cash), &book) {
        Ok(v) => {
            *out = v.raw();
            HEDGE_OK
        }
        Err(e) => status_of(&e),
    }
}

/// Index of the first position whose id equals `asset_id` byte for byte.
///
/// # Safety
/// `positions` as for [`hedge_sum_position_values`]. `asset_id` must be null
/// or a NUL-terminated string. `out_index` must be null or valid for a
/// single `usize` write.
#[no_mangle]
pub unsafe extern "C" fn hedge_get_position(
    positions: *const HedgePosition,
    len: usize,
    asset_id: *const c_char,
    out_index: *mut usize,
) -> i32 {
    hedge_kernel::initialize_kernel();
    if out_index.is_null() {
        return HEDGE_NULL_POINTER;
    }
    let wanted = match read_str(asset_id) {
        Ok(s) => s,
        Err(status) => return status,
    };
    let book = match read_positions(positions, len) {
        Ok(b) => b,
        Err(status) => return status,
    };
    let found = hedge_kernel::get_position(&book, wanted)
        .and_then(|hit| book.iter().position(|p| ptr::eq(p, hit)));
    match found {
        Some(i) => {
            *out_index = i;
            HEDGE_OK
        }
        None => HEDGE_NOT_FOUND,
    }
}

fn status_of(err: &KernelError) -> i32 {
    debug!(code = err.code(), "ffi call rejected: {err}");
    if err.is_overflow() {
        HEDGE_OVERFLOW
    } else {
        HEDGE_INVALID_INPUT
    }
}

unsafe fn read_str<'a>(p: *const c_char) -> Result<&'a str, i32> {
    if p.is_null() {
        return Err(HEDGE_NULL_POINTER);
    }
    CStr::from_ptr(p).to_str().map_err(|_| HEDGE_INVALID_UTF8)
}

unsafe fn read_positions(ptr: *const HedgePosition, len: usize) -> Result<Vec<Position>, i32> {
    if len == 0 {
        return Ok(Vec::new());
    }
    if ptr.is_null() {
        return Err(HEDGE_NULL_POINTER);
    }
    let raw = slice::from_raw_parts(ptr, len);
    let mut book = Vec::with_capacity(len);
    for p in raw {
        let id = read_str(p.asset_id)?;
        book.push(Position::new(id, p.quantity, Money::new(p.mark_price)));
    }
    Ok(book)
}
