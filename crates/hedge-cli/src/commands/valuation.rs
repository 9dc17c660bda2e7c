//! `hedge value | nav | lookup | check`.

use anyhow::{bail, Result};
use hedge_kernel::{oracle, KernelError, Money};
use std::ptr;
use tracing::info;

use super::{load_snapshot, Settings};

pub fn value(quantity: i64, mark_price: i64) -> Result<()> {
    hedge_kernel::initialize_kernel();
    let v = hedge_kernel::position_value(quantity, Money::new(mark_price))?;
    println!("position_value={}", v.raw());
    println!("position_value_display={}", v);
    Ok(())
}

pub fn nav(snapshot_path: &str, settings: &Settings) -> Result<()> {
    let snap = load_snapshot(snapshot_path, settings)?;
    let positions_value = snap.positions_value()?;
    let nav = snap.nav()?;

    info!(
        positions = snap.positions().len(),
        nav = nav.raw(),
        "nav computed"
    );

    print_settings(settings);
    println!("cash={}", snap.cash().raw());
    println!("positions={}", snap.positions().len());
    println!("positions_value={}", positions_value.raw());
    println!("nav={}", nav.raw());
    println!("nav_display={}", nav);
    Ok(())
}

pub fn lookup(snapshot_path: &str, asset_id: &str, settings: &Settings) -> Result<()> {
    let snap = load_snapshot(snapshot_path, settings)?;

    let hit = snap.get(asset_id).and_then(|p| {
        snap.positions()
            .iter()
            .position(|q| ptr::eq(q, p))
            .map(|i| (i, p))
    });

    match hit {
        Some((index, p)) => {
            println!(
                "found=true index={} asset_id={} quantity={} mark_price={}",
                index,
                p.asset_id(),
                p.quantity(),
                p.mark_price().raw()
            );
        }
        None => {
            println!("found=false asset_id={}", asset_id);
        }
    }
    Ok(())
}

pub fn check(snapshot_path: &str, settings: &Settings) -> Result<()> {
    let snap = load_snapshot(snapshot_path, settings)?;
    let cc = oracle::cross_check(&snap);

    println!("kernel_positions_value={}", show_kernel(&cc.kernel_positions_value));
    println!("oracle_positions_value={}", show_oracle(cc.oracle_positions_value));
    println!("kernel_nav={}", show_kernel(&cc.kernel_nav));
    println!("oracle_nav={}", show_oracle(cc.oracle_nav));

    if !cc.agrees() {
        bail!("ORACLE_DISAGREEMENT: kernel and reference oracle differ for {}", snapshot_path);
    }
    println!("agree=true");
    Ok(())
}

fn print_settings(settings: &Settings) {
    println!("input_policy={}", settings.kernel.input_policy.as_str());
    if let Some(h) = &settings.config_hash {
        println!("config_hash={}", h);
    }
}

fn show_kernel(r: &Result<Money, KernelError>) -> String {
    match r {
        Ok(m) => m.raw().to_string(),
        Err(e) => e.code().to_string(),
    }
}

fn show_oracle(v: Option<i64>) -> String {
    match v {
        Some(x) => x.to_string(),
        None => "overflow".to_string(),
    }
}
