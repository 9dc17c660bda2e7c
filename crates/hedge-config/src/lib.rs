//! hedge-config
//!
//! Layered YAML configuration for the kernel's callers (CLI, FFI hosts).
//! - YAML documents merge in order: earlier docs are base, later override
//! - merged tree is converted to JSON, canonicalized (sorted keys) and
//!   SHA-256 hashed, so two runs can prove they used the same settings
//! - unused-key guard: leaves nobody reads are reported or rejected
//! - typed view: [`KernelConfig`]

mod kernel;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs;

pub use kernel::{InputPolicy, KernelConfig, DEFAULT_LOG_FILTER};

/// JSON-pointer prefixes that some code actually reads.
///
/// A leaf under any of these prefixes is consumed; anything else is unused.
/// Keep this list honest: only add a pointer once a reader exists.
///
/// Readers:
/// - `KernelConfig::from_config_json`
///     /kernel/input_policy
///     /kernel/money_scale
///     /logging/filter
pub const CONSUMED_POINTERS: &[&str] = &[
    "/kernel/input_policy",
    "/kernel/money_scale",
    "/logging/filter",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusedKeyReport {
    /// Consumed JSON-pointer prefixes used for this analysis (sorted, unique)
    pub consumed_prefixes: Vec<String>,
    /// Unused leaf pointers (sorted)
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

/// Produce an unused-key report.
/// If `policy == Fail`, returns an error when unused keys exist.
/// If `policy == Warn`, always returns Ok(report).
pub fn report_unused_keys(config_json: &Value, policy: UnusedKeyPolicy) -> Result<UnusedKeyReport> {
    let consumed: BTreeSet<String> = CONSUMED_POINTERS
        .iter()
        .map(|p| normalize_pointer(p))
        .collect();
    let consumed_prefixes: Vec<String> = consumed.into_iter().collect();

    let mut leaves: Vec<String> = Vec::new();
    collect_leaf_pointers(config_json, "", &mut leaves);

    let mut unused: Vec<String> = leaves
        .into_iter()
        .filter(|lp| !consumed_prefixes.iter().any(|cp| is_prefix_pointer(cp, lp)))
        .collect();
    unused.sort();
    unused.dedup();

    let report = UnusedKeyReport {
        consumed_prefixes,
        unused_leaf_pointers: unused,
    };

    if policy == UnusedKeyPolicy::Fail && !report.is_clean() {
        bail!(
            "CONFIG_UNUSED_KEYS: {} unused config leaf key(s) detected. \
            Remove them or register a reader. First few: {}",
            report.unused_leaf_pointers.len(),
            preview_list(&report.unused_leaf_pointers, 12)
        );
    }

    Ok(report)
}

/// Normalize JSON pointer:
/// - must begin with "/"
/// - no trailing "/" unless it's just "/"
fn normalize_pointer(p: &str) -> String {
    let mut s = p.trim().to_string();
    if s.is_empty() {
        return "/".to_string();
    }
    if !s.starts_with('/') {
        s.insert(0, '/');
    }
    while s.ends_with('/') && s.len() > 1 {
        s.pop();
    }
    s
}

/// "/a/b" consumes "/a/b" and "/a/b/c" but not "/a/bc".
fn is_prefix_pointer(prefix: &str, leaf: &str) -> bool {
    if prefix == "/" || leaf == prefix {
        return true;
    }
    leaf.strip_prefix(prefix)
        .map(|rest| rest.starts_with('/'))
        .unwrap_or(false)
}

fn collect_leaf_pointers(v: &Value, prefix: &str, out: &mut Vec<String>) {
    match v {
        Value::Object(map) if !map.is_empty() => {
            for (k, vv) in map {
                let next = format!("{}/{}", prefix, escape_pointer_token(k));
                collect_leaf_pointers(vv, &next, out);
            }
        }
        Value::Array(arr) if !arr.is_empty() => {
            for (i, vv) in arr.iter().enumerate() {
                let next = format!("{}/{}", prefix, i);
                collect_leaf_pointers(vv, &next, out);
            }
        }
        // Root-level empty objects have no leaves worth reporting.
        Value::Object(_) if prefix.is_empty() => {}
        _ => {
            let p = if prefix.is_empty() {
                "/".to_string()
            } else {
                prefix.to_string()
            };
            out.push(p);
        }
    }
}

fn escape_pointer_token(s: &str) -> String {
    s.replace('~', "~0").replace('/', "~1")
}

fn preview_list(items: &[String], n: usize) -> String {
    let take = items.iter().take(n).cloned().collect::<Vec<_>>();
    format!("{:?}", take)
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
}

impl LoadedConfig {
    /// Typed kernel settings from the merged tree.
    pub fn kernel(&self) -> Result<KernelConfig> {
        KernelConfig::from_config_json(&self.config_json)
    }
}

pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedConfig> {
    let mut docs: Vec<String> = Vec::new();
    for p in paths {
        let raw =
            fs::read_to_string(p).with_context(|| format!("failed to read yaml path: {p}"))?;
        docs.push(raw);
    }

    let doc_refs: Vec<&str> = docs.iter().map(|s| s.as_str()).collect();
    load_layered_yaml_from_strings(&doc_refs)
}

pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let mut merged = serde_json::json!({});
    for raw in yaml_docs {
        let v_yaml: serde_yaml::Value = serde_yaml::from_str(raw).context("invalid yaml")?;
        let v_json = serde_json::to_value(v_yaml).context("yaml->json conversion failed")?;
        // An empty document parses as null; it overrides nothing.
        if v_json.is_null() {
            continue;
        }
        merged = deep_merge(merged, v_json);
    }

    let canonical_json = canonicalize_json(&merged)?;
    let config_hash = sha256_hex(canonical_json.as_bytes());
    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json: merged,
    })
}

fn deep_merge(a: Value, b: Value) -> Value {
    match (a, b) {
        (Value::Object(mut a_map), Value::Object(b_map)) => {
            for (k, b_val) in b_map {
                let a_val = a_map.remove(&k).unwrap_or(Value::Null);
                a_map.insert(k, deep_merge(a_val, b_val));
            }
            Value::Object(a_map)
        }
        (_, b_other) => b_other,
    }
}

fn canonicalize_json(v: &Value) -> Result<String> {
    // serde_json's default Map is a BTreeMap, so object keys serialize sorted.
    serde_json::to_string(v).context("canonical json serialize failed")
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
