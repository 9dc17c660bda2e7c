use hedge_config::{load_layered_yaml_from_strings, report_unused_keys, UnusedKeyPolicy};

/// scenario_unused_keys_warn_or_fail
///
/// Validates:
/// 1) Unused keys are detected in WARN mode but do not error.
/// 2) Unused keys cause failure in FAIL mode.
/// 3) Keys the kernel config reads are not flagged.
/// 4) Deterministic ordering of unused pointers.

#[test]
fn warn_mode_reports_unused_keys_without_error() {
    let yaml = r#"
kernel:
  input_policy: validate

pricing:
  vol_surface: "flat"
  greeks: true
"#;

    let loaded = load_layered_yaml_from_strings(&[yaml]).expect("config load must succeed");
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)
        .expect("warn mode must not error");

    assert!(!report.is_clean());
    assert!(report
        .unused_leaf_pointers
        .contains(&"/pricing/vol_surface".to_string()));
    assert!(report
        .unused_leaf_pointers
        .contains(&"/pricing/greeks".to_string()));
}

#[test]
fn fail_mode_errors_on_unused_keys() {
    let yaml = r#"
kernel:
  input_policy: trust
  rounding: half_even
"#;

    let loaded = load_layered_yaml_from_strings(&[yaml]).expect("config load must succeed");
    let result = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail);

    let msg = format!("{:?}", result.expect_err("fail policy must error"));
    assert!(msg.contains("CONFIG_UNUSED_KEYS"));
    assert!(msg.contains("/kernel/rounding"));
}

#[test]
fn consumed_keys_are_clean_under_fail() {
    let yaml = r#"
kernel:
  input_policy: trust
  money_scale: 10000
logging:
  filter: "hedge_kernel=debug,info"
"#;

    let loaded = load_layered_yaml_from_strings(&[yaml]).unwrap();
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail)
        .expect("all keys are consumed");
    assert!(report.is_clean());
}

#[test]
fn empty_config_is_clean() {
    let loaded = load_layered_yaml_from_strings(&["{}"]).unwrap();
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail).unwrap();
    assert!(report.is_clean());
}

#[test]
fn unused_pointers_are_sorted() {
    let yaml = r#"
zeta: 1
alpha: 2
mid:
  b: 3
  a: 4
"#;

    let loaded = load_layered_yaml_from_strings(&[yaml]).unwrap();
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn).unwrap();
    assert_eq!(
        report.unused_leaf_pointers,
        vec!["/alpha", "/mid/a", "/mid/b", "/zeta"]
    );
}
