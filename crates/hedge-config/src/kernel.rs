use anyhow::{anyhow, bail, Result};
use hedge_kernel::{Money, PortfolioSnapshot, Position};
use serde_json::Value;

/// tracing `EnvFilter` directive used when config and `RUST_LOG` are silent.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// How a caller builds snapshots before valuing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputPolicy {
    /// Positions come from a validated upstream; build as given.
    #[default]
    Trust,
    /// Reject empty ids, negative marks and duplicate ids before valuing.
    Validate,
}

impl InputPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputPolicy::Trust => "trust",
            InputPolicy::Validate => "validate",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trust" => Ok(InputPolicy::Trust),
            "validate" => Ok(InputPolicy::Validate),
            other => bail!(
                "invalid kernel.input_policy '{}'. expected one of: trust | validate",
                other
            ),
        }
    }

    /// Build a snapshot under this policy.
    pub fn snapshot(
        &self,
        cash: Money,
        positions: Vec<Position>,
    ) -> Result<PortfolioSnapshot, hedge_kernel::KernelError> {
        match self {
            InputPolicy::Trust => Ok(PortfolioSnapshot::new(cash, positions)),
            InputPolicy::Validate => PortfolioSnapshot::validated(cash, positions),
        }
    }
}

/// Typed kernel settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelConfig {
    pub input_policy: InputPolicy,
    pub log_filter: String,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            input_policy: InputPolicy::Trust,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl KernelConfig {
    /// Build from canonical config JSON (produced by `load_layered_yaml*`).
    ///
    /// All fields optional:
    /// - kernel.input_policy: "trust" | "validate" (default trust)
    /// - kernel.money_scale: if present must equal the kernel's scale (10000)
    /// - logging.filter: EnvFilter directive (default "info")
    pub fn from_config_json(cfg: &Value) -> Result<Self> {
        let input_policy = match cfg.pointer("/kernel/input_policy") {
            None | Some(Value::Null) => InputPolicy::default(),
            Some(Value::String(s)) => InputPolicy::parse(s)?,
            Some(other) => {
                return Err(anyhow!(
                    "kernel.input_policy must be a string (got {other})"
                ))
            }
        };

        match cfg.pointer("/kernel/money_scale") {
            None | Some(Value::Null) => {}
            Some(v) => {
                let scale = v.as_i64();
                if scale != Some(Money::SCALE) {
                    bail!(
                        "CONFIG_SCALE_MISMATCH: kernel.money_scale is {v}, kernel works in {} units per currency unit",
                        Money::SCALE
                    );
                }
            }
        }

        let log_filter = match cfg.pointer("/logging/filter") {
            None | Some(Value::Null) => DEFAULT_LOG_FILTER.to_string(),
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(other) => {
                return Err(anyhow!(
                    "logging.filter must be a non-empty string (got {other})"
                ))
            }
        };

        Ok(Self {
            input_policy,
            log_filter,
        })
    }
}
