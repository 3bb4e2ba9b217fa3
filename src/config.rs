//! Runtime configuration for hardware intrinsics.
//!
//! Configuration is read from the environment, following the switches the
//! .NET runtime itself understands plus a few knobs specific to dotnet-rs.
//!
//! ## Environment Variables
//!
//! - `DOTNET_EnableHWIntrinsic`: `0` turns every instruction set off.
//! - `DOTNET_EnableArmBase`, `DOTNET_EnableArm64`, `DOTNET_EnableX86Base`,
//!   `DOTNET_EnableSSE41`, `DOTNET_EnableSSE42`, `DOTNET_EnableBMI1`: `0` turns
//!   that instruction set (and everything depending on it) off.
//!   Values are hexadecimal like the runtime's own config; any non-zero value
//!   leaves the instruction set enabled.
//! - `COMPlus_*`: legacy spelling of the above. `DOTNET_*` wins when both are set.
//! - `DOTNET_RS_INTRINSICS_BACKEND`: `auto` (default), `hardware` or `software`.
//! - `DOTNET_RS_INTRINSICS_EMULATE`: `1` or `true` reports every instruction set
//!   as supported regardless of the host CPU and computes results in software.
use crate::{error::IntrinsicError, isa::Isa};
use clap::ValueEnum;
use std::{collections::BTreeSet, env, fmt, str::FromStr};
use tracing::warn;

const PREFIXES: [&str; 2] = ["DOTNET_", "COMPlus_"];
const HW_INTRINSIC_KEY: &str = "EnableHWIntrinsic";
const BACKEND_ENV: &str = "DOTNET_RS_INTRINSICS_BACKEND";
const EMULATE_ENV: &str = "DOTNET_RS_INTRINSICS_EMULATE";

/// Which implementation computes intrinsic results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum BackendChoice {
    /// Hardware when the host CPU has the instruction, software otherwise.
    #[default]
    Auto,
    /// Hardware only; instruction sets the host lacks fall back to software.
    Hardware,
    /// Portable software formulas for everything.
    Software,
}

impl fmt::Display for BackendChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BackendChoice::Auto => "auto",
            BackendChoice::Hardware => "hardware",
            BackendChoice::Software => "software",
        })
    }
}

impl FromStr for BackendChoice {
    type Err = IntrinsicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(BackendChoice::Auto),
            "hardware" | "hw" => Ok(BackendChoice::Hardware),
            "software" | "sw" => Ok(BackendChoice::Software),
            _ => Err(IntrinsicError::InvalidArgument(format!(
                "unknown intrinsics backend {s:?}"
            ))),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IsaConfig {
    hw_intrinsics_disabled: bool,
    disabled: BTreeSet<Isa>,
    pub backend: BackendChoice,
    pub emulate: bool,
}

impl IsaConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup, so callers can
    /// supply variables without touching the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = IsaConfig::default();

        if let Some(false) = read_switch(&lookup, HW_INTRINSIC_KEY) {
            config.hw_intrinsics_disabled = true;
        }
        for isa in Isa::ALL {
            if let Some(key) = isa.config_key() {
                if let Some(false) = read_switch(&lookup, key) {
                    config.disabled.insert(isa);
                }
            }
        }

        if let Some(raw) = lookup(BACKEND_ENV) {
            match raw.parse() {
                Ok(backend) => config.backend = backend,
                Err(e) => warn!("ignoring {BACKEND_ENV}: {e}"),
            }
        }

        if let Some(raw) = lookup(EMULATE_ENV) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" => config.emulate = true,
                "0" | "false" | "" => {}
                other => warn!("ignoring {EMULATE_ENV}: expected 0/1/true/false, got {other:?}"),
            }
        }

        config
    }

    pub fn with_backend(mut self, backend: BackendChoice) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_emulation(mut self, emulate: bool) -> Self {
        self.emulate = emulate;
        self
    }

    pub fn with_disabled(mut self, isa: Isa) -> Self {
        self.disabled.insert(isa);
        self
    }

    pub fn without_hw_intrinsics(mut self) -> Self {
        self.hw_intrinsics_disabled = true;
        self
    }

    /// Whether configuration alone allows `isa`. The class hierarchy is
    /// applied separately by [`crate::platform::Platform`].
    pub fn is_enabled(&self, isa: Isa) -> bool {
        !self.hw_intrinsics_disabled && !self.disabled.contains(&isa)
    }
}

fn read_switch(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    let (name, raw) = PREFIXES
        .iter()
        .map(|prefix| format!("{prefix}{key}"))
        .find_map(|name| lookup(&name).map(|raw| (name, raw)))?;

    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    match u32::from_str_radix(digits, 16) {
        Ok(value) => Some(value != 0),
        Err(_) => {
            warn!("ignoring {name}: expected a hexadecimal value, got {raw:?}");
            None
        }
    }
}
