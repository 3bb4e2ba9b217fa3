//! # dotnet-hwintrinsics
//!
//! The `System.Runtime.Intrinsics` hardware intrinsic classes for dotnet-rs:
//! `ArmBase`, `Bmi1` and `Sse42` with their 64-bit nested classes.
//!
//! Each class reports `IsSupported` from host CPU detection and runtime
//! configuration, and computes its operations either with the real
//! instructions or with portable formulas that give bit-identical results.
//! Calling an operation of an unsupported class fails with
//! [`IntrinsicError::PlatformNotSupported`].
//!
//! ```
//! use dotnet_hwintrinsics::{config::IsaConfig, detect::CpuFeatures, platform::Platform};
//!
//! // Pretend every class is available and compute in software.
//! let platform = Platform::new(CpuFeatures::none(), IsaConfig::default().with_emulation(true));
//! assert_eq!(platform.bmi1().trailing_zero_count_u32(0b1000), Ok(3));
//! ```
//!
//! See [`config`] for the environment variables that are honoured.
use clap::{Parser, Subcommand};
use std::{fmt::Write as _, process::ExitCode};
use tracing_subscriber::EnvFilter;

pub mod backend;
pub mod config;
pub mod detect;
pub mod error;
pub mod intrinsics;
pub mod isa;
pub mod metrics;
pub mod platform;
pub mod registry;
pub mod vector;

use config::{BackendChoice, IsaConfig};
use error::IntrinsicError;
use isa::Isa;
use platform::Platform;
use registry::{IntrinsicRegistry, MethodSignature, Value};

const LOG_ENV: &str = "DOTNET_RS_LOG";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Query and invoke .NET hardware intrinsics on this machine"
)]
pub struct Args {
    /// Overrides DOTNET_RS_INTRINSICS_BACKEND.
    #[arg(long, global = true, value_enum)]
    pub backend: Option<BackendChoice>,
    /// Report every instruction set as supported and compute in software.
    #[arg(long, global = true)]
    pub emulate: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every instruction set with its support and backend.
    Features,
    /// Print the registered method signatures.
    List {
        #[arg(long)]
        isa: Option<Isa>,
    },
    /// Invoke an intrinsic, e.g.
    /// `call "static uint System.Runtime.Intrinsics.X86.Bmi1::AndNot(uint, uint)" 12 10`.
    Call {
        signature: String,
        /// Decimal, 0x or 0b literals; vectors as comma-separated lanes.
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

impl Args {
    pub fn config(&self, base: IsaConfig) -> IsaConfig {
        let config = match self.backend {
            Some(backend) => base.with_backend(backend),
            None => base,
        };
        if self.emulate {
            config.with_emulation(true)
        } else {
            config
        }
    }
}

/// Runs one command against `platform` and returns what it prints.
pub fn run(command: &Command, platform: &Platform) -> Result<String, IntrinsicError> {
    let registry = IntrinsicRegistry::new(platform);
    let mut out = String::new();

    match command {
        Command::Features => {
            let _ = writeln!(out, "{:<16} {:<9} {:<5} BACKEND", "ISA", "SUPPORTED", "CPU");
            for isa in Isa::ALL {
                let backend = platform
                    .backend_kind(isa)
                    .map_or_else(|| "-".to_string(), |kind| kind.to_string());
                let _ = writeln!(
                    out,
                    "{:<16} {:<9} {:<5} {}",
                    isa.to_string(),
                    platform.is_supported(isa),
                    platform.features().has(isa),
                    backend
                );
            }
        }
        Command::List { isa } => {
            for entry in registry
                .entries()
                .filter(|e| isa.map_or(true, |isa| e.isa == isa))
            {
                let _ = writeln!(out, "{}", entry.signature);
            }
        }
        Command::Call { signature, args } => {
            let signature: MethodSignature = signature.parse()?;
            let entry = registry.lookup(&signature)?;
            let parameters = &entry.signature.parameters;
            if parameters.len() != args.len() {
                return Err(IntrinsicError::ArgumentCount {
                    expected: parameters.len(),
                    actual: args.len(),
                });
            }
            let values = parameters
                .iter()
                .zip(args)
                .map(|(ty, text)| Value::parse_as(ty, text))
                .collect::<Result<Vec<_>, _>>()?;
            let result = registry.invoke_signature(&signature, &values)?;
            let _ = writeln!(out, "{result}");
        }
    }

    Ok(out)
}

pub fn run_cli() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let platform = Platform::detect(args.config(IsaConfig::from_env()));
    match run(&args.command, &platform) {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
