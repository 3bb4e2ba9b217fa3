//! Resolution of which instruction sets are supported and how they run.
//!
//! An instruction set is supported when
//! 1. configuration leaves it enabled,
//! 2. the CPU provides it (or emulation is on), and
//! 3. every instruction set it depends on is supported too.
//!
//! The answer is computed once per [`Platform`] and never changes afterwards,
//! matching the managed `IsSupported` properties which the JIT treats as
//! constants.
use crate::{
    backend::{Backend, BackendKind},
    config::{BackendChoice, IsaConfig},
    detect::CpuFeatures,
    intrinsics::{arm_base, bmi1, sse42, ArmBase, Bmi1, Gate, Intrinsics, Sse42},
    isa::{Isa, IsaSet},
};
use std::sync::OnceLock;
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Platform {
    features: CpuFeatures,
    config: IsaConfig,
    intrinsics: Intrinsics,
}

static CURRENT: OnceLock<Platform> = OnceLock::new();

impl Platform {
    pub fn new(features: CpuFeatures, config: IsaConfig) -> Self {
        let supported = resolve_supported(&features, &config);
        let gate = |isa: Isa| Gate::new(isa, select_backend(isa, supported, &config));

        let intrinsics = Intrinsics {
            arm_base: ArmBase::new(gate(Isa::ArmBase)),
            arm_base_arm64: arm_base::Arm64::new(gate(Isa::ArmBaseArm64)),
            bmi1: Bmi1::new(gate(Isa::Bmi1)),
            bmi1_x64: bmi1::X64::new(gate(Isa::Bmi1X64)),
            sse42: Sse42::new(gate(Isa::Sse42)),
            sse42_x64: sse42::X64::new(gate(Isa::Sse42X64)),
            supported,
        };

        for isa in Isa::ALL {
            debug!(
                isa = %isa,
                cpu = features.has(isa),
                enabled = config.is_enabled(isa),
                supported = supported.contains(isa),
                backend = ?intrinsics.backend_kind(isa),
                "resolved instruction set"
            );
        }

        Platform {
            features,
            config,
            intrinsics,
        }
    }

    /// The host CPU under the given configuration.
    pub fn detect(config: IsaConfig) -> Self {
        Self::new(CpuFeatures::detect(), config)
    }

    /// The host CPU under the environment's configuration, resolved on first use.
    pub fn current() -> &'static Platform {
        CURRENT.get_or_init(|| Self::detect(IsaConfig::from_env()))
    }

    pub fn features(&self) -> &CpuFeatures {
        &self.features
    }

    pub fn config(&self) -> &IsaConfig {
        &self.config
    }

    pub fn is_supported(&self, isa: Isa) -> bool {
        self.intrinsics.is_supported(isa)
    }

    pub fn supported(&self) -> IsaSet {
        self.intrinsics.supported
    }

    pub fn backend_kind(&self, isa: Isa) -> Option<BackendKind> {
        self.intrinsics.backend_kind(isa)
    }

    pub fn intrinsics(&self) -> &Intrinsics {
        &self.intrinsics
    }

    pub fn arm_base(&self) -> ArmBase {
        self.intrinsics.arm_base
    }

    pub fn arm64(&self) -> arm_base::Arm64 {
        self.intrinsics.arm_base_arm64
    }

    pub fn bmi1(&self) -> Bmi1 {
        self.intrinsics.bmi1
    }

    pub fn bmi1_x64(&self) -> bmi1::X64 {
        self.intrinsics.bmi1_x64
    }

    pub fn sse42(&self) -> Sse42 {
        self.intrinsics.sse42
    }

    pub fn sse42_x64(&self) -> sse42::X64 {
        self.intrinsics.sse42_x64
    }
}

fn resolve_supported(features: &CpuFeatures, config: &IsaConfig) -> IsaSet {
    let mut supported = IsaSet::empty();
    // `Isa::ALL` lists every class after the classes it requires.
    for isa in Isa::ALL {
        let available = features.has(isa) || (config.emulate && emulable(isa));
        let parents = isa.requires().iter().all(|p| supported.contains(*p));
        if available && parents && config.is_enabled(isa) {
            supported.insert(isa);
        }
    }
    supported
}

/// Emulation never provides the 64-bit-only classes on a 32-bit target.
fn emulable(isa: Isa) -> bool {
    !isa.is_64bit_only() || cfg!(target_pointer_width = "64")
}

fn select_backend(isa: Isa, supported: IsaSet, config: &IsaConfig) -> Option<Backend> {
    if !supported.contains(isa) {
        return None;
    }
    let software_only = match config.backend {
        BackendChoice::Software => true,
        BackendChoice::Auto => config.emulate,
        BackendChoice::Hardware => false,
    };
    if software_only {
        return Some(Backend::software());
    }
    match Backend::hardware(isa) {
        Some(hw) => Some(hw),
        None => {
            if config.backend == BackendChoice::Hardware {
                warn!(isa = %isa, "hardware backend requested but the host lacks it, using software");
            }
            Some(Backend::software())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::host_has;

    fn platform(isas: &[Isa], config: IsaConfig) -> Platform {
        Platform::new(CpuFeatures::from_isas(isas.iter().copied()), config)
    }

    #[test]
    fn test_requires_parents() {
        let p = platform(&[Isa::Sse42, Isa::Sse41], IsaConfig::default());
        // no X86Base, so nothing below it can be supported
        assert!(!p.is_supported(Isa::Sse41));
        assert!(!p.is_supported(Isa::Sse42));

        let p = platform(
            &[Isa::X86Base, Isa::Sse41, Isa::Sse42],
            IsaConfig::default(),
        );
        assert!(p.is_supported(Isa::Sse42));
        assert!(!p.is_supported(Isa::Sse42X64));
    }

    #[test]
    fn test_disabling_parent_disables_children() {
        let isas = [
            Isa::X86Base,
            Isa::X86BaseX64,
            Isa::Sse41,
            Isa::Sse41X64,
            Isa::Sse42,
            Isa::Sse42X64,
        ];
        let p = platform(&isas, IsaConfig::default().with_disabled(Isa::Sse41));
        assert!(p.is_supported(Isa::X86BaseX64));
        assert!(!p.is_supported(Isa::Sse42));
        assert!(!p.is_supported(Isa::Sse42X64));
        assert_eq!(
            p.sse42().crc32_u8(0, 0).unwrap_err(),
            crate::error::IntrinsicError::PlatformNotSupported { isa: Isa::Sse42 }
        );
    }

    #[test]
    fn test_emulation_supports_everything_in_software() {
        let p = platform(
            &[],
            IsaConfig::default()
                .with_emulation(true)
                .with_backend(BackendChoice::Software),
        );
        if cfg!(target_pointer_width = "64") {
            assert_eq!(p.supported(), IsaSet::all());
        }
        for isa in [Isa::ArmBase, Isa::Bmi1, Isa::Sse42] {
            assert_eq!(p.backend_kind(isa), Some(BackendKind::Software));
        }
        assert_eq!(p.backend_kind(Isa::X86Base), None);
    }

    #[test]
    fn test_emulation_respects_pointer_width() {
        let p = platform(&[], IsaConfig::default().with_emulation(true));
        let wide = cfg!(target_pointer_width = "64");
        for isa in Isa::ALL {
            let expected = !isa.is_64bit_only() || wide;
            assert_eq!(p.is_supported(isa), expected, "{isa}");
        }
    }

    #[test]
    fn test_hardware_request_falls_back_to_software() {
        // every host lacks either the ARM or the x86 classes
        assert!(!host_has(Isa::ArmBase) || !host_has(Isa::Bmi1));

        let p = platform(
            &[],
            IsaConfig::default()
                .with_emulation(true)
                .with_backend(BackendChoice::Hardware),
        );
        let gated = [
            Isa::ArmBase,
            Isa::ArmBaseArm64,
            Isa::Bmi1,
            Isa::Bmi1X64,
            Isa::Sse42,
            Isa::Sse42X64,
        ];
        for isa in gated.into_iter().filter(|isa| p.is_supported(*isa)) {
            let expected = if host_has(isa) {
                BackendKind::Hardware
            } else {
                BackendKind::Software
            };
            assert_eq!(p.backend_kind(isa), Some(expected), "{isa}");
        }
        for isa in [Isa::ArmBase, Isa::Bmi1] {
            if !host_has(isa) {
                assert_eq!(p.backend_kind(isa), Some(BackendKind::Software), "{isa}");
            }
        }
    }

    #[test]
    fn test_hw_intrinsics_switch_turns_everything_off() {
        let p = platform(
            &Isa::ALL,
            IsaConfig::default().with_emulation(true).without_hw_intrinsics(),
        );
        assert!(p.supported().is_empty());
    }

    #[test]
    fn test_current_is_stable() {
        let a = Platform::current();
        let b = Platform::current();
        assert!(std::ptr::eq(a, b));
        for isa in Isa::ALL {
            assert_eq!(a.is_supported(isa), b.is_supported(isa));
        }
    }
}
