//! Host CPU feature detection.
use crate::isa::{Isa, IsaSet};

/// Instruction sets the executing CPU and process can actually run.
///
/// Detection relies on the standard library's runtime probes, which cache
/// their CPUID results, so calling [`CpuFeatures::detect`] repeatedly is cheap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CpuFeatures {
    available: IsaSet,
}

impl CpuFeatures {
    /// A CPU with none of the known instruction sets.
    pub const fn none() -> Self {
        CpuFeatures {
            available: IsaSet::empty(),
        }
    }

    /// Claims exactly the given instruction sets, for targets other than the
    /// host (for example a guest being emulated). This never causes hardware
    /// instructions to be executed: the hardware backend runs its own probe.
    pub fn from_isas(isas: impl IntoIterator<Item = Isa>) -> Self {
        CpuFeatures {
            available: isas.into_iter().collect(),
        }
    }

    pub fn detect() -> Self {
        let available = Isa::ALL
            .into_iter()
            .filter(|isa| host_has(*isa))
            .collect();
        CpuFeatures { available }
    }

    /// Whether the CPU itself provides `isa`, without looking at the
    /// instruction sets it depends on.
    pub fn has(&self, isa: Isa) -> bool {
        self.available.contains(isa)
    }

    pub fn isas(&self) -> IsaSet {
        self.available
    }
}

/// Probes the host for a single instruction set.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) fn host_has(isa: Isa) -> bool {
    let x64 = cfg!(target_arch = "x86_64");
    match isa {
        // .NET requires SSE2 as the x86 baseline.
        Isa::X86Base => std::arch::is_x86_feature_detected!("sse2"),
        Isa::Sse41 => std::arch::is_x86_feature_detected!("sse4.1"),
        Isa::Sse42 => std::arch::is_x86_feature_detected!("sse4.2"),
        Isa::Bmi1 => std::arch::is_x86_feature_detected!("bmi1"),
        Isa::X86BaseX64 => x64 && host_has(Isa::X86Base),
        Isa::Sse41X64 => x64 && host_has(Isa::Sse41),
        Isa::Sse42X64 => x64 && host_has(Isa::Sse42),
        Isa::Bmi1X64 => x64 && host_has(Isa::Bmi1),
        Isa::ArmBase | Isa::ArmBaseArm64 => false,
    }
}

#[cfg(any(target_arch = "arm", target_arch = "aarch64"))]
pub(crate) fn host_has(isa: Isa) -> bool {
    match isa {
        Isa::ArmBase => true,
        Isa::ArmBaseArm64 => cfg!(target_arch = "aarch64"),
        _ => false,
    }
}

#[cfg(not(any(
    target_arch = "x86",
    target_arch = "x86_64",
    target_arch = "arm",
    target_arch = "aarch64"
)))]
pub(crate) fn host_has(_isa: Isa) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_has_nothing() {
        let features = CpuFeatures::none();
        assert!(Isa::ALL.into_iter().all(|isa| !features.has(isa)));
    }

    #[test]
    fn test_detect_never_mixes_architectures() {
        let features = CpuFeatures::detect();
        let arm = features.has(Isa::ArmBase) || features.has(Isa::ArmBaseArm64);
        let x86 = features.has(Isa::X86Base) || features.has(Isa::Bmi1) || features.has(Isa::Sse42);
        assert!(!(arm && x86));
    }

    #[test]
    #[cfg(target_arch = "x86_64")]
    fn test_x86_64_has_baseline() {
        let features = CpuFeatures::detect();
        assert!(features.has(Isa::X86Base));
        assert!(features.has(Isa::X86BaseX64));
        assert!(!features.has(Isa::ArmBase));
    }

    #[test]
    #[cfg(target_arch = "aarch64")]
    fn test_aarch64_has_arm_base() {
        let features = CpuFeatures::detect();
        assert!(features.has(Isa::ArmBase));
        assert!(features.has(Isa::ArmBaseArm64));
    }
}
