//! Typed handles for each hardware intrinsic class.
//!
//! A handle mirrors one .NET class (`ArmBase`, `Bmi1.X64`, ...): it answers
//! `is_supported` and exposes that class's operations. When the class is not
//! supported every operation returns
//! [`IntrinsicError::PlatformNotSupported`] instead of a value, the same
//! contract as the managed `PlatformNotSupportedException`.
//!
//! Handles are obtained from a [`Platform`](crate::platform::Platform):
//!
//! ```
//! use dotnet_hwintrinsics::platform::Platform;
//!
//! let bmi1 = Platform::current().bmi1();
//! if bmi1.is_supported() {
//!     assert_eq!(bmi1.reset_lowest_set_bit_u32(0b1100).unwrap(), 0b1000);
//! } else {
//!     assert!(bmi1.reset_lowest_set_bit_u32(0b1100).is_err());
//! }
//! ```
pub mod arm_base;
pub mod bmi1;
pub mod sse42;

pub use arm_base::ArmBase;
pub use bmi1::Bmi1;
pub use sse42::Sse42;

use crate::{
    backend::{Backend, BackendKind},
    error::IntrinsicError,
    isa::{Isa, IsaSet},
};

/// Availability of one class plus the backend computing its results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Gate {
    isa: Isa,
    backend: Option<Backend>,
}

impl Gate {
    pub(crate) fn new(isa: Isa, backend: Option<Backend>) -> Self {
        Gate { isa, backend }
    }

    pub(crate) fn is_supported(&self) -> bool {
        self.backend.is_some()
    }

    pub(crate) fn backend(&self) -> Result<&Backend, IntrinsicError> {
        self.backend
            .as_ref()
            .ok_or(IntrinsicError::PlatformNotSupported { isa: self.isa })
    }

    pub(crate) fn kind(&self) -> Option<BackendKind> {
        self.backend.as_ref().map(Backend::kind)
    }
}

/// Every handle of one platform, plus the availability of the base classes
/// that have no operations of their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Intrinsics {
    pub arm_base: ArmBase,
    pub arm_base_arm64: arm_base::Arm64,
    pub bmi1: Bmi1,
    pub bmi1_x64: bmi1::X64,
    pub sse42: Sse42,
    pub sse42_x64: sse42::X64,
    pub(crate) supported: IsaSet,
}

impl Intrinsics {
    pub fn is_supported(&self, isa: Isa) -> bool {
        self.supported.contains(isa)
    }

    /// Backend computing `isa`'s operations, `None` when it is unsupported
    /// or has no operations of its own.
    pub fn backend_kind(&self, isa: Isa) -> Option<BackendKind> {
        match isa {
            Isa::ArmBase => self.arm_base.backend_kind(),
            Isa::ArmBaseArm64 => self.arm_base_arm64.backend_kind(),
            Isa::Bmi1 => self.bmi1.backend_kind(),
            Isa::Bmi1X64 => self.bmi1_x64.backend_kind(),
            Isa::Sse42 => self.sse42.backend_kind(),
            Isa::Sse42X64 => self.sse42_x64.backend_kind(),
            Isa::X86Base | Isa::X86BaseX64 | Isa::Sse41 | Isa::Sse41X64 => None,
        }
    }
}
