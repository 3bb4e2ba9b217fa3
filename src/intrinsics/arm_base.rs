//! `System.Runtime.Intrinsics.Arm.ArmBase` and its nested `Arm64` class.
use super::Gate;
use crate::{
    backend::{ArmBaseOps, BackendKind},
    error::IntrinsicError,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArmBase {
    gate: Gate,
}

impl ArmBase {
    pub(crate) fn new(gate: Gate) -> Self {
        ArmBase { gate }
    }

    pub fn is_supported(&self) -> bool {
        self.gate.is_supported()
    }

    pub fn backend_kind(&self) -> Option<BackendKind> {
        self.gate.kind()
    }

    /// `CLZ`: number of leading zero bits, 32 for zero.
    pub fn leading_zero_count_i32(&self, value: i32) -> Result<i32, IntrinsicError> {
        self.leading_zero_count_u32(value as u32)
    }

    pub fn leading_zero_count_u32(&self, value: u32) -> Result<i32, IntrinsicError> {
        Ok(self.gate.backend()?.leading_zero_count_u32(value))
    }

    /// `RBIT`: bit 0 swaps with bit 31, bit 1 with bit 30, and so on.
    pub fn reverse_element_bits_i32(&self, value: i32) -> Result<i32, IntrinsicError> {
        Ok(self.reverse_element_bits_u32(value as u32)? as i32)
    }

    pub fn reverse_element_bits_u32(&self, value: u32) -> Result<u32, IntrinsicError> {
        Ok(self.gate.backend()?.reverse_element_bits_u32(value))
    }

    /// `YIELD`: a spin-wait hint with no observable result.
    pub fn yield_now(&self) -> Result<(), IntrinsicError> {
        self.gate.backend()?.spin_yield();
        Ok(())
    }
}

/// `ArmBase.Arm64`: 64-bit forms only available on AArch64.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arm64 {
    gate: Gate,
}

impl Arm64 {
    pub(crate) fn new(gate: Gate) -> Self {
        Arm64 { gate }
    }

    pub fn is_supported(&self) -> bool {
        self.gate.is_supported()
    }

    pub fn backend_kind(&self) -> Option<BackendKind> {
        self.gate.kind()
    }

    /// `CLS`: number of bits after the sign bit that equal it.
    pub fn leading_sign_count_i32(&self, value: i32) -> Result<i32, IntrinsicError> {
        Ok(self.gate.backend()?.leading_sign_count_i32(value))
    }

    pub fn leading_sign_count_i64(&self, value: i64) -> Result<i32, IntrinsicError> {
        Ok(self.gate.backend()?.leading_sign_count_i64(value))
    }

    pub fn leading_zero_count_i64(&self, value: i64) -> Result<i32, IntrinsicError> {
        self.leading_zero_count_u64(value as u64)
    }

    pub fn leading_zero_count_u64(&self, value: u64) -> Result<i32, IntrinsicError> {
        Ok(self.gate.backend()?.leading_zero_count_u64(value))
    }

    /// `SMULH`: upper 64 bits of the 128-bit signed product.
    pub fn multiply_high_i64(&self, left: i64, right: i64) -> Result<i64, IntrinsicError> {
        Ok(self.gate.backend()?.multiply_high_i64(left, right))
    }

    /// `UMULH`: upper 64 bits of the 128-bit unsigned product.
    pub fn multiply_high_u64(&self, left: u64, right: u64) -> Result<u64, IntrinsicError> {
        Ok(self.gate.backend()?.multiply_high_u64(left, right))
    }

    pub fn reverse_element_bits_i64(&self, value: i64) -> Result<i64, IntrinsicError> {
        Ok(self.reverse_element_bits_u64(value as u64)? as i64)
    }

    pub fn reverse_element_bits_u64(&self, value: u64) -> Result<u64, IntrinsicError> {
        Ok(self.gate.backend()?.reverse_element_bits_u64(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{backend::Backend, isa::Isa};

    fn software() -> (ArmBase, Arm64) {
        (
            ArmBase::new(Gate::new(Isa::ArmBase, Some(Backend::software()))),
            Arm64::new(Gate::new(Isa::ArmBaseArm64, Some(Backend::software()))),
        )
    }

    #[test]
    fn test_leading_zero_count() {
        let (base, arm64) = software();
        assert_eq!(base.leading_zero_count_u32(0), Ok(32));
        assert_eq!(base.leading_zero_count_i32(-1), Ok(0));
        assert_eq!(base.leading_zero_count_u32(1), Ok(31));
        assert_eq!(arm64.leading_zero_count_u64(0), Ok(64));
        assert_eq!(arm64.leading_zero_count_i64(1 << 40), Ok(23));
    }

    #[test]
    fn test_reverse_element_bits_signed() {
        let (base, arm64) = software();
        assert_eq!(base.reverse_element_bits_i32(1), Ok(i32::MIN));
        assert_eq!(base.reverse_element_bits_u32(0x0000_00F0), Ok(0x0F00_0000));
        assert_eq!(arm64.reverse_element_bits_i64(i64::MIN), Ok(1));
    }

    #[test]
    fn test_yield_returns_unit() {
        let (base, _) = software();
        assert_eq!(base.yield_now(), Ok(()));
    }

    #[test]
    fn test_unsupported_arm64() {
        let arm64 = Arm64::new(Gate::new(Isa::ArmBaseArm64, None));
        assert!(!arm64.is_supported());
        assert_eq!(arm64.backend_kind(), None);
        assert_eq!(
            arm64.multiply_high_u64(2, 3),
            Err(IntrinsicError::PlatformNotSupported {
                isa: Isa::ArmBaseArm64
            })
        );
    }
}
