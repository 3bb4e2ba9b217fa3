//! `System.Runtime.Intrinsics.X86.Sse42` and its nested `X64` class.
use super::Gate;
use crate::{
    backend::{BackendKind, Sse42Ops},
    error::IntrinsicError,
    vector::Vector128,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sse42 {
    gate: Gate,
}

impl Sse42 {
    pub(crate) fn new(gate: Gate) -> Self {
        Sse42 { gate }
    }

    pub fn is_supported(&self) -> bool {
        self.gate.is_supported()
    }

    pub fn backend_kind(&self) -> Option<BackendKind> {
        self.gate.kind()
    }

    /// `PCMPGTQ`: each lane is all ones when `left > right` (signed), else zero.
    pub fn compare_greater_than(
        &self,
        left: Vector128<i64>,
        right: Vector128<i64>,
    ) -> Result<Vector128<i64>, IntrinsicError> {
        let bits = self
            .gate
            .backend()?
            .compare_greater_than_i64x2(left.to_bits(), right.to_bits());
        Ok(Vector128::from_bits(bits))
    }

    /// `CRC32`: accumulates one byte into a CRC-32C value.
    pub fn crc32_u8(&self, crc: u32, data: u8) -> Result<u32, IntrinsicError> {
        Ok(self.gate.backend()?.crc32_u8(crc, data))
    }

    pub fn crc32_u16(&self, crc: u32, data: u16) -> Result<u32, IntrinsicError> {
        Ok(self.gate.backend()?.crc32_u16(crc, data))
    }

    pub fn crc32_u32(&self, crc: u32, data: u32) -> Result<u32, IntrinsicError> {
        Ok(self.gate.backend()?.crc32_u32(crc, data))
    }
}

/// `Sse42.X64`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct X64 {
    gate: Gate,
}

impl X64 {
    pub(crate) fn new(gate: Gate) -> Self {
        X64 { gate }
    }

    pub fn is_supported(&self) -> bool {
        self.gate.is_supported()
    }

    pub fn backend_kind(&self) -> Option<BackendKind> {
        self.gate.kind()
    }

    /// Only the low 32 bits of `crc` are read; the upper 32 bits of the
    /// result are zero.
    pub fn crc32_u64(&self, crc: u64, data: u64) -> Result<u64, IntrinsicError> {
        Ok(self.gate.backend()?.crc32_u64(crc, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{backend::Backend, isa::Isa};

    fn software() -> (Sse42, X64) {
        (
            Sse42::new(Gate::new(Isa::Sse42, Some(Backend::software()))),
            X64::new(Gate::new(Isa::Sse42X64, Some(Backend::software()))),
        )
    }

    #[test]
    fn test_compare_greater_than_lanes() {
        let (sse42, _) = software();
        let result = sse42
            .compare_greater_than(Vector128::create(5, -1), Vector128::create(3, 0))
            .unwrap();
        assert_eq!(result.get_element(0), Some(-1));
        assert_eq!(result.get_element(1), Some(0));

        let equal = Vector128::create(i64::MIN, i64::MAX);
        assert_eq!(
            sse42.compare_greater_than(equal, equal).unwrap().to_bits(),
            0
        );
    }

    #[test]
    fn test_crc32_check_value_through_handle() {
        let (sse42, _) = software();
        let crc = b"123456789"
            .iter()
            .try_fold(!0u32, |crc, &b| sse42.crc32_u8(crc, b))
            .unwrap();
        assert_eq!(!crc, 0xE306_9283);
    }

    #[test]
    fn test_crc32_u64_zero_extends() {
        let (sse42, x64) = software();
        let wide = x64.crc32_u64(0xFFFF_FFFF_1234_5678, 0xAB).unwrap();
        assert_eq!(wide >> 32, 0);
        let low = sse42.crc32_u32(0x1234_5678, 0xAB).unwrap();
        let high = sse42.crc32_u32(low, 0).unwrap();
        assert_eq!(wide, u64::from(high));
    }

    #[test]
    fn test_unsupported_x64() {
        let x64 = X64::new(Gate::new(Isa::Sse42X64, None));
        assert_eq!(
            x64.crc32_u64(0, 0),
            Err(IntrinsicError::PlatformNotSupported { isa: Isa::Sse42X64 })
        );
    }
}
