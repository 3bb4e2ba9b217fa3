//! The real instructions, emitted through `std::arch` and `asm!`.
//!
//! Operations that have no dedicated instruction on the current target keep
//! the trait's portable default.
use super::{ArmBaseOps, Bmi1Ops, Sse42Ops};
use crate::{detect, isa::Isa};

/// Only [`HardwareBackend::probe`] creates one, so holding a value means the
/// host can run the instruction set it was probed for. Handles only call the
/// operations of the instruction set they were built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct HardwareBackend {
    _probed: (),
}

impl HardwareBackend {
    pub(crate) fn probe(isa: Isa) -> Option<Self> {
        detect::host_has(isa).then_some(HardwareBackend { _probed: () })
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod x86 {
    #[cfg(target_arch = "x86")]
    use std::arch::x86::*;
    #[cfg(target_arch = "x86_64")]
    use std::arch::x86_64::*;

    #[target_feature(enable = "bmi1")]
    pub unsafe fn and_not_u32(left: u32, right: u32) -> u32 {
        _andn_u32(left, right)
    }

    #[target_feature(enable = "bmi1")]
    pub unsafe fn bit_field_extract_u32(value: u32, control: u16) -> u32 {
        _bextr2_u32(value, u32::from(control))
    }

    #[target_feature(enable = "bmi1")]
    pub unsafe fn extract_lowest_set_bit_u32(value: u32) -> u32 {
        _blsi_u32(value)
    }

    #[target_feature(enable = "bmi1")]
    pub unsafe fn get_mask_up_to_lowest_set_bit_u32(value: u32) -> u32 {
        _blsmsk_u32(value)
    }

    #[target_feature(enable = "bmi1")]
    pub unsafe fn reset_lowest_set_bit_u32(value: u32) -> u32 {
        _blsr_u32(value)
    }

    #[target_feature(enable = "bmi1")]
    pub unsafe fn trailing_zero_count_u32(value: u32) -> u32 {
        _tzcnt_u32(value)
    }

    #[cfg(target_arch = "x86_64")]
    #[target_feature(enable = "bmi1")]
    pub unsafe fn and_not_u64(left: u64, right: u64) -> u64 {
        _andn_u64(left, right)
    }

    #[cfg(target_arch = "x86_64")]
    #[target_feature(enable = "bmi1")]
    pub unsafe fn bit_field_extract_u64(value: u64, control: u16) -> u64 {
        _bextr2_u64(value, u64::from(control))
    }

    #[cfg(target_arch = "x86_64")]
    #[target_feature(enable = "bmi1")]
    pub unsafe fn extract_lowest_set_bit_u64(value: u64) -> u64 {
        _blsi_u64(value)
    }

    #[cfg(target_arch = "x86_64")]
    #[target_feature(enable = "bmi1")]
    pub unsafe fn get_mask_up_to_lowest_set_bit_u64(value: u64) -> u64 {
        _blsmsk_u64(value)
    }

    #[cfg(target_arch = "x86_64")]
    #[target_feature(enable = "bmi1")]
    pub unsafe fn reset_lowest_set_bit_u64(value: u64) -> u64 {
        _blsr_u64(value)
    }

    #[cfg(target_arch = "x86_64")]
    #[target_feature(enable = "bmi1")]
    pub unsafe fn trailing_zero_count_u64(value: u64) -> u64 {
        _tzcnt_u64(value)
    }

    #[target_feature(enable = "sse4.2")]
    pub unsafe fn compare_greater_than_i64x2(left: u128, right: u128) -> u128 {
        let left = std::mem::transmute::<u128, __m128i>(left);
        let right = std::mem::transmute::<u128, __m128i>(right);
        std::mem::transmute::<__m128i, u128>(_mm_cmpgt_epi64(left, right))
    }

    #[target_feature(enable = "sse4.2")]
    pub unsafe fn crc32_u8(crc: u32, data: u8) -> u32 {
        _mm_crc32_u8(crc, data)
    }

    #[target_feature(enable = "sse4.2")]
    pub unsafe fn crc32_u16(crc: u32, data: u16) -> u32 {
        _mm_crc32_u16(crc, data)
    }

    #[target_feature(enable = "sse4.2")]
    pub unsafe fn crc32_u32(crc: u32, data: u32) -> u32 {
        _mm_crc32_u32(crc, data)
    }

    #[cfg(target_arch = "x86_64")]
    #[target_feature(enable = "sse4.2")]
    pub unsafe fn crc32_u64(crc: u64, data: u64) -> u64 {
        _mm_crc32_u64(crc, data)
    }
}

// SAFETY (every `unsafe` block below): a `HardwareBackend` reaches these
// methods only through a handle whose instruction set was confirmed by
// `probe`, which satisfies the `target_feature` requirement of the callee.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
impl Bmi1Ops for HardwareBackend {
    fn and_not_u32(&self, left: u32, right: u32) -> u32 {
        unsafe { x86::and_not_u32(left, right) }
    }
    fn bit_field_extract_u32(&self, value: u32, control: u16) -> u32 {
        unsafe { x86::bit_field_extract_u32(value, control) }
    }
    fn extract_lowest_set_bit_u32(&self, value: u32) -> u32 {
        unsafe { x86::extract_lowest_set_bit_u32(value) }
    }
    fn get_mask_up_to_lowest_set_bit_u32(&self, value: u32) -> u32 {
        unsafe { x86::get_mask_up_to_lowest_set_bit_u32(value) }
    }
    fn reset_lowest_set_bit_u32(&self, value: u32) -> u32 {
        unsafe { x86::reset_lowest_set_bit_u32(value) }
    }
    fn trailing_zero_count_u32(&self, value: u32) -> u32 {
        unsafe { x86::trailing_zero_count_u32(value) }
    }
    #[cfg(target_arch = "x86_64")]
    fn and_not_u64(&self, left: u64, right: u64) -> u64 {
        unsafe { x86::and_not_u64(left, right) }
    }
    #[cfg(target_arch = "x86_64")]
    fn bit_field_extract_u64(&self, value: u64, control: u16) -> u64 {
        unsafe { x86::bit_field_extract_u64(value, control) }
    }
    #[cfg(target_arch = "x86_64")]
    fn extract_lowest_set_bit_u64(&self, value: u64) -> u64 {
        unsafe { x86::extract_lowest_set_bit_u64(value) }
    }
    #[cfg(target_arch = "x86_64")]
    fn get_mask_up_to_lowest_set_bit_u64(&self, value: u64) -> u64 {
        unsafe { x86::get_mask_up_to_lowest_set_bit_u64(value) }
    }
    #[cfg(target_arch = "x86_64")]
    fn reset_lowest_set_bit_u64(&self, value: u64) -> u64 {
        unsafe { x86::reset_lowest_set_bit_u64(value) }
    }
    #[cfg(target_arch = "x86_64")]
    fn trailing_zero_count_u64(&self, value: u64) -> u64 {
        unsafe { x86::trailing_zero_count_u64(value) }
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
impl Sse42Ops for HardwareBackend {
    fn compare_greater_than_i64x2(&self, left: u128, right: u128) -> u128 {
        unsafe { x86::compare_greater_than_i64x2(left, right) }
    }
    fn crc32_u8(&self, crc: u32, data: u8) -> u32 {
        unsafe { x86::crc32_u8(crc, data) }
    }
    fn crc32_u16(&self, crc: u32, data: u16) -> u32 {
        unsafe { x86::crc32_u16(crc, data) }
    }
    fn crc32_u32(&self, crc: u32, data: u32) -> u32 {
        unsafe { x86::crc32_u32(crc, data) }
    }
    #[cfg(target_arch = "x86_64")]
    fn crc32_u64(&self, crc: u64, data: u64) -> u64 {
        unsafe { x86::crc32_u64(crc, data) }
    }
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
impl Bmi1Ops for HardwareBackend {}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
impl Sse42Ops for HardwareBackend {}

// The A64 base instructions are always present, so these need no probe.
#[cfg(target_arch = "aarch64")]
impl ArmBaseOps for HardwareBackend {
    fn leading_zero_count_u32(&self, value: u32) -> i32 {
        let count: u32;
        unsafe {
            std::arch::asm!(
                "clz {0:w}, {1:w}",
                lateout(reg) count,
                in(reg) value,
                options(pure, nomem, nostack, preserves_flags)
            )
        };
        count as i32
    }

    fn reverse_element_bits_u32(&self, value: u32) -> u32 {
        let reversed: u32;
        unsafe {
            std::arch::asm!(
                "rbit {0:w}, {1:w}",
                lateout(reg) reversed,
                in(reg) value,
                options(pure, nomem, nostack, preserves_flags)
            )
        };
        reversed
    }

    fn spin_yield(&self) {
        unsafe { std::arch::asm!("yield", options(nomem, nostack, preserves_flags)) };
    }

    fn leading_sign_count_i32(&self, value: i32) -> i32 {
        let count: u32;
        unsafe {
            std::arch::asm!(
                "cls {0:w}, {1:w}",
                lateout(reg) count,
                in(reg) value,
                options(pure, nomem, nostack, preserves_flags)
            )
        };
        count as i32
    }

    fn leading_sign_count_i64(&self, value: i64) -> i32 {
        let count: u64;
        unsafe {
            std::arch::asm!(
                "cls {0}, {1}",
                lateout(reg) count,
                in(reg) value,
                options(pure, nomem, nostack, preserves_flags)
            )
        };
        count as i32
    }

    fn leading_zero_count_u64(&self, value: u64) -> i32 {
        let count: u64;
        unsafe {
            std::arch::asm!(
                "clz {0}, {1}",
                lateout(reg) count,
                in(reg) value,
                options(pure, nomem, nostack, preserves_flags)
            )
        };
        count as i32
    }

    fn multiply_high_i64(&self, left: i64, right: i64) -> i64 {
        let high: i64;
        unsafe {
            std::arch::asm!(
                "smulh {0}, {1}, {2}",
                lateout(reg) high,
                in(reg) left,
                in(reg) right,
                options(pure, nomem, nostack, preserves_flags)
            )
        };
        high
    }

    fn multiply_high_u64(&self, left: u64, right: u64) -> u64 {
        let high: u64;
        unsafe {
            std::arch::asm!(
                "umulh {0}, {1}, {2}",
                lateout(reg) high,
                in(reg) left,
                in(reg) right,
                options(pure, nomem, nostack, preserves_flags)
            )
        };
        high
    }

    fn reverse_element_bits_u64(&self, value: u64) -> u64 {
        let reversed: u64;
        unsafe {
            std::arch::asm!(
                "rbit {0}, {1}",
                lateout(reg) reversed,
                in(reg) value,
                options(pure, nomem, nostack, preserves_flags)
            )
        };
        reversed
    }
}

// 32-bit ARM keeps the defaults, which already lower to CLZ and RBIT.
#[cfg(not(target_arch = "aarch64"))]
impl ArmBaseOps for HardwareBackend {}
