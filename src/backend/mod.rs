//! Implementations behind the intrinsic handles.
//!
//! Each instruction set is a trait whose default methods are the portable
//! formulas from [`software`]. [`SoftwareBackend`] takes the defaults as-is;
//! the hardware backend overrides them with the real instructions on the
//! architectures that have them, and is only ever constructed after the host
//! has been probed for the instruction set.
mod hardware;
pub mod software;

pub(crate) use hardware::HardwareBackend;

use crate::isa::Isa;
use enum_dispatch::enum_dispatch;
use std::fmt;

#[enum_dispatch]
pub trait ArmBaseOps {
    fn leading_zero_count_u32(&self, value: u32) -> i32 {
        software::leading_zero_count_u32(value)
    }
    fn reverse_element_bits_u32(&self, value: u32) -> u32 {
        software::reverse_element_bits_u32(value)
    }
    fn spin_yield(&self) {
        software::spin_yield()
    }
    fn leading_sign_count_i32(&self, value: i32) -> i32 {
        software::leading_sign_count_i32(value)
    }
    fn leading_sign_count_i64(&self, value: i64) -> i32 {
        software::leading_sign_count_i64(value)
    }
    fn leading_zero_count_u64(&self, value: u64) -> i32 {
        software::leading_zero_count_u64(value)
    }
    fn multiply_high_i64(&self, left: i64, right: i64) -> i64 {
        software::multiply_high_i64(left, right)
    }
    fn multiply_high_u64(&self, left: u64, right: u64) -> u64 {
        software::multiply_high_u64(left, right)
    }
    fn reverse_element_bits_u64(&self, value: u64) -> u64 {
        software::reverse_element_bits_u64(value)
    }
}

#[enum_dispatch]
pub trait Bmi1Ops {
    fn and_not_u32(&self, left: u32, right: u32) -> u32 {
        software::and_not_u32(left, right)
    }
    fn bit_field_extract_u32(&self, value: u32, control: u16) -> u32 {
        software::bit_field_extract_u32(value, control)
    }
    fn extract_lowest_set_bit_u32(&self, value: u32) -> u32 {
        software::extract_lowest_set_bit_u32(value)
    }
    fn get_mask_up_to_lowest_set_bit_u32(&self, value: u32) -> u32 {
        software::get_mask_up_to_lowest_set_bit_u32(value)
    }
    fn reset_lowest_set_bit_u32(&self, value: u32) -> u32 {
        software::reset_lowest_set_bit_u32(value)
    }
    fn trailing_zero_count_u32(&self, value: u32) -> u32 {
        software::trailing_zero_count_u32(value)
    }
    fn and_not_u64(&self, left: u64, right: u64) -> u64 {
        software::and_not_u64(left, right)
    }
    fn bit_field_extract_u64(&self, value: u64, control: u16) -> u64 {
        software::bit_field_extract_u64(value, control)
    }
    fn extract_lowest_set_bit_u64(&self, value: u64) -> u64 {
        software::extract_lowest_set_bit_u64(value)
    }
    fn get_mask_up_to_lowest_set_bit_u64(&self, value: u64) -> u64 {
        software::get_mask_up_to_lowest_set_bit_u64(value)
    }
    fn reset_lowest_set_bit_u64(&self, value: u64) -> u64 {
        software::reset_lowest_set_bit_u64(value)
    }
    fn trailing_zero_count_u64(&self, value: u64) -> u64 {
        software::trailing_zero_count_u64(value)
    }
}

#[enum_dispatch]
pub trait Sse42Ops {
    fn compare_greater_than_i64x2(&self, left: u128, right: u128) -> u128 {
        software::compare_greater_than_i64x2(left, right)
    }
    fn crc32_u8(&self, crc: u32, data: u8) -> u32 {
        software::crc32_u8(crc, data)
    }
    fn crc32_u16(&self, crc: u32, data: u16) -> u32 {
        software::crc32_u16(crc, data)
    }
    fn crc32_u32(&self, crc: u32, data: u32) -> u32 {
        software::crc32_u32(crc, data)
    }
    fn crc32_u64(&self, crc: u64, data: u64) -> u64 {
        software::crc32_u64(crc, data)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SoftwareBackend;

impl ArmBaseOps for SoftwareBackend {}
impl Bmi1Ops for SoftwareBackend {}
impl Sse42Ops for SoftwareBackend {}

#[enum_dispatch(ArmBaseOps, Bmi1Ops, Sse42Ops)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Backend {
    HardwareBackend,
    SoftwareBackend,
}

impl Backend {
    /// Hardware when the host can run `isa`, `None` otherwise.
    pub fn hardware(isa: Isa) -> Option<Backend> {
        HardwareBackend::probe(isa).map(Backend::from)
    }

    pub fn software() -> Backend {
        Backend::SoftwareBackend(SoftwareBackend)
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::HardwareBackend(_) => BackendKind::Hardware,
            Backend::SoftwareBackend(_) => BackendKind::Software,
        }
    }
}

/// Which implementation an available instruction set is computed with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackendKind {
    Hardware,
    Software,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BackendKind::Hardware => "hardware",
            BackendKind::Software => "software",
        })
    }
}
