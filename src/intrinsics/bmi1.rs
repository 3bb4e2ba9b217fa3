//! `System.Runtime.Intrinsics.X86.Bmi1` and its nested `X64` class.
use super::Gate;
use crate::{
    backend::{software::bit_field_control, BackendKind, Bmi1Ops},
    error::IntrinsicError,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bmi1 {
    gate: Gate,
}

impl Bmi1 {
    pub(crate) fn new(gate: Gate) -> Self {
        Bmi1 { gate }
    }

    pub fn is_supported(&self) -> bool {
        self.gate.is_supported()
    }

    pub fn backend_kind(&self) -> Option<BackendKind> {
        self.gate.kind()
    }

    /// `ANDN`: `!left & right`.
    pub fn and_not_u32(&self, left: u32, right: u32) -> Result<u32, IntrinsicError> {
        Ok(self.gate.backend()?.and_not_u32(left, right))
    }

    /// `BEXTR` with separate start and length operands.
    pub fn bit_field_extract_u32(
        &self,
        value: u32,
        start: u8,
        length: u8,
    ) -> Result<u32, IntrinsicError> {
        self.bit_field_extract_control_u32(value, bit_field_control(start, length))
    }

    /// `BEXTR` with a packed control word: start in bits 0..8, length in 8..16.
    pub fn bit_field_extract_control_u32(
        &self,
        value: u32,
        control: u16,
    ) -> Result<u32, IntrinsicError> {
        Ok(self.gate.backend()?.bit_field_extract_u32(value, control))
    }

    /// `BLSI`: isolates the lowest set bit.
    pub fn extract_lowest_set_bit_u32(&self, value: u32) -> Result<u32, IntrinsicError> {
        Ok(self.gate.backend()?.extract_lowest_set_bit_u32(value))
    }

    /// `BLSMSK`: ones up to and including the lowest set bit.
    pub fn get_mask_up_to_lowest_set_bit_u32(&self, value: u32) -> Result<u32, IntrinsicError> {
        Ok(self.gate.backend()?.get_mask_up_to_lowest_set_bit_u32(value))
    }

    /// `BLSR`: clears the lowest set bit.
    pub fn reset_lowest_set_bit_u32(&self, value: u32) -> Result<u32, IntrinsicError> {
        Ok(self.gate.backend()?.reset_lowest_set_bit_u32(value))
    }

    /// `TZCNT`: 32 for zero.
    pub fn trailing_zero_count_u32(&self, value: u32) -> Result<u32, IntrinsicError> {
        Ok(self.gate.backend()?.trailing_zero_count_u32(value))
    }
}

/// `Bmi1.X64`: 64-bit forms, only on 64-bit processes.
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

    pub fn and_not_u64(&self, left: u64, right: u64) -> Result<u64, IntrinsicError> {
        Ok(self.gate.backend()?.and_not_u64(left, right))
    }

    pub fn bit_field_extract_u64(
        &self,
        value: u64,
        start: u8,
        length: u8,
    ) -> Result<u64, IntrinsicError> {
        self.bit_field_extract_control_u64(value, bit_field_control(start, length))
    }

    pub fn bit_field_extract_control_u64(
        &self,
        value: u64,
        control: u16,
    ) -> Result<u64, IntrinsicError> {
        Ok(self.gate.backend()?.bit_field_extract_u64(value, control))
    }

    pub fn extract_lowest_set_bit_u64(&self, value: u64) -> Result<u64, IntrinsicError> {
        Ok(self.gate.backend()?.extract_lowest_set_bit_u64(value))
    }

    pub fn get_mask_up_to_lowest_set_bit_u64(&self, value: u64) -> Result<u64, IntrinsicError> {
        Ok(self.gate.backend()?.get_mask_up_to_lowest_set_bit_u64(value))
    }

    pub fn reset_lowest_set_bit_u64(&self, value: u64) -> Result<u64, IntrinsicError> {
        Ok(self.gate.backend()?.reset_lowest_set_bit_u64(value))
    }

    /// `TZCNT`: 64 for zero. The managed signature returns `ulong`.
    pub fn trailing_zero_count_u64(&self, value: u64) -> Result<u64, IntrinsicError> {
        Ok(self.gate.backend()?.trailing_zero_count_u64(value))
    }
}
