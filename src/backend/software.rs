//! Portable formulas for every instruction in the catalog.
//!
//! These are the reference semantics: the hardware backend must agree with
//! them bit for bit on every input.

/// Reflected CRC-32C (Castagnoli) polynomial used by the SSE4.2 `CRC32` instruction.
pub const CRC32C_POLYNOMIAL: u32 = 0x82F6_3B78;

const CRC32C_TABLE: [u32; 256] = crc32c_table();

const fn crc32c_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ CRC32C_POLYNOMIAL
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Folds `bytes` into `crc` exactly like a sequence of `CRC32 r32, r/m8`
/// instructions: no initial or final inversion.
pub fn crc32c_update(crc: u32, bytes: &[u8]) -> u32 {
    bytes.iter().fold(crc, |crc, &byte| {
        CRC32C_TABLE[((crc ^ u32::from(byte)) & 0xFF) as usize] ^ (crc >> 8)
    })
}

// ArmBase

pub fn leading_zero_count_u32(value: u32) -> i32 {
    value.leading_zeros() as i32
}

pub fn leading_zero_count_u64(value: u64) -> i32 {
    value.leading_zeros() as i32
}

pub fn leading_sign_count_i32(value: i32) -> i32 {
    (value ^ (value >> 1)).leading_zeros() as i32 - 1
}

pub fn leading_sign_count_i64(value: i64) -> i32 {
    (value ^ (value >> 1)).leading_zeros() as i32 - 1
}

pub fn reverse_element_bits_u32(value: u32) -> u32 {
    value.reverse_bits()
}

pub fn reverse_element_bits_u64(value: u64) -> u64 {
    value.reverse_bits()
}

pub fn multiply_high_i64(left: i64, right: i64) -> i64 {
    ((i128::from(left) * i128::from(right)) >> 64) as i64
}

pub fn multiply_high_u64(left: u64, right: u64) -> u64 {
    ((u128::from(left) * u128::from(right)) >> 64) as u64
}

pub fn spin_yield() {
    std::hint::spin_loop();
}

// Bmi1

pub fn and_not_u32(left: u32, right: u32) -> u32 {
    !left & right
}

pub fn and_not_u64(left: u64, right: u64) -> u64 {
    !left & right
}

/// Packs a start bit and a length into a `BEXTR` control word.
pub fn bit_field_control(start: u8, length: u8) -> u16 {
    u16::from(start) | (u16::from(length) << 8)
}

/// Bits `[7:0]` of `control` are the start position, bits `[15:8]` the length.
/// A start past the operand width yields zero; a length of at least the
/// operand width keeps every bit above `start`.
pub fn bit_field_extract_u32(value: u32, control: u16) -> u32 {
    let start = u32::from(control & 0xFF);
    let length = u32::from(control >> 8);
    let shifted = value.checked_shr(start).unwrap_or(0);
    if length >= u32::BITS {
        shifted
    } else {
        shifted & ((1u32 << length) - 1)
    }
}

pub fn bit_field_extract_u64(value: u64, control: u16) -> u64 {
    let start = u32::from(control & 0xFF);
    let length = u32::from(control >> 8);
    let shifted = value.checked_shr(start).unwrap_or(0);
    if length >= u64::BITS {
        shifted
    } else {
        shifted & ((1u64 << length) - 1)
    }
}

pub fn extract_lowest_set_bit_u32(value: u32) -> u32 {
    value & value.wrapping_neg()
}

pub fn extract_lowest_set_bit_u64(value: u64) -> u64 {
    value & value.wrapping_neg()
}

pub fn get_mask_up_to_lowest_set_bit_u32(value: u32) -> u32 {
    value ^ value.wrapping_sub(1)
}

pub fn get_mask_up_to_lowest_set_bit_u64(value: u64) -> u64 {
    value ^ value.wrapping_sub(1)
}

pub fn reset_lowest_set_bit_u32(value: u32) -> u32 {
    value & value.wrapping_sub(1)
}

pub fn reset_lowest_set_bit_u64(value: u64) -> u64 {
    value & value.wrapping_sub(1)
}

pub fn trailing_zero_count_u32(value: u32) -> u32 {
    value.trailing_zeros()
}

pub fn trailing_zero_count_u64(value: u64) -> u64 {
    u64::from(value.trailing_zeros())
}

// Sse42

/// Signed greater-than on both 64-bit lanes; a lane is all ones when true.
pub fn compare_greater_than_i64x2(left: u128, right: u128) -> u128 {
    (0..2).fold(0u128, |acc, lane| {
        let shift = lane * 64;
        let l = (left >> shift) as u64 as i64;
        let r = (right >> shift) as u64 as i64;
        if l > r {
            acc | (u128::from(u64::MAX) << shift)
        } else {
            acc
        }
    })
}

pub fn crc32_u8(crc: u32, data: u8) -> u32 {
    crc32c_update(crc, &[data])
}

pub fn crc32_u16(crc: u32, data: u16) -> u32 {
    crc32c_update(crc, &data.to_le_bytes())
}

pub fn crc32_u32(crc: u32, data: u32) -> u32 {
    crc32c_update(crc, &data.to_le_bytes())
}

/// Only the low 32 bits of `crc` participate; the result is zero-extended.
pub fn crc32_u64(crc: u64, data: u64) -> u64 {
    u64::from(crc32c_update(crc as u32, &data.to_le_bytes()))
}
