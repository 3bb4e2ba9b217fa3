use super::{
    ClrType::{self, Byte, Int, Long, UInt, ULong, UShort, Void},
    Entry, Value,
};
use crate::isa::Isa;

fn vector128_long() -> ClrType {
    ClrType::vector128_of(Long)
}

/// Every registered method: `get_IsSupported` for each class first, then
/// the operations in class order.
pub(super) fn entries() -> Vec<Entry> {
    let mut table: Vec<Entry> = Isa::ALL.into_iter().map(Entry::supported_query).collect();

    table.extend([
        // ArmBase
        Entry::new(Isa::ArmBase, Int, "LeadingZeroCount", &[Int], |i, a| {
            Ok(Value::I32(i.arm_base.leading_zero_count_i32(a.i32(0)?)?))
        }),
        Entry::new(Isa::ArmBase, Int, "LeadingZeroCount", &[UInt], |i, a| {
            Ok(Value::I32(i.arm_base.leading_zero_count_u32(a.u32(0)?)?))
        }),
        Entry::new(Isa::ArmBase, Int, "ReverseElementBits", &[Int], |i, a| {
            Ok(Value::I32(i.arm_base.reverse_element_bits_i32(a.i32(0)?)?))
        }),
        Entry::new(Isa::ArmBase, UInt, "ReverseElementBits", &[UInt], |i, a| {
            Ok(Value::U32(i.arm_base.reverse_element_bits_u32(a.u32(0)?)?))
        }),
        Entry::new(Isa::ArmBase, Void, "Yield", &[], |i, _| {
            i.arm_base.yield_now().map(|()| Value::Void)
        }),
        // ArmBase.Arm64
        Entry::new(Isa::ArmBaseArm64, Int, "LeadingSignCount", &[Int], |i, a| {
            Ok(Value::I32(i.arm_base_arm64.leading_sign_count_i32(a.i32(0)?)?))
        }),
        Entry::new(Isa::ArmBaseArm64, Int, "LeadingSignCount", &[Long], |i, a| {
            Ok(Value::I32(i.arm_base_arm64.leading_sign_count_i64(a.i64(0)?)?))
        }),
        Entry::new(Isa::ArmBaseArm64, Int, "LeadingZeroCount", &[Long], |i, a| {
            Ok(Value::I32(i.arm_base_arm64.leading_zero_count_i64(a.i64(0)?)?))
        }),
        Entry::new(Isa::ArmBaseArm64, Int, "LeadingZeroCount", &[ULong], |i, a| {
            Ok(Value::I32(i.arm_base_arm64.leading_zero_count_u64(a.u64(0)?)?))
        }),
        Entry::new(Isa::ArmBaseArm64, Long, "MultiplyHigh", &[Long, Long], |i, a| {
            let product = i.arm_base_arm64.multiply_high_i64(a.i64(0)?, a.i64(1)?)?;
            Ok(Value::I64(product))
        }),
        Entry::new(Isa::ArmBaseArm64, ULong, "MultiplyHigh", &[ULong, ULong], |i, a| {
            let product = i.arm_base_arm64.multiply_high_u64(a.u64(0)?, a.u64(1)?)?;
            Ok(Value::U64(product))
        }),
        Entry::new(Isa::ArmBaseArm64, Long, "ReverseElementBits", &[Long], |i, a| {
            Ok(Value::I64(i.arm_base_arm64.reverse_element_bits_i64(a.i64(0)?)?))
        }),
        Entry::new(Isa::ArmBaseArm64, ULong, "ReverseElementBits", &[ULong], |i, a| {
            Ok(Value::U64(i.arm_base_arm64.reverse_element_bits_u64(a.u64(0)?)?))
        }),
        // Bmi1
        Entry::new(Isa::Bmi1, UInt, "AndNot", &[UInt, UInt], |i, a| {
            Ok(Value::U32(i.bmi1.and_not_u32(a.u32(0)?, a.u32(1)?)?))
        }),
        Entry::new(Isa::Bmi1, UInt, "BitFieldExtract", &[UInt, Byte, Byte], |i, a| {
            let field = i.bmi1.bit_field_extract_u32(a.u32(0)?, a.u8(1)?, a.u8(2)?)?;
            Ok(Value::U32(field))
        }),
        Entry::new(Isa::Bmi1, UInt, "BitFieldExtract", &[UInt, UShort], |i, a| {
            let field = i.bmi1.bit_field_extract_control_u32(a.u32(0)?, a.u16(1)?)?;
            Ok(Value::U32(field))
        }),
        Entry::new(Isa::Bmi1, UInt, "ExtractLowestSetBit", &[UInt], |i, a| {
            Ok(Value::U32(i.bmi1.extract_lowest_set_bit_u32(a.u32(0)?)?))
        }),
        Entry::new(Isa::Bmi1, UInt, "GetMaskUpToLowestSetBit", &[UInt], |i, a| {
            Ok(Value::U32(i.bmi1.get_mask_up_to_lowest_set_bit_u32(a.u32(0)?)?))
        }),
        Entry::new(Isa::Bmi1, UInt, "ResetLowestSetBit", &[UInt], |i, a| {
            Ok(Value::U32(i.bmi1.reset_lowest_set_bit_u32(a.u32(0)?)?))
        }),
        Entry::new(Isa::Bmi1, UInt, "TrailingZeroCount", &[UInt], |i, a| {
            Ok(Value::U32(i.bmi1.trailing_zero_count_u32(a.u32(0)?)?))
        }),
        // Bmi1.X64
        Entry::new(Isa::Bmi1X64, ULong, "AndNot", &[ULong, ULong], |i, a| {
            Ok(Value::U64(i.bmi1_x64.and_not_u64(a.u64(0)?, a.u64(1)?)?))
        }),
        Entry::new(Isa::Bmi1X64, ULong, "BitFieldExtract", &[ULong, Byte, Byte], |i, a| {
            let field = i.bmi1_x64.bit_field_extract_u64(a.u64(0)?, a.u8(1)?, a.u8(2)?)?;
            Ok(Value::U64(field))
        }),
        Entry::new(Isa::Bmi1X64, ULong, "BitFieldExtract", &[ULong, UShort], |i, a| {
            let field = i.bmi1_x64.bit_field_extract_control_u64(a.u64(0)?, a.u16(1)?)?;
            Ok(Value::U64(field))
        }),
        Entry::new(Isa::Bmi1X64, ULong, "ExtractLowestSetBit", &[ULong], |i, a| {
            Ok(Value::U64(i.bmi1_x64.extract_lowest_set_bit_u64(a.u64(0)?)?))
        }),
        Entry::new(Isa::Bmi1X64, ULong, "GetMaskUpToLowestSetBit", &[ULong], |i, a| {
            Ok(Value::U64(i.bmi1_x64.get_mask_up_to_lowest_set_bit_u64(a.u64(0)?)?))
        }),
        Entry::new(Isa::Bmi1X64, ULong, "ResetLowestSetBit", &[ULong], |i, a| {
            Ok(Value::U64(i.bmi1_x64.reset_lowest_set_bit_u64(a.u64(0)?)?))
        }),
        Entry::new(Isa::Bmi1X64, ULong, "TrailingZeroCount", &[ULong], |i, a| {
            Ok(Value::U64(i.bmi1_x64.trailing_zero_count_u64(a.u64(0)?)?))
        }),
        // Sse42
        Entry::new(
            Isa::Sse42,
            vector128_long(),
            "CompareGreaterThan",
            &[vector128_long(), vector128_long()],
            |i, a| {
                let mask = i.sse42.compare_greater_than(a.v128_i64(0)?, a.v128_i64(1)?)?;
                Ok(Value::V128I64(mask))
            },
        ),
        Entry::new(Isa::Sse42, UInt, "Crc32", &[UInt, Byte], |i, a| {
            Ok(Value::U32(i.sse42.crc32_u8(a.u32(0)?, a.u8(1)?)?))
        }),
        Entry::new(Isa::Sse42, UInt, "Crc32", &[UInt, UShort], |i, a| {
            Ok(Value::U32(i.sse42.crc32_u16(a.u32(0)?, a.u16(1)?)?))
        }),
        Entry::new(Isa::Sse42, UInt, "Crc32", &[UInt, UInt], |i, a| {
            Ok(Value::U32(i.sse42.crc32_u32(a.u32(0)?, a.u32(1)?)?))
        }),
        // Sse42.X64
        Entry::new(Isa::Sse42X64, ULong, "Crc32", &[ULong, ULong], |i, a| {
            Ok(Value::U64(i.sse42_x64.crc32_u64(a.u64(0)?, a.u64(1)?)?))
        }),
    ]);

    table
}
