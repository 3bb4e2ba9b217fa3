//! The hardware backend must agree with the portable formulas bit for bit.
//! Classes the test machine lacks are skipped.

use dotnet_hwintrinsics::{
    backend::BackendKind,
    config::{BackendChoice, IsaConfig},
    detect::CpuFeatures,
    isa::Isa,
    platform::Platform,
    vector::Vector128,
};
use proptest::prelude::*;
use std::sync::OnceLock;

fn hardware() -> &'static Platform {
    static PLATFORM: OnceLock<Platform> = OnceLock::new();
    PLATFORM.get_or_init(|| {
        Platform::new(
            CpuFeatures::detect(),
            IsaConfig::default().with_backend(BackendChoice::Hardware),
        )
    })
}

fn software() -> &'static Platform {
    static PLATFORM: OnceLock<Platform> = OnceLock::new();
    PLATFORM.get_or_init(|| {
        Platform::new(
            CpuFeatures::none(),
            IsaConfig::default()
                .with_emulation(true)
                .with_backend(BackendChoice::Software),
        )
    })
}

fn on_hardware(isa: Isa) -> bool {
    hardware().backend_kind(isa) == Some(BackendKind::Hardware)
}

/// Values with few set bits or few cleared bits reach the edge cases far
/// more often than uniform ones.
fn interesting_u64() -> impl Strategy<Value = u64> {
    prop_oneof![
        any::<u64>(),
        (0u32..64).prop_map(|bit| 1u64 << bit),
        (0u32..64).prop_map(|bit| !(1u64 << bit)),
        Just(0u64),
        Just(u64::MAX),
    ]
}

#[test]
fn test_hardware_is_used_when_detected() {
    for isa in [Isa::ArmBase, Isa::Bmi1, Isa::Sse42] {
        if hardware().features().has(isa) && hardware().is_supported(isa) {
            assert_eq!(hardware().backend_kind(isa), Some(BackendKind::Hardware), "{isa}");
        }
    }
}

proptest! {
    #[test]
    fn prop_arm_base_agrees(value in interesting_u64(), other in interesting_u64()) {
        if on_hardware(Isa::ArmBase) {
            let (hw, sw) = (hardware().arm_base(), software().arm_base());
            let narrow = value as u32;
            prop_assert_eq!(hw.leading_zero_count_u32(narrow), sw.leading_zero_count_u32(narrow));
            prop_assert_eq!(hw.reverse_element_bits_u32(narrow), sw.reverse_element_bits_u32(narrow));
            prop_assert_eq!(
                hw.reverse_element_bits_i32(narrow as i32),
                sw.reverse_element_bits_i32(narrow as i32)
            );
        }
        if on_hardware(Isa::ArmBaseArm64) {
            let (hw, sw) = (hardware().arm64(), software().arm64());
            let signed = value as i64;
            prop_assert_eq!(hw.leading_sign_count_i32(signed as i32), sw.leading_sign_count_i32(signed as i32));
            prop_assert_eq!(hw.leading_sign_count_i64(signed), sw.leading_sign_count_i64(signed));
            prop_assert_eq!(hw.leading_zero_count_u64(value), sw.leading_zero_count_u64(value));
            prop_assert_eq!(hw.multiply_high_u64(value, other), sw.multiply_high_u64(value, other));
            prop_assert_eq!(
                hw.multiply_high_i64(signed, other as i64),
                sw.multiply_high_i64(signed, other as i64)
            );
            prop_assert_eq!(hw.reverse_element_bits_u64(value), sw.reverse_element_bits_u64(value));
        }
    }

    #[test]
    fn prop_bmi1_agrees(
        value in interesting_u64(),
        other in interesting_u64(),
        start in any::<u8>(),
        length in any::<u8>(),
    ) {
        if on_hardware(Isa::Bmi1) {
            let (hw, sw) = (hardware().bmi1(), software().bmi1());
            let (a, b) = (value as u32, other as u32);
            prop_assert_eq!(hw.and_not_u32(a, b), sw.and_not_u32(a, b));
            prop_assert_eq!(
                hw.bit_field_extract_u32(a, start, length),
                sw.bit_field_extract_u32(a, start, length)
            );
            prop_assert_eq!(hw.extract_lowest_set_bit_u32(a), sw.extract_lowest_set_bit_u32(a));
            prop_assert_eq!(
                hw.get_mask_up_to_lowest_set_bit_u32(a),
                sw.get_mask_up_to_lowest_set_bit_u32(a)
            );
            prop_assert_eq!(hw.reset_lowest_set_bit_u32(a), sw.reset_lowest_set_bit_u32(a));
            prop_assert_eq!(hw.trailing_zero_count_u32(a), sw.trailing_zero_count_u32(a));
        }
        if on_hardware(Isa::Bmi1X64) {
            let (hw, sw) = (hardware().bmi1_x64(), software().bmi1_x64());
            prop_assert_eq!(hw.and_not_u64(value, other), sw.and_not_u64(value, other));
            prop_assert_eq!(
                hw.bit_field_extract_u64(value, start, length),
                sw.bit_field_extract_u64(value, start, length)
            );
            prop_assert_eq!(hw.extract_lowest_set_bit_u64(value), sw.extract_lowest_set_bit_u64(value));
            prop_assert_eq!(
                hw.get_mask_up_to_lowest_set_bit_u64(value),
                sw.get_mask_up_to_lowest_set_bit_u64(value)
            );
            prop_assert_eq!(hw.reset_lowest_set_bit_u64(value), sw.reset_lowest_set_bit_u64(value));
            prop_assert_eq!(hw.trailing_zero_count_u64(value), sw.trailing_zero_count_u64(value));
        }
    }

    #[test]
    fn prop_sse42_agrees(crc in any::<u64>(), data in interesting_u64(), lanes in any::<[i64; 4]>()) {
        if on_hardware(Isa::Sse42) {
            let (hw, sw) = (hardware().sse42(), software().sse42());
            let crc32 = crc as u32;
            prop_assert_eq!(hw.crc32_u8(crc32, data as u8), sw.crc32_u8(crc32, data as u8));
            prop_assert_eq!(hw.crc32_u16(crc32, data as u16), sw.crc32_u16(crc32, data as u16));
            prop_assert_eq!(hw.crc32_u32(crc32, data as u32), sw.crc32_u32(crc32, data as u32));

            let left = Vector128::create(lanes[0], lanes[1]);
            let right = Vector128::create(lanes[2], lanes[3]);
            prop_assert_eq!(hw.compare_greater_than(left, right), sw.compare_greater_than(left, right));
            prop_assert_eq!(hw.compare_greater_than(left, left), sw.compare_greater_than(left, left));
        }
        if on_hardware(Isa::Sse42X64) {
            let (hw, sw) = (hardware().sse42_x64(), software().sse42_x64());
            prop_assert_eq!(hw.crc32_u64(crc, data), sw.crc32_u64(crc, data));
        }
    }
}
