//! Dispatch by .NET method signature, as an interpreter would call it.

use dotnet_hwintrinsics::{
    config::IsaConfig,
    detect::CpuFeatures,
    error::IntrinsicError,
    isa::Isa,
    platform::Platform,
    registry::{IntrinsicRegistry, Value},
    vector::Vector128,
};

const X86: &str = "System.Runtime.Intrinsics.X86";
const ARM: &str = "System.Runtime.Intrinsics.Arm";

fn emulated() -> IntrinsicRegistry {
    let platform = Platform::new(CpuFeatures::none(), IsaConfig::default().with_emulation(true));
    IntrinsicRegistry::new(&platform)
}

#[test]
fn test_is_supported_registered_for_every_class() {
    let platform = Platform::new(
        CpuFeatures::from_isas([Isa::X86Base, Isa::Bmi1]),
        IsaConfig::default(),
    );
    let registry = IntrinsicRegistry::new(&platform);
    for isa in Isa::ALL {
        let sig = format!("static bool {}::get_IsSupported()", isa.class_name());
        assert_eq!(
            registry.invoke(&sig, &[]),
            Ok(Value::Bool(platform.is_supported(isa))),
            "{sig}"
        );
    }
    assert_eq!(
        registry.invoke(&format!("static bool {X86}.Bmi1::get_IsSupported()"), &[]),
        Ok(Value::Bool(true))
    );
    assert_eq!(
        registry.invoke(&format!("static bool {X86}.Sse42::get_IsSupported()"), &[]),
        Ok(Value::Bool(false))
    );
}

#[test]
fn test_dispatch_by_overload() {
    let registry = emulated();
    assert_eq!(
        registry.invoke(
            &format!("static uint {X86}.Sse42::Crc32(uint, byte)"),
            &[Value::U32(0), Value::U8(0)]
        ),
        Ok(Value::U32(0))
    );
    assert_eq!(
        registry.invoke(
            &format!("static uint {X86}.Bmi1::BitFieldExtract(uint, byte, byte)"),
            &[Value::U32(0x1234), Value::U8(4), Value::U8(8)]
        ),
        Ok(Value::U32(0x23))
    );
    assert_eq!(
        registry.invoke(
            &format!("static uint {X86}.Bmi1::BitFieldExtract(uint, ushort)"),
            &[Value::U32(0x1234), Value::U16(0x0804)]
        ),
        Ok(Value::U32(0x23))
    );
    assert_eq!(
        registry.invoke(
            &format!("static int {ARM}.ArmBase::LeadingZeroCount(int)"),
            &[Value::I32(1)]
        ),
        Ok(Value::I32(31))
    );
    if cfg!(target_pointer_width = "64") {
        assert_eq!(
            registry.invoke(
                &format!("static int {ARM}.ArmBase/Arm64::LeadingSignCount(long)"),
                &[Value::I64(-1)]
            ),
            Ok(Value::I32(63))
        );
    }
    assert_eq!(
        registry.invoke(&format!("static void {ARM}.ArmBase::Yield()"), &[]),
        Ok(Value::Void)
    );
}

#[test]
fn test_vector_dispatch() {
    let registry = emulated();
    let sig = format!(
        "static Vector128<long> {X86}.Sse42::CompareGreaterThan(Vector128<long>, Vector128<long>)"
    );
    let result = registry.invoke(
        &sig,
        &[
            Value::V128I64(Vector128::create(2, 2)),
            Value::V128I64(Vector128::create(1, 3)),
        ],
    );
    assert_eq!(result, Ok(Value::V128I64(Vector128::create(-1, 0))));
}

#[test]
fn test_wrong_return_type_is_unknown() {
    let registry = emulated();
    assert!(matches!(
        registry.invoke(
            &format!("static ulong {X86}.Bmi1::TrailingZeroCount(uint)"),
            &[Value::U32(1)]
        ),
        Err(IntrinsicError::UnknownIntrinsic(_))
    ));
}

#[test]
fn test_unsupported_call_is_rejected_and_counted() {
    let platform = Platform::new(CpuFeatures::none(), IsaConfig::default());
    let registry = IntrinsicRegistry::new(&platform);
    let result = registry.invoke(
        &format!("static ulong {X86}.Sse42/X64::Crc32(ulong, ulong)"),
        &[Value::U64(0), Value::U64(0)],
    );
    assert_eq!(
        result,
        Err(IntrinsicError::PlatformNotSupported { isa: Isa::Sse42X64 })
    );
    let snapshot = registry.metrics().snapshot();
    assert_eq!(snapshot.rejected_calls, 1);
    assert_eq!(snapshot.software_calls + snapshot.hardware_calls, 0);
}

#[test]
fn test_successful_calls_are_counted_by_backend() {
    let registry = emulated();
    for value in 0..5u32 {
        registry
            .invoke(
                &format!("static uint {X86}.Bmi1::ResetLowestSetBit(uint)"),
                &[Value::U32(value)],
            )
            .unwrap();
    }
    let snapshot = registry.metrics().snapshot();
    assert_eq!(snapshot.software_calls, 5);
    assert_eq!(snapshot.rejected_calls, 0);
}

#[test]
fn test_listing_covers_the_catalog() {
    let registry = emulated();
    let listed: Vec<String> = registry.signatures().map(ToString::to_string).collect();
    for expected in [
        format!("static int {ARM}.ArmBase::LeadingZeroCount(uint)"),
        format!("static ulong {ARM}.ArmBase/Arm64::MultiplyHigh(ulong, ulong)"),
        format!("static ulong {X86}.Bmi1/X64::TrailingZeroCount(ulong)"),
        format!("static uint {X86}.Sse42::Crc32(uint, ushort)"),
        format!("static bool {X86}.Sse41/X64::get_IsSupported()"),
    ] {
        assert!(listed.contains(&expected), "{expected} missing");
    }
    let operations = registry.entries().filter(|e| !e.is_supported_query()).count();
    assert_eq!(operations, 32);
}
