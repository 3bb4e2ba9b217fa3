//! Dispatch of intrinsics by .NET method signature.
//!
//! An interpreter that meets a call to
//! `static uint System.Runtime.Intrinsics.X86.Bmi1::AndNot(uint, uint)` hands
//! the signature and its evaluation-stack arguments to
//! [`IntrinsicRegistry::invoke`], which validates them, forwards to the typed
//! handle of the platform and wraps the result back into a [`Value`].
//! `get_IsSupported()` is registered for every instruction set and never
//! fails; every other entry fails with
//! [`IntrinsicError::PlatformNotSupported`] on a platform lacking its class.
mod signature;
mod table;

pub use signature::{ClrType, MethodSignature};

use crate::{
    error::IntrinsicError,
    intrinsics::Intrinsics,
    isa::Isa,
    metrics::IntrinsicMetrics,
    platform::Platform,
    vector::Vector128,
};
use std::{collections::HashMap, fmt};
use tracing::trace;

/// A managed value crossing the registry boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Value {
    Void,
    Bool(bool),
    U8(u8),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    V128I64(Vector128<i64>),
}

impl Value {
    pub fn clr_type(&self) -> ClrType {
        match self {
            Value::Void => ClrType::Void,
            Value::Bool(_) => ClrType::Bool,
            Value::U8(_) => ClrType::Byte,
            Value::U16(_) => ClrType::UShort,
            Value::I32(_) => ClrType::Int,
            Value::U32(_) => ClrType::UInt,
            Value::I64(_) => ClrType::Long,
            Value::U64(_) => ClrType::ULong,
            Value::V128I64(_) => ClrType::vector128_of(ClrType::Long),
        }
    }

    /// Parses a textual literal as a value of type `ty`.
    ///
    /// Integers may be decimal (optionally negative), `0x` hexadecimal or
    /// `0b` binary; vectors are comma-separated lanes.
    pub fn parse_as(ty: &ClrType, text: &str) -> Result<Value, IntrinsicError> {
        let text = text.trim();
        Ok(match ty {
            ClrType::Bool => match text.to_ascii_lowercase().as_str() {
                "true" | "1" => Value::Bool(true),
                "false" | "0" => Value::Bool(false),
                _ => {
                    return Err(IntrinsicError::InvalidArgument(format!(
                        "{text:?} is not a bool"
                    )))
                }
            },
            ClrType::Byte => Value::U8(parse_in_range(ty, text)?),
            ClrType::UShort => Value::U16(parse_in_range(ty, text)?),
            ClrType::Int => Value::I32(parse_in_range(ty, text)?),
            ClrType::UInt => Value::U32(parse_in_range(ty, text)?),
            ClrType::Long => Value::I64(parse_in_range(ty, text)?),
            ClrType::ULong => Value::U64(parse_in_range(ty, text)?),
            ClrType::Vector128(element) if **element == ClrType::Long => {
                let lanes = text
                    .trim_start_matches('<')
                    .trim_end_matches('>')
                    .split(',')
                    .map(|lane| parse_in_range(element, lane))
                    .collect::<Result<Vec<i64>, _>>()?;
                let vector = Vector128::from_lanes(&lanes).ok_or_else(|| {
                    IntrinsicError::InvalidArgument(format!(
                        "{ty} needs {} lanes, got {}",
                        Vector128::<i64>::lane_count(),
                        lanes.len()
                    ))
                })?;
                Value::V128I64(vector)
            }
            ClrType::Void | ClrType::Vector128(_) => {
                return Err(IntrinsicError::InvalidArgument(format!(
                    "cannot pass a {ty} argument"
                )))
            }
        })
    }
}

fn parse_in_range<T: TryFrom<i128>>(ty: &ClrType, text: &str) -> Result<T, IntrinsicError> {
    let text = text.trim();
    T::try_from(parse_integer(text)?)
        .map_err(|_| IntrinsicError::InvalidArgument(format!("{text:?} does not fit in {ty}")))
}

fn parse_integer(text: &str) -> Result<i128, IntrinsicError> {
    let text = text.trim().replace('_', "");
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.as_str()),
    };
    let lower = digits.to_ascii_lowercase();
    let parsed = if let Some(hex) = lower.strip_prefix("0x") {
        i128::from_str_radix(hex, 16)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        i128::from_str_radix(bin, 2)
    } else {
        lower.parse::<i128>()
    };
    let magnitude = parsed
        .map_err(|e| IntrinsicError::InvalidArgument(format!("{text:?}: {e}")))?;
    Ok(if negative { -magnitude } else { magnitude })
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => f.write_str("void"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v}"),
            Value::U16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::V128I64(v) => write!(f, "{v}"),
        }
    }
}

/// Arguments already checked against the entry's parameter list.
pub struct Arguments<'a> {
    values: &'a [Value],
}

macro_rules! argument_getters {
    ($($name:ident: $variant:ident => $ty:ty),* $(,)?) => {
        impl Arguments<'_> {
            $(
                pub fn $name(&self, index: usize) -> Result<$ty, IntrinsicError> {
                    match self.values.get(index) {
                        Some(Value::$variant(v)) => Ok(*v),
                        other => Err(IntrinsicError::ArgumentType {
                            index,
                            expected: stringify!($ty).to_string(),
                            actual: other.map_or_else(
                                || "nothing".to_string(),
                                |v| v.clr_type().to_string(),
                            ),
                        }),
                    }
                }
            )*
        }
    };
}

argument_getters! {
    u8: U8 => u8,
    u16: U16 => u16,
    i32: I32 => i32,
    u32: U32 => u32,
    i64: I64 => i64,
    u64: U64 => u64,
    v128_i64: V128I64 => Vector128<i64>,
}

pub type Handler = fn(&Intrinsics, &Arguments<'_>) -> Result<Value, IntrinsicError>;

/// One registered method.
pub struct Entry {
    pub isa: Isa,
    pub signature: MethodSignature,
    handler: Option<Handler>,
}

impl Entry {
    fn new(
        isa: Isa,
        return_type: ClrType,
        method_name: &str,
        parameters: &[ClrType],
        handler: Handler,
    ) -> Self {
        Entry {
            isa,
            signature: MethodSignature::new(
                return_type,
                isa.class_name(),
                method_name,
                parameters.to_vec(),
            ),
            handler: Some(handler),
        }
    }

    fn supported_query(isa: Isa) -> Self {
        Entry {
            isa,
            signature: MethodSignature::new(
                ClrType::Bool,
                isa.class_name(),
                "get_IsSupported",
                vec![],
            ),
            handler: None,
        }
    }

    pub fn is_supported_query(&self) -> bool {
        self.handler.is_none()
    }
}

pub struct IntrinsicRegistry {
    intrinsics: Intrinsics,
    entries: Vec<Entry>,
    by_signature: HashMap<MethodSignature, usize>,
    metrics: IntrinsicMetrics,
}

impl IntrinsicRegistry {
    pub fn new(platform: &Platform) -> Self {
        let entries = table::entries();
        let by_signature = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.signature.clone(), i))
            .collect();
        IntrinsicRegistry {
            intrinsics: *platform.intrinsics(),
            entries,
            by_signature,
            metrics: IntrinsicMetrics::new(),
        }
    }

    pub fn metrics(&self) -> &IntrinsicMetrics {
        &self.metrics
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn signatures(&self) -> impl Iterator<Item = &MethodSignature> {
        self.entries.iter().map(|e| &e.signature)
    }

    /// Finds the entry for `signature`. The class may be spelled with its
    /// short name (`Bmi1.X64`) as well as fully qualified.
    pub fn lookup(&self, signature: &MethodSignature) -> Result<&Entry, IntrinsicError> {
        let unknown = || IntrinsicError::UnknownIntrinsic(signature.to_string());
        let isa: Isa = signature.class_name.parse().map_err(|_| unknown())?;
        let mut canonical = signature.clone();
        canonical.class_name = isa.class_name().to_string();
        self.by_signature
            .get(&canonical)
            .map(|&i| &self.entries[i])
            .ok_or_else(unknown)
    }

    pub fn invoke(&self, signature: &str, args: &[Value]) -> Result<Value, IntrinsicError> {
        let signature: MethodSignature = signature.parse()?;
        self.invoke_signature(&signature, args)
    }

    pub fn invoke_signature(
        &self,
        signature: &MethodSignature,
        args: &[Value],
    ) -> Result<Value, IntrinsicError> {
        let entry = self.lookup(signature)?;
        check_arguments(&entry.signature, args)?;

        let Some(handler) = entry.handler else {
            self.metrics.record_query();
            let supported = self.intrinsics.is_supported(entry.isa);
            trace!(isa = %entry.isa, supported, "get_IsSupported");
            return Ok(Value::Bool(supported));
        };

        let result = handler(&self.intrinsics, &Arguments { values: args });
        match (&result, self.intrinsics.backend_kind(entry.isa)) {
            (Ok(_), Some(kind)) => self.metrics.record_call(kind),
            (Err(IntrinsicError::PlatformNotSupported { .. }), _) => {
                self.metrics.record_rejection()
            }
            _ => {}
        }
        trace!(
            method = %entry.signature.method_name,
            isa = %entry.isa,
            ?args,
            ?result,
            "dispatched intrinsic"
        );
        result
    }
}

fn check_arguments(signature: &MethodSignature, args: &[Value]) -> Result<(), IntrinsicError> {
    if args.len() != signature.parameters.len() {
        return Err(IntrinsicError::ArgumentCount {
            expected: signature.parameters.len(),
            actual: args.len(),
        });
    }
    for (index, (expected, arg)) in signature.parameters.iter().zip(args).enumerate() {
        let actual = arg.clr_type();
        if *expected != actual {
            return Err(IntrinsicError::ArgumentType {
                index,
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }
    }
    Ok(())
}
