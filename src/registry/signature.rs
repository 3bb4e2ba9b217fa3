//! Parsing of .NET method signatures such as
//! `static uint System.Runtime.Intrinsics.X86.Bmi1::AndNot(uint, uint)`.
use crate::error::IntrinsicError;
use std::{fmt, str::FromStr};

/// The CLR types that appear in intrinsic signatures.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClrType {
    Void,
    Bool,
    Byte,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Vector128(Box<ClrType>),
}

impl ClrType {
    pub fn vector128_of(element: ClrType) -> Self {
        ClrType::Vector128(Box::new(element))
    }
}

impl fmt::Display for ClrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClrType::Void => f.write_str("void"),
            ClrType::Bool => f.write_str("bool"),
            ClrType::Byte => f.write_str("byte"),
            ClrType::UShort => f.write_str("ushort"),
            ClrType::Int => f.write_str("int"),
            ClrType::UInt => f.write_str("uint"),
            ClrType::Long => f.write_str("long"),
            ClrType::ULong => f.write_str("ulong"),
            ClrType::Vector128(element) => {
                write!(f, "System.Runtime.Intrinsics.Vector128<{element}>")
            }
        }
    }
}

impl FromStr for ClrType {
    type Err = IntrinsicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(rest) = s.strip_suffix('>') {
            let (name, element) = rest
                .split_once('<')
                .ok_or_else(|| IntrinsicError::InvalidSignature(s.to_string()))?;
            return match name.trim() {
                "Vector128" | "System.Runtime.Intrinsics.Vector128" => {
                    Ok(ClrType::vector128_of(element.parse()?))
                }
                _ => Err(IntrinsicError::InvalidSignature(format!(
                    "unsupported generic type {s}"
                ))),
            };
        }

        Ok(match s {
            "void" | "System.Void" => ClrType::Void,
            "bool" | "System.Boolean" => ClrType::Bool,
            "byte" | "System.Byte" => ClrType::Byte,
            "ushort" | "System.UInt16" => ClrType::UShort,
            "int" | "System.Int32" => ClrType::Int,
            "uint" | "System.UInt32" => ClrType::UInt,
            "long" | "System.Int64" => ClrType::Long,
            "ulong" | "System.UInt64" => ClrType::ULong,
            _ => {
                return Err(IntrinsicError::InvalidSignature(format!(
                    "unsupported type {s:?}"
                )))
            }
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    pub is_static: bool,
    pub return_type: ClrType,
    /// Namespace-qualified, with `/` separating nested classes.
    pub class_name: String,
    pub method_name: String,
    pub parameters: Vec<ClrType>,
}

impl MethodSignature {
    pub fn new(
        return_type: ClrType,
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        parameters: Vec<ClrType>,
    ) -> Self {
        MethodSignature {
            is_static: true,
            return_type,
            class_name: class_name.into(),
            method_name: method_name.into(),
            parameters,
        }
    }
}

impl FromStr for MethodSignature {
    type Err = IntrinsicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |why: &str| IntrinsicError::InvalidSignature(format!("{why}: {s}"));
        let input = s.trim();

        let (is_static, input) = match input.strip_prefix("static ") {
            Some(rest) => (true, rest.trim_start()),
            None => (false, input),
        };

        let (head, tail) = input
            .split_once("::")
            .ok_or_else(|| invalid("missing `::`"))?;
        let (return_type, class_name) = head
            .trim()
            .rsplit_once(char::is_whitespace)
            .ok_or_else(|| invalid("missing return type"))?;

        let (method_name, params) = tail
            .split_once('(')
            .ok_or_else(|| invalid("missing parameter list"))?;
        let params = params
            .trim_end()
            .strip_suffix(')')
            .ok_or_else(|| invalid("unterminated parameter list"))?;

        let method_name = method_name.trim();
        if method_name.is_empty() || class_name.is_empty() {
            return Err(invalid("empty name"));
        }

        Ok(MethodSignature {
            is_static,
            return_type: return_type.parse()?,
            class_name: class_name.trim().to_string(),
            method_name: method_name.to_string(),
            parameters: split_top_level(params)
                .map(ClrType::from_str)
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Splits on commas outside angle brackets; an empty list yields nothing.
fn split_top_level(params: &str) -> impl Iterator<Item = &str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in params.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&params[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&params[start..]);
    parts.into_iter().filter(|p| !p.trim().is_empty())
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_static {
            f.write_str("static ")?;
        }
        write!(
            f,
            "{} {}::{}(",
            self.return_type, self.class_name, self.method_name
        )?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")
    }
}
