//! Instruction-set extensions known to the runtime and their class hierarchy.
use crate::error::IntrinsicError;
use std::{fmt, str::FromStr};

/// An instruction-set extension, named after the .NET class that exposes it.
///
/// The `*X64`/`Arm64` variants are the nested classes holding the instructions
/// that only exist for 64-bit processes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Isa {
    ArmBase,
    ArmBaseArm64,
    X86Base,
    X86BaseX64,
    Sse41,
    Sse41X64,
    Sse42,
    Sse42X64,
    Bmi1,
    Bmi1X64,
}

impl Isa {
    pub const ALL: [Isa; 10] = [
        Isa::ArmBase,
        Isa::ArmBaseArm64,
        Isa::X86Base,
        Isa::X86BaseX64,
        Isa::Sse41,
        Isa::Sse41X64,
        Isa::Sse42,
        Isa::Sse42X64,
        Isa::Bmi1,
        Isa::Bmi1X64,
    ];

    fn bit(self) -> u16 {
        1 << (self as u16)
    }

    /// Fully qualified metadata name, with `/` separating nested classes.
    pub fn class_name(self) -> &'static str {
        match self {
            Isa::ArmBase => "System.Runtime.Intrinsics.Arm.ArmBase",
            Isa::ArmBaseArm64 => "System.Runtime.Intrinsics.Arm.ArmBase/Arm64",
            Isa::X86Base => "System.Runtime.Intrinsics.X86.X86Base",
            Isa::X86BaseX64 => "System.Runtime.Intrinsics.X86.X86Base/X64",
            Isa::Sse41 => "System.Runtime.Intrinsics.X86.Sse41",
            Isa::Sse41X64 => "System.Runtime.Intrinsics.X86.Sse41/X64",
            Isa::Sse42 => "System.Runtime.Intrinsics.X86.Sse42",
            Isa::Sse42X64 => "System.Runtime.Intrinsics.X86.Sse42/X64",
            Isa::Bmi1 => "System.Runtime.Intrinsics.X86.Bmi1",
            Isa::Bmi1X64 => "System.Runtime.Intrinsics.X86.Bmi1/X64",
        }
    }

    /// Extensions that must be supported for this one to be supported.
    ///
    /// Mirrors the .NET inheritance chain (`Sse42 : Sse41 : X86Base`) plus the
    /// enclosing class of every nested 64-bit class.
    pub fn requires(self) -> &'static [Isa] {
        match self {
            Isa::ArmBase | Isa::X86Base => &[],
            Isa::ArmBaseArm64 => &[Isa::ArmBase],
            Isa::X86BaseX64 => &[Isa::X86Base],
            Isa::Sse41 => &[Isa::X86Base],
            Isa::Sse41X64 => &[Isa::Sse41, Isa::X86BaseX64],
            Isa::Sse42 => &[Isa::Sse41],
            Isa::Sse42X64 => &[Isa::Sse42, Isa::Sse41X64],
            Isa::Bmi1 => &[Isa::X86Base],
            Isa::Bmi1X64 => &[Isa::Bmi1, Isa::X86BaseX64],
        }
    }

    /// Configuration switch (without the `DOTNET_` prefix) that can turn this
    /// extension off. Nested 64-bit classes follow their enclosing class.
    pub fn config_key(self) -> Option<&'static str> {
        match self {
            Isa::ArmBase => Some("EnableArmBase"),
            Isa::ArmBaseArm64 => Some("EnableArm64"),
            Isa::X86Base => Some("EnableX86Base"),
            Isa::Sse41 => Some("EnableSSE41"),
            Isa::Sse42 => Some("EnableSSE42"),
            Isa::Bmi1 => Some("EnableBMI1"),
            Isa::X86BaseX64 | Isa::Sse41X64 | Isa::Sse42X64 | Isa::Bmi1X64 => None,
        }
    }

    pub fn is_64bit_only(self) -> bool {
        matches!(
            self,
            Isa::ArmBaseArm64 | Isa::X86BaseX64 | Isa::Sse41X64 | Isa::Sse42X64 | Isa::Bmi1X64
        )
    }
}

impl fmt::Display for Isa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = self.class_name().rsplit('.').next().unwrap_or_default();
        f.write_str(&short.replace('/', "."))
    }
}

impl FromStr for Isa {
    type Err = IntrinsicError;

    /// Accepts the short name (`Bmi1.X64`), the nested form (`Bmi1/X64`) or the
    /// fully qualified class name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('/', ".");
        Isa::ALL
            .into_iter()
            .find(|isa| {
                wanted.eq_ignore_ascii_case(&isa.to_string())
                    || wanted.eq_ignore_ascii_case(&isa.class_name().replace('/', "."))
            })
            .ok_or_else(|| IntrinsicError::UnknownIsa(s.to_string()))
    }
}

/// A set of extensions, used to carry the per-platform availability flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IsaSet(u16);

impl IsaSet {
    pub const fn empty() -> Self {
        IsaSet(0)
    }

    pub fn all() -> Self {
        Isa::ALL.into_iter().collect()
    }

    pub fn contains(self, isa: Isa) -> bool {
        self.0 & isa.bit() != 0
    }

    pub fn insert(&mut self, isa: Isa) {
        self.0 |= isa.bit();
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Isa> {
        Isa::ALL.into_iter().filter(move |isa| self.contains(*isa))
    }
}

impl FromIterator<Isa> for IsaSet {
    fn from_iter<I: IntoIterator<Item = Isa>>(iter: I) -> Self {
        let mut set = IsaSet::empty();
        for isa in iter {
            set.insert(isa);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_dotted_nested_name() {
        assert_eq!(Isa::Bmi1.to_string(), "Bmi1");
        assert_eq!(Isa::Bmi1X64.to_string(), "Bmi1.X64");
        assert_eq!(Isa::ArmBaseArm64.to_string(), "ArmBase.Arm64");
    }

    #[test]
    fn test_parse_accepts_all_spellings() {
        assert_eq!("bmi1.x64".parse::<Isa>().unwrap(), Isa::Bmi1X64);
        assert_eq!("Sse42/X64".parse::<Isa>().unwrap(), Isa::Sse42X64);
        assert_eq!(
            "System.Runtime.Intrinsics.Arm.ArmBase/Arm64".parse::<Isa>().unwrap(),
            Isa::ArmBaseArm64
        );
        assert!(matches!(
            "Avx512".parse::<Isa>(),
            Err(IntrinsicError::UnknownIsa(_))
        ));
    }

    #[test]
    fn test_nested_classes_require_enclosing_class() {
        for isa in Isa::ALL.into_iter().filter(|isa| isa.is_64bit_only()) {
            assert!(!isa.requires().is_empty(), "{isa} has no requirements");
        }
        assert!(Isa::Sse42X64.requires().contains(&Isa::Sse42));
        assert!(Isa::Bmi1X64.requires().contains(&Isa::X86BaseX64));
    }

    #[test]
    fn test_isa_set() {
        let mut set: IsaSet = [Isa::Sse42].into_iter().collect();
        assert!(!set.contains(Isa::Bmi1));
        set.insert(Isa::Bmi1);
        assert!(set.contains(Isa::Bmi1));
        assert!(!set.contains(Isa::Bmi1X64));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Isa::Sse42, Isa::Bmi1]);
        assert_eq!(IsaSet::all().iter().count(), Isa::ALL.len());
    }
}
