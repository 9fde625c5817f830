use std::fmt;

///
/// Type
///
/// Atomic type identity with a single-parent derivation chain.
///
/// Derivation:
/// - `Int` derives from `Dec`
/// - `Ymd` and `Dtd` derive from `Dur`
/// - every other type derives directly from `AnyAtomic`
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Type {
    AnyAtomic,
    Una,
    Str,
    Bool,
    Dbl,
    Flt,
    Dec,
    Int,
    Dur,
    Ymd,
    Dtd,
}

impl Type {
    /// Direct parent in the derivation chain, `None` for the root.
    #[must_use]
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::AnyAtomic => None,
            Self::Int => Some(Self::Dec),
            Self::Ymd | Self::Dtd => Some(Self::Dur),
            Self::Una | Self::Str | Self::Bool | Self::Dbl | Self::Flt | Self::Dec | Self::Dur => {
                Some(Self::AnyAtomic)
            }
        }
    }

    /// Returns true when `self` is `other` or derives from it.
    #[must_use]
    pub fn instance_of(self, other: Self) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == other {
                return true;
            }
            current = kind.parent();
        }

        false
    }

    /// Returns true for members of the numeric type family.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Dbl | Self::Flt | Self::Dec | Self::Int)
    }

    /// Qualified type name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AnyAtomic => "xs:anyAtomicType",
            Self::Una => "xs:untypedAtomic",
            Self::Str => "xs:string",
            Self::Bool => "xs:boolean",
            Self::Dbl => "xs:double",
            Self::Flt => "xs:float",
            Self::Dec => "xs:decimal",
            Self::Int => "xs:integer",
            Self::Dur => "xs:duration",
            Self::Ymd => "xs:yearMonthDuration",
            Self::Dtd => "xs:dayTimeDuration",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
