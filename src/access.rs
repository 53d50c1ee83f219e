use std::fmt::{self, Display};

use bitflags::Flags;

use crate::consts::{ClassAccessFlag, FieldAccessFlag, MethodAccessFlag};

// method flags name every bit shared by the three flag kinds
const ACC_PUBLIC: u16 = MethodAccessFlag::PUBLIC.bits();
const ACC_PRIVATE: u16 = MethodAccessFlag::PRIVATE.bits();
const ACC_PROTECTED: u16 = MethodAccessFlag::PROTECTED.bits();
const ACC_STATIC: u16 = MethodAccessFlag::STATIC.bits();
const ACC_FINAL: u16 = MethodAccessFlag::FINAL.bits();
const ACC_ABSTRACT: u16 = MethodAccessFlag::ABSTRACT.bits();

/// Exactly one of these applies to every decoded unit or member.
///
/// `Package` is the absence of all three visibility bits. When a malformed
/// unit sets more than one bit, the first of public, protected, private wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Protected,
    Private,
    Package,
}

impl Visibility {
    pub fn from_bits(bits: u16) -> Self {
        if bits & ACC_PUBLIC != 0 {
            Visibility::Public
        } else if bits & ACC_PROTECTED != 0 {
            Visibility::Protected
        } else if bits & ACC_PRIVATE != 0 {
            Visibility::Private
        } else {
            Visibility::Package
        }
    }

    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Visibility::Public => Some("public"),
            Visibility::Protected => Some("protected"),
            Visibility::Private => Some("private"),
            Visibility::Package => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Abstract,
    Final,
    Static,
}

impl Modifier {
    // render order
    const ALL: [Modifier; 3] = [Modifier::Abstract, Modifier::Final, Modifier::Static];

    fn bit(self) -> u16 {
        match self {
            Modifier::Abstract => ACC_ABSTRACT,
            Modifier::Final => ACC_FINAL,
            Modifier::Static => ACC_STATIC,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Modifier::Abstract => "abstract",
            Modifier::Final => "final",
            Modifier::Static => "static",
        }
    }
}

/// Decoded access flags of a unit, field or method.
///
/// `F` is the raw bitmask type for that kind of structure; all bits are
/// retained, including ones the decoder does not name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Access<F> {
    visibility: Visibility,
    flags: F,
}

pub type ClassAccess = Access<ClassAccessFlag>;
pub type FieldAccess = Access<FieldAccessFlag>;
pub type MethodAccess = Access<MethodAccessFlag>;

impl<F: Flags<Bits = u16> + Copy> Access<F> {
    pub fn from_bits(bits: u16) -> Self {
        Self {
            visibility: Visibility::from_bits(bits),
            flags: F::from_bits_retain(bits),
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn flags(&self) -> F {
        self.flags
    }

    pub fn bits(&self) -> u16 {
        self.flags.bits()
    }

    /// Abstract, final and static in that order, whichever are set.
    pub fn modifiers(&self) -> impl Iterator<Item = Modifier> {
        let bits = self.bits();
        Modifier::ALL
            .into_iter()
            .filter(move |modifier| bits & modifier.bit() != 0)
    }

    pub fn is_abstract(&self) -> bool {
        self.bits() & ACC_ABSTRACT != 0
    }

    pub fn is_final(&self) -> bool {
        self.bits() & ACC_FINAL != 0
    }

    pub fn is_static(&self) -> bool {
        self.bits() & ACC_STATIC != 0
    }
}

impl<F: Flags<Bits = u16> + Copy> Display for Access<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words = self
            .visibility
            .keyword()
            .into_iter()
            .chain(self.modifiers().map(Modifier::keyword));
        for (i, word) in words.enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(word)?;
        }
        Ok(())
    }
}
