use std::borrow::Cow;

use cesu8_str::java as cesu8_java;

use crate::error::DecodeError;

/// One constant pool slot. Variants that names are resolved through keep
/// their payload; the rest are consumed for their width only.
#[derive(Debug, PartialEq)]
pub enum ConstantPoolInfo<'a> {
    Utf8(&'a [u8]),
    Integer,
    Float,
    Long,
    Double,
    Class { name_index: u16 },
    String,
    Fieldref,
    Methodref,
    InterfaceMethodref,
    NameAndType,
    MethodHandle,
    MethodType,
    Dynamic,
    InvokeDynamic,
    Module,
    Package,
    /// The unusable slot after a `Long` or `Double`.
    Empty,
}

impl ConstantPoolInfo<'_> {
    /// Number of pool indices this constant occupies.
    pub fn slots(&self) -> usize {
        match self {
            ConstantPoolInfo::Long | ConstantPoolInfo::Double => 2,
            _ => 1,
        }
    }
}

/// Constant pool addressed by the 1-based indices used in class files.
#[derive(Debug, Default)]
pub struct ConstantPool<'a> {
    entries: Vec<ConstantPoolInfo<'a>>,
}

impl<'a> ConstantPool<'a> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Number of addressable slots, including `Empty` ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn push(&mut self, constant: ConstantPoolInfo<'a>) {
        let slots = constant.slots();
        self.entries.push(constant);
        if slots == 2 {
            self.entries.push(ConstantPoolInfo::Empty);
        }
    }

    pub fn get(&self, index: u16) -> Option<&ConstantPoolInfo<'a>> {
        let index = index.checked_sub(1)?;
        match self.entries.get(index as usize)? {
            ConstantPoolInfo::Empty => None,
            constant => Some(constant),
        }
    }

    pub fn utf8(&self, index: u16) -> Result<Cow<'a, str>, DecodeError> {
        match self.get(index) {
            Some(&ConstantPoolInfo::Utf8(bytes)) => decode_modified_utf8(bytes)
                .ok_or(DecodeError::MalformedUtf8 { index }),
            _ => Err(DecodeError::BadConstantPoolReference {
                index,
                expected: "Utf8",
            }),
        }
    }

    /// Internal (slash separated) name behind a `Class` constant.
    pub fn class_name(&self, index: u16) -> Result<Cow<'a, str>, DecodeError> {
        match self.get(index) {
            Some(&ConstantPoolInfo::Class { name_index }) => self.utf8(name_index),
            _ => Err(DecodeError::BadConstantPoolReference {
                index,
                expected: "Class",
            }),
        }
    }
}

fn decode_modified_utf8(bytes: &[u8]) -> Option<Cow<'_, str>> {
    let java_str = cesu8_java::JavaStr::from_java_cesu8(bytes).ok()?;
    Some(cesu8_java::from_java_cesu8(java_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> ConstantPool<'static> {
        let mut pool = ConstantPool::default();
        pool.push(ConstantPoolInfo::Utf8(b"com/acme/Greeter"));
        pool.push(ConstantPoolInfo::Class { name_index: 1 });
        pool.push(ConstantPoolInfo::Long);
        pool.push(ConstantPoolInfo::Class { name_index: 3 });
        pool.push(ConstantPoolInfo::Class { name_index: 4 });
        pool
    }

    #[test]
    fn test_index_zero_is_unused() {
        assert_eq!(pool().get(0), None);
    }

    #[test]
    fn test_double_slot() {
        let pool = pool();
        assert_eq!(pool.len(), 6);
        assert_eq!(pool.get(3), Some(&ConstantPoolInfo::Long));
        assert_eq!(pool.get(4), None);
        assert!(matches!(
            pool.class_name(4),
            Err(DecodeError::BadConstantPoolReference { index: 4, .. })
        ));
        // a Class pointing into the reserved slot
        assert!(matches!(
            pool.class_name(6),
            Err(DecodeError::BadConstantPoolReference { index: 4, .. })
        ));
        assert_eq!(pool.get(5), Some(&ConstantPoolInfo::Class { name_index: 3 }));
    }

    #[test]
    fn test_resolve() {
        let pool = pool();
        assert_eq!(pool.class_name(2).unwrap(), "com/acme/Greeter");
        assert!(matches!(
            pool.utf8(2),
            Err(DecodeError::BadConstantPoolReference {
                index: 2,
                expected: "Utf8"
            })
        ));
        assert!(matches!(
            pool.class_name(7),
            Err(DecodeError::BadConstantPoolReference { index: 7, .. })
        ));
        // Class { name_index: 3 } points at a Long
        assert!(matches!(
            pool.class_name(5),
            Err(DecodeError::BadConstantPoolReference { index: 3, .. })
        ));
    }

    #[test]
    fn test_malformed_utf8() {
        let mut pool = ConstantPool::default();
        pool.push(ConstantPoolInfo::Utf8(&[0xff, 0x41]));
        assert!(matches!(
            pool.utf8(1),
            Err(DecodeError::MalformedUtf8 { index: 1 })
        ));
    }
}
