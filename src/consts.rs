pub const CLASS_FILE_MAGIC: u32 = 0xcafe_babe;
pub const CLASS_FILE_SUFFIX: &str = ".class";

pub const CONSTRUCTOR_NAME: &str = "<init>";
pub const ROOT_CLASS_NAME: &str = "java/lang/Object";

pub const MIN_MAJOR_VERSION: u16 = 45;
// Java 25
pub const MAX_MAJOR_VERSION: u16 = 69;
pub const PREVIEW_MINOR_VERSION: u16 = 0xffff;

pub const MAX_ARRAY_DIMENSIONS: usize = 255;

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClassAccessFlag: u16 {
        const PUBLIC = 0x0001;
        // only legal through InnerClasses, kept so the raw bits survive
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const FINAL = 0x0010;
        const SUPER = 0x0020;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
        const SYNTHETIC = 0x1000;
        const ANNOTATION = 0x2000;
        const ENUM = 0x4000;
        const MODULE = 0x8000;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldAccessFlag: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const VOLATILE = 0x0040;
        const TRANSIENT = 0x0080;
        const SYNTHETIC = 0x1000;
        const ENUM = 0x4000;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MethodAccessFlag: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SYNCHRONIZED = 0x0020;
        const BRIDGE = 0x0040;
        const VARARGS = 0x0080;
        const NATIVE = 0x0100;
        const ABSTRACT = 0x0400;
        const STRICT = 0x0800;
        const SYNTHETIC = 0x1000;
    }
}
