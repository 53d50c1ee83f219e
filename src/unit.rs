use std::fmt::{self, Display};

use crate::{
    access::{ClassAccess, FieldAccess, MethodAccess},
    class::{Class, ConstantPool, FieldInfo, MethodInfo, parser},
    consts::{
        CONSTRUCTOR_NAME, ClassAccessFlag, MAX_MAJOR_VERSION, MIN_MAJOR_VERSION,
        PREVIEW_MINOR_VERSION, ROOT_CLASS_NAME,
    },
    descriptor::{MethodSignature, TypeRef, decode_method_signature, decode_type},
    error::{DecodeError, DecodeWarning},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassVersion {
    pub major: u16,
    pub minor: u16,
}

impl ClassVersion {
    pub fn is_supported(&self) -> bool {
        if !(MIN_MAJOR_VERSION..=MAX_MAJOR_VERSION).contains(&self.major) {
            return false;
        }
        // since Java 12 the minor version only marks preview features
        self.major < 56 || self.minor == 0 || self.minor == PREVIEW_MINOR_VERSION
    }

    /// Java release that produces this version, from Java 5 on.
    pub fn java_release(&self) -> Option<u16> {
        (self.major >= 49).then(|| self.major - 44)
    }
}

impl Display for ClassVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Class,
    Interface,
    Annotation,
    Enum,
    Module,
}

impl UnitKind {
    fn from_flags(flags: ClassAccessFlag) -> Self {
        if flags.contains(ClassAccessFlag::MODULE) {
            UnitKind::Module
        } else if flags.contains(ClassAccessFlag::ANNOTATION) {
            UnitKind::Annotation
        } else if flags.contains(ClassAccessFlag::INTERFACE) {
            UnitKind::Interface
        } else if flags.contains(ClassAccessFlag::ENUM) {
            UnitKind::Enum
        } else {
            UnitKind::Class
        }
    }

    /// Annotations are interfaces too.
    pub fn is_interface(self) -> bool {
        matches!(self, UnitKind::Interface | UnitKind::Annotation)
    }

    /// Either `class` or `interface`; enums and modules print as classes,
    /// annotations as interfaces.
    pub fn keyword(self) -> &'static str {
        if self.is_interface() {
            "interface"
        } else {
            "class"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescription {
    pub access: FieldAccess,
    pub name: String,
    pub field_type: TypeRef,
}

/// A method or constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescription {
    pub access: MethodAccess,
    pub name: String,
    pub signature: MethodSignature,
}

impl MethodDescription {
    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }

    pub fn parameters(&self) -> &[TypeRef] {
        &self.signature.parameters
    }

    /// Constructors report no return type.
    pub fn return_type(&self) -> Option<&TypeRef> {
        (!self.is_constructor()).then_some(&self.signature.return_type)
    }
}

/// Everything decoded from one compiled unit. Names are dotted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitDescription {
    pub version: ClassVersion,
    pub access: ClassAccess,
    pub kind: UnitKind,
    pub name: String,
    /// `None` for `java.lang.Object` itself and for its direct subclasses.
    pub super_class: Option<String>,
    /// Implemented interfaces, or extended ones when this is an interface.
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldDescription>,
    pub constructors: Vec<MethodDescription>,
    pub methods: Vec<MethodDescription>,
    pub warnings: Vec<DecodeWarning>,
}

/// Decodes one class file into its description.
pub fn parse(bytes: &[u8]) -> Result<UnitDescription, DecodeError> {
    let class = parser::class_file(bytes)?;
    describe(&class)
}

pub fn describe(class: &Class<'_>) -> Result<UnitDescription, DecodeError> {
    let pool = &class.constant_pool;

    let name = dotted(&pool.class_name(class.this_class)?);

    let version = ClassVersion {
        major: class.major_version,
        minor: class.minor_version,
    };
    let mut warnings = Vec::new();
    if !version.is_supported() {
        log::warn!("{name}: unsupported class file version {version}");
        warnings.push(DecodeWarning::UnsupportedVersion {
            major: version.major,
            minor: version.minor,
        });
    }

    let super_class = load_super_class(pool, class.super_class)?;
    let interfaces = class
        .interfaces
        .iter()
        .map(|&index| pool.class_name(index).map(|name| dotted(&name)))
        .collect::<Result<Vec<_>, _>>()?;

    let fields = class
        .fields
        .iter()
        .map(|field| describe_field(pool, field))
        .collect::<Result<Vec<_>, _>>()?;

    let mut constructors = Vec::new();
    let mut methods = Vec::new();
    for method in &class.methods {
        let method = describe_method(pool, method)?;
        if method.is_constructor() {
            constructors.push(method);
        } else {
            methods.push(method);
        }
    }

    Ok(UnitDescription {
        version,
        access: ClassAccess::from_bits(class.access_flags.bits()),
        kind: UnitKind::from_flags(class.access_flags),
        name,
        super_class,
        interfaces,
        fields,
        constructors,
        methods,
        warnings,
    })
}

fn load_super_class(
    pool: &ConstantPool<'_>,
    class_index: u16,
) -> Result<Option<String>, DecodeError> {
    // java.lang.Object and module-info
    if class_index == 0 {
        return Ok(None);
    }
    let name = pool.class_name(class_index)?;
    if name == ROOT_CLASS_NAME {
        return Ok(None);
    }
    Ok(Some(dotted(&name)))
}

fn describe_field(
    pool: &ConstantPool<'_>,
    field: &FieldInfo,
) -> Result<FieldDescription, DecodeError> {
    let name = pool.utf8(field.name_index)?.into_owned();
    let descriptor = pool.utf8(field.descriptor_index)?;
    Ok(FieldDescription {
        access: FieldAccess::from_bits(field.access_flags.bits()),
        name,
        field_type: decode_type(&descriptor)?,
    })
}

fn describe_method(
    pool: &ConstantPool<'_>,
    method: &MethodInfo,
) -> Result<MethodDescription, DecodeError> {
    let name = pool.utf8(method.name_index)?.into_owned();
    let descriptor = pool.utf8(method.descriptor_index)?;
    Ok(MethodDescription {
        access: MethodAccess::from_bits(method.access_flags.bits()),
        name,
        signature: decode_method_signature(&descriptor)?,
    })
}

fn dotted(internal_name: &str) -> String {
    internal_name.replace('/', ".")
}
