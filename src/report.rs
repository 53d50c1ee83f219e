//! Text rendering of decoded units, in the layout of the classic
//! reflection-based jar dumper.

use std::fmt::{self, Display};

use crate::{
    access::Modifier,
    descriptor::TypeRef,
    unit::{FieldDescription, MethodDescription, UnitDescription},
};

pub struct UnitReport<'a> {
    unit: &'a UnitDescription,
    verbose: bool,
}

impl<'a> UnitReport<'a> {
    pub fn new(unit: &'a UnitDescription) -> Self {
        Self {
            unit,
            verbose: false,
        }
    }

    /// Also print the class file version and any warnings.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn fmt_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.unit;
        let mut words: Vec<&str> = unit.access.visibility().keyword().into_iter().collect();
        // interfaces are implicitly abstract
        if !unit.kind.is_interface() && unit.access.is_abstract() {
            words.push(Modifier::Abstract.keyword());
        }
        words.push(unit.kind.keyword());
        words.push(&unit.name);
        f.write_str(&words.join(" "))?;

        if let Some(super_class) = &unit.super_class {
            write!(f, " extends {super_class}")?;
        }
        if !unit.interfaces.is_empty() {
            let keyword = if unit.kind.is_interface() {
                "extends"
            } else {
                "implements"
            };
            write!(f, " {keyword} {}", unit.interfaces.join(", "))?;
        }
        writeln!(f)
    }
}

impl Display for UnitReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.unit;
        self.fmt_header(f)?;

        if self.verbose {
            write!(f, "\t// class file version {}", unit.version)?;
            if let Some(release) = unit.version.java_release() {
                write!(f, " (Java {release})")?;
            }
            writeln!(f)?;
            for warning in &unit.warnings {
                writeln!(f, "\t// warning: {warning}")?;
            }
        }

        writeln!(f, "{} has following fields:", unit.name)?;
        for field in &unit.fields {
            writeln!(f, "\t> {}", FieldLine { owner: &unit.name, field })?;
        }

        writeln!(f, "{} has following constructors:", unit.name)?;
        for constructor in &unit.constructors {
            writeln!(
                f,
                "\t> {}",
                ConstructorLine {
                    owner: &unit.name,
                    constructor
                }
            )?;
        }

        writeln!(f, "{} has following methods:", unit.name)?;
        for method in &unit.methods {
            writeln!(f, "\t> {}", MethodLine(method))?;
        }
        Ok(())
    }
}

/// `public final java.lang.String com.acme.Greeter.name`
struct FieldLine<'a> {
    owner: &'a str,
    field: &'a FieldDescription,
}

impl Display for FieldLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_prefix(f, &self.field.access.to_string())?;
        write!(f, "{} {}.{}", self.field.field_type, self.owner, self.field.name)
    }
}

/// `public com.acme.Greeter(int,java.lang.String)`
struct ConstructorLine<'a> {
    owner: &'a str,
    constructor: &'a MethodDescription,
}

impl Display for ConstructorLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_prefix(f, &self.constructor.access.to_string())?;
        write!(f, "{}(", self.owner)?;
        write_joined(f, self.constructor.parameters(), ",", |f, _, ty| {
            write!(f, "{ty}")
        })?;
        f.write_str(")")
    }
}

/// `public java.lang.String greet(int arg0, long arg1)`
struct MethodLine<'a>(&'a MethodDescription);

impl Display for MethodLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = self.0;
        write_prefix(f, &method.access.to_string())?;
        if let Some(return_type) = method.return_type() {
            write!(f, "{return_type} ")?;
        }
        write!(f, "{}(", method.name)?;
        write_joined(f, method.parameters(), ", ", |f, i, ty| {
            write!(f, "{ty} arg{i}")
        })?;
        f.write_str(")")
    }
}

fn write_prefix(f: &mut fmt::Formatter<'_>, modifiers: &str) -> fmt::Result {
    if modifiers.is_empty() {
        return Ok(());
    }
    write!(f, "{modifiers} ")
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    types: &[TypeRef],
    separator: &str,
    mut item: impl FnMut(&mut fmt::Formatter<'_>, usize, &TypeRef) -> fmt::Result,
) -> fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        item(f, i, ty)?;
    }
    Ok(())
}
