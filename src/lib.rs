//! Structural metadata for the compiled units inside a jar, decoded straight
//! from the class file bytes. Nothing is loaded, linked or executed.
//!
//! ```no_run
//! for result in jarscope::inspect("app.jar")? {
//!     match result {
//!         Ok(unit) => println!("{} ({} methods)", unit.name, unit.methods.len()),
//!         Err(err) => eprintln!("{err}"),
//!     }
//! }
//! # Ok::<(), jarscope::ArchiveError>(())
//! ```

pub mod access;
pub mod archive;
pub mod class;
pub mod consts;
pub mod descriptor;
pub mod error;
pub mod inspector;
pub mod report;
pub mod unit;

pub use archive::{ArchiveReader, Entry, EntryData};
pub use descriptor::{
    MethodSignature, PrimitiveKind, TypeRef, decode_method_signature, decode_type,
};
pub use error::{ArchiveError, DecodeError, DecodeWarning, EntryError};
pub use inspector::{InspectOptions, InspectResult, Inspector, inspect};
pub use unit::{
    ClassVersion, FieldDescription, MethodDescription, UnitDescription, UnitKind, parse,
};
