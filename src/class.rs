//! Raw class file layer: bytes in, indices and a constant pool out.
//!
//! Nothing here resolves names or decodes descriptors; see [`crate::unit`].

pub mod parser;
mod structs;

#[cfg(test)]
pub(crate) mod test_support;

pub use structs::*;
