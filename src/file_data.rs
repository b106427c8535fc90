//! This module contains the file references -- purely naming
//! and path bookkeeping, does not open anything.

mod file_ref;

pub use file_ref::{FileRef, FileKind, SERIES_SUFFIX};
