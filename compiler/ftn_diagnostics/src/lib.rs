//! Diagnostic records for the Fortran type inspection crates
//!
//! Diagnostics here are plain data. Each producer defines its own kind enum
//! (usually with [`thiserror`](https://docs.rs/thiserror) messages) and wraps it
//! in a [`GenericDiagnostic`], which attaches a [`Severity`] and a source span.
//! Rendering them for an editor is left to the host.

#![warn(
    clippy::cargo,
    clippy::nursery,
    clippy::pedantic,
    clippy::missing_docs_in_private_items,
    missing_docs
)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

pub mod diagnostic;
mod ext;

pub use diagnostic::{GenericDiagnostic, Severity};
pub use ext::SpanExt;
