//! Read-only syntax tree for the Fortran type inspection crates
//!
//! The tree is produced by the host (an editor's parser) and handed to the
//! type checker as-is; nothing here parses source text. [`expr`] holds the
//! expression nodes, [`stmt`] the declarations, statements and program units,
//! and [`build`] an [`AstBuilder`](build::AstBuilder) for assembling trees with
//! fresh node identities.

#![warn(
    clippy::cargo,
    clippy::nursery,
    clippy::pedantic,
    clippy::missing_docs_in_private_items,
    missing_docs
)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

pub mod build;
pub mod expr;
pub mod stmt;
