//! Type inference and assignment checking for Fortran program units
//!
//! This crate infers the type of every expression in a program unit given as
//! an [`ftn_ast`] tree, checks initializers and assignments against declared
//! types, and reports mismatches as structured diagnostics. The [type model](ty)
//! is independent of the tree; the [engine](typeck) walks a unit once,
//! bottom-up, and returns a per-node type map plus a diagnostic list.

#![warn(
    clippy::cargo,
    clippy::nursery,
    clippy::pedantic,
    clippy::missing_docs_in_private_items,
    missing_docs
)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

pub mod ty;
pub mod typeck;
