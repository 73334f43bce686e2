//! Shared utilities for the Fortran type inspection crates
//!
//! Currently this only holds source [spans](span), which every other crate in
//! the workspace uses to point at locations in a program unit.

#![warn(
    clippy::cargo,
    clippy::nursery,
    clippy::pedantic,
    clippy::missing_docs_in_private_items,
    missing_docs
)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

pub mod span;
