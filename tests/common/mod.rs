//! Shared test utilities for ltsv2avro integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.
#![allow(dead_code)]

pub mod builders;
pub mod fixtures;

pub use builders::*;
pub use fixtures::*;
