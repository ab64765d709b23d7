//! # sv-schema
//!
//! JSON Schema registry for the stackview wire types.
//!
//! Entity and response types are defined in `sv-core` with
//! `#[derive(JsonSchema)]`. This crate collects their schemas under stable
//! names, validates arbitrary JSON against them, and backs the `sv schema`
//! command.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
