//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: Rich domain types
//! - `wire.rs`: Raw serde structs matching provider responses
//! - `convert.rs`: Conversions with validation
//! - `state.rs`: Caches and state containers
//! - `client.rs`: Sub-client with HTTP methods and caching

pub mod catalog;
pub mod history;
pub mod market;
pub mod portfolio;
