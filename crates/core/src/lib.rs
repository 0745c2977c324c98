//! Glowcart Core - Shared domain types.
//!
//! This crate provides the product model shared by all Glowcart components:
//! - `catalog` - Product store, projection, and data sources
//! - `cli` - Command-line storefront and admin tools
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no runtime.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - The `Product` record and its supporting newtypes and enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
