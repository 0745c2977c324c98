//! Glowcart Catalog - Product store, projection, and data sources.
//!
//! This crate is the engine behind the Glowcart surfaces:
//!
//! - [`store::ProductStore`] holds the authoritative product list for the
//!   current session: wholesale refresh from a source, pin/unpin with
//!   resynchronization, and an explicit subscriber list notified on every
//!   successful refresh.
//! - [`projector`] derives the displayed list from the store's list plus a
//!   [`projector::FilterSpec`] and a [`projector::SortOption`], as a pure
//!   function.
//! - [`view::StorefrontView`] ties the two together: it caches the latest
//!   snapshot and recomputes the projection whenever filters, sort, or the
//!   snapshot change.
//! - [`source`] defines the [`source::ProductSource`] seam plus the bundled
//!   fixture source and a remote JSON client.
//!
//! The store never exposes partial updates: a failed fetch keeps the
//! last-known-good list and surfaces an error state instead.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod projector;
pub mod source;
pub mod store;
pub mod view;

pub use error::{FetchError, UpdateError};
pub use projector::{FilterSpec, PriceRange, SortOption, project};
pub use source::{FixtureSource, HttpSource, ProductSource};
pub use store::{ProductStore, SubscriberId};
pub use view::StorefrontView;
