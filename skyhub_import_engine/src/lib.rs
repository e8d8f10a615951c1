//! SkyHub Import Engine
//!
//! This library contains the core logic for importing marketplace orders (SkyHub) into a local store's order ledger.
//! It is transport-agnostic: the admin surface that triggers imports and the HTTP client that talks to the
//! marketplace live in sibling crates and interact with the engine through traits.
//!
//! The library is divided into three main sections:
//! 1. Backend trait contracts ([`mod@traits`]). Orders, customers and the product catalog are reached through small
//!    trait families so that any storage engine can back the importer. A SQLite reference backend is provided behind
//!    the `sqlite` feature.
//! 2. The import pipeline ([`OrderImportApi`]): the orchestrator that takes a structured marketplace payload and
//!    idempotently produces a local order, resolving or creating the customer, normalizing addresses, matching
//!    marketplace SKUs against the catalog and assembling the order-creation request.
//! 3. Event hooks ([`mod@events`]). Deployments can subscribe to import lifecycle events, most importantly the
//!    failed-import event which carries the verbatim marketplace payload for diagnostics and replay.
pub mod db_types;
pub mod events;
pub mod helpers;
pub mod marketplace_objects;
mod soi_api;
pub mod traits;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use soi_api::{
    address_builder::AddressBook,
    errors::OrderImportError,
    import_objects::{ImportOutcome, ShippingPolicy, StoreScope},
    order_assembler::OrderAssembly,
    status_processor::{local_status_for, StatusProcessor},
    OrderImportApi,
};
