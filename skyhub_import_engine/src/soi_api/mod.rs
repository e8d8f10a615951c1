//! # The order import pipeline
//!
//! The pipeline is exposed through a single entry point, [`OrderImportApi`], which is created by supplying a
//! database backend implementing [`crate::traits::OrderImportDatabase`]:
//!
//! ```rust,ignore
//! use skyhub_import_engine::{events::EventProducers, OrderImportApi, SqliteDatabase, StoreScope};
//! let db = SqliteDatabase::new_with_url(...).await?;
//! let api = OrderImportApi::new(db, EventProducers::default());
//! let outcome = api.import_order(&StoreScope::default(), payload).await?;
//! ```
//!
//! Internally the pipeline is split along its processing stages, one module per stage:
//! * [`customer_resolver`] finds or creates the customer and selects the order addresses,
//! * [`address_builder`] normalizes marketplace addresses (street-line packing, country default) and tracks the
//!   billing/shipping role assignment,
//! * [`product_matcher`] resolves marketplace SKUs against the catalog,
//! * [`order_assembler`] accumulates everything into the order-creation request,
//! * [`status_processor`] maps marketplace statuses onto local order state transitions,
//! * [`order_import_api`] is the orchestrator tying the stages together behind the idempotency gate.
pub mod address_builder;
pub mod customer_resolver;
pub mod errors;
pub mod import_objects;
pub mod order_assembler;
pub mod order_import_api;
pub mod product_matcher;
pub mod status_processor;

pub use order_import_api::OrderImportApi;
