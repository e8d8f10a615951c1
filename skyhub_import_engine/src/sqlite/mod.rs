//! SQLite reference backend for the SkyHub import engine.
mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
