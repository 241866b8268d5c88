//! Table view controller library
//!
//! Sorting, text search, pagination and row selection for admin listing
//! tables, each of which can be handled locally or delegated to the caller.

pub mod column;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod model;

pub use column::Column;
pub use config::TableConfig;
pub use controller::{TableController, TableView};
pub use error::TableError;
