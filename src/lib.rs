//! Tile migrations - property migrations for the Splunk firehose nozzle tile
//!
//! The tile installer keeps the operator's form input as a property object
//! and runs versioned migrations over it on upgrade. This crate provides:
//! - A typed model of that object that keeps unrelated properties verbatim
//! - The `202007281325_splunk-nozzle` migration for `add_app_info`
//! - The registry of both catalogs the tile ships migrations in
//! - JSON and YAML reading and writing for the `tile-migrate` binary
//!
//! # Example
//!
//! ```rust
//! use tile_migrations::migrations::add_app_info::ADD_APP_INFO_PATH;
//! use tile_migrations::{migrate_add_app_info, ConfigurationObject, PropertyDescriptor};
//!
//! let mut object = ConfigurationObject::new()
//!     .with_property(ADD_APP_INFO_PATH, PropertyDescriptor::new("true"));
//!
//! migrate_add_app_info(&mut object)?;
//! assert_eq!(
//!     object.string_value(ADD_APP_INFO_PATH)?,
//!     "AppName,OrgName,OrgGuid,SpaceName,SpaceGuid"
//! );
//! # Ok::<(), tile_migrations::Error>(())
//! ```

// Enforce error handling best practices
#![cfg_attr(
    not(test),
    warn(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
    )
)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used,))]

pub mod app_info;
pub mod document;
pub mod error;
pub mod migrations;
pub mod properties;

pub use app_info::AppInfoField;
pub use document::{read_document, write_document, DocumentFormat};
pub use error::{Error, ErrorContext, Result};
pub use migrations::{
    all_migrations, apply_migration, find_migration, list_migrations, migrate_add_app_info,
    validate_catalog, AddAppInfo, Catalog, Migration, MigrationId, MigrationInfo,
    ValidationResult,
};
pub use properties::{property_path, ConfigurationObject, PropertyDescriptor};
