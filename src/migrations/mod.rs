//! Property migrations for the nozzle tile
//!
//! This module provides:
//! - The `Migration` trait every property migration implements
//! - Migration identities (`<timestamp>_<slug>`) parsed and validated
//! - The two catalogs the tile ships migrations in, and their registries

pub mod add_app_info;

pub use add_app_info::{migrate_add_app_info, AddAppInfo};

use crate::error::{Error, ErrorContext, Result};
use crate::properties::ConfigurationObject;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A versioned, one-way rewrite of a property object
///
/// Implementors are stateless; the runner may call `migrate` on any number
/// of objects, one object at a time.
pub trait Migration: Send + Sync {
    /// Identity the runner orders and selects migrations by
    fn id(&self) -> MigrationId;

    /// One-line summary for listings
    fn description(&self) -> &'static str;

    /// Rewrite the object in place and hand it back
    fn migrate<'a>(&self, input: &'a mut ConfigurationObject) -> Result<&'a mut ConfigurationObject>;
}

/// Migration identity: a `YYYYMMDDHHMM` version timestamp and a product slug
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MigrationId {
    timestamp: String,
    slug: String,
}

impl MigrationId {
    /// Length of the version timestamp (`YYYYMMDDHHMM`)
    pub const TIMESTAMP_LEN: usize = 12;

    pub fn new(timestamp: impl Into<String>, slug: impl Into<String>) -> Result<Self> {
        let timestamp = timestamp.into();
        let slug = slug.into();

        Self::parse_timestamp(&timestamp)?;

        if slug.is_empty() {
            return Err(Error::invalid_migration_id(format!(
                "Migration slug cannot be empty: {}",
                timestamp
            )));
        }

        if !slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            || slug.starts_with('-')
            || slug.ends_with('-')
        {
            return Err(Error::invalid_migration_id(format!(
                "Migration slug must be kebab-case: {}",
                slug
            )));
        }

        Ok(Self { timestamp, slug })
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// The version timestamp as a UTC instant
    pub fn created_at(&self) -> DateTime<Utc> {
        // Validated in `new`
        Self::parse_timestamp(&self.timestamp).unwrap_or_default()
    }

    /// Canonical name, e.g. `202007281325_splunk-nozzle`
    pub fn name(&self) -> String {
        self.to_string()
    }

    fn parse_timestamp(timestamp: &str) -> Result<DateTime<Utc>> {
        if timestamp.len() != Self::TIMESTAMP_LEN || !timestamp.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::invalid_migration_id(format!(
                "Migration timestamp must be 12 digits (YYYYMMDDHHMM): {}",
                timestamp
            )));
        }

        let field = |range: std::ops::Range<usize>, what: &str| -> Result<u32> {
            timestamp[range].parse().map_err(|_| {
                Error::invalid_migration_id(format!("Invalid {} in migration timestamp: {}", what, timestamp))
            })
        };

        let year = field(0..4, "year")? as i32;
        let month = field(4..6, "month")?;
        let day = field(6..8, "day")?;
        let hour = field(8..10, "hour")?;
        let minute = field(10..12, "minute")?;

        Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .ok_or_else(|| {
                Error::invalid_migration_id(format!("Invalid datetime in migration timestamp: {}", timestamp))
            })
    }
}

impl fmt::Display for MigrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.timestamp, self.slug)
    }
}

impl FromStr for MigrationId {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        // Accept file names as they appear in the tile (`..._splunk-nozzle.js`)
        let name = name.strip_suffix(".js").unwrap_or(name);

        let parts: Vec<&str> = name.splitn(2, '_').collect();
        if parts.len() != 2 {
            return Err(Error::invalid_migration_id(format!(
                "Migration name must follow format: {{timestamp}}_{{slug}}: {}",
                name
            )));
        }

        Self::new(parts[0], parts[1])
    }
}

/// Migration directories the tile ships
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Catalog {
    /// `migrations/v1` at the repository root
    Standalone,
    /// `tile/product/migrations/v1` inside the tile build
    TileProduct,
}

impl Catalog {
    pub const ALL: [Catalog; 2] = [Catalog::Standalone, Catalog::TileProduct];

    pub fn name(&self) -> &'static str {
        match self {
            Catalog::Standalone => "standalone",
            Catalog::TileProduct => "tile-product",
        }
    }

    /// Directory the catalog's migrations live in, relative to the repository
    pub fn directory(&self) -> &'static str {
        match self {
            Catalog::Standalone => "migrations/v1",
            Catalog::TileProduct => "tile/product/migrations/v1",
        }
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Catalog {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|catalog| catalog.name() == s)
            .ok_or_else(|| Error::UnknownCatalog(s.to_string()))
    }
}

/// Migrations registered against a catalog, in registration order
///
/// Both catalogs carry the same transforms; only the place the installer
/// finds them differs.
pub fn all_migrations(catalog: Catalog) -> Vec<Box<dyn Migration>> {
    match catalog {
        Catalog::Standalone => vec![Box::new(AddAppInfo)],
        Catalog::TileProduct => vec![Box::new(AddAppInfo)],
    }
}

/// Find a migration by canonical name (`202007281325_splunk-nozzle`)
pub fn find_migration(catalog: Catalog, name: &str) -> Result<Box<dyn Migration>> {
    let id: MigrationId = name.parse()?;

    all_migrations(catalog)
        .into_iter()
        .find(|migration| migration.id() == id)
        .ok_or_else(|| Error::unknown_migration(catalog.name(), name))
}

/// Look up a migration and apply it to one object
pub fn apply_migration<'a>(
    catalog: Catalog,
    name: &str,
    input: &'a mut ConfigurationObject,
) -> Result<&'a mut ConfigurationObject> {
    let migration = find_migration(catalog, name)?;

    log::info!("Applying migration {} from catalog {}", migration.id(), catalog);
    migration
        .migrate(input)
        .with_context(|| format!("Migration {} failed", migration.id()))
}

/// List all migrations of a catalog with their basic information
pub fn list_migrations(catalog: Catalog) -> Vec<MigrationInfo> {
    all_migrations(catalog)
        .iter()
        .map(|migration| {
            let id = migration.id();
            MigrationInfo {
                name: id.name(),
                created_at: id.created_at(),
                description: migration.description(),
                catalog,
                id,
            }
        })
        .collect()
}

/// Validate a catalog's registry
pub fn validate_catalog(catalog: Catalog) -> ValidationResult {
    let migrations = all_migrations(catalog);

    let mut result = ValidationResult {
        valid_count: 0,
        total_count: migrations.len(),
        errors: Vec::new(),
        warnings: Vec::new(),
    };

    // Check for duplicate IDs
    let mut id_count = HashMap::new();
    for migration in &migrations {
        *id_count.entry(migration.id()).or_insert(0) += 1;
    }

    for migration in &migrations {
        let id = migration.id();

        if *id_count.get(&id).unwrap_or(&0) > 1 {
            result
                .errors
                .push(format!("Migration {} has duplicate ID", id));
            continue;
        }

        if migration.description().trim().is_empty() {
            result
                .warnings
                .push(format!("Migration {} has no description", id));
        }

        result.valid_count += 1;
    }

    result
}

/// Basic migration information
#[derive(Debug, Clone)]
pub struct MigrationInfo {
    pub id: MigrationId,
    pub name: String,
    pub catalog: Catalog,
    pub created_at: DateTime<Utc>,
    pub description: &'static str,
}

/// Validation result for a catalog
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub valid_count: usize,
    pub total_count: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
