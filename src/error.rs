use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for tile migrations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Property not found: {path}")]
    Lookup { path: String },

    #[error("Property {path} has the wrong type: expected {expected}, found {found}")]
    Type {
        path: String,
        expected: String,
        found: String,
    },

    #[error("Invalid migration id: {0}")]
    InvalidMigrationId(String),

    #[error("Unknown migration in catalog {catalog}: {name}")]
    UnknownMigration { catalog: String, name: String },

    #[error("Unknown catalog: {0}")]
    UnknownCatalog(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Error with context chain
    #[error("{message}")]
    WithContext {
        message: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn lookup(path: impl Into<String>) -> Self {
        Self::Lookup { path: path.into() }
    }

    pub fn type_mismatch(
        path: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::Type {
            path: path.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn invalid_migration_id(msg: impl Into<String>) -> Self {
        Self::InvalidMigrationId(msg.into())
    }

    pub fn unknown_migration(catalog: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownMigration {
            catalog: catalog.into(),
            name: name.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    // Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            message: context.into(),
            source: Box::new(self),
        }
    }

    /// Walk through `WithContext` wrappers to the error that started the chain
    pub fn root_cause(&self) -> &Error {
        match self {
            Self::WithContext { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Whether the error means the object did not have the expected shape
    pub fn is_precondition_breach(&self) -> bool {
        matches!(self.root_cause(), Self::Lookup { .. } | Self::Type { .. })
    }
}

/// Trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to the error
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Into<String>;

    /// Add context with lazy evaluation
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T> ErrorContext<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Into<String>,
    {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
