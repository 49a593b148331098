//! App metadata fields the nozzle can attach to forwarded events

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Separator used when the field list is stored as a property value
pub const FIELD_SEPARATOR: char = ',';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppInfoField {
    AppName,
    OrgName,
    OrgGuid,
    SpaceName,
    SpaceGuid,
}

impl AppInfoField {
    /// Every field, in the order the nozzle documents them
    pub const ALL: [AppInfoField; 5] = [
        AppInfoField::AppName,
        AppInfoField::OrgName,
        AppInfoField::OrgGuid,
        AppInfoField::SpaceName,
        AppInfoField::SpaceGuid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppInfoField::AppName => "AppName",
            AppInfoField::OrgName => "OrgName",
            AppInfoField::OrgGuid => "OrgGuid",
            AppInfoField::SpaceName => "SpaceName",
            AppInfoField::SpaceGuid => "SpaceGuid",
        }
    }

    /// `AppName,OrgName,OrgGuid,SpaceName,SpaceGuid`
    pub fn join_all() -> String {
        Self::join(&Self::ALL)
    }

    pub fn join(fields: &[AppInfoField]) -> String {
        fields
            .iter()
            .map(AppInfoField::as_str)
            .collect::<Vec<_>>()
            .join(&FIELD_SEPARATOR.to_string())
    }

    /// Parse a stored field list back into fields
    ///
    /// Whitespace around names and empty entries are ignored, so the empty
    /// string means "no app info".
    pub fn parse_list(value: &str) -> Result<Vec<AppInfoField>> {
        value
            .split(FIELD_SEPARATOR)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl fmt::Display for AppInfoField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppInfoField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| Error::invalid_input(format!("Unknown app info field: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_all() {
        assert_eq!(
            AppInfoField::join_all(),
            "AppName,OrgName,OrgGuid,SpaceName,SpaceGuid"
        );
    }

    #[test]
    fn test_parse_list() {
        let fields = AppInfoField::parse_list("AppName, SpaceGuid,").unwrap();
        assert_eq!(fields, vec![AppInfoField::AppName, AppInfoField::SpaceGuid]);

        assert!(AppInfoField::parse_list("").unwrap().is_empty());
        assert_eq!(
            AppInfoField::parse_list(&AppInfoField::join_all()).unwrap(),
            AppInfoField::ALL.to_vec()
        );
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        assert!(AppInfoField::parse_list("AppName,appname").is_err());
        assert!("true".parse::<AppInfoField>().is_err());
    }
}
