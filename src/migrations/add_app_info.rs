//! `202007281325_splunk-nozzle`: turn the `add_app_info` switch into a field list
//!
//! Before this version the advanced form stored `add_app_info` as the string
//! `"true"` or `"false"`. The nozzle now takes the list of app metadata fields
//! to attach, so an enabled switch becomes every field and anything else
//! becomes the empty list. Values stay strings.

use super::{Migration, MigrationId};
use crate::app_info::AppInfoField;
use crate::error::Result;
use crate::properties::ConfigurationObject;

/// Property rewritten by this migration
pub const ADD_APP_INFO_PATH: &str = ".forms.{advanced}.properties.{add_app_info}";

/// Version timestamp and product slug this migration is registered under
pub const TIMESTAMP: &str = "202007281325";
pub const SLUG: &str = "splunk-nozzle";

/// Old value that enables app info; compared exactly, case-sensitive
const ENABLED: &str = "true";

/// Rewrite `add_app_info` in place and return the same object
///
/// `"true"` becomes `AppName,OrgName,OrgGuid,SpaceName,SpaceGuid`; any other
/// string becomes `""`. Running it twice is not a no-op: the field list is
/// not `"true"`, so the second pass clears it.
///
/// Fails with a lookup error when the property or its `value` is missing and
/// with a type error when the value is not a string. The object is untouched
/// on failure.
pub fn migrate_add_app_info(input: &mut ConfigurationObject) -> Result<&mut ConfigurationObject> {
    let enabled = input.string_value(ADD_APP_INFO_PATH)? == ENABLED;

    let value = if enabled {
        AppInfoField::join_all()
    } else {
        String::new()
    };

    log::debug!(
        "add_app_info: {} -> {:?}",
        if enabled { "enabled" } else { "disabled" },
        value
    );

    input.set_string_value(ADD_APP_INFO_PATH, value)?;
    Ok(input)
}

/// Stateless handle registering [`migrate_add_app_info`] with a catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct AddAppInfo;

impl Migration for AddAppInfo {
    fn id(&self) -> MigrationId {
        MigrationId {
            timestamp: TIMESTAMP.to_string(),
            slug: SLUG.to_string(),
        }
    }

    fn description(&self) -> &'static str {
        "Convert the add_app_info switch into a list of app metadata fields"
    }

    fn migrate<'a>(&self, input: &'a mut ConfigurationObject) -> Result<&'a mut ConfigurationObject> {
        migrate_add_app_info(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::properties::PropertyDescriptor;
    use serde_json::json;

    const ALL_FIELDS: &str = "AppName,OrgName,OrgGuid,SpaceName,SpaceGuid";

    fn object_with(value: serde_json::Value) -> ConfigurationObject {
        ConfigurationObject::new().with_property(ADD_APP_INFO_PATH, PropertyDescriptor::new(value))
    }

    fn migrated(value: &str) -> String {
        let mut object = object_with(json!(value));
        migrate_add_app_info(&mut object).unwrap();
        object.string_value(ADD_APP_INFO_PATH).unwrap().to_string()
    }

    #[test]
    fn test_true_enables_every_field() {
        assert_eq!(migrated("true"), ALL_FIELDS);
    }

    #[test]
    fn test_anything_else_clears_the_value() {
        for value in ["false", "", "TRUE", "True", "1", " true", "true ", "yes"] {
            assert_eq!(migrated(value), "", "value {:?}", value);
        }
    }

    #[test]
    fn test_returns_the_same_object() {
        let mut object = object_with(json!("true"));
        let before: *const ConfigurationObject = &object;

        let returned = migrate_add_app_info(&mut object).unwrap();
        assert!(std::ptr::eq(before, returned));
    }

    #[test]
    fn test_second_pass_clears_the_list() {
        let mut object = object_with(json!("true"));
        migrate_add_app_info(&mut object).unwrap();
        migrate_add_app_info(&mut object).unwrap();

        assert_eq!(object.string_value(ADD_APP_INFO_PATH).unwrap(), "");
    }

    #[test]
    fn test_non_string_value_is_left_alone() {
        let mut object = object_with(json!(true));
        let before = object.clone();

        let result = migrate_add_app_info(&mut object);
        assert!(matches!(result, Err(Error::Type { .. })));
        assert_eq!(object, before);
    }

    #[test]
    fn test_registered_identity() {
        let id = AddAppInfo.id();
        assert_eq!(id.timestamp(), TIMESTAMP);
        assert_eq!(id.slug(), SLUG);
        assert_eq!(id, "202007281325_splunk-nozzle".parse().unwrap());
    }
}
