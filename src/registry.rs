use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::FormBuilderError;
use crate::schema::{FieldOptions, FieldType};

/// Built-in field-type table, compiled into the crate so a session can be
/// constructed without any external configuration.
const BUILTIN_FIELD_OPTIONS: &str = include_str!("../config/field_options.json");

/// Declarative field-type configuration table as loaded from JSON.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct FieldOptionsConfig {
    #[serde(rename = "fieldOptions")]
    pub field_options: HashMap<FieldType, FieldOptions>,
}

/// Read-only mapping from field types to the options the builder
/// instantiates them with. Loaded once, never mutated afterwards.
#[derive(Clone, Debug, Default)]
pub struct FieldTypeRegistry {
    options: HashMap<FieldType, FieldOptions>,
}

impl FieldTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry backed by the built-in field-type table.
    pub fn builtin() -> Result<Self, FormBuilderError> {
        Self::from_json(BUILTIN_FIELD_OPTIONS)
    }

    /// Parse a caller-supplied configuration table.
    pub fn from_json(json: &str) -> Result<Self, FormBuilderError> {
        let config: FieldOptionsConfig = serde_json::from_str(json)?;
        let mut registry = Self::new();
        registry.load_from_config(config);
        Ok(registry)
    }

    pub fn load_from_config(&mut self, config: FieldOptionsConfig) {
        self.options.extend(config.field_options);
    }

    /// The options a field of `field_type` is created with. Unknown or
    /// unset types get the safe default record, so callers never branch on
    /// a missing entry.
    pub fn resolve_options(&self, field_type: FieldType) -> FieldOptions {
        self.options.get(&field_type).cloned().unwrap_or_default()
    }
}
