use anyhow::Error;
use serde_json::Value;
use std::collections::HashMap;

use crate::schema::{FieldId, FieldOptions, FieldType};

/// Read-only projection of one field with its constraints resolved against
/// the tree: the option list is already filtered by ancestor selections and
/// `available_types` is what the type selector may offer.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FieldView {
    pub id: FieldId,
    pub field_type: FieldType,
    pub label: String,
    pub options: FieldOptions,
    pub available_types: Vec<FieldType>,
    pub value: String,
    pub error: Option<String>,
    pub child: Option<Box<FieldView>>,
}

/// Context passed to renderers
pub struct RenderContext<'a> {
    pub props: &'a HashMap<String, Value>,
}

/// Seam for the presentation layer. The core never calls a renderer itself;
/// an adapter pairs views with renderers and feeds user events back into
/// the session.
pub trait FieldRenderer: Send + Sync {
    /// Returns the field types this renderer handles.
    fn handled_field_types(&self) -> Vec<FieldType>;

    /// Render the field view to a string (HTML).
    fn render(&self, view: &FieldView, ctx: &RenderContext) -> Result<String, Error>;
}
