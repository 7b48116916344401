use std::collections::{BTreeMap, HashMap, HashSet};

use crate::registry::FieldTypeRegistry;
use crate::schema::{FieldId, FieldNode, FieldTree, FieldType};
use crate::traits::FieldView;
use crate::validation::Validator;

/// Fire-and-forget outcome event for the adapter to surface transiently.
/// Returned from value changes and submission instead of being pushed
/// through a display channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Error(String),
    Success(String),
}

/// One field's contribution to a committed submission. Keyed by field id in
/// the snapshot; the label rides along as display metadata so same-typed
/// fields sharing a label never collide.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SubmittedField {
    pub label: String,
    pub value: String,
}

/// Orchestrates the field tree plus the per-field value and error stores.
///
/// All stores are keyed by [`FieldId`]; labels are display metadata only, so
/// two fields sharing a label cannot collide. Structural operations on
/// unknown ids degrade to silent no-ops.
pub struct FormSession {
    registry: FieldTypeRegistry,
    validator: Validator,
    tree: FieldTree,
    values: HashMap<FieldId, String>,
    errors: HashMap<FieldId, String>,
    /// The value each dropdown field currently contributes, used to filter
    /// nested dropdown option lists. Clearing a dropdown removes exactly
    /// that field's entry.
    selected_dropdown_values: HashMap<FieldId, String>,
    submitted_data: Option<BTreeMap<FieldId, SubmittedField>>,
}

impl FormSession {
    /// A session over a fixed field-type configuration. The registry is
    /// never mutated for the lifetime of the session.
    pub fn new(registry: FieldTypeRegistry) -> Self {
        Self {
            registry,
            validator: Validator,
            tree: FieldTree::new(),
            values: HashMap::new(),
            errors: HashMap::new(),
            selected_dropdown_values: HashMap::new(),
            submitted_data: None,
        }
    }

    pub fn tree(&self) -> &FieldTree {
        &self.tree
    }

    pub fn values(&self) -> &HashMap<FieldId, String> {
        &self.values
    }

    pub fn errors(&self) -> &HashMap<FieldId, String> {
        &self.errors
    }

    /// Values currently chosen across all dropdown fields.
    pub fn selected_dropdown_values(&self) -> HashSet<&str> {
        self.selected_dropdown_values
            .values()
            .map(String::as_str)
            .collect()
    }

    /// The snapshot taken by the last successful submission: a verbatim
    /// copy of the value store at commit time. Fields never touched carry
    /// no entry, mirroring how the value store itself works.
    pub fn submitted_data(&self) -> Option<&BTreeMap<FieldId, SubmittedField>> {
        self.submitted_data.as_ref()
    }

    /// Replace the root field list: `None` empties the form, `Some(t)`
    /// installs a single fresh root of that type. Either way every store is
    /// reset, so stale per-field data never outlives its field.
    pub fn add_root_field(&mut self, field_type: Option<FieldType>) -> Option<FieldId> {
        self.tree.clear();
        self.reset_stores();
        field_type.map(|t| {
            let options = self.registry.resolve_options(t);
            self.tree.add_root(FieldNode::typed(t, options))
        })
    }

    /// Change a field's type, pruning children invalidated by the new type.
    /// Switching to a different type starts the field over with an empty
    /// value; re-selecting the current type keeps it.
    pub fn retype_field(&mut self, id: FieldId, new_type: FieldType) {
        let unchanged = self.tree.get(id).map(|node| node.field_type) == Some(new_type);
        let options = self.registry.resolve_options(new_type);
        if let Some(pruned) = self.tree.retype(id, new_type, options) {
            self.forget(&pruned);
            if !unchanged {
                self.forget(&[id]);
            }
        }
    }

    /// Attach a fresh unset child under `parent_id`, replacing any existing
    /// nested subtree.
    pub fn add_nested_field(&mut self, parent_id: FieldId) -> Option<FieldId> {
        let (child_id, pruned) = self.tree.add_nested_child(parent_id)?;
        self.forget(&pruned);
        Some(child_id)
    }

    /// Record a value for a field, re-validate it, and report the outcome.
    /// Unknown ids are ignored.
    pub fn change_value(&mut self, id: FieldId, value: &str) -> Vec<Notification> {
        let (label, field_type, options) = match self.tree.get(id) {
            Some(node) => (node.label.clone(), node.field_type, node.options.clone()),
            None => {
                log::debug!("change_value ignored: unknown field id {}", id);
                return Vec::new();
            }
        };

        self.values.insert(id, value.to_string());

        if field_type == FieldType::Dropdown {
            if value.is_empty() {
                self.selected_dropdown_values.remove(&id);
            } else {
                self.selected_dropdown_values.insert(id, value.to_string());
            }
        }

        match self.validator.validate(&label, value, field_type, &options) {
            Some(err) => {
                self.errors.insert(id, err.message.clone());
                vec![Notification::Error(err.message)]
            }
            None => {
                self.errors.remove(&id);
                Vec::new()
            }
        }
    }

    /// Validate the whole tree and, when fully valid, snapshot the current
    /// values as the submission result. Invalid fields each produce one
    /// error notification and block the commit; an empty tree aborts with a
    /// single notification and no state change.
    pub fn submit(&mut self) -> Vec<Notification> {
        if self.tree.count_nodes() == 0 {
            return vec![Notification::Error("No fields to submit!".to_string())];
        }

        let mut notifications = Vec::new();
        let mut errors = HashMap::new();
        for id in self.tree.walk() {
            let node = match self.tree.get(id) {
                Some(node) => node,
                None => continue,
            };
            let value = self.values.get(&id).cloned().unwrap_or_default();
            if let Some(err) =
                self.validator
                    .validate(&node.label, &value, node.field_type, &node.options)
            {
                notifications.push(Notification::Error(err.message.clone()));
                errors.insert(id, err.message);
            }
        }
        self.errors = errors;

        if !notifications.is_empty() {
            log::debug!("submission rejected: {} invalid fields", notifications.len());
            return notifications;
        }

        let mut snapshot = BTreeMap::new();
        for id in self.tree.walk() {
            if let (Some(node), Some(value)) = (self.tree.get(id), self.values.get(&id)) {
                snapshot.insert(
                    id,
                    SubmittedField {
                        label: node.label.clone(),
                        value: value.clone(),
                    },
                );
            }
        }
        log::info!("form submitted with {} fields", self.tree.count_nodes());
        self.submitted_data = Some(snapshot);
        vec![Notification::Success("Form submitted successfully!".to_string())]
    }

    /// The renderable view forest: one view per root, children inlined.
    pub fn field_views(&self) -> Vec<FieldView> {
        self.tree
            .roots()
            .iter()
            .filter_map(|&id| self.view_of(id, None))
            .collect()
    }

    fn view_of(&self, id: FieldId, parent_value: Option<&str>) -> Option<FieldView> {
        let node = self.tree.get(id)?;
        let mut options = node.options.clone();
        // A nested dropdown must not re-offer the value its parent chose.
        if node.field_type == FieldType::Dropdown {
            if let Some(parent_value) = parent_value.filter(|v| !v.is_empty()) {
                options.options.retain(|option| option != parent_value);
            }
        }
        let value = self.values.get(&id).cloned().unwrap_or_default();
        let child = node
            .child
            .and_then(|child_id| self.view_of(child_id, Some(&value)))
            .map(Box::new);
        Some(FieldView {
            id,
            field_type: node.field_type,
            label: node.label.clone(),
            options,
            available_types: node.available_types(),
            value,
            error: self.errors.get(&id).cloned(),
            child,
        })
    }

    fn reset_stores(&mut self) {
        self.values.clear();
        self.errors.clear();
        self.selected_dropdown_values.clear();
        self.submitted_data = None;
    }

    fn forget(&mut self, ids: &[FieldId]) {
        for id in ids {
            self.values.remove(id);
            self.errors.remove(id);
            self.selected_dropdown_values.remove(id);
        }
    }
}
