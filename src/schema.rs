use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use uuid::Uuid;

/// Tag identifying what kind of input a field renders and validates as.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// A field whose type has not been chosen yet.
    #[default]
    #[serde(rename = "")]
    Unset,
    Text,
    Dropdown,
    Radio,
    File,
    Checkbox,
    Country,
    Date,
    Phone,
}

impl FieldType {
    /// The concrete types offered by a type selector, in menu order.
    pub const ALL: [FieldType; 8] = [
        FieldType::Text,
        FieldType::Dropdown,
        FieldType::Radio,
        FieldType::File,
        FieldType::Checkbox,
        FieldType::Country,
        FieldType::Date,
        FieldType::Phone,
    ];

    /// Get the type tag as a string slice.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Unset => "",
            FieldType::Text => "text",
            FieldType::Dropdown => "dropdown",
            FieldType::Radio => "radio",
            FieldType::File => "file",
            FieldType::Checkbox => "checkbox",
            FieldType::Country => "country",
            FieldType::Date => "date",
            FieldType::Phone => "phone",
        }
    }

    /// Capitalized tag, the way a type selector displays it.
    pub fn display_name(&self) -> &'static str {
        match self {
            FieldType::Unset => "",
            FieldType::Text => "Text",
            FieldType::Dropdown => "Dropdown",
            FieldType::Radio => "Radio",
            FieldType::File => "File",
            FieldType::Checkbox => "Checkbox",
            FieldType::Country => "Country",
            FieldType::Date => "Date",
            FieldType::Phone => "Phone",
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, FieldType::Unset)
    }
}

impl From<&str> for FieldType {
    /// Unknown tags map to `Unset` so stale config never panics downstream.
    fn from(s: &str) -> Self {
        match s {
            "text" => FieldType::Text,
            "dropdown" => FieldType::Dropdown,
            "radio" => FieldType::Radio,
            "file" => FieldType::File,
            "checkbox" => FieldType::Checkbox,
            "country" => FieldType::Country,
            "date" => FieldType::Date,
            "phone" => FieldType::Phone,
            _ => FieldType::Unset,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One selectable country for country fields.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CountryOption {
    pub code: String,
    pub name: String,
}

/// Per-type configuration for a field instance, resolved from the registry
/// when the field is (re)typed. Only the slots relevant to the field's type
/// carry data; the rest stay at their defaults.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct FieldOptions {
    pub label: String,
    pub placeholder: String,
    pub options: Vec<String>,
    /// Comma-separated extension list (".pdf,.jpg") or "*" for any.
    #[serde(rename = "acceptedTypes")]
    pub accepted_types: String,
    pub countries: Vec<CountryOption>,
    /// ISO country code to dialing prefix.
    #[serde(rename = "countryCodes")]
    pub country_codes: BTreeMap<String, String>,
}

impl Default for FieldOptions {
    /// The safe fallback record handed out for unknown or unset types, so
    /// downstream code never branches on missing options.
    fn default() -> Self {
        Self {
            label: "Unnamed Field".to_string(),
            placeholder: String::new(),
            options: Vec::new(),
            accepted_types: "*".to_string(),
            countries: Vec::new(),
            country_codes: BTreeMap::new(),
        }
    }
}

/// Process-unique identifier for a field node. Uniqueness is the only
/// guarantee; ids carry no ordering.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(Uuid);

impl FieldId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FieldId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One field in the builder tree. A node holds at most one nested child at a
/// time; adding a nested field replaces any previous child subtree.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FieldNode {
    pub id: FieldId,
    pub field_type: FieldType,
    /// Display label, taken from the resolved options at the last retype.
    pub label: String,
    pub child: Option<FieldId>,
    pub options: FieldOptions,
    /// Types this node's selector must not offer; always contains the
    /// parent's current concrete type for nested nodes.
    pub excluded_types: HashSet<FieldType>,
}

impl FieldNode {
    /// A typed node with label and options resolved from the registry.
    pub fn typed(field_type: FieldType, options: FieldOptions) -> Self {
        Self {
            id: FieldId::new(),
            field_type,
            label: options.label.clone(),
            child: None,
            options,
            excluded_types: HashSet::new(),
        }
    }

    /// A fresh node awaiting a type selection.
    pub fn unset(label: &str, excluded_types: HashSet<FieldType>) -> Self {
        Self {
            id: FieldId::new(),
            field_type: FieldType::Unset,
            label: label.to_string(),
            child: None,
            options: FieldOptions::default(),
            excluded_types,
        }
    }

    /// The concrete types this node's selector may offer.
    pub fn available_types(&self) -> Vec<FieldType> {
        FieldType::ALL
            .iter()
            .copied()
            .filter(|t| !self.excluded_types.contains(t))
            .collect()
    }
}

/// The form under construction: nodes in an arena keyed by id, with an
/// ordered root list. Mutations are localized rewrites; pruned subtrees are
/// removed from the arena so stale ids never resolve.
#[derive(Debug, Default, Clone)]
pub struct FieldTree {
    nodes: HashMap<FieldId, FieldNode>,
    roots: Vec<FieldId>,
}

impl FieldTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roots(&self) -> &[FieldId] {
        &self.roots
    }

    pub fn get(&self, id: FieldId) -> Option<&FieldNode> {
        self.nodes.get(&id)
    }

    pub fn is_root(&self, id: FieldId) -> bool {
        self.roots.contains(&id)
    }

    /// The node whose child slot points at `id`, if any.
    pub fn parent_of(&self, id: FieldId) -> Option<FieldId> {
        self.nodes
            .iter()
            .find(|(_, node)| node.child == Some(id))
            .map(|(parent_id, _)| *parent_id)
    }

    /// Total node count across the whole tree, roots included.
    pub fn count_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Depth-first pre-order traversal over every root chain.
    pub fn walk(&self) -> Vec<FieldId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        for &root in &self.roots {
            let mut next = Some(root);
            while let Some(id) = next {
                order.push(id);
                next = self.get(id).and_then(|node| node.child);
            }
        }
        order
    }

    pub fn add_root(&mut self, node: FieldNode) -> FieldId {
        let id = node.id;
        self.nodes.insert(id, node);
        self.roots.push(id);
        id
    }

    /// Drop every node. Callers are responsible for resetting any stores
    /// keyed by the removed ids.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
    }

    /// Change a node's type, re-resolving its label and options. A root
    /// sheds its child when the child's type equals the new type or is still
    /// unset; a nested node sheds its child only on a type match. A
    /// surviving child's excluded set is recomputed for the new parent type.
    ///
    /// Returns the pruned ids, or `None` when `id` is unknown (silent no-op).
    pub fn retype(
        &mut self,
        id: FieldId,
        new_type: FieldType,
        options: FieldOptions,
    ) -> Option<Vec<FieldId>> {
        if !self.nodes.contains_key(&id) {
            log::debug!("retype ignored: unknown field id {}", id);
            return None;
        }
        let is_root = self.is_root(id);
        let mut pruned = Vec::new();
        if let Some(child_id) = self.nodes.get(&id).and_then(|node| node.child) {
            let child_type = self.nodes.get(&child_id).map(|node| node.field_type);
            let drop_child = match child_type {
                Some(t) => t == new_type || (is_root && t.is_unset()),
                None => true,
            };
            if drop_child {
                pruned = self.remove_subtree(child_id);
            } else if let Some(child) = self.nodes.get_mut(&child_id) {
                child.excluded_types = if new_type.is_unset() {
                    HashSet::new()
                } else {
                    HashSet::from([new_type])
                };
            }
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.field_type = new_type;
            node.label = options.label.clone();
            node.options = options;
            if !pruned.is_empty() {
                node.child = None;
            }
        }
        Some(pruned)
    }

    /// Attach a fresh unset child under `parent_id`, replacing any existing
    /// child subtree. The child's selector excludes the parent's current
    /// concrete type.
    ///
    /// Returns the new child id plus the pruned ids, or `None` when the
    /// parent is unknown (silent no-op).
    pub fn add_nested_child(&mut self, parent_id: FieldId) -> Option<(FieldId, Vec<FieldId>)> {
        let (parent_type, previous_child) = match self.nodes.get(&parent_id) {
            Some(parent) => (parent.field_type, parent.child),
            None => {
                log::debug!("add_nested_child ignored: unknown field id {}", parent_id);
                return None;
            }
        };
        let pruned = previous_child
            .map(|child_id| self.remove_subtree(child_id))
            .unwrap_or_default();
        let excluded = if parent_type.is_unset() {
            HashSet::new()
        } else {
            HashSet::from([parent_type])
        };
        let child = FieldNode::unset("Nested Field", excluded);
        let child_id = child.id;
        self.nodes.insert(child_id, child);
        if let Some(parent) = self.nodes.get_mut(&parent_id) {
            parent.child = Some(child_id);
        }
        Some((child_id, pruned))
    }

    fn remove_subtree(&mut self, id: FieldId) -> Vec<FieldId> {
        let mut removed = Vec::new();
        let mut next = Some(id);
        while let Some(current) = next {
            next = self.nodes.remove(&current).and_then(|node| node.child);
            removed.push(current);
        }
        removed
    }
}
