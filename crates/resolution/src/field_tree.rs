use std::collections::{BTreeMap, HashMap};

use async_graphql_parser::types::{FragmentDefinition, Selection, SelectionSet};
use async_graphql_parser::Positioned;
use async_graphql_value::Name;

/// The caller's selection set, reified as an immutable tree of field names.
///
/// Built once per query, then only queried: the resolution engine checks
/// membership and depth to decide which nested fetches are worth making.
/// Named fragment spreads are expanded through the supplied definitions and
/// inline fragments are flattened into the level they appear on, so type
/// conditions never show up as keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTree {
    children: BTreeMap<String, FieldTree>,
}

impl FieldTree {
    pub fn from_selection_set(
        selection_set: &SelectionSet,
        fragments: &HashMap<Name, Positioned<FragmentDefinition>>,
    ) -> FieldTree {
        let mut tree = FieldTree::default();
        tree.collect(selection_set, fragments);
        tree
    }

    fn collect(
        &mut self,
        selection_set: &SelectionSet,
        fragments: &HashMap<Name, Positioned<FragmentDefinition>>,
    ) {
        for selection in &selection_set.items {
            match &selection.node {
                Selection::Field(field) => {
                    let child =
                        FieldTree::from_selection_set(&field.node.selection_set.node, fragments);
                    self.insert(field.node.name.node.as_str(), child);
                }
                Selection::FragmentSpread(spread) => {
                    // A validated query cannot spread an undefined fragment.
                    if let Some(fragment) = fragments.get(&spread.node.fragment_name.node) {
                        self.collect(&fragment.node.selection_set.node, fragments);
                    }
                }
                Selection::InlineFragment(fragment) => {
                    self.collect(&fragment.node.selection_set.node, fragments);
                }
            }
        }
    }

    fn insert(&mut self, name: &str, child: FieldTree) {
        match self.children.get_mut(name) {
            Some(existing) => existing.merge(child),
            None => {
                self.children.insert(name.to_owned(), child);
            }
        }
    }

    fn merge(&mut self, other: FieldTree) {
        for (name, child) in other.children {
            match self.children.get_mut(&name) {
                Some(existing) => existing.merge(child),
                None => {
                    self.children.insert(name, child);
                }
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    pub fn child(&self, name: &str) -> Option<&FieldTree> {
        self.children.get(name)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether anything beyond the bare `id` was selected under this node.
    /// This is what separates a shallow reference stub from a nested fetch.
    pub fn deeper_than_id(&self) -> bool {
        self.children.keys().any(|name| name != "id")
    }
}
