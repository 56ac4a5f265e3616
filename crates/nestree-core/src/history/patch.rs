use std::cmp::Ordering;

use im::OrdMap;

use crate::model::{Node, TreeState};

/// Entry-level edit of a snapshot
///
/// `Some(value)` writes an entry, `None` removes it. Entries not named are
/// left alone, so applying a patch shares everything else with its input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreePatch {
    pub root_id: Option<String>,
    pub nodes: Vec<(String, Option<Node>)>,
    pub children: Vec<(String, Option<Vec<String>>)>,
}

impl TreePatch {
    /// True if applying the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.root_id.is_none() && self.nodes.is_empty() && self.children.is_empty()
    }

    /// Number of entries written or removed
    pub fn len(&self) -> usize {
        self.nodes.len() + self.children.len() + usize::from(self.root_id.is_some())
    }

    /// Produce a new snapshot with the patch applied
    pub fn apply_to(&self, state: &TreeState) -> TreeState {
        let mut next = state.clone();

        if let Some(root_id) = &self.root_id {
            next.replace_root_id(root_id.clone());
        }
        for (id, node) in &self.nodes {
            match node {
                Some(node) => next.put_node(node.clone()),
                None => {
                    next.take_node(id);
                }
            }
        }
        for (id, children) in &self.children {
            match children {
                Some(children) => next.put_children(id, children.clone()),
                None => {
                    next.take_children(id);
                }
            }
        }

        next
    }
}

/// Reversible difference between two snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeDelta {
    /// Turns the older snapshot into the newer one
    pub forward: TreePatch,
    /// Turns the newer snapshot back into the older one
    pub inverse: TreePatch,
}

impl TreeDelta {
    /// Compute the minimal delta taking `old` to `new`
    pub fn between(old: &TreeState, new: &TreeState) -> Self {
        let (forward_nodes, inverse_nodes) = diff_maps(old.nodes_by_id(), new.nodes_by_id());
        let (forward_children, inverse_children) =
            diff_maps(old.children_by_id(), new.children_by_id());

        let (forward_root, inverse_root) = if old.root_id() == new.root_id() {
            (None, None)
        } else {
            (
                Some(new.root_id().to_string()),
                Some(old.root_id().to_string()),
            )
        };

        Self {
            forward: TreePatch {
                root_id: forward_root,
                nodes: forward_nodes,
                children: forward_children,
            },
            inverse: TreePatch {
                root_id: inverse_root,
                nodes: inverse_nodes,
                children: inverse_children,
            },
        }
    }

    /// True if the two snapshots were equal
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

type EntryEdits<V> = Vec<(String, Option<V>)>;

/// Merge-join two ordered maps into (forward, inverse) entry edits
fn diff_maps<V: Clone + PartialEq>(
    old: &OrdMap<String, V>,
    new: &OrdMap<String, V>,
) -> (EntryEdits<V>, EntryEdits<V>) {
    let mut forward = Vec::new();
    let mut inverse = Vec::new();
    let mut old_iter = old.iter().peekable();
    let mut new_iter = new.iter().peekable();

    loop {
        match (old_iter.peek().copied(), new_iter.peek().copied()) {
            (None, None) => break,
            (Some((key, old_value)), None) => {
                forward.push((key.clone(), None));
                inverse.push((key.clone(), Some(old_value.clone())));
                old_iter.next();
            }
            (None, Some((key, new_value))) => {
                forward.push((key.clone(), Some(new_value.clone())));
                inverse.push((key.clone(), None));
                new_iter.next();
            }
            (Some((old_key, old_value)), Some((new_key, new_value))) => {
                match old_key.cmp(new_key) {
                    Ordering::Less => {
                        forward.push((old_key.clone(), None));
                        inverse.push((old_key.clone(), Some(old_value.clone())));
                        old_iter.next();
                    }
                    Ordering::Greater => {
                        forward.push((new_key.clone(), Some(new_value.clone())));
                        inverse.push((new_key.clone(), None));
                        new_iter.next();
                    }
                    Ordering::Equal => {
                        if old_value != new_value {
                            forward.push((new_key.clone(), Some(new_value.clone())));
                            inverse.push((old_key.clone(), Some(old_value.clone())));
                        }
                        old_iter.next();
                        new_iter.next();
                    }
                }
            }
        }
    }

    (forward, inverse)
}
