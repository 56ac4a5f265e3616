//! Boundary validation of serialized trees
//!
//! Works on raw `serde_json::Value`s so every problem can be reported with
//! the offending key, rather than as a generic deserialization failure.

use std::collections::{BTreeMap, HashSet};

use nestree_core::rules::validation::validate_tree;
use nestree_core::{Node, TreeState};
use serde_json::{Map, Value};

use crate::envelope::{SerializedTree, FORMAT_VERSION};
use crate::{invalid_tree, malformed, Result};

const NODE_FIELDS: [&str; 4] = ["id", "name", "parentId", "orderKey"];

/// Parse envelope JSON text (as written by `to_envelope_string`)
///
/// # Errors
/// `Serialization` for text that is not an envelope, otherwise as
/// [`deserialize_tree_state`].
pub fn from_envelope_str(text: &str) -> Result<TreeState> {
    let envelope: SerializedTree = serde_json::from_str(text).map_err(malformed)?;
    deserialize_tree_state(&envelope)
}

/// Validate and load a version-1 envelope
///
/// No `TreeState` is produced unless the payload satisfies every tree
/// invariant.
///
/// # Errors
/// * `Serialization` - If `tree` is not valid JSON
/// * `InvalidInput` - For any structural problem, with a message naming
///   the offending key
pub fn deserialize_tree_state(payload: &SerializedTree) -> Result<TreeState> {
    if payload.version != FORMAT_VERSION {
        return Err(invalid_tree(format!(
            "unsupported version {}, expected {}",
            payload.version, FORMAT_VERSION
        )));
    }

    let raw: Value = serde_json::from_str(&payload.tree).map_err(malformed)?;
    let Some(raw) = raw.as_object() else {
        return Err(invalid_tree("tree must be a JSON object"));
    };

    let root_id = match raw.get("rootId") {
        Some(Value::String(id)) if !id.trim().is_empty() => id.clone(),
        _ => return Err(invalid_tree("rootId must be a non-empty string")),
    };

    let nodes = parse_nodes(object_field(raw, "nodesById")?)?;
    let children = parse_children(object_field(raw, "childrenById")?)?;

    check_root(&root_id, &nodes)?;
    check_lists(&nodes, &children)?;
    check_membership(&root_id, &nodes, &children)?;
    check_order(&nodes, &children)?;

    let state = TreeState::from_parts(root_id, nodes.into_values(), children);
    validate_tree(&state).map_err(invalid_tree)?;

    tracing::debug!(nodes = state.len(), "loaded serialized tree");
    Ok(state)
}

fn object_field<'a>(raw: &'a Map<String, Value>, field: &str) -> Result<&'a Map<String, Value>> {
    raw.get(field)
        .and_then(Value::as_object)
        .ok_or_else(|| invalid_tree(format!("{field} must be an object")))
}

fn parse_nodes(raw: &Map<String, Value>) -> Result<BTreeMap<String, Node>> {
    let mut nodes = BTreeMap::new();

    for (key, value) in raw {
        let Some(fields) = value.as_object() else {
            return Err(invalid_tree(format!("node \"{key}\" must be an object")));
        };

        for field in NODE_FIELDS {
            if !fields.contains_key(field) {
                return Err(invalid_tree(format!(
                    "node \"{key}\" is missing required property \"{field}\""
                )));
            }
        }

        let id = non_empty_string(key, fields, "id")?;
        let name = match fields.get("name") {
            Some(Value::String(name)) => name.clone(),
            _ => return Err(invalid_property(key, "name", "a string")),
        };
        let parent_id = match fields.get("parentId") {
            Some(Value::Null) => None,
            Some(Value::String(parent)) if !parent.trim().is_empty() => Some(parent.clone()),
            _ => return Err(invalid_property(key, "parentId", "null or a non-empty string")),
        };
        let order_key = non_empty_string(key, fields, "orderKey")?;

        if id != *key {
            return Err(invalid_tree(format!(
                "nodesById key \"{key}\" does not match nested node id \"{id}\""
            )));
        }

        nodes.insert(
            key.clone(),
            Node {
                id,
                name,
                parent_id,
                order_key,
            },
        );
    }

    Ok(nodes)
}

fn non_empty_string(key: &str, fields: &Map<String, Value>, field: &str) -> Result<String> {
    match fields.get(field) {
        Some(Value::String(value)) if !value.trim().is_empty() => Ok(value.clone()),
        _ => Err(invalid_property(key, field, "a non-empty string")),
    }
}

fn invalid_property(key: &str, field: &str, expected: &str) -> nestree_core::ExError {
    invalid_tree(format!(
        "node \"{key}\" property \"{field}\" must be {expected}"
    ))
}

fn parse_children(raw: &Map<String, Value>) -> Result<BTreeMap<String, Vec<String>>> {
    let mut children = BTreeMap::new();

    for (parent_id, value) in raw {
        let Some(items) = value.as_array() else {
            return Err(invalid_tree(format!(
                "children of parent \"{parent_id}\" must be an array"
            )));
        };

        let mut list = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::String(id) if !id.trim().is_empty() => list.push(id.clone()),
                _ => {
                    return Err(invalid_tree(format!(
                        "children array for parent \"{parent_id}\" contains a value that is not a non-empty string id"
                    )))
                }
            }
        }
        children.insert(parent_id.clone(), list);
    }

    Ok(children)
}

fn check_root(root_id: &str, nodes: &BTreeMap<String, Node>) -> Result<()> {
    let Some(root) = nodes.get(root_id) else {
        return Err(invalid_tree(format!(
            "rootId \"{root_id}\" is not present in nodesById"
        )));
    };
    if root.parent_id.is_some() {
        return Err(invalid_tree(format!(
            "root node \"{root_id}\" must have parentId null"
        )));
    }
    Ok(())
}

fn check_lists(
    nodes: &BTreeMap<String, Node>,
    children: &BTreeMap<String, Vec<String>>,
) -> Result<()> {
    for (parent_id, list) in children {
        if !nodes.contains_key(parent_id) {
            return Err(invalid_tree(format!(
                "childrenById references unknown parent \"{parent_id}\""
            )));
        }

        let mut seen = HashSet::with_capacity(list.len());
        for child_id in list {
            if !nodes.contains_key(child_id) {
                return Err(invalid_tree(format!(
                    "child id \"{child_id}\" under parent \"{parent_id}\" has no matching node"
                )));
            }
            if !seen.insert(child_id.as_str()) {
                return Err(invalid_tree(format!(
                    "parent \"{parent_id}\" lists duplicate child id \"{child_id}\""
                )));
            }
        }
    }
    Ok(())
}

fn check_membership(
    root_id: &str,
    nodes: &BTreeMap<String, Node>,
    children: &BTreeMap<String, Vec<String>>,
) -> Result<()> {
    let listed = |parent_id: &str, child_id: &str| {
        children
            .get(parent_id)
            .is_some_and(|list| list.iter().any(|id| id == child_id))
    };

    for node in nodes.values() {
        if node.id == root_id {
            continue;
        }
        let Some(parent_id) = node.parent_id.as_deref() else {
            return Err(invalid_tree(format!(
                "non-root node \"{}\" has parentId null",
                node.id
            )));
        };
        if !nodes.contains_key(parent_id) {
            return Err(invalid_tree(format!(
                "node \"{}\" references unknown parent \"{parent_id}\"",
                node.id
            )));
        }
        if !listed(parent_id, &node.id) {
            return Err(invalid_tree(format!(
                "node \"{}\" is not listed under its parent \"{parent_id}\" in childrenById",
                node.id
            )));
        }
    }

    for (parent_id, list) in children {
        for child_id in list {
            let declared = nodes.get(child_id).and_then(|n| n.parent_id.as_deref());
            if declared != Some(parent_id.as_str()) {
                return Err(invalid_tree(format!(
                    "child id \"{child_id}\" is listed under parent \"{parent_id}\" but its parentId is {}",
                    declared.map_or_else(|| "null".to_string(), |p| format!("\"{p}\""))
                )));
            }
        }
    }

    Ok(())
}

fn check_order(
    nodes: &BTreeMap<String, Node>,
    children: &BTreeMap<String, Vec<String>>,
) -> Result<()> {
    for (parent_id, list) in children {
        let mut previous: Option<i64> = None;
        for child_id in list {
            let Some(node) = nodes.get(child_id) else {
                continue;
            };
            let Ok(key) = node.order_key.trim().parse::<i64>() else {
                return Err(invalid_tree(format!(
                    "InvalidOrderKey \"{}\" on node \"{child_id}\"",
                    node.order_key
                )));
            };
            if previous.is_some_and(|prev| key <= prev) {
                return Err(invalid_tree(format!(
                    "InvalidOrderSequence for parent \"{parent_id}\""
                )));
            }
            previous = Some(key);
        }
    }
    Ok(())
}
