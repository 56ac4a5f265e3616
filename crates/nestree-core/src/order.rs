//! Order-key allocation
//!
//! Sibling order keys are decimal `i64` strings spaced `order_gap` apart.
//! New keys land in the gap between two neighbors when there is room;
//! when the gap is exhausted (or arithmetic would overflow) the whole
//! sibling list is renormalized to `0, gap, 2*gap, ...`.

use crate::config::EngineConfig;
use crate::errors::{OperationError, Result};
use crate::model::{Node, TreeState};

/// Outcome of allocating a key for a node joining a sibling list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// Final order key of the new node
    pub order_key: String,
    /// Index in the sibling list where the new node goes
    pub position: usize,
    /// Full `(id, key)` remapping in final list order (new node included),
    /// present only when the list had to be renumbered
    pub renormalized: Option<Vec<(String, String)>>,
}

/// Parse a node's order key, failing with `InvalidOrderKey`
pub fn parse_order_key(node: &Node) -> Result<i64> {
    parse_key(&node.id, &node.order_key)
}

fn parse_key(node_id: &str, order_key: &str) -> Result<i64> {
    order_key
        .trim()
        .parse::<i64>()
        .map_err(|_| OperationError::InvalidOrderKey {
            node_id: node_id.to_string(),
            order_key: order_key.to_string(),
        })
}

/// Render a numeric key in canonical form
pub fn format_key(key: i64) -> String {
    key.to_string()
}

/// Evenly spaced keys for `ids`, in the given order
///
/// The step is `order_gap`, shrunk when needed so the last key still fits
/// in an `i64`.
pub fn normalized_keys(ids: &[String], config: &EngineConfig) -> Vec<(String, String)> {
    let spans = i64::try_from(ids.len().saturating_sub(1)).unwrap_or(i64::MAX);
    let step = match spans {
        0 => config.effective_gap(),
        spans => config.effective_gap().min(i64::MAX / spans),
    };
    ids.iter()
        .zip((0..).map(|i: i64| i.saturating_mul(step)))
        .map(|(id, key)| (id.clone(), format_key(key)))
        .collect()
}

/// Allocate an order key for `candidate` under `parent_id`
///
/// The candidate must not be listed under `parent_id` already. Siblings are
/// read in list order and are expected to have strictly increasing keys.
///
/// # Errors
/// `InvalidOrderKey` if the candidate's requested key or any sibling key is
/// not a decimal integer.
pub fn allocate_order_key(
    state: &TreeState,
    parent_id: &str,
    candidate: &Node,
    config: &EngineConfig,
) -> Result<Allocation> {
    let sibling_ids = state.child_ids(parent_id);
    let siblings = sibling_keys(state, sibling_ids)?;
    let gap = config.effective_gap();

    if candidate.has_blank_order_key() {
        let order_key = match siblings.iter().map(|(_, key)| *key).max() {
            None => Some(0),
            Some(max) => max.checked_add(gap),
        };
        return Ok(match order_key {
            Some(key) => placed(key, siblings.len()),
            None => renormalize(sibling_ids, &candidate.id, siblings.len(), config),
        });
    }

    let requested = parse_key(&candidate.id, &candidate.order_key)?;
    if siblings.is_empty() {
        return Ok(placed(requested, 0));
    }

    let split = siblings.partition_point(|(_, key)| *key <= requested);
    let lower = split.checked_sub(1).map(|i| siblings[i].1);
    let upper = siblings.get(split).map(|(_, key)| *key);

    let order_key = match (lower, upper) {
        (Some(lower), None) => lower.checked_add(gap),
        (None, Some(upper)) => upper.checked_sub(gap),
        (Some(lower), Some(upper)) => upper
            .checked_sub(lower)
            .filter(|span| *span > config.effective_min_gap())
            .and_then(|span| lower.checked_add(span / 2)),
        (None, None) => Some(requested),
    };

    Ok(match order_key {
        Some(key) => placed(key, split),
        None => renormalize(sibling_ids, &candidate.id, split, config),
    })
}

fn placed(key: i64, position: usize) -> Allocation {
    Allocation {
        order_key: format_key(key),
        position,
        renormalized: None,
    }
}

fn renormalize(
    sibling_ids: &[String],
    candidate_id: &str,
    position: usize,
    config: &EngineConfig,
) -> Allocation {
    let mut ids = sibling_ids.to_vec();
    let position = position.min(ids.len());
    ids.insert(position, candidate_id.to_string());
    let keys = normalized_keys(&ids, config);

    tracing::debug!(
        node_id = candidate_id,
        siblings = ids.len(),
        "order keys exhausted, renormalizing sibling list"
    );

    Allocation {
        order_key: keys[position].1.clone(),
        position,
        renormalized: Some(keys),
    }
}

fn sibling_keys(state: &TreeState, sibling_ids: &[String]) -> Result<Vec<(String, i64)>> {
    sibling_ids
        .iter()
        .filter_map(|id| state.node(id))
        .map(|node| Ok((node.id.clone(), parse_order_key(node)?)))
        .collect()
}
