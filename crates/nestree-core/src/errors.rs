use thiserror::Error;

use crate::model::Node;

/// Result type alias using OperationError
pub type Result<T> = std::result::Result<T, OperationError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, log assertions and CLI exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    InvalidNode,
    DuplicateNode,
    NotFound,
    ParentNotFound,
    CycleDetected,
    InvalidOrderKey,
    InvalidOrderSequence,
    InvalidUpdate,
    InvalidMove,

    // External payloads
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidNode => "ERR_INVALID_NODE",
            ExErrorKind::DuplicateNode => "ERR_DUPLICATE_NODE",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::ParentNotFound => "ERR_PARENT_NOT_FOUND",
            ExErrorKind::CycleDetected => "ERR_CYCLE_DETECTED",
            ExErrorKind::InvalidOrderKey => "ERR_INVALID_ORDER_KEY",
            ExErrorKind::InvalidOrderSequence => "ERR_INVALID_ORDER_SEQUENCE",
            ExErrorKind::InvalidUpdate => "ERR_INVALID_UPDATE",
            ExErrorKind::InvalidMove => "ERR_INVALID_MOVE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus optional context (operation, node id,
/// parent id) and a human-readable message. Engine failures convert into it
/// via `From<OperationError>`; the JSON adapter builds it directly.
#[derive(Debug, Clone, PartialEq)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    node_id: Option<String>,
    parent_id: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            node_id: None,
            parent_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add node ID context
    pub fn with_node_id(mut self, id: impl Into<String>) -> Self {
        self.node_id = Some(id.into());
        self
    }

    /// Add parent ID context
    pub fn with_parent_id(mut self, id: impl Into<String>) -> Self {
        self.parent_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the node ID context, if any
    pub fn node_id(&self) -> Option<&str> {
        self.node_id.as_deref()
    }

    /// Get the parent ID context, if any
    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(node_id) = &self.node_id {
            write!(f, " (node_id: {})", node_id)?;
        }
        if let Some(parent_id) = &self.parent_id {
            write!(f, " (parent_id: {})", parent_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Failure taxonomy returned by every engine operation
///
/// Each variant names the violated invariant and the identifiers involved.
/// A returned error always means the input snapshot was left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// Node payload is malformed (e.g. empty id), or the node cannot take part
    /// in the operation at all (the root cannot be deleted)
    #[error("Invalid node: {node:?}")]
    InvalidNode { node: Node },

    /// Node id is already present in the tree, or listed twice under one parent
    #[error("Duplicate node: {node_id}")]
    DuplicateNode { node_id: String },

    /// Node id does not resolve to a node
    #[error("Node not found: {node_id}")]
    NodeNotFound { node_id: String },

    /// The node's parent does not resolve, or does not list the node
    #[error("Parent not found for node: {node_id}")]
    ParentNotFound { node_id: String },

    /// Following parent links revisits a node
    #[error("Cycle detected: {}", .path.join(" -> "))]
    CycleDetected { path: Vec<String> },

    /// Order key is not a decimal integer
    #[error("Invalid order key {order_key:?} on node {node_id}")]
    InvalidOrderKey { node_id: String, order_key: String },

    /// Sibling keys are not strictly increasing in list order
    #[error("Invalid order sequence under parent {parent_id}: {sequence:?}")]
    InvalidOrderSequence {
        parent_id: String,
        sequence: Vec<String>,
    },

    /// Update payload touches a structural field
    #[error("Invalid update of node {}: {reason}", .node.id)]
    InvalidUpdate { node: Node, reason: String },

    /// Move request is malformed (self-parenting or missing endpoint)
    #[error("Invalid move of node {node_id} to parent {parent_id}: {reason}")]
    InvalidMove {
        node_id: String,
        parent_id: String,
        reason: String,
    },
}

impl OperationError {
    /// Short stable name of the variant, as used in move rejection reasons
    pub fn kind_name(&self) -> &'static str {
        match self {
            OperationError::InvalidNode { .. } => "InvalidNode",
            OperationError::DuplicateNode { .. } => "DuplicateNode",
            OperationError::NodeNotFound { .. } => "NodeNotFound",
            OperationError::ParentNotFound { .. } => "ParentNotFound",
            OperationError::CycleDetected { .. } => "CycleDetected",
            OperationError::InvalidOrderKey { .. } => "InvalidOrderKey",
            OperationError::InvalidOrderSequence { .. } => "InvalidOrderSequence",
            OperationError::InvalidUpdate { .. } => "InvalidUpdate",
            OperationError::InvalidMove { .. } => "InvalidMove",
        }
    }
}

/// Conversion from OperationError to ExError
impl From<OperationError> for ExError {
    fn from(err: OperationError) -> Self {
        match err {
            OperationError::InvalidNode { node } => ExError::new(ExErrorKind::InvalidNode)
                .with_node_id(node.id)
                .with_message("Invalid node"),
            OperationError::DuplicateNode { node_id } => ExError::new(ExErrorKind::DuplicateNode)
                .with_node_id(node_id)
                .with_message("Node id already present"),
            OperationError::NodeNotFound { node_id } => ExError::new(ExErrorKind::NotFound)
                .with_node_id(node_id)
                .with_message("Node not found"),
            OperationError::ParentNotFound { node_id } => {
                ExError::new(ExErrorKind::ParentNotFound)
                    .with_node_id(node_id)
                    .with_message("Parent not found or does not list the node")
            }
            OperationError::CycleDetected { path } => ExError::new(ExErrorKind::CycleDetected)
                .with_message(format!("Cycle through {}", path.join(" -> "))),
            OperationError::InvalidOrderKey { node_id, order_key } => {
                ExError::new(ExErrorKind::InvalidOrderKey)
                    .with_node_id(node_id)
                    .with_message(format!("Order key {:?} is not an integer", order_key))
            }
            OperationError::InvalidOrderSequence {
                parent_id,
                sequence,
            } => ExError::new(ExErrorKind::InvalidOrderSequence)
                .with_parent_id(parent_id)
                .with_message(format!(
                    "Order keys not strictly increasing over {:?}",
                    sequence
                )),
            OperationError::InvalidUpdate { node, reason } => {
                ExError::new(ExErrorKind::InvalidUpdate)
                    .with_node_id(node.id)
                    .with_message(reason)
            }
            OperationError::InvalidMove {
                node_id,
                parent_id,
                reason,
            } => ExError::new(ExErrorKind::InvalidMove)
                .with_node_id(node_id)
                .with_parent_id(parent_id)
                .with_message(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_prefixed_and_distinct() {
        let kinds = [
            ExErrorKind::InvalidInput,
            ExErrorKind::InvalidNode,
            ExErrorKind::DuplicateNode,
            ExErrorKind::NotFound,
            ExErrorKind::ParentNotFound,
            ExErrorKind::CycleDetected,
            ExErrorKind::InvalidOrderKey,
            ExErrorKind::InvalidOrderSequence,
            ExErrorKind::InvalidUpdate,
            ExErrorKind::InvalidMove,
            ExErrorKind::Serialization,
        ];
        let codes: std::collections::HashSet<_> = kinds.iter().map(|k| k.code()).collect();
        assert_eq!(codes.len(), kinds.len());
        assert!(codes.iter().all(|c| c.starts_with("ERR_")));
    }

    #[test]
    fn test_display_includes_context() {
        let err = ExError::new(ExErrorKind::InvalidMove)
            .with_op("move_node")
            .with_node_id("a")
            .with_parent_id("b")
            .with_message("Node cannot be its own parent");
        let text = err.to_string();
        assert!(text.starts_with("[ERR_INVALID_MOVE]"));
        assert!(text.contains("move_node"));
        assert!(text.contains("(node_id: a)"));
        assert!(text.contains("(parent_id: b)"));
    }

    #[test]
    fn test_operation_error_conversion() {
        let ex: ExError = OperationError::NodeNotFound {
            node_id: "n1".to_string(),
        }
        .into();
        assert_eq!(ex.kind(), ExErrorKind::NotFound);
        assert_eq!(ex.node_id(), Some("n1"));

        let ex: ExError = OperationError::CycleDetected {
            path: vec!["a".to_string(), "b".to_string(), "a".to_string()],
        }
        .into();
        assert_eq!(ex.code(), "ERR_CYCLE_DETECTED");
        assert!(ex.message().contains("a -> b -> a"));
    }

    #[test]
    fn test_cycle_display() {
        let err = OperationError::CycleDetected {
            path: vec!["x".to_string(), "y".to_string(), "x".to_string()],
        };
        assert_eq!(err.to_string(), "Cycle detected: x -> y -> x");
    }
}
