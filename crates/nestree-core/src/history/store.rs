use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::time::Instant;

use nestree_core_types::IdSource;

use super::patch::TreeDelta;
use crate::apply::apply;
use crate::commands::Command;
use crate::config::HistoryConfig;
use crate::errors::Result;
use crate::model::{create_tree_state, Node, TreeState};
use crate::{log_op_end, log_op_error, log_op_start};

/// Handle returned by [`HistoryStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&TreeState)>;

#[derive(Debug, Clone)]
struct HistoryEntry {
    label: &'static str,
    delta: TreeDelta,
}

/// Stateful wrapper adding undo/redo and change notification to the engine
///
/// Holds the current snapshot plus undo and redo stacks of `TreeDelta`s.
/// Every successful operation is exactly one undo step. Listeners run
/// synchronously after the new snapshot is in place.
///
/// The store is single-owner: wrap it in whatever synchronization the
/// caller needs. There is no process-wide default instance.
pub struct HistoryStore {
    state: TreeState,
    undo_stack: VecDeque<HistoryEntry>,
    redo_stack: VecDeque<HistoryEntry>,
    listeners: BTreeMap<ListenerId, Listener>,
    next_listener_id: u64,
    config: HistoryConfig,
}

impl HistoryStore {
    /// Create a store over a fresh single-root tree with default config
    pub fn new(ids: &mut dyn IdSource) -> Self {
        Self::with_config(ids, HistoryConfig::default())
    }

    /// Create a store over a fresh single-root tree
    pub fn with_config(ids: &mut dyn IdSource, config: HistoryConfig) -> Self {
        Self::with_state(create_tree_state(ids), config)
    }

    /// Create a store over an existing snapshot with empty history
    pub fn with_state(state: TreeState, config: HistoryConfig) -> Self {
        Self {
            state,
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            listeners: BTreeMap::new(),
            next_listener_id: 0,
            config,
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> &TreeState {
        &self.state
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Insert a node under `parent_id`
    ///
    /// # Errors
    /// Any `OperationError` from the insert; history is left unchanged.
    pub fn insert_node(&mut self, parent_id: &str, node: Node) -> Result<TreeState> {
        self.execute(Command::InsertNode {
            parent_id: parent_id.to_string(),
            node,
        })
    }

    /// Replace a node's non-structural fields
    ///
    /// # Errors
    /// Any `OperationError` from the update; history is left unchanged.
    pub fn update_node(&mut self, node_id: &str, node: Node) -> Result<TreeState> {
        self.execute(Command::UpdateNode {
            node_id: node_id.to_string(),
            node,
        })
    }

    /// Delete a node and its subtree
    ///
    /// # Errors
    /// Any `OperationError` from the delete; history is left unchanged.
    pub fn delete_node(&mut self, node_id: &str) -> Result<TreeState> {
        self.execute(Command::DeleteNode {
            node_id: node_id.to_string(),
        })
    }

    /// Move a node to the end of `parent_id`'s children
    ///
    /// # Errors
    /// Any `OperationError` from the move; history is left unchanged.
    pub fn move_node(&mut self, node_id: &str, parent_id: &str) -> Result<TreeState> {
        self.move_node_to(node_id, parent_id, None)
    }

    /// Move a node under `parent_id`, optionally at a given index
    ///
    /// # Errors
    /// Any `OperationError` from the move; history is left unchanged.
    pub fn move_node_to(
        &mut self,
        node_id: &str,
        parent_id: &str,
        target_index: Option<usize>,
    ) -> Result<TreeState> {
        self.execute(Command::MoveNode {
            node_id: node_id.to_string(),
            parent_id: parent_id.to_string(),
            target_index,
        })
    }

    /// Move a node to `new_index` among its siblings
    ///
    /// # Errors
    /// Any `OperationError` from the reorder; history is left unchanged.
    pub fn reorder_sibling(&mut self, node_id: &str, new_index: usize) -> Result<TreeState> {
        self.execute(Command::ReorderSibling {
            node_id: node_id.to_string(),
            new_index,
        })
    }

    /// Run a command against the current snapshot and record it
    ///
    /// On success the delta is pushed onto the undo stack (evicting the
    /// oldest entry past `max_depth`), the redo stack is cleared, the new
    /// snapshot replaces the old one and listeners are notified.
    ///
    /// # Errors
    /// The command's `OperationError`. Snapshot and stacks are unchanged.
    pub fn execute(&mut self, cmd: Command) -> Result<TreeState> {
        let op = cmd.op_name();
        let node_id = cmd.subject_id().to_string();
        let started = Instant::now();
        log_op_start!(op, node_id = %node_id);

        let next = match apply(&self.state, cmd, &self.config.engine) {
            Ok(next) => next,
            Err(err) => {
                log_op_error!(
                    op,
                    err.clone(),
                    duration_ms = elapsed_ms(started),
                    node_id = %node_id
                );
                return Err(err);
            }
        };

        let delta = TreeDelta::between(&self.state, &next);
        self.push_undo(HistoryEntry { label: op, delta });
        self.redo_stack.clear();
        self.state = next;
        self.notify();

        log_op_end!(
            op,
            duration_ms = elapsed_ms(started),
            node_id = %node_id,
            undo_depth = self.undo_stack.len()
        );
        Ok(self.state.clone())
    }

    /// Revert the most recent operation
    ///
    /// Returns false (and does nothing) if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let started = Instant::now();
        log_op_start!("undo");

        let applied = match self.undo_stack.pop_back() {
            Some(entry) => {
                self.state = entry.delta.inverse.apply_to(&self.state);
                tracing::debug!(label = entry.label, "reverted history entry");
                self.redo_stack.push_back(entry);
                self.notify();
                true
            }
            None => false,
        };

        log_op_end!(
            "undo",
            duration_ms = elapsed_ms(started),
            applied = applied,
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len()
        );
        applied
    }

    /// Re-apply the most recently undone operation
    ///
    /// Returns false (and does nothing) if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let started = Instant::now();
        log_op_start!("redo");

        let applied = match self.redo_stack.pop_back() {
            Some(entry) => {
                self.state = entry.delta.forward.apply_to(&self.state);
                tracing::debug!(label = entry.label, "re-applied history entry");
                self.push_undo(entry);
                self.notify();
                true
            }
            None => false,
        };

        log_op_end!(
            "redo",
            duration_ms = elapsed_ms(started),
            applied = applied,
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len()
        );
        applied
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Operation name of the entry `undo()` would revert
    pub fn next_undo_label(&self) -> Option<&'static str> {
        self.undo_stack.back().map(|entry| entry.label)
    }

    /// Operation name of the entry `redo()` would re-apply
    pub fn next_redo_label(&self) -> Option<&'static str> {
        self.redo_stack.back().map(|entry| entry.label)
    }

    /// Drop both stacks, keeping the current snapshot
    pub fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Register a listener called with the new snapshot after every change
    pub fn subscribe(&mut self, listener: impl FnMut(&TreeState) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    fn push_undo(&mut self, entry: HistoryEntry) {
        self.undo_stack.push_back(entry);
        while self.undo_stack.len() > self.config.max_depth {
            if let Some(evicted) = self.undo_stack.pop_front() {
                tracing::debug!(label = evicted.label, "evicted oldest history entry");
            }
        }
    }

    fn notify(&mut self) {
        for listener in self.listeners.values_mut() {
            listener(&self.state);
        }
    }
}

impl fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryStore")
            .field("state", &self.state)
            .field("undo_depth", &self.undo_stack.len())
            .field("redo_depth", &self.redo_stack.len())
            .field("listeners", &self.listeners.len())
            .field("config", &self.config)
            .finish()
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
