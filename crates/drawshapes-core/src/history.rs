//! Undo/redo history built on full scene snapshots.

use crate::scene::Scene;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which stack an operation drew from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    Undo,
    Redo,
}

impl fmt::Display for HistoryDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryDirection::Undo => f.write_str("undo"),
            HistoryDirection::Redo => f.write_str("redo"),
        }
    }
}

/// History errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("Nothing to {0}")]
    EmptyHistory(HistoryDirection),
}

/// What happens to the redo stack when a new snapshot is pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedoPolicy {
    /// Redo entries survive new edits.
    #[default]
    Keep,
    /// A new edit invalidates every redo entry.
    ClearOnPush,
}

/// Two stacks of scene snapshots.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: Vec<Scene>,
    redo_stack: Vec<Scene>,
    /// Maximum number of undo entries (`None` = unbounded).
    limit: Option<usize>,
    redo_policy: RedoPolicy,
}

impl History {
    /// Create an unbounded history that keeps redo entries across edits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history with an undo depth limit and redo policy.
    pub fn with_policy(limit: Option<usize>, redo_policy: RedoPolicy) -> Self {
        Self {
            limit,
            redo_policy,
            ..Self::default()
        }
    }

    /// Record the state before a mutation. Call with a copy of the live scene.
    pub fn push(&mut self, snapshot: Scene) {
        self.undo_stack.push(snapshot);

        if self.redo_policy == RedoPolicy::ClearOnPush {
            self.redo_stack.clear();
        }

        // Drop the oldest entries beyond the limit
        if let Some(limit) = self.limit {
            let excess = self.undo_stack.len().saturating_sub(limit);
            if excess > 0 {
                self.undo_stack.drain(..excess);
            }
        }
    }

    /// Restore the most recent undo snapshot into `live`, saving the current state for redo.
    pub fn undo(&mut self, live: &mut Scene) -> Result<(), HistoryError> {
        let snapshot = self
            .undo_stack
            .pop()
            .ok_or(HistoryError::EmptyHistory(HistoryDirection::Undo))?;
        self.redo_stack.push(live.copy());
        live.reload(&snapshot);
        Ok(())
    }

    /// Restore the most recent redo snapshot into `live`, saving the current state for undo.
    pub fn redo(&mut self, live: &mut Scene) -> Result<(), HistoryError> {
        let snapshot = self
            .redo_stack
            .pop()
            .ok_or(HistoryError::EmptyHistory(HistoryDirection::Redo))?;
        self.undo_stack.push(live.copy());
        live.reload(&snapshot);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Forget every snapshot.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::shapes::{Color, Shape};

    fn add_square(history: &mut History, scene: &mut Scene, x: i32) {
        history.push(scene.copy());
        scene.add_shape(Shape::square(Color::Red, Point::new(x, 0), 10));
    }

    #[test]
    fn test_undo_add_shape() {
        let mut history = History::new();
        let mut scene = Scene::new();

        add_square(&mut history, &mut scene, 0);
        assert_eq!(scene.len(), 1);
        assert!(history.can_undo());

        history.undo(&mut scene).unwrap();
        assert!(scene.is_empty());
        assert!(history.can_redo());

        history.redo(&mut scene).unwrap();
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_undo_then_redo_restores_exact_scene() {
        let mut history = History::new();
        let mut scene = Scene::new();
        add_square(&mut history, &mut scene, 0);
        add_square(&mut history, &mut scene, 50);

        history.push(scene.copy());
        let ids = scene.select_at(Point::new(55, 5));
        scene.mark_selected(&ids);
        scene.move_selected(5, 5);
        let before_undo = scene.copy();

        history.undo(&mut scene).unwrap();
        assert_ne!(scene.shapes(), before_undo.shapes());
        history.redo(&mut scene).unwrap();
        assert_eq!(scene.shapes(), before_undo.shapes());
    }

    #[test]
    fn test_redo_stack_drains() {
        let mut history = History::new();
        let mut scene = Scene::new();
        add_square(&mut history, &mut scene, 0);
        add_square(&mut history, &mut scene, 20);

        history.undo(&mut scene).unwrap();
        history.undo(&mut scene).unwrap();
        assert_eq!(history.redo_len(), 2);

        history.redo(&mut scene).unwrap();
        history.redo(&mut scene).unwrap();
        assert_eq!(history.redo_len(), 0);
        assert_eq!(scene.len(), 2);
        assert_eq!(
            history.redo(&mut scene),
            Err(HistoryError::EmptyHistory(HistoryDirection::Redo))
        );
    }

    #[test]
    fn test_empty_history() {
        let mut history = History::new();
        let mut scene = Scene::new();
        scene.add_shape(Shape::circle(Color::Blue, Point::new(0, 0), 10));

        assert_eq!(
            history.undo(&mut scene),
            Err(HistoryError::EmptyHistory(HistoryDirection::Undo))
        );
        assert_eq!(scene.len(), 1);
        assert!(history.redo(&mut scene).is_err());
    }

    #[test]
    fn test_keep_policy_preserves_redo() {
        let mut history = History::new();
        let mut scene = Scene::new();
        add_square(&mut history, &mut scene, 0);
        history.undo(&mut scene).unwrap();

        add_square(&mut history, &mut scene, 40);
        assert!(history.can_redo());
    }

    #[test]
    fn test_clear_on_push_policy() {
        let mut history = History::with_policy(None, RedoPolicy::ClearOnPush);
        let mut scene = Scene::new();
        add_square(&mut history, &mut scene, 0);
        history.undo(&mut scene).unwrap();
        assert!(history.can_redo());

        add_square(&mut history, &mut scene, 40);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_policy(Some(2), RedoPolicy::Keep);
        let mut scene = Scene::new();
        for x in 0..4 {
            add_square(&mut history, &mut scene, x * 20);
        }
        assert_eq!(history.undo_len(), 2);

        history.undo(&mut scene).unwrap();
        history.undo(&mut scene).unwrap();
        assert_eq!(scene.len(), 2);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_snapshots_are_isolated_from_live_scene() {
        let mut history = History::new();
        let mut scene = Scene::new();
        let id = scene.add_shape(Shape::square(Color::Red, Point::new(0, 0), 10));

        history.push(scene.copy());
        scene.mark_selected(&[id]);
        scene.move_selected(100, 100);

        history.undo(&mut scene).unwrap();
        let restored = scene.get(id).unwrap();
        assert_eq!(restored.anchor(), Point::new(0, 0));
        assert!(!restored.is_selected());

        // Mutating the restored scene must not leak into the redo snapshot
        scene.clear();
        history.redo(&mut scene).unwrap();
        assert_eq!(scene.get(id).unwrap().anchor(), Point::new(100, 100));
    }
}
