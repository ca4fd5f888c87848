use std::mem;

use crate::surface::Snapshot;

/// Linear undo/redo timeline of whole-surface snapshots.
///
/// The undo stack is `older` followed by `current`, so it always holds at
/// least the baseline captured when the canvas was created. `current` mirrors
/// what the surface shows once pending restores have been applied.
pub struct SnapshotHistory {
    /// States before the current one, oldest first
    older: Vec<Snapshot>,
    /// The most recent committed state
    current: Snapshot,
    /// States that were undone away from, most recently undone last
    redo_stack: Vec<Snapshot>,
}

impl SnapshotHistory {
    /// Starts a history whose only entry is `baseline`
    pub fn new(baseline: Snapshot) -> Self {
        Self {
            older: Vec::new(),
            current: baseline,
            redo_stack: Vec::new(),
        }
    }

    /// Commits `snapshot` as the new current state and drops the redo history
    pub fn checkpoint(&mut self, snapshot: Snapshot) {
        let previous = mem::replace(&mut self.current, snapshot);
        self.older.push(previous);
        self.redo_stack.clear();
    }

    /// Moves the current state onto the redo stack and returns the state to draw.
    ///
    /// Returns `None` when only the baseline is left.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        let previous = self.older.pop()?;
        let undone = mem::replace(&mut self.current, previous);
        self.redo_stack.push(undone);
        Some(&self.current)
    }

    /// Moves the most recently undone state back onto the undo stack and
    /// returns it for drawing.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let next = self.redo_stack.pop()?;
        let previous = mem::replace(&mut self.current, next);
        self.older.push(previous);
        Some(&self.current)
    }

    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    pub fn can_undo(&self) -> bool {
        !self.older.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of entries on the undo stack, the current state included
    pub fn undo_len(&self) -> usize {
        self.older.len() + 1
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Undo stack entries, oldest first, ending with the current state
    pub fn undo_stack(&self) -> impl Iterator<Item = &Snapshot> {
        self.older.iter().chain(std::iter::once(&self.current))
    }

    /// Redo stack entries, the next one to redo last
    pub fn redo_stack(&self) -> &[Snapshot] {
        &self.redo_stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(tag: u8) -> Snapshot {
        Snapshot::new(vec![tag])
    }

    #[test]
    fn test_starts_with_baseline_only() {
        let history = SnapshotHistory::new(snapshot(0));
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.redo_len(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_on_baseline_is_noop() {
        let mut history = SnapshotHistory::new(snapshot(0));
        assert!(history.undo().is_none());
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.current().bytes(), &[0u8]);
    }

    #[test]
    fn test_redo_on_empty_stack_is_noop() {
        let mut history = SnapshotHistory::new(snapshot(0));
        history.checkpoint(snapshot(1));
        assert!(history.redo().is_none());
        assert_eq!(history.undo_len(), 2);
    }

    #[test]
    fn test_undo_returns_previous_state() {
        let mut history = SnapshotHistory::new(snapshot(0));
        history.checkpoint(snapshot(1));
        assert_eq!(history.undo_len(), 2);

        let restored = history.undo().map(|s| s.bytes().to_vec());
        assert_eq!(restored, Some(vec![0]));
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.redo_len(), 1);
    }

    #[test]
    fn test_undo_redo_moves_snapshots_between_stacks() {
        let mut history = SnapshotHistory::new(snapshot(0));
        history.checkpoint(snapshot(1));
        let committed = history.current().id();

        history.undo();
        assert_eq!(history.redo_stack()[0].id(), committed);
        assert!(history.undo_stack().all(|s| s.id() != committed));

        let redone = history.redo().map(Snapshot::id);
        assert_eq!(redone, Some(committed));
        assert!(history.redo_stack().is_empty());
        assert_eq!(history.undo_len(), 2);
    }

    #[test]
    fn test_checkpoint_clears_redo_stack() {
        let mut history = SnapshotHistory::new(snapshot(0));
        history.checkpoint(snapshot(1));
        history.checkpoint(snapshot(2));
        history.undo();
        history.undo();
        assert_eq!(history.redo_len(), 2);

        history.checkpoint(snapshot(3));
        assert_eq!(history.redo_len(), 0);
        assert_eq!(history.undo_len(), 2);
    }

    #[test]
    fn test_n_undos_return_to_baseline() {
        let mut history = SnapshotHistory::new(snapshot(0));
        for tag in 1..=5 {
            history.checkpoint(snapshot(tag));
        }
        for _ in 0..5 {
            assert!(history.undo().is_some());
        }
        assert_eq!(history.current().bytes(), &[0u8]);
        assert!(history.undo().is_none());
    }
}
