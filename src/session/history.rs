use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{BoothError, BoothResult};

/// Linear undo stack of full snapshots. Never holds fewer than one entry, and the first entry
/// (the session start) is never discarded.
#[derive(Clone, Debug)]
pub struct History<T = PixelBuffer> {
    snapshots: Vec<T>,
    limit: Option<usize>,
}

impl<T> History<T> {
    /// Start a history whose only entry is `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            snapshots: vec![initial],
            limit: None,
        }
    }

    /// Start a history that keeps at most `limit` snapshots.
    ///
    /// Past the limit the oldest edit is dropped; `initial` always stays.
    pub fn with_limit(initial: T, limit: usize) -> BoothResult<Self> {
        if limit < 2 {
            return Err(BoothError::validation("history limit must be >= 2"));
        }
        Ok(Self {
            snapshots: vec![initial],
            limit: Some(limit),
        })
    }

    /// Append a snapshot.
    pub fn push(&mut self, snapshot: T) {
        self.snapshots.push(snapshot);
        if let Some(limit) = self.limit
            && self.snapshots.len() > limit
        {
            let excess = self.snapshots.len() - limit;
            self.snapshots.drain(1..1 + excess);
        }
    }

    /// Discard the newest snapshot and return the one now on top.
    ///
    /// Returns `None` (and changes nothing) when only one snapshot remains.
    pub fn pop(&mut self) -> Option<&T> {
        if self.snapshots.len() <= 1 {
            return None;
        }
        self.snapshots.pop();
        self.snapshots.last()
    }

    /// Newest snapshot.
    pub fn top(&self) -> &T {
        // The constructor seeds one entry and `pop` never removes the last.
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always `false`.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Return `true` when [`History::pop`] would restore something.
    pub fn can_undo(&self) -> bool {
        self.snapshots.len() > 1
    }

    /// Drop everything and start over from `initial`.
    pub fn reset(&mut self, initial: T) {
        self.snapshots.clear();
        self.snapshots.push(initial);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/history.rs"]
mod tests;
