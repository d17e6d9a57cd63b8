//! Position arena with open/closed tracking and deferred removal.
//!
//! Positions are stored in an arena and addressed by stable [`PositionId`]s,
//! so a strategy can hold onto an id across ticks. The open and closed sets
//! are id lists in insertion order. Closing a position only stages it for
//! removal; [`PositionBook::sweep`] moves staged ids out of the open set at
//! the tick boundary, after the risk pass has finished iterating.

use std::fmt;

use super::position::Position;

/// Stable handle to a position in the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionId(usize);

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PositionBook {
    positions: Vec<Position>,
    open: Vec<PositionId>,
    closed: Vec<PositionId>,
    pending_removal: Vec<PositionId>,
}

impl PositionBook {
    pub fn new() -> Self {
        PositionBook::default()
    }

    pub fn insert(&mut self, position: Position) -> PositionId {
        let id = PositionId(self.positions.len());
        self.positions.push(position);
        self.open.push(id);
        id
    }

    pub fn get(&self, id: PositionId) -> Option<&Position> {
        self.positions.get(id.0)
    }

    pub fn get_mut(&mut self, id: PositionId) -> Option<&mut Position> {
        self.positions.get_mut(id.0)
    }

    pub fn open_ids(&self) -> &[PositionId] {
        &self.open
    }

    pub fn closed_ids(&self) -> &[PositionId] {
        &self.closed
    }

    pub fn open_positions(&self) -> impl Iterator<Item = (PositionId, &Position)> {
        self.open.iter().map(|&id| (id, &self.positions[id.0]))
    }

    pub fn closed_positions(&self) -> impl Iterator<Item = (PositionId, &Position)> {
        self.closed.iter().map(|&id| (id, &self.positions[id.0]))
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    pub fn closed_count(&self) -> usize {
        self.closed.len()
    }

    /// Stage a position for removal from the open set. It stays in the open
    /// list (status already flipped) until the next sweep.
    pub fn stage_removal(&mut self, id: PositionId) {
        self.pending_removal.push(id);
    }

    pub fn pending_count(&self) -> usize {
        self.pending_removal.len()
    }

    /// Move every staged position from the open set to the closed set,
    /// preserving the order in which they were staged.
    pub fn sweep(&mut self) {
        for id in std::mem::take(&mut self.pending_removal) {
            self.open.retain(|&open_id| open_id != id);
            self.closed.push(id);
        }
    }
}
