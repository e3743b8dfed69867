use arrayvec::ArrayVec;

use crate::config::GameConfig;

use super::{ActorId, Point};

/// Ids of the actors adjacent to a unit when its turn began.
pub type NeighborSnapshot = ArrayVec<ActorId, { GameConfig::MAX_NEIGHBORS }>;

/// One actor's slot in the current round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitiativeEntry {
    pub actor_id: ActorId,
    pub score: i32,
    pub has_acted: bool,
    /// Captured once by `start_turn`, cleared by `end_turn`.
    pub turn_start_position: Option<Point>,
    pub turn_start_neighbors: Option<NeighborSnapshot>,
}

impl InitiativeEntry {
    fn new(actor_id: ActorId, score: i32, has_acted: bool) -> Self {
        Self {
            actor_id,
            score,
            has_acted,
            turn_start_position: None,
            turn_start_neighbors: None,
        }
    }

    /// True between `start_turn` and `end_turn`.
    pub fn turn_started(&self) -> bool {
        self.turn_start_position.is_some()
    }
}

/// Turn order for the current round.
///
/// The cursor only moves through [`InitiativeQueue::advance`]. Entries of dead
/// actors are removed, never advanced onto.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitiativeQueue {
    entries: Vec<InitiativeEntry>,
    current_index: Option<usize>,
    round: u32,
}

impl InitiativeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[InitiativeEntry] {
        &self.entries
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current(&self) -> Option<&InitiativeEntry> {
        self.current_index.and_then(|index| self.entries.get(index))
    }

    pub fn entry(&self, actor_id: ActorId) -> Option<&InitiativeEntry> {
        self.entries.iter().find(|entry| entry.actor_id == actor_id)
    }

    fn entry_mut(&mut self, actor_id: ActorId) -> Option<&mut InitiativeEntry> {
        self.entries
            .iter_mut()
            .find(|entry| entry.actor_id == actor_id)
    }

    /// Actor whose turn has started but not ended (a suspended turn).
    pub fn turn_in_progress(&self) -> Option<ActorId> {
        self.current()
            .filter(|entry| entry.turn_started() && !entry.has_acted)
            .map(|entry| entry.actor_id)
    }

    /// Picks the next actor that has not acted this round.
    ///
    /// `roster` lists the living actors with their current speed, in insertion
    /// order (player first, then the enemy list). Entries of actors missing
    /// from the roster are dropped; actors new to the queue are appended as
    /// already acted so they join the next round. When every entry has acted a
    /// new round starts with the order recomputed from `roster`.
    pub fn advance(&mut self, roster: &[(ActorId, i32)]) -> Option<ActorId> {
        if roster.is_empty() {
            self.entries.clear();
            self.current_index = None;
            return None;
        }

        self.sync(roster);

        if let Some(index) = self.entries.iter().position(|entry| !entry.has_acted) {
            self.current_index = Some(index);
            return Some(self.entries[index].actor_id);
        }

        self.start_round(roster);
        self.current_index = Some(0);
        Some(self.entries[0].actor_id)
    }

    fn sync(&mut self, roster: &[(ActorId, i32)]) {
        let current = self.current().map(|entry| entry.actor_id);
        self.entries
            .retain(|entry| roster.iter().any(|(id, _)| *id == entry.actor_id));
        for &(id, speed) in roster {
            if self.entry(id).is_none() {
                self.entries.push(InitiativeEntry::new(id, speed, true));
            }
        }
        self.current_index =
            current.and_then(|id| self.entries.iter().position(|entry| entry.actor_id == id));
    }

    fn start_round(&mut self, roster: &[(ActorId, i32)]) {
        let mut order: Vec<(ActorId, i32)> = roster.to_vec();
        // Stable: equal speeds keep roster order.
        order.sort_by(|a, b| b.1.cmp(&a.1));
        self.entries = order
            .into_iter()
            .map(|(id, speed)| InitiativeEntry::new(id, speed, false))
            .collect();
        self.round += 1;
    }

    /// Captures the turn-start snapshots. No-op if they are already set.
    /// Returns whether a capture happened.
    pub fn start_turn(
        &mut self,
        actor_id: ActorId,
        position: Point,
        neighbors: NeighborSnapshot,
    ) -> bool {
        match self.entry_mut(actor_id) {
            Some(entry) if !entry.turn_started() => {
                entry.turn_start_position = Some(position);
                entry.turn_start_neighbors = Some(neighbors);
                true
            }
            _ => false,
        }
    }

    pub fn end_turn(&mut self, actor_id: ActorId) {
        if let Some(entry) = self.entry_mut(actor_id) {
            entry.has_acted = true;
            entry.turn_start_position = None;
            entry.turn_start_neighbors = None;
        }
    }

    /// Drops an actor's entry, keeping the cursor on the same live entry.
    /// Removing the current actor leaves the cursor unset until the next
    /// `advance`.
    pub fn remove(&mut self, actor_id: ActorId) {
        let Some(index) = self
            .entries
            .iter()
            .position(|entry| entry.actor_id == actor_id)
        else {
            return;
        };
        self.entries.remove(index);
        self.current_index = match self.current_index {
            Some(current) if current == index => None,
            Some(current) if current > index => Some(current - 1),
            other => other,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: ActorId = ActorId::PLAYER;
    const A: ActorId = ActorId(1);
    const B: ActorId = ActorId(2);

    fn finish(queue: &mut InitiativeQueue, id: ActorId) {
        queue.start_turn(id, Point::ORIGIN, NeighborSnapshot::new());
        queue.end_turn(id);
    }

    #[test]
    fn orders_by_speed_then_insertion() {
        let mut queue = InitiativeQueue::new();
        let roster = [(P, 10), (A, 12), (B, 10)];

        assert_eq!(queue.advance(&roster), Some(A));
        finish(&mut queue, A);
        assert_eq!(queue.advance(&roster), Some(P));
        finish(&mut queue, P);
        assert_eq!(queue.advance(&roster), Some(B));
        finish(&mut queue, B);

        assert_eq!(queue.advance(&roster), Some(A));
        assert_eq!(queue.round(), 2);
    }

    #[test]
    fn spawned_actors_wait_for_next_round() {
        let mut queue = InitiativeQueue::new();
        assert_eq!(queue.advance(&[(P, 10)]), Some(P));
        finish(&mut queue, P);

        let roster = [(P, 10), (A, 20)];
        // A is new this round, so it is appended as acted and a new round
        // starts with A first.
        assert_eq!(queue.advance(&roster), Some(A));
        assert_eq!(queue.round(), 2);
    }

    #[test]
    fn vanished_actors_are_dropped_on_advance() {
        let mut queue = InitiativeQueue::new();
        assert_eq!(queue.advance(&[(P, 10), (A, 5), (B, 1)]), Some(P));
        finish(&mut queue, P);
        assert_eq!(queue.advance(&[(P, 10), (B, 1)]), Some(B));
        assert!(queue.entry(A).is_none());
    }

    #[test]
    fn snapshot_is_captured_once() {
        let mut queue = InitiativeQueue::new();
        queue.advance(&[(P, 10)]);

        let mut first = NeighborSnapshot::new();
        first.push(A);
        assert!(queue.start_turn(P, Point::new(1, 1), first));
        assert!(!queue.start_turn(P, Point::new(2, 2), NeighborSnapshot::new()));

        let entry = queue.entry(P).unwrap();
        assert_eq!(entry.turn_start_position, Some(Point::new(1, 1)));
        assert_eq!(entry.turn_start_neighbors.as_ref().unwrap().as_slice(), &[A]);
        assert_eq!(queue.turn_in_progress(), Some(P));

        queue.end_turn(P);
        let entry = queue.entry(P).unwrap();
        assert!(entry.has_acted);
        assert!(entry.turn_start_neighbors.is_none());
        assert_eq!(queue.turn_in_progress(), None);
    }

    #[test]
    fn remove_keeps_cursor_on_same_entry() {
        let mut queue = InitiativeQueue::new();
        let roster = [(P, 10), (A, 5), (B, 1)];
        queue.advance(&roster);
        finish(&mut queue, P);
        assert_eq!(queue.advance(&roster), Some(A));

        queue.remove(P);
        assert_eq!(queue.current().map(|e| e.actor_id), Some(A));

        queue.remove(A);
        assert!(queue.current().is_none());
        assert_eq!(queue.advance(&[(B, 1)]), Some(B));
    }

    #[test]
    fn empty_roster_yields_none() {
        let mut queue = InitiativeQueue::new();
        assert_eq!(queue.advance(&[]), None);
    }
}
