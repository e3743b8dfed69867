//! Queue bookkeeping on top of [`InitiativeQueue`](crate::state::InitiativeQueue).

use crate::state::{ActorId, GameState};

/// Actor whose turn runs next: the one already mid-turn (a suspended human
/// turn), otherwise the next entry of the queue. `turn_number` follows the
/// queue's round. `None` when nobody is alive.
pub fn next_actor(state: &mut GameState) -> Option<ActorId> {
    if let Some(actor) = state.initiative.turn_in_progress() {
        return Some(actor);
    }
    let roster = state.roster();
    let actor = state.initiative.advance(&roster)?;
    state.turn_number = state.initiative.round();
    Some(actor)
}

/// Captures the turn-start position and neighbours. Returns false when the
/// turn had already started, so resumed turns never re-run the start window.
pub fn start_actor_turn(state: &mut GameState, actor_id: ActorId) -> bool {
    let Some(position) = state.actor(actor_id).map(|actor| actor.position) else {
        return false;
    };
    let neighbors = state.neighbor_ids(position);
    state.initiative.start_turn(actor_id, position, neighbors)
}

pub fn end_actor_turn(state: &mut GameState, actor_id: ActorId) {
    state.initiative.end_turn(actor_id);
}

pub fn remove_from_queue(state: &mut GameState, actor_id: ActorId) {
    state.initiative.remove(actor_id);
}
