//! Deterministic AI.
//!
//! Enemies hunt the player (unless it is hidden) and player-faction
//! companions hunt the nearest enemy. The best attack that can reach the
//! target wins, scored by damage with loadout order breaking ties. Without an
//! attack the actor steps toward the target; equally good steps are split by
//! one declared RNG draw that the loop consumes after execution.

use crate::action::{Intent, IntentOutcome};
use crate::env::{GameEnv, SkillKind, peek_random};
use crate::state::{Actor, CompanionMode, Faction, GameState, Point, SkillId, StatusKind};

use super::StrategyProvider;

/// Companions in follow mode drift back once they stray this far.
const FOLLOW_DISTANCE: u32 = 2;

#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicStrategy;

impl StrategyProvider for HeuristicStrategy {
    fn get_intent(&mut self, state: &GameState, actor: &Actor, env: &GameEnv<'_>) -> IntentOutcome {
        IntentOutcome::Ready(choose(state, actor, env))
    }
}

fn choose(state: &GameState, actor: &Actor, env: &GameEnv<'_>) -> Intent {
    if let Some(owner) = straying_from(state, actor) {
        if let Some(intent) = approach(state, actor, owner, env) {
            return intent.with_reason("FOLLOW");
        }
    }

    let Some(target) = pick_target(state, actor) else {
        return Intent::wait(actor.id, "NO_TARGET");
    };
    if let Some(intent) = best_attack(state, actor, target, env) {
        return intent;
    }
    approach(state, actor, target.position, env)
        .unwrap_or_else(|| Intent::wait(actor.id, "NO_OPTION"))
}

/// Owner position for a follow-mode companion that drifted too far.
fn straying_from(state: &GameState, actor: &Actor) -> Option<Point> {
    if actor.companion_mode != Some(CompanionMode::Follow) {
        return None;
    }
    let owner = state.actor(actor.companion_of?)?;
    (owner.position.distance(actor.position) > FOLLOW_DISTANCE).then_some(owner.position)
}

fn pick_target<'s>(state: &'s GameState, actor: &Actor) -> Option<&'s Actor> {
    let faction = actor.faction;
    let origin = actor.position;
    state
        .living_actors()
        .filter(|other| other.id != actor.id && faction.is_hostile_to(other.faction))
        .filter(|other| faction == Faction::Player || !(other.is_player() && other.is_stealthed()))
        .min_by_key(|other| (other.position.distance(origin), other.id))
}

fn best_attack(
    state: &GameState,
    actor: &Actor,
    target: &Actor,
    env: &GameEnv<'_>,
) -> Option<Intent> {
    let mut best: Option<(u32, &SkillId)> = None;
    for slot in actor.skills.iter().filter(|slot| slot.is_ready()) {
        let Some(skill) = env.skills.skill(&slot.id) else {
            continue;
        };
        let base = skill.base();
        if base.passive || base.kind != SkillKind::Attack || base.damage == 0 {
            continue;
        }
        if !skill
            .valid_targets(state, actor.position)
            .contains(&target.position)
        {
            continue;
        }
        if best.is_none_or(|(damage, _)| base.damage > damage) {
            best = Some((base.damage, &slot.id));
        }
    }

    let (damage, skill_id) = best?;
    Some(
        Intent::new(actor.id, skill_id.as_str())
            .at(target.position)
            .against(target.id)
            .with_expected_value(i32::try_from(damage).unwrap_or(i32::MAX))
            .with_reason("ATTACK"),
    )
}

fn approach(state: &GameState, actor: &Actor, goal: Point, env: &GameEnv<'_>) -> Option<Intent> {
    if actor.has_status(StatusKind::Rooted) {
        return None;
    }
    let id = SkillId::new(SkillId::BASIC_MOVE);
    if !actor.skill(&id).is_some_and(|slot| slot.is_ready()) {
        return None;
    }
    let skill = env.skills.skill(&id)?;

    let current = actor.position.distance(goal);
    let steps: Vec<(u32, Point)> = skill
        .valid_targets(state, actor.position)
        .into_iter()
        .map(|cell| (cell.distance(goal), cell))
        .filter(|(distance, _)| *distance < current)
        .collect();
    let closest = steps.iter().map(|(distance, _)| *distance).min()?;
    let ties: Vec<Point> = steps
        .into_iter()
        .filter(|(distance, _)| *distance == closest)
        .map(|(_, cell)| cell)
        .collect();

    let intent = Intent::new(actor.id, SkillId::BASIC_MOVE).with_reason("APPROACH");
    if ties.len() == 1 {
        return Some(intent.at(ties[0]));
    }
    let roll = peek_random(&state.rng, 0);
    let index = ((roll * ties.len() as f64) as usize).min(ties.len() - 1);
    Some(intent.at(ties[index]).with_rng_consumption(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActorId, StatusEffect};
    use crate::test_support::*;

    fn ask(state: &GameState, id: ActorId) -> Intent {
        let fixture = Fixture::new();
        let actor = state.actor(id).unwrap().clone();
        match HeuristicStrategy.get_intent(state, &actor, &fixture.env()) {
            IntentOutcome::Ready(intent) => intent,
            IntentOutcome::Suspended => panic!("heuristic never suspends"),
        }
    }

    #[test]
    fn adjacent_enemy_picks_the_hardest_hit() {
        let state = duel();
        let brute = state.enemies[0].id;
        let intent = ask(&state, brute);

        assert_eq!(intent.skill_id, SkillId::new("HEAVY_SLAM"));
        assert_eq!(intent.target_hex, Some(Point::new(1, 1)));
        assert_eq!(intent.target_actor, Some(ActorId::PLAYER));
        assert_eq!(intent.metadata.expected_value, 3);
    }

    #[test]
    fn cooling_down_attack_falls_back_to_weaker_one() {
        let mut state = duel();
        state.enemies[0]
            .skill_mut(&"HEAVY_SLAM".into())
            .unwrap()
            .current_cooldown = 1;
        let intent = ask(&state, state.enemies[0].id);
        assert_eq!(intent.skill_id, SkillId::new("BASIC_ATTACK"));
    }

    #[test]
    fn distant_enemy_steps_closer() {
        let mut state = open_field();
        let id = state.spawn_actor(footman(Point::new(5, 1))).unwrap();
        let intent = ask(&state, id);

        assert_eq!(intent.skill_id, SkillId::new(SkillId::BASIC_MOVE));
        let step = intent.target_hex.unwrap();
        assert_eq!(step.distance(Point::new(1, 1)), 3);
    }

    #[test]
    fn tied_steps_declare_one_draw() {
        let mut state = open_field();
        // Two equally good cells lead toward the player from here.
        let id = state.spawn_actor(footman(Point::new(3, 3))).unwrap();
        let intent = ask(&state, id);
        assert_eq!(intent.metadata.rng_consumption, 1);
        assert_eq!(ask(&state, id), intent);
    }

    #[test]
    fn stealthed_player_is_ignored() {
        let mut state = open_field();
        state.player.stealth_counter = 2;
        let id = state.spawn_actor(footman(Point::new(5, 1))).unwrap();
        assert!(ask(&state, id).is_wait());
    }

    #[test]
    fn rooted_actor_without_reach_waits() {
        let mut state = open_field();
        let id = state.spawn_actor(footman(Point::new(5, 1))).unwrap();
        state
            .actor_mut(id)
            .unwrap()
            .statuses
            .push(StatusEffect::new("r", StatusKind::Rooted, 2));
        assert!(ask(&state, id).is_wait());
    }

    #[test]
    fn companion_hunts_nearest_enemy() {
        let mut state = open_field();
        let far = state.spawn_actor(footman(Point::new(7, 7))).unwrap();
        let near = state.spawn_actor(footman(Point::new(4, 2))).unwrap();
        let mut wolf = footman(Point::new(3, 2));
        wolf.faction = Faction::Player;
        wolf.companion_of = Some(ActorId::PLAYER);
        let wolf = state.spawn_actor(wolf).unwrap();

        let intent = ask(&state, wolf);
        assert_eq!(intent.target_actor, Some(near));
        assert_ne!(intent.target_actor, Some(far));
    }

    #[test]
    fn every_intent_names_an_owned_skill() {
        let state = duel();
        for actor in state.living_actors() {
            let intent = ask(&state, actor.id);
            assert!(intent.is_wait() || actor.has_skill(intent.skill_id.as_str()));
        }
    }
}
