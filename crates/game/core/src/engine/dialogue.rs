//! Villager orders and chat memory.

use crate::state::{AiState, ChatLine, EntityId, EntityKind, GameState, TargetRef};

use super::GameEvent;
use super::command::{CommandError, VillagerOrder};

/// Search radius for an `Attack` order.
const ATTACK_SEARCH_RADIUS: f32 = 500.0;

/// Applies an order to a villager. Hostile villagers refuse everything.
pub fn order(state: &mut GameState, entity: EntityId, order: VillagerOrder) -> Result<(), CommandError> {
    let villager = state
        .entities
        .live(entity)
        .ok_or(CommandError::UnknownEntity(entity))?;
    let Some(data) = villager.villager() else {
        return Err(CommandError::NotAVillager(entity));
    };
    if villager.is_hostile_villager() {
        return Err(CommandError::VillagerHostile(entity));
    }
    let name = data.name.clone();
    let in_party = data.in_party;
    let body = villager.body;

    match order {
        VillagerOrder::JoinParty => {
            if !in_party {
                let cap = state.config.party_cap;
                if state.entities.party_size() >= cap {
                    state
                        .events
                        .notice(format!("Party is full! (Max {cap} members)"));
                    return Err(CommandError::PartyFull(cap));
                }
            }
            set_program(state, entity, AiState::Following, Some(TargetRef::Player), Some(true));
            state.events.notice(format!("{name} joined your party!"));
        }
        VillagerOrder::Follow => {
            set_program(state, entity, AiState::Following, Some(TargetRef::Player), None);
        }
        VillagerOrder::Stay => {
            set_program(state, entity, AiState::Idle, None, None);
            if in_party {
                state.events.notice(format!("{name}: holding position."));
            }
        }
        VillagerOrder::Attack => {
            let target = state
                .entities
                .iter()
                .filter(|e| {
                    e.is_alive()
                        && !matches!(e.kind, EntityKind::Villager | EntityKind::Rabbit)
                        && e.body.distance_to(&body) < ATTACK_SEARCH_RADIUS
                })
                .min_by(|a, b| a.body.distance_to(&body).total_cmp(&b.body.distance_to(&body)))
                .map(|e| e.id);
            match target {
                Some(target) => {
                    set_program(state, entity, AiState::Attacking, Some(TargetRef::Entity(target)), None)
                }
                None => set_program(state, entity, AiState::Idle, None, None),
            }
        }
        VillagerOrder::None => return Ok(()),
    }
    state.events.push(GameEvent::EntitiesChanged);
    Ok(())
}

fn set_program(
    state: &mut GameState,
    entity: EntityId,
    ai: AiState,
    target: Option<TargetRef>,
    join: Option<bool>,
) {
    let Some(villager) = state.entities.get_mut(entity) else {
        return;
    };
    villager.ai = ai;
    villager.state_timer = 0;
    if let Some(data) = villager.villager_mut() {
        data.target = target;
        if let Some(join) = join {
            data.in_party = join;
        }
    }
}

/// Appends a line to a villager's chat memory. Missing or dead villagers
/// are skipped.
pub fn remember(state: &mut GameState, entity: EntityId, line: ChatLine) -> Result<(), CommandError> {
    let data = state
        .entities
        .get_mut(entity)
        .filter(|e| e.is_alive())
        .ok_or(CommandError::UnknownEntity(entity))?
        .villager_mut()
        .ok_or(CommandError::NotAVillager(entity))?;
    data.remember(line);
    Ok(())
}
