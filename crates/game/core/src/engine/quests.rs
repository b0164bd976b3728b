//! Side quests: acceptance and ambushes, progress tracking, turn-in.

use crate::env::{GameEnv, QuestAmbush, QuestDefinition, QuestId, QuestObjective};
use crate::state::{ActiveQuest, EntityId, EntityKind, GameState};

use super::command::CommandError;
use super::{GameEvent, spawner};

/// Picks a quest to offer from the catalog.
pub fn pick_offer(state: &mut GameState, env: &GameEnv<'_>) -> Option<QuestDefinition> {
    let quests = env.quests().ok()?.quests();
    state.rng.pick(&quests).cloned()
}

/// Makes `id` the active quest. Quests with an ambush spawn their targets
/// around the player immediately.
pub fn accept(state: &mut GameState, env: &GameEnv<'_>, id: &QuestId, giver: EntityId) -> Result<(), CommandError> {
    if state.player.quest.is_some() {
        return Err(CommandError::QuestAlreadyActive);
    }
    let quest = env
        .quests()?
        .quest(id)
        .ok_or_else(|| CommandError::UnknownQuest(id.clone()))?;
    if state.entities.live(giver).and_then(|e| e.villager()).is_none() {
        return Err(CommandError::UnknownEntity(giver));
    }

    state.player.quest = Some(ActiveQuest {
        quest: quest.id.clone(),
        giver,
        objective: quest.objective.clone(),
        progress: 0,
    });
    if let Some(ambush) = quest.ambush {
        spring_ambush(state, env, ambush);
        if let Some(notice) = quest.ambush_notice {
            state.events.notice(notice);
        }
    }
    refresh_collect(state);
    state.events.push(GameEvent::PlayerChanged);
    Ok(())
}

fn spring_ambush(state: &mut GameState, env: &GameEnv<'_>, ambush: QuestAmbush) {
    let (px, py) = (state.player.body.x, state.player.body.y);
    match ambush {
        QuestAmbush::Aerial(kind) => {
            let side = if state.rng.coin() { 1.0 } else { -1.0 };
            spawner::spawn(state, env, kind, px + side * 200.0, (py - 150.0).max(50.0));
        }
        QuestAmbush::Pack(kind, count) => {
            for _ in 0..count {
                let side = if state.rng.coin() { 1.0 } else { -1.0 };
                let distance = state.rng.range_f32(100.0, 200.0);
                spawner::spawn(state, env, kind, px + side * distance, (py - 100.0).max(0.0));
            }
        }
    }
}

/// Credits a credited kill toward an active kill objective.
pub fn record_kill(state: &mut GameState, kind: EntityKind) {
    let Some(active) = state.player.quest.as_mut() else {
        return;
    };
    let QuestObjective::Kill { target, amount } = active.objective else {
        return;
    };
    if target != kind || active.progress >= amount {
        return;
    }
    active.progress += 1;
    let progress = active.progress;
    announce_progress(state, progress);
}

/// Recounts a collect objective against the inventory.
pub fn refresh_collect(state: &mut GameState) {
    let Some(active) = state.player.quest.as_ref() else {
        return;
    };
    let QuestObjective::Collect { item, amount } = &active.objective else {
        return;
    };
    let progress = state.inventory.count_of(item).min(*amount);
    if progress == active.progress {
        return;
    }
    if let Some(active) = state.player.quest.as_mut() {
        active.progress = progress;
    }
    announce_progress(state, progress);
}

fn announce_progress(state: &mut GameState, progress: u32) {
    let Some(active) = state.player.quest.as_ref() else {
        return;
    };
    let quest = active.quest.clone();
    let giver = active.giver;
    let goal = active.objective.amount();
    let met = active.is_met();

    state.events.push(GameEvent::PlayerChanged);
    state.events.push(GameEvent::QuestProgress {
        quest: quest.clone(),
        progress,
        goal,
    });
    if met {
        state.events.notice("Objective Met! Return to Villager.");
        state.events.push(GameEvent::QuestReadyToComplete { quest, giver });
    }
}

/// Turns in the active quest: collected items are handed over, the reward is
/// stored (or dropped when the inventory is full), and the giver stops
/// offering quests.
pub fn complete(state: &mut GameState, env: &GameEnv<'_>) -> Result<(), CommandError> {
    let active = state.player.quest.clone().ok_or(CommandError::NoActiveQuest)?;
    if !active.is_met() {
        return Err(CommandError::QuestNotReady);
    }
    let quest = env
        .quests()?
        .quest(&active.quest)
        .ok_or_else(|| CommandError::UnknownQuest(active.quest.clone()))?;

    if let QuestObjective::Collect { item, amount } = &active.objective {
        state.inventory.remove(item, *amount);
    }
    let overflow = state.inventory.add(quest.reward.key.clone(), quest.reward.count);
    if overflow > 0 {
        state.events.notice("Inventory Full! Dropped reward.");
    }
    if let Some(giver) = state.entities.get_mut(active.giver).and_then(|e| e.villager_mut()) {
        giver.has_quest = false;
    }
    state.player.quest = None;

    state.events.push(GameEvent::PlayerChanged);
    state.events.push(GameEvent::InventoryChanged);
    state.events.notice("Quest Completed & Turned In!");
    state.events.push(GameEvent::QuestCompleted { quest: quest.id });
    Ok(())
}
