//! Pointer-driven interaction: talking, doors, placing, using, shooting,
//! swinging and mining.

use crate::combat::{self, KillLog};
use crate::config::GameConfig;
use crate::env::{GameEnv, ItemDefinition};
use crate::state::{EntityId, EntityKind, GameState, ItemKey, Rect, retarget_mining};
use crate::world::{TileKind, tile_coord};

use super::{GameEvent, inventory, quests, spawner};

const TALK_COOLDOWN: u32 = 30;
const DOOR_COOLDOWN: u32 = 10;
const PLACE_COOLDOWN: u32 = 10;
const CONSUME_COOLDOWN: u32 = 30;
const BOSS_BREAK_COOLDOWN: u32 = 60;

/// What the selected hotbar slot holds, resolved against the catalog.
enum Held {
    Nothing,
    Block(TileKind),
    Item(ItemDefinition),
}

fn held(state: &GameState, env: &GameEnv<'_>) -> Held {
    match state.selected_stack().map(|stack| &stack.key) {
        Some(ItemKey::Tile(tile)) => Held::Block(*tile),
        Some(ItemKey::Item(id)) => env.item(id).map_or(Held::Nothing, Held::Item),
        None => Held::Nothing,
    }
}

/// Runs one interaction step from the current input snapshot.
pub fn update(state: &mut GameState, env: &GameEnv<'_>, kills: &mut KillLog) {
    if state.player.inventory_open {
        return;
    }
    if !state.input.primary {
        state.mining = None;
    }
    if state.action_cooldown > 0 {
        return;
    }

    let held = held(state, env);
    if state.input.secondary && secondary(state, env, &held) {
        return;
    }
    if state.input.primary {
        primary(state, &held, kills);
    }
}

fn pointer_distance(state: &GameState) -> f32 {
    let (mx, my) = state.input.pointer;
    let (px, py) = state.player.body.center();
    (mx - px).hypot(my - py)
}

/// Secondary button. Returns true when the step should end here.
fn secondary(state: &mut GameState, env: &GameEnv<'_>, held: &Held) -> bool {
    let (mx, my) = state.input.pointer;
    let in_reach = pointer_distance(state) < GameConfig::REACH;

    let clicked = state
        .entities
        .iter()
        .find(|e| e.is_alive() && e.body.rect().contains(mx, my))
        .filter(|e| e.kind == EntityKind::Villager)
        .map(|e| e.id);
    if let Some(id) = clicked.filter(|_| in_reach) {
        talk(state, env, id);
        state.action_cooldown = TALK_COOLDOWN;
        return true;
    }

    let (tx, ty) = (tile_coord(mx), tile_coord(my));
    if in_reach {
        let toggled = match state.world.get(tx, ty) {
            TileKind::DoorClosed => Some(TileKind::DoorOpen),
            TileKind::DoorOpen => Some(TileKind::DoorClosed),
            _ => None,
        };
        if let Some(door) = toggled {
            state.world.set(tx, ty, door);
            state.action_cooldown = DOOR_COOLDOWN;
            return true;
        }
        if let Held::Block(block) = held {
            place(state, tx, ty, *block);
        }
    }

    if matches!(held, Held::Item(_)) && inventory::consume_selected(state, env) {
        state.action_cooldown = CONSUME_COOLDOWN;
    }
    false
}

/// Turn-in beats a new offer, which beats small talk.
fn talk(state: &mut GameState, env: &GameEnv<'_>, villager: EntityId) {
    if let Some(active) = state.player.quest.as_ref().filter(|q| q.giver == villager) {
        if active.is_met() {
            let quest = active.quest.clone();
            state.events.push(GameEvent::QuestReadyToComplete {
                quest,
                giver: villager,
            });
            return;
        }
    }
    let offers = state
        .entities
        .get(villager)
        .and_then(|e| e.villager())
        .is_some_and(|v| v.has_quest);
    if offers && state.player.quest.is_none() {
        if let Some(quest) = quests::pick_offer(state, env) {
            state.events.push(GameEvent::QuestOffered {
                quest: quest.id,
                giver: villager,
            });
            return;
        }
    }
    state.events.push(GameEvent::DialogueOpened { entity: villager });
}

fn place(state: &mut GameState, tx: i32, ty: i32, block: TileKind) {
    if !state.world.get(tx, ty).is_replaceable() {
        return;
    }
    let cell = Rect::tile(tx, ty);
    let blocked = cell.overlaps(&state.player.body.rect())
        || state
            .entities
            .iter()
            .any(|e| e.is_alive() && cell.overlaps(&e.body.rect()));
    if blocked || !state.world.set(tx, ty, block) {
        return;
    }
    state.inventory.take_from_slot(state.player.selected_slot, 1);
    state.events.push(GameEvent::InventoryChanged);
    state.action_cooldown = PLACE_COOLDOWN;
}

fn primary(state: &mut GameState, held: &Held, kills: &mut KillLog) {
    let item = match held {
        Held::Item(definition) => Some(definition),
        _ => None,
    };
    if let Some((definition, shoot)) = item.and_then(|d| d.shoot.as_ref().map(|s| (d, s))) {
        combat::projectile::fire(state, definition, shoot, kills);
        return;
    }
    if combat::melee::swing(state, item, kills) {
        return;
    }
    if pointer_distance(state) < GameConfig::REACH {
        let power = item.and_then(|d| d.stats.mining_power).unwrap_or(1);
        mine(state, power);
    }
}

fn mine(state: &mut GameState, power: u32) {
    let (mx, my) = state.input.pointer;
    let (tx, ty) = (tile_coord(mx), tile_coord(my));
    let tile = state.world.get(tx, ty);
    if tile == TileKind::Air {
        state.mining = None;
        return;
    }
    let creative = state.player.creative;
    state.mining = retarget_mining(state.mining, tx, ty, tile, creative);
    let Some(mining) = state.mining.as_mut() else {
        return;
    };
    if !mining.advance(power) {
        return;
    }

    state.mining = None;
    state.world.set(tx, ty, TileKind::Air);
    if !creative {
        inventory::give(state, ItemKey::Tile(tile), 1);
    }
    let boss = on_block_broken(state, tx, ty, tile);
    state.action_cooldown = if boss {
        BOSS_BREAK_COOLDOWN
    } else if creative {
        2
    } else {
        5
    };
}

/// World reactions to a broken tile. Altars and server terminals wake their
/// guardians; lore-bearing tiles report a fragment. Returns whether a boss
/// spawned.
pub fn on_block_broken(state: &mut GameState, tx: i32, ty: i32, tile: TileKind) -> bool {
    let boss = match tile {
        TileKind::Altar => Some((EntityKind::Guardian, "TEMPLE GUARDIAN")),
        TileKind::ServerTerminal => Some((EntityKind::Sentry, "SECURITY SYSTEM")),
        _ => None,
    };
    if let Some((kind, name)) = boss {
        let size = GameConfig::TILE_SIZE;
        spawner::spawn_creature(state, kind, (tx - 1) as f32 * size, (ty - 2) as f32 * size);
        state.events.push(GameEvent::BossSpawned {
            kind,
            name: name.into(),
        });
    }
    if tile.carries_lore() {
        state.events.push(GameEvent::LoreDiscovered { tile, depth: ty });
    }
    boss.is_some()
}
