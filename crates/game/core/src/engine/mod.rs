//! Tick scheduling and command handling.
//!
//! The [`GameEngine`] is the only writer of [`GameState`]. Commands mutate
//! input and session state between ticks; [`GameEngine::tick`] runs one fixed
//! simulation step in [`TickPhase`] order. Every step appends to the state's
//! [`EventQueue`], which the runtime drains after each tick.

pub mod command;
pub mod dialogue;
pub mod events;
pub mod interaction;
pub mod inventory;
pub mod quests;
pub mod session;
pub mod spawner;

pub use command::{Command, CommandError, PointerButton, VillagerOrder};
pub use events::{EventQueue, GameEvent};

use crate::combat::{self, KillLog};
use crate::config::GameConfig;
use crate::env::GameEnv;
use crate::state::{GameState, HeldKeys, MovementFlags, SessionStatus};
use crate::world::tile_coord;
use crate::{ai, physics};

/// Stages of one tick, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickPhase {
    Clock,
    Upkeep,
    Spawn,
    PlayerPhysics,
    EntityPhysics,
    Ai,
    Projectiles,
    Interaction,
    Deaths,
}

impl TickPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TickPhase::Clock => "clock",
            TickPhase::Upkeep => "upkeep",
            TickPhase::Spawn => "spawn",
            TickPhase::PlayerPhysics => "player_physics",
            TickPhase::EntityPhysics => "entity_physics",
            TickPhase::Ai => "ai",
            TickPhase::Projectiles => "projectiles",
            TickPhase::Interaction => "interaction",
            TickPhase::Deaths => "deaths",
        }
    }
}

/// Result of a tick request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The simulation advanced to this tick.
    Advanced(u64),
    /// The session has ended; nothing was simulated.
    Halted(SessionStatus),
}

pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Runs one simulation step.
    pub fn tick(&mut self, env: &GameEnv<'_>) -> TickOutcome {
        if !self.state.is_running() {
            return TickOutcome::Halted(self.state.status);
        }
        self.state.tick += 1;

        let mut kills = KillLog::new();
        for phase in <TickPhase as strum::IntoEnumIterator>::iter() {
            self.run_phase(phase, env, &mut kills);
        }
        combat::death::resolve(self.state, env, kills);
        self.state.entities.remove_dead();
        TickOutcome::Advanced(self.state.tick)
    }

    fn run_phase(&mut self, phase: TickPhase, env: &GameEnv<'_>, kills: &mut KillLog) {
        let state = &mut *self.state;
        match phase {
            TickPhase::Clock => {
                if state.clock.advance() {
                    let time = state.clock.time;
                    state.events.push(GameEvent::ClockTick { time });
                }
            }
            TickPhase::Upkeep => upkeep(state),
            TickPhase::Spawn => {
                if spawner::ambient(state, env).is_some() {
                    state.events.push(GameEvent::EntitiesChanged);
                }
            }
            TickPhase::PlayerPhysics => player_physics(state, kills),
            TickPhase::EntityPhysics => {
                for entity in state.entities.iter_mut().filter(|e| e.is_alive()) {
                    physics::entity::step(entity, &state.world);
                }
            }
            TickPhase::Ai => ai::update(state, kills),
            TickPhase::Projectiles => combat::projectile::step(state, kills),
            TickPhase::Interaction => interaction::update(state, env, kills),
            // Resolved after the loop, once every hit of the tick has landed.
            TickPhase::Deaths => {}
        }
    }

    /// Applies one command between ticks. A rejected command leaves the
    /// state unchanged apart from queued notices.
    pub fn apply(&mut self, env: &GameEnv<'_>, command: Command) -> Result<(), CommandError> {
        if !self.state.is_running() {
            return Err(CommandError::SessionOver);
        }
        let state = &mut *self.state;
        match command {
            Command::KeyDown(keys) => key_down(state, keys),
            Command::KeyUp(keys) => state.input.keys.remove(keys),
            Command::Pointer { x, y } => state.input.pointer = (x, y),
            Command::Button { button, pressed } => match button {
                PointerButton::Primary => state.input.primary = pressed,
                PointerButton::Secondary => state.input.secondary = pressed,
            },
            Command::SelectSlot(slot) => {
                if slot >= GameConfig::INVENTORY_SLOTS {
                    return Err(CommandError::SlotOutOfRange(slot));
                }
                state.player.selected_slot = slot;
                state.mining = None;
                state.events.push(GameEvent::PlayerChanged);
            }
            Command::ToggleInventory => {
                state.player.inventory_open = !state.player.inventory_open;
                state.events.push(GameEvent::PlayerChanged);
            }
            Command::OrderVillager { entity, order } => dialogue::order(state, entity, order)?,
            Command::Remember { entity, line } => dialogue::remember(state, entity, line)?,
            Command::AcceptQuest { quest, giver } => quests::accept(state, env, &quest, giver)?,
            Command::CompleteQuest => quests::complete(state, env)?,
            Command::Craft(recipe) => inventory::craft(state, env, &recipe)?,
            Command::Equip(slot) => {
                inventory::equip(state, env, slot)?;
            }
            Command::Unequip(slot) => inventory::unequip(state, slot)?,
            Command::Swap(a, b) => inventory::swap(state, a, b)?,
            Command::EquipVillager { entity, slot } => {
                inventory::equip_villager(state, env, entity, slot)?
            }
            Command::ToggleCreative => session::toggle_creative(state, env),
            Command::Teleport(kind) => {
                session::teleport(state, kind)?;
            }
        }
        Ok(())
    }

    /// Takes every event queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.events.drain()
    }
}

fn key_down(state: &mut GameState, keys: HeldKeys) {
    let pressed = keys.difference(state.input.keys);
    state.input.keys.insert(keys);
    let player = &mut state.player;

    if pressed.contains(HeldKeys::JUMP) {
        player.jump_buffer = GameConfig::JUMP_BUFFER_TICKS;
    }
    for (index, key, direction) in [(0, HeldKeys::LEFT, -1.0), (1, HeldKeys::RIGHT, 1.0)] {
        if !pressed.contains(key) {
            continue;
        }
        let double_tap = state.input.last_press[index]
            .is_some_and(|last| state.tick.saturating_sub(last) <= GameConfig::DOUBLE_TAP_TICKS);
        if double_tap {
            physics::player::roll(player, direction);
        }
        state.input.last_press[index] = Some(state.tick);
    }
    if pressed.contains(HeldKeys::ROLL) {
        let direction = if state.input.held(HeldKeys::LEFT) {
            -1.0
        } else if state.input.held(HeldKeys::RIGHT) || player.facing_right {
            1.0
        } else {
            -1.0
        };
        physics::player::roll(player, direction);
    }
    if pressed.contains(HeldKeys::DOWN) {
        physics::player::ground_pound(player);
    }
}

/// Regeneration, cooldowns and roll expiry.
fn upkeep(state: &mut GameState) {
    state.action_cooldown = state.action_cooldown.saturating_sub(1);
    let player = &mut state.player;
    if state.clock.regen_due() && player.health < player.max_health && player.damage_cooldown == 0 {
        player.health += 1;
        state.events.push(GameEvent::PlayerChanged);
    }
    player.damage_cooldown = player.damage_cooldown.saturating_sub(1);
    player.movement_cooldown = player.movement_cooldown.saturating_sub(1);
    player.jump_buffer = player.jump_buffer.saturating_sub(1);
    if player.is_rolling() && (player.body.vx.abs() < 2.0 || player.damage_cooldown == 0) {
        player.flags.remove(MovementFlags::ROLLING);
    }
}

fn player_physics(state: &mut GameState, kills: &mut KillLog) {
    let report = physics::player::step(&mut state.player, &state.input, &state.world);
    if let Some(damage) = report.hard_landing.and_then(combat::fall_damage) {
        combat::hurt_player(state, damage);
    }
    if report.pounded {
        combat::ground_pound(state, kills);
    }
    if report.fell_out {
        let column = tile_coord(state.player.body.x);
        let row = state.world.surface_row(column).unwrap_or(0);
        state.player.body.y = (row - 2) as f32 * GameConfig::TILE_SIZE;
        state.player.body.vy = 0.0;
    }
    if report != physics::player::PlayerStep::default() {
        state.events.push(GameEvent::PlayerChanged);
    }
}
