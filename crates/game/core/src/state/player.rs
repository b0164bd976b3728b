use crate::config::GameConfig;
use crate::env::{QuestId, QuestObjective};

use super::body::Body;
use super::entity::EntityId;
use super::inventory::ItemId;

bitflags::bitflags! {
    /// Movement-state flags of the player.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct MovementFlags: u8 {
        const GROUNDED = 1 << 0;
        const ROLLING = 1 << 1;
        const CROUCHING = 1 << 2;
        const GROUND_POUNDING = 1 << 3;
        const CLIMBING = 1 << 4;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ArmorSlot {
    Head,
    Body,
    Module,
}

/// An equipped armor piece with its cached stats.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquippedItem {
    pub item: ItemId,
    pub defense: i32,
    pub speed: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub head: Option<EquippedItem>,
    pub body: Option<EquippedItem>,
    pub module: Option<EquippedItem>,
}

impl Equipment {
    pub fn slot(&self, slot: ArmorSlot) -> Option<&EquippedItem> {
        match slot {
            ArmorSlot::Head => self.head.as_ref(),
            ArmorSlot::Body => self.body.as_ref(),
            ArmorSlot::Module => self.module.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, slot: ArmorSlot) -> &mut Option<EquippedItem> {
        match slot {
            ArmorSlot::Head => &mut self.head,
            ArmorSlot::Body => &mut self.body,
            ArmorSlot::Module => &mut self.module,
        }
    }

    fn pieces(&self) -> impl Iterator<Item = &EquippedItem> {
        [&self.head, &self.body, &self.module]
            .into_iter()
            .filter_map(Option::as_ref)
    }

    /// Defense summed over all slots.
    pub fn defense(&self) -> i32 {
        self.pieces().map(|p| p.defense).sum()
    }

    /// Speed bonus; only the module slot contributes.
    pub fn speed(&self) -> f32 {
        self.module.as_ref().map_or(0.0, |m| m.speed as f32)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveQuest {
    pub quest: QuestId,
    pub giver: EntityId,
    pub objective: QuestObjective,
    pub progress: u32,
}

impl ActiveQuest {
    pub fn is_met(&self) -> bool {
        self.progress >= self.objective.amount()
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub body: Body,
    pub health: i32,
    pub max_health: i32,
    pub facing_right: bool,
    pub flags: MovementFlags,
    /// -1 / 0 / 1: side of the wall the player is sliding against.
    pub wall_slide: i8,
    pub damage_cooldown: u32,
    pub movement_cooldown: u32,
    pub jump_buffer: u32,
    pub selected_slot: usize,
    pub inventory_open: bool,
    pub creative: bool,
    pub equipment: Equipment,
    pub quest: Option<ActiveQuest>,
}

impl PlayerState {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            body: Body::new(x, y, GameConfig::PLAYER_WIDTH, GameConfig::PLAYER_HEIGHT),
            health: GameConfig::PLAYER_MAX_HEALTH,
            max_health: GameConfig::PLAYER_MAX_HEALTH,
            facing_right: true,
            flags: MovementFlags::empty(),
            wall_slide: 0,
            damage_cooldown: 0,
            movement_cooldown: 0,
            jump_buffer: 0,
            selected_slot: 0,
            inventory_open: false,
            creative: false,
            equipment: Equipment::default(),
            quest: None,
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.flags.contains(MovementFlags::GROUNDED)
    }

    pub fn is_rolling(&self) -> bool {
        self.flags.contains(MovementFlags::ROLLING)
    }

    pub fn defense(&self) -> i32 {
        self.equipment.defense()
    }

    pub fn speed_bonus(&self) -> f32 {
        self.equipment.speed()
    }

    /// Hand position projectiles and melee sweeps originate from.
    pub fn muzzle(&self) -> (f32, f32) {
        (self.body.x + 6.0, self.body.y + 12.0)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equipment_sums_defense_and_module_speed() {
        let mut eq = Equipment::default();
        eq.head = Some(EquippedItem {
            item: ItemId::new("sky_wing"),
            defense: 5,
            speed: 3,
        });
        eq.module = Some(EquippedItem {
            item: ItemId::new("omega_core"),
            defense: 10,
            speed: 2,
        });
        assert_eq!(eq.defense(), 15);
        assert_eq!(eq.speed(), 2.0);
    }
}
