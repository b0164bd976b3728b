//! Inventory operations: pickups, crafting, equipment and consumables.

use crate::config::GameConfig;
use crate::env::{GameEnv, ItemKind, Recipe, RecipeId};
use crate::state::{ArmorSlot, EntityId, EquippedItem, GameState, ItemKey, ItemStack};
use crate::world::tile_coord;

use super::command::CommandError;
use super::{GameEvent, quests};

/// Puts items into the inventory. When nothing fits, the overflow is dropped
/// with an "Inventory Full!" notice. Returns the count that was stored.
pub fn give(state: &mut GameState, key: ItemKey, count: u16) -> u16 {
    let overflow = state.inventory.add(key, count);
    if overflow > 0 {
        state.events.notice("Inventory Full!");
    }
    let stored = count - overflow;
    if stored > 0 {
        state.events.push(GameEvent::InventoryChanged);
        quests::refresh_collect(state);
    }
    stored
}

/// Crafts a recipe: checks ingredients and station, consumes the ingredients
/// and stores the result.
pub fn craft(state: &mut GameState, env: &GameEnv<'_>, id: &RecipeId) -> Result<(), CommandError> {
    let recipe = env
        .tables()?
        .recipe(id)
        .ok_or_else(|| CommandError::UnknownRecipe(id.clone()))?;
    check_ingredients(state, &recipe)?;
    if let Some(station) = recipe.station {
        let reach = (GameConfig::CRAFT_STATION_RADIUS / GameConfig::TILE_SIZE).ceil() as i32;
        let (tx, ty) = (tile_coord(state.player.body.x), tile_coord(state.player.body.y));
        if !state.world.contains_near(tx, ty, reach, station) {
            state.events.notice(format!("Requires {station} nearby."));
            return Err(CommandError::StationMissing(station));
        }
    }

    for ingredient in &recipe.ingredients {
        state
            .inventory
            .remove(&ingredient.key, u32::from(ingredient.count));
    }
    let overflow = state.inventory.add(recipe.result.key.clone(), recipe.result.count);
    if overflow > 0 {
        state.events.notice("Inventory Full! Item lost.");
    }
    state.events.push(GameEvent::InventoryChanged);
    state.events.push(GameEvent::PlayerChanged);
    quests::refresh_collect(state);
    Ok(())
}

fn check_ingredients(state: &GameState, recipe: &Recipe) -> Result<(), CommandError> {
    match recipe
        .ingredients
        .iter()
        .find(|i| !state.inventory.has(&i.key, u32::from(i.count)))
    {
        Some(missing) => Err(CommandError::MissingIngredient(missing.key.clone())),
        None => Ok(()),
    }
}

/// Moves an armor piece from an inventory slot into its equipment slot. The
/// previously worn piece, if any, goes back into the inventory.
pub fn equip(state: &mut GameState, env: &GameEnv<'_>, slot: usize) -> Result<ArmorSlot, CommandError> {
    let stack = state
        .inventory
        .slot(slot)
        .cloned()
        .ok_or(CommandError::EmptySlot(slot))?;
    let id = stack.key.as_item().ok_or(CommandError::NotEquippable)?;
    let definition = env.item(id)?;
    let armor = definition.armor_slot().ok_or(CommandError::NotEquippable)?;

    state.inventory.take_from_slot(slot, 1);
    let worn = EquippedItem {
        item: definition.id.clone(),
        defense: definition.stats.defense,
        speed: definition.stats.move_bonus,
    };
    if let Some(previous) = state.player.equipment.slot_mut(armor).replace(worn) {
        state.inventory.add(ItemKey::Item(previous.item), 1);
    }
    state.events.push(GameEvent::InventoryChanged);
    state.events.push(GameEvent::PlayerChanged);
    Ok(armor)
}

/// Returns a worn piece to the inventory.
pub fn unequip(state: &mut GameState, slot: ArmorSlot) -> Result<(), CommandError> {
    if state.inventory.is_full() {
        return Err(CommandError::InventoryFull);
    }
    let worn = state
        .player
        .equipment
        .slot_mut(slot)
        .take()
        .ok_or(CommandError::NothingEquipped(slot))?;
    state.inventory.add(ItemKey::Item(worn.item), 1);
    state.events.push(GameEvent::InventoryChanged);
    state.events.push(GameEvent::PlayerChanged);
    Ok(())
}

pub fn swap(state: &mut GameState, a: usize, b: usize) -> Result<(), CommandError> {
    if !state.inventory.swap(a, b) {
        return Err(CommandError::SlotOutOfRange(a.max(b)));
    }
    state.events.push(GameEvent::InventoryChanged);
    Ok(())
}

/// Hands a weapon or armor piece from the inventory to a villager. Weapons
/// set the villager's strike damage; armor adds to its defense.
pub fn equip_villager(
    state: &mut GameState,
    env: &GameEnv<'_>,
    villager: EntityId,
    slot: usize,
) -> Result<(), CommandError> {
    let stack = state
        .inventory
        .slot(slot)
        .cloned()
        .ok_or(CommandError::EmptySlot(slot))?;
    let id = stack.key.as_item().ok_or(CommandError::NotEquippable)?;
    let definition = env.item(id)?;
    let entity = state
        .entities
        .get_mut(villager)
        .filter(|e| e.is_alive())
        .ok_or(CommandError::UnknownEntity(villager))?;
    let data = entity.villager_mut().ok_or(CommandError::NotAVillager(villager))?;
    match definition.kind {
        ItemKind::Weapon => data.weapon_damage = definition.stats.damage,
        ItemKind::Armor(_) => data.defense += definition.stats.defense,
        _ => return Err(CommandError::NotEquippable),
    }
    state.inventory.take_from_slot(slot, 1);
    state.events.push(GameEvent::InventoryChanged);
    state.events.push(GameEvent::EntitiesChanged);
    Ok(())
}

/// Uses the consumable in the selected slot. Healing items are only spent
/// while the player is hurt. Returns whether one was consumed.
pub fn consume_selected(state: &mut GameState, env: &GameEnv<'_>) -> bool {
    let slot = state.player.selected_slot;
    let Some(id) = state.inventory.slot(slot).and_then(|s| s.key.as_item()).cloned() else {
        return false;
    };
    let Ok(definition) = env.item(&id) else {
        return false;
    };
    let player = &mut state.player;
    if definition.kind != ItemKind::Consumable || definition.stats.heal <= 0 || player.health >= player.max_health {
        return false;
    }
    player.health = (player.health + definition.stats.heal).min(player.max_health);
    state.inventory.take_from_slot(slot, 1);
    state.events.push(GameEvent::InventoryChanged);
    state.events.push(GameEvent::PlayerChanged);
    true
}

/// Replaces the whole inventory with the creative kit: tools and weapons
/// from the catalog followed by large stacks of building blocks.
pub fn fill_creative(state: &mut GameState, env: &GameEnv<'_>) {
    use crate::world::TileKind::*;
    const KIT_ITEMS: [&str; 6] = [
        "admin_pick",
        "railgun",
        "rocket_launcher",
        "laser_rifle",
        "shotgun",
        "pistol",
    ];
    const KIT_BLOCKS: [crate::world::TileKind; 15] = [
        Torch,
        Wood,
        Stone,
        Dirt,
        Plank,
        AncientBrick,
        FactoryMetal,
        Concrete,
        LabWall,
        Bookshelf,
        GoldOre,
        IronOre,
        Wheat,
        Altar,
        ServerTerminal,
    ];

    state.inventory.clear();
    for id in KIT_ITEMS {
        let key = ItemKey::item(id);
        if key.as_item().is_some_and(|id| env.item(id).is_ok()) {
            state.inventory.put(ItemStack::new(key, 1));
        }
    }
    for tile in KIT_BLOCKS {
        state.inventory.put(ItemStack::new(ItemKey::Tile(tile), 999));
    }
    state.events.push(GameEvent::InventoryChanged);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{
        ContentSnapshot, ItemDefinition, ItemStats, ItemsSnapshot, TablesSnapshot,
    };
    use crate::state::ItemId;
    use crate::world::{TileGrid, TileKind};

    fn content() -> ContentSnapshot {
        let items = ItemsSnapshot::new(vec![
            ItemDefinition::new("scrap_helmet", "Scrap Helmet", ItemKind::Armor(ArmorSlot::Head))
                .with_stats(ItemStats {
                    defense: 3,
                    ..ItemStats::default()
                }),
            ItemDefinition::new("rusty_blade", "Rusty Blade", ItemKind::Weapon).with_stats(ItemStats {
                damage: Some(12),
                ..ItemStats::default()
            }),
            ItemDefinition::new("bandage", "Bandage", ItemKind::Consumable).with_stats(ItemStats {
                heal: 20,
                ..ItemStats::default()
            }),
        ]);
        let tables = TablesSnapshot::new(
            Vec::new(),
            vec![Recipe {
                id: RecipeId::new("plank"),
                result: ItemStack::new(ItemKey::Tile(TileKind::Plank), 4),
                ingredients: vec![ItemStack::new(ItemKey::Tile(TileKind::Wood), 1)],
                station: Some(TileKind::Workbench),
            }],
        );
        ContentSnapshot {
            items,
            tables,
            ..ContentSnapshot::default()
        }
    }

    fn state() -> GameState {
        GameState::new(5, TileGrid::new(40, 40), (160.0, 160.0))
    }

    #[test]
    fn give_reports_full_inventory() {
        let mut state = state();
        for i in 0..GameConfig::INVENTORY_SLOTS {
            state
                .inventory
                .put(ItemStack::new(ItemKey::Item(ItemId::new(format!("junk{i}"))), 1));
        }
        assert_eq!(give(&mut state, ItemKey::Tile(TileKind::Dirt), 1), 0);
        let drained = state.events.drain();
        assert!(drained.contains(&GameEvent::notice("Inventory Full!")));
        assert!(!drained.contains(&GameEvent::InventoryChanged));
    }

    #[test]
    fn crafting_needs_a_station_nearby() {
        let content = content();
        let env = content.env();
        let mut state = state();
        state.inventory.add(ItemKey::Tile(TileKind::Wood), 2);
        let id = RecipeId::new("plank");

        assert_eq!(
            craft(&mut state, &env, &id),
            Err(CommandError::StationMissing(TileKind::Workbench))
        );
        assert_eq!(state.inventory.count_of(&ItemKey::Tile(TileKind::Wood)), 2);

        state.world.set(14, 10, TileKind::Workbench);
        assert_eq!(craft(&mut state, &env, &id), Ok(()));
        assert_eq!(state.inventory.count_of(&ItemKey::Tile(TileKind::Wood)), 1);
        assert_eq!(state.inventory.count_of(&ItemKey::Tile(TileKind::Plank)), 4);
    }

    #[test]
    fn crafting_without_ingredients_fails() {
        let content = content();
        let mut state = state();
        state.world.set(10, 10, TileKind::Workbench);
        assert_eq!(
            craft(&mut state, &content.env(), &RecipeId::new("plank")),
            Err(CommandError::MissingIngredient(ItemKey::Tile(TileKind::Wood)))
        );
    }

    #[test]
    fn equip_and_unequip_round_trip_through_inventory() {
        let content = content();
        let env = content.env();
        let mut state = state();
        state.inventory.add(ItemKey::item("scrap_helmet"), 1);
        assert_eq!(equip(&mut state, &env, 0), Ok(ArmorSlot::Head));
        assert_eq!(state.player.defense(), 3);
        assert!(state.inventory.slot(0).is_none());

        assert_eq!(unequip(&mut state, ArmorSlot::Head), Ok(()));
        assert_eq!(state.player.defense(), 0);
        assert_eq!(state.inventory.count_of(&ItemKey::item("scrap_helmet")), 1);
        assert_eq!(
            unequip(&mut state, ArmorSlot::Head),
            Err(CommandError::NothingEquipped(ArmorSlot::Head))
        );
    }

    #[test]
    fn weapons_cannot_be_worn_by_the_player() {
        let content = content();
        let mut state = state();
        state.inventory.add(ItemKey::item("rusty_blade"), 1);
        assert_eq!(equip(&mut state, &content.env(), 0), Err(CommandError::NotEquippable));
    }

    #[test]
    fn bandage_heals_only_when_hurt() {
        let content = content();
        let env = content.env();
        let mut state = state();
        state.inventory.add(ItemKey::item("bandage"), 2);
        assert!(!consume_selected(&mut state, &env));
        state.player.health = 90;
        assert!(consume_selected(&mut state, &env));
        assert_eq!(state.player.health, 100);
        assert_eq!(state.inventory.count_of(&ItemKey::item("bandage")), 1);
    }
}
