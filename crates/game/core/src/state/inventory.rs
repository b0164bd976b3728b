//! Player inventory: a fixed row of slots holding item stacks.

use crate::config::GameConfig;
use crate::world::TileKind;

/// Identifier of a catalog item (tools, weapons, armor, consumables, materials).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a stack holds: a placeable tile block or a catalog item.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKey {
    Tile(TileKind),
    Item(ItemId),
}

impl ItemKey {
    pub fn item(id: &str) -> Self {
        Self::Item(ItemId::new(id))
    }

    pub fn as_tile(&self) -> Option<TileKind> {
        match self {
            Self::Tile(tile) => Some(*tile),
            Self::Item(_) => None,
        }
    }

    pub fn as_item(&self) -> Option<&ItemId> {
        match self {
            Self::Item(id) => Some(id),
            Self::Tile(_) => None,
        }
    }
}

impl core::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Tile(tile) => write!(f, "{tile}"),
            Self::Item(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    pub key: ItemKey,
    pub count: u16,
}

impl ItemStack {
    pub fn new(key: ItemKey, count: u16) -> Self {
        Self { key, count }
    }
}

/// Fixed-size slot array; the first [`GameConfig::HOTBAR_SLOTS`] form the hotbar.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryState {
    slots: Vec<Option<ItemStack>>,
}

impl Default for InventoryState {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryState {
    pub fn new() -> Self {
        Self {
            slots: vec![None; GameConfig::INVENTORY_SLOTS],
        }
    }

    pub fn slots(&self) -> &[Option<ItemStack>] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&ItemStack> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Adds items, topping up an open stack of the same key first and then
    /// filling the first empty slot. Returns the count that did not fit.
    pub fn add(&mut self, key: ItemKey, count: u16) -> u16 {
        let mut remaining = count;
        for stack in self.slots.iter_mut().flatten() {
            if remaining == 0 {
                break;
            }
            if stack.key == key && stack.count < GameConfig::MAX_STACK {
                let room = GameConfig::MAX_STACK - stack.count;
                let moved = room.min(remaining);
                stack.count += moved;
                remaining -= moved;
            }
        }
        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if slot.is_none() {
                let moved = remaining.min(GameConfig::MAX_STACK);
                *slot = Some(ItemStack::new(key.clone(), moved));
                remaining -= moved;
            }
        }
        remaining
    }

    /// Places a stack into the first empty slot, ignoring stacking limits.
    /// Used for bulk kits (creative mode). Returns false when full.
    pub fn put(&mut self, stack: ItemStack) -> bool {
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(stack);
                true
            }
            None => false,
        }
    }

    pub fn count_of(&self, key: &ItemKey) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|s| &s.key == key)
            .map(|s| u32::from(s.count))
            .sum()
    }

    pub fn has(&self, key: &ItemKey, count: u32) -> bool {
        self.count_of(key) >= count
    }

    /// Removes `count` items of `key` across slots; all-or-nothing.
    pub fn remove(&mut self, key: &ItemKey, count: u32) -> bool {
        if !self.has(key, count) {
            return false;
        }
        let mut remaining = count;
        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            let Some(stack) = slot else { continue };
            if &stack.key != key {
                continue;
            }
            let taken = u32::from(stack.count).min(remaining);
            stack.count -= taken as u16;
            remaining -= taken;
            if stack.count == 0 {
                *slot = None;
            }
        }
        true
    }

    /// Takes up to `count` items out of one slot.
    pub fn take_from_slot(&mut self, index: usize, count: u16) -> Option<ItemStack> {
        let slot = self.slots.get_mut(index)?;
        let stack = slot.as_mut()?;
        let taken = stack.count.min(count);
        let key = stack.key.clone();
        stack.count -= taken;
        if stack.count == 0 {
            *slot = None;
        }
        (taken > 0).then(|| ItemStack::new(key, taken))
    }

    /// Replaces a slot's content, returning what was there.
    pub fn replace_slot(&mut self, index: usize, stack: Option<ItemStack>) -> Option<ItemStack> {
        let slot = self.slots.get_mut(index)?;
        core::mem::replace(slot, stack)
    }

    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        if a >= self.slots.len() || b >= self.slots.len() {
            return false;
        }
        self.slots.swap(a, b);
        true
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_tops_up_then_fills_empty() {
        let mut inv = InventoryState::new();
        assert_eq!(inv.add(ItemKey::Tile(TileKind::Dirt), 60), 0);
        assert_eq!(inv.add(ItemKey::Tile(TileKind::Dirt), 10), 0);
        assert_eq!(inv.slot(0).map(|s| s.count), Some(64));
        assert_eq!(inv.slot(1).map(|s| s.count), Some(6));
        assert_eq!(inv.count_of(&ItemKey::Tile(TileKind::Dirt)), 70);
    }

    #[test]
    fn add_reports_overflow_when_full() {
        let mut inv = InventoryState::new();
        for i in 0..GameConfig::INVENTORY_SLOTS {
            inv.put(ItemStack::new(ItemKey::Item(ItemId::new(format!("junk{i}"))), 1));
        }
        assert!(inv.is_full());
        assert_eq!(inv.add(ItemKey::Tile(TileKind::Stone), 3), 3);
    }

    #[test]
    fn remove_is_all_or_nothing() {
        let mut inv = InventoryState::new();
        inv.add(ItemKey::item("bandage"), 2);
        assert!(!inv.remove(&ItemKey::item("bandage"), 3));
        assert_eq!(inv.count_of(&ItemKey::item("bandage")), 2);
        assert!(inv.remove(&ItemKey::item("bandage"), 2));
        assert!(inv.slot(0).is_none());
    }

    #[test]
    fn take_from_slot_clears_empty_slot() {
        let mut inv = InventoryState::new();
        inv.add(ItemKey::Tile(TileKind::Torch), 1);
        let taken = inv.take_from_slot(0, 5);
        assert_eq!(taken.map(|s| s.count), Some(1));
        assert!(inv.slot(0).is_none());
        assert!(inv.take_from_slot(0, 1).is_none());
    }
}
