//! Inventory, equipment and healing.
//!
//! Equipment bonuses are folded straight into the player's attack and
//! defense, so the combat resolver never needs to know about gear.

use crate::components::{Item, ItemKind, PlayerStats};
use crate::constants::*;
use crate::error::ItemError;

/// Result of a successful item or skill use
#[derive(Debug, Clone, PartialEq)]
pub enum ItemUseResult {
    /// Item went into its slot; whatever it displaced is back in the bag
    Equipped { replaced: Option<Item> },
    /// Slot emptied, item returned to the bag
    Unequipped(Item),
    /// HP actually restored (may be less than the nominal amount)
    Healed { amount: i32 },
}

/// Add an item to the bag. Potions with the same name stack.
pub fn add_to_inventory(stats: &mut PlayerStats, item: Item) {
    if item.kind == ItemKind::Potion {
        if let Some(existing) = stats
            .inventory
            .iter_mut()
            .find(|i| i.kind == ItemKind::Potion && i.name == item.name)
        {
            existing.quantity += item.quantity.max(1);
            return;
        }
    }
    stats.inventory.push(item);
}

fn take_from_inventory(stats: &mut PlayerStats, uid: u64) -> Result<Item, ItemError> {
    let index = stats
        .inventory
        .iter()
        .position(|i| i.uid == uid)
        .ok_or(ItemError::NotInInventory(uid))?;
    Ok(stats.inventory.remove(index))
}

/// Stat an equipment slot feeds
fn apply_bonus(stats: &mut PlayerStats, kind: ItemKind, delta: i32) {
    match kind {
        ItemKind::Weapon => stats.combat.attack += delta,
        ItemKind::Armor => stats.combat.defense += delta,
        ItemKind::Potion => {}
    }
}

/// Equip the item with `uid` from the bag, swapping out the current one.
pub fn equip_item(stats: &mut PlayerStats, uid: u64) -> Result<ItemUseResult, ItemError> {
    let item = stats
        .inventory
        .iter()
        .find(|i| i.uid == uid)
        .ok_or(ItemError::NotInInventory(uid))?;
    if !item.is_equippable() {
        return Err(ItemError::NotEquippable(item.name.clone()));
    }

    let item = take_from_inventory(stats, uid)?;
    let kind = item.kind;
    let bonus = item.bonus;

    let replaced = stats
        .equipment
        .slot_mut(kind)
        .and_then(|slot| slot.replace(item));

    let old_bonus = replaced.as_ref().map(|old| old.bonus).unwrap_or(0);
    apply_bonus(stats, kind, bonus - old_bonus);
    if let Some(old) = &replaced {
        stats.inventory.push(old.clone());
    }

    Ok(ItemUseResult::Equipped { replaced })
}

pub fn unequip_item(stats: &mut PlayerStats, kind: ItemKind) -> Result<ItemUseResult, ItemError> {
    let item = stats
        .equipment
        .slot_mut(kind)
        .and_then(Option::take)
        .ok_or(ItemError::SlotEmpty)?;

    apply_bonus(stats, kind, -item.bonus);
    stats.inventory.push(item.clone());
    Ok(ItemUseResult::Unequipped(item))
}

/// Drink one potion from the stack with `uid`.
pub fn consume_potion(stats: &mut PlayerStats, uid: u64) -> Result<ItemUseResult, ItemError> {
    let index = stats
        .inventory
        .iter()
        .position(|i| i.uid == uid)
        .ok_or(ItemError::NotInInventory(uid))?;

    let item = &stats.inventory[index];
    if item.kind != ItemKind::Potion {
        return Err(ItemError::NotConsumable(item.name.clone()));
    }
    if stats.combat.missing_hp() == 0 {
        return Err(ItemError::FullHealth);
    }

    let heal = item.bonus;
    if item.quantity > 1 {
        stats.inventory[index].quantity -= 1;
    } else {
        stats.inventory.remove(index);
    }

    let amount = stats.combat.heal(heal);
    Ok(ItemUseResult::Healed { amount })
}

/// Cast the cooldown-gated heal skill at time `now_ms`.
pub fn use_heal_skill(stats: &mut PlayerStats, now_ms: u64) -> Result<ItemUseResult, ItemError> {
    let elapsed = now_ms.saturating_sub(stats.last_heal_ms);
    // Never used: no cooldown to wait out
    if stats.last_heal_ms != 0 && elapsed < stats.heal_cooldown_ms {
        return Err(ItemError::OnCooldown {
            remaining_ms: stats.heal_cooldown_ms - elapsed,
        });
    }
    if stats.combat.missing_hp() == 0 {
        return Err(ItemError::FullHealth);
    }

    let heal = (stats.combat.max_hp as f64 * HEAL_SKILL_FRACTION).floor() as i32;
    let amount = stats.combat.heal(heal);
    stats.last_heal_ms = now_ms;
    Ok(ItemUseResult::Healed { amount })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Rarity;

    fn gear(uid: u64, kind: ItemKind, bonus: i32) -> Item {
        Item {
            uid,
            name: format!("Test {uid}"),
            kind,
            bonus,
            rarity: Rarity::Common,
            quantity: 1,
        }
    }

    #[test]
    fn test_potions_stack_by_name() {
        let mut stats = PlayerStats::new();
        add_to_inventory(&mut stats, Item::potion(1, 30));
        add_to_inventory(&mut stats, Item::potion(2, 30));
        add_to_inventory(&mut stats, gear(3, ItemKind::Weapon, 5));
        add_to_inventory(&mut stats, gear(4, ItemKind::Weapon, 5));
        assert_eq!(stats.inventory.len(), 3);
        assert_eq!(stats.inventory[0].quantity, 2);
    }

    #[test]
    fn test_equip_adds_bonus() {
        let mut stats = PlayerStats::new();
        stats.inventory.push(gear(1, ItemKind::Weapon, 5));
        let result = equip_item(&mut stats, 1).unwrap();
        assert_eq!(result, ItemUseResult::Equipped { replaced: None });
        assert_eq!(stats.combat.attack, PLAYER_STARTING_ATTACK + 5);
        assert!(stats.inventory.is_empty());
        assert_eq!(stats.equipment.weapon.as_ref().map(|i| i.uid), Some(1));
    }

    #[test]
    fn test_equip_swaps_and_rebalances() {
        let mut stats = PlayerStats::new();
        stats.inventory.push(gear(1, ItemKind::Armor, 3));
        stats.inventory.push(gear(2, ItemKind::Armor, 7));
        equip_item(&mut stats, 1).unwrap();
        let result = equip_item(&mut stats, 2).unwrap();
        assert!(matches!(result, ItemUseResult::Equipped { replaced: Some(ref old) } if old.uid == 1));
        assert_eq!(stats.combat.defense, 7);
        assert_eq!(stats.inventory.len(), 1);
        assert_eq!(stats.inventory[0].uid, 1);
    }

    #[test]
    fn test_unequip_restores_stats() {
        let mut stats = PlayerStats::new();
        stats.inventory.push(gear(1, ItemKind::Weapon, 4));
        equip_item(&mut stats, 1).unwrap();
        unequip_item(&mut stats, ItemKind::Weapon).unwrap();
        assert_eq!(stats.combat.attack, PLAYER_STARTING_ATTACK);
        assert_eq!(stats.inventory.len(), 1);
        assert_eq!(unequip_item(&mut stats, ItemKind::Weapon), Err(ItemError::SlotEmpty));
    }

    #[test]
    fn test_equip_rejects_potions_and_missing() {
        let mut stats = PlayerStats::new();
        stats.inventory.push(Item::potion(9, 30));
        assert!(matches!(equip_item(&mut stats, 9), Err(ItemError::NotEquippable(_))));
        assert_eq!(equip_item(&mut stats, 42), Err(ItemError::NotInInventory(42)));
        assert_eq!(stats.inventory.len(), 1);
    }

    #[test]
    fn test_consume_potion_partial_heal() {
        let mut stats = PlayerStats::new();
        stats.combat.hp = stats.combat.max_hp - 10;
        add_to_inventory(&mut stats, Item::potion(1, 30));
        add_to_inventory(&mut stats, Item::potion(2, 30));
        let result = consume_potion(&mut stats, 1).unwrap();
        assert_eq!(result, ItemUseResult::Healed { amount: 10 });
        assert_eq!(stats.combat.hp, stats.combat.max_hp);
        assert_eq!(stats.inventory[0].quantity, 1);
    }

    #[test]
    fn test_consume_potion_refused_at_full() {
        let mut stats = PlayerStats::new();
        stats.inventory.push(Item::potion(1, 30));
        assert_eq!(consume_potion(&mut stats, 1), Err(ItemError::FullHealth));
        assert_eq!(stats.inventory.len(), 1);
    }

    #[test]
    fn test_consume_last_potion_removes_it() {
        let mut stats = PlayerStats::new();
        stats.combat.hp = 1;
        stats.inventory.push(Item::potion(1, 30));
        consume_potion(&mut stats, 1).unwrap();
        assert!(stats.inventory.is_empty());
        assert_eq!(stats.combat.hp, 31);
    }

    #[test]
    fn test_heal_skill_cooldown() {
        let mut stats = PlayerStats::new();
        stats.combat.hp = 10;
        let result = use_heal_skill(&mut stats, 1_000).unwrap();
        assert_eq!(result, ItemUseResult::Healed { amount: 30 });
        assert_eq!(
            use_heal_skill(&mut stats, 4_000),
            Err(ItemError::OnCooldown { remaining_ms: 7_000 })
        );
        assert!(use_heal_skill(&mut stats, 11_000).is_ok());
        assert_eq!(stats.combat.hp, 70);
    }

    #[test]
    fn test_heal_skill_refused_at_full() {
        let mut stats = PlayerStats::new();
        assert_eq!(use_heal_skill(&mut stats, 50_000), Err(ItemError::FullHealth));
        assert_eq!(stats.last_heal_ms, 0);
    }
}
