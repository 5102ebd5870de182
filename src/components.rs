//! Plain data shared between the engine and whatever drives it.
//!
//! Field names serialize in camelCase so saves written by the browser build
//! load unchanged. Missing or `null` numeric fields fall back to documented
//! defaults; the browser writes NaN as `null`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::constants::*;

/// Grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan(&self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

fn default_level() -> u32 {
    PLAYER_STARTING_LEVEL
}

fn default_speed() -> i32 {
    DEFAULT_SPEED
}

fn default_next_level_xp() -> u32 {
    XP_FIRST_LEVEL
}

fn default_floor() -> u32 {
    1
}

fn default_heal_cooldown() -> u64 {
    HEAL_SKILL_COOLDOWN_MS
}

fn default_quantity() -> u32 {
    1
}

/// `null` reads the same as a missing key
fn null_or<'de, D, T>(deserializer: D, fallback: fn() -> T) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_else(fallback))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    null_or(deserializer, T::default)
}

fn null_as_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    null_or(deserializer, default_level)
}

fn null_as_speed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    null_or(deserializer, default_speed)
}

fn null_as_floor<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    null_or(deserializer, default_floor)
}

fn null_as_heal_cooldown<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    null_or(deserializer, default_heal_cooldown)
}

/// Zero would level forever, so it reads as the first-level threshold too
fn null_as_next_level_xp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let xp = null_or(deserializer, default_next_level_xp)?;
    Ok(if xp == 0 { default_next_level_xp() } else { xp })
}

/// The stat block the combat resolver reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatStats {
    #[serde(default = "default_level", deserialize_with = "null_as_level")]
    pub level: u32,
    /// Only used by player-like attackers; monsters derive damage from level
    #[serde(default, deserialize_with = "null_as_default")]
    pub attack: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub defense: i32,
    #[serde(default = "default_speed", deserialize_with = "null_as_speed")]
    pub speed: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_monster: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_boss: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hp: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub max_hp: i32,
}

impl Default for CombatStats {
    fn default() -> Self {
        Self {
            level: PLAYER_STARTING_LEVEL,
            attack: 0,
            defense: 0,
            speed: DEFAULT_SPEED,
            is_monster: false,
            is_boss: false,
            hp: 0,
            max_hp: 0,
        }
    }
}

impl CombatStats {
    pub fn player(level: u32, attack: i32, defense: i32, max_hp: i32) -> Self {
        Self {
            level,
            attack,
            defense,
            hp: max_hp,
            max_hp,
            ..Default::default()
        }
    }

    pub fn monster(level: u32, max_hp: i32, is_boss: bool) -> Self {
        Self {
            level,
            speed: MONSTER_SPEED,
            is_monster: true,
            is_boss,
            hp: max_hp,
            max_hp,
            ..Default::default()
        }
    }

    /// Monster-formula damage applies to either role flag
    pub fn uses_monster_damage(&self) -> bool {
        self.is_monster || self.is_boss
    }

    /// Subtract damage and clamp into `[0, max_hp]`. Returns the new hp.
    pub fn take_damage(&mut self, damage: i32) -> i32 {
        self.hp = self.hp.saturating_sub(damage).clamp(0, self.max_hp.max(0));
        self.hp
    }

    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    pub fn missing_hp(&self) -> i32 {
        self.max_hp.saturating_sub(self.hp).max(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Weapon,
    Armor,
    Potion,
}

/// Equipment quality tier, weakest first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Broken,
    Rusty,
    #[default]
    Common,
    Sharpened,
    Hardened,
    Magical,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 7] = [
        Rarity::Broken,
        Rarity::Rusty,
        Rarity::Common,
        Rarity::Sharpened,
        Rarity::Hardened,
        Rarity::Magical,
        Rarity::Legendary,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Broken => "Broken",
            Rarity::Rusty => "Rusty",
            Rarity::Common => "Common",
            Rarity::Sharpened => "Sharpened",
            Rarity::Hardened => "Hardened",
            Rarity::Magical => "Magical",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Stat multiplier applied to the base item power
    pub fn multiplier(&self) -> f64 {
        match self {
            Rarity::Broken => 0.5,
            Rarity::Rusty => 0.8,
            Rarity::Common => 1.0,
            Rarity::Sharpened => 1.2,
            Rarity::Hardened => 1.5,
            Rarity::Magical => 2.0,
            Rarity::Legendary => 3.0,
        }
    }

    /// Base drop weight before level adjustment (higher = more common)
    pub fn weight(&self) -> f64 {
        match self {
            Rarity::Broken => 100.0,
            Rarity::Rusty => 80.0,
            Rarity::Common => 60.0,
            Rarity::Sharpened => 40.0,
            Rarity::Hardened => 25.0,
            Rarity::Magical => 10.0,
            Rarity::Legendary => 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub uid: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Attack for weapons, defense for armor, heal amount for potions
    pub bonus: i32,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl Item {
    pub fn potion(uid: u64, heal: i32) -> Self {
        Self {
            uid,
            name: POTION_NAME.to_string(),
            kind: ItemKind::Potion,
            bonus: heal,
            rarity: Rarity::Common,
            quantity: 1,
        }
    }

    pub fn is_equippable(&self) -> bool {
        matches!(self.kind, ItemKind::Weapon | ItemKind::Armor)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default)]
    pub weapon: Option<Item>,
    #[serde(default)]
    pub armor: Option<Item>,
}

impl Equipment {
    pub fn slot(&self, kind: ItemKind) -> Option<&Item> {
        match kind {
            ItemKind::Weapon => self.weapon.as_ref(),
            ItemKind::Armor => self.armor.as_ref(),
            ItemKind::Potion => None,
        }
    }

    pub fn slot_mut(&mut self, kind: ItemKind) -> Option<&mut Option<Item>> {
        match kind {
            ItemKind::Weapon => Some(&mut self.weapon),
            ItemKind::Armor => Some(&mut self.armor),
            ItemKind::Potion => None,
        }
    }
}

/// Everything the engine knows about the player.
///
/// Keys this struct doesn't recognise are kept in `extra` and written back
/// out on save, so state owned by the UI layer survives a trip through the
/// engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    #[serde(flatten)]
    pub combat: CombatStats,
    #[serde(default, deserialize_with = "null_as_default")]
    pub xp: u32,
    #[serde(default = "default_next_level_xp", deserialize_with = "null_as_next_level_xp")]
    pub next_level_xp: u32,
    #[serde(default = "default_floor", deserialize_with = "null_as_floor")]
    pub floor: u32,
    #[serde(default)]
    pub inventory: Vec<Item>,
    #[serde(default)]
    pub equipment: Equipment,
    #[serde(default, rename = "lastHealTime", deserialize_with = "null_as_default")]
    pub last_heal_ms: u64,
    #[serde(
        default = "default_heal_cooldown",
        rename = "healCooldown",
        deserialize_with = "null_as_heal_cooldown"
    )]
    pub heal_cooldown_ms: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerStats {
    /// Fresh level-1 character
    pub fn new() -> Self {
        Self {
            combat: CombatStats::player(
                PLAYER_STARTING_LEVEL,
                PLAYER_STARTING_ATTACK,
                PLAYER_STARTING_DEFENSE,
                PLAYER_STARTING_HEALTH,
            ),
            xp: 0,
            next_level_xp: XP_FIRST_LEVEL,
            floor: 1,
            inventory: Vec::new(),
            equipment: Equipment::default(),
            last_heal_ms: 0,
            heal_cooldown_ms: HEAL_SKILL_COOLDOWN_MS,
            extra: Map::new(),
        }
    }

    pub fn level(&self) -> u32 {
        self.combat.level
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonsterId(pub u64);

/// A live monster on the current floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub id: MonsterId,
    pub position: Position,
    pub stats: CombatStats,
    pub name: String,
}

impl Monster {
    pub fn is_boss(&self) -> bool {
        self.stats.is_boss
    }
}

/// Display name component for monsters in the world
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let stats: CombatStats = serde_json::from_str("{}").unwrap();
        assert_eq!(stats.level, 1);
        assert_eq!(stats.attack, 0);
        assert_eq!(stats.defense, 0);
        assert_eq!(stats.speed, 10);
        assert!(!stats.is_monster);
    }

    #[test]
    fn test_take_damage_clamps() {
        let mut stats = CombatStats::player(1, 5, 0, 20);
        assert_eq!(stats.take_damage(25), 0);
        assert!(stats.is_dead());
        let mut stats = CombatStats::player(1, 5, 0, 20);
        assert_eq!(stats.take_damage(-50), 20);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut stats = CombatStats::player(1, 5, 0, 20);
        stats.hp = 15;
        assert_eq!(stats.heal(10), 5);
        assert_eq!(stats.hp, 20);
    }

    #[test]
    fn test_player_loads_browser_save() {
        let json = r#"{
            "level": 3, "hp": 40, "maxHp": 130, "xp": 12, "nextLevelXp": 196,
            "attack": 12, "defense": 1, "speed": 11, "floor": 4,
            "inventory": [{"uid": 7, "name": "Health Potion", "type": "potion", "bonus": 40, "rarity": "common"}],
            "equipment": {"weapon": null, "armor": null},
            "lastHealTime": 5000, "isFogEnabled": true
        }"#;
        let player: PlayerStats = serde_json::from_str(json).unwrap();
        assert_eq!(player.level(), 3);
        assert_eq!(player.combat.max_hp, 130);
        assert_eq!(player.next_level_xp, 196);
        assert_eq!(player.inventory[0].quantity, 1);
        assert_eq!(player.last_heal_ms, 5000);
        // Unrecognised keys ride along
        assert_eq!(player.extra.get("isFogEnabled"), Some(&Value::from(true)));
        assert!(!player.extra.contains_key("maxHp"));
    }

    #[test]
    fn test_null_stats_fall_back_to_defaults() {
        let json = r#"{"level": 2, "hp": 50, "maxHp": 115, "xp": 30, "nextLevelXp": null}"#;
        let player: PlayerStats = serde_json::from_str(json).unwrap();
        assert_eq!(player.next_level_xp, XP_FIRST_LEVEL);
        assert_eq!(player.xp, 30);
        assert_eq!(player.combat.max_hp, 115);

        let json = r#"{"nextLevelXp": 0, "xp": null, "floor": null, "speed": null, "healCooldown": null}"#;
        let player: PlayerStats = serde_json::from_str(json).unwrap();
        assert_eq!(player.next_level_xp, XP_FIRST_LEVEL);
        assert_eq!(player.xp, 0);
        assert_eq!(player.floor, 1);
        assert_eq!(player.combat.speed, DEFAULT_SPEED);
        assert_eq!(player.heal_cooldown_ms, HEAL_SKILL_COOLDOWN_MS);
        assert!(player.extra.is_empty());

        let stats: CombatStats =
            serde_json::from_str(r#"{"level": null, "attack": null, "isBoss": null, "hp": 9}"#).unwrap();
        assert_eq!(stats.level, PLAYER_STARTING_LEVEL);
        assert_eq!(stats.attack, 0);
        assert!(!stats.is_boss);
        assert_eq!(stats.hp, 9);
    }

    #[test]
    fn test_extreme_damage_and_heal_saturate() {
        let mut stats = CombatStats::player(1, 5, 0, 20);
        stats.hp = i32::MIN + 1;
        assert_eq!(stats.take_damage(i32::MAX), 0);
        stats.hp = 10;
        assert_eq!(stats.heal(i32::MAX), 10);
        assert_eq!(stats.hp, 20);
    }

    #[test]
    fn test_player_save_keeps_unknown_keys() {
        let json = r#"{"level": 2, "maxHp": 100, "hp": 100, "cosmetics": ["hat", "cape"]}"#;
        let player: PlayerStats = serde_json::from_str(json).unwrap();
        let out = serde_json::to_value(&player).unwrap();
        assert_eq!(out["cosmetics"], serde_json::json!(["hat", "cape"]));
        assert_eq!(out["maxHp"], serde_json::json!(100));
        assert_eq!(out["nextLevelXp"], serde_json::json!(100));
    }
}
