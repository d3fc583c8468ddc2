//! Static catalog of script-level entity names plus the host-supplied
//! custom-entity configuration. The static sets are membership tables for
//! the type resolver and the source of completion candidates; iteration
//! order of a `phf` set follows declaration order, which keeps suggestions
//! deterministic.

use phf::{phf_map, phf_set};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityClass {
    Creature,
    Room,
    Power,
    Trap,
    Door,
    Object,
}

pub static PLAYERS: phf::Set<&'static str> = phf_set! {
    "PLAYER0", "PLAYER1", "PLAYER2", "PLAYER3",
    "PLAYER_GOOD", "PLAYER_NEUTRAL", "ALL_PLAYERS",
};

pub static GAME_VARS: phf::Set<&'static str> = phf_set! {
    "MONEY", "GAME_TURN", "HEART_HEALTH", "TOTAL_GOLD", "TOTAL_SCORE",
    "TOTAL_DIGGERS", "TOTAL_CREATURES", "TOTAL_DOORS", "TOTAL_RESEARCH",
    "TOTAL_AREA", "CREATURES_SCAVENGED_GAINED", "CREATURES_SCAVENGED_LOST",
    "BREAK_IN", "DOORS_DESTROYED", "BATTLES_WON", "BATTLES_LOST",
    "ROOMS_DESTROYED", "SPELLS_STOLEN", "GOLD_POTS_STOLEN",
    "TIMES_BROKEN_INTO", "DUNGEON_DESTROYED", "CREATURES_ANNOYED",
};

pub static CREATURES: phf::Set<&'static str> = phf_set! {
    "WIZARD", "BARBARIAN", "ARCHER", "MONK", "DWARFA", "KNIGHT", "AVATAR",
    "TUNNELLER", "WITCH", "GIANT", "FAIRY", "THIEF", "SAMURAI", "HORNY",
    "SKELETON", "TROLL", "DRAGON", "DEMONSPAWN", "FLY", "DARK_MISTRESS",
    "SORCEROR", "BILE_DEMON", "IMP", "BUG", "VAMPIRE", "SPIDER",
    "HELL_HOUND", "GHOST", "TENTACLE", "ORC",
};

pub static ROOMS: phf::Set<&'static str> = phf_set! {
    "ENTRANCE", "TREASURE", "RESEARCH", "PRISON", "TORTURE", "TRAINING",
    "WORKSHOP", "SCAVENGER", "TEMPLE", "GRAVEYARD", "GARDEN", "LAIR",
    "BARRACKS", "GUARD_POST", "BRIDGE",
};

pub static POWERS: phf::Set<&'static str> = phf_set! {
    "POWER_HAND", "POWER_IMP", "POWER_OBEY", "POWER_SLAP", "POWER_SIGHT",
    "POWER_CALL_TO_ARMS", "POWER_CAVE_IN", "POWER_HEAL_CREATURE",
    "POWER_HOLD_AUDIENCE", "POWER_LIGHTNING", "POWER_SPEED",
    "POWER_PROTECT", "POWER_CONCEAL", "POWER_DISEASE", "POWER_CHICKEN",
    "POWER_DESTROY_WALLS", "POWER_POSSESS", "POWER_ARMAGEDDON",
};

pub static TRAPS: phf::Set<&'static str> = phf_set! {
    "BOULDER", "ALARM", "POISON_GAS", "LIGHTNING", "WORD_OF_POWER", "LAVA",
};

pub static DOORS: phf::Set<&'static str> = phf_set! {
    "WOOD", "BRACED", "STEEL", "MAGIC",
};

pub static OBJECTS: phf::Set<&'static str> = phf_set! {
    "GOLD_CHEST", "GOLD_POT", "GOLD_HOARD", "SPINNING_KEY", "TORCH",
    "HEART_FLAME", "PRISON_BAR", "TEMPLE_SPANGLE",
};

/// Creature-selection criteria for commands like `KILL_CREATURE`.
pub static CRITERIA: phf::Set<&'static str> = phf_set! {
    "MOST_EXPERIENCED", "LEAST_EXPERIENCED", "NEAR_OWN_HEART",
    "NEAR_ENEMY_HEART", "ON_ENEMY_GROUND", "ANYWHERE",
};

/// Party-member objectives for `ADD_TO_PARTY`.
pub static OBJECTIVES: phf::Set<&'static str> = phf_set! {
    "STEAL_GOLD", "STEAL_SPELLS", "ATTACK_ENEMIES", "ATTACK_DUNGEON_HEART",
    "ATTACK_ROOMS", "DEFEND_PARTY",
};

/// Slab names for the slab conditionals and `CHANGE_SLAB_TYPE`.
pub static SLABS: phf::Set<&'static str> = phf_set! {
    "HARD", "GOLD", "DIRT", "TORCH_DIRT", "WALL", "PATH", "CLAIMED",
    "LAVA", "WATER", "GEMS", "ROCK",
};

/// Toggleable creature tendencies for `SET_CREATURE_TENDENCIES`.
pub static TENDENCIES: phf::Set<&'static str> = phf_set! {
    "IMPRISON", "FLEE",
};

/// The two research categories a `RESEARCH` order can target.
pub static RESEARCH_KINDS: phf::Set<&'static str> = phf_set! {
    "MAGIC", "ROOM",
};

/// Toggleable per-kind properties for `SET_CREATURE_PROPERTY`.
pub static CREATURE_PROPERTIES: phf::Set<&'static str> = phf_set! {
    "BLEEDS", "UNAFFECTED_BY_WIND", "IMMUNE_TO_GAS", "FLYING",
    "SEE_INVISIBLE", "PASS_LOCKED_DOORS", "NEVER_CHICKENS",
    "IMMUNE_TO_BOULDER", "NO_CORPSE_ROTTING", "NO_ENM_ANGER",
    "NO_IMPRISONMENT", "NEVER_SICK", "DIGGING_CREATURE", "LORD",
};

/// Tunable names accepted by `SET_GAME_RULE`.
pub static RULES: phf::Set<&'static str> = phf_set! {
    "MAX_GOLD_LOOKUP", "FOOD_GENERATION_SPEED", "PRESERVE_CLASSIC_BUGS",
    "ALLY_SHARE_VISION", "DUNGEON_HEART_HEAL_HEALTH", "BODIES_FOR_VAMPIRE",
    "PRISON_SKELETON_CHANCE", "GHOST_CONVERT_CHANCE",
};

static ENTITY_DOCS: phf::Map<&'static str, &'static str> = phf_map! {
    "PLAYER0" => "The human keeper.",
    "PLAYER_GOOD" => "The hero forces.",
    "PLAYER_NEUTRAL" => "Creatures and things owned by nobody.",
    "ALL_PLAYERS" => "Every keeper on the map at once.",
    "MONEY" => "Gold currently held by the player.",
    "GAME_TURN" => "Game turns elapsed since the level started.",
    "HEART_HEALTH" => "Current health of the player's dungeon heart.",
    "TOTAL_CREATURES" => "Number of creatures the player controls.",
    "DUNGEON_DESTROYED" => "Set once the player's dungeon heart is gone.",
    "BREAK_IN" => "Counts enemy break-ins into the player's dungeon.",
    "HORNY" => "The Horned Reaper. Handle with care.",
    "AVATAR" => "The Avatar, strongest of the heroes.",
    "IMP" => "The keeper's workforce.",
    "TUNNELLER" => "A hero digger. The usual leader of a tunnelling party.",
    "VAMPIRE" => "Rises from dead bodies left in the graveyard.",
    "SKELETON" => "Made from a prisoner starved in the prison.",
    "ENTRANCE" => "Where creatures join the dungeon.",
    "TREASURE" => "Gold storage. Creatures collect their pay here.",
    "LAIR" => "Creatures sleep and heal in their lair.",
    "GRAVEYARD" => "Dead bodies rot here. Feeds vampires.",
    "POWER_IMP" => "Summons an imp near the dungeon heart.",
    "POWER_CALL_TO_ARMS" => "Rallies creatures to a spot on the map.",
    "POWER_ARMAGEDDON" => "Teleports every creature to the caster's heart.",
    "BOULDER" => "A rolling boulder. Crushes whatever it hits.",
    "LAVA" => "Turns the floor under the victim into lava.",
    "GEMS" => "Indestructible gem seam. Mined forever.",
    "CLAIMED" => "Floor converted to a keeper's colors.",
    "IMPRISON" => "Knocked-out enemies are dragged to the prison.",
    "FLEE" => "Hurt creatures retreat to the lair instead of fighting.",
    "MAGIC" => "Research targets the spell book.",
    "ROOM" => "Research targets the room catalog.",
    "NEVER_CHICKENS" => "The creature refuses to eat chickens.",
    "FLYING" => "The creature moves over lava and water.",
    "LORD" => "The creature is announced as a lord of the land.",
    "KNIGHT" => "A hero champion. Lords of the land are knights.",
    "DRAGON" => "Breathes fire and wades through lava.",
    "DARK_MISTRESS" => "Enjoys pain, hers or anyone else's.",
    "BILE_DEMON" => "Slow, fat and very hard to kill.",
    "TEMPLE" => "Sacrifice creatures to the gods here.",
    "PRISON" => "Holds knocked-out enemies. Starvation makes skeletons.",
    "TORTURE" => "Converts or kills prisoners, slowly.",
    "SCAVENGER" => "Lures creatures away from enemy keepers.",
    "WORKSHOP" => "Manufactures traps and doors.",
    "POWER_SIGHT" => "Reveals a patch of the map for a while.",
    "POWER_CAVE_IN" => "Collapses the roof over the target area.",
    "POWER_DESTROY_WALLS" => "Breaches fortified enemy walls.",
    "POWER_CHICKEN" => "Turns the target creature into a chicken.",
    "ALARM" => "Rings a bell that draws the owner's creatures.",
    "WORD_OF_POWER" => "A shockwave that hits everything nearby.",
    "MOST_EXPERIENCED" => "Picks the highest-level matching creature.",
    "ANYWHERE" => "Picks any matching creature on the map.",
    "STEAL_GOLD" => "The party raids the treasure room and leaves.",
    "ATTACK_DUNGEON_HEART" => "The party marches on the dungeon heart.",
    "DEFEND_PARTY" => "The member guards the party leader.",
    "HARD" => "Undiggable rock.",
    "GOLD" => "A gold seam. Mined until it runs out.",
};

/// Free-text documentation for a static entity name, if any.
pub fn entity_doc(name: &str) -> Option<&'static str> {
    ENTITY_DOCS.get(name).copied()
}

pub fn static_set(class: EntityClass) -> &'static phf::Set<&'static str> {
    match class {
        EntityClass::Creature => &CREATURES,
        EntityClass::Room => &ROOMS,
        EntityClass::Power => &POWERS,
        EntityClass::Trap => &TRAPS,
        EntityClass::Door => &DOORS,
        EntityClass::Object => &OBJECTS,
    }
}

/// One host-declared entity name with optional documentation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomEntity {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
}

/// Host-supplied custom entity configuration, typically deserialized from a
/// JSON resource with `serde_json` and installed once through
/// [`crate::LanguageDef::install_custom`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomEntities {
    #[serde(default)]
    pub creatures: Vec<CustomEntity>,
    #[serde(default)]
    pub rooms: Vec<CustomEntity>,
    #[serde(default)]
    pub powers: Vec<CustomEntity>,
    #[serde(default)]
    pub traps: Vec<CustomEntity>,
    #[serde(default)]
    pub doors: Vec<CustomEntity>,
    #[serde(default)]
    pub objects: Vec<CustomEntity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_membership() {
        assert!(PLAYERS.contains("PLAYER0"));
        assert!(!PLAYERS.contains("PLAYER9"));
        assert!(CREATURES.contains("BILE_DEMON"));
        assert!(DOORS.contains("BRACED"));
        assert!(CREATURE_PROPERTIES.contains("NEVER_CHICKENS"));
    }

    #[test]
    fn custom_config_deserializes() {
        let cfg: CustomEntities = serde_json::from_str(
            r#"{ "traps": [ { "name": "FREEZE", "doc": "Custom freeze trap" } ] }"#,
        )
        .unwrap();
        assert_eq!(cfg.traps.len(), 1);
        assert_eq!(cfg.traps[0].name, "FREEZE");
        assert!(cfg.creatures.is_empty());
    }
}
