use std::fmt;

use dashmap::DashMap;
use rustc_hash::FxHashMap;

use crate::entities::{CustomEntities, CustomEntity, EntityClass};

pub mod commands;
pub mod derive;

pub use derive::derive_for_call;

/// Closed set of parameter kinds. Composite kinds expand to a fixed list of
/// concrete kinds and validate first-match-wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Player,
    Flag,
    Timer,
    GameVar,
    ActionPoint,
    HeroGate,
    Number,
    Byte,
    Slot,
    Text,
    Comparison,
    Party,
    NewParty,
    Creature,
    Room,
    Power,
    Trap,
    Door,
    Object,
    Lvl,
    Criterion,
    Objective,
    Rule,
    Slab,
    Tendency,
    ResearchKind,
    CampaignFlag,
    CreatureProperty,
    Range,
    /// Takes the parent argument slot's kinds at the call site.
    Auto,
    // Composites
    ReadVar,
    SetVar,
    ReadSetVar,
    Location,
}

impl ParamKind {
    /// Concrete members of a composite kind, in match order. Empty for
    /// concrete kinds.
    pub fn expansion(self) -> &'static [ParamKind] {
        match self {
            ParamKind::ReadVar => &[ParamKind::Flag, ParamKind::Timer, ParamKind::GameVar],
            ParamKind::SetVar => &[ParamKind::Flag],
            ParamKind::ReadSetVar => &[ParamKind::Flag, ParamKind::Timer],
            ParamKind::Location => &[
                ParamKind::Player,
                ParamKind::ActionPoint,
                ParamKind::HeroGate,
            ],
            _ => &[],
        }
    }

    /// Flatten a kind set into its concrete members.
    pub fn flatten(kinds: &[ParamKind]) -> Vec<ParamKind> {
        let mut out = Vec::new();
        for &kind in kinds {
            if kind.is_composite() {
                out.extend_from_slice(kind.expansion());
            } else {
                out.push(kind);
            }
        }
        out
    }

    pub fn is_composite(self) -> bool {
        matches!(
            self,
            ParamKind::ReadVar | ParamKind::SetVar | ParamKind::ReadSetVar | ParamKind::Location
        )
    }

    fn parse(name: &str) -> Option<ParamKind> {
        Some(match name {
            "Player" => ParamKind::Player,
            "Flag" => ParamKind::Flag,
            "Timer" => ParamKind::Timer,
            "GameVar" => ParamKind::GameVar,
            "ActionPoint" => ParamKind::ActionPoint,
            "HeroGate" => ParamKind::HeroGate,
            "Number" => ParamKind::Number,
            "Byte" => ParamKind::Byte,
            "Slot" => ParamKind::Slot,
            "Text" => ParamKind::Text,
            "Comparison" => ParamKind::Comparison,
            "Party" => ParamKind::Party,
            "NewParty" => ParamKind::NewParty,
            "Creature" => ParamKind::Creature,
            "Room" => ParamKind::Room,
            "Power" => ParamKind::Power,
            "Trap" => ParamKind::Trap,
            "Door" => ParamKind::Door,
            "Object" => ParamKind::Object,
            "Lvl" => ParamKind::Lvl,
            "Criterion" => ParamKind::Criterion,
            "Objective" => ParamKind::Objective,
            "Rule" => ParamKind::Rule,
            "Slab" => ParamKind::Slab,
            "Tendency" => ParamKind::Tendency,
            "ResearchKind" => ParamKind::ResearchKind,
            "CampaignFlag" => ParamKind::CampaignFlag,
            "CreatureProperty" => ParamKind::CreatureProperty,
            "Range" => ParamKind::Range,
            "Auto" => ParamKind::Auto,
            "ReadVar" => ParamKind::ReadVar,
            "SetVar" => ParamKind::SetVar,
            "ReadSetVar" => ParamKind::ReadSetVar,
            "Location" => ParamKind::Location,
            _ => return None,
        })
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ParamKind::Player => "player",
            ParamKind::Flag => "flag",
            ParamKind::Timer => "timer",
            ParamKind::GameVar => "game variable",
            ParamKind::ActionPoint => "action point",
            ParamKind::HeroGate => "hero gate",
            ParamKind::Number => "number",
            ParamKind::Byte => "byte (0..255)",
            ParamKind::Slot => "message slot (0..50)",
            ParamKind::Text => "quoted text",
            ParamKind::Comparison => "comparison operator",
            ParamKind::Party => "party",
            ParamKind::NewParty => "new party name",
            ParamKind::Creature => "creature",
            ParamKind::Room => "room",
            ParamKind::Power => "keeper power",
            ParamKind::Trap => "trap",
            ParamKind::Door => "door",
            ParamKind::Object => "object",
            ParamKind::Lvl => "experience level (1..10)",
            ParamKind::Criterion => "creature selection criterion",
            ParamKind::Objective => "party objective",
            ParamKind::Rule => "game rule",
            ParamKind::Slab => "slab type",
            ParamKind::Tendency => "creature tendency",
            ParamKind::ResearchKind => "research kind",
            ParamKind::CampaignFlag => "campaign flag",
            ParamKind::CreatureProperty => "creature property",
            ParamKind::Range => "value range",
            ParamKind::Auto => "value",
            ParamKind::ReadVar => "readable variable",
            ParamKind::SetVar => "settable variable",
            ParamKind::ReadSetVar => "variable",
            ParamKind::Location => "location",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketStyle {
    Round,
    Square,
}

impl BracketStyle {
    pub fn opener(self) -> &'static str {
        match self {
            BracketStyle::Round => "(",
            BracketStyle::Square => "[",
        }
    }

    pub fn closer(self) -> &'static str {
        match self {
            BracketStyle::Round => ")",
            BracketStyle::Square => "]",
        }
    }
}

/// Where a command may appear relative to open condition blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Anywhere,
    RootOnly,
    NestedOnly,
}

/// Dataflow contribution of one command, applied to the script-wide state.
/// Slot fields index into the call's argument slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    ConditionOpen,
    ConditionClose,
    VarWrite { player: usize, var: usize },
    VarRead { player: usize, var: usize },
    ActionPointTrigger { slot: usize },
    ActionPointReset { slot: usize },
    MessageSlot { slot: usize },
    PartyCreate { slot: usize },
    PartyAdd { slot: usize },
    PartyRead { slot: usize },
    PartyDelete { slot: usize },
    ReuseMarker,
    VersionSet,
    Win,
}

/// A value-triggered signature change: when `trigger` holds for the
/// argument at `input`, `action` rewrites one output parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignRule {
    pub input: usize,
    pub trigger: Trigger,
    pub action: Action,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Equals(&'static str),
    IsOneOfKinds(&'static [ParamKind]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SetKinds {
        output: usize,
        kinds: &'static [ParamKind],
    },
    SetOptional {
        output: usize,
        optional: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    pub allowed: Vec<ParamKind>,
    pub optional: bool,
    pub requires_separator: bool,
}

/// The immutable type/arity/side-effect signature of one command. The
/// statically registered value is never mutated; call-site derivation clones
/// it when it needs to (see [`derive_for_call`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub bracket: BracketStyle,
    pub params: Vec<ParamSpec>,
    pub placement: Placement,
    pub returns: Vec<ParamKind>,
    pub rules: &'static [SignRule],
    pub effects: &'static [SideEffect],
    pub doc: &'static str,
}

impl CommandDescriptor {
    pub fn required_count(&self) -> usize {
        self.params.iter().filter(|p| !p.optional).count()
    }

    pub fn has_auto(&self) -> bool {
        self.returns.contains(&ParamKind::Auto)
            || self
                .params
                .iter()
                .any(|p| p.allowed.contains(&ParamKind::Auto))
    }

    /// Legal target of a pending reuse marker? Condition boundaries, reuse
    /// itself, version commands and party-adding commands are not.
    pub fn reusable(&self) -> bool {
        !self.effects.iter().any(|e| {
            matches!(
                e,
                SideEffect::ConditionOpen
                    | SideEffect::ConditionClose
                    | SideEffect::ReuseMarker
                    | SideEffect::VersionSet
                    | SideEffect::PartyAdd { .. }
            )
        })
    }

    /// `NAME(param, param, ...)` in the command's own bracket style.
    pub fn heading(&self) -> String {
        let params = self
            .params
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{}{}{}{}",
            self.name,
            self.bracket.opener(),
            params,
            self.bracket.closer()
        )
    }
}

/// The explicitly constructed language-definition context: the per-command
/// descriptor registry plus the narrow store for host-supplied custom
/// entity names. Built once at startup and shared read-only from then on.
#[derive(Debug)]
pub struct LanguageDef {
    commands: FxHashMap<&'static str, CommandDescriptor>,
    custom: DashMap<EntityClass, Vec<CustomEntity>>,
}

impl Default for LanguageDef {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageDef {
    pub fn new() -> Self {
        let mut registry = FxHashMap::default();
        for row in commands::COMMANDS {
            registry.insert(row.name, row.build());
        }
        Self {
            commands: registry,
            custom: DashMap::new(),
        }
    }

    /// Look up a descriptor by command name (case-insensitive).
    pub fn command(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(name.to_ascii_uppercase().as_str())
    }

    pub fn commands(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.values()
    }

    /// Replace the custom entity names for every class the config mentions.
    pub fn install_custom(&self, config: CustomEntities) {
        self.custom.insert(EntityClass::Creature, config.creatures);
        self.custom.insert(EntityClass::Room, config.rooms);
        self.custom.insert(EntityClass::Power, config.powers);
        self.custom.insert(EntityClass::Trap, config.traps);
        self.custom.insert(EntityClass::Door, config.doors);
        self.custom.insert(EntityClass::Object, config.objects);
    }

    pub fn custom_contains(&self, class: EntityClass, name: &str) -> bool {
        self.custom
            .get(&class)
            .map(|entry| entry.iter().any(|e| e.name.eq_ignore_ascii_case(name)))
            .unwrap_or(false)
    }

    pub fn custom_names(&self, class: EntityClass) -> Vec<CustomEntity> {
        self.custom
            .get(&class)
            .map(|entry| entry.clone())
            .unwrap_or_default()
    }

    /// Documentation for a host-declared custom entity, searched across all
    /// classes.
    pub fn custom_doc(&self, name: &str) -> Option<String> {
        self.custom.iter().find_map(|entry| {
            entry
                .value()
                .iter()
                .find(|e| e.name.eq_ignore_ascii_case(name))
                .and_then(|e| e.doc.clone())
        })
    }
}

pub(crate) fn parse_param_spec(raw: &'static str, index: usize, optional: bool) -> ParamSpec {
    let (requires_separator, rest) = match raw.strip_prefix('~') {
        Some(rest) => (false, rest),
        None => (index > 0, raw),
    };
    let (name, kinds) = rest
        .split_once(':')
        .expect("command table: param spec must be `name:Kind`");
    let allowed = kinds
        .split('|')
        .map(|k| ParamKind::parse(k).expect("command table: unknown param kind"))
        .collect();

    ParamSpec {
        name: name.to_string(),
        allowed,
        optional,
        requires_separator,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::CustomEntities;

    #[test]
    fn registry_builds_and_resolves_case_insensitively() {
        let lang = LanguageDef::new();
        assert!(lang.command("SET_FLAG").is_some());
        assert!(lang.command("set_flag").is_some());
        assert!(lang.command("NO_SUCH_COMMAND").is_none());
    }

    #[test]
    fn param_spec_dsl() {
        let spec = parse_param_spec("value:Number|ReadVar", 2, true);
        assert_eq!(spec.name, "value");
        assert_eq!(spec.allowed, vec![ParamKind::Number, ParamKind::ReadVar]);
        assert!(spec.optional);
        assert!(spec.requires_separator);

        let unseparated = parse_param_spec("~operator:Comparison", 2, false);
        assert!(!unseparated.requires_separator);

        let first = parse_param_spec("player:Player", 0, false);
        assert!(!first.requires_separator);
    }

    #[test]
    fn reuse_legality_comes_from_effects() {
        let lang = LanguageDef::new();
        assert!(!lang.command("IF").unwrap().reusable());
        assert!(!lang.command("ENDIF").unwrap().reusable());
        assert!(!lang.command("LEVEL_VERSION").unwrap().reusable());
        assert!(!lang.command("ADD_TO_PARTY").unwrap().reusable());
        assert!(!lang.command("NEXT_COMMAND_REUSABLE").unwrap().reusable());
        assert!(lang.command("SET_FLAG").unwrap().reusable());
    }

    #[test]
    fn trailing_optionals_shrink_the_minimum_arity() {
        let lang = LanguageDef::new();
        let def = lang.command("TAG_MAP_RECT").unwrap();
        assert_eq!(def.params.len(), 4);
        assert_eq!(def.required_count(), 2);
        assert!(def.params[3].optional);

        let def = lang.command("USE_SPECIAL_LOCATE_HIDDEN_WORLD").unwrap();
        assert!(def.params.is_empty());
        assert_eq!(def.heading(), "USE_SPECIAL_LOCATE_HIDDEN_WORLD()");
    }

    #[test]
    fn custom_entities_are_installable() {
        let lang = LanguageDef::new();
        lang.install_custom(CustomEntities {
            traps: vec![crate::entities::CustomEntity {
                name: "FREEZE".into(),
                doc: Some("Custom freeze trap".into()),
            }],
            ..Default::default()
        });
        assert!(lang.custom_contains(EntityClass::Trap, "freeze"));
        assert_eq!(
            lang.custom_doc("FREEZE").as_deref(),
            Some("Custom freeze trap")
        );
        assert!(!lang.custom_contains(EntityClass::Door, "FREEZE"));
    }
}
