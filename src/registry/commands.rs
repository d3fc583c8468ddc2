//! The static command table. One row per command; rows are parsed into
//! [`CommandDescriptor`]s once, when the [`crate::LanguageDef`] is built.

use super::Action::{SetKinds, SetOptional};
use super::ParamKind::{Byte, Number, Power, Range, Room};
use super::SideEffect::*;
use super::Trigger::{Equals, IsOneOfKinds};
use super::{
    parse_param_spec, BracketStyle, CommandDescriptor, ParamKind, Placement, SideEffect, SignRule,
};

#[derive(Debug, Clone, Copy)]
pub(crate) struct CommandRow {
    pub name: &'static str,
    pub bracket: BracketStyle,
    /// Ordered param specs: `name:Kind|Kind`, leading `~` marks a param
    /// that must not be preceded by a separator.
    pub params: &'static [&'static str],
    /// That many trailing params are optional.
    pub optional: usize,
    pub returns: &'static [ParamKind],
    pub placement: Placement,
    pub effects: &'static [SideEffect],
    pub rules: &'static [SignRule],
    pub doc: &'static str,
}

impl CommandRow {
    pub(crate) fn build(&self) -> CommandDescriptor {
        let first_optional = self.params.len().saturating_sub(self.optional);
        let params = self
            .params
            .iter()
            .enumerate()
            .map(|(i, raw)| parse_param_spec(raw, i, i >= first_optional))
            .collect();

        CommandDescriptor {
            name: self.name,
            bracket: self.bracket,
            params,
            placement: self.placement,
            returns: self.returns.to_vec(),
            rules: self.rules,
            effects: self.effects,
            doc: self.doc,
        }
    }
}

const BASE: CommandRow = CommandRow {
    name: "",
    bracket: BracketStyle::Round,
    params: &[],
    optional: 0,
    returns: &[],
    placement: Placement::Anywhere,
    effects: &[],
    rules: &[],
    doc: "",
};

pub(crate) static COMMANDS: &[CommandRow] = &[
    // Conditions
    CommandRow {
        name: "IF",
        params: &[
            "player:Player",
            "variable:ReadVar",
            "~operator:Comparison",
            "~value:Number|ReadVar",
        ],
        effects: &[
            ConditionOpen,
            VarRead { player: 0, var: 1 },
            VarRead { player: 0, var: 3 },
        ],
        doc: "Opens a condition block; the commands up to the matching ENDIF \
              run while the comparison holds.",
        ..BASE
    },
    CommandRow {
        name: "IF_ACTION_POINT",
        params: &["action_point:ActionPoint", "player:Player"],
        effects: &[ConditionOpen, ActionPointTrigger { slot: 0 }],
        doc: "Opens a condition block triggered when a unit of the given \
              player crosses the action point.",
        ..BASE
    },
    CommandRow {
        name: "IF_AVAILABLE",
        params: &[
            "player:Player",
            "item:Creature|Room|Power|Trap|Door",
            "~operator:Comparison",
            "~value:Number",
        ],
        effects: &[ConditionOpen],
        doc: "Opens a condition block comparing how many of the item the \
              player has available.",
        ..BASE
    },
    CommandRow {
        name: "IF_CONTROLS",
        params: &[
            "player:Player",
            "creature:Creature",
            "~operator:Comparison",
            "~value:Number",
        ],
        effects: &[ConditionOpen],
        doc: "Opens a condition block comparing how many of the creature the \
              player controls.",
        ..BASE
    },
    CommandRow {
        name: "IF_SLAB_OWNER",
        params: &["x:Number", "y:Number", "player:Player"],
        effects: &[ConditionOpen],
        doc: "Opens a condition block that holds while the slab at x,y \
              belongs to the player.",
        ..BASE
    },
    CommandRow {
        name: "IF_SLAB_TYPE",
        params: &["x:Number", "y:Number", "slab:Slab"],
        effects: &[ConditionOpen],
        doc: "Opens a condition block that holds while the slab at x,y is of \
              the given type.",
        ..BASE
    },
    CommandRow {
        name: "IF_ALLIED",
        params: &[
            "player:Player",
            "ally:Player",
            "~operator:Comparison",
            "~value:Byte",
        ],
        effects: &[ConditionOpen],
        doc: "Opens a condition block comparing the alliance state between \
              the two players.",
        ..BASE
    },
    CommandRow {
        name: "ENDIF",
        effects: &[ConditionClose],
        doc: "Closes the innermost open condition block.",
        ..BASE
    },
    // Directives
    CommandRow {
        name: "NEXT_COMMAND_REUSABLE",
        effects: &[ReuseMarker],
        doc: "The next command fires every time its surrounding condition \
              becomes true, instead of once.",
        ..BASE
    },
    CommandRow {
        name: "LEVEL_VERSION",
        params: &["version:Number"],
        placement: Placement::RootOnly,
        effects: &[VersionSet],
        doc: "Declares the script format version. Must appear exactly once, \
              outside any condition.",
        ..BASE
    },
    CommandRow {
        name: "WIN_GAME",
        placement: Placement::NestedOnly,
        effects: &[Win],
        doc: "The player wins the level. Only meaningful inside a condition.",
        ..BASE
    },
    CommandRow {
        name: "LOSE_GAME",
        placement: Placement::NestedOnly,
        doc: "The player loses the level. Only meaningful inside a condition.",
        ..BASE
    },
    CommandRow {
        name: "RUN_AFTER_VICTORY",
        params: &["state:Byte"],
        doc: "Keeps the script running after the level is won.",
        ..BASE
    },
    // Flags and timers
    CommandRow {
        name: "SET_FLAG",
        params: &["player:Player", "flag:SetVar", "value:Byte"],
        effects: &[VarWrite { player: 0, var: 1 }],
        doc: "Sets the player's flag to the given value.",
        ..BASE
    },
    CommandRow {
        name: "ADD_TO_FLAG",
        params: &["player:Player", "flag:SetVar", "value:Number"],
        effects: &[
            VarRead { player: 0, var: 1 },
            VarWrite { player: 0, var: 1 },
        ],
        doc: "Adds the value to the player's flag.",
        ..BASE
    },
    CommandRow {
        name: "RANDOMISE_FLAG",
        params: &["player:Player", "flag:SetVar", "range:Number"],
        effects: &[VarWrite { player: 0, var: 1 }],
        doc: "Sets the player's flag to a random value between 1 and the \
              range, rolled when the command runs.",
        ..BASE
    },
    CommandRow {
        name: "SET_CAMPAIGN_FLAG",
        params: &["player:Player", "flag:CampaignFlag", "value:Number"],
        doc: "Sets a campaign flag that survives into later levels.",
        ..BASE
    },
    CommandRow {
        name: "ADD_TO_CAMPAIGN_FLAG",
        params: &["player:Player", "flag:CampaignFlag", "value:Number"],
        doc: "Adds the value to one of the player's campaign flags.",
        ..BASE
    },
    CommandRow {
        name: "EXPORT_VARIABLE",
        params: &["player:Player", "variable:ReadVar", "flag:CampaignFlag"],
        effects: &[VarRead { player: 0, var: 1 }],
        doc: "Copies the variable's end-of-level value into a campaign flag.",
        ..BASE
    },
    CommandRow {
        name: "SET_TIMER",
        params: &["player:Player", "timer:Timer"],
        effects: &[VarWrite { player: 0, var: 1 }],
        doc: "Starts the player's timer counting game turns from zero.",
        ..BASE
    },
    CommandRow {
        name: "ADD_TO_TIMER",
        params: &["player:Player", "timer:Timer", "turns:Number"],
        effects: &[
            VarRead { player: 0, var: 1 },
            VarWrite { player: 0, var: 1 },
        ],
        doc: "Moves the player's timer forward by the given number of game \
              turns.",
        ..BASE
    },
    CommandRow {
        name: "DISPLAY_TIMER",
        params: &["player:Player", "timer:Timer"],
        effects: &[VarRead { player: 0, var: 1 }],
        doc: "Shows the timer on screen.",
        ..BASE
    },
    CommandRow {
        name: "DISPLAY_VARIABLE",
        params: &[
            "player:Player",
            "variable:ReadVar",
            "target:Number",
            "target_type:Byte",
        ],
        optional: 2,
        effects: &[VarRead { player: 0, var: 1 }],
        doc: "Shows the variable's current value on screen, optionally \
              relative to a target value.",
        ..BASE
    },
    CommandRow {
        name: "HIDE_VARIABLE",
        doc: "Hides the on-screen variable display again.",
        ..BASE
    },
    CommandRow {
        name: "DISPLAY_COUNTDOWN",
        params: &[
            "player:Player",
            "timer:Timer",
            "target:Number",
            "clocktime:Byte",
        ],
        effects: &[VarRead { player: 0, var: 1 }],
        doc: "Shows the timer counting down toward the target turn count.",
        ..BASE
    },
    CommandRow {
        name: "HIDE_TIMER",
        doc: "Hides the on-screen timer again.",
        ..BASE
    },
    CommandRow {
        name: "BONUS_LEVEL_TIME",
        params: &["turns:Number"],
        doc: "Shows a countdown of the given number of game turns.",
        ..BASE
    },
    // Parties
    CommandRow {
        name: "CREATE_PARTY",
        params: &["party:NewParty"],
        effects: &[PartyCreate { slot: 0 }],
        doc: "Declares a new, empty party. Party names must be unique.",
        ..BASE
    },
    CommandRow {
        name: "ADD_TO_PARTY",
        params: &[
            "party:Party",
            "creature:Creature",
            "experience:Lvl",
            "gold:Number",
            "objective:Objective",
            "countdown:Number",
        ],
        effects: &[PartyAdd { slot: 0 }],
        doc: "Adds one creature with the given objective to a declared party.",
        ..BASE
    },
    CommandRow {
        name: "DELETE_FROM_PARTY",
        params: &["party:Party", "creature:Creature", "experience:Lvl"],
        effects: &[PartyDelete { slot: 0 }],
        doc: "Removes a matching creature from the party.",
        ..BASE
    },
    CommandRow {
        name: "ADD_PARTY_TO_LEVEL",
        params: &[
            "player:Player",
            "party:Party",
            "location:Location",
            "copies:Number",
        ],
        effects: &[PartyRead { slot: 1 }],
        doc: "Spawns copies of the party at the location.",
        ..BASE
    },
    CommandRow {
        name: "ADD_TUNNELLER_PARTY_TO_LEVEL",
        params: &[
            "player:Player",
            "party:Party",
            "location:Location",
            "target:Location",
            "experience:Lvl",
            "gold:Number",
        ],
        effects: &[PartyRead { slot: 1 }],
        doc: "Spawns the party led by a tunneller digging toward the target.",
        ..BASE
    },
    CommandRow {
        name: "ADD_TUNNELLER_TO_LEVEL",
        params: &[
            "player:Player",
            "location:Location",
            "target:Location",
            "experience:Lvl",
            "gold:Number",
        ],
        doc: "Spawns a lone tunneller digging toward the target.",
        ..BASE
    },
    // Action points
    CommandRow {
        name: "RESET_ACTION_POINT",
        params: &["action_point:ActionPoint"],
        effects: &[ActionPointReset { slot: 0 }],
        doc: "Re-arms an already triggered action point.",
        ..BASE
    },
    // Messages
    CommandRow {
        name: "DISPLAY_OBJECTIVE",
        params: &["message:Number", "zoom:Location"],
        optional: 1,
        doc: "Shows a campaign objective string, optionally zooming to a \
              location.",
        ..BASE
    },
    CommandRow {
        name: "DISPLAY_INFORMATION",
        params: &["message:Number", "zoom:Location"],
        optional: 1,
        doc: "Shows a campaign information string, optionally zooming to a \
              location.",
        ..BASE
    },
    CommandRow {
        name: "QUICK_OBJECTIVE",
        bracket: BracketStyle::Square,
        params: &["slot:Slot", "text:Text", "zoom:Location"],
        optional: 1,
        effects: &[MessageSlot { slot: 0 }],
        doc: "Shows a literal objective text stored in the given quick-message \
              slot. Slot numbers must be unique within a script.",
        ..BASE
    },
    CommandRow {
        name: "QUICK_INFORMATION",
        bracket: BracketStyle::Square,
        params: &["slot:Slot", "text:Text", "zoom:Location"],
        optional: 1,
        effects: &[MessageSlot { slot: 0 }],
        doc: "Shows a literal information text stored in the given \
              quick-message slot.",
        ..BASE
    },
    CommandRow {
        name: "DISPLAY_OBJECTIVE_WITH_POS",
        params: &["message:Number", "x:Number", "y:Number"],
        doc: "Shows a campaign objective string zooming to map coordinates \
              instead of a named location.",
        ..BASE
    },
    CommandRow {
        name: "DISPLAY_INFORMATION_WITH_POS",
        params: &["message:Number", "x:Number", "y:Number"],
        doc: "Shows a campaign information string zooming to map coordinates.",
        ..BASE
    },
    CommandRow {
        name: "QUICK_OBJECTIVE_WITH_POS",
        bracket: BracketStyle::Square,
        params: &["slot:Slot", "text:Text", "x:Number", "y:Number"],
        effects: &[MessageSlot { slot: 0 }],
        doc: "Shows a literal objective text zooming to map coordinates. \
              Shares the quick-message slot space with the other QUICK \
              commands.",
        ..BASE
    },
    CommandRow {
        name: "QUICK_INFORMATION_WITH_POS",
        bracket: BracketStyle::Square,
        params: &["slot:Slot", "text:Text", "x:Number", "y:Number"],
        effects: &[MessageSlot { slot: 0 }],
        doc: "Shows a literal information text zooming to map coordinates.",
        ..BASE
    },
    CommandRow {
        name: "HEART_LOST_OBJECTIVE",
        params: &["message:Number", "zoom:Location"],
        optional: 1,
        doc: "Objective string shown when the player's dungeon heart is \
              destroyed.",
        ..BASE
    },
    CommandRow {
        name: "HEART_LOST_QUICK_OBJECTIVE",
        bracket: BracketStyle::Square,
        params: &["slot:Slot", "text:Text", "zoom:Location"],
        optional: 1,
        effects: &[MessageSlot { slot: 0 }],
        doc: "Literal objective text shown when the player's dungeon heart \
              is destroyed.",
        ..BASE
    },
    // Creatures, rooms and availability
    CommandRow {
        name: "ADD_CREATURE_TO_LEVEL",
        params: &[
            "player:Player",
            "creature:Creature",
            "location:Location",
            "count:Number",
            "experience:Lvl",
            "gold:Number",
        ],
        doc: "Spawns creatures for the player at the location.",
        ..BASE
    },
    CommandRow {
        name: "SET_CREATURE_MAX_LEVEL",
        params: &["player:Player", "creature:Creature", "experience:Lvl"],
        doc: "Caps the experience the player's creatures of this kind can \
              train to.",
        ..BASE
    },
    CommandRow {
        name: "MAX_CREATURES",
        params: &["player:Player", "count:Number"],
        doc: "Caps how many creatures the player can attract.",
        ..BASE
    },
    CommandRow {
        name: "CREATURE_AVAILABLE",
        params: &[
            "player:Player",
            "creature:Creature",
            "can_be_attracted:Byte",
            "in_pool:Number",
        ],
        doc: "Controls whether the creature may enter through the player's \
              entrance.",
        ..BASE
    },
    CommandRow {
        name: "ADD_CREATURE_TO_POOL",
        params: &["creature:Creature", "count:Number"],
        doc: "Adds creatures of this kind to the shared attraction pool.",
        ..BASE
    },
    CommandRow {
        name: "DEAD_CREATURES_RETURN_TO_POOL",
        params: &["state:Byte"],
        doc: "Controls whether dying creatures go back into the attraction \
              pool.",
        ..BASE
    },
    CommandRow {
        name: "SWAP_CREATURE",
        params: &["remove:Creature", "add:Creature"],
        doc: "Replaces one creature kind with another everywhere on the \
              level.",
        ..BASE
    },
    CommandRow {
        name: "CREATURE_ENTRANCE_LEVEL",
        params: &["player:Player", "experience:Lvl"],
        doc: "Experience level creatures arrive with through the player's \
              entrance.",
        ..BASE
    },
    CommandRow {
        name: "ROOM_AVAILABLE",
        params: &[
            "player:Player",
            "room:Room",
            "can_build:Byte",
            "is_discovered:Byte",
        ],
        doc: "Controls whether the player can research and build the room.",
        ..BASE
    },
    CommandRow {
        name: "MAGIC_AVAILABLE",
        params: &[
            "player:Player",
            "power:Power",
            "can_cast:Byte",
            "is_discovered:Byte",
        ],
        doc: "Controls whether the player can research and cast the power.",
        ..BASE
    },
    CommandRow {
        name: "TRAP_AVAILABLE",
        params: &[
            "player:Player",
            "trap:Trap",
            "can_place:Byte",
            "amount:Number",
        ],
        doc: "Controls whether the player can manufacture and place the trap.",
        ..BASE
    },
    CommandRow {
        name: "DOOR_AVAILABLE",
        params: &[
            "player:Player",
            "door:Door",
            "can_place:Byte",
            "amount:Number",
        ],
        doc: "Controls whether the player can manufacture and place the door.",
        ..BASE
    },
    CommandRow {
        name: "RESEARCH",
        params: &[
            "player:Player",
            "kind:ResearchKind",
            "item:Power|Room",
            "points:Number",
        ],
        rules: &[
            SignRule {
                input: 1,
                trigger: Equals("MAGIC"),
                action: SetKinds {
                    output: 2,
                    kinds: &[Power],
                },
            },
            SignRule {
                input: 1,
                trigger: Equals("ROOM"),
                action: SetKinds {
                    output: 2,
                    kinds: &[Room],
                },
            },
        ],
        doc: "Changes the research cost of a single spell or room for the \
              player. The kind argument decides what the item names.",
        ..BASE
    },
    CommandRow {
        name: "RESEARCH_ORDER",
        params: &[
            "player:Player",
            "kind:ResearchKind",
            "item:Power|Room",
            "points:Number",
        ],
        rules: &[
            SignRule {
                input: 1,
                trigger: Equals("MAGIC"),
                action: SetKinds {
                    output: 2,
                    kinds: &[Power],
                },
            },
            SignRule {
                input: 1,
                trigger: Equals("ROOM"),
                action: SetKinds {
                    output: 2,
                    kinds: &[Room],
                },
            },
        ],
        doc: "Replaces the player's research order. The first use wipes the \
              default order; later uses append to the new one.",
        ..BASE
    },
    CommandRow {
        name: "ADD_GOLD_TO_PLAYER",
        params: &["player:Player", "amount:Number"],
        doc: "Drops gold straight into the player's treasury.",
        ..BASE
    },
    CommandRow {
        name: "SET_HEART_HEALTH",
        params: &["player:Player", "health:Number"],
        doc: "Sets the player's dungeon heart health to an absolute value.",
        ..BASE
    },
    CommandRow {
        name: "ADD_HEART_HEALTH",
        params: &["player:Player", "health:Number", "warn:Byte"],
        optional: 1,
        doc: "Adds to the player's dungeon heart health. Negative values \
              damage it; the warn byte fires the under-attack warning.",
        ..BASE
    },
    CommandRow {
        name: "ADD_OBJECT_TO_LEVEL",
        params: &["object:Object", "location:Location", "gold:Number"],
        doc: "Places an object at the location. The gold value only matters \
              for gold-holding objects.",
        ..BASE
    },
    CommandRow {
        name: "ADD_DOOR_TO_LEVEL",
        params: &[
            "door:Door",
            "location:Location",
            "locked:Byte",
        ],
        doc: "Places a door at the location, optionally locked.",
        ..BASE
    },
    CommandRow {
        name: "SET_CREATURE_HEALTH",
        params: &["creature:Creature", "health:Number"],
        doc: "Overrides the creature kind's base health for this level.",
        ..BASE
    },
    CommandRow {
        name: "SET_CREATURE_ARMOUR",
        params: &["creature:Creature", "armour:Byte"],
        doc: "Overrides the creature kind's armour for this level.",
        ..BASE
    },
    CommandRow {
        name: "SET_CREATURE_FEAR_WOUNDED",
        params: &["creature:Creature", "fear:Byte"],
        doc: "Overrides how strongly wounded creatures of this kind flee.",
        ..BASE
    },
    CommandRow {
        name: "SET_CREATURE_FEAR_STRONGER",
        params: &["creature:Creature", "fear:Number"],
        doc: "Overrides how much stronger an enemy must be before this kind \
              flees it.",
        ..BASE
    },
    CommandRow {
        name: "SET_CREATURE_STRENGTH",
        params: &["creature:Creature", "strength:Byte"],
        doc: "Overrides the creature kind's melee strength for this level.",
        ..BASE
    },
    CommandRow {
        name: "SET_CREATURE_TENDENCIES",
        params: &["player:Player", "tendency:Tendency", "value:Byte"],
        doc: "Presets one of the player's creature tendency toggles.",
        ..BASE
    },
    CommandRow {
        name: "SET_CREATURE_PROPERTY",
        params: &["creature:Creature", "property:CreatureProperty", "enable:Byte"],
        doc: "Switches one of the creature kind's innate properties on or \
              off for this level.",
        ..BASE
    },
    CommandRow {
        name: "SET_HATE",
        params: &["player:Player", "enemy:Player", "value:Number"],
        doc: "Adjusts how strongly the computer player targets the enemy.",
        ..BASE
    },
    CommandRow {
        name: "ALLY_PLAYERS",
        params: &["player:Player", "ally:Player", "state:Byte"],
        doc: "Creates or breaks an alliance between two players.",
        ..BASE
    },
    CommandRow {
        name: "START_MONEY",
        params: &["player:Player", "gold:Number"],
        placement: Placement::RootOnly,
        doc: "Gold the player starts the level with. Only valid outside \
              conditions.",
        ..BASE
    },
    CommandRow {
        name: "SET_DIGGER",
        params: &["player:Player", "creature:Creature"],
        placement: Placement::RootOnly,
        doc: "Replaces the player's digger creature kind for this level.",
        ..BASE
    },
    CommandRow {
        name: "COMPUTER_PLAYER",
        params: &["player:Player", "attitude:Number"],
        placement: Placement::RootOnly,
        doc: "Puts the player under computer control with the given attitude.",
        ..BASE
    },
    CommandRow {
        name: "SET_COMPUTER_GLOBALS",
        params: &[
            "player:Player",
            "dig:Number",
            "build:Number",
            "defend:Number",
            "attack:Number",
            "magic:Number",
            "expand:Number",
        ],
        doc: "Tunes the computer player's global decision weights.",
        ..BASE
    },
    CommandRow {
        name: "SET_COMPUTER_CHECKS",
        params: &[
            "player:Player",
            "check:Text",
            "interval:Number",
            "data1:Number",
            "data2:Number",
            "data3:Number",
        ],
        optional: 3,
        doc: "Reconfigures one of the computer player's periodic checks, \
              named by its quoted label.",
        ..BASE
    },
    CommandRow {
        name: "SET_COMPUTER_EVENT",
        params: &["player:Player", "event:Text", "data1:Number", "data2:Number"],
        optional: 1,
        doc: "Reconfigures one of the computer player's event responses.",
        ..BASE
    },
    CommandRow {
        name: "SET_COMPUTER_PROCESS",
        params: &[
            "player:Player",
            "process:Text",
            "priority:Number",
            "data1:Number",
            "data2:Number",
            "data3:Number",
        ],
        optional: 3,
        doc: "Reprioritizes one of the computer player's build processes.",
        ..BASE
    },
    CommandRow {
        name: "SET_GAME_RULE",
        params: &["rule:Rule", "value:Number"],
        rules: &[
            SignRule {
                input: 0,
                trigger: Equals("PRESERVE_CLASSIC_BUGS"),
                action: SetKinds {
                    output: 1,
                    kinds: &[Byte],
                },
            },
            SignRule {
                input: 0,
                trigger: Equals("ALLY_SHARE_VISION"),
                action: SetKinds {
                    output: 1,
                    kinds: &[Byte],
                },
            },
        ],
        doc: "Changes one of the named game tunables. Toggle-style rules take \
              a byte instead of a full number.",
        ..BASE
    },
    CommandRow {
        name: "SET_MUSIC",
        params: &["track:Number|Text"],
        doc: "Switches the soundtrack to a built-in track number or a file \
              name.",
        ..BASE
    },
    CommandRow {
        name: "TUTORIAL_FLASH_BUTTON",
        params: &["button:Number", "gameturns:Number"],
        doc: "Flashes a panel button for the given number of game turns.",
        ..BASE
    },
    CommandRow {
        name: "KILL_CREATURE",
        params: &[
            "player:Player",
            "creature:Creature",
            "criterion:Criterion",
            "count:Number",
        ],
        doc: "Kills up to count of the player's creatures picked by the \
              criterion.",
        ..BASE
    },
    CommandRow {
        name: "LEVEL_UP_CREATURE",
        params: &[
            "player:Player",
            "creature:Creature",
            "criterion:Criterion",
            "levels:Number",
        ],
        doc: "Grants experience levels to one creature picked by the \
              criterion.",
        ..BASE
    },
    CommandRow {
        name: "USE_POWER",
        params: &["player:Player", "power:Power", "free:Byte"],
        doc: "Casts an untargeted keeper power as the player.",
        ..BASE
    },
    CommandRow {
        name: "USE_POWER_AT_LOCATION",
        params: &[
            "player:Player",
            "location:Location",
            "power:Power",
            "level:Lvl",
            "free:Byte",
        ],
        doc: "Casts a keeper power at the location. Free casts skip the gold \
              cost.",
        ..BASE
    },
    CommandRow {
        name: "USE_POWER_ON_CREATURE",
        params: &[
            "player:Player",
            "creature:Creature",
            "criterion:Criterion",
            "caster:Player",
            "power:Power",
            "level:Lvl",
            "free:Byte",
        ],
        doc: "Casts a keeper power on one creature picked by the criterion.",
        ..BASE
    },
    CommandRow {
        name: "MOVE_CREATURE",
        params: &[
            "player:Player",
            "creature:Creature",
            "criterion:Criterion",
            "count:Number",
            "location:Location",
        ],
        doc: "Teleports up to count of the player's creatures picked by the \
              criterion to the location.",
        ..BASE
    },
    CommandRow {
        name: "CHANGE_CREATURE_OWNER",
        params: &[
            "player:Player",
            "creature:Creature",
            "criterion:Criterion",
            "new_owner:Player",
        ],
        doc: "Hands one creature picked by the criterion to another player.",
        ..BASE
    },
    CommandRow {
        name: "TRANSFER_CREATURE",
        params: &[
            "player:Player",
            "creature:Creature",
            "criterion:Criterion",
            "count:Number",
        ],
        optional: 1,
        doc: "Moves creatures picked by the criterion out of the level, to \
              be handed back on the next one.",
        ..BASE
    },
    CommandRow {
        name: "LEVEL_UP_PLAYERS_CREATURES",
        params: &["player:Player", "levels:Number"],
        doc: "Raises the experience of every creature the player controls.",
        ..BASE
    },
    CommandRow {
        name: "USE_SPECIAL_INCREASE_LEVEL",
        params: &["player:Player", "count:Number"],
        doc: "Fires the increase-level dungeon special for the player.",
        ..BASE
    },
    CommandRow {
        name: "USE_SPECIAL_MULTIPLY_CREATURES",
        params: &["player:Player", "count:Number"],
        doc: "Fires the multiply-creatures dungeon special for the player.",
        ..BASE
    },
    CommandRow {
        name: "USE_SPECIAL_TRANSFER_CREATURE",
        params: &["player:Player"],
        doc: "Opens the transfer-creature box for the player as if a \
              dungeon special had been picked up.",
        ..BASE
    },
    CommandRow {
        name: "USE_SPECIAL_MAKE_SAFE",
        params: &["player:Player"],
        doc: "Fires the make-safe dungeon special for the player.",
        ..BASE
    },
    CommandRow {
        name: "USE_SPECIAL_LOCATE_HIDDEN_WORLD",
        params: &[],
        doc: "Fires the locate-hidden-world dungeon special, unlocking \
              the bonus level attached to the map.",
        ..BASE
    },
    CommandRow {
        name: "SET_BOX_TOOLTIP",
        params: &["box:Byte", "tooltip:Text"],
        doc: "Attaches a custom tooltip to a mystery box with the given \
              box number.",
        ..BASE
    },
    CommandRow {
        name: "SET_BOX_TOOLTIP_ID",
        params: &["box:Byte", "id:Number"],
        doc: "Attaches a translated tooltip string to a mystery box.",
        ..BASE
    },
    CommandRow {
        name: "MAKE_SAFE",
        params: &["player:Player"],
        doc: "Marks the player's dungeon as safe so creatures stop \
              panicking.",
        ..BASE
    },
    CommandRow {
        name: "MAKE_UNSAFE",
        params: &["player:Player"],
        doc: "Marks the player's dungeon as breached again.",
        ..BASE
    },
    CommandRow {
        name: "REVEAL_MAP_LOCATION",
        params: &["player:Player", "location:Location", "range:Number"],
        doc: "Reveals the map around the location for the player.",
        ..BASE
    },
    CommandRow {
        name: "REVEAL_MAP_RECT",
        params: &[
            "player:Player",
            "x:Number",
            "y:Number",
            "width:Number",
            "height:Number",
        ],
        doc: "Reveals a rectangle of the map for the player.",
        ..BASE
    },
    CommandRow {
        name: "CONCEAL_MAP_RECT",
        params: &[
            "player:Player",
            "x:Number",
            "y:Number",
            "width:Number",
            "height:Number",
            "hide_revealed:Byte",
        ],
        optional: 1,
        doc: "Covers a rectangle of the map with fog of war again.",
        ..BASE
    },
    CommandRow {
        name: "TAG_MAP_RECT",
        params: &[
            "player:Player",
            "location:Location",
            "width:Number",
            "height:Number",
        ],
        optional: 2,
        doc: "Tags a rectangle of slabs for digging by the player's imps.",
        ..BASE
    },
    CommandRow {
        name: "UNTAG_MAP_RECT",
        params: &[
            "player:Player",
            "location:Location",
            "width:Number",
            "height:Number",
        ],
        optional: 2,
        doc: "Removes dig tags from a rectangle of slabs.",
        ..BASE
    },
    CommandRow {
        name: "CHANGE_SLAB_OWNER",
        params: &["x:Number", "y:Number", "player:Player"],
        doc: "Hands the slab at x,y to the player.",
        ..BASE
    },
    CommandRow {
        name: "CHANGE_SLAB_TYPE",
        params: &["x:Number", "y:Number", "slab:Slab"],
        doc: "Rewrites the slab at x,y to the given type.",
        ..BASE
    },
    // Value substitutes
    CommandRow {
        name: "RANDOM",
        params: &[
            "first:Auto",
            "second:Auto",
            "third:Auto",
            "fourth:Auto",
        ],
        optional: 2,
        returns: &[ParamKind::Auto],
        rules: &[SignRule {
            input: 0,
            trigger: IsOneOfKinds(&[Range]),
            action: SetOptional {
                output: 1,
                optional: true,
            },
        }],
        doc: "Picks one of the listed values at random each time the command \
              fires. Takes whatever the surrounding argument accepts; a range \
              A~B in a numeric position stands for the whole pool.",
        ..BASE
    },
    CommandRow {
        name: "DRAWFROM",
        params: &[
            "first:Auto",
            "second:Auto",
            "third:Auto",
            "fourth:Auto",
        ],
        optional: 2,
        returns: &[ParamKind::Auto],
        rules: &[SignRule {
            input: 0,
            trigger: IsOneOfKinds(&[Range]),
            action: SetOptional {
                output: 1,
                optional: true,
            },
        }],
        doc: "Draws one of the listed values without repetition across \
              occurrences. A single range A~B stands for the whole pool, in \
              which case further values may be omitted.",
        ..BASE
    },
    CommandRow {
        name: "COUNT_CREATURES_AT_ACTION_POINT",
        params: &[
            "action_point:ActionPoint",
            "player:Player",
            "creature:Creature",
        ],
        returns: &[Number],
        doc: "How many of the player's creatures of this kind currently \
              stand inside the action point.",
        ..BASE
    },
    // Zero-argument value commands
    CommandRow {
        name: "GAME_TURN",
        returns: &[Number],
        doc: "The current game turn counter.",
        ..BASE
    },
    CommandRow {
        name: "ALL_DUNGEONS_DESTROYED",
        returns: &[Byte],
        doc: "One once every enemy dungeon heart is destroyed, zero before.",
        ..BASE
    },
];
