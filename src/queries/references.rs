//! Find-all-references over the names the script-wide state tracks:
//! flags, timers, action points and parties. The dataflow log already
//! holds every usage site, so the query only has to work out which
//! tracked name sits under the cursor.

use crate::analysis::state::{ScriptState, Site, VarClass, VarKey};
use crate::analysis::types::parse_number;
use crate::analysis::{indexed_name, word_at};
use crate::grammar::Node;
use crate::registry::{LanguageDef, SideEffect};

/// Every usage site of the tracked name under the column, in document
/// order. Empty when the column is not on a flag, timer, action point or
/// party argument.
pub fn references(
    lang: &LanguageDef,
    state: &ScriptState,
    node: &Node,
    column: usize,
) -> Vec<Site> {
    let Some(ctx) = super::context_at(lang, state, node, column, None) else {
        return Vec::new();
    };
    let Some(word) = word_at(&ctx.call.args, ctx.active) else {
        return Vec::new();
    };
    if !word.token.contains(column) {
        return Vec::new();
    }
    let name = word.name();

    for effect in ctx.def.effects {
        match *effect {
            SideEffect::VarRead { player, var } | SideEffect::VarWrite { player, var }
                if var == ctx.active =>
            {
                let class = if indexed_name(&name, "FLAG") {
                    VarClass::Flag
                } else if indexed_name(&name, "TIMER") {
                    VarClass::Timer
                } else {
                    continue;
                };
                let owner = word_at(&ctx.call.args, player)
                    .map(|w| w.name())
                    .unwrap_or_default();
                return state.var_sites(&VarKey {
                    class,
                    player: owner,
                    name,
                });
            }
            SideEffect::ActionPointTrigger { slot } | SideEffect::ActionPointReset { slot }
                if slot == ctx.active =>
            {
                if let Some(point) = parse_number(&name) {
                    return state.action_point_sites(point);
                }
            }
            SideEffect::PartyCreate { slot }
            | SideEffect::PartyAdd { slot }
            | SideEffect::PartyRead { slot }
            | SideEffect::PartyDelete { slot }
                if slot == ctx.active =>
            {
                return state.party_sites(&name);
            }
            _ => {}
        }
    }
    Vec::new()
}
