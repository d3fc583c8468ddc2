//! Completion candidates for a cursor position. Statement positions offer
//! command names; argument positions offer the union of the active slot's
//! kind suggestions plus the value commands that fit there.

use crate::analysis::kinds_overlap;
use crate::analysis::state::ScriptState;
use crate::analysis::types::{suggest_kind, Candidate};
use crate::grammar::{Node, ParsedLine};
use crate::registry::LanguageDef;

use super::{context_at, CallContext};

pub fn completions(
    lang: &LanguageDef,
    state: &ScriptState,
    parsed: &ParsedLine,
    column: usize,
) -> Vec<Candidate> {
    let Some(root) = &parsed.root else {
        return command_candidates(lang);
    };

    let on_caller = match root {
        Node::Word(word) => word.token.contains(column),
        Node::Call(call) => call.caller.contains(column),
        Node::Range(_) => false,
    };
    if on_caller {
        return command_candidates(lang);
    }

    match context_at(lang, state, root, column, None) {
        Some(ctx) => value_candidates(lang, state, &ctx),
        None => Vec::new(),
    }
}

fn command_candidates(lang: &LanguageDef) -> Vec<Candidate> {
    let mut out: Vec<Candidate> = lang
        .commands()
        .map(|def| Candidate::documented(def.name, Some(def.doc.to_string())))
        .collect();
    out.sort_by(|a, b| a.label.cmp(&b.label));
    out
}

fn value_candidates(
    lang: &LanguageDef,
    state: &ScriptState,
    ctx: &CallContext<'_>,
) -> Vec<Candidate> {
    let Some(param) = ctx.def.params.get(ctx.active) else {
        // Surplus slot: nothing sensible to offer
        return Vec::new();
    };

    let mut out: Vec<Candidate> = Vec::new();
    for kind in &param.allowed {
        for candidate in suggest_kind(*kind, state, lang) {
            if !out.iter().any(|c| c.label == candidate.label) {
                out.push(candidate);
            }
        }
    }

    // Value commands whose yield fits this slot
    let mut substitutes: Vec<Candidate> = lang
        .commands()
        .filter(|def| !def.returns.is_empty() && kinds_overlap(&def.returns, &param.allowed))
        .map(|def| Candidate::documented(def.name, Some(def.doc.to_string())))
        .collect();
    substitutes.sort_by(|a, b| a.label.cmp(&b.label));
    for candidate in substitutes {
        if !out.iter().any(|c| c.label == candidate.label) {
            out.push(candidate);
        }
    }

    if let Some(first) = out.first_mut() {
        first.preselect = true;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::grammar::parse_line;

    fn at(script: &str, column: usize) -> Vec<Candidate> {
        let lang = LanguageDef::new();
        let state = ScriptState::new();
        completions(&lang, &state, &parse_line(script), column)
    }

    #[test]
    fn statement_position_offers_commands() {
        let labels: Vec<String> = at("", 0).into_iter().map(|c| c.label).collect();
        assert!(labels.contains(&"SET_FLAG".to_string()));
        assert!(labels.contains(&"IF".to_string()));
        // Sorted, so the list is stable across passes
        let mut sorted = labels.clone();
        sorted.sort();
        assert_eq!(labels, sorted);
    }

    #[test]
    fn half_typed_command_still_offers_commands() {
        let labels: Vec<String> = at("SET_FL", 6).into_iter().map(|c| c.label).collect();
        assert!(labels.contains(&"SET_FLAG".to_string()));
    }

    #[test]
    fn player_slot_offers_players_and_preselects_first() {
        let candidates = at("SET_FLAG(", 9);
        assert!(candidates.iter().any(|c| c.label == "PLAYER0"));
        assert!(candidates[0].preselect);
        assert!(candidates.iter().filter(|c| c.preselect).count() == 1);
    }

    #[test]
    fn value_slot_mixes_kinds_and_value_commands() {
        // Cursor on a half-typed value after the comparison operator
        let candidates = at("IF(PLAYER0,FLAG1 >= G", 21);
        assert!(candidates.iter().any(|c| c.label == "GAME_TURN"));
        assert!(candidates.iter().any(|c| c.label == "RANDOM"));
        assert!(candidates.iter().any(|c| c.label == "DRAWFROM"));
        assert!(!candidates.iter().any(|c| c.label == "SET_FLAG"));
    }

    #[test]
    fn property_slot_offers_the_named_set_with_docs() {
        let candidates = at("SET_CREATURE_PROPERTY(TROLL,", 28);
        let flying = candidates.iter().find(|c| c.label == "FLYING").unwrap();
        assert!(flying.doc.is_some());
        assert!(!candidates.iter().any(|c| c.label == "PLAYER0"));
    }

    #[test]
    fn campaign_flag_slot_offers_all_eight_names() {
        let candidates = at("SET_CAMPAIGN_FLAG(PLAYER0,", 26);
        let flags = candidates
            .iter()
            .filter(|c| c.label.starts_with("CAMPAIGN_FLAG"))
            .count();
        assert_eq!(flags, 8);
    }

    #[test]
    fn party_slots_offer_declared_parties() {
        let lang = LanguageDef::new();
        let lines = [parse_line("CREATE_PARTY(HORDE)")];
        let analysis = analyze(&lang, lines.iter());

        let parsed = parse_line("ADD_PARTY_TO_LEVEL(PLAYER0,");
        let candidates = completions(&lang, &analysis.state, &parsed, 27);
        assert!(candidates.iter().any(|c| c.label == "HORDE"));
    }
}
