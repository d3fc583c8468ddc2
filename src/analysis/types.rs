//! One validator + suggester per parameter kind. Checks return data, not
//! errors: `Matched` / `NotMatched` / `Invalid` with a domain message, so
//! composite kinds can keep trying members after a near-miss.

use crate::analysis::state::{ScriptState, MAX_MESSAGE_SLOT};
use crate::entities::{self, EntityClass};
use crate::grammar::{TokenKind, Word};
use crate::registry::{LanguageDef, ParamKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeCheck {
    Matched(ParamKind),
    NotMatched,
    /// The word clearly targets this kind but is wrong in a way worth its
    /// own message (out-of-range index, undeclared party, ...).
    Invalid(String),
}

impl TypeCheck {
    pub fn is_matched(&self) -> bool {
        matches!(self, TypeCheck::Matched(_))
    }
}

/// One completion candidate for the host editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub label: String,
    pub preselect: bool,
    pub doc: Option<String>,
}

impl Candidate {
    fn plain(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            preselect: false,
            doc: None,
        }
    }

    pub(crate) fn documented(label: impl Into<String>, doc: Option<String>) -> Self {
        Self {
            label: label.into(),
            preselect: false,
            doc,
        }
    }
}

const COMPARISONS: &[&str] = &["==", "!=", ">=", "<=", ">", "<"];

/// Validate a word against an allowed-kind set, first match wins. When no
/// member matches but one produced a domain error, that error is the
/// result.
pub fn check_kinds(
    allowed: &[ParamKind],
    word: &Word,
    state: &ScriptState,
    lang: &LanguageDef,
) -> TypeCheck {
    let mut invalid = None;
    for kind in ParamKind::flatten(allowed) {
        match check_concrete(kind, word, state, lang) {
            TypeCheck::Matched(kind) => return TypeCheck::Matched(kind),
            TypeCheck::Invalid(msg) => {
                invalid.get_or_insert(msg);
            }
            TypeCheck::NotMatched => {}
        }
    }
    match invalid {
        Some(msg) => TypeCheck::Invalid(msg),
        None => TypeCheck::NotMatched,
    }
}

fn check_concrete(
    kind: ParamKind,
    word: &Word,
    state: &ScriptState,
    lang: &LanguageDef,
) -> TypeCheck {
    let text = word.name();
    let token = &word.token;

    match kind {
        ParamKind::Player => membership(kind, entities::PLAYERS.contains(&text)),
        ParamKind::Flag => indexed(kind, &text, "FLAG", 7),
        ParamKind::Timer => indexed(kind, &text, "TIMER", 7),
        ParamKind::GameVar => membership(kind, entities::GAME_VARS.contains(&text)),
        ParamKind::ActionPoint => match parse_number(&text) {
            Some(n) if n > 0 => TypeCheck::Matched(kind),
            Some(_) => TypeCheck::Invalid("action point numbers are positive".into()),
            None => TypeCheck::NotMatched,
        },
        ParamKind::HeroGate => match parse_number(&text) {
            Some(n) if n < 0 => TypeCheck::Matched(kind),
            _ => TypeCheck::NotMatched,
        },
        ParamKind::Number => match parse_number(&text) {
            Some(_) => TypeCheck::Matched(kind),
            None => TypeCheck::NotMatched,
        },
        ParamKind::Byte => ranged(kind, &text, 0, 255, "byte values are 0..255"),
        ParamKind::Slot => ranged(kind, &text, 0, MAX_MESSAGE_SLOT, "message slots are 0..50"),
        ParamKind::Lvl => ranged(kind, &text, 1, 10, "experience levels are 1..10"),
        ParamKind::Text => match token.kind {
            TokenKind::Str => TypeCheck::Matched(kind),
            TokenKind::IncompleteStr => TypeCheck::Invalid("string is never closed".into()),
            _ => TypeCheck::NotMatched,
        },
        ParamKind::Comparison => match token.kind {
            TokenKind::Operator if token.text != "~" => TypeCheck::Matched(kind),
            TokenKind::IncompleteOperator => {
                TypeCheck::Invalid(format!("incomplete comparison operator \"{}\"", token.text))
            }
            _ => TypeCheck::NotMatched,
        },
        ParamKind::Party => {
            if token.kind != TokenKind::Word {
                TypeCheck::NotMatched
            } else if state.party_declared(&text) {
                TypeCheck::Matched(kind)
            } else {
                TypeCheck::Invalid(format!("party {text} is never created"))
            }
        }
        ParamKind::NewParty => {
            let well_formed = token.kind == TokenKind::Word
                && text
                    .chars()
                    .next()
                    .map(|c| c.is_ascii_alphabetic() || c == '_')
                    .unwrap_or(false);
            membership(kind, well_formed)
        }
        ParamKind::Creature => entity(kind, EntityClass::Creature, &text, lang),
        ParamKind::Room => entity(kind, EntityClass::Room, &text, lang),
        ParamKind::Power => entity(kind, EntityClass::Power, &text, lang),
        ParamKind::Trap => entity(kind, EntityClass::Trap, &text, lang),
        ParamKind::Door => entity(kind, EntityClass::Door, &text, lang),
        ParamKind::Object => entity(kind, EntityClass::Object, &text, lang),
        ParamKind::Criterion => membership(kind, entities::CRITERIA.contains(&text)),
        ParamKind::Objective => membership(kind, entities::OBJECTIVES.contains(&text)),
        ParamKind::Rule => membership(kind, entities::RULES.contains(&text)),
        ParamKind::Slab => membership(kind, entities::SLABS.contains(&text)),
        ParamKind::Tendency => membership(kind, entities::TENDENCIES.contains(&text)),
        ParamKind::ResearchKind => membership(kind, entities::RESEARCH_KINDS.contains(&text)),
        ParamKind::CampaignFlag => indexed(kind, &text, "CAMPAIGN_FLAG", 7),
        ParamKind::CreatureProperty => {
            membership(kind, entities::CREATURE_PROPERTIES.contains(&text))
        }
        // Ranges are whole nodes, never single words
        ParamKind::Range => TypeCheck::NotMatched,
        // An unresolved auto kind accepts anything; the statement-position
        // check already reports the misuse
        ParamKind::Auto => TypeCheck::Matched(kind),
        composite => check_kinds(composite.expansion(), word, state, lang),
    }
}

fn membership(kind: ParamKind, contained: bool) -> TypeCheck {
    if contained {
        TypeCheck::Matched(kind)
    } else {
        TypeCheck::NotMatched
    }
}

fn entity(kind: ParamKind, class: EntityClass, text: &str, lang: &LanguageDef) -> TypeCheck {
    let known = entities::static_set(class).contains(text) || lang.custom_contains(class, text);
    membership(kind, known)
}

fn indexed(kind: ParamKind, text: &str, prefix: &str, max: i64) -> TypeCheck {
    let Some(rest) = text.strip_prefix(prefix) else {
        return TypeCheck::NotMatched;
    };
    match rest.parse::<i64>() {
        Ok(n) if (0..=max).contains(&n) => TypeCheck::Matched(kind),
        Ok(_) => TypeCheck::Invalid(format!("only {prefix}0..{prefix}{max} exist")),
        Err(_) => TypeCheck::NotMatched,
    }
}

fn ranged(kind: ParamKind, text: &str, min: i64, max: i64, message: &str) -> TypeCheck {
    match parse_number(text) {
        Some(n) if (min..=max).contains(&n) => TypeCheck::Matched(kind),
        Some(_) => TypeCheck::Invalid(message.into()),
        None => TypeCheck::NotMatched,
    }
}

pub fn parse_number(text: &str) -> Option<i64> {
    text.parse::<i64>().ok()
}

/// Completion candidates for one kind. Composite kinds union their members.
pub fn suggest_kind(kind: ParamKind, state: &ScriptState, lang: &LanguageDef) -> Vec<Candidate> {
    match kind {
        ParamKind::Player => documented_set(&entities::PLAYERS),
        ParamKind::Flag => (0..=7)
            .map(|n| Candidate::plain(format!("FLAG{n}")))
            .collect(),
        ParamKind::Timer => (0..=7)
            .map(|n| Candidate::plain(format!("TIMER{n}")))
            .collect(),
        ParamKind::GameVar => documented_set(&entities::GAME_VARS),
        ParamKind::Comparison => COMPARISONS.iter().map(|op| Candidate::plain(*op)).collect(),
        ParamKind::Party => state.party_names().map(Candidate::plain).collect(),
        ParamKind::Creature => entity_candidates(EntityClass::Creature, lang),
        ParamKind::Room => entity_candidates(EntityClass::Room, lang),
        ParamKind::Power => entity_candidates(EntityClass::Power, lang),
        ParamKind::Trap => entity_candidates(EntityClass::Trap, lang),
        ParamKind::Door => entity_candidates(EntityClass::Door, lang),
        ParamKind::Object => entity_candidates(EntityClass::Object, lang),
        ParamKind::Criterion => documented_set(&entities::CRITERIA),
        ParamKind::Objective => documented_set(&entities::OBJECTIVES),
        ParamKind::Rule => documented_set(&entities::RULES),
        ParamKind::Slab => documented_set(&entities::SLABS),
        ParamKind::Tendency => documented_set(&entities::TENDENCIES),
        ParamKind::ResearchKind => documented_set(&entities::RESEARCH_KINDS),
        ParamKind::CampaignFlag => (0..=7)
            .map(|n| Candidate::plain(format!("CAMPAIGN_FLAG{n}")))
            .collect(),
        ParamKind::CreatureProperty => documented_set(&entities::CREATURE_PROPERTIES),
        composite if composite.is_composite() => {
            let mut out: Vec<Candidate> = Vec::new();
            for member in composite.expansion() {
                for candidate in suggest_kind(*member, state, lang) {
                    if !out.iter().any(|c| c.label == candidate.label) {
                        out.push(candidate);
                    }
                }
            }
            out
        }
        // Free-form kinds have nothing to offer
        _ => Vec::new(),
    }
}

fn documented_set(set: &phf::Set<&'static str>) -> Vec<Candidate> {
    set.iter()
        .map(|name| Candidate::documented(*name, entities::entity_doc(name).map(str::to_string)))
        .collect()
}

fn entity_candidates(class: EntityClass, lang: &LanguageDef) -> Vec<Candidate> {
    let mut out: Vec<Candidate> = entities::static_set(class)
        .iter()
        .map(|name| Candidate::documented(*name, entities::entity_doc(name).map(str::to_string)))
        .collect();
    for custom in lang.custom_names(class) {
        out.push(Candidate::documented(custom.name, custom.doc));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::state::Site;
    use crate::grammar::Token;

    fn word(text: &str) -> Word {
        let kind = match text.chars().next() {
            Some('"') => TokenKind::Str,
            Some(c) if "<>=!".contains(c) => TokenKind::Operator,
            _ => TokenKind::Word,
        };
        Word::new(Token::new(text, 0, text.len(), kind))
    }

    fn check(allowed: &[ParamKind], text: &str) -> TypeCheck {
        let lang = LanguageDef::new();
        let state = ScriptState::new();
        check_kinds(allowed, &word(text), &state, &lang)
    }

    #[test]
    fn players_and_flags() {
        assert!(check(&[ParamKind::Player], "PLAYER0").is_matched());
        assert!(check(&[ParamKind::Player], "player_good").is_matched());
        assert_eq!(check(&[ParamKind::Player], "PLAYER9"), TypeCheck::NotMatched);
        assert!(check(&[ParamKind::Flag], "FLAG3").is_matched());
        assert!(matches!(
            check(&[ParamKind::Flag], "FLAG9"),
            TypeCheck::Invalid(_)
        ));
    }

    #[test]
    fn numeric_ranges() {
        assert!(check(&[ParamKind::Byte], "255").is_matched());
        assert!(matches!(
            check(&[ParamKind::Byte], "256"),
            TypeCheck::Invalid(_)
        ));
        assert!(check(&[ParamKind::Number], "-40").is_matched());
        assert_eq!(check(&[ParamKind::Number], "A"), TypeCheck::NotMatched);
        assert!(matches!(
            check(&[ParamKind::Slot], "51"),
            TypeCheck::Invalid(_)
        ));
        assert!(matches!(check(&[ParamKind::Lvl], "0"), TypeCheck::Invalid(_)));
    }

    #[test]
    fn location_composite_is_first_match_wins() {
        let location = [ParamKind::Location];
        assert_eq!(
            check(&location, "PLAYER1"),
            TypeCheck::Matched(ParamKind::Player)
        );
        assert_eq!(
            check(&location, "3"),
            TypeCheck::Matched(ParamKind::ActionPoint)
        );
        assert_eq!(
            check(&location, "-2"),
            TypeCheck::Matched(ParamKind::HeroGate)
        );
        assert_eq!(check(&location, "LAIR"), TypeCheck::NotMatched);
    }

    #[test]
    fn comparison_operators() {
        assert!(check(&[ParamKind::Comparison], ">=").is_matched());
        let incomplete = Word::new(Token::new("=", 0, 1, TokenKind::IncompleteOperator));
        let lang = LanguageDef::new();
        let state = ScriptState::new();
        assert!(matches!(
            check_kinds(&[ParamKind::Comparison], &incomplete, &state, &lang),
            TypeCheck::Invalid(_)
        ));
    }

    #[test]
    fn named_membership_kinds() {
        assert!(check(&[ParamKind::Slab], "LAVA").is_matched());
        assert!(check(&[ParamKind::Slab], "claimed").is_matched());
        assert_eq!(check(&[ParamKind::Slab], "SNOW"), TypeCheck::NotMatched);
        assert!(check(&[ParamKind::Tendency], "IMPRISON").is_matched());
        assert_eq!(check(&[ParamKind::Tendency], "STAY"), TypeCheck::NotMatched);
        assert!(check(&[ParamKind::ResearchKind], "MAGIC").is_matched());
        assert!(check(&[ParamKind::ResearchKind], "ROOM").is_matched());
        assert_eq!(
            check(&[ParamKind::ResearchKind], "TRAP"),
            TypeCheck::NotMatched
        );
    }

    #[test]
    fn campaign_flags_are_indexed_like_flags() {
        assert!(check(&[ParamKind::CampaignFlag], "CAMPAIGN_FLAG0").is_matched());
        assert!(check(&[ParamKind::CampaignFlag], "campaign_flag7").is_matched());
        assert!(matches!(
            check(&[ParamKind::CampaignFlag], "CAMPAIGN_FLAG8"),
            TypeCheck::Invalid(_)
        ));
        assert_eq!(
            check(&[ParamKind::CampaignFlag], "FLAG0"),
            TypeCheck::NotMatched
        );
    }

    #[test]
    fn creature_properties_are_a_named_set() {
        assert!(check(&[ParamKind::CreatureProperty], "FLYING").is_matched());
        assert_eq!(
            check(&[ParamKind::CreatureProperty], "INVISIBLE"),
            TypeCheck::NotMatched
        );
        let lang = LanguageDef::new();
        let state = ScriptState::new();
        let suggestions = suggest_kind(ParamKind::CreatureProperty, &state, &lang);
        let flying = suggestions.iter().find(|c| c.label == "FLYING").unwrap();
        assert!(flying.doc.is_some());
    }

    #[test]
    fn undeclared_party_is_a_domain_error() {
        assert!(matches!(
            check(&[ParamKind::Party], "WAVE1"),
            TypeCheck::Invalid(_)
        ));
        let lang = LanguageDef::new();
        let mut state = ScriptState::new();
        state.declare_party(
            "WAVE1",
            Site {
                line: 0,
                start: 0,
                end: 0,
            },
        );
        assert!(check_kinds(&[ParamKind::Party], &word("wave1"), &state, &lang).is_matched());
    }

    #[test]
    fn custom_entities_extend_static_sets() {
        let lang = LanguageDef::new();
        let state = ScriptState::new();
        assert_eq!(
            check_kinds(&[ParamKind::Trap], &word("FREEZE"), &state, &lang),
            TypeCheck::NotMatched
        );
        lang.install_custom(crate::entities::CustomEntities {
            traps: vec![crate::entities::CustomEntity {
                name: "FREEZE".into(),
                doc: None,
            }],
            ..Default::default()
        });
        assert!(check_kinds(&[ParamKind::Trap], &word("FREEZE"), &state, &lang).is_matched());
    }

    #[test]
    fn composite_suggestions_union_members() {
        let lang = LanguageDef::new();
        let state = ScriptState::new();
        let suggestions = suggest_kind(ParamKind::ReadVar, &state, &lang);
        assert!(suggestions.iter().any(|c| c.label == "FLAG0"));
        assert!(suggestions.iter().any(|c| c.label == "TIMER5"));
        assert!(suggestions.iter().any(|c| c.label == "GAME_TURN"));
    }
}
