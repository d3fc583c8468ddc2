//! Position queries over a parsed document: completion, signature help,
//! hover, find-references and the outline. The per-position queries
//! descend from the line's root node and carry the surrounding argument
//! slot's kinds down the tree, so nested value commands see the same
//! derived signature the analyzer saw.

use crate::analysis::state::ScriptState;
use crate::grammar::{Call, Node, Token};
use crate::registry::{derive_for_call, CommandDescriptor, LanguageDef, ParamKind};

pub mod completion;
pub mod hover;
pub mod outline;
pub mod references;
pub mod signature;

pub use completion::completions;
pub use hover::hover;
pub use outline::{outline, OutlineNode};
pub use references::references;
pub use signature::{signature_help, SignatureInfo};

/// The innermost call whose argument region contains the column, with the
/// descriptor already derived for that call site.
pub(crate) struct CallContext<'a> {
    pub call: &'a Call,
    pub def: CommandDescriptor,
    pub active: usize,
}

pub(crate) fn context_at<'a>(
    lang: &LanguageDef,
    state: &ScriptState,
    node: &'a Node,
    column: usize,
    parent_allowed: Option<&[ParamKind]>,
) -> Option<CallContext<'a>> {
    let Node::Call(call) = node else {
        return None;
    };
    if call.is_anonymous() {
        return None;
    }
    let def = lang.command(&call.name())?;

    let active = match call.slot_at(column) {
        Some(index) => index,
        None => {
            // A zero-argument call still has a position between its brackets
            let inside = column >= call.opener.end
                && call.closer.as_ref().map_or(true, |c| column <= c.start);
            if inside && call.args.is_empty() {
                0
            } else {
                return None;
            }
        }
    };

    let derived = derive_for_call(def, call, parent_allowed, state, lang).into_owned();
    if let Some(value) = call.args.get(active).and_then(|slot| slot.value.as_ref()) {
        let inner_allowed = derived.params.get(active).map(|p| p.allowed.as_slice());
        if let Some(inner) = context_at(lang, state, value, column, inner_allowed) {
            return Some(inner);
        }
    }

    Some(CallContext {
        call,
        def: derived,
        active,
    })
}

/// The word or caller token under the column, innermost first.
pub(crate) fn token_under(node: &Node, column: usize) -> Option<&Token> {
    match node {
        Node::Word(word) => word.token.contains(column).then_some(&word.token),
        Node::Range(range) => [&range.lhs.token, &range.rhs.token]
            .into_iter()
            .find(|t| t.contains(column)),
        Node::Call(call) => {
            for slot in &call.args {
                if let Some(value) = &slot.value {
                    if let Some(token) = token_under(value, column) {
                        return Some(token);
                    }
                }
            }
            (!call.caller.text.is_empty() && call.caller.contains(column))
                .then_some(&call.caller)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::parse_line;

    #[test]
    fn context_descends_into_nested_calls() {
        let lang = LanguageDef::new();
        let state = ScriptState::new();
        let line = parse_line("SET_FLAG(PLAYER0,FLAG1,RANDOM(1,2))");
        let root = line.root.as_ref().unwrap();

        // Column 32 sits on the `2` inside RANDOM
        let ctx = context_at(&lang, &state, root, 32, None).unwrap();
        assert_eq!(ctx.def.name, "RANDOM");
        assert_eq!(ctx.active, 1);
        // The slot kinds came down from SET_FLAG's value param
        assert!(ctx.def.params[1].allowed.contains(&ParamKind::Byte));

        // Column 17 sits on FLAG1, in the outer call
        let ctx = context_at(&lang, &state, root, 17, None).unwrap();
        assert_eq!(ctx.def.name, "SET_FLAG");
        assert_eq!(ctx.active, 1);
    }

    #[test]
    fn zero_argument_calls_still_have_a_position() {
        let lang = LanguageDef::new();
        let state = ScriptState::new();
        let line = parse_line("SET_FLAG()");
        let root = line.root.as_ref().unwrap();

        let ctx = context_at(&lang, &state, root, 9, None).unwrap();
        assert_eq!(ctx.def.name, "SET_FLAG");
        assert_eq!(ctx.active, 0);
    }

    #[test]
    fn unterminated_calls_extend_past_the_typed_text() {
        let lang = LanguageDef::new();
        let state = ScriptState::new();
        let line = parse_line("IF(PLAYER0,");
        let root = line.root.as_ref().unwrap();

        let ctx = context_at(&lang, &state, root, 24, None).unwrap();
        assert_eq!(ctx.def.name, "IF");
        assert_eq!(ctx.active, 1);
    }

    #[test]
    fn token_lookup_finds_the_innermost_word() {
        let line = parse_line("SET_FLAG(PLAYER0,FLAG1,RANDOM(1,2))");
        let root = line.root.as_ref().unwrap();
        assert_eq!(token_under(root, 4).unwrap().text, "SET_FLAG");
        assert_eq!(token_under(root, 10).unwrap().text, "PLAYER0");
        assert_eq!(token_under(root, 25).unwrap().text, "RANDOM");
    }
}
