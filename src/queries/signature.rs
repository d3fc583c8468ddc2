//! Signature help: which command surrounds the cursor and which of its
//! parameters the cursor is on.

use crate::analysis::state::ScriptState;
use crate::grammar::ParsedLine;
use crate::registry::LanguageDef;

use super::context_at;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureInfo {
    /// `NAME(param, param, ...)` in the command's bracket style.
    pub heading: String,
    pub params: Vec<String>,
    /// Index into `params`; may point one past the end on surplus slots.
    pub active: usize,
    pub doc: String,
}

pub fn signature_help(
    lang: &LanguageDef,
    state: &ScriptState,
    parsed: &ParsedLine,
    column: usize,
) -> Option<SignatureInfo> {
    let root = parsed.root.as_ref()?;
    let ctx = context_at(lang, state, root, column, None)?;

    Some(SignatureInfo {
        heading: ctx.def.heading(),
        params: ctx.def.params.iter().map(|p| p.name.clone()).collect(),
        active: ctx.active,
        doc: ctx.def.doc.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::parse_line;

    fn help(script: &str, column: usize) -> Option<SignatureInfo> {
        let lang = LanguageDef::new();
        let state = ScriptState::new();
        signature_help(&lang, &state, &parse_line(script), column)
    }

    #[test]
    fn active_parameter_follows_the_cursor() {
        let info = help("SET_FLAG(PLAYER0,FLAG1,1)", 10).unwrap();
        assert_eq!(info.heading, "SET_FLAG(player, flag, value)");
        assert_eq!(info.active, 0);

        let info = help("SET_FLAG(PLAYER0,FLAG1,1)", 18).unwrap();
        assert_eq!(info.active, 1);

        let info = help("SET_FLAG(PLAYER0,FLAG1,1)", 24).unwrap();
        assert_eq!(info.active, 2);
    }

    #[test]
    fn nested_calls_get_their_own_signature() {
        let info = help("SET_FLAG(PLAYER0,FLAG1,RANDOM(1,2))", 31).unwrap();
        assert_eq!(info.heading, "RANDOM(first, second, third, fourth)");
    }

    #[test]
    fn square_bracket_commands_keep_their_style() {
        let info = help("QUICK_OBJECTIVE[0,\"go\"]", 16).unwrap();
        assert!(info.heading.starts_with("QUICK_OBJECTIVE["));
        assert!(info.heading.ends_with(']'));
        assert_eq!(info.active, 0);
    }

    #[test]
    fn no_signature_outside_any_call() {
        assert!(help("WIN_GAME", 4).is_none());
        assert!(help("", 0).is_none());
    }
}
