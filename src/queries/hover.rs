//! Hover text: command documentation for callers and value commands,
//! entity documentation for known names.

use crate::entities;
use crate::grammar::ParsedLine;
use crate::registry::LanguageDef;

use super::token_under;

pub fn hover(lang: &LanguageDef, parsed: &ParsedLine, column: usize) -> Option<String> {
    let root = parsed.root.as_ref()?;
    let token = token_under(root, column)?;
    let name = token.upper();

    if let Some(def) = lang.command(&name) {
        return Some(format!("{}\n\n{}", def.heading(), def.doc));
    }
    if let Some(doc) = entities::entity_doc(&name) {
        return Some(doc.to_string());
    }
    lang.custom_doc(&name)
}
