//! Call-site signature derivation. The static descriptor is shared and
//! immutable; whenever the call site changes its shape (auto kinds fed by
//! the parent slot, value-triggered sign changes) a derived copy is built
//! instead.

use std::borrow::Cow;

use crate::analysis::state::ScriptState;
use crate::analysis::types::check_kinds;
use crate::grammar::{Call, Node};
use super::{Action, CommandDescriptor, LanguageDef, ParamKind, Trigger};

/// Derive the per-call descriptor for `call`. `parent_allowed` is the
/// allowed-kind set of the argument slot this call sits in, when it is
/// nested; auto kinds take that set over. Sign-change rules then run in
/// declared order against the actual arguments.
pub fn derive_for_call<'d>(
    def: &'d CommandDescriptor,
    call: &Call,
    parent_allowed: Option<&[ParamKind]>,
    state: &ScriptState,
    lang: &LanguageDef,
) -> Cow<'d, CommandDescriptor> {
    let mut derived = Cow::Borrowed(def);

    if let (Some(parent), true) = (parent_allowed, def.has_auto()) {
        let mut substituted = parent.to_vec();
        // Consecutive-value ranges are only legal in numeric contexts
        let numeric = ParamKind::flatten(parent)
            .iter()
            .any(|k| matches!(k, ParamKind::Number | ParamKind::Byte));
        if numeric && !substituted.contains(&ParamKind::Range) {
            substituted.push(ParamKind::Range);
        }

        let out = derived.to_mut();
        for param in &mut out.params {
            if param.allowed.contains(&ParamKind::Auto) {
                param.allowed = substituted.clone();
            }
        }
        if out.returns.contains(&ParamKind::Auto) {
            out.returns = parent.to_vec();
        }
    }

    for rule in def.rules {
        let argument = call.args.get(rule.input).and_then(|slot| slot.value.as_ref());
        let fired = match argument {
            Some(node) => trigger_fires(&rule.trigger, node, state, lang),
            None => false,
        };
        if !fired {
            continue;
        }

        let out = derived.to_mut();
        match rule.action {
            Action::SetKinds { output, kinds } => {
                if let Some(param) = out.params.get_mut(output) {
                    param.allowed = kinds.to_vec();
                }
            }
            Action::SetOptional { output, optional } => {
                if let Some(param) = out.params.get_mut(output) {
                    param.optional = optional;
                }
            }
        }
    }

    derived
}

fn trigger_fires(trigger: &Trigger, node: &Node, state: &ScriptState, lang: &LanguageDef) -> bool {
    match trigger {
        Trigger::Equals(text) => {
            matches!(node, Node::Word(w) if w.name().eq_ignore_ascii_case(text))
        }
        Trigger::IsOneOfKinds(kinds) => match node {
            Node::Word(w) => check_kinds(kinds, w, state, lang).is_matched(),
            Node::Range(_) => kinds.contains(&ParamKind::Range),
            Node::Call(_) => false,
        },
    }
}
