//! The script analyzer. One pass walks every parsed line in document
//! order, checks each statement against its descriptor and threads the
//! dataflow facts through a fresh [`ScriptState`]; `finalize` then turns
//! the leftover state into script-wide diagnostics.

use std::borrow::Cow;

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::diagnostics::Diagnostic;
use crate::grammar::{ArgSlot, Call, Node, ParsedLine, Token, Word};
use crate::registry::{
    derive_for_call, BracketStyle, CommandDescriptor, LanguageDef, ParamKind, Placement,
    SideEffect,
};

pub mod state;
pub mod types;

use state::{ScriptState, Site, VarClass, VarKey};
use types::{check_kinds, parse_number, TypeCheck};

/// Everything one full pass produces. Queries keep the state around for
/// the facts only the whole script knows (declared parties, mostly).
#[derive(Debug, Default)]
pub struct Analysis {
    pub diagnostics: Vec<Diagnostic>,
    pub state: ScriptState,
}

/// Analyze a whole document. Pure in the document: the same lines always
/// yield the same diagnostics, in (line, column) order.
#[tracing::instrument(skip_all)]
pub fn analyze<'a, I>(lang: &LanguageDef, lines: I) -> Analysis
where
    I: IntoIterator<Item = &'a ParsedLine>,
{
    let mut pass = Pass {
        lang,
        state: ScriptState::new(),
        diagnostics: Vec::new(),
    };
    let mut ignored = FxHashSet::default();

    for (line, parsed) in lines.into_iter().enumerate() {
        if parsed.ignore_diagnostics {
            ignored.insert(line);
        }
        pass.check_line(line, parsed);
    }
    pass.state.finalize(&mut pass.diagnostics);

    let mut diagnostics = pass.diagnostics;
    if !ignored.is_empty() {
        diagnostics.retain(|d| !ignored.contains(&d.line));
    }
    diagnostics.sort_by_key(|d| (d.line, d.start));
    debug!(count = diagnostics.len(), "analysis pass finished");

    Analysis {
        diagnostics,
        state: pass.state,
    }
}

struct Pass<'a> {
    lang: &'a LanguageDef,
    state: ScriptState,
    diagnostics: Vec<Diagnostic>,
}

impl Pass<'_> {
    fn check_line(&mut self, line: usize, parsed: &ParsedLine) {
        for error in &parsed.errors {
            self.diagnostics.push(Diagnostic::error(
                line,
                error.start,
                error.end,
                error.kind.to_string(),
            ));
        }

        match &parsed.root {
            None => {}
            Some(Node::Range(range)) => self.diagnostics.push(Diagnostic::error(
                line,
                range.start(),
                range.end(),
                "a value range is not a statement",
            )),
            Some(Node::Word(word)) => {
                self.check_command(line, &word.token, None, parsed.comment.as_ref())
            }
            Some(Node::Call(call)) => {
                // Anonymous recovery calls already carry a structural error
                if !call.is_anonymous() {
                    self.check_command(line, &call.caller, Some(call), parsed.comment.as_ref());
                }
            }
        }
    }

    fn check_command(
        &mut self,
        line: usize,
        caller: &Token,
        call: Option<&Call>,
        comment: Option<&Token>,
    ) {
        let name = caller.upper();
        let Some(def) = self.lang.command(&name) else {
            self.diagnostics.push(Diagnostic::error(
                line,
                caller.start,
                caller.end,
                format!("unknown command {name}"),
            ));
            return;
        };

        if let Some(marker) = self.state.take_reuse_marker() {
            if !def.reusable() {
                self.diagnostics.push(Diagnostic::error(
                    marker.line,
                    marker.start,
                    marker.end,
                    format!("{name} cannot be marked reusable"),
                ));
            }
        }

        match def.placement {
            Placement::RootOnly if !self.state.at_root() => {
                self.diagnostics.push(Diagnostic::error(
                    line,
                    caller.start,
                    caller.end,
                    format!("{name} is not allowed inside a condition"),
                ));
            }
            Placement::NestedOnly if self.state.at_root() => {
                self.diagnostics.push(Diagnostic::warning(
                    line,
                    caller.start,
                    caller.end,
                    format!("{name} outside a condition fires immediately at level start"),
                ));
            }
            _ => {}
        }

        if !def.returns.is_empty() {
            self.diagnostics.push(Diagnostic::error(
                line,
                caller.start,
                caller.end,
                format!("{name} yields a value and cannot stand alone"),
            ));
        }

        if let Some(call) = call {
            if call.opener.text != def.bracket.opener() {
                self.diagnostics.push(Diagnostic::error(
                    line,
                    call.opener.start,
                    call.opener.end,
                    format!("{name} takes {} brackets", bracket_word(def.bracket)),
                ));
            }
        }

        let derived = match call {
            Some(call) => derive_for_call(def, call, None, &self.state, self.lang),
            None => Cow::Borrowed(def),
        };
        let args: &[ArgSlot] = call.map(|c| c.args.as_slice()).unwrap_or(&[]);
        self.check_args(line, caller, &derived, args);

        // Side effects apply even when an argument failed its type check;
        // the script-wide facts stay closer to what the author meant
        self.apply_effects(line, caller, def, args, comment);
    }

    fn check_args(
        &mut self,
        line: usize,
        caller: &Token,
        def: &CommandDescriptor,
        args: &[ArgSlot],
    ) {
        let required = def.required_count();
        if args.len() < required {
            let wanted = if required == def.params.len() {
                required.to_string()
            } else {
                format!("at least {required}")
            };
            self.diagnostics.push(Diagnostic::error(
                line,
                caller.start,
                caller.end,
                format!("{} expects {wanted} arguments, got {}", def.name, args.len()),
            ));
        }

        for (i, slot) in args.iter().enumerate() {
            let Some(param) = def.params.get(i) else {
                let (start, end) = match &slot.value {
                    Some(node) => (node.start(), node.end()),
                    None => (slot.start, slot.start),
                };
                self.diagnostics
                    .push(Diagnostic::error(line, start, end, "surplus argument"));
                continue;
            };

            if i > 0 {
                match (&slot.preceding_separator, param.requires_separator) {
                    (None, true) => {
                        let at = slot.value.as_ref().map(Node::start).unwrap_or(slot.start);
                        self.diagnostics.push(Diagnostic::error(
                            line,
                            at,
                            at,
                            format!("missing comma before {}", param.name),
                        ));
                    }
                    (Some(sep), false) => {
                        self.diagnostics.push(Diagnostic::error(
                            line,
                            sep.start,
                            sep.end,
                            "unexpected comma",
                        ));
                    }
                    _ => {}
                }
            }

            // Empty slots already carry a structural error
            if let Some(value) = &slot.value {
                self.check_value(line, value, &param.allowed);
            }
        }
    }

    fn check_value(&mut self, line: usize, node: &Node, allowed: &[ParamKind]) {
        match node {
            Node::Word(word) => match check_kinds(allowed, word, &self.state, self.lang) {
                TypeCheck::Matched(_) => {}
                TypeCheck::Invalid(message) => self.diagnostics.push(Diagnostic::error(
                    line,
                    word.start(),
                    word.end(),
                    message,
                )),
                TypeCheck::NotMatched => self.check_value_word(line, word, allowed),
            },
            Node::Range(range) => {
                if allowed.contains(&ParamKind::Range) {
                    for end in [&range.lhs, &range.rhs] {
                        if parse_number(&end.name()).is_none() {
                            self.diagnostics.push(Diagnostic::error(
                                line,
                                end.start(),
                                end.end(),
                                "range ends must be numbers",
                            ));
                        }
                    }
                } else {
                    self.diagnostics.push(Diagnostic::error(
                        line,
                        range.start(),
                        range.end(),
                        "a value range is not allowed here",
                    ));
                }
            }
            Node::Call(call) => self.check_value_call(line, call, allowed),
        }
    }

    /// A word that matched no kind may still name a zero-argument command
    /// standing in for its return value (`GAME_TURN` style).
    fn check_value_word(&mut self, line: usize, word: &Word, allowed: &[ParamKind]) {
        let name = word.name();
        if let Some(inner) = self.lang.command(&name) {
            if kinds_overlap(&inner.returns, allowed) {
                let required = inner.required_count();
                if required > 0 {
                    self.diagnostics.push(Diagnostic::error(
                        line,
                        word.start(),
                        word.end(),
                        format!("{name} expects {required} arguments, got 0"),
                    ));
                }
                return;
            }
        }
        self.diagnostics.push(Diagnostic::error(
            line,
            word.start(),
            word.end(),
            format!("{} is not a valid {}", word.token.text, describe(allowed)),
        ));
    }

    fn check_value_call(&mut self, line: usize, call: &Call, allowed: &[ParamKind]) {
        if call.is_anonymous() {
            return;
        }
        let name = call.name();
        let Some(def) = self.lang.command(&name) else {
            self.diagnostics.push(Diagnostic::error(
                line,
                call.caller.start,
                call.caller.end,
                format!("unknown command {name}"),
            ));
            return;
        };

        let derived = derive_for_call(def, call, Some(allowed), &self.state, self.lang);
        if derived.returns.is_empty() {
            self.diagnostics.push(Diagnostic::error(
                line,
                call.caller.start,
                call.caller.end,
                format!("{name} does not yield a value"),
            ));
        } else if !kinds_overlap(&derived.returns, allowed) {
            self.diagnostics.push(Diagnostic::error(
                line,
                call.caller.start,
                call.caller.end,
                format!(
                    "{name} yields {}, not {}",
                    describe(&derived.returns),
                    describe(allowed)
                ),
            ));
        }
        if call.opener.text != def.bracket.opener() {
            self.diagnostics.push(Diagnostic::error(
                line,
                call.opener.start,
                call.opener.end,
                format!("{name} takes {} brackets", bracket_word(def.bracket)),
            ));
        }

        self.check_args(line, &call.caller, &derived, &call.args);
    }

    fn apply_effects(
        &mut self,
        line: usize,
        caller: &Token,
        def: &CommandDescriptor,
        args: &[ArgSlot],
        comment: Option<&Token>,
    ) {
        let here = Site {
            line,
            start: caller.start,
            end: caller.end,
        };

        for effect in def.effects {
            match *effect {
                SideEffect::ConditionOpen => self.state.open_condition(here),
                SideEffect::ConditionClose => {
                    if self.state.close_condition().is_none() {
                        self.diagnostics.push(Diagnostic::error(
                            line,
                            caller.start,
                            caller.end,
                            format!("{} without an open condition", caller.upper()),
                        ));
                    }
                }
                SideEffect::VarWrite { player, var } => {
                    self.var_effect(line, args, player, var, true)
                }
                SideEffect::VarRead { player, var } => {
                    self.var_effect(line, args, player, var, false)
                }
                SideEffect::ActionPointTrigger { slot } => {
                    if let Some((point, site)) = numbered(line, args, slot) {
                        self.state.record_trigger(point, site);
                        if comment.is_none() {
                            self.diagnostics.push(Diagnostic::hint(
                                line,
                                caller.start,
                                caller.end,
                                "action point trigger has no describing comment",
                            ));
                        }
                    }
                }
                SideEffect::ActionPointReset { slot } => {
                    if let Some((point, site)) = numbered(line, args, slot) {
                        self.state.record_reset(point, site);
                    }
                }
                SideEffect::MessageSlot { slot } => {
                    if let Some((number, site)) = numbered(line, args, slot) {
                        if !self.state.occupy_message_slot(number, site) {
                            self.diagnostics.push(Diagnostic::error(
                                line,
                                site.start,
                                site.end,
                                format!("message slot {number} is already used"),
                            ));
                        }
                    }
                }
                SideEffect::PartyCreate { slot } => {
                    if let Some(word) = word_at(args, slot) {
                        let name = word.name();
                        let site = word_site(line, word);
                        if !self.state.declare_party(&name, site) {
                            self.diagnostics.push(Diagnostic::error(
                                line,
                                site.start,
                                site.end,
                                format!("party {name} is already created"),
                            ));
                        }
                    }
                }
                SideEffect::PartyAdd { slot } => {
                    if let Some(word) = word_at(args, slot) {
                        let site = word_site(line, word);
                        self.state.record_party_add(&word.name(), site);
                    }
                }
                SideEffect::PartyRead { slot } => {
                    if let Some(word) = word_at(args, slot) {
                        let site = word_site(line, word);
                        self.state.record_party_read(&word.name(), site);
                    }
                }
                SideEffect::PartyDelete { slot } => {
                    if let Some(word) = word_at(args, slot) {
                        let site = word_site(line, word);
                        self.state.record_party_delete(&word.name(), site);
                    }
                }
                SideEffect::ReuseMarker => self.state.set_reuse_marker(here),
                SideEffect::VersionSet => {
                    if !self.state.record_version(here) {
                        self.diagnostics.push(Diagnostic::error(
                            line,
                            caller.start,
                            caller.end,
                            "LEVEL_VERSION appears more than once",
                        ));
                    }
                }
                SideEffect::Win => self.state.record_win(),
            }
        }
    }

    /// Track a flag/timer read or write. Game variables and literal values
    /// in variable position fall outside the log, on purpose.
    fn var_effect(
        &mut self,
        line: usize,
        args: &[ArgSlot],
        player_slot: usize,
        var_slot: usize,
        write: bool,
    ) {
        let Some(var) = word_at(args, var_slot) else {
            return;
        };
        let name = var.name();
        let class = if indexed_name(&name, "FLAG") {
            VarClass::Flag
        } else if indexed_name(&name, "TIMER") {
            VarClass::Timer
        } else {
            return;
        };
        let player = word_at(args, player_slot)
            .map(|w| w.name())
            .unwrap_or_default();

        let key = VarKey {
            class,
            player,
            name,
        };
        let site = word_site(line, var);
        if write {
            self.state.record_write(key, site);
        } else {
            self.state.record_read(key, site);
        }
    }
}

fn bracket_word(style: BracketStyle) -> &'static str {
    match style {
        BracketStyle::Round => "round",
        BracketStyle::Square => "square",
    }
}

pub(crate) fn word_at(args: &[ArgSlot], index: usize) -> Option<&Word> {
    match args.get(index)?.value.as_ref()? {
        Node::Word(word) => Some(word),
        _ => None,
    }
}

fn word_site(line: usize, word: &Word) -> Site {
    Site {
        line,
        start: word.start(),
        end: word.end(),
    }
}

fn numbered(line: usize, args: &[ArgSlot], index: usize) -> Option<(i64, Site)> {
    let word = word_at(args, index)?;
    let number = parse_number(&word.name())?;
    Some((number, word_site(line, word)))
}

pub(crate) fn indexed_name(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .map(|rest| rest.parse::<u8>().is_ok())
        .unwrap_or(false)
}

pub(crate) fn kinds_overlap(a: &[ParamKind], b: &[ParamKind]) -> bool {
    // Numeric kinds subsume each other here; the range limits are checked
    // at the concrete argument
    fn numeric(kind: &ParamKind) -> bool {
        matches!(
            kind,
            ParamKind::Number | ParamKind::Byte | ParamKind::Slot | ParamKind::Lvl
        )
    }

    let a = ParamKind::flatten(a);
    let b = ParamKind::flatten(b);
    a.iter()
        .any(|kind| b.contains(kind) || *kind == ParamKind::Auto)
        || (a.iter().any(numeric) && b.iter().any(numeric))
}

/// Human list of the kinds an argument position accepts.
fn describe(allowed: &[ParamKind]) -> String {
    allowed
        .iter()
        .filter(|k| **k != ParamKind::Range)
        .map(ParamKind::to_string)
        .collect::<Vec<_>>()
        .join(" or ")
}
