//! Document outline: the statement tree of a script, with condition
//! blocks as branches owning the statements up to their matching ENDIF.

use crate::grammar::{Call, Node, ParsedLine};
use crate::registry::{LanguageDef, SideEffect};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineNode {
    /// Command name plus a condensed rendering of its arguments.
    pub label: String,
    pub line: usize,
    pub children: Vec<OutlineNode>,
}

/// Builds the outline for a parsed document. Closers never appear as
/// entries of their own; an unterminated condition keeps the statements
/// after it as children.
pub fn outline<'a, I>(lang: &LanguageDef, lines: I) -> Vec<OutlineNode>
where
    I: IntoIterator<Item = &'a ParsedLine>,
{
    let mut root: Vec<OutlineNode> = Vec::new();
    let mut stack: Vec<OutlineNode> = Vec::new();

    for (number, parsed) in lines.into_iter().enumerate() {
        let (name, label) = match &parsed.root {
            Some(Node::Call(call)) if !call.is_anonymous() => (call.name(), label_for(call)),
            Some(Node::Word(word)) => (word.name(), word.name()),
            _ => continue,
        };
        let def = lang.command(&name);
        let opens = def.map_or(false, |d| d.effects.contains(&SideEffect::ConditionOpen));
        let closes = def.map_or(false, |d| d.effects.contains(&SideEffect::ConditionClose));

        if closes {
            if let Some(done) = stack.pop() {
                attach(&mut root, &mut stack, done);
            }
            continue;
        }

        let node = OutlineNode {
            label,
            line: number,
            children: Vec::new(),
        };
        if opens {
            stack.push(node);
        } else {
            attach(&mut root, &mut stack, node);
        }
    }

    while let Some(done) = stack.pop() {
        attach(&mut root, &mut stack, done);
    }
    root
}

fn attach(root: &mut Vec<OutlineNode>, stack: &mut [OutlineNode], node: OutlineNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => root.push(node),
    }
}

fn label_for(call: &Call) -> String {
    let args = args_text(call);
    if args.is_empty() {
        call.name()
    } else {
        format!("{}({args})", call.name())
    }
}

fn args_text(call: &Call) -> String {
    let mut out = String::new();
    for slot in &call.args {
        let Some(value) = &slot.value else {
            continue;
        };
        if !out.is_empty() {
            out.push_str(if slot.preceding_separator.is_some() {
                ","
            } else {
                " "
            });
        }
        out.push_str(&node_text(value));
    }
    out
}

fn node_text(node: &Node) -> String {
    match node {
        Node::Word(word) => word.token.text.clone(),
        Node::Range(range) => format!("{}~{}", range.lhs.token.text, range.rhs.token.text),
        Node::Call(call) => {
            let inner = args_text(call);
            format!("{}({inner})", call.caller.text)
        }
    }
}
