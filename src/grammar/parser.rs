use super::{
    grouper::{group, Group, GroupedLine, TokenTree},
    lexer::tokenize,
    ArgSlot, Call, Node, ParseError, ParseErrorKind, ParsedLine, RangeExpr, Token, TokenKind, Word,
    OPEN_END,
};

/// Lex, group and build one line of script in a single step.
pub fn parse_line(text: &str) -> ParsedLine {
    build_line(group(tokenize(text)))
}

/// Shape one grouped line into a call/word tree, collecting structural
/// errors along the way. A local error never discards the rest of the
/// line's structure.
pub fn build_line(grouped: GroupedLine) -> ParsedLine {
    let mut errors = Vec::new();
    let root = build_root(&grouped.items, &mut errors);

    let ignore_diagnostics = grouped
        .comment
        .as_ref()
        .map(|c| c.text.to_ascii_lowercase().contains("@ignore"))
        .unwrap_or(false);

    ParsedLine {
        root,
        comment: grouped.comment,
        ignore_diagnostics,
        errors,
    }
}

fn tree_start(item: &TokenTree) -> usize {
    match item {
        TokenTree::Token(t) => t.start,
        TokenTree::Group(g) => g.opener.start,
    }
}

fn tree_end(item: &TokenTree) -> usize {
    match item {
        TokenTree::Token(t) => t.end,
        TokenTree::Group(g) => match (&g.closer, g.children.last()) {
            (Some(closer), _) => closer.end,
            (None, Some(last)) => tree_end(last),
            (None, None) => g.opener.end,
        },
    }
}

fn build_root(items: &[TokenTree], errors: &mut Vec<ParseError>) -> Option<Node> {
    let first = items.first()?;
    let last_end = items.last().map(tree_end).unwrap_or(0);

    match first {
        TokenTree::Token(caller) if caller.kind == TokenKind::Word => match items.get(1) {
            None => Some(Node::Word(Word::new(caller.clone()))),
            Some(TokenTree::Group(args)) => {
                let call = build_call(caller.clone(), args, errors);
                if items.len() > 2 {
                    let kind = if is_stray_closer(&items[2]) {
                        ParseErrorKind::UnexpectedClosing
                    } else {
                        ParseErrorKind::InvalidStatement
                    };
                    errors.push(ParseError::new(tree_start(&items[2]), last_end, kind));
                }
                Some(Node::Call(Box::new(call)))
            }
            Some(second) => {
                let kind = if is_stray_closer(second) {
                    ParseErrorKind::UnexpectedClosing
                } else {
                    ParseErrorKind::InvalidStatement
                };
                errors.push(ParseError::new(tree_start(second), last_end, kind));
                // Keep the command word so semantic checks still run on it
                Some(Node::Word(Word::new(caller.clone())))
            }
        },
        TokenTree::Group(stray) => {
            errors.push(ParseError::new(
                stray.opener.start,
                last_end,
                ParseErrorKind::InvalidStatement,
            ));
            let caller = anonymous_caller(stray.opener.start);
            Some(Node::Call(Box::new(build_call(caller, stray, errors))))
        }
        TokenTree::Token(other) => {
            let kind = if is_stray_closer(first) {
                ParseErrorKind::UnexpectedClosing
            } else {
                ParseErrorKind::InvalidStatement
            };
            errors.push(ParseError::new(other.start, last_end, kind));
            None
        }
    }
}

fn anonymous_caller(at: usize) -> Token {
    Token::new("", at, at, TokenKind::Word)
}

fn is_separator(token: &Token) -> bool {
    token.kind == TokenKind::Syntactic && token.text == ","
}

fn is_stray_closer(item: &TokenTree) -> bool {
    matches!(item, TokenTree::Token(t)
        if t.kind == TokenKind::Syntactic && matches!(t.text.as_str(), ")" | "]"))
}

fn is_range_op(item: Option<&TokenTree>) -> bool {
    matches!(item, Some(TokenTree::Token(t)) if t.kind == TokenKind::Operator && t.text == "~")
}

fn build_call(caller: Token, group: &Group, errors: &mut Vec<ParseError>) -> Call {
    match &group.closer {
        None => errors.push(ParseError::new(
            caller.start.min(group.opener.start),
            group.opener.end,
            ParseErrorKind::UnterminatedExpression,
        )),
        Some(closer) => {
            let matches = matches!(
                (group.opener.text.as_str(), closer.text.as_str()),
                ("(", ")") | ("[", "]")
            );
            if !matches {
                errors.push(ParseError::new(
                    closer.start,
                    closer.end,
                    ParseErrorKind::BracketMismatch,
                ));
            }
        }
    }

    let mut args: Vec<ArgSlot> = Vec::new();
    let mut cur = ArgSlot {
        start: group.opener.end,
        end: group.opener.end,
        preceding_separator: None,
        value: None,
    };

    let children = &group.children;
    let mut i = 0;
    while i < children.len() {
        match &children[i] {
            TokenTree::Token(t) if is_separator(t) => {
                if cur.value.is_none() {
                    errors.push(empty_argument(&cur, t));
                }
                cur.end = t.start;
                let opened = ArgSlot {
                    start: t.end,
                    end: t.end,
                    preceding_separator: Some(t.clone()),
                    value: None,
                };
                args.push(std::mem::replace(&mut cur, opened));
            }
            TokenTree::Token(t)
                if t.kind == TokenKind::Word
                    && matches!(children.get(i + 1), Some(TokenTree::Group(_))) =>
            {
                let sub = match &children[i + 1] {
                    TokenTree::Group(g) => g,
                    TokenTree::Token(_) => unreachable!(),
                };
                let call = build_call(t.clone(), sub, errors);
                place(&mut args, &mut cur, Node::Call(Box::new(call)));
                i += 1;
            }
            TokenTree::Token(t)
                if t.kind == TokenKind::Word
                    && is_range_op(children.get(i + 1))
                    && matches!(children.get(i + 2),
                        Some(TokenTree::Token(rhs)) if rhs.kind == TokenKind::Word) =>
            {
                let op = match &children[i + 1] {
                    TokenTree::Token(op) => op.clone(),
                    TokenTree::Group(_) => unreachable!(),
                };
                let rhs = match &children[i + 2] {
                    TokenTree::Token(rhs) => rhs.clone(),
                    TokenTree::Group(_) => unreachable!(),
                };
                let range = RangeExpr {
                    lhs: Word::new(t.clone()),
                    op,
                    rhs: Word::new(rhs),
                };
                place(&mut args, &mut cur, Node::Range(range));
                i += 2;
            }
            TokenTree::Token(t) => {
                place(&mut args, &mut cur, Node::Word(Word::new(t.clone())));
            }
            TokenTree::Group(ownerless) => {
                // No command word owns this group; parse it anyway so its
                // contents stay analyzable
                errors.push(ParseError::new(
                    ownerless.opener.start,
                    ownerless.opener.end,
                    ParseErrorKind::UnexpectedOpening,
                ));
                let caller = anonymous_caller(ownerless.opener.start);
                let call = build_call(caller, ownerless, errors);
                place(&mut args, &mut cur, Node::Call(Box::new(call)));
            }
        }
        i += 1;
    }

    match &group.closer {
        Some(closer) => {
            cur.end = closer.start;
            if cur.value.is_some() {
                args.push(cur);
            } else if !args.is_empty() || cur.preceding_separator.is_some() {
                errors.push(empty_argument(&cur, closer));
                args.push(cur);
            }
            // otherwise a zero-argument call: no slots at all
        }
        None => {
            cur.end = OPEN_END;
            args.push(cur);
        }
    }

    Call {
        caller,
        opener: group.opener.clone(),
        closer: group.closer.clone(),
        args,
    }
}

fn empty_argument(slot: &ArgSlot, boundary: &Token) -> ParseError {
    if slot.start < boundary.start {
        ParseError::new(slot.start, boundary.start, ParseErrorKind::EmptyArgument)
    } else {
        ParseError::new(boundary.start, boundary.end, ParseErrorKind::EmptyArgument)
    }
}

fn place(args: &mut Vec<ArgSlot>, cur: &mut ArgSlot, node: Node) {
    if cur.value.is_some() {
        // A second value without a separator opens a new, non-pre-separated
        // slot (comparison triples rely on this)
        let start = node.start();
        cur.end = start;
        let opened = ArgSlot {
            start,
            end: start,
            preceding_separator: None,
            value: Some(node),
        };
        args.push(std::mem::replace(cur, opened));
    } else {
        cur.value = Some(node);
    }
}
