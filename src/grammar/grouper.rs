use super::{Token, TokenKind};

/// One bracketed span. The closer is recorded even when its bracket kind
/// does not match the opener; the expression builder reports the mismatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub opener: Token,
    pub closer: Option<Token>,
    pub children: Vec<TokenTree>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenTree {
    Token(Token),
    Group(Group),
}

/// A line's tokens with bracketed spans nested into groups and the trailing
/// comment pulled aside.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupedLine {
    pub items: Vec<TokenTree>,
    pub comment: Option<Token>,
}

fn is_opener(token: &Token) -> bool {
    token.kind == TokenKind::Syntactic && matches!(token.text.as_str(), "(" | "[")
}

fn is_closer(token: &Token) -> bool {
    token.kind == TokenKind::Syntactic && matches!(token.text.as_str(), ")" | "]")
}

fn attach(root: &mut Vec<TokenTree>, stack: &mut [Group], item: TokenTree) {
    match stack.last_mut() {
        Some(open) => open.children.push(item),
        None => root.push(item),
    }
}

/// Nest bracketed spans into [`Group`]s. Pure; which command owns which
/// group is decided later by the expression builder.
pub fn group(mut tokens: Vec<Token>) -> GroupedLine {
    let comment = match tokens.last() {
        Some(last) if last.kind == TokenKind::Comment => tokens.pop(),
        _ => None,
    };

    let mut items = Vec::new();
    let mut stack: Vec<Group> = Vec::new();

    for token in tokens {
        if is_opener(&token) {
            stack.push(Group {
                opener: token,
                closer: None,
                children: Vec::new(),
            });
        } else if is_closer(&token) {
            match stack.pop() {
                Some(mut open) => {
                    open.closer = Some(token);
                    attach(&mut items, &mut stack, TokenTree::Group(open));
                }
                // Stray closer; the builder reports it
                None => attach(&mut items, &mut stack, TokenTree::Token(token)),
            }
        } else {
            attach(&mut items, &mut stack, TokenTree::Token(token));
        }
    }

    // Whatever is still open at end of line stays closer-less
    while let Some(open) = stack.pop() {
        attach(&mut items, &mut stack, TokenTree::Group(open));
    }

    GroupedLine { items, comment }
}
