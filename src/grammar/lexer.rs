use logos::{Lexer, Logos};

use super::{Token, TokenKind};

/// Raw token classes for one line of script.
///
/// `REM` comments are closed over the rest of the line inside the callback,
/// so the scanner halts on them naturally. Anything the lexer cannot place
/// falls out as an error and is re-emitted as single-character syntactic
/// tokens by [`tokenize`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f]+")]
enum LineToken {
    // Complete comparison / range operators
    #[token(">=")]
    #[token("<=")]
    #[token("==")]
    #[token("!=")]
    #[token(">")]
    #[token("<")]
    #[token("~")]
    Operator,

    // A bare `=` or `!` is the start of an operator the author never finished
    #[token("=")]
    #[token("!")]
    IncompleteOperator,

    #[token("(")]
    #[token(")")]
    #[token("[")]
    #[token("]")]
    #[token(",")]
    Syntactic,

    #[regex(r#""[^"]*""#)]
    Str,

    // An opening quote with no closing one runs to end of line
    #[regex(r#""[^"]*"#)]
    IncompleteStr,

    // A word starting with the comment keyword swallows the rest of the line
    #[regex(r"[Rr][Ee][Mm][-0-9A-Za-z_]*", consume_rest, priority = 10)]
    Comment,

    #[regex(r"[-0-9A-Za-z_]+", priority = 3)]
    Word,
}

fn consume_rest(lex: &mut Lexer<LineToken>) {
    let rest = lex.remainder().len();
    lex.bump(rest);
}

impl From<LineToken> for TokenKind {
    fn from(raw: LineToken) -> Self {
        match raw {
            LineToken::Operator => TokenKind::Operator,
            LineToken::IncompleteOperator => TokenKind::IncompleteOperator,
            LineToken::Syntactic => TokenKind::Syntactic,
            LineToken::Str => TokenKind::Str,
            LineToken::IncompleteStr => TokenKind::IncompleteStr,
            LineToken::Comment => TokenKind::Comment,
            LineToken::Word => TokenKind::Word,
        }
    }
}

/// Tokenize one line of script. Pure; never fails. Unknown characters come
/// back as single-character [`TokenKind::Syntactic`] tokens.
pub fn tokenize(line: &str) -> Vec<Token> {
    let mut lex = LineToken::lexer(line);
    let mut tokens = Vec::new();

    while let Some(result) = lex.next() {
        let span = lex.span();
        let slice = lex.slice();

        match result {
            Ok(raw) => tokens.push(Token::new(slice, span.start, span.end, raw.into())),
            Err(()) => {
                // Re-emit the unmatched run one character at a time
                let mut pos = span.start;
                for ch in slice.chars() {
                    let len = ch.len_utf8();
                    tokens.push(Token::new(
                        ch.to_string(),
                        pos,
                        pos + len,
                        TokenKind::Syntactic,
                    ));
                    pos += len;
                }
            }
        }
    }

    tokens
}
