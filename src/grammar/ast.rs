use super::{Token, OPEN_END};

/// A bare literal value: either a command standing in for its return value
/// or a plain literal. Descriptor lookup happens by uppercased text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub token: Token,
}

impl Word {
    pub fn new(token: Token) -> Self {
        Self { token }
    }

    /// Canonical (uppercased) spelling used for registry lookups.
    pub fn name(&self) -> String {
        self.token.upper()
    }

    pub fn start(&self) -> usize {
        self.token.start
    }

    pub fn end(&self) -> usize {
        self.token.end
    }
}

/// `A~B`: a consecutive-value range, legal only in numeric argument
/// positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeExpr {
    pub lhs: Word,
    pub op: Token,
    pub rhs: Word,
}

impl RangeExpr {
    pub fn start(&self) -> usize {
        self.lhs.start()
    }

    pub fn end(&self) -> usize {
        self.rhs.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Word(Word),
    Call(Box<Call>),
    Range(RangeExpr),
}

impl Node {
    pub fn start(&self) -> usize {
        match self {
            Node::Word(w) => w.start(),
            Node::Call(c) => c.start(),
            Node::Range(r) => r.start(),
        }
    }

    pub fn end(&self) -> usize {
        match self {
            Node::Word(w) => w.end(),
            Node::Call(c) => c.end(),
            Node::Range(r) => r.end(),
        }
    }
}

/// One argument position of a call. `value` is absent for an empty argument;
/// `preceding_separator` records the comma that opened this slot, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSlot {
    pub start: usize,
    pub end: usize,
    pub preceding_separator: Option<Token>,
    pub value: Option<Node>,
}

impl ArgSlot {
    pub fn contains(&self, column: usize) -> bool {
        self.start <= column && (self.end == OPEN_END || column <= self.end)
    }
}

/// One command call: caller word plus a bracketed, slotted argument list.
/// A recovery call produced for an ownerless group has an empty caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub caller: Token,
    pub opener: Token,
    pub closer: Option<Token>,
    pub args: Vec<ArgSlot>,
}

impl Call {
    /// Canonical (uppercased) command name; empty for recovery calls.
    pub fn name(&self) -> String {
        self.caller.upper()
    }

    pub fn is_anonymous(&self) -> bool {
        self.caller.text.is_empty()
    }

    pub fn start(&self) -> usize {
        self.caller.start
    }

    pub fn end(&self) -> usize {
        match &self.closer {
            Some(closer) => closer.end,
            None => OPEN_END,
        }
    }

    /// Index of the argument slot under the given column, if the column is
    /// inside the argument region at all.
    pub fn slot_at(&self, column: usize) -> Option<usize> {
        if column < self.opener.end {
            return None;
        }
        if let Some(closer) = &self.closer {
            if column > closer.start {
                return None;
            }
        }
        self.args.iter().position(|slot| slot.contains(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::parse_line;

    fn call(line: &str) -> Call {
        match parse_line(line).root {
            Some(Node::Call(c)) => *c,
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn slot_lookup_honors_the_bracket_bounds() {
        let c = call("SET_FLAG(PLAYER0,FLAG3,1)");
        assert_eq!(c.slot_at(8), None, "still on the opener");
        assert_eq!(c.slot_at(9), Some(0));
        assert_eq!(c.slot_at(17), Some(1));
        assert_eq!(c.slot_at(24), Some(2), "closer column maps to the last slot");
        assert_eq!(c.slot_at(25), None, "past the closer");
    }

    #[test]
    fn open_call_extends_to_the_end_of_the_line() {
        let c = call("SET_FLAG(PLAYER0,");
        assert_eq!(c.end(), OPEN_END);
        assert_eq!(c.slot_at(999), Some(1));
        assert!(c.args[1].contains(999));
    }

    #[test]
    fn names_are_canonicalized_to_upper_case() {
        let parsed = parse_line("win_game");
        match parsed.root {
            Some(Node::Word(w)) => {
                assert_eq!(w.name(), "WIN_GAME");
                assert_eq!(w.token.text, "win_game");
            }
            other => panic!("expected word, got {other:?}"),
        }
        assert_eq!(call("set_flag(PLAYER0,FLAG0,1)").name(), "SET_FLAG");
    }

    #[test]
    fn range_spans_both_operands() {
        let c = call("RANDOM(1~5)");
        match c.args[0].value.as_ref() {
            Some(node @ Node::Range(r)) => {
                assert_eq!(r.start(), 7);
                assert_eq!(r.end(), 10);
                assert_eq!(node.start(), r.start());
                assert_eq!(node.end(), r.end());
            }
            other => panic!("expected range, got {other:?}"),
        }
    }

    #[test]
    fn nested_call_node_spans_caller_to_closer() {
        let c = call("SET_FLAG(PLAYER0,FLAG3,RANDOM(1,3))");
        let node = c.args[2].value.as_ref().unwrap();
        assert_eq!(node.start(), 23);
        assert_eq!(node.end(), 34);
    }

    #[test]
    fn recovery_call_is_anonymous() {
        let parsed = parse_line("SET_FLAG(PLAYER0,(1),2)");
        let c = match parsed.root {
            Some(Node::Call(c)) => *c,
            other => panic!("{other:?}"),
        };
        match c.args[1].value.as_ref() {
            Some(Node::Call(anon)) => {
                assert!(anon.is_anonymous());
                assert_eq!(anon.name(), "");
            }
            other => panic!("expected recovery call, got {other:?}"),
        }
    }
}
