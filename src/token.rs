// ### Token constants and lexing library. ###

use std::fmt;

/// The four connectives of the formula language.
///
/// Operator identity is a closed enum rather than a character so that the
/// evaluator and the CNF passes get compiler-checked exhaustiveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Op {
    Not,
    And,
    Or,
    Imp,
}

impl Op {
    pub fn symbol(self) -> char {
        match self {
            Op::Not => '~',
            Op::And => '*',
            Op::Or => '+',
            Op::Imp => '>',
        }
    }

    // Precedence (highest to lowest): ~ > * > + > '>'.
    pub fn precedence(self) -> u32 {
        match self {
            Op::Not => 3,
            Op::And => 2,
            Op::Or => 1,
            Op::Imp => 0,
        }
    }

    pub fn from_char(c: char) -> Option<Op> {
        match c {
            '~' => Some(Op::Not),
            '*' => Some(Op::And),
            '+' => Some(Op::Or),
            '>' => Some(Op::Imp),
            _ => None,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One lexical unit of an infix expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Atom(String),
    Op(Op),
    LParen,
    RParen,
}

impl Token {
    pub fn atom(name: &str) -> Token {
        Token::Atom(String::from(name))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Atom(name) => write!(f, "{name}"),
            Token::Op(op) => write!(f, "{op}"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

fn is_atom_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Split `input` into atoms, operators, and parentheses.
///
/// Whitespace separates tokens and is otherwise ignored.  A maximal run of
/// alphanumeric/underscore characters is one atom.  Any other character is a
/// single-character token; an unrecognized symbol is passed through as a
/// one-character atom and left for the tree builder to reject.
pub fn lex(input: &str) -> Vec<Token> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if is_atom_char(c) {
            let start = i;
            while i < chars.len() && is_atom_char(chars[i]) {
                i += 1;
            }
            tokens.push(Token::Atom(chars[start..i].iter().collect()));
        } else if c == '(' {
            tokens.push(Token::LParen);
            i += 1;
        } else if c == ')' {
            tokens.push(Token::RParen);
            i += 1;
        } else if let Some(op) = Op::from_char(c) {
            tokens.push(Token::Op(op));
            i += 1;
        } else {
            tokens.push(Token::Atom(c.to_string()));
            i += 1;
        }
    }
    tokens
}

#[cfg(test)]
mod lex_tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn simple_lex() {
        init();
        let input = "p > q";
        let result = lex(input);
        let desired = vec![Token::atom("p"), Token::Op(Op::Imp), Token::atom("q")];
        assert_eq!(result, desired);
    }

    #[test]
    fn less_simple_lex() {
        init();
        let input = "((p1 * ~q_2) + cab)";
        let result = lex(input);
        let desired = vec![
            Token::LParen,
            Token::LParen,
            Token::atom("p1"),
            Token::Op(Op::And),
            Token::Op(Op::Not),
            Token::atom("q_2"),
            Token::RParen,
            Token::Op(Op::Or),
            Token::atom("cab"),
            Token::RParen,
        ];
        assert_eq!(result, desired);
    }

    #[test]
    fn lex_skips_whitespace_runs() {
        init();
        let result = lex("  p\t+\n  q ");
        let desired = vec![Token::atom("p"), Token::Op(Op::Or), Token::atom("q")];
        assert_eq!(result, desired);
    }

    #[test]
    fn lex_no_whitespace_needed() {
        init();
        let result = lex("~p*q");
        let desired = vec![
            Token::Op(Op::Not),
            Token::atom("p"),
            Token::Op(Op::And),
            Token::atom("q"),
        ];
        assert_eq!(result, desired);
    }

    #[test]
    fn lex_passes_stray_symbols_through() {
        // No validation here; "$" survives as a one-character atom and the
        // tree builder later rejects the expression.
        init();
        let result = lex("p $ q");
        let desired = vec![Token::atom("p"), Token::atom("$"), Token::atom("q")];
        assert_eq!(result, desired);
    }

    #[test]
    fn precedence_order() {
        assert!(Op::Not.precedence() > Op::And.precedence());
        assert!(Op::And.precedence() > Op::Or.precedence());
        assert!(Op::Or.precedence() > Op::Imp.precedence());
    }
}
