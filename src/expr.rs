// Expr AST plus parsing/printing functions that operate on whole trees.

use std::collections::BTreeSet;
use std::fmt;

use crate::errors::Error;
use crate::prefix::parse_to_prefix;
use crate::token::{Op, Token};

// ### Expression AST ###
//
// A formula is either an atom leaf or a connective applied to owned
// subtrees.  Rewrites return new owned trees; nothing is shared or mutated
// in place.
#[derive(Debug, PartialEq, Clone, PartialOrd, Eq, Ord, Hash)]
pub enum Expr {
    Atom(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Imp(Box<Expr>, Box<Expr>),
}

// General builders and utilities.
impl Expr {
    pub fn atom(name: &str) -> Expr {
        Expr::Atom(String::from(name))
    }

    pub fn not(p: Expr) -> Expr {
        Expr::Not(Box::new(p))
    }

    pub fn and(p: Expr, q: Expr) -> Expr {
        Expr::And(Box::new(p), Box::new(q))
    }

    pub fn or(p: Expr, q: Expr) -> Expr {
        Expr::Or(Box::new(p), Box::new(q))
    }

    pub fn imp(p: Expr, q: Expr) -> Expr {
        Expr::Imp(Box::new(p), Box::new(q))
    }

    fn binary(op: Op, p: Expr, q: Expr) -> Expr {
        match op {
            Op::And => Expr::and(p, q),
            Op::Or => Expr::or(p, q),
            Op::Imp => Expr::imp(p, q),
            Op::Not => Expr::not(p),
        }
    }

    /// Build a tree from a prefix token sequence.
    ///
    /// The sequence is scanned from the last token to the first with a stack
    /// of subtrees: an atom pushes a leaf, `~` pops one operand, a binary
    /// operator pops two (first pop is the left child).  Exactly one tree
    /// must remain at the end; anything else is `Error::TreeNotBuilt`.
    pub fn from_prefix(prefix: &[Token]) -> Result<Expr, Error> {
        let mut stack: Vec<Expr> = Vec::new();
        for token in prefix.iter().rev() {
            match token {
                Token::Atom(name) => stack.push(Expr::atom(name)),
                Token::Op(Op::Not) => {
                    let p = stack.pop().ok_or(Error::TreeNotBuilt)?;
                    stack.push(Expr::not(p));
                }
                Token::Op(op) => {
                    let left = stack.pop().ok_or(Error::TreeNotBuilt)?;
                    let right = stack.pop().ok_or(Error::TreeNotBuilt)?;
                    stack.push(Expr::binary(*op, left, right));
                }
                // Parentheses never survive prefix conversion.
                Token::LParen | Token::RParen => return Err(Error::TreeNotBuilt),
            }
        }
        match (stack.pop(), stack.pop()) {
            (Some(root), None) => Ok(root),
            _ => Err(Error::TreeNotBuilt),
        }
    }

    /// Lex, convert to prefix, and build the tree in one step.
    pub fn parse(input: &str) -> Result<Expr, Error> {
        Expr::from_prefix(&parse_to_prefix(input))
    }

    /// Render as fully parenthesized infix text.
    ///
    /// Every subexpression is bracketed, so the output is unambiguous
    /// without reference to precedence.  It need not match the input's own
    /// parenthesization.
    pub fn to_infix(&self) -> String {
        match self {
            Expr::Atom(name) => name.clone(),
            Expr::Not(p) => format!("(~{})", p.to_infix()),
            Expr::And(p, q) => format!("({} {} {})", p.to_infix(), Op::And, q.to_infix()),
            Expr::Or(p, q) => format!("({} {} {})", p.to_infix(), Op::Or, q.to_infix()),
            Expr::Imp(p, q) => format!("({} {} {})", p.to_infix(), Op::Imp, q.to_infix()),
        }
    }

    /// Length of the longest root-to-leaf path; a leaf has height 1.
    pub fn height(&self) -> usize {
        match self {
            Expr::Atom(_) => 1,
            Expr::Not(p) => 1 + p.height(),
            Expr::And(p, q) | Expr::Or(p, q) | Expr::Imp(p, q) => {
                1 + p.height().max(q.height())
            }
        }
    }

    /// The sorted set of distinct atom names occurring in the tree.
    pub fn atoms(&self) -> BTreeSet<String> {
        fn collect(expr: &Expr, atoms: &mut BTreeSet<String>) {
            match expr {
                Expr::Atom(name) => {
                    atoms.insert(name.clone());
                }
                Expr::Not(p) => collect(p, atoms),
                Expr::And(p, q) | Expr::Or(p, q) | Expr::Imp(p, q) => {
                    collect(p, atoms);
                    collect(q, atoms);
                }
            }
        }
        let mut atoms = BTreeSet::new();
        collect(self, &mut atoms);
        atoms
    }

    pub fn negative(&self) -> bool {
        matches!(self, Expr::Not(_))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_infix())
    }
}
