// ### CNF conversion and clause-level tautology analysis ###

use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;
use log::debug;

use crate::expr::Expr;

impl Expr {
    /// Pass 1: rewrite every `A > B` into `(~A) + B`, bottom-up, so nested
    /// implications are fully eliminated.
    pub fn eliminate_implications(self) -> Expr {
        match self {
            Expr::Atom(_) => self,
            Expr::Not(p) => Expr::not(p.eliminate_implications()),
            Expr::And(p, q) => {
                Expr::and(p.eliminate_implications(), q.eliminate_implications())
            }
            Expr::Or(p, q) => Expr::or(p.eliminate_implications(), q.eliminate_implications()),
            Expr::Imp(p, q) => Expr::or(
                Expr::not(p.eliminate_implications()),
                q.eliminate_implications(),
            ),
        }
    }

    /// Pass 2: push negations inward (negation normal form).
    ///
    /// `~~A` becomes A, De Morgan turns `~(A + B)` into `(~A) * (~B)` and
    /// `~(A * B)` into `(~A) + (~B)`; negation directly over an atom stays.
    /// Afterward every `~` node has an atom child.
    pub fn to_nnf(self) -> Expr {
        match self {
            Expr::Not(p) => match *p {
                Expr::Not(q) => q.to_nnf(),
                Expr::Or(a, b) => {
                    Expr::and(Expr::not(*a).to_nnf(), Expr::not(*b).to_nnf())
                }
                Expr::And(a, b) => {
                    Expr::or(Expr::not(*a).to_nnf(), Expr::not(*b).to_nnf())
                }
                // Negation over an atom (or anything else irreducible).
                other => Expr::not(other),
            },
            Expr::And(p, q) => Expr::and(p.to_nnf(), q.to_nnf()),
            Expr::Or(p, q) => Expr::or(p.to_nnf(), q.to_nnf()),
            Expr::Imp(p, q) => Expr::imp(p.to_nnf(), q.to_nnf()),
            Expr::Atom(_) => self,
        }
    }

    /// Pass 3: distribute OR over AND, bottom-up.
    ///
    /// For `A + B`: an AND on the left rewrites first, `(A1 * A2) + B` to
    /// `(A1 + B) * (A2 + B)`; otherwise an AND on the right, `A + (B1 * B2)`
    /// to `(A + B1) * (A + B2)`.  The fresh OR children are distributed
    /// recursively.
    pub fn distribute_or_over_and(self) -> Expr {
        match self {
            Expr::Or(p, q) => {
                let p = p.distribute_or_over_and();
                let q = q.distribute_or_over_and();
                match (p, q) {
                    (Expr::And(a1, a2), q) => Expr::and(
                        Expr::or(*a1, q.clone()).distribute_or_over_and(),
                        Expr::or(*a2, q).distribute_or_over_and(),
                    ),
                    (p, Expr::And(b1, b2)) => Expr::and(
                        Expr::or(p.clone(), *b1).distribute_or_over_and(),
                        Expr::or(p, *b2).distribute_or_over_and(),
                    ),
                    (p, q) => Expr::or(p, q),
                }
            }
            Expr::And(p, q) => Expr::and(
                p.distribute_or_over_and(),
                q.distribute_or_over_and(),
            ),
            Expr::Not(p) => Expr::not(p.distribute_or_over_and()),
            other => other,
        }
    }

    /// Convert to conjunctive normal form: implication elimination, then
    /// negation normal form, then distribution.
    pub fn to_cnf(self) -> Expr {
        let cnf = self
            .eliminate_implications()
            .to_nnf()
            .distribute_or_over_and();
        debug!("to_cnf produced {cnf}");
        cnf
    }

    /// Split a CNF tree into clauses: AND nodes separate clauses, any other
    /// subtree is one clause.
    ///
    /// The receiver must already be in CNF (see [`Expr::to_cnf`]); a `~`
    /// node over a non-atom makes the literal walk panic.
    pub fn clauses(&self) -> Vec<Clause> {
        let mut clauses = Vec::new();
        self.collect_clauses(&mut clauses);
        clauses
    }

    fn collect_clauses(&self, clauses: &mut Vec<Clause>) {
        match self {
            Expr::And(p, q) => {
                p.collect_clauses(clauses);
                q.collect_clauses(clauses);
            }
            _ => {
                let mut literals = Vec::new();
                self.collect_literals(&mut literals);
                clauses.push(Clause { literals });
            }
        }
    }

    // Walk an OR-chain emitting one literal per leaf, in traversal order.
    fn collect_literals(&self, literals: &mut Vec<Literal>) {
        match self {
            Expr::Or(p, q) => {
                p.collect_literals(literals);
                q.collect_literals(literals);
            }
            Expr::Not(p) => match &**p {
                Expr::Atom(name) => literals.push(Literal::negative(name)),
                other => panic!("Expected negation over an atom, received {other:?}."),
            },
            Expr::Atom(name) => literals.push(Literal::positive(name)),
            other => panic!("Expected a disjunction of literals, received {other:?}."),
        }
    }
}

/// An atom or its negation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    pub name: String,
    pub negated: bool,
}

impl Literal {
    pub fn positive(name: &str) -> Literal {
        Literal {
            name: String::from(name),
            negated: false,
        }
    }

    pub fn negative(name: &str) -> Literal {
        Literal {
            name: String::from(name),
            negated: true,
        }
    }

    pub fn negate(&self) -> Literal {
        Literal {
            name: self.name.clone(),
            negated: !self.negated,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.negated {
            write!(f, "~{}", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// A disjunction of literals, in tree-traversal order.  Duplicates are
/// permitted and preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub literals: Vec<Literal>,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Clause {
        Clause { literals }
    }

    /// A clause is tautological as soon as some literal's negation has
    /// already occurred.  Duplicate literals alone never trigger this.
    pub fn is_tautology(&self) -> bool {
        let mut seen: BTreeSet<&Literal> = BTreeSet::new();
        for literal in &self.literals {
            if seen.contains(&literal.negate()) {
                return true;
            }
            seen.insert(literal);
        }
        false
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.literals.iter().join(" + "))
    }
}

/// Per-clause tautology counts for a CNF formula.
///
/// The formula is a tautology exactly when every clause individually is;
/// the empty clause list is vacuously one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityReport {
    pub tautological: usize,
    pub non_tautological: usize,
}

impl ValidityReport {
    pub fn is_tautology(&self) -> bool {
        self.non_tautological == 0
    }
}

pub fn analyze_validity(clauses: &[Clause]) -> ValidityReport {
    let mut report = ValidityReport {
        tautological: 0,
        non_tautological: 0,
    };
    for clause in clauses {
        if clause.is_tautology() {
            report.tautological += 1;
        } else {
            report.non_tautological += 1;
        }
    }
    report
}
