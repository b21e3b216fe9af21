// DIMACS CNF file ingestion.
//
// The reader hands the core a single infix string of the form
// `(lit + lit + ...) * (lit + lit + ...) * ...`, which re-enters the
// pipeline through the ordinary parser.

use std::fs;
use std::path::Path;

use itertools::Itertools;
use log::{debug, warn};
use regex::Regex;

use crate::errors::Error;

/// Read a DIMACS CNF file and render it as one infix formula string.
///
/// Comment (`c`) and blank lines are skipped.  The `p cnf <vars> <clauses>`
/// problem line is checked against the clauses actually read; a mismatch is
/// only logged, since the clause lines themselves are authoritative here.
/// Positive integer k becomes atom `xk`, negative -k becomes `~xk`; each
/// line is a `+`-joined clause and clauses are joined with `*`.
pub fn dimacs_to_infix(path: &Path) -> Result<String, Error> {
    let contents = fs::read_to_string(path)?;
    parse_dimacs(&contents)
}

fn parse_dimacs(contents: &str) -> Result<String, Error> {
    let problem_line = Regex::new(r"^p\s+cnf\s+(\d+)\s+(\d+)\s*$").unwrap();

    let mut declared_clauses: Option<usize> = None;
    let mut rendered: Vec<String> = Vec::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        if line.starts_with('p') {
            match problem_line.captures(line) {
                Some(caps) => {
                    declared_clauses = caps[2].parse().ok();
                    debug!("problem line declares {declared_clauses:?} clauses");
                }
                None => warn!("malformed problem line {line:?}"),
            }
            continue;
        }

        let mut literals: Vec<String> = Vec::new();
        for word in line.split_whitespace() {
            // As in the usual DIMACS convention, 0 terminates the clause;
            // an unparsable token ends the line early.
            let lit: i64 = match word.parse() {
                Ok(lit) => lit,
                Err(_) => break,
            };
            if lit == 0 {
                break;
            }
            if lit < 0 {
                literals.push(format!("~x{}", -lit));
            } else {
                literals.push(format!("x{lit}"));
            }
        }
        if literals.is_empty() {
            warn!("skipping clause line with no literals: {line:?}");
            continue;
        }
        rendered.push(format!("({})", literals.iter().join(" + ")));
    }

    if let Some(declared) = declared_clauses {
        if declared != rendered.len() {
            warn!(
                "problem line declares {declared} clauses but {} were read",
                rendered.len()
            );
        }
    }

    Ok(rendered.iter().join(" * "))
}

#[cfg(test)]
mod dimacs_tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn two_clause_file() {
        init();
        let contents = "c a comment\np cnf 2 2\n1 -2 0\n2 0\n";
        let result = parse_dimacs(contents).unwrap();
        assert_eq!(result, "(x1 + ~x2) * (x2)");
    }

    #[test]
    fn single_clause_has_no_conjunction() {
        init();
        let result = parse_dimacs("1 2 3 0\n").unwrap();
        assert_eq!(result, "(x1 + x2 + x3)");
    }

    #[test]
    fn comments_blanks_and_header_are_skipped() {
        init();
        let contents = "c top\n\np cnf 1 1\nc inner\n-1 0\n";
        let result = parse_dimacs(contents).unwrap();
        assert_eq!(result, "(~x1)");
    }

    #[test]
    fn empty_clause_lines_are_dropped() {
        init();
        let result = parse_dimacs("0\n1 0\n").unwrap();
        assert_eq!(result, "(x1)");
    }

    #[test]
    fn dimacs_output_reenters_the_pipeline() {
        init();
        use crate::cnf::analyze_validity;
        use crate::expr::Expr;

        let infix = parse_dimacs("1 -2 0\n2 0\n").unwrap();
        let cnf = Expr::parse(&infix).unwrap().to_cnf();
        let clauses = cnf.clauses();
        assert_eq!(clauses.len(), 2);
        let report = analyze_validity(&clauses);
        assert_eq!(report.tautological, 0);
        assert_eq!(report.non_tautological, 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        init();
        let result = dimacs_to_infix(Path::new("no/such/file.cnf"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
