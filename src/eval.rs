// ### Evaluation and truth tables ###

use std::cmp;
use std::collections::BTreeMap;
use std::io::Write;

use crate::errors::Error;
use crate::expr::Expr;

// We use a BTreeMap so that iteration is ordered by atom name.
pub type Valuation = BTreeMap<String, bool>;

/// One row per assignment: the per-atom values (in sorted atom order)
/// paired with the evaluated result.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TruthTable {
    pub atoms: Vec<String>,
    pub rows: Vec<(Vec<bool>, bool)>,
}

impl Expr {
    /// Evaluate the tree under `val`, which must assign every atom that
    /// occurs in it.
    pub fn eval(&self, val: &Valuation) -> Result<bool, Error> {
        match self {
            Expr::Atom(name) => val
                .get(name)
                .copied()
                .ok_or_else(|| Error::UndefinedAtom(name.clone())),
            Expr::Not(p) => Ok(!p.eval(val)?),
            Expr::And(p, q) => Ok(p.eval(val)? && q.eval(val)?),
            Expr::Or(p, q) => Ok(p.eval(val)? || q.eval(val)?),
            Expr::Imp(p, q) => Ok(!p.eval(val)? || q.eval(val)?),
        }
    }

    /// Enumerate all 2^n assignments over the tree's atoms and evaluate
    /// each.
    ///
    /// Row i assigns atom j the value of bit (n - 1 - j) of i, so row 0 is
    /// all-false and the first atom is the most significant bit.  A tree
    /// with no atoms yields no rows.
    ///
    /// WARNING: running time/space is Theta(exp(|atoms|)).
    pub fn truth_table(&self) -> Result<TruthTable, Error> {
        let atoms: Vec<String> = self.atoms().into_iter().collect();
        let n = atoms.len();
        let mut rows = Vec::new();
        if n > 0 {
            for i in 0..(1usize << n) {
                let mut val = Valuation::new();
                let mut inputs = Vec::with_capacity(n);
                for (j, atom) in atoms.iter().enumerate() {
                    let value = (i >> (n - 1 - j)) & 1 == 1;
                    val.insert(atom.clone(), value);
                    inputs.push(value);
                }
                rows.push((inputs, self.eval(&val)?));
            }
        }
        Ok(TruthTable { atoms, rows })
    }

    /// Render the full truth table to `dest`.
    pub fn print_truthtable(&self, dest: &mut impl Write) -> Result<(), Error> {
        let table = self.truth_table()?;
        let column_width = 1 + cmp::max(
            5,
            table.atoms.iter().map(|name| name.len()).max().unwrap_or(0),
        );
        // Pad `s` with enough spaces to be `column_width`.
        let pad = |s: &str| format!("{s:<column_width$}");
        let truth_string = |value: bool| if value { "true" } else { "false" };

        let header_lhs: String = table.atoms.iter().map(|name| pad(name)).collect();
        let header = format!("{header_lhs}| formula");
        let separator: String = "-".repeat(header.len());
        writeln!(dest, "{header}")?;
        writeln!(dest, "{separator}")?;
        for (inputs, result) in &table.rows {
            let input_string: String = inputs
                .iter()
                .map(|&value| pad(truth_string(value)))
                .collect();
            writeln!(dest, "{}| {}", input_string, truth_string(*result))?;
        }
        writeln!(dest, "{separator}")?;
        Ok(())
    }
}

#[cfg(test)]
mod eval_tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn val_of(pairs: &[(&str, bool)]) -> Valuation {
        pairs
            .iter()
            .map(|(name, value)| (String::from(*name), *value))
            .collect()
    }

    #[test]
    fn test_eval_connectives() {
        init();
        let val = val_of(&[("a", true), ("b", false)]);

        let cases = [
            ("a", true),
            ("b", false),
            ("~a", false),
            ("~b", true),
            ("a * a", true),
            ("a * b", false),
            ("b * a", false),
            ("b * b", false),
            ("a + a", true),
            ("a + b", true),
            ("b + a", true),
            ("b + b", false),
            ("a > a", true),
            ("a > b", false),
            ("b > a", true),
            ("b > b", true),
        ];
        for (input, desired) in cases {
            let expr = Expr::parse(input).unwrap();
            assert_eq!(expr.eval(&val).unwrap(), desired, "input {input:?}");
        }
    }

    #[test]
    fn implication_false_only_when_antecedent_holds() {
        init();
        let expr = Expr::parse("p > q").unwrap();
        for p in [false, true] {
            for q in [false, true] {
                let val = val_of(&[("p", p), ("q", q)]);
                assert_eq!(expr.eval(&val).unwrap(), !(p && !q));
            }
        }
    }

    #[test]
    fn eval_missing_atom_fails() {
        init();
        let expr = Expr::parse("p * q").unwrap();
        let val = val_of(&[("p", true)]);
        let result = expr.eval(&val);
        assert!(matches!(result, Err(Error::UndefinedAtom(name)) if name == "q"));
    }

    #[test]
    fn truth_table_shape() {
        init();
        let expr = Expr::parse("a * b > c").unwrap();
        let table = expr.truth_table().unwrap();
        assert_eq!(table.atoms, vec!["a", "b", "c"]);
        assert_eq!(table.rows.len(), 8);
        // Assignments are pairwise distinct.
        let mut inputs: Vec<Vec<bool>> =
            table.rows.iter().map(|(inputs, _)| inputs.clone()).collect();
        inputs.dedup();
        assert_eq!(inputs.len(), 8);
        // Row 0 is all-false, last row all-true.
        assert_eq!(table.rows[0].0, vec![false, false, false]);
        assert_eq!(table.rows[7].0, vec![true, true, true]);
    }

    #[test]
    fn truth_table_rows_follow_bit_order() {
        init();
        let expr = Expr::parse("p * q").unwrap();
        let table = expr.truth_table().unwrap();
        let desired = vec![
            (vec![false, false], false),
            (vec![false, true], false),
            (vec![true, false], false),
            (vec![true, true], true),
        ];
        assert_eq!(table.rows, desired);
    }

    #[test]
    fn truth_table_single_atom() {
        init();
        let expr = Expr::parse("p").unwrap();
        let table = expr.truth_table().unwrap();
        assert_eq!(table.rows, vec![(vec![false], false), (vec![true], true)]);
    }

    #[test]
    fn test_print_truthtable() {
        init();
        let expr = Expr::parse("p > q").unwrap();
        let mut output = Vec::new();
        expr.print_truthtable(&mut output).unwrap();
        let output = String::from_utf8(output).expect("Not UTF-8");
        let desired = "\
p     q     | formula
---------------------
false false | true
false true  | true
true  false | false
true  true  | true
---------------------
";
        assert_eq!(output, desired);
    }
}
