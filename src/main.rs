// Interactive shell around the core pipeline: prompt for a formula (or a
// DIMACS file), then walk it through prefix conversion, tree building,
// rendering, evaluation, the truth table, and CNF analysis.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use itertools::Itertools;

use proplogic::cnf::analyze_validity;
use proplogic::dimacs::dimacs_to_infix;
use proplogic::errors::Error;
use proplogic::eval::Valuation;
use proplogic::expr::Expr;
use proplogic::prefix::parse_to_prefix;

fn prompt_line<W: Write>(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    out: &mut W,
    text: &str,
) -> Result<String, Error> {
    write!(out, "{text}")?;
    out.flush()?;
    match lines.next() {
        Some(line) => Ok(line?.trim().to_string()),
        None => Err(Error::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed",
        ))),
    }
}

fn ask_yes_no<W: Write>(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    out: &mut W,
    text: &str,
) -> Result<bool, Error> {
    let answer = prompt_line(lines, out, text)?;
    Ok(answer.starts_with('y') || answer.starts_with('Y'))
}

fn prompt_truth_value<W: Write>(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    out: &mut W,
    atom: &str,
) -> Result<bool, Error> {
    loop {
        let answer = prompt_line(
            lines,
            out,
            &format!("Truth value for {atom} (0 = false, 1 = true): "),
        )?;
        match answer.as_str() {
            "0" => return Ok(false),
            "1" => return Ok(true),
            _ => writeln!(out, "Please enter 0 or 1.")?,
        }
    }
}

fn run_session<R: BufRead, W: Write>(input: R, out: &mut W) -> Result<(), Error> {
    let mut lines = input.lines();

    let entered = prompt_line(
        &mut lines,
        out,
        "Enter the infix logical expression (or leave blank to read a DIMACS file): ",
    )?;
    let infix = if entered.is_empty() {
        let path = prompt_line(&mut lines, out, "Path to DIMACS CNF file: ")?;
        let formula = dimacs_to_infix(Path::new(&path))?;
        if formula.is_empty() {
            writeln!(out, "The DIMACS file contained no clauses.")?;
            return Ok(());
        }
        writeln!(out, "Formula from CNF file: {formula}")?;
        formula
    } else {
        entered
    };

    let prefix = parse_to_prefix(&infix);
    writeln!(out, "Prefix form: {}", prefix.iter().join(" "))?;

    // A build failure is terminal; every later stage needs the tree.
    let tree = Expr::from_prefix(&prefix)?;
    writeln!(out, "Infix form: {tree}")?;
    writeln!(out, "Tree height: {}", tree.height())?;

    // Evaluation prompts once per atom, so the assignment handed to the
    // core is always complete.
    let mut val = Valuation::new();
    for atom in tree.atoms() {
        let value = prompt_truth_value(&mut lines, out, &atom)?;
        val.insert(atom, value);
    }
    let result = tree.eval(&val)?;
    writeln!(
        out,
        "The formula evaluates to {}.",
        if result { "TRUE" } else { "FALSE" }
    )?;

    if ask_yes_no(&mut lines, out, "Generate the full truth table? (y/n): ")? {
        tree.print_truthtable(out)?;
    }

    let cnf = tree.to_cnf();
    writeln!(out, "CNF form: {cnf}")?;
    let clauses = cnf.clauses();
    let report = analyze_validity(&clauses);
    writeln!(out, "Tautological clauses: {}", report.tautological)?;
    writeln!(out, "Non-tautological clauses: {}", report.non_tautological)?;
    if report.is_tautology() {
        writeln!(out, "The CNF is valid (every clause is a tautology).")?;
    } else {
        writeln!(out, "The CNF is not valid (some clause is not a tautology).")?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let stdin = io::stdin();
    match run_session(stdin.lock(), &mut io::stdout()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
