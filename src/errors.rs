// Crate-wide error type.

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum Error {
    /// The prefix token sequence did not resolve to exactly one tree.
    TreeNotBuilt,
    /// Evaluation looked up an atom missing from the valuation.
    UndefinedAtom(String),
    /// A source file (DIMACS input) could not be read.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::TreeNotBuilt => write!(f, "tree could not be built"),
            Error::UndefinedAtom(name) => {
                write!(f, "atom '{name}' is not defined in the valuation")
            }
            Error::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}
