pub mod cnf;
pub mod dimacs;
pub mod errors;
pub mod eval;
pub mod expr;
pub mod prefix;
pub mod token;
