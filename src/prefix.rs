// Infix to prefix (Polish notation) conversion.

use log::debug;

use crate::token::{lex, Op, Token};

/// Reorder an infix token sequence into prefix order.
///
/// The sequence is reversed with `(`/`)` swapped, run through a
/// shunting-yard pass as if producing postfix, and the output reversed.
/// On the reversed stream, popping only on strictly greater precedence
/// leaves same-precedence operators stacked, which groups chains left in
/// the original order; that is what `~`/`*`/`+` need.  An implication
/// chain must group right, so `>` additionally pops on equal precedence.
///
/// Unbalanced parentheses are tolerated: a close with no matching open is a
/// no-op, and opens still on the stack at the end are dropped.
pub fn infix_to_prefix(tokens: &[Token]) -> Vec<Token> {
    let reversed = tokens.iter().rev().map(|t| match t {
        Token::LParen => Token::RParen,
        Token::RParen => Token::LParen,
        _ => t.clone(),
    });

    let mut ops: Vec<Token> = Vec::new();
    let mut output: Vec<Token> = Vec::new();

    for token in reversed {
        match token {
            Token::Atom(_) => output.push(token),
            Token::LParen => ops.push(token),
            Token::RParen => {
                while let Some(top) = ops.pop() {
                    if top == Token::LParen {
                        break;
                    }
                    output.push(top);
                }
            }
            Token::Op(op) => {
                let pops = |top: Op| {
                    top.precedence() > op.precedence()
                        || (top.precedence() == op.precedence() && op == Op::Imp)
                };
                while matches!(ops.last(), Some(Token::Op(top)) if pops(*top)) {
                    if let Some(top) = ops.pop() {
                        output.push(top);
                    }
                }
                ops.push(token);
            }
        }
    }
    // Stray opening parens (closers in the original order) are dropped here.
    while let Some(top) = ops.pop() {
        if top != Token::LParen {
            output.push(top);
        }
    }

    output.reverse();
    debug!("infix_to_prefix produced {output:?}");
    output
}

/// Lex `input` and convert the result to prefix order.
pub fn parse_to_prefix(input: &str) -> Vec<Token> {
    infix_to_prefix(&lex(input))
}
