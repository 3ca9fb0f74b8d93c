use itertools::{Itertools, PeekingNext};

use super::{CompileErrorType, Result};

#[derive(PartialEq, Debug)]
pub enum Token {
    Nonterminal(String),
    Terminal(char),
}

// `S`, `E1`, or `[number1]`
pub fn is_nonterminal_name(name: &str) -> bool {
    if let Some(inner) = name.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        let digits = inner.trim_start_matches(|c: char| c.is_ascii_alphabetic());
        let letters = inner.len() - digits.len();
        return letters > 0 && digits.chars().all(|c| c.is_ascii_digit());
    }

    let mut chars = name.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(first), None, _) => first.is_ascii_uppercase(),
        (Some(first), Some(digit), None) => first.is_ascii_uppercase() && digit.is_ascii_digit(),
        _ => false,
    }
}

pub fn lex_nonterminal_name(text: &str) -> Result<String> {
    let name = text.trim();
    if is_nonterminal_name(name) {
        Ok(name.to_string())
    } else {
        Err(CompileErrorType::InvalidNonterminal(name.to_string()))
    }
}

pub fn lex_bracketed(line: &mut impl PeekingNext<Item = char>) -> Result<Token> {
    line.next(); // Consume open bracket
    let inner: String = line.peeking_take_while(|&c| c != ']').collect();

    // Check if there is a close bracket and consume it if there is
    if line.next() != Some(']') {
        return Err(CompileErrorType::UnmatchedBracket);
    }

    Ok(Token::Nonterminal(lex_nonterminal_name(&format!("[{}]", inner))?))
}

// An uppercase letter followed by letters, then digits. Only the short forms
// are valid names, the longer run is consumed so the error can show it.
pub fn lex_bare(line: &mut impl PeekingNext<Item = char>) -> Result<Token> {
    let mut name: String = line.next().into_iter().collect();
    name.extend(line.peeking_take_while(|c| c.is_ascii_alphabetic()));
    name.extend(line.peeking_take_while(|c| c.is_ascii_digit()));

    Ok(Token::Nonterminal(lex_nonterminal_name(&name)?))
}

pub fn lex_rhs(rhs: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();

    let mut rhs_chars = rhs.chars().peekable();

    while let Some(&c) = rhs_chars.peek() {
        if c.is_whitespace() {
            rhs_chars.next();
        } else if c == '[' {
            tokens.push(lex_bracketed(&mut rhs_chars)?);
        } else if c.is_ascii_uppercase() {
            tokens.push(lex_bare(&mut rhs_chars)?);
        } else {
            rhs_chars.next();
            tokens.push(Token::Terminal(c));
        }
    }

    Ok(tokens)
}
