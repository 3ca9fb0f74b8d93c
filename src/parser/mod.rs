/*
    This module parses grammar files in `LHS -> RHS` notation
*/

mod lexer;
mod verifier;

use std::path::Path;

use itertools::Itertools;
use thiserror::Error;

use crate::error_handling::*;
use crate::grammar::*;
use lexer::*;
use verifier::verify_rules;
use verifier::IntermediateRuleset;

pub use lexer::is_nonterminal_name;

#[derive(Debug, Error)]
pub enum CompileErrorType {
    // A rule line without the `->` separator
    #[error("Expected `->` between nonterminal and right-hand side")]
    MissingArrow,
    // A name that is neither `X`, `X1` nor `[name1]`
    #[error("`{0}` is not a valid nonterminal")]
    InvalidNonterminal(String),
    // A `[` without its `]`
    #[error("Unmatched `[`")]
    UnmatchedBracket,
    // Nothing after `->`, empty productions are not supported
    #[error("Empty right-hand side, empty productions are not supported")]
    EmptyRightHandSide,
    // A nonterminal used on a right-hand side but never defined
    #[error("Could not find definition for `{0}`")]
    UndefinedNonterminal(String),
    // The file holds no rule lines
    #[error("No rules found")]
    NoRules,
    // The rules were read but still formed an invalid grammar
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    // There was an issue with reading a file
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CompileErrorType::FileError(a), CompileErrorType::FileError(b)) => a.kind() == b.kind(),
            (CompileErrorType::InvalidNonterminal(a), CompileErrorType::InvalidNonterminal(b)) => a == b,
            (CompileErrorType::UndefinedNonterminal(a), CompileErrorType::UndefinedNonterminal(b)) => a == b,
            (CompileErrorType::Grammar(a), CompileErrorType::Grammar(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileErrors = Errors<CompileErrorType>;

fn io_error(error: std::io::Error, file: &Path) -> CompileError {
    CompileError {
        location: Location::file(file),
        error: CompileErrorType::FileError(error),
    }
}

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;
pub type FileResult<T> = std::result::Result<T, CompileErrors>;

#[derive(PartialEq, Debug)]
struct Rule {
    symbol: String,
    alternative: Alternative,
    location: Location,
}

fn parse_alternative(tokens: Vec<Token>) -> Result<Alternative> {
    if tokens.is_empty() {
        return Err(CompileErrorType::EmptyRightHandSide);
    }

    Ok(tokens
        .into_iter()
        .map(|token| match token {
            Token::Nonterminal(name) => Symbol::Nonterminal(name),
            Token::Terminal(c) => Symbol::Terminal(c),
        })
        .collect())
}

fn parse_line(line: &str, location: Location) -> Result<Rule> {
    // Only the first `->` separates, later ones are terminals
    let (lhs, rhs) = line.split_once("->").ok_or(CompileErrorType::MissingArrow)?;

    let symbol = lex_nonterminal_name(lhs)?;
    let alternative = parse_alternative(lex_rhs(rhs)?)?;

    Ok(Rule {
        symbol,
        alternative,
        location,
    })
}

fn parse_located_line(line: &str, location: Location) -> LineResult<Rule> {
    parse_line(line, location.clone()).map_err(|error| CompileError { location, error })
}

fn is_rule_line(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.starts_with(';')
}

// Groups alternatives under their nonterminal, in order of first definition
fn grammar_from_rules(rule_list: Vec<Rule>, source: &Path) -> FileResult<Grammar> {
    let start_symbol = match rule_list.first() {
        Some(rule) => rule.symbol.clone(),
        None => {
            return Err(vec![CompileError {
                location: Location::file(source),
                error: CompileErrorType::NoRules,
            }])
        }
    };

    let mut test_ruleset = IntermediateRuleset::new();
    for rule in rule_list {
        test_ruleset
            .entry(rule.symbol)
            .or_default()
            .push((rule.alternative, rule.location));
    }

    verify_rules(&test_ruleset)?;

    let rules: Rules = test_ruleset
        .into_iter()
        .map(|(symbol, alternatives)| {
            (symbol, alternatives.into_iter().map(|(alternative, _)| alternative).collect())
        })
        .collect();

    Grammar::new(start_symbol, rules).map_err(|error| {
        vec![CompileError {
            location: Location::file(source),
            error: error.into(),
        }]
    })
}

/// Parses grammar text, naming `source` in error locations.
///
/// Every malformed line is reported, not only the first one.
pub fn parse_source(text: &str, source: &Path) -> FileResult<Grammar> {
    let parsed_lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| is_rule_line(line))
        .map(|(num, line)| parse_located_line(line, Location::line(source, num + 1)));

    let (rules, errors): (Vec<_>, Vec<_>) = parsed_lines.partition_result();
    if !errors.is_empty() {
        return Err(errors);
    }

    grammar_from_rules(rules, source)
}

pub fn parse_str(text: &str) -> FileResult<Grammar> {
    parse_source(text, Path::new("<input>"))
}

pub fn parse_file(path: &Path) -> FileResult<Grammar> {
    let text = std::fs::read_to_string(path).map_err(|e| vec![io_error(e, path)])?;
    parse_source(&text, path)
}
