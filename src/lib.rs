//! Converts context-free grammars to Chomsky normal form, decides membership
//! with CYK and generates labeled test corpora.

pub mod corpus;
pub mod cyk;
pub mod error_handling;
pub mod generator;
pub mod grammar;
pub mod normalize;
pub mod parser;
