use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Breadth-first leftmost derivations
    Bfs,
    /// Random walks over adjacent terminal pairs
    Bigram,
}

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar
    pub file: PathBuf,

    /// How candidate words are generated
    #[arg(short, long, value_enum, default_value_t = Mode::Bfs)]
    pub mode: Mode,

    /// Amount of words to generate (default: 10)
    #[arg(short = 'n', long, value_name = "AMOUNT")]
    pub amount: Option<usize>,

    /// Exact word length for breadth-first generation
    #[arg(short, long, value_name = "LENGTH")]
    pub length: Option<usize>,

    /// Longest word the bigram walk produces (default: 20)
    #[arg(long, value_name = "LENGTH")]
    pub max_length: Option<usize>,

    /// Only emit words derived from the grammar
    #[arg(short, long)]
    pub positive: bool,

    /// Seed for every random choice (default: random)
    #[arg(short, long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Label these words instead of generating any
    #[arg(short, long = "word", value_name = "WORD")]
    pub words: Vec<String>,

    /// Print the grammar in Chomsky normal form to stderr
    #[arg(long)]
    pub print_cnf: bool,

    /// Write the corpus here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Log more, repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
