mod cli;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use chomsky::corpus::{format_corpus, label_words};
use chomsky::cyk::Recognizer;
use chomsky::generator::{generate, BfsOptions, BigramOptions, Strategy};
use chomsky::normalize::normalize;
use chomsky::parser::parse_file;
use cli::{Cli, Mode};

fn strategy(cli: &Cli) -> Strategy {
    match cli.mode {
        Mode::Bfs => {
            let defaults = BfsOptions::default();
            Strategy::Exhaustive(BfsOptions {
                count: cli.amount.unwrap_or(defaults.count),
                word_length: cli.length,
                always_positive: cli.positive,
                ..defaults
            })
        }
        Mode::Bigram => {
            let defaults = BigramOptions::default();
            Strategy::Bigram(BigramOptions {
                count: cli.amount.unwrap_or(defaults.count),
                max_length: cli.max_length.unwrap_or(defaults.max_length),
                ..defaults
            })
        }
    }
}

fn write_output(corpus: &str, output: Option<&Path>) -> std::io::Result<()> {
    match output {
        Some(path) => std::fs::write(path, corpus),
        None => {
            print!("{}", corpus);
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let grammar = match parse_file(&cli.file) {
        Ok(grammar) => grammar,
        Err(errors) => {
            for error in errors {
                eprintln!("{}", error);
            }
            return ExitCode::FAILURE;
        }
    };
    info!(
        "read {} productions over {} nonterminals from {}",
        grammar.production_count(),
        grammar.rules().len(),
        cli.file.display()
    );

    let cnf = normalize(&grammar);
    info!("normal form has {} productions", cnf.production_count());
    if cli.print_cnf {
        eprint!("{}", cnf);
    }

    let words = if cli.words.is_empty() {
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        generate(&cnf, &strategy(&cli), &mut rng)
    } else {
        cli.words.clone()
    };
    info!("labeling {} words", words.len());

    let corpus = format_corpus(&label_words(&Recognizer::new(&cnf), &words));
    if let Err(e) = write_output(&corpus, cli.output.as_deref()) {
        error!("could not write the corpus: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
