/*
    This module labels candidate words and writes them out as a test corpus
*/

use std::fmt::Display;

use rayon::prelude::*;

use crate::cyk::Recognizer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledWord {
    pub word: String,
    pub accepted: bool,
}

impl Display for LabeledWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.word, u8::from(self.accepted))
    }
}

/// Runs the recognizer over every word, keeping the input order.
pub fn label_words(recognizer: &Recognizer, words: &[String]) -> Vec<LabeledWord> {
    words
        .par_iter()
        .map(|word| LabeledWord {
            word: word.clone(),
            accepted: recognizer.recognise(word),
        })
        .collect()
}

/// One `<word> <0|1>` line per word.
pub fn format_corpus(labeled: &[LabeledWord]) -> String {
    labeled.iter().map(|entry| format!("{}\n", entry)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::parser::parse_str;
    use pretty_assertions::assert_eq;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|word| word.to_string()).collect()
    }

    #[test]
    fn labels_follow_the_recognizer() {
        let cnf = normalize(&parse_str("S -> a S b\nS -> a b").unwrap());
        let recognizer = Recognizer::new(&cnf);

        let labeled = label_words(&recognizer, &words(&["ab", "ba", "aabb", "aab"]));
        let verdicts: Vec<bool> = labeled.iter().map(|entry| entry.accepted).collect();

        assert_eq!(verdicts, vec![true, false, true, false]);
        assert_eq!(labeled[2].word, "aabb");
    }

    #[test]
    fn order_survives_parallel_labeling() {
        let cnf = normalize(&parse_str("S -> a S\nS -> a").unwrap());
        let recognizer = Recognizer::new(&cnf);
        let input: Vec<String> = (1..200).map(|n| "a".repeat(n % 17 + 1) + if n % 3 == 0 { "b" } else { "" }).collect();

        let labeled = label_words(&recognizer, &input);
        let output: Vec<String> = labeled.iter().map(|entry| entry.word.clone()).collect();

        assert_eq!(output, input);
        for entry in &labeled {
            assert_eq!(entry.accepted, !entry.word.ends_with('b'));
        }
    }

    #[test]
    fn corpus_lines() {
        let labeled = vec![
            LabeledWord { word: "x+x".to_string(), accepted: true },
            LabeledWord { word: "+x".to_string(), accepted: false },
        ];

        assert_eq!(format_corpus(&labeled), "x+x 1\n+x 0\n");
        assert_eq!(format_corpus(&[]), "");
    }
}
