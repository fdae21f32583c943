use std::fmt;

use log::info;
use serde::Serialize;

use crate::corpus::Corpus;
use crate::tagger::BrillTagger;

/// Outcome of tagging a gold corpus.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scores {
    /// Number of tagged words.
    pub total: usize,
    /// Words tagged correctly by the lexicon alone.
    pub baseline_correct: usize,
    /// Words tagged correctly after applying the rules.
    pub correct: usize,
}

impl Scores {
    /// Fraction of correctly tagged words, or `None` for an empty corpus.
    pub fn accuracy(&self) -> Option<f64> {
        ratio(self.correct, self.total)
    }

    /// Fraction of words the lexicon alone tags correctly, or `None` for an empty corpus.
    pub fn baseline_accuracy(&self) -> Option<f64> {
        ratio(self.baseline_correct, self.total)
    }
}

fn ratio(count: usize, total: usize) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(count as f64 / total as f64)
    }
}

impl fmt::Display for Scores {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.baseline_accuracy(), self.accuracy()) {
            (Some(baseline), Some(accuracy)) => write!(
                f,
                "{} words, lexicon only {:.2}%, with rules {:.2}%",
                self.total,
                baseline * 100.0,
                accuracy * 100.0
            ),
            _ => f.write_str("no words"),
        }
    }
}

/// Evaluates a tagger against gold tags.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrillTester;

impl BrillTester {
    pub fn new() -> Self {
        Self
    }

    /// Tag every sentence of `gold` and compare the result word by word.
    pub fn test(&self, gold: &Corpus, tagger: &BrillTagger) -> Scores {
        let mut scores = Scores::default();
        for sentence in gold.sentences() {
            let words = sentence.words();
            let baseline = tagger.initial_tags(words);
            let tags = tagger.tags(words);

            scores.total += sentence.len();
            scores.baseline_correct += count_equal(&baseline, sentence.tags());
            scores.correct += count_equal(&tags, sentence.tags());
        }

        info!("tested on {} sentences: {}", gold.nr_sentences(), scores);
        scores
    }
}

fn count_equal(tags: &[&str], gold: &[String]) -> usize {
    tags.iter().zip(gold).filter(|(tag, gold)| **tag == gold.as_str()).count()
}
