use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::corpus::Corpus;
use crate::utils::starts_with_uppercase;

pub const DEFAULT_CATEGORY: &str = "NN";
pub const DEFAULT_CATEGORY_CAPITALIZED: &str = "NP";

/// Maps every known word to the tag it was most frequently seen with.
///
/// Words that are not in the lexicon get one of two default categories,
/// depending on whether their first character is uppercase. Entries keep the
/// order in which words were first seen.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    entries: IndexMap<String, String>,
    default_category: String,
    default_category_capitalized: String,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
            default_category: DEFAULT_CATEGORY.to_owned(),
            default_category_capitalized: DEFAULT_CATEGORY_CAPITALIZED.to_owned(),
        }
    }
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a lexicon from all tagged words of a corpus.
    ///
    /// When two tags are seen equally often with a word, the one seen first wins.
    pub fn from_corpus(corpus: &Corpus) -> Self {
        let mut stats = TagStats::default();
        for sentence in corpus.sentences() {
            for (word, tag) in sentence.iter() {
                stats.add(word, tag);
            }
        }

        Self {
            entries: stats.into_most_frequent(),
            ..Self::default()
        }
    }

    pub fn set_default_categories<L, U>(&mut self, lower: L, upper: U) -> &mut Self
    where
        L: Into<String>,
        U: Into<String>,
    {
        self.default_category = lower.into();
        self.default_category_capitalized = upper.into();
        self
    }

    pub fn default_categories(&self) -> (&str, &str) {
        (
            self.default_category.as_str(),
            self.default_category_capitalized.as_str(),
        )
    }

    /// Add or overwrite the tag of a single word.
    pub fn insert<W, T>(&mut self, word: W, tag: T) -> Option<String>
    where
        W: Into<String>,
        T: Into<String>,
    {
        self.entries.insert(word.into(), tag.into())
    }

    /// Tag stored for a known word.
    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries.get(word).map(String::as_str)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// Tag for any word, falling back to a default category for unknown ones.
    pub fn lookup(&self, word: &str) -> &str {
        match self.get(word) {
            Some(tag) => tag,
            None if starts_with_uppercase(word) => self.default_category_capitalized.as_str(),
            None => self.default_category.as_str(),
        }
    }

    pub fn nr_entries(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-word tag counts, in order of first appearance.
#[derive(Debug, Default)]
struct TagStats {
    stats: IndexMap<String, IndexMap<String, u32>>,
}

impl TagStats {
    fn add(&mut self, word: &str, tag: &str) {
        // avoid allocating the word for every occurrence
        if let Some(counts) = self.stats.get_mut(word) {
            if let Some(count) = counts.get_mut(tag) {
                *count += 1;
            } else {
                counts.insert(tag.to_owned(), 1);
            }
            return;
        }

        let mut counts = IndexMap::new();
        counts.insert(tag.to_owned(), 1);
        self.stats.insert(word.to_owned(), counts);
    }

    fn into_most_frequent(self) -> IndexMap<String, String> {
        self.stats
            .into_iter()
            .filter_map(|(word, counts)| {
                counts
                    .into_iter()
                    .fold(None, |best: Option<(String, u32)>, (tag, count)| match best {
                        Some((_, best_count)) if best_count >= count => best,
                        _ => Some((tag, count)),
                    })
                    .map(|(tag, _)| (word, tag))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{CorpusFormat, Sentence};

    fn corpus() -> Corpus {
        Corpus::new(
            vec![
                Sentence::from_pairs(vec![("the", "AT"), ("run", "VB"), ("run", "NN")]).unwrap(),
                Sentence::from_pairs(vec![("can", "MD"), ("can", "NN"), ("can", "NN")]).unwrap(),
                Sentence::from_pairs(vec![("Bill", "NP")]).unwrap(),
            ],
            CorpusFormat::Brown,
        )
    }

    #[test]
    fn picks_most_frequent_tag() {
        let lexicon = corpus().build_lexicon();
        assert_eq!(lexicon.nr_entries(), 4);
        assert_eq!(lexicon.lookup("can"), "NN");
        assert_eq!(lexicon.lookup("the"), "AT");
        assert_eq!(lexicon.lookup("Bill"), "NP");
    }

    #[test]
    fn breaks_ties_by_first_seen_tag() {
        let lexicon = corpus().build_lexicon();
        assert_eq!(lexicon.lookup("run"), "VB");
    }

    #[test]
    fn building_twice_gives_same_lexicon() {
        assert_eq!(corpus().build_lexicon(), corpus().build_lexicon());
    }

    #[test]
    fn unknown_words_get_default_by_case() {
        let mut lexicon = corpus().build_lexicon();
        assert_eq!(lexicon.lookup("walk"), DEFAULT_CATEGORY);
        assert_eq!(lexicon.lookup("Walk"), DEFAULT_CATEGORY_CAPITALIZED);

        lexicon.set_default_categories("XX", "YY");
        for word in &["zebra", "42", "", "-"] {
            assert_eq!(lexicon.lookup(word), "XX");
        }
        for word in &["Zebra", "Ärger"] {
            assert_eq!(lexicon.lookup(word), "YY");
        }
        assert_eq!(lexicon.default_categories(), ("XX", "YY"));
    }

    #[test]
    fn known_words_ignore_defaults() {
        let mut lexicon = corpus().build_lexicon();
        lexicon.set_default_categories("XX", "YY");
        assert_eq!(lexicon.lookup("Bill"), "NP");
        assert!(!lexicon.contains("bill"));
    }

    #[test]
    fn serializes_entries_in_first_seen_order() {
        let json = serde_json::to_string(&corpus().build_lexicon()).unwrap();
        assert!(json.starts_with(r#"{"entries":{"the":"AT","run":"VB","can":"NN","Bill":"NP"}"#));
        assert_eq!(json, serde_json::to_string(&corpus().build_lexicon()).unwrap());
    }

    #[test]
    fn empty_corpus_gives_empty_lexicon() {
        let lexicon = Corpus::new(vec![], CorpusFormat::Brown).build_lexicon();
        assert!(lexicon.is_empty());
    }
}
