use std::convert::TryFrom;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{BrillError, CorpusLoadingError, Result};
use crate::lexicon::Lexicon;
use crate::utils::join_with_spaces;

lazy_static! {
    static ref BROWN_TOKEN: Regex = Regex::new(r"^(?P<word>.+)_(?P<tag>[^_]+)$").unwrap();
}

/// Tagging convention of a corpus text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorpusFormat {
    /// One sentence per line, tokens written as `word_TAG`.
    Brown,
    /// A JSON array of sentences, each an array of `{"token": .., "tag": ..}` objects.
    Json,
}

impl FromStr for CorpusFormat {
    type Err = BrillError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "brown" => Ok(CorpusFormat::Brown),
            "json" => Ok(CorpusFormat::Json),
            _ => Err(BrillError::invalid_argument(
                "format",
                format!("unknown corpus format `{}`", s),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedWord {
    #[serde(rename = "token")]
    pub word: String,
    pub tag: String,
}

/// A sentence of words, each paired with its tag.
///
/// Words and tags are kept in two parallel vectors of equal length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sentence {
    words: Vec<String>,
    tags: Vec<String>,
}

fn check_token(kind: &str, token: &str) -> Result<()> {
    if token.chars().any(char::is_whitespace) {
        return Err(BrillError::MalformedSentence(format!(
            "{} `{}` contains whitespace",
            kind, token
        )));
    }
    Ok(())
}

impl Sentence {
    /// Words and tags must be of equal number and free of whitespace, so that
    /// the sentence and the rules learned from it can be written out as text.
    pub fn new(words: Vec<String>, tags: Vec<String>) -> Result<Self> {
        if words.len() != tags.len() {
            return Err(BrillError::MalformedSentence(format!(
                "{} words but {} tags",
                words.len(),
                tags.len()
            )));
        }
        for word in &words {
            check_token("word", word)?;
        }
        for tag in &tags {
            check_token("tag", tag)?;
        }

        Ok(Self { words, tags })
    }

    pub fn from_pairs<I, W, T>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (W, T)>,
        W: Into<String>,
        T: Into<String>,
    {
        let (words, tags) = pairs
            .into_iter()
            .map(|(word, tag)| (word.into(), tag.into()))
            .unzip();
        Self::new(words, tags)
    }

    /// Tagger output; any word the caller passes in is kept as is.
    pub(crate) fn tagged(words: Vec<String>, tags: Vec<String>) -> Self {
        debug_assert_eq!(words.len(), tags.len());
        Self { words, tags }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + Clone {
        self.words
            .iter()
            .map(String::as_str)
            .zip(self.tags.iter().map(String::as_str))
    }

    fn parse_brown(line: &str) -> Result<Self> {
        let mut sentence = Sentence::default();
        for token in line.split_whitespace() {
            let caps = BROWN_TOKEN.captures(token).ok_or_else(|| {
                BrillError::MalformedSentence(format!("token `{}` is not `word_TAG`", token))
            })?;
            sentence.words.push(caps["word"].to_owned());
            sentence.tags.push(caps["tag"].to_owned());
        }
        Ok(sentence)
    }

    fn into_tagged_words(self) -> Vec<TaggedWord> {
        self.words
            .into_iter()
            .zip(self.tags)
            .map(|(word, tag)| TaggedWord { word, tag })
            .collect()
    }
}

impl TryFrom<Vec<TaggedWord>> for Sentence {
    type Error = BrillError;

    fn try_from(tagged: Vec<TaggedWord>) -> Result<Self> {
        Self::from_pairs(tagged.into_iter().map(|t| (t.word, t.tag)))
    }
}

/// Renders the sentence in Brown notation, `word_TAG` separated by spaces.
impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tokens: Vec<_> = self
            .iter()
            .map(|(word, tag)| format!("{}_{}", word, tag))
            .collect();
        f.write_str(&join_with_spaces(tokens.iter()))
    }
}

/// An ordered collection of tagged sentences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    format: CorpusFormat,
    sentences: Vec<Sentence>,
}

impl Corpus {
    pub fn new(sentences: Vec<Sentence>, format: CorpusFormat) -> Self {
        Self { format, sentences }
    }

    /// Parse a corpus text written in the given format.
    ///
    /// Blank lines of a Brown text are skipped.
    pub fn parse(text: &str, format: CorpusFormat) -> Result<Self> {
        let sentences = match format {
            CorpusFormat::Brown => text
                .lines()
                .enumerate()
                .filter(|(_, line)| !line.trim().is_empty())
                .map(|(index, line)| {
                    Sentence::parse_brown(line).map_err(|e| match e {
                        BrillError::MalformedSentence(msg) => BrillError::MalformedSentence(
                            format!("line {}: {}", index + 1, msg),
                        ),
                        other => other,
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            CorpusFormat::Json => {
                let raw: Vec<Vec<TaggedWord>> = serde_json::from_str(text)
                    .map_err(|e| BrillError::MalformedSentence(e.to_string()))?;
                raw.into_iter()
                    .enumerate()
                    .map(|(index, tagged)| {
                        Sentence::try_from(tagged).map_err(|e| match e {
                            BrillError::MalformedSentence(msg) => BrillError::MalformedSentence(
                                format!("sentence {}: {}", index + 1, msg),
                            ),
                            other => other,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?
            }
        };

        Ok(Self::new(sentences, format))
    }

    pub fn load_from_file<P: AsRef<Path>>(
        path: P,
        format: CorpusFormat,
    ) -> Result<Self, CorpusLoadingError> {
        let mut text = String::new();
        File::open(path)?.read_to_string(&mut text)?;
        Ok(Self::parse(&text, format)?)
    }

    /// Render the corpus back into text of its own format.
    pub fn to_text(&self) -> String {
        match self.format {
            CorpusFormat::Brown => self
                .sentences
                .iter()
                .map(|sentence| sentence.to_string() + "\n")
                .collect(),
            CorpusFormat::Json => {
                let raw: Vec<_> = self
                    .sentences
                    .iter()
                    .cloned()
                    .map(Sentence::into_tagged_words)
                    .collect();
                // a Vec of plain string structs always serializes
                serde_json::to_string(&raw).unwrap_or_default()
            }
        }
    }

    pub fn format(&self) -> CorpusFormat {
        self.format
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn nr_sentences(&self) -> usize {
        self.sentences.len()
    }

    pub fn nr_words(&self) -> usize {
        self.sentences.iter().map(Sentence::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nr_words() == 0
    }

    /// Distinct tags in order of first appearance.
    pub fn tags(&self) -> Vec<&str> {
        self.tag_frequencies().into_iter().map(|(tag, _)| tag).collect()
    }

    pub fn tag_frequencies(&self) -> IndexMap<&str, usize> {
        let mut frequencies = IndexMap::new();
        for sentence in &self.sentences {
            for tag in sentence.tags() {
                *frequencies.entry(tag.as_str()).or_insert(0) += 1;
            }
        }
        frequencies
    }

    /// Split into a train and a test corpus.
    ///
    /// The first `floor(nr_sentences * percentage / 100)` sentences form the
    /// train corpus, the remaining ones the test corpus. Order is preserved.
    pub fn split_in_train_and_test(&self, percentage: f64) -> Result<(Corpus, Corpus)> {
        if !(0.0..=100.0).contains(&percentage) {
            return Err(BrillError::invalid_argument(
                "percentage",
                format!("{} is outside [0, 100]", percentage),
            ));
        }

        let nr_train = (self.sentences.len() as f64 * percentage / 100.0).floor() as usize;
        let (train, test) = self.sentences.split_at(nr_train.min(self.sentences.len()));

        Ok((
            Corpus::new(train.to_vec(), self.format),
            Corpus::new(test.to_vec(), self.format),
        ))
    }

    pub fn build_lexicon(&self) -> Lexicon {
        Lexicon::from_corpus(self)
    }
}
