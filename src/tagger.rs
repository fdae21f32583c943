use crate::corpus::{Corpus, Sentence};
use crate::lexicon::Lexicon;
use crate::rule::RuleSet;

/// Tags sentences with a lexicon and a learned rule set.
///
/// Every word first gets its lexicon tag, then the rules rewrite those tags
/// one rule at a time, in the order they were learned.
#[derive(Debug, Clone, Copy)]
pub struct BrillTagger<'m> {
    lexicon: &'m Lexicon,
    rules: &'m RuleSet,
}

impl<'m> BrillTagger<'m> {
    pub fn new(lexicon: &'m Lexicon, rules: &'m RuleSet) -> Self {
        Self { lexicon, rules }
    }

    pub fn lexicon(&self) -> &'m Lexicon {
        self.lexicon
    }

    pub fn rules(&self) -> &'m RuleSet {
        self.rules
    }

    /// Tags from the lexicon alone, before any rule is applied.
    pub fn initial_tags<W: AsRef<str>>(&self, words: &[W]) -> Vec<&'m str> {
        words
            .iter()
            .map(|word| self.lexicon.lookup(word.as_ref()))
            .collect()
    }

    /// Final tags of a sequence of words.
    pub fn tags<W: AsRef<str>>(&self, words: &[W]) -> Vec<&'m str> {
        let mut tags = self.initial_tags(words);
        self.rules.apply(words, &mut tags);
        tags
    }

    pub fn tag<W: AsRef<str>>(&self, words: &[W]) -> Sentence {
        let tags = self.tags(words).into_iter().map(str::to_owned).collect();
        let words = words.iter().map(|word| word.as_ref().to_owned()).collect();
        Sentence::tagged(words, tags)
    }

    /// Retag the words of a sentence; its own tags are ignored.
    pub fn tag_sentence(&self, sentence: &Sentence) -> Sentence {
        self.tag(sentence.words())
    }

    pub fn tag_corpus(&self, corpus: &Corpus) -> Corpus {
        let sentences = corpus
            .sentences()
            .iter()
            .map(|sentence| self.tag_sentence(sentence))
            .collect();
        Corpus::new(sentences, corpus.format())
    }
}
