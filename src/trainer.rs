use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, info};

use crate::corpus::Corpus;
use crate::errors::{BrillError, Result};
use crate::lexicon::Lexicon;
use crate::rule::{Rule, RuleSet};
use crate::template::{Context, RuleTemplate};

/// Learner of transformation rules.
///
/// Starting from the tags a lexicon assigns, the trainer repeatedly picks the
/// rule that fixes the most tagging errors in the training corpus, net of the
/// correct tags it breaks, and applies it. Training stops once no rule reaches
/// the minimum improvement, or once the maximum number of rules is learned.
///
/// ```
/// use brill::{BrillTrainer, Corpus, CorpusFormat, RuleTemplate};
///
/// let corpus = Corpus::parse(
///     "I_PPSS want_VB to_TO run_VB\nthe_AT run_NN ended_VBD\na_AT run_NN\n",
///     CorpusFormat::Brown,
/// ).unwrap();
/// let lexicon = corpus.build_lexicon();
///
/// let trainer = BrillTrainer::new(1).unwrap();
/// let rules = trainer.train(&corpus, &[RuleTemplate::PrevTag], &lexicon).unwrap();
/// assert_eq!(rules.rules()[0].to_string(), "NN VB PREV-TAG TO");
/// ```
#[derive(Debug, Clone)]
pub struct BrillTrainer {
    threshold: u32,
    max_rules: Option<usize>,
}

impl BrillTrainer {
    /// Create a trainer accepting rules with a net score of at least `threshold`.
    pub fn new(threshold: u32) -> Result<Self> {
        if threshold == 0 {
            return Err(BrillError::invalid_argument(
                "threshold",
                "must be at least 1",
            ));
        }

        Ok(Self {
            threshold,
            max_rules: None,
        })
    }

    /// Stop after learning `max_rules` rules.
    pub fn max_rules(&mut self, max_rules: usize) -> &mut Self {
        self.max_rules = Some(max_rules);
        self
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Learn an ordered rule set from a training corpus.
    ///
    /// Candidate rules with equal scores are ranked by the position of their
    /// template in `templates`, then by where in the corpus they first appear.
    pub fn train(
        &self,
        corpus: &Corpus,
        templates: &[RuleTemplate],
        lexicon: &Lexicon,
    ) -> Result<RuleSet> {
        if templates.is_empty() {
            return Err(BrillError::InvalidInput("no rule templates given".into()));
        }
        if lexicon.is_empty() {
            return Err(BrillError::InvalidInput("lexicon is empty".into()));
        }
        if corpus.is_empty() {
            return Err(BrillError::InvalidInput("training corpus is empty".into()));
        }

        let mut working = WorkingCorpus::new(corpus, lexicon);
        let mut rules = RuleSet::new();
        let mut errors = working.nr_errors();

        info!(
            "training on {} sentences ({} words), {} errors after initial tagging",
            corpus.nr_sentences(),
            corpus.nr_words(),
            errors
        );

        loop {
            if let Some(max_rules) = self.max_rules {
                if rules.nr_rules() >= max_rules {
                    info!("stopping: learned the maximum of {} rules", max_rules);
                    break;
                }
            }

            let selection = match working.select(templates, i64::from(self.threshold))? {
                Some(selection) => selection,
                None => {
                    info!(
                        "stopping: no rule scores at least {}, {} errors left",
                        self.threshold, errors
                    );
                    break;
                }
            };

            let to_tag = working.gold_tag(selection.origin);
            let changed = working.apply(&selection.rule, to_tag);
            let remaining = working.nr_errors();
            debug_assert_eq!((errors - remaining) as i64, selection.score);

            info!(
                "rule {}: {} (score {}, fixes {}, breaks {}, {} tags changed)",
                rules.nr_rules() + 1,
                selection.rule,
                selection.score,
                selection.corrected,
                selection.broken,
                changed
            );

            errors = remaining;
            rules.push(selection.rule);
        }

        Ok(rules)
    }
}

/// A training sentence with the tags hypothesized so far next to the gold tags.
#[derive(Debug)]
struct WorkingSentence<'a> {
    words: &'a [String],
    gold: &'a [String],
    current: Vec<&'a str>,
}

impl<'a> WorkingSentence<'a> {
    fn mismatches(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.current.len()).filter(move |&i| self.current[i] != self.gold[i])
    }
}

#[derive(Debug)]
struct WorkingCorpus<'a> {
    sentences: Vec<WorkingSentence<'a>>,
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct Candidate<'s> {
    template: RuleTemplate,
    context: Context<&'s str>,
    from_tag: &'s str,
    to_tag: &'s str,
}

#[derive(Debug)]
struct Tally {
    // first position (sentence, word) the candidate was generated at
    origin: (usize, usize),
    corrected: u32,
}

#[derive(Debug)]
struct Selection {
    rule: Rule,
    origin: (usize, usize),
    score: i64,
    corrected: i64,
    broken: i64,
}

impl<'a> WorkingCorpus<'a> {
    fn new(corpus: &'a Corpus, lexicon: &'a Lexicon) -> Self {
        let sentences = corpus
            .sentences()
            .iter()
            .map(|sentence| WorkingSentence {
                words: sentence.words(),
                gold: sentence.tags(),
                current: sentence
                    .words()
                    .iter()
                    .map(|word| lexicon.lookup(word))
                    .collect(),
            })
            .collect();

        Self { sentences }
    }

    fn nr_errors(&self) -> usize {
        self.sentences.iter().map(|s| s.mismatches().count()).sum()
    }

    fn gold_tag(&self, (sentence, word): (usize, usize)) -> &'a str {
        let gold: &'a [String] = self.sentences[sentence].gold;
        &gold[word]
    }

    /// Find the best-scoring rule, if any scores at least `threshold`.
    fn select(&self, templates: &[RuleTemplate], threshold: i64) -> Result<Option<Selection>> {
        let candidates = self.candidates(templates);

        // correct positions indexed by their tag; only these can be broken
        let mut correct: HashMap<&str, Vec<(usize, usize)>> = HashMap::new();
        for (s, sentence) in self.sentences.iter().enumerate() {
            for (i, (&current, gold)) in sentence.current.iter().zip(sentence.gold).enumerate() {
                if current == gold {
                    correct.entry(current).or_insert_with(Vec::new).push((s, i));
                }
            }
        }

        debug!("scoring {} candidate rules", candidates.len());

        let mut best: Option<(&Candidate, &Tally, i64, i64)> = None;
        for (candidate, tally) in &candidates {
            let corrected = i64::from(tally.corrected);
            if corrected < threshold || best.map_or(false, |(_, _, score, _)| corrected <= score) {
                continue;
            }

            let broken = correct.get(candidate.from_tag).map_or(0, |positions| {
                positions
                    .iter()
                    .filter(|&&(s, i)| {
                        let sentence = &self.sentences[s];
                        candidate.template.holds(
                            sentence.words,
                            &sentence.current,
                            i,
                            &candidate.context,
                        )
                    })
                    .count()
            }) as i64;

            let score = corrected - broken;
            if score >= threshold && best.map_or(true, |(_, _, best_score, _)| score > best_score) {
                best = Some((candidate, tally, score, broken));
            }
        }

        best.map(|(candidate, tally, score, broken)| {
            let rule = Rule::new(
                candidate.from_tag,
                candidate.to_tag,
                candidate.template,
                candidate.context.clone().into_owned(),
            )?;

            Ok(Selection {
                rule,
                origin: tally.origin,
                score,
                corrected: score + broken,
                broken,
            })
        })
        .transpose()
    }

    /// Every rule that would fix at least one error, with the number it fixes.
    ///
    /// Insertion order is template order first, then corpus order.
    fn candidates(&self, templates: &[RuleTemplate]) -> IndexMap<Candidate, Tally> {
        let mut candidates = IndexMap::new();
        for &template in templates {
            for (s, sentence) in self.sentences.iter().enumerate() {
                for i in sentence.mismatches() {
                    for context in template.contexts(sentence.words, &sentence.current, i) {
                        let candidate = Candidate {
                            template,
                            context,
                            from_tag: sentence.current[i],
                            to_tag: &sentence.gold[i],
                        };
                        candidates
                            .entry(candidate)
                            .or_insert(Tally {
                                origin: (s, i),
                                corrected: 0,
                            })
                            .corrected += 1;
                    }
                }
            }
        }
        candidates
    }

    /// Apply a rule to every sentence and return the number of changed tags.
    fn apply(&mut self, rule: &Rule, to_tag: &'a str) -> usize {
        let mut changed = 0;
        for sentence in &mut self.sentences {
            let positions = rule.positions(sentence.words, &sentence.current);
            for &i in &positions {
                sentence.current[i] = to_tag;
            }
            changed += positions.len();
        }
        changed
    }
}
