//! Part-of-speech tagging with transformation-based learning, as described by Eric Brill.
//!
//! A tagger starts by giving every word the tag it was most often seen with in a
//! training corpus. It then applies an ordered list of learned contextual rules
//! such as "change `NN` into `VB` if the previous tag is `TO`".
//!
//! # Usage
//!
//! ```
//! use brill::{BrillTester, BrillTrainer, Corpus, CorpusFormat, Model, RuleTemplate};
//!
//! let corpus = Corpus::parse(
//!     "They_PPSS want_VB to_TO run_VB ._.\n\
//!      The_AT run_NN ._.\n\
//!      His_PP$ run_NN ended_VBD ._.\n\
//!      We_PPSS hope_VB to_TO run_VB ._.\n",
//!     CorpusFormat::Brown,
//! ).unwrap();
//! let (train, test) = corpus.split_in_train_and_test(75.0).unwrap();
//!
//! let mut lexicon = train.build_lexicon();
//! lexicon.set_default_categories("NN", "NP");
//!
//! let trainer = BrillTrainer::new(1).unwrap();
//! let rules = trainer.train(&train, &RuleTemplate::TAG_TEMPLATES, &lexicon).unwrap();
//!
//! let model = Model::new(lexicon, rules);
//! let tagger = model.tagger();
//! assert_eq!(tagger.tags(&["to", "run"]), ["TO", "VB"]);
//!
//! let scores = BrillTester::new().test(&test, &tagger);
//! assert!(scores.accuracy().unwrap() > scores.baseline_accuracy().unwrap());
//! ```
//!
//! # Training your own model
//!
//! Corpora are read from Brown-style text (`word_TAG` tokens, one sentence per
//! line) or from JSON, or built in memory from [`Sentence`]s. Models can be
//! saved to and loaded from JSON files with [`Model::save_to_file`] and
//! [`Model::load_from_file`].

mod corpus;
mod errors;
mod lexicon;
mod model;
mod rule;
mod tagger;
mod template;
mod tester;
mod trainer;
mod utils;

pub use crate::corpus::{Corpus, CorpusFormat, Sentence, TaggedWord};
pub use crate::errors::{
    BrillError, CorpusLoadingError, ModelLoadingError, ModelSavingError, Result,
};
pub use crate::lexicon::{Lexicon, DEFAULT_CATEGORY, DEFAULT_CATEGORY_CAPITALIZED};
pub use crate::model::Model;
pub use crate::rule::{Rule, RuleSet};
pub use crate::tagger::BrillTagger;
pub use crate::template::{Context, RuleTemplate};
pub use crate::tester::{BrillTester, Scores};
pub use crate::trainer::BrillTrainer;
