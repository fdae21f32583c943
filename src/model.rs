use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ModelLoadingError, ModelSavingError};
use crate::lexicon::Lexicon;
use crate::rule::RuleSet;
use crate::tagger::BrillTagger;

/// A trained tagger: a lexicon together with the rules learned on top of it.
///
/// See [crate documentation](index.html) for examples.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Model {
    pub lexicon: Lexicon,
    pub rules: RuleSet,
}

impl Model {
    pub fn new(lexicon: Lexicon, rules: RuleSet) -> Self {
        Self { lexicon, rules }
    }

    /// Save this model into a file with the given filename.
    /// The format is simple JSON right now.
    pub fn save_to_file<P: AsRef<Path>>(&self, filename: P) -> Result<(), ModelSavingError> {
        let serialized = serde_json::to_string(&self)?;
        File::create(filename)?.write_all(serialized.as_bytes())?;

        Ok(())
    }

    /// Load a previously saved model from a file
    pub fn load_from_file<P: AsRef<Path>>(filename: P) -> Result<Self, ModelLoadingError> {
        let mut string = String::new();
        File::open(filename)?.read_to_string(&mut string)?;
        let model = serde_json::from_str(&string)?;

        Ok(model)
    }

    pub fn tagger(&self) -> BrillTagger<'_> {
        BrillTagger::new(&self.lexicon, &self.rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn model() -> Model {
        let mut lexicon = Lexicon::new();
        lexicon.insert("to", "TO");
        lexicon.insert("run", "NN");
        lexicon.set_default_categories("NN", "NNP");
        let rules = "NN VB PREV-TAG TO\nVBN VBD SURROUNDTAG NP AT\n".parse().unwrap();
        Model::new(lexicon, rules)
    }

    #[test]
    fn json_keeps_rule_order_and_defaults() {
        let model = model();
        let json = serde_json::to_string(&model).unwrap();
        let restored: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, model);
        assert_eq!(restored.lexicon.lookup("Oslo"), "NNP");
        assert_eq!(restored.tagger().tags(&["to", "run"]), ["TO", "VB"]);
    }

    #[test]
    fn saves_and_loads_file() {
        let path = env::temp_dir().join(format!("brill-model-{}.json", std::process::id()));
        let model = model();
        model.save_to_file(&path).unwrap();
        let loaded = Model::load_from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded, model);
    }

    #[test]
    fn loading_garbage_fails() {
        let path = env::temp_dir().join(format!("brill-garbage-{}.json", std::process::id()));
        fs::write(&path, "{not json").unwrap();
        let result = Model::load_from_file(&path);
        fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ModelLoadingError::Deserialize(_))));
    }
}
