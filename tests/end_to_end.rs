use brill::{
    BrillError, BrillTagger, BrillTester, BrillTrainer, Corpus, CorpusFormat, Lexicon, Model,
    RuleSet, RuleTemplate,
};

const CORPUS: &str = "\
The_AT dog_NN likes_VBZ to_TO run_VB ._.
The_AT run_NN was_BEDZ long_JJ ._.
A_AT good_JJ run_NN helps_VBZ ._.
They_PPSS want_VB to_TO run_VB fast_RB ._.
His_PP$ run_NN ended_VBD early_RB ._.
We_PPSS like_VB to_TO walk_VB ._.
I_PPSS need_VB to_TO run_VB ._.
The_AT run_NN was_BEDZ fun_JJ ._.
They_PPSS hope_VB to_TO run_VB again_RB ._.
Mary_NP went_VBD home_NR ._.
";

fn corpus() -> Corpus {
    Corpus::parse(CORPUS, CorpusFormat::Brown).unwrap()
}

fn train(corpus: &Corpus, templates: &[RuleTemplate]) -> (Lexicon, RuleSet) {
    let mut lexicon = corpus.build_lexicon();
    lexicon.set_default_categories("NN", "NP");
    let rules = BrillTrainer::new(1)
        .unwrap()
        .train(corpus, templates, &lexicon)
        .unwrap();
    (lexicon, rules)
}

#[test]
fn trains_and_beats_lexicon_on_held_out_sentences() {
    let corpus = corpus();
    assert_eq!(corpus.nr_sentences(), 10);
    assert_eq!(corpus.nr_words(), 52);

    let (train_corpus, test_corpus) = corpus.split_in_train_and_test(60.0).unwrap();
    assert_eq!(train_corpus.nr_sentences(), 6);
    assert_eq!(test_corpus.nr_sentences(), 4);

    let (lexicon, rules) = train(
        &train_corpus,
        &[RuleTemplate::PrevTag, RuleTemplate::NextTag],
    );
    assert!(lexicon.nr_entries() > 0);
    assert!(rules.nr_rules() >= 1);

    let tagger = BrillTagger::new(&lexicon, &rules);
    let scores = BrillTester::new().test(&test_corpus, &tagger);
    assert_eq!(scores.total, test_corpus.nr_words());
    assert!(scores.accuracy().unwrap() > scores.baseline_accuracy().unwrap());
}

#[test]
fn all_tag_templates_learn_from_the_same_data() {
    let (train_corpus, test_corpus) = corpus().split_in_train_and_test(60.0).unwrap();
    let (lexicon, rules) = train(&train_corpus, &RuleTemplate::TAG_TEMPLATES);
    assert!(!rules.is_empty());

    let scores = BrillTester::new().test(&test_corpus, &BrillTagger::new(&lexicon, &rules));
    assert!(scores.accuracy().unwrap() > 0.0);
}

#[test]
fn rules_never_worsen_the_training_corpus() {
    let corpus = corpus();
    for templates in &[
        &RuleTemplate::TAG_TEMPLATES[..],
        &RuleTemplate::ALL[..],
        &[RuleTemplate::Next1Or2Or3Tag, RuleTemplate::CurWd][..],
    ] {
        let (lexicon, rules) = train(&corpus, templates);
        let scores = BrillTester::new().test(&corpus, &BrillTagger::new(&lexicon, &rules));
        assert!(scores.correct >= scores.baseline_correct);
        assert!(
            scores.correct - scores.baseline_correct >= rules.nr_rules(),
            "every learned rule fixes at least one tag"
        );
    }
}

#[test]
fn identical_input_gives_identical_rules() {
    let corpus = corpus();
    let (_, first) = train(&corpus, &RuleTemplate::ALL);
    let (_, second) = train(&corpus, &RuleTemplate::ALL);
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn degenerate_training_input_is_rejected() {
    let corpus = corpus();
    let lexicon = corpus.build_lexicon();
    let trainer = BrillTrainer::new(1).unwrap();

    assert!(matches!(
        trainer.train(&corpus, &[], &lexicon),
        Err(BrillError::InvalidInput(_))
    ));
    assert!(matches!(
        trainer.train(&corpus, &[RuleTemplate::PrevTag], &Lexicon::new()),
        Err(BrillError::InvalidInput(_))
    ));
}

#[test]
fn json_corpus_trains_the_same_model() {
    let brown = corpus();
    let text = Corpus::new(brown.sentences().to_vec(), CorpusFormat::Json).to_text();
    let json = Corpus::parse(&text, CorpusFormat::Json).unwrap();
    assert_eq!(json.sentences(), brown.sentences());

    let from_brown = train(&brown, &RuleTemplate::TAG_TEMPLATES);
    let from_json = train(&json, &RuleTemplate::TAG_TEMPLATES);
    assert_eq!(from_brown, from_json);
}

#[test]
fn saved_model_tags_like_the_trained_one() {
    let (lexicon, rules) = train(&corpus(), &RuleTemplate::TAG_TEMPLATES);
    let model = Model::new(lexicon, rules);
    let text = model.rules.to_string();
    let reparsed: RuleSet = text.parse().unwrap();
    assert_eq!(reparsed, model.rules);

    let words = ["They", "want", "to", "run", "."];
    let restored = Model::new(model.lexicon.clone(), reparsed);
    assert_eq!(model.tagger().tags(&words), restored.tagger().tags(&words));
}
