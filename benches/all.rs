use criterion::{black_box, criterion_group, criterion_main, Criterion};

use brill::{BrillTagger, BrillTrainer, Corpus, CorpusFormat, RuleTemplate};

const SAMPLE: &str = include_str!("../testing-data/brown_sample.txt");

fn corpus() -> Corpus {
    Corpus::parse(SAMPLE, CorpusFormat::Brown).unwrap()
}

fn bench_training(c: &mut Criterion) {
    let corpus = corpus();
    let lexicon = corpus.build_lexicon();
    let trainer = BrillTrainer::new(1).unwrap();

    c.bench_function("train tag templates", |b| {
        b.iter(|| {
            trainer
                .train(&corpus, black_box(&RuleTemplate::TAG_TEMPLATES), &lexicon)
                .unwrap()
        })
    });

    c.bench_function("train all templates", |b| {
        b.iter(|| {
            trainer
                .train(&corpus, black_box(&RuleTemplate::ALL), &lexicon)
                .unwrap()
        })
    });
}

fn bench_tagging(c: &mut Criterion) {
    let corpus = corpus();
    let lexicon = corpus.build_lexicon();
    let rules = BrillTrainer::new(1)
        .unwrap()
        .train(&corpus, &RuleTemplate::ALL, &lexicon)
        .unwrap();
    let tagger = BrillTagger::new(&lexicon, &rules);

    c.bench_function("tag corpus", |b| {
        b.iter(|| tagger.tag_corpus(black_box(&corpus)))
    });
}

criterion_group!(benches, bench_training, bench_tagging);
criterion_main!(benches);
