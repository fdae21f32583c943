use std::fs::File;
use std::io::{stdin, stdout, BufRead, BufReader, Write};

use anyhow::{bail, Context as _, Error};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use log::info;

use brill::{BrillTester, BrillTrainer, Corpus, CorpusFormat, Model, RuleTemplate};

fn format_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("format")
        .short("f")
        .long("format")
        .value_name("FORMAT")
        .help("Format of the corpus files.")
        .possible_values(&["brown", "json"])
        .default_value("brown")
        .takes_value(true)
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let matches = App::new("brill")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Aleksei Voronov <despawn@gmail.com>")
        .about("Train a transformation-based part-of-speech tagger, or use one to tag text.")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("train")
                .about("Learn a lexicon and contextual rules from a tagged corpus")
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .value_name("FILE")
                        .help("File where the newly trained model will be written.")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::with_name("input")
                        .short("i")
                        .long("input")
                        .value_name("FILE")
                        .help("File containing the tagged training corpus.")
                        .takes_value(true)
                        .required(true)
                        .multiple(true),
                )
                .arg(format_arg())
                .arg(
                    Arg::with_name("templates")
                        .short("t")
                        .long("templates")
                        .value_name("NAMES")
                        .help("Comma separated rule templates to learn from. All tag templates by default.")
                        .takes_value(true)
                        .use_delimiter(true),
                )
                .arg(
                    Arg::with_name("threshold")
                        .long("threshold")
                        .value_name("N")
                        .help("Minimum net number of fixed tags for a rule to be learned.")
                        .default_value("1")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("max-rules")
                        .long("max-rules")
                        .value_name("N")
                        .help("Stop after learning this many rules.")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("split")
                        .long("split")
                        .value_name("PERCENTAGE")
                        .help("Train on this percentage of sentences and test on the rest.")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("defaults")
                        .long("defaults")
                        .value_name("TAGS")
                        .help("Default tags for unknown lowercase and capitalized words.")
                        .takes_value(true)
                        .number_of_values(2)
                        .use_delimiter(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("tag")
                .about("Tag sentences with a trained model")
                .arg(
                    Arg::with_name("model")
                        .short("m")
                        .long("model")
                        .value_name("FILE")
                        .help("File containing the model produced by `train` command")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::with_name("input")
                        .short("i")
                        .long("input")
                        .value_name("FILE")
                        .help("File containing sentences that need to be tagged, one sentence per line, words separated by whitespace. stdin by default.")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .value_name("FILE")
                        .help("File into which tagged sentences will be written")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("test")
                .about("Measure the accuracy of a trained model on a tagged corpus")
                .arg(
                    Arg::with_name("model")
                        .short("m")
                        .long("model")
                        .value_name("FILE")
                        .help("File containing the model produced by `train` command")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::with_name("input")
                        .short("i")
                        .long("input")
                        .value_name("FILE")
                        .help("File containing the tagged test corpus.")
                        .takes_value(true)
                        .required(true),
                )
                .arg(format_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        ("train", Some(matches)) => do_train(matches),
        ("tag", Some(matches)) => do_tag(matches),
        ("test", Some(matches)) => do_test(matches),
        _ => Ok(()),
    }
}

fn parse_format(matches: &ArgMatches) -> Result<CorpusFormat, Error> {
    Ok(matches.value_of("format").unwrap_or("brown").parse()?)
}

fn do_train(matches: &ArgMatches) -> Result<(), Error> {
    let format = parse_format(matches)?;

    let mut sentences = Vec::new();
    for filename in matches.values_of("input").into_iter().flatten() {
        let corpus = Corpus::load_from_file(filename, format)
            .with_context(|| format!("cannot load corpus {}", filename))?;
        sentences.extend_from_slice(corpus.sentences());
    }
    let corpus = Corpus::new(sentences, format);
    info!(
        "read {} sentences with {} words",
        corpus.nr_sentences(),
        corpus.nr_words()
    );

    let (train, test) = match matches.value_of("split") {
        Some(percentage) => {
            let (train, test) = corpus.split_in_train_and_test(percentage.parse()?)?;
            (train, Some(test))
        }
        None => (corpus, None),
    };

    let templates = match matches.values_of("templates") {
        Some(names) => names
            .map(str::parse)
            .collect::<Result<Vec<RuleTemplate>, _>>()?,
        None => RuleTemplate::TAG_TEMPLATES.to_vec(),
    };

    let mut lexicon = train.build_lexicon();
    if let Some(defaults) = matches.values_of("defaults") {
        let defaults: Vec<_> = defaults.collect();
        if let [lower, upper] = defaults[..] {
            lexicon.set_default_categories(lower, upper);
        } else {
            bail!("expected two default tags, got {}", defaults.len());
        }
    }

    let mut trainer = BrillTrainer::new(matches.value_of("threshold").unwrap_or("1").parse()?)?;
    if let Some(max_rules) = matches.value_of("max-rules") {
        trainer.max_rules(max_rules.parse()?);
    }
    let rules = trainer.train(&train, &templates, &lexicon)?;

    let model = Model::new(lexicon, rules);
    model.save_to_file(matches.value_of("output").unwrap_or_default())?;
    println!(
        "learned {} rules, lexicon has {} entries",
        model.rules.nr_rules(),
        model.lexicon.nr_entries()
    );

    if let Some(test) = test {
        let scores = BrillTester::new().test(&test, &model.tagger());
        println!("{}", scores);
    }

    Ok(())
}

fn do_tag(matches: &ArgMatches) -> Result<(), Error> {
    let model = Model::load_from_file(matches.value_of("model").unwrap_or_default())?;
    let tagger = model.tagger();

    let input: Box<dyn BufRead> = match matches.value_of("input") {
        Some(filename) => Box::new(BufReader::new(File::open(filename)?)),
        None => Box::new(BufReader::new(stdin())),
    };

    let mut output: Box<dyn Write> = match matches.value_of("output") {
        Some(filename) => Box::new(File::create(filename)?),
        None => Box::new(stdout()),
    };

    for line in input.lines() {
        let line = line?;
        let words: Vec<_> = line.split_whitespace().collect();
        let tagged = tagger.tag(&words);
        output.write_all(tagged.to_string().as_bytes())?;
        output.write_all(b"\n")?;
    }

    Ok(())
}

fn do_test(matches: &ArgMatches) -> Result<(), Error> {
    let model = Model::load_from_file(matches.value_of("model").unwrap_or_default())?;
    let format = parse_format(matches)?;
    let filename = matches.value_of("input").unwrap_or_default();
    let gold = Corpus::load_from_file(filename, format)
        .with_context(|| format!("cannot load corpus {}", filename))?;

    let scores = BrillTester::new().test(&gold, &model.tagger());
    println!("{}", scores);

    Ok(())
}
