use std::fs::{self, File};
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::Context;
use gumdrop::Options;
use serde::Serialize;

use spellpass::dictionary::Dictionary;
use spellpass::tokenizer::{parse, Tokenize};
use spellpass::tree::visit_words;
use spellpass::walker::OVERFLOW_RULE;
use spellpass::{DictionarySource, LoadError, SourceFile, Spell, SpellOptions, WordList};

trait OutputWriter {
    fn write_file(&mut self, file: &SourceFile);
    fn finish(&mut self) -> anyhow::Result<()>;
}

struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write_file(&mut self, file: &SourceFile) {
        if !file.messages.is_empty() {
            println!("{}", file.report());
        }
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonWriter {
    results: Vec<SourceFile>,
}

impl JsonWriter {
    pub fn new() -> JsonWriter {
        JsonWriter { results: vec![] }
    }
}

impl OutputWriter for JsonWriter {
    fn write_file(&mut self, file: &SourceFile) {
        self.results.push(file.clone());
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

#[derive(Debug, Options)]
struct Args {
    #[options(help = "print help message")]
    help: bool,

    #[options(command)]
    command: Option<Command>,
}

#[derive(Debug, Options)]
enum Command {
    #[options(help = "report misspelt words in the provided files")]
    Check(CheckArgs),

    #[options(help = "print input in word-separated tokenized form")]
    Tokenize(TokenizeArgs),
}

#[derive(Debug, Options)]
struct CheckArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(short = "d", help = "word list to check against", required)]
    dictionary: PathBuf,

    #[options(short = "p", help = "personal word list (`*word` forbids a word)")]
    personal: Option<PathBuf>,

    #[options(short = "c", help = "JSON file with checking options")]
    config: Option<PathBuf>,

    #[options(help = "maximum number of words to look up suggestions for")]
    max: Option<usize>,

    #[options(no_short, long = "no-ignore-digits", help = "also report numbers and times")]
    check_digits: bool,

    #[options(no_short, long = "no-ignore-literal", help = "also report quoted words")]
    check_literal: bool,

    #[options(
        no_short,
        long = "no-normalize-apostrophes",
        help = "check typographic apostrophes as written"
    )]
    keep_apostrophes: bool,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "files to be checked, stdin when none")]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Options)]
struct TokenizeArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(short = "w", long = "words", help = "show words with their positions only")]
    is_words_only: bool,

    #[options(no_short, long = "json", help = "print the syntax tree as JSON")]
    use_json: bool,

    #[options(free, help = "text to be tokenized")]
    inputs: Vec<String>,
}

fn read_stdin() -> anyhow::Result<String> {
    eprintln!("Reading from stdin...");
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("reading stdin")?;
    Ok(buffer)
}

fn tokenize(args: TokenizeArgs) -> anyhow::Result<()> {
    let input = if args.inputs.is_empty() {
        read_stdin()?
    } else {
        args.inputs.join(" ")
    };

    if args.use_json {
        println!("{}", serde_json::to_string_pretty(&parse(&input))?);
    } else if args.is_words_only {
        let tree = input.to_tree();
        visit_words(&tree, &mut |word, _| match word.position {
            Some(position) => println!("{:>12}: \"{}\"", position.to_string(), word.to_text()),
            None => println!("{:>12}: \"{}\"", "", word.to_text()),
        });
    } else {
        for (index, token) in input.word_bound_indices() {
            println!("{:>4}: \"{}\"", index, token);
        }
    }

    Ok(())
}

fn options(args: &CheckArgs) -> anyhow::Result<SpellOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            SpellOptions::from_reader(file)
                .with_context(|| format!("reading options from {}", path.display()))?
        }
        None => SpellOptions::default(),
    };

    if let Some(max) = args.max {
        options = options.max(max);
    }

    if args.check_digits {
        options = options.ignore_digits(false);
    }

    if args.check_literal {
        options = options.ignore_literal(false);
    }

    if args.keep_apostrophes {
        options = options.normalize_apostrophes(false);
    }

    if let Some(path) = &args.personal {
        let words = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        options = options.personal(words);
    }

    let path = args.dictionary.clone();
    Ok(options.dictionary(DictionarySource::loader(move |done| {
        std::thread::spawn(move || {
            log::debug!("reading word list {}", path.display());

            let result = fs::read(&path)
                .map(|bytes| Box::new(WordList::new(bytes)) as Box<dyn Dictionary>)
                .map_err(LoadError::loader);

            done(result);
        });
    })))
}

fn check(args: CheckArgs) -> anyhow::Result<()> {
    let spell = Spell::new(options(&args)?)?;

    let documents = if args.inputs.is_empty() {
        vec![(SourceFile::new(), read_stdin()?)]
    } else {
        args.inputs
            .iter()
            .map(|path| {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Ok((SourceFile::with_path(path), text))
            })
            .collect::<anyhow::Result<Vec<_>>>()?
    };

    // Documents are submitted while the word list may still be loading.
    let (tx, rx) = mpsc::channel();
    for (index, (file, text)) in documents.into_iter().enumerate() {
        let tx = tx.clone();
        spell.check(parse(&text), file, move |result, file| {
            let _ = tx.send((index, result, file));
        });
    }
    drop(tx);

    let mut results = rx.iter().collect::<Vec<_>>();
    results.sort_by_key(|(index, _, _)| *index);

    let mut writer: Box<dyn OutputWriter> = if args.use_json {
        Box::new(JsonWriter::new())
    } else {
        Box::new(StdoutWriter)
    };

    let mut misspelt = 0;
    for (_, result, file) in results {
        result.with_context(|| format!("loading {}", args.dictionary.display()))?;

        misspelt += file
            .messages
            .iter()
            .filter(|m| m.rule_id != OVERFLOW_RULE)
            .count();
        writer.write_file(&file);
    }

    writer.finish()?;

    if misspelt > 0 {
        log::info!("{} misspelt word(s)", misspelt);
        std::process::exit(1);
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = Args::parse_args_default_or_exit();

    match args.command {
        None => Ok(()),
        Some(Command::Check(args)) => check(args),
        Some(Command::Tokenize(args)) => tokenize(args),
    }
}
