use clap::Parser;
use chatmor::{
    annotate::CommaStyle,
    batch,
    components::{
        tagger::{Resources, TaggerConfig},
        tokenizer::TokenizerKind,
    },
    config::Config,
    pipeline::Annotator,
};
use log::error;
use std::{io, path::PathBuf, process};

/// Add morphological annotation (%mor tiers) to CHAT transcripts.
#[derive(Parser)]
#[clap(version, author)]
struct Opts {
    /// Files to annotate.
    inputfiles: Vec<PathBuf>,
    /// Read the transcript from stdin and write the result to stdout.
    #[clap(short, long)]
    std: bool,
    /// Annotate all .txt files in this directory instead of `inputfiles`.
    #[clap(short, long)]
    indir: Option<PathBuf>,
    /// Directory to write annotated files to.
    #[clap(short, long)]
    outdir: Option<PathBuf>,
    /// JSON configuration file.
    #[clap(short, long)]
    config: Option<PathBuf>,
    /// MorphoDiTa tagger model, run with `run_tagger`.
    #[clap(short, long)]
    tagger: Option<PathBuf>,
    /// Lexicon compiled with chatmor-compile, used instead of MorphoDiTa.
    #[clap(long, conflicts_with = "tagger")]
    lexicon: Option<PathBuf>,
    /// Tokenizer to split plain text with.
    #[clap(short = 'd', long, possible_values = &["chat", "whitespace"])]
    tokenizer: Option<String>,
    /// Guess analyses of unknown words.
    #[clap(short, long)]
    guess: bool,
    /// Write commas as "," instead of "cm|cm".
    #[clap(long)]
    verbatim_commas: bool,
}

fn config(opts: &Opts) -> Result<Config, chatmor::Error> {
    let mut config = match &opts.config {
        Some(path) => Config::from_json(path)?,
        None => Config::default(),
    };

    if let Some(model) = &opts.tagger {
        config.tagger = TaggerConfig::Process {
            binary: PathBuf::from("run_tagger"),
            model: model.clone(),
        };
    }
    if let Some(path) = &opts.lexicon {
        config.tagger = TaggerConfig::Lexicon { path: path.clone() };
    }
    match opts.tokenizer.as_deref() {
        Some("whitespace") => config.tokenizer = TokenizerKind::Whitespace,
        Some(_) => config.tokenizer = TokenizerKind::Chat,
        None => {}
    }
    config.guesser |= opts.guess;
    if opts.verbatim_commas {
        config.annotation.comma = CommaStyle::Verbatim;
    }

    Ok(config)
}

fn run(opts: Opts) -> Result<i32, chatmor::Error> {
    let config = config(&opts)?;
    let resources = Resources::new();
    let annotator = Annotator::from_config(&config, &resources)?;

    if opts.std {
        let report = annotator.annotate_stream(io::stdin().lock(), io::stdout().lock())?;
        return Ok(if report.is_ok() { 0 } else { 1 });
    }

    let outdir = match &opts.outdir {
        Some(outdir) => outdir,
        None => {
            error!("An output directory needs to be specified. See --help for more.");
            return Ok(2);
        }
    };

    let jobs = match &opts.indir {
        Some(indir) => batch::jobs_from_dir(indir, outdir, &["txt"])?,
        None if !opts.inputfiles.is_empty() => batch::jobs_from_files(&opts.inputfiles, outdir),
        None => {
            error!("Please specify your input files. See --help for more.");
            return Ok(2);
        }
    };

    let report = batch::run(&jobs, |reader, writer| {
        Ok(annotator.annotate_stream(reader, writer)?.errors.len())
    })?;

    for (path, outcome) in &report.files {
        log::info!("{}: {}", path.display(), outcome);
    }

    Ok(report.exit_code())
}

fn main() {
    env_logger::init();
    let opts = Opts::parse();

    match run(opts) {
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}
