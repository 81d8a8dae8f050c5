use clap::Parser;
use chatmor::{
    batch,
    components::tagger::{Resources, TaggerConfig},
    config::Config,
    corrections::{correct_stream, Corrector},
};
use log::{error, warn, LevelFilter};
use std::{io, path::PathBuf, process};

/// Correct the %mor tiers of annotated CHAT transcripts.
#[derive(Parser)]
#[clap(version, author)]
struct Opts {
    /// Input directory.
    #[clap(short, long)]
    indir: Option<PathBuf>,
    /// Output directory.
    #[clap(short, long)]
    outdir: Option<PathBuf>,
    /// Read the transcript from stdin and write the result to stdout.
    #[clap(short, long)]
    std: bool,
    /// Log debug messages.
    #[clap(long)]
    verbose: bool,
    /// JSON configuration file, used to find the tagger for --dem-lemma.
    #[clap(short, long)]
    config: Option<PathBuf>,
    /// Lexicon compiled with chatmor-compile, used instead of MorphoDiTa.
    #[clap(long)]
    lexicon: Option<PathBuf>,
    /// Perform all applicable corrections.
    #[clap(short, long)]
    all: bool,
    /// Annotate selected instances of the verb "být" as v:cop.
    #[clap(long)]
    vcop: bool,
    /// Remove grammatical categories from the word "co" when annotated as part.
    #[clap(long)]
    part_nogram: bool,
    /// Use a positive form as lemma for adjectives and adverbs.
    #[clap(long)]
    adj_adv_compdeg: bool,
    /// Fix lemmatization of demonstratives.
    #[clap(long)]
    dem_lemma: bool,
    /// Fix lemmatization of the word "lidé".
    #[clap(long)]
    people_lemma: bool,
}

fn correctors(opts: &Opts) -> Result<Vec<Corrector>, chatmor::Error> {
    let tagger = if opts.all || opts.dem_lemma {
        let mut config = match &opts.config {
            Some(path) => Config::from_json(path)?,
            None => Config::default(),
        };
        if let Some(path) = &opts.lexicon {
            config.tagger = TaggerConfig::Lexicon { path: path.clone() };
        }
        Some(Resources::new().tagger(&config.tagger)?)
    } else {
        None
    };

    let mut correctors = Vec::new();

    if opts.all || opts.vcop {
        correctors.push(Corrector::Vcop);
    }
    if opts.all || opts.part_nogram {
        correctors.push(Corrector::PartNogram);
    }
    if opts.all || opts.adj_adv_compdeg {
        correctors.push(Corrector::AdjAdvCompdeg);
    }
    if let Some(tagger) = tagger {
        correctors.push(Corrector::DemLemma(tagger));
    }
    if opts.all || opts.people_lemma {
        correctors.push(Corrector::PeopleLemma);
    }

    if correctors.is_empty() {
        warn!("No corrections selected");
    }

    Ok(correctors)
}

fn run(opts: Opts) -> Result<i32, chatmor::Error> {
    let correctors = correctors(&opts)?;

    if opts.std {
        correct_stream(io::stdin().lock(), io::stdout().lock(), &correctors)?;
    }

    match (&opts.indir, &opts.outdir) {
        (Some(indir), Some(outdir)) => {
            let jobs = batch::jobs_from_dir(indir, outdir, &["txt"])?;
            let report = batch::run(&jobs, |reader, writer| {
                correct_stream(reader, writer, &correctors)?;
                Ok(0)
            })?;

            Ok(report.exit_code())
        }
        (None, None) => Ok(0),
        _ => {
            warn!("Both input directory and output directory must be specified");
            Ok(2)
        }
    }
}

fn main() {
    let opts = Opts::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if opts.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    match run(opts) {
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}
