use clap::Parser;
use chatmor::components::{tagger::LexiconTagger, Component};
use fs_err::File;
use log::info;
use std::{io::BufWriter, path::PathBuf};

/// Compile tab separated "word lemma tag" dumps into a binary lexicon.
#[derive(Parser)]
#[clap(version, author)]
struct Opts {
    /// Dumps to read, earlier analyses of a word take precedence.
    #[clap(required = true)]
    dumps: Vec<PathBuf>,
    /// Files with lines to leave out.
    #[clap(short, long)]
    remove: Vec<PathBuf>,
    #[clap(short, long)]
    out: PathBuf,
}

fn main() -> Result<(), chatmor::Error> {
    env_logger::init();
    let opts = Opts::parse();

    let tagger = LexiconTagger::from_dumps(&opts.dumps, &opts.remove)?;
    info!("Writing {} words to {}", tagger.len(), opts.out.display());

    tagger.to_writer(BufWriter::new(File::create(&opts.out)?))
}
