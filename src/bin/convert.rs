use clap::Parser;
use chatmor::{batch, convert::convert_stream};
use log::error;
use std::{io, path::PathBuf, process};

/// Convert transcripts to the v3.1 transcription standard.
#[derive(Parser)]
#[clap(version, author)]
struct Opts {
    /// Files to convert.
    inputfiles: Vec<PathBuf>,
    /// Read the transcript from stdin and write the result to stdout.
    #[clap(short, long)]
    std: bool,
    /// Convert all .txt and .cha files in this directory instead of `inputfiles`.
    #[clap(short, long)]
    indir: Option<PathBuf>,
    /// Directory to write converted files to.
    #[clap(short, long)]
    outdir: Option<PathBuf>,
    /// Fix possibly untrivial syntax errors.
    #[clap(short, long)]
    fix: bool,
}

fn run(opts: Opts) -> Result<i32, chatmor::Error> {
    if opts.std {
        let errors = convert_stream(io::stdin().lock(), io::stdout().lock(), opts.fix)?;
        return Ok(if errors.is_empty() { 0 } else { 1 });
    }

    let outdir = match &opts.outdir {
        Some(outdir) => outdir,
        None => {
            error!("An output directory needs to be specified. See --help for more.");
            return Ok(2);
        }
    };

    let jobs = match &opts.indir {
        Some(indir) => batch::jobs_from_dir(indir, outdir, &["txt", "cha"])?,
        None => batch::jobs_from_files(&opts.inputfiles, outdir),
    };

    let report = batch::run(&jobs, |reader, writer| {
        Ok(convert_stream(reader, writer, opts.fix)?.len())
    })?;

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
