//! Processing of whole files and directories.

use std::{
    fmt,
    io::{BufReader, BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};

use fs_err as fs;
use log::{error, info, warn};

use crate::Error;

/// One input file and the path its output is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Success,
    /// The file was processed, but some of its lines could not be converted.
    CompletedWithErrors(usize),
    /// The file was not processed.
    Skipped(String),
    /// Processing stopped with an error, the output may be incomplete.
    Failed(String),
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FileOutcome::Success)
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOutcome::Success => write!(f, "ok"),
            FileOutcome::CompletedWithErrors(n) => write!(f, "completed with {} errors", n),
            FileOutcome::Skipped(reason) => write!(f, "skipped ({})", reason),
            FileOutcome::Failed(reason) => write!(f, "failed ({})", reason),
        }
    }
}

/// Outcomes of all files of a batch, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub files: Vec<(PathBuf, FileOutcome)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.files.iter().all(|(_, outcome)| outcome.is_success())
    }

    /// Process exit code: 0 if every file succeeded, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| extensions.contains(&ext))
}

fn collect_recursive(dir: &Path, extensions: &[&str], out: &mut Vec<PathBuf>) -> Result<(), Error> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            collect_recursive(&path, extensions, out)?;
        } else if has_extension(&path, extensions) {
            out.push(path);
        }
    }

    Ok(())
}

/// All files under `input_dir` with one of the given extensions, sorted. Each output path is
/// the path relative to `input_dir` joined onto `output_dir`.
pub fn jobs_from_dir<P1: AsRef<Path>, P2: AsRef<Path>>(
    input_dir: P1,
    output_dir: P2,
    extensions: &[&str],
) -> Result<Vec<FileJob>, Error> {
    let input_dir = input_dir.as_ref();
    let mut paths = Vec::new();
    collect_recursive(input_dir, extensions, &mut paths)?;
    paths.sort();

    Ok(paths
        .into_iter()
        .map(|input| {
            let relative = input.strip_prefix(input_dir).unwrap_or(&input).to_path_buf();
            FileJob {
                output: output_dir.as_ref().join(relative),
                input,
            }
        })
        .collect())
}

/// Jobs for explicitly listed files. Outputs keep the base name of their input.
pub fn jobs_from_files<P1: AsRef<Path>, P2: AsRef<Path>>(
    files: &[P1],
    output_dir: P2,
) -> Vec<FileJob> {
    files
        .iter()
        .map(|input| {
            let input = input.as_ref();
            let name = input.file_name().unwrap_or_else(|| input.as_os_str());
            FileJob {
                input: input.to_path_buf(),
                output: output_dir.as_ref().join(name),
            }
        })
        .collect()
}

fn process_job<F>(job: &FileJob, file: fs::File, process: &mut F) -> Result<usize, Error>
where
    F: FnMut(&mut dyn std::io::BufRead, &mut dyn Write) -> Result<usize, Error>,
{
    info!("{} -> {}", job.input.display(), job.output.display());

    if let Some(parent) = job.output.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut reader = BufReader::new(file);
    let mut writer = BufWriter::new(fs::File::create(&job.output)?);

    let errors = process(&mut reader, &mut writer)?;
    writer.flush()?;

    Ok(errors)
}

/// Runs `process` on every job, reading the input and writing the output file. `process`
/// returns the number of lines it could not convert.
///
/// Missing inputs and directories given as files are skipped. Any other error fails that file
/// only, the remaining jobs are still processed.
pub fn run<F>(jobs: &[FileJob], mut process: F) -> Result<BatchReport, Error>
where
    F: FnMut(&mut dyn std::io::BufRead, &mut dyn Write) -> Result<usize, Error>,
{
    let mut report = BatchReport::default();

    for job in jobs {
        let outcome = if job.input.is_dir() {
            FileOutcome::Skipped("directory".into())
        } else {
            match fs::File::open(&job.input) {
                Err(e) if e.kind() == ErrorKind::NotFound => FileOutcome::Skipped("not found".into()),
                Err(e) => FileOutcome::Failed(e.to_string()),
                Ok(file) => match process_job(job, file, &mut process) {
                    Ok(0) => FileOutcome::Success,
                    Ok(n) => FileOutcome::CompletedWithErrors(n),
                    Err(e) => FileOutcome::Failed(e.to_string()),
                },
            }
        };

        match &outcome {
            FileOutcome::Success => {}
            FileOutcome::CompletedWithErrors(n) => {
                error!("{}: {} lines could not be converted", job.input.display(), n)
            }
            FileOutcome::Skipped(reason) => warn!("Skip {} ({})", job.input.display(), reason),
            FileOutcome::Failed(reason) => error!("{}: {}", job.input.display(), reason),
        }

        report.files.push((job.input.clone(), outcome));
    }

    Ok(report)
}
