use crate::{CResult, Domain, EmailSet, HarvestError};
use chrono::{DateTime, Local};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::info;

const PROBE_FILE: &str = ".harvester_write_probe";
const MAX_SUFFIX: u32 = 1000;

/// Makes sure `dir` exists and accepts new files. Runs before any network request so a bad
/// directory never leaves partial results behind.
pub fn prepare_output_dir(dir: &Path) -> CResult<()> {
    let unusable = |reason: String| HarvestError::OutputDir {
        path: dir.to_path_buf(),
        reason,
    };
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| unusable(e.to_string()))?;
        info!("created output directory {}", dir.display());
    } else if !dir.is_dir() {
        return Err(unusable("not a directory".into()));
    }
    let probe = dir.join(PROBE_FILE);
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&probe)
        .map_err(|e| unusable(e.to_string()))?;
    fs::remove_file(&probe)?;
    Ok(())
}

pub fn output_file_name(domain: &Domain, time: DateTime<Local>) -> String {
    format!("{}_{}.txt", domain, time.format("%Y%m%d_%H%M%S"))
}

/// Writes the addresses of one domain, one per line, into a fresh timestamped file.
///
/// Existing files are never touched: when the name is taken (same domain, same second) a
/// `_1`, `_2`, ... suffix is tried instead.
pub fn save_results(emails: &EmailSet, domain: &Domain, output_dir: &Path) -> CResult<PathBuf> {
    let name = output_file_name(domain, Local::now());
    let (file, path) = create_unique(output_dir, &name)?;
    let mut writer = BufWriter::new(file);
    for email in emails {
        writeln!(writer, "{email}")?;
    }
    writer.flush()?;
    info!("results saved to {}", path.display());
    Ok(path)
}

fn create_unique(output_dir: &Path, name: &str) -> CResult<(File, PathBuf)> {
    let stem = name.trim_end_matches(".txt");
    let mut attempt = 0;
    loop {
        let path = match attempt {
            0 => output_dir.join(name),
            n => output_dir.join(format!("{stem}_{n}.txt")),
        };
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((file, path)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists && attempt < MAX_SUFFIX => attempt += 1,
            Err(e) => return Err(e.into()),
        }
    }
}
