//! Rolled archive bookkeeping
//!
//! Archives follow the "max" index strategy: a higher index is newer. The
//! first rollover produces index 1; once `max_archives` exist the oldest is
//! deleted and the rest shift down by one.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::config::RollingFileSpec;

/// Pick the index for the next archive, shifting older archives if full
pub(crate) fn next_index(spec: &RollingFileSpec) -> io::Result<u32> {
    let max = spec.max_archives;
    let highest = (1..=max).rev().find(|&index| spec.archive_path(index).exists());

    match highest {
        None => Ok(1),
        Some(highest) if highest < max => Ok(highest + 1),
        Some(_) => {
            let oldest = spec.archive_path(1);
            if oldest.exists() {
                fs::remove_file(&oldest)?;
            }
            for index in 2..=max {
                let from = spec.archive_path(index);
                if from.exists() {
                    fs::rename(&from, spec.archive_path(index - 1))?;
                }
            }
            Ok(max)
        }
    }
}

/// Deflate `source` into a single-entry zip at `destination`
///
/// The archive is staged next to `destination` and renamed into place, so a
/// failed compression never leaves a partial archive under an index.
pub(crate) fn compress(source: &Path, destination: &Path, entry_name: &str) -> io::Result<()> {
    if let Some(dir) = destination.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let staging = staging_path(destination);
    let written = write_archive(source, &staging, entry_name);
    if let Err(error) = written {
        let _ = fs::remove_file(&staging);
        return Err(error);
    }
    fs::rename(&staging, destination)
}

fn write_archive(source: &Path, staging: &Path, entry_name: &str) -> io::Result<()> {
    let mut input = BufReader::new(File::open(source)?);
    let mut archive = zip::ZipWriter::new(File::create(staging)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    archive
        .start_file(entry_name, options)
        .map_err(io::Error::other)?;
    io::copy(&mut input, &mut archive)?;
    archive.finish().map_err(io::Error::other)?;
    Ok(())
}

fn staging_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}
