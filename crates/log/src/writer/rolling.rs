//! Size-triggered rolling file writer
//!
//! The active file is opened lazily on the first record, so a missing or
//! unwritable directory only shows up as a write error. Each record is
//! written under one lock; when it would push the file past the threshold
//! the file is archived first and a fresh one started.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use tracing_subscriber::fmt::MakeWriter;

use super::archive;
use crate::config::RollingFileSpec;

/// Rolling file shared by every producer of an appender
#[derive(Debug, Clone)]
pub struct RollingFileWriter {
    state: Arc<Mutex<RollingState>>,
}

#[derive(Debug)]
struct RollingState {
    spec: RollingFileSpec,
    file: Option<FileSink>,
    size: u64,
    /// Only the writer's first open honours `append = false`
    truncate_on_open: bool,
}

#[derive(Debug)]
enum FileSink {
    Buffered(BufWriter<File>),
    Direct(File),
}

/// Writer handed out per record; holds the appender lock until dropped
#[derive(Debug)]
pub struct RollingFileGuard<'a> {
    state: MutexGuard<'a, RollingState>,
}

impl RollingFileWriter {
    /// Create a writer; nothing is opened until the first write
    pub fn new(spec: RollingFileSpec) -> Self {
        Self {
            state: Arc::new(Mutex::new(RollingState {
                truncate_on_open: !spec.append,
                spec,
                file: None,
                size: 0,
            })),
        }
    }

    /// Bytes in the active file as tracked by the writer
    pub fn current_size(&self) -> u64 {
        self.state.lock().size
    }
}

impl<'a> MakeWriter<'a> for RollingFileWriter {
    type Writer = RollingFileGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        RollingFileGuard {
            state: self.state.lock(),
        }
    }
}

impl Write for RollingFileGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.state.write_record(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.state.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl RollingState {
    fn write_record(&mut self, buf: &[u8]) -> io::Result<usize> {
        let len = buf.len() as u64;
        self.open()?;

        // A failed rollover keeps the record in the current file and is
        // reported after the write.
        let rolled = if self.size > 0 && self.size.saturating_add(len) > self.spec.max_size_bytes {
            self.roll_over()
        } else {
            Ok(())
        };

        let immediate_flush = self.spec.immediate_flush;
        let file = self.open()?;
        file.write_all(buf)?;
        if immediate_flush {
            file.flush()?;
        }
        self.size += len;

        rolled.map(|()| buf.len())
    }

    fn open(&mut self) -> io::Result<&mut FileSink> {
        let sink = match self.file.take() {
            Some(sink) => sink,
            None => self.open_file()?,
        };
        Ok(self.file.insert(sink))
    }

    fn open_file(&mut self) -> io::Result<FileSink> {
        let path = &self.spec.file;
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let mut options = OpenOptions::new();
        options.create(true);
        if self.truncate_on_open {
            options.write(true).truncate(true);
        } else {
            options.append(true);
        }
        let file = options.open(path)?;
        self.truncate_on_open = false;

        self.size = file.metadata()?.len();
        Ok(if self.spec.buffered {
            FileSink::Buffered(BufWriter::new(file))
        } else {
            FileSink::Direct(file)
        })
    }

    fn roll_over(&mut self) -> io::Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }

        let index = archive::next_index(&self.spec)?;
        archive::compress(
            &self.spec.file,
            &self.spec.archive_path(index),
            &self.spec.archive_entry_name(index),
        )?;

        // The content is archived; an active file that cannot be removed
        // is emptied instead so it is not archived twice.
        if fs::remove_file(&self.spec.file).is_err() {
            OpenOptions::new()
                .write(true)
                .truncate(true)
                .open(&self.spec.file)?;
        }
        self.size = 0;
        Ok(())
    }
}

impl Write for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileSink::Buffered(w) => w.write(buf),
            FileSink::Direct(f) => f.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileSink::Buffered(w) => w.flush(),
            FileSink::Direct(f) => f.flush(),
        }
    }
}
