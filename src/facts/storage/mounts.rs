use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{FactsError, Result};

/// One accepted line of the mount table, fields kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    pub device: String,
    pub mount_point: String,
    pub fs_type: String,
    pub options: String,
}

/// Lazy, single-pass reader over a `fstab(5)`-shaped mount table.
///
/// Lines that do not split into exactly six fields are skipped without
/// complaint. Mount points are arbitrary bytes, so lines are decoded
/// lossily rather than rejected. The underlying handle is dropped with the
/// reader.
pub struct MountTable<R> {
    path: PathBuf,
    reader: R,
    buf: Vec<u8>,
    failed: bool,
}

impl<R: BufRead> MountTable<R> {
    pub fn new(path: impl Into<PathBuf>, reader: R) -> Self {
        Self {
            path: path.into(),
            reader,
            buf: Vec::new(),
            failed: false,
        }
    }
}

/// Open the mount table at `path`. Failing to open it is fatal for the caller.
pub fn open_mount_table(path: &Path) -> Result<MountTable<BufReader<File>>> {
    let file = File::open(path).map_err(|source| FactsError::MountTable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(MountTable::new(path, BufReader::new(file)))
}

impl<R: BufRead> Iterator for MountTable<R> {
    type Item = Result<MountEntry>;

    fn next(&mut self) -> Option<Result<MountEntry>> {
        if self.failed {
            return None;
        }
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(source) => {
                    self.failed = true;
                    return Some(Err(FactsError::MountTable {
                        path: self.path.clone(),
                        source,
                    }));
                }
            }
            let line = String::from_utf8_lossy(&self.buf);
            if let Some(entry) = parse_mount_line(&line) {
                return Some(Ok(entry));
            }
        }
    }
}

/// Split one mount table line: device, mount point, fstype, options, dump, pass.
pub fn parse_mount_line(line: &str) -> Option<MountEntry> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let &[device, mount_point, fs_type, options, _dump, _pass] = fields.as_slice() else {
        return None;
    };

    Some(MountEntry {
        device: device.to_string(),
        mount_point: mount_point.to_string(),
        fs_type: fs_type.to_string(),
        options: options.to_string(),
    })
}
