use std::{
    fs::File,
    io::{self, BufReader, Read, Seek},
    path::Path,
};

use parking_lot::Mutex;
use zip::{CompressionMethod, ZipArchive, read::ZipFile, result::ZipError};

use crate::error::ArchiveError;

// upper bound on what a declared entry size may preallocate
const MAX_PREALLOCATION: usize = 1 << 20;

/// An archive member, as listed in the central directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub index: usize,
    pub name: String,
}

impl Entry {
    pub fn is_dir(&self) -> bool {
        self.name.ends_with('/')
    }
}

/// Decompressed contents of one entry.
#[derive(Debug)]
pub struct EntryData {
    pub name: String,
    pub compression: CompressionMethod,
    pub compressed_size: u64,
    pub bytes: Vec<u8>,
}

/// Read-only view of a zip archive.
///
/// The central directory is read once on construction; entries are
/// decompressed on demand. The zip reader sits behind a mutex so entries
/// can be pulled from several threads.
#[derive(Debug)]
pub struct ArchiveReader<R> {
    archive: Mutex<ZipArchive<R>>,
}

impl ArchiveReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ArchiveError> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> ArchiveReader<R> {
    pub fn new(reader: R) -> Result<Self, ArchiveError> {
        let archive = ZipArchive::new(reader)
            .map_err(|err| ArchiveError::CorruptArchive(err.to_string()))?;
        Ok(Self {
            archive: Mutex::new(archive),
        })
    }

    pub fn len(&self) -> usize {
        self.archive.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries in archive order.
    pub fn entries(&self) -> impl Iterator<Item = Entry> + '_ {
        (0..self.len()).filter_map(move |index| {
            let archive = self.archive.lock();
            archive.name_for_index(index).map(|name| Entry {
                index,
                name: name.to_owned(),
            })
        })
    }

    pub fn read(&self, entry: &Entry) -> Result<EntryData, ArchiveError> {
        let mut archive = self.archive.lock();
        let file = archive
            .by_index(entry.index)
            .map_err(|err| entry_error(&entry.name, err))?;
        read_entry(file)
    }

    pub fn open_entry(&self, name: &str) -> Result<EntryData, ArchiveError> {
        let mut archive = self.archive.lock();
        let file = archive
            .by_name(name)
            .map_err(|err| entry_error(name, err))?;
        read_entry(file)
    }
}

fn read_entry<R: Read>(mut file: ZipFile<R>) -> Result<EntryData, ArchiveError> {
    let name = file.name().to_owned();
    let mut bytes = Vec::with_capacity((file.size() as usize).min(MAX_PREALLOCATION));
    if let Err(err) = file.read_to_end(&mut bytes) {
        return Err(match err.kind() {
            io::ErrorKind::Unsupported => ArchiveError::UnsupportedCompression {
                name,
                reason: err.to_string(),
            },
            _ => ArchiveError::CorruptArchive(format!("{name}: {err}")),
        });
    }

    Ok(EntryData {
        compression: file.compression(),
        compressed_size: file.compressed_size(),
        name,
        bytes,
    })
}

fn entry_error(name: &str, err: ZipError) -> ArchiveError {
    match err {
        ZipError::FileNotFound => ArchiveError::EntryNotFound(name.to_owned()),
        ZipError::UnsupportedArchive(reason) => ArchiveError::UnsupportedCompression {
            name: name.to_owned(),
            reason: reason.to_string(),
        },
        err => ArchiveError::CorruptArchive(format!("{name}: {err}")),
    }
}
