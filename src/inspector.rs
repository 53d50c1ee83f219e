use std::{
    fs::File,
    io::{BufReader, Read, Seek},
    path::Path,
};

use rayon::prelude::*;

use crate::{
    archive::{ArchiveReader, Entry},
    consts::CLASS_FILE_SUFFIX,
    error::{ArchiveError, DecodeError, DecodeWarning, EntryError},
    unit::{self, UnitDescription},
};

// multi-release jars keep versioned copies under this prefix
const VERSIONED_PREFIX: &str = "META-INF/versions/";

pub type InspectResult = Result<UnitDescription, EntryError>;

#[derive(Debug, Clone)]
pub struct InspectOptions {
    /// Entries whose name ends with this are decoded.
    pub suffix: String,
    /// Decode entries on the rayon pool.
    pub parallel: bool,
    /// Fail units with an unsupported class file version instead of
    /// only warning about them.
    pub strict_versions: bool,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            suffix: CLASS_FILE_SUFFIX.to_owned(),
            parallel: false,
            strict_versions: false,
        }
    }
}

/// Decodes every compiled unit in one archive.
///
/// A unit that fails to decode is reported in its slot and never stops the
/// scan; only failing to open the archive itself is fatal.
#[derive(Debug)]
pub struct Inspector<R> {
    reader: ArchiveReader<R>,
    options: InspectOptions,
}

impl Inspector<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>, options: InspectOptions) -> Result<Self, ArchiveError> {
        Ok(Self::new(ArchiveReader::open(path)?, options))
    }
}

impl<R: Read + Seek> Inspector<R> {
    pub fn new(reader: ArchiveReader<R>, options: InspectOptions) -> Self {
        Self { reader, options }
    }

    pub fn reader(&self) -> &ArchiveReader<R> {
        &self.reader
    }

    /// Entries that will be decoded, in archive order.
    pub fn candidates(&self) -> impl Iterator<Item = Entry> + '_ {
        self.reader.entries().filter(|entry| {
            let candidate = !entry.is_dir() && entry.name.ends_with(&self.options.suffix);
            if !candidate {
                log::debug!("skipping {}", entry.name);
            }
            candidate
        })
    }

    pub fn inspect(&self) -> Vec<InspectResult> {
        self.candidates()
            .map(|entry| self.inspect_entry(&entry))
            .collect()
    }

    pub fn inspect_entry(&self, entry: &Entry) -> InspectResult {
        self.decode_entry(entry).map_err(|source| EntryError {
            entry: entry.name.clone(),
            source,
        })
    }

    fn decode_entry(&self, entry: &Entry) -> Result<UnitDescription, DecodeError> {
        let data = self.reader.read(entry)?;
        let mut unit = unit::parse(&data.bytes)?;

        if self.options.strict_versions && !unit.version.is_supported() {
            return Err(DecodeError::UnsupportedVersion {
                major: unit.version.major,
                minor: unit.version.minor,
            });
        }

        if let Some(stored_as) = self.stored_name(entry) {
            if stored_as != unit.name {
                log::warn!("{}: declares {}", entry.name, unit.name);
                unit.warnings.push(DecodeWarning::NameMismatch {
                    declared: unit.name.clone(),
                    entry: stored_as,
                });
            }
        }
        log::debug!("decoded {} from {}", unit.name, entry.name);
        Ok(unit)
    }

    /// Dotted unit name implied by the entry path.
    fn stored_name(&self, entry: &Entry) -> Option<String> {
        let path = entry.name.strip_suffix(&self.options.suffix)?;
        let path = match path.strip_prefix(VERSIONED_PREFIX) {
            Some(versioned) => versioned.split_once('/')?.1,
            None => path,
        };
        Some(path.replace('/', "."))
    }
}

impl<R: Read + Seek + Send> Inspector<R> {
    /// Same results as [`Inspector::inspect`], decoded on the rayon pool.
    ///
    /// The candidate list is taken up front; workers only share the zip
    /// reader long enough to decompress their entry.
    pub fn par_inspect(&self) -> Vec<InspectResult> {
        let entries: Vec<_> = self.candidates().collect();
        entries
            .par_iter()
            .map(|entry| self.inspect_entry(entry))
            .collect()
    }

    pub fn run(&self) -> Vec<InspectResult> {
        if self.options.parallel {
            self.par_inspect()
        } else {
            self.inspect()
        }
    }
}

/// Decodes every `.class` entry of the archive at `path`.
pub fn inspect(path: impl AsRef<Path>) -> Result<Vec<InspectResult>, ArchiveError> {
    Ok(Inspector::open(path, InspectOptions::default())?.inspect())
}
