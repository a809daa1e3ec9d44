//! The record store: one [`Tree`] plus loading and saving it as a flat text file.
//!
//! The file holds one record per line as `name month day year`, in ascending name order, with
//! no header. Loading adds to whatever is already in the store and stops at the first line
//! that isn't a well formed record.
//!
//! # Examples
//!
//! ```
//! use birthday_book::record::Date;
//! use birthday_book::store::Store;
//!
//! let mut store = Store::new();
//! store.add_record("Bob", Date::new(5, 1, 1990));
//! store.add_record("Amy", Date::new(3, 2, 1991));
//!
//! let mut file = Vec::new();
//! assert_eq!(store.write_to(&mut file).unwrap(), 2);
//! assert_eq!(file, b"Amy 3 2 1991\nBob 5 1 1990\n");
//!
//! let mut copy = Store::new();
//! let report = copy.read_from(&file[..]);
//! assert_eq!(report.inserted, 2);
//! assert_eq!(copy.search("Bob"), store.search("Bob"));
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::error::StoreError;
use crate::record::{is_valid_name, Date, Record};
use crate::tree::{ByMonth, Iter, Tree};

/// Where the console saves and loads when not told otherwise.
pub const DEFAULT_PATH: &str = "database.txt";

/// Holds the records and knows how to persist them.
#[derive(Clone, Debug, Default)]
pub struct Store {
    tree: Tree,
}

/// What a load did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records that were new to the store.
    pub inserted: usize,
    /// Well formed records whose name was already present.
    pub duplicates: usize,
    /// 1-based line number of the line that stopped the load, if one did.
    pub halted_at: Option<usize>,
}

impl Store {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many records are stored.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Adds a record. Returns `false` if `name` was already taken, in which case the existing
    /// record is kept, or if `name` couldn't be saved and read back (empty, or containing
    /// whitespace).
    pub fn add_record(&mut self, name: impl Into<String>, birthday: Date) -> bool {
        let name = name.into();
        if !is_valid_name(&name) {
            debug!(name = name.as_str(), "add ignored, name is empty or has whitespace");
            return false;
        }
        self.tree.insert(Record::new(name, birthday))
    }

    /// Removes the record stored under `name`, returning it if there was one.
    pub fn delete_record(&mut self, name: &str) -> Option<Record> {
        let removed = self.tree.remove(name);
        if removed.is_none() {
            debug!(name, "delete ignored, no such name");
        }
        removed
    }

    /// A copy of the record stored under `name`.
    pub fn search(&self, name: &str) -> Option<Record> {
        self.tree.search(name)
    }

    /// Every record in ascending name order.
    pub fn list_all(&self) -> Iter<'_> {
        self.tree.iter()
    }

    /// The records born in `month` in ascending name order.
    pub fn list_by_month(&self, month: i32) -> ByMonth<'_> {
        self.tree.by_month(month)
    }

    /// Prints every record as `Name: <name>, Birthday: <m>/<d>/<y>`, one per line.
    pub fn print_all<W: Write>(&self, out: W) -> io::Result<()> {
        print_records(self.list_all(), out)
    }

    /// Like [`print_all`][Self::print_all], restricted to one birth month.
    pub fn print_by_month<W: Write>(&self, month: i32, out: W) -> io::Result<()> {
        print_records(self.list_by_month(month), out)
    }

    /// Writes the records in the persisted line format. Returns how many were written.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<usize> {
        let mut written = 0;
        for line in self.tree.serialize_ordered() {
            writeln!(out, "{line}")?;
            written += 1;
        }
        out.flush()?;
        Ok(written)
    }

    /// Reads records in the persisted line format and adds them. Blank lines are skipped and
    /// anything after the year is ignored. The first line that doesn't start with
    /// `name month day year` stops the load, but the records before it stay added.
    pub fn read_from<R: BufRead>(&mut self, input: R) -> LoadReport {
        let mut report = LoadReport::default();
        for (index, line) in input.lines().enumerate() {
            let line_number = index + 1;
            let line = match line {
                Ok(line) => line,
                Err(error) => {
                    warn!(line_number, %error, "unreadable line, load stopped");
                    report.halted_at = Some(line_number);
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Record>() {
                Ok(record) => {
                    if self.tree.insert(record) {
                        report.inserted += 1;
                    } else {
                        report.duplicates += 1;
                    }
                }
                Err(error) => {
                    warn!(line_number, %error, "malformed record, load stopped");
                    report.halted_at = Some(line_number);
                    break;
                }
            }
        }
        report
    }

    /// Saves every record to `path`, replacing the file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn try_persist(&self, path: impl AsRef<Path>) -> Result<usize, StoreError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| StoreError::Io {
            path: path.to_owned(),
            source,
        })?;
        let written = self.write_to(BufWriter::new(file))?;
        info!(written, "saved");
        Ok(written)
    }

    /// Saves every record to `path`. Failures are logged and otherwise ignored; the return
    /// value is how many records made it out.
    pub fn persist(&self, path: impl AsRef<Path>) -> usize {
        self.try_persist(path).unwrap_or_else(|error| {
            warn!(%error, "save failed");
            0
        })
    }

    /// Loads records from `path` into the store.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn try_restore(&mut self, path: impl AsRef<Path>) -> Result<LoadReport, StoreError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| StoreError::Io {
            path: path.to_owned(),
            source,
        })?;
        let report = self.read_from(BufReader::new(file));
        info!(
            inserted = report.inserted,
            duplicates = report.duplicates,
            "loaded"
        );
        Ok(report)
    }

    /// Loads records from `path` into the store. A file that can't be opened loads nothing.
    pub fn restore(&mut self, path: impl AsRef<Path>) -> LoadReport {
        self.try_restore(path).unwrap_or_else(|error| {
            warn!(%error, "load failed");
            LoadReport::default()
        })
    }
}

fn print_records<'a, W: Write>(
    records: impl Iterator<Item = &'a Record>,
    mut out: W,
) -> io::Result<()> {
    for record in records {
        writeln!(out, "{record}")?;
    }
    Ok(())
}

impl FromIterator<Record> for Store {
    /// Collects through [`add_record`][Store::add_record], so invalid names are dropped.
    fn from_iter<I: IntoIterator<Item = Record>>(records: I) -> Self {
        let mut store = Self::new();
        for record in records {
            store.add_record(record.name(), record.birthday());
        }
        store
    }
}
