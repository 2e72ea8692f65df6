use super::{Record, group_of};
use crate::error::{ErrorKind, Result};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::macros::format_description;

/// Every record loaded from one bibliography file, plus summary metadata.
///
/// A `Library` is built fresh on every load and is never cached. Construction
/// through [`Library::new`] guarantees that keys are non-empty and unique, and
/// that [`groups`](Self::groups) is the sorted, deduplicated set of group labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    /// The source path exactly as configured (before `~` expansion).
    pub source: String,
    /// The expanded path the file was read from.
    pub path: PathBuf,
    records: Vec<Record>,
    groups: Vec<String>,
    /// Wall clock time of the load, local offset, second precision.
    pub loaded_at: OffsetDateTime,
}
impl Library {
    /// Validates `records` and derives the group index, stamping the current time.
    pub fn new(source: impl Into<String>, path: impl Into<PathBuf>, records: Vec<Record>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if record.key.is_empty() {
                exn::bail!(ErrorKind::EmptyKey(index + 1));
            }
            if !seen.insert(record.key.as_str()) {
                exn::bail!(ErrorKind::DuplicateKey(record.key.clone()));
            }
        }
        let groups = derive_groups(records.iter().map(|r| r.key.as_str()));
        Ok(Self {
            source: source.into(),
            path: path.into(),
            records,
            groups,
            loaded_at: now(),
        })
    }

    /// Overrides the load timestamp.
    pub fn with_loaded_at(mut self, loaded_at: OffsetDateTime) -> Self {
        self.loaded_at = loaded_at;
        self
    }

    /// Display name of the library: the file name of its path.
    pub fn name(&self) -> String {
        self.path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_else(|| self.source.clone())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in source order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Sorted group labels, one per distinct uppercase first character of a key.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// ISO-8601 rendering of [`loaded_at`](Self::loaded_at), e.g. `2024-01-01T10:00:00+01:00`.
    pub fn updated(&self) -> String {
        let format = format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]"
        );
        // Infallible: an OffsetDateTime carries every component the format asks for.
        self.loaded_at.format(format).unwrap_or_else(|_| self.loaded_at.to_string())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Collects the group label of every key into a sorted set.
///
/// Empty keys have no group and are skipped here; [`Library::new`] rejects
/// them before this is reached.
pub fn derive_groups<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    keys.into_iter().filter_map(group_of).collect::<BTreeSet<_>>().into_iter().collect()
}

fn now() -> OffsetDateTime {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| {
        tracing::debug!("Local UTC offset is indeterminate; using UTC");
        OffsetDateTime::now_utc()
    });
    now.replace_nanosecond(0).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use time::macros::datetime;

    fn records(keys: &[&str]) -> Vec<Record> {
        keys.iter().map(|k| Record::new(*k, "misc")).collect()
    }

    #[test]
    fn test_groups_sorted_uppercase() {
        let library = Library::new("refs.bib", "refs.bib", records(&["Smith2020", "adams1999", "Zhou2021"])).unwrap();
        assert_eq!(library.groups(), ["A", "S", "Z"]);
    }

    #[rstest]
    #[case(&["smith", "Smith2", "SMITH3"], &["S"])]
    #[case(&["b", "a", "c", "A"], &["A", "B", "C"])]
    #[case(&[], &[])]
    fn test_groups_deduplicated(#[case] keys: &[&str], #[case] expected: &[&str]) {
        let library = Library::new("refs.bib", "refs.bib", records(keys)).unwrap();
        assert_eq!(library.groups(), expected);
        assert_eq!(library.len(), keys.len());
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = Library::new("refs.bib", "refs.bib", records(&["ok", ""])).unwrap_err();
        assert!(matches!(&*err, ErrorKind::EmptyKey(2)));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let err = Library::new("refs.bib", "refs.bib", records(&["a", "b", "a"])).unwrap_err();
        assert!(matches!(&*err, ErrorKind::DuplicateKey(k) if k == "a"));
    }

    #[test]
    fn test_name_and_updated() {
        let library = Library::new("~/papers/refs.bib", "/home/me/papers/refs.bib", vec![])
            .unwrap()
            .with_loaded_at(datetime!(2024-01-01 10:00:00 +01:00));
        assert_eq!(library.name(), "refs.bib");
        assert_eq!(library.updated(), "2024-01-01T10:00:00+01:00");
    }

    #[test]
    fn test_loaded_at_has_second_precision() {
        let library = Library::new("refs.bib", "refs.bib", vec![]).unwrap();
        assert_eq!(library.loaded_at.nanosecond(), 0);
    }
}
