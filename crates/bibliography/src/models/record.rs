use std::fmt::{Display, Formatter, Result as FmtResult};

/// A single `name = value` pair of a bibliographic entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: String,
    pub value: String,
}
impl<N: Into<String>, V: Into<String>> From<(N, V)> for Field {
    fn from((name, value): (N, V)) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// One bibliographic entry.
///
/// The citation key and entry type are kept apart from the other fields. The
/// remaining fields are stored in the order they were declared in the source
/// file; that order is part of the contract because entry pages render fields
/// latest-declared first (see [`fields_latest_first`](Self::fields_latest_first)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Citation key, unique within a [`Library`](crate::Library).
    pub key: String,
    /// Entry type tag as written in the source, lowercased (`article`, `book`, ...).
    pub entry_type: String,
    /// Fields in declaration order.
    pub fields: Vec<Field>,
}
impl Record {
    pub fn new(key: impl Into<String>, entry_type: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            entry_type: entry_type.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field, keeping declaration order.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(Field::from((name, value)));
        self
    }

    /// The group label this record is filed under, or `None` for an empty key.
    pub fn group(&self) -> Option<String> {
        group_of(&self.key)
    }

    /// Fields in reverse declaration order: the field declared last comes first.
    pub fn fields_latest_first(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().rev()
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "@{}{{{}}}", self.entry_type, self.key)
    }
}

/// Uppercase of the first character of `key`.
///
/// Some characters uppercase to more than one character (`ß` becomes `SS`);
/// the full uppercase mapping is kept so that the label stays stable.
pub fn group_of(key: &str) -> Option<String> {
    key.chars().next().map(|c| c.to_uppercase().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Smith2020", Some("S"))]
    #[case("adams1999", Some("A"))]
    #[case("9lives", Some("9"))]
    #[case("\u{e9}mile", Some("\u{c9}"))]
    #[case("", None)]
    fn test_group_of(#[case] key: &str, #[case] expected: Option<&str>) {
        assert_eq!(group_of(key).as_deref(), expected);
    }

    #[test]
    fn test_fields_latest_first() {
        let record = Record::new("Smith2020", "article")
            .with_field("author", "Smith, John")
            .with_field("title", "A Title")
            .with_field("year", "2020");
        let names: Vec<_> = record.fields_latest_first().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["year", "title", "author"]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Record::new("Smith2020", "article").to_string(), "@article{Smith2020}");
    }
}
