//! Page body templates.
//!
//! Both page bodies are [upon] templates rendered below the page header. They
//! are compiled eagerly so that a broken override fails before any page is
//! touched.
//!
//! # Summary template variables
//!
//! | Variable          | Description                                          |
//! |-------------------|------------------------------------------------------|
//! | `library.file`    | Source path as configured (used as the link target)  |
//! | `library.path`    | Expanded path of the file                            |
//! | `library.name`    | File name                                            |
//! | `library.entries` | Number of entries                                    |
//! | `library.updated` | Load timestamp, `2024-01-01T10:00:00+01:00`          |
//! | `groups`          | Sorted group labels (`["A", "S", "Z"]`)              |
//!
//! # Entry template variables
//!
//! | Variable     | Description                                                  |
//! |--------------|--------------------------------------------------------------|
//! | `key`        | Citation key                                                 |
//! | `entry_type` | Entry type as written in the source, lowercased (`article`, ...) |
//! | `group`      | Group label of the key                                       |
//! | `fields`     | List of `{ name, value }`, latest declared first, values on one line |

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use tracing::instrument;
use upon::{Engine, Template};
use zimbib_bibliography::{Library, Record};

/// Library statistics and folder index written to the root page.
pub const DEFAULT_TEMPLATE_SUMMARY: &str = concat!(
    "\n",
    "===== Library =====\n",
    "* [[{{ library.file }}|{{ library.name }}]] | {{ library.entries }} entries | {{ library.updated }}\n",
    "\n",
    "===== Folders =====\n",
    "{% for group in groups %}* [[+{{ group }}|{{ group }}]]\n{% endfor %}",
);

/// Entry type line followed by one line per field.
pub const DEFAULT_TEMPLATE_ENTRY: &str = concat!(
    "\n",
    "@{{ entry_type }}\n",
    "\n",
    "{% for field in fields %}**{{ field.name }}:** {{ field.value }}\n{% endfor %}",
);

pub struct Templates {
    engine: Engine<'static>,
    summary: Template<'static>,
    entry: Template<'static>,
}
impl Templates {
    /// Compiles the given templates, falling back to the defaults for `None`.
    pub fn new(summary: Option<&str>, entry: Option<&str>) -> Result<Self> {
        let engine = Engine::new();
        let summary = summary.unwrap_or(DEFAULT_TEMPLATE_SUMMARY).to_string();
        let summary = engine.compile(summary).or_raise(|| ErrorKind::Template("summary"))?;
        let entry = entry.unwrap_or(DEFAULT_TEMPLATE_ENTRY).to_string();
        let entry = engine.compile(entry).or_raise(|| ErrorKind::Template("entry"))?;
        Ok(Self { engine, summary, entry })
    }

    /// Renders the summary block for `library`.
    #[instrument(skip_all, fields(library = %library.name()))]
    pub fn summary(&self, library: &Library) -> Result<String> {
        self.summary
            .render(&self.engine, summary_context(library))
            .to_string()
            .or_raise(|| ErrorKind::Template("summary"))
    }

    /// Renders the body block for one record.
    #[instrument(skip_all, fields(key = %record.key))]
    pub fn entry(&self, record: &Record) -> Result<String> {
        self.entry.render(&self.engine, entry_context(record)).to_string().or_raise(|| ErrorKind::Template("entry"))
    }
}

fn summary_context(library: &Library) -> upon::Value {
    upon::value! {
        library: upon::value! {
            file: library.source.as_str(),
            path: library.path().display().to_string(),
            name: library.name(),
            entries: library.len() as u64,
            updated: library.updated(),
        },
        groups: upon::Value::List(library.groups().iter().map(|g| upon::Value::from(g.as_str())).collect()),
    }
}

fn entry_context(record: &Record) -> upon::Value {
    let fields: Vec<upon::Value> = record
        .fields_latest_first()
        .map(|field| {
            upon::value! {
                name: field.name.as_str(),
                value: single_line(&field.value),
            }
        })
        .collect();
    upon::value! {
        key: record.key.as_str(),
        entry_type: record.entry_type.as_str(),
        group: record.group().unwrap_or_default(),
        fields: upon::Value::List(fields),
    }
}

/// Replaces every line break (`\r\n`, `\n` or `\r`) with a single space.
pub fn single_line(value: &str) -> String {
    value.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::PathBuf;
    use time::macros::datetime;

    fn library() -> Library {
        let records = vec![
            Record::new("Smith2020", "article").with_field("author", "Smith"),
            Record::new("adams1999", "book"),
            Record::new("Zhou2021", "misc"),
        ];
        Library::new("~/refs.bib", PathBuf::from("/home/me/refs.bib"), records)
            .unwrap()
            .with_loaded_at(datetime!(2024-01-01 10:00:00 +01:00))
    }

    #[rstest]
    #[case("one line", "one line")]
    #[case("two\nlines", "two lines")]
    #[case("dos\r\nline", "dos line")]
    #[case("old\rmac", "old mac")]
    #[case("a\n\nb", "a  b")]
    fn test_single_line(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(single_line(input), expected);
    }

    #[test]
    fn test_default_summary() {
        let templates = Templates::new(None, None).unwrap();
        assert_eq!(
            templates.summary(&library()).unwrap(),
            concat!(
                "\n===== Library =====\n",
                "* [[~/refs.bib|refs.bib]] | 3 entries | 2024-01-01T10:00:00+01:00\n",
                "\n===== Folders =====\n",
                "* [[+A|A]]\n",
                "* [[+S|S]]\n",
                "* [[+Z|Z]]\n",
            )
        );
    }

    #[test]
    fn test_default_entry_reverses_fields() {
        let templates = Templates::new(None, None).unwrap();
        let record = Record::new("Smith2020", "article")
            .with_field("author", "Smith")
            .with_field("title", "A\nmultiline title")
            .with_field("year", "2020");
        assert_eq!(
            templates.entry(&record).unwrap(),
            "\n@article\n\n**year:** 2020\n**title:** A multiline title\n**author:** Smith\n"
        );
    }

    #[test]
    fn test_custom_entry_template() {
        let templates = Templates::new(None, Some("{{ group }}/{{ key }}: {% for f in fields %}{{ f.value }};{% endfor %}")).unwrap();
        let record = Record::new("smith", "misc").with_field("note", "x\ny").with_field("year", "1");
        assert_eq!(templates.entry(&record).unwrap(), "S/smith: 1;x y;");
    }

    #[test]
    fn test_invalid_template_fails_fast() {
        let err = Templates::new(Some("{% for %}"), None).err().unwrap();
        assert!(matches!(&*err, ErrorKind::Template("summary")));
    }

    #[test]
    fn test_unknown_variable_fails_at_render() {
        let templates = Templates::new(None, Some("{{ nope }}")).unwrap();
        let err = templates.entry(&Record::new("k", "misc")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Template("entry")));
    }
}
