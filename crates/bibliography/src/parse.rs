//! Adapter over the [`biblatex`] parser.
//!
//! The grammar itself is entirely the parser's business. This module only
//! converts its entries into [`Record`]s and its errors into
//! [`ErrorKind::Syntax`] with a human-readable position.
//!
//! Entry types and field order come from the raw parse, before the parser
//! maps types onto its own vocabulary and files fields in a sorted map.
//! Field values come from the resolved parse, so `@string` macros and `#`
//! concatenation are expanded.

use crate::error::{ErrorKind, Result};
use crate::models::{Field, Record};
use biblatex::{Bibliography, ChunksExt, Entry, ParseError, ParseErrorKind, RawBibliography, Token};
use std::borrow::Cow;
use tracing::instrument;

/// Parses BibTeX source text into records, in source order.
///
/// Entry types are lowercased but otherwise kept as written: `@conference`
/// stays `conference` and `@software` or `@frobnicator` are accepted as is.
///
/// An entry with a key but no fields (`@misc{key}`) is read as an entry
/// with no fields, although the parser requires a comma after the key.
///
/// # Errors
/// Returns [`ErrorKind::Syntax`] when the input is malformed and
/// [`ErrorKind::DuplicateKey`] when two entries share a key.
#[instrument(skip(text), fields(text_size = text.len()))]
pub fn parse(text: &str) -> Result<Vec<Record>> {
    let mut source = Cow::Borrowed(text);
    // Offsets (in `source`) of the commas inserted after fieldless keys.
    let mut inserted: Vec<usize> = Vec::new();
    loop {
        match records(&source) {
            Ok(records) => return Ok(records),
            Err(e) if is_fieldless_entry(&source, &e) => {
                tracing::debug!(offset = e.span.start, "Entry without fields");
                inserted.push(e.span.start);
                source.to_mut().insert(e.span.start, ',');
            },
            Err(e) => {
                let offset = e.span.start - inserted.iter().filter(|&&i| i < e.span.start).count();
                exn::bail!(match e.kind {
                    ParseErrorKind::DuplicateKey(key) => ErrorKind::DuplicateKey(key),
                    kind => {
                        let (line, column) = position(text, offset);
                        ErrorKind::Syntax { line, column, message: kind.to_string() }
                    },
                });
            },
        }
    }
}

/// The only place the parser expects a comma right before a closing brace
/// is after the key of an entry.
fn is_fieldless_entry(source: &str, e: &ParseError) -> bool {
    matches!(e.kind, ParseErrorKind::Expected(Token::Comma))
        && source.get(e.span.start..).is_some_and(|rest| rest.starts_with('}'))
}

fn records(source: &str) -> std::result::Result<Vec<Record>, ParseError> {
    let raw = RawBibliography::parse(source)?;
    let layouts: Vec<(String, String, Vec<String>)> = raw
        .entries
        .iter()
        .map(|entry| {
            let entry = &entry.v;
            let names = entry.fields.iter().map(|pair| pair.key.v.to_ascii_lowercase()).collect();
            (entry.key.v.to_string(), entry.kind.v.to_ascii_lowercase(), names)
        })
        .collect();
    let bibliography = Bibliography::from_raw(raw)?;
    Ok(layouts
        .into_iter()
        .filter_map(|(key, entry_type, names)| {
            let entry = bibliography.get(&key)?;
            Some(Record { fields: fields(entry, names), key, entry_type })
        })
        .collect())
}

fn fields(entry: &Entry, names: Vec<String>) -> Vec<Field> {
    let mut fields: Vec<Field> = Vec::with_capacity(entry.fields.len());
    for name in names {
        if fields.iter().any(|f| f.name == name) {
            continue;
        }
        if let Some(chunks) = entry.fields.get(&name) {
            fields.push(Field { value: chunks.format_verbatim(), name });
        }
    }
    // Fields inherited through `crossref` were never written in this entry.
    for (name, chunks) in &entry.fields {
        if !fields.iter().any(|f| &f.name == name) {
            fields.push(Field { name: name.clone(), value: chunks.format_verbatim() });
        }
    }
    fields
}

/// One-based line and column (in characters) of a byte offset into `text`.
fn position(text: &str, offset: usize) -> (usize, usize) {
    let offset = text.floor_char_boundary(offset.min(text.len()));
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map(|l| l.chars().count()).unwrap_or(0) + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SAMPLE: &str = r#"
@article{Smith2020,
    author = {Smith, John},
    title = {Deep Learning},
    journal = {Nature},
    year = {2020}
}

@book{adams1999,
    title = {The Hitchhiker's Guide},
    author = {Adams, Douglas},
    year = {1999}
}
"#;

    #[test]
    fn test_records_in_source_order() {
        let records = parse(SAMPLE).unwrap();
        let keys: Vec<_> = records.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["Smith2020", "adams1999"]);
        assert_eq!(records[0].entry_type, "article");
        assert_eq!(records[1].entry_type, "book");
    }

    #[test]
    fn test_fields_keep_declaration_order() {
        let records = parse(SAMPLE).unwrap();
        let names: Vec<_> = records[0].fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["author", "title", "journal", "year"]);
        let names: Vec<_> = records[1].fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["title", "author", "year"]);
    }

    fn pairs(record: &Record) -> Vec<(&str, &str)> {
        record.fields.iter().map(|f| (f.name.as_str(), f.value.as_str())).collect()
    }

    #[test]
    fn test_field_values() {
        let records = parse(SAMPLE).unwrap();
        assert_eq!(
            pairs(&records[1]),
            [("title", "The Hitchhiker's Guide"), ("author", "Adams, Douglas"), ("year", "1999")]
        );
    }

    #[rstest]
    #[case("@frobnicator{Zhou2021, title = {Odd}}", "frobnicator")]
    #[case("@conference{Lee2019, title = {Talk}}", "conference")]
    #[case("@www{Site, url = {https://example.org}}", "www")]
    #[case("@electronic{Site, url = {https://example.org}}", "electronic")]
    #[case("@ARTICLE{Upper, title = {Loud}}", "article")]
    fn test_entry_type_kept_as_written(#[case] text: &str, #[case] expected: &str) {
        let records = parse(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].entry_type, expected);
    }

    #[test]
    fn test_string_macro_keeps_field_order() {
        let text = "@string{nat = \"Nature\"}\n@article{a, title = {T}, journal = nat, year = {2020}}";
        let records = parse(text).unwrap();
        assert_eq!(pairs(&records[0]), [("title", "T"), ("journal", "Nature"), ("year", "2020")]);
    }

    #[test]
    fn test_concatenation_keeps_field_order() {
        let text = "@string{pre = \"Pre\"}\n@misc{b, year = {2021}, note = pre # {post}}";
        let records = parse(text).unwrap();
        assert_eq!(pairs(&records[0]), [("year", "2021"), ("note", "Prepost")]);
    }

    #[test]
    fn test_field_names_lowercased() {
        let records = parse("@misc{a, TITLE = {T}, Year = {2020}}").unwrap();
        assert_eq!(pairs(&records[0]), [("title", "T"), ("year", "2020")]);
    }

    #[test]
    fn test_entry_without_fields() {
        let records = parse("@misc{a}\n@book{b, title = {T}}\n@misc{c }").unwrap();
        let keys: Vec<_> = records.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["a", "b", "c"]);
        assert!(records[0].fields.is_empty());
        assert_eq!(pairs(&records[1]), [("title", "T")]);
    }

    #[test]
    fn test_error_position_after_entry_without_fields() {
        let err = parse("@misc{a}\n@book{b title = {T}}").unwrap_err();
        assert!(matches!(&*err, ErrorKind::Syntax { line: 2, column: 9, .. }), "{err:?}");
    }

    #[test]
    fn test_duplicate_key() {
        let err = parse("@misc{a, note = {x}}\n@misc{a, note = {y}}").unwrap_err();
        assert!(matches!(&*err, ErrorKind::DuplicateKey(key) if key == "a"));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_input() {
        let err = parse("@article{Broken,\n  title = {Unclosed\n").unwrap_err();
        assert!(matches!(&*err, ErrorKind::Syntax { line, .. } if *line >= 1));
    }

    #[rstest]
    #[case("abc", 0, (1, 1))]
    #[case("abc", 2, (1, 3))]
    #[case("ab\ncd", 3, (2, 1))]
    #[case("ab\ncd", 4, (2, 2))]
    #[case("ab", 99, (1, 3))]
    fn test_position(#[case] text: &str, #[case] offset: usize, #[case] expected: (usize, usize)) {
        assert_eq!(position(text, offset), expected);
    }
}
