use crate::Context;
use crate::error::{ErrorKind, Result};
use crate::header::compose;
use crate::report::{Action, Failure, SyncReport};
use std::collections::HashMap;
use tracing::instrument;
use zimbib_bibliography::{Library, Record};
use zimbib_notebook::{Notebook, PageName};

/// Raw, unsanitized page name of a record: `<root>:<group>:<key>`.
///
/// A `:` inside the key (or its group) would start a new section, so it is
/// replaced by `_` first and every record stays exactly one level below its
/// group.
pub fn raw_page_name(root: &PageName, record: &Record) -> String {
    let group = record.group().unwrap_or_default().replace(':', "_");
    format!("{root}:{group}:{}", record.key.replace(':', "_"))
}

/// Writes one page per record.
///
/// Records are independent: a record that fails is reported and the batch
/// carries on. Two keys that sanitize to the same page are never allowed to
/// overwrite each other; the later one fails with
/// [`Collision`](ErrorKind::Collision).
#[instrument(skip_all, fields(root = %ctx.root, entries = library.len()))]
pub fn import_entries(notebook: &dyn Notebook, ctx: &Context, library: &Library) -> SyncReport {
    let mut report = SyncReport::new();
    let mut claimed: HashMap<PageName, &str> = HashMap::with_capacity(library.len());
    for record in library.records() {
        let name = match notebook.make_valid_name(&raw_page_name(&ctx.root, record)) {
            Ok(name) => name,
            Err(err) => {
                let error = err.raise(ErrorKind::Name(record.key.clone()));
                tracing::warn!(key = %record.key, "Skipping entry without a valid page name");
                report.fail(Failure { key: record.key.clone(), page: None, error });
                continue;
            },
        };
        if let Some(other) = claimed.get(&name) {
            tracing::warn!(key = %record.key, other = %other, page = %name, "Skipping entry that collides with another key");
            let error = ErrorKind::Collision { page: name.clone(), other: other.to_string() }.into();
            report.fail(Failure { key: record.key.clone(), page: Some(name), error });
            continue;
        }
        claimed.insert(name.clone(), record.key.as_str());
        match import_record(notebook, ctx, record, &name) {
            Ok(action) => report.push(action),
            Err(error) => {
                let kind: &ErrorKind = &error;
                tracing::warn!(key = %record.key, page = %name, error = %kind, "Failed to import entry");
                report.fail(Failure { key: record.key.clone(), page: Some(name), error });
            },
        }
    }
    tracing::info!(written = report.actions.len(), failed = report.failures.len(), "Imported entries");
    report
}

fn import_record(notebook: &dyn Notebook, ctx: &Context, record: &Record, name: &PageName) -> Result<Action> {
    tracing::debug!("Importing @{} @{} to {name}", record.entry_type, record.key);
    let mut page = notebook.get_page(name).map_err(ErrorKind::notebook)?;
    let existed = page.has_content();
    let body = ctx.templates.entry(record)?;
    page.set_body(compose(&page, &record.key, ctx.today, &body));
    notebook.store_page(&page).map_err(ErrorKind::notebook)?;
    Ok(Action::for_page(name.clone(), existed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Smith2020", ":References:S:Smith2020")]
    #[case("adams1999", ":References:A:adams1999")]
    #[case("doi:10.1/x", ":References:D:doi_10.1/x")]
    #[case(":odd", ":References:_:_odd")]
    fn test_raw_page_name(#[case] key: &str, #[case] expected: &str) {
        let root = PageName::new(":References").unwrap();
        assert_eq!(raw_page_name(&root, &Record::new(key, "misc")), expected);
    }
}
