//! Source file access: home-directory expansion and reading.

use crate::error::{ErrorKind, Result};
use directories::BaseDirs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

/// Expands a leading `~` (alone, or followed by a path separator) to the
/// current user's home directory. Other paths are returned unchanged;
/// `~otheruser` forms are not supported and are left as-is.
///
/// ```
/// use zimbib_bibliography::expand_home;
/// assert_eq!(expand_home("/srv/refs.bib").unwrap().to_str(), Some("/srv/refs.bib"));
/// ```
pub fn expand_home(source: &str) -> Result<PathBuf> {
    let rest = match source.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') || rest.starts_with(std::path::MAIN_SEPARATOR) => {
            rest.trim_start_matches(['/', std::path::MAIN_SEPARATOR])
        },
        _ => return Ok(PathBuf::from(source)),
    };
    let Some(dirs) = BaseDirs::new() else {
        exn::bail!(ErrorKind::NoHomeDirectory(PathBuf::from(source)));
    };
    Ok(match rest.is_empty() {
        true => dirs.home_dir().to_path_buf(),
        false => dirs.home_dir().join(rest),
    })
}

/// Reads the whole file as UTF-8 text, dropping a leading byte-order mark.
pub(crate) fn read(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| map_io_error(e, path))?;
    let text = String::from_utf8(bytes).map_err(|_| ErrorKind::Decode(path.to_path_buf()))?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
    match e.kind() {
        IoErrorKind::NotFound => ErrorKind::NotFound(path.to_path_buf()),
        IoErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
        _ => ErrorKind::Io(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_plain_paths_untouched() {
        assert_eq!(expand_home("refs.bib").unwrap(), PathBuf::from("refs.bib"));
        assert_eq!(expand_home("/abs/refs.bib").unwrap(), PathBuf::from("/abs/refs.bib"));
        assert_eq!(expand_home("~other/refs.bib").unwrap(), PathBuf::from("~other/refs.bib"));
    }

    #[test]
    fn test_home_expanded() {
        let Some(dirs) = BaseDirs::new() else { return };
        assert_eq!(expand_home("~").unwrap(), dirs.home_dir());
        assert_eq!(expand_home("~/papers/refs.bib").unwrap(), dirs.home_dir().join("papers/refs.bib"));
    }

    #[test]
    fn test_read_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = read(&temp_dir.path().join("missing.bib")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }

    #[test]
    fn test_read_rejects_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x40, 0xff, 0xfe, 0x00]).unwrap();
        let err = read(file.path()).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Decode(_)));
    }

    #[test]
    fn test_read_strips_bom() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all("\u{feff}@misc{a}".as_bytes()).unwrap();
        assert_eq!(read(file.path()).unwrap(), "@misc{a}");
    }
}
