//! Media resolution and copying (side effects).
//!
//! Resolution per reference:
//! - **Direct** - copy the literal file; when it does not exist, wildcard
//!   the runtime splice and copy every glob match. Zero results is fatal.
//! - **Stepped** - glob-expand the truncated prefix and copy every match.
//!   Zero results is fine (optional numbered variants).
//!
//! Copied files always keep their own relative path under the target root;
//! no renaming occurs.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use glob::glob;
use rustc_hash::FxHashSet;

use crate::{debug, log};

use super::CopyError;
use super::scan::{RefKind, scan_line, wildcard_template};

/// Copy every media asset referenced by the entry file into the target root.
///
/// Scans the entry line by line, deduplicates candidate references across
/// the whole run, and mirrors each resolved file under `target_root` at the
/// same relative path it has under `source_root`. `<target>/Media/` is
/// guaranteed to exist afterwards, referenced or not.
///
/// Returns the number of files copied. Fails fast on the first hard error,
/// leaving already-copied files in place.
pub fn copy_media_assets(
    entry: &Path,
    source_root: &Path,
    target_root: &Path,
    log_files: bool,
) -> Result<usize, CopyError> {
    let media_root = target_root.join("Media");
    fs::create_dir_all(&media_root).map_err(|e| CopyError::Io(media_root.clone(), e))?;

    let file = fs::File::open(entry).map_err(|e| CopyError::Entry(entry.to_path_buf(), e))?;
    let reader = BufReader::new(file);

    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut copied = 0;

    for line in reader.lines() {
        let line = line.map_err(|e| CopyError::Entry(entry.to_path_buf(), e))?;

        let Some(media_ref) = scan_line(&line) else {
            continue;
        };

        if !seen.insert(media_ref.path.clone()) {
            debug!("media"; "duplicate reference {}", media_ref.path);
            continue;
        }

        ensure_dest_dir(&media_ref.path, target_root)?;

        copied += match media_ref.kind {
            RefKind::Direct => copy_direct(&media_ref.path, source_root, target_root, log_files)?,
            RefKind::Stepped => copy_stepped(&media_ref.path, source_root, target_root, log_files)?,
        };
    }

    Ok(copied)
}

/// Create the destination subdirectory for a reference (the path truncated
/// at its last separator), before resolution is attempted.
fn ensure_dest_dir(path: &str, target_root: &Path) -> Result<(), CopyError> {
    let rel = Path::new(path.trim_start_matches('/'));
    if let Some(parent) = rel.parent() {
        let dir = target_root.join(parent);
        fs::create_dir_all(&dir).map_err(|e| CopyError::Io(dir.clone(), e))?;
    }
    Ok(())
}

/// Resolve a direct reference: literal file first, template glob second.
fn copy_direct(
    path: &str,
    source_root: &Path,
    target_root: &Path,
    log_files: bool,
) -> Result<usize, CopyError> {
    let rel = path.trim_start_matches('/');
    let source = source_root.join(rel);

    if source.is_file() {
        copy_one(&source, Path::new(rel), target_root, log_files)?;
        return Ok(1);
    }

    // Not a literal file: wildcard the runtime splice and expand.
    let pattern = wildcard_template(path);
    let count = copy_glob(
        pattern.trim_start_matches('/'),
        source_root,
        target_root,
        log_files,
    )?;
    if count == 0 {
        return Err(CopyError::AssetNotFound(path.to_string()));
    }
    Ok(count)
}

/// Resolve a stepped reference: prefix glob, zero matches allowed.
fn copy_stepped(
    path: &str,
    source_root: &Path,
    target_root: &Path,
    log_files: bool,
) -> Result<usize, CopyError> {
    let pattern = format!("{}*", path.trim_start_matches('/'));
    copy_glob(&pattern, source_root, target_root, log_files)
}

/// Expand a glob pattern under the source root and copy every file match.
///
/// Each match is mirrored using its own relative path, not the reference it
/// came from: sequence files differ per index.
fn copy_glob(
    pattern: &str,
    source_root: &Path,
    target_root: &Path,
    log_files: bool,
) -> Result<usize, CopyError> {
    let full = source_root.join(pattern);
    let full = full.to_string_lossy();

    let mut count = 0;
    for entry in glob(&full).map_err(|e| CopyError::Pattern(full.clone().into_owned(), e))? {
        let matched = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            CopyError::Io(path, e.into_error())
        })?;
        if !matched.is_file() {
            continue;
        }

        let rel = matched
            .strip_prefix(source_root)
            .unwrap_or(&matched)
            .to_path_buf();
        copy_one(&matched, &rel, target_root, log_files)?;
        count += 1;
    }

    debug!("media"; "glob {} matched {} file(s)", full, count);
    Ok(count)
}

/// Copy one file to the mirrored path under the target root.
fn copy_one(
    source: &Path,
    rel: &Path,
    target_root: &Path,
    log_files: bool,
) -> Result<(), CopyError> {
    let dest = target_root.join(rel);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| CopyError::Io(parent.to_path_buf(), e))?;
    }
    fs::copy(source, &dest).map_err(|e| CopyError::Io(dest.clone(), e))?;

    if log_files {
        log!("media"; "{}", rel.display());
    }
    Ok(())
}
