// turn a marker's resource string into a concrete file path

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

use crate::error::MergeError;
use crate::fs::FileAccess;

/// Resolve an import resource string against the document that references it.
/// Relative resources resolve against the referencing document's directory,
/// never the process working directory; absolute resources are normalized and
/// used as-is. Fails if the resolved path does not exist.
pub fn resolve(
    referencing: &Utf8Path,
    resource: &str,
    fs: &dyn FileAccess,
) -> Result<Utf8PathBuf, MergeError> {
    let raw = Utf8Path::new(resource);
    let joined = if raw.is_absolute() {
        raw.to_path_buf()
    } else {
        let dir = referencing.parent().unwrap_or_else(|| Utf8Path::new(""));
        dir.join(raw)
    };

    let resolved = normalize(&joined);
    if !fs.exists(&resolved) {
        return Err(MergeError::FileNotFound { path: resolved });
    }
    Ok(resolved)
}

/// Lexical path cleanup: folds `.` away and collapses `..` into its parent
/// where one is present, without touching the filesystem.
pub fn normalize(path: &Utf8Path) -> Utf8PathBuf {
    let mut parts: Vec<Utf8Component> = Vec::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => match parts.last() {
                Some(Utf8Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Utf8Component::RootDir | Utf8Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    let mut out = Utf8PathBuf::new();
    for part in &parts {
        out.push(part.as_str());
    }
    if out.as_str().is_empty() {
        out.push(".");
    }
    out
}
