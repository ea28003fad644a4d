use camino::{Utf8Path, Utf8PathBuf};

use crate::error::MergeError;
use crate::fs::FileAccess;
use crate::resolver;
use crate::scanner::{self, ImportRef};

/// An in-memory template: a text body paired with the normalized path it was
/// read from. The path matters only for resolving relative references found
/// in this body. The body is mutated in place as whole-file merges are
/// applied; ownership stays with the orchestrator that loaded it.
#[derive(Debug, Clone)]
pub struct Template {
    body: String,
    path: Utf8PathBuf,
}

impl Template {
    pub fn new(body: impl Into<String>, path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            body: body.into(),
            path: resolver::normalize(&path.into()),
        }
    }

    /// Load the root template. Fails on a blank path or a missing file.
    pub fn from_root_path(path: &str, fs: &dyn FileAccess) -> Result<Self, MergeError> {
        if path.trim().is_empty() {
            return Err(MergeError::InvalidArgument);
        }

        let normalized = resolver::normalize(Utf8Path::new(path));
        if !fs.exists(&normalized) {
            return Err(MergeError::FileNotFound { path: normalized });
        }

        let body = read(&normalized, fs)?;
        Ok(Self {
            body,
            path: normalized,
        })
    }

    /// Load a template referenced from this one. Relative resources resolve
    /// against this template's directory, so a referenced document in a
    /// nested layout can itself sit next to its own siblings.
    pub fn load_import(&self, resource: &str, fs: &dyn FileAccess) -> Result<Self, MergeError> {
        let path = resolver::resolve(&self.path, resource, fs)?;
        let body = read(&path, fs)?;
        Ok(Self { body, path })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }

    /// Section names present in the body, in document order. Recomputed from
    /// the text on every call: whole-file merges grow the body, so boundaries
    /// are never cached across a mutation.
    pub fn sections(&self) -> Vec<&'static str> {
        scanner::scan_sections(&self.body)
            .iter()
            .map(|s| s.name)
            .collect()
    }

    /// Import markers present in the body, in document order.
    pub fn imports(&self) -> Vec<ImportRef> {
        scanner::scan_imports(&self.body)
    }

    /// The raw text belonging to `name`: everything after its header token
    /// (skipping the newline that usually follows it) up to the next
    /// recognized header, or to the end of the body for the last section.
    pub fn get_section(&self, name: &str) -> Result<&str, MergeError> {
        let spans = scanner::scan_sections(&self.body);
        let idx = spans
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| MergeError::SectionNotFound {
                path: self.path.clone(),
                section: name.to_string(),
            })?;

        let end = spans
            .get(idx + 1)
            .map(|s| s.header_start)
            .unwrap_or(self.body.len());
        Ok(&self.body[spans[idx].body_start..end])
    }

    /// Splice `contents` into `name`, creating a bare stub header at the end
    /// of the body first if the section is absent. Insertion lands
    /// immediately after the first occurrence of the header token, so each
    /// call adds on top of what is already there.
    pub fn add_to_section(&mut self, name: &str, contents: &str) {
        let insert_at = match self.find_header_end(name) {
            Some(pos) => pos,
            None => {
                self.body.push('\n');
                self.body.push_str(name);
                self.body.push(':');
                self.body.len()
            }
        };
        self.body.insert_str(insert_at, &format!("\n{contents}"));
    }

    /// Replace a byte range of the body, used for inline marker substitution.
    pub(crate) fn replace_range(&mut self, start: usize, end: usize, replacement: &str) {
        self.body.replace_range(start..end, replacement);
    }

    fn find_header_end(&self, name: &str) -> Option<usize> {
        scanner::scan_sections(&self.body)
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.header_start + name.len() + 1)
    }
}

fn read(path: &Utf8Path, fs: &dyn FileAccess) -> Result<String, MergeError> {
    fs.read_to_string(path).map_err(|source| MergeError::Io {
        path: path.to_path_buf(),
        source,
    })
}
