// the two-pass merge pipeline: whole-file imports, then inline splices

use crate::error::MergeError;
use crate::fs::{FileAccess, OsFs};
use crate::model::Template;
use crate::scanner::ImportRef;

/// Merge a root template and everything it references into one flat body.
///
/// Whole-file references are applied first: every section of each referenced
/// document is spliced into the matching root section, and the marker line is
/// left behind as an inert comment. Inline references are then re-scanned
/// from the settled body and each marker text is replaced by the referenced
/// section's raw content. References found inside imported text are never
/// followed; they ride along into the output verbatim.
///
/// Fails on the first unresolvable path, missing file, missing section, or
/// malformed reference. There is no partial output.
pub fn merge_document(root_path: &str, fs: &dyn FileAccess) -> Result<String, MergeError> {
    let mut root = Template::from_root_path(root_path, fs)?;

    let whole_file: Vec<String> = root
        .imports()
        .into_iter()
        .filter(|i| !i.is_inline())
        .map(|i| i.resource)
        .collect();

    for resource in whole_file {
        let imported = root.load_import(&resource, fs)?;
        for section in imported.sections() {
            let contents = imported.get_section(section)?.to_string();
            root.add_to_section(section, &contents);
        }
    }

    let inline: Vec<ImportRef> = root.imports().into_iter().filter(|i| i.is_inline()).collect();

    // Resolve in document order so the first bad reference is the one
    // reported, then splice back-to-front so earlier spans stay valid and
    // two byte-identical markers each get their own substitution.
    let mut splices = Vec::with_capacity(inline.len());
    for import in &inline {
        let (path, section) = split_inline(&import.resource)?;
        let imported = root.load_import(path, fs)?;
        let contents = imported.get_section(section)?.to_string();
        splices.push((import.start, import.end, contents));
    }
    for (start, end, contents) in splices.into_iter().rev() {
        root.replace_range(start, end, &contents);
    }

    Ok(root.into_body())
}

/// Merge using the process filesystem.
pub fn merge_file(root_path: &str) -> Result<String, MergeError> {
    merge_document(root_path, &OsFs)
}

/// Split `path#Section` into its halves. Exactly one delimiter with text on
/// both sides is well-formed; anything else is a malformed reference.
fn split_inline(resource: &str) -> Result<(&str, &str), MergeError> {
    let mut parts = resource.splitn(3, '#');
    let path = parts.next().unwrap_or_default();
    let section = parts.next().unwrap_or_default();
    if parts.next().is_some() || path.is_empty() || section.is_empty() {
        return Err(MergeError::MalformedReference {
            resource: resource.to_string(),
        });
    }
    Ok((path, section))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mem::MemFs;

    #[test]
    fn document_without_references_is_returned_unchanged() {
        let body = "Parameters:\n  - foo\nResources:\n  Bucket: {}\n";
        let mut fs = MemFs::new();
        fs.insert("/project/main.yml", body);

        assert_eq!(merge_document("/project/main.yml", &fs).unwrap(), body);
    }

    #[test]
    fn inline_reference_replaces_marker_text() {
        let mut fs = MemFs::new();
        fs.insert("/project/main.yml", "Resources:\n# @import ./b.yml#Resources\n");
        fs.insert("/project/b.yml", "Resources:\n  Bucket: {}\n");

        let merged = merge_document("/project/main.yml", &fs).unwrap();
        assert_eq!(merged, "Resources:\n  Bucket: {}\n\n");
    }

    #[test]
    fn whole_file_reference_merges_every_section() {
        let mut fs = MemFs::new();
        fs.insert("/project/main.yml", "# @import ./b.yml\nParameters:\n  - foo\n");
        fs.insert("/project/b.yml", "Parameters:\n  - bar\nOutputs:\n  - baz\n");

        let merged = merge_document("/project/main.yml", &fs).unwrap();

        // Marker stays behind as an inert comment.
        assert!(merged.contains("# @import ./b.yml\n"));
        // Both parameter entries live under the one Parameters header.
        assert_eq!(merged.matches("Parameters:").count(), 1);
        assert!(merged.contains("  - foo"));
        assert!(merged.contains("  - bar"));
        // Outputs did not exist in the root; a stub was created for it.
        assert!(merged.contains("Outputs:\n  - baz\n"));
    }

    #[test]
    fn importing_the_same_file_twice_accumulates() {
        let mut fs = MemFs::new();
        fs.insert(
            "/project/main.yml",
            "# @import ./b.yml\n# @import ./b.yml\nResources:\n",
        );
        fs.insert("/project/b.yml", "Resources:\n  Bucket: {}\n");

        let merged = merge_document("/project/main.yml", &fs).unwrap();
        assert_eq!(merged.matches("  Bucket: {}").count(), 2);
    }

    #[test]
    fn merge_is_deterministic() {
        let mut fs = MemFs::new();
        fs.insert("/project/main.yml", "# @import ./b.yml\nResources:\n");
        fs.insert("/project/b.yml", "Resources:\n  Bucket: {}\n");

        let first = merge_document("/project/main.yml", &fs).unwrap();
        let second = merge_document("/project/main.yml", &fs).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn duplicate_inline_markers_are_each_replaced() {
        let mut fs = MemFs::new();
        fs.insert(
            "/project/main.yml",
            "Resources:\n# @import ./b.yml#Resources\nOutputs:\n# @import ./b.yml#Resources\n",
        );
        fs.insert("/project/b.yml", "Resources:\n  Bucket: {}\n");

        let merged = merge_document("/project/main.yml", &fs).unwrap();
        assert!(!merged.contains("@import"));
        assert_eq!(merged.matches("  Bucket: {}").count(), 2);
    }

    #[test]
    fn references_inside_imported_text_are_not_followed() {
        let mut fs = MemFs::new();
        fs.insert("/project/main.yml", "Resources:\n# @import ./b.yml#Resources\n");
        fs.insert(
            "/project/b.yml",
            "Resources:\n  # @import ./c.yml#Resources\n  Bucket: {}\n",
        );

        let merged = merge_document("/project/main.yml", &fs).unwrap();
        // The nested marker rides along verbatim; c.yml is never read.
        assert!(merged.contains("  # @import ./c.yml#Resources\n"));
    }

    #[test]
    fn missing_referenced_file_fails() {
        let mut fs = MemFs::new();
        fs.insert("/project/main.yml", "# @import ./absent.yml\nResources:\n");

        let err = merge_document("/project/main.yml", &fs).unwrap_err();
        assert!(matches!(
            err,
            MergeError::FileNotFound { path } if path == "/project/absent.yml"
        ));
    }

    #[test]
    fn missing_referenced_section_fails() {
        let mut fs = MemFs::new();
        fs.insert("/project/main.yml", "Outputs:\n# @import ./other.yml#Outputs\n");
        fs.insert("/project/other.yml", "Resources:\n  Bucket: {}\n");

        let err = merge_document("/project/main.yml", &fs).unwrap_err();
        assert!(matches!(
            err,
            MergeError::SectionNotFound { section, .. } if section == "Outputs"
        ));
    }

    #[test]
    fn two_delimiters_are_malformed() {
        let mut fs = MemFs::new();
        fs.insert("/project/main.yml", "Resources:\n# @import ./b.yml#Resources#Extra\n");
        fs.insert("/project/b.yml", "Resources:\n  Bucket: {}\n");

        let err = merge_document("/project/main.yml", &fs).unwrap_err();
        assert!(matches!(err, MergeError::MalformedReference { .. }));
    }

    #[test]
    fn missing_section_name_is_malformed() {
        let mut fs = MemFs::new();
        fs.insert("/project/main.yml", "Resources:\n# @import ./b.yml#\n");
        fs.insert("/project/b.yml", "Resources:\n  Bucket: {}\n");

        let err = merge_document("/project/main.yml", &fs).unwrap_err();
        assert!(matches!(
            err,
            MergeError::MalformedReference { resource } if resource == "./b.yml#"
        ));
    }

    #[test]
    fn blank_root_path_is_rejected() {
        let fs = MemFs::new();
        assert!(matches!(
            merge_document("", &fs),
            Err(MergeError::InvalidArgument)
        ));
    }
}
