// locate section headers and @import markers inside a template body

use regex::Regex;

// https://docs.aws.amazon.com/AWSCloudFormation/latest/UserGuide/template-anatomy.html
//
// AWSTemplateFormatVersion is deliberately not listed: merging it would
// splice a second version value under the root's version key.
pub const TOP_LEVEL_SECTIONS: [&str; 8] = [
    "Description",
    "Metadata",
    "Parameters",
    "Mappings",
    "Conditions",
    "Transform",
    "Resources",
    "Outputs",
];

/// Prefix token of an import marker line.
pub const IMPORT_PREFIX: &str = "# @import ";

/// A recognized section header and where it sits in the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpan {
    pub name: &'static str,
    /// Offset of the header's first byte. Headers are anchored at line start.
    pub header_start: usize,
    /// Offset where the section's content begins: just past the header token,
    /// skipping the newline that usually follows it.
    pub body_start: usize,
}

/// An import marker found in a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRef {
    /// Byte range of the marker text, from `#` to end of line. The trailing
    /// newline and any indentation before the marker are not part of it.
    pub start: usize,
    pub end: usize,
    /// Everything after the prefix token, to end of line.
    pub resource: String,
}

impl ImportRef {
    /// Whole-file references carry a bare path; inline references carry
    /// `path#Section`.
    pub fn is_inline(&self) -> bool {
        self.resource.contains('#')
    }
}

/// Find every recognized top-level header in `body`, in document order.
/// A name only counts when it sits at the start of a line and is immediately
/// followed by a colon. A body with no recognized headers yields an empty
/// vec, not an error.
pub fn scan_sections(body: &str) -> Vec<SectionSpan> {
    let pattern = format!(r"(?m)^({}):", TOP_LEVEL_SECTIONS.join("|"));
    let re = Regex::new(&pattern).expect("section pattern is a valid regex");

    let mut spans = Vec::new();
    for m in re.find_iter(body) {
        let matched = m.as_str();
        let Some(name) = TOP_LEVEL_SECTIONS
            .iter()
            .copied()
            .find(|n| *n == &matched[..matched.len() - 1])
        else {
            continue;
        };

        let after_header = m.end();
        let body_start = if body.as_bytes().get(after_header) == Some(&b'\n') {
            after_header + 1
        } else {
            after_header
        };

        spans.push(SectionSpan {
            name,
            header_start: m.start(),
            body_start,
        });
    }
    spans
}

/// Find every import marker in `body`, in document order. Resource strings
/// are taken verbatim to end of line; whether they are well-formed is decided
/// at resolution time, not here.
pub fn scan_imports(body: &str) -> Vec<ImportRef> {
    let pattern = format!(r"(?m){}(.+)$", IMPORT_PREFIX);
    let re = Regex::new(&pattern).expect("import pattern is a valid regex");

    re.captures_iter(body)
        .filter_map(|caps| {
            let marker = caps.get(0)?;
            let resource = caps.get(1)?;
            Some(ImportRef {
                start: marker.start(),
                end: marker.end(),
                resource: resource.as_str().to_string(),
            })
        })
        .collect()
}
