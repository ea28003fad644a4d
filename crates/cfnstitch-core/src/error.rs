use camino::Utf8PathBuf;
use thiserror::Error;

/// Failures surfaced by the merge engine. All of them are fatal to the
/// current invocation: the orchestrator aborts on the first one and never
/// produces a partial result.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("expected a template file path, got a blank string")]
    InvalidArgument,

    #[error("could not find '{path}' on disk")]
    FileNotFound { path: Utf8PathBuf },

    #[error("{path} does not have section: {section}")]
    SectionNotFound { path: Utf8PathBuf, section: String },

    #[error("malformed import reference '{resource}': expected a path or path#Section")]
    MalformedReference { resource: String },

    #[error("failed to read '{path}'")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}
