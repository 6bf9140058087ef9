use thiserror::Error;

/// Errors surfaced at the text and file boundary of a flow graph.
///
/// Lenient parsing of an already-decoded JSON value never fails; these variants
/// only appear when the input is not JSON at all or cannot be read or written.
#[derive(Error, Debug)]
pub enum FlowGraphError {
    #[error("Failed to decode flow graph JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Could not access flow graph file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
