use std::{fmt, path::PathBuf};

use strum::IntoStaticStr;
use thiserror::Error;
use tracing_error::SpanTrace;

/// Everything that can go wrong while inlining. Any of these aborts the pass.
#[derive(Debug, Error, IntoStaticStr)]
pub enum InlineErrorKind {
    /// A recognized function was not called with a string literal as its first argument.
    #[error("The first argument of {function} function must be a string literal")]
    InvalidArgument { function: String },

    /// The inlined file is not valid JSON.
    #[error("{} does not contain valid JSON: {source}", path.display())]
    MalformedData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The inlined JSON is destructured as an object but is something else. `file` is the
    /// argument as written at the call site.
    #[error("{file} does not contain an object as expected, found {found}")]
    TypeMismatch { file: String, found: &'static str },

    /// The marker module declares a function the pass does not know.
    #[error("Unknown function: {function}")]
    UnknownFunction { function: String },

    /// A decoded value has no literal representation.
    #[error("Unsupported value in JSON object: \"{value}\" ({kind})")]
    UnsupportedValue { value: String, kind: &'static str },

    /// The inlined file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl InlineErrorKind {
    /// The name of the variant, e.g. `InvalidArgument`.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// An [`InlineErrorKind`] together with a textual trace.
///
/// The first line of the trace is `<kind>: <message>`. The following lines are frames, one per
/// tracing span that was active when the error was raised (only recorded when the subscriber
/// carries a `tracing_error::ErrorLayer`). Once the error crosses the pass boundary, a frame
/// naming the offending user source location is inserted right below the message.
#[derive(Debug)]
pub struct InlineError {
    kind: InlineErrorKind,
    stack: Vec<String>,
}

impl InlineError {
    pub fn new(kind: InlineErrorKind) -> Self {
        let mut stack = vec![format!("{}: {kind}", kind.name())];
        SpanTrace::capture().with_spans(|metadata, fields| {
            let mut frame = format!("    at {}::{}", metadata.target(), metadata.name());
            if !fields.is_empty() {
                frame.push_str(&format!("{{{fields}}}"));
            }
            if let (Some(file), Some(line)) = (metadata.file(), metadata.line()) {
                frame.push_str(&format!(" ({file}:{line})"));
            }
            stack.push(frame);
            true
        });
        Self { kind, stack }
    }

    pub fn kind(&self) -> &InlineErrorKind {
        &self.kind
    }

    pub fn into_kind(self) -> InlineErrorKind {
        self.kind
    }

    /// The full trace, message line first.
    pub fn stack(&self) -> String {
        self.stack.join("\n")
    }

    /// The trace without its message line.
    pub fn frames(&self) -> &[String] {
        self.stack.get(1..).unwrap_or_default()
    }

    pub(crate) fn stack_mut(&mut self) -> &mut Vec<String> {
        &mut self.stack
    }
}

impl fmt::Display for InlineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for InlineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

impl From<InlineErrorKind> for InlineError {
    fn from(kind: InlineErrorKind) -> Self {
        Self::new(kind)
    }
}
