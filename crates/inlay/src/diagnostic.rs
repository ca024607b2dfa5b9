use inlay_ast::{Node, SourceFile};

use crate::error::InlineError;

/// `<file>:<line>:<column>` of the start of `node`, both one-based.
pub fn location(node: &Node, file: &SourceFile) -> String {
    let position = file.line_and_column(node.span.lo);
    format!("{}:{}:{}", file.file_name().display(), position.line + 1, position.column + 1)
}

/// Blame `node` in the trace of `err`.
///
/// A frame `at <file>:<line>:<column>` is inserted directly below the message line, indented
/// like the frame that was there before, so the first frame a reader sees is the user code that
/// triggered the error rather than the pass internals. An error without a trace is left as is.
pub fn enhance(err: &mut InlineError, node: &Node, file: &SourceFile) {
    let stack = err.stack_mut();
    if stack.is_empty() {
        return;
    }

    let first_frame = stack.get(1).map(String::as_str).unwrap_or_default();
    let indent = &first_frame[..first_frame.len() - first_frame.trim_start().len()];
    let frame = format!("{indent}at {}", location(node, file));
    stack.insert(1, frame);
}
