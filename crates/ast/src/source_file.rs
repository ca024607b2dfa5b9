use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::node::{Node, NodeKind};

/// Zero-based position of a byte offset within a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineColumn {
    pub line: usize,
    /// Counted in characters from the start of the line.
    pub column: usize,
}

/// The parsed tree of one input file, together with the text it was parsed from.
#[derive(Clone, Debug)]
pub struct SourceFile {
    file_name: PathBuf,
    text: Arc<str>,
    line_starts: Arc<[u32]>,
    root: Arc<Node>,
}

impl SourceFile {
    pub fn new(file_name: impl Into<PathBuf>, text: impl Into<Arc<str>>, root: Node) -> Self {
        debug_assert_eq!(root.kind, NodeKind::SourceFile, "root of a file must be a SourceFile");
        let text = text.into();
        let line_starts = line_starts(&text);
        Self { file_name: file_name.into(), text, line_starts, root: Arc::new(root) }
    }

    /// The same file with a different tree. The text and the line index are shared.
    pub fn with_root(&self, root: Arc<Node>) -> Self {
        Self {
            file_name: self.file_name.clone(),
            text: Arc::clone(&self.text),
            line_starts: Arc::clone(&self.line_starts),
            root,
        }
    }

    pub fn file_name(&self) -> &Path {
        &self.file_name
    }

    /// The directory that contains this file.
    pub fn directory(&self) -> &Path {
        self.file_name.parent().unwrap_or_else(|| Path::new(""))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn root(&self) -> &Arc<Node> {
        &self.root
    }

    /// Line and column of a byte offset. Offsets past the end of the text are clamped.
    pub fn line_and_column(&self, pos: u32) -> LineColumn {
        let pos = pos.min(self.text.len() as u32);
        let line = self.line_starts.partition_point(|start| *start <= pos).saturating_sub(1);
        let start = self.line_starts[line] as usize;
        let end = floor_char_boundary(&self.text, pos as usize);
        LineColumn { line, column: self.text[start..end].chars().count() }
    }
}

fn line_starts(text: &str) -> Arc<[u32]> {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(i, _)| i as u32 + 1))
        .collect::<Vec<_>>()
        .into()
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
