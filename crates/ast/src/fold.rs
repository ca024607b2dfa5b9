//! Generic tree rewriting.
//!
//! A [`Transform`] is asked about every node of a file, depth first, before its children. It
//! either leaves the node alone, in which case the children are rewritten recursively and the
//! node is rebuilt around them, or it returns a final answer for the whole subtree: a
//! replacement node or the removal of the node from its parent.
//!
//! The input tree is never mutated. A node whose children all come back unchanged is reused as
//! is, so an untouched file folds to a tree that shares every node with the original.

use std::sync::Arc;

use crate::{
    node::{Node, NodeKind},
    source_file::SourceFile,
};

/// The answer of a [`Transform`] for a single node.
#[derive(Clone, Debug, PartialEq)]
pub enum Rewrite {
    /// No rewrite applies here; fold the children instead.
    Descend,
    /// Use this subtree in place of the node. It is not visited again.
    Replace(Arc<Node>),
    /// Drop the node from its parent.
    Remove,
}

impl From<Option<Arc<Node>>> for Rewrite {
    fn from(replacement: Option<Arc<Node>>) -> Self {
        replacement.map_or(Self::Descend, Self::Replace)
    }
}

/// Where a node sits while it is being folded.
#[derive(Clone, Copy, Debug)]
pub struct FoldContext<'a> {
    /// The file being folded. Spans of original nodes point into its text.
    pub file: &'a SourceFile,
    /// The original parent of the node, `None` for the root.
    pub parent: Option<&'a Node>,
}

pub trait Transform {
    type Error;

    /// Decide what to do with `node`. The default dispatches on the node kind.
    fn transform_node(
        &mut self,
        node: &Arc<Node>,
        cx: FoldContext<'_>,
    ) -> Result<Rewrite, Self::Error> {
        dispatch(self, node, cx)
    }

    fn transform_call_expression(
        &mut self,
        _call: &Arc<Node>,
        _cx: FoldContext<'_>,
    ) -> Result<Rewrite, Self::Error> {
        Ok(Rewrite::Descend)
    }

    fn transform_import_declaration(
        &mut self,
        _import: &Arc<Node>,
        _cx: FoldContext<'_>,
    ) -> Result<Rewrite, Self::Error> {
        Ok(Rewrite::Descend)
    }
}

/// Route `node` to the hook of its kind.
pub fn dispatch<T: Transform + ?Sized>(
    transform: &mut T,
    node: &Arc<Node>,
    cx: FoldContext<'_>,
) -> Result<Rewrite, T::Error> {
    match node.kind {
        NodeKind::CallExpression => transform.transform_call_expression(node, cx),
        NodeKind::ImportDeclaration => transform.transform_import_declaration(node, cx),
        _ => Ok(Rewrite::Descend),
    }
}

/// Fold a whole file, producing a new file with the rewritten tree.
pub fn fold_source_file<T: Transform + ?Sized>(
    transform: &mut T,
    file: &SourceFile,
) -> Result<SourceFile, T::Error> {
    let root = file.root();
    let cx = FoldContext { file, parent: None };
    let root = match fold_node(transform, root, cx)? {
        Some(root) => root,
        // the root cannot go away; keep an empty file instead
        None => Arc::new(root.with_children(vec![])),
    };
    Ok(file.with_root(root))
}

/// Fold one subtree. `Ok(None)` means the node was removed.
pub fn fold_node<T: Transform + ?Sized>(
    transform: &mut T,
    node: &Arc<Node>,
    cx: FoldContext<'_>,
) -> Result<Option<Arc<Node>>, T::Error> {
    match transform.transform_node(node, cx)? {
        Rewrite::Replace(replacement) => {
            trace!(kind = node.kind.name(), id = %node.id, "node replaced");
            return Ok(Some(replacement));
        }
        Rewrite::Remove => {
            trace!(kind = node.kind.name(), id = %node.id, "node removed");
            return Ok(None);
        }
        Rewrite::Descend => {}
    }

    let child_cx = FoldContext { file: cx.file, parent: Some(node) };
    let mut changed = false;
    let mut children = Vec::with_capacity(node.children.len());
    for child in &node.children {
        match fold_node(transform, child, child_cx)? {
            Some(folded) => {
                changed |= !Arc::ptr_eq(&folded, child);
                children.push(folded);
            }
            None => changed = true,
        }
    }

    if changed {
        Ok(Some(Arc::new(node.with_children(children))))
    } else {
        Ok(Some(Arc::clone(node)))
    }
}
