use std::{fmt, sync::Arc};

use crate::span::Span;

/// Identity of a node in the host's tree, used to key type-resolution queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The id of a synthesized node. The host knows nothing about it.
    pub const DUMMY: Self = Self(u32::MAX);

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn is_dummy(&self) -> bool {
        *self == Self::DUMMY
    }
}

impl From<NodeId> for u32 {
    fn from(id: NodeId) -> u32 {
        id.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Minus,
    Plus,
    Not,
}

impl UnaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minus => "-",
            Self::Plus => "+",
            Self::Not => "!",
        }
    }
}

/// The kind tag of a node. The comment on each variant gives the layout of its children.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// `[statement..]`
    SourceFile,
    /// `[statement..]`
    Block,
    /// `[VariableDeclaration..]`
    VariableStatement,
    /// `[name, initializer?]`, where `name` is an identifier or a binding pattern.
    VariableDeclaration,
    /// `[BindingElement..]`
    ObjectBindingPattern,
    /// `[BindingElement..]`
    ArrayBindingPattern,
    /// `[property_name?, name, initializer?]`; the property name is present iff `property_name`.
    BindingElement { property_name: bool },
    /// `[expression]`
    ExpressionStatement,
    /// `[expression?]`
    ReturnStatement,
    /// `[callee, argument..]`
    CallExpression,
    /// `[object, Identifier]`
    PropertyAccessExpression,
    /// `[ImportClause?, module_specifier]`
    ImportDeclaration,
    /// `[Identifier?, NamedImports | NamespaceImport?]`
    ImportClause,
    /// `[ImportSpecifier..]`
    NamedImports,
    /// `[property_name?, name]`; two children mean the import is renamed.
    ImportSpecifier,
    /// `[Identifier]`
    NamespaceImport,
    Identifier(String),
    /// The cooked value of the literal, without quotes or escapes.
    StringLiteral(String),
    /// The literal's text, which is always non-negative.
    NumericLiteral(String),
    /// `[operand]`
    PrefixUnaryExpression(UnaryOperator),
    TrueKeyword,
    FalseKeyword,
    NullKeyword,
    /// `[element..]`
    ArrayLiteralExpression,
    /// `[PropertyAssignment..]`
    ObjectLiteralExpression,
    /// `[name, initializer]`
    PropertyAssignment,
    /// `[expression]`
    ComputedPropertyName,
    /// Host syntax the pass has no interest in, tagged with the host's kind name.
    Other(String),
}

impl NodeKind {
    /// A short human-readable name of the kind.
    pub fn name(&self) -> &str {
        match self {
            Self::SourceFile => "SourceFile",
            Self::Block => "Block",
            Self::VariableStatement => "VariableStatement",
            Self::VariableDeclaration => "VariableDeclaration",
            Self::ObjectBindingPattern => "ObjectBindingPattern",
            Self::ArrayBindingPattern => "ArrayBindingPattern",
            Self::BindingElement { .. } => "BindingElement",
            Self::ExpressionStatement => "ExpressionStatement",
            Self::ReturnStatement => "ReturnStatement",
            Self::CallExpression => "CallExpression",
            Self::PropertyAccessExpression => "PropertyAccessExpression",
            Self::ImportDeclaration => "ImportDeclaration",
            Self::ImportClause => "ImportClause",
            Self::NamedImports => "NamedImports",
            Self::ImportSpecifier => "ImportSpecifier",
            Self::NamespaceImport => "NamespaceImport",
            Self::Identifier(_) => "Identifier",
            Self::StringLiteral(_) => "StringLiteral",
            Self::NumericLiteral(_) => "NumericLiteral",
            Self::PrefixUnaryExpression(_) => "PrefixUnaryExpression",
            Self::TrueKeyword => "TrueKeyword",
            Self::FalseKeyword => "FalseKeyword",
            Self::NullKeyword => "NullKeyword",
            Self::ArrayLiteralExpression => "ArrayLiteralExpression",
            Self::ObjectLiteralExpression => "ObjectLiteralExpression",
            Self::PropertyAssignment => "PropertyAssignment",
            Self::ComputedPropertyName => "ComputedPropertyName",
            Self::Other(name) => name,
        }
    }
}

/// A node of an immutable syntax tree.
///
/// Nodes are never mutated once they are part of a tree. Rewriting a tree produces new nodes
/// for every changed node and its ancestors, while untouched subtrees are shared through [`Arc`].
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub span: Span,
    pub children: Vec<Arc<Node>>,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind, span: Span, children: Vec<Arc<Node>>) -> Self {
        Self { id, kind, span, children }
    }

    /// Create a node that does not originate from any source file.
    pub fn synthesized(kind: NodeKind, children: Vec<Arc<Node>>) -> Self {
        Self::new(NodeId::DUMMY, kind, Span::DUMMY, children)
    }

    /// Rebuild this node around new children, keeping every other attribute.
    pub fn with_children(&self, children: Vec<Arc<Node>>) -> Self {
        Self { id: self.id, kind: self.kind.clone(), span: self.span, children }
    }

    pub fn with_span(self, span: Span) -> Self {
        Self { span, ..self }
    }

    pub fn is_synthesized(&self) -> bool {
        self.id.is_dummy()
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_string_literal(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::StringLiteral(value) => Some(value),
            _ => None,
        }
    }

    /// The callee of a call expression.
    pub fn callee(&self) -> Option<&Arc<Node>> {
        match self.kind {
            NodeKind::CallExpression => self.children.first(),
            _ => None,
        }
    }

    /// The arguments of a call expression, or an empty slice for any other node.
    pub fn arguments(&self) -> &[Arc<Node>] {
        match self.kind {
            NodeKind::CallExpression if !self.children.is_empty() => &self.children[1..],
            _ => &[],
        }
    }

    /// The name (identifier or binding pattern) of a variable declaration.
    pub fn declaration_name(&self) -> Option<&Arc<Node>> {
        match self.kind {
            NodeKind::VariableDeclaration => self.children.first(),
            _ => None,
        }
    }

    /// The initializer of a variable declaration.
    pub fn initializer(&self) -> Option<&Arc<Node>> {
        match self.kind {
            NodeKind::VariableDeclaration => self.children.get(1),
            NodeKind::BindingElement { property_name } => {
                self.children.get(if property_name { 2 } else { 1 })
            }
            _ => None,
        }
    }

    /// The explicit property name of a binding element, as in `{ key: name }`.
    pub fn property_name(&self) -> Option<&Arc<Node>> {
        match self.kind {
            NodeKind::BindingElement { property_name: true } => self.children.first(),
            NodeKind::ImportSpecifier if self.children.len() == 2 => self.children.first(),
            _ => None,
        }
    }

    /// The bound name of a binding element or import specifier.
    pub fn bound_name(&self) -> Option<&Arc<Node>> {
        match self.kind {
            NodeKind::BindingElement { property_name } => {
                self.children.get(usize::from(property_name))
            }
            NodeKind::ImportSpecifier => self.children.last(),
            _ => None,
        }
    }

    /// The import clause of an import declaration, absent for side-effect imports.
    pub fn import_clause(&self) -> Option<&Arc<Node>> {
        match self.kind {
            NodeKind::ImportDeclaration => {
                self.children.first().filter(|child| child.kind == NodeKind::ImportClause)
            }
            _ => None,
        }
    }

    /// The module specifier of an import declaration.
    pub fn module_specifier(&self) -> Option<&Arc<Node>> {
        match self.kind {
            NodeKind::ImportDeclaration => self.children.last(),
            _ => None,
        }
    }

    /// Whether an import clause binds a default name or has named/namespace bindings.
    pub fn binds_names(&self) -> bool {
        self.kind == NodeKind::ImportClause
            && self.children.iter().any(|child| {
                matches!(
                    child.kind,
                    NodeKind::Identifier(_) | NodeKind::NamedImports | NodeKind::NamespaceImport
                )
            })
    }

    /// Number of nodes in the subtree rooted here.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(|child| child.subtree_len()).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::TreeBuilder;

    #[test]
    fn test_binding_element_layout() {
        let mut b = TreeBuilder::default();
        let renamed = b.binding_element(Some("key"), "local");
        assert_eq!(renamed.property_name().and_then(|n| n.as_identifier()), Some("key"));
        assert_eq!(renamed.bound_name().and_then(|n| n.as_identifier()), Some("local"));
        assert!(renamed.initializer().is_none());

        let plain = b.binding_element(None, "a");
        assert!(plain.property_name().is_none());
        assert_eq!(plain.bound_name().and_then(|n| n.as_identifier()), Some("a"));

        let name = b.ident("b");
        let default = b.number("1");
        let with_default = b.binding_element_node(None, name, Some(default));
        assert_eq!(with_default.bound_name().and_then(|n| n.as_identifier()), Some("b"));
        assert!(with_default.initializer().is_some());
    }

    #[test]
    fn test_import_accessors() {
        let mut b = TreeBuilder::default();
        let side_effect = b.import(None, "./polyfill");
        assert!(side_effect.import_clause().is_none());
        assert_eq!(
            side_effect.module_specifier().and_then(|n| n.as_string_literal()),
            Some("./polyfill")
        );

        let clause = b.import_clause(Some("dflt"), None);
        assert!(clause.binds_names());
        let empty = b.import_clause(None, None);
        assert!(!empty.binds_names());
        let braces = b.import_clause(None, Some(&[]));
        assert!(braces.binds_names());
    }

    #[test]
    fn test_call_accessors() {
        let mut b = TreeBuilder::default();
        let first = b.string("a.txt");
        let second = b.number("2");
        let call = b.call("f", vec![first, second]);
        assert_eq!(call.callee().and_then(|n| n.as_identifier()), Some("f"));
        assert_eq!(call.arguments().len(), 2);
        assert_eq!(call.arguments()[0].as_string_literal(), Some("a.txt"));

        let ident = b.ident("f");
        assert!(ident.arguments().is_empty());
        assert!(ident.callee().is_none());
    }

    #[test]
    fn test_with_children_keeps_attributes() {
        let mut b = TreeBuilder::default();
        let call = b.call("f", vec![]).with_span(Span::new(3, 6));
        let rebuilt = call.with_children(vec![]);
        assert_eq!(rebuilt.id, call.id);
        assert_eq!(rebuilt.span, call.span);
        assert_eq!(rebuilt.kind, NodeKind::CallExpression);
        assert!(rebuilt.arguments().is_empty());
    }
}
