//! Hand-building syntax trees.
//!
//! Hosts that lower their own representation into [`Node`]s, and tests that need a small tree
//! without a parser, use [`TreeBuilder`]. Every node built here gets a fresh [`NodeId`] so it can
//! be bound in the type-resolution service; spans default to [`Span::DUMMY`] and can be set with
//! [`Node::with_span`].

use std::sync::Arc;

use crate::{
    node::{Node, NodeId, NodeKind, UnaryOperator},
    span::Span,
};

#[derive(Debug, Default)]
pub struct TreeBuilder {
    next_id: u32,
}

impl TreeBuilder {
    /// A builder whose first node gets the id `first`.
    pub fn starting_at(first: u32) -> Self {
        Self { next_id: first }
    }

    fn fresh_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn node(&mut self, kind: NodeKind, children: Vec<Node>) -> Node {
        let id = self.fresh_id();
        Node::new(id, kind, Span::DUMMY, children.into_iter().map(Arc::new).collect())
    }

    pub fn other(&mut self, tag: &str, children: Vec<Node>) -> Node {
        self.node(NodeKind::Other(tag.to_string()), children)
    }

    pub fn ident(&mut self, name: &str) -> Node {
        self.node(NodeKind::Identifier(name.to_string()), vec![])
    }

    pub fn string(&mut self, value: &str) -> Node {
        self.node(NodeKind::StringLiteral(value.to_string()), vec![])
    }

    pub fn number(&mut self, text: &str) -> Node {
        if let Some(positive) = text.strip_prefix('-') {
            let operand = self.node(NodeKind::NumericLiteral(positive.to_string()), vec![]);
            return self.node(NodeKind::PrefixUnaryExpression(UnaryOperator::Minus), vec![operand]);
        }
        self.node(NodeKind::NumericLiteral(text.to_string()), vec![])
    }

    /// A call of a plain identifier, e.g. `callee(args..)`.
    pub fn call(&mut self, callee: &str, args: Vec<Node>) -> Node {
        let callee = self.ident(callee);
        self.call_expr(callee, args)
    }

    pub fn call_expr(&mut self, callee: Node, args: Vec<Node>) -> Node {
        let mut children = Vec::with_capacity(args.len() + 1);
        children.push(callee);
        children.extend(args);
        self.node(NodeKind::CallExpression, children)
    }

    /// `object.name`
    pub fn member(&mut self, object: Node, name: &str) -> Node {
        let name = self.ident(name);
        self.node(NodeKind::PropertyAccessExpression, vec![object, name])
    }

    pub fn var_decl(&mut self, name: Node, initializer: Option<Node>) -> Node {
        let children = std::iter::once(name).chain(initializer).collect();
        self.node(NodeKind::VariableDeclaration, children)
    }

    /// `const name = initializer;`
    pub fn const_stmt(&mut self, name: &str, initializer: Node) -> Node {
        let name = self.ident(name);
        let decl = self.var_decl(name, Some(initializer));
        self.node(NodeKind::VariableStatement, vec![decl])
    }

    /// `const { elements.. } = initializer;`
    pub fn destructure_stmt(&mut self, elements: Vec<Node>, initializer: Node) -> Node {
        let pattern = self.object_pattern(elements);
        let decl = self.var_decl(pattern, Some(initializer));
        self.node(NodeKind::VariableStatement, vec![decl])
    }

    pub fn object_pattern(&mut self, elements: Vec<Node>) -> Node {
        self.node(NodeKind::ObjectBindingPattern, elements)
    }

    /// `name` or `property: name` inside a binding pattern.
    pub fn binding_element(&mut self, property: Option<&str>, name: &str) -> Node {
        let property = property.map(|property| self.ident(property));
        let name = self.ident(name);
        self.binding_element_node(property, name, None)
    }

    pub fn binding_element_node(
        &mut self,
        property: Option<Node>,
        name: Node,
        initializer: Option<Node>,
    ) -> Node {
        let kind = NodeKind::BindingElement { property_name: property.is_some() };
        let children = property.into_iter().chain(Some(name)).chain(initializer).collect();
        self.node(kind, children)
    }

    pub fn expr_stmt(&mut self, expression: Node) -> Node {
        self.node(NodeKind::ExpressionStatement, vec![expression])
    }

    pub fn block(&mut self, statements: Vec<Node>) -> Node {
        self.node(NodeKind::Block, statements)
    }

    pub fn import(&mut self, clause: Option<Node>, specifier: &str) -> Node {
        let specifier = self.string(specifier);
        let children = clause.into_iter().chain(Some(specifier)).collect();
        self.node(NodeKind::ImportDeclaration, children)
    }

    /// An import clause with an optional default binding and optional named bindings.
    /// `named: Some(&[])` yields `import {} from ..`.
    pub fn import_clause(&mut self, default: Option<&str>, named: Option<&[&str]>) -> Node {
        let mut children = Vec::new();
        if let Some(default) = default {
            children.push(self.ident(default));
        }
        if let Some(named) = named {
            let specifiers = named
                .iter()
                .map(|name| {
                    let name = self.ident(name);
                    self.node(NodeKind::ImportSpecifier, vec![name])
                })
                .collect();
            children.push(self.node(NodeKind::NamedImports, specifiers));
        }
        self.node(NodeKind::ImportClause, children)
    }

    /// `* as name`
    pub fn namespace_import(&mut self, name: &str) -> Node {
        let name = self.ident(name);
        let namespace = self.node(NodeKind::NamespaceImport, vec![name]);
        self.node(NodeKind::ImportClause, vec![namespace])
    }

    pub fn source_file(&mut self, statements: Vec<Node>) -> Node {
        self.node(NodeKind::SourceFile, statements)
    }
}
