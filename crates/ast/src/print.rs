//! Rendering trees back to source text.
//!
//! This is a plain printer for logs, diagnostics and tests. Emission of the compiled program is
//! the host's job, so the output favours readability over round-tripping every host construct:
//! nodes of kind [`NodeKind::Other`] are printed as a `/* tag */` comment followed by their
//! children.

use crate::node::{Node, NodeKind};

/// Print a subtree as source text. String literals are double quoted with JSON escaping.
pub fn print_node(node: &Node) -> String {
    let mut out = String::new();
    print_into(node, &mut out);
    out
}

/// Print a string literal with double quotes and standard escapes.
pub fn quote_string(value: &str) -> String {
    // JSON string syntax is a subset of the target's string literal syntax.
    serde_json::Value::from(value).to_string()
}

fn print_list(nodes: &[std::sync::Arc<Node>], separator: &str, out: &mut String) {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        print_into(node, out);
    }
}

fn print_into(node: &Node, out: &mut String) {
    let children = &node.children;
    match &node.kind {
        NodeKind::SourceFile => print_list(children, "\n", out),
        NodeKind::Block => {
            out.push_str("{\n");
            print_list(children, "\n", out);
            out.push_str("\n}");
        }
        NodeKind::VariableStatement => {
            out.push_str("const ");
            print_list(children, ", ", out);
            out.push(';');
        }
        NodeKind::VariableDeclaration | NodeKind::BindingElement { .. } => {
            if let Some(property) = node.property_name() {
                print_into(property, out);
                out.push_str(": ");
            }
            let name = node.declaration_name().or_else(|| node.bound_name());
            if let Some(name) = name {
                print_into(name, out);
            }
            if let Some(initializer) = node.initializer() {
                out.push_str(" = ");
                print_into(initializer, out);
            }
        }
        NodeKind::ObjectBindingPattern => {
            out.push_str("{ ");
            print_list(children, ", ", out);
            out.push_str(" }");
        }
        NodeKind::ArrayBindingPattern => {
            out.push('[');
            print_list(children, ", ", out);
            out.push(']');
        }
        NodeKind::ExpressionStatement => {
            print_list(children, "", out);
            out.push(';');
        }
        NodeKind::ReturnStatement => {
            out.push_str("return");
            if !children.is_empty() {
                out.push(' ');
                print_list(children, "", out);
            }
            out.push(';');
        }
        NodeKind::CallExpression => {
            if let Some(callee) = node.callee() {
                print_into(callee, out);
            }
            out.push('(');
            print_list(node.arguments(), ", ", out);
            out.push(')');
        }
        NodeKind::PropertyAccessExpression => print_list(children, ".", out),
        NodeKind::ImportDeclaration => {
            out.push_str("import ");
            if let Some(clause) = node.import_clause() {
                print_into(clause, out);
                out.push_str(" from ");
            }
            if let Some(specifier) = node.module_specifier() {
                print_into(specifier, out);
            }
            out.push(';');
        }
        NodeKind::ImportClause => print_list(children, ", ", out),
        NodeKind::NamedImports => {
            if children.is_empty() {
                out.push_str("{}");
            } else {
                out.push_str("{ ");
                print_list(children, ", ", out);
                out.push_str(" }");
            }
        }
        NodeKind::ImportSpecifier => print_list(children, " as ", out),
        NodeKind::NamespaceImport => {
            out.push_str("* as ");
            print_list(children, "", out);
        }
        NodeKind::Identifier(name) => out.push_str(name),
        NodeKind::StringLiteral(value) => out.push_str(&quote_string(value)),
        NodeKind::NumericLiteral(text) => out.push_str(text),
        NodeKind::PrefixUnaryExpression(operator) => {
            out.push_str(operator.as_str());
            print_list(children, "", out);
        }
        NodeKind::TrueKeyword => out.push_str("true"),
        NodeKind::FalseKeyword => out.push_str("false"),
        NodeKind::NullKeyword => out.push_str("null"),
        NodeKind::ArrayLiteralExpression => {
            out.push('[');
            print_list(children, ", ", out);
            out.push(']');
        }
        NodeKind::ObjectLiteralExpression => {
            if children.is_empty() {
                out.push_str("{}");
            } else {
                out.push_str("{ ");
                print_list(children, ", ", out);
                out.push_str(" }");
            }
        }
        NodeKind::PropertyAssignment => print_list(children, ": ", out),
        NodeKind::ComputedPropertyName => {
            out.push('[');
            print_list(children, "", out);
            out.push(']');
        }
        NodeKind::Other(tag) => {
            out.push_str("/* ");
            out.push_str(tag);
            out.push_str(" */");
            for child in children {
                out.push(' ');
                print_into(child, out);
            }
        }
    }
}
