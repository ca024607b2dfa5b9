//! Turning decoded JSON into literal syntax.

use std::sync::Arc;

use inlay_ast::{Node, NodeKind, UnaryOperator};
use serde_json::{Number, Value};

use crate::error::{InlineError, InlineErrorKind};

/// Encode a decoded value as an equivalent literal expression.
///
/// Object keys always become string-literal property names, in the order the map yields them.
/// Numbers keep the exact digits they were written with, only the exponent is spelled with an
/// explicit sign (`1.5e3` becomes `1.5e+3`); negative numbers become a prefix minus over a
/// positive literal. A number too large to be represented as a finite double has no
/// faithful literal and is rejected.
pub fn encode(value: &Value) -> Result<Arc<Node>, InlineError> {
    let node = match value {
        Value::Null => leaf(NodeKind::NullKeyword),
        Value::Bool(true) => leaf(NodeKind::TrueKeyword),
        Value::Bool(false) => leaf(NodeKind::FalseKeyword),
        Value::Number(number) => return encode_number(number),
        Value::String(value) => leaf(NodeKind::StringLiteral(value.clone())),
        Value::Array(items) => {
            let elements = items.iter().map(encode).collect::<Result<Vec<_>, _>>()?;
            Node::synthesized(NodeKind::ArrayLiteralExpression, elements)
        }
        Value::Object(object) => {
            let properties = object
                .iter()
                .map(|(key, value)| {
                    let name = Arc::new(leaf(NodeKind::StringLiteral(key.clone())));
                    let initializer = encode(value)?;
                    Ok(Arc::new(Node::synthesized(
                        NodeKind::PropertyAssignment,
                        vec![name, initializer],
                    )))
                })
                .collect::<Result<Vec<_>, InlineError>>()?;
            Node::synthesized(NodeKind::ObjectLiteralExpression, properties)
        }
    };
    Ok(Arc::new(node))
}

fn leaf(kind: NodeKind) -> Node {
    Node::synthesized(kind, vec![])
}

fn encode_number(number: &Number) -> Result<Arc<Node>, InlineError> {
    let text = number.to_string();
    if !number.as_f64().is_some_and(f64::is_finite) {
        return Err(InlineErrorKind::UnsupportedValue { value: text, kind: "non-finite number" }
            .into());
    }

    let node = match text.strip_prefix('-') {
        Some(magnitude) => {
            let literal = Arc::new(leaf(NodeKind::NumericLiteral(magnitude.to_string())));
            Node::synthesized(NodeKind::PrefixUnaryExpression(UnaryOperator::Minus), vec![literal])
        }
        None => leaf(NodeKind::NumericLiteral(text)),
    };
    Ok(Arc::new(node))
}

/// The JSON type name of a value, as used in diagnostics.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
