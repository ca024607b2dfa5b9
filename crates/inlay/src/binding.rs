//! Restricting inlined objects to the keys a destructuring declaration reads.
//!
//! For `const { a, b: c } = $INLINE_JSON("data.json")` only `a` and `b` of the decoded object
//! can ever be observed, so the rest is dropped before encoding.

use std::sync::Arc;

use inlay_ast::{Node, NodeKind};
use serde_json::{Map, Value};

/// One element of an object binding pattern.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BindingElement {
    /// The `key` in `{ key: name }`, when it is a plain identifier.
    pub property_name: Option<String>,
    /// The `name` in `{ key: name }` or `{ name }`, when it is a plain identifier.
    pub name: Option<String>,
}

impl BindingElement {
    /// The object key this element reads, if it can be determined.
    pub fn key(&self) -> Option<&str> {
        self.property_name.as_deref().or(self.name.as_deref())
    }
}

/// The elements of an object destructuring target, in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BindingPattern {
    elements: Vec<BindingElement>,
}

impl BindingPattern {
    pub fn new(elements: Vec<BindingElement>) -> Self {
        Self { elements }
    }

    /// Describe an `ObjectBindingPattern` node. Any other node yields `None`.
    pub fn from_node(pattern: &Node) -> Option<Self> {
        if pattern.kind != NodeKind::ObjectBindingPattern {
            return None;
        }
        let identifier = |node: Option<&Arc<Node>>| {
            node.and_then(|node| node.as_identifier()).map(str::to_string)
        };
        let elements = pattern
            .children
            .iter()
            .map(|element| BindingElement {
                property_name: identifier(element.property_name()),
                name: identifier(element.bound_name()),
            })
            .collect();
        Some(Self { elements })
    }

    /// The destructuring target `call` is assigned to, if `call` directly initializes a
    /// declaration whose name is an object binding pattern.
    pub fn of_call(call: &Arc<Node>, parent: Option<&Node>) -> Option<Self> {
        let declaration = parent.filter(|p| p.kind == NodeKind::VariableDeclaration)?;
        if !declaration.initializer().is_some_and(|init| Arc::ptr_eq(init, call)) {
            return None;
        }
        Self::from_node(declaration.declaration_name()?)
    }

    pub fn elements(&self) -> &[BindingElement] {
        &self.elements
    }

    /// The keys read by the pattern. Elements without a usable key are skipped.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(BindingElement::key)
    }

    /// Keep only the entries of `object` whose key the pattern reads. Keys missing from
    /// `object` are left out rather than filled in.
    pub fn filter(&self, object: &Map<String, Value>) -> Map<String, Value> {
        let mut filtered = Map::new();
        for key in self.keys() {
            if let Some(value) = object.get(key) {
                filtered.insert(key.to_string(), value.clone());
            }
        }
        filtered
    }
}

#[cfg(test)]
mod tests {
    use inlay_ast::build::TreeBuilder;
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(object) => object,
            _ => unreachable!("test input is an object"),
        }
    }

    #[test]
    fn test_from_node() {
        let mut b = TreeBuilder::default();
        let a = b.binding_element(None, "a");
        let renamed = b.binding_element(Some("b"), "local");
        // `{ ["c"]: x }` has a computed property name, so the bound name is used
        let key = b.string("c");
        let computed = b.node(NodeKind::ComputedPropertyName, vec![key]);
        let x = b.ident("x");
        let computed = b.binding_element_node(Some(computed), x, None);
        // `{ d: { e } }` binds a nested pattern under an identifier key
        let e = b.binding_element(None, "e");
        let nested_pattern = b.object_pattern(vec![e]);
        let d = b.ident("d");
        let nested = b.binding_element_node(Some(d), nested_pattern, None);
        let pattern = b.object_pattern(vec![a, renamed, computed, nested]);

        let pattern = BindingPattern::from_node(&pattern).unwrap();
        assert_eq!(pattern.elements().len(), 4);
        assert_eq!(pattern.keys().collect::<Vec<_>>(), vec!["a", "b", "x", "d"]);
    }

    #[test]
    fn test_element_without_key_is_skipped() {
        let mut b = TreeBuilder::default();
        let key = b.string("k");
        let computed = b.node(NodeKind::ComputedPropertyName, vec![key]);
        let inner = b.binding_element(None, "z");
        let nested = b.object_pattern(vec![inner]);
        let element = b.binding_element_node(Some(computed), nested, None);
        let pattern = b.object_pattern(vec![element]);

        let pattern = BindingPattern::from_node(&pattern).unwrap();
        assert_eq!(pattern.keys().count(), 0);
        assert!(pattern.filter(&object(json!({ "k": 1 }))).is_empty());
    }

    #[test]
    fn test_filter() {
        let pattern = BindingPattern::new(vec![
            BindingElement { property_name: None, name: Some("a".to_string()) },
            BindingElement { property_name: Some("c".to_string()), name: Some("x".to_string()) },
            BindingElement { property_name: None, name: Some("missing".to_string()) },
        ]);
        let filtered = pattern.filter(&object(json!({ "a": 1, "b": [2], "c": { "d": null } })));
        assert_eq!(Value::Object(filtered), json!({ "a": 1, "c": { "d": null } }));
    }

    #[test]
    fn test_of_call_requires_direct_initializer() {
        let mut b = TreeBuilder::default();
        let arg = b.string("data.json");
        let call = b.call("$INLINE_JSON", vec![arg]);
        let a = b.binding_element(None, "a");
        let pattern = b.object_pattern(vec![a]);
        let declaration = b.var_decl(pattern, Some(call));
        let call = Arc::clone(&declaration.children[1]);

        let pattern = BindingPattern::of_call(&call, Some(&declaration)).unwrap();
        assert_eq!(pattern.keys().collect::<Vec<_>>(), vec!["a"]);

        let other_arg = b.string("data.json");
        let other = Arc::new(b.call("$INLINE_JSON", vec![other_arg]));
        assert!(BindingPattern::of_call(&other, Some(&declaration)).is_none());
        assert!(BindingPattern::of_call(&call, None).is_none());

        let plain_name = b.ident("data");
        let plain = b.var_decl(plain_name, Some((*call).clone()));
        let call = Arc::clone(&plain.children[1]);
        assert!(BindingPattern::of_call(&call, Some(&plain)).is_none());
    }
}
