//! Replacing calls of the marker module's functions with literals.

use std::{fs, path::Path, sync::Arc};

use inlay_ast::{fold::FoldContext, Node, NodeKind, Program};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    binding::BindingPattern,
    encode::{encode, value_kind},
    error::{InlineError, InlineErrorKind},
    marker::{InlineFunction, MarkerModule},
};

/// The literal that replaces `call`, or `None` when `call` does not target the marker module.
pub fn try_inline_call<P: Program + ?Sized>(
    program: &P,
    marker: &MarkerModule,
    call: &Arc<Node>,
    cx: FoldContext<'_>,
) -> Result<Option<Arc<Node>>, InlineError> {
    let Some(declaration) = program.resolve_call_target(call) else {
        return Ok(None);
    };
    if !marker.declares(&declaration.source_file) {
        return Ok(None);
    }
    let Some(function) = declaration.name.as_deref() else {
        return Ok(None);
    };

    let _span = info_span!("inline", function).entered();
    inline_call(call, function, cx).map(Some)
}

fn inline_call(
    call: &Arc<Node>,
    function: &str,
    cx: FoldContext<'_>,
) -> Result<Arc<Node>, InlineError> {
    let Some(argument) = call.arguments().first().and_then(|arg| arg.as_string_literal()) else {
        return Err(InlineErrorKind::InvalidArgument { function: function.to_string() }.into());
    };

    // relative to the calling file, not to the marker module
    let path = cx.file.directory().join(argument);
    let bytes =
        fs::read(&path).map_err(|source| InlineErrorKind::Io { path: path.clone(), source })?;
    // invalid UTF-8 sequences become U+FFFD instead of failing the read
    let content = String::from_utf8_lossy(&bytes).into_owned();
    debug!(
        file = %cx.file.file_name().display(),
        function,
        path = %path.display(),
        bytes = content.len(),
        "inlining"
    );

    match function.parse::<InlineFunction>() {
        Ok(InlineFunction::File) => {
            Ok(Arc::new(Node::synthesized(NodeKind::StringLiteral(content), vec![])))
        }
        Ok(InlineFunction::Json) => inline_json(call, cx, argument, &path, &content),
        Err(_) => Err(InlineErrorKind::UnknownFunction { function: function.to_string() }.into()),
    }
}

/// Parse a whole JSON document without serde_json's nesting limit.
fn decode(content: &str) -> serde_json::Result<Value> {
    let mut deserializer = serde_json::Deserializer::from_str(content);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(value)
}

fn inline_json(
    call: &Arc<Node>,
    cx: FoldContext<'_>,
    argument: &str,
    path: &Path,
    content: &str,
) -> Result<Arc<Node>, InlineError> {
    let value = decode(content)
        .map_err(|source| InlineErrorKind::MalformedData { path: path.to_path_buf(), source })?;

    let value = match (BindingPattern::of_call(call, cx.parent), value) {
        (Some(pattern), Value::Object(object)) => {
            trace!(keys = ?pattern.keys().collect::<Vec<_>>(), "keeping destructured keys only");
            Value::Object(pattern.filter(&object))
        }
        (Some(_), Value::Null) => Value::Null,
        (Some(_), other) => {
            return Err(InlineErrorKind::TypeMismatch {
                file: argument.to_string(),
                found: value_kind(&other),
            }
            .into())
        }
        (None, value) => value,
    };
    let literal = encode(&value)?;
    trace!(nodes = literal.subtree_len(), "encoded literal");
    Ok(literal)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use inlay_ast::{
        build::TreeBuilder, print::print_node, Declaration, InMemoryProgram, SourceFile,
    };
    use tempfile::TempDir;

    use super::*;

    struct Fixture {
        dir: TempDir,
        marker: MarkerModule,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let marker = MarkerModule::in_dir(dir.path().join("node_modules/inlay"));
            Self { dir, marker }
        }

        fn write(&self, name: &str, content: &str) {
            std::fs::write(self.dir.path().join(name), content).unwrap();
        }

        fn file_name(&self) -> PathBuf {
            self.dir.path().join("main.ts")
        }

        /// Run the inliner on the initializer of `const <target> = <function>(<arg>)`.
        fn inline(
            &self,
            function: &str,
            arg: Node,
            destructure: Option<&[&str]>,
        ) -> Result<Option<Arc<Node>>, InlineError> {
            let mut b = TreeBuilder::starting_at(1000);
            let call = b.call(function, vec![arg]);
            let call_id = call.id;
            let name = match destructure {
                Some(keys) => {
                    let elements = keys.iter().map(|key| b.binding_element(None, key)).collect();
                    b.object_pattern(elements)
                }
                None => b.ident("data"),
            };
            let declaration = b.var_decl(name, Some(call));
            let root = b.source_file(vec![]);
            let file = SourceFile::new(self.file_name(), "", root);

            let mut program = InMemoryProgram::new();
            program.bind_call(call_id, Declaration::new(function, self.marker.path()));
            let call = &declaration.children[1];
            let cx = FoldContext { file: &file, parent: Some(&declaration) };
            try_inline_call(&program, &self.marker, call, cx)
        }
    }

    fn string(value: &str) -> Node {
        TreeBuilder::starting_at(0).string(value)
    }

    #[test]
    fn test_inline_file_is_verbatim() {
        let fixture = Fixture::new();
        let content = "  line one\\n\n\"quoted\"\t\n";
        fixture.write("notes.txt", content);
        let node = fixture.inline("$INLINE_FILE", string("notes.txt"), None).unwrap().unwrap();
        assert_eq!(node.kind, NodeKind::StringLiteral(content.to_string()));
    }

    #[test]
    fn test_inline_json() {
        let fixture = Fixture::new();
        fixture.write("data.json", r#"{"a":1,"b":[true,null,"s"]}"#);
        let node = fixture.inline("$INLINE_JSON", string("data.json"), None).unwrap().unwrap();
        assert_eq!(print_node(&node), r#"{ "a": 1, "b": [true, null, "s"] }"#);
    }

    #[test]
    fn test_inline_json_destructured() {
        let fixture = Fixture::new();
        fixture.write("data.json", r#"{"a":1,"b":[true,null,"s"]}"#);
        let node =
            fixture.inline("$INLINE_JSON", string("data.json"), Some(&["a"])).unwrap().unwrap();
        assert_eq!(print_node(&node), r#"{ "a": 1 }"#);
    }

    #[test]
    fn test_destructured_null_passes_through() {
        let fixture = Fixture::new();
        fixture.write("null.json", "null");
        let node =
            fixture.inline("$INLINE_JSON", string("null.json"), Some(&["a"])).unwrap().unwrap();
        assert_eq!(node.kind, NodeKind::NullKeyword);
    }

    #[test]
    fn test_destructured_array_is_mismatch() {
        let fixture = Fixture::new();
        fixture.write("list.json", "[1, 2]");
        let err = fixture.inline("$INLINE_JSON", string("list.json"), Some(&["a"])).unwrap_err();
        assert!(matches!(err.kind(), InlineErrorKind::TypeMismatch { found: "array", .. }));
        assert_eq!(
            err.to_string(),
            "list.json does not contain an object as expected, found array"
        );

        // without destructuring an array is fine
        let node = fixture.inline("$INLINE_JSON", string("list.json"), None).unwrap().unwrap();
        assert_eq!(print_node(&node), "[1, 2]");
    }

    #[test]
    fn test_deeply_nested_json() {
        let fixture = Fixture::new();
        let json = format!("{}1{}", "[".repeat(200), "]".repeat(200));
        fixture.write("deep.json", &json);
        let node = fixture.inline("$INLINE_JSON", string("deep.json"), None).unwrap().unwrap();
        assert_eq!(print_node(&node), json);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let fixture = Fixture::new();
        std::fs::write(fixture.dir.path().join("latin1.txt"), b"caf\xe9").unwrap();
        let node = fixture.inline("$INLINE_FILE", string("latin1.txt"), None).unwrap().unwrap();
        assert_eq!(node.kind, NodeKind::StringLiteral("caf\u{FFFD}".to_string()));
    }

    #[test]
    fn test_trailing_content_is_malformed() {
        let fixture = Fixture::new();
        fixture.write("two.json", "{} {}");
        let err = fixture.inline("$INLINE_JSON", string("two.json"), None).unwrap_err();
        assert!(matches!(err.kind(), InlineErrorKind::MalformedData { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let fixture = Fixture::new();
        fixture.write("broken.json", "{\"a\": ");
        let err = fixture.inline("$INLINE_JSON", string("broken.json"), None).unwrap_err();
        assert!(matches!(err.kind(), InlineErrorKind::MalformedData { .. }));
    }

    #[test]
    fn test_non_string_argument() {
        let fixture = Fixture::new();
        let number = TreeBuilder::starting_at(0).number("42");
        let err = fixture.inline("$INLINE_FILE", number, None).unwrap_err();
        match err.kind() {
            InlineErrorKind::InvalidArgument { function } => assert_eq!(function, "$INLINE_FILE"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let fixture = Fixture::new();
        let err = fixture.inline("$INLINE_FILE", string("absent.txt"), None).unwrap_err();
        match err.kind() {
            InlineErrorKind::Io { path, source } => {
                assert_eq!(path, &fixture.dir.path().join("absent.txt"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_function() {
        let fixture = Fixture::new();
        fixture.write("a.txt", "a");
        let err = fixture.inline("$INLINE_YAML", string("a.txt"), None).unwrap_err();
        assert!(matches!(
            err.kind(),
            InlineErrorKind::UnknownFunction { function } if function == "$INLINE_YAML"
        ));
    }

    #[test]
    fn test_other_module_is_ignored() {
        let fixture = Fixture::new();
        let mut b = TreeBuilder::default();
        let arg = b.number("42");
        let call = Arc::new(b.call("$INLINE_FILE", vec![arg]));
        let root = b.source_file(vec![]);
        let file = SourceFile::new(fixture.file_name(), "", root);
        let cx = FoldContext { file: &file, parent: None };

        // same name, different declaring file
        let mut program = InMemoryProgram::new();
        program.bind_call(call.id, Declaration::new("$INLINE_FILE", "/elsewhere/index.d.ts"));
        assert!(try_inline_call(&program, &fixture.marker, &call, cx).unwrap().is_none());

        // unresolved call
        let program = InMemoryProgram::new();
        assert!(try_inline_call(&program, &fixture.marker, &call, cx).unwrap().is_none());

        // anonymous declaration inside the marker module
        let mut program = InMemoryProgram::new();
        program.bind_call(
            call.id,
            Declaration { name: None, source_file: fixture.marker.path().to_path_buf() },
        );
        assert!(try_inline_call(&program, &fixture.marker, &call, cx).unwrap().is_none());
    }
}
