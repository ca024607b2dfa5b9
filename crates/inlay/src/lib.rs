//! # inlay
//!
//! A compile-time pass that replaces `$INLINE_FILE(path)` and `$INLINE_JSON(path)` calls with the
//! literal contents of the referenced files, and drops the imports that brought those functions
//! into scope.
//!
//! The host supplies a type-checked [`Program`](inlay_ast::Program); the pass hands back a
//! rewritten [`SourceFile`](inlay_ast::SourceFile) per input file.

#[macro_use]
extern crate tracing;

mod binding;
mod config;
mod diagnostic;
pub mod encode;
mod error;
mod inline;
mod marker;
mod pass;
mod prune;

pub use binding::{BindingElement, BindingPattern};
pub use config::InlayConfig;
pub use diagnostic::{enhance, location};
pub use error::{InlineError, InlineErrorKind};
pub use inline::try_inline_call;
pub use marker::{InlineFunction, MarkerModule, MARKER_DECLARATION_FILE};
pub use pass::{InlinePass, InlinePassBuilder, InlineStats};
pub use prune::should_prune_import;
