use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// File name of the declaration stub that advertises the inline functions.
pub const MARKER_DECLARATION_FILE: &str = "index.d.ts";

/// The declaration file whose functions are inlining directives.
///
/// Calls and imports are recognized by the file their declaration lives in, never by the name
/// used at the call site, so aliased imports are still found and same-named functions from
/// other modules are left alone.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerModule {
    path: PathBuf,
}

impl MarkerModule {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The stub named [`MARKER_DECLARATION_FILE`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(MARKER_DECLARATION_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `file`, as reported by the type-resolution service, is the marker module.
    pub fn declares(&self, file: &Path) -> bool {
        file == self.path
    }
}

/// The functions of the marker module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum InlineFunction {
    /// `$INLINE_FILE(path)`: the file's text as a string literal.
    #[strum(serialize = "$INLINE_FILE")]
    File,
    /// `$INLINE_JSON(path)`: the file's JSON as an object/array/scalar literal.
    #[strum(serialize = "$INLINE_JSON")]
    Json,
}
