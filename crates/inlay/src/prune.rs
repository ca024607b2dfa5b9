use inlay_ast::{Node, Program};

use crate::marker::MarkerModule;

/// Whether `import` only brings the marker module's functions into scope and can be dropped.
///
/// Side-effect imports (`import "m"`) and imports with an empty clause are kept, as are imports
/// whose specifier does not resolve to a symbol declared by the marker module. An import that
/// binds names from the marker module is removed as a whole, whatever else it binds.
pub fn should_prune_import<P: Program + ?Sized>(
    program: &P,
    marker: &MarkerModule,
    import: &Node,
) -> bool {
    if !import.import_clause().is_some_and(|clause| clause.binds_names()) {
        return false;
    }
    let Some(specifier) = import.module_specifier() else {
        return false;
    };
    program
        .resolve_module_symbol(specifier)
        .and_then(|symbol| symbol.declaring_file)
        .is_some_and(|file| marker.declares(&file))
}
