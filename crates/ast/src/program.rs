//! The host boundary: source files plus the type-resolution service.

use std::path::PathBuf;

use rustc_hash::FxHashMap;

use crate::{
    node::{Node, NodeId},
    source_file::SourceFile,
};

/// The declaration a call expression statically resolves to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Declaration {
    /// The declared name, absent for anonymous declarations.
    pub name: Option<String>,
    /// The file the declaration is written in.
    pub source_file: PathBuf,
}

impl Declaration {
    pub fn new(name: impl Into<String>, source_file: impl Into<PathBuf>) -> Self {
        Self { name: Some(name.into()), source_file: source_file.into() }
    }
}

/// The symbol a module reference resolves to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModuleSymbol {
    /// The file declaring the module, absent when the symbol has no value declaration.
    pub declaring_file: Option<PathBuf>,
}

impl ModuleSymbol {
    pub fn declared_in(file: impl Into<PathBuf>) -> Self {
        Self { declaring_file: Some(file.into()) }
    }
}

/// A fully type-checked program, owned by the host. The pass only reads from it.
pub trait Program {
    /// Every source file of the program, in the host's order.
    fn source_files(&self) -> &[SourceFile];

    /// The declaration targeted by a call expression, if statically known and backed by a
    /// syntactic declaration.
    fn resolve_call_target(&self, call: &Node) -> Option<Declaration>;

    /// The symbol a module reference (the specifier of an import) resolves to.
    fn resolve_module_symbol(&self, module_ref: &Node) -> Option<ModuleSymbol>;
}

impl<P: Program + ?Sized> Program for &P {
    fn source_files(&self) -> &[SourceFile] {
        (**self).source_files()
    }

    fn resolve_call_target(&self, call: &Node) -> Option<Declaration> {
        (**self).resolve_call_target(call)
    }

    fn resolve_module_symbol(&self, module_ref: &Node) -> Option<ModuleSymbol> {
        (**self).resolve_module_symbol(module_ref)
    }
}

/// A [`Program`] whose resolution answers are recorded ahead of time, keyed by node id.
///
/// This is the smallest possible host: the caller lowers its files into [`Node`] trees and
/// binds the call expressions and module specifiers it has resolved.
#[derive(Debug, Default)]
pub struct InMemoryProgram {
    files: Vec<SourceFile>,
    call_targets: FxHashMap<NodeId, Declaration>,
    module_symbols: FxHashMap<NodeId, ModuleSymbol>,
}

impl InMemoryProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, file: SourceFile) -> &mut Self {
        self.files.push(file);
        self
    }

    /// Record that the call expression `call` resolves to `declaration`.
    pub fn bind_call(&mut self, call: NodeId, declaration: Declaration) -> &mut Self {
        trace!(%call, ?declaration, "binding call target");
        self.call_targets.insert(call, declaration);
        self
    }

    /// Record that the module specifier `module_ref` resolves to `symbol`.
    pub fn bind_module(&mut self, module_ref: NodeId, symbol: ModuleSymbol) -> &mut Self {
        trace!(%module_ref, ?symbol, "binding module symbol");
        self.module_symbols.insert(module_ref, symbol);
        self
    }
}

impl Program for InMemoryProgram {
    fn source_files(&self) -> &[SourceFile] {
        &self.files
    }

    fn resolve_call_target(&self, call: &Node) -> Option<Declaration> {
        self.call_targets.get(&call.id).cloned()
    }

    fn resolve_module_symbol(&self, module_ref: &Node) -> Option<ModuleSymbol> {
        self.module_symbols.get(&module_ref.id).cloned()
    }
}
