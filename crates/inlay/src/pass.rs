use std::sync::Arc;

use eyre::{OptionExt, Result};
use inlay_ast::{
    fold::{self, fold_source_file, FoldContext, Rewrite, Transform},
    Node, Program, SourceFile,
};

use crate::{
    config::InlayConfig,
    diagnostic::{enhance, location},
    error::InlineError,
    inline::try_inline_call,
    marker::MarkerModule,
    prune::should_prune_import,
};

/// Counters of what a pass has rewritten so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InlineStats {
    pub inlined_calls: usize,
    pub pruned_imports: usize,
}

#[derive(Debug, Default)]
pub struct InlinePassBuilder {
    marker_module: Option<MarkerModule>,
}

impl InlinePassBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the settings from a loaded configuration.
    pub fn config(mut self, config: InlayConfig) -> Self {
        self.marker_module = Some(config.marker_module);
        self
    }

    /// Set the declaration file whose functions are inlined.
    /// Overrides the one from [`InlinePassBuilder::config`].
    pub fn marker_module(mut self, marker_module: MarkerModule) -> Self {
        self.marker_module = Some(marker_module);
        self
    }

    /// Build the pass over `program`. A marker module must have been set.
    pub fn build<P: Program + ?Sized>(self, program: &P) -> Result<InlinePass<'_, P>> {
        let marker = self.marker_module.ok_or_eyre("no marker module configured")?;
        Ok(InlinePass::new(program, marker))
    }
}

/// The inlining pass over one program.
///
/// Every call into the marker module is replaced with the literal it stands for and every
/// import of the marker module is dropped. The first failure aborts the pass.
#[derive(Debug)]
pub struct InlinePass<'p, P: ?Sized> {
    program: &'p P,
    marker: MarkerModule,
    stats: InlineStats,
}

impl<'p, P: Program + ?Sized> InlinePass<'p, P> {
    pub fn new(program: &'p P, marker: MarkerModule) -> Self {
        Self { program, marker, stats: InlineStats::default() }
    }

    pub fn marker_module(&self) -> &MarkerModule {
        &self.marker
    }

    pub fn stats(&self) -> InlineStats {
        self.stats
    }

    /// Rewrite a single file.
    pub fn transform(&mut self, file: &SourceFile) -> Result<SourceFile, InlineError> {
        let _span = info_span!("transform", file = %file.file_name().display()).entered();
        fold_source_file(self, file)
    }

    /// Rewrite every file of the program, in order.
    pub fn run(&mut self) -> Result<Vec<SourceFile>, InlineError> {
        let program = self.program;
        let files = program
            .source_files()
            .iter()
            .map(|file| self.transform(file))
            .collect::<Result<Vec<_>, _>>()?;
        info!(
            files = files.len(),
            inlined_calls = self.stats.inlined_calls,
            pruned_imports = self.stats.pruned_imports,
            "inlining finished"
        );
        Ok(files)
    }
}

impl<P: Program + ?Sized> Transform for InlinePass<'_, P> {
    type Error = InlineError;

    fn transform_node(
        &mut self,
        node: &Arc<Node>,
        cx: FoldContext<'_>,
    ) -> Result<Rewrite, InlineError> {
        fold::dispatch(self, node, cx).map_err(|mut err| {
            enhance(&mut err, node, cx.file);
            error!(location = %location(node, cx.file), "{err}");
            err
        })
    }

    fn transform_call_expression(
        &mut self,
        call: &Arc<Node>,
        cx: FoldContext<'_>,
    ) -> Result<Rewrite, InlineError> {
        let replacement = try_inline_call(self.program, &self.marker, call, cx)?;
        if replacement.is_some() {
            self.stats.inlined_calls += 1;
        }
        Ok(replacement.into())
    }

    fn transform_import_declaration(
        &mut self,
        import: &Arc<Node>,
        cx: FoldContext<'_>,
    ) -> Result<Rewrite, InlineError> {
        if !should_prune_import(self.program, &self.marker, import) {
            return Ok(Rewrite::Descend);
        }
        debug!(location = %location(import, cx.file), "removing import of the marker module");
        self.stats.pruned_imports += 1;
        Ok(Rewrite::Remove)
    }
}
