//! Export and re-export tracking
//!
//! Per source file, exports are classified as:
//! - wildcard (`export * from`) and namespace (`export * as ns from`) re-exports
//! - re-exports of names declared in another project file
//! - direct exports, resolved through the registry
//!
//! Re-exports are grouped by (originating file, namespace alias), so one
//! file contributes at most one group per pair.

use std::path::{Path, PathBuf};

use crate::ids::{ModuleId, SymbolId};
use crate::model::{ExportedReference, FileExports, ReExport};
use crate::oracle::SymbolKind;
use crate::session::ExtractionSession;

impl<'o> ExtractionSession<'o> {
    /// Classify the exports of `file`, owned by `module` of `project`
    pub(crate) fn track_exports(
        &mut self,
        project: usize,
        module: ModuleId,
        file: &Path,
    ) -> FileExports {
        let oracle = self.oracle;
        let mut exports = FileExports::default();
        let Some(file_symbol) = oracle.file_symbol(file) else {
            return exports;
        };

        for wildcard in oracle.wildcard_exports(file_symbol) {
            let Some(target_file) = self.symbol_file(wildcard.target) else {
                continue;
            };
            match self.reexport_group(&mut exports, project, module, &target_file, wildcard.namespace) {
                Some(group) => group.wildcard = true,
                None => tracing::debug!("Skipping wildcard re-export of {:?}", target_file),
            }
        }

        for symbol in oracle.exports_of(file_symbol) {
            let Some(info) = oracle.symbol(symbol) else {
                continue;
            };

            if info.kind == SymbolKind::Alias {
                let target = self.resolve_alias(symbol);
                let target_kind = oracle.symbol(target).map(|t| t.kind);
                let target_file = self.symbol_file(target);

                match (target_kind, target_file) {
                    (Some(SymbolKind::SourceFile), Some(target_file)) => {
                        // export * as ns from "./b"
                        let group = self.reexport_group(
                            &mut exports,
                            project,
                            module,
                            &target_file,
                            Some(info.name.clone()),
                        );
                        match group {
                            Some(group) => group.wildcard = true,
                            None => tracing::debug!(
                                "Skipping namespace re-export '{}' of {:?}",
                                info.name,
                                target_file
                            ),
                        }
                        continue;
                    }
                    (Some(_), Some(target_file))
                        if target_file != file && !self.is_external_file(&target_file) =>
                    {
                        if let Some(reference) = self.reference(target) {
                            let alias = (info.name != reference.name).then(|| info.name.clone());
                            if let Some(group) =
                                self.reexport_group(&mut exports, project, module, &target_file, None)
                            {
                                group.references.push(ExportedReference { reference, alias });
                                continue;
                            }
                        }
                    }
                    _ => {}
                }
            }

            match self.reference(symbol) {
                Some(reference) => {
                    let alias = (info.name != reference.name).then(|| info.name.clone());
                    exports.exports.push(ExportedReference { reference, alias });
                }
                None => tracing::trace!("Skipping export '{}' of {:?}", info.name, file),
            }
        }

        exports
    }

    /// Find or create the re-export group for (`target_file`, `namespace`)
    fn reexport_group<'e>(
        &mut self,
        exports: &'e mut FileExports,
        project: usize,
        module: ModuleId,
        target_file: &Path,
        namespace: Option<String>,
    ) -> Option<&'e mut ReExport> {
        // dependencies have no module of their own
        if self.is_external_file(target_file) {
            return None;
        }
        let target = self.resolve_module(target_file)?;
        let relative = self.relative_file(target_file)?;

        let position = exports
            .reexports
            .iter()
            .position(|g| g.file == relative && g.namespace == namespace);
        let index = match position {
            Some(index) => index,
            None => {
                let module_path = self.module(target)?.children_path.clone();
                exports.reexports.push(ReExport {
                    module: module_path,
                    file: relative,
                    namespace,
                    same_module: target.project == project && target.module == module,
                    wildcard: false,
                    references: Vec::new(),
                });
                exports.reexports.len() - 1
            }
        };
        exports.reexports.get_mut(index)
    }

    /// File declaring `symbol`
    fn symbol_file(&self, symbol: SymbolId) -> Option<PathBuf> {
        let declaration = self.oracle.symbol(symbol)?.declaration()?;
        Some(self.oracle.node(declaration)?.file)
    }
}
