// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! This file contains the main logic used by the binary `po-catalog-build`.

use crate::compiler::{CatalogCompiler, PoCompiler};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::locale::Locale;
use crate::module::{build_index, wrap_catalog};
use crate::tree::SourceTree;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const CATALOG_EXTENSION: &str = "po";

/// Outcome of a successful build.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    /// Compiled locales in processing order, each listed once.
    pub locales: Vec<Locale>,
    /// Every file written, index last.
    pub written: Vec<PathBuf>,
    pub index: Option<PathBuf>,
}

/// Compiles the catalogs of a tree into JavaScript modules.
pub struct Builder<T, C> {
    config: Config,
    tree: T,
    compiler: C,
}

impl<T: SourceTree> Builder<T, PoCompiler> {
    /// A builder compiling PO files with the options found in `config`.
    pub fn with_po_compiler(config: Config, tree: T) -> Self {
        let compiler = PoCompiler::new(config.compile_options().clone());
        Self::new(config, tree, compiler)
    }
}

impl<T: SourceTree, C: CatalogCompiler> Builder<T, C> {
    pub fn new(config: Config, tree: T, compiler: C) -> Self {
        Self {
            config,
            tree,
            compiler,
        }
    }

    /// Run a complete build.
    ///
    /// Every catalog below the source subpath is compiled and written
    /// to `<locale>.<ext>` in the destination. An index module follows
    /// when at least one locale was compiled and the configuration has
    /// a module convention. The first error stops the build, possibly
    /// leaving earlier output behind.
    pub fn build(&self) -> Result<BuildSummary> {
        let destination = self
            .tree
            .output_root()
            .join(self.config.destination_subpath());
        fs::create_dir_all(&destination).map_err(|err| Error::io(&destination, err))?;

        let scan_root = self.tree.input_root().join(self.config.source_subpath());
        let catalogs = self
            .tree
            .input_paths(self.config.source_subpath())?
            .into_iter()
            .filter(|path| path.extension().is_some_and(|ext| ext == CATALOG_EXTENSION))
            .collect::<Vec<_>>();
        info!(
            "Compiling {} catalogs from {}",
            catalogs.len(),
            scan_root.display()
        );

        let convention = self.config.module_convention();
        let mut summary = BuildSummary::default();
        let mut sources = HashMap::new();
        for path in catalogs {
            let locale = self.config.layout().resolve(&path)?;
            let catalog = self.compiler.compile(&scan_root.join(&path))?;
            let output = self.output_path(&destination, locale.as_str());
            write(&output, &wrap_catalog(&catalog, convention))?;
            debug!("Compiled {} into {}", path.display(), output.display());

            match sources.insert(locale.clone(), path.clone()) {
                Some(previous) => warn!(
                    "Locale {locale} from {} was already compiled from {}, overwriting",
                    path.display(),
                    previous.display(),
                ),
                None => {
                    summary.locales.push(locale);
                    summary.written.push(output);
                }
            }
        }

        if summary.locales.is_empty() {
            info!("No catalogs found");
            return Ok(summary);
        }

        if let Some(index) = build_index(&summary.locales, convention) {
            let output = self.output_path(&destination, "index");
            write(&output, &index)?;
            summary.written.push(output.clone());
            summary.index = Some(output);
        }
        info!(
            "Wrote {} locales to {}",
            summary.locales.len(),
            destination.display()
        );

        Ok(summary)
    }

    fn output_path(&self, destination: &Path, stem: &str) -> PathBuf {
        destination.join(format!("{stem}.{}", self.config.output_extension()))
    }
}

fn write(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|err| Error::io(path, err))
}
