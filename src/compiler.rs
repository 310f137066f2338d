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

//! Compilation of a single PO file into a serialized catalog.

mod formats;

use crate::error::{Error, Result};
use clap::ValueEnum;
use log::debug;
use polib::po_file;
use serde::Deserialize;
use std::panic;
use std::path::Path;

/// Layout of the serialized catalog.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Deserialize, ValueEnum)]
pub enum CatalogFormat {
    /// Header fields under `""` and `[msgid_plural, msgstr...]` per key.
    #[serde(rename = "raw")]
    Raw,
    /// Jed before 1.0, with the plural msgid leading every entry.
    #[serde(rename = "jed")]
    Jed,
    /// Jed 1.x, with only the translated forms per entry.
    #[default]
    #[serde(rename = "jed1.x")]
    #[value(name = "jed1.x")]
    Jed1x,
}

/// Options passed through to the PO compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    pub format: CatalogFormat,
    /// Gettext domain written into the Jed formats.
    pub domain: String,
    /// Keep the translations of messages flagged as fuzzy. Otherwise
    /// fuzzy messages are left out, or compiled as untranslated when
    /// `fallback_to_msgid` is set.
    pub fuzzy: bool,
    /// Fill empty forms with the msgid (first form) or the plural msgid
    /// (other forms). Without it, untranslated messages keep their
    /// empty forms.
    pub fallback_to_msgid: bool,
    pub pretty: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            format: CatalogFormat::default(),
            domain: String::from("messages"),
            fuzzy: false,
            fallback_to_msgid: false,
            pretty: false,
        }
    }
}

/// Turns one catalog file into its serialized form.
pub trait CatalogCompiler {
    fn compile(&self, path: &Path) -> Result<String>;
}

/// Compiles Gettext PO files into JSON catalogs.
#[derive(Debug, Clone, Default)]
pub struct PoCompiler {
    options: CompileOptions,
}

impl PoCompiler {
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }
}

impl CatalogCompiler for PoCompiler {
    fn compile(&self, path: &Path) -> Result<String> {
        let compile_error = |message: String| Error::Compile {
            path: path.to_path_buf(),
            message,
        };
        // The PO parser slices quoted strings without checking their
        // length, so truncated lines panic instead of failing.
        let catalog = panic::catch_unwind(|| po_file::parse(path))
            .map_err(|_| compile_error(String::from("truncated or unquoted string")))?
            .map_err(|err| compile_error(err.to_string()))?;
        debug!("Read {} messages from {}", catalog.count(), path.display());

        let value = formats::render(&catalog, &self.options);
        let serialized = if self.options.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(serialized)
    }
}
