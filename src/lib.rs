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

//! Compile Gettext catalogs into JavaScript modules.
//!
//! A build looks for `.po` files below an input directory, works out
//! the locale of each file from the directory it lives in, and writes
//! one module per locale with the compiled catalog. The catalogs use
//! the JSON layout understood by [Jed](https://github.com/messageformat/Jed)
//! by default. When a module convention is configured, an `index`
//! module importing every locale is written as well:
//!
//! ```text
//! po/fr/LC_MESSAGES/app.po  ->  dist/fr.js
//! po/de/LC_MESSAGES/app.po  ->  dist/de.js
//!                               dist/index.js
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use po_catalog_build::{Builder, Config, FsTree, Options};
//!
//! let options = Options {
//!     es6: true,
//!     source_subpath: Some(String::from("/po")),
//!     ..Options::default()
//! };
//! let config = Config::from_options(options)?;
//! let summary = Builder::with_po_compiler(config, FsTree::new(".", "dist")).build()?;
//! println!("Compiled {} locales", summary.locales.len());
//! # Ok::<(), po_catalog_build::Error>(())
//! ```

pub mod build;
pub mod compiler;
pub mod config;
pub mod error;
pub mod locale;
pub mod module;
pub mod tree;

pub use build::{BuildSummary, Builder};
pub use compiler::{CatalogCompiler, CatalogFormat, CompileOptions, PoCompiler};
pub use config::{Config, Options};
pub use error::{Error, Result};
pub use locale::{Locale, LocaleLayout};
pub use module::ModuleConvention;
pub use tree::{FsTree, PathListTree, SourceTree};
