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

//! Build configuration.
//!
//! Hosts describe a build with a loose [`Options`] value, typically
//! deserialized from JSON. It is checked and turned into a [`Config`]
//! exactly once, before any file is touched.

use crate::compiler::{CatalogFormat, CompileOptions};
use crate::error::{Error, Result};
use crate::locale::LocaleLayout;
use crate::module::ModuleConvention;
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

/// Raw build options as supplied by a host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Directory below the input root to scan, `/` by default.
    pub source_subpath: Option<String>,
    /// Directory below the output root to write to, `/` by default.
    pub destination_subpath: Option<String>,
    pub module_convention: Option<ModuleConvention>,
    /// Shorthand for `moduleConvention: "es6"`.
    pub es6: bool,
    /// Shorthand for `moduleConvention: "commonjs"`.
    pub commonjs: bool,
    pub catalog_format: Option<CatalogFormat>,
    pub layout: Option<LocaleLayout>,
    pub output_extension: Option<String>,
    pub domain: Option<String>,
    pub fuzzy: bool,
    pub fallback_to_msgid: bool,
    pub pretty: bool,
}

/// Resolved and validated build configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    source_subpath: PathBuf,
    destination_subpath: PathBuf,
    module_convention: ModuleConvention,
    layout: LocaleLayout,
    output_extension: String,
    compile: CompileOptions,
}

impl Config {
    pub fn from_options(options: Options) -> Result<Self> {
        let module_convention = module_convention(&options)?;
        let source_subpath = subpath(options.source_subpath.as_deref())?;
        let destination_subpath = subpath(options.destination_subpath.as_deref())?;

        let output_extension = match options.output_extension {
            Some(extension) => String::from(extension.trim_start_matches('.')),
            None => String::from("js"),
        };
        if output_extension.is_empty() {
            return Err(Error::Config(String::from(
                "the output extension cannot be empty",
            )));
        }

        let mut compile = CompileOptions {
            fuzzy: options.fuzzy,
            fallback_to_msgid: options.fallback_to_msgid,
            pretty: options.pretty,
            format: options.catalog_format.unwrap_or_default(),
            ..CompileOptions::default()
        };
        if let Some(domain) = options.domain {
            if domain.is_empty() {
                return Err(Error::Config(String::from("the domain cannot be empty")));
            }
            compile.domain = domain;
        }

        Ok(Self {
            source_subpath,
            destination_subpath,
            module_convention,
            layout: options.layout.unwrap_or_default(),
            output_extension,
            compile,
        })
    }

    /// Scan directory, relative to the input root.
    pub fn source_subpath(&self) -> &Path {
        &self.source_subpath
    }

    /// Output directory, relative to the output root.
    pub fn destination_subpath(&self) -> &Path {
        &self.destination_subpath
    }

    pub fn module_convention(&self) -> ModuleConvention {
        self.module_convention
    }

    pub fn layout(&self) -> LocaleLayout {
        self.layout
    }

    pub fn output_extension(&self) -> &str {
        &self.output_extension
    }

    pub fn compile_options(&self) -> &CompileOptions {
        &self.compile
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_subpath: PathBuf::new(),
            destination_subpath: PathBuf::new(),
            module_convention: ModuleConvention::default(),
            layout: LocaleLayout::default(),
            output_extension: String::from("js"),
            compile: CompileOptions::default(),
        }
    }
}

fn module_convention(options: &Options) -> Result<ModuleConvention> {
    let flagged = match (options.es6, options.commonjs) {
        (true, true) => {
            return Err(Error::Config(String::from(
                "es6 and commonjs cannot both be enabled",
            )))
        }
        (true, false) => Some(ModuleConvention::Es6),
        (false, true) => Some(ModuleConvention::CommonJs),
        (false, false) => None,
    };
    match (options.module_convention, flagged) {
        (Some(explicit), Some(flag)) if explicit != flag => Err(Error::Config(format!(
            "moduleConvention {explicit:?} contradicts the {flag:?} flag"
        ))),
        (explicit, flag) => Ok(explicit.or(flag).unwrap_or_default()),
    }
}

/// Turn `/`-rooted subpaths into paths relative to their root.
fn subpath(value: Option<&str>) -> Result<PathBuf> {
    let mut path = PathBuf::new();
    for component in Path::new(value.unwrap_or("/")).components() {
        match component {
            Component::RootDir | Component::CurDir => {}
            Component::Normal(segment) => path.push(segment),
            Component::ParentDir | Component::Prefix(_) => {
                return Err(Error::Config(format!(
                    "{value:?} must stay inside its root directory"
                )))
            }
        }
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = Config::from_options(Options::default()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.source_subpath(), Path::new(""));
        assert_eq!(config.module_convention(), ModuleConvention::None);
        assert_eq!(config.layout(), LocaleLayout::Tree);
        assert_eq!(config.output_extension(), "js");
        assert_eq!(config.compile_options().format, CatalogFormat::Jed1x);
        assert_eq!(config.compile_options().domain, "messages");
    }

    #[test]
    fn test_deserialize_options() {
        let options: Options = serde_json::from_str(
            r#"{
                "sourceSubpath": "/locales",
                "destinationSubpath": "/i18n/compiled",
                "moduleConvention": "commonjs",
                "catalogFormat": "jed",
                "layout": "lc-messages",
                "domain": "app",
                "fallbackToMsgid": true
            }"#,
        )
        .unwrap();
        let config = Config::from_options(options).unwrap();
        assert_eq!(config.source_subpath(), Path::new("locales"));
        assert_eq!(config.destination_subpath(), Path::new("i18n/compiled"));
        assert_eq!(config.module_convention(), ModuleConvention::CommonJs);
        assert_eq!(config.layout(), LocaleLayout::LcMessages);
        assert_eq!(config.compile_options().format, CatalogFormat::Jed);
        assert_eq!(config.compile_options().domain, "app");
        assert!(config.compile_options().fallback_to_msgid);
        assert!(!config.compile_options().fuzzy);
    }

    #[test]
    fn test_convention_flags() {
        let es6 = Options {
            es6: true,
            ..Options::default()
        };
        assert_eq!(
            Config::from_options(es6).unwrap().module_convention(),
            ModuleConvention::Es6
        );

        let agreeing = Options {
            commonjs: true,
            module_convention: Some(ModuleConvention::CommonJs),
            ..Options::default()
        };
        assert_eq!(
            Config::from_options(agreeing).unwrap().module_convention(),
            ModuleConvention::CommonJs
        );
    }

    #[test]
    fn test_conflicting_conventions() {
        let both = Options {
            es6: true,
            commonjs: true,
            ..Options::default()
        };
        assert!(matches!(Config::from_options(both), Err(Error::Config(_))));

        let contradicting = Options {
            es6: true,
            module_convention: Some(ModuleConvention::None),
            ..Options::default()
        };
        assert!(matches!(
            Config::from_options(contradicting),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_subpaths() {
        assert_eq!(subpath(None).unwrap(), PathBuf::new());
        assert_eq!(subpath(Some("/")).unwrap(), PathBuf::new());
        assert_eq!(subpath(Some("")).unwrap(), PathBuf::new());
        assert_eq!(subpath(Some("./po/")).unwrap(), PathBuf::from("po"));
        assert!(subpath(Some("../outside")).is_err());
    }

    #[test]
    fn test_output_extension() {
        let options = Options {
            output_extension: Some(String::from(".mjs")),
            ..Options::default()
        };
        assert_eq!(Config::from_options(options).unwrap().output_extension(), "mjs");

        let empty = Options {
            output_extension: Some(String::from(".")),
            ..Options::default()
        };
        assert!(Config::from_options(empty).is_err());
    }
}
