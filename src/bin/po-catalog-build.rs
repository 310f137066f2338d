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

//! Compile a directory of Gettext PO files into JavaScript modules.
//!
//! Every `xx.po` file found below the input directory is compiled
//! into `xx.js` in the output directory. With `--es6` or
//! `--commonjs`, the modules export their catalog and an `index.js`
//! module gathers all locales.

use anyhow::Context;
use clap::Parser;
use log::info;
use po_catalog_build::{
    Builder, CatalogFormat, Config, FsTree, LocaleLayout, ModuleConvention, Options,
};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Directory containing the PO files.
    input: PathBuf,
    /// Directory receiving the compiled modules.
    output: PathBuf,
    /// JSON file with build options. Flags given on the command line
    /// take precedence.
    #[arg(long, value_name = "options.json")]
    options: Option<PathBuf>,
    /// Subdirectory of the input directory to scan.
    #[arg(long, value_name = "DIR")]
    src_dir: Option<String>,
    /// Subdirectory of the output directory to write to.
    #[arg(long, value_name = "DIR")]
    dest_dir: Option<String>,
    /// Write ES6 modules.
    #[arg(long, conflicts_with = "commonjs")]
    es6: bool,
    /// Write CommonJS modules.
    #[arg(long)]
    commonjs: bool,
    #[arg(long, value_enum)]
    format: Option<CatalogFormat>,
    /// How the locale is found in the path of a PO file.
    #[arg(long, value_enum)]
    layout: Option<LocaleLayout>,
    #[arg(long)]
    domain: Option<String>,
    /// Include fuzzy translations.
    #[arg(long)]
    fuzzy: bool,
    /// Use the msgid when a message is not translated.
    #[arg(long)]
    fallback_to_msgid: bool,
    /// Pretty-print the catalogs.
    #[arg(long)]
    pretty: bool,
    /// Extension of the written modules.
    #[arg(long, value_name = "EXT")]
    extension: Option<String>,
}

/// Load the options file, if any, and apply the command line on top.
fn build_options(cli: &Cli) -> anyhow::Result<Options> {
    let mut options = match &cli.options {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Could not read {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Could not parse {} as options", path.display()))?
        }
        None => Options::default(),
    };

    let convention = match (cli.es6, cli.commonjs) {
        (true, _) => Some(ModuleConvention::Es6),
        (_, true) => Some(ModuleConvention::CommonJs),
        _ => None,
    };
    if convention.is_some() {
        options.module_convention = convention;
        options.es6 = false;
        options.commonjs = false;
    }
    if cli.src_dir.is_some() {
        options.source_subpath.clone_from(&cli.src_dir);
    }
    if cli.dest_dir.is_some() {
        options.destination_subpath.clone_from(&cli.dest_dir);
    }
    if cli.format.is_some() {
        options.catalog_format = cli.format;
    }
    if cli.layout.is_some() {
        options.layout = cli.layout;
    }
    if cli.domain.is_some() {
        options.domain.clone_from(&cli.domain);
    }
    if cli.extension.is_some() {
        options.output_extension.clone_from(&cli.extension);
    }
    options.fuzzy |= cli.fuzzy;
    options.fallback_to_msgid |= cli.fallback_to_msgid;
    options.pretty |= cli.pretty;

    Ok(options)
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().filter_or("RUST_LOG", "info"));
    let cli = Cli::parse();

    let config = Config::from_options(build_options(&cli)?).context("Invalid options")?;
    let tree = FsTree::new(&cli.input, &cli.output);
    let summary = Builder::with_po_compiler(config, tree)
        .build()
        .with_context(|| format!("Could not compile catalogs in {}", cli.input.display()))?;
    info!(
        "Compiled {} locales into {}",
        summary.locales.len(),
        cli.output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("po-catalog-build").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_flags_only() -> anyhow::Result<()> {
        let cli = parse(&["po", "dist", "--commonjs", "--layout", "lc-messages", "--fuzzy"]);
        let options = build_options(&cli)?;
        assert_eq!(
            options,
            Options {
                module_convention: Some(ModuleConvention::CommonJs),
                layout: Some(LocaleLayout::LcMessages),
                fuzzy: true,
                ..Options::default()
            }
        );
        Ok(())
    }

    #[test]
    fn test_conflicting_flags() {
        let args = ["po-catalog-build", "po", "dist", "--es6", "--commonjs"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_flags_override_options_file() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let path = tmpdir.path().join("options.json");
        fs::write(
            &path,
            r#"{"commonjs": true, "sourceSubpath": "/po", "catalogFormat": "raw"}"#,
        )?;

        let cli = parse(&[
            "in",
            "out",
            "--options",
            path.to_str().unwrap(),
            "--es6",
            "--format",
            "jed1.x",
        ]);
        let config = Config::from_options(build_options(&cli)?)?;
        assert_eq!(config.module_convention(), ModuleConvention::Es6);
        assert_eq!(config.source_subpath(), std::path::Path::new("po"));
        assert_eq!(config.compile_options().format, CatalogFormat::Jed1x);
        Ok(())
    }

    #[test]
    fn test_invalid_options_file() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let path = tmpdir.path().join("options.json");
        fs::write(&path, "{not json")?;
        let cli = parse(&["in", "out", "--options", path.to_str().unwrap()]);
        assert!(build_options(&cli).is_err());
        Ok(())
    }
}
