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

//! Mapping of catalog paths to locale identifiers.

use crate::error::{Error, Result};
use clap::ValueEnum;
use regex::Regex;
use serde::Deserialize;
use std::fmt::{self, Display, Formatter};
use std::path::{Component, Path};
use std::sync::OnceLock;

/// A locale identifier such as `fr` or `pt_BR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Locale {
    fn from(locale: &str) -> Self {
        Locale(String::from(locale))
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Directory convention used to find the locale of a catalog.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LocaleLayout {
    /// The first directory below the scan root names the locale, as
    /// in `fr/messages.po`. Catalogs directly in the scan root are
    /// named after their file, as in `fr.po`.
    #[default]
    Tree,
    /// The directory above `LC_MESSAGES` names the locale, as in
    /// `fr/LC_MESSAGES/app.po`.
    LcMessages,
}

impl LocaleLayout {
    /// Find the locale of `path`, which is relative to the scan root.
    ///
    /// # Examples
    ///
    /// ```
    /// use po_catalog_build::locale::{Locale, LocaleLayout};
    ///
    /// let locale = LocaleLayout::LcMessages.resolve("pt_BR/LC_MESSAGES/app.po".as_ref());
    /// assert_eq!(locale.unwrap(), Locale::from("pt_BR"));
    /// ```
    pub fn resolve(self, path: &Path) -> Result<Locale> {
        let normalized = normalize(path);
        let locale = match self {
            LocaleLayout::Tree => first_segment(&normalized),
            LocaleLayout::LcMessages => lc_messages_segment(&normalized),
        };
        locale.map(Locale::from).ok_or_else(|| Error::Resolution {
            path: path.to_path_buf(),
        })
    }
}

/// Join the normal components of `path` with `/`.
fn normalize(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn first_segment(path: &str) -> Option<&str> {
    match path.split_once('/') {
        Some((dir, _)) => Some(dir),
        None => path.strip_suffix(".po").filter(|stem| !stem.is_empty()),
    }
}

fn lc_messages_segment(path: &str) -> Option<&str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(?<locale>[^/]+)/LC_MESSAGES/.*\.po$").expect("well-formed regex")
    });
    let captures = re.captures(path)?;
    captures.name("locale").map(|locale| locale.as_str())
}
