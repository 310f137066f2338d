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

//! Rendering of the JavaScript modules written by a build.

use crate::locale::Locale;
use serde::Deserialize;

/// Export syntax used by the generated modules.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleConvention {
    /// Plain catalogs, no export statement and no index module.
    #[default]
    None,
    /// `export default` and `import` statements.
    Es6,
    /// `module.exports` and `require` calls.
    CommonJs,
}

/// Wrap a serialized catalog in the export syntax of `convention`.
///
/// # Examples
///
/// ```
/// use po_catalog_build::module::{wrap_catalog, ModuleConvention};
///
/// assert_eq!(wrap_catalog("{}", ModuleConvention::None), "{}");
/// assert_eq!(wrap_catalog("{}", ModuleConvention::Es6), "export default {};");
/// assert_eq!(
///     wrap_catalog("{}", ModuleConvention::CommonJs),
///     "module.exports = {};"
/// );
/// ```
pub fn wrap_catalog(catalog: &str, convention: ModuleConvention) -> String {
    match convention {
        ModuleConvention::None => String::from(catalog),
        ModuleConvention::Es6 => format!("export default {catalog};"),
        ModuleConvention::CommonJs => format!("module.exports = {catalog};"),
    }
}

/// Build the source of the index module re-exporting every locale.
///
/// Locales are bound in the order given. Returns `None` when the
/// convention has no module syntax.
pub fn build_index(locales: &[Locale], convention: ModuleConvention) -> Option<String> {
    let export = match convention {
        ModuleConvention::None => return None,
        ModuleConvention::Es6 => "export default",
        ModuleConvention::CommonJs => "module.exports =",
    };

    let mut lines = locales
        .iter()
        .map(|locale| match convention {
            ModuleConvention::CommonJs => format!("var {locale} = require('./{locale}');"),
            _ => format!("import {locale} from './{locale}';"),
        })
        .collect::<Vec<_>>();
    let entries = locales
        .iter()
        .map(|locale| format!("{locale}: {locale}"))
        .collect::<Vec<_>>()
        .join(",");
    lines.push(format!("{export} {{{entries}}};"));
    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn locales(names: &[&str]) -> Vec<Locale> {
        names.iter().map(|name| Locale::from(*name)).collect()
    }

    #[test]
    fn test_wrap_catalog_keeps_catalog_verbatim() {
        let catalog = r#"{"":{"lang":"fr"},"Hello":["Bonjour"]}"#;
        assert_eq!(wrap_catalog(catalog, ModuleConvention::None), catalog);
        assert_eq!(
            wrap_catalog(catalog, ModuleConvention::Es6),
            format!("export default {catalog};")
        );
    }

    #[test]
    fn test_build_index_es6() {
        assert_eq!(
            build_index(&locales(&["fr", "de"]), ModuleConvention::Es6).as_deref(),
            Some(
                "import fr from './fr';\n\
                 import de from './de';\n\
                 export default {fr: fr,de: de};"
            )
        );
    }

    #[test]
    fn test_build_index_commonjs() {
        assert_eq!(
            build_index(&locales(&["fr", "de"]), ModuleConvention::CommonJs).as_deref(),
            Some(
                "var fr = require('./fr');\n\
                 var de = require('./de');\n\
                 module.exports = {fr: fr,de: de};"
            )
        );
    }

    #[test]
    fn test_build_index_keeps_order() {
        // Locales are not sorted.
        let index = build_index(&locales(&["zh", "ar", "pt_BR"]), ModuleConvention::Es6).unwrap();
        assert!(index.ends_with("export default {zh: zh,ar: ar,pt_BR: pt_BR};"));
    }

    #[test]
    fn test_build_index_none() {
        assert_eq!(build_index(&locales(&["fr"]), ModuleConvention::None), None);
        assert_eq!(build_index(&[], ModuleConvention::None), None);
    }

    #[test]
    fn test_build_index_single_locale() {
        let index = build_index(&locales(&["fr"]), ModuleConvention::Es6).unwrap();
        assert_eq!(index.matches("export default").count(), 1);
        assert!(index.ends_with("export default {fr: fr};"));
    }
}
