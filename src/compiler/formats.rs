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

use super::{CatalogFormat, CompileOptions};
use polib::catalog::Catalog;
use polib::message::MessageView;
use polib::metadata::CatalogMetadata;
use serde_json::{json, Map, Value};

/// Separates the context from the msgid in a message key.
const CONTEXT_GLUE: char = '\u{4}';

/// A message which made it into the compiled catalog.
struct Entry {
    key: String,
    msgid_plural: Option<String>,
    forms: Vec<String>,
}

impl Entry {
    fn with_plural(self) -> Value {
        let mut values = vec![self.msgid_plural.map_or(Value::Null, Value::String)];
        values.extend(self.forms.into_iter().map(Value::String));
        Value::Array(values)
    }

    fn forms_only(self) -> Value {
        Value::from(self.forms)
    }
}

/// Render `catalog` as a JSON value in the configured format.
pub(super) fn render(catalog: &Catalog, options: &CompileOptions) -> Value {
    let entries = entries(catalog, options);
    match options.format {
        CatalogFormat::Raw => {
            let mut result = Map::new();
            result.insert(String::new(), raw_header(&catalog.metadata));
            for entry in entries {
                result.insert(entry.key.clone(), entry.with_plural());
            }
            Value::Object(result)
        }
        CatalogFormat::Jed | CatalogFormat::Jed1x => {
            let mut data = Map::new();
            data.insert(String::new(), jed_header(&catalog.metadata, &options.domain));
            for entry in entries {
                let key = entry.key.clone();
                let value = match options.format {
                    CatalogFormat::Jed => entry.with_plural(),
                    _ => entry.forms_only(),
                };
                data.insert(key, value);
            }
            let mut locale_data = Map::new();
            locale_data.insert(options.domain.clone(), Value::Object(data));
            json!({
                "domain": options.domain,
                "locale_data": locale_data,
            })
        }
    }
}

fn entries(catalog: &Catalog, options: &CompileOptions) -> Vec<Entry> {
    let mut entries = Vec::new();
    for message in catalog.messages() {
        let msgid = message.msgid();
        if msgid.is_empty() {
            continue;
        }
        // Excluded fuzzy translations only survive as msgid fallbacks.
        let excluded_fuzzy = message.is_fuzzy() && !options.fuzzy;
        if excluded_fuzzy && !options.fallback_to_msgid {
            continue;
        }

        let msgid_plural = message.msgid_plural().ok().map(String::from);
        let mut forms = if message.is_plural() {
            message.msgstr_plural().cloned().unwrap_or_default()
        } else {
            vec![String::from(message.msgstr().unwrap_or_default())]
        };
        if excluded_fuzzy {
            forms.iter_mut().for_each(String::clear);
        }
        if forms.is_empty() {
            forms.push(String::new());
        }
        if options.fallback_to_msgid {
            for (idx, form) in forms.iter_mut().enumerate() {
                if form.is_empty() {
                    *form = match (idx, &msgid_plural) {
                        (0, _) | (_, None) => String::from(msgid),
                        (_, Some(plural)) => plural.clone(),
                    };
                }
            }
        }

        let key = match message.msgctxt() {
            Some(context) => format!("{context}{CONTEXT_GLUE}{msgid}"),
            None => String::from(msgid),
        };
        entries.push(Entry {
            key,
            msgid_plural,
            forms,
        });
    }
    entries
}

fn plural_forms(metadata: &CatalogMetadata) -> String {
    let rules = &metadata.plural_rules;
    format!("nplurals={}; plural={};", rules.nplurals, rules.expr)
}

fn jed_header(metadata: &CatalogMetadata, domain: &str) -> Value {
    json!({
        "domain": domain,
        "lang": metadata.language,
        "plural_forms": plural_forms(metadata),
    })
}

fn raw_header(metadata: &CatalogMetadata) -> Value {
    // A missing Plural-Forms header parses as the default rules, which
    // the raw header leaves out.
    let plural_forms = if metadata.plural_rules == CatalogMetadata::default().plural_rules {
        String::new()
    } else {
        plural_forms(metadata)
    };
    let fields = [
        ("project-id-version", metadata.project_id_version.as_str()),
        ("pot-creation-date", metadata.pot_creation_date.as_str()),
        ("mime-version", metadata.mime_version.as_str()),
        ("content-type", metadata.content_type.as_str()),
        (
            "content-transfer-encoding",
            metadata.content_transfer_encoding.as_str(),
        ),
        ("language", metadata.language.as_str()),
        ("plural-forms", plural_forms.as_str()),
    ];
    let header = fields
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, value)| (String::from(name), Value::from(value)))
        .collect::<Map<_, _>>();
    Value::Object(header)
}
