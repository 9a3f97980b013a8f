// Copyright (C) 2024 Mathew Robinson <chasinglogic@gmail.com>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use std::collections::BTreeMap;

use serde::Deserialize;

use crate::config::DEFAULT_TEMPLATES;
use crate::error::{Error, Result};
use crate::utils::{placeholder_re, strip_comment_leader, wrap_rendered_line};

pub const FILE_NAME: &str = "FILE_NAME";
pub const AUTHOR: &str = "AUTHOR";
pub const COMPANY: &str = "COMPANY";
pub const YEAR: &str = "YEAR";
pub const DESCRIPTION: &str = "DESCRIPTION";

pub const DEFAULT_KEY: &str = "default";

// How many lines past any leading blank lines are searched for an existing
// header marker.
const HEADER_SCAN_LINES: usize = 10;

/// Placeholder name (without braces) to the text it is replaced with.
pub type Substitutions = BTreeMap<String, String>;

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
enum Body {
    Text(String),
    Lines(Vec<String>),
}

impl Body {
    fn into_lines(self) -> Vec<String> {
        match self {
            Body::Text(text) => {
                let text = text.strip_suffix('\n').unwrap_or(&text);
                text.split('\n').map(str::to_string).collect()
            }
            Body::Lines(lines) => lines,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
enum TemplateDef {
    Bare(Body),
    Full { body: Body, marker: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    lines: Vec<String>,
    marker: Option<String>,
}

impl Template {
    pub fn new(lines: Vec<String>, marker: Option<String>) -> Template {
        let marker = marker
            .filter(|m| !m.trim().is_empty())
            .or_else(|| derive_marker(&lines));
        Template { lines, marker }
    }

    #[cfg(test)]
    pub fn from_text(text: &str) -> Template {
        Template::new(Body::Text(text.to_string()).into_lines(), None)
    }

    /// Text whose presence near the top of a file means it already carries
    /// a header from this template.
    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    /// Replace every `{{NAME}}` that has a substitution. Unknown
    /// placeholders are left as they are. The result always ends with a
    /// single newline.
    pub fn render(&self, substitutions: &Substitutions, columns: Option<usize>) -> String {
        let mut header = String::new();

        for line in &self.lines {
            let mut rendered = line.clone();
            for (name, value) in substitutions {
                rendered = rendered.replace(&format!("{{{{{}}}}}", name), value);
            }

            for leftover in placeholder_re().find_iter(&rendered) {
                debug!("leaving unresolved placeholder {} in header", leftover.as_str());
            }

            if let Some(cols) = columns {
                rendered = wrap_rendered_line(line, &rendered, cols);
            }

            header.push_str(&rendered);
            header.push('\n');
        }

        header
    }

    /// The fixed text a header from this template opens with: its first
    /// non-blank line, cut at the first placeholder.
    fn opener(&self) -> &str {
        let first = self
            .lines
            .iter()
            .map(|l| l.trim())
            .find(|l| !l.is_empty())
            .unwrap_or("");

        match placeholder_re().find(first) {
            Some(m) => first[..m.start()].trim_end(),
            None => first,
        }
    }

    /// Whether `content` already starts with a header, either exactly the
    /// `rendered` one or a leading block that opens like this template and
    /// carries its marker.
    pub fn is_present_in(&self, content: &str, rendered: &str) -> bool {
        if !rendered.is_empty() && content.starts_with(rendered) {
            return true;
        }

        let marker = match self.marker() {
            Some(m) => m,
            None => return false,
        };

        let mut lines = content.lines().skip_while(|l| l.trim().is_empty());
        let first = match lines.next() {
            Some(l) => l,
            None => return false,
        };

        let opener = self.opener();
        if opener.is_empty() {
            return first.contains(marker);
        }

        if !first.trim().starts_with(opener) {
            return false;
        }

        first.contains(marker)
            || lines
                .take(HEADER_SCAN_LINES - 1)
                .any(|l| l.contains(marker))
    }
}

fn derive_marker(lines: &[String]) -> Option<String> {
    let placeholder = format!("{{{{{}}}}}", FILE_NAME);
    let from_file_name = lines.iter().find_map(|l| {
        l.find(&placeholder)
            .map(|at| strip_comment_leader(&l[..at]).trim().to_string())
            .filter(|m| !m.is_empty())
    });

    from_file_name.or_else(|| {
        lines
            .iter()
            .map(|l| strip_comment_leader(l).trim())
            .find(|l| !l.is_empty() && !placeholder_re().is_match(l))
            .map(str::to_string)
    })
}

/// Every header template available to a run, keyed by template key.
#[derive(Deserialize, Debug, Clone)]
#[serde(from = "BTreeMap<String, TemplateDef>")]
pub struct TemplateSet {
    templates: BTreeMap<String, Template>,
}

impl From<BTreeMap<String, TemplateDef>> for TemplateSet {
    fn from(defs: BTreeMap<String, TemplateDef>) -> TemplateSet {
        let templates = defs
            .into_iter()
            .map(|(key, def)| {
                let template = match def {
                    TemplateDef::Bare(body) => Template::new(body.into_lines(), None),
                    TemplateDef::Full { body, marker } => Template::new(body.into_lines(), marker),
                };
                (key, template)
            })
            .collect();

        TemplateSet { templates }
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        serde_yaml::from_str(DEFAULT_TEMPLATES).expect("The default templates are invalid?")
    }
}

impl TemplateSet {
    pub fn get(&self, key: &str) -> Result<&Template> {
        self.templates.get(key).ok_or_else(|| Error::TemplateMissing {
            key: key.to_string(),
        })
    }

    pub fn render(
        &self,
        key: &str,
        substitutions: &Substitutions,
        columns: Option<usize>,
    ) -> Result<String> {
        Ok(self.get(key)?.render(substitutions, columns))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }
}

#[cfg(test)]
pub fn test_substitutions(description: &str) -> Substitutions {
    let mut subs = Substitutions::new();
    subs.insert(FILE_NAME.to_string(), "userStore.ts".to_string());
    subs.insert(AUTHOR.to_string(), "Jane Doe".to_string());
    subs.insert(COMPANY.to_string(), "Acme".to_string());
    subs.insert(YEAR.to_string(), "2024".to_string());
    subs.insert(DESCRIPTION.to_string(), description.to_string());
    subs
}
