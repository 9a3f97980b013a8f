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
use std::fmt;
use std::path::{Component, Path};

use self::tokenize::tokenize;

mod tokenize;

/// What the classifier knows about a single file, derived from its path
/// alone.
#[derive(Debug, Clone, PartialEq)]
pub struct PathContext {
    pub file_name: String,
    pub stem: String,
    /// Lowercased with a leading dot, empty when the file has none.
    pub extension: String,
    /// Directory names from the first component down to the immediate
    /// parent, in their original case.
    pub segments: Vec<String>,
}

impl PathContext {
    pub fn new(path: &Path) -> PathContext {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();

        let segments = match path.parent() {
            Some(parent) => parent
                .components()
                .filter_map(|c| match c {
                    Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect(),
            None => Vec::new(),
        };

        PathContext {
            file_name,
            stem,
            extension,
            segments,
        }
    }

    /// Whether any directory on the path is named `name`, ignoring case.
    pub fn in_dir(&self, name: &str) -> bool {
        self.segments.iter().any(|s| s.eq_ignore_ascii_case(name))
    }

    pub fn parent_name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// The stem as words, or the raw stem when it holds nothing but
    /// separators.
    pub fn phrase(&self) -> String {
        let phrase = tokenize(&self.stem);
        if phrase.is_empty() {
            self.stem.clone()
        } else {
            phrase
        }
    }
}

/// The kind of source a fallback description names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    TypeScript,
    JavaScript,
    Vue,
    Other,
}

impl Language {
    fn from_extension(ext: &str) -> Language {
        match ext {
            ".ts" | ".tsx" => Language::TypeScript,
            ".js" | ".jsx" => Language::JavaScript,
            ".vue" => Language::Vue,
            _ => Language::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DescriptionRule {
    Index(String),
    EntryPoint,
    Component(String),
    View(String),
    Store(String),
    Service(String),
    Util(String),
    Type(String),

    Layout(String),
    Page(String),
    Composable(String),
    Router,
    Api(String),
    Helper(String),
    Interface(String),
    Model(String),
    Middleware(String),
    Plugin(String),
    ConfigFile(String),
    Test(String),

    Fallback(String, Language),
}

type Constructor = fn(String) -> DescriptionRule;

// Tried in order after the index and entry point checks, first hit wins.
const DIRECTORY_RULES: &[(&str, Constructor)] = &[
    ("components", DescriptionRule::Component),
    ("views", DescriptionRule::View),
    ("stores", DescriptionRule::Store),
    ("services", DescriptionRule::Service),
    ("utils", DescriptionRule::Util),
    ("types", DescriptionRule::Type),
];

fn router(_: String) -> DescriptionRule {
    DescriptionRule::Router
}

const EXTENDED_DIRECTORY_RULES: &[(&[&str], Constructor)] = &[
    (&["layouts", "layout"], DescriptionRule::Layout),
    (&["pages", "page"], DescriptionRule::Page),
    (&["composables", "composable"], DescriptionRule::Composable),
    (&["router"], router),
    (&["api"], DescriptionRule::Api),
    (&["helpers", "helper"], DescriptionRule::Helper),
    (&["interfaces", "interface"], DescriptionRule::Interface),
    (&["models", "model"], DescriptionRule::Model),
    (&["middlewares", "middleware"], DescriptionRule::Middleware),
    (&["plugins", "plugin"], DescriptionRule::Plugin),
    (&["config"], DescriptionRule::ConfigFile),
    (&["tests", "test", "__tests__", "spec"], DescriptionRule::Test),
];

/// Pick the single rule describing the file at `ctx`.
///
/// Always returns a rule, the fallback catches anything the ordered checks
/// miss. With `extended` set the extra directory rules run after the
/// standard ones and the fallback names the file's language.
pub fn classify(ctx: &PathContext, extended: bool) -> DescriptionRule {
    if ctx.stem == "index" {
        return DescriptionRule::Index(ctx.parent_name().to_string());
    }

    if ctx.stem.eq_ignore_ascii_case("main") || ctx.stem.eq_ignore_ascii_case("app") {
        return DescriptionRule::EntryPoint;
    }

    for (dir, rule) in DIRECTORY_RULES {
        if ctx.in_dir(dir) {
            return rule(ctx.phrase());
        }
    }

    if !extended {
        return DescriptionRule::Fallback(ctx.phrase(), Language::TypeScript);
    }

    for (dirs, rule) in EXTENDED_DIRECTORY_RULES {
        if dirs.iter().any(|d| ctx.in_dir(d)) {
            return rule(ctx.phrase());
        }
    }

    DescriptionRule::Fallback(ctx.phrase(), Language::from_extension(&ctx.extension))
}

impl fmt::Display for DescriptionRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DescriptionRule::Index(parent) if parent.is_empty() => {
                write!(f, "Entry point for the module.")
            }
            DescriptionRule::Index(parent) => write!(f, "Entry point for the {} module.", parent),
            DescriptionRule::EntryPoint => write!(f, "Application entry point."),
            DescriptionRule::Component(p) => write!(f, "Vue component for {}.", p),
            DescriptionRule::View(p) => write!(f, "Vue view component for {} page.", p),
            DescriptionRule::Store(p) => write!(f, "Pinia/Vuex store module for {}.", p),
            DescriptionRule::Service(p) => write!(f, "Service layer handling {} operations.", p),
            DescriptionRule::Util(p) => write!(f, "Utility functions for {}.", p),
            DescriptionRule::Type(p) => write!(f, "TypeScript type definitions for {}.", p),
            DescriptionRule::Layout(p) => write!(f, "Vue layout component for {}.", p),
            DescriptionRule::Page(p) => write!(f, "Page component for {}.", p),
            DescriptionRule::Composable(p) => write!(f, "Vue composable providing {} logic.", p),
            DescriptionRule::Router => write!(f, "Application routing configuration."),
            DescriptionRule::Api(p) => write!(f, "API client for {} endpoints.", p),
            DescriptionRule::Helper(p) => write!(f, "Helper functions for {}.", p),
            DescriptionRule::Interface(p) => write!(f, "TypeScript interfaces for {}.", p),
            DescriptionRule::Model(p) => write!(f, "Data model definitions for {}.", p),
            DescriptionRule::Middleware(p) => write!(f, "Middleware for {}.", p),
            DescriptionRule::Plugin(p) => write!(f, "Plugin configuration for {}.", p),
            DescriptionRule::ConfigFile(p) => write!(f, "Configuration file for {}.", p),
            DescriptionRule::Test(p) => write!(f, "Test suite for {}.", p),
            DescriptionRule::Fallback(p, lang) => match lang {
                Language::TypeScript => write!(f, "TypeScript module for {}.", p),
                Language::JavaScript => write!(f, "JavaScript module for {}.", p),
                Language::Vue => write!(f, "Vue component for {}.", p),
                Language::Other => write!(f, "Source file for {}.", p),
            },
        }
    }
}

/// Render the description sentence for a rule.
pub fn render(rule: &DescriptionRule) -> String {
    rule.to_string()
}
