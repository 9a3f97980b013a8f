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
use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;

pub use default::{DEFAULT_CONFIG, DEFAULT_TEMPLATES};

use crate::error::{Error, Result};
use crate::template::{TemplateSet, DEFAULT_KEY};
use crate::utils::current_year;

mod default;

pub const CONFIG_FILE_NAME: &str = ".headerstamp.yml";

const YEAR_RE: &str = "^[0-9]{4}$";

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum Year {
    Text(String),
    Number(u32),
}

impl From<Year> for String {
    fn from(year: Year) -> String {
        match year {
            Year::Text(s) => s,
            Year::Number(n) => n.to_string(),
        }
    }
}

/// The config file as written by the user, before overrides and defaults
/// are applied.
#[derive(Deserialize, Debug)]
pub struct ConfigFile {
    author: Option<String>,
    company: Option<String>,
    year: Option<Year>,
    extensions: Option<Vec<String>>,
    exclude_dirs: Option<Vec<String>>,
    columns: Option<usize>,
    #[serde(default)]
    extended_rules: bool,
    template_keys: Option<BTreeMap<String, String>>,
    templates: Option<TemplateSet>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        serde_yaml::from_str(DEFAULT_CONFIG).expect("The default config is invalid?")
    }
}

/// Values taken from the command line or the environment. They win over
/// whatever the config file says.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub author: Option<String>,
    pub company: Option<String>,
    pub year: Option<String>,
    pub extensions: Option<Vec<String>>,
    pub exclude_dirs: Option<Vec<String>>,
}

/// Fully resolved, read-only settings shared by every file of a run.
#[derive(Debug, Clone)]
pub struct HeaderConfig {
    pub author: String,
    pub company: String,
    /// Always four digits.
    pub year: String,
    /// Lowercase with a leading dot. Empty matches every file.
    pub extensions: BTreeSet<String>,
    pub exclude_dirs: BTreeSet<String>,
    pub columns: Option<usize>,
    pub extended_rules: bool,
    template_keys: BTreeMap<String, String>,
}

impl HeaderConfig {
    pub fn matches_extension(&self, extension: &str) -> bool {
        self.extensions.is_empty() || self.extensions.contains(&extension.to_lowercase())
    }

    /// The template key for a file with the given extension.
    pub fn template_key(&self, extension: &str) -> &str {
        self.template_keys
            .get(&extension.to_lowercase())
            .map(String::as_str)
            .unwrap_or(DEFAULT_KEY)
    }
}

fn default_extensions() -> Vec<String> {
    vec![".ts".to_string(), ".vue".to_string()]
}

fn default_exclude_dirs() -> Vec<String> {
    vec!["node_modules".to_string(), ".git".to_string()]
}

fn default_template_keys() -> BTreeMap<String, String> {
    let mut keys = BTreeMap::new();
    keys.insert(".vue".to_string(), "vue".to_string());
    keys.insert(".py".to_string(), "hash".to_string());
    keys.insert(".sh".to_string(), "hash".to_string());
    keys
}

/// Lowercase, trim and make sure of a leading dot. Blank entries are dropped.
pub fn normalize_extension(ext: &str) -> Option<String> {
    let ext = ext.trim().trim_start_matches('.').to_lowercase();
    if ext.is_empty() {
        None
    } else {
        Some(format!(".{}", ext))
    }
}

fn resolve_year(year: Option<String>) -> Result<String> {
    let year = year.unwrap_or_default();
    let year = year.trim();
    if year.is_empty() {
        return Ok(current_year());
    }

    let re = Regex::new(YEAR_RE).map_err(|e| Error::Config(e.to_string()))?;
    if re.is_match(year) {
        Ok(year.to_string())
    } else {
        Err(Error::Config(format!(
            "year must be a four digit year, got '{}'",
            year
        )))
    }
}

impl ConfigFile {
    /// Apply overrides and defaults, validate, and split the result into the
    /// run settings and the template set.
    pub fn resolve(self, overrides: Overrides) -> Result<(HeaderConfig, TemplateSet)> {
        let author = overrides
            .author
            .or(self.author)
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .ok_or_else(|| Error::Config("author must be set".to_string()))?;

        let company = overrides.company.or(self.company).unwrap_or_default();
        let year = resolve_year(overrides.year.or(self.year.map(String::from)))?;

        let extensions = overrides
            .extensions
            .or(self.extensions)
            .unwrap_or_else(default_extensions)
            .iter()
            .filter_map(|e| normalize_extension(e))
            .collect();

        let exclude_dirs = overrides
            .exclude_dirs
            .or(self.exclude_dirs)
            .unwrap_or_else(default_exclude_dirs)
            .into_iter()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .collect();

        if self.columns == Some(0) {
            return Err(Error::Config("columns must be greater than zero".to_string()));
        }

        let mut template_keys = BTreeMap::new();
        for (ext, key) in self.template_keys.unwrap_or_else(default_template_keys) {
            match normalize_extension(&ext) {
                Some(ext) => {
                    template_keys.insert(ext, key);
                }
                None => {
                    return Err(Error::Config(format!(
                        "template_keys entry '{}' is not an extension",
                        ext
                    )))
                }
            }
        }

        let config = HeaderConfig {
            author,
            company,
            year,
            extensions,
            exclude_dirs,
            columns: self.columns,
            extended_rules: self.extended_rules,
            template_keys,
        };

        Ok((config, self.templates.unwrap_or_default()))
    }
}

pub fn xdg_config_dir() -> Option<PathBuf> {
    match env::var("XDG_CONFIG_HOME") {
        Ok(d) => Some(PathBuf::from(d)),
        Err(_) => match env::var("HOME") {
            Ok(home) => {
                let mut home_dir = PathBuf::from(home);
                home_dir.push(".config");
                Some(home_dir)
            }
            Err(_) => None,
        },
    }
}

/// Walk up from the current working directory searching for
/// the first .headerstamp.yml config file available else find the
/// global config file.
fn find_config_file() -> Option<PathBuf> {
    if let Ok(mut cwd) = env::current_dir() {
        loop {
            cwd.push(CONFIG_FILE_NAME);
            if cwd.exists() {
                return Some(cwd);
            }

            cwd.pop();

            // stop once there is no parent left
            if !cwd.pop() {
                break;
            }
        }
    }

    if let Some(mut global) = xdg_config_dir() {
        global.push("headerstamp");
        global.push("config.yml");
        if global.exists() {
            return Some(global);
        }
    }

    None
}

/// Load the config at `path`, or the discovered one when `path` is None.
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => find_config_file().ok_or(Error::ConfigNotFound)?,
    };

    info!("loading config from {}", path.display());
    let f = File::open(&path)
        .map_err(|e| Error::Config(format!("unable to open {}: {}", path.display(), e)))?;
    serde_yaml::from_reader(f)
        .map_err(|e| Error::Config(format!("Invalid YAML in {}: {}", path.display(), e)))
}
