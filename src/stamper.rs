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
use std::fs;
use std::io::prelude::*;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::config::HeaderConfig;
use crate::describe::{classify, render, PathContext};
use crate::error::{Error, Result};
use crate::template::{self, Substitutions, TemplateSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyHeadered,
    ExtensionMismatch,
    /// A header above `#!` would stop the script from running.
    HasShebang,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SkipReason::AlreadyHeadered => write!(f, "already has header"),
            SkipReason::ExtensionMismatch => write!(f, "extension not matched"),
            SkipReason::HasShebang => write!(f, "has shebang"),
        }
    }
}

/// What should happen to a file, worked out without touching the disk.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Skip(SkipReason),
    /// The header block to prepend, blank separator line included.
    Insert(String),
}

#[derive(Debug)]
pub enum Outcome {
    Inserted,
    Skipped(SkipReason),
    /// Check mode only: the file would have been given a header.
    NeedsHeader,
    Failed(Error),
}

pub struct Stamper<'a> {
    config: &'a HeaderConfig,
    templates: &'a TemplateSet,
    check: bool,
}

impl<'a> Stamper<'a> {
    pub fn new(config: &'a HeaderConfig, templates: &'a TemplateSet) -> Stamper<'a> {
        Stamper {
            config,
            templates,
            check: false,
        }
    }

    pub fn with_check_mode(mut self, check: bool) -> Stamper<'a> {
        self.check = check;
        self
    }

    fn substitutions(&self, ctx: &PathContext, description: String) -> Substitutions {
        let mut subs = Substitutions::new();
        subs.insert(template::FILE_NAME.to_string(), ctx.file_name.clone());
        subs.insert(template::AUTHOR.to_string(), self.config.author.clone());
        subs.insert(template::COMPANY.to_string(), self.config.company.clone());
        subs.insert(template::YEAR.to_string(), self.config.year.clone());
        subs.insert(template::DESCRIPTION.to_string(), description);
        subs
    }

    /// Decide whether `path`, whose current bytes are `content`, needs a
    /// header and render it if so. Pure, the file is neither read nor
    /// written.
    pub fn decide(&self, path: &Path, content: &[u8]) -> Result<Decision> {
        let ctx = PathContext::new(path);
        let extension_matches = self.config.matches_extension(&ctx.extension);
        let key = self.config.template_key(&ctx.extension);

        let templ = match self.templates.get(key) {
            Ok(t) => t,
            Err(_) if !extension_matches => {
                return Ok(Decision::Skip(SkipReason::ExtensionMismatch))
            }
            Err(e) => return Err(e),
        };

        let rule = classify(&ctx, self.config.extended_rules);
        debug!("{} classified as {:?} using template {}", path.display(), rule, key);

        let subs = self.substitutions(&ctx, render(&rule));
        let header = templ.render(&subs, self.config.columns);

        let text = String::from_utf8_lossy(content);
        if templ.is_present_in(&text, &header) {
            return Ok(Decision::Skip(SkipReason::AlreadyHeadered));
        }

        if !extension_matches {
            return Ok(Decision::Skip(SkipReason::ExtensionMismatch));
        }

        if content.starts_with(b"#!") {
            return Ok(Decision::Skip(SkipReason::HasShebang));
        }

        Ok(Decision::Insert(format!("{}\n", header)))
    }

    pub fn process(&self, path: &Path) -> Outcome {
        let content = match fs::read(path) {
            Ok(c) => c,
            Err(source) => {
                return Outcome::Failed(Error::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let header = match self.decide(path, &content) {
            Ok(Decision::Insert(header)) => header,
            Ok(Decision::Skip(reason)) => {
                info!("skipping {}: {}", path.display(), reason);
                return Outcome::Skipped(reason);
            }
            Err(e) => return Outcome::Failed(e),
        };

        if self.check {
            info!("{} is missing a header", path.display());
            return Outcome::NeedsHeader;
        }

        match apply(path, &header, &content) {
            Ok(()) => {
                info!("added header to {}", path.display());
                Outcome::Inserted
            }
            Err(e) => Outcome::Failed(e),
        }
    }

    pub fn stamp_files<I>(&self, files: I) -> StampStats
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut stats = StampStats::new();

        for file in files {
            let outcome = self.process(&file);
            stats.record(file, outcome);
        }

        stats
    }
}

/// Write `header` followed by the untouched `content` to `path`. The new
/// contents go to a temporary file in the same directory which then
/// replaces the original, so a failed write leaves the file as it was.
pub fn apply(path: &Path, header: &str, content: &[u8]) -> Result<()> {
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(header.as_bytes()).map_err(write_err)?;
    tmp.write_all(content).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;

    if let Ok(meta) = fs::metadata(path) {
        fs::set_permissions(tmp.path(), meta.permissions()).map_err(write_err)?;
    }

    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[derive(Debug, Default)]
pub struct StampStats {
    pub files_inserted: Vec<PathBuf>,
    pub files_skipped: Vec<(PathBuf, SkipReason)>,
    pub files_needing_header: Vec<PathBuf>,
    pub files_failed: Vec<(PathBuf, Error)>,
}

impl StampStats {
    fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, file: PathBuf, outcome: Outcome) {
        match outcome {
            Outcome::Inserted => self.files_inserted.push(file),
            Outcome::Skipped(reason) => self.files_skipped.push((file, reason)),
            Outcome::NeedsHeader => self.files_needing_header.push(file),
            Outcome::Failed(e) => {
                warn!("{}: {}", file.display(), e);
                self.files_failed.push((file, e));
            }
        }
    }

    pub fn total(&self) -> usize {
        self.files_inserted.len()
            + self.files_skipped.len()
            + self.files_needing_header.len()
            + self.files_failed.len()
    }
}

impl fmt::Display for StampStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Inserted: {}, Skipped: {}, Failed: {}",
            self.files_inserted.len(),
            self.files_skipped.len(),
            self.files_failed.len()
        )?;

        if !self.files_needing_header.is_empty() {
            write!(f, ", Missing header: {}", self.files_needing_header.len())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::config::{ConfigFile, Overrides};
    use crate::utils::current_year;

    const SOURCE: &str = "import { defineStore } from 'pinia'\n\nexport const useUserStore = defineStore('user', {})\n";

    fn test_config(yaml: &str) -> (HeaderConfig, TemplateSet) {
        let file: ConfigFile = serde_yaml::from_str(yaml).unwrap();
        file.resolve(Overrides::default()).unwrap()
    }

    fn default_config() -> (HeaderConfig, TemplateSet) {
        test_config("author: Jane Doe\ncompany: Acme\nyear: '2024'\n")
    }

    fn write_file(dir: &TempDir, rel: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_decide_without_filesystem() {
        let (config, templates) = default_config();
        let stamper = Stamper::new(&config, &templates);

        let decision = stamper
            .decide(Path::new("src/stores/userStore.ts"), SOURCE.as_bytes())
            .unwrap();
        let header = match decision {
            Decision::Insert(h) => h,
            other => panic!("expected insert, got {:?}", other),
        };

        assert!(header.starts_with("/*\nFile Name: userStore.ts\nAuthor: Jane Doe\n"));
        assert!(header.contains("Description: Pinia/Vuex store module for User Store.\n"));
        assert!(header.contains("Copyright (c) 2024 Acme\n"));
        assert!(header.ends_with("*/\n\n"));
    }

    #[test]
    fn test_insert_preserves_bytes_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "src/stores/userStore.ts", SOURCE.as_bytes());
        let (config, templates) = default_config();
        let stamper = Stamper::new(&config, &templates);

        assert!(matches!(stamper.process(&path), Outcome::Inserted));

        let stamped = fs::read(&path).unwrap();
        let header = match stamper.decide(&path, SOURCE.as_bytes()).unwrap() {
            Decision::Insert(h) => h,
            other => panic!("expected insert, got {:?}", other),
        };
        assert_eq!(header.as_bytes(), &stamped[..header.len()]);
        assert_eq!(SOURCE.as_bytes(), &stamped[header.len()..]);

        assert!(matches!(
            stamper.process(&path),
            Outcome::Skipped(SkipReason::AlreadyHeadered)
        ));
        assert_eq!(stamped, fs::read(&path).unwrap());
    }

    #[test]
    fn test_non_utf8_content_is_preserved() {
        let dir = TempDir::new().unwrap();
        let content: &[u8] = &[0xff, 0xfe, b'a', b'\r', b'\n', 0x00, b'z'];
        let path = write_file(&dir, "blob.ts", content);
        let (config, templates) = default_config();

        assert!(matches!(
            Stamper::new(&config, &templates).process(&path),
            Outcome::Inserted
        ));
        assert!(fs::read(&path).unwrap().ends_with(content));
    }

    #[test]
    fn test_extension_mismatch_leaves_file_alone() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "lib/http.js", SOURCE.as_bytes());
        let (config, templates) = test_config("author: Jane\nextensions: [.ts]\n");

        assert!(matches!(
            Stamper::new(&config, &templates).process(&path),
            Outcome::Skipped(SkipReason::ExtensionMismatch)
        ));
        assert_eq!(SOURCE.as_bytes(), &fs::read(&path).unwrap()[..]);
    }

    #[test]
    fn test_empty_extension_list_matches_all() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "Makefile", b"all:\n");
        let (config, templates) = test_config("author: Jane\nextensions: []\n");

        assert!(matches!(
            Stamper::new(&config, &templates).process(&path),
            Outcome::Inserted
        ));
    }

    #[test]
    fn test_existing_header_with_other_metadata() {
        let (config, templates) = default_config();
        let stamper = Stamper::new(&config, &templates);
        let content = b"\n/*\nFile Name: renamed.ts\nAuthor: Someone Else\n*/\ncode\n";

        assert_eq!(
            Decision::Skip(SkipReason::AlreadyHeadered),
            stamper.decide(Path::new("src/thing.ts"), content).unwrap()
        );
    }

    #[test]
    fn test_vue_files_use_vue_template() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "src/components/UserCard.vue", b"<template></template>\n");
        let (config, templates) = default_config();

        assert!(matches!(
            Stamper::new(&config, &templates).process(&path),
            Outcome::Inserted
        ));

        let stamped = fs::read_to_string(&path).unwrap();
        assert!(stamped.starts_with("<!--\n/**\nFile Name: UserCard.vue\n"));
        assert!(stamped.contains("Description: Vue component for User Card.\n"));
        assert!(stamped.ends_with("-->\n\n<template></template>\n"));
    }

    #[test]
    fn test_missing_template() {
        let yaml = "author: Jane\nextensions: [.ts, .md]\ntemplate_keys: {md: markdown}\n";
        let (config, templates) = test_config(yaml);
        let stamper = Stamper::new(&config, &templates);

        match stamper.decide(Path::new("README.md"), b"# hi\n") {
            Err(Error::TemplateMissing { key }) => assert_eq!("markdown", key),
            other => panic!("expected TemplateMissing, got {:?}", other),
        }

        // an unmatched extension never needs its template
        let yaml = "author: Jane\nextensions: [.ts]\ntemplate_keys: {md: markdown}\n";
        let (config, templates) = test_config(yaml);
        assert_eq!(
            Decision::Skip(SkipReason::ExtensionMismatch),
            Stamper::new(&config, &templates)
                .decide(Path::new("README.md"), b"# hi\n")
                .unwrap()
        );
    }

    #[test]
    fn test_unreadable_file_fails() {
        let dir = TempDir::new().unwrap();
        let (config, templates) = default_config();

        let outcome = Stamper::new(&config, &templates).process(&dir.path().join("missing.ts"));
        assert!(matches!(outcome, Outcome::Failed(Error::Read { .. })));
    }

    #[test]
    fn test_check_mode_does_not_write() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "src/main.ts", SOURCE.as_bytes());
        let (config, templates) = default_config();

        let outcome = Stamper::new(&config, &templates)
            .with_check_mode(true)
            .process(&path);
        assert!(matches!(outcome, Outcome::NeedsHeader));
        assert_eq!(SOURCE, fs::read_to_string(&path).unwrap());
    }

    #[test]
    fn test_shebang_scripts_are_left_alone() {
        let dir = TempDir::new().unwrap();
        let script = b"#!/bin/bash\necho hi\n";
        let path = write_file(&dir, "deploy.sh", script);
        let (config, templates) = test_config("author: Jane\nextensions: [.sh]\n");

        assert!(matches!(
            Stamper::new(&config, &templates).process(&path),
            Outcome::Skipped(SkipReason::HasShebang)
        ));
        assert_eq!(&script[..], &fs::read(&path).unwrap()[..]);
    }

    #[test]
    fn test_shell_scripts_get_hash_header() {
        let (config, templates) = test_config("author: Jane\nextensions: [.sh]\n");
        let decision = Stamper::new(&config, &templates)
            .decide(Path::new("scripts/build.sh"), b"echo hi\n")
            .unwrap();

        match decision {
            Decision::Insert(header) => assert!(header.starts_with("#\n# File Name: build.sh\n")),
            other => panic!("expected insert, got {:?}", other),
        }
    }

    #[test]
    fn test_marker_in_code_is_not_a_header() {
        let (config, templates) = default_config();
        let decision = Stamper::new(&config, &templates)
            .decide(Path::new("src/upload.ts"), b"export const LABEL = 'File Name:'\n")
            .unwrap();

        assert!(matches!(decision, Decision::Insert(_)));
    }

    #[test]
    fn test_year_falls_back_to_current_year() {
        let (config, templates) = test_config("author: Jane\nyear: ''\n");
        let decision = Stamper::new(&config, &templates)
            .decide(Path::new("app.ts"), b"")
            .unwrap();

        match decision {
            Decision::Insert(header) => {
                assert!(header.contains(&format!("Copyright (c) {} ", current_year())));
                assert!(header.contains("Description: Application entry point.\n"));
            }
            other => panic!("expected insert, got {:?}", other),
        }
    }

    #[test]
    fn test_stamp_files_stats() {
        let dir = TempDir::new().unwrap();
        let files = vec![
            write_file(&dir, "src/a.ts", b"a\n"),
            write_file(&dir, "src/b.js", b"b\n"),
            dir.path().join("src/gone.ts"),
        ];
        let (config, templates) = default_config();

        let stats = Stamper::new(&config, &templates).stamp_files(files);
        assert_eq!(1, stats.files_inserted.len());
        assert_eq!(1, stats.files_skipped.len());
        assert_eq!(1, stats.files_failed.len());
        assert_eq!(3, stats.total());
        assert_eq!("Inserted: 1, Skipped: 1, Failed: 1", stats.to_string());
    }
}
