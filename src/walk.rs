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
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};

fn is_excluded(entry: &DirEntry, exclude_dirs: &BTreeSet<String>) -> bool {
    // The path the user asked for is never pruned, even if its name is
    // on the list.
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| exclude_dirs.contains(name))
            .unwrap_or(false)
}

/// Every file under `path` outside the excluded directories, sorted by
/// name. A file path is returned as is.
pub fn collect_files(path: &Path, exclude_dirs: &BTreeSet<String>) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        return Err(Error::InvalidPath(path.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded(e, exclude_dirs))
    {
        match entry {
            Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
            Ok(_) => {}
            Err(e) => warn!("skipping unreadable entry: {}", e),
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn excludes(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn touch(dir: &TempDir, rel: &str) {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_collect_files() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "src/b.ts");
        touch(&dir, "src/a.ts");
        touch(&dir, "src/node_modules/dep/index.js");
        touch(&dir, "node_modules/x.ts");
        touch(&dir, ".git/HEAD");
        touch(&dir, "README.md");

        let files = collect_files(dir.path(), &excludes(&["node_modules", ".git"])).unwrap();
        let rel: Vec<String> = files
            .iter()
            .map(|f| {
                f.strip_prefix(dir.path())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();

        assert_eq!(vec!["README.md", "src/a.ts", "src/b.ts"], rel);
    }

    #[test]
    fn test_single_file() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "node_modules/x.ts");
        let file = dir.path().join("node_modules/x.ts");

        assert_eq!(vec![file.clone()], collect_files(&file, &excludes(&["node_modules"])).unwrap());
    }

    #[test]
    fn test_root_is_never_excluded() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "dist/out.ts");

        let root = dir.path().join("dist");
        assert_eq!(1, collect_files(&root, &excludes(&["dist"])).unwrap().len());
    }

    #[test]
    fn test_invalid_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            collect_files(&missing, &BTreeSet::new()),
            Err(Error::InvalidPath(_))
        ));
    }
}
