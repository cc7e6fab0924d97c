/*
This file is part of Geotiles
Copyright (C) 2024 Paul Wichern

Geotiles is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::config::GeotilesConfig;
use crate::constants::INSTALL_MARKER;
use crate::tools::require_tools;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    AlreadyInstalled,
    Installed,
}

/// Generated output and scratch directories of a project checkout
#[derive(Debug, Clone, PartialEq)]
pub struct WorkDirs {
    pub root: PathBuf,
    pub out: PathBuf,
    pub tmp: PathBuf,
}

impl WorkDirs {
    /// Relative directories in `config` are taken relative to `root`
    pub fn new(root: &Path, config: &GeotilesConfig) -> WorkDirs {
        WorkDirs {
            root: root.to_path_buf(),
            out: root.join(&config.out_dir),
            tmp: root.join(&config.tmp_dir),
        }
    }

    pub fn marker(&self) -> PathBuf {
        self.root.join(INSTALL_MARKER)
    }

    pub fn is_installed(&self) -> bool {
        self.marker().is_file()
    }

    /// Removes the output and scratch directories.  Missing directories are
    /// skipped, the removed ones are returned.  A file or symlink in place of a
    /// directory is removed as well.
    pub fn clean(&self) -> Result<Vec<PathBuf>> {
        let mut removed = Vec::new();

        for dir in [&self.out, &self.tmp] {
            let is_dir = match fs::symlink_metadata(dir) {
                Ok(meta) => meta.is_dir(),
                Err(_) => continue,
            };
            let result = if is_dir { fs::remove_dir_all(dir) } else { fs::remove_file(dir) };
            result.with_context(|| format!("Removing {:?}", dir))?;
            info!("Removed {:?}", dir);
            removed.push(dir.clone());
        }

        Ok(removed)
    }

    /// Checks the external tools and prepares the directories, then writes the
    /// marker.  Does nothing when the marker exists, unless `force` is set.
    pub fn install(&self, tools: &[&str], check_tools: bool, force: bool) -> Result<InstallOutcome> {
        if self.is_installed() && !force {
            info!("{:?} exists, nothing to do", self.marker());
            return Ok(InstallOutcome::AlreadyInstalled);
        }

        if check_tools {
            require_tools(tools)?;
        } else {
            warn!("Skipping check for {}", tools.join(", "));
        }

        for dir in [&self.out, &self.tmp] {
            fs::create_dir_all(dir).with_context(|| format!("Creating {:?}", dir))?;
        }

        fs::write(self.marker(), format!("geotiles {}\n", env!("CARGO_PKG_VERSION")))?;
        info!("Installed, marker {:?}", self.marker());

        Ok(InstallOutcome::Installed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work_dirs(root: &Path) -> WorkDirs {
        WorkDirs::new(root, &GeotilesConfig::default())
    }

    #[test]
    fn test_clean_removes_both_dirs() {
        let root = tempfile::tempdir().unwrap();
        let dirs = work_dirs(root.path());

        fs::create_dir_all(dirs.out.join("nested")).unwrap();
        fs::write(dirs.out.join("nested").join("tile.geojson"), "{}").unwrap();
        fs::create_dir_all(&dirs.tmp).unwrap();

        let removed = dirs.clean().unwrap();

        assert_eq!(vec![root.path().join("out"), root.path().join("_tmp")], removed);
        assert!(!dirs.out.exists());
        assert!(!dirs.tmp.exists());
    }

    #[test]
    fn test_clean_when_missing() {
        let root = tempfile::tempdir().unwrap();
        let dirs = work_dirs(root.path());

        assert!(dirs.clean().unwrap().is_empty());
        //Twice is fine as well
        assert!(dirs.clean().unwrap().is_empty());
    }

    #[test]
    fn test_clean_removes_plain_file() {
        let root = tempfile::tempdir().unwrap();
        let dirs = work_dirs(root.path());

        fs::write(&dirs.out, "not a directory").unwrap();

        let removed = dirs.clean().unwrap();

        assert_eq!(vec![root.path().join("out")], removed);
        assert!(!dirs.out.exists());
    }

    #[test]
    fn test_install_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let dirs = work_dirs(root.path());

        assert!(!dirs.is_installed());
        assert_eq!(InstallOutcome::Installed, dirs.install(&[], true, false).unwrap());
        assert!(dirs.is_installed());
        assert!(dirs.out.is_dir());
        assert!(dirs.tmp.is_dir());

        //Second run does not touch the directories
        fs::remove_dir_all(&dirs.tmp).unwrap();
        assert_eq!(InstallOutcome::AlreadyInstalled, dirs.install(&[], true, false).unwrap());
        assert!(!dirs.tmp.exists());

        assert_eq!(InstallOutcome::Installed, dirs.install(&[], true, true).unwrap());
        assert!(dirs.tmp.is_dir());
    }

    #[test]
    fn test_install_fails_without_tools() {
        let root = tempfile::tempdir().unwrap();
        let dirs = work_dirs(root.path());

        let err = dirs.install(&["geotiles-definitely-not-installed"], true, false).unwrap_err();
        assert!(err.to_string().contains("geotiles-definitely-not-installed"));
        assert!(!dirs.is_installed());

        assert_eq!(
            InstallOutcome::Installed,
            dirs.install(&["geotiles-definitely-not-installed"], false, false).unwrap()
        );
    }

    #[test]
    fn test_makefile_uses_install_marker() {
        let makefile = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../Makefile"));

        let marker_line = format!("MARKER := {}", INSTALL_MARKER);
        assert!(makefile.lines().any(|l| l == marker_line));
        //`make test` refuses to run instead of installing
        assert!(makefile.contains("\ntest:\n\t@test -f $(MARKER) || {"));
    }
}
