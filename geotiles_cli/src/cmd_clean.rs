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
use std::path::PathBuf;

use anyhow::Result;
use log::info;
use structopt::StructOpt;

use geotiles::config::GeotilesConfig;
use geotiles::workspace::WorkDirs;

#[derive(StructOpt)]
pub struct CleanArgs {
    #[structopt(long, parse(from_os_str), default_value = ".")]
    pub root: PathBuf,
}

pub fn clean(args: &CleanArgs, config: &GeotilesConfig) -> Result<Vec<PathBuf>> {
    let removed = WorkDirs::new(&args.root, config).clean()?;

    if removed.is_empty() {
        info!("Nothing to clean");
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_clean() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("_tmp")).unwrap();
        fs::write(dir.path().join("keep.txt"), "").unwrap();

        let args = CleanArgs { root: dir.path().to_path_buf() };
        let removed = clean(&args, &GeotilesConfig::default()).unwrap();

        assert_eq!(vec![dir.path().join("_tmp")], removed);
        assert!(dir.path().join("keep.txt").exists());
        assert!(clean(&args, &GeotilesConfig::default()).unwrap().is_empty());
    }
}
