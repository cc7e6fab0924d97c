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
use geotiles::workspace::{InstallOutcome, WorkDirs};

#[derive(StructOpt)]
pub struct InstallArgs {
    #[structopt(long, parse(from_os_str), default_value = ".")]
    pub root: PathBuf,

    #[structopt(long, help = "Install again even if the marker exists")]
    pub force: bool,

    #[structopt(long, help = "Do not require gdal_contour and eio on PATH")]
    pub skip_tool_check: bool,
}

pub fn install(args: &InstallArgs, config: &GeotilesConfig) -> Result<InstallOutcome> {
    let dirs = WorkDirs::new(&args.root, config);

    let outcome = dirs.install(&config.tools(), !args.skip_tool_check, args.force)?;

    match outcome {
        InstallOutcome::AlreadyInstalled => info!("Already installed"),
        InstallOutcome::Installed => info!("Installed into {:?}", args.root),
    }

    Ok(outcome)
}
