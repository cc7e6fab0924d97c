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
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::constants::{TOOL_CONTOUR, TOOL_DEM};
use crate::errors::GeotilesError;

/// Tools the tile pipeline shells out to
pub const REQUIRED_TOOLS: [&str; 2] = [TOOL_CONTOUR, TOOL_DEM];

/// Runs an external program to completion.  A non zero exit status is an error.
pub trait ToolRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<()>;
}

pub struct SystemToolRunner;

impl ToolRunner for SystemToolRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<()> {
        info!("Running {} {}", program, args.join(" "));

        let status = Command::new(program)
            .args(args)
            .status()
            .with_context(|| format!("Failed to start {}", program))?;

        if !status.success() {
            return Err(GeotilesError::ToolFailed {
                program: program.to_string(),
                status: status.to_string(),
            }.into());
        }

        Ok(())
    }
}

fn is_executable_file(path: &Path) -> bool {
    if path.is_file() {
        return true;
    }
    cfg!(windows) && path.with_extension("exe").is_file()
}

pub fn find_in_dirs<I>(program: &str, dirs: I) -> Option<PathBuf>
    where I: IntoIterator<Item = PathBuf>
{
    dirs.into_iter()
        .map(|d| d.join(program))
        .find(|p| is_executable_file(p))
}

pub fn find_in_path(program: &str) -> Option<PathBuf> {
    let path = env::var_os("PATH")?;
    let found = find_in_dirs(program, env::split_paths(&path));
    debug!("Looked up {} on PATH: {:?}", program, found);
    found
}

/// Returns the subset of `tools` that cannot be found on PATH
pub fn missing_tools(tools: &[&str]) -> Vec<String> {
    tools.iter()
        .filter(|t| find_in_path(t).is_none())
        .map(|t| t.to_string())
        .collect()
}

pub fn require_tools(tools: &[&str]) -> Result<()> {
    let missing = missing_tools(tools);
    if !missing.is_empty() {
        return Err(GeotilesError::MissingTools(missing).into());
    }
    Ok(())
}
