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
use std::time::Duration;

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;

use crate::constants::{PATH_OUT, PATH_TMP, TOOL_CONTOUR, TOOL_DEM};

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Settings read from an optional TOML file.  Every key may be left out.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeotilesConfig {
    pub nominatim_url: String,
    pub overpass_url: String,
    pub user_agent: String,
    pub http_timeout_secs: u64,
    pub contour_tool: String,
    pub dem_tool: String,
    pub out_dir: PathBuf,
    pub tmp_dir: PathBuf,
}

impl Default for GeotilesConfig {
    fn default() -> Self {
        GeotilesConfig {
            nominatim_url: DEFAULT_NOMINATIM_URL.to_string(),
            overpass_url: DEFAULT_OVERPASS_URL.to_string(),
            user_agent: format!("geotiles/{}", env!("CARGO_PKG_VERSION")),
            http_timeout_secs: 180,
            contour_tool: TOOL_CONTOUR.to_string(),
            dem_tool: TOOL_DEM.to_string(),
            out_dir: PathBuf::from(PATH_OUT),
            tmp_dir: PathBuf::from(PATH_TMP),
        }
    }
}

impl GeotilesConfig {
    pub fn from_toml_str(s: &str) -> Result<GeotilesConfig> {
        Ok(toml::from_str(s)?)
    }

    pub fn read(path: &Path) -> Result<GeotilesConfig> {
        debug!("Reading config from {:?}", path);
        let s = fs::read_to_string(path)
            .with_context(|| format!("Reading config {:?}", path))?;
        GeotilesConfig::from_toml_str(&s)
            .with_context(|| format!("Parsing config {:?}", path))
    }

    /// Defaults when no file is given
    pub fn read_optional(path: Option<&Path>) -> Result<GeotilesConfig> {
        match path {
            Some(p) => GeotilesConfig::read(p),
            None => Ok(GeotilesConfig::default()),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn tools(&self) -> [&str; 2] {
        [self.contour_tool.as_str(), self.dem_tool.as_str()]
    }
}
