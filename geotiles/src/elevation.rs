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
use geojson::{Feature, JsonValue};
use log::info;

use crate::bounds::BoundingBox;
use crate::config::GeotilesConfig;
use crate::constants::*;
use crate::tile_document::load_collection;
use crate::tools::ToolRunner;
use crate::util::{file_with_ext, format_coord};

/// Elevation data for a region, fetched as a DEM raster with `eio` and turned
/// into GeoJSON contours with `gdal_contour`
pub struct Elevation<'r> {
    runner: &'r dyn ToolRunner,
    work_dir: PathBuf,
    dem_tool: String,
    contour_tool: String,
}

impl<'r> Elevation<'r> {
    /// `clear_cache` wipes the downloaded DEM tiles first
    pub fn new(runner: &'r dyn ToolRunner,
               work_dir: &Path,
               config: &GeotilesConfig,
               clear_cache: bool) -> Result<Elevation<'r>>
    {
        let elevation = Elevation {
            runner,
            work_dir: work_dir.to_path_buf(),
            dem_tool: config.dem_tool.clone(),
            contour_tool: config.contour_tool.clone(),
        };

        if clear_cache {
            info!("Clearing DEM cache");
            runner.run(&elevation.dem_tool, &["clean".to_string()])?;
        }

        Ok(elevation)
    }

    pub fn dem_path(&self) -> PathBuf {
        file_with_ext(&self.work_dir, FILE_DEM, EXT_TIF)
    }

    /// Clips the DEM to `bbox`, returns the path of the raster
    pub fn fetch_dem(&self, bbox: &BoundingBox) -> Result<PathBuf> {
        fs::create_dir_all(&self.work_dir)
            .with_context(|| format!("Creating {:?}", self.work_dir))?;

        let dem = self.dem_path();

        let mut args = vec![
            "clip".to_string(),
            "-o".to_string(),
            dem.to_string_lossy().to_string(),
            "--bounds".to_string(),
        ];
        args.extend(bbox.as_array().iter().map(|v| format_coord(*v)));

        self.runner.run(&self.dem_tool, &args)?;

        Ok(dem)
    }

    fn run_contour(&self, dem: &Path, dest: &Path, options: Vec<String>) -> Result<()> {
        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        //gdal_contour refuses to overwrite
        if dest.exists() {
            fs::remove_file(dest)?;
        }

        let mut args = vec!["-f".to_string(), "GeoJSON".to_string()];
        args.extend(options);
        args.push(dem.to_string_lossy().to_string());
        args.push(dest.to_string_lossy().to_string());

        self.runner.run(&self.contour_tool, &args)
    }

    /// Contour lines every `interval` meters, height in attribute `elevation`
    pub fn contour_lines(&self, bbox: &BoundingBox, interval: f64, dest: &Path) -> Result<()> {
        let dem = self.fetch_dem(bbox)?;

        self.run_contour(&dem, dest, vec![
            "-i".to_string(), format_coord(interval),
            "-a".to_string(), ATTR_ELEVATION.to_string(),
        ])
    }

    /// Contour polygons every `step` meters with the band limits in
    /// `elevation_min` / `elevation_max`
    pub fn contour_polygons(&self, bbox: &BoundingBox, step: f64, dest: &Path) -> Result<()> {
        let dem = self.fetch_dem(bbox)?;

        self.run_contour(&dem, dest, vec![
            "-i".to_string(), format_coord(step),
            "-amin".to_string(), ATTR_ELEVATION_MIN.to_string(),
            "-amax".to_string(), ATTR_ELEVATION_MAX.to_string(),
            "-p".to_string(),
            "-q".to_string(),
        ])
    }

    /// Contour lines of `bbox`, styled green for the tile preview
    pub fn styled_contour_lines(&self, bbox: &BoundingBox, interval: f64) -> Result<Vec<Feature>> {
        let dest = file_with_ext(&self.work_dir, FILE_CONTOURS, EXT_GEOJSON);
        self.contour_lines(bbox, interval, &dest)?;

        let mut features = load_collection(&dest)?.features;
        style_contours(&mut features);

        info!("Loaded {} contour lines", features.len());
        Ok(features)
    }
}

pub fn style_contours(features: &mut [Feature]) {
    for f in features.iter_mut() {
        f.set_property(PROP_STROKE, JsonValue::from(STROKE_CONTOUR));
        f.set_property(PROP_STROKE_WIDTH, JsonValue::from("1"));
    }
}
