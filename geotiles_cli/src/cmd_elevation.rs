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
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::info;
use structopt::StructOpt;

use geotiles::bounds::BoundingBox;
use geotiles::config::GeotilesConfig;
use geotiles::elevation::Elevation;
use geotiles::relief::{TileMetadata, METADATA_MEMBER};
use geotiles::tile_document::{load_collection, TileDocument};
use geotiles::tools::{SystemToolRunner, ToolRunner};

#[derive(StructOpt)]
pub struct ElevationArgs {
    #[structopt(long, required = true, number_of_values = 4, allow_hyphen_values = true,
                help = "left bottom right top, in degrees")]
    pub bounds: Vec<f64>,

    #[structopt(long, default_value = "10", help = "Elevation step in meters")]
    pub step: f64,

    #[structopt(long, parse(from_os_str), default_value = "_tmp/test.geojson")]
    pub dest: PathBuf,

    #[structopt(long, default_value = "10", help = "Edge length of the relief model")]
    pub model_size: f64,

    #[structopt(long, help = "Clear the DEM download cache first")]
    pub clear_cache: bool,
}

/// Elevation polygons of `bbox` written to `dest`, with the relief metadata
/// for `model_size` stored next to the features
pub(crate) fn write_elevation_polygons(
    runner: &dyn ToolRunner,
    config: &GeotilesConfig,
    bbox: &BoundingBox,
    step: f64,
    model_size: f64,
    clear_cache: bool,
    dest: &Path,
) -> Result<TileMetadata>
{
    let elevation = Elevation::new(runner, &config.tmp_dir, config, clear_cache)?;
    elevation.contour_polygons(bbox, step, dest)?;

    let metadata = TileMetadata::for_bounds(bbox, model_size)?;

    let mut doc = TileDocument::from_collection(load_collection(dest)?);
    doc.set_member(METADATA_MEMBER, &metadata)?;
    doc.save(dest)?;

    info!("Wrote {} elevation polygons to {:?}", doc.len(), dest);
    Ok(metadata)
}

pub fn create_elevation(args: &ElevationArgs, config: &GeotilesConfig) -> Result<()> {
    let bbox = BoundingBox::new(args.bounds[0], args.bounds[1], args.bounds[2], args.bounds[3])?;

    write_elevation_polygons(
        &SystemToolRunner,
        config,
        &bbox,
        args.step,
        args.model_size,
        args.clear_cache,
        &args.dest,
    )?;

    Ok(())
}
