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
use std::path::PathBuf;

use anyhow::Result;
use geojson::{JsonObject, JsonValue, Value};
use log::info;
use structopt::StructOpt;

use geotiles::bounds::{BoundingBox, LatLon};
use geotiles::config::GeotilesConfig;
use geotiles::constants::{EXT_GEOJSON, FILE_BOUNDS_TOTAL, FILE_ELEVATION, METERS_PER_DEGREE};
use geotiles::hexagon::distribute_hexagons;
use geotiles::osm::{Geocoder, NominatimGeocoder};
use geotiles::tile_document::{make_feature, TileDocument};
use geotiles::tools::SystemToolRunner;
use geotiles::util::{file_with_ext, ProgressLog};

use crate::cmd_elevation::write_elevation_polygons;

#[derive(StructOpt)]
pub struct HexGridArgs {
    #[structopt(help = "Location to use as center")]
    pub center_query: String,

    #[structopt(parse(from_os_str), help = "Path to the output directory")]
    pub out_dir: PathBuf,

    #[structopt(long, short = "s", default_value = "1000", help = "Tile size in meters, corner to corner of a hexagon")]
    pub tile_size: f64,

    #[structopt(long, short = "t", default_value = "20000", help = "Total area size, distance from the center to the edges in meters")]
    pub total_area_size: f64,

    #[structopt(long, short = "e", default_value = "10", help = "Elevation step in meters")]
    pub elevation_step: f64,

    #[structopt(long, help = "Also write elevation polygons of the total area")]
    pub elevation: bool,

    #[structopt(long, default_value = "10", help = "Edge length of the relief model")]
    pub model_size: f64,
}

fn named(name: &str) -> JsonObject {
    let mut properties = JsonObject::new();
    properties.insert("name".to_string(), JsonValue::from(name));
    properties
}

/// Hexagon outer radius in degrees for a tile size in meters
pub(crate) fn hexagon_size_degrees(tile_size: f64) -> f64 {
    tile_size / 2.0 / METERS_PER_DEGREE
}

pub(crate) fn build_hex_grid(center: LatLon, args: &HexGridArgs) -> Result<(BoundingBox, TileDocument)> {
    let bbox = BoundingBox::from_point(center, args.total_area_size)?;

    let mut doc = TileDocument::new();
    doc.add_feature(make_feature(Value::from(&bbox.to_polygon()), named("Bounds")));

    let hexagons = distribute_hexagons(&bbox, hexagon_size_degrees(args.tile_size))?;
    info!("Distributed {} hexagons", hexagons.len());

    let mut progress = ProgressLog::new(hexagons.len());
    for (idx, hexagon) in hexagons.iter().enumerate() {
        progress.tick(idx);
        doc.add_feature(make_feature(Value::from(&hexagon.polygon()), named("Hexagon")));
    }

    Ok((bbox, doc))
}

pub fn create_hex_grid(args: &HexGridArgs, config: &GeotilesConfig) -> Result<()> {
    fs::create_dir_all(&args.out_dir)?;

    let center = NominatimGeocoder::new(config)?.geocode(&args.center_query)?;

    let (bbox, doc) = build_hex_grid(center, args)?;

    let out = file_with_ext(&args.out_dir, FILE_BOUNDS_TOTAL, EXT_GEOJSON);
    doc.save(&out)?;
    info!("Wrote {} features to {:?}", doc.len(), out);

    if args.elevation {
        let dest = file_with_ext(&args.out_dir, FILE_ELEVATION, EXT_GEOJSON);
        write_elevation_polygons(
            &SystemToolRunner,
            config,
            &bbox,
            args.elevation_step,
            args.model_size,
            false,
            &dest,
        )?;
    }

    Ok(())
}
