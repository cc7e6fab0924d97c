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

use geotiles::bounds::{km_to_degrees, BoundingBox};
use geotiles::config::GeotilesConfig;
use geotiles::constants::{EXT_GEOJSON, FILE_TILE};
use geotiles::elevation::Elevation;
use geotiles::osm::{fetch_landuse, fetch_streets, Geocoder, NominatimGeocoder, OsmSource, OverpassClient};
use geotiles::tile_document::TileDocument;
use geotiles::tools::{SystemToolRunner, ToolRunner};
use geotiles::util::file_with_ext;

#[derive(StructOpt)]
pub struct TileArgs {
    #[structopt(help = "Location to use as center")]
    pub center_query: String,

    #[structopt(long, default_value = "3", help = "Edge length of the square in km")]
    pub size_km: f64,

    #[structopt(long, parse(from_os_str), help = "Output file, defaults to tile.geojson in the out directory")]
    pub out: Option<PathBuf>,

    #[structopt(long, default_value = "5", help = "Contour interval in meters")]
    pub contour_interval: f64,

    #[structopt(long, default_value = "residential")]
    pub landuse: String,

    #[structopt(long)]
    pub no_streets: bool,

    #[structopt(long)]
    pub no_landuse: bool,

    #[structopt(long)]
    pub no_elevation: bool,

    #[structopt(long, help = "Clear the DEM download cache first")]
    pub clear_cache: bool,
}

pub(crate) fn build_tile(
    args: &TileArgs,
    config: &GeotilesConfig,
    geocoder: &dyn Geocoder,
    osm: &dyn OsmSource,
    runner: &dyn ToolRunner,
) -> Result<(BoundingBox, TileDocument)>
{
    let center = geocoder.geocode(&args.center_query)?;

    let bbox = BoundingBox::square_around(center, km_to_degrees(args.size_km))?;
    info!("Tile bounds {:?}", bbox);

    let mut doc = TileDocument::new();
    doc.add_bbox(&bbox);

    if !args.no_streets {
        doc.extend(fetch_streets(osm, &bbox)?);
    }

    if !args.no_landuse {
        doc.extend(fetch_landuse(osm, &bbox, &args.landuse)?);
    }

    if !args.no_elevation {
        let elevation = Elevation::new(runner, &config.tmp_dir, config, args.clear_cache)?;
        doc.extend(elevation.styled_contour_lines(&bbox, args.contour_interval)?);
    }

    Ok((bbox, doc))
}

pub fn create_tile(args: &TileArgs, config: &GeotilesConfig) -> Result<()> {
    let geocoder = NominatimGeocoder::new(config)?;
    let osm = OverpassClient::new(config)?;

    let (_, doc) = build_tile(args, config, &geocoder, &osm, &SystemToolRunner)?;

    let out = args.out.clone()
        .unwrap_or_else(|| file_with_ext(&config.out_dir, FILE_TILE, EXT_GEOJSON));
    doc.save(&out)?;

    info!("Wrote {} features to {:?}", doc.len(), out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{FakeGeocoder, FakeOsm, LANDUSE, STREETS};
    use float_cmp::approx_eq;
    use geotiles::bounds::LatLon;
    use geotiles::util::test_util::{FakeToolRunner, CONTOUR_LINES_GEOJSON};
    use serde_json::json;
    use structopt::StructOpt;

    fn args(extra: &[&str]) -> TileArgs {
        let mut argv = vec!["tile", "Groß Escherde"];
        argv.extend_from_slice(extra);
        TileArgs::from_iter_safe(argv).unwrap()
    }

    fn config(tmp: &std::path::Path) -> GeotilesConfig {
        GeotilesConfig { tmp_dir: tmp.to_path_buf(), ..GeotilesConfig::default() }
    }

    #[test]
    fn test_build_tile() {
        let dir = tempfile::tempdir().unwrap();
        let runner = FakeToolRunner::new().with_output("gdal_contour", CONTOUR_LINES_GEOJSON);
        let osm = FakeOsm { streets: STREETS, landuse: LANDUSE };

        let (bbox, doc) = build_tile(
            &args(&[]),
            &config(dir.path()),
            &FakeGeocoder(LatLon::new(52.2, 9.95)),
            &osm,
            &runner,
        ).unwrap();

        //bounds, 1 street, 1 landuse, 2 contour lines
        assert_eq!(5, doc.len());
        assert_eq!(Some(&json!("#0000ff")), doc.features()[0].property("stroke"));
        assert_eq!(Some(&json!("2")), doc.features()[1].property("lanes"));
        assert_eq!(Some(&json!("residential")), doc.features()[2].property("type"));
        assert_eq!(Some(&json!("#00ff00")), doc.features()[4].property("stroke"));

        let size = 3.0 / 1.852 / 60.0;
        assert!(approx_eq!(f64, size, bbox.width(), epsilon = 1e-12));
        assert!(bbox.height() < bbox.width());

        assert_eq!(vec!["eio".to_string(), "gdal_contour".to_string()], runner.programs());
    }

    #[test]
    fn test_build_tile_without_sources() {
        let dir = tempfile::tempdir().unwrap();
        let runner = FakeToolRunner::new();
        let osm = FakeOsm { streets: STREETS, landuse: LANDUSE };

        let (_, doc) = build_tile(
            &args(&["--no-streets", "--no-landuse", "--no-elevation"]),
            &config(dir.path()),
            &FakeGeocoder(LatLon::new(52.2, 9.95)),
            &osm,
            &runner,
        ).unwrap();

        assert_eq!(1, doc.len());
        assert!(runner.programs().is_empty());
    }
}
