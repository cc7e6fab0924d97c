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

use anyhow::{bail, Result};
use geojson::FeatureCollection;
use log::{info, warn};
use structopt::StructOpt;

use geotiles::relief::{collection_bounds, ReliefModel, TileMetadata};
use geotiles::tile_document::load_collection;

#[derive(StructOpt)]
pub struct ReliefArgs {
    #[structopt(long, parse(from_os_str), help = "Elevation polygons, as written by the elevation command")]
    pub input: PathBuf,

    #[structopt(long, parse(from_os_str))]
    pub output: PathBuf,

    #[structopt(long, default_value = "10", help = "Edge length of the model, used when the input has no metadata")]
    pub model_size: f64,
}

pub(crate) fn build_relief(collection: &FeatureCollection, model_size: f64) -> Result<ReliefModel> {
    let metadata = match TileMetadata::from_collection(collection)? {
        Some(m) => m,
        None => {
            warn!("No metadata in input, scaling to the extent of the features");
            let bounds = match collection_bounds(collection) {
                Some(b) => b,
                None => bail!("Input has no geometries"),
            };
            TileMetadata::for_bounds(&bounds, model_size)?
        }
    };

    Ok(ReliefModel::from_collection(collection, metadata, model_size))
}

pub fn create_relief(args: &ReliefArgs) -> Result<()> {
    let collection = load_collection(&args.input)?;
    let model = build_relief(&collection, args.model_size)?;

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&args.output, serde_json::to_string_pretty(&model)?)?;

    info!("Wrote relief with {} layers to {:?}", model.layers.len(), args.output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geotiles::util::test_util::CONTOUR_POLYGONS_GEOJSON;
    use geotiles::tile_document::parse_collection;
    use std::path::Path;

    #[test]
    fn test_build_relief_without_metadata() {
        let collection = parse_collection(CONTOUR_POLYGONS_GEOJSON, Path::new("c.geojson")).unwrap();
        let model = build_relief(&collection, 10.0).unwrap();

        assert_eq!(12.0, model.metadata.x_min);
        assert_eq!(41.0, model.metadata.y_min);
        assert_eq!(2, model.layers.len());
        assert_eq!(1, model.skipped);
    }

    #[test]
    fn test_build_relief_empty() {
        let collection = parse_collection(
            r#"{"type": "FeatureCollection", "features": []}"#, Path::new("e.geojson")).unwrap();
        assert!(build_relief(&collection, 10.0).is_err());
    }

    #[test]
    fn test_create_relief() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("elevation.geojson");
        fs::write(&input, CONTOUR_POLYGONS_GEOJSON).unwrap();

        let args = ReliefArgs {
            input,
            output: dir.path().join("model").join("relief.json"),
            model_size: 10.0,
        };
        create_relief(&args).unwrap();

        let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&args.output).unwrap()).unwrap();
        assert_eq!(10.0, written["base"]["size"].as_f64().unwrap());
        assert_eq!(2, written["layers"].as_array().unwrap().len());
        assert_eq!(0.2, written["layers"][1]["height"].as_f64().unwrap());
    }
}
