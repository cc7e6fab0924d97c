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
//! Layered relief model for printing or CAD extrusion.
//!
//! Elevation bands produced by `gdal_contour -p` are moved into model
//! coordinates, a `model_size` square with the tile's south west corner at the
//! origin.  Every band becomes a layer extruded to `elevation_max / 100` on top
//! of a base plate.

use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, JsonValue, Value};
use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::bounds::BoundingBox;
use crate::constants::{ATTR_ELEVATION_MAX, ATTR_ELEVATION_MIN};
use crate::errors::GeotilesError;

pub const METADATA_MEMBER: &str = "metadata";
pub const BASE_PLATE_HEIGHT: f64 = 1.0;
pub const HEIGHT_DIVISOR: f64 = 100.0;

/// Offset and scale from degrees to model units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileMetadata {
    pub x_min: f64,
    pub y_min: f64,
    pub x_scale: f64,
    pub y_scale: f64,
}

impl TileMetadata {
    pub fn for_bounds(bbox: &BoundingBox, model_size: f64) -> Result<TileMetadata> {
        if bbox.width() <= 0.0 || bbox.height() <= 0.0 {
            return Err(GeotilesError::InvalidBounds {
                left: bbox.left,
                bottom: bbox.bottom,
                right: bbox.right,
                top: bbox.top,
            }.into());
        }

        Ok(TileMetadata {
            x_min: bbox.left,
            y_min: bbox.bottom,
            x_scale: model_size / bbox.width(),
            y_scale: model_size / bbox.height(),
        })
    }

    /// Reads the `metadata` member of a collection, if there is one
    pub fn from_collection(collection: &FeatureCollection) -> Result<Option<TileMetadata>> {
        let member = collection.foreign_members.as_ref()
            .and_then(|m| m.get(METADATA_MEMBER));

        match member {
            Some(v) => {
                let metadata = serde_json::from_value(v.clone())
                    .context("Parsing tile metadata")?;
                Ok(Some(metadata))
            }
            None => Ok(None),
        }
    }

    pub fn transform(&self, position: &[f64]) -> (f64, f64) {
        (
            (position[0] - self.x_min) * self.x_scale,
            (position[1] - self.y_min) * self.y_scale,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasePlate {
    pub size: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReliefLayer {
    pub elevation_max: f64,
    pub height: f64,
    pub rings: Vec<Vec<(f64, f64)>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReliefModel {
    pub metadata: TileMetadata,
    pub base: BasePlate,
    pub layers: Vec<ReliefLayer>,
    /// Elevation features that were not multi polygons
    pub skipped: usize,
}

fn property_f64(feature: &Feature, name: &str) -> Option<f64> {
    match feature.property(name)? {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn geometry_type_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn visit_positions<F: FnMut(&[f64])>(value: &Value, f: &mut F) {
    match value {
        Value::Point(p) => f(p.as_slice()),
        Value::MultiPoint(ps) | Value::LineString(ps) => ps.iter().for_each(|p| f(p.as_slice())),
        Value::MultiLineString(ls) | Value::Polygon(ls) => {
            ls.iter().flatten().for_each(|p| f(p.as_slice()))
        }
        Value::MultiPolygon(polys) => {
            polys.iter().flatten().flatten().for_each(|p| f(p.as_slice()))
        }
        Value::GeometryCollection(geoms) => {
            geoms.iter().for_each(|g| visit_positions(&g.value, f))
        }
    }
}

/// Bounds of every position in the collection, `None` when it has no geometry
pub fn collection_bounds(collection: &FeatureCollection) -> Option<BoundingBox> {
    let mut bounds: Option<BoundingBox> = None;

    for geometry in collection.features.iter().filter_map(|f| f.geometry.as_ref()) {
        visit_positions(&geometry.value, &mut |p: &[f64]| {
            if p.len() < 2 {
                return;
            }
            let b = bounds.get_or_insert(BoundingBox { left: p[0], bottom: p[1], right: p[0], top: p[1] });
            b.left = b.left.min(p[0]);
            b.bottom = b.bottom.min(p[1]);
            b.right = b.right.max(p[0]);
            b.top = b.top.max(p[1]);
        });
    }

    bounds
}

fn transform_ring(metadata: &TileMetadata, ring: &[Vec<f64>]) -> Vec<(f64, f64)> {
    let mut points: Vec<(f64, f64)> = ring.iter()
        .filter(|p| p.len() >= 2)
        .map(|p| metadata.transform(p))
        .collect();

    if let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) {
        if first != last {
            points.push(first);
        }
    }
    points
}

impl ReliefModel {
    pub fn from_collection(collection: &FeatureCollection,
                           metadata: TileMetadata,
                           model_size: f64) -> ReliefModel
    {
        let mut bands: Vec<(f64, Vec<Vec<(f64, f64)>>)> = Vec::new();
        let mut skipped = 0;

        for feature in collection.features.iter() {
            if !feature.contains_property(ATTR_ELEVATION_MIN) {
                continue;
            }
            let elevation_max = match property_f64(feature, ATTR_ELEVATION_MAX) {
                Some(e) => e,
                None => {
                    warn!("Feature without numeric {}", ATTR_ELEVATION_MAX);
                    skipped += 1;
                    continue;
                }
            };

            match feature.geometry.as_ref().map(|g| &g.value) {
                Some(Value::MultiPolygon(polygons)) => {
                    let rings = polygons.iter()
                        .flatten()
                        .map(|ring| transform_ring(&metadata, ring))
                        .filter(|ring| ring.len() >= 4)
                        .collect();
                    bands.push((elevation_max, rings));
                }
                other => {
                    let found = other.map(geometry_type_name)
                        .unwrap_or("None")
                        .to_string();
                    warn!("{}", GeotilesError::UnexpectedGeometry { found, context: "relief export" });
                    skipped += 1;
                }
            }
        }

        let mut layers: Vec<ReliefLayer> = Vec::new();
        for (elevation_max, rings) in bands.into_iter().sorted_by(|a, b| a.0.total_cmp(&b.0)) {
            match layers.last_mut() {
                Some(layer) if layer.elevation_max == elevation_max => layer.rings.extend(rings),
                _ => layers.push(ReliefLayer {
                    elevation_max,
                    height: elevation_max / HEIGHT_DIVISOR,
                    rings,
                }),
            }
        }

        debug!("Relief model with {} layers, {} features skipped", layers.len(), skipped);

        ReliefModel {
            metadata,
            base: BasePlate { size: model_size, height: BASE_PLATE_HEIGHT },
            layers,
            skipped,
        }
    }
}
