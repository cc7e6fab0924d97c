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
use std::path::Path;

use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, JsonValue, Value};
use log::debug;
use serde::Serialize;

use crate::bounds::BoundingBox;
use crate::constants::{PROP_STROKE, PROP_STROKE_WIDTH, STROKE_BOUNDS};
use crate::errors::GeotilesError;

pub fn make_feature(value: Value, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

pub fn empty_collection() -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: vec![],
        foreign_members: None,
    }
}

pub fn parse_collection(json: &str, origin: &Path) -> Result<FeatureCollection> {
    let geojson = json.parse::<GeoJson>()
        .with_context(|| format!("Parsing GeoJSON from {:?}", origin))?;

    match geojson {
        GeoJson::FeatureCollection(fc) => Ok(fc),
        _ => Err(GeotilesError::NotAFeatureCollection(origin.to_path_buf()).into()),
    }
}

pub fn load_collection(path: &Path) -> Result<FeatureCollection> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Reading {:?}", path))?;
    parse_collection(&json, path)
}

/// Writes pretty printed GeoJSON, creating parent directories as needed
pub fn save_collection(collection: &FeatureCollection, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(collection)?;
    fs::write(path, json).with_context(|| format!("Writing {:?}", path))?;

    debug!("Wrote {} features to {:?}", collection.features.len(), path);
    Ok(())
}

/// Feature collection assembled from several sources and saved as one tile
pub struct TileDocument {
    collection: FeatureCollection,
}

impl Default for TileDocument {
    fn default() -> Self {
        TileDocument::new()
    }
}

impl TileDocument {
    pub fn new() -> TileDocument {
        TileDocument { collection: empty_collection() }
    }

    pub fn from_collection(collection: FeatureCollection) -> TileDocument {
        TileDocument { collection }
    }

    /// Outline of the tile as a blue line string
    pub fn add_bbox(&mut self, bbox: &BoundingBox) {
        let mut properties = JsonObject::new();
        properties.insert(PROP_STROKE.to_string(), JsonValue::from(STROKE_BOUNDS));
        properties.insert(PROP_STROKE_WIDTH.to_string(), JsonValue::from(1));

        self.add_feature(make_feature(Value::from(&bbox.ring()), properties));
    }

    pub fn add_feature(&mut self, feature: Feature) {
        self.collection.features.push(feature);
    }

    pub fn extend<I: IntoIterator<Item = Feature>>(&mut self, features: I) {
        self.collection.features.extend(features);
    }

    pub fn features(&self) -> &[Feature] {
        &self.collection.features
    }

    pub fn len(&self) -> usize {
        self.collection.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.features.is_empty()
    }

    /// Sets a top level member next to `features`, e.g. the relief metadata
    pub fn set_member<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.collection.foreign_members
            .get_or_insert_with(JsonObject::new)
            .insert(key.to_string(), value);
        Ok(())
    }

    pub fn member(&self, key: &str) -> Option<&JsonValue> {
        self.collection.foreign_members.as_ref().and_then(|m| m.get(key))
    }

    pub fn collection(&self) -> &FeatureCollection {
        &self.collection
    }

    pub fn into_collection(self) -> FeatureCollection {
        self.collection
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_collection(&self.collection, path)
    }
}
