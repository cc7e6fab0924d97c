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
use std::collections::HashMap;

use anyhow::Result;
use geojson::{Feature, JsonObject, JsonValue, Value};
use log::{debug, info};
use reqwest::blocking::Client;

use crate::bounds::{BoundingBox, LatLon};
use crate::config::GeotilesConfig;
use crate::constants::{PROP_STROKE, PROP_STROKE_WIDTH, STROKE_LANDUSE};
use crate::errors::GeotilesError;
use crate::tile_document::make_feature;
use crate::util::ProgressLog;

mod nominatim;
mod overpass;

pub use nominatim::*;
pub use overpass::*;

/// Resolves a free text place name to coordinates
pub trait Geocoder {
    fn geocode(&self, query: &str) -> Result<LatLon>;
}

/// Runs Overpass QL queries
pub trait OsmSource {
    fn timeout_secs(&self) -> u64;

    fn query(&self, query: &str) -> Result<OverpassResponse>;
}

pub(crate) fn build_http_client(config: &GeotilesConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.http_timeout())
        .build()
        .map_err(GeotilesError::Http)?;
    Ok(client)
}

type Ring = Vec<(f64, f64)>;

fn to_positions(points: &[GeomPoint]) -> Ring {
    points.iter().map(|p| (p.lon, p.lat)).collect()
}

fn line_string(coords: &[(f64, f64)]) -> Value {
    Value::LineString(coords.iter().map(|(x, y)| vec![*x, *y]).collect())
}

fn is_closed(ring: &[(f64, f64)]) -> bool {
    ring.len() >= 4 && ring.first() == ring.last()
}

/// Lane count as a string, "1" when missing or not a number
pub fn lanes_of(tags: &HashMap<String, String>) -> String {
    match tags.get("lanes") {
        Some(l) if l.trim().parse::<f64>().map(|v| !v.is_nan()).unwrap_or(false) => l.trim().to_string(),
        _ => "1".to_string(),
    }
}

/// One line string per drivable way, property `lanes`
pub fn fetch_streets(source: &dyn OsmSource, bbox: &BoundingBox) -> Result<Vec<Feature>> {
    let response = source.query(&drive_network_query(bbox, source.timeout_secs()))?;

    let mut progress = ProgressLog::new(response.elements.len());
    let mut features = Vec::new();

    for (idx, element) in response.elements.iter().enumerate() {
        progress.tick(idx);

        if let Element::Way { geometry, tags, .. } = element {
            if geometry.len() < 2 {
                continue;
            }
            let mut properties = JsonObject::new();
            properties.insert("lanes".to_string(), JsonValue::from(lanes_of(tags)));

            features.push(make_feature(line_string(&to_positions(geometry)), properties));
        }
    }

    info!("Fetched {} streets", features.len());
    Ok(features)
}

/// Joins way segments sharing end points into closed rings.  Segments that
/// cannot be closed are dropped.
pub fn assemble_rings(segments: Vec<Ring>) -> Vec<Ring> {
    let mut remaining: Vec<Ring> = segments.into_iter().filter(|s| s.len() >= 2).collect();
    let mut rings = Vec::new();

    while let Some(mut current) = remaining.pop() {
        while !is_closed(&current) {
            let end = match current.last() {
                Some(e) => *e,
                None => break,
            };

            let next = remaining.iter().position(|s| s.first() == Some(&end) || s.last() == Some(&end));
            match next {
                Some(idx) => {
                    let mut segment = remaining.swap_remove(idx);
                    if segment.first() != Some(&end) {
                        segment.reverse();
                    }
                    current.extend(segment.into_iter().skip(1));
                }
                None => break,
            }
        }

        if is_closed(&current) {
            rings.push(current);
        } else {
            debug!("Dropping open ring with {} points", current.len());
        }
    }

    rings
}

/// Outlines of `landuse=<kind>` areas as red line strings
pub fn fetch_landuse(source: &dyn OsmSource, bbox: &BoundingBox, kind: &str) -> Result<Vec<Feature>> {
    let response = source.query(&landuse_query(bbox, kind, source.timeout_secs()))?;

    let mut rings = Vec::new();

    for element in response.elements.iter() {
        match element {
            Element::Way { geometry, .. } => {
                let ring = to_positions(geometry);
                if is_closed(&ring) {
                    rings.push(ring);
                }
            }
            Element::Relation { members, .. } => {
                let outer = members.iter()
                    .filter(|m| m.member_type == "way" && m.role == "outer")
                    .map(|m| to_positions(&m.geometry))
                    .collect();
                rings.extend(assemble_rings(outer));
            }
            _ => {}
        }
    }

    let features: Vec<Feature> = rings.iter().map(|ring| {
        let mut properties = JsonObject::new();
        properties.insert("type".to_string(), JsonValue::from(kind));
        properties.insert(PROP_STROKE.to_string(), JsonValue::from(STROKE_LANDUSE));
        properties.insert(PROP_STROKE_WIDTH.to_string(), JsonValue::from(1));
        make_feature(line_string(ring), properties)
    }).collect();

    info!("Fetched {} {} areas", features.len(), kind);
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use serde_json::json;

    struct FakeOsm {
        response: String,
        queries: RefCell<Vec<String>>,
    }

    impl FakeOsm {
        fn new(response: &str) -> Self {
            FakeOsm { response: response.to_string(), queries: RefCell::new(vec![]) }
        }
    }

    impl OsmSource for FakeOsm {
        fn timeout_secs(&self) -> u64 {
            60
        }

        fn query(&self, query: &str) -> Result<OverpassResponse> {
            self.queries.borrow_mut().push(query.to_string());
            OverpassResponse::parse(&self.response)
        }
    }

    fn bbox() -> BoundingBox {
        BoundingBox::new(9.9, 52.1, 10.0, 52.2).unwrap()
    }

    #[test]
    fn test_lanes_of() {
        let mut tags = HashMap::new();
        assert_eq!("1", lanes_of(&tags));
        tags.insert("lanes".to_string(), "2".to_string());
        assert_eq!("2", lanes_of(&tags));
        tags.insert("lanes".to_string(), "NaN".to_string());
        assert_eq!("1", lanes_of(&tags));
        tags.insert("lanes".to_string(), "2;3".to_string());
        assert_eq!("1", lanes_of(&tags));
    }

    #[test]
    fn test_fetch_streets() {
        let osm = FakeOsm::new(r#"{"elements": [
            {"type": "way", "id": 1, "tags": {"highway": "primary", "lanes": "4"},
             "geometry": [{"lat": 52.1, "lon": 9.9}, {"lat": 52.2, "lon": 10.0}]},
            {"type": "way", "id": 2, "tags": {"highway": "residential"},
             "geometry": [{"lat": 52.15, "lon": 9.95}, {"lat": 52.16, "lon": 9.96}, {"lat": 52.17, "lon": 9.97}]},
            {"type": "way", "id": 3, "tags": {"highway": "residential"},
             "geometry": [{"lat": 52.15, "lon": 9.95}]}
        ]}"#);

        let streets = fetch_streets(&osm, &bbox()).unwrap();

        assert_eq!(2, streets.len());
        assert_eq!(Some(&json!("4")), streets[0].property("lanes"));
        assert_eq!(Some(&json!("1")), streets[1].property("lanes"));

        match &streets[0].geometry.as_ref().unwrap().value {
            Value::LineString(coords) => assert_eq!(vec![vec![9.9, 52.1], vec![10.0, 52.2]], *coords),
            other => panic!("Unexpected geometry {:?}", other),
        }

        assert!(osm.queries.borrow()[0].starts_with("[out:json][timeout:60];"));
    }

    #[test]
    fn test_assemble_rings() {
        let rings = assemble_rings(vec![
            vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)],
            vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)],
            vec![(5.0, 5.0), (6.0, 5.0)],
        ]);

        assert_eq!(1, rings.len());
        let ring = &rings[0];
        assert_eq!(5, ring.len());
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_fetch_landuse() {
        let osm = FakeOsm::new(r#"{"elements": [
            {"type": "way", "id": 1, "tags": {"landuse": "residential"},
             "geometry": [{"lat": 0, "lon": 0}, {"lat": 0, "lon": 1}, {"lat": 1, "lon": 1}, {"lat": 0, "lon": 0}]},
            {"type": "way", "id": 2, "tags": {"landuse": "residential"},
             "geometry": [{"lat": 0, "lon": 0}, {"lat": 0, "lon": 1}]},
            {"type": "relation", "id": 3, "tags": {"landuse": "residential", "type": "multipolygon"},
             "members": [
                {"type": "way", "ref": 10, "role": "outer",
                 "geometry": [{"lat": 2, "lon": 2}, {"lat": 2, "lon": 3}, {"lat": 3, "lon": 3}]},
                {"type": "way", "ref": 11, "role": "outer",
                 "geometry": [{"lat": 3, "lon": 3}, {"lat": 3, "lon": 2}, {"lat": 2, "lon": 2}]},
                {"type": "way", "ref": 12, "role": "inner",
                 "geometry": [{"lat": 2.2, "lon": 2.2}, {"lat": 2.2, "lon": 2.4}, {"lat": 2.4, "lon": 2.4}, {"lat": 2.2, "lon": 2.2}]}
             ]}
        ]}"#);

        let areas = fetch_landuse(&osm, &bbox(), "residential").unwrap();

        assert_eq!(2, areas.len());
        for a in areas.iter() {
            assert_eq!(Some(&json!("residential")), a.property("type"));
            assert_eq!(Some(&json!("#ff0000")), a.property("stroke"));
            assert_eq!(Some(&json!(1)), a.property("stroke-width"));
        }
        assert!(osm.queries.borrow()[0].contains("relation[\"landuse\"=\"residential\"]"));
    }
}
