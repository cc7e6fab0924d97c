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

use anyhow::{Context, Result};
use log::{debug, info};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::bounds::BoundingBox;
use crate::config::GeotilesConfig;
use crate::errors::GeotilesError;
use crate::osm::{build_http_client, OsmSource};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GeomPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    #[serde(rename = "type")]
    pub member_type: String,
    #[serde(rename = "ref")]
    pub reference: i64,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub geometry: Vec<GeomPoint>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Node {
        id: i64,
        lat: f64,
        lon: f64,
        #[serde(default)]
        tags: HashMap<String, String>,
    },
    Way {
        id: i64,
        #[serde(default)]
        geometry: Vec<GeomPoint>,
        #[serde(default)]
        tags: HashMap<String, String>,
    },
    Relation {
        id: i64,
        #[serde(default)]
        members: Vec<Member>,
        #[serde(default)]
        tags: HashMap<String, String>,
    },
    #[serde(other)]
    Other,
}

/// Response of an Overpass `[out:json]` query with `out geom`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl OverpassResponse {
    pub fn parse(json: &str) -> Result<OverpassResponse> {
        serde_json::from_str(json).context("Parsing Overpass response")
    }
}

/// Highway values a car cannot use
const NON_DRIVE_HIGHWAYS: &str = "abandoned|bridleway|bus_guideway|construction|corridor|cycleway|elevator|\
escalator|footway|no|path|pedestrian|planned|platform|proposed|raceway|razed|service|steps|track";

const NON_DRIVE_SERVICES: &str = "alley|driveway|emergency_access|parking|parking_aisle|private";

fn header(timeout_secs: u64) -> String {
    format!("[out:json][timeout:{}];", timeout_secs)
}

/// Ways of the public drivable road network intersecting `bbox`
pub fn drive_network_query(bbox: &BoundingBox, timeout_secs: u64) -> String {
    format!(
        "{HEADER}(way[\"highway\"][\"area\"!~\"yes\"][\"access\"!~\"private\"][\"highway\"!~\"{HW}\"]\
[\"motor_vehicle\"!~\"no\"][\"motorcar\"!~\"no\"][\"service\"!~\"{SVC}\"]({BBOX}););out geom;",
        HEADER = header(timeout_secs),
        HW = NON_DRIVE_HIGHWAYS,
        SVC = NON_DRIVE_SERVICES,
        BBOX = bbox.to_overpass())
}

/// Quotes and backslashes would end an Overpass QL string literal early
fn escape_ql_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Ways and multipolygon relations tagged `landuse=<kind>`
pub fn landuse_query(bbox: &BoundingBox, kind: &str, timeout_secs: u64) -> String {
    format!(
        "{HEADER}(way[\"landuse\"=\"{KIND}\"]({BBOX});relation[\"landuse\"=\"{KIND}\"]({BBOX}););out geom;",
        HEADER = header(timeout_secs),
        KIND = escape_ql_value(kind),
        BBOX = bbox.to_overpass())
}

pub struct OverpassClient {
    client: Client,
    url: String,
    timeout_secs: u64,
}

impl OverpassClient {
    pub fn new(config: &GeotilesConfig) -> Result<OverpassClient> {
        Ok(OverpassClient {
            client: build_http_client(config)?,
            url: config.overpass_url.clone(),
            timeout_secs: config.http_timeout_secs,
        })
    }
}

impl OsmSource for OverpassClient {
    fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    fn query(&self, query: &str) -> Result<OverpassResponse> {
        debug!("Overpass query: {}", query);

        let body = self.client.post(&self.url)
            .form(&[("data", query)])
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(GeotilesError::Http)?;

        let response = OverpassResponse::parse(&body)?;
        info!("Overpass returned {} elements", response.elements.len());
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_elements() {
        let json = r#"{
            "version": 0.6,
            "elements": [
                {"type": "node", "id": 1, "lat": 52.0, "lon": 9.0},
                {"type": "way", "id": 2, "nodes": [1, 3],
                 "geometry": [{"lat": 52.0, "lon": 9.0}, {"lat": 52.1, "lon": 9.1}],
                 "tags": {"highway": "residential", "lanes": "2"}},
                {"type": "relation", "id": 3,
                 "members": [{"type": "way", "ref": 4, "role": "outer",
                              "geometry": [{"lat": 1.0, "lon": 2.0}]}],
                 "tags": {"landuse": "residential"}},
                {"type": "area", "id": 4}
            ]
        }"#;

        let response = OverpassResponse::parse(json).unwrap();
        assert_eq!(4, response.elements.len());

        match &response.elements[1] {
            Element::Way { id, geometry, tags } => {
                assert_eq!(2, *id);
                assert_eq!(2, geometry.len());
                assert_eq!(Some(&"2".to_string()), tags.get("lanes"));
            }
            other => panic!("Unexpected element {:?}", other),
        }
        match &response.elements[2] {
            Element::Relation { members, .. } => {
                assert_eq!("outer", members[0].role);
                assert_eq!(4, members[0].reference);
            }
            other => panic!("Unexpected element {:?}", other),
        }
        assert!(matches!(response.elements[3], Element::Other));
    }

    #[test]
    fn test_queries() {
        let bbox = BoundingBox::new(9.9, 52.1, 10.0, 52.2).unwrap();

        let q = drive_network_query(&bbox, 180);
        assert!(q.starts_with("[out:json][timeout:180];(way[\"highway\"]"));
        assert!(q.contains("[\"highway\"!~\"abandoned|bridleway|"));
        assert!(q.contains("|steps|track\"]"));
        assert!(q.contains("[\"area\"!~\"yes\"][\"access\"!~\"private\"]"));
        assert!(q.contains("[\"service\"!~\"alley|driveway|emergency_access|parking|parking_aisle|private\"]"));
        assert!(q.ends_with("(52.1,9.9,52.2,10););out geom;"));

        let q = landuse_query(&bbox, "residential", 25);
        assert_eq!(
            "[out:json][timeout:25];(way[\"landuse\"=\"residential\"](52.1,9.9,52.2,10);\
relation[\"landuse\"=\"residential\"](52.1,9.9,52.2,10););out geom;",
            q);
    }

    #[test]
    fn test_landuse_query_escapes_kind() {
        let bbox = BoundingBox::new(9.9, 52.1, 10.0, 52.2).unwrap();

        let q = landuse_query(&bbox, "farm\"](x);\\", 25);
        assert!(q.contains("way[\"landuse\"=\"farm\\\"](x);\\\\\"](52.1,9.9,52.2,10);"));
        assert!(q.ends_with(");out geom;"));

        assert_eq!("a\\\\b\\\"c", escape_ql_value("a\\b\"c"));
        assert_eq!("residential", escape_ql_value("residential"));
    }
}
