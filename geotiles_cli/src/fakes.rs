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
use anyhow::Result;

use geotiles::bounds::LatLon;
use geotiles::osm::{Geocoder, OsmSource, OverpassResponse};

pub struct FakeGeocoder(pub LatLon);

impl Geocoder for FakeGeocoder {
    fn geocode(&self, _query: &str) -> Result<LatLon> {
        Ok(self.0)
    }
}

/// Answers street queries and landuse queries with fixed responses
pub struct FakeOsm {
    pub streets: &'static str,
    pub landuse: &'static str,
}

impl OsmSource for FakeOsm {
    fn timeout_secs(&self) -> u64 {
        10
    }

    fn query(&self, query: &str) -> Result<OverpassResponse> {
        if query.contains("landuse") {
            OverpassResponse::parse(self.landuse)
        } else {
            OverpassResponse::parse(self.streets)
        }
    }
}

pub const STREETS: &str = r#"{"elements": [
    {"type": "way", "id": 1, "tags": {"highway": "primary", "lanes": "2"},
     "geometry": [{"lat": 52.20, "lon": 9.94}, {"lat": 52.21, "lon": 9.95}]}
]}"#;

pub const LANDUSE: &str = r#"{"elements": [
    {"type": "way", "id": 2, "tags": {"landuse": "residential"},
     "geometry": [{"lat": 52.20, "lon": 9.94}, {"lat": 52.20, "lon": 9.95},
                  {"lat": 52.21, "lon": 9.95}, {"lat": 52.20, "lon": 9.94}]}
]}"#;
