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
use geo::{coord, LineString, Polygon, Rect};
use serde::{Deserialize, Serialize};

use crate::constants::{EARTH_RADIUS_M, NAUTICAL_MILE_KM};
use crate::errors::GeotilesError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        LatLon { lat, lon }
    }
}

/// Axis aligned bounds in degrees, (left, bottom, right, top)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

/// One minute of latitude is one nautical mile
pub fn km_to_degrees(km: f64) -> f64 {
    km / NAUTICAL_MILE_KM / 60.0
}

impl BoundingBox {
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Result<BoundingBox> {
        let all_finite = [left, bottom, right, top].iter().all(|v| v.is_finite());
        if !all_finite || left > right || bottom > top {
            return Err(GeotilesError::InvalidBounds { left, bottom, right, top }.into());
        }
        Ok(BoundingBox { left, bottom, right, top })
    }

    /// Square of `size` degrees around `center`.
    ///
    /// In the Mercator projection the latitude extent is shrunk by cos(lat) so
    /// the result looks square on a web map.
    pub fn square_around(center: LatLon, size: f64) -> Result<BoundingBox> {
        let lat_multiplier = center.lat.to_radians().cos();
        let half = size / 2.0;

        BoundingBox::new(
            center.lon - half,
            center.lat - half * lat_multiplier,
            center.lon + half,
            center.lat + half * lat_multiplier,
        )
    }

    /// Bounds extending `dist` meters north, south, east and west of `center`
    pub fn from_point(center: LatLon, dist: f64) -> Result<BoundingBox> {
        let delta_lat = (dist / EARTH_RADIUS_M).to_degrees();
        let delta_lon = delta_lat / center.lat.to_radians().cos();

        BoundingBox::new(
            center.lon - delta_lon,
            center.lat - delta_lat,
            center.lon + delta_lon,
            center.lat + delta_lat,
        )
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn center(&self) -> LatLon {
        LatLon::new((self.bottom + self.top) / 2.0, (self.left + self.right) / 2.0)
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.left, self.bottom, self.right, self.top]
    }

    /// Closed ring starting at the north east corner, running clockwise
    pub fn ring(&self) -> LineString<f64> {
        LineString::from(vec![
            (self.right, self.top),
            (self.right, self.bottom),
            (self.left, self.bottom),
            (self.left, self.top),
            (self.right, self.top),
        ])
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.left, y: self.bottom },
            coord! { x: self.right, y: self.top },
        )
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        self.to_rect().to_polygon()
    }

    /// Overpass order, (south, west, north, east)
    pub fn to_overpass(&self) -> String {
        format!("{},{},{},{}", self.bottom, self.left, self.top, self.right)
    }
}
