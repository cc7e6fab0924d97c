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
use geo::{coord, Coord, LineString, Polygon};

use crate::bounds::BoundingBox;
use crate::errors::GeotilesError;

/// Flat top hexagon.  `size` is the radius of the outer circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hexagon {
    pub center: Coord<f64>,
    pub size: f64,
}

impl Hexagon {
    pub fn new(x: f64, y: f64, size: f64) -> Hexagon {
        Hexagon { center: coord! { x: x, y: y }, size }
    }

    pub fn polygon(&self) -> Polygon<f64> {
        let x = self.center.x;
        let y = self.center.y;
        let s = self.size;

        let exterior = LineString::from(vec![
            (x - s / 2.0, y + s),
            (x - s, y),
            (x - s / 2.0, y - s),
            (x + s / 2.0, y - s),
            (x + s, y),
            (x + s / 2.0, y + s),
            (x - s / 2.0, y + s),
        ]);

        Polygon::new(exterior, vec![])
    }

    pub fn bbox(&self) -> BoundingBox {
        BoundingBox {
            left: self.center.x - self.size,
            bottom: self.center.y - self.size,
            right: self.center.x + self.size,
            top: self.center.y + self.size,
        }
    }
}

/// Tiles `bbox` with hexagons row by row, starting in the bottom left corner.
///
/// Consecutive rows are `size` apart and every other row is shifted by half the
/// horizontal spacing so the hexagons interlock.  The first hexagon is always
/// emitted, even when it does not fit.
pub fn distribute_hexagons(bbox: &BoundingBox, size: f64) -> Result<Vec<Hexagon>> {
    if !size.is_finite() || size <= 0.0 {
        return Err(GeotilesError::InvalidHexagonSize(size).into());
    }

    let horizontal_distance = 3.0 * size;
    let vertical_distance = size;

    let mut hexagons = Vec::new();

    let mut x = bbox.left;
    let mut y = bbox.bottom;
    let mut even = true;

    loop {
        hexagons.push(Hexagon::new(x + size, y + size, size));

        x += horizontal_distance;
        if x + size > bbox.right {
            x = if even {
                bbox.left + horizontal_distance / 2.0
            } else {
                bbox.left
            };
            even = !even;
            y += vertical_distance;
            if y + size > bbox.top {
                return Ok(hexagons);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Area;
    use float_cmp::approx_eq;

    #[test]
    fn test_polygon() {
        let hex = Hexagon::new(0.0, 0.0, 2.0);
        let poly = hex.polygon();

        let coords: Vec<(f64, f64)> = poly.exterior().coords().map(|c| (c.x, c.y)).collect();
        assert_eq!(7, coords.len());
        assert_eq!((-1.0, 2.0), coords[0]);
        assert_eq!((-2.0, 0.0), coords[1]);
        assert_eq!((2.0, 0.0), coords[4]);
        assert_eq!(coords[0], coords[6]);

        //Two trapezoids of height 2, bases 4 and 2
        assert!(approx_eq!(f64, 12.0, poly.unsigned_area(), epsilon = 1e-12));
    }

    #[test]
    fn test_bbox() {
        let hex = Hexagon::new(1.0, 2.0, 0.5);
        assert_eq!(BoundingBox { left: 0.5, bottom: 1.5, right: 1.5, top: 2.5 }, hex.bbox());
    }

    #[test]
    fn test_distribute_hexagons_rows() {
        let bbox = BoundingBox::new(0.0, 0.0, 7.0, 3.0).unwrap();
        let hexagons = distribute_hexagons(&bbox, 1.0).unwrap();

        let centers: Vec<(f64, f64)> = hexagons.iter().map(|h| (h.center.x, h.center.y)).collect();

        assert_eq!(vec![
            (1.0, 1.0), (4.0, 1.0), (7.0, 1.0),
            (2.5, 2.0), (5.5, 2.0),
            (1.0, 3.0), (4.0, 3.0), (7.0, 3.0),
        ], centers);
        assert!(hexagons.iter().all(|h| h.size == 1.0));
    }

    #[test]
    fn test_distribute_hexagons_too_small_bbox() {
        let bbox = BoundingBox::new(0.0, 0.0, 0.1, 0.1).unwrap();
        let hexagons = distribute_hexagons(&bbox, 1.0).unwrap();
        assert_eq!(1, hexagons.len());
    }

    #[test]
    fn test_distribute_hexagons_invalid_size() {
        let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0).unwrap();
        assert!(distribute_hexagons(&bbox, 0.0).is_err());
        assert!(distribute_hexagons(&bbox, -1.0).is_err());
        assert!(distribute_hexagons(&bbox, f64::NAN).is_err());
    }
}
