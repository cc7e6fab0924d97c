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
//! Vector building blocks for printable terrain tiles.
//!
//! Coordinates are EPSG:4326 degrees throughout, GeoJSON positions are `[lon, lat]`.

pub mod bounds;
pub mod config;
pub mod constants;
pub mod elevation;
pub mod errors;
pub mod hexagon;
pub mod osm;
pub mod relief;
pub mod tile_document;
pub mod tools;
pub mod util;
pub mod workspace;

pub use errors::GeotilesError;
