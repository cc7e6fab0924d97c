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

/// Earth radius used when buffering a point into bounds, in meters
pub const EARTH_RADIUS_M: f64 = 6_371_009.0;

/// Meters per degree of latitude
pub const METERS_PER_DEGREE: f64 = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;

pub const NAUTICAL_MILE_KM: f64 = 1.852;

pub const EXT_GEOJSON: &str = "geojson";
pub const EXT_TIF: &str = "tif";

pub const PATH_OUT: &str = "out";
pub const PATH_TMP: &str = "_tmp";

pub const FILE_DEM: &str = "region_dem";
pub const FILE_CONTOURS: &str = "contours";
pub const FILE_TILE: &str = "tile";
pub const FILE_BOUNDS_TOTAL: &str = "bounds_total";
pub const FILE_ELEVATION: &str = "elevation";
pub const INSTALL_MARKER: &str = ".geotiles-installed";

pub const TOOL_CONTOUR: &str = "gdal_contour";
pub const TOOL_DEM: &str = "eio";

//Property names and styles, simplestyle spec
pub const PROP_STROKE: &str = "stroke";
pub const PROP_STROKE_WIDTH: &str = "stroke-width";
pub const STROKE_BOUNDS: &str = "#0000ff";
pub const STROKE_LANDUSE: &str = "#ff0000";
pub const STROKE_CONTOUR: &str = "#00ff00";

pub const ATTR_ELEVATION: &str = "elevation";
pub const ATTR_ELEVATION_MIN: &str = "elevation_min";
pub const ATTR_ELEVATION_MAX: &str = "elevation_max";

/// Edge length of the printed model in model units
pub const DEFAULT_MODEL_SIZE: f64 = 10.0;
