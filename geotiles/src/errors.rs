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
use std::path::PathBuf;

use thiserror::Error;


#[derive(Debug, Error)]
pub enum GeotilesError {
    #[error("Tool '{program}' exited with status {status}")]
    ToolFailed {
        program: String,
        status: String,
    },
    #[error("Tools missing on PATH: {}", .0.join(", "))]
    MissingTools(Vec<String>),
    #[error("No location found for query '{0}'")]
    LocationNotFound(String),
    #[error("Hexagon size must be a positive finite number, got {0}")]
    InvalidHexagonSize(f64),
    #[error(
        "Invalid bounds left {left} bottom {bottom} right {right} top {top}"
    )]
    InvalidBounds {
        left: f64,
        bottom: f64,
        right: f64,
        top: f64,
    },
    #[error("Unexpected geometry type '{found}' in {context}")]
    UnexpectedGeometry {
        found: String,
        context: &'static str,
    },
    #[error("Expected a FeatureCollection in {0:?}")]
    NotAFeatureCollection(PathBuf),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
