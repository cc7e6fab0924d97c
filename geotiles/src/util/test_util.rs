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
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Result;

use crate::errors::GeotilesError;
use crate::tools::ToolRunner;

/// Records invocations instead of running anything.  Programs registered with
/// `with_output` write their canned content to the output argument, which is the
/// value after `-o` or else the last argument.
#[derive(Default)]
pub struct FakeToolRunner {
    pub calls: RefCell<Vec<(String, Vec<String>)>>,
    outputs: HashMap<String, String>,
    failing: Option<String>,
}

impl FakeToolRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, program: &str, content: &str) -> Self {
        self.outputs.insert(program.to_string(), content.to_string());
        self
    }

    pub fn failing(mut self, program: &str) -> Self {
        self.failing = Some(program.to_string());
        self
    }

    pub fn programs(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(p, _)| p.clone()).collect()
    }

    pub fn args_of(&self, idx: usize) -> Vec<String> {
        self.calls.borrow()[idx].1.clone()
    }
}

fn output_arg(args: &[String]) -> Option<PathBuf> {
    if let Some(pos) = args.iter().position(|a| a == "-o") {
        return args.get(pos + 1).map(PathBuf::from);
    }
    args.last().map(PathBuf::from)
}

impl ToolRunner for FakeToolRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<()> {
        self.calls.borrow_mut().push((program.to_string(), args.to_vec()));

        if self.failing.as_deref() == Some(program) {
            return Err(GeotilesError::ToolFailed {
                program: program.to_string(),
                status: "exit status: 1".to_string(),
            }.into());
        }

        if let (Some(content), Some(path)) = (self.outputs.get(program), output_arg(args)) {
            fs::write(path, content)?;
        }

        Ok(())
    }
}

pub const CONTOUR_LINES_GEOJSON: &str = r#"{
  "type": "FeatureCollection",
  "name": "contours",
  "features": [
    { "type": "Feature", "properties": { "ID": 0, "elevation": 35.0 },
      "geometry": { "type": "LineString", "coordinates": [ [12.4, 41.85], [12.41, 41.86] ] } },
    { "type": "Feature", "properties": { "ID": 1, "elevation": 40.0 },
      "geometry": { "type": "LineString", "coordinates": [ [12.42, 41.87], [12.43, 41.88] ] } }
  ]
}"#;

pub const CONTOUR_POLYGONS_GEOJSON: &str = r#"{
  "type": "FeatureCollection",
  "name": "contours",
  "features": [
    { "type": "Feature", "properties": { "ID": 0, "elevation_min": 0.0, "elevation_max": 10.0 },
      "geometry": { "type": "MultiPolygon", "coordinates": [ [ [ [12.0, 41.0], [12.5, 41.0], [12.5, 41.5], [12.0, 41.0] ] ] ] } },
    { "type": "Feature", "properties": { "ID": 1, "elevation_min": 10.0, "elevation_max": 20.0 },
      "geometry": { "type": "MultiPolygon", "coordinates": [
        [ [ [12.1, 41.1], [12.2, 41.1], [12.2, 41.2], [12.1, 41.1] ] ],
        [ [ [12.3, 41.3], [12.4, 41.3], [12.4, 41.4] ] ]
      ] } },
    { "type": "Feature", "properties": { "ID": 2, "elevation_min": 0.0, "elevation_max": 10.0 },
      "geometry": { "type": "LineString", "coordinates": [ [12.0, 41.0], [12.1, 41.1] ] } },
    { "type": "Feature", "properties": { "name": "Bounds" },
      "geometry": { "type": "LineString", "coordinates": [ [12.0, 41.0], [13.0, 42.0] ] } }
  ]
}"#;
