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
use anyhow::{Context, Result};
use log::{debug, info};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::bounds::LatLon;
use crate::config::GeotilesConfig;
use crate::errors::GeotilesError;
use crate::osm::{build_http_client, Geocoder};

#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

/// Geocoder backed by the Nominatim search API
pub struct NominatimGeocoder {
    client: Client,
    url: String,
}

impl NominatimGeocoder {
    pub fn new(config: &GeotilesConfig) -> Result<NominatimGeocoder> {
        Ok(NominatimGeocoder {
            client: build_http_client(config)?,
            url: config.nominatim_url.clone(),
        })
    }
}

/// First hit of a Nominatim `format=json` response
pub fn parse_search_results(query: &str, json: &str) -> Result<LatLon> {
    let results: Vec<SearchResult> = serde_json::from_str(json)
        .context("Parsing Nominatim response")?;

    let first = results.into_iter().next()
        .ok_or_else(|| GeotilesError::LocationNotFound(query.to_string()))?;

    debug!("Geocoded '{}' to '{}'", query, first.display_name);

    Ok(LatLon::new(
        first.lat.parse::<f64>().with_context(|| format!("Bad latitude '{}'", first.lat))?,
        first.lon.parse::<f64>().with_context(|| format!("Bad longitude '{}'", first.lon))?,
    ))
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, query: &str) -> Result<LatLon> {
        info!("Get location of \"{}\"", query);

        let body = self.client.get(&self.url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(GeotilesError::Http)?;

        let location = parse_search_results(query, &body)?;
        info!("Location of \"{}\": {:?}", query, location);
        Ok(location)
    }
}
