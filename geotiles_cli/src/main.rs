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

use anyhow::Result;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use structopt::StructOpt;

use geotiles::config::GeotilesConfig;

use crate::cmd_clean::{clean, CleanArgs};
use crate::cmd_elevation::{create_elevation, ElevationArgs};
use crate::cmd_hex_grid::{create_hex_grid, HexGridArgs};
use crate::cmd_install::{install, InstallArgs};
use crate::cmd_relief::{create_relief, ReliefArgs};
use crate::cmd_tile::{create_tile, TileArgs};

mod cmd_clean;
mod cmd_elevation;
mod cmd_hex_grid;
mod cmd_install;
mod cmd_relief;
mod cmd_tile;

#[cfg(test)]
mod fakes;

#[derive(StructOpt)]
struct Cli {

    #[structopt(long, default_value = "Warn")]
    log_level: LevelFilter,

    #[structopt(long, parse(from_os_str), help = "TOML file overriding service URLs, tool names and directories")]
    config: Option<PathBuf>,

    #[structopt(subcommand)]
    cmd: Command
}

#[derive(StructOpt)]
enum Command {
    #[structopt(help="Creates a square tile with bounds, streets, landuse and contour lines around a location")]
    Tile(TileArgs),

    #[structopt(help="Covers the area around a location with a hexagon grid")]
    HexGrid(HexGridArgs),

    #[structopt(help="Creates elevation polygons for a bounding box")]
    Elevation(ElevationArgs),

    #[structopt(help="Converts elevation polygons into a layered relief model")]
    Relief(ReliefArgs),

    #[structopt(help="Checks external tools and prepares the output directories")]
    Install(InstallArgs),

    #[structopt(help="Removes the out and _tmp directories")]
    Clean(CleanArgs),
}

fn run() -> Result<()> {
    let args = Cli::from_args();

    SimpleLogger::new().with_level(args.log_level).init()?;

    let config = GeotilesConfig::read_optional(args.config.as_deref())?;

    match &args.cmd {
        Command::Tile(r) => {
            create_tile(r, &config)?;
        }
        Command::HexGrid(r) => {
            create_hex_grid(r, &config)?;
        }
        Command::Elevation(r) => {
            create_elevation(r, &config)?;
        }
        Command::Relief(r) => {
            create_relief(r)?;
        }
        Command::Install(r) => {
            install(r, &config)?;
        }
        Command::Clean(r) => {
            clean(r, &config)?;
        }
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}
