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
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::info;

pub fn format_duration(d: Duration) -> String {
    let mut secs = d.as_secs();
    let hours = secs / 3600;
    secs = secs % 3600;
    let minutes = secs / 60;
    secs = secs % 60;

    let ms = d.as_millis() % 1000;

    format!("{}h {}m {}s {}ms", hours, minutes, secs, ms )
}

/// Remaining and total time, extrapolated from the time spent on `num_processed` items
pub fn estimate_times(elapsed: Duration, num_processed: usize, num_total: usize) -> (Duration, Duration) {
    let secs_per_result = elapsed.as_secs_f64() / num_processed.max(1) as f64;
    let scaled = |n: usize| Duration::try_from_secs_f64(secs_per_result * n as f64)
        .unwrap_or(Duration::MAX);

    (scaled(num_total.saturating_sub(num_processed)), scaled(num_total))
}

pub fn log_remaining_time(now: &Instant, num_processed: usize, num_total: usize) {
    let d = now.elapsed();
    let (est_remaining_time, est_total_time) = estimate_times(d, num_processed, num_total);
    info!("Through {} of {}. Elapsed: {} Est. Remaining: {} Est total time: {}",
             num_processed, num_total,
             format_duration(d),
             format_duration(est_remaining_time),
             format_duration(est_total_time) );
}

/// Throttles progress output so long loops report at most every `interval`
pub struct ProgressLog {
    start: Instant,
    last_output: Instant,
    interval: Duration,
    num_total: usize,
}

impl ProgressLog {
    pub fn new(num_total: usize) -> Self {
        ProgressLog {
            start: Instant::now(),
            last_output: Instant::now(),
            interval: Duration::from_secs(3),
            num_total,
        }
    }

    pub fn tick(&mut self, num_processed: usize) {
        if self.last_output.elapsed() >= self.interval {
            self.last_output = Instant::now();
            log_remaining_time(&self.start, num_processed, self.num_total);
        }
    }
}

pub fn get_sub_dir<D, S>(directory_name: D, sub_dir: S) -> PathBuf
    where D: AsRef<Path>, S: AsRef<str> + AsRef<Path>
{
    let mut d = directory_name.as_ref().to_path_buf();
    d.push(sub_dir);
    d
}

pub fn file_with_ext<D: AsRef<Path>>(directory_name: D, stem: &str, ext: &str) -> PathBuf {
    get_sub_dir(directory_name, format!("{}.{}", stem, ext))
}

/// Formats a coordinate for tool arguments without losing precision
pub fn format_coord(v: f64) -> String {
    format!("{}", v)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        let d = Duration::from_millis(3_723_045);
        assert_eq!("1h 2m 3s 45ms", format_duration(d));
        assert_eq!("0h 0m 0s 0ms", format_duration(Duration::from_secs(0)));
    }

    #[test]
    fn test_estimate_times() {
        let (remaining, total) = estimate_times(Duration::from_secs(10), 5, 20);
        assert_eq!(Duration::from_secs(30), remaining);
        assert_eq!(Duration::from_secs(40), total);

        //Nothing processed yet counts the elapsed time as one item
        let (remaining, total) = estimate_times(Duration::from_secs(3), 0, 2);
        assert_eq!(Duration::from_secs(6), remaining);
        assert_eq!(Duration::from_secs(6), total);

        //Counts beyond u32 are not truncated
        let num_total = u32::MAX as usize + 11;
        let (remaining, total) = estimate_times(Duration::from_secs(10), 5, num_total);
        assert_eq!(Duration::from_secs(2 * (num_total as u64 - 5)), remaining);
        assert_eq!(Duration::from_secs(2 * num_total as u64), total);
    }

    #[test]
    fn test_file_with_ext() {
        let p = file_with_ext("out", "tile", "geojson");
        assert_eq!(Path::new("out").join("tile.geojson"), p);
    }

    #[test]
    fn test_format_coord() {
        assert_eq!("12.35", format_coord(12.35));
        assert_eq!("-0.5", format_coord(-0.5));
        assert_eq!("42", format_coord(42.0));
    }
}
