//! Flat text persistence for tracks.
//!
//! The format is a point count on the first line, then one line per control
//! point carrying six space-separated floats:
//!
//! ```text
//! 4
//! 50 5 0 0 1 0
//! 0 5 50 0 1 0
//! -50 5 0 0 1 0
//! 0 5 -50 0 1 0
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use coaster_core::error::{CoasterError, Result};
use coaster_core::traits::Validate;
use coaster_math::{Point3, Vector3};

use crate::point::ControlPoint;
use crate::track::Track;

/// Read a track from a flat point-list file.
///
/// The loaded track is validated before it is returned, so a file that parses
/// but describes a degenerate track (zero orientation hints, non-finite
/// coordinates, fewer than 2 points) is rejected as well.
pub fn read_track<P: AsRef<Path>>(path: P) -> Result<Track> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let count_line = lines
        .next()
        .ok_or_else(|| CoasterError::Parse("empty track file".into()))??;
    let count: usize = count_line.trim().parse().map_err(|_| {
        CoasterError::Parse(format!("bad point count '{}'", count_line.trim()))
    })?;
    if count < 2 {
        return Err(CoasterError::Parse(format!(
            "track file declares {} control points, need at least 2",
            count
        )));
    }

    // The declared count is unchecked input; cap the preallocation and let a
    // short file fail on the missing lines instead.
    let mut points = Vec::with_capacity(count.min(1024));
    for index in 0..count {
        let line = lines.next().ok_or_else(|| {
            CoasterError::Parse(format!(
                "track file ends after {} of {} points",
                index, count
            ))
        })??;
        points.push(parse_point(&line, index)?);
    }

    let track = Track::new(points);
    track.validate()?;
    log::debug!("loaded {} control points from {}", track.len(), path.display());
    Ok(track)
}

/// Write a track as a flat point-list file.
pub fn write_track<P: AsRef<Path>>(path: P, track: &Track) -> Result<()> {
    let path = path.as_ref();
    let mut file = File::create(path)?;
    writeln!(file, "{}", track.len())?;
    for point in &track.points {
        let p = point.position;
        let o = point.orientation;
        writeln!(file, "{} {} {} {} {} {}", p.x, p.y, p.z, o.x, o.y, o.z)?;
    }
    log::debug!("wrote {} control points to {}", track.len(), path.display());
    Ok(())
}

fn parse_point(line: &str, index: usize) -> Result<ControlPoint> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 6 {
        return Err(CoasterError::Parse(format!(
            "point {}: expected 6 values, found {}",
            index,
            fields.len()
        )));
    }
    let mut values = [0.0f64; 6];
    for (value, field) in values.iter_mut().zip(&fields) {
        *value = field.parse().map_err(|_| {
            CoasterError::Parse(format!("point {}: bad number '{}'", index, field))
        })?;
    }
    Ok(ControlPoint::with_orientation(
        Point3::new(values[0], values[1], values[2]),
        Vector3::new(values[3], values[4], values[5]),
    ))
}
