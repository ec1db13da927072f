//! Plain text formats for point lists and energy series.
//!
//! A point list has one `[x,y]` pair per line. Files where the whole list is wrapped in an extra pair of brackets,
//! `[[x,y],` on the first line and `[x,y]]` on the last, read the same.
//! An energy series is written as `iteration,"value",` lines.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::{
    error::{LloydError, Result},
    Point,
};

/// Writes `points`, one `[x,y]` per line.
pub fn write_point_list<W: Write>(writer: &mut W, points: &[Point]) -> Result<()> {
    for p in points {
        writeln!(writer, "[{},{}]", p.x, p.y)?;
    }

    writer.flush()?;
    Ok(())
}

fn parse_pair(line: &str) -> std::result::Result<Point, String> {
    let mut body = line.trim().trim_end_matches(',');
    if body.starts_with("[[") {
        body = &body[1..];
    }
    if body.ends_with("]]") {
        body = &body[..body.len() - 1];
    }

    let inner = body
        .strip_prefix('[')
        .and_then(|b| b.strip_suffix(']'))
        .ok_or_else(|| format!("expected [x,y], got {:?}", line))?;

    let mut coordinates = inner.split(',').map(|c| c.trim().parse::<f64>());
    match (coordinates.next(), coordinates.next(), coordinates.next()) {
        (Some(Ok(x)), Some(Ok(y)), None) if x.is_finite() && y.is_finite() => Ok(Point { x, y }),
        _ => Err(format!("expected two finite numbers, got {:?}", inner)),
    }
}

/// Reads a point list written by [write_point_list].
///
/// Lines not starting with `[` are ignored. A line starting with `[` that is not a pair of finite numbers is an error.
pub fn read_point_list<R: BufRead>(reader: R) -> Result<Vec<Point>> {
    let mut points = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if !line.trim_start().starts_with('[') {
            if !line.trim().is_empty() {
                debug!("Ignoring line {} of point list: {:?}", i + 1, line);
            }
            continue;
        }

        let point = parse_pair(&line).map_err(|message| LloydError::Parse { line: i + 1, message })?;
        points.push(point);
    }

    Ok(points)
}

/// Writes `series` as `iteration,"value",` lines.
///
/// The first entry is the energy before any relaxation, so iterations are numbered from 1 and that entry is not written.
pub fn write_energy_csv<W: Write>(writer: &mut W, series: &[f64]) -> Result<()> {
    for (i, value) in series.iter().enumerate().skip(1) {
        writeln!(writer, "{},\"{}\",", i, value)?;
    }

    writer.flush()?;
    Ok(())
}
