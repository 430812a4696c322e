//! Plain text point files. The first whitespace separated token of the file is the ambient
//! dimension, followed by the coordinates of each point in turn. Line breaks carry no meaning,
//! though `write_points` puts one point on each line.
//!
//! The dimension in the file is read but not enforced: points are always parsed with the
//! dimension of the requested point type, and a mismatch is only logged.

use crate::Result;
use crate::na::Point;
use itertools::Itertools;
use log::{debug, error, warn};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

/// Load points from a text point file.
///
/// Reading stops at the end of the file, at the first token which isn't a number, or once
/// `only_first_n` points have been read, whichever comes first. A trailing point with too few
/// coordinates is discarded, and a read error or bytes which aren't valid text end reading the same
/// way a bad token does. The only failure is a file which can't be opened.
///
/// # Arguments
///
/// * `path`: the file to read
/// * `only_first_n`: if set, the maximum number of points to read
///
/// returns: Result<Vec<OPoint<f64, Const<{ D }>>, Global>, Box<dyn Error, Global>>
pub fn load_points_from_file<const D: usize>(
    path: &Path,
    only_first_n: Option<usize>,
) -> Result<Vec<Point<f64, D>>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            error!("Could not open '{}': {}", path.display(), e);
            return Err(e.into());
        }
    };

    let points = read_points(BufReader::new(file), only_first_n)?;
    debug!("'{}' loaded, {} points", path.display(), points.len());
    Ok(points)
}

/// Read points in the text point format from any buffered reader. See `load_points_from_file`
/// for the rules on where reading stops; this never fails, the `Result` is kept for symmetry with
/// the file loader.
pub fn read_points<R: BufRead, const D: usize>(
    reader: R,
    only_first_n: Option<usize>,
) -> Result<Vec<Point<f64, D>>> {
    let mut tokens = Tokens::new(reader);

    let mut points = Vec::new();
    let Some(dim_token) = tokens.next() else {
        return Ok(points);
    };

    match dim_token.parse::<usize>() {
        Ok(dim) if dim != D => {
            warn!("File declares dimension {}, reading points with dimension {}", dim, D)
        }
        Ok(_) => {}
        Err(_) => {
            warn!("Expected a dimension at the start of the file, found '{}'", dim_token);
            return Ok(points);
        }
    }

    let limit = only_first_n.unwrap_or(usize::MAX);
    'points: while points.len() < limit {
        let mut coords = [0.0; D];
        for (k, slot) in coords.iter_mut().enumerate() {
            let Some(token) = tokens.next() else {
                if k > 0 {
                    warn!("Discarding a trailing point with only {} of {} coordinates", k, D);
                }
                break 'points;
            };

            match token.parse::<f64>() {
                Ok(value) => *slot = value,
                Err(_) => {
                    warn!(
                        "Stopped reading at '{}' after {} points, it is not a number",
                        token,
                        points.len()
                    );
                    break 'points;
                }
            }
        }
        points.push(Point::from(coords));
    }

    Ok(points)
}

/// Whitespace separated tokens pulled from a reader on demand, so that only as much of the input
/// is read as the points asked for need. Ends at the end of the input, on a read error, or at a
/// token which isn't valid UTF-8.
struct Tokens<R> {
    reader: R,
    buffer: Vec<u8>,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
        }
    }

    /// Fill the buffer with the next token's bytes, returning false when there is no token left.
    fn fill(&mut self) -> bool {
        self.buffer.clear();
        loop {
            let available = match self.reader.fill_buf() {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!("Stopped reading points after a read error: {}", e);
                    return false;
                }
            };
            if available.is_empty() {
                return !self.buffer.is_empty();
            }

            let mut used = 0;
            let mut finished = false;
            for &b in available {
                used += 1;
                if b.is_ascii_whitespace() {
                    if !self.buffer.is_empty() {
                        finished = true;
                        break;
                    }
                } else {
                    self.buffer.push(b);
                }
            }
            self.reader.consume(used);

            if finished {
                return true;
            }
        }
    }
}

impl<R: BufRead> Iterator for Tokens<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if !self.fill() {
            return None;
        }

        match std::str::from_utf8(&self.buffer) {
            Ok(token) => Some(token.to_string()),
            Err(_) => {
                warn!("Stopped reading at a token which isn't valid text");
                None
            }
        }
    }
}

/// Write points in the text point format to any writer, with the dimension on the first line and
/// then one point per line.
pub fn write_points<W: Write, const D: usize>(
    mut writer: W,
    points: &[Point<f64, D>],
) -> Result<()> {
    writeln!(writer, "{}", D)?;
    for p in points {
        writeln!(writer, "{}", p.iter().join(" "))?;
    }
    Ok(())
}

/// Write points to a text point file, replacing the file if it exists.
pub fn write_points_to_file<const D: usize>(path: &Path, points: &[Point<f64, D>]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_points(&mut writer, points)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point2, Point3};
    use std::io::Cursor;

    fn read3(text: &str, only_first_n: Option<usize>) -> Vec<Point3> {
        read_points(Cursor::new(text), only_first_n).unwrap()
    }

    #[test]
    fn reads_points_ignoring_line_breaks() {
        let points = read3("3\n0 0 0\n1 2\n3 -4.5 5e-1 6 7\n", None);
        assert_eq!(
            points,
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 2.0, 3.0),
                Point3::new(-4.5, 0.5, 6.0)
            ]
        );
    }

    #[test]
    fn stops_after_requested_count() {
        let points = read3("3 1 1 1 2 2 2 3 3 3", Some(2));
        assert_eq!(points.len(), 2);
        assert_eq!(points[1], Point3::new(2.0, 2.0, 2.0));
        assert!(read3("3 1 1 1", Some(0)).is_empty());
    }

    #[test]
    fn stops_at_bad_token() {
        let points = read3("3 1 1 1 2 two 2 3 3 3", None);
        assert_eq!(points, vec![Point3::new(1.0, 1.0, 1.0)]);
    }

    #[test]
    fn invalid_text_ends_reading() {
        let _ = env_logger::builder().is_test(true).try_init();
        let bytes: &[u8] = b"2 1 2 3 4 \xff\xfe";
        let points: Vec<Point2> = read_points(Cursor::new(bytes), None).unwrap();
        assert_eq!(points, vec![Point2::new(1.0, 2.0), Point2::new(3.0, 4.0)]);

        let bytes: &[u8] = b"2 1 2 3\xff 4 5 6";
        let points: Vec<Point2> = read_points(Cursor::new(bytes), None).unwrap();
        assert_eq!(points, vec![Point2::new(1.0, 2.0)]);
    }

    #[test]
    fn reading_stops_early_without_consuming_the_rest() {
        let mut input = Cursor::new("2 1 2 3 4 5 6");
        let points: Vec<Point2> = read_points(&mut input, Some(1)).unwrap();
        assert_eq!(points, vec![Point2::new(1.0, 2.0)]);
        assert!(input.position() < 8);
    }

    #[test]
    fn empty_or_headless_input_has_no_points() {
        assert!(read3("", None).is_empty());
        assert!(read3("   \n", None).is_empty());
        assert!(read3("x 1 2 3", None).is_empty());
    }

    #[test]
    fn dimension_mismatch_is_not_enforced() {
        let points: Vec<Point2> = read_points(Cursor::new("3 1 2 3 4"), None).unwrap();
        assert_eq!(points, vec![Point2::new(1.0, 2.0), Point2::new(3.0, 4.0)]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let _ = env_logger::builder().is_test(true).try_init();
        let path = std::env::temp_dir().join("pointsparse_does_not_exist.txt");
        let result = load_points_from_file::<3>(&path, None);
        assert!(result.is_err());
    }

    #[test]
    fn write_then_load_file() -> Result<()> {
        let points = vec![
            Point3::new(0.1, -2.0, 3.25),
            Point3::new(1e-9, 4.0, -0.333),
            Point3::new(7.0, 8.0, 9.0),
        ];
        let path = std::env::temp_dir().join(format!("pointsparse_{}.txt", std::process::id()));
        write_points_to_file(&path, &points)?;

        let loaded = load_points_from_file::<3>(&path, None)?;
        let first = load_points_from_file::<3>(&path, Some(1))?;
        std::fs::remove_file(&path)?;

        assert_eq!(loaded, points);
        assert_eq!(first, points[..1].to_vec());
        Ok(())
    }

    #[test]
    fn written_format() -> Result<()> {
        let mut buffer = Vec::new();
        write_points(&mut buffer, &[Point2::new(1.5, -2.0), Point2::new(0.0, 3.0)])?;
        assert_eq!(String::from_utf8(buffer)?, "2\n1.5 -2\n0 3\n");
        Ok(())
    }
}
