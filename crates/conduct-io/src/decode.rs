use std::{fs::File, io::{BufRead, BufReader}, path::Path};

use ndarray::Array2;
use thiserror::Error;

use crate::format::parse_temperature;

/// A temperature field read back from a snapshot file.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// `x` coordinate of each row block.
    pub xs: Vec<f64>,
    /// `y` coordinates, shared by every row block.
    pub ys: Vec<f64>,
    /// Temperatures indexed `(i, j)`, `NaN` where data is missing.
    pub temperature: Array2<f64>,
}

impl Snapshot {
    pub fn open(path: impl AsRef<Path>) -> Result<Snapshot, DecodingError> {
        SnapshotDecoder::new(BufReader::new(File::open(path)?)).decode()
    }

    #[inline]
    pub fn dim(&self) -> (usize, usize) {
        self.temperature.dim()
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            mean: f64::NAN,
            present: 0,
            missing: 0,
        };
        let mut sum = 0.0;

        for &t in self.temperature.iter() {
            if t.is_nan() {
                summary.missing += 1;
            } else {
                summary.min = summary.min.min(t);
                summary.max = summary.max.max(t);
                summary.present += 1;
                sum += t;
            }
        }

        if summary.present > 0 {
            summary.mean = sum / summary.present as f64;
        }

        summary
    }
}

/// Statistics over the nodes of a snapshot that carry data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Nodes with a temperature.
    pub present: usize,
    /// Nodes written as missing data.
    pub missing: usize,
}

pub struct SnapshotDecoder<R: BufRead> {
    reader: R,
    line: usize,
}

impl<R: BufRead> SnapshotDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, line: 0 }
    }

    /// Reads `(y, T)` pairs until a blank line or the end of input. `None` once input is exhausted.
    fn read_block(&mut self) -> Result<Option<(f64, Vec<f64>, Vec<f64>)>, DecodingError> {
        let mut x = None;
        let mut ys = Vec::new();
        let mut ts = Vec::new();
        let mut buf = String::new();

        loop {
            buf.clear();
            if self.reader.read_line(&mut buf)? == 0 {
                break;
            }
            self.line += 1;

            let line = buf.trim();
            if line.is_empty() {
                if x.is_some() {
                    break;
                }
                continue;
            }

            let mut fields = line.split_whitespace();
            let mut next = |name: &'static str| {
                fields.next().ok_or(DecodingError::MissingField { line: self.line, name })
            };
            let (tx, ty, tt) = (next("x")?, next("y")?, next("temperature")?);

            let parse = |token: &str| {
                token.parse::<f64>().map_err(|_| DecodingError::Parse { line: self.line, token: token.to_string() })
            };
            let row_x = parse(tx)?;
            let y = parse(ty)?;
            let t = parse_temperature(tt)
                .ok_or_else(|| DecodingError::Parse { line: self.line, token: tt.to_string() })?;

            let expected = *x.get_or_insert(row_x);
            if expected != row_x {
                return Err(DecodingError::MixedRow { line: self.line, expected, found: row_x });
            }
            ys.push(y);
            ts.push(t);
        }

        Ok(x.map(|x| (x, ys, ts)))
    }

    pub fn decode(mut self) -> Result<Snapshot, DecodingError> {
        let mut xs = Vec::new();
        let mut ys: Option<Vec<f64>> = None;
        let mut values = Vec::new();

        while let Some((x, block_ys, ts)) = self.read_block()? {
            let first = ys.get_or_insert_with(|| block_ys.clone());
            if *first != block_ys {
                return Err(DecodingError::Shape {
                    block: xs.len(),
                    expected: first.len(),
                    found: block_ys.len(),
                });
            }

            xs.push(x);
            values.extend(ts);
        }

        let ys = ys.ok_or(DecodingError::Empty)?;
        let temperature = Array2::from_shape_vec((xs.len(), ys.len()), values)
            .map_err(|_| DecodingError::Empty)?;

        Ok(Snapshot { xs, ys, temperature })
    }
}

#[derive(Debug, Error)]
pub enum DecodingError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("line {line}: cannot parse {token:?}")]
    Parse { line: usize, token: String },
    #[error("line {line}: missing {name} field")]
    MissingField { line: usize, name: &'static str },
    #[error("line {line}: row for x = {expected} contains x = {found}")]
    MixedRow { line: usize, expected: f64, found: f64 },
    #[error("row block {block} has {found} nodes or different y coordinates, expected {expected}")]
    Shape { block: usize, expected: usize, found: usize },
    #[error("snapshot contains no data")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(text: &str) -> Result<Snapshot, DecodingError> {
        SnapshotDecoder::new(text.as_bytes()).decode()
    }

    #[test]
    fn reads_row_blocks() {
        let snapshot = decode("0\t0\tnan\n0\t0.5\t55\n\n1\t0\t45\n1\t0.5\t15\n\n").unwrap();

        assert_eq!(snapshot.xs, vec![0.0, 1.0]);
        assert_eq!(snapshot.ys, vec![0.0, 0.5]);
        assert_eq!(snapshot.dim(), (2, 2));
        assert!(snapshot.temperature[(0, 0)].is_nan());
        assert_eq!(snapshot.temperature[(1, 1)], 15.0);
    }

    #[test]
    fn summary_skips_missing_nodes() {
        let summary = decode("0 0 nan\n0 1 50\n\n1 0 20\n1 1 30\n").unwrap().summary();

        assert_eq!(summary, Summary { min: 20.0, max: 50.0, mean: 100.0 / 3.0, present: 3, missing: 1 });
    }

    #[test]
    fn ragged_blocks_are_rejected() {
        let err = decode("0 0 1\n0 1 1\n\n1 0 1\n\n").unwrap_err();
        assert!(matches!(err, DecodingError::Shape { block: 1, expected: 2, found: 1 }));
    }

    #[test]
    fn malformed_lines_report_their_position() {
        assert!(matches!(decode("0 0 1\n0 1\n"), Err(DecodingError::MissingField { line: 2, name: "temperature" })));
        assert!(matches!(decode("0 0 1\n0 1 hot\n"), Err(DecodingError::Parse { line: 2, .. })));
        assert!(matches!(decode("0 0 1\n1 1 1\n"), Err(DecodingError::MixedRow { line: 2, .. })));
        assert!(matches!(decode("\n\n"), Err(DecodingError::Empty)));
    }
}
