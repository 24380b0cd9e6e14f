use std::{fs::File, io::{BufWriter, Write}, path::{Path, PathBuf}};

use ndarray::Array2;
use thiserror::Error;
use tracing::info;

use conduct_solver::{grid::GridParams, Simulation, StepObserver};

use crate::{format::{Coordinate, Temperature}, EncodeField};

/// Writes the snapshot of a run to a single text file.
///
/// The file is created up front so that an unwritable path fails before the run starts.
pub struct SnapshotWriter {
    path: PathBuf,
    encoder: SnapshotEncoder<File>,
    written: bool,
}

impl SnapshotWriter {
    pub fn new(path: impl Into<PathBuf>) -> Result<SnapshotWriter, EncodingError> {
        let path = path.into();
        let file = File::create(&path)?;

        Ok(Self {
            path,
            encoder: SnapshotEncoder::new(file),
            written: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the snapshot has been written.
    pub fn is_written(&self) -> bool {
        self.written
    }

    pub fn encode_snapshot<F: EncodeField>(&mut self, field: &F) -> Result<(), EncodingError> {
        if self.written {
            return Err(EncodingError::AlreadyWritten(self.path.clone()));
        }

        field.encode_field(&mut self.encoder)?;
        self.encoder.flush()?;
        self.written = true;

        info!(path = %self.path.display(), "wrote snapshot");

        Ok(())
    }
}

impl StepObserver for SnapshotWriter {
    type Error = EncodingError;

    fn snapshot(&mut self, sim: &Simulation) -> Result<(), EncodingError> {
        self.encode_snapshot(sim)
    }
}

/// Serializes a temperature field as `x<TAB>y<TAB>T` lines, one blank line after each `x` row.
pub struct SnapshotEncoder<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> SnapshotEncoder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer: BufWriter::new(writer) }
    }

    pub fn encode_grid(&mut self, grid: &GridParams, temperature: &Array2<f64>) -> Result<(), EncodingError> {
        let expected = grid.shape();
        if temperature.dim() != expected {
            return Err(EncodingError::Shape { expected, found: temperature.dim() });
        }

        for (i, row) in temperature.outer_iter().enumerate() {
            let x = Coordinate::new(grid.position(i, 0).x, grid.spacing);
            self.encode_row(x, row.iter().enumerate().map(|(j, &t)| {
                (Coordinate::new(grid.position(i, j).y, grid.spacing), Temperature(t))
            }))?;
        }

        Ok(())
    }

    pub fn encode_row<I>(&mut self, x: Coordinate, values: I) -> Result<(), EncodingError>
    where
        I: Iterator<Item = (Coordinate, Temperature)>,
    {
        for (y, t) in values {
            writeln!(self.writer, "{x}\t{y}\t{t}")?;
        }
        writeln!(self.writer)?;

        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), EncodingError> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W, EncodingError> {
        self.writer.into_inner().map_err(|e| EncodingError::Io(e.into_error()))
    }
}

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("field has shape {found:?}, grid expects {expected:?}")]
    Shape { expected: (usize, usize), found: (usize, usize) },
    #[error("snapshot {0:?} was already written")]
    AlreadyWritten(PathBuf),
}
