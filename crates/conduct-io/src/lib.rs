use std::io::Write;

use conduct_solver::Simulation;
use encode::{EncodingError, SnapshotEncoder};

pub mod decode;
pub mod encode;
pub mod format;

/// Something that can be written out as a snapshot.
pub trait EncodeField {
    fn encode_field<W: Write>(&self, encoder: &mut SnapshotEncoder<W>) -> Result<(), EncodingError>;
}

impl EncodeField for Simulation {
    fn encode_field<W: Write>(&self, encoder: &mut SnapshotEncoder<W>) -> Result<(), EncodingError> {
        encoder.encode_grid(self.grid(), self.temperature())
    }
}
