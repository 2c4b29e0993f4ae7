//! Data format types for bruteknn.
//!
//! In-memory datasets and the `.fvecs` file format used to supply them.

mod dataset;
pub mod fvecs;

pub use dataset::DenseDataset;
pub use fvecs::{read_fvecs, read_fvecs_from, write_fvecs, write_fvecs_to};
