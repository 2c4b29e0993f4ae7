//! Distance measures for bruteknn.
//!
//! Only Euclidean distance is supported. The squared form is exposed as the
//! building block; ranking uses the rooted [`l2_distance`].

mod one_to_one;

pub use one_to_one::{l2_distance, squared_l2_distance};
