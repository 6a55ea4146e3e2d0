pub mod orientation;
pub mod tracker;

pub use orientation::{
    RotationMatrix, corrected_azimuth_degrees, orientation_from_matrix,
    rotation_matrix_from_vector, rotation_vector_for_azimuth,
};
pub use tracker::{HeadingEvent, HeadingTracker};
