pub mod contour;
pub mod nearest_index;

pub use contour::Contour;
pub use nearest_index::NearestPointIndex;
