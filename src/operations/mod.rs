mod average_corner_to_point;
mod color_to_uv;
mod compute_depth;
mod skin_radius;

pub use average_corner_to_point::AverageCornerToPoint;
pub use color_to_uv::ColorToUv;
pub use compute_depth::{ComputeDepth, DEPTH_ATTRIBUTE};
pub use skin_radius::{SkinRadiusToAttribute, RADIUS_ATTRIBUTE};
