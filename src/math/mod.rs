mod color;

pub use color::{hsv_to_argb, lerp_argb};
