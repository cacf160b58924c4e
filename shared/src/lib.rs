pub mod colors;
pub mod emotion;
pub mod feature;
pub mod region;

pub use colors::{emotion_color, rgb_css, rgba_css};
pub use emotion::EmotionVector;
pub use feature::*;
pub use region::*;
