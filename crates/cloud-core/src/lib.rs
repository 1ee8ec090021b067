pub mod cloud;
pub mod constants;
pub mod error;
pub mod gesture;
pub mod governor;
pub mod input;
pub mod motion;
pub mod particles;
pub mod pattern;
pub mod render;
pub mod state;

pub use cloud::*;
pub use constants::*;
pub use error::*;
pub use gesture::*;
pub use governor::*;
pub use input::*;
pub use motion::*;
pub use particles::*;
pub use pattern::*;
pub use render::*;
pub use state::*;

// Shaders bundled as string constants
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");
