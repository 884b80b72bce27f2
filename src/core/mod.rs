pub mod backend;
pub mod clock;
pub mod config;
pub mod constants;
pub mod geometry;
pub mod lifecycle;
pub mod mapper;
pub mod melody;
pub mod motion;
pub mod simulation;
pub mod smoothing;

pub use backend::*;
pub use clock::*;
pub use config::*;
pub use geometry::*;
pub use lifecycle::*;
pub use mapper::*;
pub use simulation::*;
