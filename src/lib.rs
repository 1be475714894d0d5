pub mod config;
pub mod ellipse;
pub mod error;
pub mod line;
pub mod outline;
pub mod region;
pub mod sampler;
pub mod types;
pub mod utils;

pub use config::DensityConfig;
pub use region::{Region, Shape, Triangle};
pub use sampler::{OutlineSampler, PointSequence, WorldResolver, sample};
