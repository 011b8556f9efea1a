pub mod api;
pub mod channel;
pub mod config;
pub mod heightmap;
pub mod mesh;
pub mod pipeline;
pub mod rng;
pub mod sampling;
pub mod texture;

pub use api::*;
pub use config::BakeConfig;
pub use heightmap::{generate_height, generate_height_at_depth, Heightmap};
pub use pipeline::{Baker, TerrainBake};
pub use texture::generate_texture;
