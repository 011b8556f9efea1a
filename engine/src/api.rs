use serde::{Deserialize, Serialize}; use thiserror::Error;
#[derive(Debug, Error)] pub enum TerrainError { #[error("invalid grid dimensions {width}x{height}")] InvalidDimensions { width: u32, height: u32 }, #[error("expected {expected} elevation samples, got {actual}")] SampleCount { expected: usize, actual: usize }, #[error("light direction must be finite and non-zero")] InvalidLight, #[error("upscale factor must be positive, got {0}")] InvalidScale(u32), #[error("config parse failed: {0}")] Config(#[from] ron::error::SpannedError), #[error("io error: {0}")] Io(#[from] std::io::Error) }
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)] pub enum EdgePolicy { Clamp, Wrap, Zero, Flat }
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)] pub enum UpscaleFilter { Nearest, Bilinear }
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)] pub enum ByteStore { Wrap, Saturate }
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)] pub enum NoiseBackend { Improved, Perlin { seed: u32 }, FastPerlin { seed: i32 }, FastSimplex { seed: i32 } }
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)] pub enum RandomSource { Legacy, Seeded(u64), Entropy }
pub type TerrainResult<T> = Result<T, TerrainError>;
