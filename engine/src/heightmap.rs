use image::{GrayImage, Luma};
use noise::NoiseFn;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::api::*;
use crate::channel::wrap_u8;

/// 高度图生成配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightmapConfig {
    pub width: u32,
    pub height: u32,
    pub octaves: usize,
    /// 每个八度频率除数的增长倍数
    pub quality_step: f64,
    pub amplitude: f64,
    /// 深度坐标在 `[0, depth_range)` 内均匀抽取
    pub depth_range: f64,
}

impl Default for HeightmapConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            octaves: 4,
            quality_step: 5.0,
            amplitude: 1.75,
            depth_range: 100.0,
        }
    }
}

/// 行优先存储的无符号高度采样网格
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heightmap {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl Heightmap {
    pub fn from_samples(width: u32, height: u32, samples: Vec<u8>) -> TerrainResult<Self> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(TerrainError::SampleCount { expected, actual: samples.len() });
        }
        Ok(Self { width, height, samples })
    }

    pub fn flat(width: u32, height: u32, level: u8) -> TerrainResult<Self> {
        check_dimensions(width, height)?;
        Ok(Self { width, height, samples: vec![level; width as usize * height as usize] })
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }
    pub fn samples(&self) -> &[u8] { &self.samples }
    pub fn len(&self) -> usize { self.samples.len() }
    pub fn is_empty(&self) -> bool { self.samples.is_empty() }

    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.samples[self.index(x, y)]
    }

    /// 原始采样的灰度图，每格一个像素
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| Luma([self.get(x, y)]))
    }
}

pub(crate) fn check_dimensions(width: u32, height: u32) -> TerrainResult<()> {
    if width == 0 || height == 0 {
        return Err(TerrainError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// 生成高度图，噪声深度坐标从 `rng` 抽取
pub fn generate_height<N, R>(config: &HeightmapConfig, noise: &N, rng: &mut R) -> TerrainResult<Heightmap>
where
    N: NoiseFn<f64, 3> + ?Sized,
    R: Rng + ?Sized,
{
    check_dimensions(config.width, config.height)?;
    let z = rng.gen::<f64>() * config.depth_range;
    generate_height_at_depth(config, noise, z)
}

/// 在深度 `z` 处把 `octaves` 层噪声绝对值累加进字节网格
///
/// 每个八度都写回字节单元，累加值每层之后都会截断并对 256 取模。
pub fn generate_height_at_depth<N>(config: &HeightmapConfig, noise: &N, z: f64) -> TerrainResult<Heightmap>
where
    N: NoiseFn<f64, 3> + ?Sized,
{
    check_dimensions(config.width, config.height)?;
    let width = config.width as usize;
    let mut samples = vec![0u8; width * config.height as usize];

    let mut quality = 1.0;
    for octave in 0..config.octaves {
        for (i, cell) in samples.iter_mut().enumerate() {
            let x = (i % width) as f64;
            let y = (i / width) as f64;
            let v = noise.get([x / quality, y / quality, z]);
            *cell = wrap_u8(*cell as f64 + (v * quality * config.amplitude).abs());
        }
        debug!(octave, quality, "heightmap octave done");
        quality *= config.quality_step;
    }

    Ok(Heightmap { width: config.width, height: config.height, samples })
}
