use glam::DVec3;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::api::*;
use crate::heightmap::Heightmap;

/// 纹理烘焙配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    /// 光照方向，着色前归一化
    pub light: [f64; 3],
    pub scale: u32,
    /// 抖动取值范围 `[0, dither)`，0 或 1 时关闭
    pub dither: u8,
    pub edge: EdgePolicy,
    pub filter: UpscaleFilter,
    pub store: ByteStore,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            light: [1.0, 1.0, 1.0],
            scale: 4,
            dither: 5,
            edge: EdgePolicy::Clamp,
            filter: UpscaleFilter::Bilinear,
            store: ByteStore::Wrap,
        }
    }
}

impl TextureConfig {
    pub fn light_direction(&self) -> TerrainResult<DVec3> {
        let light = DVec3::from_array(self.light);
        if !light.is_finite() || light.length_squared() == 0.0 {
            return Err(TerrainError::InvalidLight);
        }
        Ok(light.normalize())
    }

    /// 放大后的纹理尺寸，乘积溢出 `u32` 时报错
    pub fn output_size(&self, width: u32, height: u32) -> TerrainResult<(u32, u32)> {
        scaled_size(width, height, self.scale)
    }

    pub fn validate(&self) -> TerrainResult<()> {
        if self.scale == 0 {
            return Err(TerrainError::InvalidScale(self.scale));
        }
        self.light_direction().map(|_| ())
    }
}

impl EdgePolicy {
    /// 读取 `(x + dx, y + dy)` 处的采样，越界按策略处理
    ///
    /// `Flat` 越过缓冲区两端时返回 NaN，整个像素的三个通道都存为 0。
    pub fn sample(self, map: &Heightmap, x: u32, y: u32, dx: i64, dy: i64) -> f64 {
        let w = map.width() as i64;
        let h = map.height() as i64;
        let (tx, ty) = (x as i64 + dx, y as i64 + dy);
        let v = match self {
            EdgePolicy::Clamp => map.get(tx.clamp(0, w - 1) as u32, ty.clamp(0, h - 1) as u32),
            EdgePolicy::Wrap => map.get(tx.rem_euclid(w) as u32, ty.rem_euclid(h) as u32),
            EdgePolicy::Zero => {
                if tx < 0 || ty < 0 || tx >= w || ty >= h {
                    0
                } else {
                    map.get(tx as u32, ty as u32)
                }
            }
            EdgePolicy::Flat => {
                // row-major offset, horizontal taps may land on the next row
                let j = y as i64 * w + x as i64 + dy * w + dx;
                if j < 0 || j >= map.len() as i64 {
                    return f64::NAN;
                }
                map.samples()[j as usize]
            }
        };
        v as f64
    }
}

impl UpscaleFilter {
    pub fn filter_type(self) -> FilterType {
        match self {
            UpscaleFilter::Nearest => FilterType::Nearest,
            UpscaleFilter::Bilinear => FilterType::Triangle,
        }
    }
}

/// 由两格外的中心差分估算表面法线
pub fn surface_normal(map: &Heightmap, x: u32, y: u32, edge: EdgePolicy) -> DVec3 {
    let dx = edge.sample(map, x, y, -2, 0) - edge.sample(map, x, y, 2, 0);
    let dz = edge.sample(map, x, y, 0, -2) - edge.sample(map, x, y, 0, 2);
    DVec3::new(dx, 2.0, dz).normalize()
}

/// 作用于所有通道的亮度系数
#[inline]
pub fn brightness(elevation: u8) -> f64 {
    0.5 + elevation as f64 * 0.007
}

/// 未截断的 RGB 强度
pub fn shade_channels(shade: f64, elevation: u8) -> [f64; 3] {
    let m = brightness(elevation);
    [
        (96.0 + shade * 128.0) * m,
        (32.0 + shade * 96.0) * m,
        shade * 96.0 * m,
    ]
}

/// 第一遍：网格分辨率下的漫反射着色
pub fn shade_pass(map: &Heightmap, config: &TextureConfig) -> TerrainResult<RgbImage> {
    let sun = config.light_direction()?;
    let store = config.store;
    Ok(RgbImage::from_fn(map.width(), map.height(), |x, y| {
        let shade = surface_normal(map, x, y, config.edge).dot(sun);
        let [r, g, b] = shade_channels(shade, map.get(x, y));
        Rgb([store.store(r), store.store(g), store.store(b)])
    }))
}

fn scaled_size(width: u32, height: u32, scale: u32) -> TerrainResult<(u32, u32)> {
    if scale == 0 {
        return Err(TerrainError::InvalidScale(scale));
    }
    match (width.checked_mul(scale), height.checked_mul(scale)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(TerrainError::InvalidScale(scale)),
    }
}

pub fn upscale(image: &RgbImage, scale: u32, filter: UpscaleFilter) -> TerrainResult<RgbImage> {
    let (w, h) = image.dimensions();
    let (sw, sh) = scaled_size(w, h, scale)?;
    Ok(imageops::resize(image, sw, sh, filter.filter_type()))
}

/// 每个像素加一个 `[0, amplitude)` 的随机偏移，RGB 共用
pub fn dither<R: Rng + ?Sized>(image: &mut RgbImage, amplitude: u8, store: ByteStore, rng: &mut R) {
    for pixel in image.pixels_mut() {
        let v = (rng.gen::<f64>() * amplitude as f64) as u8;
        for c in pixel.0.iter_mut() {
            *c = store.add(*c, v);
        }
    }
}

/// 烘焙着色、放大并抖动后的地形纹理
pub fn generate_texture<R: Rng + ?Sized>(map: &Heightmap, config: &TextureConfig, rng: &mut R) -> TerrainResult<RgbImage> {
    config.validate()?;
    config.output_size(map.width(), map.height())?;
    let base = shade_pass(map, config)?;
    let mut scaled = upscale(&base, config.scale, config.filter)?;
    dither(&mut scaled, config.dither, config.store, rng);
    debug!(width = scaled.width(), height = scaled.height(), "texture baked");
    Ok(scaled)
}
