use crate::api::*;
use fastnoise_lite::{FastNoiseLite, NoiseType};
use noise::{NoiseFn, Perlin};

/// 由 [`NoiseBackend`] 构建的噪声源
pub enum TerrainNoise {
    Improved(ImprovedNoise),
    Perlin(Perlin),
    Fast(FastNoise),
}

/// Ken Perlin 参考排列表
const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225,
    140, 36, 103, 30, 69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148,
    247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219, 203, 117, 35, 11, 32,
    57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122,
    60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54,
    65, 25, 63, 161, 1, 216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169,
    200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173, 186, 3, 64,
    52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212,
    207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213,
    119, 248, 152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9,
    129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232, 178, 185, 112, 104,
    218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241,
    81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157,
    184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93,
    222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

/// 参考排列表的改进 Perlin 噪声，与浏览器端背景地形逐值一致
#[derive(Debug, Clone, Copy, Default)]
pub struct ImprovedNoise;

impl ImprovedNoise {
    #[inline]
    fn perm(i: usize) -> usize {
        PERMUTATION[i & 255] as usize
    }

    fn fade(t: f64) -> f64 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    fn lerp(t: f64, a: f64, b: f64) -> f64 {
        a + t * (b - a)
    }

    fn grad(hash: usize, x: f64, y: f64, z: f64) -> f64 {
        let h = hash & 15;
        let u = if h < 8 { x } else { y };
        let v = if h < 4 { y } else if h == 12 || h == 14 { x } else { z };
        (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
    }
}

impl NoiseFn<f64, 3> for ImprovedNoise {
    fn get(&self, point: [f64; 3]) -> f64 {
        let [fx, fy, fz] = point.map(f64::floor);
        let (xi, yi, zi) = ((fx as i64 & 255) as usize, (fy as i64 & 255) as usize, (fz as i64 & 255) as usize);
        let (x, y, z) = (point[0] - fx, point[1] - fy, point[2] - fz);
        let (u, v, w) = (Self::fade(x), Self::fade(y), Self::fade(z));

        let a = Self::perm(xi) + yi;
        let aa = Self::perm(a) + zi;
        let ab = Self::perm(a + 1) + zi;
        let b = Self::perm(xi + 1) + yi;
        let ba = Self::perm(b) + zi;
        let bb = Self::perm(b + 1) + zi;

        let g = |h: usize, dx: f64, dy: f64, dz: f64| Self::grad(Self::perm(h), x - dx, y - dy, z - dz);
        Self::lerp(
            w,
            Self::lerp(
                v,
                Self::lerp(u, g(aa, 0.0, 0.0, 0.0), g(ba, 1.0, 0.0, 0.0)),
                Self::lerp(u, g(ab, 0.0, 1.0, 0.0), g(bb, 1.0, 1.0, 0.0)),
            ),
            Self::lerp(
                v,
                Self::lerp(u, g(aa + 1, 0.0, 0.0, 1.0), g(ba + 1, 1.0, 0.0, 1.0)),
                Self::lerp(u, g(ab + 1, 0.0, 1.0, 1.0), g(bb + 1, 1.0, 1.0, 1.0)),
            ),
        )
    }
}

/// 频率为 1 的 `fastnoise_lite` 采样器，网格坐标不经缩放直接传入
pub struct FastNoise {
    inner: FastNoiseLite,
}

impl FastNoise {
    pub fn new(seed: i32, noise_type: NoiseType) -> Self {
        let mut inner = FastNoiseLite::with_seed(seed);
        inner.set_noise_type(Some(noise_type));
        inner.set_frequency(Some(1.0));
        Self { inner }
    }
}

impl NoiseFn<f64, 3> for FastNoise {
    fn get(&self, point: [f64; 3]) -> f64 {
        self.inner.get_noise_3d(point[0] as f32, point[1] as f32, point[2] as f32) as f64
    }
}

impl NoiseFn<f64, 3> for TerrainNoise {
    fn get(&self, point: [f64; 3]) -> f64 {
        match self {
            TerrainNoise::Improved(n) => n.get(point),
            TerrainNoise::Perlin(p) => p.get(point),
            TerrainNoise::Fast(f) => f.get(point),
        }
    }
}

impl NoiseBackend {
    pub fn build(self) -> TerrainNoise {
        match self {
            NoiseBackend::Improved => TerrainNoise::Improved(ImprovedNoise),
            NoiseBackend::Perlin { seed } => TerrainNoise::Perlin(Perlin::new(seed)),
            NoiseBackend::FastPerlin { seed } => TerrainNoise::Fast(FastNoise::new(seed, NoiseType::Perlin)),
            NoiseBackend::FastSimplex { seed } => TerrainNoise::Fast(FastNoise::new(seed, NoiseType::OpenSimplex2)),
        }
    }
}
