use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;
use crate::api::*;
use crate::heightmap::HeightmapConfig;
use crate::mesh::MeshConfig;
use crate::texture::TextureConfig;

/// 一次烘焙所需的全部配置
///
/// 缺省字段使用默认值。默认值复现浏览器端的飞越背景：256x256 网格、
/// 正弦哈希随机源、参考排列表的改进 Perlin 噪声 (`NoiseBackend::Improved`)、
/// 4 倍双线性放大。`Perlin`/`FastPerlin`/`FastSimplex` 后端的排列表不同，
/// 生成的地形也不同。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BakeConfig {
    pub random: RandomSource,
    pub noise: NoiseBackend,
    pub heightmap: HeightmapConfig,
    pub texture: TextureConfig,
    pub mesh: MeshConfig,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            random: RandomSource::Legacy,
            noise: NoiseBackend::Improved,
            heightmap: HeightmapConfig::default(),
            texture: TextureConfig::default(),
            mesh: MeshConfig::default(),
        }
    }
}

impl BakeConfig {
    pub fn from_ron(text: &str) -> TerrainResult<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> TerrainResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_ron(&text)?;
        info!("Loaded bake config from {:?}", path);
        Ok(config)
    }
}
