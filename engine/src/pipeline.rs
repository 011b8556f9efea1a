use image::RgbImage;
use noise::NoiseFn;
use rand::Rng;
use tracing::info;
use crate::api::*;
use crate::config::BakeConfig;
use crate::heightmap::{check_dimensions, generate_height, Heightmap};
use crate::mesh::TerrainMesh;
use crate::texture::generate_texture;

/// 一次烘焙的输出：高度网格与着色纹理
#[derive(Debug, Clone)]
pub struct TerrainBake {
    pub heightmap: Heightmap,
    pub texture: RgbImage,
}

impl TerrainBake {
    pub fn mesh(&self, config: &BakeConfig) -> TerrainResult<TerrainMesh> {
        TerrainMesh::from_heightmap(&self.heightmap, &config.mesh)
    }
}

pub struct Baker {
    pub config: BakeConfig,
}

impl Baker {
    pub fn new(config: BakeConfig) -> Self {
        Self { config }
    }

    pub fn validate(&self) -> TerrainResult<()> {
        let hm = &self.config.heightmap;
        check_dimensions(hm.width, hm.height)?;
        self.config.texture.validate()?;
        self.config.texture.output_size(hm.width, hm.height).map(|_| ())
    }

    /// 使用配置指定的噪声和随机源运行两个阶段
    pub fn bake(&self) -> TerrainResult<TerrainBake> {
        let noise = self.config.noise.build();
        let mut rng = self.config.random.build();
        self.bake_with(&noise, &mut *rng)
    }

    /// 两个阶段共用一个随机流：先取深度坐标，再为每个输出像素取一次抖动值
    pub fn bake_with<N, R>(&self, noise: &N, rng: &mut R) -> TerrainResult<TerrainBake>
    where
        N: NoiseFn<f64, 3> + ?Sized,
        R: Rng + ?Sized,
    {
        self.validate()?;
        let hm = &self.config.heightmap;
        info!("Generating {}x{} heightmap ({} octaves)", hm.width, hm.height, hm.octaves);
        let heightmap = generate_height(hm, noise, rng)?;

        let texture = generate_texture(&heightmap, &self.config.texture, rng)?;
        info!("Baked {}x{} terrain texture", texture.width(), texture.height());
        Ok(TerrainBake { heightmap, texture })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightmap::HeightmapConfig;
    use noise::Constant;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small(width: u32, height: u32) -> BakeConfig {
        BakeConfig {
            random: RandomSource::Seeded(17),
            heightmap: HeightmapConfig { width, height, ..HeightmapConfig::default() },
            ..BakeConfig::default()
        }
    }

    #[test]
    fn bake_produces_matching_buffers() {
        let bake = Baker::new(small(16, 12)).bake().unwrap();
        assert_eq!(bake.heightmap.len(), 16 * 12);
        assert_eq!(bake.texture.dimensions(), (64, 48));
    }

    #[test]
    fn seeded_bakes_are_identical() {
        let a = Baker::new(small(12, 12)).bake().unwrap();
        let b = Baker::new(small(12, 12)).bake().unwrap();
        assert_eq!(a.heightmap, b.heightmap);
        assert_eq!(a.texture, b.texture);
    }

    #[test]
    fn legacy_source_is_deterministic_too() {
        let config = BakeConfig { random: RandomSource::Legacy, ..small(10, 10) };
        let a = Baker::new(config.clone()).bake().unwrap();
        let b = Baker::new(config).bake().unwrap();
        assert_eq!(a.heightmap, b.heightmap);
        assert_eq!(a.texture, b.texture);
    }

    #[test]
    fn degenerate_grid_is_rejected_before_work() {
        let err = Baker::new(small(0, 8)).bake().unwrap_err();
        assert!(matches!(err, TerrainError::InvalidDimensions { width: 0, height: 8 }));
    }

    #[test]
    fn overflowing_texture_size_fails_validation() {
        let mut config = small(4, 4);
        config.texture.scale = u32::MAX / 2 + 1;
        let baker = Baker::new(config);
        assert!(matches!(baker.validate(), Err(TerrainError::InvalidScale(_))));
        assert!(matches!(baker.bake(), Err(TerrainError::InvalidScale(_))));
    }

    #[test]
    fn custom_noise_flows_through() {
        let baker = Baker::new(small(4, 4));
        let bake = baker.bake_with(&Constant::new(0.5), &mut StdRng::seed_from_u64(0)).unwrap();
        assert!(bake.heightmap.samples().iter().all(|&v| v == 134));
        let mesh = bake.mesh(&baker.config).unwrap();
        assert!(mesh.positions.iter().all(|p| p[1] == 1340.0));
    }
}
