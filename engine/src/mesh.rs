use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use crate::api::*;
use crate::heightmap::Heightmap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// 正方形平面边长
    pub size: f32,
    pub height_scale: f32,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self { size: 7500.0, height_scale: 10.0 }
    }
}

/// 位移后的平面网格，每个高度采样对应一个顶点
#[derive(Debug, Clone, Default)]
pub struct TerrainMesh {
    pub positions: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    /// 以原点为中心铺在 XZ 平面上，顶点 `i` 抬高到 `sample[i] * height_scale`
    pub fn from_heightmap(map: &Heightmap, config: &MeshConfig) -> TerrainResult<Self> {
        let (w, h) = (map.width(), map.height());
        if w < 2 || h < 2 {
            return Err(TerrainError::InvalidDimensions { width: w, height: h });
        }
        let (grid_x, grid_z) = (w - 1, h - 1);
        let half = config.size / 2.0;
        let seg_x = config.size / grid_x as f32;
        let seg_z = config.size / grid_z as f32;

        let mut mesh = TerrainMesh::default();
        mesh.positions.reserve(map.len());
        mesh.uvs.reserve(map.len());
        for iz in 0..h {
            for ix in 0..w {
                let y = map.get(ix, iz) as f32 * config.height_scale;
                mesh.positions.push([ix as f32 * seg_x - half, y, iz as f32 * seg_z - half]);
                mesh.uvs.push([ix as f32 / grid_x as f32, 1.0 - iz as f32 / grid_z as f32]);
            }
        }

        mesh.indices.reserve((grid_x * grid_z * 6) as usize);
        for iz in 0..grid_z {
            for ix in 0..grid_x {
                let a = ix + w * iz;
                let b = ix + w * (iz + 1);
                let c = ix + 1 + w * (iz + 1);
                let d = ix + 1 + w * iz;
                mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
        Ok(mesh)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// 导出 Wavefront OBJ（顶点、纹理坐标、面）
    pub fn write_obj<W: Write>(&self, mut out: W) -> io::Result<()> {
        for [x, y, z] in &self.positions {
            writeln!(out, "v {x} {y} {z}")?;
        }
        for [u, v] in &self.uvs {
            writeln!(out, "vt {u} {v}")?;
        }
        // OBJ indices are 1-based
        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
            writeln!(out, "f {a}/{a} {b}/{b} {c}/{c}")?;
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_shape_and_displacement() {
        let map = Heightmap::from_samples(3, 2, vec![0, 1, 2, 3, 4, 5]).unwrap();
        let mesh = TerrainMesh::from_heightmap(&map, &MeshConfig { size: 100.0, height_scale: 10.0 }).unwrap();
        assert_eq!(mesh.positions.len(), 6);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(mesh.positions[0], [-50.0, 0.0, -50.0]);
        assert_eq!(mesh.positions[5], [50.0, 50.0, 50.0]);
        assert_eq!(mesh.uvs[0], [0.0, 1.0]);
        assert_eq!(mesh.uvs[5], [1.0, 0.0]);
        assert_eq!(&mesh.indices[..6], &[0, 3, 1, 3, 4, 1]);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.positions.len()));
    }

    #[test]
    fn single_row_cannot_form_a_plane() {
        let map = Heightmap::flat(8, 1, 0).unwrap();
        assert!(matches!(
            TerrainMesh::from_heightmap(&map, &MeshConfig::default()),
            Err(TerrainError::InvalidDimensions { width: 8, height: 1 })
        ));
    }

    #[test]
    fn obj_export_lists_every_element() {
        let map = Heightmap::flat(2, 2, 1).unwrap();
        let mesh = TerrainMesh::from_heightmap(&map, &MeshConfig::default()).unwrap();
        let mut buf = Vec::new();
        mesh.write_obj(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 4);
        assert_eq!(text.lines().filter(|l| l.starts_with("vt ")).count(), 4);
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 2);
        assert!(text.contains("f 1/1 3/3 2/2"));
    }
}
