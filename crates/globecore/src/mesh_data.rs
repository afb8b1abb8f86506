use crate::geo::{GeoPoint, geo_uv, project};
use glam::Vec3;
use std::f32::consts::TAU;

/// Raw mesh data that can be used by any rendering engine
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Latitude/longitude sphere whose vertices and UVs both come from the
    /// globe projection, so texture and markers share one convention.
    ///
    /// The seam column is duplicated so `u` can run the full 0..1 range.
    pub fn globe(radius: f32, segments: u32) -> Self {
        let rings = segments.max(2);
        let columns = (segments * 2).max(3);
        let mut mesh = MeshData::default();

        for i in 0..=rings {
            let latitude = 90.0 - 180.0 * i as f32 / rings as f32;
            for j in 0..=columns {
                let longitude = -180.0 + 360.0 * j as f32 / columns as f32;
                let geo = GeoPoint::new(latitude, longitude);
                let position = project(geo, radius);
                let uv = geo_uv(geo);

                mesh.positions.push(position.to_array());
                mesh.normals.push(position.normalize_or(Vec3::Y).to_array());
                mesh.uvs.push(uv.to_array());
            }
        }

        let stride = columns + 1;
        for i in 0..rings {
            for j in 0..columns {
                let a = i * stride + j;
                let b = a + stride;
                let c = a + 1;
                let d = b + 1;
                // Counter-clockwise seen from outside
                mesh.indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }

        mesh
    }

    /// Open tube of constant `radius` following `path`.
    ///
    /// Ring frames are carried along the path by parallel transport so the
    /// tube does not twist at the bolt's sharp kinks. Paths with fewer than two
    /// points produce no triangles.
    pub fn tube(path: &[Vec3], radius: f32, radial_segments: u32) -> Self {
        let mut mesh = MeshData::default();
        if path.len() < 2 {
            return mesh;
        }
        let sides = radial_segments.max(3);

        let tangents: Vec<Vec3> = (0..path.len())
            .map(|k| {
                let prev = path[k.saturating_sub(1)];
                let next = path[(k + 1).min(path.len() - 1)];
                (next - prev).normalize_or(Vec3::NEG_Y)
            })
            .collect();

        let mut normal = tangents[0].any_orthonormal_vector();
        for (k, (point, tangent)) in path.iter().zip(&tangents).enumerate() {
            let projected = normal - *tangent * normal.dot(*tangent);
            normal = projected.normalize_or(tangent.any_orthonormal_vector());
            let binormal = tangent.cross(normal);

            for j in 0..sides {
                let angle = TAU * j as f32 / sides as f32;
                let offset = normal * angle.cos() + binormal * angle.sin();
                mesh.positions.push((*point + offset * radius).to_array());
                mesh.normals.push(offset.to_array());
                mesh.uvs.push([
                    j as f32 / sides as f32,
                    k as f32 / (path.len() - 1) as f32,
                ]);
            }
        }

        for k in 0..(path.len() as u32 - 1) {
            for j in 0..sides {
                let a = k * sides + j;
                let b = k * sides + (j + 1) % sides;
                let c = a + sides;
                let d = b + sides;
                mesh.indices.extend_from_slice(&[a, b, d, a, d, c]);
            }
        }

        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::surface_uv;

    #[test]
    fn test_globe_vertices_lie_on_sphere() {
        let mesh = MeshData::globe(2.0, 16);
        for p in &mesh.positions {
            assert!((Vec3::from_array(*p).length() - 2.0).abs() < 1e-4);
        }
        assert_eq!(mesh.positions.len(), mesh.uvs.len());
        assert_eq!(mesh.positions.len(), mesh.normals.len());
        assert_eq!(mesh.indices.len(), 16 * 32 * 6);
    }

    #[test]
    fn test_globe_uvs_match_surface_uv_away_from_seam_and_poles() {
        let mesh = MeshData::globe(1.0, 16);
        for (p, uv) in mesh.positions.iter().zip(&mesh.uvs) {
            let dir = Vec3::from_array(*p);
            if dir.y.abs() > 0.999 || uv[0] < 1e-3 || uv[0] > 1.0 - 1e-3 {
                continue;
            }
            let expected = surface_uv(dir);
            assert!((expected.x - uv[0]).abs() < 1e-3, "u {} vs {}", expected.x, uv[0]);
            assert!((expected.y - uv[1]).abs() < 1e-3, "v {} vs {}", expected.y, uv[1]);
        }
    }

    #[test]
    fn test_globe_triangles_face_outward() {
        let mesh = MeshData::globe(1.0, 8);
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from_array(mesh.positions[i as usize]));
            let normal = (b - a).cross(c - a);
            if normal.length_squared() < 1e-10 {
                // Collapsed triangles at the poles
                continue;
            }
            let centre = (a + b + c) / 3.0;
            assert!(normal.dot(centre) > 0.0);
        }
    }

    #[test]
    fn test_tube_has_ring_per_point() {
        let path = [Vec3::ZERO, Vec3::new(0.1, -0.5, 0.0), Vec3::new(0.0, -1.0, 0.1)];
        let mesh = MeshData::tube(&path, 0.05, 8);
        assert_eq!(mesh.vertex_count(), 3 * 8);
        assert_eq!(mesh.indices.len(), 2 * 8 * 6);
        assert!(mesh.indices.iter().all(|i| (*i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn test_tube_rings_keep_their_radius() {
        let path = [Vec3::ZERO, Vec3::NEG_Y, Vec3::new(0.3, -2.0, 0.0)];
        let mesh = MeshData::tube(&path, 0.1, 6);
        for (k, point) in path.iter().enumerate() {
            for j in 0..6 {
                let v = Vec3::from_array(mesh.positions[k * 6 + j]);
                assert!(((v - *point).length() - 0.1).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_tube_triangles_face_outward() {
        let path = [Vec3::ZERO, Vec3::NEG_Y, Vec3::new(0.0, -2.0, 0.0)];
        let mesh = MeshData::tube(&path, 0.1, 8);
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from_array(mesh.positions[i as usize]));
            let normal = (b - a).cross(c - a);
            let centre = (a + b + c) / 3.0;
            let axis_point = Vec3::new(0.0, centre.y, 0.0);
            assert!(normal.dot(centre - axis_point) > 0.0);
        }
    }

    #[test]
    fn test_single_point_tube_is_empty() {
        let mesh = MeshData::tube(&[Vec3::ONE], 0.1, 8);
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
    }
}
