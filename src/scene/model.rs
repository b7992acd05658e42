//! Triangle meshes loaded from Wavefront OBJ

use std::io::BufRead;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{RasterError, Result};
use crate::rasterizer::Vec3;

/// Indexed triangle mesh. Every face index is checked against the vertex
/// list on construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    vertices: Vec<Vec3>,
    faces: Vec<[usize; 3]>,
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

impl Model {
    /// Build a model, rejecting faces that index past the vertex list
    pub fn from_parts(vertices: Vec<Vec3>, faces: Vec<[usize; 3]>) -> Result<Self> {
        for (face, indices) in faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= vertices.len()) {
                return Err(RasterError::InvalidFace {
                    face,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }
        Ok(Self { vertices, faces })
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    /// Load an OBJ file. Polygons with more than three corners are fan-triangulated.
    pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let (models, _materials) =
            tobj::load_obj(path, &load_options()).map_err(|source| RasterError::ModelLoad {
                path: path.to_path_buf(),
                source,
            })?;
        let model = Self::merge(models)?;
        debug!(
            path = %path.display(),
            vertices = model.vertices.len(),
            faces = model.faces.len(),
            "loaded model"
        );
        Ok(model)
    }

    /// Parse OBJ text from a reader; material libraries are ignored
    pub fn from_obj_reader<R: BufRead>(reader: &mut R) -> Result<Self> {
        let (models, _materials) =
            tobj::load_obj_buf(reader, &load_options(), |_| Err(tobj::LoadError::OpenFileFailed))
                .map_err(|source| RasterError::ModelLoad {
                    path: PathBuf::from("<reader>"),
                    source,
                })?;
        Self::merge(models)
    }

    /// Concatenate every object in the file into one mesh
    fn merge(models: Vec<tobj::Model>) -> Result<Self> {
        let mut vertices = Vec::new();
        let mut faces = Vec::new();

        for m in models {
            let base = vertices.len();
            let mesh = m.mesh;
            vertices.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0] as f64, p[1] as f64, p[2] as f64)),
            );
            faces.extend(mesh.indices.chunks_exact(3).map(|t| {
                [
                    base + t[0] as usize,
                    base + t[1] as usize,
                    base + t[2] as usize,
                ]
            }));
        }

        Self::from_parts(vertices, faces)
    }

    /// Scale each axis independently so the model fits in [-1, 1].
    /// Axes where every coordinate is zero are left alone.
    pub fn normalize_geometry(&mut self) {
        let mut max = Vec3::ZERO;
        for v in &self.vertices {
            max.x = max.x.max(v.x.abs());
            max.y = max.y.max(v.y.abs());
            max.z = max.z.max(v.z.abs());
        }

        let safe = |m: f64| if m > 0.0 { m } else { 1.0 };
        let (sx, sy, sz) = (safe(max.x), safe(max.y), safe(max.z));
        for v in &mut self.vertices {
            v.x /= sx;
            v.y /= sy;
            v.z /= sz;
        }
    }

    /// Corner positions of face `i`
    pub fn triangle(&self, i: usize) -> [Vec3; 3] {
        let [a, b, c] = self.faces[i];
        [self.vertices[a], self.vertices[b], self.vertices[c]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD_AND_TRI: &str = "\
# one quad, one triangle
v 0 0 0
v 2 0 0
v 2 4 0
v 0 4 -8
v 1 1 1
f 1 2 3 4
f 1 3 5
";

    #[test]
    fn test_reads_and_triangulates() {
        let model = Model::from_obj_reader(&mut QUAD_AND_TRI.as_bytes()).unwrap();
        assert_eq!(model.vertices.len(), 5);
        assert_eq!(model.faces.len(), 3);
        assert_eq!(model.vertices[3], Vec3::new(0.0, 4.0, -8.0));
        // Every face references real vertices
        assert!(model.faces.iter().flatten().all(|&i| i < model.vertices.len()));
    }

    #[test]
    fn test_normalize_geometry() {
        let mut model = Model::from_obj_reader(&mut QUAD_AND_TRI.as_bytes()).unwrap();
        model.normalize_geometry();
        let max = model
            .vertices
            .iter()
            .fold(Vec3::ZERO, |m, v| Vec3::new(m.x.max(v.x.abs()), m.y.max(v.y.abs()), m.z.max(v.z.abs())));
        assert_eq!(max, Vec3::new(1.0, 1.0, 1.0));
        assert!(model.vertices.contains(&Vec3::new(0.0, 1.0, -1.0)));
    }

    #[test]
    fn test_normalize_flat_axis() {
        let mut model = Model::from_parts(
            vec![Vec3::new(-4.0, 0.0, 2.0), Vec3::new(2.0, 0.0, 1.0), Vec3::new(0.0, 0.0, 0.5)],
            vec![[0, 1, 2]],
        )
        .unwrap();
        model.normalize_geometry();
        assert_eq!(model.vertices[0], Vec3::new(-1.0, 0.0, 1.0));
        assert!(model.vertices.iter().all(|v| v.y == 0.0 && v.y.is_finite()));
    }

    #[test]
    fn test_from_parts_rejects_bad_index() {
        let err = Model::from_parts(vec![Vec3::ZERO; 2], vec![[0, 1, 2]]).unwrap_err();
        assert!(matches!(err, RasterError::InvalidFace { face: 0, index: 2, vertex_count: 2 }));
    }

    #[test]
    fn test_missing_file() {
        let err = Model::load_obj("/definitely/not/here.obj").unwrap_err();
        assert!(matches!(err, RasterError::ModelLoad { .. }));
    }

    #[test]
    fn test_validated_mesh_is_read_only() {
        let model = Model::from_parts(
            vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)],
            vec![[0, 1, 2], [2, 1, 0]],
        )
        .unwrap();
        assert_eq!(model.vertices().len(), 3);
        assert_eq!(model.faces(), &[[0, 1, 2], [2, 1, 0]]);
        for i in 0..model.faces().len() {
            let [a, _, c] = model.triangle(i);
            assert!(a == Vec3::ZERO || c == Vec3::ZERO);
        }
    }
}
