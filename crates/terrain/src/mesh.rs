use std::collections::BTreeMap;

use faultscape_math::{Vec2, Vec3, Vec4};
use serde::Serialize;

use crate::MeshError;

pub const POSITION: &str = "position";
pub const NORMAL: &str = "normal";
pub const TEXCOORD: &str = "texcoord";

/// One per-vertex attribute array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Vec2(Vec<Vec2>),
    Vec3(Vec<Vec3>),
    Vec4(Vec<Vec4>),
}

impl Attribute {
    pub fn len(&self) -> usize {
        match self {
            Attribute::Vec2(v) => v.len(),
            Attribute::Vec3(v) => v.len(),
            Attribute::Vec4(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Components per vertex.
    pub fn components(&self) -> usize {
        match self {
            Attribute::Vec2(_) => 2,
            Attribute::Vec3(_) => 3,
            Attribute::Vec4(_) => 4,
        }
    }

    /// Tightly packed floats, ready for a vertex buffer.
    pub fn to_floats(&self) -> Vec<f32> {
        match self {
            Attribute::Vec2(v) => v.iter().flat_map(|e| e.as_slice()).copied().collect(),
            Attribute::Vec3(v) => v.iter().flat_map(|e| e.as_slice()).copied().collect(),
            Attribute::Vec4(v) => v.iter().flat_map(|e| e.as_slice()).copied().collect(),
        }
    }
}

/// An indexed triangle mesh with named per-vertex attributes.
///
/// Every attribute has exactly one entry per vertex and every triangle
/// index is below the vertex count. A `position` attribute of 3-vectors is
/// always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mesh {
    attributes: BTreeMap<String, Attribute>,
    triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Create a mesh with the given vertex positions and no triangles.
    pub fn new(positions: Vec<Vec3>) -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert(POSITION.to_string(), Attribute::Vec3(positions));
        Self {
            attributes,
            triangles: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions().len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn positions(&self) -> &[Vec3] {
        match self.attributes.get(POSITION) {
            Some(Attribute::Vec3(p)) => p,
            _ => &[],
        }
    }

    /// Positions may be edited in place, but never resized.
    pub(crate) fn positions_mut(&mut self) -> &mut [Vec3] {
        match self.attributes.get_mut(POSITION) {
            Some(Attribute::Vec3(p)) => p,
            _ => &mut [],
        }
    }

    pub fn normals(&self) -> Option<&[Vec3]> {
        match self.attributes.get(NORMAL) {
            Some(Attribute::Vec3(n)) => Some(n),
            _ => None,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Add or replace an attribute, rejecting arrays of the wrong length.
    pub fn insert_attribute(
        &mut self,
        name: impl Into<String>,
        attribute: Attribute,
    ) -> Result<(), MeshError> {
        let name = name.into();
        let expected = self.vertex_count();
        if attribute.len() != expected {
            return Err(MeshError::AttributeLength {
                name,
                expected,
                actual: attribute.len(),
            });
        }
        if name == POSITION && attribute.components() != 3 {
            return Err(MeshError::AttributeKind {
                name,
                expected: 3,
                actual: attribute.components(),
            });
        }
        self.attributes.insert(name, attribute);
        Ok(())
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn push_triangle(&mut self, triangle: [u32; 3]) -> Result<(), MeshError> {
        let vertex_count = self.vertex_count();
        if let Some(&index) = triangle.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::IndexOutOfRange {
                triangle: self.triangles.len(),
                index,
                vertex_count,
            });
        }
        self.triangles.push(triangle);
        Ok(())
    }

    /// Flat index list for an element buffer.
    pub fn index_buffer(&self) -> &[u32] {
        bytemuck::cast_slice(&self.triangles)
    }

    /// Re-check every invariant.
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertex_count = self.vertex_count();
        for (name, attribute) in &self.attributes {
            if attribute.len() != vertex_count {
                return Err(MeshError::AttributeLength {
                    name: name.clone(),
                    expected: vertex_count,
                    actual: attribute.len(),
                });
            }
        }
        for (t, triangle) in self.triangles.iter().enumerate() {
            if let Some(&index) = triangle.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    triangle: t,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_mesh() -> Mesh {
        let mut mesh = Mesh::new(vec![
            Vec3::new([0.0, 0.0, 0.0]),
            Vec3::new([1.0, 0.0, 0.0]),
            Vec3::new([0.0, 1.0, 0.0]),
        ]);
        mesh.push_triangle([0, 1, 2]).unwrap();
        mesh
    }

    #[test]
    fn new_mesh_has_positions_only() {
        let mesh = triangle_mesh();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(mesh.normals().is_none());
        assert_eq!(mesh.attributes().count(), 1);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn attribute_length_must_match() {
        let mut mesh = triangle_mesh();
        let err = mesh
            .insert_attribute(TEXCOORD, Attribute::Vec2(vec![Vec2::ZERO; 2]))
            .unwrap_err();
        assert_eq!(
            err,
            MeshError::AttributeLength {
                name: TEXCOORD.into(),
                expected: 3,
                actual: 2
            }
        );
        mesh.insert_attribute(TEXCOORD, Attribute::Vec2(vec![Vec2::ZERO; 3]))
            .unwrap();
        assert_eq!(mesh.attribute(TEXCOORD).map(Attribute::components), Some(2));
    }

    #[test]
    fn position_must_stay_three_dimensional() {
        let mut mesh = triangle_mesh();
        let err = mesh
            .insert_attribute(POSITION, Attribute::Vec4(vec![Vec4::ZERO; 3]))
            .unwrap_err();
        assert!(matches!(err, MeshError::AttributeKind { expected: 3, actual: 4, .. }));
    }

    #[test]
    fn triangle_indices_are_range_checked() {
        let mut mesh = triangle_mesh();
        let err = mesh.push_triangle([0, 1, 3]).unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                triangle: 1,
                index: 3,
                vertex_count: 3
            }
        );
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn upload_views_are_flat() {
        let mesh = triangle_mesh();
        assert_eq!(mesh.index_buffer(), &[0, 1, 2]);
        let floats = mesh.attribute(POSITION).unwrap().to_floats();
        assert_eq!(floats, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);

        let texcoords = Attribute::Vec2(vec![Vec2::new([0.25, 0.5]), Vec2::new([1.0, 0.75])]);
        assert_eq!(texcoords.to_floats(), vec![0.25, 0.5, 1.0, 0.75]);
    }

    #[test]
    fn serializes_attribute_bag() {
        let mesh = triangle_mesh();
        let json = serde_json::to_value(&mesh).unwrap();
        assert_eq!(json["triangles"][0], serde_json::json!([0, 1, 2]));
        assert_eq!(json["attributes"]["position"]["vec3"][1], serde_json::json!([1.0, 0.0, 0.0]));
    }
}
