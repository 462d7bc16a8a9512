//! Procedural unit cube shared by every body.
//!
//! Eight corners of [-1, 1]^3 plus a face table expand into a flat
//! triangle list with one solid colour per face.

use glam::Vec3;

/// Two triangles per face, six faces.
pub const CUBE_VERTEX_COUNT: usize = 36;

/// Interleaved position and colour, 6 floats per vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// One cube face: outward normal, corner indices in counter-clockwise order
/// seen from outside, and a flat colour.
#[derive(Debug, Clone, Copy)]
pub struct Face {
    pub normal: Vec3,
    pub corners: [usize; 4],
    pub color: [f32; 3],
}

/// Corner `i` has x from bit 0, y from bit 1, z from bit 2 (set = +1).
fn corner(i: usize) -> [f32; 3] {
    let axis = |bit: usize| if i & (1 << bit) != 0 { 1.0 } else { -1.0 };
    [axis(0), axis(1), axis(2)]
}

pub const FACES: [Face; 6] = [
    // front
    Face {
        normal: Vec3::Z,
        corners: [4, 5, 7, 6],
        color: [1.0, 0.0, 1.0],
    },
    // back
    Face {
        normal: Vec3::NEG_Z,
        corners: [1, 0, 2, 3],
        color: [1.0, 0.0, 0.0],
    },
    // left
    Face {
        normal: Vec3::NEG_X,
        corners: [0, 4, 6, 2],
        color: [0.0, 1.0, 0.0],
    },
    // right
    Face {
        normal: Vec3::X,
        corners: [5, 1, 3, 7],
        color: [1.0, 1.0, 0.0],
    },
    // top
    Face {
        normal: Vec3::Y,
        corners: [6, 7, 3, 2],
        color: [0.0, 1.0, 1.0],
    },
    // bottom
    Face {
        normal: Vec3::NEG_Y,
        corners: [0, 1, 5, 4],
        color: [0.0, 0.0, 1.0],
    },
];

/// Expand the face table into a 36-vertex triangle list.
pub fn cube_mesh() -> Vec<MeshVertex> {
    let mut vertices = Vec::with_capacity(CUBE_VERTEX_COUNT);
    for face in &FACES {
        let [a, b, c, d] = face.corners;
        for i in [a, b, c, a, c, d] {
            vertices.push(MeshVertex {
                position: corner(i),
                color: face.color,
            });
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_36_vertices() {
        assert_eq!(cube_mesh().len(), CUBE_VERTEX_COUNT);
    }

    #[test]
    fn corners_lie_on_their_face() {
        for face in &FACES {
            for &i in &face.corners {
                let p = Vec3::from(corner(i));
                assert_eq!(p.dot(face.normal), 1.0, "corner {i} off face {:?}", face.normal);
            }
        }
    }

    #[test]
    fn triangles_wind_counter_clockwise_from_outside() {
        let mesh = cube_mesh();
        for (t, tri) in mesh.chunks_exact(3).enumerate() {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|v| Vec3::from(v.position));
            let normal = (b - a).cross(c - a);
            let face = &FACES[t / 2];
            assert!(normal.dot(face.normal) > 0.0, "triangle {t} faces inward");
        }
    }

    #[test]
    fn one_colour_per_face() {
        let mesh = cube_mesh();
        for (f, verts) in mesh.chunks_exact(6).enumerate() {
            assert!(verts.iter().all(|v| v.color == FACES[f].color));
        }
        let mut colors: Vec<[u8; 3]> = FACES
            .iter()
            .map(|f| f.color.map(|c| c as u8))
            .collect();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), 6);
    }

    #[test]
    fn mesh_spans_unit_cube() {
        let mesh = cube_mesh();
        for v in &mesh {
            assert!(v.position.iter().all(|c| c.abs() == 1.0));
        }
        // every one of the 8 corners is used
        let mut seen = [false; 8];
        for face in &FACES {
            for &i in &face.corners {
                seen[i] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }
}
