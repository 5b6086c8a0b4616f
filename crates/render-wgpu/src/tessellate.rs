use bytemuck::{Pod, Zeroable};
use plaza_scene::{Geometry, TextGeometry};

/// GPU vertex: position, normal, texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// CPU-side triangle mesh, ready for buffer upload.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// Turn a geometry description into triangles.
pub fn tessellate(geometry: &Geometry) -> MeshData {
    match geometry {
        Geometry::Box {
            width,
            height,
            depth,
        } => box_mesh(*width, *height, *depth),
        Geometry::Plane { width, height } => plane_mesh(*width, *height),
        Geometry::Sphere {
            radius,
            width_segments,
            height_segments,
        } => sphere_mesh(*radius, *width_segments, *height_segments),
        Geometry::Text(text) => text_mesh(text),
    }
}

/// Axis-aligned box centered at the origin. 24 vertices so each face gets
/// its own normal and a full 0..1 uv tile.
fn box_mesh(width: f32, height: f32, depth: f32) -> MeshData {
    let mut mesh = MeshData::default();
    push_box(
        &mut mesh,
        [-width / 2.0, -height / 2.0, -depth / 2.0],
        [width / 2.0, height / 2.0, depth / 2.0],
    );
    mesh
}

/// Append an axis-aligned box spanning `min..max` to `mesh`.
fn push_box(mesh: &mut MeshData, min: [f32; 3], max: [f32; 3]) {
    let [x0, y0, z0] = min;
    let [x1, y1, z1] = max;
    let base = mesh.vertices.len() as u32;

    // (normal, four corners in ccw order seen from outside)
    #[rustfmt::skip]
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        ([0.0, 0.0,  1.0], [[x0, y0, z1], [x1, y0, z1], [x1, y1, z1], [x0, y1, z1]]),
        ([0.0, 0.0, -1.0], [[x1, y0, z0], [x0, y0, z0], [x0, y1, z0], [x1, y1, z0]]),
        ([ 1.0, 0.0, 0.0], [[x1, y0, z1], [x1, y0, z0], [x1, y1, z0], [x1, y1, z1]]),
        ([-1.0, 0.0, 0.0], [[x0, y0, z0], [x0, y0, z1], [x0, y1, z1], [x0, y1, z0]]),
        ([0.0,  1.0, 0.0], [[x0, y1, z1], [x1, y1, z1], [x1, y1, z0], [x0, y1, z0]]),
        ([0.0, -1.0, 0.0], [[x0, y0, z0], [x1, y0, z0], [x1, y0, z1], [x0, y0, z1]]),
    ];
    let uvs = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

    for (f, (normal, corners)) in faces.iter().enumerate() {
        for (c, position) in corners.iter().enumerate() {
            mesh.vertices.push(Vertex {
                position: *position,
                normal: *normal,
                uv: uvs[c],
            });
        }
        let o = base + (f as u32) * 4;
        mesh.indices
            .extend_from_slice(&[o, o + 1, o + 2, o + 2, o + 3, o]);
    }
}

/// Flat rectangle in the XY plane facing +Z, centered at the origin.
/// A floor is this plane rotated a quarter turn about X by its transform.
fn plane_mesh(width: f32, height: f32) -> MeshData {
    let w = width / 2.0;
    let h = height / 2.0;
    let normal = [0.0, 0.0, 1.0];
    MeshData {
        vertices: vec![
            Vertex {
                position: [-w, -h, 0.0],
                normal,
                uv: [0.0, 1.0],
            },
            Vertex {
                position: [w, -h, 0.0],
                normal,
                uv: [1.0, 1.0],
            },
            Vertex {
                position: [w, h, 0.0],
                normal,
                uv: [1.0, 0.0],
            },
            Vertex {
                position: [-w, h, 0.0],
                normal,
                uv: [0.0, 0.0],
            },
        ],
        indices: vec![0, 1, 2, 2, 3, 0],
    }
}

/// Latitude/longitude sphere centered at the origin.
fn sphere_mesh(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut mesh = MeshData::default();

    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        let polar = v * std::f32::consts::PI;
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let azimuth = u * std::f32::consts::TAU;
            let dir = [
                polar.sin() * azimuth.cos(),
                polar.cos(),
                polar.sin() * azimuth.sin(),
            ];
            mesh.vertices.push(Vertex {
                position: [dir[0] * radius, dir[1] * radius, dir[2] * radius],
                normal: dir,
                uv: [u, v],
            });
        }
    }

    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * (ws + 1) + ix;
            let b = a + ws + 1;
            mesh.indices
                .extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }
    mesh
}

/// Extruded text baseline at y=0, starting at x=0, extruded along +Z.
///
/// Each glyph becomes a solid slab sized from its resolved advance; this
/// trades outline fidelity for self-contained geometry, which is enough for
/// labels read from a distance. Whitespace advances the pen without
/// emitting geometry.
fn text_mesh(text: &TextGeometry) -> MeshData {
    // Fraction of the advance filled by the glyph body; the rest is gap.
    const BODY: f32 = 0.8;

    let mut mesh = MeshData::default();
    let mut pen = 0.0;
    for (ch, advance) in text.text.chars().zip(&text.glyph_advances) {
        if !ch.is_whitespace() {
            push_box(
                &mut mesh,
                [pen, 0.0, 0.0],
                [pen + advance * BODY, text.size, text.depth],
            );
        }
        pen += advance;
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaza_assets::FontFace;

    #[test]
    fn box_has_per_face_vertices() {
        let mesh = tessellate(&Geometry::Box {
            width: 400.0,
            height: 400.0,
            depth: 12.0,
        });
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        for v in &mesh.vertices {
            assert!(v.position[0].abs() <= 200.0);
            assert!(v.position[2].abs() <= 6.0);
            assert!((0.0..=1.0).contains(&v.uv[0]));
            assert!((0.0..=1.0).contains(&v.uv[1]));
        }
    }

    #[test]
    fn plane_is_one_quad_facing_z() {
        let mesh = tessellate(&Geometry::Plane {
            width: 4000.0,
            height: 4000.0,
        });
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        for v in &mesh.vertices {
            assert_eq!(v.position[2], 0.0);
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn sphere_vertex_and_index_counts() {
        let mesh = tessellate(&Geometry::Sphere {
            radius: 4000.0,
            width_segments: 32,
            height_segments: 15,
        });
        assert_eq!(mesh.vertices.len(), 33 * 16);
        assert_eq!(mesh.indices.len(), (32 * 15 * 6) as usize);
        for v in &mesh.vertices {
            let r = (v.position[0].powi(2) + v.position[1].powi(2) + v.position[2].powi(2)).sqrt();
            assert!((r - 4000.0).abs() < 0.5);
        }
    }

    #[test]
    fn text_emits_one_slab_per_visible_glyph() {
        let font = FontFace::from_glyphs("mono", 1000.0, [('a', 500.0), (' ', 300.0)]);
        let text = TextGeometry::new("a a", 30.0, 4.0, &font);
        let mesh = tessellate(&Geometry::Text(text));
        // Two visible glyphs, the space only moves the pen.
        assert_eq!(mesh.vertices.len(), 48);
        assert_eq!(mesh.indices.len(), 72);
    }

    #[test]
    fn text_slabs_advance_along_x() {
        let font = FontFace::from_glyphs("mono", 1000.0, [('a', 500.0)]);
        let text = TextGeometry::new("aa", 30.0, 4.0, &font);
        let mesh = tessellate(&Geometry::Text(text));
        let max_x = mesh
            .vertices
            .iter()
            .map(|v| v.position[0])
            .fold(f32::MIN, f32::max);
        // Second slab ends at advance + advance * body fraction.
        assert!((max_x - (15.0 + 15.0 * 0.8)).abs() < 1e-4);
        let max_y = mesh
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        assert_eq!(max_y, 30.0);
    }

    #[test]
    fn empty_text_is_empty_mesh() {
        let font = FontFace::from_glyphs("mono", 1000.0, [('a', 500.0)]);
        let text = TextGeometry::new("", 30.0, 4.0, &font);
        let mesh = tessellate(&Geometry::Text(text));
        assert!(mesh.vertices.is_empty());
        assert!(mesh.indices.is_empty());
    }
}
