//! Per-frame scene pipeline
//!
//! Transform, cull, light, sort and emit one solid into the framebuffer.

use crate::rasterizer::{draw_line, fill_triangle, Color, Framebuffer, Lighting, Projection, Vec3};
use super::solid::Solid;
use super::state::SceneState;

/// Distance from the camera to the solid's center
pub const CAMERA_DISTANCE: f64 = 5.0;
/// Uniform object-space scale
const SOLID_SIZE: f64 = 1.0;

/// A face that survived culling this frame
#[derive(Debug, Clone, Copy)]
pub struct FaceRecord {
    pub index: usize,
    /// Camera-space z of the centroid (more negative is farther)
    pub depth: f64,
    pub normal: Vec3,
    pub centroid: Vec3,
    pub brightness: f64,
}

/// What one frame drew
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStats {
    /// Visible face indices in draw order (farthest first)
    pub visible_faces: Vec<usize>,
    pub silhouette_edges: usize,
}

/// Object space to camera space: scale, rotate X/Y/Z, push in front of the camera
pub fn transform_vertex(v: Vec3, rotation: Vec3) -> Vec3 {
    let mut p = v
        .scale(SOLID_SIZE)
        .rotate_x(rotation.x)
        .rotate_y(rotation.y)
        .rotate_z(rotation.z);
    p.z -= CAMERA_DISTANCE;
    p
}

/// Faces whose outward normal points toward the camera, lit, farthest first
pub fn visible_faces(solid: &Solid, verts: &[Vec3], lighting: &Lighting) -> Vec<FaceRecord> {
    let mut faces: Vec<FaceRecord> = solid
        .faces
        .iter()
        .enumerate()
        .filter_map(|(index, quad)| {
            let [a, b, c, d] = quad.indices.map(|i| verts[i]);
            let normal = (b - a).cross(c - a).normalize();
            let centroid = (a + b + c + d).scale(0.25);

            // Backface culling: camera is at the origin
            let to_camera = (-centroid).normalize();
            if normal.dot(to_camera) <= 0.0 {
                return None;
            }

            Some(FaceRecord {
                index,
                depth: centroid.z,
                normal,
                centroid,
                brightness: lighting.brightness(normal),
            })
        })
        .collect();

    // Painter's order; the depth test keeps the image correct regardless
    faces.sort_by(|a, b| a.depth.total_cmp(&b.depth));
    faces
}

/// Render `solid` as seen in `state` into `fb`
pub fn render_solid(fb: &mut Framebuffer, solid: &Solid, state: &SceneState, edge_color: Color) -> FrameStats {
    let proj = Projection::new(fb.width(), fb.height(), state.zoom());
    let lighting = Lighting::at(state.time);

    let verts: Vec<Vec3> = solid
        .vertices
        .iter()
        .map(|&v| transform_vertex(v, state.rotation))
        .collect();

    let faces = visible_faces(solid, &verts, &lighting);

    for face in &faces {
        let quad = &solid.faces[face.index];
        for [a, b, c] in quad.triangles() {
            fill_triangle(fb, &proj, verts[a], verts[b], verts[c], quad.color, face.brightness);
        }
    }

    // Outline edges on the boundary of the visible hull: exactly one visible
    // face. Two means an interior crease, zero means hidden.
    let mut silhouette_edges = 0;
    for &edge in solid.edges {
        if solid.faces_sharing(edge, faces.iter().map(|f| f.index)) == 1 {
            draw_line(fb, &proj, verts[edge.a], verts[edge.b], edge_color);
            silhouette_edges += 1;
        }
    }

    FrameStats {
        visible_faces: faces.iter().map(|f| f.index).collect(),
        silhouette_edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::EMPTY_DEPTH;
    use crate::scene::solid::CUBE;

    fn render(rotation: Vec3, zoom: f64) -> (Framebuffer, FrameStats) {
        let mut fb = Framebuffer::new(40, 20).unwrap();
        fb.clear();
        let state = SceneState::new(rotation, zoom);
        let stats = render_solid(&mut fb, &CUBE, &state, Color::WHITE);
        (fb, stats)
    }

    #[test]
    fn test_unrotated_cube_shows_front_only() {
        let (_, stats) = render(Vec3::ZERO, 0.6);
        assert_eq!(stats.visible_faces, vec![1]);
        assert_eq!(stats.silhouette_edges, 4);
    }

    #[test]
    fn test_start_orientation_shows_three_faces() {
        let (_, stats) = render(Vec3::new(0.7, 0.9, 0.3), 0.6);
        let mut faces = stats.visible_faces.clone();
        faces.sort_unstable();
        assert_eq!(faces, vec![1, 2, 4]);
        // Hexagonal outline: the three creases between visible faces are skipped
        assert_eq!(stats.silhouette_edges, 6);
    }

    #[test]
    fn test_visible_faces_sorted_far_to_near() {
        let verts: Vec<Vec3> = CUBE
            .vertices
            .iter()
            .map(|&v| transform_vertex(v, Vec3::new(0.7, 0.9, 0.3)))
            .collect();
        let faces = visible_faces(&CUBE, &verts, &Lighting::at(0.0));
        assert_eq!(faces.len(), 3);
        for pair in faces.windows(2) {
            assert!(pair[0].depth <= pair[1].depth);
        }
        for f in &faces {
            assert!((f.normal.len() - 1.0).abs() < 1e-9);
            assert!((0.0..=1.0).contains(&f.brightness));
            assert_eq!(f.depth, f.centroid.z);
        }
    }

    #[test]
    fn test_unrotated_frame_contents() {
        let (fb, _) = render(Vec3::ZERO, 0.6);

        // Front face fills the middle, lit by ambient only at t = 0
        let front = Color::new(0, 128, 255).shade(0.15);
        let center = fb.cell(20, 10);
        assert_eq!(center.top, Some(front));
        assert_eq!(center.bottom, Some(front));

        // Bottom silhouette edge runs along sub-pixel row 31
        let edge = fb.cell(20, 15);
        assert_eq!(edge.top, Some(front));
        assert_eq!(edge.bottom, Some(Color::WHITE));

        // Left silhouette edge runs along column 8
        assert_eq!(fb.cell(8, 10).top, Some(Color::WHITE));

        // Corners stay empty
        assert_eq!(fb.cell(0, 0).top, None);
        assert_eq!(fb.cell(39, 19).bottom, None);
    }

    #[test]
    fn test_drawn_depths_stay_on_the_solid() {
        for rotation in [Vec3::ZERO, Vec3::new(0.7, 0.9, 0.3), Vec3::new(2.0, -1.0, 4.0)] {
            let (fb, _) = render(rotation, 0.6);
            for y in 0..fb.height() {
                for x in 0..fb.width() {
                    let cell = fb.cell(x, y);
                    let (top, bottom) = fb.depths(x, y);
                    for (color, depth) in [(cell.top, top), (cell.bottom, bottom)] {
                        if color.is_some() {
                            assert!(depth > EMPTY_DEPTH);
                            // Cube corners are at most sqrt(3) from its center
                            assert!(depth > -5.0 - 1.74 && depth < -5.0 + 1.75);
                        } else {
                            assert_eq!(depth, EMPTY_DEPTH);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let (a, sa) = render(Vec3::new(1.3, 0.2, -0.8), 1.2);
        let (b, sb) = render(Vec3::new(1.3, 0.2, -0.8), 1.2);
        assert_eq!(sa, sb);
        for y in 0..a.height() {
            for x in 0..a.width() {
                assert_eq!(a.cell(x, y), b.cell(x, y));
            }
        }
    }
}
