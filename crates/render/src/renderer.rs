use crate::camera::OrbitCamera;
use plaza_scene::{Geometry, Light, NodeKind, Scene};

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene and a camera, then produces output. It
/// never mutates the scene — the scene is built once and stays immutable.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene and camera.
    fn render(&self, scene: &Scene, camera: &OrbitCamera) -> Self::Output;
}

/// Text renderer: the headless embodiment of the render interface.
///
/// Produces a human-readable description of the scene layout. Used by the
/// CLI and by tests that must not require a GPU.
#[derive(Debug, Default)]
pub struct SummaryRenderer;

impl SummaryRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for SummaryRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, camera: &OrbitCamera) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Scene ({} nodes, {} meshes, {} lights) ===\n",
            scene.nodes().len(),
            scene.mesh_count(),
            scene.light_count()
        ));
        let p = camera.position();
        out.push_str(&format!(
            "Camera: pos=({:.1}, {:.1}, {:.1}) fov={:.0} aspect={:.3}\n",
            p.x,
            p.y,
            p.z,
            camera.fov.to_degrees(),
            camera.aspect
        ));

        for light in scene.lights() {
            match light {
                Light::Ambient { intensity, .. } => {
                    out.push_str(&format!("  light: ambient intensity={intensity}\n"));
                }
                Light::Directional {
                    position,
                    cast_shadow,
                    ..
                } => {
                    out.push_str(&format!(
                        "  light: directional pos=({:.0}, {:.0}, {:.0}) shadows={}\n",
                        position.x, position.y, position.z, cast_shadow
                    ));
                }
            }
        }

        for node in scene.nodes() {
            match &node.kind {
                NodeKind::Mesh(mesh) => {
                    out.push_str(&format!(
                        "  mesh: {} at ({:.1}, {:.1}, {:.1})\n",
                        describe(&mesh.geometry),
                        mesh.transform.position.x,
                        mesh.transform.position.y,
                        mesh.transform.position.z
                    ));
                }
                NodeKind::Group(group) => {
                    let texts: Vec<String> = group
                        .children
                        .iter()
                        .map(|m| describe(&m.geometry))
                        .collect();
                    out.push_str(&format!(
                        "  group{}: [{}] at ({:.1}, {:.1}, {:.1})\n",
                        group
                            .name
                            .as_deref()
                            .map(|n| format!(" {n:?}"))
                            .unwrap_or_default(),
                        texts.join(", "),
                        group.transform.position.x,
                        group.transform.position.y,
                        group.transform.position.z
                    ));
                }
            }
        }

        out
    }
}

fn describe(geometry: &Geometry) -> String {
    match geometry {
        Geometry::Box {
            width,
            height,
            depth,
        } => format!("box {width:.0}x{height:.0}x{depth:.0}"),
        Geometry::Plane { width, height } => format!("plane {width:.0}x{height:.0}"),
        Geometry::Sphere { radius, .. } => format!("sphere r={radius:.0}"),
        Geometry::Text(text) => format!("text {:?}", text.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaza_assets::{FontFace, PhraseEntry};
    use plaza_scene::builder;

    #[test]
    fn summary_of_empty_scene() {
        let scene = Scene::new();
        let out = SummaryRenderer::new().render(&scene, &OrbitCamera::default());
        assert!(out.contains("0 meshes"));
        assert!(out.contains("fov=40"));
    }

    #[test]
    fn summary_lists_scene_content() {
        let mut scene = Scene::new();
        builder::setup_environment(&mut scene);
        builder::build_sky(&mut scene, None);
        builder::build_floor(&mut scene, None);
        let font = FontFace::from_glyphs("t", 1000.0, [('A', 500.0), ('5', 500.0)]);
        builder::build_label_ring(&mut scene, &[PhraseEntry::new("A", 5.0)], &font).unwrap();

        let out = SummaryRenderer::new().render(&scene, &OrbitCamera::default());
        assert!(out.contains("ambient intensity=0.3"));
        assert!(out.contains("directional pos=(1000, 1000, 1000)"));
        assert!(out.contains("sphere r=4000"));
        assert!(out.contains("plane 4000x4000"));
        assert!(out.contains(r#"group "A""#));
        assert!(out.contains(r#"text "5""#));
    }
}
