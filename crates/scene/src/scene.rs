use crate::geometry::Geometry;
use crate::light::Light;
use crate::material::Material;
use glam::Mat4;
use plaza_common::{Color, ObjectId, Transform};

/// Shadow mapping mode for the whole scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowMapMode {
    #[default]
    Off,
    /// Percentage-closer filtered soft shadows.
    PcfSoft,
}

/// A renderable (geometry, material, transform) triple.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub geometry: Geometry,
    pub material: Material,
    pub transform: Transform,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Mesh {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self {
            geometry,
            material,
            transform: Transform::default(),
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        let t = &self.transform;
        Mat4::from_scale_rotation_translation(t.scale, t.rotation, t.position)
    }
}

/// One parent transform over a set of child meshes.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub name: Option<String>,
    pub transform: Transform,
    pub children: Vec<Mesh>,
}

impl Group {
    pub fn new(transform: Transform, children: Vec<Mesh>) -> Self {
        Self {
            name: None,
            transform,
            children,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn model_matrix(&self) -> Mat4 {
        let t = &self.transform;
        Mat4::from_scale_rotation_translation(t.scale, t.rotation, t.position)
    }
}

/// A node in the scene: either a single mesh or a group.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Mesh(Mesh),
    Group(Group),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub id: ObjectId,
    pub kind: NodeKind,
}

/// One mesh resolved to its world-space model matrix, ready to draw.
#[derive(Debug, Clone)]
pub struct DrawItem<'a> {
    pub model: Mat4,
    pub mesh: &'a Mesh,
}

/// The scene graph: an ordered collection of nodes plus lights.
///
/// Owns everything added to it for the lifetime of the process. Nodes keep
/// insertion order; adding the same content twice adds a second copy.
#[derive(Debug, Clone)]
pub struct Scene {
    nodes: Vec<SceneNode>,
    lights: Vec<Light>,
    pub background: Color,
    pub shadow_map: ShadowMapMode,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            lights: Vec::new(),
            background: Color::WHITE,
            shadow_map: ShadowMapMode::Off,
        }
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> ObjectId {
        let id = ObjectId::new();
        self.nodes.push(SceneNode {
            id,
            kind: NodeKind::Mesh(mesh),
        });
        id
    }

    pub fn add_group(&mut self, group: Group) -> ObjectId {
        let id = ObjectId::new();
        self.nodes.push(SceneNode {
            id,
            kind: NodeKind::Group(group),
        });
        id
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Groups in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.nodes.iter().filter_map(|n| match &n.kind {
            NodeKind::Group(g) => Some(g),
            _ => None,
        })
    }

    pub fn group_count(&self) -> usize {
        self.groups().count()
    }

    /// Total mesh count, counting group children.
    pub fn mesh_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|n| match &n.kind {
                NodeKind::Mesh(_) => 1,
                NodeKind::Group(g) => g.children.len(),
            })
            .sum()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Flatten the graph into draw items with world-space model matrices.
    /// Group children compose as `group * child`.
    pub fn draw_list(&self) -> Vec<DrawItem<'_>> {
        let mut items = Vec::with_capacity(self.mesh_count());
        for node in &self.nodes {
            match &node.kind {
                NodeKind::Mesh(mesh) => items.push(DrawItem {
                    model: mesh.model_matrix(),
                    mesh,
                }),
                NodeKind::Group(group) => {
                    let parent = group.model_matrix();
                    for child in &group.children {
                        items.push(DrawItem {
                            model: parent * child.model_matrix(),
                            mesh: child,
                        });
                    }
                }
            }
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3, Vec4};
    use plaza_common::Transform;

    fn unit_box() -> Mesh {
        Mesh::new(
            Geometry::Box {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
            Material::unlit(Color::WHITE),
        )
    }

    #[test]
    fn scene_starts_empty() {
        let s = Scene::new();
        assert_eq!(s.mesh_count(), 0);
        assert_eq!(s.group_count(), 0);
        assert_eq!(s.light_count(), 0);
    }

    #[test]
    fn nodes_keep_insertion_order() {
        let mut s = Scene::new();
        let a = s.add_mesh(unit_box());
        let b = s.add_mesh(unit_box());
        assert_eq!(s.nodes()[0].id, a);
        assert_eq!(s.nodes()[1].id, b);
        assert_ne!(a, b);
    }

    #[test]
    fn adding_twice_adds_two_copies() {
        let mut s = Scene::new();
        s.add_mesh(unit_box());
        s.add_mesh(unit_box());
        assert_eq!(s.mesh_count(), 2);
    }

    #[test]
    fn draw_list_composes_group_transforms() {
        let mut s = Scene::new();
        let mut child = unit_box();
        child.transform.position = Vec3::new(50.0, 0.0, 0.0);
        let group = Group::new(
            Transform {
                position: Vec3::new(0.0, 10.0, 0.0),
                rotation: Quat::IDENTITY,
                scale: Vec3::new(2.0, 3.0, 2.0),
            },
            vec![child],
        );
        s.add_group(group);

        let items = s.draw_list();
        assert_eq!(items.len(), 1);
        let origin = items[0].model * Vec4::new(0.0, 0.0, 0.0, 1.0);
        // Child offset scales by the group scale before translating.
        assert!((origin.x - 100.0).abs() < 1e-4);
        assert!((origin.y - 10.0).abs() < 1e-4);
    }
}
