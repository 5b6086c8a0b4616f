//! The plaza scene builders.
//!
//! Each builder populates the scene with one fixed feature of the plaza:
//! sky sphere, floor plane, the labeled phrase ring, and the signage box.
//! Builders take `&mut Scene` explicitly and validate their inputs at the
//! boundary; calling a builder twice adds a second copy.

use crate::geometry::{Geometry, TextGeometry};
use crate::light::{Light, ShadowConfig};
use crate::material::{Material, TextureMap};
use crate::scene::{Group, Mesh, Scene, ShadowMapMode};
use glam::{Quat, Vec3};
use plaza_assets::{FontFace, PhraseEntry, TextureId, validate_phrases};
use plaza_common::{Color, ObjectId, Transform};

/// Renderer clear color.
pub const CLEAR_COLOR: Color = Color::from_hex(0xeeeeee);
/// Ambient light intensity.
pub const AMBIENT_INTENSITY: f32 = 0.3;
/// Directional light position; it shines toward the origin.
pub const LIGHT_POSITION: Vec3 = Vec3::new(1000.0, 1000.0, 1000.0);

pub const SKY_RADIUS: f32 = 4000.0;
pub const SKY_SEGMENTS: (u32, u32) = (32, 15);
pub const SKY_REPEAT: [f32; 2] = [5.0, 5.0];

pub const FLOOR_SIZE: f32 = 4000.0;
pub const FLOOR_REPEAT: [f32; 2] = [10.0, 10.0];

/// Radial distance of each phrase group from the origin.
pub const RING_RADIUS: f32 = 250.0;
pub const TEXT_SIZE: f32 = 30.0;
pub const TEXT_DEPTH: f32 = 4.0;
/// Offset of the title mesh relative to the vote mesh inside a group.
pub const TITLE_OFFSET: Vec3 = Vec3::new(50.0, 0.0, 0.0);
/// Non-uniform scale applied to every phrase group.
pub const RING_SCALE: Vec3 = Vec3::new(2.0, 3.0, 2.0);

/// Errors from scene construction.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("signage {name} must be positive and finite, got {value}")]
    InvalidDimension { name: &'static str, value: f32 },
}

/// Set up clear color, soft shadow mapping, and the two scene lights:
/// ambient at 0.3 and one shadow-casting directional light.
pub fn setup_environment(scene: &mut Scene) {
    scene.background = CLEAR_COLOR;
    scene.shadow_map = ShadowMapMode::PcfSoft;
    scene.add_light(Light::ambient(AMBIENT_INTENSITY));
    scene.add_light(Light::Directional {
        color: Color::WHITE,
        intensity: 1.0,
        position: LIGHT_POSITION,
        cast_shadow: true,
        shadow: ShadowConfig::default(),
    });
    tracing::debug!("environment configured: {} lights", scene.light_count());
}

/// Add the sky: a large sphere with an unlit, double-sided material and a
/// 5x5 repeating texture. `None` renders the sphere untextured.
pub fn build_sky(scene: &mut Scene, texture: Option<TextureId>) -> ObjectId {
    let material = Material::unlit(Color::WHITE)
        .double_sided()
        .with_map(texture.map(|id| TextureMap::repeating(id, SKY_REPEAT[0], SKY_REPEAT[1])));
    let mesh = Mesh::new(
        Geometry::Sphere {
            radius: SKY_RADIUS,
            width_segments: SKY_SEGMENTS.0,
            height_segments: SKY_SEGMENTS.1,
        },
        material,
    );
    scene.add_mesh(mesh)
}

/// Add the floor: a 4000x4000 plane rotated flat, with a lit double-sided
/// material and a 10x10 repeating texture. The floor receives shadows.
pub fn build_floor(scene: &mut Scene, texture: Option<TextureId>) -> ObjectId {
    let material = Material::lit(Color::WHITE)
        .double_sided()
        .with_map(texture.map(|id| TextureMap::repeating(id, FLOOR_REPEAT[0], FLOOR_REPEAT[1])));
    let mut mesh = Mesh::new(
        Geometry::Plane {
            width: FLOOR_SIZE,
            height: FLOOR_SIZE,
        },
        material,
    );
    mesh.transform.rotation = Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2);
    mesh.receive_shadow = true;
    scene.add_mesh(mesh)
}

/// Add one group per phrase entry, laid out in input order around a full
/// circle with equal angular spacing. Each group holds a white title mesh
/// offset by `TITLE_OFFSET` and a yellow vote-count mesh at the group
/// origin, both extruded and shadow-casting.
///
/// An empty entry list builds nothing and returns an empty vec.
pub fn build_label_ring(
    scene: &mut Scene,
    entries: &[PhraseEntry],
    font: &FontFace,
) -> Result<Vec<ObjectId>, plaza_assets::PhraseError> {
    validate_phrases(entries)?;

    let n = entries.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut ids = Vec::with_capacity(n);
    for (i, entry) in entries.iter().enumerate() {
        let angle = 2.0 * i as f32 * std::f32::consts::PI / n as f32;
        let rotation = Quat::from_rotation_y(angle);
        let base = rotation * Vec3::new(RING_RADIUS, 0.0, 0.0);

        let mut title = Mesh::new(
            Geometry::Text(TextGeometry::new(&entry.title, TEXT_SIZE, TEXT_DEPTH, font)),
            Material::lit(Color::WHITE).double_sided(),
        );
        title.transform = Transform::at(TITLE_OFFSET);
        title.cast_shadow = true;

        let mut votes = Mesh::new(
            Geometry::Text(TextGeometry::new(
                entry.vote_label(),
                TEXT_SIZE,
                TEXT_DEPTH,
                font,
            )),
            Material::lit(Color::YELLOW).double_sided(),
        );
        votes.cast_shadow = true;

        let group = Group::new(
            Transform {
                position: base,
                rotation,
                scale: RING_SCALE,
            },
            vec![title, votes],
        )
        .named(&entry.title);
        ids.push(scene.add_group(group));
    }

    tracing::debug!(groups = n, "phrase ring built");
    Ok(ids)
}

/// Add the signage box: unlit, double-sided, textured, resting on the floor
/// (vertical center at `height / 2`), casting shadows.
pub fn build_signage(
    scene: &mut Scene,
    width: f32,
    height: f32,
    depth: f32,
    texture: Option<TextureId>,
) -> Result<ObjectId, SceneError> {
    for (name, value) in [("width", width), ("height", height), ("depth", depth)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(SceneError::InvalidDimension { name, value });
        }
    }

    let material = Material::unlit(Color::WHITE)
        .double_sided()
        .with_map(texture.map(TextureMap::new));
    let mut mesh = Mesh::new(
        Geometry::Box {
            width,
            height,
            depth,
        },
        material,
    );
    mesh.transform.position = Vec3::new(0.0, height / 2.0, 0.0);
    mesh.cast_shadow = true;
    Ok(scene.add_mesh(mesh))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Shading, WrapMode};
    use crate::scene::NodeKind;
    use std::f32::consts::{PI, TAU};

    fn test_font() -> FontFace {
        FontFace::from_glyphs(
            "test",
            1000.0,
            ('0'..='9')
                .chain('A'..='Z')
                .chain('a'..='z')
                .map(|ch| (ch, 600.0)),
        )
    }

    fn entries(n: usize) -> Vec<PhraseEntry> {
        (0..n)
            .map(|i| PhraseEntry::new(format!("phrase{i}"), i as f64))
            .collect()
    }

    /// Recover the yaw angle of a rotation about +Y, in [0, 2pi).
    fn yaw_of(q: Quat) -> f32 {
        let v = q * Vec3::X;
        let angle = (-v.z).atan2(v.x);
        if angle < 0.0 { angle + TAU } else { angle }
    }

    #[test]
    fn ring_produces_n_groups_of_two_meshes() {
        let mut scene = Scene::new();
        let font = test_font();
        let ids = build_label_ring(&mut scene, &entries(7), &font).unwrap();
        assert_eq!(ids.len(), 7);
        assert_eq!(scene.group_count(), 7);
        for group in scene.groups() {
            assert_eq!(group.children.len(), 2);
            for child in &group.children {
                assert!(child.cast_shadow);
                assert!(matches!(child.geometry, Geometry::Text(_)));
            }
        }
    }

    #[test]
    fn ring_spacing_is_exactly_tau_over_n() {
        let mut scene = Scene::new();
        let font = test_font();
        let n = 5;
        build_label_ring(&mut scene, &entries(n), &font).unwrap();

        let yaws: Vec<f32> = scene.groups().map(|g| yaw_of(g.transform.rotation)).collect();
        let step = TAU / n as f32;
        for (i, yaw) in yaws.iter().enumerate() {
            assert!(
                (yaw - step * i as f32).abs() < 1e-4,
                "group {i}: expected {} got {yaw}",
                step * i as f32
            );
        }
    }

    #[test]
    fn ring_keeps_input_order() {
        let mut scene = Scene::new();
        let font = test_font();
        let input = vec![
            PhraseEntry::new("first", 1.0),
            PhraseEntry::new("second", 2.0),
            PhraseEntry::new("third", 3.0),
        ];
        build_label_ring(&mut scene, &input, &font).unwrap();
        let names: Vec<_> = scene.groups().map(|g| g.name.clone().unwrap()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn empty_ring_builds_nothing() {
        let mut scene = Scene::new();
        let font = test_font();
        let ids = build_label_ring(&mut scene, &[], &font).unwrap();
        assert!(ids.is_empty());
        assert_eq!(scene.group_count(), 0);
    }

    #[test]
    fn ring_group_position_sits_on_radius() {
        let mut scene = Scene::new();
        let font = test_font();
        build_label_ring(&mut scene, &entries(4), &font).unwrap();
        for group in scene.groups() {
            let p = group.transform.position;
            assert!((p.length() - RING_RADIUS).abs() < 1e-3);
            assert_eq!(p.y, 0.0);
            assert_eq!(group.transform.scale, RING_SCALE);
        }
    }

    #[test]
    fn ring_rejects_invalid_entries() {
        let mut scene = Scene::new();
        let font = test_font();
        let bad = vec![PhraseEntry::new("oops", -3.0)];
        assert!(build_label_ring(&mut scene, &bad, &font).is_err());
        assert_eq!(scene.group_count(), 0);
    }

    #[test]
    fn signage_rests_on_floor() {
        let mut scene = Scene::new();
        let id = build_signage(&mut scene, 400.0, 400.0, 12.0, None).unwrap();
        let NodeKind::Mesh(mesh) = &scene.get(id).unwrap().kind else {
            panic!("signage must be a mesh");
        };
        assert_eq!(mesh.transform.position.y, 200.0);
        assert_eq!(mesh.transform.position.x, 0.0);
        assert!(mesh.cast_shadow);
        assert!(mesh.material.double_sided);
        assert_eq!(mesh.material.shading, Shading::Unlit);
    }

    #[test]
    fn signage_y_independent_of_width_and_depth() {
        let mut scene = Scene::new();
        let id = build_signage(&mut scene, 9999.0, 400.0, 1.0, None).unwrap();
        let NodeKind::Mesh(mesh) = &scene.get(id).unwrap().kind else {
            panic!()
        };
        assert_eq!(mesh.transform.position.y, 200.0);
    }

    #[test]
    fn signage_rejects_bad_dimensions() {
        let mut scene = Scene::new();
        assert!(build_signage(&mut scene, 0.0, 400.0, 12.0, None).is_err());
        assert!(build_signage(&mut scene, 400.0, -1.0, 12.0, None).is_err());
        assert!(build_signage(&mut scene, 400.0, 400.0, f32::NAN, None).is_err());
        assert_eq!(scene.mesh_count(), 0);
    }

    #[test]
    fn sky_and_floor_texture_settings() {
        let mut scene = Scene::new();
        let sky_id = build_sky(&mut scene, Some(TextureId(11)));
        let floor_id = build_floor(&mut scene, Some(TextureId(22)));

        let NodeKind::Mesh(sky) = &scene.get(sky_id).unwrap().kind else {
            panic!()
        };
        let map = sky.material.map.unwrap();
        assert_eq!(map.repeat, [5.0, 5.0]);
        assert_eq!(map.wrap_s, WrapMode::Repeat);
        assert_eq!(map.wrap_t, WrapMode::Repeat);
        assert_eq!(sky.material.shading, Shading::Unlit);
        assert!(sky.material.double_sided);
        assert!(matches!(
            sky.geometry,
            Geometry::Sphere {
                radius,
                width_segments: 32,
                height_segments: 15,
            } if radius == 4000.0
        ));

        let NodeKind::Mesh(floor) = &scene.get(floor_id).unwrap().kind else {
            panic!()
        };
        let map = floor.material.map.unwrap();
        assert_eq!(map.repeat, [10.0, 10.0]);
        assert_eq!(map.wrap_s, WrapMode::Repeat);
        assert_eq!(map.wrap_t, WrapMode::Repeat);
        assert_eq!(floor.material.shading, Shading::Lambert);
        assert!(floor.receive_shadow);
        // Lies horizontal: rotated -pi/2 about X.
        let expected = Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2);
        assert!(floor.transform.rotation.dot(expected).abs() > 1.0 - 1e-5);
    }

    #[test]
    fn untextured_sky_still_builds() {
        let mut scene = Scene::new();
        let id = build_sky(&mut scene, None);
        let NodeKind::Mesh(sky) = &scene.get(id).unwrap().kind else {
            panic!()
        };
        assert!(sky.material.map.is_none());
    }

    #[test]
    fn environment_lights() {
        let mut scene = Scene::new();
        setup_environment(&mut scene);
        assert_eq!(scene.background, CLEAR_COLOR);
        assert_eq!(scene.shadow_map, ShadowMapMode::PcfSoft);
        assert_eq!(scene.light_count(), 2);

        let ambient = scene.lights().iter().find(|l| l.is_ambient()).unwrap();
        let Light::Ambient { intensity, .. } = ambient else {
            panic!()
        };
        assert_eq!(*intensity, AMBIENT_INTENSITY);

        let directional = scene.lights().iter().find(|l| !l.is_ambient()).unwrap();
        let Light::Directional {
            position,
            cast_shadow,
            shadow,
            ..
        } = directional
        else {
            panic!()
        };
        assert_eq!(*position, LIGHT_POSITION);
        assert!(cast_shadow);
        assert_eq!(shadow.extent, 5000.0);
        assert_eq!(shadow.far, 10_000.0);
        assert_eq!(shadow.map_size, [5000, 5000]);
    }

    /// Two entries land on opposite sides of the ring.
    #[test]
    fn apple_banana_layout() {
        let mut scene = Scene::new();
        let font = test_font();
        let input = vec![
            PhraseEntry::new("Apple", 5.0),
            PhraseEntry::new("Banana", 2.0),
        ];
        build_label_ring(&mut scene, &input, &font).unwrap();

        let groups: Vec<_> = scene.groups().collect();
        assert_eq!(groups.len(), 2);
        assert!((yaw_of(groups[0].transform.rotation) - 0.0).abs() < 1e-5);
        assert!((yaw_of(groups[1].transform.rotation) - PI).abs() < 1e-4);

        let texts = |g: &Group| -> Vec<String> {
            g.children
                .iter()
                .map(|m| match &m.geometry {
                    Geometry::Text(t) => t.text.clone(),
                    _ => panic!("ring children must be text"),
                })
                .collect()
        };
        assert_eq!(texts(groups[0]), vec!["Apple", "5"]);
        assert_eq!(texts(groups[1]), vec!["Banana", "2"]);
    }
}
