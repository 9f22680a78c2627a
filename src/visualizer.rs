//! 3D visualization.

use std::collections::BTreeMap;

use bevy::{
    core_pipeline::{bloom::BloomSettings, tonemapping::Tonemapping},
    pbr::NotShadowCaster,
    prelude::*,
};
use rand::{
    distr::{Distribution, Uniform},
    Rng, SeedableRng,
};
use rand_chacha::ChaCha8Rng;

use crate::{
    domain::{Angle, Craft, CraftConfig, DebrisField, DebrisId, Point3, Spherical},
    resource::{CraftRes, FieldRes, PausedRes},
};

pub struct Visualizer;

impl Plugin for Visualizer {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, set_up)
            .add_systems(
                Update,
                (
                    update_text,
                    handle_keyboard_input,
                    (focus_camera, update_craft, update_debris).chain(),
                ),
            )
            .insert_resource(create_craft())
            .insert_resource(create_field())
            .init_resource::<Scene>();
    }
}

#[derive(Resource, Default)]
pub struct Scene {
    craft: CraftRig,
    debris: BTreeMap<DebrisId, Entity>,
    lights: LightRig,
    camera: SceneCamera,
    view: CameraView,
    show_text: bool,
    struck: usize,
}

#[derive(Default)]
struct CraftRig {
    root: Option<Entity>,
    beacon: Option<Entity>,
}

#[derive(Default)]
struct LightRig {
    directional: Option<Entity>,
    left: Option<Entity>,
    middle: Option<Entity>,
    right: Option<Entity>,
}

#[derive(Default)]
struct SceneCamera {
    is_focus: Vec3,
    should_focus: Vec3,
    is_position: Vec3,
    should_position: Vec3,
}

#[derive(Clone, Copy, Default, Eq, PartialEq)]
enum CameraView {
    #[default]
    Front,
    Follow,
    Side,
}

const RNG_SEED: u64 = 44987251960331;
const SHELL_RADIUS: f64 = 70.0;
const STEERING_STEP: Angle = Angle::new(2.0);
const PLANET_RADIUS: f32 = 50.0;
const SKY_RADIUS: f32 = 600.0;

const INITIAL_CAMERA_POSITION: [f32; 3] = [0.0, 40.0, 260.0];

const DEBRIS_CATEGORIES: [(DebrisKind, usize); 4] = [
    (DebrisKind::Block, 14),
    (DebrisKind::Drum, 12),
    (DebrisKind::Pod, 10),
    (DebrisKind::Ring, 8),
];

#[derive(Clone, Copy, Debug)]
enum DebrisKind {
    Block,
    Drum,
    Pod,
    Ring,
}

impl DebrisKind {
    /// Bounding-sphere radius of the category's mesh.
    fn collision_radius(self) -> f64 {
        match self {
            DebrisKind::Block => 3.0_f64.sqrt() * 2.0,
            DebrisKind::Drum => (2.0_f64.powi(2) + 2.5_f64.powi(2)).sqrt(),
            DebrisKind::Pod => 3.5,
            DebrisKind::Ring => 3.2,
        }
    }

    fn mesh(self) -> Mesh {
        match self {
            DebrisKind::Block => Cuboid::new(4.0, 4.0, 4.0).into(),
            DebrisKind::Drum => Cylinder::new(2.0, 5.0).into(),
            DebrisKind::Pod => Capsule3d::new(1.5, 4.0).into(),
            DebrisKind::Ring => Torus::new(1.0, 3.2).into(),
        }
    }

    fn color(self) -> Color {
        match self {
            DebrisKind::Block => Color::rgb(0.55, 0.50, 0.45),
            DebrisKind::Drum => Color::rgb(0.35, 0.42, 0.50),
            DebrisKind::Pod => Color::rgb(0.60, 0.55, 0.35),
            DebrisKind::Ring => Color::rgb(0.45, 0.35, 0.35),
        }
    }
}

fn create_craft() -> CraftRes {
    Craft::new(CraftConfig::new(SHELL_RADIUS, STEERING_STEP, 6.0, 2.0).unwrap()).into()
}

fn create_field() -> FieldRes {
    DebrisField::new(SHELL_RADIUS).unwrap().into()
}

fn set_up(
    mut scene: ResMut<Scene>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    craft: Res<CraftRes>,
    mut field: ResMut<FieldRes>,
) {
    create_planet(&mut commands, &mut meshes, &mut materials);
    create_sky(&mut commands, &mut meshes, &mut materials);
    create_debris(
        &mut scene,
        &mut field,
        &mut commands,
        &mut meshes,
        &mut materials,
    );
    create_craft_rig(
        craft.config(),
        &mut scene.craft,
        &mut commands,
        &mut meshes,
        &mut materials,
    );
    create_lights(&mut scene.lights, &mut commands, &mut meshes, &mut materials);
    create_camera(&mut scene, &mut commands);
    create_text(&mut commands);
}

fn create_planet(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn(PbrBundle {
        mesh: meshes.add(Sphere::new(PLANET_RADIUS)),
        material: materials.add(StandardMaterial {
            base_color: Color::rgb(0.18, 0.45, 0.38),
            perceptual_roughness: 0.9,
            ..default()
        }),
        ..default()
    });
}

fn create_sky(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    // Sun
    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Sphere::new(12.0)),
            material: materials.add(StandardMaterial {
                emissive: Color::rgb_linear(200000.0, 180000.0, 160000.0),
                ..default()
            }),
            transform: Transform::from_xyz(420.0, 160.0, -260.0),
            ..default()
        },
        NotShadowCaster,
    ));

    // Stars
    let mut rng = ChaCha8Rng::seed_from_u64(RNG_SEED);
    let height_rng = Uniform::try_from(-1.0_f32..=1.0).unwrap();
    let intensity_rng = Uniform::try_from(0.0_f32..=1.0).unwrap();
    let azimuth_rng = Uniform::try_from(0.0..=2.0 * std::f32::consts::PI).unwrap();

    let number_of_stars = 800;

    let stars = (0..number_of_stars)
        .map(|_| {
            let u = height_rng.sample(&mut rng);
            let t = azimuth_rng.sample(&mut rng);
            let ring = (1.0 - u * u).sqrt() * SKY_RADIUS;
            (
                ring * t.cos(),
                u * SKY_RADIUS,
                ring * t.sin(),
                intensity_rng.sample(&mut rng),
            )
        })
        .collect::<Vec<_>>();

    for (x, y, z, i) in stars {
        commands.spawn((
            PbrBundle {
                mesh: meshes.add(Sphere::new(0.8)),
                material: materials.add(StandardMaterial {
                    emissive: Color::rgb_linear(i * 15000.0, i * 15000.0, i * 15000.0),
                    ..default()
                }),
                transform: Transform::from_xyz(x, y, z),
                ..default()
            },
            NotShadowCaster,
        ));
    }
}

fn create_debris(
    scene: &mut ResMut<Scene>,
    field: &mut ResMut<FieldRes>,
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    let mut rng = ChaCha8Rng::seed_from_u64(RNG_SEED);

    for (kind, count) in DEBRIS_CATEGORIES {
        for _ in 0..count {
            let id = match field.scatter(kind.collision_radius(), &mut rng) {
                Ok(id) => id,
                Err(error) => {
                    warn!("skipping {kind:?} placement: {error}");
                    continue;
                }
            };
            let Some(position) = field.get(id).map(|d| d.position()) else {
                continue;
            };

            let entity = commands
                .spawn(PbrBundle {
                    mesh: meshes.add(kind.mesh()),
                    material: materials.add(StandardMaterial {
                        base_color: kind.color(),
                        metallic: 0.3,
                        perceptual_roughness: 0.8,
                        ..default()
                    }),
                    transform: Transform::from_translation(to_bevy_position(position))
                        .with_rotation(Quat::from_euler(
                            EulerRot::ZYX,
                            rng.random_range(0.0..=2.0 * std::f32::consts::PI),
                            rng.random_range(0.0..=2.0 * std::f32::consts::PI),
                            rng.random_range(0.0..=2.0 * std::f32::consts::PI),
                        )),
                    ..default()
                })
                .id();

            scene.debris.insert(id, entity);
        }
    }

    info!("scattered {} debris around the shell", scene.debris.len());
}

fn create_craft_rig(
    config: &CraftConfig,
    rig: &mut CraftRig,
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    rig.root = Some(commands.spawn(SpatialBundle::default()).id());

    let hull = commands
        .spawn(PbrBundle {
            mesh: meshes.add(Capsule3d::new(
                config.hull_radius() as f32,
                config.hull_length() as f32,
            )),
            material: materials.add(StandardMaterial {
                base_color: Color::rgb(0.75, 0.78, 0.82),
                metallic: 1.0,
                perceptual_roughness: 0.4,
                ..default()
            }),
            ..default()
        })
        .id();

    let canopy = commands
        .spawn(PbrBundle {
            mesh: meshes.add(Sphere::new(0.35 * config.hull_radius() as f32)),
            material: materials.add(StandardMaterial {
                emissive: Color::rgb_linear(800.0, 900.0, 1200.0),
                ..default()
            }),
            transform: Transform::from_xyz(
                0.0,
                0.5 * config.hull_length() as f32,
                0.8 * config.hull_radius() as f32,
            ),
            ..default()
        })
        .id();

    let thruster = commands
        .spawn(PbrBundle {
            mesh: meshes.add(Cylinder::new(
                0.5 * config.hull_radius() as f32,
                0.4 * config.hull_radius() as f32,
            )),
            material: materials.add(StandardMaterial {
                emissive: Color::rgb_linear(4000.0, 1500.0, 300.0),
                ..default()
            }),
            transform: Transform::from_xyz(
                0.0,
                -0.5 * (config.hull_length() + config.hull_radius()) as f32,
                0.0,
            ),
            ..default()
        })
        .id();

    commands
        .entity(rig.root.unwrap())
        .push_children(&[hull, canopy, thruster]);

    rig.beacon = Some(
        commands
            .spawn(PointLightBundle {
                point_light: PointLight {
                    color: Color::rgb(1.0, 0.9, 0.7),
                    intensity: 2_000_000.0,
                    range: 60.0,
                    ..default()
                },
                ..default()
            })
            .id(),
    );
}

fn create_lights(
    lights: &mut LightRig,
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    lights.directional = Some(
        commands
            .spawn(DirectionalLightBundle {
                directional_light: DirectionalLight {
                    illuminance: 1000.0,
                    shadows_enabled: true,
                    ..default()
                },
                transform: Transform::from_rotation(Quat::from_euler(
                    EulerRot::ZYX,
                    0.0,
                    0.85 * std::f32::consts::PI,
                    -std::f32::consts::FRAC_PI_8,
                )),
                ..default()
            })
            .id(),
    );

    let spotlights = [-140.0_f32, 0.0, 140.0]
        .into_iter()
        .map(|x| {
            commands.spawn((
                PbrBundle {
                    mesh: meshes.add(Sphere::new(2.5)),
                    material: materials.add(StandardMaterial {
                        emissive: Color::rgb_linear(8000.0, 8000.0, 8000.0),
                        ..default()
                    }),
                    transform: Transform::from_xyz(x, 130.0, 0.0),
                    ..default()
                },
                NotShadowCaster,
            ));

            commands
                .spawn(SpotLightBundle {
                    spot_light: SpotLight {
                        color: Color::WHITE,
                        intensity: 80_000_000.0,
                        range: 400.0,
                        outer_angle: std::f32::consts::PI / 8.0,
                        shadows_enabled: true,
                        ..default()
                    },
                    transform: Transform::from_xyz(x, 120.0, 0.0).looking_at(Vec3::ZERO, Vec3::Y),
                    ..default()
                })
                .id()
        })
        .collect::<Vec<_>>();

    lights.left = Some(spotlights[0]);
    lights.middle = Some(spotlights[1]);
    lights.right = Some(spotlights[2]);
}

fn create_camera(scene: &mut ResMut<Scene>, commands: &mut Commands) {
    scene.camera.is_focus = Vec3::ZERO;
    scene.camera.should_focus = scene.camera.is_focus;
    scene.camera.is_position = Vec3::from(INITIAL_CAMERA_POSITION);
    scene.camera.should_position = scene.camera.is_position;

    commands.spawn((
        Camera3dBundle {
            camera: Camera {
                hdr: true,
                ..default()
            },
            tonemapping: Tonemapping::TonyMcMapface,
            transform: Transform::from_translation(scene.camera.is_position)
                .looking_at(scene.camera.is_focus, Vec3::Y),
            ..default()
        },
        BloomSettings::NATURAL,
    ));
}

fn create_text(commands: &mut Commands) {
    let text_style = TextStyle {
        font_size: 20.0,
        ..default()
    };
    commands.spawn(
        TextBundle::from_sections(vec![TextSection::new("", text_style)]).with_style(Style {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        }),
    );
}

fn update_craft(scene: Res<Scene>, mut transforms: Query<&mut Transform>, craft: Res<CraftRes>) {
    let translation = to_bevy_position(craft.position());
    let radial = translation.normalize_or_zero();

    if let Some(entity) = scene.craft.root {
        if let Ok(mut craft_transform) = transforms.get_mut(entity) {
            *craft_transform = Transform {
                translation,
                rotation: Quat::from_rotation_arc(Vec3::Y, radial),
                ..default()
            };
        }
    }

    if let Some(entity) = scene.craft.beacon {
        if let Ok(mut beacon_transform) = transforms.get_mut(entity) {
            *beacon_transform = Transform {
                translation: translation + radial * 6.0,
                ..default()
            };
        }
    }
}

fn update_debris(mut scene: ResMut<Scene>, field: Res<FieldRes>, mut commands: Commands) {
    let struck = scene
        .debris
        .iter()
        .filter(|(id, _)| !field.contains(**id))
        .map(|(id, entity)| (*id, *entity))
        .collect::<Vec<_>>();

    for (id, entity) in struck {
        commands.entity(entity).despawn_recursive();
        scene.debris.remove(&id);
        scene.struck += 1;
    }
}

#[allow(clippy::type_complexity)]
fn focus_camera(
    time: Res<Time>,
    mut scene: ResMut<Scene>,
    mut transforms: ParamSet<(Query<&mut Transform, With<Camera3d>>, Query<&Transform>)>,
) {
    const SPEED: f32 = 2.0;

    let craft_translation = scene
        .craft
        .root
        .and_then(|entity| transforms.p1().get(entity).ok().map(|t| t.translation))
        .unwrap_or(Vec3::ZERO);

    (scene.camera.should_focus, scene.camera.should_position) = match scene.view {
        CameraView::Front => (Vec3::ZERO, Vec3::from(INITIAL_CAMERA_POSITION)),
        CameraView::Side => (Vec3::ZERO, Vec3::new(260.0, 40.0, 0.0)),
        CameraView::Follow => (craft_translation, craft_translation * 1.8 + Vec3::Y * 10.0),
    };

    // Smooth out the camera movement
    let mut camera_motion = scene.camera.should_focus - scene.camera.is_focus;
    if camera_motion.length() > 0.2 {
        camera_motion *= SPEED * time.delta_seconds();
        scene.camera.is_focus += camera_motion;
    }

    let mut camera_motion = scene.camera.should_position - scene.camera.is_position;
    if camera_motion.length() > 0.1 {
        camera_motion *= SPEED * time.delta_seconds();
        scene.camera.is_position += camera_motion;
    }

    for mut transform in transforms.p0().iter_mut() {
        *transform = Transform::from_translation(scene.camera.is_position)
            .looking_at(scene.camera.is_focus, Vec3::Y);
    }
}

fn handle_keyboard_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut scene: ResMut<Scene>,
    mut craft: ResMut<CraftRes>,
    mut visibilities: Query<&mut Visibility>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        craft.reset();
    }

    if keys.just_pressed(KeyCode::KeyT) {
        scene.show_text = !scene.show_text;
    }

    if keys.just_pressed(KeyCode::Digit1) {
        scene.view = CameraView::Front;
    }
    if keys.just_pressed(KeyCode::Digit2) {
        scene.view = CameraView::Follow;
    }
    if keys.just_pressed(KeyCode::Digit3) {
        scene.view = CameraView::Side;
    }

    if keys.just_pressed(KeyCode::KeyD) {
        toggle_visibility(&mut visibilities, scene.lights.directional);
    }
    if keys.just_pressed(KeyCode::KeyZ) {
        toggle_visibility(&mut visibilities, scene.lights.left);
    }
    if keys.just_pressed(KeyCode::KeyX) {
        toggle_visibility(&mut visibilities, scene.lights.middle);
    }
    if keys.just_pressed(KeyCode::KeyC) {
        toggle_visibility(&mut visibilities, scene.lights.right);
    }
}

fn toggle_visibility(visibilities: &mut Query<&mut Visibility>, entity: Option<Entity>) {
    if let Some(entity) = entity {
        if let Ok(mut visibility) = visibilities.get_mut(entity) {
            *visibility = match *visibility {
                Visibility::Hidden => Visibility::Inherited,
                _ => Visibility::Hidden,
            };
        }
    }
}

fn update_text(
    mut text: Query<&mut Text>,
    scene: Res<Scene>,
    craft: Res<CraftRes>,
    field: Res<FieldRes>,
    paused: Res<PausedRes>,
) {
    let mut text = text.single_mut();
    if scene.show_text {
        let position = craft.position();
        let heading = Spherical::from_cartesian(position, craft.config().shell_radius())
            .theta()
            .to_deg();
        let state = if **paused { "   PAUSED" } else { "" };
        text.sections[0].value = format!(
            "ALT: {:6.1}   HDG: {heading:5.1}   POS: {:6.1} {:6.1} {:6.1}   DEBRIS: {}   STRUCK: {}{state}",
            position.length(),
            position.x(),
            position.y(),
            position.z(),
            field.debris().len(),
            scene.struck,
        );
    } else {
        text.sections[0].value = String::new();
    }
}

fn to_bevy_position(position: Point3) -> Vec3 {
    let (x, y, z) = position.into();
    Vec3::new(x, y, z)
}
