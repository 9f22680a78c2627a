//! Controller steering the craft.
//!
//! Raw keyboard state is sampled once per frame into an immutable set of active directions that
//! the simulation consumes; nothing downstream ever touches key events. The space bar toggles
//! the paused state, which freezes the simulation while the scene keeps rendering.

use bevy::prelude::*;

use crate::{
    domain::Direction,
    resource::{DirectionsRes, PausedRes},
};

pub struct Controller;

impl Plugin for Controller {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, control)
            .init_resource::<DirectionsRes>()
            .init_resource::<PausedRes>();
    }
}

fn control(
    keys: Res<ButtonInput<KeyCode>>,
    mut directions: ResMut<DirectionsRes>,
    mut paused: ResMut<PausedRes>,
) {
    directions.clear();

    if keys.pressed(KeyCode::ArrowUp) {
        directions.push(Direction::Up);
    }
    if keys.pressed(KeyCode::ArrowDown) {
        directions.push(Direction::Down);
    }
    if keys.pressed(KeyCode::ArrowLeft) {
        directions.push(Direction::Left);
    }
    if keys.pressed(KeyCode::ArrowRight) {
        directions.push(Direction::Right);
    }

    if keys.just_pressed(KeyCode::Space) {
        **paused = !**paused;
    }
}
