//! Simulation of the craft in the debris field.
//!
//! Each frame the craft is steered along the shell based on the active directions and elapsed
//! time, then the field is queried for debris struck at the new position. Struck debris is
//! removed from the field; the visualizer picks up the removal on its next update. Steering and
//! the collision query run back to back in one system, so the query always observes the
//! post-steer position.

use bevy::prelude::*;

use crate::resource::{CraftRes, DirectionsRes, FieldRes, PausedRes};

pub struct Simulator;

impl Plugin for Simulator {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, simulate);
    }
}

fn simulate(
    time: Res<Time>,
    paused: Res<PausedRes>,
    directions: Res<DirectionsRes>,
    mut craft: ResMut<CraftRes>,
    mut field: ResMut<FieldRes>,
) {
    if **paused {
        return;
    }

    let steered = craft.steered(directions.as_slice(), time.delta());
    *craft = steered.into();

    for id in field.collisions(&**craft) {
        if let Some(debris) = field.remove(id) {
            debug!("struck debris {:?} at {:?}", id, debris.position());
        }
    }
}
