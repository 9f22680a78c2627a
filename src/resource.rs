//! The resource module encapsulates domain entities for use with Bevy.

use std::ops::{Deref, DerefMut};

use bevy::ecs::system::Resource;

use crate::domain;

#[derive(Resource)]
pub struct CraftRes(domain::Craft);

impl Deref for CraftRes {
    type Target = domain::Craft;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for CraftRes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<domain::Craft> for CraftRes {
    fn from(value: domain::Craft) -> Self {
        Self(value)
    }
}

#[derive(Resource)]
pub struct FieldRes(domain::DebrisField);

impl Deref for FieldRes {
    type Target = domain::DebrisField;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for FieldRes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<domain::DebrisField> for FieldRes {
    fn from(value: domain::DebrisField) -> Self {
        Self(value)
    }
}

/// The set of steering directions active this frame, rebuilt by the controller from raw keyboard
/// state. The simulation only ever reads this snapshot.
#[derive(Resource, Default)]
pub struct DirectionsRes(Vec<domain::Direction>);

impl Deref for DirectionsRes {
    type Target = Vec<domain::Direction>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DirectionsRes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[derive(Resource, Default)]
pub struct PausedRes(bool);

impl Deref for PausedRes {
    type Target = bool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PausedRes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
