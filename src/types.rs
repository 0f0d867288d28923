use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vec3 {
    pub const ONE: Vec3 = Vec3 { x: 1, y: 1, z: 1 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn volume(self) -> i32 {
        self.x * self.y * self.z
    }

    pub fn fits_within(self, bounds: Vec3) -> bool {
        self.x <= bounds.x && self.y <= bounds.y && self.z <= bounds.z
    }

    pub fn is_positive(self) -> bool {
        self.x > 0 && self.y > 0 && self.z > 0
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Mul for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionType {
    UfoRecovery,
    BaseDefense,
    RaidHumans,
    AlienExtermination,
}

impl MissionType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ufo_recovery" => Some(Self::UfoRecovery),
            "base_defense" => Some(Self::BaseDefense),
            "raid_humans" => Some(Self::RaidHumans),
            "alien_extermination" => Some(Self::AlienExtermination),
            _ => None,
        }
    }

    /// Mission fought over a building: the player defends their own, aliens raid
    /// anyone else's, and everybody else goes in to clear out aliens.
    pub fn for_building(owned_by_player: bool, attacker_is_alien: bool) -> Self {
        if owned_by_player {
            Self::BaseDefense
        } else if attacker_is_alien {
            Self::RaidHumans
        } else {
            Self::AlienExtermination
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapPartKind {
    Ground,
    LeftWall,
    RightWall,
    Scenery,
}

impl MapPartKind {
    pub const ALL: [MapPartKind; 4] = [
        MapPartKind::Ground,
        MapPartKind::LeftWall,
        MapPartKind::RightWall,
        MapPartKind::Scenery,
    ];
}
