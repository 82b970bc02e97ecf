//! The objects and rooms the engine refers to by name.
//!
//! Most of the world is pure data, but a few dozen objects have hard-wired
//! behavior (the bird fears the rod, the troll wants a treasure). This
//! module resolves those names to ids once, so a world missing one of them
//! is rejected at startup instead of failing mid-game.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::model::{ObjectId, World};
use crate::error::WorldLoadError;

/// Rooms with hard-wired roles: the road, the building, the dwarves' lairs,
/// the plover passages, the repository, the pirate's chest and so on.
pub const LANDMARK_ROOMS: &[u16] = &[
    1, 3, 18, 19, 24, 27, 33, 44, 64, 96, 99, 100, 101, 105, 108, 114, 115, 116, 140,
];

macro_rules! cast {
    ($($field:ident),+ $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub struct Cast {
            $(pub $field: ObjectId,)+
        }

        impl Cast {
            pub fn resolve(world: &World) -> Result<Self, WorldLoadError> {
                let names = object_names(world);
                let find = |name: &str| {
                    names
                        .get(name)
                        .copied()
                        .ok_or_else(|| WorldLoadError::MissingObject(name.to_string()))
                };
                Ok(Cast {
                    $($field: find(stringify!($field))?,)+
                })
            }
        }
    };
}

cast! {
    keys, lamp, grate, cage, rod, rod2, steps, bird, door, pillow, snake,
    fissure, tablet, clam, oyster, magazine, dwarf, knife, food, bottle,
    water, oil, mirror, plant, plant2, axe, dragon, chasm, troll, troll2,
    bear, message, machine, batteries, gold, coins, chest, eggs, trident,
    vase, emerald, platinum, pearl, rug, spices, chain,
}

/// Name every object after its first noun. When two objects share a first
/// noun (two rods, two plants, two trolls) the later one gets a `2` suffix.
fn object_names(world: &World) -> BTreeMap<String, ObjectId> {
    let mut names = BTreeMap::new();
    for object in world.objects.values() {
        let name = object.name();
        if name.is_empty() {
            continue;
        }
        if names.contains_key(name) {
            names.entry(format!("{name}2")).or_insert(object.id);
        } else {
            names.insert(name.to_string(), object.id);
        }
    }
    names
}
