mod errors;
mod sections;

use cave_adventure::{World, load_world_from_str};

pub const FIXTURE: &str = include_str!("../fixtures/cave.dat");

pub fn fixture_world() -> World {
    load_world_from_str(FIXTURE).expect("fixture world compiles")
}

/// The fixture with extra records spliced in just before the end marker.
pub fn fixture_with(extra: &str) -> String {
    let body = FIXTURE
        .trim_end()
        .strip_suffix('0')
        .expect("fixture ends with section 0");
    format!("{body}{extra}0\n")
}
