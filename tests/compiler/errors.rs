use cave_adventure::{Game, GameConfig, WorldLoadError, load_world_from_str};

use crate::{FIXTURE, fixture_world};

#[test]
fn non_integer_field_is_malformed() {
    let err = load_world_from_str("1\n1\tROAD\nX\tBAD\n-1\n0\n").unwrap_err();
    match err {
        WorldLoadError::Malformed { section, line, .. } => {
            assert_eq!(section, 1);
            assert_eq!(line, 3);
        }
        other => panic!("expected Malformed, got {other:?}"),
    }
}

#[test]
fn word_number_without_a_kind_is_malformed() {
    let err = load_world_from_str("4\n4000\tFOO\n-1\n0\n").unwrap_err();
    assert!(matches!(err, WorldLoadError::Malformed { section: 4, .. }));
}

#[test]
fn prop_message_before_any_object_is_malformed() {
    let err = load_world_from_str("5\n100\tA LOOSE PROP\n-1\n0\n").unwrap_err();
    assert!(matches!(err, WorldLoadError::Malformed { section: 5, .. }));
}

#[test]
fn missing_end_marker_is_truncated() {
    let err = load_world_from_str("1\n1\tROAD\n-1\n").unwrap_err();
    assert!(matches!(err, WorldLoadError::Truncated { section: 1 }));

    let err = load_world_from_str("1\n1\tROAD\n").unwrap_err();
    assert!(matches!(err, WorldLoadError::Truncated { section: 1 }));

    let half = FIXTURE[..FIXTURE.len() / 2].rfind('\n').expect("a line break");
    let cut = &FIXTURE[..=half];
    assert!(matches!(
        load_world_from_str(cut),
        Err(WorldLoadError::Truncated { .. })
    ));
}

#[test]
fn dangling_message_fails_validation() {
    let err = load_world_from_str("1\n1\tROAD\n-1\n3\n1\t599\t2\n-1\n0\n").unwrap_err();
    match err {
        WorldLoadError::Invalid(problems) => {
            assert_eq!(problems.len(), 1);
            assert!(problems[0].message.contains("missing message 99"));
        }
        other => panic!("expected Invalid, got {other:?}"),
    }
}

#[test]
fn hint_rooms_without_a_definition_fail_validation() {
    let err = load_world_from_str("1\n1\tROAD\n-1\n9\n5\t1\n-1\n0\n").unwrap_err();
    let WorldLoadError::Invalid(problems) = err else {
        panic!("expected Invalid");
    };
    assert!(problems[0].message.contains("hint 5"));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = cave_adventure::load_world_from_file(std::path::Path::new("no/such/advent.dat"))
        .unwrap_err();
    assert!(matches!(err, WorldLoadError::Io(_)));
}

#[test]
fn bare_world_lacks_the_cast() {
    let world = load_world_from_str("1\n1\tROAD\n-1\n0\n").expect("tiny world compiles");
    match Game::new(world, GameConfig::default()) {
        Err(WorldLoadError::MissingObject(name)) => assert_eq!(name, "keys"),
        other => panic!("expected MissingObject, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn verb_without_a_handler_is_rejected() {
    let data = FIXTURE.replace("2031\tHOURS", "2031\tDANCE");
    let world = load_world_from_str(&data).expect("vocabulary still compiles");
    match Game::new(world, GameConfig::default()) {
        Err(WorldLoadError::UnknownVerb(name)) => assert_eq!(name, "dance"),
        other => panic!("expected UnknownVerb, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn fixture_is_playable() {
    assert!(Game::new(fixture_world(), GameConfig::default().with_seed(1)).is_ok());
}
