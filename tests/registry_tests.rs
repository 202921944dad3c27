//! Registry and constants-mapping behavior across the public API.

mod common;

use common::build_test_project;
use romdata::{GameObjectKind, Room, RomError};

#[test]
fn repeated_lookup_is_reference_identical() {
    let mut project = build_test_project();

    let first = project.room(0x400).unwrap() as *const Room;
    let second = project.room(0x400).unwrap() as *const Room;
    assert_eq!(first, second);

    let obj1 = project.game_object(GameObjectKind::Enemy, 0x05, 0).unwrap() as *const _;
    let obj2 = project
        .game_object_by_key(GameObjectKind::Enemy, 0x0500)
        .unwrap() as *const _;
    assert_eq!(obj1, obj2);
}

#[test]
fn mutation_through_one_holder_is_visible_to_all() {
    let mut project = build_test_project();

    project.room_mut(0x400).unwrap().set_tile(4, 4, 0x2C).unwrap();
    assert_eq!(project.room(0x400).unwrap().tile(4, 4).unwrap(), 0x2C);

    // The same instance is reachable through the dungeon grid.
    let via_grid = project.room_at(0, 0, 0, 0).unwrap();
    assert_eq!(via_grid.tile(4, 4).unwrap(), 0x2C);
}

#[test]
fn unknown_keys_fail_without_polluting_the_cache() {
    let mut project = build_test_project();

    assert!(matches!(
        project.room(0x7FF),
        Err(RomError::InvalidKey { kind: "room", .. })
    ));
    assert!(matches!(
        project.game_object(GameObjectKind::Part, 0x30, 0),
        Err(RomError::InvalidKey { kind: "part", .. })
    ));
    // Still an error on retry.
    assert!(project.room(0x7FF).is_err());
}

#[test]
fn grid_cells_resolve_through_the_dungeon_group() {
    let mut project = build_test_project();

    // Cell (1,0) of floor 0 references room byte $01 in group 4.
    let room = project.room_at(0, 1, 0, 0).unwrap();
    assert_eq!(room.index(), 0x401);

    // Floor 1 cell (0,0) references room byte $02.
    let above = project.room_at(0, 0, 0, 1).unwrap();
    assert_eq!(above.index(), 0x402);
}

#[test]
fn enemy_mapping_round_trips() {
    let mut project = build_test_project();
    let mapping = project.enemy_mapping().unwrap();

    let names: Vec<&str> = mapping.names().collect();
    assert_eq!(
        names,
        vec!["ENEMYID_OCTOROK", "ENEMYID_ROPE", "ENEMYID_MOBLIN"]
    );
    for (name, code) in mapping.iter() {
        assert_eq!(mapping.code_to_name(code).unwrap(), name);
        assert_eq!(mapping.name_to_code(name).unwrap(), code);
    }
    // Constants from other prefixes are not visible here.
    assert!(mapping.name_to_code("INTERACID_SIGN").is_err());
}

#[test]
fn symbolic_names_resolve_to_registry_keys() {
    let mut project = build_test_project();

    // The editor path: symbolic name -> byte code -> composite key.
    let code = project.eval_to_int("ENEMYID_OCTOROK").unwrap();
    let key = (code as u32) << 8;
    let object = project
        .game_object_by_key(GameObjectKind::Enemy, key)
        .unwrap();
    assert_eq!(object.name(), "octorok");
    assert_eq!(object.id(), 0x05);
}

#[test]
fn interaction_mapping_is_separate() {
    let mut project = build_test_project();
    let mapping = project.interaction_mapping().unwrap();
    assert_eq!(mapping.name_to_code("INTERACID_OWL").unwrap(), 0x3A);
    assert_eq!(mapping.len(), 2);
}
