//! Test project builders — shared across integration test files.
//!
//! `build_test_project()` produces a project with one dungeon, a populated
//! room group, and enemy/interaction game objects with animation data. Any
//! new record kind worth integration-testing should be added here.

#![allow(dead_code)]

use romdata::{
    DungeonRecord, GameObjectKind, GameObjectRecord, MemoryStorage, Project, RoomRecord,
};

/// Grid dimensions shared by the test fixtures.
pub const DUNGEON_WIDTH: usize = 8;
pub const DUNGEON_HEIGHT: usize = 8;
pub const ROOM_WIDTH: usize = 10;
pub const ROOM_HEIGHT: usize = 8;

/// Defines source covering the three object-constant prefixes.
pub const DEFINES_SOURCE: &str = "\
; enemy type ids
.define ENEMYID_OCTOROK $05
.define ENEMYID_ROPE $06
.define ENEMYID_MOBLIN $08

; interaction type ids
.define INTERACID_SIGN $01
.define INTERACID_OWL $3A

; part type ids
.define PARTID_DOOR $30
";

/// One packed sprite record: tile at the frame origin.
pub fn origin_sprite_record(tile_index: u16) -> Vec<u8> {
    vec![
        0x00,
        0x00,
        (tile_index & 0xFF) as u8,
        (tile_index >> 8) as u8,
        0x00,
    ]
}

/// An enemy with a two-frame default animation (durations 3 and 5).
pub fn octorok_record() -> GameObjectRecord {
    GameObjectRecord {
        name: "octorok".to_string(),
        frame_table: vec![origin_sprite_record(0x10), origin_sprite_record(0x12)],
        animations: vec![
            ("walk".to_string(), vec![3, 0, 5, 1, 0xFF]),
            ("still".to_string(), vec![8, 0, 0xFF]),
        ],
        default_animation: Some("walk".to_string()),
    }
}

/// An interaction whose animation data is malformed (zero duration).
pub fn broken_sign_record() -> GameObjectRecord {
    GameObjectRecord {
        name: "sign".to_string(),
        frame_table: vec![origin_sprite_record(0x40)],
        animations: vec![("main".to_string(), vec![0, 0, 0xFF])],
        default_animation: Some("main".to_string()),
    }
}

/// An interaction with no animation data at all.
pub fn owl_record() -> GameObjectRecord {
    GameObjectRecord {
        name: "owl".to_string(),
        frame_table: Vec::new(),
        animations: Vec::new(),
        default_animation: None,
    }
}

fn empty_room(flags: u8) -> RoomRecord {
    RoomRecord {
        width: ROOM_WIDTH,
        height: ROOM_HEIGHT,
        tiles: vec![0; ROOM_WIDTH * ROOM_HEIGHT],
        flags,
    }
}

/// Build the canonical test project:
///
/// - dungeon 0: 8x8 floor grid, two floors, base `group` = 4; the grid
///   references rooms `$00`-`$02`
/// - rooms `$400`-`$402` (group 4) populated, `$401` flagged as the boss
///   room
/// - enemy `ENEMYID_OCTOROK` (`$05`), interactions `INTERACID_SIGN`
///   (`$01`, malformed animation) and `INTERACID_OWL` (`$3A`, none)
pub fn build_test_project() -> Project {
    let mut storage = MemoryStorage::new();

    let mut floor0 = vec![0u8; DUNGEON_WIDTH * DUNGEON_HEIGHT];
    floor0[0] = 0x00;
    floor0[1] = 0x01;
    let mut floor1 = vec![0u8; DUNGEON_WIDTH * DUNGEON_HEIGHT];
    floor1[0] = 0x02;

    let mut base = indexmap::IndexMap::new();
    base.insert("group".to_string(), 4u8);
    base.insert("wallmasterDestRoom".to_string(), 0x01u8);
    storage.insert_dungeon(
        0,
        DungeonRecord {
            width: DUNGEON_WIDTH,
            height: DUNGEON_HEIGHT,
            floors: vec![floor0, floor1],
            base,
        },
    );

    storage.insert_room(0x400, empty_room(0));
    storage.insert_room(0x401, empty_room(0x40)); // boss room
    storage.insert_room(0x402, empty_room(0));

    storage.insert_game_object(GameObjectKind::Enemy, 0x0500, octorok_record());
    storage.insert_game_object(GameObjectKind::Interaction, 0x0100, broken_sign_record());
    storage.insert_game_object(GameObjectKind::Interaction, 0x3A00, owl_record());

    let mut project = Project::new(Box::new(storage));
    project.load_defines(DEFINES_SOURCE);
    project
}
