//! The canonical Gorstan world: rooms, items, traits, NPCs, and puzzles.
//!
//! Everything here is immutable catalog data built once per session. The
//! timestamps of the multiverse do not matter; determinism comes from the
//! data being plain constants.

use std::collections::BTreeMap;

use crate::engine::state::{FlagValue, Intent, PlayerState, Vital};
use crate::engine::types::{
    Direction, Interactable, ItemRecord, NpcRecord, PuzzleRecord, PuzzleReward, RoomRecord,
    TraitRecord, UseOutcome,
};

/// Where every new session (and every full reset) begins.
pub const START_ROOM_ID: &str = "controlnexus";

/// All rooms of the shipped Gorstan world.
pub const GORSTAN_WORLD_ROOM_IDS: &[&str] = &[
    START_ROOM_ID,
    "controlnexusreturned",
    "latticehall",
    "quantumlattice",
    "archivewing",
    "hiddenlibrary",
    "gorstanstreet",
    "findlaterscorner",
    "greasystoon",
    "trentpark",
    "dalesapartment",
];

/// The immutable world catalogs a session runs against.
#[derive(Debug, Clone)]
pub struct World {
    pub start_room: String,
    pub rooms: BTreeMap<String, RoomRecord>,
    pub items: BTreeMap<String, ItemRecord>,
    pub traits: Vec<TraitRecord>,
    pub npcs: BTreeMap<String, NpcRecord>,
    pub puzzles: BTreeMap<String, PuzzleRecord>,
}

impl World {
    pub fn room_ids(&self) -> Vec<String> {
        self.rooms.keys().cloned().collect()
    }
}

// ============================================================================
// Item use effects
// ============================================================================

fn use_coffee(_state: &PlayerState) -> UseOutcome {
    UseOutcome {
        text: "You drink the coffee. The multiverse sharpens around you.".to_string(),
        intents: vec![
            Intent::RemoveItem("coffee".to_string()),
            Intent::AdjustVital {
                vital: Vital::Energy,
                delta: 20,
            },
            Intent::AdjustScore {
                delta: 10,
                reason: "caffeine clarity".to_string(),
            },
            Intent::SetFlag {
                key: "coffee_drunk".to_string(),
                value: FlagValue::Bool(true),
            },
        ],
    }
}

fn use_runestone(state: &PlayerState) -> UseOutcome {
    if state.current_room == "quantumlattice" {
        UseOutcome::text_only("The runestone hums in sympathy with the lattice.")
    } else {
        UseOutcome::text_only("The runestone stays cold and quiet.")
    }
}

fn use_napkin(_state: &PlayerState) -> UseOutcome {
    UseOutcome {
        text: "Someone has scrawled a map of Gorstan on the napkin. You commit it to memory."
            .to_string(),
        intents: vec![Intent::SetFlag {
            key: "napkin_map".to_string(),
            value: FlagValue::Bool(true),
        }],
    }
}

fn use_lantern(_state: &PlayerState) -> UseOutcome {
    UseOutcome {
        text: "The lantern flares to life.".to_string(),
        intents: vec![Intent::SetFlag {
            key: "lantern_lit".to_string(),
            value: FlagValue::Bool(true),
        }],
    }
}

fn use_medkit(_state: &PlayerState) -> UseOutcome {
    UseOutcome {
        text: "The medkit's nanogel knits you back together.".to_string(),
        intents: vec![
            Intent::RemoveItem("medkit".to_string()),
            Intent::AdjustVital {
                vital: Vital::Health,
                delta: 25,
            },
        ],
    }
}

// ============================================================================
// Trait unlock conditions
// ============================================================================

fn unlock_ambitious(state: &PlayerState) -> bool {
    state.score >= 50
}

fn unlock_seeker(state: &PlayerState) -> bool {
    state.visited_rooms.len() >= 5
}

fn unlock_survivor(state: &PlayerState) -> bool {
    state.reset_count >= 1
}

fn unlock_caffeinated(state: &PlayerState) -> bool {
    state.flag_set("coffee_drunk")
}

// Granted only through the lattice attunement puzzle, never by predicate.
fn unlock_never(_state: &PlayerState) -> bool {
    false
}

// ============================================================================
// NPC topic triggers
// ============================================================================

fn ayla_help(_state: &PlayerState) -> String {
    "Ayla: \"Stay close to the nexus. When in doubt, go south — and press nothing you don't understand.\""
        .to_string()
}

fn ayla_coffee(_state: &PlayerState) -> String {
    "Ayla: \"Findlater's Corner pours the only coffee that survives a reset.\"".to_string()
}

fn ayla_reset(state: &PlayerState) -> String {
    if state.reset_count == 0 {
        "Ayla: \"The big red button? You'll find out. Everyone does.\"".to_string()
    } else {
        format!(
            "Ayla: \"Cycle {}. You're holding together better than most.\"",
            state.reset_count
        )
    }
}

fn morthos_lattice(_state: &PlayerState) -> String {
    "Morthos: \"The lattice remembers every universe it has discarded. Tread gently.\"".to_string()
}

fn morthos_key(_state: &PlayerState) -> String {
    "Morthos: \"A key? Look where the lattice sings loudest.\"".to_string()
}

fn polly_pie(_state: &PlayerState) -> String {
    "Polly: \"Pie's off. It's been off since the third reset.\"".to_string()
}

// ============================================================================
// Dynamic room behavior
// ============================================================================

fn quantumlattice_exits(
    state: &PlayerState,
) -> Result<BTreeMap<Direction, String>, String> {
    let mut exits = BTreeMap::new();
    exits.insert(Direction::Down, "latticehall".to_string());
    if state.traits.contains("lattice-touched") {
        exits.insert(Direction::Jump, "trentpark".to_string());
    }
    Ok(exits)
}

fn trentpark_description(state: &PlayerState) -> String {
    if state.flag_set("lantern_lit") {
        "Lantern light pushes the dark back to the treeline. Trent Park's paths glitter with \
frost, and something metallic is half-buried beside the bench."
            .to_string()
    } else {
        "Trent Park at night. The dark between the trees is absolute, and the path vanishes \
three steps ahead of you."
            .to_string()
    }
}

fn trentpark_on_enter(state: &PlayerState) -> Vec<Intent> {
    if state.flag_set("lantern_lit") {
        Vec::new()
    } else {
        vec![Intent::Log(
            "It is pitch dark beyond the gates. You keep carefully to the path.".to_string(),
        )]
    }
}

fn reset_chamber_on_enter(state: &PlayerState) -> Vec<Intent> {
    if state.flag_set("seen_reset_chamber") {
        return Vec::new();
    }
    vec![
        Intent::SetFlag {
            key: "seen_reset_chamber".to_string(),
            value: FlagValue::Bool(true),
        },
        Intent::AdjustScore {
            delta: 5,
            reason: "finding the reset chamber".to_string(),
        },
        Intent::Log("The chamber thrums. A single red button waits on its pedestal.".to_string()),
    ]
}

// ============================================================================
// World assembly
// ============================================================================

/// Build the canonical Gorstan world.
pub fn canonical_world() -> World {
    let mut rooms = BTreeMap::new();

    let control_nexus = RoomRecord::new(
        START_ROOM_ID,
        "Control Nexus",
        "A vaulted chamber of humming consoles at the seam of the multiverse. Light arrives \
here slightly before its sources do.",
    )
    .with_image("rooms/controlnexus.png")
    .with_exit(Direction::North, "latticehall")
    .with_exit(Direction::South, "controlnexusreturned")
    .with_exit(Direction::East, "archivewing")
    .with_exit(Direction::Jump, "gorstanstreet")
    .with_object(
        "console",
        Interactable::scenery("Banks of instruments tracking universes like weather fronts."),
    );
    rooms.insert(control_nexus.id.clone(), control_nexus);

    let reset_chamber = RoomRecord::new(
        "controlnexusreturned",
        "Control Nexus: Reset Chamber",
        "A smaller annex behind the nexus. The walls carry scorch marks from cycles past.",
    )
    .with_exit(Direction::North, START_ROOM_ID)
    .with_object(
        "reset button",
        Interactable::scenery("A big red button under a cracked glass hood. It has been pressed before."),
    )
    .with_object(
        "supply locker",
        Interactable::holding("A dented locker, door ajar. A medkit sits inside.", "medkit"),
    )
    .with_on_enter(reset_chamber_on_enter);
    rooms.insert(reset_chamber.id.clone(), reset_chamber);

    let lattice_hall = RoomRecord::new(
        "latticehall",
        "Lattice Hall",
        "A long gallery where the quantum lattice's roots descend through the floor like frozen \
lightning.",
    )
    .with_exit(Direction::South, START_ROOM_ID)
    .with_exit(Direction::Up, "quantumlattice")
    .with_object(
        "lattice key",
        Interactable::holding("A key cut from the same crystal as the lattice itself.", "lattice_key"),
    );
    rooms.insert(lattice_hall.id.clone(), lattice_hall);

    let quantum_lattice = RoomRecord::new(
        "quantumlattice",
        "Quantum Lattice",
        "The lattice proper: a crystalline web holding every Gorstan that ever was. Touching it \
is strongly discouraged by signs in forty languages.",
    )
    .with_dynamic_exits(quantumlattice_exits);
    rooms.insert(quantum_lattice.id.clone(), quantum_lattice);

    let archive_wing = RoomRecord::new(
        "archivewing",
        "Archive Wing",
        "Shelves of sealed cycle records. A heavy door in the east wall has no handle, only a \
crystal keyhole.",
    )
    .with_exit(Direction::West, START_ROOM_ID)
    .with_object(
        "card index",
        Interactable::scenery("Drawers of index cards, each one a universe's obituary."),
    );
    rooms.insert(archive_wing.id.clone(), archive_wing);

    let hidden_library = RoomRecord::new(
        "hiddenlibrary",
        "Hidden Library",
        "Books that were never written anywhere else. The air tastes of ozone and old paper.",
    )
    .with_exit(Direction::West, "archivewing")
    .with_object(
        "runestone",
        Interactable::holding("A fist-sized stone etched with a pattern that matches the lattice.", "runestone"),
    );
    rooms.insert(hidden_library.id.clone(), hidden_library);

    let gorstan_street = RoomRecord::new(
        "gorstanstreet",
        "Gorstan High Street",
        "An ordinary London street that is not, on close inspection, ordinary at all. Shop \
signs rearrange themselves when you look away.",
    )
    .with_exit(Direction::East, "findlaterscorner")
    .with_exit(Direction::South, "greasystoon")
    .with_exit(Direction::North, "trentpark")
    .with_exit(Direction::West, "dalesapartment")
    .with_exit(Direction::Jump, START_ROOM_ID);
    rooms.insert(gorstan_street.id.clone(), gorstan_street);

    let findlaters = RoomRecord::new(
        "findlaterscorner",
        "Findlater's Corner",
        "A cafe wedged into a corner that geometry says should not exist. The espresso machine \
sounds like a small jet engine.",
    )
    .with_exit(Direction::West, "gorstanstreet")
    .with_object(
        "coffee cup",
        Interactable::holding("A takeaway cup, still warm. Someone left it for you.", "coffee"),
    );
    rooms.insert(findlaters.id.clone(), findlaters);

    let greasy_stoon = RoomRecord::new(
        "greasystoon",
        "The Greasy Stoon",
        "A diner with laminated menus and a fryer that has outlived at least two universes.",
    )
    .with_exit(Direction::North, "gorstanstreet")
    .with_object(
        "napkin",
        Interactable::holding("A paper napkin with something drawn on it.", "napkin"),
    );
    rooms.insert(greasy_stoon.id.clone(), greasy_stoon);

    let trent_park = RoomRecord::new("trentpark", "Trent Park", "")
        .with_dynamic_description(trentpark_description)
        .with_exit(Direction::South, "gorstanstreet")
        .with_object(
            "bench",
            Interactable::scenery("A park bench, frost-rimed and patient."),
        )
        .with_on_enter(trentpark_on_enter);
    rooms.insert(trent_park.id.clone(), trent_park);

    let dales_apartment = RoomRecord::new(
        "dalesapartment",
        "Dale's Apartment",
        "A one-bedroom flat, tidy except for the wall of notes connecting things that should \
not be connected.",
    )
    .with_exit(Direction::East, "gorstanstreet")
    .with_object(
        "lantern",
        Interactable::holding("A camping lantern, batteries optimistically included.", "lantern"),
    )
    .with_object(
        "sofa",
        Interactable::scenery("The sofa has a Dale-shaped dent in it."),
    );
    rooms.insert(dales_apartment.id.clone(), dales_apartment);

    let mut items = BTreeMap::new();
    for item in [
        ItemRecord::new("coffee", "Coffee", "Black, strong, faintly luminous.")
            .with_points(5)
            .with_use(use_coffee),
        ItemRecord::new(
            "lattice_key",
            "Lattice Key",
            "A crystalline key that refracts light into places light should not go.",
        )
        .with_points(10),
        ItemRecord::new(
            "runestone",
            "Runestone",
            "Heavier than it looks. It remembers being part of something larger.",
        )
        .with_points(15)
        .with_use(use_runestone),
        ItemRecord::new("napkin", "Napkin", "A diner napkin, suspiciously informative.")
            .with_points(2)
            .with_use(use_napkin),
        ItemRecord::new("lantern", "Lantern", "Sheds honest, local, single-universe light.")
            .with_points(5)
            .with_use(use_lantern),
        ItemRecord::new("medkit", "Medkit", "Standard nexus issue. Smells of antiseptic.")
            .with_points(5)
            .with_use(use_medkit),
    ] {
        items.insert(item.id.clone(), item);
    }

    let traits = vec![
        TraitRecord::new(
            "ambitious",
            "Every gain and loss cuts twenty percent deeper.",
            unlock_ambitious,
        ),
        TraitRecord::new("seeker", "Five rooms seen; the map is becoming real.", unlock_seeker),
        TraitRecord::new("survivor", "You have lived through at least one reset.", unlock_survivor),
        TraitRecord::new("caffeinated", "Findlater's finest, fully absorbed.", unlock_caffeinated),
        TraitRecord::new(
            "lattice-touched",
            "The lattice knows your name now.",
            unlock_never,
        )
        .hidden(),
    ];

    let mut npcs = BTreeMap::new();
    for npc in [
        NpcRecord::new("ayla", "Ayla")
            .visible_in(&[START_ROOM_ID, "findlaterscorner"])
            .with_dialogue("Ayla watches the consoles. \"Quiet cycle so far. Don't jinx it.\"")
            .with_dialogue("\"You again. Good. Familiar faces are rare this deep in.\"")
            .with_dialogue("\"If the lattice starts singing, walk away. Quickly.\"")
            .with_trigger("help", ayla_help)
            .with_trigger("coffee", ayla_coffee)
            .with_trigger("reset", ayla_reset),
        NpcRecord::new("morthos", "Morthos")
            .visible_in(&["archivewing", "hiddenlibrary"])
            .with_dialogue("Morthos shelves a record without looking at you.")
            .with_dialogue("\"Every card in this index was somebody's whole world.\"")
            .with_trigger("lattice", morthos_lattice)
            .with_trigger("key", morthos_key),
        NpcRecord::new("polly", "Polly")
            .visible_in(&["greasystoon"])
            .with_dialogue("Polly wipes the counter in slow, eternal circles.")
            .with_dialogue("\"Sit anywhere, love. The universe isn't fussy and neither am I.\"")
            .with_trigger("pie", polly_pie),
    ] {
        npcs.insert(npc.id.clone(), npc);
    }

    let mut puzzles = BTreeMap::new();
    for puzzle in [
        PuzzleRecord::new(
            "archive_door",
            "archivewing",
            "puzzle:archive_door",
            PuzzleReward::UnlockExit {
                room: "archivewing".to_string(),
                direction: Direction::East,
                destination: "hiddenlibrary".to_string(),
            },
        )
        .requires_item("lattice_key")
        .with_step("turn key"),
        PuzzleRecord::new(
            "lattice_attunement",
            "quantumlattice",
            "puzzle:lattice_attunement",
            PuzzleReward::GainTrait {
                name: "lattice-touched".to_string(),
            },
        )
        .requires_item("runestone")
        .with_step("touch lattice"),
    ] {
        puzzles.insert(puzzle.id.clone(), puzzle);
    }

    World {
        start_room: START_ROOM_ID.to_string(),
        rooms,
        items,
        traits,
        npcs,
        puzzles,
    }
}
