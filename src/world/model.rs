use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::vocabulary::{Vocabulary, WordId};

//////////////////////////////
/// GAME STRUCTS AND ENUMS ///
//////////////////////////////

/// Room number as assigned by the data file.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RoomId(pub u16);

/// Object number as assigned by the data file (noun index mod 1000).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ObjectId(pub u16);

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MessageId(pub u16);

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct HintId(pub u16);

static NOWHERE: Room = Room {
    id: RoomId(0),
    long_description: String::new(),
    short_description: String::new(),
    times_described: 0,
    is_light: false,
    is_forbidden_to_pirate: false,
    liquid: None,
    travel_table: Vec::new(),
};

static NOTHING: Object = Object {
    id: ObjectId(0),
    names: Vec::new(),
    prop: 0,
    placement: Placement::Rooms(Vec::new()),
    starting_rooms: Vec::new(),
    is_fixed: false,
    is_treasure: false,
    messages: BTreeMap::new(),
    inventory_message: String::new(),
};

/// Runtime world type used by the game loop.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    pub rooms: BTreeMap<RoomId, Room>,
    pub objects: BTreeMap<ObjectId, Object>,
    pub vocabulary: Vocabulary,
    pub messages: BTreeMap<MessageId, String>,
    /// End-game ranks in ascending threshold order.
    pub class_messages: Vec<ClassMessage>,
    pub hints: BTreeMap<HintId, Hint>,
    pub magic_messages: BTreeMap<u16, String>,
}

impl World {
    /// Rooms are created on first reference while compiling and every
    /// landmark the engine names is guaranteed, so only a foreign id lands
    /// in the empty, dark placeholder.
    pub fn room(&self, id: RoomId) -> &Room {
        self.rooms.get(&id).unwrap_or(&NOWHERE)
    }

    pub fn room_mut(&mut self, id: RoomId) -> &mut Room {
        self.rooms.entry(id).or_insert_with(|| Room::new(id))
    }

    pub fn object(&self, id: ObjectId) -> &Object {
        self.objects.get(&id).unwrap_or(&NOTHING)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> &mut Object {
        self.objects.entry(id).or_insert_with(|| Object::new(id))
    }

    pub fn message(&self, id: MessageId) -> &str {
        self.messages.get(&id).map(String::as_str).unwrap_or("")
    }

    /// Objects currently lying in `room`, in object-number order.
    pub fn objects_at(&self, room: RoomId) -> Vec<ObjectId> {
        self.objects
            .values()
            .filter(|o| o.is_at(room))
            .map(|o| o.id)
            .collect()
    }

    pub fn inventory(&self) -> Vec<ObjectId> {
        self.objects
            .values()
            .filter(|o| o.is_toting())
            .map(|o| o.id)
            .collect()
    }

    pub fn treasures(&self) -> Vec<ObjectId> {
        self.objects
            .values()
            .filter(|o| o.is_treasure)
            .map(|o| o.id)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMessage {
    pub threshold: i32,
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub long_description: String,
    pub short_description: String,
    pub times_described: u32,
    pub is_light: bool,
    pub is_forbidden_to_pirate: bool,
    /// Water or oil that can be scooped up here.
    pub liquid: Option<ObjectId>,
    pub travel_table: Vec<Move>,
}

impl Room {
    pub fn new(id: RoomId) -> Self {
        Room {
            id,
            ..Default::default()
        }
    }

    pub fn is_forced(&self) -> bool {
        self.travel_table.first().is_some_and(|m| m.is_forced)
    }

    pub fn is_aboveground(&self) -> bool {
        (1..=8).contains(&self.id.0)
    }

    pub fn is_before_hall_of_mists(&self) -> bool {
        self.id.0 < 15
    }

    pub fn is_after_hall_of_mists(&self) -> bool {
        self.id.0 >= 15
    }

    pub fn is_dark(&self) -> bool {
        !self.is_light
    }
}

/// One travel-table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub verbs: Vec<WordId>,
    /// Taken regardless of what the player typed.
    pub is_forced: bool,
    pub condition: Condition,
    pub action: Action,
}

impl Move {
    pub fn is_triggered_by(&self, word: WordId) -> bool {
        self.is_forced || self.verbs.contains(&word)
    }

    pub fn destination(&self) -> Option<RoomId> {
        match self.action {
            Action::GoToRoom(room) => Some(room),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    Unconditional,
    PercentChance(u8),
    /// Passes for the player; dwarves may never take this move.
    NotDwarf,
    Carrying(ObjectId),
    CarryingOrInRoomWith(ObjectId),
    PropNotEqual(ObjectId, i32),
}

impl Condition {
    /// Decode the thousands part of a packed travel destination.
    pub fn decode(m: u32) -> Self {
        let object = ObjectId((m % 100) as u16);
        match m {
            0 => Condition::Unconditional,
            1..=99 => Condition::PercentChance(m as u8),
            100 => Condition::NotDwarf,
            101..=200 => Condition::Carrying(object),
            201..=300 => Condition::CarryingOrInRoomWith(object),
            _ => Condition::PropNotEqual(object, (m / 100) as i32 - 3),
        }
    }

    pub fn object(&self) -> Option<ObjectId> {
        match *self {
            Condition::Carrying(o)
            | Condition::CarryingOrInRoomWith(o)
            | Condition::PropNotEqual(o, _) => Some(o),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    GoToRoom(RoomId),
    PrintMessage(MessageId),
    /// Hard-coded computed goto, numbered 301..=500.
    SpecialCode(u16),
}

impl Action {
    /// Decode the remainder part of a packed travel destination.
    pub fn decode(n: u32) -> Self {
        match n {
            0..=300 => Action::GoToRoom(RoomId(n as u16)),
            301..=500 => Action::SpecialCode(n as u16),
            _ => Action::PrintMessage(MessageId((n - 500) as u16)),
        }
    }
}

/// Where an object is. Being carried and lying in rooms exclude each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    Toted,
    /// Zero rooms means the object is nowhere (destroyed or not yet placed);
    /// two rooms is how a grate or a troll spans both sides of something.
    Rooms(Vec<RoomId>),
}

impl Default for Placement {
    fn default() -> Self {
        Placement::Rooms(Vec::new())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Object {
    pub id: ObjectId,
    /// First name is canonical.
    pub names: Vec<String>,
    /// Negative means not yet discovered.
    pub prop: i32,
    placement: Placement,
    pub starting_rooms: Vec<RoomId>,
    pub is_fixed: bool,
    pub is_treasure: bool,
    /// Description per prop value.
    pub messages: BTreeMap<i32, String>,
    pub inventory_message: String,
}

impl Object {
    pub fn new(id: ObjectId) -> Self {
        Object {
            id,
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or("")
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn is_toting(&self) -> bool {
        matches!(self.placement, Placement::Toted)
    }

    pub fn rooms(&self) -> &[RoomId] {
        match &self.placement {
            Placement::Toted => &[],
            Placement::Rooms(rooms) => rooms,
        }
    }

    pub fn is_at(&self, room: RoomId) -> bool {
        self.rooms().contains(&room)
    }

    pub fn carry(&mut self) {
        self.placement = Placement::Toted;
    }

    pub fn put(&mut self, room: RoomId) {
        self.placement = Placement::Rooms(vec![room]);
    }

    pub fn place(&mut self, rooms: Vec<RoomId>) {
        self.placement = Placement::Rooms(rooms);
    }

    /// Take the object out of play without carrying it.
    pub fn hide(&mut self) {
        self.placement = Placement::Rooms(Vec::new());
    }

    pub fn restore(&mut self) {
        self.placement = Placement::Rooms(self.starting_rooms.clone());
    }

    pub fn message(&self, prop: i32) -> &str {
        self.messages.get(&prop).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hint {
    pub id: HintId,
    pub turns_needed: u32,
    pub turn_counter: u32,
    pub penalty: i32,
    pub question: MessageId,
    pub answer: MessageId,
    pub used: bool,
    /// Rooms where loitering counts toward this hint.
    pub rooms: Vec<RoomId>,
}

impl Hint {
    pub fn new(id: HintId) -> Self {
        Hint {
            id,
            ..Default::default()
        }
    }
}
