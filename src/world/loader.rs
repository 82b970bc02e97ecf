use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use super::cast::LANDMARK_ROOMS;
use super::model::{
    Action, ClassMessage, Condition, Hint, HintId, MessageId, Move, ObjectId, RoomId, World,
};
use super::validator::validate_world;
use super::vocabulary::{WordId, WordKind, expand_long_word};
use crate::error::WorldLoadError;

/// Fragments beginning with this marker are placeholders that print nothing.
const SILENT_MARKER: &str = ">$<";

/// The verb list `[1]` in section 3 means "go regardless of what was typed".
const FORCED_VERB: u16 = 1;

/////////////////////
/// PUBLIC LOADERS ///
/////////////////////

/// Public API: compile a world from a data file on disk.
pub fn load_world_from_file(path: &Path) -> Result<World, WorldLoadError> {
    let file = File::open(path)?;
    load_world_from_reader(BufReader::new(file))
}

pub fn load_world_from_str(data: &str) -> Result<World, WorldLoadError> {
    load_world_from_reader(data.as_bytes())
}

pub fn load_world_from_reader<R: BufRead>(reader: R) -> Result<World, WorldLoadError> {
    let mut lines = reader.lines().enumerate().map(|(i, line)| (i + 1, line));
    let mut compiler = Compiler::default();

    loop {
        let Some((line_no, line)) = next_nonblank(&mut lines)? else {
            return Err(WorldLoadError::Truncated {
                section: compiler.section,
            });
        };
        let section: u32 = line
            .trim()
            .parse()
            .map_err(|_| WorldLoadError::malformed(compiler.section, line_no, "expected a section number"))?;
        if section == 0 {
            break;
        }
        compiler.section = section;

        let mut records = 0usize;
        loop {
            let Some((line_no, line)) = next_nonblank(&mut lines)? else {
                return Err(WorldLoadError::Truncated { section });
            };
            let fields: Vec<&str> = line.trim().split('\t').collect();
            if fields[0] == "-1" {
                break;
            }
            compiler.line = line_no;
            compiler.record(&fields)?;
            records += 1;
        }

        if (1..=12).contains(&section) {
            debug!(section, records, "compiled section");
        } else {
            warn!(section, records, "skipped unknown section");
        }
    }

    compiler.finish()
}

fn next_nonblank<I>(lines: &mut I) -> Result<Option<(usize, String)>, WorldLoadError>
where
    I: Iterator<Item = (usize, std::io::Result<String>)>,
{
    for (line_no, line) in lines.by_ref() {
        let line = line?;
        if !line.trim().is_empty() {
            return Ok(Some((line_no, line)));
        }
    }
    Ok(None)
}

////////////////////////
/// RECORD COMPILER ///
////////////////////////

#[derive(Default)]
struct Compiler {
    world: World,
    section: u32,
    line: usize,
    /// Section 3 chains: the room and verb list of the previous record.
    last_travel: Option<(RoomId, Vec<u16>)>,
    /// Section 5 attaches prop messages to the most recently started object.
    current_object: Option<ObjectId>,
    oily_rooms: BTreeSet<RoomId>,
    wet_rooms: BTreeSet<RoomId>,
}

impl Compiler {
    fn record(&mut self, fields: &[&str]) -> Result<(), WorldLoadError> {
        match self.section {
            1 => self.long_description(fields),
            2 => self.short_description(fields),
            3 => self.travel(fields),
            4 => self.vocabulary(fields),
            5 => self.object_text(fields),
            6 => self.message(fields),
            7 => self.placement(fields),
            8 => self.default_message(fields),
            9 => self.room_bits(fields),
            10 => self.class_message(fields),
            11 => self.hint(fields),
            12 => self.magic_message(fields),
            _ => Ok(()),
        }
    }

    fn int<T: std::str::FromStr>(&self, fields: &[&str], index: usize, what: &str) -> Result<T, WorldLoadError> {
        let field = fields
            .get(index)
            .ok_or_else(|| self.malformed(format!("missing {what}")))?;
        if !is_integer(field) {
            return Err(self.malformed(format!("{what} '{field}' is not an integer")));
        }
        field
            .parse()
            .map_err(|_| self.malformed(format!("{what} '{field}' is out of range")))
    }

    fn malformed(&self, reason: impl Into<String>) -> WorldLoadError {
        WorldLoadError::malformed(self.section, self.line, reason)
    }

    fn long_description(&mut self, fields: &[&str]) -> Result<(), WorldLoadError> {
        let room = RoomId(self.int(fields, 0, "room number")?);
        let text = &fields[1..];
        if is_silent(text) {
            return Ok(());
        }
        let long = &mut self.world.room_mut(room).long_description;
        long.push_str(&expand_tabs(text));
        long.push('\n');
        Ok(())
    }

    fn short_description(&mut self, fields: &[&str]) -> Result<(), WorldLoadError> {
        let room = RoomId(self.int(fields, 0, "room number")?);
        let text = &fields[1..];
        if is_silent(text) {
            return Ok(());
        }
        let short = &mut self.world.room_mut(room).short_description;
        short.push_str(&expand_tabs(text));
        short.push('\n');
        Ok(())
    }

    fn travel(&mut self, fields: &[&str]) -> Result<(), WorldLoadError> {
        let from = RoomId(self.int(fields, 0, "room number")?);
        let packed: u32 = self.int(fields, 1, "destination")?;
        let mut verbs = Vec::with_capacity(fields.len().saturating_sub(2));
        for i in 2..fields.len() {
            verbs.push(self.int::<u16>(fields, i, "verb")?);
        }
        if verbs.is_empty() {
            return Err(self.malformed("travel entry has no verbs"));
        }

        // Same room and same first verb: an alternate destination for the
        // whole previous verb list.
        let verbs = match &self.last_travel {
            Some((room, previous)) if *room == from && previous.first() == verbs.first() => {
                previous.clone()
            }
            _ => {
                self.last_travel = Some((from, verbs.clone()));
                verbs
            }
        };

        let condition = Condition::decode(packed / 1000);
        let action = Action::decode(packed % 1000);
        if let Action::GoToRoom(to) = action {
            self.world.room_mut(to);
        }

        let is_forced = verbs == [FORCED_VERB];
        let verbs = if is_forced {
            Vec::new()
        } else {
            verbs
                .into_iter()
                .filter(|v| *v < 100)
                .map(WordId)
                .collect()
        };

        self.world.room_mut(from).travel_table.push(Move {
            verbs,
            is_forced,
            condition,
            action,
        });
        Ok(())
    }

    fn vocabulary(&mut self, fields: &[&str]) -> Result<(), WorldLoadError> {
        let n: u16 = self.int(fields, 0, "word number")?;
        let raw = fields
            .get(1)
            .ok_or_else(|| self.malformed("missing word text"))?;
        let id = WordId(n);
        let kind = id
            .kind()
            .ok_or_else(|| self.malformed(format!("word number {n} has no kind")))?;
        let text = expand_long_word(raw);

        self.world.vocabulary.insert(id, kind, &text);
        if kind == WordKind::Noun {
            let object = self.world.object_mut(ObjectId(id.index()));
            object.names.push(text);
            object.is_treasure = object.id.0 >= 50;
        }
        Ok(())
    }

    fn object_text(&mut self, fields: &[&str]) -> Result<(), WorldLoadError> {
        let n: u16 = self.int(fields, 0, "object record")?;
        let text = &fields[1..];

        if (1..=99).contains(&n) {
            let object = self.world.object_mut(ObjectId(n));
            object.inventory_message = expand_tabs(text);
            self.current_object = Some(ObjectId(n));
            return Ok(());
        }
        if n % 100 != 0 {
            return Err(self.malformed(format!("object record {n} is neither an object nor a prop")));
        }
        let current = self
            .current_object
            .ok_or_else(|| self.malformed("prop message before any object"))?;

        let prop = i32::from(n / 100);
        let more = if is_silent(text) {
            String::new()
        } else {
            expand_tabs(text) + "\n"
        };
        self.world
            .object_mut(current)
            .messages
            .entry(prop)
            .or_default()
            .push_str(&more);
        Ok(())
    }

    fn message(&mut self, fields: &[&str]) -> Result<(), WorldLoadError> {
        let n = MessageId(self.int(fields, 0, "message number")?);
        let text = &fields[1..];
        let entry = self.world.messages.entry(n).or_default();
        if !is_silent(text) {
            entry.push_str(&expand_tabs(text));
            entry.push('\n');
        }
        Ok(())
    }

    fn placement(&mut self, fields: &[&str]) -> Result<(), WorldLoadError> {
        let object = ObjectId(self.int(fields, 0, "object number")?);
        let room: u16 = self.int(fields, 1, "room number")?;
        let extra: Option<i32> = if fields.len() > 2 {
            Some(self.int(fields, 2, "fixed flag")?)
        } else {
            None
        };
        if room == 0 {
            return Ok(());
        }

        let mut rooms = vec![RoomId(room)];
        let mut is_fixed = false;
        if let Some(extra) = extra {
            // Anything in two places at once is as immovable as a -1 object.
            is_fixed = true;
            if extra != -1 {
                let second = u16::try_from(extra)
                    .map_err(|_| self.malformed(format!("second room {extra} is out of range")))?;
                rooms.push(RoomId(second));
            }
        }
        for room in &rooms {
            self.world.room_mut(*room);
        }

        let object = self.world.object_mut(object);
        object.is_fixed = is_fixed;
        object.starting_rooms = rooms.clone();
        object.place(rooms);
        Ok(())
    }

    fn default_message(&mut self, fields: &[&str]) -> Result<(), WorldLoadError> {
        let verb: u16 = self.int(fields, 0, "verb number")?;
        let message: u16 = self.int(fields, 1, "message number")?;
        if message == 0 {
            return Ok(());
        }
        let id = WordId(2000 + verb);
        if !self
            .world
            .vocabulary
            .set_default_message(id, MessageId(message))
        {
            warn!(verb = id.0, "default message for a verb the vocabulary lacks");
        }
        Ok(())
    }

    fn room_bits(&mut self, fields: &[&str]) -> Result<(), WorldLoadError> {
        let bit: u16 = self.int(fields, 0, "bit number")?;
        for i in 1..fields.len() {
            let room = RoomId(self.int(fields, i, "room number")?);
            match bit {
                0 => self.world.room_mut(room).is_light = true,
                1 => {
                    self.oily_rooms.insert(room);
                }
                2 => {
                    self.wet_rooms.insert(room);
                }
                3 => self.world.room_mut(room).is_forbidden_to_pirate = true,
                _ => {
                    self.world.room_mut(room);
                    self.world
                        .hints
                        .entry(HintId(bit))
                        .or_insert_with(|| Hint::new(HintId(bit)))
                        .rooms
                        .push(room);
                }
            }
        }
        Ok(())
    }

    fn class_message(&mut self, fields: &[&str]) -> Result<(), WorldLoadError> {
        let threshold: i32 = self.int(fields, 0, "score threshold")?;
        let text = fields.get(1).copied().unwrap_or_default().to_string();
        self.world
            .class_messages
            .push(ClassMessage { threshold, text });
        Ok(())
    }

    fn hint(&mut self, fields: &[&str]) -> Result<(), WorldLoadError> {
        let id = HintId(self.int(fields, 0, "hint number")?);
        let turns_needed: u32 = self.int(fields, 1, "turns needed")?;
        let penalty: i32 = self.int(fields, 2, "penalty")?;
        let question = MessageId(self.int(fields, 3, "question message")?);
        let answer = MessageId(self.int(fields, 4, "answer message")?);

        let hint = self
            .world
            .hints
            .entry(id)
            .or_insert_with(|| Hint::new(id));
        hint.turns_needed = turns_needed;
        hint.penalty = penalty;
        hint.question = question;
        hint.answer = answer;
        Ok(())
    }

    fn magic_message(&mut self, fields: &[&str]) -> Result<(), WorldLoadError> {
        let n: u16 = self.int(fields, 0, "message number")?;
        let text = &fields[1..];
        let entry = self.world.magic_messages.entry(n).or_default();
        if !is_silent(text) {
            entry.push_str(&expand_tabs(text));
            entry.push('\n');
        }
        Ok(())
    }

    fn finish(mut self) -> Result<World, WorldLoadError> {
        let water = self.noun_object("water");
        let oil = self.noun_object("oil");
        for room in self.wet_rooms.clone() {
            let liquid = if self.oily_rooms.contains(&room) { oil } else { water };
            self.world.room_mut(room).liquid = liquid;
        }

        self.world.vocabulary.add_truncations();
        for room in LANDMARK_ROOMS {
            self.world.room_mut(RoomId(*room));
        }

        debug!(
            rooms = self.world.rooms.len(),
            objects = self.world.objects.len(),
            words = self.world.vocabulary.len(),
            messages = self.world.messages.len(),
            hints = self.world.hints.len(),
            "world compiled"
        );

        let problems = validate_world(&self.world);
        if !problems.is_empty() {
            return Err(WorldLoadError::Invalid(problems));
        }
        Ok(self.world)
    }

    fn noun_object(&self, name: &str) -> Option<ObjectId> {
        self.world
            .vocabulary
            .lookup(name)
            .filter(|w| w.kind() == Some(WordKind::Noun))
            .map(|w| ObjectId(w.id.index()))
    }
}

fn is_integer(field: &str) -> bool {
    let digits = field.strip_prefix('-').unwrap_or(field);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// A record whose text is the `>$<` marker says nothing.
fn is_silent(text: &[&str]) -> bool {
    text.first().is_some_and(|t| t.starts_with(SILENT_MARKER))
}

/// Join tab-separated fragments, padding each join to the next 8-column stop.
fn expand_tabs(segments: &[&str]) -> String {
    let mut line = segments.first().map(|s| s.to_string()).unwrap_or_default();
    for segment in segments.iter().skip(1) {
        let spaces = 8 - line.chars().count() % 8;
        line.extend(std::iter::repeat_n(' ', spaces));
        line.push_str(segment);
    }
    line
}
