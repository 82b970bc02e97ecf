use crate::Game;
use crate::engine::output::Output;
use crate::engine::turn::finish_turn;
use crate::world::{MessageId, Object, ObjectId, Room, RoomId, Word};

/// Object and room queries shared by every handler.
impl Game {
    pub(crate) fn obj(&self, id: ObjectId) -> &Object {
        self.world.object(id)
    }

    pub(crate) fn obj_mut(&mut self, id: ObjectId) -> &mut Object {
        self.world.object_mut(id)
    }

    pub(crate) fn prop(&self, id: ObjectId) -> i32 {
        self.obj(id).prop
    }

    pub(crate) fn set_prop(&mut self, id: ObjectId, prop: i32) {
        self.obj_mut(id).prop = prop;
    }

    pub(crate) fn is_toting(&self, id: ObjectId) -> bool {
        self.obj(id).is_toting()
    }

    /// Carried, or lying in the current room.
    pub(crate) fn is_here(&self, id: ObjectId) -> bool {
        let obj = self.obj(id);
        obj.is_toting() || obj.is_at(self.loc)
    }

    pub(crate) fn here(&self) -> &Room {
        self.world.room(self.loc)
    }

    /// A lit lamp at hand beats any darkness.
    pub(crate) fn is_dark(&self) -> bool {
        let lamp = self.cast.lamp;
        if self.is_here(lamp) && self.prop(lamp) != 0 {
            return false;
        }
        self.here().is_dark()
    }

    pub(crate) fn objects_here(&self) -> Vec<ObjectId> {
        self.world.objects_at(self.loc)
    }

    pub(crate) fn dwarf_here(&self) -> bool {
        self.dwarves.iter().any(|d| d.room == self.loc)
    }

    pub(crate) fn drop_at(&mut self, id: ObjectId, room: RoomId) {
        self.obj_mut(id).put(room);
    }

    pub(crate) fn destroy(&mut self, id: ObjectId) {
        self.obj_mut(id).hide();
    }

    pub(crate) fn is_treasure(&self, id: ObjectId) -> bool {
        self.obj(id).is_treasure
    }

    /// The troll leaves; his stand-in on the far side takes over both ends
    /// of the bridge.
    pub(crate) fn banish_troll(&mut self) {
        let troll = self.cast.troll;
        let rooms = self.obj(troll).starting_rooms.clone();
        self.destroy(troll);
        self.obj_mut(self.cast.troll2).place(rooms);
    }
}

pub(crate) fn message(out: &mut Output, game: &Game, n: u16) {
    out.say(game.world.message(MessageId(n)));
}

/// The rejection message every synonym of `verb` shares.
pub(crate) fn default_message(out: &mut Output, game: &Game, verb: &Word) {
    if let Some(id) = game.world.vocabulary.default_message(verb.id) {
        out.say(game.world.message(id));
    }
}

pub(crate) fn write_default_message(out: &mut Output, game: &mut Game, verb: &Word) {
    default_message(out, game, verb);
    finish_turn(out, game, None);
}

pub(crate) fn ask_verb_what(out: &mut Output, game: &mut Game, verb: &Word) {
    out.say(format!("{} What?\n", verb.text));
    finish_turn(out, game, None);
}

pub(crate) fn say_okay_and_finish(out: &mut Output, game: &mut Game) {
    message(out, game, 54);
    finish_turn(out, game, None);
}

pub(crate) fn i_see_no(out: &mut Output, game: &mut Game, thing: &str) {
    out.say(format!("I see no {thing} here.\n"));
    finish_turn(out, game, None);
}
