use tracing::trace;

use crate::Game;
use crate::engine::actions::{perform, t_suspend};
use crate::engine::helpers::{ask_verb_what, i_see_no, message};
use crate::engine::movement::do_motion;
use crate::engine::output::Output;
use crate::engine::turn::finish_turn;
use crate::error::PersistenceError;
use crate::world::{ObjectId, Word, WordKind};

/// Split a typed line into lower-case words, dropping punctuation.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Every verb class the engine knows how to handle, named after the first
/// word of its class in the data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Carry,
    Drop,
    Say,
    Unlock,
    Nothing,
    Lock,
    Light,
    Extinguish,
    Wave,
    Calm,
    Walk,
    Attack,
    Pour,
    Eat,
    Drink,
    Rub,
    Throw,
    Quit,
    Find,
    Inventory,
    Feed,
    Fill,
    Blast,
    Score,
    Fee,
    Brief,
    Read,
    Break,
    Wake,
    Suspend,
    Hours,
}

impl Verb {
    pub fn from_name(name: &str) -> Option<Verb> {
        let verb = match name {
            "carry" => Verb::Carry,
            "drop" => Verb::Drop,
            "say" => Verb::Say,
            "unlock" => Verb::Unlock,
            "nothing" => Verb::Nothing,
            "lock" => Verb::Lock,
            "light" => Verb::Light,
            "extinguish" => Verb::Extinguish,
            "wave" => Verb::Wave,
            "calm" => Verb::Calm,
            "walk" => Verb::Walk,
            "attack" => Verb::Attack,
            "pour" => Verb::Pour,
            "eat" => Verb::Eat,
            "drink" => Verb::Drink,
            "rub" => Verb::Rub,
            "throw" => Verb::Throw,
            "quit" => Verb::Quit,
            "find" => Verb::Find,
            "inventory" => Verb::Inventory,
            "feed" => Verb::Feed,
            "fill" => Verb::Fill,
            "blast" => Verb::Blast,
            "score" => Verb::Score,
            "fee" => Verb::Fee,
            "brief" => Verb::Brief,
            "read" => Verb::Read,
            "break" => Verb::Break,
            "wake" => Verb::Wake,
            "suspend" => Verb::Suspend,
            "hours" => Verb::Hours,
            _ => return None,
        };
        Some(verb)
    }
}

/// Words whose `say` is the same as typing them: xyzzy, plugh, plover and
/// the fee-fie-foe-foo chant.
const MAGIC_WORDS: [u16; 4] = [62, 65, 71, 2025];
/// Rooms from which the grate is reached by walking into the depression,
/// and the range from which it is the way back out.
const GRATE_FROM_ABOVE: [u16; 3] = [1, 4, 7];

pub(crate) fn dispatch_command(
    out: &mut Output,
    game: &mut Game,
    words: &[&str],
) -> Result<(), PersistenceError> {
    if !(1..=2).contains(&words.len()) {
        dont_understand(out, game);
        return Ok(());
    }

    // The handle can be anything, not just a vocabulary word.
    if words[0] == "save" && words.len() > 1 {
        return t_suspend(out, game, words[1]);
    }

    let mut resolved = Vec::with_capacity(words.len());
    for text in words {
        match game.world.vocabulary.lookup(text) {
            Some(word) => resolved.push(word.clone()),
            None => {
                dont_understand(out, game);
                return Ok(());
            }
        }
    }
    let mut word2 = if resolved.len() == 2 { resolved.pop() } else { None };
    let Some(mut word1) = resolved.pop() else {
        dont_understand(out, game);
        return Ok(());
    };
    trace!(word1 = %word1.text, word2 = ?word2.as_ref().map(|w| &w.text), "dispatch");

    let is = |game: &Game, word: &Word, name: &str| game.world.vocabulary.is(word.id, name);

    if is(game, &word1, "enter")
        && word2
            .as_ref()
            .is_some_and(|w| is(game, w, "stream") || is(game, w, "water"))
    {
        let n = if game.here().liquid == Some(game.cast.water) { 70 } else { 43 };
        message(out, game, n);
        finish_turn(out, game, None);
        return Ok(());
    }

    if (is(game, &word1, "enter") || is(game, &word1, "walk")) && word2.is_some() {
        // "enter house" is just "house".
        if let Some(w) = word2.take() {
            word1 = w;
        }
    }

    if (is(game, &word1, "water") || is(game, &word1, "oil"))
        && word2.as_ref().is_some_and(|w| {
            (is(game, w, "plant") || is(game, w, "door")) && game.is_here(referent(w))
        })
    {
        if let Some(pour) = game.world.vocabulary.lookup("pour").cloned() {
            word2 = Some(std::mem::replace(&mut word1, pour));
        }
    }

    if is(game, &word1, "say") {
        match word2 {
            Some(said) => t_say(out, game, &said)?,
            None => ask_verb_what(out, game, &word1),
        }
        return Ok(());
    }

    let kinds = (word1.kind(), word2.as_ref().and_then(Word::kind));
    let (verb, noun) = match kinds {
        (Some(WordKind::Motion), None) => {
            if word1.text == "west" {
                game.full_wests += 1;
                if game.full_wests == 10 {
                    message(out, game, 17);
                }
            }
            do_motion(out, game, &word1);
            return Ok(());
        }
        (Some(WordKind::SnappyComeback), None) => {
            message(out, game, word1.id.index());
            finish_turn(out, game, None);
            return Ok(());
        }
        (Some(WordKind::Noun), None) => (None, Some(word1)),
        (Some(WordKind::Verb), None) => (Some(word1), None),
        (Some(WordKind::Verb), Some(WordKind::Noun)) => (Some(word1), word2),
        (Some(WordKind::Noun), Some(WordKind::Verb)) => (word2, Some(word1)),
        _ => {
            dont_understand(out, game);
            return Ok(());
        }
    };

    let obj = match &noun {
        None => None,
        Some(noun) => match resolve_referent(out, game, verb.as_ref(), noun)? {
            Referent::Object(obj) => Some(obj),
            Referent::Handled => return Ok(()),
        },
    };

    let Some(verb) = verb else {
        let text = noun.map(|n| n.text).unwrap_or_default();
        out.say(format!("What do you want to do with the {text}?\n"));
        finish_turn(out, game, None);
        return Ok(());
    };

    let name = game.world.vocabulary.canonical(verb.id).to_string();
    let Some(action) = Verb::from_name(&name) else {
        // Games are only built on worlds whose verbs all resolve.
        dont_understand(out, game);
        return Ok(());
    };
    perform(out, game, action, &verb, obj)
}

enum Referent {
    Object(ObjectId),
    /// The noun already produced the whole response.
    Handled,
}

pub(crate) fn referent(noun: &Word) -> ObjectId {
    ObjectId(noun.id.index())
}

/// Work out which object a noun means, letting a few absent objects stand
/// in for things that are present.
fn resolve_referent(
    out: &mut Output,
    game: &mut Game,
    verb: Option<&Word>,
    noun: &Word,
) -> Result<Referent, PersistenceError> {
    let c = game.cast;
    let mut obj = referent(noun);
    if game.is_here(obj) {
        return Ok(Referent::Object(obj));
    }

    let loc = game.loc.0;
    let is_here = if obj == c.grate {
        if GRATE_FROM_ABOVE.contains(&loc) {
            dispatch_command(out, game, &["depression"])?;
            return Ok(Referent::Handled);
        }
        if 9 < loc && loc < 15 {
            dispatch_command(out, game, &["entrance"])?;
            return Ok(Referent::Handled);
        }
        false
    } else if game.world.vocabulary.is(noun.id, "dwarf") {
        game.dwarf_here()
    } else if Some(obj) == game.bottle_contents && game.is_here(c.bottle) {
        true
    } else if Some(obj) == game.here().liquid {
        true
    } else if obj == c.plant && game.is_here(c.plant2) && game.prop(c.plant2) != 0 {
        obj = c.plant2;
        true
    } else if obj == c.knife && game.knife_location == Some(game.loc) {
        game.knife_location = None;
        message(out, game, 116);
        finish_turn(out, game, None);
        return Ok(Referent::Handled);
    } else if obj == c.rod && game.is_here(c.rod2) {
        obj = c.rod2;
        true
    } else {
        // Finding and taking stock work on things that are not here.
        verb.is_some_and(|v| {
            let vocab = &game.world.vocabulary;
            vocab.is(v.id, "find") || vocab.is(v.id, "inventory")
        })
    };

    if !is_here {
        i_see_no(out, game, &noun.text);
        return Ok(Referent::Handled);
    }
    Ok(Referent::Object(obj))
}

pub(crate) fn dont_understand(out: &mut Output, game: &mut Game) {
    let r = game.random();
    let n = if r < 0.20 {
        61
    } else if r < 0.36 {
        13
    } else {
        60
    };
    message(out, game, n);
    finish_turn(out, game, None);
}

/// Saying a magic word is the same as typing it.
fn t_say(out: &mut Output, game: &mut Game, said: &Word) -> Result<(), PersistenceError> {
    if MAGIC_WORDS.contains(&said.id.0) {
        let text = said.text.clone();
        return dispatch_command(out, game, &[text.as_str()]);
    }
    out.say(format!("Okay, \"{}\".", said.text));
    finish_turn(out, game, None);
    Ok(())
}
