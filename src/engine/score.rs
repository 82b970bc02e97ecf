use tracing::info;

use crate::Game;
use crate::engine::output::Output;
use crate::world::{ClassMessage, RoomId};

const BUILDING: RoomId = RoomId(3);
/// Witt's End, where a tidy player leaves the magazine.
const WITTS_END: RoomId = RoomId(108);

/// Current score and the most the game could award, in that order.
/// Asking for the score mid-game forfeits the four points for not quitting.
pub fn compute_score(game: &Game, for_score_command: bool) -> (i32, i32) {
    let mut score = 2;
    let mut max_score = 2;
    let chest = game.cast.chest;

    for id in game.world.treasures() {
        let treasure = game.obj(id);
        let value = if id.0 > chest.0 {
            16
        } else if id == chest {
            14
        } else {
            12
        };
        max_score += value;
        if treasure.prop >= 0 {
            score += 2;
        }
        if treasure.rooms().first() == Some(&BUILDING) && treasure.prop == 0 {
            score += value - 2;
        }
    }

    let max_deaths = game.config.max_deaths as i32;
    max_score += max_deaths * 10;
    score += (max_deaths - game.deaths as i32) * 10;

    max_score += 4;
    if !for_score_command && !game.gave_up {
        score += 4;
    }

    max_score += 25;
    if game.dwarf_stage != 0 {
        score += 25;
    }

    max_score += 25;
    if game.is_closing {
        score += 25;
    }

    max_score += 45;
    if game.is_closed {
        score += match game.bonus {
            135 => 25,
            134 => 30,
            133 => 45,
            _ => 10,
        };
    }

    max_score += 1;
    if game.obj(game.cast.magazine).is_at(WITTS_END) {
        score += 1;
    }

    for hint in game.world.hints.values() {
        if hint.used {
            score -= hint.penalty;
        }
    }

    (score, max_score)
}

/// The rank a score earns: the first class whose threshold the score does
/// not exceed (the last class when it exceeds them all), plus the points
/// needed to move past it, or `None` at the top.
pub fn rank(classes: &[ClassMessage], score: i32) -> Option<(&str, Option<i32>)> {
    let last = classes.len().checked_sub(1)?;
    let i = classes
        .iter()
        .position(|c| c.threshold >= score)
        .unwrap_or(last);
    let gap = (i < last).then(|| classes[i].threshold + 1 - score);
    Some((classes[i].text.as_str(), gap))
}

pub(crate) fn score_and_exit(out: &mut Output, game: &mut Game) {
    let (score, max_score) = compute_score(game, false);
    info!(score, max_score, turns = game.turns, "game over");
    out.say(format!(
        "\nYou scored {score} out of a possible {max_score} using {} turns.",
        game.turns
    ));

    if let Some((text, gap)) = rank(&game.world.class_messages, score) {
        out.say(format!("\n{text}\n"));
        match gap {
            Some(d) => out.say(format!(
                "To achieve the next higher rating, you need {d} more point{}\n",
                if d > 1 { "s" } else { "" }
            )),
            None => out.say(
                "To achieve the next higher rating would be a neat trick!\n\nCongratulations!!\n",
            ),
        }
    }
    game.is_done = true;
}
