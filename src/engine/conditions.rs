use crate::Game;
use crate::world::Condition;

/// Does a travel-table condition let the player through? Percent checks
/// draw from the game's generator, so evaluation order is observable.
pub(crate) fn condition_passes(game: &mut Game, condition: Condition) -> bool {
    match condition {
        Condition::Unconditional | Condition::NotDwarf => true,
        Condition::PercentChance(p) => 100.0 * game.random() < f64::from(p),
        Condition::Carrying(obj) => game.is_toting(obj),
        Condition::CarryingOrInRoomWith(obj) => game.is_here(obj),
        Condition::PropNotEqual(obj, value) => game.prop(obj) != value,
    }
}
