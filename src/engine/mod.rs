mod actions;
mod conditions;
mod helpers;
mod items;
mod movement;
mod npcs;
mod output;
mod parser;
mod render;
mod score;
mod turn;

pub use npcs::{Actor, Role};
pub use output::{Output, OutputBlock};
pub use parser::{Verb, tokenize};
pub use score::{compute_score, rank};
pub use turn::{Pending, Phase, Question};

pub(crate) use turn::{do_command, start};
