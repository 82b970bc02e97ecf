pub mod config;
pub mod engine;
pub mod error;
pub mod world;

mod persist;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use engine::{Actor, Output, Phase, Question, Role, Verb};
use world::{Cast, Object, ObjectId, RoomId, WordKind};

pub use config::{GameConfig, Settings};
pub use engine::{OutputBlock, Pending, tokenize};
pub use error::{ConfigError, PersistenceError, WorldLoadError};
pub use world::{World, load_world_from_file, load_world_from_reader, load_world_from_str};

/// Room where the pirate hides his chest.
const CHEST_ROOM: RoomId = RoomId(114);

/// One player's adventure: the world plus everything that changes turn by
/// turn. The whole value is what gets saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub(crate) world: World,
    pub(crate) cast: Cast,
    pub(crate) config: GameConfig,
    pub(crate) rng: ChaCha8Rng,

    pub(crate) started: bool,
    pub(crate) loc: RoomId,
    pub(crate) oldloc: RoomId,
    pub(crate) oldloc2: RoomId,
    pub(crate) chest_room: RoomId,
    pub(crate) pending: Option<Question>,

    pub(crate) dwarves: Vec<Actor>,
    pub(crate) pirate: Actor,
    /// DFLAG: 0 dormant, 1 armed, 2 roaming, 3+ attacking in earnest.
    pub(crate) dwarf_stage: u32,
    pub(crate) dwarves_killed: u32,
    /// Where a dwarf's knife last clattered, until the player moves on.
    pub(crate) knife_location: Option<RoomId>,

    pub(crate) bottle_contents: Option<ObjectId>,
    pub(crate) lamp_turns: i32,
    pub(crate) warned_about_dim_lamp: bool,

    pub(crate) turns: u32,
    pub(crate) clock1: i32,
    pub(crate) clock2: i32,
    pub(crate) is_closing: bool,
    pub(crate) panic: bool,
    pub(crate) is_closed: bool,
    pub(crate) bonus: u16,

    pub(crate) treasures_not_found: i32,
    pub(crate) impossible_treasures: i32,
    pub(crate) could_fall_in_pit: bool,
    pub(crate) full_wests: u32,
    /// Turn of the most recent still-valid "fee", for fee fie foe foo.
    pub(crate) foobar: Option<u32>,
    pub(crate) look_complaints: u32,
    pub(crate) full_description_period: u32,

    pub(crate) is_dead: bool,
    pub(crate) deaths: u32,
    pub(crate) gave_up: bool,
    pub(crate) is_done: bool,
}

#[cfg(feature = "wasm")]
mod wasm_bindings {
    use super::*;
    use serde::Serialize;
    use serde_wasm_bindgen::to_value;
    use wasm_bindgen::prelude::*;

    #[derive(Serialize)]
    struct WasmSnapshot {
        sink: String,
        blob: Vec<u8>,
    }

    /// Snapshots are handed to the page, which confirms them once stored.
    #[derive(Serialize)]
    struct WasmStepResult {
        text: String,
        snapshots: Vec<WasmSnapshot>,
        finished: bool,
    }

    #[wasm_bindgen]
    pub struct WasmGame {
        game: Game,
    }

    #[wasm_bindgen]
    impl WasmGame {
        /// Compile `advent.dat` contents and set up a game. Call `start()`
        /// for the opening question.
        #[wasm_bindgen(constructor)]
        pub fn new(data: &str, seed: Option<u64>) -> Result<WasmGame, JsValue> {
            let world = load_world_from_str(data).map_err(|e| JsValue::from_str(&e.to_string()))?;
            let config = GameConfig {
                seed,
                ..GameConfig::default()
            };
            let game = Game::new(world, config).map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(WasmGame { game })
        }

        #[wasm_bindgen]
        pub fn start(&mut self) -> JsValue {
            let out = self.game.start();
            self.result(out)
        }

        /// Process one typed line.
        #[wasm_bindgen]
        pub fn step(&mut self, line: &str) -> Result<JsValue, JsValue> {
            let tokens = tokenize(line);
            let words: Vec<&str> = tokens.iter().map(String::as_str).collect();
            let out = self
                .game
                .do_command(&words)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(self.result(out))
        }

        #[wasm_bindgen]
        pub fn save(&self) -> Result<Vec<u8>, JsValue> {
            self.game.save().map_err(|e| JsValue::from_str(&e.to_string()))
        }

        #[wasm_bindgen]
        pub fn resume(bytes: &[u8]) -> Result<WasmGame, JsValue> {
            let game = Game::resume(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(WasmGame { game })
        }
    }

    impl WasmGame {
        fn result(&self, out: Output) -> JsValue {
            let text = out.text();
            let snapshots = out
                .blocks
                .into_iter()
                .filter_map(|block| match block {
                    OutputBlock::Saved { sink, blob } => Some(WasmSnapshot { sink, blob }),
                    OutputBlock::Text(_) => None,
                })
                .collect();
            to_value(&WasmStepResult {
                text,
                snapshots,
                finished: self.game.is_finished(),
            })
            .unwrap_or(JsValue::NULL)
        }
    }
}

impl Game {
    /// Set up a game on a compiled world. Fails when the world lacks an
    /// object or verb the engine relies on.
    pub fn new(world: World, config: GameConfig) -> Result<Self, WorldLoadError> {
        let cast = Cast::resolve(&world)?;
        for class in world.vocabulary.classes() {
            if class.kind != WordKind::Verb {
                continue;
            }
            let name = class.synonyms.first().map(String::as_str).unwrap_or("");
            if Verb::from_name(name).is_none() {
                return Err(WorldLoadError::UnknownVerb(name.to_string()));
            }
        }

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(Game {
            lamp_turns: config.lamp_turns,
            look_complaints: config.look_complaints,
            full_description_period: config.full_description_period,
            world,
            cast,
            config,
            rng,
            started: false,
            loc: RoomId(1),
            oldloc: RoomId(1),
            oldloc2: RoomId(1),
            chest_room: CHEST_ROOM,
            pending: None,
            dwarves: Vec::new(),
            pirate: Actor::new(Role::Pirate, CHEST_ROOM),
            dwarf_stage: 0,
            dwarves_killed: 0,
            knife_location: None,
            bottle_contents: None,
            warned_about_dim_lamp: false,
            turns: 0,
            clock1: 30,
            clock2: 50,
            is_closing: false,
            panic: false,
            is_closed: false,
            bonus: 0,
            treasures_not_found: 0,
            impossible_treasures: 0,
            could_fall_in_pit: false,
            full_wests: 0,
            foobar: None,
            is_dead: false,
            deaths: 0,
            gave_up: false,
            is_done: false,
        })
    }

    /// Fill the bottle and ask whether the player wants instructions.
    pub fn start(&mut self) -> Output {
        let mut out = Output::new();
        if !self.started {
            self.started = true;
            engine::start(&mut out, self);
        }
        out
    }

    /// Run one command of one or two words. A game that was never started
    /// starts first, so the first command answers the opening question.
    pub fn do_command(&mut self, words: &[&str]) -> Result<Output, PersistenceError> {
        let mut out = Output::new();
        if !self.started {
            out.append(self.start());
        }
        trace!(?words, turn = self.turns, "command");
        engine::do_command(&mut out, self, words)?;
        Ok(out)
    }

    pub fn phase(&self) -> Phase {
        match &self.pending {
            Some(q) if q.pending == Pending::Resurrect => Phase::Dead,
            Some(q) => Phase::AwaitingYesNo(q.pending),
            None if self.is_dead || self.is_done => Phase::Finished,
            None => Phase::AwaitingCommand,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase() == Phase::Finished
    }

    /// Snapshot the whole game, random generator included.
    pub fn save(&self) -> Result<Vec<u8>, PersistenceError> {
        persist::encode(self)
    }

    pub fn resume(bytes: &[u8]) -> Result<Self, PersistenceError> {
        persist::decode(bytes)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn cast(&self) -> &Cast {
        &self.cast
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn location(&self) -> RoomId {
        self.loc
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn lamp_turns(&self) -> i32 {
        self.lamp_turns
    }

    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    pub fn dwarf_stage(&self) -> u32 {
        self.dwarf_stage
    }

    pub fn object(&self, id: ObjectId) -> &Object {
        self.world.object(id)
    }

    pub fn inventory(&self) -> Vec<ObjectId> {
        self.world.inventory()
    }

    /// Score so far and the most the game allows.
    pub fn score(&self) -> (i32, i32) {
        engine::compute_score(self, false)
    }

    pub(crate) fn random(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    pub(crate) fn choose_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}
