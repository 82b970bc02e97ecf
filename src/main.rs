use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::thread;
use std::time::Duration;

use cave_adventure::{Game, OutputBlock, Settings, load_world_from_file, tokenize};
use cave_adventure::engine::Output;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Print a turn's narration, one character at a time when a baud rate is
/// set, and write any save snapshots to `save_dir`.
fn flush_output(out: Output, settings: &Settings) -> io::Result<()> {
    for block in out.blocks {
        match block {
            OutputBlock::Text(text) => print_paced(&text, settings.baud)?,
            OutputBlock::Saved { sink, blob } => {
                let reply = store_snapshot(&settings.save_dir, &sink, &blob);
                print_paced(&reply, settings.baud)?;
            }
        }
    }
    io::stdout().flush()
}

fn print_paced(text: &str, baud: u32) -> io::Result<()> {
    if baud == 0 {
        print!("{text}");
        return Ok(());
    }
    let mut stdout = io::stdout();
    // Ten bits per character on the wire.
    let delay = Duration::from_secs_f64(10.0 / f64::from(baud));
    for ch in text.chars() {
        print!("{ch}");
        stdout.flush()?;
        thread::sleep(delay);
    }
    Ok(())
}

/// Write a snapshot and return what to tell the player. The game is only
/// reported saved once the file is on disk.
fn store_snapshot(dir: &Path, name: &str, blob: &[u8]) -> String {
    match write_save(dir, name, blob) {
        Ok(()) => "GAME SAVED\n".to_string(),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            "I REFUSE TO OVERWRITE AN EXISTING FILE.\n".to_string()
        }
        Err(e) => {
            warn!(error = %e, name, "save not written");
            format!("I CAN'T SAVE TO {}: {e}\n", name.to_uppercase())
        }
    }
}

fn write_save(dir: &Path, name: &str, blob: &[u8]) -> io::Result<()> {
    let path = dir.join(name);
    // create_new refuses to clobber an existing file.
    let mut file = fs::OpenOptions::new().write(true).create_new(true).open(&path)?;
    file.write_all(blob)?;
    info!(path = %path.display(), "save written");
    Ok(())
}

fn load_settings(path: Option<PathBuf>) -> Settings {
    let Some(path) = path else {
        return Settings::default();
    };
    match Settings::load(&path) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load settings '{}': {e}", path.display());
            process::exit(1);
        }
    }
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let settings = load_settings(args.next().map(PathBuf::from));
    let resume_path = args.next().map(PathBuf::from);

    let mut game = match resume_path {
        Some(path) => {
            let bytes = fs::read(&path)?;
            match Game::resume(&bytes) {
                Ok(game) => {
                    println!("Resumed game from {}", path.display());
                    game
                }
                Err(e) => {
                    eprintln!("Failed to resume '{}': {e}", path.display());
                    process::exit(1);
                }
            }
        }
        None => {
            let world = match load_world_from_file(&settings.data_path) {
                Ok(world) => world,
                Err(e) => {
                    eprintln!(
                        "Failed to load world file '{}': {e}",
                        settings.data_path.display()
                    );
                    process::exit(1);
                }
            };
            match Game::new(world, settings.game.clone()) {
                Ok(game) => game,
                Err(e) => {
                    eprintln!("Cannot play this world: {e}");
                    process::exit(1);
                }
            }
        }
    };

    flush_output(game.start(), &settings)?;

    let stdin = io::stdin();
    while !game.is_finished() {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            println!();
            break;
        }

        let tokens = tokenize(&input);
        if tokens.is_empty() {
            continue;
        }
        let words: Vec<&str> = tokens.iter().map(String::as_str).collect();
        match game.do_command(&words) {
            Ok(out) => flush_output(out, &settings)?,
            Err(e) => {
                warn!(error = %e, "save failed");
                println!("{e}");
            }
        }
    }

    Ok(())
}
