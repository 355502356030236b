//! drawshapes - headless shell for the shape editor.
//!
//! Replays scripted input events against an editor session and writes the resulting scene,
//! either to a file, to stdout, or to a named slot in the scene store.

mod script;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use drawshapes_core::storage::{load_from_path, save_to_path};
use drawshapes_core::{
    Editor, EditorConfig, FileStorage, KEY_BINDINGS, SceneStorage, StorageError,
};
use script::Step;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

/// drawshapes - script-driven 2D shape editor
#[derive(Parser)]
#[command(name = "drawshapes")]
#[command(about = "Place, select, move and persist simple shapes from a script")]
struct Cli {
    /// Scene store directory (defaults to the user data directory)
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an event script
    Run {
        /// Script of input events
        script: PathBuf,

        /// Scene file to load before the script runs
        #[arg(short, long, conflicts_with = "store")]
        input: Option<PathBuf>,

        /// Named scene in the store: loaded first if present, saved afterwards
        #[arg(short, long)]
        store: Option<String>,

        /// Write the final scene here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON editor config
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate a scene file
    Check {
        /// Scene file to validate
        file: PathBuf,
    },

    /// List scenes in the store
    List,

    /// Remove a scene from the store
    Delete {
        /// Scene name
        name: String,
    },

    /// List key bindings
    Shortcuts,
}

/// A named scene slot in a store.
struct StoredScene<'a> {
    storage: &'a dyn SceneStorage,
    name: &'a str,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            script,
            input,
            store,
            output,
            config,
        } => {
            let storage = store
                .as_ref()
                .map(|_| open_store(cli.store_dir))
                .transpose()?;
            let stored = storage
                .as_ref()
                .zip(store.as_deref())
                .map(|(storage, name)| StoredScene { storage, name });
            run(
                &script,
                input.as_deref(),
                stored,
                output.as_deref(),
                config.as_deref(),
            )
        }
        Commands::Check { file } => check(&file),
        Commands::List => {
            let storage = open_store(cli.store_dir)?;
            for name in stored_names(&storage)? {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::Delete { name } => {
            let storage = open_store(cli.store_dir)?;
            storage
                .delete(&name)
                .with_context(|| format!("Failed to delete scene '{}'", name))
        }
        Commands::Shortcuts => {
            for (key, description) in KEY_BINDINGS {
                println!("  {}  {}", key, description);
            }
            Ok(())
        }
    }
}

fn open_store(dir: Option<PathBuf>) -> Result<FileStorage> {
    let storage = match dir {
        Some(dir) => FileStorage::new(dir),
        None => FileStorage::default_location(),
    }
    .context("Failed to open scene store")?;
    log::debug!("Scene store at {}", storage.base_path().display());
    Ok(storage)
}

/// Stored scene names, sorted.
fn stored_names(storage: &dyn SceneStorage) -> Result<Vec<String>> {
    let mut names = storage.list().context("Failed to list scenes")?;
    names.sort();
    Ok(names)
}

fn run(
    script_path: &Path,
    input: Option<&Path>,
    store: Option<StoredScene<'_>>,
    output: Option<&Path>,
    config: Option<&Path>,
) -> Result<()> {
    let config = match config {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EditorConfig::default(),
    };
    let mut editor = Editor::new(config);

    if let Some(path) = input {
        let scene =
            load_from_path(path).with_context(|| format!("Failed to load {}", path.display()))?;
        editor.replace_scene(scene);
    }
    if let Some(stored) = &store {
        match stored.storage.load(stored.name) {
            Ok(scene) => {
                editor.replace_scene(scene);
            }
            Err(StorageError::NotFound(_)) => log::info!("Starting new scene '{}'", stored.name),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to load scene '{}'", stored.name));
            }
        }
    }

    let text = std::fs::read_to_string(script_path)
        .with_context(|| format!("Failed to read script {}", script_path.display()))?;
    let steps = script::parse_script(&text)
        .with_context(|| format!("Invalid script {}", script_path.display()))?;

    log::info!("Starting drawshapes with {} script steps", steps.len());
    for step in steps {
        apply(&mut editor, step);
        // Start freshly triggered effects right away
        editor.tick(Instant::now());
    }
    play_effects(&mut editor, None);

    if let Some(path) = output {
        save_to_path(path, editor.scene())
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    if let Some(stored) = &store {
        stored
            .storage
            .save(stored.name, editor.scene())
            .with_context(|| format!("Failed to store scene '{}'", stored.name))?;
        log::info!("Stored scene '{}'", stored.name);
    }
    if output.is_none() && store.is_none() {
        print!("{}", editor.save());
    }
    Ok(())
}

fn apply(editor: &mut Editor, step: Step) {
    match step {
        Step::Click { at, button } => {
            editor.click(at, button);
        }
        Step::Drag { from, to } => {
            editor.press(from);
            editor.drag(to);
            editor.release(to);
        }
        Step::Key(key) => {
            if let Err(e) = editor.key(key) {
                log::warn!("Key {:?}: {}", key, e);
            }
        }
        Step::Tool(kind) => editor.set_tool(kind),
        Step::Color(color) => editor.set_color(color),
        Step::Wait(duration) => play_effects(editor, Some(Instant::now() + duration)),
    }
}

/// Step effects in real time until `deadline`, or until none are left when there is no deadline.
fn play_effects(editor: &mut Editor, deadline: Option<Instant>) {
    loop {
        let now = Instant::now();
        if deadline.is_some_and(|d| now >= d) {
            break;
        }
        let Some(due) = editor.next_tick(now) else {
            if let Some(d) = deadline {
                thread::sleep(d - now);
            }
            break;
        };
        let wake = deadline.map_or(due, |d| due.min(d));
        if wake > now {
            thread::sleep(wake - now);
            continue;
        }
        editor.tick(now);
    }
}

fn check(file: &Path) -> Result<()> {
    let scene = load_from_path(file).with_context(|| format!("Invalid scene {}", file.display()))?;
    println!("{}: {} shapes", file.display(), scene.len());
    Ok(())
}
