//! dactions: inspect and drive delayed level actions in a save file

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use strum::IntoEnumIterator;
use tracing::info;
use tracing_subscriber::EnvFilter;

use da_core::dungeon::{Branch, Cell, Level, LevelId};
use da_core::monster::{Attitude, God, Holiness, Monster, MonsterFlags, MonsterKind};
use da_core::object::Object;
use da_core::{DactionType, Hero, LevelEvent, SessionOptions, WorldSession, PIKEL_BAND};
use da_save::{World, default_save_path, load_world, save_world};

/// Delayed level actions
#[derive(Parser, Debug)]
#[command(name = "dactions")]
#[command(author, version, about = "Schedule and replay world-wide level changes", long_about = None)]
struct Args {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    /// RNG seed for new worlds
    #[arg(long = "seed", global = true)]
    seed: Option<u64>,

    /// Session options file (JSON)
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every delayed action kind
    Kinds,
    /// Write a new demo world
    New {
        /// Save file (defaults to the user data directory)
        path: Option<PathBuf>,
    },
    /// Show the log, cursors and counters of a world
    Inspect { path: PathBuf },
    /// Schedule a delayed action against the active level
    Schedule {
        path: PathBuf,
        /// Kind name (e.g. AllyHoly) or numeric tag
        kind: String,
    },
    /// Make a stored level active, replaying what it missed
    Enter {
        path: PathBuf,
        /// Level such as "D:2" or "Tomb:3"
        level: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    let mut options = match &args.config {
        Some(path) => SessionOptions::load_from_file(path)
            .with_context(|| format!("loading options from {}", path.display()))?,
        None => SessionOptions::default(),
    };
    if args.seed.is_some() {
        options.rng_seed = args.seed;
    }

    match args.command {
        Command::Kinds => list_kinds(),
        Command::New { path } => {
            let path = path.unwrap_or_else(|| default_save_path("demo"));
            let world = demo_world(options);
            save_world(&world, &path)?;
            info!(path = %path.display(), "wrote new world");
            print_world(&world);
        }
        Command::Inspect { path } => {
            let world = load(&path)?;
            print_world(&world);
        }
        Command::Schedule { path, kind } => {
            let act = parse_kind(&kind)?;
            let mut world = load(&path)?;
            world.session.schedule_action(&mut world.current, act);
            print_events(&mut world.current);
            world.session.recompute_level_counters(&world.current);
            save_world(&world, &path)?;
        }
        Command::Enter { path, level } => {
            let id = parse_level(&level)?;
            let mut world = load(&path)?;
            let applied = world
                .change_level(id)
                .ok_or_else(|| anyhow!("no level {id} in this world"))?;
            println!("Entered {id}, replayed {applied} delayed action(s).");
            print_events(&mut world.current);
            save_world(&world, &path)?;
        }
    }
    Ok(())
}

fn load(path: &Path) -> Result<World> {
    load_world(path).with_context(|| format!("loading {}", path.display()))
}

fn list_kinds() {
    println!("{:>3}  {:<8}  {:<22} description", "tag", "counted", "kind");
    for act in DactionType::iter() {
        println!(
            "{:>3}  {:<8}  {:<22} {}",
            act.index(),
            if act.is_counted() { "yes" } else { "no" },
            format!("{act:?}"),
            act
        );
    }
}

fn parse_kind(s: &str) -> Result<DactionType> {
    if let Ok(tag) = s.parse::<u8>() {
        return Ok(DactionType::try_from(tag)?);
    }
    DactionType::iter()
        .find(|act| format!("{act:?}").eq_ignore_ascii_case(s))
        .ok_or_else(|| anyhow!("unknown delayed action '{s}' (see `dactions kinds`)"))
}

fn parse_level(s: &str) -> Result<LevelId> {
    let Some((branch, depth)) = s.split_once(':') else {
        bail!("level must look like D:2, got '{s}'");
    };
    let branch = Branch::iter()
        .find(|b| b.to_string().eq_ignore_ascii_case(branch))
        .ok_or_else(|| anyhow!("unknown branch '{branch}'"))?;
    let depth = depth
        .parse::<i8>()
        .with_context(|| format!("bad depth in '{s}'"))?;
    Ok(LevelId::new(branch, depth))
}

fn print_world(world: &World) {
    let log: Vec<String> = world
        .session
        .dactions
        .iter()
        .map(|act| format!("{act:?}"))
        .collect();
    println!("Log ({} entries): [{}]", log.len(), log.join(", "));

    for id in world.level_ids() {
        let Some(level) = world.level(id) else { continue };
        let marker = if id == world.current.id { "*" } else { " " };
        println!(
            "{marker} {id:<8} cursor {:>3}  pending {:>3}  monsters {}",
            level.dactions_done,
            world.session.pending_for(level),
            level.living_monsters().count()
        );
    }

    println!("Counters:");
    for act in DactionType::counted() {
        println!("  {:<22} {}", format!("{act:?}"), world.session.query_counter(act));
    }
}

fn print_events(level: &mut Level) {
    for event in level.take_events() {
        match event {
            LevelEvent::Message { text, .. } => println!("{text}"),
            other => tracing::debug!(?other, "level event"),
        }
    }
}

/// A small world with something for most delayed actions to act on
fn demo_world(options: SessionOptions) -> World {
    let mut session = WorldSession::new(options);
    session.hero = Hero {
        x: 5,
        y: 5,
        passive_mapping_radius: 4,
    };

    let mut current = Level::new(LevelId::dungeon(1));
    for x in 1..30 {
        for y in 1..10 {
            *current.cell_mut(x, y) = Cell::floor();
        }
    }
    *current.cell_mut(20, 5) = Cell::altar(God::Jiyva);
    current.add_monster(
        Monster::new(MonsterKind::Angel, "angel", 4, 4)
            .with_attitude(Attitude::Friendly)
            .with_holiness(Holiness::Holy)
            .gift_of(God::ShiningOne),
    );
    current.add_monster(
        Monster::new(MonsterKind::Orc, "orc priest", 6, 4)
            .with_attitude(Attitude::Friendly)
            .gift_of(God::Beogh),
    );
    current.add_monster(
        Monster::new(MonsterKind::Plant, "oklob plant", 8, 4).with_holiness(Holiness::Plant),
    );
    current.add_monster(
        Monster::new(MonsterKind::SpectralThing, "spectral warrior", 10, 4)
            .with_attitude(Attitude::Friendly)
            .with_holiness(Holiness::Undead)
            .with_flags(MonsterFlags::ENSLAVED_SOUL),
    );
    current.add_object(Object::corpse("goblin"), 12, 4);
    current.add_object(
        Object::deck("deck of escape", &["portal", "warp", "swap", "velocity"]),
        14,
        4,
    );

    let mut world = World::new(session, current);

    let mut second = Level::new(LevelId::dungeon(2));
    second.add_monster(
        Monster::new(MonsterKind::Slave, "slave", 5, 5)
            .with_attitude(Attitude::Hostile)
            .in_band(PIKEL_BAND),
    );
    second.add_monster(
        Monster::new(MonsterKind::Orc, "orc knight", 6, 5)
            .with_attitude(Attitude::Friendly)
            .gift_of(God::Beogh),
    );
    world.add_level(second);

    let mut tomb = Level::new(LevelId::new(Branch::Tomb, 3));
    tomb.flags.no_tele_control = true;
    world.add_level(tomb);

    world
}
