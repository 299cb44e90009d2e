//! SeaPort command line front end.
//!
//! Loads a world file, prints the port tree (or JSON), and optionally runs
//! a search or a structural check.
//!
//! Usage:
//!   cargo run -p seaport-cli -- data/sample_world.txt
//!   cargo run -p seaport-cli -- data/sample_world.txt --search electrician --by skill
//!   cargo run -p seaport-cli -- data/sample_world.txt --check --verbose

use std::path::PathBuf;

use clap::Parser;
use log::info;
use seaport_logic::config::LoadOptions;
use seaport_logic::error::LoadError;
use seaport_logic::invariants::check_invariants;
use seaport_logic::render::tree;
use seaport_logic::search::{search, SearchBy};
use seaport_logic::world::{load_world_from_path, World};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "seaport")]
#[command(about = "Load a SeaPort world file and explore its ports, ships and jobs")]
struct Args {
    /// World file to load
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Search term; prints matches instead of the world tree
    #[arg(short, long, value_name = "TERM")]
    search: Option<String>,

    /// Attribute to search by: name, index or skill
    #[arg(short, long, default_value = "name", value_parser = parse_search_by)]
    by: SearchBy,

    /// JSON file with load options
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Skip records with unknown parents instead of failing the load
    #[arg(long)]
    skip_unresolved: bool,

    /// Verify structural invariants and exit non-zero on violations
    #[arg(long)]
    check: bool,

    /// Print the world as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_search_by(s: &str) -> Result<SearchBy, String> {
    s.parse().map_err(|e: seaport_logic::search::SearchError| e.to_string())
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    if let Err(message) = run(&args) {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), String> {
    let options = load_options(args)?;
    let world = load_world_from_path(&args.file, &options).map_err(|e| match e {
        LoadError::FileNotFound(path) => {
            format!("No such file found: {}. Please try again.", path.display())
        }
        LoadError::Empty => "File data may be empty or corrupted. Please try again.".to_string(),
        other => other.to_string(),
    })?;

    for skipped in world.skipped() {
        println!("skipped line {}: {}", skipped.line, skipped.reason);
    }

    if args.check {
        return report_invariants(&world);
    }

    match &args.search {
        Some(term) => print_search(&world, args.by, term),
        None if args.json => serde_json::to_string_pretty(&world)
            .map(|json| println!("{}", json))
            .map_err(|e| format!("JSON encode error: {}", e)),
        None => {
            print!("{}", tree(&world));
            println!("\n{}", world.summary());
            Ok(())
        }
    }
}

fn load_options(args: &Args) -> Result<LoadOptions, String> {
    let mut options = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read config {}: {}", path.display(), e))?;
            LoadOptions::from_json(&json)
                .map_err(|e| format!("invalid config {}: {}", path.display(), e))?
        }
        None => LoadOptions::default(),
    };
    if args.skip_unresolved {
        options.on_unresolved = seaport_logic::UnresolvedPolicy::Skip;
    }
    info!("Load options: {:?}", options);
    Ok(options)
}

fn print_search(world: &World, by: SearchBy, term: &str) -> Result<(), String> {
    let hits = search(world, by, term).map_err(|e| e.to_string())?;
    if hits.is_empty() {
        println!("No results found for \"{}\"", term.trim());
        return Ok(());
    }
    println!("Results for \"{}\":", term.trim());
    for entity in hits {
        match entity.as_person() {
            Some(person) if by == SearchBy::Skill => {
                println!("  {} (id #{}, {})", entity.name, entity.id, person.skill)
            }
            _ => println!("  {} {} ({})", entity.name, entity.id, entity.kind().label()),
        }
    }
    Ok(())
}

fn report_invariants(world: &World) -> Result<(), String> {
    let violations = check_invariants(world);
    let icon = if violations.is_empty() { "✓" } else { "✗" };
    println!("{} {}", icon, world.summary());
    for v in &violations {
        println!("  ✗ {}", v);
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(format!("{} invariant violations", violations.len()))
    }
}
