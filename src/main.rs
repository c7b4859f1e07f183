//! Name Patterns CLI
//!
//! Usage:
//!   name-patterns [--config FILE] <COMMAND>
//!
//! Commands:
//!   render             Render a pattern for one creature
//!   batch              Rename every creature in a collection
//!   tokens             List token values for one creature
//!   functions          List the functions usable in a pattern
//!   check              Report unknown names and unclosed calls in a pattern
//!   seed-replacements  Write an example replacements file

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use name_patterns::{
    lint, token_dictionary, BatchRenamer, Collection, CreatureId, CustomReplacements, Function,
    NameOutcome, NamePattern, NamingConfig, NamingContext, RenderMode,
};

#[derive(Parser)]
#[command(name = "name-patterns")]
#[command(about = "Generate creature names from naming patterns")]
struct Cli {
    /// Configuration file (TOML format)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a pattern for one creature
    Render {
        /// Collection file (JSON)
        #[arg(short = 'C', long)]
        collection: PathBuf,
        /// Creature id
        #[arg(long)]
        id: CreatureId,
        /// Naming pattern
        pattern: String,
        /// Use the short preview search and placeholder
        #[arg(short, long)]
        preview: bool,
        /// Replacements file for customreplace (JSON)
        #[arg(short, long)]
        replacements: Option<PathBuf>,
    },
    /// Rename every creature in a collection
    Batch {
        #[arg(short = 'C', long)]
        collection: PathBuf,
        pattern: String,
        /// Only rename creatures of this species
        #[arg(short, long)]
        species: Option<String>,
        #[arg(short, long)]
        replacements: Option<PathBuf>,
        /// Write the renamed collection to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List every token and its value for one creature
    Tokens {
        #[arg(short = 'C', long)]
        collection: PathBuf,
        #[arg(long)]
        id: CreatureId,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List the functions usable in a pattern
    Functions,
    /// Report unknown names and unclosed calls in a pattern
    Check { pattern: String },
    /// Write an example replacements file if none exists
    SeedReplacements { file: PathBuf },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Command::Render {
            collection,
            id,
            pattern,
            preview,
            replacements,
        } => {
            let collection = load_collection(&collection);
            let replacements = load_replacements(replacements.as_deref(), &config);
            let Some(creature) = collection.find(id) else {
                eprintln!("Error: no creature with id {}", id);
                std::process::exit(1);
            };

            let siblings = collection.siblings(&creature.species);
            let colors = collection.color_table();
            let mode = if preview {
                RenderMode::Preview
            } else {
                RenderMode::Commit
            };
            let mut ctx = NamingContext::new(creature, &siblings)
                .with_config(&config)
                .with_colors(&colors)
                .with_replacements(&replacements)
                .with_mode(mode);
            if let Some(species) = collection.species(&creature.species) {
                ctx = ctx.with_species(species);
            }

            let outcome = NamePattern::new(pattern).generate(&ctx);
            println!("{}", outcome.name);
            report_outcome(id, &outcome);
        }
        Command::Batch {
            collection: path,
            pattern,
            species,
            replacements,
            output,
        } => {
            let mut collection = load_collection(&path);
            let replacements = load_replacements(replacements.as_deref(), &config);
            let colors = collection.color_table();
            let pattern = NamePattern::new(pattern);

            let selected: Vec<_> = collection
                .creatures
                .iter()
                .filter(|c| species.as_deref().map_or(true, |s| c.species == s))
                .cloned()
                .collect();
            let renames = BatchRenamer::new(&pattern, &config)
                .with_species(&collection.species)
                .with_colors(&colors)
                .with_replacements(&replacements)
                .rename_all(&selected);

            for rename in &renames {
                println!("{}\t{}\t{}", rename.id, rename.old_name, rename.outcome.name);
                report_outcome(rename.id, &rename.outcome);
            }

            if let Some(output) = output {
                collection.apply_names(
                    renames
                        .iter()
                        .map(|r| (r.id, r.outcome.name.as_str())),
                );
                if let Err(e) = collection.save(&output) {
                    eprintln!("Error writing collection '{}': {}", output.display(), e);
                    std::process::exit(1);
                }
            }
        }
        Command::Tokens {
            collection,
            id,
            json,
        } => {
            let collection = load_collection(&collection);
            let replacements = load_replacements(None, &config);
            let Some(creature) = collection.find(id) else {
                eprintln!("Error: no creature with id {}", id);
                std::process::exit(1);
            };

            let siblings = collection.siblings(&creature.species);
            let colors = collection.color_table();
            let mut ctx = NamingContext::new(creature, &siblings)
                .with_config(&config)
                .with_colors(&colors)
                .with_replacements(&replacements)
                .with_mode(RenderMode::Preview);
            if let Some(species) = collection.species(&creature.species) {
                ctx = ctx.with_species(species);
            }

            let entries = token_dictionary(&ctx);
            if json {
                match serde_json::to_string_pretty(&entries) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                for entry in entries {
                    println!("{:<20} {:<16} {}", entry.name, entry.value, entry.description);
                }
            }
        }
        Command::Functions => {
            for function in Function::ALL {
                println!("{:<14} {}", function.name(), function.usage());
            }
        }
        Command::Check { pattern } => {
            let warnings = lint::check(&pattern);
            for warning in &warnings {
                eprint!("{}", warning.format(&pattern, "pattern"));
            }
            if !warnings.is_empty() {
                std::process::exit(1);
            }
        }
        Command::SeedReplacements { file } => match CustomReplacements::seed_example(&file) {
            Ok(true) => println!("Wrote example replacements to {}", file.display()),
            Ok(false) => println!("{} already exists", file.display()),
            Err(e) => {
                eprintln!("Error writing '{}': {}", file.display(), e);
                std::process::exit(1);
            }
        },
    }
}

fn load_config(path: Option<&Path>) -> NamingConfig {
    match path {
        Some(path) => match NamingConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => NamingConfig::default(),
    }
}

fn load_collection(path: &Path) -> Collection {
    match Collection::from_file(path) {
        Ok(collection) => collection,
        Err(e) => {
            eprintln!("Error loading collection '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

/// The flag wins over the config file; no file means an empty table
fn load_replacements(flag: Option<&Path>, config: &NamingConfig) -> CustomReplacements {
    let Some(path) = flag.or(config.replacements_file.as_deref()) else {
        return CustomReplacements::new();
    };
    match CustomReplacements::from_file(path) {
        Ok(replacements) => replacements,
        Err(e) => {
            eprintln!("Error loading replacements '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

fn report_outcome(id: CreatureId, outcome: &NameOutcome) {
    if outcome.exhausted {
        eprintln!("warning: {}: no unique number found for '{}'", id, outcome.name);
    }
    if outcome.duplicate {
        eprintln!("warning: {}: '{}' is already in use", id, outcome.name);
    }
    if outcome.too_long {
        eprintln!("warning: {}: '{}' is longer than the name limit", id, outcome.name);
    }
}
