//! CLI entry point for dow-hotkey-editor
//!
//! Provides command-line interface for listing bindings, checking
//! conflicts, rewriting single bindings and managing preset files.

use clap::{Parser, Subcommand};
use colored::*;
use dow_hotkey_editor::config::{presets::PresetStore, ConfigManager};
use dow_hotkey_editor::core::conflict::ConflictDetector;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dow-hotkey-editor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all bindings with conflict annotations
    List {
        /// Path to a keydefaults-style .lua file
        config: PathBuf,

        /// Only show rows that are in conflict
        #[arg(short = 'c', long)]
        conflicts_only: bool,

        /// Restrict output to one table
        #[arg(short, long)]
        table: Option<String>,
    },

    /// Check a key file for binding conflicts
    Check {
        /// Path to a keydefaults-style .lua file
        config: PathBuf,
    },

    /// Rewrite one binding value in place
    Set {
        /// Path to a keydefaults-style .lua file
        config: PathBuf,

        /// Table containing the action (e.g. "bindings")
        table: String,

        /// Action name (e.g. "attack_move")
        action: String,

        /// New binding string (e.g. "Control+Shift+A" or "Ctrl+A,F5")
        binding: String,
    },

    /// Set the profile's display label
    Label {
        /// Path to a keydefaults-style .lua file
        config: PathBuf,

        /// New display label
        text: String,
    },

    /// Manage preset files in a profile directory
    Presets {
        /// Profile directory (must contain playercfg.lua)
        #[arg(short, long)]
        dir: PathBuf,

        #[command(subcommand)]
        command: PresetCommands,
    },
}

#[derive(Subcommand)]
enum PresetCommands {
    /// List presets in the profile directory
    List,

    /// Create a preset as a copy of an existing key file
    Create {
        /// Name for the new preset
        name: String,

        /// File to copy from (defaults to keydefaults.lua in the profile)
        #[arg(short, long)]
        from: Option<PathBuf>,
    },

    /// Delete (empty out) a preset file
    Delete {
        /// Preset file name
        file: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List {
            config,
            conflicts_only,
            table,
        } => list_bindings(&config, conflicts_only, table.as_deref())?,
        Commands::Check { config } => check_conflicts(&config)?,
        Commands::Set {
            config,
            table,
            action,
            binding,
        } => set_binding(&config, &table, &action, &binding)?,
        Commands::Label { config, text } => set_label(&config, &text)?,
        Commands::Presets { dir, command } => run_presets(&dir, command)?,
    }

    Ok(())
}

/// Expand tilde in a user-supplied path
fn expand_path(path: &Path) -> anyhow::Result<PathBuf> {
    let raw = path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid path encoding"))?;
    Ok(PathBuf::from(shellexpand::tilde(raw).as_ref()))
}

/// List bindings with conflict annotations
fn list_bindings(
    config_path: &Path,
    conflicts_only: bool,
    table: Option<&str>,
) -> anyhow::Result<()> {
    let manager = ConfigManager::new(expand_path(config_path)?)?;
    let bindings = manager.load_bindings()?;
    let detector = ConflictDetector::from_bindings(&bindings);

    println!("{}", format!("Bindings from: {}\n", manager.path().display()).bold());

    let mut shown = 0;
    for row in detector.annotate(&bindings) {
        if conflicts_only && !row.is_conflict {
            continue;
        }
        if let Some(filter) = table {
            if !row.table.eq_ignore_ascii_case(filter) {
                continue;
            }
        }
        shown += 1;

        let marker = if row.is_conflict {
            "✗".red().bold()
        } else {
            " ".normal()
        };
        println!(
            "{} {} {} → {}",
            marker,
            format!("[{}]", row.table).dimmed(),
            row.action.cyan(),
            row.binding.green(),
        );
    }

    println!("\n{} Total: {} bindings", "✓".green(), shown);

    Ok(())
}

/// Check a key file for conflicts
fn check_conflicts(config_path: &Path) -> anyhow::Result<()> {
    let manager = ConfigManager::new(expand_path(config_path)?)?;

    println!("{} Parsing key file: {}", "→".cyan(), manager.path().display());

    let bindings = manager.load_bindings()?;
    let total: usize = bindings.tables().map(|t| t.len()).sum();
    println!("{} Found {} bindings in {} tables\n", "✓".green(), total, bindings.len());

    let detector = ConflictDetector::from_bindings(&bindings);
    let mut conflicts = detector.find_conflicts();
    conflicts.sort_by(|a, b| a.combo.cmp(&b.combo));

    if conflicts.is_empty() {
        println!("{} {}", "✓".green().bold(), "No conflicts detected!".bold());
        return Ok(());
    }

    println!(
        "{} Found {} conflict{}:\n",
        "✗".red().bold(),
        conflicts.len(),
        if conflicts.len() == 1 { "" } else { "s" }
    );

    for (i, conflict) in conflicts.iter().enumerate() {
        println!(
            "{} {}",
            format!("Conflict {}", i + 1).yellow().bold(),
            conflict.combo.cyan()
        );

        for (idx, owner) in conflict.owners.iter().enumerate() {
            println!(
                "  {} {} → {}",
                format!("{}.", idx + 1).dimmed(),
                owner.table.magenta(),
                owner.action,
            );
        }
        println!();
    }

    println!("{}", "⚠ These bindings will clash in game!".yellow());
    std::process::exit(1);
}

/// Rewrite one binding value in place
fn set_binding(
    config_path: &Path,
    table: &str,
    action: &str,
    binding: &str,
) -> anyhow::Result<()> {
    let manager = ConfigManager::new(expand_path(config_path)?)?;
    manager.update_binding(table, action, binding)?;

    println!(
        "{} {} / {} set to {}",
        "✓".green(),
        table.magenta(),
        action.cyan(),
        binding.green().bold(),
    );

    Ok(())
}

/// Set the profile's display label
fn set_label(config_path: &Path, text: &str) -> anyhow::Result<()> {
    let manager = ConfigManager::new(expand_path(config_path)?)?;
    manager.set_display_label(text)?;

    println!("{} Display label set to {}", "✓".green(), text.bold());

    Ok(())
}

/// Preset subcommands
fn run_presets(dir: &Path, command: PresetCommands) -> anyhow::Result<()> {
    let store = PresetStore::new(expand_path(dir)?)?;

    match command {
        PresetCommands::List => {
            for preset in store.list()? {
                let tag = if preset.protected {
                    " (protected)".dimmed()
                } else {
                    "".normal()
                };
                println!("{}{}", preset.file_name, tag);
            }
        }
        PresetCommands::Create { name, from } => {
            let base = match from {
                Some(path) => expand_path(&path)?,
                None => expand_path(dir)?.join(dow_hotkey_editor::config::presets::BASE_FILE),
            };
            let created = store.create_from(&base, &name)?;
            println!("{} Created {}", "✓".green(), created.display());
        }
        PresetCommands::Delete { file } => {
            let path = expand_path(dir)?.join(&file);
            store.delete(&path)?;
            println!("{} Deleted {}", "✓".green(), file);
        }
    }

    Ok(())
}
