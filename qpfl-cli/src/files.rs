//! File I/O shared by the commands
//!
//! Level 4 - Utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;

use qpfl_core::{LeagueConfig, Roster};
use qpfl_schedule::{parse_schedule_listing, roster_from_listing, ParsedWeek};

/// Load league configuration, or the built-in QPFL league when no file is given
pub fn load_league_config(path: Option<&Path>) -> Result<LeagueConfig> {
    match path {
        Some(path) => LeagueConfig::load(path)
            .with_context(|| format!("Failed to load league config: {}", path.display())),
        None => Ok(LeagueConfig::default()),
    }
}

/// Load a `{"team": win_rate}` JSON object
pub fn load_win_rates(path: &Path) -> Result<FxHashMap<String, f64>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read win rates: {}", path.display()))?;
    let rates: FxHashMap<String, f64> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse win rates: {}", path.display()))?;
    Ok(rates)
}

/// Read and parse a schedule listing
pub fn load_listing(path: &Path) -> Result<Vec<ParsedWeek>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schedule: {}", path.display()))?;
    let weeks = parse_schedule_listing(&content)
        .with_context(|| format!("Failed to parse schedule: {}", path.display()))?;
    Ok(weeks)
}

/// Roster from the league config if one is given, otherwise from the listing itself
pub fn listing_roster(config: Option<&Path>, weeks: &[ParsedWeek]) -> Result<Roster> {
    match config {
        Some(_) => {
            let league = load_league_config(config)?
                .validate()
                .context("Invalid league config")?;
            Ok(league.roster)
        }
        None => roster_from_listing(weeks).context("Schedule listing does not form a roster"),
    }
}

/// A file written next to its target, waiting to be moved into place
struct Staged {
    temp: PathBuf,
    target: PathBuf,
    backup: PathBuf,
}

/// A target that has been replaced, and where its previous contents went
struct Committed {
    target: PathBuf,
    backup: Option<PathBuf>,
}

/// Write every file or none of them.
///
/// Contents go to `<name>.tmp` siblings first. Once all of them are
/// written, each existing target is moved aside to `<name>.bak` and the
/// temp file renamed into place. If any step fails, replaced targets are
/// restored from their backups and leftover temp files are removed, so
/// files from an earlier run stay untouched.
pub fn write_all_or_nothing(dir: &Path, files: &[(&str, String)]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let mut staged: Vec<Staged> = Vec::with_capacity(files.len());
    for (name, content) in files {
        let entry = Staged {
            temp: dir.join(format!("{}.tmp", name)),
            target: dir.join(name),
            backup: dir.join(format!("{}.bak", name)),
        };
        if let Err(e) = std::fs::write(&entry.temp, content) {
            remove_quietly(&entry.temp);
            discard(&staged);
            return Err(e).with_context(|| format!("Failed to write {}", entry.temp.display()));
        }
        staged.push(entry);
    }

    let mut committed: Vec<Committed> = Vec::with_capacity(staged.len());
    for (i, entry) in staged.iter().enumerate() {
        if let Err(e) = commit(entry, &mut committed) {
            discard(&staged[i..]);
            roll_back(&committed);
            return Err(e);
        }
    }

    for done in &committed {
        if let Some(backup) = &done.backup {
            remove_quietly(backup);
        }
    }

    Ok(committed.into_iter().map(|done| done.target).collect())
}

/// Move one staged file into place, backing up the current target first
fn commit(entry: &Staged, committed: &mut Vec<Committed>) -> Result<()> {
    let backup = if entry.target.is_file() {
        std::fs::rename(&entry.target, &entry.backup)
            .with_context(|| format!("Failed to back up {}", entry.target.display()))?;
        Some(entry.backup.clone())
    } else {
        None
    };

    if let Err(e) = std::fs::rename(&entry.temp, &entry.target) {
        if let Some(backup) = &backup {
            restore(backup, &entry.target);
        }
        return Err(e)
            .with_context(|| format!("Failed to move {} into place", entry.target.display()));
    }

    committed.push(Committed {
        target: entry.target.clone(),
        backup,
    });
    Ok(())
}

/// Undo committed renames, newest first
fn roll_back(committed: &[Committed]) {
    for done in committed.iter().rev() {
        match &done.backup {
            Some(backup) => restore(backup, &done.target),
            None => remove_quietly(&done.target),
        }
    }
}

fn restore(backup: &Path, target: &Path) {
    if let Err(e) = std::fs::rename(backup, target) {
        tracing::warn!(
            "Failed to restore {} from {}: {}",
            target.display(),
            backup.display(),
            e
        );
    }
}

fn discard(staged: &[Staged]) {
    for entry in staged {
        remove_quietly(&entry.temp);
    }
}

fn remove_quietly(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!("Failed to remove {}: {}", path.display(), e);
        }
    }
}
