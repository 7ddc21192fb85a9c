// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use std::env;
use std::path::PathBuf;

use registration_kiosk::{PreferenceStore, PreferencesSnapshot, SqlitePrefs};

const DEFAULT_DB: &str = "kiosk.db";

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut db_path = PathBuf::from(DEFAULT_DB);
    let mut mode: Option<String> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--db" {
            match iter.next() {
                Some(path) => db_path = PathBuf::from(path),
                None => {
                    eprintln!("❌ --db requires a path");
                    std::process::exit(1);
                }
            }
        } else if mode.is_none() {
            mode = Some(arg.clone());
        }
    }

    match mode.as_deref() {
        Some("show") => run_show(&db_path),
        Some("reset") => run_reset(&db_path),
        None => run_ui_mode(&db_path),
        Some(other) => {
            eprintln!("❌ Unknown mode: {}", other);
            eprintln!("   Usage: registration-kiosk [show|reset] [--db PATH]");
            std::process::exit(1);
        }
    }
}

fn run_show(db_path: &std::path::Path) -> Result<()> {
    let store = SqlitePrefs::open(db_path)?;
    let snapshot = PreferencesSnapshot::from_store(&store);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn run_reset(db_path: &std::path::Path) -> Result<()> {
    let mut store = SqlitePrefs::open(db_path)?;
    store.clear()?;
    println!("✓ Preferences cleared ({})", db_path.display());
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(db_path: &std::path::Path) -> Result<()> {
    let store = SqlitePrefs::open(db_path)?;

    let mut app = ui::App::new(store)?;
    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_db_path: &std::path::Path) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or inspect preferences with: registration-kiosk show");
    std::process::exit(1);
}
