use anyhow::{Context, Result};
use setsmith_engine::{Set, TIME_FORMAT, io};
use std::path::{Path, PathBuf};
use std::{env, process};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <info|check> <setfile-or-package>", args[0]);
        process::exit(2);
    }

    let path = PathBuf::from(&args[2]);
    match args[1].as_str() {
        "info" => info(&path),
        "check" => check(&path),
        other => {
            eprintln!("Unknown command '{other}'");
            eprintln!("Usage: {} <info|check> <setfile-or-package>", args[0]);
            process::exit(2);
        }
    }
}

/// Load either a plain setfile or a zipped package, chosen by extension.
fn load(path: &Path) -> Result<Set> {
    let set = if path.extension().is_some_and(|ext| ext == "mse-set") {
        io::load_package(path, true)
    } else {
        io::load_setfile(path)
    };
    set.with_context(|| format!("failed to load {}", path.display()))
}

fn info(path: &Path) -> Result<()> {
    let set = load(path)?;
    if let Some(game) = set.all_data.get("game").and_then(|v| v.as_text()) {
        println!("game: {game}");
    }
    println!("cards: {}", set.cards.len());
    for card in set.cards.values() {
        let card = card.borrow();
        println!(
            "  {} (modified {})",
            card.name,
            card.time_modified.format(TIME_FORMAT)
        );
    }
    Ok(())
}

fn check(path: &Path) -> Result<()> {
    let original = io::read_setfile_text(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let set = Set::from_text(&original)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let rendered = set.to_text();
    if rendered == original {
        println!("ok: {} round-trips byte for byte", path.display());
        return Ok(());
    }
    let offset = first_divergence(original.as_bytes(), rendered.as_bytes());
    eprintln!(
        "round-trip diverges at byte {offset} (original {} bytes, rendered {} bytes)",
        original.len(),
        rendered.len()
    );
    process::exit(1);
}

fn first_divergence(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
