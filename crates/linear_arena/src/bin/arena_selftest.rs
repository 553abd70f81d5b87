//! # Arena Self-Test
//!
//! Command-line harness that runs every public arena operation over a
//! 1024-byte stack buffer and reports each check.
//!
//! Usage: `arena_selftest [config.toml]`

use std::process::ExitCode;

use linear_arena::{arena_format, Arena, ArenaConfig, ArenaError};

const POOL_SIZE: usize = 1024;

/// Fails the run with a message unless `cond` holds.
fn check(cond: bool, what: &str) -> Result<(), String> {
    if cond {
        Ok(())
    } else {
        Err(format!("check failed: {what}"))
    }
}

fn run(config: &ArenaConfig) -> Result<(), String> {
    let mut pool = [0u8; POOL_SIZE];
    let mut arena = Arena::with_config(&mut pool, config).map_err(|e| e.to_string())?;

    // --- Initialization ---
    check(arena.capacity() == POOL_SIZE, "capacity equals region length")?;
    check(arena.used() == 0, "fresh arena is empty")?;
    println!("init passed (alignment {})", arena.alignment());

    // --- Simple allocation ---
    let first = arena.alloc(16).map_err(|e| e.to_string())?.as_ptr();
    check(arena.used() > 0, "alloc advances used")?;
    println!("alloc passed");

    // --- calloc ---
    let zeroed = arena
        .calloc(4, std::mem::size_of::<i32>())
        .map_err(|e| e.to_string())?;
    check(zeroed.iter().all(|&b| b == 0), "calloc zeroes its span")?;
    println!("calloc passed");

    // --- available ---
    let before = arena.available();
    let block = arena.alloc(32).map_err(|e| e.to_string())?;
    check(block.len() == 32, "alloc returns the requested length")?;
    let after = arena.available();
    check(
        arena.aligned_size(32) == Some(before - after),
        "available drops by the aligned size",
    )?;
    println!("available passed");

    // --- reset ---
    arena.reset();
    check(arena.available() == arena.capacity(), "reset reclaims everything")?;
    let again = arena.alloc(16).map_err(|e| e.to_string())?.as_ptr();
    check(again == first, "reset reuses the first offset")?;
    arena.reset();
    println!("reset passed");

    // --- strdup ---
    let dup = arena.strdup(b"hello").map_err(|e| e.to_string())?;
    check(dup.to_bytes() == b"hello", "strdup copies content")?;
    println!("strdup passed");

    // --- strndup ---
    let dup = arena.strndup(b"abcdef", 3).map_err(|e| e.to_string())?;
    check(dup.to_bytes_with_nul() == b"abc\0", "strndup truncates and terminates")?;
    println!("strndup passed");

    // --- format ---
    let formatted = arena_format!(arena, "num={}", 42).map_err(|e| e.to_string())?;
    check(formatted.to_bytes() == b"num=42", "format renders arguments")?;
    println!("format passed");

    // --- Out-of-memory ---
    arena.reset();
    let used = arena.used();
    check(
        matches!(
            arena.alloc(POOL_SIZE + 1),
            Err(ArenaError::CapacityExhausted { .. })
        ),
        "oversized alloc fails",
    )?;
    check(arena.used() == used, "failed alloc consumes nothing")?;
    println!("out-of-memory passed");

    Ok(())
}

fn main() -> ExitCode {
    let config = match std::env::args().nth(1) {
        Some(path) => match ArenaConfig::from_toml(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => ArenaConfig::default(),
    };

    match run(&config) {
        Ok(()) => {
            println!("All arena checks passed!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_default_config() {
        assert_eq!(run(&ArenaConfig::default()), Ok(()));
    }

    #[test]
    fn test_run_wide_alignment() {
        assert_eq!(run(&ArenaConfig::with_alignment(64)), Ok(()));
    }

    #[test]
    fn test_run_rejects_bad_config() {
        assert!(run(&ArenaConfig::with_alignment(3)).is_err());
    }

    #[test]
    fn test_check() {
        assert!(check(true, "holds").is_ok());
        assert_eq!(check(false, "broken"), Err("check failed: broken".to_string()));
    }
}
