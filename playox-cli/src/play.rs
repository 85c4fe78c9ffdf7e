//! Play command - a game against the computer in the terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_game() - prompt/submit loop
//! - Level 3: parse_position(), report_outcome()
//! - Level 4: formatting

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};

use playox_core::{Coord, Game, GameRegistry, GameStatus, Mover, RandomStrategy};

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command against stdin/stdout
pub fn run(seed: Option<u64>) -> Result<()> {
    let registry = GameRegistry::with_strategy(RandomStrategy::from_seed_option(seed));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let game = play_game(&registry, stdin.lock(), stdout.lock())?;

    tracing::info!(
        "Game {} ended with {:?} after {} moves",
        game.id(),
        game.status(),
        game.moves().len()
    );
    Ok(())
}

// ============================================================================
// LEVEL 2 - GAME LOOP
// ============================================================================

/// Prompt for moves until the game ends or input runs out
fn play_game<R: BufRead, W: Write>(registry: &GameRegistry, input: R, mut out: W) -> Result<Game> {
    let mut game = registry.create_game();
    let mut lines = input.lines();

    writeln!(out, "You are X. Enter a cell as `x y` (column row, 0-2) or a number 0-8.")?;

    while !game.is_finished() {
        writeln!(out, "\n{}\n", game.board())?;
        write!(out, "your move> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line.context("failed to read move")?;
        if line.trim().is_empty() {
            continue;
        }

        let position = match parse_position(&line) {
            Ok(position) => position,
            Err(err) => {
                writeln!(out, "{}", err)?;
                continue;
            }
        };

        match registry.submit_move(&game.id(), position) {
            Ok(next) => {
                if let Some(reply) = next.moves().get(game.moves().len() + 1) {
                    let Coord { x, y } = reply.coord();
                    writeln!(out, "Computer plays {} {}", x, y)?;
                }
                game = next;
            }
            Err(err) => writeln!(out, "{}", err)?,
        }
    }

    report_outcome(&game, &mut out)?;
    Ok(game)
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Accept `x y` coordinates or a single flat index
fn parse_position(line: &str) -> Result<usize> {
    let numbers = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .with_context(|| format!("not a number: {}", part))
        })
        .collect::<Result<Vec<_>>>()?;

    match numbers.as_slice() {
        [index] if *index >= 0 => Ok(*index as usize),
        [x, y] => match Coord::new(*x, *y) {
            Some(coord) => Ok(coord.index()),
            None => bail!("coordinates ({}, {}) are outside the board (expected 0-2)", x, y),
        },
        _ => bail!("enter `x y` or a single position 0-8"),
    }
}

fn report_outcome<W: Write>(game: &Game, out: &mut W) -> Result<()> {
    if !game.is_finished() {
        writeln!(out, "Game left unfinished.")?;
        return Ok(());
    }

    writeln!(out, "\n{}\n", game.board())?;
    let message = match game.status() {
        GameStatus::HumanWon => "You win!",
        GameStatus::ComputerWon => "The computer wins.",
        GameStatus::Draw => "It's a draw.",
        GameStatus::InProgress => "Game left unfinished.",
    };
    writeln!(out, "{}", message)?;
    writeln!(
        out,
        "{} moves, you played {}",
        game.moves().len(),
        game.moves().iter().filter(|mv| mv.mover == Mover::Human).count()
    )?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
