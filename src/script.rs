//! Scripted (batch) play.
//!
//! Replays move commands from a file or standard input, one per line, and
//! writes one JSON [`MoveResponse`] per processed line. Blank lines and
//! lines starting with `#` are skipped.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use crate::game::GameState;
use crate::types::*;

/// Runs a script from `input` (stdin when `None`) and writes responses to
/// `output` (stdout when `None`). With `show_board`, the final position is
/// printed to stderr.
pub fn run_script(input: Option<&str>, output: Option<&str>, show_board: bool) -> Result<(), String> {
    let reader: Box<dyn BufRead> = match input {
        Some(path) => {
            let file =
                File::open(path).map_err(|e| format!("Failed to open '{}': {}", path, e))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file =
                File::create(path).map_err(|e| format!("Failed to create '{}': {}", path, e))?;
            Box::new(file)
        }
        None => Box::new(io::stdout()),
    };

    let game = replay(reader, BufWriter::new(writer))?;

    if let Some(path) = output {
        eprintln!("Written to: {}", path);
    }
    if show_board {
        eprintln!("{}", game.board);
        eprintln!("{} to move", game.turn);
    }
    Ok(())
}

/// Plays every command from `reader` on a fresh game, writing one JSON
/// line per command. Returns the final game state.
pub fn replay<R: BufRead, W: Write>(reader: R, mut writer: W) -> Result<GameState, String> {
    let mut game = GameState::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Failed to read line {}: {}", index + 1, e))?;
        let command = line.trim();
        if command.is_empty() || command.starts_with('#') {
            continue;
        }

        let response = game.play(command);
        if response.outcome == MoveOutcome::IllegalMove {
            log::warn!("Line {}: '{}' rejected as illegal", index + 1, command);
        }

        let json = serde_json::to_string(&response)
            .map_err(|e| format!("Failed to serialize response: {}", e))?;
        writeln!(writer, "{}", json).map_err(|e| format!("Failed to write output: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to write output: {}", e))?;
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn outcomes(output: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(output)
            .lines()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value["outcome"].as_str().unwrap().to_string()
            })
            .collect()
    }

    #[test]
    fn test_replay_fools_mate() {
        let script = "# fool's mate\nf2 f3\ne7 e5\n\ng2 g4\nd8 h4\n";
        let mut out = Vec::new();
        let game = replay(Cursor::new(script), &mut out).unwrap();
        assert_eq!(
            outcomes(&out),
            vec!["none", "none", "none", "checkmate_black_wins"]
        );
        assert_eq!(game.turn, Color::White);
    }

    #[test]
    fn test_replay_reports_illegal_and_continues() {
        let script = "e2 e5\ne2 e4\nresign\n";
        let mut out = Vec::new();
        let game = replay(Cursor::new(script), &mut out).unwrap();
        assert_eq!(
            outcomes(&out),
            vec!["illegal_move", "none", "resign_white_wins"]
        );
        assert_eq!(game.turn, Color::Black);
    }

    #[test]
    fn test_replay_empty_script() {
        let mut out = Vec::new();
        let game = replay(Cursor::new("\n# nothing\n"), &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(game, GameState::new());
    }

    #[test]
    fn test_each_line_carries_full_snapshot() {
        let mut out = Vec::new();
        replay(Cursor::new("e2 e4\nd7 d5\ne4 d5\n"), &mut out).unwrap();
        let last = String::from_utf8_lossy(&out).lines().last().unwrap().to_string();
        let value: serde_json::Value = serde_json::from_str(&last).unwrap();
        assert_eq!(value["pieces"].as_array().unwrap().len(), 31);
    }
}
