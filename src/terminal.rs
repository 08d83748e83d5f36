//! Terminal interface for the chess rules engine.
//!
//! This module provides a command-line interface for playing chess
//! directly in the terminal. It supports:
//!
//! - Colored board display
//! - Interactive move input (`e2 e4`, `e7 e8 n`, `e2 e4 draw?`)
//! - Check status and legal move listing
//! - Resignation and draw requests
//! - Two-player mode (human vs human)

use colored::Colorize;
use std::io::{self, BufRead, Write};

use crate::game::GameState;
use crate::types::*;

/// Renders the board to the terminal with colors and piece symbols.
///
/// The board is displayed from White's perspective (rank 8 at top).
/// Empty dark squares are dotted, pieces are colored by side.
pub fn print_board(board: &Board) {
    println!();
    println!("  +---+---+---+---+---+---+---+---+");

    for row in 0..8u8 {
        print!("{} ", 8 - row);
        for col in 0..8u8 {
            let is_dark_square = (row + col) % 2 == 1;

            let piece_str = match board.get(Square::new(row, col)) {
                Some(piece) => {
                    let symbol = piece.to_fen_char().to_string();
                    if piece.color == Color::White {
                        symbol.white().bold().to_string()
                    } else {
                        symbol.blue().bold().to_string()
                    }
                }
                None => {
                    if is_dark_square {
                        "·".dimmed().to_string()
                    } else {
                        " ".to_string()
                    }
                }
            };

            print!("| {} ", piece_str);
        }
        println!("|");
        println!("  +---+---+---+---+---+---+---+---+");
    }
    println!("    a   b   c   d   e   f   g   h");
    println!();
}

fn side_label(color: Color) -> colored::ColoredString {
    match color {
        Color::White => "White".white().bold(),
        Color::Black => "Black".blue().bold(),
    }
}

/// Prints the status line (turn, check, legal move count).
pub fn print_status(game: &GameState) {
    print!("{} to move", side_label(game.turn));
    if game.is_check() {
        print!("  {}", "CHECK".red().bold());
    }
    println!("  ({} legal moves)", game.legal_moves().len());
    println!();
}

/// Prints the outcome of a processed command.
pub fn print_outcome(outcome: MoveOutcome) {
    match outcome {
        MoveOutcome::Ongoing => {}
        MoveOutcome::Check => println!("{}", "Check!".red().bold()),
        MoveOutcome::IllegalMove => println!("{}", "Illegal move".red().bold()),
        MoveOutcome::Checkmate { .. } | MoveOutcome::Resign { .. } | MoveOutcome::Draw => {
            println!("{}", "═══════════════════════════════════".yellow());
            println!("  {}", outcome.to_string().green().bold());
            match outcome.winner() {
                Some(winner) => println!("  Result: {} wins", side_label(winner)),
                None => println!("  Result: draw"),
            }
            println!("{}", "═══════════════════════════════════".yellow());
            println!("  Type {} to start over or keep playing.", "new".green());
            println!();
        }
    }
}

/// Prints available commands in the terminal.
pub fn print_help() {
    println!("{}", "Commands:".yellow().bold());
    println!("  {}       - move a piece", "e2 e4".green());
    println!("  {}     - move and promote (q, r, b, n)", "e7 e8 n".green());
    println!("  {} - move and request a draw", "e2 e4 draw?".green());
    println!("  {}      - resign the game", "resign".green());
    println!("  {}       - list legal moves", "moves".green());
    println!("  {}       - show the board", "board".green());
    println!("  {}        - print the position as JSON", "json".green());
    println!("  {}         - start a new game", "new".green());
    println!("  {}        - show this help", "help".green());
    println!("  {}        - exit", "quit".green());
    println!();
}

/// Runs the interactive terminal chess game.
///
/// Two players alternate entering moves via the terminal until one of
/// them quits or standard input closes.
pub fn run_terminal_game() -> io::Result<()> {
    println!();
    println!("{}", "╔═══════════════════════════════════════╗".cyan());
    println!("{}", "║           Chess Rules Engine          ║".cyan());
    println!("{}", "╚═══════════════════════════════════════╝".cyan());
    println!();

    let mut game = GameState::new();

    print_help();
    print_board(&game.board);
    print_status(&game);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{} > ", side_label(game.turn));
        io::stdout().flush()?;

        let input = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let input = input.trim().to_lowercase();

        if input.is_empty() {
            continue;
        }

        match input.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye!");
                break;
            }
            "help" | "h" | "?" => print_help(),
            "board" | "b" => {
                print_board(&game.board);
                print_status(&game);
            }
            "moves" | "m" => {
                let moves = game.legal_moves();
                println!("{} ({})", "Legal moves:".yellow().bold(), moves.len());
                for (i, mv) in moves.iter().enumerate() {
                    if i > 0 && i % 8 == 0 {
                        println!();
                    }
                    print!("  {}", mv.to_string().green());
                }
                println!();
                println!();
            }
            "json" | "j" => {
                let snapshot = game.board.snapshot();
                match serde_json::to_string_pretty(&snapshot) {
                    Ok(json) => println!("{}", json),
                    Err(e) => log::error!("Failed to serialize board: {}", e),
                }
                println!();
            }
            "new" => {
                game = GameState::new();
                print_board(&game.board);
                print_status(&game);
            }
            _ => {
                let response = game.play(&input);
                if response.outcome != MoveOutcome::IllegalMove {
                    print_board(&game.board);
                    print_status(&game);
                }
                print_outcome(response.outcome);
            }
        }
    }

    Ok(())
}
