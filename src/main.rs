//! # chessrules: a chess rules engine
//!
//! Validates and applies moves given as text (`e2 e4`), covering every
//! piece's movement, castling and promotion, and classifies the resulting
//! position as check, checkmate, draw request or resignation.
//!
//! ## Usage
//!
//! ```bash
//! # Play a local two-player game in the terminal
//! chessrules play
//!
//! # Replay a file of move commands, one JSON response per line
//! chessrules run --input game.txt
//! ```
//!
//! ## Move commands
//!
//! | Command            | Meaning                                  |
//! |--------------------|------------------------------------------|
//! | `e2 e4`            | Move the piece on e2 to e4               |
//! | `e7 e8 n`          | Move and promote (q, r, b, n; default q) |
//! | `e2 e4 draw?`      | Move and request a draw                  |
//! | `resign`           | The side to move resigns                 |

pub mod check;
pub mod game;
pub mod legality;
pub mod notation;
pub mod script;
pub mod special;
pub mod terminal;
pub mod types;

use clap::{Parser, Subcommand};

/// chessrules: validate and play chess moves from text commands.
#[derive(Parser, Debug)]
#[command(name = "chessrules")]
#[command(about = "Chess rules engine: move legality, check and checkmate")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a chess game in the terminal (two-player).
    Play {
        /// Disable colored output.
        #[arg(long)]
        no_color: bool,
    },

    /// Replay move commands and print one JSON response per line.
    Run {
        /// Read commands from a file instead of stdin.
        #[arg(short, long)]
        input: Option<String>,

        /// Write responses to a file instead of stdout.
        #[arg(short, long)]
        output: Option<String>,

        /// Print the final position to stderr.
        #[arg(short, long)]
        board: bool,
    },
}

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Commands::Play { .. } => "warn",
        Commands::Run { .. } => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Play { no_color } => {
            if no_color {
                colored::control::set_override(false);
            }
            terminal::run_terminal_game()
        }
        Commands::Run {
            input,
            output,
            board,
        } => script::run_script(input.as_deref(), output.as_deref(), board)
            .map_err(std::io::Error::other),
    }
}
