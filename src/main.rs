use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use pgn_replay::{
    game::board::{AmbiguityPolicy, BoardRules},
    pgn::load::load_game,
    replay::{ReplayConfig, Replayer},
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Arguments {
    /// PGN file holding the game to replay
    pgn: PathBuf,
    /// Fails on moves that several pieces could make instead of picking one
    #[arg(long)]
    reject_ambiguous: bool,
    /// Requires the square skipped by a pawn double push to be empty
    #[arg(long)]
    strict_double_push: bool,
    /// Does not show the board after each move
    #[arg(long)]
    no_board: bool,
}

pub fn main() -> ExitCode {
    let args = Arguments::parse();
    env_logger::init();

    let mut movetext = match load_game(&args.pgn) {
        Ok(movetext) => movetext,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Could not load {}: {e}", args.pgn.display());
            return ExitCode::FAILURE;
        }
    };

    let rules = BoardRules {
        ambiguity: if args.reject_ambiguous {
            AmbiguityPolicy::Reject
        } else {
            AmbiguityPolicy::LastMatch
        },
        double_push_needs_clear_path: args.strict_double_push,
    };
    let config = ReplayConfig::new()
        .with_rules(rules)
        .with_board_shown(!args.no_board);
    let mut replayer = Replayer::new(config);

    match replayer.replay(&mut movetext) {
        Ok(()) => {
            println!("\nFinal position:\n{}", replayer.board());
            if let Some(result) = movetext.result {
                println!("Result: {result}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}: {}", e.source);
            println!("\nLast position:\n{}", replayer.board());
            ExitCode::FAILURE
        }
    }
}
