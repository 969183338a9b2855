//! # Command Line Interface

use crate::service::WhatIfRequest;
use clap::{Parser, Subcommand};
use whatif_engine::PlayerId;

/// Replay a gameweek with a different captain or bench decision
#[derive(Parser, Debug)]
#[command(name = "what-if")]
#[command(about = "What-if simulations for a fantasy gameweek")]
pub struct Cli {
    /// Manager entry id
    #[arg(short, long)]
    pub entry: u64,

    /// Gameweek to analyse (defaults to the current one)
    #[arg(short, long)]
    pub gameweek: Option<u32>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Give the armband to another player
    Captain {
        #[arg(long)]
        player: PlayerId,
    },
    /// Swap a starter with a bench player
    BenchSwap {
        #[arg(long)]
        starter: PlayerId,
        #[arg(long)]
        bench: PlayerId,
    },
    /// Measure what the vice-captain safety net was worth
    ViceCaptain,
}

impl From<Commands> for WhatIfRequest {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Captain { player } => WhatIfRequest::Captain { new_captain_id: player },
            Commands::BenchSwap { starter, bench } => {
                WhatIfRequest::BenchSwap { starter_id: starter, bench_id: bench }
            }
            Commands::ViceCaptain => WhatIfRequest::ViceCaptain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bench_swap() {
        let cli = Cli::try_parse_from([
            "what-if", "--entry", "1234", "--gameweek", "7", "bench-swap", "--starter", "3",
            "--bench", "13",
        ])
        .unwrap();

        assert_eq!(cli.entry, 1234);
        assert_eq!(cli.gameweek, Some(7));
        assert_eq!(
            WhatIfRequest::from(cli.command),
            WhatIfRequest::BenchSwap { starter_id: 3, bench_id: 13 }
        );
    }

    #[test]
    fn test_parse_vice_captain_without_gameweek() {
        let cli = Cli::try_parse_from(["what-if", "-e", "99", "vice-captain"]).unwrap();
        assert_eq!(cli.gameweek, None);
        assert_eq!(cli.command, Commands::ViceCaptain);
    }

    #[test]
    fn test_captain_requires_player() {
        assert!(Cli::try_parse_from(["what-if", "--entry", "1", "captain"]).is_err());
    }
}
