use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::error;
use tracing_subscriber::EnvFilter;

use recon_chess::players::mcts_player::MctsPlayer;
use recon_chess::players::player_trait::Player;
use recon_chess::players::random_player::RandomPlayer;
use recon_chess::recon::game::GameConfig;
use recon_chess::search::mcts_config::MctsConfig;
use recon_chess::utils::game_runner::{play_local_game, MatchConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlayerKind {
    Random,
    Mcts,
}

#[derive(Parser, Debug)]
#[command(name = "recon_chess", about = "Play a local game of reconnaissance chess")]
struct Args {
    /// Player controlling White
    #[arg(long, value_enum, default_value_t = PlayerKind::Mcts)]
    white: PlayerKind,

    /// Player controlling Black
    #[arg(long, value_enum, default_value_t = PlayerKind::Random)]
    black: PlayerKind,

    /// Clock per player in seconds
    #[arg(long, default_value_t = 600.0)]
    seconds: f64,

    /// Upper bound on a single search in milliseconds
    #[arg(long, default_value_t = 1000)]
    search_ms: u64,

    /// Random seed; each player derives its own stream from it
    #[arg(long)]
    seed: Option<u64>,

    /// Declare a draw after this many turns
    #[arg(long)]
    max_turns: Option<u32>,

    /// Log the board after every sense and move
    #[arg(long, default_value_t = false)]
    show_boards: bool,
}

fn build_player(kind: PlayerKind, args: &Args, stream: u64) -> Box<dyn Player> {
    let seed = args.seed.map(|seed| seed.wrapping_mul(2).wrapping_add(stream));
    match kind {
        PlayerKind::Random => match seed {
            Some(seed) => Box::new(RandomPlayer::with_seed(seed)),
            None => Box::new(RandomPlayer::new()),
        },
        PlayerKind::Mcts => {
            let config = MctsConfig {
                time_limit: Duration::from_millis(args.search_ms),
                seed,
                ..MctsConfig::default()
            };
            Box::new(MctsPlayer::new(config))
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut white = build_player(args.white, &args, 0);
    let mut black = build_player(args.black, &args, 1);

    let config = MatchConfig {
        game: GameConfig {
            seconds_per_player: args.seconds,
            ..GameConfig::default()
        },
        max_turns: args.max_turns,
        show_boards: args.show_boards,
    };

    match play_local_game(white.as_mut(), black.as_mut(), &config) {
        Ok(outcome) => {
            match outcome.winner {
                Some(winner) => println!("Winner: {} ({})", winner.shout(), outcome.reason),
                None => println!("Draw ({})", outcome.reason),
            }
            println!("Final position: {}", outcome.final_fen);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "game could not be started");
            ExitCode::FAILURE
        }
    }
}
