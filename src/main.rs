#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use broadside::{
    domain::{BatchSummary, GameSummary},
    init_logging, print_player_view, AiPlayer, LogObserver, Match, Side,
};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play one computer-vs-computer match and print both boards.
    Local {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 200)]
        max_turns: usize,
    },
    /// Play many matches and print a JSON summary.
    Stats {
        #[arg(long, default_value_t = 100)]
        games: usize,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 200)]
        max_turns: usize,
    },
}

#[cfg(feature = "std")]
fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "std")]
fn new_match() -> Match {
    Match::new(
        Box::new(AiPlayer::named("player1")),
        Box::new(AiPlayer::named("player2")),
    )
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Local { seed, max_turns } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let mut rng = seeded_rng(seed);
            let mut game = new_match();
            game.subscribe(Box::new(LogObserver));
            game.setup(&mut rng)?;
            let winner = game.play_to_end(&mut rng, max_turns)?;

            print_player_view(game.player(Side::First).name(), game.engine(Side::First));
            println!();
            print_player_view(game.player(Side::Second).name(), game.engine(Side::Second));
            println!(
                "\n{} wins after {} turns",
                game.player(winner).name(),
                game.turns()
            );
        }
        Commands::Stats {
            games,
            seed,
            max_turns,
        } => {
            let mut rng = seeded_rng(seed);
            let mut game = new_match();
            let mut summaries = Vec::with_capacity(games);
            for round in 0..games {
                if round > 0 {
                    game.reset();
                }
                game.setup(&mut rng)?;
                game.play_to_end(&mut rng, max_turns)?;
                summaries.push(GameSummary::from(&game));
            }
            let batch = BatchSummary::from_games(&summaries, "player1");
            println!("{}", serde_json::to_string_pretty(&batch)?);
        }
    }
    Ok(())
}
