use broadside::{domain::GameSummary, init_logging, AiPlayer, Match, Side};
use rand::{rngs::SmallRng, SeedableRng};

const MAX_TURNS: usize = 200;

fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let mut rng1 = SmallRng::seed_from_u64(seed1);
    let mut rng2 = SmallRng::seed_from_u64(seed2);

    let mut game = Match::new(
        Box::new(AiPlayer::named("player1")),
        Box::new(AiPlayer::named("player2")),
    );
    game.setup_side(Side::First, &mut rng1)?;
    game.setup_side(Side::Second, &mut rng2)?;

    // Targeting draws continue from the first player's stream.
    game.play_to_end(&mut rng1, MAX_TURNS)?;

    let summary = GameSummary::from(&game);
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
