use broadside::{
    cli::{play, PlayOptions},
    init_logging, GameResult, GameSession, Side, SkillTier, DEFAULT_AI_DELAY_MS,
};

use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::io::BufReader;
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Tier {
    Easy,
    Medium,
    Hard,
}

impl From<Tier> for SkillTier {
    fn from(t: Tier) -> Self {
        match t {
            Tier::Easy => SkillTier::Easy,
            Tier::Medium => SkillTier::Medium,
            Tier::Hard => SkillTier::Hard,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer in this terminal.
    Play {
        #[arg(long, value_enum, default_value_t = Tier::Medium)]
        tier: Tier,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = DEFAULT_AI_DELAY_MS, help = "Pause before the computer fires")]
        delay_ms: u64,
        #[arg(long, help = "Place your fleet at random")]
        auto_place: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            tier,
            seed,
            delay_ms,
            auto_place,
        } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let mut rng = if let Some(s) = seed {
                SmallRng::seed_from_u64(s)
            } else {
                let mut seed_rng = rand::rng();
                SmallRng::from_rng(&mut seed_rng)
            };

            let mut session = GameSession::new(tier.into(), &mut rng)?;
            let options = PlayOptions {
                ai_delay: Duration::from_millis(delay_ms),
                auto_place,
            };
            let input = BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            let result = play(&mut session, input, &mut stdout, &mut rng, &options).await?;

            match result {
                Some(GameResult::Winner(Side::Human)) => println!("\nVICTORY! Thanks for playing."),
                Some(GameResult::Winner(Side::Computer)) => println!("\nDEFEAT. Better luck next time."),
                Some(GameResult::Draw) => println!("\nThe battle ended in a draw."),
                None => println!("\nGoodbye."),
            }
        }
    }
    Ok(())
}
