use broadside::{init_logging, simulate_many, SkillTier};
use clap::{Parser, ValueEnum};

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

/// Pit two computer players against each other and print JSON statistics.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = 100)]
    games: usize,
    #[arg(long, default_value_t = 1)]
    seed: u64,
    #[arg(long, value_enum, default_value_t = Tier::Hard)]
    first: Tier,
    #[arg(long, value_enum, default_value_t = Tier::Easy)]
    second: Tier,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();
    let summary = simulate_many(args.first.into(), args.second.into(), args.games, args.seed)?;
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
