use clap::Parser;
use log::debug;
use onedeck::{HandOutcome, RoundPhase, Table, TableRules};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Parser)]
#[command(
    name = "shoe-sim",
    about = "Deal blackjack rounds against the engine and report bankroll and count drift"
)]
struct Args {
    /// Rounds to play (stops early once the bankroll runs dry)
    #[arg(long, default_value = "100")]
    rounds: u32,

    /// Flat bet per round
    #[arg(long, default_value = "10")]
    bet: u64,

    /// Starting bankroll
    #[arg(long, default_value = "500")]
    bankroll: u64,

    /// Hands per shoe before a reshuffle (4 or 5)
    #[arg(long, default_value = "5")]
    reshuffle_after: u32,

    /// RNG seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let rules = match TableRules::new(args.reshuffle_after, args.bankroll) {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let mut table = match args.seed {
        Some(seed) => Table::with_rng(rules, ChaCha8Rng::seed_from_u64(seed)),
        None => Table::new(rules),
    };

    let (mut wins, mut losses, mut pushes) = (0u32, 0u32, 0u32);
    let mut rounds_played = 0u32;

    for _ in 0..args.rounds {
        let stake = args.bet.min(table.bankroll());
        if stake == 0 {
            break;
        }
        if table.clear_bet().is_err() || table.place_bet(stake).is_err() {
            break;
        }
        if let Err(e) = table.deal_initial() {
            eprintln!("deal refused: {e}");
            break;
        }

        // Flat policy: draw to 17, stand otherwise.
        while table.phase() == RoundPhase::PlayerActing {
            let Some(hand) = table.active_hand() else {
                break;
            };
            let result = if hand.value() < 17 {
                table.hit()
            } else {
                table.stand()
            };
            if let Err(e) = result {
                eprintln!("round aborted: {e}");
                std::process::exit(1);
            }
        }
        if table.phase() == RoundPhase::DealerActing {
            if let Err(e) = table.resolve_dealer() {
                eprintln!("round aborted: {e}");
                std::process::exit(1);
            }
        }

        for outcome in table.outcomes() {
            match outcome {
                HandOutcome::Win => wins += 1,
                HandOutcome::Loss => losses += 1,
                HandOutcome::Push => pushes += 1,
            }
        }
        rounds_played += 1;
        debug!(
            "round {rounds_played}: bankroll {}, running count {}",
            table.bankroll(),
            table.running_count()
        );
        if table.start_new_round().is_err() {
            break;
        }
    }

    println!("Rounds played:  {rounds_played}");
    println!("Hands won:      {wins}");
    println!("Hands lost:     {losses}");
    println!("Hands pushed:   {pushes}");
    println!("Final bankroll: {}", table.bankroll());
    println!("Reshuffles:     {}", table.reshuffles());
    println!("Running count:  {:+}", table.running_count());
    println!("True count:     {:+.1}", table.true_count());
}
