use clap::Args;

/// CLI options for the `train` subcommand's genetic weight-training loop.
#[derive(Clone, Debug, Args)]
pub struct TrainOptions {
    /// Number of generations to run.
    #[arg(short = 'g', long, default_value_t = 50)]
    pub generations: usize,

    /// Population size per generation.
    #[arg(short = 'p', long, default_value_t = 32)]
    pub population: usize,

    /// Games played per individual, per generation, to estimate fitness.
    #[arg(short = 'e', long, default_value_t = 3)]
    pub games_per_eval: usize,

    /// Gaussian mutation rate (probability an offspring weight is perturbed).
    #[arg(short = 'm', long, default_value_t = 0.1)]
    pub mutation_rate: f64,

    /// RNG seed, for reproducible training runs.
    #[arg(short = 's', long, default_value_t = 0)]
    pub seed: u64,

    /// Move budget per game, to bound runaway training games.
    #[arg(long, default_value_t = 500)]
    pub max_pieces: u64,

    /// Path the fittest weight vector is written to.
    #[arg(short = 'o', long, default_value = "weights.txt")]
    pub output: String,
}
