//! CLI command definitions

use clap::{Parser, ValueEnum};
use impostor_application::{ContextStrategy, ControllerParams, Pacing};
use impostor_domain::{GameConfig, Model};
use std::path::PathBuf;

/// How events are written to the terminal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Coloured, human-readable narration
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Memory strategy for the AI players
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ContextArg {
    /// Each player keeps a growing private chat
    Persistent,
    /// Each request is rebuilt from the game record
    Replay,
}

impl From<ContextArg> for ContextStrategy {
    fn from(arg: ContextArg) -> Self {
        match arg {
            ContextArg::Persistent => ContextStrategy::Persistent,
            ContextArg::Replay => ContextStrategy::Replay,
        }
    }
}

/// CLI arguments for impostor
#[derive(Parser, Debug)]
#[command(name = "impostor")]
#[command(author, version, about = "Impostor word game played by local LLMs")]
#[command(long_about = r#"
Local models sit at a table and share a secret word, except one: the impostor.
Each round every player says one word related to the secret, the table
debates, and everyone votes someone out. Catch the impostor before it
outlasts you, or join the table yourself with --human.

Configuration files are loaded from (in priority order):
1. IMPOSTOR_<SECTION>__<KEY>   Environment variables
2. --config <path>             Explicit config file
3. ./impostor.toml             Project-level config
4. ~/.config/impostor/config.toml   Global config

Example:
  impostor
  impostor --single-model qwen3:8b --count 6 --context replay
  impostor --human Ana --players gemma3 mistral qwen3
  impostor --games 10 --fast --event-log games.jsonl
"#)]
pub struct Cli {
    /// Pool entries to seat (model tag or short name)
    #[arg(short, long, value_name = "MODEL", num_args = 1.., conflicts_with = "single_model")]
    pub players: Vec<String>,

    /// Seat this one model in every chair
    #[arg(short, long, value_name = "MODEL")]
    pub single_model: Option<String>,

    /// Number of seats (3-6), human included
    #[arg(short = 'n', long, value_name = "N")]
    pub count: Option<usize>,

    /// Join the table under this name
    #[arg(long, value_name = "NAME")]
    pub human: Option<String>,

    /// Seat index for the human (0-based); random when omitted
    #[arg(long, value_name = "N", requires = "human")]
    pub human_position: Option<usize>,

    /// How AI players remember the game
    #[arg(long, value_enum)]
    pub context: Option<ContextArg>,

    /// Debate exchanges per round
    #[arg(short, long, value_name = "N")]
    pub rounds: Option<u32>,

    /// Play several games in a row, printing the leaderboard after each
    #[arg(short, long, value_name = "N", default_value_t = 1)]
    pub games: u32,

    /// Skip the pauses between turns
    #[arg(long)]
    pub fast: bool,

    /// Seed for seating, impostor draw and tie-breaks
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Append every event and model exchange to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub event_log: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print the game results
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// List the models installed on the inference server and exit
    #[arg(long)]
    pub list_models: bool,
}

impl Cli {
    /// Overlay the command-line choices on a configured game setup
    pub fn game_config(&self, base: GameConfig) -> GameConfig {
        let mut config = base;
        if let Some(count) = self.count {
            config = config.with_player_count(count);
        }
        if !self.players.is_empty() {
            config = config.with_players(self.players.clone());
        }
        if let Some(model) = &self.single_model {
            config = config.with_single_model(Model::new(model.as_str()));
        }
        if let Some(name) = &self.human {
            config = config.with_human(name.trim());
        }
        if let Some(position) = self.human_position {
            config = config.with_human_position(position);
        }
        config
    }

    /// Overlay the command-line choices on configured controller parameters
    pub fn controller_params(&self, base: ControllerParams) -> ControllerParams {
        let mut params = base;
        if let Some(context) = self.context {
            params = params.with_context(context.into());
        }
        if let Some(rounds) = self.rounds {
            params = params.with_debate_rounds(rounds.max(1));
        }
        if self.fast {
            params = params.with_pacing(Pacing::none());
        }
        if let Some(seed) = self.seed {
            params = params.with_seed(seed);
        }
        params
    }

    /// Default tracing filter for the `-v`/`-q` flags
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
