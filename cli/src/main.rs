//! CLI entrypoint for impostor
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use impostor_application::{
    CompositeBroadcaster, ConversationLogger, CreateGameUseCase, GameEvent, GameHandle, GameStore,
    InferenceClient, NoConversationLogger,
};
use impostor_domain::{Game, GameConfig, GameMode, Leaderboard, Model, RosterEntry};
use impostor_infrastructure::{
    ChannelBroadcaster, ConfigLoader, FileConfig, JsonlEventLogger, OllamaClient, StaticWordList,
};
use impostor_presentation::{
    Cli, ConsoleFormatter, ConsolePresenter, HumanConsole, JsonFormatter, OutputFormat,
    format_leaderboard, stdin_lines,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v/-q
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };
    check_config(&config)?;

    // === Dependency Injection ===
    let settings = config.ollama.to_settings();
    let client = Arc::new(
        OllamaClient::new(settings.clone()).context("Failed to build the inference client")?,
    );

    if !client.is_available().await {
        bail!(
            "No inference server answering at {}. Is Ollama running (`ollama serve`)?",
            settings.base_url
        );
    }
    let installed = client.list_models().await.unwrap_or_else(|e| {
        warn!("Could not list installed models: {}", e);
        Vec::new()
    });

    if cli.list_models {
        for model in &installed {
            println!("{}", model);
        }
        return Ok(());
    }

    let pool = config.roster();
    let game_config = cli.game_config(config.game.to_game_config());
    let params = cli.controller_params(config.controller_params());

    if !installed.is_empty() {
        for model in missing_models(&required_models(&game_config, &pool), &installed) {
            eprintln!("warning: model '{model}' is not installed (ollama pull {model})");
        }
    }

    let console_events = ChannelBroadcaster::default();
    let mut broadcaster = CompositeBroadcaster::new().with(Arc::new(console_events.clone()));
    let mut conversation_logger: Arc<dyn ConversationLogger> = Arc::new(NoConversationLogger);
    if let Some(path) = &cli.event_log {
        let log = JsonlEventLogger::new(path)
            .map(Arc::new)
            .with_context(|| format!("Could not open event log {}", path.display()))?;
        broadcaster = broadcaster.with(log.clone());
        conversation_logger = log;
    }

    let words = Arc::new(match params.seed {
        Some(seed) => StaticWordList::with_seed(seed),
        None => StaticWordList::new(),
    });
    let leaderboard = Leaderboard::with_roster(&pool).shared();

    let create_game = CreateGameUseCase::new(client, words, leaderboard)
        .with_broadcaster(Arc::new(broadcaster))
        .with_conversation_logger(conversation_logger)
        .with_pool(pool)
        .with_params(params);
    let store = GameStore::new(create_game);

    info!(games = cli.games, "Starting impostor");
    let mut lines = (game_config.mode == GameMode::HumanPlayer).then(stdin_lines);

    for number in 1..=cli.games.max(1) {
        // Subscribe before the game starts so no event is missed
        let events = console_events.subscribe();
        let handle = store
            .create(&game_config)
            .context("Could not set up the game")?;
        let game = handle.snapshot();

        if cli.games > 1 && cli.output == OutputFormat::Pretty && !cli.quiet {
            println!("\n=== Game {number} of {} ===", cli.games);
        }
        let presenter = (!cli.quiet).then(|| spawn_presenter(&cli, &game, events));

        if let (Some(human), Some(lines)) = (game.human(), lines.as_mut()) {
            HumanConsole::new(human.id(), handle.clone())
                .run(lines)
                .await;
        }

        let finished = finish(&store, &handle).await;
        if let Some(presenter) = presenter {
            let _ = presenter.await;
        }

        match cli.output {
            OutputFormat::Json => {}
            OutputFormat::Pretty => {
                if cli.quiet {
                    print_summary(&finished);
                }
                println!("\n{}", format_leaderboard(&store.leaderboard()));
            }
        }
        store.remove(handle.id());
    }

    Ok(())
}

/// Print validation issues; abort on errors
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in &issues {
        eprintln!("{}", issue);
    }
    let errors = issues.iter().filter(|i| i.is_error()).count();
    if errors > 0 {
        bail!("{errors} configuration error(s); fix them or run with --no-config");
    }
    Ok(())
}

fn spawn_presenter(
    cli: &Cli,
    game: &Game,
    events: broadcast::Receiver<GameEvent>,
) -> JoinHandle<()> {
    let names: HashMap<String, String> = game
        .players()
        .iter()
        .map(|p| (p.id().to_string(), p.display_name().to_string()))
        .collect();
    let label = move |id: &str| names.get(id).cloned().unwrap_or_else(|| id.to_string());
    let game_id = game.id().to_string();

    match cli.output {
        OutputFormat::Pretty => {
            let presenter = ConsolePresenter::new(ConsoleFormatter::for_game(game));
            tokio::spawn(presenter.run(game_id, events, label))
        }
        OutputFormat::Json => {
            let presenter = ConsolePresenter::new(JsonFormatter).without_spinner();
            tokio::spawn(presenter.run(game_id, events, label))
        }
    }
}

/// Wait for the game task and return the final record
async fn finish<I: InferenceClient + 'static>(store: &GameStore<I>, handle: &GameHandle) -> Game {
    match store.join(handle.id()).await {
        Some(game) => game,
        None => handle.finished().await,
    }
}

fn print_summary(game: &Game) {
    let result = game
        .result()
        .map(|r| r.to_string())
        .unwrap_or_else(|| "unfinished".to_string());
    let impostor = game.impostor().map(|p| p.display_name()).unwrap_or("?");
    println!(
        "Game {}: {} (word: {}, impostor: {})",
        game.id(),
        result,
        game.secret_word(),
        impostor
    );
}

/// Models the configured table will seat
fn required_models(config: &GameConfig, pool: &[RosterEntry]) -> Vec<Model> {
    if let Some(model) = &config.single_model {
        return vec![model.clone()];
    }
    if config.selected_players.is_empty() {
        return pool
            .iter()
            .take(config.player_count)
            .map(|e| e.model.clone())
            .collect();
    }
    config
        .selected_players
        .iter()
        .filter_map(|name| pool.iter().find(|e| e.matches(name)))
        .map(|e| e.model.clone())
        .collect()
}

/// Required models the server does not have. Untagged names mean `:latest`.
fn missing_models(required: &[Model], installed: &[Model]) -> Vec<Model> {
    let normalize = |model: &Model| {
        let tag = model.as_str().to_lowercase();
        if tag.contains(':') {
            tag
        } else {
            format!("{tag}:latest")
        }
    };
    let installed: Vec<String> = installed.iter().map(normalize).collect();
    required
        .iter()
        .filter(|m| !installed.contains(&normalize(m)))
        .cloned()
        .collect()
}
