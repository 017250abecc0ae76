use recollect::analytics::TracingSink;
use recollect::cli::{Cli, Commands, ConfigAction};
use recollect::config::EngineConfig;
use recollect::corpus::JsonFileStore;
use recollect::error::{RecollectError, Result};
use recollect::model::ConversationalResponse;
use recollect::patterns::PatternsConfig;
use recollect::QueryEngine;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Ask {
            question,
            user,
            corpus,
            today,
            json,
        } => {
            cmd_ask(cli.config, &question, &user, corpus, today, json)?;
        }
        Commands::Suggest { user, corpus } => {
            cmd_suggest(cli.config, &user, corpus)?;
        }
        Commands::Parse { question, today } => {
            cmd_parse(cli.config, &question, today)?;
        }
        Commands::Config { action } => {
            cmd_config(cli.config, action)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose {
        "recollect=debug"
    } else {
        "recollect=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_engine(
    config_path: Option<PathBuf>,
    corpus: PathBuf,
    today: Option<chrono::NaiveDate>,
) -> Result<QueryEngine> {
    let config = load_config(config_path)?;
    let engine = QueryEngine::from_config(
        Arc::new(JsonFileStore::new(corpus)),
        Arc::new(TracingSink),
        config,
    )?;
    Ok(match today {
        Some(day) => engine.with_reference_date(day),
        None => engine,
    })
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().map_err(|e| RecollectError::Io {
        source: e,
        context: "Failed to create tokio runtime".to_string(),
    })
}

fn cmd_ask(
    config_path: Option<PathBuf>,
    question: &str,
    user: &str,
    corpus: PathBuf,
    today: Option<chrono::NaiveDate>,
    json: bool,
) -> Result<()> {
    let engine = build_engine(config_path, corpus, today)?;
    let rt = runtime()?;
    let response = rt.block_on(engine.search(question, user));

    if json {
        println!("{}", to_json(&response, "response")?);
        return Ok(());
    }

    let parsed = engine.parse_query(question, user);
    let window = parsed
        .filters
        .display_range(engine.today(), engine.config().filters.display_window_days);
    print_response(&response, &window.start.to_string(), &window.end.to_string());
    Ok(())
}

fn print_response(response: &ConversationalResponse, from: &str, to: &str) {
    println!("{}", response.answer);
    println!("\nWindow: {} .. {}", from, to);

    if !response.results.is_empty() {
        println!("\nResults:");
        for (i, result) in response.results.iter().enumerate() {
            println!(
                "  {}. [{:.2}] {} ({})",
                i + 1,
                result.relevance_score,
                result.title,
                result.metadata.date
            );
            println!("     {}", result.reasoning);
        }
    }

    if let Some(clarification) = &response.clarification_needed {
        println!("\n{}", clarification);
    }

    println!("\nYou could also ask:");
    for question in &response.suggested_questions {
        println!("  - {}", question);
    }
}

fn cmd_suggest(config_path: Option<PathBuf>, user: &str, corpus: PathBuf) -> Result<()> {
    let engine = build_engine(config_path, corpus, None)?;
    let rt = runtime()?;
    for question in rt.block_on(engine.get_search_suggestions(user)) {
        println!("{}", question);
    }
    Ok(())
}

fn cmd_parse(
    config_path: Option<PathBuf>,
    question: &str,
    today: Option<chrono::NaiveDate>,
) -> Result<()> {
    // The corpus is never read while parsing
    let engine = build_engine(config_path, PathBuf::new(), today)?;
    let parsed = engine.parse_query(question, "cli");
    println!("{}", to_json(&parsed, "parsed query")?);
    Ok(())
}

fn cmd_config(config_path: Option<PathBuf>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            let content = toml::to_string_pretty(&config)?;
            println!("{}", content);
        }
        ConfigAction::Path => {
            println!("{}", EngineConfig::default_path()?.display());
        }
        ConfigAction::Validate { file } => {
            let path = match file.or(config_path) {
                Some(path) => path,
                None => EngineConfig::default_path()?,
            };
            EngineConfig::load(&path)?;
            println!("✓ Configuration is valid: {}", path.display());
        }
        ConfigAction::Init { force } => {
            let path = match config_path {
                Some(path) => path,
                None => EngineConfig::default_path()?,
            };

            if path.exists() && !force {
                println!("Configuration file already exists at: {}", path.display());
                println!("Use --force to overwrite");
                return Ok(());
            }

            let patterns_path = path
                .parent()
                .map(|dir| dir.join("patterns.toml"))
                .unwrap_or_else(|| PathBuf::from("patterns.toml"));
            write_pattern_template(&patterns_path, force)?;

            let config = EngineConfig {
                patterns_file: Some(patterns_path.clone()),
                ..EngineConfig::default()
            };
            config.save(&path)?;

            println!("✓ Configuration initialized at: {}", path.display());
            println!("✓ Pattern table written to: {}", patterns_path.display());
        }
    }

    Ok(())
}

fn load_config(config_path: Option<PathBuf>) -> Result<EngineConfig> {
    let path = match config_path {
        Some(path) => path,
        None => EngineConfig::default_path()?,
    };

    if !path.exists() {
        tracing::debug!(
            "Config file not found, using defaults. Run 'recollect config init' to create one."
        );
        return EngineConfig::from_env();
    }

    EngineConfig::load(&path)
}

fn write_pattern_template(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| RecollectError::Io {
            source: e,
            context: format!("Failed to create config directory: {:?}", parent),
        })?;
    }
    let content = toml::to_string_pretty(&PatternsConfig::default())?;
    std::fs::write(path, content).map_err(|e| RecollectError::Io {
        source: e,
        context: format!("Failed to write patterns file: {:?}", path),
    })
}

fn to_json<T: serde::Serialize>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| RecollectError::Json {
        source: e,
        context: format!("Failed to serialize {}", what),
    })
}
