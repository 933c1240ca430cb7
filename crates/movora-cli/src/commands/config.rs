use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use movora_config::{mask_secret, Config, CredentialStore, PathManager, API_KEY_ENV};
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(output),
        ConfigCommands::SetKey { key } => set_key(key, output),
        ConfigCommands::Init { force } => init_config(force, output),
    }
}

fn load_credentials(path_manager: &PathManager) -> Result<CredentialStore> {
    let mut store = CredentialStore::new(path_manager.credentials_file());
    store
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials: {}", e))?;
    Ok(store)
}

fn show_config(output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    if !config_file.exists() {
        output.warn(format!("Configuration file not found at: {}", config_file.display()));
        output.info("Using defaults. Run 'movora config init' to write a config file.");
    }

    let config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    let credentials = load_credentials(&path_manager)?;

    let key_source = if std::env::var(API_KEY_ENV).map(|v| !v.trim().is_empty()).unwrap_or(false) {
        API_KEY_ENV.to_string()
    } else {
        path_manager.credentials_file().display().to_string()
    };
    let masked_key = credentials.api_key().map(|k| mask_secret(&k));

    if output.format() != OutputFormat::Human {
        output.json(&json!({
            "config_file": config_file.display().to_string(),
            "api_key": masked_key,
            "api_key_source": masked_key.as_ref().map(|_| key_source),
            "tmdb": {
                "base_url": config.tmdb.base_url,
                "language": config.tmdb.language,
                "timeout_secs": config.tmdb.timeout_secs,
            },
            "images": {
                "base_url": config.images.base_url,
                "poster_size": config.images.poster_size,
                "detail_poster_size": config.images.detail_poster_size,
                "profile_size": config.images.profile_size,
            },
            "browse": {
                "debounce_ms": config.browse.debounce_ms,
                "default_category": config.browse.default_category,
                "default_window": config.browse.default_window,
                "cast_limit": config.browse.cast_limit,
            },
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    println!();
    println!("{}", "Configuration".bright_cyan().bold());
    println!();

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Setting").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Config file"), Cell::new(config_file.display())]);
    match &masked_key {
        Some(masked) => table.add_row(vec![
            Cell::new("API key"),
            Cell::new(format!("{} (from {})", masked, key_source)),
        ]),
        None => table.add_row(vec![Cell::new("API key"), Cell::new("<not set>").fg(Color::Red)]),
    };
    table.add_row(vec![Cell::new("tmdb.base_url"), Cell::new(&config.tmdb.base_url)]);
    table.add_row(vec![
        Cell::new("tmdb.language"),
        Cell::new(config.tmdb.language.as_deref().unwrap_or("<provider default>")),
    ]);
    table.add_row(vec![Cell::new("tmdb.timeout_secs"), Cell::new(config.tmdb.timeout_secs)]);
    table.add_row(vec![Cell::new("images.base_url"), Cell::new(&config.images.base_url)]);
    table.add_row(vec![Cell::new("images.poster_size"), Cell::new(&config.images.poster_size)]);
    table.add_row(vec![
        Cell::new("images.detail_poster_size"),
        Cell::new(&config.images.detail_poster_size),
    ]);
    table.add_row(vec![Cell::new("images.profile_size"), Cell::new(&config.images.profile_size)]);
    table.add_row(vec![Cell::new("browse.debounce_ms"), Cell::new(config.browse.debounce_ms)]);
    table.add_row(vec![
        Cell::new("browse.default_category"),
        Cell::new(config.browse.default_category),
    ]);
    table.add_row(vec![Cell::new("browse.default_window"), Cell::new(config.browse.default_window)]);
    table.add_row(vec![Cell::new("browse.cast_limit"), Cell::new(config.browse.cast_limit)]);
    println!("{}", table);

    if let Err(e) = config.validate() {
        output.warn(format!("Configuration is invalid: {}", e));
    }

    Ok(())
}

fn set_key(key_arg: Option<String>, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;

    let key = match key_arg {
        Some(key) => key,
        None => rpassword::prompt_password("TMDB API key: ")?,
    };
    if key.trim().is_empty() {
        return Err(color_eyre::eyre::eyre!("API key cannot be empty"));
    }

    let mut credentials = load_credentials(&path_manager)?;
    credentials.set_api_key(key);
    credentials
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;

    output.success(format!(
        "API key saved to {}",
        path_manager.credentials_file().display()
    ));
    if std::env::var(API_KEY_ENV).is_ok() {
        output.warn(format!("{} is set and takes precedence over the stored key", API_KEY_ENV));
    }
    Ok(())
}

fn init_config(force: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    if config_file.exists() && !force {
        output.warn(format!(
            "Configuration file already exists at {} (use --force to overwrite)",
            config_file.display()
        ));
        return Ok(());
    }

    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to write {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_file.display()));
    output.info("Next: run 'movora config set-key' to store your TMDB API key.");
    Ok(())
}
