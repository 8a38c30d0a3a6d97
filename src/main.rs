//! 命令行入口

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use menu_translation::env::{core::LogLevel, generate_env_docs, EnvConfig, EnvVar};
use menu_translation::logging::init_logging;
use menu_translation::menu::{
    BatchRetranslator, EntityKind, MenuStore, SqliteMenuStore, TranslationWriter,
};
use menu_translation::translation::{
    build_text_translator, ConfigManager, NoopTranslator, TextTranslator, TranslationConfig,
    Translator,
};

#[derive(Parser)]
#[command(name = "menu-translate")]
#[command(version, about = "Translate restaurant menu texts and store them on menu rows")]
struct Cli {
    /// Configuration file (defaults to the standard search paths)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a single text and print where the result came from
    Translate {
        text: String,
        /// Target language [default: configured target language]
        #[arg(long)]
        lang: Option<String>,
    },
    /// Retranslate rows that are missing a translation
    Retranslate {
        /// Only this table (product, category, allergen, ingredient)
        #[arg(long)]
        table: Option<EntityKind>,
        /// Retranslate every row, not just the missing ones
        #[arg(long)]
        force: bool,
        /// Database path [default: configured database]
        #[arg(long)]
        db: Option<PathBuf>,
        /// Pause between rows in milliseconds [default: configured delay]
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Show the localized name and description of a row
    Show {
        table: EntityKind,
        id: i64,
        #[arg(long)]
        lang: Option<String>,
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Create the menu tables and translation columns if missing
    InitDb {
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Write an example configuration file
    ConfigExample { path: PathBuf },
    /// Print the environment variable documentation
    EnvDocs,
}

fn load_config(path: Option<&PathBuf>) -> Result<TranslationConfig> {
    let manager = match path {
        Some(path) => ConfigManager::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ConfigManager::new().context("failed to load configuration")?,
    };
    Ok(manager.into_config())
}

fn open_store(config: &TranslationConfig, db: Option<PathBuf>) -> Result<Arc<SqliteMenuStore>> {
    let path = db.unwrap_or_else(|| PathBuf::from(&config.db_path));
    let store = SqliteMenuStore::open(&path)
        .with_context(|| format!("failed to open database {}", path.display()))?
        .with_translation_lang(&config.target_lang)?;
    Ok(Arc::new(store))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 先于配置加载安装日志，配置加载过程中的日志才不会丢失
    let log_level = LogLevel::get();
    init_logging(log_level.as_deref().unwrap_or("info"));
    if let Err(e) = &log_level {
        tracing::warn!("{}，使用 info 级别", e);
    }

    match &cli.command {
        Commands::EnvDocs => {
            print!("{}", generate_env_docs());
            return Ok(());
        }
        Commands::ConfigExample { path } => {
            ConfigManager::generate_example_config(path)?;
            println!("Wrote example configuration to {}", path.display());
            return Ok(());
        }
        _ => {}
    }

    let config = load_config(cli.config.as_ref())?;
    match EnvConfig::from_env() {
        Ok(env) => tracing::debug!("环境变量: {}", env.summary()),
        Err(e) => tracing::debug!("环境变量不完整: {}", e),
    }

    match cli.command {
        Commands::Translate { text, lang } => {
            let lang = lang.unwrap_or_else(|| config.target_lang.clone());
            if config.enabled {
                let translator = Translator::from_config(&config)?;
                let resolution = translator.resolve(&text, &lang);
                println!("{}\t[{}]", resolution.text, resolution.source.as_str());
            } else {
                println!("{}\t[disabled]", NoopTranslator.translate(&text, &lang));
            }
        }
        Commands::Retranslate {
            table,
            force,
            db,
            delay_ms,
        } => {
            let store = open_store(&config, db)?;
            store.ensure_translation_columns()?;

            let translator: Arc<dyn TextTranslator> = build_text_translator(&config)?;
            let writer = TranslationWriter::new(translator, store);
            let delay = delay_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| config.batch_delay());
            let batch = BatchRetranslator::new(writer).with_delay(delay);

            let reports = match table {
                Some(kind) => vec![batch.run(kind, force)?],
                None => batch.run_all(force)?,
            };
            for report in reports {
                println!("{}\t{}", report.kind.table(), report.processed);
            }
        }
        Commands::Show { table, id, lang, db } => {
            let store = open_store(&config, db)?;
            let lang = lang.unwrap_or_else(|| config.target_lang.clone());

            let entity = store
                .read_entity(table, id)?
                .with_context(|| format!("{} {} not found", table, id))?;
            let localized = entity.localized(&lang);

            println!("{}", localized.name);
            if let Some(description) = localized.description.filter(|d| !d.is_empty()) {
                println!("{}", description);
            }
        }
        Commands::InitDb { db } => {
            let store = open_store(&config, db)?;
            store.ensure_translation_columns()?;
            println!("Menu tables ready");
        }
        Commands::ConfigExample { .. } | Commands::EnvDocs => {}
    }

    Ok(())
}
