use anyhow::Context;
use clap::Parser;
use parts_shop::config::{Command, LogFormat};
use parts_shop::utils::{logger, validation::Validate};
use parts_shop::{
    CliConfig, FormatRegistry, FormatStore, LocalStorage, Session, ShopConfig, TerminalPrompt,
};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting parts-shop");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = load_settings(&cli)?;
    let store = FormatStore::new(
        LocalStorage::new(),
        FormatRegistry::standard(config.pdf.clone()),
    );

    match cli.command.clone() {
        Some(Command::Convert { input, output }) => {
            let (decoded, report) = match store.convert(&input, &output) {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(
                        "Conversion failed: {} (Category: {:?}, Severity: {:?})",
                        e,
                        e.category(),
                        e.severity()
                    );
                    eprintln!("❌ {}", e.user_friendly_message());
                    eprintln!("💡 {}", e.recovery_suggestion());
                    std::process::exit(1);
                }
            };
            println!(
                "✅ Converted {} part(s) from {} to {}",
                report.records,
                input.display(),
                report.path.display()
            );
            if decoded.skipped > 0 {
                println!("⚠️  Skipped {} malformed line(s)", decoded.skipped);
            }
        }
        Some(Command::Shell { file }) => run_shell(store, &config, file)?,
        None => run_shell(store, &config, None)?,
    }

    Ok(())
}

fn load_settings(cli: &CliConfig) -> anyhow::Result<ShopConfig> {
    let Some(path) = &cli.config else {
        return Ok(ShopConfig::default());
    };

    tracing::info!("Loading settings from: {}", path.display());
    let config = ShopConfig::from_file(path)
        .with_context(|| format!("Failed to load settings file '{}'", path.display()))?;

    // 驗證設定
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        return Err(e).context("Invalid settings");
    }
    Ok(config)
}

fn run_shell(
    store: FormatStore<LocalStorage>,
    config: &ShopConfig,
    file: Option<PathBuf>,
) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let prompt = TerminalPrompt::new(stdin.lock(), std::io::stdout());
    let mut session =
        Session::new(prompt, store).with_default_save_format(&config.session.default_save_format);

    let start_file = file.or_else(|| config.session.start_file.as_ref().map(PathBuf::from));
    if let Some(path) = start_file {
        session.preload(path).context("Failed to show the preloaded table")?;
    }

    session.run().context("Terminal I/O failed")?;
    Ok(())
}
