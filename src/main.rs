use clap::Parser;
use web_box::app::run_command;
use web_box::utils::error::ErrorCategory;
use web_box::utils::{logger, validation::Validate};
use web_box::{BoxConfig, CliConfig};

fn main() {
    let cli = CliConfig::parse();

    // 載入配置
    let mut config = match &cli.config {
        Some(path) => match BoxConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        },
        None => BoxConfig::default(),
    };

    if cli.verbose {
        config.logging.verbose = true;
    }

    // 初始化日誌
    if config.logging.json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.logging.verbose);
    }

    tracing::debug!("Config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    match run_command(&config, &cli.command) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!("Command failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.category() {
                ErrorCategory::Input => 2,
                ErrorCategory::Config => 1,
                ErrorCategory::System => 3,
            };
            std::process::exit(exit_code);
        }
    }
}
