use anyhow::Context;
use clap::Parser;
use platform_storage::config::Command;
use platform_storage::utils::{logger, validation::Validate};
use platform_storage::{
    CliConfig, LocalStorage, MessageCatalogue, PlatformStorage, Storage, StorageConfig,
    StorageError, TransferOptions, TransferableStorage, XliffConverter,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting platform-storage CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(cli).await {
        tracing::error!("❌ {:#}", e);

        let exit_code = match e.downcast_ref::<StorageError>() {
            Some(storage_error) => {
                tracing::error!("💡 Suggestion: {}", storage_error.recovery_suggestion());
                eprintln!("❌ {}", storage_error);
                eprintln!("💡 建議: {}", storage_error.recovery_suggestion());
                if storage_error.is_configuration_error() {
                    1
                } else {
                    2
                }
            }
            None => {
                eprintln!("❌ {:#}", e);
                1
            }
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: CliConfig) -> anyhow::Result<()> {
    cli.validate()?;

    // 載入並驗證配置
    let config = StorageConfig::from_file(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    config.validate()?;

    let storage = PlatformStorage::new(config.http_client()?, config.projects());

    match cli.command {
        Command::Get(target) => {
            match storage
                .get(&target.locale, &target.domain, &target.key)
                .await?
            {
                Some(message) => println!("{}", message.translation),
                None => {
                    tracing::warn!(
                        "No {} translation for {}.{}",
                        target.locale,
                        target.domain,
                        target.key
                    );
                }
            }
        }
        Command::Create(args) => {
            storage.create(&args.to_message()).await?;
            println!("✅ Created {}.{}", args.target.domain, args.target.key);
        }
        Command::Update(args) => {
            storage.update(&args.to_message()).await?;
            println!("✅ Updated {}.{}", args.target.domain, args.target.key);
        }
        Command::Delete(target) => {
            storage
                .delete(&target.locale, &target.domain, &target.key)
                .await?;
            println!("✅ Deleted {}.{}", target.domain, target.key);
        }
        Command::Export { locale, output } => {
            let mut catalogue = MessageCatalogue::new(locale);
            storage
                .export(&mut catalogue, &TransferOptions::default())
                .await?;

            let files = LocalStorage::new(output);
            let written = files.write_catalogue(&catalogue, &XliffConverter::new())?;
            println!(
                "✅ Exported {} messages into {} files",
                catalogue.len(),
                written.len()
            );
            for path in written {
                println!("📁 {}", path.display());
            }
        }
        Command::Import {
            locale,
            input,
            default_locale,
        } => {
            let domains: Vec<String> = storage
                .projects()
                .iter()
                .flat_map(|p| p.domains().iter().cloned())
                .collect();

            let files = LocalStorage::new(input);
            let catalogue = files.read_catalogue(&locale, &domains, &XliffConverter::new())?;
            if catalogue.is_empty() {
                tracing::warn!("No messages found for {}; nothing will be translated", locale);
            }

            let options = TransferOptions { default_locale };
            storage.import(&catalogue, &options).await?;
            println!("✅ Submitted {} messages for import", catalogue.len());
        }
    }

    Ok(())
}
