use clap::Parser;
use scriptcloak::config::load_config;
use scriptcloak::engine::{self, ObfuscationOptions};
use scriptcloak::errors::AppError;
use scriptcloak::rename::{NameGenerator, RenameTable};
use scriptcloak::{logger, server};
use tracing::info;

#[derive(Parser)]
#[command(name = "scriptcloak", version)]
struct Cli {
    /// Obfuscate a single file and print it instead of serving HTTP
    #[arg(short, long)]
    input: Option<String>,

    /// Write the one-shot result here instead of stdout
    #[arg(short, long, requires = "input")]
    output: Option<String>,

    /// Listening port (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Fixed seed for generated names, for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    logger::init();
    let cli = Cli::parse();
    let settings = load_config(cli.port)?;

    if let Some(ref path) = cli.input {
        info!("obfuscating {}", path);
        let source = tokio::fs::read_to_string(path).await?;
        let options = ObfuscationOptions {
            noise_count: settings.noise_count,
            ..ObfuscationOptions::default()
        };
        let mut names = match cli.seed {
            Some(seed) => NameGenerator::with_seed(seed),
            None => NameGenerator::new(),
        };
        let mut table = RenameTable::new();
        let code = engine::obfuscate_with(&source, &options, &mut table, &mut names);
        match cli.output {
            Some(ref out) => tokio::fs::write(out, code).await?,
            None => println!("{}", code),
        }
        return Ok(());
    }

    info!("Starting scriptcloak server on 0.0.0.0:{}", settings.port);
    server::start_server(settings).await?;
    Ok(())
}
