mod commands;
mod terminal;

use std::process::ExitCode;
use std::time::Duration;

use commands::{CommandLine, Commands, compose, generate, platforms, read, write};
use tagforge_common::config::Config;
use terminal::notify::Notifier;
use terminal::{logging, print};

const NOTICE_TTL: Duration = Duration::from_secs(4);

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    logging::init_logging();

    let cfg = commands.config();
    print::banner(cfg.quiet);

    let notifier = Notifier::new(NOTICE_TTL);
    let result = run(commands.command, &cfg, &notifier).await;

    let code = match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            notifier.error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    };
    print::end_of_program(cfg.quiet);
    code
}

async fn run(command: Commands, cfg: &Config, notifier: &Notifier) -> anyhow::Result<()> {
    match command {
        Commands::Compose { intent } => compose::compose(intent.into(), cfg),
        Commands::Write { intent } => write::write(intent.into(), cfg, notifier).await,
        Commands::Read => read::read(cfg, notifier).await,
        Commands::Generate { prompt, write } => {
            generate::generate(&prompt, write, cfg, notifier).await
        }
        Commands::Platforms => {
            platforms::platforms(cfg);
            Ok(())
        }
    }
}
