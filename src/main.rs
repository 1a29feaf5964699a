use clap::Parser;
use haltctl::adapter::inbound::cli::command::{Cli, Commands, ConfigCommand};
use haltctl::adapter::inbound::cli::output::{self, OutputConfig};
use haltctl::adapter::inbound::cli::{config, state, status, watch};
use haltctl::error::Result;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    // Both reqwest and tungstenite pull in rustls; pin the ring provider.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));
    output::apply_color(&cli.color);

    if let Err(e) = dispatch(cli.command).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Watch(args) => watch::execute(&args.config).await,
        Commands::Status(args) => status::execute(&args.config, args.timeout).await,
        Commands::Health(args) => status::execute_health(&args.config).await,
        Commands::Halt(args) => state::execute_halt(&args).await,
        Commands::Resume(args) => state::execute_resume(&args).await,
        Commands::Config(ConfigCommand::Init(args)) => config::execute_init(&args.path, args.force),
        Commands::Config(ConfigCommand::Show(args)) => config::execute_show(&args.config),
        Commands::Config(ConfigCommand::Validate(args)) => config::execute_validate(&args.config),
    }
}
