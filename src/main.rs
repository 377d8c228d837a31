use color_eyre::Result;
use clap::Parser;
use tagfield::{Config, Profile, cli::{self, Cli, Commands}, logging, tui, utils};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    let cli = Cli::parse();

    // --dev selects a separate config and log location
    let profile = if cli.dev {
        Profile::Dev
    } else {
        Profile::Prod
    };

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from_path(&utils::expand_path(path))?,
        None => Config::load_with_profile(profile)?,
    };

    logging::init(&logging::log_path(profile), &config.log_level)?;
    tracing::debug!(?profile, "configuration loaded");

    let command = cli.command.unwrap_or(Commands::Tui {
        value: None,
        id: "tags".to_string(),
        placeholder: None,
    });

    match command {
        Commands::Tui { value, id, placeholder } => {
            let field = cli::build_field(&config, value, placeholder);
            let app = tui::App::new(config, field, &id);
            let app = tui::run_event_loop(app)?;
            // The submitted form value
            println!("{}", app.controller.field().value());
        }
        Commands::Parse { text, json } => {
            cli::handle_parse(text, json)?;
        }
    }

    Ok(())
}
