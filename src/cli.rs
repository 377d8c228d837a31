use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::controller::TagController;
use crate::field::FormField;
use crate::Config;

#[derive(Parser)]
#[command(name = "tagfield")]
#[command(about = "Edit a comma-separated field as removable tags, in the terminal")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (uses separate dev config and log)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive tag editor (default if no subcommand)
    Tui {
        /// Initial field value, e.g. "red,blue"
        #[arg(long)]
        value: Option<String>,
        /// Identifier of the control; the input surface becomes "<id>-editable"
        #[arg(long, default_value = "tags")]
        id: String,
        /// Placeholder shown while the input is empty
        #[arg(long)]
        placeholder: Option<String>,
    },
    /// Normalize comma-separated text the way the editor would
    Parse {
        /// Raw text
        text: String,
        /// Print the tags as a JSON array instead of the field value
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to serialize tags: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// The form field the editor takes over: the configured one, with command-line overrides
pub fn build_field(config: &Config, value: Option<String>, placeholder: Option<String>) -> FormField {
    let mut field = config.field.to_form_field();
    if let Some(value) = value {
        field.set_value(value);
    }
    if let Some(placeholder) = placeholder {
        field = field.with_attribute("placeholder", placeholder);
    }
    field
}

/// Run `text` through the add path and render the result
pub fn parse_output(text: &str, json: bool) -> Result<String, CliError> {
    let controller = TagController::new(FormField::new("tags").with_value(text), "tags");
    if json {
        Ok(serde_json::to_string(&controller.value())?)
    } else {
        Ok(controller.field().value().to_string())
    }
}

/// Handle the parse command
pub fn handle_parse(text: String, json: bool) -> Result<(), CliError> {
    println!("{}", parse_output(&text, json)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_normalizes() {
        assert_eq!(parse_output(" b, a ,,b ", false).unwrap(), "b,a");
        assert_eq!(parse_output(" b, a ,,b ", true).unwrap(), r#"["b","a"]"#);
        assert_eq!(parse_output("", true).unwrap(), "[]");
    }

    #[test]
    fn tui_args_parse() {
        let cli = Cli::try_parse_from(["tagfield", "--dev", "tui", "--value", "red,blue"]).unwrap();
        assert!(cli.dev);
        match cli.command {
            Some(Commands::Tui { value, id, placeholder }) => {
                assert_eq!(value.as_deref(), Some("red,blue"));
                assert_eq!(id, "tags");
                assert!(placeholder.is_none());
            }
            _ => panic!("expected tui command"),
        }
    }

    #[test]
    fn overrides_apply_to_configured_field() {
        let config = Config::default();
        let field = build_field(&config, Some("x".to_string()), Some("Type".to_string()));
        assert_eq!(field.value(), "x");
        assert_eq!(field.attribute("placeholder"), Some("Type"));
        assert_eq!(field.attribute("accesskey"), Some("t"));
    }
}
