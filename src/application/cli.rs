#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use dialoguer::Password;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use super::App;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::help_text;
use crate::domain::models::ChatMode;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

/// Reads a flag value, prompting for it when it was not passed.
fn arg_or_prompt(matches: &ArgMatches, name: &str, prompt: &str) -> Result<String> {
    if let Some(val) = matches.get_one::<String>(name) {
        return Ok(val.to_string());
    }

    let val = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;

    return Ok(val);
}

fn password_or_prompt(matches: &ArgMatches) -> Result<String> {
    if let Some(val) = matches.get_one::<String>("password") {
        return Ok(val.to_string());
    }

    let val = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .allow_empty_password(true)
        .interact()?;

    return Ok(val);
}

fn arg_email() -> Arg {
    return Arg::new("email")
        .short('e')
        .long("email")
        .num_args(1)
        .help("Account email. Prompted for when omitted.");
}

fn arg_password() -> Arg {
    return Arg::new("password")
        .short('p')
        .long("password")
        .env("PDFCHAT_PASSWORD")
        .hide_env_values(true)
        .num_args(1)
        .help("Account password. Prompted for when omitted.");
}

fn arg_file() -> Arg {
    return Arg::new("file")
        .help("Path to a PDF document.")
        .value_parser(value_parser!(path::PathBuf))
        .required(true);
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_signup() -> Command {
    return Command::new("signup")
        .about("Create a new account.")
        .arg(
            Arg::new("user-name")
                .short('u')
                .long("user-name")
                .num_args(1)
                .help("Display name for the account. Prompted for when omitted."),
        )
        .arg(arg_email())
        .arg(arg_password());
}

fn subcommand_login() -> Command {
    return Command::new("login")
        .about("Log in and store the session token.")
        .arg(arg_email())
        .arg(arg_password());
}

fn subcommand_chat() -> Command {
    return Command::new("chat")
        .about("Ask questions about a PDF document.")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .help("Path to a PDF document.")
                .value_parser(value_parser!(path::PathBuf))
                .required(true),
        );
}

fn subcommand_history() -> Command {
    return Command::new("history")
        .about("List previous chat sessions, newest first as returned by the server.")
        .arg(
            Arg::new("messages")
                .short('m')
                .long("messages")
                .help("Print every question and answer of each session.")
                .action(ArgAction::SetTrue),
        );
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("pdfchat")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_signup())
        .subcommand(subcommand_login())
        .subcommand(Command::new("logout").about("Forget the stored session token."))
        .subcommand(Command::new("whoami").about("Show the profile of the logged in user."))
        .subcommand(
            Command::new("upload")
                .about("Upload a PDF document.")
                .arg(arg_file()),
        )
        .subcommand(subcommand_chat())
        .subcommand(subcommand_history())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .arg(
            Arg::new(ConfigKey::ApiURL.to_string())
                .long(ConfigKey::ApiURL.to_string())
                .env("PDFCHAT_API_URL")
                .num_args(1)
                .help(format!("Base URL of the document Q&A API. [default: {}]", Config::default(ConfigKey::ApiURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ChatMode.to_string())
                .long(ConfigKey::ChatMode.to_string())
                .env("PDFCHAT_CHAT_MODE")
                .num_args(1)
                .help(format!("How questions reach the API: with the document attached, or after indexing it once. [default: {}]", Config::default(ConfigKey::ChatMode)))
                .value_parser(PossibleValuesParser::new(ChatMode::VARIANTS))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("PDFCHAT_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::StorageFile.to_string())
                .long(ConfigKey::StorageFile.to_string())
                .env("PDFCHAT_STORAGE_FILE")
                .num_args(1)
                .help(format!("Path to the file holding the session token. [default: {}]", Config::default(ConfigKey::StorageFile)))
                .global(true),
        );
}

/// Parses arguments and runs the matching command. Returns whether the
/// command succeeded.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut cmd = build();
                print_completions(completions, &mut cmd);
            }
            return Ok(true);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(true);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(true);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(true);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(true);
            }
        },
        Some((_, subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        None => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    let app = App::from_config()?;
    return run(&app, &matches).await;
}

async fn run(app: &App, matches: &ArgMatches) -> Result<bool> {
    match matches.subcommand() {
        Some(("signup", subcmd_matches)) => {
            let user_name = arg_or_prompt(subcmd_matches, "user-name", "User name")?;
            let email = arg_or_prompt(subcmd_matches, "email", "Email")?;
            let password = password_or_prompt(subcmd_matches)?;
            return app.signup(&user_name, &email, &password).await;
        }
        Some(("login", subcmd_matches)) => {
            let email = arg_or_prompt(subcmd_matches, "email", "Email")?;
            let password = password_or_prompt(subcmd_matches)?;
            return app.login(&email, &password).await;
        }
        Some(("logout", _)) => {
            app.logout();
            return Ok(true);
        }
        Some(("whoami", _)) => {
            return app.whoami().await;
        }
        Some(("upload", subcmd_matches)) => {
            let file = required_path(subcmd_matches)?;
            return app.upload(&file).await;
        }
        Some(("chat", subcmd_matches)) => {
            let file = required_path(subcmd_matches)?;
            return app.chat(&file).await;
        }
        Some(("history", subcmd_matches)) => {
            let show_messages = subcmd_matches.get_flag("messages");
            return app.history(show_messages).await;
        }
        _ => {
            let route = app.landing();
            println!("Starting at {route}. Run `pdfchat --help` for every command.");
            return Ok(true);
        }
    }
}

fn required_path(matches: &ArgMatches) -> Result<path::PathBuf> {
    match matches.get_one::<path::PathBuf>("file") {
        Some(file) => return Ok(file.to_path_buf()),
        None => bail!("A file path is required"),
    }
}
