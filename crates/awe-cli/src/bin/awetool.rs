use clap::{Parser, Subcommand};

use awe_cli::commands::type_ops;

#[derive(Parser)]
#[command(name = "awetool", about = "Keyboard session diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a keystroke script through a session (`<` = backspace, `^` = shift)
    Type {
        /// Path to the binary dictionary
        dict_file: String,
        /// Keys to type
        keys: String,
        /// Settings TOML (optional)
        #[arg(long)]
        settings: Option<String>,
        /// User dictionary file (optional)
        #[arg(long)]
        user_dict: Option<String>,
        /// Use table input mode
        #[arg(long)]
        table: bool,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Type {
            dict_file,
            keys,
            settings,
            user_dict,
            table,
            json,
        } => type_ops::type_cmd(
            &dict_file,
            &keys,
            settings.as_deref(),
            user_dict.as_deref(),
            table,
            json,
        ),
    }
}
