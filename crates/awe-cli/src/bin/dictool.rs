use std::path::Path;

use clap::{Parser, Subcommand};

use awe_cli::commands::{config_ops, dict_ops, user_dict_ops};

#[derive(Parser)]
#[command(name = "dictool", about = "Word dictionary build tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a binary dictionary from a .cin table or a TSV word list
    Compile {
        /// Input file
        input_file: String,
        /// Output file
        output_file: String,
        /// Input format (cin or tsv; guessed from the extension if omitted)
        #[arg(long)]
        format: Option<String>,
    },
    /// Show binary or user dictionary info (detected by magic bytes)
    Info {
        /// Dictionary file
        file: String,
    },
    /// Prefix search in a binary dictionary
    Lookup {
        /// Dictionary file
        dict_file: String,
        /// Prefix to search for
        prefix: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Manage user dictionary
    UserDict {
        /// User dictionary file (default: ~/.local/share/awe/user_dict.awud)
        #[arg(long)]
        file: Option<String>,
        #[command(subcommand)]
        action: UserDictAction,
    },
}

#[derive(Subcommand)]
enum UserDictAction {
    /// Add a word
    Add {
        word: String,
        /// Frequency (default: 128)
        #[arg(long)]
        frequency: Option<u32>,
    },
    /// Remove a word
    Remove { word: String },
    /// List all registered words
    List,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Compile {
            input_file,
            output_file,
            format,
        } => dict_ops::compile(&input_file, &output_file, format.as_deref()),
        Command::Info { file } => dict_ops::info(&file),
        Command::Lookup { dict_file, prefix } => dict_ops::lookup(&dict_file, &prefix),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
        Command::UserDict { file, action } => {
            let path_str = file.unwrap_or_else(user_dict_ops::default_user_dict_path);
            let path = Path::new(&path_str);
            match action {
                UserDictAction::Add { word, frequency } => {
                    user_dict_ops::user_dict_add(path, &word, frequency)
                }
                UserDictAction::Remove { word } => user_dict_ops::user_dict_remove(path, &word),
                UserDictAction::List => user_dict_ops::user_dict_list(path),
            }
        }
    }
}
