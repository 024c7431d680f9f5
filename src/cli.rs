//! # Command-Line Interface Module
//!
//! Clap derive definitions for `muse-graph`. The CLI stands in for the
//! preference form: it collects a name and `GENRE=VALUE` ratings and prints
//! the results.
//!
//! ## Commands
//!
//! - `recommend`: Add a new user and run the full recommendation pipeline
//! - `similar`: Rank seeded users by similarity to some ratings
//! - `songs`: Recommend songs for some ratings
//! - `path`: Musical path between two users or genres
//! - `groups`: Groups of seeded users with identical taste
//! - `graph`: Show the seeded genres, users and edges
//!
//! ## Examples
//!
//! ```bash
//! muse-graph recommend Nuevo -p Pop=0.8 -p Rock=0.6
//! muse-graph path Adriana Juan
//! muse-graph --reference Marianna recommend Eva -p Jazz=1
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "muse-graph")]
#[command(about = "Muse Graph: genre-graph music recommendations, taste paths & identical-taste groups")]
#[command(version)]
pub struct Args {
    /// JSON config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "MUSE_GRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Existing user new users are given a musical path to
    #[arg(long, global = true, env = "MUSE_GRAPH_REFERENCE")]
    pub reference: Option<String>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new user and show every recommendation for them
    ///
    /// Genres left out are rated 0, like an untouched form field.
    Recommend {
        /// Name of the new user
        name: String,

        /// A genre rating between 0 and 1, e.g. `Pop=0.8`
        #[arg(short = 'p', long = "pref", value_parser = parse_preference)]
        preferences: Vec<(String, String)>,

        /// Print the result as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Rank existing users by similarity to the given ratings
    Similar {
        /// Name to exclude from the ranking
        name: String,

        /// A genre rating between 0 and 1, e.g. `Pop=0.8`
        #[arg(short = 'p', long = "pref", value_parser = parse_preference)]
        preferences: Vec<(String, String)>,
    },

    /// Recommend songs from the two highest-rated genres
    Songs {
        /// A genre rating between 0 and 1, e.g. `Pop=0.8`
        #[arg(short = 'p', long = "pref", value_parser = parse_preference)]
        preferences: Vec<(String, String)>,
    },

    /// Find the cheapest musical path between two users or genres
    Path {
        /// Starting user or genre
        from: String,
        /// Destination user or genre
        to: String,
    },

    /// List groups of users with identical taste
    Groups,

    /// Show the genres, users and preference edges of the graph
    Graph,

    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Splits a `GENRE=VALUE` argument. The value is validated later, together
/// with the rest of the submission.
///
/// # Errors
///
/// Returns a message when there is no `=` or the genre is empty.
pub fn parse_preference(arg: &str) -> Result<(String, String), String> {
    let (genre, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected GENRE=VALUE, got `{arg}'"))?;

    let genre = genre.trim();
    if genre.is_empty() {
        return Err(format!("missing genre in `{arg}'"));
    }
    Ok((genre.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_preference() {
        assert_eq!(parse_preference("Pop=0.8"), Ok(("Pop".to_string(), "0.8".to_string())));
        assert_eq!(parse_preference(" Hip-Hop =1"), Ok(("Hip-Hop".to_string(), "1".to_string())));
        assert_eq!(parse_preference("Jazz="), Ok(("Jazz".to_string(), String::new())));
        assert!(parse_preference("Pop").is_err());
        assert!(parse_preference("=0.5").is_err());
    }

    #[test]
    fn test_recommend_arguments() {
        let args = Args::try_parse_from([
            "muse-graph", "--reference", "Marianna", "recommend", "Nuevo", "-p", "Pop=0.8", "--pref", "Rock=0.6",
        ])
        .unwrap();

        assert_eq!(args.reference.as_deref(), Some("Marianna"));
        match args.command {
            Command::Recommend { name, preferences, json } => {
                assert_eq!(name, "Nuevo");
                assert_eq!(preferences.len(), 2);
                assert_eq!(preferences[1], ("Rock".to_string(), "0.6".to_string()));
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
