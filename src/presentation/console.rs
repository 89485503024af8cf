// Line commands driving the terminal dashboard
use crate::domain::care_profile::{BabyStage, FOCUS_OPTIONS};
use clap::builder::{PossibleValue, PossibleValuesParser};
use clap::{CommandFactory, Parser, Subcommand};

/// One stdin line, parsed without a binary name
#[derive(Debug, Parser)]
#[command(
    name = "coach",
    no_binary_name = true,
    disable_help_subcommand = true,
    help_template = "commands:\n{subcommands}"
)]
struct ConsoleLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Set the baby's nickname
    Name {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },

    /// Set the age in weeks
    Age { weeks: u32 },

    /// Set the growth stage (newborn, infant, toddler)
    Stage { stage: BabyStage },

    /// Toggle a focus area
    Focus {
        #[arg(value_parser = focus_parser())]
        area: String,
    },

    /// Re-run the dashboard query
    Refresh,

    /// Edit the question
    Question {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },

    /// Send the question, optionally replacing it first
    Ask {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },

    /// Redraw the page
    Show,

    /// List the commands
    #[command(alias = "?")]
    Help,

    #[command(alias = "exit")]
    Quit,
}

fn focus_parser() -> PossibleValuesParser {
    PossibleValuesParser::new(
        FOCUS_OPTIONS
            .iter()
            .map(|option| PossibleValue::new(option.value).help(option.label)),
    )
}

/// Parse one input line. Blank lines yield `Ok(None)`; the command word is
/// case-insensitive.
pub fn parse_line(line: &str) -> Result<Option<Command>, clap::Error> {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Ok(None);
    };

    let args = std::iter::once(first.to_ascii_lowercase()).chain(words.map(str::to_string));
    ConsoleLine::try_parse_from(args).map(|parsed| Some(parsed.command))
}

pub fn help() -> String {
    ConsoleLine::command().render_help().to_string()
}

/// Free-text arguments arrive split on whitespace
pub fn join_words(words: Vec<String>) -> String {
    words.join(" ")
}
