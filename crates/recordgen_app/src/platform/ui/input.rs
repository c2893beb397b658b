use recordgen_core::{Msg, Region, SpecError};
use thiserror::Error;

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Msg(Msg),
    /// Scroll by a number of lines; `None` scrolls one screen.
    Scroll(Option<i64>),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown command {0:?}, type `help` for a list")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("invalid scroll amount {0:?}")]
    BadScroll(String),
    #[error(transparent)]
    Spec(#[from] SpecError),
}

pub fn parse_command(line: &str) -> Result<Option<Input>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let input = match command.to_ascii_lowercase().as_str() {
        "region" => {
            if rest.is_empty() {
                return Err(InputError::MissingArgument("region"));
            }
            let region: Region = rest.parse()?;
            Input::Msg(Msg::RegionSelected(region))
        }
        "errors" => {
            if rest.is_empty() {
                return Err(InputError::MissingArgument("errors"));
            }
            Input::Msg(Msg::ErrorCountChanged(rest.to_string()))
        }
        // The seed keeps inner whitespace as typed.
        "seed" => Input::Msg(Msg::SeedChanged(rest.to_string())),
        "random" => Input::Msg(Msg::GenerateRandomSeedClicked),
        "more" => Input::Msg(Msg::NextPageRequested),
        "export" => Input::Msg(Msg::ExportClicked),
        "scroll" => {
            if rest.is_empty() {
                Input::Scroll(None)
            } else {
                let lines = rest
                    .parse::<i64>()
                    .map_err(|_| InputError::BadScroll(rest.to_string()))?;
                Input::Scroll(Some(lines))
            }
        }
        "show" => Input::Show,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        other => return Err(InputError::Unknown(other.to_string())),
    };
    Ok(Some(input))
}
