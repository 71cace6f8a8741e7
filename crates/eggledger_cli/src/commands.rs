//! Line commands for driving the dashboard from a terminal.
//!
//! # Responsibility
//! - Parse one input line into a typed `Line`.
//! - Translate dashboard commands into the same `UiEvent`s a page would send.

use eggledger_core::{
    ActionKind, ClickTarget, ElementMarker, FormInput, FormSubmission, ModalKind, ModuleKind,
    UiEvent,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const USAGE: &str = "\
commands:
  open <module>                  open the create form
  cancel <module>                cancel the create form
  close <module> <modal>         close create|view|delete
  backdrop <module> <modal>      click outside create|view|delete
  view <module> <index>          show one record
  delete <module> <index>        ask to delete one record
  confirm <module>               confirm the pending delete
  submit <module> k=v; k=v ...   submit the create form
  search <module> [text]         filter the table
  stats <module>                 print stats as JSON
  help | quit
modules: customers, inventory, sales";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Event(ModuleKind, UiEvent),
    Stats(ModuleKind),
    Help,
    Quit,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    UnknownCommand(String),
    MissingArgument(&'static str),
    UnknownModule(String),
    UnknownModal(String),
    MalformedField(String),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand(value) => write!(f, "unknown command `{value}`; try `help`"),
            Self::MissingArgument(name) => write!(f, "missing argument <{name}>"),
            Self::UnknownModule(value) => {
                write!(f, "unknown module `{value}`; expected customers|inventory|sales")
            }
            Self::UnknownModal(value) => {
                write!(f, "unknown modal `{value}`; expected create|view|delete")
            }
            Self::MalformedField(value) => write!(f, "expected key=value, got `{value}`"),
        }
    }
}

impl Error for CommandError {}

pub fn parse_line(input: &str) -> Result<Line, CommandError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Line::Blank);
    }

    let (command, rest) = split_word(input);
    match command {
        "help" => return Ok(Line::Help),
        "quit" | "exit" => return Ok(Line::Quit),
        _ => {}
    }

    let (module, rest) = split_word(rest);
    if module.is_empty() {
        return Err(CommandError::MissingArgument("module"));
    }
    let module =
        ModuleKind::parse(module).ok_or_else(|| CommandError::UnknownModule(module.to_string()))?;

    let event = match command {
        "stats" => return Ok(Line::Stats(module)),
        "open" => click(ElementMarker::action(ActionKind::OpenCreate), None),
        "cancel" => click(
            ElementMarker::action(ActionKind::Cancel),
            Some(ModalKind::Create),
        ),
        "close" => {
            let modal = parse_modal(rest)?;
            click(ElementMarker::action(ActionKind::CloseModal), Some(modal))
        }
        "backdrop" => UiEvent::Click(ClickTarget::Backdrop(parse_modal(rest)?)),
        "view" => row_click(ActionKind::View, rest)?,
        "delete" => row_click(ActionKind::RequestDelete, rest)?,
        "confirm" => click(
            ElementMarker::action(ActionKind::ConfirmDelete),
            Some(ModalKind::DeleteConfirm),
        ),
        "submit" => UiEvent::Submit(FormSubmission::create(parse_fields(rest)?)),
        "search" => UiEvent::Search(rest.to_string()),
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    };
    Ok(Line::Event(module, event))
}

/// Parses `k=v; k=v` pairs. Values keep inner spaces.
pub fn parse_fields(input: &str) -> Result<FormInput, CommandError> {
    input
        .split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            }
            _ => Err(CommandError::MalformedField(pair.to_string())),
        })
        .collect()
}

fn split_word(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    }
}

fn parse_modal(input: &str) -> Result<ModalKind, CommandError> {
    let (modal, _) = split_word(input);
    if modal.is_empty() {
        return Err(CommandError::MissingArgument("modal"));
    }
    ModalKind::parse(modal).ok_or_else(|| CommandError::UnknownModal(modal.to_string()))
}

fn click(marker: ElementMarker, container: Option<ModalKind>) -> UiEvent {
    UiEvent::Click(ClickTarget::Element {
        path: vec![marker],
        container,
    })
}

/// Row buttons carry the raw index; the router decides whether it is valid.
fn row_click(action: ActionKind, input: &str) -> Result<UiEvent, CommandError> {
    let (index, _) = split_word(input);
    if index.is_empty() {
        return Err(CommandError::MissingArgument("index"));
    }
    Ok(click(
        ElementMarker {
            action: Some(action.as_str().to_string()),
            index: Some(index.to_string()),
        },
        None,
    ))
}

#[cfg(test)]
mod tests {
    use super::{parse_fields, parse_line, CommandError, Line};
    use eggledger_core::{
        route, ClickTarget, Command, FormInput, ModalKind, ModuleKind, UiEvent,
    };

    fn routed(input: &str) -> (ModuleKind, Command) {
        match parse_line(input).expect("line parses") {
            Line::Event(module, event) => {
                let command = route(&event)
                    .expect("event routes")
                    .expect("event carries an action");
                (module, command)
            }
            other => panic!("expected an event, got {other:?}"),
        }
    }

    #[test]
    fn modal_commands_route_like_page_clicks() {
        assert_eq!(routed("open sales"), (ModuleKind::Sales, Command::OpenCreate));
        assert_eq!(
            routed("cancel customers"),
            (ModuleKind::Customers, Command::Close(ModalKind::Create))
        );
        assert_eq!(
            routed("close inventory view"),
            (ModuleKind::Inventory, Command::Close(ModalKind::View))
        );
        assert_eq!(
            routed("view customer 2"),
            (ModuleKind::Customers, Command::View(2))
        );
        assert_eq!(
            routed("delete sale 0"),
            (ModuleKind::Sales, Command::RequestDelete(0))
        );
        assert_eq!(
            routed("confirm sales"),
            (ModuleKind::Sales, Command::ConfirmDelete)
        );
    }

    #[test]
    fn backdrop_names_the_modal() {
        assert_eq!(
            parse_line("backdrop sales delete"),
            Ok(Line::Event(
                ModuleKind::Sales,
                UiEvent::Click(ClickTarget::Backdrop(ModalKind::DeleteConfirm))
            ))
        );
    }

    #[test]
    fn submit_reads_key_value_pairs() {
        let (module, command) =
            routed("submit customers customer_name=Achieng Otieno; customer_phone=0712 345 678");
        assert_eq!(module, ModuleKind::Customers);
        assert_eq!(
            command,
            Command::SubmitCreate(
                FormInput::new()
                    .with("customer_name", "Achieng Otieno")
                    .with("customer_phone", "0712 345 678")
            )
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(
            parse_line("open barn"),
            Err(CommandError::UnknownModule("barn".to_string()))
        );
        assert_eq!(parse_line("view"), Err(CommandError::MissingArgument("module")));
        assert_eq!(
            parse_line("view sales"),
            Err(CommandError::MissingArgument("index"))
        );
        assert_eq!(
            parse_line("close sales drawer"),
            Err(CommandError::UnknownModal("drawer".to_string()))
        );
        assert_eq!(
            parse_fields("customer_name"),
            Err(CommandError::MalformedField("customer_name".to_string()))
        );
    }

    #[test]
    fn control_lines() {
        assert_eq!(parse_line("   "), Ok(Line::Blank));
        assert_eq!(parse_line("help"), Ok(Line::Help));
        assert_eq!(parse_line("quit"), Ok(Line::Quit));
        assert_eq!(parse_line("stats inventory"), Ok(Line::Stats(ModuleKind::Inventory)));
    }
}
