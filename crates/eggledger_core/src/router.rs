//! Typed UI events and action-marker dispatch.
//!
//! # Responsibility
//! - Resolve a click to the nearest element carrying an action marker and
//!   parse that marker into a closed `ActionKind`.
//! - Turn events into `Command`s the module executes.
//!
//! # Invariants
//! - Marker ids are exact lowercase strings; anything else is rejected.
//! - A click on a modal backdrop closes that modal.
//! - A close affordance closes the modal that contains it.

use crate::modal::ModalKind;
use crate::validate::FormInput;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Marker id for opening the create form.
pub const ACTION_OPEN_CREATE: &str = "open-create";
/// Marker id for a close affordance inside any modal.
pub const ACTION_CLOSE_MODAL: &str = "close-modal";
/// Marker id for the create form's cancel button.
pub const ACTION_CANCEL: &str = "cancel";
/// Marker id for a row's view button.
pub const ACTION_VIEW: &str = "view";
/// Marker id for a row's delete button.
pub const ACTION_REQUEST_DELETE: &str = "delete";
/// Marker id for the confirmation modal's delete button.
pub const ACTION_CONFIRM_DELETE: &str = "confirm-delete";
/// Marker id carried by the create form itself.
pub const ACTION_SUBMIT_CREATE: &str = "submit-create";

const SUPPORTED_ACTION_STRINGS: &[&str] = &[
    ACTION_OPEN_CREATE,
    ACTION_CLOSE_MODAL,
    ACTION_CANCEL,
    ACTION_VIEW,
    ACTION_REQUEST_DELETE,
    ACTION_CONFIRM_DELETE,
    ACTION_SUBMIT_CREATE,
];

/// Returns every recognized action marker id.
pub fn supported_action_strings() -> &'static [&'static str] {
    SUPPORTED_ACTION_STRINGS
}

/// Closed set of actions a module reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    OpenCreate,
    CloseModal,
    Cancel,
    View,
    RequestDelete,
    ConfirmDelete,
    SubmitCreate,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenCreate => ACTION_OPEN_CREATE,
            Self::CloseModal => ACTION_CLOSE_MODAL,
            Self::Cancel => ACTION_CANCEL,
            Self::View => ACTION_VIEW,
            Self::RequestDelete => ACTION_REQUEST_DELETE,
            Self::ConfirmDelete => ACTION_CONFIRM_DELETE,
            Self::SubmitCreate => ACTION_SUBMIT_CREATE,
        }
    }
}

/// Parses one action marker.
pub fn parse_action_kind(value: &str) -> Result<ActionKind, RouteError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(RouteError::EmptyAction);
    }

    match normalized {
        ACTION_OPEN_CREATE => Ok(ActionKind::OpenCreate),
        ACTION_CLOSE_MODAL => Ok(ActionKind::CloseModal),
        ACTION_CANCEL => Ok(ActionKind::Cancel),
        ACTION_VIEW => Ok(ActionKind::View),
        ACTION_REQUEST_DELETE => Ok(ActionKind::RequestDelete),
        ACTION_CONFIRM_DELETE => Ok(ActionKind::ConfirmDelete),
        ACTION_SUBMIT_CREATE => Ok(ActionKind::SubmitCreate),
        other => Err(RouteError::UnknownAction(other.to_string())),
    }
}

/// Declarative attributes on one element of the clicked path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementMarker {
    /// `data-action`
    pub action: Option<String>,
    /// `data-index`
    pub index: Option<String>,
}

impl ElementMarker {
    /// Element with no markers (plain text, icons, wrappers).
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn action(action: ActionKind) -> Self {
        Self {
            action: Some(action.as_str().to_string()),
            index: None,
        }
    }

    pub fn row_action(action: ActionKind, index: usize) -> Self {
        Self {
            action: Some(action.as_str().to_string()),
            index: Some(index.to_string()),
        }
    }
}

/// What a click landed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickTarget {
    /// An element inside the page; `path` runs from the clicked node out to
    /// the root, `container` is the modal enclosing it, if any.
    Element {
        path: Vec<ElementMarker>,
        container: Option<ModalKind>,
    },
    /// The backdrop of an open modal, outside its content area.
    Backdrop(ModalKind),
}

impl ClickTarget {
    /// Click directly on a marked element outside any modal.
    pub fn marked(marker: ElementMarker) -> Self {
        Self::Element {
            path: vec![marker],
            container: None,
        }
    }

    /// Click directly on a marked element inside `modal`.
    pub fn in_modal(modal: ModalKind, marker: ElementMarker) -> Self {
        Self::Element {
            path: vec![marker],
            container: Some(modal),
        }
    }
}

/// Submitted form together with the marker on the form element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSubmission {
    pub action: String,
    pub fields: FormInput,
}

impl FormSubmission {
    pub fn create(fields: FormInput) -> Self {
        Self {
            action: ACTION_SUBMIT_CREATE.to_string(),
            fields,
        }
    }
}

/// Events a module receives from its host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiEvent {
    Click(ClickTarget),
    Submit(FormSubmission),
    /// Search box input; re-renders the matching rows.
    Search(String),
}

/// Resolved operation for a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    OpenCreate,
    Close(ModalKind),
    View(usize),
    RequestDelete(usize),
    ConfirmDelete,
    SubmitCreate(FormInput),
    Filter(String),
}

/// Reasons an event could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    EmptyAction,
    UnknownAction(String),
    MissingIndex(ActionKind),
    InvalidIndex { action: ActionKind, raw: String },
    /// Marker is valid but not meaningful for this event class.
    MisplacedAction { action: ActionKind, event: &'static str },
}

impl Display for RouteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAction => write!(f, "action marker must not be empty"),
            Self::UnknownAction(value) => write!(f, "action marker is unsupported: {value}"),
            Self::MissingIndex(action) => {
                write!(f, "action `{}` requires a record index", action.as_str())
            }
            Self::InvalidIndex { action, raw } => write!(
                f,
                "action `{}` carries an invalid record index `{raw}`",
                action.as_str()
            ),
            Self::MisplacedAction { action, event } => write!(
                f,
                "action `{}` is not valid for {event} events",
                action.as_str()
            ),
        }
    }
}

impl Error for RouteError {}

/// Maps one event to a command. `Ok(None)` means the event carries no
/// action and is ignored.
pub fn route(event: &UiEvent) -> Result<Option<Command>, RouteError> {
    match event {
        UiEvent::Click(ClickTarget::Backdrop(modal)) => Ok(Some(Command::Close(*modal))),
        UiEvent::Click(ClickTarget::Element { path, container }) => {
            route_click(path, *container)
        }
        UiEvent::Submit(submission) => match parse_action_kind(&submission.action)? {
            ActionKind::SubmitCreate => {
                Ok(Some(Command::SubmitCreate(submission.fields.clone())))
            }
            other => Err(RouteError::MisplacedAction {
                action: other,
                event: "submit",
            }),
        },
        UiEvent::Search(query) => Ok(Some(Command::Filter(query.clone()))),
    }
}

fn route_click(
    path: &[ElementMarker],
    container: Option<ModalKind>,
) -> Result<Option<Command>, RouteError> {
    let Some(marker) = path.iter().find(|marker| marker.action.is_some()) else {
        return Ok(None);
    };
    let action = parse_action_kind(marker.action.as_deref().unwrap_or_default())?;

    let command = match action {
        ActionKind::OpenCreate => Command::OpenCreate,
        ActionKind::CloseModal => Command::Close(container.unwrap_or(ModalKind::Create)),
        ActionKind::Cancel => Command::Close(ModalKind::Create),
        ActionKind::View => Command::View(parse_index(action, marker.index.as_deref())?),
        ActionKind::RequestDelete => {
            Command::RequestDelete(parse_index(action, marker.index.as_deref())?)
        }
        ActionKind::ConfirmDelete => Command::ConfirmDelete,
        ActionKind::SubmitCreate => {
            return Err(RouteError::MisplacedAction {
                action,
                event: "click",
            })
        }
    };
    Ok(Some(command))
}

fn parse_index(action: ActionKind, raw: Option<&str>) -> Result<usize, RouteError> {
    let raw = raw.ok_or(RouteError::MissingIndex(action))?;
    raw.trim()
        .parse::<usize>()
        .map_err(|_| RouteError::InvalidIndex {
            action,
            raw: raw.to_string(),
        })
}
