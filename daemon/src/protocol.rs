use serde::{Deserialize, Serialize};
use typeahead_core::{Candidate, InputEvent, NavKey, View};

use crate::widget::WidgetOutput;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Change { text: String },
    Focus,
    Blur,
    Key { key: NavKey },
    Hover { index: usize },
    Click { index: usize },
    SetChosen {
        #[serde(default)]
        chosen: Vec<Candidate>,
    },
}

#[derive(Debug, PartialEq)]
pub enum Command {
    Ui(InputEvent),
    SetChosen(Vec<Candidate>),
}

impl ClientMessage {
    pub fn into_command(self) -> Command {
        match self {
            ClientMessage::Change { text } => Command::Ui(InputEvent::Change(text)),
            ClientMessage::Focus => Command::Ui(InputEvent::Focus),
            ClientMessage::Blur => Command::Ui(InputEvent::Blur),
            ClientMessage::Key { key } => Command::Ui(InputEvent::Key(key)),
            ClientMessage::Hover { index } => Command::Ui(InputEvent::Hover(index)),
            ClientMessage::Click { index } => Command::Ui(InputEvent::Click(index)),
            ClientMessage::SetChosen { chosen } => Command::SetChosen(chosen),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Render(View),
    Pick { candidate: Candidate },
    ReleaseFocus,
    Error(ErrorResponse),
}

impl From<WidgetOutput> for ServerMessage {
    fn from(output: WidgetOutput) -> Self {
        match output {
            WidgetOutput::Render(view) => ServerMessage::Render(view),
            WidgetOutput::Picked(candidate) => ServerMessage::Pick { candidate },
            WidgetOutput::ReleaseFocus => ServerMessage::ReleaseFocus,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidRequest,
}
