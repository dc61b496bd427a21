use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    ClearScreen,
    Error(String),
    Submit,
    /// Outcome of a submit: number of fields with errors.
    Submitted(usize),
    /// Form component switched between navigation and editing.
    EditMode(bool),
}
