use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    Error(String),
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    /// Open the editor popup for the focused field
    Edit,
    Save,
    Submit,
    Update,
    ClosePopup,
    PopupResult(PopupResult),
}

/// Outcome delivered by an editor popup back to the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupResult {
    InputSubmitted(String),
    ChoiceSelected(usize),
    Cancelled,
}
