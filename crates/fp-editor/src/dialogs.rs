//! Blocking user dialogs provided by the host UI.

/// Alert and confirmation prompts. The browser host maps these onto
/// `window.alert` / `window.confirm`; headless hosts can script them.
pub trait Dialogs {
    /// Show a message and wait for acknowledgement.
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question. `true` means the user confirmed.
    fn confirm(&mut self, message: &str) -> bool;
}

/// Headless dialogs: answers every confirmation with a fixed value and
/// records what was shown.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDialogs {
    pub confirm_answer: bool,
    pub alerts: Vec<String>,
    pub confirmations: Vec<String>,
}

impl ScriptedDialogs {
    /// Dialogs that confirm everything.
    pub fn accepting() -> Self {
        Self {
            confirm_answer: true,
            ..Self::default()
        }
    }

    /// Dialogs that decline every confirmation.
    pub fn declining() -> Self {
        Self::default()
    }
}

impl Dialogs for ScriptedDialogs {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirmations.push(message.to_string());
        self.confirm_answer
    }
}
