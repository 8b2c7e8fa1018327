/// The single dismissible error line shown above the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Banner {
    message: Option<String>,
}

impl Banner {
    /// Replaces whatever was showing.
    pub fn show(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn dismiss(&mut self) {
        self.message = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_showing(&self) -> bool {
        self.message.is_some()
    }
}
