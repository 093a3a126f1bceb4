use crate::db::connection::SessionSettings;

/// The connection parameters in effect plus whether a live handle exists.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub settings: SessionSettings,
    connected: bool,
}

impl Session {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            connected: false,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn mark_connected(&mut self) {
        self.connected = true;
    }

    pub fn mark_disconnected(&mut self) {
        self.connected = false;
    }

    /// Rows shown for a tabular result; `None` means no limit.
    pub fn display_limit(&self) -> Option<usize> {
        usize::try_from(self.settings.max_rows)
            .ok()
            .filter(|rows| *rows > 0)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
