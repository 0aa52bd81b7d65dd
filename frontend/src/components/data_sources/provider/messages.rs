use common::settings::{Action, SettingsError};

pub enum Msg {
    /// Forward an action to the settings state machine.
    Dispatch(Action),
    Failed(SettingsError),
    /// Fetch every source again; the form is rebuilt from the fresh data.
    Refresh,
}
