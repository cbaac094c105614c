//! Actions bubbled from components to the application loop

/// Commands a component can hand back to the app
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Stop the update loop and exit
    Quit,
    /// A row was selected with enter; carries the row's level field
    Select(String),
    /// Periodic tick
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
}
