//! The closed set of navigation commands a device accepts.

/// A navigation action to send to the device.
///
/// The set is fixed; keys outside the session key table never produce a
/// command, so there is no catch-all variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCommand {
    /// Move focus right.
    Right,
    /// Move focus left.
    Left,
    /// Move focus up.
    Up,
    /// Move focus down.
    Down,
    /// Activate the focused item.
    Select,
    /// Go back one screen.
    Back,
    /// Open the context menu.
    Menu,
}

impl RemoteCommand {
    /// All commands, in a stable order.
    pub const ALL: [Self; 7] = [
        Self::Right,
        Self::Left,
        Self::Up,
        Self::Down,
        Self::Select,
        Self::Back,
        Self::Menu,
    ];

    /// Returns the JSON-RPC method name for this command.
    #[must_use]
    pub const fn method(self) -> &'static str {
        match self {
            Self::Right => "Input.Right",
            Self::Left => "Input.Left",
            Self::Up => "Input.Up",
            Self::Down => "Input.Down",
            Self::Select => "Input.Select",
            Self::Back => "Input.Back",
            Self::Menu => "Input.ContextMenu",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_command_maps_to_its_input_method() {
        let expected = [
            (RemoteCommand::Right, "Input.Right"),
            (RemoteCommand::Left, "Input.Left"),
            (RemoteCommand::Up, "Input.Up"),
            (RemoteCommand::Down, "Input.Down"),
            (RemoteCommand::Select, "Input.Select"),
            (RemoteCommand::Back, "Input.Back"),
            (RemoteCommand::Menu, "Input.ContextMenu"),
        ];
        for (command, method) in expected {
            assert_eq!(command.method(), method);
        }
    }

    #[test]
    fn all_covers_the_full_set_without_duplicates() {
        let mut methods: Vec<_> = RemoteCommand::ALL.iter().map(|c| c.method()).collect();
        methods.sort_unstable();
        methods.dedup();
        assert_eq!(methods.len(), 7);
    }
}
