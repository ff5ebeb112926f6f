/// Engine key codes delivered to the host. Printable keys carry their
/// lowercase ASCII byte; everything else the window layer cannot name maps
/// to `Other` with the platform scancode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Tab,
    Backspace,
    Shift,
    Ctrl,
    Alt,
    Up,
    Down,
    Left,
    Right,
    Function(u8),
    Char(u8),
    Mouse1,
    Mouse2,
    Mouse3,
    Other(u16),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_keys_compare_by_byte() {
        assert_eq!(Key::Char(b'a'), Key::Char(b'a'));
        assert_ne!(Key::Char(b'a'), Key::Char(b'b'));
    }
}
