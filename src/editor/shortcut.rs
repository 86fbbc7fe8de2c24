//! Keyboard shortcuts of the edit dialog, independent of any GUI toolkit.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    /// Cmd on macOS.
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        meta: false,
        alt: false,
        shift: false,
    };
    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };
    pub const META: Self = Self {
        meta: true,
        ..Self::NONE
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogCommand {
    Save,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Mac,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Mac
        } else {
            Platform::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub key: Key,
    pub modifiers: Modifiers,
    pub command: DialogCommand,
}

/// Bindings registered while the dialog exists. Modifiers must match exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutSet {
    bindings: Vec<Shortcut>,
}

impl ShortcutSet {
    /// Ctrl+Enter saves (and Cmd+Enter on macOS), Escape cancels.
    pub fn for_platform(platform: Platform) -> Self {
        let mut bindings = vec![Shortcut {
            key: Key::Enter,
            modifiers: Modifiers::CTRL,
            command: DialogCommand::Save,
        }];
        if platform == Platform::Mac {
            bindings.push(Shortcut {
                key: Key::Enter,
                modifiers: Modifiers::META,
                command: DialogCommand::Save,
            });
        }
        bindings.push(Shortcut {
            key: Key::Escape,
            modifiers: Modifiers::NONE,
            command: DialogCommand::Cancel,
        });
        Self { bindings }
    }

    pub fn resolve(&self, press: KeyPress) -> Option<DialogCommand> {
        self.bindings
            .iter()
            .find(|s| s.key == press.key && s.modifiers == press.modifiers)
            .map(|s| s.command)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shortcut> {
        self.bindings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{DialogCommand, Key, KeyPress, Modifiers, Platform, ShortcutSet};

    #[test]
    fn ctrl_enter_saves_and_escape_cancels() {
        let set = ShortcutSet::for_platform(Platform::Other);
        assert_eq!(
            set.resolve(KeyPress::new(Key::Enter, Modifiers::CTRL)),
            Some(DialogCommand::Save)
        );
        assert_eq!(
            set.resolve(KeyPress::new(Key::Escape, Modifiers::NONE)),
            Some(DialogCommand::Cancel)
        );
        assert_eq!(set.resolve(KeyPress::new(Key::Enter, Modifiers::NONE)), None);
        assert_eq!(set.resolve(KeyPress::new(Key::Enter, Modifiers::META)), None);
    }

    #[test]
    fn mac_also_binds_cmd_enter() {
        let set = ShortcutSet::for_platform(Platform::Mac);
        assert_eq!(
            set.resolve(KeyPress::new(Key::Enter, Modifiers::META)),
            Some(DialogCommand::Save)
        );
        assert_eq!(set.iter().count(), 3);
    }

    #[test]
    fn extra_modifiers_do_not_match() {
        let set = ShortcutSet::for_platform(Platform::Other);
        let ctrl_shift = Modifiers {
            shift: true,
            ..Modifiers::CTRL
        };
        assert_eq!(set.resolve(KeyPress::new(Key::Enter, ctrl_shift)), None);
    }
}
