use super::super::super::messages::Message;
use super::super::super::state::App;
use iced::keyboard::{Key, Modifiers, key};

impl App {
    pub(super) fn shortcut_message_for_key(
        &self,
        key: Key,
        modifiers: Modifiers,
    ) -> Option<Message> {
        let pressed = match key.as_ref() {
            Key::Named(key::Named::Space) => "space".to_string(),
            Key::Character(ch) => ch.to_ascii_lowercase(),
            _ => return None,
        };

        if Self::shortcut_matches(&self.config.key_quit, "q", &pressed, modifiers) {
            Some(Message::Quit)
        } else if Self::shortcut_matches(&self.config.key_load_more, "r", &pressed, modifiers) {
            Some(Message::LoadMoreRequested)
        } else {
            None
        }
    }

    pub(super) fn shortcut_matches(
        raw: &str,
        fallback: &str,
        pressed: &str,
        modifiers: Modifiers,
    ) -> bool {
        let chord = Chord::parse(&Self::normalize_shortcut_token(raw, fallback));
        chord.key.as_deref().unwrap_or(fallback) == pressed && chord.modifiers == modifiers
    }

    pub(super) fn normalize_shortcut_token(raw: &str, fallback: &str) -> String {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            fallback.to_string()
        } else {
            normalized.replace("spacebar", "space")
        }
    }
}

/// A configured binding such as `ctrl+r`, split into modifiers and key.
#[derive(Debug, PartialEq)]
struct Chord {
    modifiers: Modifiers,
    key: Option<String>,
}

impl Chord {
    fn parse(normalized: &str) -> Self {
        let mut chord = Chord {
            modifiers: Modifiers::empty(),
            key: None,
        };
        for token in normalized.split('+').map(str::trim).filter(|s| !s.is_empty()) {
            match token {
                "ctrl" | "control" => chord.modifiers |= Modifiers::CTRL,
                "alt" => chord.modifiers |= Modifiers::ALT,
                "logo" | "meta" | "super" | "cmd" | "command" => chord.modifiers |= Modifiers::LOGO,
                "shift" => chord.modifiers |= Modifiers::SHIFT,
                key => chord.key = Some(key.to_string()),
            }
        }
        chord
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::keyboard::Modifiers;

    #[test]
    fn normalizes_key_aliases() {
        assert_eq!(App::normalize_shortcut_token(" SpaceBar ", "x"), "space");
        assert_eq!(App::normalize_shortcut_token("   ", "q"), "q");
    }

    #[test]
    fn matches_plain_and_modified_shortcuts() {
        assert!(App::shortcut_matches("r", "r", "r", Modifiers::empty()));
        assert!(App::shortcut_matches("ctrl+r", "r", "r", Modifiers::CTRL));
        assert!(!App::shortcut_matches("ctrl+r", "r", "r", Modifiers::empty()));
    }

    #[test]
    fn parses_chord_tokens() {
        let chord = Chord::parse("ctrl+shift+r");
        assert_eq!(chord.modifiers, Modifiers::CTRL | Modifiers::SHIFT);
        assert_eq!(chord.key.as_deref(), Some("r"));
        assert_eq!(Chord::parse("alt").key, None);
    }

    #[test]
    fn rejects_unexpected_extra_modifier() {
        assert!(!App::shortcut_matches(
            "q",
            "q",
            "q",
            Modifiers::CTRL | Modifiers::SHIFT,
        ));
    }
}
