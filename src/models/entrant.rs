//! Entrants: named players or the bye sentinel.

use serde::{Deserialize, Serialize};

/// Wire value of the bye sentinel.
pub const BYE: &str = "BYE";

/// A bracket slot occupant.
///
/// Serialized as a bare string; the literal `"BYE"` is the sentinel and
/// anything else is a player name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Entrant {
    /// A named competitor
    Player(String),
    /// Placeholder opponent; the other side advances without a match
    Bye,
}

impl Entrant {
    pub fn player(name: impl Into<String>) -> Self {
        Entrant::Player(name.into())
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, Entrant::Bye)
    }

    /// Player name, or None for a bye.
    pub fn name(&self) -> Option<&str> {
        match self {
            Entrant::Player(name) => Some(name),
            Entrant::Bye => None,
        }
    }

    /// Wire form: the player name or the sentinel.
    pub fn as_str(&self) -> &str {
        match self {
            Entrant::Player(name) => name,
            Entrant::Bye => BYE,
        }
    }

    /// True if this is a player named exactly `name`.
    pub fn is_player(&self, name: &str) -> bool {
        self.name() == Some(name)
    }

    /// Case-insensitive substring match against the player name.
    /// `needle` must already be lowercased. Byes never match.
    pub(crate) fn name_contains(&self, needle: &str) -> bool {
        self.name()
            .is_some_and(|name| name.to_lowercase().contains(needle))
    }
}

impl From<String> for Entrant {
    fn from(s: String) -> Self {
        if s == BYE {
            Entrant::Bye
        } else {
            Entrant::Player(s)
        }
    }
}

impl From<&str> for Entrant {
    fn from(s: &str) -> Self {
        Entrant::from(s.to_string())
    }
}

impl From<Entrant> for String {
    fn from(entrant: Entrant) -> Self {
        match entrant {
            Entrant::Player(name) => name,
            Entrant::Bye => BYE.to_string(),
        }
    }
}

impl std::fmt::Display for Entrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Convert a list of raw names into entrants.
pub fn entrants_from_names<S: AsRef<str>>(names: &[S]) -> Vec<Entrant> {
    names.iter().map(|n| Entrant::from(n.as_ref())).collect()
}

/// The 32-entrant reference field, including three byes.
pub fn reference_field() -> Vec<String> {
    [
        "Novak Djokovic",
        "Carlos Alcaraz",
        "Daniil Medvedev",
        "Jannik Sinner",
        "Stefanos Tsitsipas",
        "Alexander Zverev",
        "Andrey Rublev",
        "Holger Rune",
        "Casper Ruud",
        "Taylor Fritz",
        "Frances Tiafoe",
        "Felix Auger-Aliassime",
        "Hubert Hurkacz",
        "Cameron Norrie",
        "Tommy Paul",
        "Borna Coric",
        "Lorenzo Musetti",
        "Alex de Minaur",
        "Matteo Berrettini",
        "Denis Shapovalov",
        "Karen Khachanov",
        "Roberto Bautista Agut",
        "Grigor Dimitrov",
        BYE,
        "Sebastian Korda",
        "Daniel Evans",
        "Yoshihito Nishioka",
        BYE,
        "Ben Shelton",
        "Miomir Kecmanovic",
        "Alejandro Davidovich Fokina",
        BYE,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bye_sentinel_parses() {
        assert_eq!(Entrant::from("BYE"), Entrant::Bye);
        assert_eq!(Entrant::from("Alice"), Entrant::player("Alice"));
        // Case-sensitive: only the exact sentinel is a bye
        assert_eq!(Entrant::from("bye"), Entrant::player("bye"));
    }

    #[test]
    fn test_entrant_serialization() {
        let json = serde_json::to_string(&vec![Entrant::player("Alice"), Entrant::Bye]).unwrap();
        assert_eq!(json, r#"["Alice","BYE"]"#);

        let deserialized: Vec<Entrant> = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, vec![Entrant::player("Alice"), Entrant::Bye]);
    }

    #[test]
    fn test_name_contains() {
        let e = Entrant::player("Carlos Alcaraz");
        assert!(e.name_contains("alca"));
        assert!(!e.name_contains("sinner"));
        assert!(!Entrant::Bye.name_contains("bye"));
    }

    #[test]
    fn test_reference_field() {
        let field = reference_field();
        assert_eq!(field.len(), 32);
        assert_eq!(field.iter().filter(|n| *n == BYE).count(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Entrant::Bye), "BYE");
        assert_eq!(format!("{}", Entrant::player("Bob")), "Bob");
    }
}
