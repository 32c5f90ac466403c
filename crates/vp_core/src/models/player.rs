use serde::{Deserialize, Serialize};

/// A rated competitor, supplied by an external pool provider.
///
/// The rating is an externally computed skill estimate (ELO-style); it is
/// immutable for the duration of one simulated match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub rating: i32,
}

impl Player {
    pub fn new(name: impl Into<String>, rating: i32) -> Self {
        Self { name: name.into(), rating }
    }
}

/// Which side of the table a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerSide {
    A,
    B,
}

impl PlayerSide {
    pub fn opponent(self) -> Self {
        match self {
            PlayerSide::A => PlayerSide::B,
            PlayerSide::B => PlayerSide::A,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_flips_sides() {
        assert_eq!(PlayerSide::A.opponent(), PlayerSide::B);
        assert_eq!(PlayerSide::B.opponent(), PlayerSide::A);
    }

    #[test]
    fn player_roundtrips_through_json() {
        let p = Player::new("Giulia", 1540);
        let json = serde_json::to_string(&p).unwrap();
        let back: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
