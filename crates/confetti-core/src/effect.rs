//! Closed set of named effects that can be invoked generically, e.g. by
//! [`Confetti::infinite`](crate::Confetti::infinite).

use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Effect {
    Cannon,
    RandomDirection,
    Realistic,
    Fireworks,
    Stars,
    Circles,
    Squares,
    Snow,
    Fall,
    Pride,
}

impl Effect {
    pub const ALL: [Effect; 10] = [
        Effect::Cannon,
        Effect::RandomDirection,
        Effect::Realistic,
        Effect::Fireworks,
        Effect::Stars,
        Effect::Circles,
        Effect::Squares,
        Effect::Snow,
        Effect::Fall,
        Effect::Pride,
    ];

    /// Name as exposed to JavaScript callers.
    pub fn name(self) -> &'static str {
        match self {
            Effect::Cannon => "cannon",
            Effect::RandomDirection => "randomDirection",
            Effect::Realistic => "realistic",
            Effect::Fireworks => "fireworks",
            Effect::Stars => "stars",
            Effect::Circles => "circles",
            Effect::Squares => "squares",
            Effect::Snow => "snow",
            Effect::Fall => "fall",
            Effect::Pride => "pride",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EffectError {
    #[error("`{0}` cannot be repeated by infinite()")]
    NotRepeatable(String),
    #[error("unknown effect `{0}`")]
    Unknown(String),
}

impl FromStr for Effect {
    type Err = EffectError;

    /// Accepts the camelCase JS names as well as snake_case and kebab-case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match norm.as_str() {
            "infinite" | "custom" | "customcanvas" | "customshape" | "customshapefromsvg"
            | "reset" => Err(EffectError::NotRepeatable(s.to_string())),
            _ => Effect::ALL
                .into_iter()
                .find(|e| e.name().to_lowercase() == norm)
                .ok_or_else(|| EffectError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_parse() {
        for e in Effect::ALL {
            assert_eq!(e.name().parse::<Effect>(), Ok(e));
        }
        assert_eq!("random_direction".parse::<Effect>(), Ok(Effect::RandomDirection));
        assert_eq!("random-direction".parse::<Effect>(), Ok(Effect::RandomDirection));
    }

    #[test]
    fn control_methods_are_rejected() {
        for name in ["infinite", "custom", "customCanvas", "customShape"] {
            assert_eq!(
                name.parse::<Effect>(),
                Err(EffectError::NotRepeatable(name.to_string()))
            );
        }
        assert!(matches!(
            "confetti".parse::<Effect>(),
            Err(EffectError::Unknown(_))
        ));
    }
}
