use std::fmt;
use std::str::FromStr;

/// The travel direction a passenger asks for when calling the elevator.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Call {
    Up = 0,
    Down = 1,
}

impl Call {
    pub fn as_str(self) -> &'static str {
        match self {
            Call::Up => "UP",
            Call::Down => "DOWN",
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token that is neither `UP` nor `DOWN`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("direction must be UP or DOWN, got {0:?}")]
pub struct ParseCallError(pub String);

impl FromStr for Call {
    type Err = ParseCallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UP" => Ok(Call::Up),
            "DOWN" => Ok(Call::Down),
            _ => Err(ParseCallError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tokens_case_insensitively() {
        assert_eq!("up".parse::<Call>(), Ok(Call::Up));
        assert_eq!(" Down ".parse::<Call>(), Ok(Call::Down));
        assert!("sideways".parse::<Call>().is_err());
    }

    #[test]
    fn displays_as_uppercase_token() {
        assert_eq!(Call::Up.to_string(), "UP");
        assert_eq!(Call::Down.to_string().parse::<Call>(), Ok(Call::Down));
    }
}
