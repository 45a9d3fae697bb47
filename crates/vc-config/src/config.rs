use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Shard the account was created in. Decides the `pd.<region>.a.pvp.net` host.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// North America, Brazil, Latin America
    #[default]
    Na,
    Eu,
    Ap,
    Kr,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Na, Region::Eu, Region::Ap, Region::Kr];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Na => "na",
            Region::Eu => "eu",
            Region::Ap => "ap",
            Region::Kr => "kr",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Region::Na => "North America, Brazil, Latin America",
            Region::Eu => "Europe",
            Region::Ap => "Asia Pacific",
            Region::Kr => "Korea",
        }
    }

    /// Parse user input, falling back to `na` for anything unrecognised
    pub fn from_input(input: &str) -> Self {
        input.parse().unwrap_or_default()
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Region::ALL
            .into_iter()
            .find(|r| r.as_str() == wanted)
            .ok_or_else(|| format!("unknown region '{}', expected one of na, eu, ap, kr", s))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Saved login details.
///
/// Stored in the user's config directory with owner-only permissions.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub region: Region,
}

impl fmt::Debug for UserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("region", &self.region)
            .finish()
    }
}
