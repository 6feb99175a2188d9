//! CLI configuration management.
//!
//! Command-line flags win over environment variables, which win over defaults.

use americano::{
    GameMode, PairingType, ScoringModel, TournamentSettings,
    db::{ConfigError, DatabaseConfig},
};
use uuid::Uuid;

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub mode: Option<String>,
    pub pairing: Option<String>,
    pub scoring: Option<String>,
    pub players: Option<String>,
    pub name: Option<String>,
    pub user: Option<String>,
    pub database_url: Option<String>,
}

/// Complete CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub settings: TournamentSettings,
    /// Roster entries known up front; missing ones are prompted for.
    pub players: Vec<String>,
    /// Name used when saving.
    pub name: String,
    /// Signed-in user, needed for premium modes and for saving.
    pub user: Option<Uuid>,
    /// Present when persistence is enabled.
    pub database: Option<DatabaseConfig>,
}

impl CliConfig {
    /// Load configuration from flags and the process environment.
    ///
    /// # Errors
    ///
    /// Returns error if a value is present but does not parse
    pub fn from_env(overrides: CliOverrides) -> Result<Self, ConfigError> {
        Self::from_sources(overrides, |key| std::env::var(key).ok())
    }

    /// Load configuration with an explicit environment lookup.
    pub fn from_sources(
        overrides: CliOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mode = parse_setting(overrides.mode, &env, "AMERICANO_MODE", GameMode::Super8)?;
        let pairing = parse_setting(
            overrides.pairing,
            &env,
            "AMERICANO_PAIRING",
            PairingType::Manual,
        )?;
        let scoring = parse_setting(
            overrides.scoring,
            &env,
            "AMERICANO_SCORING",
            ScoringModel::Games,
        )?;

        let players = overrides
            .players
            .or_else(|| env("AMERICANO_PLAYERS"))
            .map(|raw| raw.split(',').map(|p| p.trim().to_string()).collect())
            .unwrap_or_default();

        let user = overrides
            .user
            .or_else(|| env("AMERICANO_USER"))
            .map(|raw| {
                raw.trim().parse::<Uuid>().map_err(|_| ConfigError::Invalid {
                    var: "AMERICANO_USER".to_string(),
                    reason: format!("'{raw}' is not a UUID"),
                })
            })
            .transpose()?;

        let database = match overrides.database_url.or_else(|| env("DATABASE_URL")) {
            Some(url) => Some(DatabaseConfig::with_url(url).apply_env()?),
            None => None,
        };

        let settings = TournamentSettings::new(mode)
            .with_pairing(pairing)
            .with_scoring(scoring);

        Ok(Self {
            name: overrides
                .name
                .unwrap_or_else(|| format!("{} tournament", mode.title())),
            settings,
            players,
            user,
            database,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        let expected = self.settings.mode.competitor_count();
        if self.players.len() > expected {
            return Err(ConfigError::Invalid {
                var: "AMERICANO_PLAYERS".to_string(),
                reason: format!(
                    "{} entries given, {} takes {expected}",
                    self.players.len(),
                    self.settings.mode
                ),
            });
        }
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                var: "--name".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_setting<T, E>(
    flag: Option<String>,
    env: impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = E>,
    E: std::fmt::Display,
{
    match flag.or_else(|| env(key)) {
        Some(raw) => raw.parse().map_err(|e: E| ConfigError::Invalid {
            var: key.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::from_sources(CliOverrides::default(), env_of(&[])).unwrap();
        assert_eq!(config.settings, TournamentSettings::new(GameMode::Super8));
        assert!(config.players.is_empty());
        assert!(config.database.is_none());
        assert!(config.user.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_values() {
        let config = CliConfig::from_sources(
            CliOverrides::default(),
            env_of(&[
                ("AMERICANO_MODE", "super6-fixed"),
                ("AMERICANO_PAIRING", "random"),
                ("AMERICANO_SCORING", "wins"),
                ("AMERICANO_PLAYERS", "A & B, C & D"),
            ]),
        )
        .unwrap();
        assert_eq!(config.settings.mode, GameMode::Super6Fixed);
        assert_eq!(config.settings.pairing, PairingType::Random);
        assert_eq!(config.settings.scoring, ScoringModel::Wins);
        assert_eq!(config.players, vec!["A & B", "C & D"]);
    }

    #[test]
    fn test_flags_override_env() {
        let overrides = CliOverrides {
            mode: Some("super12".to_string()),
            database_url: Some("postgres://flag/db".to_string()),
            ..CliOverrides::default()
        };
        let config = CliConfig::from_sources(
            overrides,
            env_of(&[
                ("AMERICANO_MODE", "super8"),
                ("DATABASE_URL", "postgres://env/db"),
            ]),
        )
        .unwrap();
        assert_eq!(config.settings.mode, GameMode::Super12);
        assert_eq!(
            config.database.map(|db| db.database_url),
            Some("postgres://flag/db".to_string())
        );
    }

    #[test]
    fn test_invalid_values() {
        let err = CliConfig::from_sources(
            CliOverrides::default(),
            env_of(&[("AMERICANO_MODE", "super10")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "AMERICANO_MODE"));

        let overrides = CliOverrides {
            user: Some("not-a-uuid".to_string()),
            ..CliOverrides::default()
        };
        assert!(CliConfig::from_sources(overrides, env_of(&[])).is_err());
    }

    #[test]
    fn test_too_many_players() {
        let overrides = CliOverrides {
            mode: Some("super6-fixed".to_string()),
            players: Some("a,b,c,d,e,f,g".to_string()),
            ..CliOverrides::default()
        };
        let config = CliConfig::from_sources(overrides, env_of(&[])).unwrap();
        assert!(config.validate().is_err());
    }
}
