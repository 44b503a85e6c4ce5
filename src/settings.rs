use std::net::{IpAddr, SocketAddr};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub quiz: QuizSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: IpAddr,
    pub port: u16,
}

impl ApplicationSettings {
    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub path: String,
    pub max_connections: u32,
    pub create_if_missing: bool,
}

impl DatabaseSettings {
    pub fn connection_string(&self) -> String {
        format!("sqlite:{}", self.path)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizSettings {
    pub selection: QuizSelection,
}

/// How the next quiz question is picked among the ones not asked yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizSelection {
    #[default]
    Random,
    /// Lowest unseen id; predictable, handy for scripted clients.
    First,
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("application.host", "0.0.0.0")?
        .set_default("application.port", 8080)?
        .set_default("database.path", "trivia.db")?
        .set_default("database.max_connections", 5)?
        .set_default("database.create_if_missing", true)?
        .set_default("quiz.selection", "random")
}

impl Settings {
    /// Defaults, then `trivia.toml` (or `$TRIVIA_CONFIG`) if present, then
    /// `TRIVIA__SECTION__KEY` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let file = dotenv::var("TRIVIA_CONFIG").unwrap_or_else(|_| "trivia".to_owned());
        defaults()?
            .add_source(File::with_name(&file).required(false))
            .add_source(
                Environment::with_prefix("TRIVIA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Settings {
        defaults()
            .unwrap()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn defaults_are_complete() {
        let settings = from_toml("");
        assert_eq!(settings.application.address().to_string(), "0.0.0.0:8080");
        assert_eq!(settings.database.connection_string(), "sqlite:trivia.db");
        assert_eq!(settings.database.max_connections, 5);
        assert_eq!(settings.quiz.selection, QuizSelection::Random);
    }

    #[test]
    fn file_overrides_defaults() {
        let settings = from_toml(
            r#"
            [application]
            port = 5000

            [database]
            path = "/var/lib/trivia/trivia.db"

            [quiz]
            selection = "first"
            "#,
        );
        assert_eq!(settings.application.port, 5000);
        assert_eq!(
            settings.database.connection_string(),
            "sqlite:/var/lib/trivia/trivia.db"
        );
        assert_eq!(settings.quiz.selection, QuizSelection::First);
    }

    #[test]
    fn rejects_unknown_selection() {
        let result = defaults()
            .unwrap()
            .add_source(File::from_str("[quiz]\nselection = \"shuffle\"", FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize::<Settings>();
        assert!(result.is_err());
    }
}
