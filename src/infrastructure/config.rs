use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup (the environment in
    /// production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .or_else(|| postgres_url(&lookup))
            .unwrap_or_else(|| "sqlite://learnhub.db?mode=rwc".to_string());

        Self {
            database_url,
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

/// Postgres URL assembled from the discrete `DB_*` variables, if `DB_HOST` is set.
fn postgres_url<F>(lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let host = lookup("DB_HOST")?;
    let port = lookup("DB_PORT").unwrap_or_else(|| "5432".to_string());
    let user = lookup("DB_USER").unwrap_or_else(|| "postgres".to_string());
    let password = lookup("DB_PASSWORD").unwrap_or_default();
    let dbname = lookup("DB_DBNAME").unwrap_or_else(|| "postgres".to_string());
    let sslmode = lookup("DB_SSL").unwrap_or_else(|| "disable".to_string());

    Some(format!(
        "postgres://{}:{}@{}:{}/{}?sslmode={}",
        user, password, host, port, dbname, sslmode
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_local_sqlite() {
        let config = config_from(&[]);
        assert_eq!(config.database_url, "sqlite://learnhub.db?mode=rwc");
        assert_eq!(config.port, 8080);
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn database_url_wins_over_discrete_variables() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DB_HOST", "db.internal"),
        ]);
        assert_eq!(config.database_url, "sqlite::memory:");
    }

    #[test]
    fn builds_postgres_url_from_discrete_variables() {
        let config = config_from(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_USER", "app"),
            ("DB_PASSWORD", "pw"),
            ("DB_DBNAME", "learnhub"),
            ("DB_SSL", "require"),
        ]);
        assert_eq!(
            config.database_url,
            "postgres://app:pw@db.internal:6543/learnhub?sslmode=require"
        );
    }

    #[test]
    fn parses_port_and_origins() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test,"),
        ]);
        assert_eq!(config.port, 9000);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn invalid_port_falls_back_to_default() {
        let config = config_from(&[("PORT", "not-a-port")]);
        assert_eq!(config.port, 8080);
    }
}
