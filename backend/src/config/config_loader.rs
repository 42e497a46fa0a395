use super::{
    config_model::{Auth, BackendServer, Database, DotEnvyConfig},
    stage::Stage,
};
use anyhow::{Context, Result};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();
    load_from(|key| std::env::var(key).ok())
}

pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<DotEnvyConfig> {
    let required = |key: &str| lookup(key).with_context(|| format!("{key} is invalid"));

    let backend_server = BackendServer {
        port: required("SERVER_PORT_BACKEND")?
            .parse()
            .context("SERVER_PORT_BACKEND is invalid")?,
        body_limit: lookup("SERVER_BODY_LIMIT")
            .unwrap_or_else(|| "1".to_string())
            .parse()
            .context("SERVER_BODY_LIMIT is invalid")?,
        timeout: lookup("SERVER_TIMEOUT")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .context("SERVER_TIMEOUT is invalid")?,
    };

    let database = Database {
        url: required("DATABASE_URL")?,
        max_connections: lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS is invalid")?,
    };

    let auth = Auth {
        jwt_secret: required("JWT_SECRET")?,
    };

    let stage = lookup("STAGE")
        .and_then(|raw| Stage::try_from(&raw).ok())
        .unwrap_or_default();

    Ok(DotEnvyConfig {
        backend_server,
        database,
        auth,
        stage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn loads_required_values_and_defaults() {
        let config = load_from(lookup_from(&[
            ("SERVER_PORT_BACKEND", "8080"),
            ("DATABASE_URL", "postgres://localhost:5432/nst"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.backend_server.port, 8080);
        assert_eq!(config.backend_server.body_limit, 1);
        assert_eq!(config.backend_server.timeout, 30);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.stage, Stage::Local);
    }

    #[test]
    fn missing_secret_names_the_variable() {
        let err = load_from(lookup_from(&[
            ("SERVER_PORT_BACKEND", "8080"),
            ("DATABASE_URL", "postgres://localhost:5432/nst"),
        ]))
        .unwrap_err();

        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn malformed_port_is_rejected() {
        let result = load_from(lookup_from(&[
            ("SERVER_PORT_BACKEND", "eighty"),
            ("DATABASE_URL", "postgres://localhost:5432/nst"),
            ("JWT_SECRET", "secret"),
        ]));

        assert!(result.is_err());
    }
}
