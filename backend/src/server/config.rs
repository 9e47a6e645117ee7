//! Environment-driven server settings.
//!
//! Settings are read once at startup through [`mockable::Env`] so parsing can
//! be exercised in isolation.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use mockable::Env;
use tracing::warn;

use crate::outbound::persistence::{DEFAULT_DATABASE, StoreConfig};

const MONGODB_URI_ENV: &str = "MONGODB_URI";
const MONGODB_DATABASE_ENV: &str = "MONGODB_DATABASE";
const PORT_ENV: &str = "PORT";
const BIND_HOST_ENV: &str = "BIND_HOST";

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 5000;

/// Host used when `BIND_HOST` is unset.
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Errors raised while reading settings from the environment.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set to a value that could not be parsed.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Process-wide settings resolved at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Document store connection; `None` runs the API disconnected.
    pub store: Option<StoreConfig>,
    /// Socket the HTTP listener binds to.
    pub bind_addr: SocketAddr,
}

impl ServerSettings {
    /// Resolve settings from the environment.
    ///
    /// An absent or blank `MONGODB_URI` is not an error: the server starts in
    /// disconnected mode and every record operation answers 503.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidEnv`] when `PORT` or `BIND_HOST` cannot be
    /// parsed.
    pub fn from_env<E: Env>(env: &E) -> Result<Self, ConfigError> {
        let store = store_from_env(env);
        let port = port_from_env(env)?;
        let host = host_from_env(env)?;

        Ok(Self {
            store,
            bind_addr: SocketAddr::new(host, port),
        })
    }

    /// Override the listening port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.bind_addr.set_port(port);
        self
    }

    /// Override the listening address.
    #[must_use]
    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.bind_addr.set_ip(host);
        self
    }
}

fn non_blank<E: Env>(env: &E, name: &str) -> Option<String> {
    env.string(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn store_from_env<E: Env>(env: &E) -> Option<StoreConfig> {
    let Some(uri) = non_blank(env, MONGODB_URI_ENV) else {
        warn!("MONGODB_URI not set; employee routes will answer 503");
        return None;
    };
    let database = non_blank(env, MONGODB_DATABASE_ENV).unwrap_or_else(|| DEFAULT_DATABASE.to_owned());
    Some(StoreConfig::new(uri).with_database(database))
}

fn port_from_env<E: Env>(env: &E) -> Result<u16, ConfigError> {
    match non_blank(env, PORT_ENV) {
        None => Ok(DEFAULT_PORT),
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidEnv {
            name: PORT_ENV,
            value,
            expected: "an integer between 0 and 65535",
        }),
    }
}

fn host_from_env<E: Env>(env: &E) -> Result<IpAddr, ConfigError> {
    match non_blank(env, BIND_HOST_ENV) {
        None => Ok(DEFAULT_HOST),
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidEnv {
            name: BIND_HOST_ENV,
            value,
            expected: "an IPv4 or IPv6 address",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::MockEnv;
    use rstest::rstest;
    use std::collections::HashMap;

    fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }

    #[rstest]
    fn defaults_run_disconnected_on_port_5000() {
        let settings = ServerSettings::from_env(&mock_env(&[])).expect("defaults parse");
        assert_eq!(settings.store, None);
        assert_eq!(settings.bind_addr, SocketAddr::new(DEFAULT_HOST, DEFAULT_PORT));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_uri_runs_disconnected(#[case] uri: &str) {
        let settings =
            ServerSettings::from_env(&mock_env(&[("MONGODB_URI", uri)])).expect("settings parse");
        assert!(settings.store.is_none());
    }

    #[rstest]
    fn uri_selects_default_database() {
        let settings = ServerSettings::from_env(&mock_env(&[(
            "MONGODB_URI",
            "mongodb://localhost:27017",
        )]))
        .expect("settings parse");
        let store = settings.store.expect("store configured");
        assert_eq!(store.uri(), "mongodb://localhost:27017");
        assert_eq!(store.database(), "employee_management");
    }

    #[rstest]
    fn database_name_is_configurable() {
        let settings = ServerSettings::from_env(&mock_env(&[
            ("MONGODB_URI", "mongodb://db:27017"),
            ("MONGODB_DATABASE", "staff"),
        ]))
        .expect("settings parse");
        assert_eq!(settings.store.expect("store configured").database(), "staff");
    }

    #[rstest]
    fn port_and_host_are_read() {
        let settings = ServerSettings::from_env(&mock_env(&[
            ("PORT", "8081"),
            ("BIND_HOST", "127.0.0.1"),
        ]))
        .expect("settings parse");
        assert_eq!(settings.bind_addr, "127.0.0.1:8081".parse().expect("valid addr"));
    }

    #[rstest]
    #[case("PORT", "eighty")]
    #[case("PORT", "70000")]
    #[case("BIND_HOST", "localhost:80")]
    fn unparsable_values_are_rejected(#[case] name: &str, #[case] value: &str) {
        let err = ServerSettings::from_env(&mock_env(&[(name, value)])).expect_err("rejects");
        assert!(matches!(
            err,
            ConfigError::InvalidEnv { name: rejected, .. } if rejected == name
        ));
    }

    #[rstest]
    fn overrides_replace_environment_values() {
        let settings = ServerSettings::from_env(&mock_env(&[("PORT", "8081")]))
            .expect("settings parse")
            .with_port(9000)
            .with_host(IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(settings.bind_addr, "127.0.0.1:9000".parse().expect("valid addr"));
    }
}
