//! Environment-driven database connection settings.
//!
//! Settings are read through [`mockable::Env`] so they can be exercised in
//! tests without touching the process environment. Parsing never connects to
//! anything; [`DatabaseSettings::database_url`] produces the URL the pool is
//! built from.

use std::time::Duration;

use mockable::Env;
use url::Url;

const SERVER_ENV: &str = "DB_SERVER";
const NAME_ENV: &str = "DB_NAME";
const USER_ENV: &str = "DB_USER";
const PASSWORD_ENV: &str = "DB_PASSWORD";
const ENCRYPT_ENV: &str = "DB_ENCRYPT";
const TRUST_CERT_ENV: &str = "DB_TRUST_SERVER_CERTIFICATE";
const CONNECT_TIMEOUT_ENV: &str = "DB_CONNECT_TIMEOUT_MS";
const REQUEST_TIMEOUT_ENV: &str = "DB_REQUEST_TIMEOUT_MS";

const DEFAULT_SERVER: &str = "localhost";
const DEFAULT_DATABASE: &str = "vihari";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const MILLIS_EXPECTED: &str = "a positive whole number of milliseconds";

/// Errors raised while reading database settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatabaseConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The assembled connection URL was rejected.
    #[error("invalid database url: {message}")]
    InvalidUrl { message: String },
}

/// Parsed `DB_SERVER` value.
///
/// Accepts `host`, `host\instance` or `host,port`. When a backslash is present
/// the instance form wins; a port that does not parse is ignored.
///
/// # Examples
/// ```
/// use backend::outbound::persistence::ServerAddress;
///
/// let named = ServerAddress::parse(r"db01\TRAVEL");
/// assert_eq!(named.host, "db01");
/// assert_eq!(named.instance.as_deref(), Some("TRAVEL"));
///
/// let ported = ServerAddress::parse("db01,6432");
/// assert_eq!(ported.port, Some(6432));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddress {
    pub host: String,
    /// Named instance, forwarded as `application_name`.
    pub instance: Option<String>,
    pub port: Option<u16>,
}

impl ServerAddress {
    /// Split a `DB_SERVER` value. Never fails; odd input becomes a bare host.
    pub fn parse(raw: &str) -> Self {
        if let Some((host, instance)) = raw.split_once('\\') {
            return Self {
                host: host.to_owned(),
                instance: Some(instance.to_owned()).filter(|name| !name.is_empty()),
                port: None,
            };
        }
        if let Some((host, port)) = raw.split_once(',') {
            return Self {
                host: host.to_owned(),
                instance: None,
                port: port.trim().parse().ok(),
            };
        }
        Self {
            host: raw.to_owned(),
            instance: None,
            port: None,
        }
    }
}

/// Username and password for database login.
///
/// Absent credentials mean the driver authenticates with the ambient
/// identity (peer or Kerberos).
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything needed to open the relational store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub server: ServerAddress,
    pub database: String,
    pub credentials: Option<Credentials>,
    pub encrypt: bool,
    pub trust_server_certificate: bool,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            server: ServerAddress::parse(DEFAULT_SERVER),
            database: DEFAULT_DATABASE.to_owned(),
            credentials: None,
            encrypt: false,
            trust_server_certificate: true,
            connect_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl DatabaseSettings {
    /// Read settings from the environment, applying defaults for missing
    /// variables.
    ///
    /// # Examples
    /// ```
    /// use backend::outbound::persistence::DatabaseSettings;
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "DB_SERVER" => Some("db.internal,6432".to_owned()),
    ///     "DB_USER" => Some("vihari".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let settings = DatabaseSettings::from_env(&env).expect("valid settings");
    /// assert_eq!(settings.server.port, Some(6432));
    /// assert_eq!(settings.database, "vihari");
    /// ```
    pub fn from_env<E: Env>(env: &E) -> Result<Self, DatabaseConfigError> {
        let defaults = Self::default();
        let server = env
            .string(SERVER_ENV)
            .map_or(defaults.server, |raw| ServerAddress::parse(&raw));
        let credentials = env.string(USER_ENV).map(|user| Credentials {
            user,
            password: env.string(PASSWORD_ENV).unwrap_or_default(),
        });

        Ok(Self {
            server,
            database: env.string(NAME_ENV).unwrap_or(defaults.database),
            credentials,
            encrypt: bool_from_env(env, ENCRYPT_ENV, defaults.encrypt)?,
            trust_server_certificate: bool_from_env(
                env,
                TRUST_CERT_ENV,
                defaults.trust_server_certificate,
            )?,
            connect_timeout: millis_from_env(env, CONNECT_TIMEOUT_ENV, defaults.connect_timeout)?,
            request_timeout: millis_from_env(env, REQUEST_TIMEOUT_ENV, defaults.request_timeout)?,
        })
    }

    /// `host/database` label safe to log.
    pub fn display_target(&self) -> String {
        match &self.server.instance {
            Some(instance) => format!("{}\\{}/{}", self.server.host, instance, self.database),
            None => format!("{}/{}", self.server.host, self.database),
        }
    }

    /// Postgres connection URL for these settings.
    ///
    /// TLS maps to `sslmode`: no encryption is `disable`, encryption with a
    /// trusted certificate is `require`, otherwise `verify-full`. The request
    /// timeout becomes the session `statement_timeout`. A named instance is
    /// carried as the `application_name`.
    pub fn database_url(&self) -> Result<Url, DatabaseConfigError> {
        let mut url = Url::parse("postgres://localhost")
            .map_err(|err| DatabaseConfigError::InvalidUrl {
                message: err.to_string(),
            })?;
        url.set_host(Some(&self.server.host))
            .map_err(|err| DatabaseConfigError::InvalidUrl {
                message: format!("host '{}': {err}", self.server.host),
            })?;
        let port_result = url.set_port(self.server.port);
        let user_result = match &self.credentials {
            Some(credentials) => url
                .set_username(&credentials.user)
                .and_then(|()| url.set_password(Some(&credentials.password))),
            None => Ok(()),
        };
        if port_result.is_err() || user_result.is_err() {
            return Err(DatabaseConfigError::InvalidUrl {
                message: "url cannot carry port or credentials".to_owned(),
            });
        }
        url.set_path(&self.database);

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("sslmode", self.ssl_mode());
            query.append_pair("connect_timeout", &self.connect_timeout_secs().to_string());
            query.append_pair(
                "options",
                &format!("-c statement_timeout={}", self.request_timeout.as_millis()),
            );
            if let Some(instance) = &self.server.instance {
                query.append_pair("application_name", instance);
            }
        }
        Ok(url)
    }

    fn ssl_mode(&self) -> &'static str {
        match (self.encrypt, self.trust_server_certificate) {
            (false, _) => "disable",
            (true, true) => "require",
            (true, false) => "verify-full",
        }
    }

    // libpq takes whole seconds; anything below one second rounds up.
    fn connect_timeout_secs(&self) -> u64 {
        self.connect_timeout.as_millis().div_ceil(1000).max(1) as u64
    }
}

fn bool_from_env<E: Env>(
    env: &E,
    name: &'static str,
    default: bool,
) -> Result<bool, DatabaseConfigError> {
    let Some(value) = env.string(name) else {
        return Ok(default);
    };
    parse_bool(&value).ok_or(DatabaseConfigError::InvalidEnv {
        name,
        value,
        expected: BOOL_EXPECTED,
    })
}

fn millis_from_env<E: Env>(
    env: &E,
    name: &'static str,
    default: Duration,
) -> Result<Duration, DatabaseConfigError> {
    let Some(value) = env.string(name) else {
        return Ok(default);
    };
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|millis| *millis > 0)
        .map(Duration::from_millis)
        .ok_or_else(|| DatabaseConfigError::InvalidEnv {
            name,
            value,
            expected: MILLIS_EXPECTED,
        })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
