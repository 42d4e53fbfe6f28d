//! API token resolution from the environment or the packagecloud dotfile.
//!
//! Resolution never fails. A missing variable, a missing file, a malformed
//! file or a file without a `token` field all collapse to the empty token,
//! which packagecloud later rejects with an authentication status.

use std::env;
use std::fmt;
use std::io::{self, ErrorKind};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use directories::UserDirs;
use serde_json::Value;
use tracing::{debug, warn};

/// Environment variable checked before the credential file.
pub const TOKEN_ENV_VAR: &str = "PACKAGECLOUD_API_KEY";

/// Credential file name inside the user's home directory.
pub const CREDENTIAL_FILE_NAME: &str = ".packagecloud";

/// Opaque packagecloud API token.
///
/// The empty token is the "no credential configured" sentinel.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wraps a token value verbatim.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the empty token.
    #[must_use]
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }

    /// Returns true when no credential was found.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for ApiToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("ApiToken(<empty>)")
        } else {
            f.write_str("ApiToken(<redacted>)")
        }
    }
}

/// Resolves tokens from an environment variable and a JSON credential file.
///
/// Every call re-reads both sources so a token rotated on disk is picked up
/// without restarting.
///
/// # Example
///
/// ```no_run
/// use pkgcloud::packagecloud::token::TokenResolver;
///
/// let token = TokenResolver::default().resolve_token();
/// if token.is_empty() {
///     eprintln!("no packagecloud token configured");
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenResolver {
    env_var: String,
    credential_file: Option<Utf8PathBuf>,
}

impl Default for TokenResolver {
    fn default() -> Self {
        Self {
            env_var: TOKEN_ENV_VAR.to_owned(),
            credential_file: default_credential_file(),
        }
    }
}

impl TokenResolver {
    /// Creates a resolver reading `env_var` first and `credential_file` second.
    ///
    /// A `None` credential file means only the environment is consulted.
    #[must_use]
    pub fn new(env_var: impl Into<String>, credential_file: Option<Utf8PathBuf>) -> Self {
        Self {
            env_var: env_var.into(),
            credential_file,
        }
    }

    /// Name of the environment variable consulted first.
    #[must_use]
    pub const fn env_var(&self) -> &str {
        self.env_var.as_str()
    }

    /// Credential file consulted when the environment variable is unset.
    #[must_use]
    pub fn credential_file(&self) -> Option<&Utf8Path> {
        self.credential_file.as_deref()
    }

    /// Resolves the token, preferring the environment over the file.
    #[must_use]
    pub fn resolve_token(&self) -> ApiToken {
        let from_env = read_token_from_env(&self.env_var);
        if !from_env.is_empty() {
            debug!(source = %self.env_var, "using packagecloud token from environment");
            return from_env;
        }

        match self.credential_file.as_deref() {
            Some(path) => read_token_from_file(path),
            None => {
                debug!("no home directory available; packagecloud token is empty");
                ApiToken::empty()
            }
        }
    }
}

/// Resolves the token from `PACKAGECLOUD_API_KEY` or `~/.packagecloud`.
#[must_use]
pub fn resolve_token() -> ApiToken {
    TokenResolver::default().resolve_token()
}

/// Reads the token from the named environment variable.
///
/// Unset or non-Unicode values yield the empty token.
#[must_use]
pub fn read_token_from_env(name: &str) -> ApiToken {
    env::var(name).map_or_else(|_| ApiToken::empty(), ApiToken::new)
}

/// Reads the `token` field from a JSON credential file.
///
/// A missing file, unreadable file, malformed JSON or absent `token` field all
/// yield the empty token. Malformed JSON is logged as a warning.
#[must_use]
pub fn read_token_from_file(path: &Utf8Path) -> ApiToken {
    let Some(contents) = read_credential_file(path) else {
        return ApiToken::empty();
    };

    match serde_json::from_str::<Value>(&contents) {
        Ok(document) => document
            .get("token")
            .and_then(Value::as_str)
            .map_or_else(ApiToken::empty, ApiToken::new),
        Err(error) => {
            warn!(path = %path, %error, "could not decode JSON in credential file");
            ApiToken::empty()
        }
    }
}

fn read_credential_file(path: &Utf8Path) -> Option<String> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name()?;

    let result = Dir::open_ambient_dir(parent, ambient_authority())
        .and_then(|dir| dir.read_to_string(file_name));

    match result {
        Ok(contents) => Some(contents),
        Err(error) if is_missing(&error) => {
            debug!(path = %path, "credential file not found");
            None
        }
        Err(error) => {
            warn!(path = %path, %error, "could not read credential file");
            None
        }
    }
}

fn is_missing(error: &io::Error) -> bool {
    matches!(error.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory)
}

fn default_credential_file() -> Option<Utf8PathBuf> {
    let dirs = UserDirs::new()?;
    let home = Utf8PathBuf::from_path_buf(dirs.home_dir().to_path_buf()).ok()?;
    Some(home.join(CREDENTIAL_FILE_NAME))
}
