use std::fmt;

use crate::error::ReportError;

/// Environment variable holding the GitHub personal access token
pub const ENV_TOKEN_VAR: &str = "GITHUB_TOKEN";
/// Environment variable holding the login whose activity is reported
pub const ENV_USERNAME_VAR: &str = "GITHUB_USERNAME";

pub(crate) const TOKEN_HINT: &str = "Create a token at: https://github.com/settings/tokens\n\
Required scopes: 'repo' (or 'public_repo' for public repos only)";
const USERNAME_HINT: &str = "Set it to the GitHub login whose activity should be reported.";

/// Token and login, loaded once at startup and passed down explicitly.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub username: String,
}

// Keep the token out of logs and panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("username", &self.username)
            .finish()
    }
}

/// Load credentials from the process environment.
pub fn load_credentials() -> Result<Credentials, ReportError> {
    load_credentials_with(|name| std::env::var(name).ok())
}

/// Load credentials through an arbitrary variable lookup.
/// Values are trimmed; unset and blank values are both errors.
pub fn load_credentials_with<F>(lookup: F) -> Result<Credentials, ReportError>
where
    F: Fn(&str) -> Option<String>,
{
    let token = required(&lookup, ENV_TOKEN_VAR, TOKEN_HINT)?;
    let username = required(&lookup, ENV_USERNAME_VAR, USERNAME_HINT)?;
    Ok(Credentials { token, username })
}

fn required<F>(
    lookup: &F,
    variable: &'static str,
    hint: &'static str,
) -> Result<String, ReportError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(variable) {
        Some(val) if !val.trim().is_empty() => Ok(val.trim().to_string()),
        _ => Err(ReportError::Configuration { variable, hint }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_loads_both_variables() {
        let creds = load_credentials_with(env(&[
            (ENV_TOKEN_VAR, "ghp_abc"),
            (ENV_USERNAME_VAR, "octocat"),
        ]))
        .unwrap();
        assert_eq!(creds.token, "ghp_abc");
        assert_eq!(creds.username, "octocat");
    }

    #[test]
    fn test_values_are_trimmed() {
        let creds = load_credentials_with(env(&[
            (ENV_TOKEN_VAR, "  ghp_abc\n"),
            (ENV_USERNAME_VAR, " octocat "),
        ]))
        .unwrap();
        assert_eq!(creds.token, "ghp_abc");
        assert_eq!(creds.username, "octocat");
    }

    #[test]
    fn test_missing_token_names_token_variable() {
        let err = load_credentials_with(env(&[(ENV_USERNAME_VAR, "octocat")])).unwrap_err();
        match err {
            ReportError::Configuration { variable, hint } => {
                assert_eq!(variable, ENV_TOKEN_VAR);
                assert!(hint.contains("https://github.com/settings/tokens"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_blank_username_is_rejected() {
        let err = load_credentials_with(env(&[
            (ENV_TOKEN_VAR, "ghp_abc"),
            (ENV_USERNAME_VAR, "   "),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ReportError::Configuration { variable: ENV_USERNAME_VAR, .. }
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let creds = Credentials {
            token: "ghp_secret".to_string(),
            username: "octocat".to_string(),
        };
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("ghp_secret"));
        assert!(debug.contains("octocat"));
    }
}
