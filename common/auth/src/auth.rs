//! Both authentication and authorization

use crate::authenticator::AuthenticatorConfig;
use anyhow::anyhow;

#[derive(Clone, Debug, Default, clap::Args)]
#[command(
    rename_all_env = "SCREAMING_SNAKE_CASE",
    next_help_heading = "Authentication & authorization"
)]
#[group(id = "auth")]
pub struct AuthConfigArguments {
    /// Flag to disable authentication and authorization, default is on.
    #[arg(
        id = "auth-disabled",
        default_value_t = false,
        long = "auth-disabled",
        env = "AUTH_DISABLED"
    )]
    pub disabled: bool,

    /// Secret used to sign and validate access tokens
    #[arg(
        id = "auth-token-secret",
        long = "auth-token-secret",
        env = "AUTH_TOKEN_SECRET"
    )]
    pub secret: Option<String>,
}

impl AuthConfigArguments {
    pub fn split(self, devmode: bool) -> Result<Option<AuthenticatorConfig>, anyhow::Error> {
        if self.disabled {
            return Ok(None);
        }

        match self.secret {
            Some(secret) => Ok(Some(AuthenticatorConfig {
                secret,
                ..Default::default()
            })),
            None if devmode => {
                log::warn!("Running with the devmode token secret");
                Ok(Some(Default::default()))
            }
            None => Err(anyhow!(
                "a token secret is required, provide one with --auth-token-secret, or use --devmode or --auth-disabled"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_disabled_no_defaults() {
        let args = AuthConfigArguments {
            disabled: true,
            secret: None,
        };

        let result = args.split(false).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn auth_enabled_with_devmode() {
        let args = AuthConfigArguments {
            disabled: false,
            secret: None,
        };

        let result = args.split(true).unwrap();
        assert!(result.is_some());
        assert_eq!(result.unwrap().secret, crate::devmode::token_secret());
    }

    #[test]
    fn auth_enabled_without_secret_fails() {
        let args = AuthConfigArguments {
            disabled: false,
            secret: None,
        };

        assert!(args.split(false).is_err());
    }

    #[test]
    fn explicit_secret_wins_over_devmode() {
        let args = AuthConfigArguments {
            disabled: false,
            secret: Some("sufficiently-random".into()),
        };

        let result = args.split(true).unwrap().unwrap();
        assert_eq!(result.secret, "sufficiently-random");
    }
}
