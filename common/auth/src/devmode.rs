/// The token signing secret used when running with `--devmode`.
///
/// This is not a secret. Don't use this in production.
pub const TOKEN_SECRET: &str = "Jd4tKqXzR8pWm2BhYcN6vLgE3saUf7T0";

/// The default user created when running with `--devmode` against a fresh database.
pub const USERNAME: &str = "admin";

/// The password of the default `--devmode` user.
///
/// This is not a secret. Don't use this in production.
pub const PASSWORD: &str = "admin";

/// Get the token secret for `--devmode`.
///
/// This can be either the value of [`TOKEN_SECRET`], or it can be overridden using the
/// environment variable `DEVTRACK_TOKEN_SECRET`.
pub fn token_secret() -> String {
    std::env::var("DEVTRACK_TOKEN_SECRET").unwrap_or_else(|_| TOKEN_SECRET.to_string())
}
