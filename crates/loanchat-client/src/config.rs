use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::{ClientError, ClientResult};

pub const DATA_ENV: &str = "LOANCHAT_DATA";
pub const HOME_ENV: &str = "LOANCHAT_HOME";
pub const CURRENCY_ENV: &str = "LOANCHAT_CURRENCY";
pub const DEFAULT_DATA_FILE: &str = "loan_data.csv";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

const MAX_CURRENCY_SYMBOL_CHARS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_path: PathBuf,
    pub currency_symbol: String,
}

pub fn resolve_settings(data_flag: Option<&str>) -> ClientResult<Settings> {
    resolve_settings_with(data_flag, |name| std::env::var_os(name))
}

/// Resolves settings with an injectable environment lookup.
///
/// Data file precedence: `--data`, then `LOANCHAT_DATA`, then
/// `loan_data.csv` in the working directory when it exists, then
/// `loan_data.csv` under the loanchat home (`LOANCHAT_HOME` or `~/.loanchat`).
pub fn resolve_settings_with<F>(data_flag: Option<&str>, lookup: F) -> ClientResult<Settings>
where
    F: Fn(&str) -> Option<OsString>,
{
    let data_path = resolve_data_path(data_flag, &lookup)?;
    let currency_symbol = resolve_currency_symbol(&lookup)?;
    Ok(Settings {
        data_path,
        currency_symbol,
    })
}

fn resolve_data_path<F>(data_flag: Option<&str>, lookup: &F) -> ClientResult<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    if let Some(flag) = data_flag.map(str::trim).filter(|value| !value.is_empty()) {
        return absolutize(Path::new(flag));
    }

    if let Some(from_env) = lookup(DATA_ENV).filter(|value| !value.is_empty()) {
        return absolutize(Path::new(&from_env));
    }

    let local = absolutize(Path::new(DEFAULT_DATA_FILE))?;
    if local.is_file() {
        return Ok(local);
    }

    match resolve_home(lookup) {
        Some(home) => absolutize(&home.join(DEFAULT_DATA_FILE)),
        None => Ok(local),
    }
}

fn resolve_home<F>(lookup: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    if let Some(override_path) = lookup(HOME_ENV).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(override_path));
    }
    home::home_dir().map(|home_path| home_path.join(".loanchat"))
}

fn resolve_currency_symbol<F>(lookup: &F) -> ClientResult<String>
where
    F: Fn(&str) -> Option<OsString>,
{
    let Some(raw) = lookup(CURRENCY_ENV) else {
        return Ok(DEFAULT_CURRENCY_SYMBOL.to_string());
    };

    let Some(text) = raw.to_str() else {
        return Err(ClientError::config_invalid(
            CURRENCY_ENV,
            "value is not valid UTF-8",
        ));
    };

    let symbol = text.trim();
    if symbol.is_empty() {
        return Err(ClientError::config_invalid(CURRENCY_ENV, "value is blank"));
    }
    if symbol.chars().count() > MAX_CURRENCY_SYMBOL_CHARS {
        return Err(ClientError::config_invalid(
            CURRENCY_ENV,
            &format!("value must be at most {MAX_CURRENCY_SYMBOL_CHARS} characters"),
        ));
    }

    Ok(symbol.to_string())
}

fn absolutize(path: &Path) -> ClientResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|error| ClientError::data_file_unreadable(path, &error.to_string()))
}
