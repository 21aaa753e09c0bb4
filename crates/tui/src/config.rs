use std::env;
use std::path::PathBuf;

const OPTS_ENV: &str = "UI_FACADE_OPTS";
const I18N_ENV: &str = "UI_FACADE_I18N";
const STORAGE_ENV: &str = "UI_FACADE_STORAGE";
const EXPORT_DIR_ENV: &str = "UI_FACADE_EXPORT_DIR";
const LOG_ENV: &str = "UI_FACADE_LOG";
const MOUSE_ENV: &str = "UI_FACADE_MOUSE";

const DEFAULT_LOG_FILE: &str = "ui-facade.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub i18n_path: Option<PathBuf>,
    pub storage_path: PathBuf,
    pub export_dir: PathBuf,
    pub log_file: PathBuf,
    pub mouse_capture: bool,
}

pub fn parse_bool_like(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn split_opts(value: &str) -> Vec<String> {
    match shell_words::split(value) {
        Ok(parts) => parts.into_iter().filter(|part| !part.is_empty()).collect(),
        Err(error) => {
            tracing::warn!(%error, "{OPTS_ENV} parse warning; falling back to whitespace split");
            value.split_whitespace().map(str::to_string).collect()
        }
    }
}

/// Last occurrence wins; accepts `--flag=value` and `--flag value`.
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    let prefix = format!("{flag}=");
    let mut found = None;
    let mut iter = args.iter().peekable();
    while let Some(arg) = iter.next() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            found = Some(value.to_string());
        } else if arg == flag {
            if let Some(next) = iter.peek().filter(|next| !next.starts_with("--")) {
                found = Some(next.to_string());
                let _ = iter.next();
            }
        }
    }
    found.filter(|value| !value.trim().is_empty())
}

fn default_storage_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(env::temp_dir)
        .join("ui-facade")
        .join("storage.json")
}

impl DemoConfig {
    pub fn from_env() -> Self {
        let lookup = |key: &str| env::var(key).ok();
        Self::resolve(env::args().skip(1), lookup)
    }

    /// Precedence: CLI flags, then `UI_FACADE_OPTS`, then the per-setting
    /// environment variables.
    pub fn resolve(
        cli: impl IntoIterator<Item = impl AsRef<str>>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let mut args: Vec<String> = lookup(OPTS_ENV)
            .map(|opts| split_opts(&opts))
            .unwrap_or_default();
        args.extend(cli.into_iter().map(|arg| arg.as_ref().to_string()));

        let setting = |flag: &str, key: &str| {
            flag_value(&args, flag).or_else(|| lookup(key).filter(|value| !value.trim().is_empty()))
        };

        let no_mouse_flag = args.iter().any(|arg| arg == "--no-mouse");
        let mouse_env = lookup(MOUSE_ENV)
            .as_deref()
            .and_then(parse_bool_like)
            .unwrap_or(true);

        Self {
            i18n_path: setting("--i18n", I18N_ENV).map(PathBuf::from),
            storage_path: setting("--storage", STORAGE_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(default_storage_path),
            export_dir: setting("--export-dir", EXPORT_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            log_file: setting("--log-file", LOG_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            mouse_capture: mouse_env && !no_mouse_flag,
        }
    }
}
