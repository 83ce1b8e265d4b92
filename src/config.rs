//! Configuración desde variables de entorno (y `.env` si existe).
//!
//! Valores que no se pueden interpretar caen al default y dejan un aviso en
//! `warnings`; el binario los registra una vez que el logging está listo.

use std::env;
use std::path::PathBuf;

use crate::chart::ChartOptions;

pub const BIND_VAR: &str = "SECRETARIA_BIND";
pub const DATA_DIR_VAR: &str = "SECRETARIA_DATA_DIR";
pub const LOG_JSON_VAR: &str = "SECRETARIA_LOG_JSON";
pub const CHART_WIDTH_VAR: &str = "SECRETARIA_CHART_WIDTH";
pub const CHART_HEIGHT_VAR: &str = "SECRETARIA_CHART_HEIGHT";

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind: String,
    pub data_dir: PathBuf,
    pub log_json: bool,
    pub chart: ChartOptions,
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind: DEFAULT_BIND.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_json: false,
            chart: ChartOptions::default(),
            warnings: Vec::new(),
        }
    }
}

fn load_dotenv() {
    let _ = dotenv::dotenv();
}

impl Config {
    pub fn from_env() -> Self {
        load_dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Construye la configuración con una función de búsqueda arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(bind) = lookup(BIND_VAR).filter(|v| !v.trim().is_empty()) {
            config.bind = bind.trim().to_string();
        }
        if let Some(dir) = lookup(DATA_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir.trim());
        }
        if let Some(raw) = lookup(LOG_JSON_VAR) {
            match parse_bool(&raw) {
                Some(flag) => config.log_json = flag,
                None => config.warn(LOG_JSON_VAR, &raw),
            }
        }
        if let Some(raw) = lookup(CHART_WIDTH_VAR) {
            match parse_dimension(&raw) {
                Some(width) => config.chart.width = width,
                None => config.warn(CHART_WIDTH_VAR, &raw),
            }
        }
        if let Some(raw) = lookup(CHART_HEIGHT_VAR) {
            match parse_dimension(&raw) {
                Some(height) => config.chart.height = height,
                None => config.warn(CHART_HEIGHT_VAR, &raw),
            }
        }
        config
    }

    fn warn(&mut self, name: &str, raw: &str) {
        self.warnings
            .push(format!("{}={:?} no es válido, se usa el valor por defecto", name, raw));
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}

fn parse_dimension(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|v| *v > 0)
}
