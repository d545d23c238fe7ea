//! Configuration module

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use recommender_core::constants::{
    DEFAULT_COLUMNS_FILE, DEFAULT_DATASET_FILE, DEFAULT_DATA_DIR, DEFAULT_DEPARTMENTS_FILE,
    DEFAULT_ENCODER_FILE, DEFAULT_FACULTY_FILE, DEFAULT_MAX_DOCTORS, DEFAULT_MODEL_FILE,
};
use recommender_core::ArtifactPaths;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// Directory holding the model and lookup tables
    pub data_dir: PathBuf,

    pub model_file: String,
    pub encoder_file: String,
    pub columns_file: String,
    pub departments_file: String,
    pub faculty_file: String,

    /// Raw symptom dataset; empty value disables the matching fallback
    pub dataset_file: Option<String>,

    /// Doctors returned per recommendation
    pub max_doctors: usize,

    pub log_format: LogFormat,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR)),

            model_file: env::var("MODEL_FILE").unwrap_or_else(|_| DEFAULT_MODEL_FILE.to_string()),
            encoder_file: env::var("ENCODER_FILE").unwrap_or_else(|_| DEFAULT_ENCODER_FILE.to_string()),
            columns_file: env::var("COLUMNS_FILE").unwrap_or_else(|_| DEFAULT_COLUMNS_FILE.to_string()),
            departments_file: env::var("DEPARTMENTS_FILE")
                .unwrap_or_else(|_| DEFAULT_DEPARTMENTS_FILE.to_string()),
            faculty_file: env::var("FACULTY_FILE").unwrap_or_else(|_| DEFAULT_FACULTY_FILE.to_string()),

            dataset_file: match env::var("DATASET_FILE") {
                Ok(file) if file.trim().is_empty() => None,
                Ok(file) => Some(file),
                Err(_) => Some(DEFAULT_DATASET_FILE.to_string()),
            },

            max_doctors: env::var("MAX_DOCTORS")
                .ok()
                .and_then(|n| n.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(DEFAULT_MAX_DOCTORS),

            log_format: env::var("LOG_FORMAT")
                .map(|f| LogFormat::parse(&f))
                .unwrap_or(LogFormat::Pretty),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Artifact locations for the loader
    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            data_dir: self.data_dir.clone(),
            model_file: self.model_file.clone(),
            encoder_file: self.encoder_file.clone(),
            columns_file: self.columns_file.clone(),
            departments_file: self.departments_file.clone(),
            faculty_file: self.faculty_file.clone(),
            dataset_file: self.dataset_file.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let paths = ArtifactPaths::new(DEFAULT_DATA_DIR);
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            data_dir: paths.data_dir,
            model_file: paths.model_file,
            encoder_file: paths.encoder_file,
            columns_file: paths.columns_file,
            departments_file: paths.departments_file,
            faculty_file: paths.faculty_file,
            dataset_file: paths.dataset_file,
            max_doctors: DEFAULT_MAX_DOCTORS,
            log_format: LogFormat::Pretty,
            environment: "development".to_string(),
        }
    }
}
