use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::consts::{CONFIG_ENV_PREFIX, CONFIG_FILE_NAME, DEFAULT_DUPLICATE_THRESHOLD};
use crate::error::Result;

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Similarity both hashes must reach for a pair to count as duplicates
    pub duplicate_threshold: f64,
    pub output: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            duplicate_threshold: DEFAULT_DUPLICATE_THRESHOLD,
            output: OutputFormat::default(),
        }
    }
}

impl AppConfig {
    /// Layers `image-hash.{toml,json,...}` from the working directory (or the
    /// explicit `path`, which must exist) under `IMAGE_HASH_*` env vars.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, CONFIG_ENV_PREFIX)
    }

    fn load_with_env(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(CONFIG_FILE_NAME).required(false),
        };

        let conf = Config::builder()
            .set_default("duplicate_threshold", DEFAULT_DUPLICATE_THRESHOLD)?
            .set_default("output", "text")?
            .add_source(file)
            .add_source(Environment::with_prefix(env_prefix))
            .build()?;

        let app_config: AppConfig = conf.try_deserialize()?;
        log::debug!("Loaded config {:?}", app_config);
        Ok(app_config)
    }
}
