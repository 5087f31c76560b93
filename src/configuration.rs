use std::{env, fs, io::ErrorKind, ops::Deref, sync::Arc};

use chrono::FixedOffset;
use tracing::info;

use crate::{
    dao::get_path, error::Error, helpers::parse_utc_offset,
    provider::DatabasePool,
};

#[derive(Debug)]
pub struct AppState<T>(Arc<T>);

impl<T> AppState<T> {
    pub fn new(state: T) -> AppState<T> {
        AppState(Arc::new(state))
    }
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> AppState<T> {
        AppState(Arc::clone(&self.0))
    }
}

impl<T> Deref for AppState<T> {
    type Target = Arc<T>;

    fn deref(&self) -> &Arc<T> {
        &self.0
    }
}

#[derive(Debug)]
pub struct State {
    pub config: Config,
    pub database: DatabasePool,
}

impl State {
    pub async fn new(
        config: Config,
        database: DatabasePool,
    ) -> Result<State, Error> {
        Self::init_migrations(&database).await?;
        Ok(Self { config, database })
    }

    async fn init_migrations(database: &DatabasePool) -> Result<(), Error> {
        let files = vec!["sync_data.sql", "exchange_rate.sql"];

        let dir = env!("CARGO_MANIFEST_DIR");

        for file in files {
            let path = get_path(dir, file);
            let data = fs::read_to_string(path)?;
            sqlx::raw_sql(data.as_str())
                .execute(database.get_pool())
                .await?;
        }

        info!("Schema migrations applied");

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub server_host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub static_dir: String,
    pub default_exchange_rate: f64,
    pub utc_offset: FixedOffset,
}

const DEFAULT_EXCHANGE_RATE: f64 = 35.0;
const DEFAULT_UTC_OFFSET: &str = "+07:00";
const DEFAULT_MAX_CONNECTIONS: u32 = 20;

pub fn get_configuration() -> Result<Config, Error> {
    let database_url = env::var("DATABASE_URL")?;
    let max_connections = match env::var("MAX_CONNECTIONS") {
        Ok(value) => value.parse()?,
        Err(_) => DEFAULT_MAX_CONNECTIONS,
    };

    let server_host = env::var("SERVER_HOST")?;
    let port: u16 = env::var("PORT")?.parse()?;
    let allowed_origins = env::var("ALLOWED_ORIGINS")?
        .split(',')
        .map(|item| item.to_owned())
        .collect::<Vec<String>>();
    let static_dir = format!(
        "{}/{}",
        env!("CARGO_MANIFEST_DIR"),
        env::var("STATIC_DIRECTORY")?
    );

    let default_exchange_rate = match env::var("DEFAULT_EXCHANGE_RATE") {
        Ok(value) => value.parse()?,
        Err(_) => DEFAULT_EXCHANGE_RATE,
    };

    let utc_offset = parse_utc_offset(
        &env::var("UTC_OFFSET").unwrap_or_else(|_| DEFAULT_UTC_OFFSET.to_owned()),
    )?;

    let config = Config {
        database_url,
        max_connections,
        server_host,
        port,
        allowed_origins,
        static_dir,
        default_exchange_rate,
        utc_offset,
    };

    Ok(config)
}

/// Loads `.env` from the crate directory into the process environment.
/// A missing file leaves the environment untouched.
pub fn set_configuration() -> Result<(), Error> {
    let config_file: &str = ".env";

    let directory = env!("CARGO_MANIFEST_DIR");
    let path = format!("{}/{}", directory, config_file);

    let config_string = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(Error::Io(e)),
    };

    for (key, value) in parse_config_string(&config_string) {
        env::set_var(key, value);
    }

    Ok(())
}

fn parse_config_string(config: &str) -> Vec<(&str, &str)> {
    config
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        .collect()
}
