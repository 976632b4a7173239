// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command-line configuration for the server.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use protown_persistence::{Persistence, PersistenceError};
use thiserror::Error;
use tracing::info;

/// Environment variable read for `--mysql-url`.
///
/// Project-scoped so a `DATABASE_URL` exported for other tooling never
/// collides with `--database`.
pub const MYSQL_URL_ENV: &str = "PROTOWN_MYSQL_URL";

/// ProTown Server - HTTP server for the ProTown lead marketplace
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    pub database: Option<PathBuf>,

    /// `MySQL`/`MariaDB` connection URL
    #[arg(long, env = MYSQL_URL_ENV)]
    pub mysql_url: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub bind: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("--database and --mysql-url cannot be used together")]
    ConflictingDatabases,
    #[error("invalid bind address '{address}'")]
    InvalidBindAddress {
        address: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("failed to open database")]
    Database(#[from] PersistenceError),
}

/// Where the server keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    InMemory,
    SqliteFile(PathBuf),
    Mysql(String),
}

/// Validated server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    pub database: DatabaseTarget,
}

impl ServerConfig {
    /// Validates parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if both database options are set or the bind
    /// address is not an IP address.
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let ip: IpAddr = args
            .bind
            .trim()
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddress {
                address: args.bind.clone(),
                source,
            })?;

        let database: DatabaseTarget = match (args.database, args.mysql_url) {
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingDatabases),
            (Some(path), None) => DatabaseTarget::SqliteFile(path),
            (None, Some(url)) => DatabaseTarget::Mysql(url),
            (None, None) => DatabaseTarget::InMemory,
        };

        Ok(Self {
            listen_addr: SocketAddr::new(ip, args.port),
            database,
        })
    }

    /// Opens the configured database and runs migrations.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Database` if the connection or migrations fail.
    pub fn open_persistence(&self) -> Result<Persistence, ConfigError> {
        let persistence: Persistence = match &self.database {
            DatabaseTarget::InMemory => {
                info!("Using in-memory database");
                Persistence::new_in_memory()?
            }
            DatabaseTarget::SqliteFile(path) => {
                info!("Using file-based database at: {}", path.display());
                Persistence::new_with_file(path)?
            }
            DatabaseTarget::Mysql(url) => {
                info!("Using MySQL/MariaDB database");
                Persistence::new_with_mysql(url)?
            }
        };
        Ok(persistence)
    }
}
