//! Server configuration.
//!
//! Defaults suit a local single-user admin: bind to loopback, keep the SQLite
//! database and uploads next to the binary and open a browser on start. Each
//! value can be overridden through an `ADMIN_*` environment variable:
//!
//! | variable                  | field               | default            |
//! |---------------------------|---------------------|--------------------|
//! | `ADMIN_HOST`              | `host`              | `127.0.0.1`        |
//! | `ADMIN_PORT`              | `port`              | `8080`             |
//! | `ADMIN_DATABASE`          | `database`          | `admin.sqlite`     |
//! | `ADMIN_UPLOAD_DIR`        | `upload_dir`        | `uploads`          |
//! | `ADMIN_FRAMEWORK_VERSION` | `framework_version` | crate version      |
//! | `ADMIN_OPEN_BROWSER`      | `open_browser`      | `true`             |
//! | `ADMIN_HELP_LINKS`        | `help_links`        | CMS user help/docs |
//!
//! `ADMIN_HELP_LINKS` is a `;`-separated list of `Title=url` pairs. An empty
//! value or `none` disables help links.

use admin_common::model::config::HelpLink;
use log::warn;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct AdminConfig {
    pub host: String,
    pub port: u16,
    pub database: PathBuf,
    pub upload_dir: PathBuf,
    pub framework_version: String,
    pub open_browser: bool,
    pub help_links: Vec<HelpLink>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database: PathBuf::from("admin.sqlite"),
            upload_dir: PathBuf::from("uploads"),
            framework_version: env!("CARGO_PKG_VERSION").to_string(),
            open_browser: true,
            help_links: vec![
                HelpLink {
                    title: "CMS User help".to_string(),
                    url: "https://userhelp.silverstripe.org/en/4".to_string(),
                },
                HelpLink {
                    title: "Developer docs".to_string(),
                    url: "https://docs.silverstripe.org/en/4/".to_string(),
                },
            ],
        }
    }
}

impl AdminConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from defaults, overriding each value `lookup`
    /// returns. Unparseable values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("ADMIN_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("ADMIN_PORT") {
            match port.trim().parse() {
                Ok(port) => config.port = port,
                Err(e) => warn!("Ignoring ADMIN_PORT={}: {}", port, e),
            }
        }
        if let Some(database) = lookup("ADMIN_DATABASE") {
            config.database = PathBuf::from(database);
        }
        if let Some(upload_dir) = lookup("ADMIN_UPLOAD_DIR") {
            config.upload_dir = PathBuf::from(upload_dir);
        }
        if let Some(version) = lookup("ADMIN_FRAMEWORK_VERSION") {
            config.framework_version = version;
        }
        if let Some(open) = lookup("ADMIN_OPEN_BROWSER") {
            match parse_flag(&open) {
                Some(open) => config.open_browser = open,
                None => warn!("Ignoring ADMIN_OPEN_BROWSER={}: expected a boolean", open),
            }
        }
        if let Some(links) = lookup("ADMIN_HELP_LINKS") {
            config.help_links = parse_help_links(&links);
        }

        config
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}/admin", self.host, self.port)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_help_links(value: &str) -> Vec<HelpLink> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        return Vec::new();
    }
    value
        .split(';')
        .filter_map(|pair| {
            let Some((title, url)) = pair.split_once('=') else {
                warn!("Ignoring help link without '=': {}", pair);
                return None;
            };
            Some(HelpLink {
                title: title.trim().to_string(),
                url: url.trim().to_string(),
            })
        })
        .collect()
}
