// Copyright (c) 2026 The pintan Developers

use std::{
    io::{BufRead, Write},
    path::Path,
};

use log::debug;
use serde::de::DeserializeOwned;

use pintan_core::{
    dialog::Task,
    passport::{Config, Driver},
    Error,
};
use pintan_proto::data::Data;

/// Helper to load property data from JSON (`.json`) or `key=value` files
pub async fn read_data(file_name: &str) -> anyhow::Result<Data> {
    debug!("Reading data from '{}'", file_name);

    let s = tokio::fs::read_to_string(file_name).await?;

    let p = Path::new(file_name);
    let d = match p.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&s)?,
        _ => parse_properties(&s)?,
    };

    Ok(d)
}

/// Parse `key=value` lines, skipping blanks and `#` comments
pub fn parse_properties(s: &str) -> anyhow::Result<Data> {
    let mut d = Data::new();

    for (n, line) in s.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line.split_once('=') {
            Some((k, v)) => {
                d.set(k.trim(), v.trim());
            }
            None => return Err(anyhow::anyhow!("invalid property at line {}: '{}'", n + 1, line)),
        }
    }

    Ok(d)
}

/// Helper to load configuration, falling back to defaults where no file is provided
pub async fn read_config(file_name: Option<&str>) -> anyhow::Result<Config> {
    let file_name = match file_name {
        Some(f) => f,
        None => return Ok(Config::default()),
    };

    debug!("Reading config from '{}'", file_name);

    read_toml(file_name).await
}

async fn read_toml<T: DeserializeOwned>(file_name: &str) -> anyhow::Result<T> {
    let s = tokio::fs::read_to_string(file_name).await?;
    let v = toml::from_str(&s)?;
    Ok(v)
}

/// [Driver] prompting on stdin / stderr
#[derive(Clone, PartialEq, Debug, Default)]
pub struct StdinDriver;

impl StdinDriver {
    fn prompt(&self, text: &str) -> String {
        eprint!("{text}: ");
        let _ = std::io::stderr().flush();

        let mut line = String::new();
        if let Err(e) = std::io::stdin().lock().read_line(&mut line) {
            debug!("failed to read stdin: {}", e);
        }

        line.trim().to_string()
    }
}

impl Driver for StdinDriver {
    fn request_pin(&mut self) -> String {
        self.prompt("PIN")
    }

    fn request_tan(&mut self, prompt: &str, flicker: Option<&str>) -> String {
        if let Some(f) = flicker {
            eprintln!("flicker code: {f}");
        }
        self.prompt(prompt)
    }

    fn select_method(&mut self, options: &str) -> String {
        eprintln!("Available TAN methods:");
        for o in options.split('|') {
            eprintln!("  {o}");
        }
        self.prompt("TAN method")
    }

    fn request_tan_media(&mut self, default: &str) -> String {
        let v = self.prompt(&format!("TAN media [{default}]"));
        match v.is_empty() {
            true => default.to_string(),
            false => v,
        }
    }

    fn wrong_pin(&mut self) {
        eprintln!("PIN rejected by bank");
    }

    fn user_id_changed(&mut self, ids: &str) {
        eprintln!("User / customer id changed: {ids}");
    }

    fn encode_segment(&self, _task: &Task) -> Result<Vec<u8>, Error> {
        Err(Error::EncodingFailed)
    }
}
