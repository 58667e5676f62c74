use crate::config::{BoxConfig, Command};
use crate::core::collections::{extract_keys, median, serialize_cache_key, sort_by, sort_by_unique, to_hashtable, SortOrder};
use crate::core::cookie::{set_cookie, CookieOptions};
use crate::core::html::{render_select, SelectControl};
use crate::core::query::{modify_current_query_string, modify_query_string};
use crate::core::sanitize::sanitize_with_tag;
use crate::core::Record;
use crate::utils::error::{BoxError, Result};
use serde_json::Value;

/// Runs one CLI command and returns what should be printed.
pub fn run_command(config: &BoxConfig, command: &Command) -> Result<String> {
    tracing::debug!("Running command: {:?}", command);

    match command {
        Command::Sanitize { mode, value } => {
            let result = sanitize_with_tag(&parse_json_arg(value), mode)?;
            Ok(render_value(&result))
        }

        Command::Query {
            url,
            set,
            unset,
        } => {
            let mut updates: Vec<(String, Option<String>)> = Vec::new();
            for raw in set {
                let (name, value) = split_pair("--set", raw)?;
                updates.push((name, Some(value)));
            }
            updates.extend(unset.iter().map(|name| (name.clone(), None)));

            let updates: Vec<(&str, Option<&str>)> = updates
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_deref()))
                .collect();
            Ok(match url {
                Some(url) => modify_query_string(&updates, url, true),
                None => modify_current_query_string(&config.request_context(), &updates, true),
            })
        }

        Command::Cookie {
            name,
            value,
            lifetime,
            domain,
            http_only,
        } => {
            let options = CookieOptions {
                lifetime: lifetime.or(config.cookie.lifetime),
                domain: domain.clone().or_else(|| config.cookie.domain.clone()),
                http_only: *http_only || config.cookie.http_only,
                ..config.cookie.clone()
            };

            let mut headers: Vec<(String, String)> = Vec::new();
            set_cookie(&mut headers, name, value.as_deref(), &options, &config.request_context())?;

            Ok(headers
                .iter()
                .map(|(header, value)| format!("{}: {}", header, value))
                .collect::<Vec<_>>()
                .join("\n"))
        }

        Command::Median { numbers } => Ok(median(numbers)?.to_string()),

        Command::CacheKey { args } => {
            let args: Vec<Value> = args.iter().map(|arg| parse_json_arg(arg)).collect();
            serialize_cache_key(&args)
        }

        Command::Select {
            name,
            options,
            current,
            default,
            id,
            class,
        } => {
            let mut control = SelectControl::new(name.clone());
            for raw in options {
                let (value, label) = split_pair("--option", raw)?;
                control = control.option(value, label);
            }
            control.current = current.clone();
            control.default = default.clone();
            control.id = id.clone();
            control.classes = class.clone();

            Ok(render_select(&control))
        }

        Command::Index { file, key, strict } => {
            let records = read_records(file)?;
            let index = if *strict {
                to_hashtable(&records, key, true)?
            } else {
                extract_keys(&records, key)
            };
            tracing::info!("Indexed {} of {} records by '{}'", index.len(), records.len(), key);
            Ok(serde_json::to_string_pretty(&index.to_value())?)
        }

        Command::Sort {
            file,
            key,
            order,
            unique,
        } => {
            let records = read_records(file)?;
            let order = SortOrder::parse(order);
            let sorted = if *unique {
                sort_by_unique(&records, key, order)?
            } else {
                sort_by(&records, key, order)?
            };
            Ok(serde_json::to_string_pretty(&sorted)?)
        }
    }
}

fn read_records(path: &str) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path)?;
    let records: Vec<Record> = serde_json::from_str(&content)?;
    tracing::debug!("Loaded {} records from {}", records.len(), path);
    Ok(records)
}

/// JSON when it parses, the raw text otherwise.
fn parse_json_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn split_pair(flag: &str, raw: &str) -> Result<(String, String)> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| BoxError::InvalidConfigValueError {
            field: flag.to_string(),
            value: raw.to_string(),
            reason: "Expected NAME=VALUE".to_string(),
        })
}
