//! `Set-Cookie` header construction.

use crate::core::{RequestContext, ResponseHeaders};
use crate::utils::error::{BoxError, Result};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::form_urlencoded;

/// Thirty days.
pub const DEFAULT_LIFETIME: i64 = 2_592_000;

/// Browsers clamp cookie lifetimes to 400 days.
pub const MAX_LIFETIME: i64 = 400 * 24 * 60 * 60;

const FORBIDDEN_NAME_CHARS: &[char] = &['=', ',', ';', ' ', '\t', '\r', '\n', '\x0b', '\x0c'];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookieOptions {
    /// Seconds to live. `0` makes a session cookie, negative or `None` expires
    /// the cookie immediately.
    pub lifetime: Option<i64>,
    /// `None` means the request host with a leading dot.
    pub domain: Option<String>,
    pub path: String,
    pub secure: bool,
    pub http_only: bool,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            lifetime: Some(DEFAULT_LIFETIME),
            domain: None,
            path: "/".to_string(),
            secure: true,
            http_only: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub expires: Option<DateTime<Utc>>,
    pub max_age: Option<i64>,
    pub path: String,
    pub domain: String,
    pub secure: bool,
    pub http_only: bool,
}

impl fmt::Display for SetCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value: String = form_urlencoded::byte_serialize(self.value.as_bytes()).collect();
        write!(f, "{}={}", self.name, value)?;

        if let Some(expires) = self.expires {
            write!(f, "; expires={}", expires.format("%a, %d %b %Y %H:%M:%S GMT"))?;
        }
        if let Some(max_age) = self.max_age {
            write!(f, "; Max-Age={}", max_age)?;
        }

        write!(f, "; path={}; domain={}", self.path, self.domain)?;

        if self.secure {
            f.write_str("; secure")?;
        }
        if self.http_only {
            f.write_str("; HttpOnly")?;
        }
        Ok(())
    }
}

/// Works out the cookie to send. A `None` value deletes the cookie.
pub fn build_set_cookie(
    name: &str,
    value: Option<&str>,
    options: &CookieOptions,
    ctx: &RequestContext,
    now: DateTime<Utc>,
) -> Result<SetCookie> {
    if name.is_empty() || name.contains(FORBIDDEN_NAME_CHARS) {
        return Err(BoxError::InvalidCookieName {
            name: name.to_string(),
        });
    }

    let lifetime = match value {
        Some(_) => options.lifetime,
        None => Some(-1),
    };

    let (expires, max_age) = match lifetime {
        Some(seconds) if seconds > 0 => {
            let expires = TimeDelta::try_seconds(seconds)
                .and_then(|delta| now.checked_add_signed(delta))
                .ok_or(BoxError::InvalidLifetime { lifetime: seconds })?;
            (Some(expires), Some(seconds))
        }
        Some(0) => (None, None),
        None => (Some(now - TimeDelta::hours(1)), Some(0)),
        Some(seconds) if seconds < 0 => (Some(now - TimeDelta::hours(1)), Some(0)),
        Some(seconds) => return Err(BoxError::InvalidLifetime { lifetime: seconds }),
    };

    let domain = match &options.domain {
        Some(domain) => domain.clone(),
        None => format!(".{}", strip_port(&ctx.host)),
    };

    Ok(SetCookie {
        name: name.to_string(),
        value: value.unwrap_or_default().to_string(),
        expires,
        max_age,
        path: options.path.clone(),
        domain,
        secure: options.secure,
        http_only: options.http_only,
    })
}

/// Appends a `Set-Cookie` header for `name` to `headers`.
pub fn set_cookie<H: ResponseHeaders + ?Sized>(
    headers: &mut H,
    name: &str,
    value: Option<&str>,
    options: &CookieOptions,
    ctx: &RequestContext,
) -> Result<SetCookie> {
    let cookie = build_set_cookie(name, value, options, ctx, Utc::now())?;
    tracing::debug!(
        "Setting cookie '{}' for domain {} ({})",
        cookie.name,
        cookie.domain,
        if value.is_some() { "set" } else { "delete" }
    );
    headers.append_header("Set-Cookie", cookie.to_string());
    Ok(cookie)
}

fn strip_port(host: &str) -> &str {
    if let Some(rest) = host.strip_prefix('[') {
        // [v6 address]:port
        return match rest.find(']') {
            Some(end) => &host[..end + 2],
            None => host,
        };
    }

    match host.split_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}
