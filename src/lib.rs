#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::BoxConfig;

pub use crate::core::collections::{
    extract_from_each, extract_keys, flatten, has_duplicates, median, serialize_cache_key, sort_by,
    to_hashtable, true_any_of, true_every_of, SortOrder,
};
pub use crate::core::cookie::{set_cookie, CookieOptions};
pub use crate::core::html::{render_select, SelectControl};
pub use crate::core::query::modify_query_string;
pub use crate::core::sanitize::{sanitize, SanitizeMode};
pub use domain::model::{KeyedIndex, Record, RequestContext};
pub use utils::error::{BoxError, Result};
