pub mod collections;
pub mod cookie;
pub mod html;
pub mod query;
pub mod sanitize;
pub mod strings;

pub use crate::domain::model::{KeyedIndex, Record, RequestContext};
pub use crate::domain::ports::ResponseHeaders;
pub use crate::utils::error::Result;
