pub mod engine;
pub mod fallback;
pub mod feed;
pub mod news;
pub mod postal;
pub mod registry;
pub mod service;
pub mod vehicle;

pub use crate::domain::model::{
    Address, ApiResponse, Article, CachePolicy, ErrorEnvelope, QueryParams, ResponseBody,
};
pub use crate::domain::ports::{Adapter, ConfigProvider};
pub use crate::utils::error::Result;
