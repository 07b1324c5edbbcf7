//! Notion database access: record decoding, mapping and paged fetching.

mod client;
mod fetch;
mod mapper;
mod record;

pub use client::{DatabaseSource, NotionClient, QueryPage};
pub use fetch::EventFetcher;
pub use mapper::map_record;
pub use record::{DateValue, Property, Record, RichText};

#[cfg(test)]
pub(crate) use fetch::tests as fixtures;
