pub use super::cache_entry::Entity as CacheEntry;
pub use super::course::Entity as Course;
