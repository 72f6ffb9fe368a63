pub mod bucket;
pub mod default;
pub mod identifier;
pub mod table;

pub use bucket::Bucket;
pub use bucket::UnknownBucket;
pub use table::IdWidth;
pub use table::Table;

pub const META_TABLE: &str = "meta";
pub const META_WIDTH_KEY: &[u8] = b"width";
