// rowhash_core: pure Rust library for hashing a named text field of pipeline rows
// into a 64-bit murmur3 value, plus the step configuration and persistence primitives.
pub mod config;
pub mod hasher;
pub mod row;
pub mod schema;
pub mod store;
pub mod transform;

pub use config::{ConfigError, ConfigTags, HashConfig};
pub use hasher::{effective_seed, murmur3_low64, FieldHasher, TransformError, DEFAULT_SEED};
pub use row::{CellValue, Row};
pub use schema::{FieldKind, FieldMeta, RowSchema};
pub use store::{
    config_from_json, config_to_json, ensure_config_loaded, load_config_file, ConfigStore,
    JsonFileStore, LoadedConfig, StoreError, CONFIG_CACHE,
};
pub use transform::StepTransform;
