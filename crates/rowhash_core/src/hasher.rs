// hasher.rs: murmur3 field hasher over schema'd rows
use log::info;
use thiserror::Error;

use crate::config::HashConfig;
use crate::row::{CellValue, Row};
use crate::schema::{FieldKind, FieldMeta, RowSchema};
use crate::transform::StepTransform;

/// Fallback seed used whenever the configured seed is zero or negative.
/// Legacy default (2^30 - 1), kept verbatim for digest compatibility; not a
/// cryptographic choice.
pub const DEFAULT_SEED: i64 = 1_073_741_823;

/// Per-row failures. Schema-resolution misses are deliberately not here:
/// they pass the row through unchanged with an advisory log line.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("field {field:?} holds a {found} value where text is required")]
    TypeMismatch { field: String, found: &'static str },
}

/// Seed actually fed to the digest after normalization.
pub fn effective_seed(seed: i64) -> u64 {
    if seed <= 0 {
        DEFAULT_SEED as u64
    } else {
        seed as u64
    }
}

/// Low 64 bits of the 128-bit MurmurHash3 (x64) digest, as a signed value.
pub fn murmur3_low64(seed: u64, bytes: &[u8]) -> i64 {
    let digest = fastmurmur3::murmur3_x64_128(bytes, seed as _);
    digest as u64 as i64
}

/// Hashes one named text field of each row into a named 64-bit integer field.
///
/// Stateless across rows apart from the configuration and the output schema
/// cached by `prepare_output_schema`.
pub struct FieldHasher {
    config: HashConfig,
    output_schema: Option<RowSchema>,
}

impl FieldHasher {
    pub fn new(config: HashConfig) -> Self {
        Self { config, output_schema: None }
    }

    pub fn config(&self) -> &HashConfig {
        &self.config
    }

    /// Schema negotiated by `prepare_output_schema`, if it ran already.
    pub fn output_schema(&self) -> Option<&RowSchema> {
        self.output_schema.as_ref()
    }

    fn hash_text(&self, text: &str) -> i64 {
        murmur3_low64(effective_seed(self.config.seed_value), text.as_bytes())
    }
}

impl StepTransform for FieldHasher {
    type Config = HashConfig;
    type Error = TransformError;

    fn configure(&mut self, config: HashConfig) {
        self.config = config;
        self.output_schema = None;
    }

    fn prepare_output_schema(&mut self, input: &RowSchema) -> RowSchema {
        let output = if input.index_of(&self.config.out_field).is_some() {
            input.clone()
        } else {
            input.with_appended(FieldMeta::new(&self.config.out_field, FieldKind::Integer))
        };
        self.output_schema = Some(output.clone());
        output
    }

    fn apply(&self, mut row: Row, output: &RowSchema) -> Result<Row, TransformError> {
        let indices = (
            output.index_of(&self.config.in_field),
            output.index_of(&self.config.out_field),
        );
        let (in_idx, out_idx) = match indices {
            (Some(i), Some(o)) => (i, o),
            _ => {
                // Misconfigured step: do not abort the pipeline, pass through.
                info!("no input and/or output field for hash");
                return Ok(row);
            }
        };

        if row.len() < output.len() {
            row.extend_to(output.len());
        }

        let text = match row.cell(in_idx) {
            Some(CellValue::Text(s)) => s.as_str(),
            Some(other) => {
                return Err(TransformError::TypeMismatch {
                    field: self.config.in_field.clone(),
                    found: other.kind_name(),
                })
            }
            None => {
                return Err(TransformError::TypeMismatch {
                    field: self.config.in_field.clone(),
                    found: "null",
                })
            }
        };
        let hashed = self.hash_text(text);
        row.set(out_idx, CellValue::Integer(hashed));
        Ok(row)
    }
}
