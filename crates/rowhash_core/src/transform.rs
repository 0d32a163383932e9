// transform.rs: the step contract between the host engine and a concrete transform
use crate::row::Row;
use crate::schema::RowSchema;

/// A single pipeline step as the host engine drives it.
///
/// Lifecycle per step copy: the host installs settings via `configure`, calls
/// `prepare_output_schema` exactly once before the first row, then calls
/// `apply` once per row with the negotiated schema. Each copy owns its own
/// instance; nothing is shared across parallel copies.
pub trait StepTransform {
    type Config;
    type Error;

    /// Install settings. Clears any schema cached by a previous lifecycle.
    fn configure(&mut self, config: Self::Config);

    /// Negotiate the downstream schema from the upstream one. The result is
    /// cached on the instance and must be passed back to every `apply` call.
    fn prepare_output_schema(&mut self, input: &RowSchema) -> RowSchema;

    /// Process one row. Ownership of the row transfers in and the transformed
    /// (possibly extended) row transfers back out; no references are retained.
    fn apply(&self, row: Row, output: &RowSchema) -> Result<Row, Self::Error>;
}
