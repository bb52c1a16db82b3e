pub mod design;
pub mod expr;
pub mod snapshot;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use design::{BinOp, DesignSnapshot, Expr, HdlInterface, HdlParam, HdlShape, HdlType};
pub use expr::SerializedValue;
pub use snapshot::SnapshotBackend;

/// Frontend supplying the design metadata and HDL sources for packaging.
///
/// Only `to_hdl` is mandatory; the type and value serializers default to the
/// reference implementations in [`expr`].
pub trait Backend {
    /// Write the HDL sources of the design into `save_to` and return them in
    /// compile order
    fn to_hdl(&self, design: &DesignSnapshot, save_to: &Path) -> anyhow::Result<Vec<PathBuf>>;

    /// Display string of a type, e.g. `std_logic_vector(7 DOWNTO 0)`
    fn serialize_type(&self, dtype: &HdlType) -> String {
        expr::serialize_type(dtype)
    }

    /// Boundary pair of a vector type
    fn vector_of(&self, dtype: &HdlType) -> Option<(Expr, Expr)> {
        expr::vector_of(dtype)
    }

    fn type_width(&self, dtype: &HdlType) -> Result<SerializedValue> {
        expr::type_width(dtype)
    }

    fn serialize_value(&self, value: &Expr) -> SerializedValue {
        expr::serialize_value(value)
    }
}
