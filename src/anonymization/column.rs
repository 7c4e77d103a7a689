//! One column, end to end

use crate::anonymization::codec::ValueCodec;
use crate::anonymization::mapper::UniqueValueMapper;
use crate::anonymization::registry::TypeRegistry;
use crate::anonymization::request::{TransformKind, TransformOp, TransformRequest};
use crate::domain::{Column, ColumnType, Result, Table};

/// A transformed column together with what it took to produce it
#[derive(Debug, Clone)]
pub struct ColumnTransform {
    /// Replacement column, same name and length as the source
    pub column: Column,
    /// Kind that was applied
    pub kind: TransformKind,
    /// Number of codec calls made (distinct source values)
    pub distinct_values: usize,
}

/// Applies one request to one column of a table
///
/// The source table is only read; the result is a new column.
pub struct ColumnTransformer<'a> {
    mapper: UniqueValueMapper<'a>,
    registry: &'a TypeRegistry,
}

impl<'a> ColumnTransformer<'a> {
    /// Create a transformer over `codec`, casting through `registry`
    pub fn new(codec: &'a ValueCodec, registry: &'a TypeRegistry) -> Self {
        Self {
            mapper: UniqueValueMapper::new(codec, registry),
            registry,
        }
    }

    /// Validate `request`, transform its column and return the new column
    ///
    /// # Errors
    ///
    /// Request errors ([`UnknownTransformKind`], [`MissingParameter`],
    /// [`UnknownCategory`], [`ColumnNotFound`]) are raised before any value is
    /// transformed. Codec errors propagate unchanged.
    ///
    /// [`UnknownTransformKind`]: crate::domain::ScrubError::UnknownTransformKind
    /// [`UnknownCategory`]: crate::domain::ScrubError::UnknownCategory
    /// [`MissingParameter`]: crate::domain::ScrubError::MissingParameter
    /// [`ColumnNotFound`]: crate::domain::ScrubError::ColumnNotFound
    pub fn apply(&self, table: &Table, request: &TransformRequest) -> Result<Column> {
        Ok(self.transform(table, request)?.column)
    }

    /// Like [`ColumnTransformer::apply`], also reporting the mapping size
    pub fn transform(&self, table: &Table, request: &TransformRequest) -> Result<ColumnTransform> {
        let op = request.validate()?;
        let source = table.column(&request.column)?;

        let mapping = self.mapper.build(source, &op)?;
        let values = mapping.apply(source.values());
        let dtype = self.output_type(source, &op);

        Ok(ColumnTransform {
            column: Column::new(source.name(), dtype, values),
            kind: op.kind(),
            distinct_values: mapping.len(),
        })
    }

    fn output_type(&self, source: &Column, op: &TransformOp) -> ColumnType {
        match op {
            TransformOp::Encrypt => ColumnType::Bytes,
            TransformOp::Decrypt { target_type, .. } => self
                .mapper
                .decrypt_target(source.name(), *target_type)
                .unwrap_or(ColumnType::String),
            TransformOp::Synthesize { category } => category.output_type(),
            TransformOp::Truncate { .. } => self
                .registry
                .get(source.name())
                .unwrap_or_else(|| source.dtype()),
            TransformOp::Redact => {
                if source.values().iter().any(|v| v.as_text().is_some()) {
                    ColumnType::String
                } else {
                    source.dtype()
                }
            }
        }
    }
}
