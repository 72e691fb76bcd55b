//! One-hot encoding of a clean record into the model input row.

use tracing::error;

use crate::types::record::CleanRecord;
use crate::types::schema::FeatureSchema;
use crate::types::vector::FeatureVector;

/// Encode `clean` into a vector aligned with `schema.encoded_layout()`.
///
/// Every column starts at 0. Numeric fields are copied into their columns;
/// each non-baseline category sets its `<Field>_<Label>` column to 1.
pub fn encode(schema: &FeatureSchema, clean: &CleanRecord) -> FeatureVector {
    let mut vector = FeatureVector::zeros(schema.width());

    for (column, value) in clean.numeric_columns() {
        set_column(schema, &mut vector, column, value);
    }
    for column in clean.hot_columns() {
        set_column(schema, &mut vector, &column, 1.0);
    }

    vector
}

fn set_column(schema: &FeatureSchema, vector: &mut FeatureVector, column: &str, value: f64) {
    match schema.column_index(column) {
        Some(index) => vector.set(index, value),
        // Record and layout are derived from the same categories; unreachable
        // unless the schema was built by hand without this column.
        None => error!(column, "Column missing from encoded layout"),
    }
}
