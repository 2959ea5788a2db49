//! Product to Arrow conversion
//!
//! One row per product. The `id` column comes first, followed by one column
//! per property name seen in any product, in name order. A property that
//! never carries more than one value becomes a nullable `Utf8` column;
//! otherwise it becomes a `List<Utf8>` column.

use crate::error::Result;
use crate::registry::Product;
use arrow::array::{ArrayRef, ListBuilder, StringArray, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Name of the identifier column
pub const ID_COLUMN: &str = "id";

/// Infer the table schema of a set of products
pub fn products_schema(products: &[Product]) -> Schema {
    let mut fields = vec![Field::new(ID_COLUMN, DataType::Utf8, false)];
    for (name, multi_valued) in property_columns(products) {
        fields.push(Field::new(name, column_type(multi_valued), true));
    }
    Schema::new(fields)
}

/// Convert products to an Arrow RecordBatch
pub fn products_to_record_batch(products: &[Product]) -> Result<RecordBatch> {
    let schema = Arc::new(products_schema(products));

    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());
    columns.push(Arc::new(StringArray::from_iter_values(
        products.iter().map(|p| p.id.as_str()),
    )));

    for (name, multi_valued) in property_columns(products) {
        let column = if multi_valued {
            list_column(products, name)
        } else {
            scalar_column(products, name)
        };
        columns.push(column);
    }

    Ok(RecordBatch::try_new(schema, columns)?)
}

/// Property names mapped to whether any product holds several values
fn property_columns(products: &[Product]) -> BTreeMap<&str, bool> {
    let mut columns: BTreeMap<&str, bool> = BTreeMap::new();
    for product in products {
        for (name, values) in &product.properties {
            let multi = columns.entry(name.as_str()).or_insert(false);
            *multi |= values.len() > 1;
        }
    }
    columns
}

fn column_type(multi_valued: bool) -> DataType {
    if multi_valued {
        DataType::List(Arc::new(Field::new("item", DataType::Utf8, true)))
    } else {
        DataType::Utf8
    }
}

fn scalar_column(products: &[Product], name: &str) -> ArrayRef {
    let values: StringArray = products.iter().map(|p| p.first(name)).collect();
    Arc::new(values)
}

fn list_column(products: &[Product], name: &str) -> ArrayRef {
    let mut builder = ListBuilder::new(StringBuilder::new());
    for product in products {
        match product.property(name) {
            Some(values) => {
                for value in values {
                    builder.values().append_value(value);
                }
                builder.append(true);
            }
            None => builder.append(false),
        }
    }
    Arc::new(builder.finish())
}
