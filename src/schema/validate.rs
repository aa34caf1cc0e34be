use std::collections::{HashMap, HashSet};

use super::types::{Association, Reference, SchemaDescription, TableSchema};
use crate::error::SchemaError;
use crate::naming::model_name;

impl SchemaDescription {
    /// Reject descriptions that would render invalid or ambiguous code.
    ///
    /// References to tables that are not part of the description are accepted:
    /// the analysis step may hand over one table at a time.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found, tables visited by name.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.tables.is_empty() {
            return Err(SchemaError::Empty);
        }
        // model name -> first table using it
        let mut models: HashMap<String, &str> = HashMap::new();
        for (name, table) in &self.tables {
            if name.trim().is_empty() {
                return Err(SchemaError::EmptyTableName);
            }
            let model = model_name(name);
            if model.is_empty() {
                return Err(SchemaError::UnusableTableName {
                    table: name.clone(),
                });
            }
            if let Some(first) = models.insert(model, name) {
                return Err(SchemaError::DuplicateModelName {
                    first: first.to_string(),
                    second: name.clone(),
                });
            }
            validate_fields(name, table)?;
            for reference in &table.references {
                validate_reference(name, reference)?;
            }
        }
        Ok(())
    }
}

fn validate_fields(table_name: &str, table: &TableSchema) -> Result<(), SchemaError> {
    let mut keys = HashSet::new();
    for field in &table.fields {
        if field.name.trim().is_empty() {
            return Err(SchemaError::EmptyFieldName {
                table: table_name.to_string(),
            });
        }
        if field.name_column.trim().is_empty() {
            return Err(SchemaError::EmptyColumnName {
                table: table_name.to_string(),
                field: field.name.clone(),
            });
        }
        if field.data_type.trim().is_empty() {
            return Err(SchemaError::EmptyFieldType {
                table: table_name.to_string(),
                field: field.name.clone(),
            });
        }
        let key = field.attribute_key();
        if !keys.insert(key.clone()) {
            return Err(SchemaError::DuplicateField {
                table: table_name.to_string(),
                key,
            });
        }
    }
    Ok(())
}

fn validate_reference(table_name: &str, reference: &Reference) -> Result<(), SchemaError> {
    if reference.target.trim().is_empty() {
        return Err(SchemaError::MissingReferenceTarget {
            table: table_name.to_string(),
        });
    }
    if reference.alias.trim().is_empty() {
        return Err(SchemaError::MissingAlias {
            table: table_name.to_string(),
            target: reference.target.clone(),
        });
    }

    let required: Vec<(&'static str, &Option<String>)> = match reference.association {
        Association::BelongsToMany => vec![
            ("through", &reference.through),
            ("foreignKey", &reference.foreign_key),
            ("otherKey", &reference.other_key),
        ],
        _ => vec![
            ("foreignKey", &reference.foreign_key),
            ("foreignKeyName", &reference.foreign_key_name),
        ],
    };
    for &(key, value) in &required {
        if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
            return Err(SchemaError::MissingReferenceKey {
                table: table_name.to_string(),
                alias: reference.alias.clone(),
                key,
            });
        }
    }
    Ok(())
}
