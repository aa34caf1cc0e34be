use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::naming::{escape_js_string, is_js_identifier};

/// The analysed schema of a database: table name → table description.
///
/// Tables are kept sorted by name so that every traversal is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaDescription {
    pub tables: BTreeMap<String, TableSchema>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    pub fields: Vec<FieldSchema>,
    #[serde(default)]
    pub references: Vec<Reference>,
    #[serde(default)]
    pub primary_keys: Vec<String>,
    #[serde(default)]
    pub options: TableOptions,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOptions {
    /// Sequelize manages `createdAt`/`updatedAt`
    #[serde(default)]
    pub timestamps: bool,
    /// Columns follow the snake_case convention
    #[serde(default)]
    pub underscored: bool,
}

/// A column of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    /// Attribute name on the model
    pub name: String,
    /// Column name in the database
    pub name_column: String,
    /// Member of Sequelize `DataTypes`, e.g. `STRING` or `ENUM('a', 'b')`
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub default_value: Option<DefaultValue>,
    #[serde(default)]
    pub is_required: bool,
}

impl FieldSchema {
    /// Sequelize treats a column name containing parentheses as a raw
    /// attribute, so such fields are keyed by their quoted column name.
    pub fn has_parenthesis(&self) -> bool {
        self.name_column.contains('(') || self.name_column.contains(')')
    }

    /// Key of the field in the generated attributes object, quoted and
    /// escaped unless it is a plain identifier.
    pub fn attribute_key(&self) -> String {
        if self.has_parenthesis() {
            format!("'{}'", escape_js_string(&self.name_column))
        } else if is_js_identifier(&self.name) {
            self.name.clone()
        } else {
            format!("'{}'", escape_js_string(&self.name))
        }
    }
}

/// Default value of a column.
///
/// `{ "literal": "CURRENT_TIMESTAMP" }` is a raw SQL expression; anything else
/// is a plain JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Literal { literal: String },
    Value(Value),
}

impl DefaultValue {
    /// Whether the value should be rendered at all (`null` is skipped)
    pub fn is_present(&self) -> bool {
        !matches!(self, DefaultValue::Value(Value::Null))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Association {
    BelongsTo,
    HasOne,
    HasMany,
    BelongsToMany,
}

impl Association {
    /// Name of the Sequelize method declaring the association
    pub fn method_name(self) -> &'static str {
        match self {
            Association::BelongsTo => "belongsTo",
            Association::HasOne => "hasOne",
            Association::HasMany => "hasMany",
            Association::BelongsToMany => "belongsToMany",
        }
    }
}

impl fmt::Display for Association {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.method_name())
    }
}

/// An association from the owning table to `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub association: Association,
    /// Target table name
    #[serde(rename = "ref")]
    pub target: String,
    /// Association alias
    #[serde(rename = "as")]
    pub alias: String,
    /// Column holding the foreign key
    #[serde(default)]
    pub foreign_key: Option<String>,
    /// Attribute name of the foreign key
    #[serde(default)]
    pub foreign_key_name: Option<String>,
    #[serde(default)]
    pub target_key: Option<String>,
    #[serde(default)]
    pub source_key: Option<String>,
    /// Join table of a belongs-to-many association
    #[serde(default)]
    pub through: Option<String>,
    #[serde(default)]
    pub other_key: Option<String>,
}
