//! # Schema Module
//!
//! The input of the generator: a description of the tables of a relational
//! database, as produced by an analysis step that inspected the live database.
//!
//! ## Format
//!
//! The description is an object keyed by table name:
//!
//! ```json
//! {
//!   "addresses": {
//!     "fields": [
//!       { "name": "id", "nameColumn": "id", "type": "INTEGER", "primaryKey": true, "isRequired": true },
//!       { "name": "createdAt", "nameColumn": "created_at", "type": "DATE", "defaultValue": { "literal": "now()" } }
//!     ],
//!     "references": [
//!       {
//!         "association": "belongsTo",
//!         "ref": "customers",
//!         "as": "customer",
//!         "foreignKey": "customer_id",
//!         "foreignKeyName": "customerIdKey",
//!         "targetKey": "id"
//!       }
//!     ],
//!     "primaryKeys": ["id"],
//!     "options": { "timestamps": true, "underscored": true }
//!   }
//! }
//! ```
//!
//! Both JSON and YAML are accepted by [`load_schema`].
//!
//! ## Validation
//!
//! [`SchemaDescription::validate`] fails fast on descriptions that would
//! produce broken code (empty names, missing association keys, colliding
//! attribute keys).

mod load;
mod types;
mod validate;

pub use load::load_schema;
pub use types::*;
