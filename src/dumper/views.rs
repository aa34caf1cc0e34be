use crate::naming::{camel_case, escape_js_string, model_name, snake_case};
use crate::schema::{Association, DefaultValue, FieldSchema, Reference, TableSchema};

/// A field as the model template consumes it
///
/// Every decision about the generated attribute is taken here so that the
/// template only branches on booleans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    /// Attribute key, quoted when the column name contains parentheses
    pub key: String,
    /// Column name in the database, escaped for a single-quoted string
    pub name_column: String,
    /// Member of Sequelize `DataTypes`
    pub data_type: String,
    /// Whether `field: '<column>'` must be emitted
    pub name_column_unconventional: bool,
    pub primary_key: bool,
    pub has_default_value: bool,
    /// Default value as a JavaScript expression
    pub default_value: String,
    /// Emits `allowNull: false`
    pub required: bool,
}

/// An association as the model template consumes it
///
/// Every string emitted between quotes is already escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceView {
    /// Sequelize method name (`belongsTo`, `hasOne`, `hasMany`)
    pub association: String,
    pub is_belongs_to_many: bool,
    /// Key of the target model in the models object
    pub target_model: String,
    pub alias: String,
    pub foreign_key: String,
    pub foreign_key_name: String,
    pub has_target_key: bool,
    pub target_key: String,
    pub has_source_key: bool,
    pub source_key: String,
    pub through: String,
    pub other_key: String,
}

/// Build the view of a field of a table using the given column convention.
pub fn field_view(field: &FieldSchema, underscored: bool) -> FieldView {
    let has_parenthesis = field.has_parenthesis();
    let expected_column = if underscored {
        snake_case(&field.name)
    } else {
        field.name.clone()
    };

    // Underscored tables derive column names on their own; digits and
    // parentheses do not survive that round trip, so they are always mapped.
    let has_digit = field.name.chars().any(|c| ('1'..='9').contains(&c));
    let name_column_unconventional = field.name_column != expected_column
        || (underscored && (has_digit || has_parenthesis));

    let default_value = field
        .default_value
        .as_ref()
        .filter(|v| v.is_present())
        .map(render_default_value);

    FieldView {
        key: field.attribute_key(),
        name_column: escape_js_string(&field.name_column),
        data_type: field.data_type.clone(),
        name_column_unconventional,
        primary_key: field.primary_key,
        has_default_value: default_value.is_some(),
        default_value: default_value.unwrap_or_default(),
        required: field.is_required,
    }
}

/// Render a default value as JavaScript.
///
/// Literals become `Sequelize.literal('...')` with the SQL escaped for a
/// single-quoted string; any other value is emitted as compact JSON.
pub fn render_default_value(value: &DefaultValue) -> String {
    match value {
        DefaultValue::Literal { literal } => {
            format!("Sequelize.literal('{}')", escape_js_string(literal))
        }
        DefaultValue::Value(json) => json.to_string(),
    }
}

pub fn reference_view(reference: &Reference) -> ReferenceView {
    let text = |value: &Option<String>| escape_js_string(value.as_deref().unwrap_or_default());
    let camel_key = |value: &Option<String>| {
        value
            .as_deref()
            .filter(|v| !v.is_empty())
            .map(camel_case)
    };
    let target_key = camel_key(&reference.target_key);
    let source_key = camel_key(&reference.source_key);

    ReferenceView {
        association: reference.association.method_name().to_string(),
        is_belongs_to_many: reference.association == Association::BelongsToMany,
        target_model: model_name(&reference.target),
        alias: escape_js_string(&reference.alias),
        foreign_key: text(&reference.foreign_key),
        foreign_key_name: text(&reference.foreign_key_name),
        has_target_key: target_key.is_some(),
        target_key: target_key.unwrap_or_default(),
        has_source_key: source_key.is_some(),
        source_key: source_key.unwrap_or_default(),
        through: text(&reference.through),
        other_key: text(&reference.other_key),
    }
}

/// Sequelize adds an `id` attribute to models without a primary key; it must
/// be removed when the table has no such column.
pub fn lacks_id(table: &TableSchema) -> bool {
    let has_id_column = table
        .fields
        .iter()
        .any(|f| f.name.eq_ignore_ascii_case("id"));
    let has_primary_key =
        !table.primary_keys.is_empty() || table.fields.iter().any(|f| f.primary_key);
    !has_id_column && !has_primary_key
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(name: &str, column: &str) -> FieldSchema {
        FieldSchema {
            name: name.to_string(),
            name_column: column.to_string(),
            data_type: "STRING".to_string(),
            primary_key: false,
            default_value: None,
            is_required: false,
        }
    }

    #[test]
    fn test_conventional_columns() {
        assert!(!field_view(&field("firstName", "first_name"), true).name_column_unconventional);
        assert!(!field_view(&field("firstName", "firstName"), false).name_column_unconventional);
        assert!(field_view(&field("firstName", "first_name"), false).name_column_unconventional);
    }

    #[test]
    fn test_digits_force_mapping_when_underscored() {
        let view = field_view(&field("address1", "address_1"), true);
        assert!(view.name_column_unconventional);
        // `0` is not part of the digit rule
        assert!(!field_view(&field("address0", "address_0"), true).name_column_unconventional);
    }

    #[test]
    fn test_parenthesis_field_is_quoted_and_mapped() {
        let view = field_view(&field("countSales", "count(sales)"), false);
        assert_eq!(view.key, "'count(sales)'");
        assert!(view.name_column_unconventional);
        assert_eq!(view.name_column, "count(sales)");
    }

    #[test]
    fn test_default_values() {
        let literal = DefaultValue::Literal {
            literal: "nextval('seq'::regclass)".to_string(),
        };
        assert_eq!(
            render_default_value(&literal),
            "Sequelize.literal('nextval(\\'seq\\'::regclass)')"
        );
        assert_eq!(render_default_value(&DefaultValue::Value(json!(false))), "false");
        assert_eq!(render_default_value(&DefaultValue::Value(json!("a'b"))), "\"a'b\"");
        assert_eq!(render_default_value(&DefaultValue::Value(json!([1, 2]))), "[1,2]");

        let mut with_null = field("flag", "flag");
        with_null.default_value = Some(DefaultValue::Value(json!(null)));
        assert!(!field_view(&with_null, false).has_default_value);
    }

    #[test]
    fn test_quotes_and_backslashes_are_escaped() {
        let view = field_view(&field("display", "coalesce(name, 'n/a')"), false);
        assert_eq!(view.key, r"'coalesce(name, \'n/a\')'");
        assert_eq!(view.name_column, r"coalesce(name, \'n/a\')");

        let view = field_view(&field("rawPath", r"raw\path"), false);
        assert_eq!(view.key, "rawPath");
        assert_eq!(view.name_column, r"raw\\path");

        let literal = DefaultValue::Literal {
            literal: r"E'\'x'".to_string(),
        };
        assert_eq!(
            render_default_value(&literal),
            r"Sequelize.literal('E\'\\\'x\'')"
        );

        let reference = Reference {
            association: Association::BelongsToMany,
            target: "books".to_string(),
            alias: "reader's books".to_string(),
            foreign_key: Some("user_id".to_string()),
            foreign_key_name: None,
            target_key: None,
            source_key: None,
            through: Some("o'reviews".to_string()),
            other_key: Some("book_id".to_string()),
        };
        let view = reference_view(&reference);
        assert_eq!(view.alias, r"reader\'s books");
        assert_eq!(view.through, r"o\'reviews");
        assert_eq!(view.foreign_key_name, "");
    }

    #[test]
    fn test_non_identifier_names_are_quoted() {
        let view = field_view(&field("first name", "first name"), false);
        assert_eq!(view.key, "'first name'");
        assert!(!view.name_column_unconventional);
    }

    #[test]
    fn test_reference_keys_are_camel_cased() {
        let reference = Reference {
            association: Association::HasMany,
            target: "order_lines".to_string(),
            alias: "lines".to_string(),
            foreign_key: Some("order_id".to_string()),
            foreign_key_name: Some("orderIdKey".to_string()),
            target_key: None,
            source_key: Some("order_ref".to_string()),
            through: None,
            other_key: None,
        };
        let view = reference_view(&reference);
        assert_eq!(view.association, "hasMany");
        assert_eq!(view.target_model, "orderLines");
        assert!(!view.has_target_key);
        assert!(view.has_source_key);
        assert_eq!(view.source_key, "orderRef");
    }

    #[test]
    fn test_lacks_id() {
        let mut table = TableSchema {
            fields: vec![field("label", "label")],
            ..TableSchema::default()
        };
        assert!(lacks_id(&table));

        table.primary_keys = vec!["label".to_string()];
        assert!(!lacks_id(&table));

        table.primary_keys.clear();
        table.fields.push(field("ID", "ID"));
        assert!(!lacks_id(&table));
    }
}
