//! # Naming Module
//!
//! Identifier mangling shared by every generated file.
//!
//! Table and column names come straight from the database and may contain
//! anything: dashes, spaces, parentheses, leading digits, or JavaScript
//! reserved words. The helpers here turn them into names that are valid in
//! generated JavaScript while keeping a predictable relationship with the
//! original name.
//!
//! ## Word splitting
//!
//! All case conversions go through [`words`], which splits on:
//!
//! - every character that is not alphanumeric (`_`, `-`, ` `, `(`, ...)
//! - lower-to-upper transitions (`firstName` → `first`, `Name`)
//! - acronym boundaries (`XMLHttp` → `XML`, `Http`)
//! - letter/digit transitions (`address1` → `address`, `1`)
//!
//! ```rust
//! use ormforge::naming::{camel_case, kebab_case, pascal_case, snake_case};
//!
//! assert_eq!(snake_case("firstName"), "first_name");
//! assert_eq!(snake_case("address1"), "address_1");
//! assert_eq!(camel_case("default_values"), "defaultValues");
//! assert_eq!(pascal_case("model-export"), "ModelExport");
//! assert_eq!(kebab_case("parenthesis_underscored"), "parenthesis-underscored");
//! ```
//!
//! ## Reserved words
//!
//! A table called `export` cannot become `const { export } = ...`. Such names
//! are prefixed with `model-` before case conversion, so `export` becomes the
//! model `modelExport` with the variable `ModelExport`.

use std::collections::HashSet;

/// JavaScript reserved words, including future-reserved and legacy words.
const RESERVED_WORDS: &[&str] = &[
    "abstract",
    "await",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "double",
    "else",
    "enum",
    "eval",
    "export",
    "extends",
    "false",
    "final",
    "finally",
    "float",
    "for",
    "function",
    "goto",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "int",
    "interface",
    "let",
    "long",
    "native",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "volatile",
    "while",
    "with",
    "yield",
];

/// Split an identifier into its words.
///
/// Non-alphanumeric characters are separators and never appear in the output.
pub fn words(input: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();

    for c in input.chars() {
        if !c.is_alphanumeric() {
            flush(&mut result, &mut current);
            continue;
        }
        let Some(prev) = current.chars().last() else {
            current.push(c);
            continue;
        };

        let digit_boundary = prev.is_numeric() != c.is_numeric();
        let case_boundary = prev.is_lowercase() && c.is_uppercase();
        if digit_boundary || case_boundary {
            flush(&mut result, &mut current);
            current.push(c);
            continue;
        }

        // `XMLHttp`: the last upper-case letter of an acronym starts the next word
        if prev.is_uppercase() && c.is_lowercase() {
            let count = current.chars().count();
            let before_prev = current.chars().rev().nth(1);
            if count > 1 && before_prev.is_some_and(char::is_uppercase) {
                current.pop();
                flush(&mut result, &mut current);
                current.push(prev);
            }
        }
        current.push(c);
    }
    flush(&mut result, &mut current);
    result
}

fn flush(result: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        result.push(std::mem::take(current));
    }
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// `default_values` → `defaultValues`
pub fn camel_case(input: &str) -> String {
    words(input)
        .iter()
        .enumerate()
        .map(|(i, w)| if i == 0 { w.to_lowercase() } else { capitalize(w) })
        .collect()
}

/// `default_values` → `DefaultValues`
pub fn pascal_case(input: &str) -> String {
    words(input).iter().map(|w| capitalize(w)).collect()
}

/// `firstName` → `first_name`
pub fn snake_case(input: &str) -> String {
    join_lower(input, "_")
}

/// `default_values` → `default-values`
pub fn kebab_case(input: &str) -> String {
    join_lower(input, "-")
}

fn join_lower(input: &str, separator: &str) -> String {
    words(input)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Whether `name` is a JavaScript reserved word.
pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.contains(&name.to_lowercase().as_str())
}

/// Make a table name usable as a JavaScript identifier seed.
///
/// Names starting with a digit are prefixed with `model`, reserved words with
/// `model-` so that case conversion yields `modelExport`.
///
/// Both checks look at the camelCased name, so `_2fa` and `new_` are caught
/// as well.
pub fn to_safe_string(input: &str) -> String {
    let camel = camel_case(input);
    if camel.chars().next().is_some_and(|c| c.is_numeric()) {
        return format!("model{input}");
    }
    if is_reserved_word(&camel) {
        return format!("model-{input}");
    }
    input.to_string()
}

/// Sequelize model name for a table, also its key in the models object.
pub fn model_name(table: &str) -> String {
    camel_case(&to_safe_string(table))
}

/// Name of the local variable holding the model inside its definition file.
pub fn model_variable_name(table: &str) -> String {
    pascal_case(&to_safe_string(table))
}

/// Escape `value` for use between single quotes in generated JavaScript.
///
/// ```rust
/// use ormforge::naming::escape_js_string;
///
/// assert_eq!(escape_js_string("o'brien"), "o\\'brien");
/// assert_eq!(escape_js_string(r"a\b"), r"a\\b");
/// ```
pub fn escape_js_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Whether `name` can be used as an unquoted property key.
pub fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Pick a file stem for `table`, suffixing `-1`, `-2`, ... on collision.
pub fn unique_file_stem(seen: &mut HashSet<String>, table: &str) -> String {
    let base = kebab_case(table);
    let base = if base.is_empty() {
        "model".to_string()
    } else {
        base
    };
    let mut candidate = base.clone();
    let mut counter = 1;
    while !seen.insert(candidate.clone()) {
        candidate = format!("{base}-{counter}");
        counter += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_splits_on_separators_and_case() {
        assert_eq!(words("first_name"), vec!["first", "name"]);
        assert_eq!(words("firstName"), vec!["first", "Name"]);
        assert_eq!(words("sum(quantity)"), vec!["sum", "quantity"]);
        assert_eq!(words("  spaced  out "), vec!["spaced", "out"]);
        assert!(words("___").is_empty());
    }

    #[test]
    fn test_words_acronyms_and_digits() {
        assert_eq!(words("XMLHttpRequest"), vec!["XML", "Http", "Request"]);
        assert_eq!(words("address1"), vec!["address", "1"]);
        assert_eq!(words("line2Address"), vec!["line", "2", "Address"]);
        assert_eq!(words("ID"), vec!["ID"]);
    }

    #[test]
    fn test_case_conversions() {
        assert_eq!(camel_case("first_name"), "firstName");
        assert_eq!(camel_case("FOO_BAR"), "fooBar");
        assert_eq!(camel_case("model2fa"), "model2Fa");
        assert_eq!(pascal_case("customers"), "Customers");
        assert_eq!(pascal_case("parenthesis_underscored"), "ParenthesisUnderscored");
        assert_eq!(snake_case("createdAt"), "created_at");
        assert_eq!(snake_case("totalAmount"), "total_amount");
        assert_eq!(snake_case("countSales"), "count_sales");
        assert_eq!(kebab_case("default_values"), "default-values");
        assert_eq!(kebab_case("export"), "export");
    }

    #[test]
    fn test_reserved_words() {
        assert!(is_reserved_word("export"));
        assert!(is_reserved_word("Class"));
        assert!(is_reserved_word("null"));
        assert!(!is_reserved_word("customers"));
        assert!(!is_reserved_word("exports"));
    }

    #[test]
    fn test_safe_model_names() {
        assert_eq!(to_safe_string("customers"), "customers");
        assert_eq!(to_safe_string("export"), "model-export");
        assert_eq!(to_safe_string("2fa"), "model2fa");

        assert_eq!(model_name("export"), "modelExport");
        assert_eq!(model_variable_name("export"), "ModelExport");
        assert_eq!(model_name("default_values"), "defaultValues");
        assert_eq!(model_variable_name("default_values"), "DefaultValues");
        assert_eq!(model_name("customers"), "customers");

        assert_eq!(model_name("new_"), "modelNew");
        assert_eq!(model_name("_2fa"), "model2Fa");
        assert_eq!(model_variable_name("o'brien"), "OBrien");
        assert_eq!(model_name("()"), "");
    }

    #[test]
    fn test_escape_js_string() {
        assert_eq!(escape_js_string("plain"), "plain");
        assert_eq!(
            escape_js_string("coalesce(name, 'n/a')"),
            r"coalesce(name, \'n/a\')"
        );
        // An already escaped quote in the input stays escaped
        assert_eq!(escape_js_string(r"\'"), r"\\\'");
        assert_eq!(escape_js_string("a\nb"), r"a\nb");
    }

    #[test]
    fn test_is_js_identifier() {
        assert!(is_js_identifier("firstName"));
        assert!(is_js_identifier("_id"));
        assert!(is_js_identifier("$ref"));
        assert!(!is_js_identifier("first name"));
        assert!(!is_js_identifier("1st"));
        assert!(!is_js_identifier("o'brien"));
        assert!(!is_js_identifier(""));
    }

    #[test]
    fn test_unique_file_stem() {
        let mut seen = HashSet::new();
        assert_eq!(unique_file_stem(&mut seen, "user_roles"), "user-roles");
        assert_eq!(unique_file_stem(&mut seen, "userRoles"), "user-roles-1");
        assert_eq!(unique_file_stem(&mut seen, "user-roles"), "user-roles-2");
        assert_eq!(unique_file_stem(&mut seen, "()"), "model");
    }
}
