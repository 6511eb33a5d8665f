//! SQL identifier quoting.

use crate::error::ConnectionError;

/// Validate a SQL identifier and return it double-quoted.
///
/// Embedded double quotes are doubled, so any non-empty name without NUL
/// bytes is representable.
pub fn quote_ident(name: &str) -> Result<String, ConnectionError> {
    if name.is_empty() || name.contains('\0') {
        return Err(ConnectionError::InvalidIdentifier(name.to_string()));
    }
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}

/// Schema-qualified, quoted table name.
pub fn qualified_table(schema: &str, table: &str) -> Result<String, ConnectionError> {
    Ok(format!("{}.{}", quote_ident(schema)?, quote_ident(table)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("products").unwrap(), "\"products\"");
        assert_eq!(quote_ident("Mixed Case").unwrap(), "\"Mixed Case\"");
        assert_eq!(quote_ident("a\"b").unwrap(), "\"a\"\"b\"");
    }

    #[test]
    fn test_quote_ident_rejects_invalid() {
        assert!(quote_ident("").is_err());
        assert!(quote_ident("bad\0name").is_err());
    }

    #[test]
    fn test_qualified_table() {
        assert_eq!(
            qualified_table("public", "lifecycle_test").unwrap(),
            "\"public\".\"lifecycle_test\""
        );
        assert!(qualified_table("", "t").is_err());
    }
}
