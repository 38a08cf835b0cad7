use crate::model::schema::FormSchema;

/// Builds the dot-separated identifier of a schema-driven form.
///
/// Before the schema has been fetched only the caller's `identifier` is known;
/// once the schema carries a name the result becomes `identifier.name`. Empty
/// parts are skipped, so the result never starts or ends with a dot.
pub fn create_form_identifier(identifier: &str, schema: Option<&FormSchema>) -> String {
    join_form_identifier(identifier, schema.and_then(FormSchema::name))
}

/// Same as [`create_form_identifier`] for when only the schema name is at hand.
pub fn join_form_identifier(identifier: &str, name: Option<&str>) -> String {
    [identifier, name.unwrap_or_default()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schema::SchemaStructure;

    fn named(name: &str) -> FormSchema {
        FormSchema {
            schema: Some(SchemaStructure {
                name: name.to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn identifier_alone_before_fetch() {
        assert_eq!(create_form_identifier("X", None), "X");
        assert_eq!(create_form_identifier("X", Some(&FormSchema::default())), "X");
        assert_eq!(create_form_identifier("X", Some(&named(""))), "X");
    }

    #[test]
    fn identifier_includes_schema_name() {
        let schema = named("Y");
        let first = create_form_identifier("X", Some(&schema));
        let second = create_form_identifier("X", Some(&schema));
        assert_eq!(first, "X.Y");
        assert_eq!(first, second);
    }

    #[test]
    fn empty_caller_identifier_is_skipped() {
        assert_eq!(create_form_identifier("", Some(&named("Y"))), "Y");
    }
}
