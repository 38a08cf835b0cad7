/// Header through which the client tells the server which parts of a form
/// schema response it needs.
pub const SCHEMA_REQUEST_HEADER: &str = "X-FormSchema-Request";

/// The facets of a schema response a client asks for.
///
/// Asking only for `state` on refreshes avoids re-sending a structure that has
/// not changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaRequest {
    pub schema: bool,
    pub state: bool,
    pub errors: bool,
}

impl Default for SchemaRequest {
    fn default() -> Self {
        Self {
            schema: true,
            state: true,
            errors: true,
        }
    }
}

impl SchemaRequest {
    pub fn state_only() -> Self {
        Self {
            schema: false,
            state: true,
            errors: false,
        }
    }

    /// Value of the [`SCHEMA_REQUEST_HEADER`] header: `auto` followed by each
    /// requested facet.
    pub fn header_value(&self) -> String {
        let mut parts = vec!["auto"];
        if self.schema {
            parts.push("schema");
        }
        if self.state {
            parts.push("state");
        }
        if self.errors {
            parts.push("errors");
        }
        parts.join(",")
    }

    /// Parses a header value. Unknown parts (including `auto`) are ignored.
    pub fn parse_header(value: &str) -> Self {
        let mut request = Self {
            schema: false,
            state: false,
            errors: false,
        };
        for part in value.split(',').map(str::trim) {
            match part {
                "schema" => request.schema = true,
                "state" => request.state = true,
                "errors" => request.errors = true,
                _ => {}
            }
        }
        request
    }

    /// True when no facet was named explicitly.
    pub fn is_auto_only(&self) -> bool {
        !self.schema && !self.state && !self.errors
    }
}
