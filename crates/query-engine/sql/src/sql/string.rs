/// Type definitions of a low-level SQL string representation.
#[derive(Debug, Clone, PartialEq)]
pub struct SQL {
    pub sql: String,
    /// Bound values. The position of a value is the ordinal of its `@p<N>` placeholder.
    pub params: Vec<serde_json::Value>,
}

impl Default for SQL {
    fn default() -> Self {
        Self::new()
    }
}

/// The prefix of every placeholder.
pub const PLACEHOLDER_PREFIX: &str = "@p";

impl SQL {
    pub fn new() -> SQL {
        SQL {
            sql: String::new(),
            params: vec![],
        }
    }

    /// Start from values the caller already bound, so that new placeholders come after them.
    pub fn with_params(params: Vec<serde_json::Value>) -> SQL {
        SQL {
            sql: String::new(),
            params,
        }
    }

    pub fn append_syntax(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Append a placeholder for the value and bind it.
    pub fn append_param(&mut self, param: serde_json::Value) {
        self.sql
            .push_str(format!("{PLACEHOLDER_PREFIX}{}", self.params.len()).as_str());
        self.params.push(param);
    }

    /// Append non-empty syntax preceded by a single space.
    pub fn append_with_space(&mut self, sql: &str) {
        if !sql.is_empty() {
            self.sql.push(' ');
            self.sql.push_str(sql);
        }
    }
}
