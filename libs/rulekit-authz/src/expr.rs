//! Dialect-independent boolean expression tree: built once per compilation
//! by the clause builder, rendered by either dialect emitter.

use crate::{bool_query, query_text};

/// Output dialect selector.
///
/// Closed set: supporting another query backend means adding one more
/// emitter over [`FilterExpr`], never changing the clause builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FilterDialect {
    /// Structured-query text, e.g. `(path.to.type: foo AND consumer: bar)`.
    #[serde(rename = "query_text")]
    QueryText,
    /// Boolean-query fragment for a document store.
    #[serde(rename = "bool_query")]
    BoolQuery,
}

/// A compiled authorization filter in one of the two output dialects.
#[derive(Clone, Debug, PartialEq)]
pub enum AuthzFilter {
    QueryText(String),
    BoolQuery(serde_json::Value),
}

/// Boolean expression over `field: value` equality terms.
///
/// `And`/`Or` always carry at least one child. A single-child `And`/`Or` is
/// redundant wrapping and must be removed with [`FilterExpr::collapse`]
/// before the tree reaches an emitter; the clause builder does this once per
/// compiled tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterExpr {
    Term { field: String, value: String },
    And(Vec<FilterExpr>),
    Or(Vec<FilterExpr>),
}

impl FilterExpr {
    /// `field: value` equality term.
    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Conjunction of `children`, in the given order.
    #[must_use]
    pub fn and(children: Vec<FilterExpr>) -> Self {
        Self::And(children)
    }

    /// Disjunction of `children`, in the given order.
    #[must_use]
    pub fn or(children: Vec<FilterExpr>) -> Self {
        Self::Or(children)
    }

    /// Recursively replace every single-child `And`/`Or` with that child.
    #[must_use]
    pub fn collapse(self) -> Self {
        match self {
            Self::Term { .. } => self,
            Self::And(children) => Self::collapse_group(children, Self::And),
            Self::Or(children) => Self::collapse_group(children, Self::Or),
        }
    }

    fn collapse_group(children: Vec<Self>, rewrap: fn(Vec<Self>) -> Self) -> Self {
        let mut collapsed: Vec<Self> = children.into_iter().map(Self::collapse).collect();
        if collapsed.len() == 1 {
            collapsed.swap_remove(0)
        } else {
            rewrap(collapsed)
        }
    }

    /// Render into the requested dialect.
    ///
    /// Rendering is pure: the same expression renders to identical output on
    /// every call, and it never fails. The expression is expected to be
    /// collapsed; `render` does not re-normalize.
    #[must_use]
    pub fn render(&self, dialect: FilterDialect) -> AuthzFilter {
        match dialect {
            FilterDialect::QueryText => AuthzFilter::QueryText(query_text::render(self)),
            FilterDialect::BoolQuery => AuthzFilter::BoolQuery(bool_query::render(self)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(field: &str, value: &str) -> FilterExpr {
        FilterExpr::term(field, value)
    }

    #[test]
    fn collapse_leaves_terms_untouched() {
        let expr = term("a", "1");
        assert_eq!(expr.clone().collapse(), expr);
    }

    #[test]
    fn collapse_unwraps_nested_singletons() {
        // Arrange
        let expr = FilterExpr::or(vec![FilterExpr::and(vec![FilterExpr::or(vec![term(
            "a", "1",
        )])])]);

        // Act
        let collapsed = expr.collapse();

        // Assert
        assert_eq!(collapsed, term("a", "1"));
    }

    #[test]
    fn collapse_preserves_child_order_in_wide_groups() {
        // Arrange
        let expr = FilterExpr::and(vec![
            term("a", "1"),
            FilterExpr::or(vec![term("b", "2")]),
            term("c", "3"),
        ]);

        // Act
        let collapsed = expr.collapse();

        // Assert
        assert_eq!(
            collapsed,
            FilterExpr::and(vec![term("a", "1"), term("b", "2"), term("c", "3")])
        );
    }
}
