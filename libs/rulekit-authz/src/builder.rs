//! Grant table → filter compilation.
//!
//! One clause per rule type, in grant-table order: the rule-type term, AND
//! the consumer term(s) when any consumer is authorized, AND the space term
//! when spaces apply. Clauses for multiple rule types are ORed together and
//! the whole tree is collapsed once before rendering.

use crate::expr::{AuthzFilter, FilterDialect, FilterExpr};
use crate::fields::{FilterFieldNames, InvalidFieldError, ensure_field_is_safe_for_query};
use crate::grants::AuthorizedRuleTypes;

/// Per-compilation options: target dialect plus the document field names the
/// compiled filter should reference.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuthzFilterOptions {
    pub dialect: FilterDialect,
    pub field_names: FilterFieldNames,
}

/// Compile the grant table into a filter that restricts visible rules to the
/// authorized `(rule type, consumer)` pairs, additionally pinned to
/// `space_id` when both the space field and the id are known.
///
/// Configured field names are validated once, before any clause is built.
/// Either a complete expression is produced or validation fails first; no
/// partial output exists.
///
/// # Errors
///
/// Returns [`InvalidFieldError`] if a configured field name is unsafe to
/// embed in a query.
///
/// # Panics
///
/// Panics if `authorized` is empty. Callers short-circuit the
/// no-access-at-all case before compiling a filter.
pub fn filter_by_rule_type_and_consumer(
    authorized: &AuthorizedRuleTypes,
    opts: &AuthzFilterOptions,
    space_id: Option<&str>,
) -> Result<AuthzFilter, InvalidFieldError> {
    assert!(
        !authorized.is_empty(),
        "grant table must name at least one rule type"
    );
    opts.field_names.ensure_safe()?;

    tracing::debug!(
        rule_types = authorized.len(),
        dialect = ?opts.dialect,
        "compiling authorization filter"
    );

    let expr = grants_expr(authorized, &opts.field_names, space_id);
    Ok(expr.render(opts.dialect))
}

/// Space-only filter: the lone `space_ids: {space_id}` term in the requested
/// dialect.
///
/// Returns `Ok(None)` when either the space field or the space id is absent;
/// there is nothing to restrict by.
///
/// # Errors
///
/// Returns [`InvalidFieldError`] if the configured space field is unsafe to
/// embed in a query.
pub fn filter_by_space_id(
    opts: &AuthzFilterOptions,
    space_id: Option<&str>,
) -> Result<Option<AuthzFilter>, InvalidFieldError> {
    let (Some(field), Some(space_id)) = (opts.field_names.space_ids.as_deref(), space_id) else {
        return Ok(None);
    };
    ensure_field_is_safe_for_query("space_ids", field)?;

    let term = FilterExpr::term(field, space_id);
    Ok(Some(term.render(opts.dialect)))
}

fn grants_expr(
    authorized: &AuthorizedRuleTypes,
    fields: &FilterFieldNames,
    space_id: Option<&str>,
) -> FilterExpr {
    let space_term = match (fields.space_ids.as_deref(), space_id) {
        (Some(field), Some(id)) => Some(FilterExpr::term(field, id)),
        _ => None,
    };

    let clauses: Vec<FilterExpr> = authorized
        .iter()
        .map(|(rule_type_id, grant)| {
            let mut parts = vec![FilterExpr::term(
                fields.rule_type_id.as_str(),
                rule_type_id.as_str(),
            )];

            let consumer_terms: Vec<FilterExpr> = grant
                .authorized_consumers
                .keys()
                .map(|consumer| FilterExpr::term(fields.consumer.as_str(), consumer.as_str()))
                .collect();
            if !consumer_terms.is_empty() {
                parts.push(FilterExpr::or(consumer_terms));
            }

            if let Some(space_term) = &space_term {
                parts.push(space_term.clone());
            }

            FilterExpr::and(parts)
        })
        .collect();

    FilterExpr::or(clauses).collapse()
}
