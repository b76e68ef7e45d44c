#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod builder;
pub mod expr;
pub mod fields;
pub mod grants;

mod bool_query;
mod query_text;

pub use builder::{
    AuthzFilterOptions, filter_by_rule_type_and_consumer, filter_by_space_id,
};
pub use expr::{AuthzFilter, FilterDialect, FilterExpr};
pub use fields::{FilterFieldNames, InvalidFieldError, ensure_field_is_safe_for_query};
pub use grants::{AuthorizedRuleTypes, ConsumerPrivileges, RuleTypeGrant};
