//! Document-store dialect emitter: nested `bool` fragments using `filter`
//! for conjunction and `should` + `minimum_should_match` for disjunction.

use serde_json::{Value, json};

use crate::expr::FilterExpr;

pub(crate) fn render(expr: &FilterExpr) -> Value {
    match expr {
        FilterExpr::Term { field, value } => json!({
            "bool": {
                "should": [{ "match": { (field.as_str()): value.as_str() } }],
                "minimum_should_match": 1,
            }
        }),
        FilterExpr::And(children) => json!({
            "bool": { "filter": render_children(children) }
        }),
        FilterExpr::Or(children) => json!({
            "bool": {
                "should": render_children(children),
                "minimum_should_match": 1,
            }
        }),
    }
}

fn render_children(children: &[FilterExpr]) -> Vec<Value> {
    children.iter().map(render).collect()
}
