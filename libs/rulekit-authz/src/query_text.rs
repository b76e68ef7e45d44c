//! Text dialect emitter: `field: value` terms joined into parenthesized
//! `AND` / `OR` groups. A lone top-level term is emitted bare.

use crate::expr::FilterExpr;

pub(crate) fn render(expr: &FilterExpr) -> String {
    match expr {
        FilterExpr::Term { field, value } => format!("{field}: {value}"),
        FilterExpr::And(children) => group(children, " AND "),
        FilterExpr::Or(children) => group(children, " OR "),
    }
}

fn group(children: &[FilterExpr], separator: &str) -> String {
    let rendered: Vec<String> = children.iter().map(render).collect();
    format!("({})", rendered.join(separator))
}
