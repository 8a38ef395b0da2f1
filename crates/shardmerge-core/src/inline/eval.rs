//! Module: inline::eval
//! Responsibility: expand parsed templates into ordered name lists.
//! Boundary: infallible; every failure is rejected while parsing.

use crate::inline::ast::{Expr, Template, TemplatePart};

/// Expand one template into every combination of its placeholder values.
///
/// The leftmost placeholder is the outermost loop, so
/// `t_${['a','b']}_${1..2}` yields `t_a_1, t_a_2, t_b_1, t_b_2`.
pub(crate) fn expand_template(template: &Template) -> Vec<String> {
    let mut combos = vec![String::new()];

    for part in &template.parts {
        match part {
            TemplatePart::Text(text) => {
                for combo in &mut combos {
                    combo.push_str(text);
                }
            }
            TemplatePart::Placeholder(expr) => {
                let values = expand_expr(expr);
                combos = combos
                    .iter()
                    .flat_map(|prefix| values.iter().map(move |value| format!("{prefix}{value}")))
                    .collect();
            }
        }
    }

    combos
}

fn expand_expr(expr: &Expr) -> Vec<String> {
    match expr {
        Expr::Null => vec![String::new()],
        Expr::Int(value) => vec![value.to_string()],
        Expr::Str(template) => expand_template(template),
        Expr::List(items) => items.iter().flat_map(expand_expr).collect(),
        Expr::Range { lo, hi } => (*lo..=*hi).map(|value| value.to_string()).collect(),
    }
}
