//! Boolean condition evaluation for `{{if: ...}}` directives.
//!
//! Three-valued: `Some(true)` / `Some(false)` when a variable answers,
//! `None` when none does ("unknown"). Under `&&` an unknown side makes the
//! whole expression false, not unknown. Under `||` with no known-true side,
//! evaluation falls through to the scalar rules applied to the whole
//! original expression.

use langpack_core::FieldValue;

use crate::resolve::Expansion;

/// Evaluate a condition expression against the expansion's fields and, for
/// bare names, the backing store.
pub(crate) fn evaluate(expr: &str, exp: &mut Expansion<'_>) -> Option<bool> {
    let expr = expr.trim();

    if expr.contains("&&") {
        for side in expr.split("&&") {
            if evaluate(side, exp) != Some(true) {
                return Some(false);
            }
        }
        return Some(true);
    }

    if expr.contains("||") {
        for side in expr.split("||") {
            if evaluate(side, exp) == Some(true) {
                return Some(true);
            }
        }
        // No side was known-true: fall through to the scalar rules on the
        // whole expression.
    }

    let mut invert = false;
    let result = if expr.contains("==") {
        compare_field(exp, expr, "==")
    } else if expr.contains("!=") {
        invert = true;
        compare_field(exp, expr, "!=")
    } else {
        let name = match expr.strip_prefix('!') {
            Some(stripped) => {
                invert = true;
                stripped
            }
            None => expr,
        };
        truthy_name(exp, name)
    };

    match result {
        Some(r) if invert => Some(!r),
        other => other,
    }
}

/// `name OP literal` against the fields only — the store is never consulted
/// for comparisons. Unknown when no field matches `name`.
fn compare_field(exp: &Expansion<'_>, expr: &str, op: &str) -> Option<bool> {
    let parts: Vec<&str> = expr.split(op).collect();
    let name = parts[0].trim();
    let literal = parts.get(1).map(|p| p.trim()).unwrap_or("");
    for field in exp.fields {
        if field.is_key(name) {
            let text = field.value().as_text()?;
            return Some(text.trim().eq_ignore_ascii_case(literal));
        }
    }
    None
}

/// A bare variable name: fields first (with the value-to-bool coercion),
/// then the store (resolving the name as a template key and truthy-coercing
/// the resulting string). Unknown when neither answers.
fn truthy_name(exp: &mut Expansion<'_>, name: &str) -> Option<bool> {
    for field in exp.fields {
        if field.is_key(name) {
            return Some(field.value().as_bool());
        }
    }
    let resolved = exp.lookup_store(name)?;
    Some(FieldValue::from(resolved).as_bool())
}
