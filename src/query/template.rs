//! Positional substitution for parameterized expressions.

use std::fmt::{self, Write};

/// Replaces each `%s`, `%v` or `%d` placeholder in `template` with the next
/// argument; `%%` yields a literal `%`.
///
/// Missing arguments render as `%!s(MISSING)` and surplus ones are appended as
/// `%!(EXTRA <arg>)`, so a mismatch shows up in the expression instead of
/// being silently dropped.
pub fn format_expression(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args_iter = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        match chars.peek().copied() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some(verb @ ('s' | 'v' | 'd')) => {
                chars.next();
                match args_iter.next() {
                    Some(arg) => {
                        let _ = write!(out, "{}", arg);
                    }
                    None => {
                        let _ = write!(out, "%!{}(MISSING)", verb);
                    }
                }
            }
            _ => out.push('%'),
        }
    }

    for arg in args_iter {
        let _ = write!(out, "%!(EXTRA {})", arg);
    }

    out
}
