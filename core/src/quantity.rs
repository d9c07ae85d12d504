//! Human-friendly rendering of ingredient quantities.

/// Largest denominator used when approximating a quantity as a fraction.
pub const MAX_DENOMINATOR: i64 = 8;

/// Closest fraction `n/d` to `value` with `d <= max_denominator`.
///
/// Walks the continued-fraction expansion and picks the better of the last
/// convergent and the best semiconvergent.
fn limit_denominator(value: f64, max_denominator: i64) -> (i64, i64) {
    let (mut p0, mut q0, mut p1, mut q1) = (0i64, 1i64, 1i64, 0i64);
    let mut x = value;
    loop {
        let a = x.floor();
        let q2 = if q1 == 0 {
            q0
        } else if a > max_denominator as f64 {
            max_denominator + 1
        } else {
            q0 + a as i64 * q1
        };
        if q2 > max_denominator {
            break;
        }
        let p2 = p0 + a as i64 * p1;
        (p0, q0, p1, q1) = (p1, q1, p2, q2);

        let rest = x - a;
        if rest < 1e-9 {
            return (p1, q1);
        }
        x = 1.0 / rest;
    }

    let k = (max_denominator - q0) / q1;
    let (bp, bq) = (p0 + k * p1, q0 + k * q1);
    let err_convergent = (p1 as f64 / q1 as f64 - value).abs();
    let err_semi = (bp as f64 / bq as f64 - value).abs();
    if err_convergent <= err_semi {
        (p1, q1)
    } else {
        (bp, bq)
    }
}

fn fraction_glyph(n: i64, d: i64) -> String {
    let glyph = match (n, d) {
        (1, 2) => "½",
        (1, 3) => "⅓",
        (2, 3) => "⅔",
        (1, 4) => "¼",
        (3, 4) => "¾",
        (1, 5) => "⅕",
        (2, 5) => "⅖",
        (3, 5) => "⅗",
        (4, 5) => "⅘",
        (1, 6) => "⅙",
        (5, 6) => "⅚",
        (1, 8) => "⅛",
        (3, 8) => "⅜",
        (5, 8) => "⅝",
        (7, 8) => "⅞",
        _ => return format!("{}/{}", n, d),
    };
    glyph.to_string()
}

/// Render a quantity like `2 ½`, `¾` or `3`.
///
/// Missing, zero, negative and non-finite quantities render as an empty
/// string, as do quantities too small to show with eighths.
pub fn pretty_quantity(quantity: Option<f64>) -> String {
    let Some(q) = quantity.filter(|q| q.is_finite() && *q > 0.0) else {
        return String::new();
    };
    let (n, d) = limit_denominator(q, MAX_DENOMINATOR);
    if n == 0 {
        return String::new();
    }
    let (whole, rem) = (n / d, n % d);
    match (whole, rem) {
        (0, _) => fraction_glyph(n, d),
        (w, 0) => w.to_string(),
        (w, r) => format!("{} {}", w, fraction_glyph(r, d)),
    }
}

/// A display line such as `Flour: 2 ¼ cups`, or just the name when there is
/// no quantity to show.
pub fn ingredient_line(name: &str, quantity: Option<f64>, unit: &str) -> String {
    let name = match name.trim() {
        "" => "Ingredient",
        n => n,
    };
    let qty = pretty_quantity(quantity);
    if qty.is_empty() {
        return name.to_string();
    }
    format!("{}: {} {}", name, qty, unit.trim())
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_denominator() {
        assert_eq!(limit_denominator(0.5, 8), (1, 2));
        assert_eq!(limit_denominator(0.333, 8), (1, 3));
        assert_eq!(limit_denominator(2.25, 8), (9, 4));
        assert_eq!(limit_denominator(3.0, 8), (3, 1));
        assert_eq!(limit_denominator(0.3, 8), (2, 7));
    }

    #[test]
    fn test_pretty_quantity() {
        assert_eq!(pretty_quantity(Some(2.5)), "2 ½");
        assert_eq!(pretty_quantity(Some(3.0)), "3");
        assert_eq!(pretty_quantity(Some(0.125)), "⅛");
        assert_eq!(pretty_quantity(Some(0.75)), "¾");
        assert_eq!(pretty_quantity(Some(1.25)), "1 ¼");
        assert_eq!(pretty_quantity(Some(0.3)), "2/7");
    }

    #[test]
    fn test_pretty_quantity_empty_cases() {
        assert_eq!(pretty_quantity(None), "");
        assert_eq!(pretty_quantity(Some(0.0)), "");
        assert_eq!(pretty_quantity(Some(-1.0)), "");
        assert_eq!(pretty_quantity(Some(f64::NAN)), "");
        assert_eq!(pretty_quantity(Some(0.01)), "");
    }

    #[test]
    fn test_ingredient_line() {
        assert_eq!(ingredient_line("Flour", Some(2.25), "cups"), "Flour: 2 ¼ cups");
        assert_eq!(ingredient_line("Tomato", Some(2.0), ""), "Tomato: 2");
        assert_eq!(ingredient_line("Salt", Some(0.0), "tsp"), "Salt");
        assert_eq!(ingredient_line("", None, ""), "Ingredient");
    }
}
