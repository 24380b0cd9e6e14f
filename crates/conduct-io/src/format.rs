use std::fmt;

/// Token written for a node that is not part of the body. Gnuplot reads it as missing data.
pub const MISSING: &str = "nan";

/// A temperature as written to a snapshot: shortest round-trip form, or [`MISSING`] for `NaN`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperature(pub f64);

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_nan() {
            f.write_str(MISSING)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// A grid coordinate, printed with just enough decimals to resolve the grid spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub value: f64,
    pub precision: usize,
}

impl Coordinate {
    pub fn new(value: f64, spacing: f64) -> Self {
        Self { value, precision: precision(spacing) }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*}", self.precision, self.value)
    }
}

/// Number of decimals needed to print multiples of `spacing` without losing grid lines.
pub fn precision(spacing: f64) -> usize {
    let mut digits = 0;
    let mut scaled = spacing;

    while digits < 12 && (scaled - scaled.round()).abs() > 1e-9 * scaled.abs().max(1.0) {
        scaled *= 10.0;
        digits += 1;
    }

    digits
}

/// Parses a temperature token, accepting [`MISSING`] in any case.
pub fn parse_temperature(token: &str) -> Option<f64> {
    if token.eq_ignore_ascii_case(MISSING) {
        Some(f64::NAN)
    } else {
        token.parse().ok()
    }
}
