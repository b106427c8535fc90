//! TIA stores image calibrations in metres. Reported pixel sizes
//! are rescaled to the SI length unit that makes the field of view
//! a number in `[1, 1000)`, e.g. a 2048 pixel image at 1e-10 m
//! per pixel is reported at 0.1 nm per pixel.

const METRE : &str = "m";

/// Largest unit first
const LENGTH_UNITS : [(&str, f64); 5] = [
    (METRE, 1.0),
    ("mm", 1e-3),
    ("µm", 1e-6),
    ("nm", 1e-9),
    ("pm", 1e-12),
];

/// Converts `scale` (metres per pixel over `size` pixels) into
/// `(scale in unit, unit)`.
///
/// Degenerate calibrations (zero, NaN, infinite) are returned in
/// metres unchanged. Fields of view below a picometre stay in pm.
pub fn compact_length(scale : f64, size : u32) -> (f64, &'static str) {
    let field_of_view = (scale * f64::from(size.max(1))).abs();
    if !field_of_view.is_finite() || field_of_view == 0.0 {
        return (scale, METRE);
    }

    let (unit, factor) = LENGTH_UNITS.iter()
        .find(|(_, factor)| field_of_view / factor >= 1.0)
        .copied()
        .unwrap_or(LENGTH_UNITS[LENGTH_UNITS.len() - 1]);
    (scale / factor, unit)
}
