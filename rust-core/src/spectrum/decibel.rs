//! Linear power to decibel conversion

/// Convert linear power to dB: 10*log10(power)
///
/// Non-positive power maps to negative infinity, which is a valid value for
/// a silent band and is carried through to the output unchanged.
pub fn power_to_db(power: f64) -> f64 {
    if power <= 0.0 {
        return f64::NEG_INFINITY;
    }
    10.0 * power.log10()
}
