// Human-readable power magnitudes

const UNITS: [(f64, &str); 3] = [(1e9, "GW"), (1e6, "MW"), (1e3, "kW")];

/// Format watts with the largest unit that keeps the scaled value >= 1.
///
/// Negative values keep their sign and pick the unit by magnitude.
/// Non-finite input renders as `0.00 W`.
pub fn format_power(power: f64) -> String {
    if !power.is_finite() {
        return "0.00 W".to_string();
    }

    let magnitude = power.abs();
    for (scale, unit) in UNITS {
        if magnitude >= scale {
            return format!("{:.2} {}", power / scale, unit);
        }
    }
    format!("{:.2} W", power)
}
