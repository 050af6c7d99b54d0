//! Derived feature columns appended to the feature matrix.

/// Comfort index on a 0–100 scale, from a simplified heat-index formula:
/// 100 − |T − 22|·2 − |H − 50|·0.5.
pub fn comfort_index(temperature: f64, humidity: f64) -> f64 {
    (100.0 - (temperature - 22.0).abs() * 2.0 - (humidity - 50.0).abs() * 0.5).clamp(0.0, 100.0)
}

/// Atmospheric stability index on a 0–100 scale, from pressure deviation
/// around the standard atmosphere and wind speed:
/// 50 + (P − 1013.25)/50·20 − (W/20)·30.
pub fn stability_index(pressure: f64, wind_speed: f64) -> f64 {
    let pressure_norm = (pressure - 1013.25) / 50.0;
    let wind_factor = wind_speed / 20.0;
    (50.0 + pressure_norm * 20.0 - wind_factor * 30.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ideal_conditions_score_full_comfort() {
        assert_eq!(comfort_index(22.0, 50.0), 100.0);
    }

    #[test]
    fn extremes_clamp_to_zero() {
        assert_eq!(comfort_index(60.0, 100.0), 0.0);
    }

    #[test]
    fn comfort_decreases_away_from_ideal() {
        assert!(comfort_index(30.0, 50.0) < comfort_index(24.0, 50.0));
    }

    #[test]
    fn standard_atmosphere_calm_is_midscale() {
        assert_eq!(stability_index(1013.25, 0.0), 50.0);
    }

    #[test]
    fn wind_destabilizes() {
        assert!(stability_index(1013.25, 20.0) < stability_index(1013.25, 5.0));
    }

    #[test]
    fn high_pressure_stabilizes() {
        assert!(stability_index(1030.0, 5.0) > stability_index(1000.0, 5.0));
    }
}
