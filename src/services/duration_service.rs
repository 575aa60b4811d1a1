//! Estimación de duración de un trayecto
//!
//! Estimación provisional: la diferencia entre pincodes, módulo 24, en horas.
//! No hay cálculo geográfico real.

use chrono::{DateTime, Utc};

use crate::models::{Pincode, TimeWindow};

const HOURS_PER_DAY: u64 = 24;

/// Duración estimada en horas entre dos pincodes, siempre en `[0, 23]`
pub fn calculate_duration(from: Pincode, to: Pincode) -> u32 {
    let distance = i64::from(from.value()).abs_diff(i64::from(to.value()));
    (distance % HOURS_PER_DAY) as u32
}

/// Ventana `[start, start + duración)` de un trayecto
pub fn booking_window(start: DateTime<Utc>, from: Pincode, to: Pincode) -> TimeWindow {
    TimeWindow::starting_at(start, calculate_duration(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn pin(value: i64) -> Pincode {
        Pincode::new(value).unwrap()
    }

    #[test]
    fn test_calculates_duration_between_pincodes() {
        assert_eq!(calculate_duration(pin(100001), pin(100020)), 19);
        assert_eq!(calculate_duration(pin(100020), pin(100001)), 19);
        assert_eq!(calculate_duration(pin(110001), pin(110005)), 4);
    }

    #[test]
    fn test_wraps_modulo_24() {
        assert_eq!(calculate_duration(pin(100001), pin(100025)), 0);
        assert_eq!(calculate_duration(pin(100001), pin(100049)), 0);
        assert_eq!(calculate_duration(pin(100001), pin(100050)), 1);
        assert_eq!(calculate_duration(pin(7), pin(7)), 0);
    }

    #[test]
    fn test_symmetric_and_bounded() {
        let codes = [0, 1, 23, 24, 25, 560001, 110005, 999999, i32::MAX as i64];
        for &a in &codes {
            for &b in &codes {
                let d = calculate_duration(pin(a), pin(b));
                assert_eq!(d, calculate_duration(pin(b), pin(a)));
                assert!(d < 24);
                assert_eq!(u64::from(d), (a - b).unsigned_abs() % 24);
            }
        }
    }

    #[test]
    fn test_booking_window_end_time() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let window = booking_window(start, pin(100001), pin(100020));
        assert_eq!(window.start, start);
        assert_eq!(window.end.to_rfc3339(), "2024-01-02T05:00:00+00:00");
    }
}
