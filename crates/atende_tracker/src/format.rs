// --- File: crates/atende_tracker/src/format.rs ---

/// Renders elapsed minutes the way the confirmation list displays them.
///
/// Under an hour the value is shown in minutes, exact hours in hours, and
/// anything else as `"<h>h <m>min"`. Only a unit equal to exactly 1 is
/// singular; the combined form never pluralizes.
pub fn format_time_passed(minutes: i64) -> String {
    if minutes < 60 {
        if minutes == 1 {
            "1 minuto".to_string()
        } else {
            format!("{minutes} minutos")
        }
    } else if minutes % 60 == 0 {
        let hours = minutes / 60;
        if hours == 1 {
            "1 hora".to_string()
        } else {
            format!("{hours} horas")
        }
    } else {
        format!("{}h {}min", minutes / 60, minutes % 60)
    }
}
