/// `H:MM` label for a study duration; seconds are dropped.
///
/// Hours are unpadded, so anything under an hour reads `0:MM`.
pub fn study_time_label(seconds: u32) -> String {
    let mins = (seconds / 60) % 60;
    let hours = seconds / 3600;
    format!("{hours}:{mins:02}")
}

/// Label for the running countdown: empty once finished, bare seconds during
/// the final minute, otherwise [`study_time_label`].
pub fn countdown_label(remaining_seconds: u32) -> String {
    match remaining_seconds {
        0 => String::new(),
        1..=60 => remaining_seconds.to_string(),
        _ => study_time_label(remaining_seconds),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/format.rs"]
mod tests;
