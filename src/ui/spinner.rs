//! Status glyph animation. One frame per timer tick.

/// Braille-dot frames, cycled in order.
pub const SPINNER_FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Phase after one tick.
pub fn next_phase(phase: usize) -> usize {
    (phase + 1) % SPINNER_FRAMES.len()
}

pub fn glyph(phase: usize) -> &'static str {
    SPINNER_FRAMES[phase % SPINNER_FRAMES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_wraps_after_last_frame() {
        let last = SPINNER_FRAMES.len() - 1;
        assert_eq!(next_phase(last), 0);
        assert_eq!(next_phase(0), 1);
    }

    #[test]
    fn glyph_tolerates_out_of_range_phase() {
        assert_eq!(glyph(SPINNER_FRAMES.len()), SPINNER_FRAMES[0]);
    }
}
