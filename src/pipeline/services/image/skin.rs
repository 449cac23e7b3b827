/// RGB rule for skin-coloured pixels under daylight.
pub fn is_skin(r: u8, g: u8, b: u8) -> bool {
    let (r, g, b) = (r as i16, g as i16, b as i16);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);

    r > 95 && g > 40 && b > 20 && max - min > 15 && (r - g).abs() > 15 && r > g && r > b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typical_skin_tone_matches() {
        assert!(is_skin(200, 140, 110));
        assert!(is_skin(96, 41, 21));
    }

    #[test]
    fn channel_floors_are_strict() {
        assert!(!is_skin(95, 41, 21));
        assert!(!is_skin(200, 40, 30));
        assert!(!is_skin(200, 140, 20));
    }

    #[test]
    fn red_must_dominate_by_more_than_fifteen() {
        // |r - g| == 15
        assert!(!is_skin(150, 135, 30));
        // green dominates
        assert!(!is_skin(120, 200, 60));
        // blue ties red
        assert!(!is_skin(150, 60, 150));
    }

    #[test]
    fn grey_and_blue_are_not_skin() {
        assert!(!is_skin(128, 128, 128));
        assert!(!is_skin(0, 0, 255));
        assert!(!is_skin(255, 255, 255));
    }
}
