//! Progress aggregation over published chapters.

/// Integer completion percentage for a course.
///
/// Defined as completed published chapters over all published chapters,
/// truncated. A course with no published chapters reports 0 rather than
/// failing on the division. Callers decide whether to surface the number at
/// all; viewers without a purchase get `None` upstream.
pub fn progress_percentage(completed_chapters: u64, published_chapters: u64) -> u8 {
    if published_chapters == 0 {
        return 0;
    }
    let capped = completed_chapters.min(published_chapters);
    // Bounded by 100, so the narrowing cast cannot truncate.
    ((capped * 100) / published_chapters) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, 0)]
    #[case(0, 4, 0)]
    #[case(1, 4, 25)]
    #[case(2, 3, 66)]
    #[case(4, 4, 100)]
    #[case(5, 4, 100)] // stale progress rows never push past 100
    fn percentage_cases(#[case] completed: u64, #[case] published: u64, #[case] expected: u8) {
        assert_eq!(progress_percentage(completed, published), expected);
    }

    #[rstest]
    fn percentage_stays_in_range() {
        for completed in 0..=10u64 {
            for published in 0..=10u64 {
                let value = progress_percentage(completed, published);
                assert!(value <= 100, "{completed}/{published} gave {value}");
            }
        }
    }
}
