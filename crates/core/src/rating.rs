//! Personal rating rules for the watch history.

/// Lowest accepted rating.
pub const MIN_RATING: f64 = 0.5;

/// Highest accepted rating.
pub const MAX_RATING: f64 = 10.0;

/// Ratings are given in half-point steps.
const RATING_STEP: f64 = 0.5;

/// Validate a rating: within `[MIN_RATING, MAX_RATING]` and a multiple of 0.5.
pub fn validate_rating(rating: f64) -> Result<(), String> {
    if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}"
        ));
    }
    let steps = rating / RATING_STEP;
    if (steps - steps.round()).abs() > f64::EPSILON {
        return Err("rating must be given in steps of 0.5".to_string());
    }
    Ok(())
}
