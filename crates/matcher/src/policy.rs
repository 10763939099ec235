//! Scoring policy: tier confidences and thresholds.
//!
//! Shared by the classifier, the aggregator and the client-side
//! approximation so the three can never drift apart.

/// Normalized ingredient and product names are identical.
pub const EXACT_CONFIDENCE: u8 = 100;

/// Product is a known equivalent of the ingredient.
pub const EQUIVALENCY_CONFIDENCE: u8 = 90;

/// Upper bound of a partial match, reached when every ingredient token
/// matches.
pub const PARTIAL_MAX_CONFIDENCE: u8 = 60;

/// Lower bound of a partial match.
pub const PARTIAL_MIN_CONFIDENCE: u8 = 30;

pub const CATEGORY_CONFIDENCE: u8 = 40;

pub const SUBSTITUTE_CONFIDENCE: u8 = 35;

/// An ingredient counts as available when one of its matches scores strictly
/// above this.
pub const AVAILABILITY_THRESHOLD: u8 = 30;

/// Shortest ingredient token allowed to match inside a longer product token.
/// Shorter tokens only match identical tokens.
pub const MIN_SUBSTRING_LEN: usize = 3;

/// Version of the client-side availability approximation. Bump whenever
/// [`approximate_availability`](crate::approximate_availability) changes
/// behavior.
pub const APPROXIMATION_VERSION: u32 = 1;
