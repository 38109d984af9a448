use super::error::InvalidEdge;
use super::model::Weight;

/// Parse free-form user text into an edge weight.
///
/// Any finite non-negative number is accepted and truncated towards zero, so
/// `"2.5"` weighs 2 and `"1e3"` weighs 1000. Surrounding whitespace is
/// ignored. Empty, non-numeric, negative and out-of-range input is rejected.
pub fn parse_weight(text: &str) -> Result<Weight, InvalidEdge> {
	let trimmed = text.trim();
	let invalid = || InvalidEdge::InvalidWeight(trimmed.to_string());

	let value: f64 = trimmed.parse().map_err(|_| invalid())?;
	if !value.is_finite() {
		return Err(invalid());
	}
	if value < 0.0 {
		return Err(InvalidEdge::NegativeWeight(trimmed.to_string()));
	}
	let whole = value.trunc();
	if whole > f64::from(Weight::MAX) {
		return Err(invalid());
	}
	// In range and non-negative, so the cast is exact.
	Ok(whole as Weight)
}
