//! Order number formatting
//!
//! Human-readable sequential identifier, distinct from the internal record
//! id: `RFL` + 6-digit zero-padded sequence. The sequence itself comes from
//! the storage-backed atomic counter (`OrderRepository::next_sequence`).

/// Prefix for every order number
pub const ORDER_NUMBER_PREFIX: &str = "RFL";

/// Format a sequence value as an order number
pub fn format_order_number(sequence: u64) -> String {
    format!("{}{:06}", ORDER_NUMBER_PREFIX, sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_pads_to_six_digits() {
        assert_eq!(format_order_number(1), "RFL000001");
        assert_eq!(format_order_number(42), "RFL000042");
        assert_eq!(format_order_number(123456), "RFL123456");
    }

    #[test]
    fn does_not_truncate_past_six_digits() {
        assert_eq!(format_order_number(1_234_567), "RFL1234567");
    }
}
