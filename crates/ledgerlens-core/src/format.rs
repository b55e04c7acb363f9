//! Number formatting for insight messages and CLI tables

/// Format a currency amount with grouped thousands and no decimals.
///
/// ```
/// use ledgerlens_core::format::format_amount;
/// assert_eq!(format_amount(1234567.4), "1,234,567");
/// assert_eq!(format_amount(-9900.0), "-9,900");
/// ```
pub fn format_amount(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
