use mc_common::Money;

/// The whole-number percentage saved when buying at `discounted` instead of `original`.
///
/// Returns 0 when `original` is not positive.
pub fn discount_percent(original: Money, discounted: Money) -> i64 {
    if !original.is_positive() {
        return 0;
    }
    let saved = (original - discounted).cents() as f64;
    #[allow(clippy::cast_possible_truncation)]
    let pct = (saved / original.cents() as f64 * 100.0).round() as i64;
    pct
}

/// The lowest of the given prices, ignoring missing ones.
pub fn lowest_price<I: IntoIterator<Item = Option<Money>>>(prices: I) -> Option<Money> {
    prices.into_iter().flatten().min()
}
