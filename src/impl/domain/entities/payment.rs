/// A payment recorded against an order's outstanding balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payment {
    /// Settles whatever is still owed.
    Full,
    /// Must be positive and no larger than the remaining balance.
    Partial(f64),
}
