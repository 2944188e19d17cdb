#[derive(Debug, Clone, Copy)]
pub enum TreasuryError {
    NoActiveToken,
    InvalidAmount,
}

impl std::fmt::Display for TreasuryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let output = match self {
            TreasuryError::NoActiveToken => "NoActiveToken",
            TreasuryError::InvalidAmount => "InvalidAmount",
        };
        write!(f, "{}", output)
    }
}
