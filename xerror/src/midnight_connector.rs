#[derive(Debug, Clone, Copy)]
pub enum MidnightConnectorError {
    UnknownContract,
    InsufficientBalance,
    InvalidAmount,
}

impl std::fmt::Display for MidnightConnectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
