#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Store failed with: {0}")]
    Store(String),

    #[error("No interest strategy registered for plan type: {0}")]
    UnknownPlanType(String),

    #[error("Duplicate interest strategy registration for plan type: {0}")]
    DuplicatePlanType(String),
}
