use super::{onboarding::OnboardingState, storage::StorageError, validation::ValidationError};

/// A database call failed; the surrounding transaction is rolled back.
#[derive(Debug, thiserror::Error)]
#[error("persistence failed: {0}")]
pub struct PersistenceError(pub anyhow::Error);

impl From<anyhow::Error> for PersistenceError {
    fn from(err: anyhow::Error) -> Self {
        PersistenceError(err)
    }
}

impl From<sqlx::Error> for PersistenceError {
    fn from(err: sqlx::Error) -> Self {
        PersistenceError(err.into())
    }
}

impl PersistenceError {
    /// True when the failure is a unique constraint violation.
    pub fn is_unique_violation(&self) -> bool {
        self.0
            .downcast_ref::<sqlx::Error>()
            .and_then(|err| err.as_database_error())
            .is_some_and(|err| err.is_unique_violation())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error("transition not allowed from state {0}")]
    OutOfOrder(OnboardingState),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl From<anyhow::Error> for OnboardingError {
    fn from(err: anyhow::Error) -> Self {
        OnboardingError::Persistence(PersistenceError(err))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("invalid form: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("role profile already submitted")]
    AlreadySubmitted,
    #[error("role profile not expected in state {0}")]
    OutOfOrder(OnboardingState),
}

impl From<anyhow::Error> for SubmitError {
    fn from(err: anyhow::Error) -> Self {
        SubmitError::Persistence(PersistenceError(err))
    }
}

impl From<OnboardingError> for SubmitError {
    fn from(err: OnboardingError) -> Self {
        match err {
            OnboardingError::OutOfOrder(state) => SubmitError::OutOfOrder(state),
            OnboardingError::Persistence(err) => SubmitError::Persistence(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_error_is_not_unique_violation() {
        let err = PersistenceError(anyhow::anyhow!("connection reset"));
        assert!(!err.is_unique_violation());
        let err = PersistenceError::from(sqlx::Error::RowNotFound);
        assert!(!err.is_unique_violation());
    }

    #[test]
    fn test_onboarding_error_maps_into_submit_error() {
        let err: SubmitError = OnboardingError::OutOfOrder(OnboardingState::NeedsLanguage).into();
        assert!(matches!(
            err,
            SubmitError::OutOfOrder(OnboardingState::NeedsLanguage)
        ));
    }
}
