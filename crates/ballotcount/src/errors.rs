//! Error handling and exit codes.

use ballotcount_core::constants::exit_codes;
use ballotcount_core::tally::TallyError;

/// Map a tally error to its process exit code.
pub fn handle_error(err: &TallyError) -> i32 {
    match err {
        TallyError::InvalidInput(_) | TallyError::Worker(_) => exit_codes::ERROR_GENERIC,
        TallyError::Config(_) => exit_codes::ERROR_CONFIG,
        TallyError::Allocation(_) => exit_codes::ERROR_RESOURCE,
        TallyError::Mismatch => exit_codes::ERROR_MISMATCH,
    }
}

/// Exit code for an application error; errors without a `TallyError` are generic.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<TallyError>()
        .map_or(exit_codes::ERROR_GENERIC, handle_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes() {
        assert_eq!(handle_error(&TallyError::Mismatch), 3);
        assert_eq!(handle_error(&TallyError::Config("bad".into())), 4);
        assert_eq!(handle_error(&TallyError::Allocation("oom".into())), 5);
        assert_eq!(handle_error(&TallyError::Worker("panic".into())), 1);
        assert_eq!(handle_error(&TallyError::InvalidInput("t=0".into())), 1);
    }

    #[test]
    fn anyhow_wrapping() {
        let err = anyhow::Error::from(TallyError::Config("bad".into()));
        assert_eq!(exit_code(&err), exit_codes::ERROR_CONFIG);

        let err = anyhow::Error::from(TallyError::Mismatch).context("while comparing");
        assert_eq!(exit_code(&err), exit_codes::ERROR_MISMATCH);

        let err = anyhow::anyhow!("disk on fire");
        assert_eq!(exit_code(&err), exit_codes::ERROR_GENERIC);
    }
}
