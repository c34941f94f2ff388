//! Exit-code mapping for any CLI adapter wrapped around the core (§6).
//! The core itself never calls `process::exit`; a binary crate maps its
//! outcome through `CliOutcome::exit_code` at its own `main` boundary.

use std::process::ExitCode;

/// The four terminal conditions a CLI adapter distinguishes at its exit
/// boundary, plus the success case (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliOutcome {
    Ok,
    InvalidArguments,
    ConfigLoadFailure,
    StateLoadFailure,
    AuthorityMismatch,
}

impl CliOutcome {
    pub fn exit_code(self) -> ExitCode {
        let code: u8 = match self {
            CliOutcome::Ok => 0,
            CliOutcome::InvalidArguments => 1,
            CliOutcome::ConfigLoadFailure => 2,
            CliOutcome::StateLoadFailure => 3,
            CliOutcome::AuthorityMismatch => 4,
        };
        ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_spec_table() {
        assert_eq!(format!("{:?}", CliOutcome::Ok.exit_code()), format!("{:?}", ExitCode::from(0)));
        assert_eq!(format!("{:?}", CliOutcome::InvalidArguments.exit_code()), format!("{:?}", ExitCode::from(1)));
        assert_eq!(format!("{:?}", CliOutcome::ConfigLoadFailure.exit_code()), format!("{:?}", ExitCode::from(2)));
        assert_eq!(format!("{:?}", CliOutcome::StateLoadFailure.exit_code()), format!("{:?}", ExitCode::from(3)));
        assert_eq!(format!("{:?}", CliOutcome::AuthorityMismatch.exit_code()), format!("{:?}", ExitCode::from(4)));
    }
}
