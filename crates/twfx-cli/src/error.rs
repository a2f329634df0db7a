use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Fx(#[from] twfx_core::FxError),

    #[error("operation cancelled")]
    Interrupted,

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Interrupted => 130,
            Self::Fx(_) | Self::Csv(_) | Self::Serialization(_) | Self::Io(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twfx_core::FxError;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Interrupted.exit_code(), 130);
        let fx = CliError::from(FxError::CurrencyNotFound("XYZ".to_string()));
        assert_eq!(fx.exit_code(), 1);
        assert_eq!(fx.to_string(), "Currency not found: XYZ");
    }
}
