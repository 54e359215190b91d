use thiserror::Error;

/// Contract terms (months) a router can be ordered for
pub const VALID_TERMS: &[u32] = &[1, 12, 24, 36];

/// Port speeds (Mbps) a router can be ordered with
pub const VALID_PORT_SPEEDS: &[u32] = &[1000, 2500, 5000, 10000];

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid term {0}, valid terms are 1, 12, 24 or 36 months")]
    InvalidTerm(u32),

    #[error("Invalid port speed {0}, valid speeds are 1000, 2500, 5000 or 10000 Mbps")]
    InvalidPortSpeed(u32),
}

/// Business rules for router order validation
#[derive(Debug, Clone)]
pub struct OrderValidator {
    terms: &'static [u32],
    port_speeds: &'static [u32],
}

impl Default for OrderValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderValidator {
    pub fn new() -> Self {
        Self {
            terms: VALID_TERMS,
            port_speeds: VALID_PORT_SPEEDS,
        }
    }

    /// Validate order parameters. Term is checked before port speed.
    pub fn validate(&self, term: u32, port_speed: u32) -> Result<(), ValidationError> {
        self.validate_term(term)?;
        self.validate_port_speed(port_speed)
    }

    pub fn validate_term(&self, term: u32) -> Result<(), ValidationError> {
        if self.terms.contains(&term) {
            Ok(())
        } else {
            Err(ValidationError::InvalidTerm(term))
        }
    }

    pub fn validate_port_speed(&self, port_speed: u32) -> Result<(), ValidationError> {
        if self.port_speeds.contains(&port_speed) {
            Ok(())
        } else {
            Err(ValidationError::InvalidPortSpeed(port_speed))
        }
    }
}
