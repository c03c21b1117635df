//! Validated creation of pledges from user input.

use crate::{config::Config, errors::Result, ledger::Pledge};

use super::{require_text, resolve_amount, resolve_department};

pub struct PledgeService;

impl PledgeService {
    /// Builds a pledge ready for [`crate::core::store::Store::append`].
    pub fn create(config: &Config, name: &str, department: &str, amount: &str) -> Result<Pledge> {
        let name = require_text("name", name)?;
        let department = resolve_department(config, department)?;
        let amount = resolve_amount(amount)?;
        Ok(Pledge::new(name, department, amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LedgerError;

    #[test]
    fn create_canonicalizes_department() {
        let pledge = PledgeService::create(&Config::default(), " Ann ", "eagles", "1500").unwrap();
        assert_eq!(pledge.name, "Ann");
        assert_eq!(pledge.department, "Eagles");
        assert_eq!(pledge.amount, 1500.0);
        assert!(pledge.id.is_blank());
    }

    #[test]
    fn create_rejects_bad_input() {
        let config = Config::default();
        for (name, dept, amount) in [
            ("", "Eagles", "10"),
            ("Ann", "Choir", "10"),
            ("Ann", "Eagles", "ten"),
        ] {
            let err = PledgeService::create(&config, name, dept, amount).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidInput(_)), "{err:?}");
        }
    }
}
