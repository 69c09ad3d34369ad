use serde::{Deserialize, Serialize};

/// A quarterly futures contract code such as `MAR26`.
#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
pub struct ContractCode {
    pub name: String,
}

static MONTH_CODES: &[&str] = &[
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

impl ContractCode {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_uppercase(),
        }
    }

    // Finds the month prefix (e.g. "MAR") and returns its 1-based month number.
    pub fn get_month(text: &str) -> Option<u32> {
        MONTH_CODES
            .iter()
            .position(|&m| text.starts_with(m))
            .map(|idx| idx as u32 + 1)
    }

    // Two-digit year suffix, interpreted as 20xx.
    pub fn get_year(text: &str) -> Option<i32> {
        let suffix = text.get(3..)?;
        if suffix.len() != 2 {
            return None;
        }
        suffix.parse::<i32>().ok().map(|yy| 2000 + yy)
    }

    /// (year, month) when the code follows the MMMYY convention
    pub fn expiry(&self) -> Option<(i32, u32)> {
        let month = Self::get_month(&self.name)?;
        let year = Self::get_year(&self.name)?;
        Some((year, month))
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for ContractCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.expiry() {
            Some((year, month)) => write!(f, "{} ({}-{:02})", self.name, year, month),
            None => write!(f, "{}", self.name),
        }
    }
}
