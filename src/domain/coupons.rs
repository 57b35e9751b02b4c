use std::collections::HashMap;

use super::errors::DomainError;

/// Read-only table of coupon codes and their percentage discounts.
///
/// Built once at startup and injected into the checkout service; the
/// handlers never see it. Codes are stored uppercased and looked up
/// case-insensitively. An unknown code is not an error, the caller
/// degrades to "no discount" and flags the code as invalid.
#[derive(Debug, Clone)]
pub struct CouponBook {
    codes: HashMap<String, u32>,
}

impl CouponBook {
    pub fn new(codes: HashMap<String, u32>) -> Self {
        let codes = codes
            .into_iter()
            .map(|(code, pct)| (code.to_uppercase(), pct))
            .collect();
        Self { codes }
    }

    /// The stock table shipped with the storefront.
    pub fn builtin() -> Self {
        Self::new(HashMap::from([
            ("SAVE10".to_string(), 10),
            ("SAVE15".to_string(), 15),
            ("SAVE20".to_string(), 20),
        ]))
    }

    /// Parse a `COUPON_CODES` value such as `"SAVE10=10,WELCOME=25"`.
    ///
    /// Percentages must be integers in 1..=100.
    pub fn parse(spec: &str) -> Result<Self, DomainError> {
        let mut codes = HashMap::new();
        for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (code, pct) = entry.split_once('=').ok_or_else(|| {
                DomainError::Validation(format!(
                    "Coupon entry '{entry}' must have the form CODE=PERCENTAGE"
                ))
            })?;
            let pct: u32 = pct.trim().parse().map_err(|_| {
                DomainError::Validation(format!("Coupon '{code}' has a non-numeric percentage"))
            })?;
            if pct == 0 || pct > 100 {
                return Err(DomainError::Validation(format!(
                    "Coupon '{code}' percentage must be between 1 and 100, got {pct}"
                )));
            }
            codes.insert(code.trim().to_uppercase(), pct);
        }
        if codes.is_empty() {
            return Err(DomainError::Validation(
                "COUPON_CODES must contain at least one CODE=PERCENTAGE entry".to_string(),
            ));
        }
        Ok(Self { codes })
    }

    /// Percentage for a code, if the uppercased code is in the table.
    pub fn percentage(&self, code: &str) -> Option<u32> {
        self.codes.get(&code.to_uppercase()).copied()
    }
}
