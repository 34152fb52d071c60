//! Year-end employment income slip (T4 equivalent).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The employee named on a slip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlipEmployee {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Social Insurance Number.
    pub sin: String,
    /// Mailing address.
    pub address: String,
}

/// The employer identification printed on every slip.
///
/// Loaded from `employer.yaml` in the configuration directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerIdentity {
    /// Legal business name.
    pub name: String,
    /// Business address.
    pub address: String,
    /// Payroll program account number (e.g. "RP0001").
    pub payroll_number: String,
    /// Business number including the program account.
    pub business_number: String,
}

/// A single labelled box on the slip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlipBox {
    /// Box code as printed on the form (e.g. "14").
    pub code: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Amount in the box.
    pub amount: Decimal,
}

/// An annual statement of employment income and deductions.
///
/// Box amounts are twelve-month totals reconstructed from one bi-weekly
/// payroll run multiplied by 26, so they can differ by a few cents from
/// the exact annual computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualSlip {
    /// The employee the slip is issued to.
    pub employee: SlipEmployee,
    /// The issuing employer.
    pub employer: EmployerIdentity,
    /// The tax year covered.
    pub tax_year: i32,
    /// Box 14: employment income.
    pub employment_income: Decimal,
    /// Box 16: employee CPP/RRQ contributions.
    pub cpp_contributions: Decimal,
    /// Box 18: employee EI premiums.
    pub ei_premiums: Decimal,
    /// Box 22: federal income tax deducted.
    pub income_tax_deducted: Decimal,
    /// Box O: RQAP premiums.
    pub rqap_premiums: Decimal,
    /// Quebec income tax deducted over the year.
    pub provincial_income_tax: Decimal,
}

impl AnnualSlip {
    /// Returns the numbered boxes in the order they appear on the form.
    pub fn boxes(&self) -> Vec<SlipBox> {
        vec![
            SlipBox {
                code: "14",
                label: "Employment income",
                amount: self.employment_income,
            },
            SlipBox {
                code: "16",
                label: "Employee's CPP contributions",
                amount: self.cpp_contributions,
            },
            SlipBox {
                code: "18",
                label: "Employee's EI premiums",
                amount: self.ei_premiums,
            },
            SlipBox {
                code: "22",
                label: "Income tax deducted",
                amount: self.income_tax_deducted,
            },
            SlipBox {
                code: "O",
                label: "RQAP premiums",
                amount: self.rqap_premiums,
            },
        ]
    }

    /// Returns the employee's full name as printed on the slip.
    pub fn employee_name(&self) -> String {
        format!("{} {}", self.employee.first_name, self.employee.last_name)
    }
}
