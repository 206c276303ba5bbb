use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::ledger::LoanRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductTotal {
    pub product_type: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    pub total_amount: Decimal,
    /// Groups appear in the order their product is first seen in the input.
    pub per_product_totals: Vec<ProductTotal>,
}

impl Aggregate {
    pub fn total_for(&self, product_type: &str) -> Option<Decimal> {
        self.per_product_totals
            .iter()
            .find(|group| group.product_type == product_type)
            .map(|group| group.amount)
    }
}

pub fn aggregate<'a, I>(records: I) -> Aggregate
where
    I: IntoIterator<Item = &'a LoanRecord>,
{
    let mut per_product_totals: Vec<ProductTotal> = Vec::new();
    let mut index_by_product: HashMap<&'a str, usize> = HashMap::new();

    for record in records {
        match index_by_product.get(record.product_type.as_str()).copied() {
            Some(index) => {
                let group = &mut per_product_totals[index];
                group.amount = group.amount.saturating_add(record.amount);
            }
            None => {
                index_by_product.insert(record.product_type.as_str(), per_product_totals.len());
                per_product_totals.push(ProductTotal {
                    product_type: record.product_type.clone(),
                    amount: record.amount,
                });
            }
        }
    }

    // Invariant: total_amount == sum of per_product_totals. Saturation only
    // matters for stores built outside the loader, which rejects overflowing sums.
    let total_amount = per_product_totals
        .iter()
        .fold(Decimal::ZERO, |total, group| total.saturating_add(group.amount));

    Aggregate {
        total_amount,
        per_product_totals,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::aggregate;
    use crate::ledger::LoanRecord;

    fn record(day: u32, product: &str, amount: Decimal) -> Option<LoanRecord> {
        let date = NaiveDate::from_ymd_opt(2025, 5, day)?;
        Some(LoanRecord::new(date, product, amount))
    }

    #[test]
    fn empty_input_yields_zero_and_no_groups() {
        let result = aggregate(std::iter::empty::<&LoanRecord>());
        assert_eq!(result.total_amount, Decimal::ZERO);
        assert!(result.per_product_totals.is_empty());
    }

    #[test]
    fn groups_sum_per_product_in_first_seen_order() {
        let records = [
            record(24, "Gold Loan", Decimal::from(1000)),
            record(24, "Business Loan", Decimal::from(2000)),
            record(25, "Gold Loan", Decimal::from(500)),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<LoanRecord>>();

        let result = aggregate(&records);
        assert_eq!(result.total_amount, Decimal::from(3500));
        assert_eq!(result.per_product_totals.len(), 2);
        assert_eq!(result.per_product_totals[0].product_type, "Gold Loan");
        assert_eq!(result.total_for("Gold Loan"), Some(Decimal::from(1500)));
        assert_eq!(result.total_for("Business Loan"), Some(Decimal::from(2000)));
        assert_eq!(result.total_for("Home Loan"), None);
    }

    #[test]
    fn total_equals_sum_of_groups_with_fractional_amounts() {
        let records = [
            record(1, "Gold Loan", Decimal::new(10, 2)),
            record(2, "Home Loan", Decimal::new(20, 2)),
            record(3, "Gold Loan", Decimal::new(1999, 2)),
            record(4, "Car Loan", Decimal::new(33333, 3)),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<LoanRecord>>();

        let result = aggregate(&records);
        let group_sum = result
            .per_product_totals
            .iter()
            .map(|group| group.amount)
            .sum::<Decimal>();
        assert_eq!(result.total_amount, group_sum);
        assert_eq!(result.total_amount, Decimal::new(53623, 3));
    }

    #[test]
    fn oversized_amounts_saturate_instead_of_panicking() {
        let records = [
            record(1, "Gold Loan", Decimal::MAX),
            record(2, "Gold Loan", Decimal::MAX),
            record(3, "Home Loan", Decimal::ONE),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<LoanRecord>>();

        let result = aggregate(&records);
        assert_eq!(result.total_for("Gold Loan"), Some(Decimal::MAX));
        assert_eq!(result.total_amount, Decimal::MAX);
    }
}
