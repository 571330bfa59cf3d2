//! Pure reductions over transaction and budget snapshots.
//!
//! Nothing here performs I/O or holds state; every function can run
//! concurrently with any other. Inputs are assumed to be validated records.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Datelike;
use rust_decimal::{Decimal, RoundingStrategy};

use super::models::{
    BudgetComparisonEntry, CategoryShare, DailyPoint, MonthlyGrouping, MonthlyPoint,
    MonthlySeries, SummaryStats,
};
use crate::budget::models::Budget;
use crate::category::Category;
use crate::month::{YearMonth, SHORT_MONTH_NAMES};
use crate::transaction::models::Transaction;

/// `part / whole * 100` to two places, or 0 when `whole` is not positive.
fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (part * Decimal::ONE_HUNDRED / whole)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

fn in_month(transactions: &[Transaction], month: YearMonth) -> impl Iterator<Item = &Transaction> {
    transactions.iter().filter(move |t| month.contains(t.date))
}

fn totals_by_category<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> BTreeMap<Category, Decimal> {
    let mut totals = BTreeMap::new();
    for transaction in transactions {
        *totals.entry(transaction.category).or_insert(Decimal::ZERO) += transaction.amount;
    }
    totals
}

/// Sum of amounts per category. Categories with no transactions have no entry.
pub fn category_totals(transactions: &[Transaction]) -> BTreeMap<Category, Decimal> {
    totals_by_category(transactions)
}

/// Budgeted and actual spend for every category that has either a budget or
/// spend in `month`, sorted by category name.
pub fn budget_comparison(
    budgets: &[Budget],
    transactions: &[Transaction],
    month: YearMonth,
) -> Vec<BudgetComparisonEntry> {
    let budgeted: BTreeMap<Category, Decimal> = budgets
        .iter()
        .filter(|b| b.month == month)
        .map(|b| (b.category, b.amount))
        .collect();
    let actuals = totals_by_category(in_month(transactions, month));

    let categories: BTreeSet<Category> = budgeted.keys().chain(actuals.keys()).copied().collect();

    let mut entries: Vec<BudgetComparisonEntry> = categories
        .into_iter()
        .map(|category| {
            let budgeted = budgeted.get(&category).copied().unwrap_or(Decimal::ZERO);
            let actual = actuals.get(&category).copied().unwrap_or(Decimal::ZERO);
            BudgetComparisonEntry {
                category,
                budgeted,
                actual,
                remaining: budgeted - actual,
                utilization_pct: percentage(actual, budgeted),
            }
        })
        .collect();

    entries.sort_by_key(|e| e.category.as_str());
    entries
}

/// Category totals with each category's share of the overall spend, largest
/// first.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryShare> {
    let totals = category_totals(transactions);
    let grand_total: Decimal = totals.values().copied().sum();

    let mut shares: Vec<CategoryShare> = totals
        .into_iter()
        .map(|(category, total)| CategoryShare {
            category,
            total,
            share_pct: percentage(total, grand_total),
        })
        .collect();

    shares.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });
    shares
}

/// One point per day of `month`, including days with no spend.
pub fn daily_series(transactions: &[Transaction], month: YearMonth) -> Vec<DailyPoint> {
    let mut totals = vec![Decimal::ZERO; month.days_in_month() as usize];
    for transaction in in_month(transactions, month) {
        totals[transaction.date.day0() as usize] += transaction.amount;
    }

    totals
        .into_iter()
        .zip(1..)
        .map(|(total, day)| DailyPoint { day, total })
        .collect()
}

fn twelve_months<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    year: i32,
    grouping: MonthlyGrouping,
) -> MonthlySeries {
    let mut totals = [Decimal::ZERO; 12];
    for transaction in transactions {
        totals[transaction.date.month0() as usize] += transaction.amount;
    }

    let points = totals
        .into_iter()
        .zip(SHORT_MONTH_NAMES)
        .zip(1..)
        .map(|((total, label), month)| MonthlyPoint {
            month,
            label: label.to_string(),
            total,
        })
        .collect();

    MonthlySeries {
        year,
        grouping,
        points,
    }
}

/// Twelve totals, January to December, bucketed by month of year only.
///
/// Transactions from every year land in the same twelve buckets; the
/// reference year only labels the series. [`monthly_series_for_year`] is the
/// variant that keeps years apart.
pub fn monthly_series(transactions: &[Transaction], reference_year: i32) -> MonthlySeries {
    twelve_months(transactions, reference_year, MonthlyGrouping::Calendar)
}

/// Twelve totals for `year`; transactions dated in other years are ignored.
pub fn monthly_series_for_year(transactions: &[Transaction], year: i32) -> MonthlySeries {
    twelve_months(
        transactions.iter().filter(|t| t.date.year() == year),
        year,
        MonthlyGrouping::Year,
    )
}

pub fn summary_stats(
    transactions: &[Transaction],
    budgets: &[Budget],
    month: YearMonth,
) -> SummaryStats {
    let (total_actual, transaction_count) = in_month(transactions, month)
        .fold((Decimal::ZERO, 0), |(sum, count), t| (sum + t.amount, count + 1));
    let total_budgeted: Decimal = budgets
        .iter()
        .filter(|b| b.month == month)
        .map(|b| b.amount)
        .sum();
    let days_in_month = month.days_in_month();

    SummaryStats {
        month,
        total_actual,
        total_budgeted,
        remaining: total_budgeted - total_actual,
        utilization_pct: percentage(total_actual, total_budgeted),
        avg_daily: (total_actual / Decimal::from(days_in_month))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .normalize(),
        days_in_month,
        transaction_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::models::MAX_AMOUNT;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn tx(amount: Decimal, category: Category, date: &str) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            amount,
            description: "test".to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            category,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn budget(month: &str, category: Category, amount: Decimal) -> Budget {
        Budget {
            id: Uuid::new_v4(),
            month: month.parse().unwrap(),
            category,
            amount,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn ym(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    fn scenario() -> (Vec<Transaction>, Vec<Budget>) {
        (
            vec![
                tx(dec!(500), Category::Food, "2025-07-03"),
                tx(dec!(1200), Category::Bills, "2025-07-10"),
            ],
            vec![budget("2025-07", Category::Food, dec!(1000))],
        )
    }

    #[test]
    fn test_category_totals_groups_and_sums() {
        let transactions = vec![
            tx(dec!(10), Category::Food, "2025-07-01"),
            tx(dec!(15.5), Category::Food, "2025-08-01"),
            tx(dec!(3), Category::Travel, "2025-07-02"),
        ];

        let totals = category_totals(&transactions);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[&Category::Food], dec!(25.5));
        assert_eq!(totals[&Category::Travel], dec!(3));
        assert!(!totals.contains_key(&Category::Bills));
    }

    #[test]
    fn test_category_totals_empty() {
        assert!(category_totals(&[]).is_empty());
    }

    #[test]
    fn test_budget_comparison_example_scenario() {
        let (transactions, budgets) = scenario();

        let comparison = budget_comparison(&budgets, &transactions, ym("2025-07"));

        assert_eq!(comparison.len(), 2);
        assert_eq!(comparison[0].category, Category::Bills);
        assert_eq!(comparison[0].budgeted, Decimal::ZERO);
        assert_eq!(comparison[0].actual, dec!(1200));
        assert_eq!(comparison[0].utilization_pct, Decimal::ZERO);
        assert_eq!(comparison[1].category, Category::Food);
        assert_eq!(comparison[1].budgeted, dec!(1000));
        assert_eq!(comparison[1].actual, dec!(500));
        assert_eq!(comparison[1].remaining, dec!(500));
        assert_eq!(comparison[1].utilization_pct, dec!(50));
    }

    #[test]
    fn test_budget_comparison_includes_budget_only_categories() {
        let budgets = vec![
            budget("2025-07", Category::Travel, dec!(300)),
            budget("2025-08", Category::Shopping, dec!(50)),
        ];

        let comparison = budget_comparison(&budgets, &[], ym("2025-07"));

        assert_eq!(comparison.len(), 1);
        assert_eq!(comparison[0].category, Category::Travel);
        assert_eq!(comparison[0].actual, Decimal::ZERO);
        assert_eq!(comparison[0].remaining, dec!(300));
    }

    #[test]
    fn test_budget_comparison_covers_exactly_the_union_of_categories() {
        let transactions = vec![
            tx(dec!(5), Category::Food, "2025-07-01"),
            tx(dec!(6), Category::Transport, "2025-07-31"),
            tx(dec!(7), Category::Shopping, "2025-06-30"),
            tx(dec!(8), Category::Entertainment, "2025-08-01"),
        ];
        let budgets = vec![
            budget("2025-07", Category::Food, dec!(10)),
            budget("2025-07", Category::Other, dec!(0)),
            budget("2025-06", Category::Bills, dec!(99)),
        ];

        let comparison = budget_comparison(&budgets, &transactions, ym("2025-07"));
        let categories: Vec<Category> = comparison.iter().map(|e| e.category).collect();

        assert_eq!(
            categories,
            vec![Category::Food, Category::Other, Category::Transport]
        );
    }

    #[test]
    fn test_budget_comparison_conserves_actual_spend() {
        let transactions = vec![
            tx(dec!(12.34), Category::Food, "2025-07-01"),
            tx(dec!(0.66), Category::Food, "2025-07-15"),
            tx(dec!(100), Category::Bills, "2025-07-20"),
            tx(dec!(999), Category::Bills, "2024-07-20"),
        ];
        let month = ym("2025-07");

        let comparison = budget_comparison(&[], &transactions, month);
        let compared: Decimal = comparison.iter().map(|e| e.actual).sum();
        let expected: Decimal = transactions
            .iter()
            .filter(|t| month.contains(t.date))
            .map(|t| t.amount)
            .sum();

        assert_eq!(compared, expected);
        assert_eq!(compared, dec!(113));
    }

    #[test]
    fn test_budget_comparison_over_budget_has_negative_remaining() {
        let transactions = vec![tx(dec!(150), Category::Food, "2025-07-01")];
        let budgets = vec![budget("2025-07", Category::Food, dec!(100))];

        let comparison = budget_comparison(&budgets, &transactions, ym("2025-07"));

        assert_eq!(comparison[0].remaining, dec!(-50));
        assert_eq!(comparison[0].utilization_pct, dec!(150));
    }

    #[test]
    fn test_daily_series_is_dense_for_february() {
        let transactions = vec![tx(dec!(20), Category::Food, "2025-02-14")];

        let series = daily_series(&transactions, ym("2025-02"));

        assert_eq!(series.len(), 28);
        let days: Vec<u32> = series.iter().map(|p| p.day).collect();
        assert_eq!(days, (1..=28).collect::<Vec<u32>>());
        assert_eq!(series[13].total, dec!(20));
        assert_eq!(
            series.iter().filter(|p| p.total == Decimal::ZERO).count(),
            27
        );
    }

    #[test]
    fn test_daily_series_leap_year_and_empty_input() {
        let series = daily_series(&[], ym("2024-02"));
        assert_eq!(series.len(), 29);
        assert!(series.iter().all(|p| p.total == Decimal::ZERO));
    }

    #[test]
    fn test_daily_series_sums_same_day_and_ignores_other_months() {
        let transactions = vec![
            tx(dec!(1), Category::Food, "2025-07-31"),
            tx(dec!(2), Category::Bills, "2025-07-31"),
            tx(dec!(4), Category::Food, "2025-08-31"),
        ];

        let series = daily_series(&transactions, ym("2025-07"));

        assert_eq!(series.len(), 31);
        assert_eq!(series[30].day, 31);
        assert_eq!(series[30].total, dec!(3));
        let total: Decimal = series.iter().map(|p| p.total).sum();
        assert_eq!(total, dec!(3));
    }

    #[test]
    fn test_monthly_series_collapses_years_into_calendar_months() {
        let transactions = vec![
            tx(dec!(100), Category::Food, "2024-03-05"),
            tx(dec!(50), Category::Food, "2025-03-20"),
            tx(dec!(7), Category::Travel, "2025-12-31"),
        ];

        let series = monthly_series(&transactions, 2025);

        assert_eq!(series.year, 2025);
        assert_eq!(series.grouping, MonthlyGrouping::Calendar);
        assert_eq!(series.points.len(), 12);
        assert_eq!(series.points[0].label, "Jan");
        assert_eq!(series.points[2].label, "Mar");
        assert_eq!(series.points[2].total, dec!(150));
        assert_eq!(series.points[11].month, 12);
        assert_eq!(series.points[11].total, dec!(7));
    }

    #[test]
    fn test_monthly_series_for_year_keeps_years_apart() {
        let transactions = vec![
            tx(dec!(100), Category::Food, "2024-03-05"),
            tx(dec!(50), Category::Food, "2025-03-20"),
        ];

        let series = monthly_series_for_year(&transactions, 2025);

        assert_eq!(series.grouping, MonthlyGrouping::Year);
        assert_eq!(series.points[2].total, dec!(50));
        let total: Decimal = series.points.iter().map(|p| p.total).sum();
        assert_eq!(total, dec!(50));
    }

    #[test]
    fn test_summary_stats_example_scenario() {
        let (transactions, budgets) = scenario();

        let stats = summary_stats(&transactions, &budgets, ym("2025-07"));

        assert_eq!(stats.total_actual, dec!(1700));
        assert_eq!(stats.total_budgeted, dec!(1000));
        assert_eq!(stats.utilization_pct, dec!(170));
        assert_eq!(stats.remaining, dec!(-700));
        assert_eq!(stats.days_in_month, 31);
        assert_eq!(stats.transaction_count, 2);
        // 1700 / 31 = 54.838...
        assert_eq!(stats.avg_daily, dec!(54.84));
    }

    #[test]
    fn test_summary_stats_without_budgets_has_zero_utilization() {
        let transactions = vec![tx(dec!(280), Category::Food, "2025-02-01")];

        let stats = summary_stats(&transactions, &[], ym("2025-02"));

        assert_eq!(stats.total_budgeted, Decimal::ZERO);
        assert_eq!(stats.utilization_pct, Decimal::ZERO);
        assert_eq!(stats.avg_daily, dec!(10));
    }

    #[test]
    fn test_summary_stats_only_counts_the_requested_month() {
        let transactions = vec![
            tx(dec!(10), Category::Food, "2025-07-01"),
            tx(dec!(90), Category::Food, "2025-06-30"),
        ];
        let budgets = vec![
            budget("2025-07", Category::Food, dec!(20)),
            budget("2025-06", Category::Food, dec!(500)),
        ];

        let stats = summary_stats(&transactions, &budgets, ym("2025-07"));

        assert_eq!(stats.total_actual, dec!(10));
        assert_eq!(stats.total_budgeted, dec!(20));
        assert_eq!(stats.utilization_pct, dec!(50));
        assert_eq!(stats.transaction_count, 1);
    }

    #[test]
    fn test_category_breakdown_orders_by_total() {
        let transactions = vec![
            tx(dec!(25), Category::Food, "2025-07-01"),
            tx(dec!(25), Category::Bills, "2025-07-01"),
            tx(dec!(50), Category::Travel, "2025-07-02"),
        ];

        let breakdown = category_breakdown(&transactions);

        let categories: Vec<Category> = breakdown.iter().map(|s| s.category).collect();
        assert_eq!(
            categories,
            vec![Category::Travel, Category::Bills, Category::Food]
        );
        assert_eq!(breakdown[0].share_pct, dec!(50));
        assert_eq!(breakdown[1].share_pct, dec!(25));
    }

    #[test]
    fn test_aggregates_many_amounts_at_the_cap() {
        let month = ym("2025-07");
        let transactions: Vec<Transaction> = (0..1000)
            .map(|i| {
                let category = Category::ALL[i % Category::ALL.len()];
                let date = format!("2025-07-{:02}", i % 31 + 1);
                tx(MAX_AMOUNT, category, &date)
            })
            .collect();
        let budgets = vec![budget("2025-07", Category::Food, MAX_AMOUNT)];
        let expected_total = MAX_AMOUNT * Decimal::from(1000);

        let stats = summary_stats(&transactions, &budgets, month);
        assert_eq!(stats.total_actual, expected_total);
        assert_eq!(stats.utilization_pct, dec!(100000));
        assert_eq!(stats.transaction_count, 1000);

        let compared: Decimal = budget_comparison(&budgets, &transactions, month)
            .iter()
            .map(|e| e.actual)
            .sum();
        assert_eq!(compared, expected_total);

        let shares: Decimal = category_breakdown(&transactions)
            .iter()
            .map(|s| s.total)
            .sum();
        assert_eq!(shares, expected_total);

        let daily: Decimal = daily_series(&transactions, month)
            .iter()
            .map(|p| p.total)
            .sum();
        assert_eq!(daily, expected_total);

        assert_eq!(monthly_series(&transactions, 2025).points[6].total, expected_total);
    }

    #[test]
    fn test_percentage_rounds_half_away_from_zero() {
        assert_eq!(percentage(dec!(1), dec!(3)), dec!(33.33));
        assert_eq!(percentage(dec!(2), dec!(3)), dec!(66.67));
        assert_eq!(percentage(dec!(1), dec!(0)), Decimal::ZERO);
    }
}
