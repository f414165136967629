//! Расчётное ядро: чистые функции над уже загруженными коллекциями
//! договоров, планов и затрат. Ни одна функция не ходит в базу, не
//! кэширует и не держит состояния: все входы передаются аргументами,
//! все результаты возвращаются значениями.
//!
//! Отсутствующие необязательные суммы (None) всегда трактуются как ноль,
//! сумма по пустой коллекции равна ровно нулю, разности могут быть
//! отрицательными (перерасход не ошибка).

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;

use contracts::dashboards::d400_planning::{MonthLabels, PlanningBuckets};
use contracts::dashboards::d402_balance::{
    BalanceEntry, BalanceReport, ExpenseContractSummary, IncomeContractSummary,
};
use contracts::domain::a001_income_contract::aggregate::IncomeContract;
use contracts::domain::a002_expense_contract::aggregate::ExpenseContract;
use contracts::domain::a003_cal_plan::aggregate::CalPlan;
use contracts::domain::a004_cost_item::aggregate::CostItem;
use contracts::domain::a005_closed_work::aggregate::ClosedWork;

/// Сумма аванса: contract_amount * advance_percentage / 100.
/// Диапазон 0-100 намеренно не проверяется: значения вне диапазона
/// масштабируются линейно, как и в любых других процентах.
pub fn advance_amount(contract_amount: Decimal, advance_percentage: Option<Decimal>) -> Decimal {
    match advance_percentage {
        Some(p) => contract_amount * p / Decimal::ONE_HUNDRED,
        None => Decimal::ZERO,
    }
}

/// Затраты подрядчика: сумма всех статей затрат договора
pub fn contractor_costs_total(cost_items: &[CostItem]) -> Decimal {
    cost_items.iter().map(|item| item.amount).sum()
}

/// Сальдо: оплачено подрядчику минус его затраты. Может быть отрицательным.
pub fn balance(payment_loesk: Option<Decimal>, contractor_costs: Decimal) -> Decimal {
    payment_loesk.unwrap_or(Decimal::ZERO) - contractor_costs
}

/// Остаток финансирования: сумма договора минус фактическая оплата
pub fn remaining_funding(contract_amount: Decimal, payment_loesk: Option<Decimal>) -> Decimal {
    contract_amount - payment_loesk.unwrap_or(Decimal::ZERO)
}

/// Сумма закрытых работ: сумма по всем актам КС договора
pub fn closed_works_total(closed_works: &[ClosedWork]) -> Decimal {
    closed_works.iter().map(|work| work.amount).sum()
}

/// Первое число месяца указанной даты
fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Первое число следующего месяца: 28-е + 4 дня гарантированно
/// перекатывается в следующий месяц независимо от его длины
fn next_month_start(start: NaiveDate) -> NaiveDate {
    let rolled = start.with_day(28).unwrap_or(start) + Duration::days(4);
    month_start(rolled)
}

fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Разбивка календарного плана по трём месячным корзинам: текущий месяц
/// момента `reference` и два следующих. Дата каждой строки плана
/// усекается до первого числа и сравнивается с границами корзин на
/// точное равенство; строки без суммы и строки вне окна не попадают
/// ни в одну корзину. Границы зависят от "сейчас", поэтому результат
/// пересчитывается на каждый запрос.
pub fn calendar_plan_buckets(cal_plans: &[CalPlan], reference: DateTime<Utc>) -> PlanningBuckets {
    let current = month_start(reference.date_naive());
    let next_1 = next_month_start(current);
    let next_2 = next_month_start(next_1);

    let mut current_month = Decimal::ZERO;
    let mut next_month_1 = Decimal::ZERO;
    let mut next_month_2 = Decimal::ZERO;

    for plan in cal_plans {
        let Some(amount) = plan.amount else {
            continue;
        };
        let plan_month = month_start(plan.date);
        if plan_month == current {
            current_month += amount;
        } else if plan_month == next_1 {
            next_month_1 += amount;
        } else if plan_month == next_2 {
            next_month_2 += amount;
        }
    }

    PlanningBuckets {
        current_month,
        next_month_1,
        next_month_2,
        three_month_total: current_month + next_month_1 + next_month_2,
        month_names: MonthLabels {
            current_month: month_label(current),
            next_month_1: month_label(next_1),
            next_month_2: month_label(next_2),
        },
    }
}

/// Сводный отчёт по балансу: для каждого неудалённого доходного договора
/// находим связанные расходные договоры (join в памяти по источнику
/// финансирования), суммируем их стоимость и оплату и считаем сальдо
/// paid_amount - total_paid. Итог по всем договорам накапливается в
/// total_balance. Удалённые записи в обоих входах пропускаются, даже
/// если вызывающая сторона забыла их отфильтровать.
pub fn balance_rollup(
    income_contracts: &[IncomeContract],
    expense_contracts: &[ExpenseContract],
) -> BalanceReport {
    let mut contracts = Vec::new();
    let mut total_balance = Decimal::ZERO;

    for income in income_contracts {
        if income.metadata.is_deleted() {
            continue;
        }

        let related: Vec<&ExpenseContract> = expense_contracts
            .iter()
            .filter(|exp| !exp.metadata.is_deleted() && exp.income_contract_id == income.id)
            .collect();

        let total_expense: Decimal = related.iter().map(|exp| exp.contract_amount).sum();
        let total_paid: Decimal = related
            .iter()
            .map(|exp| exp.payment_loesk.unwrap_or(Decimal::ZERO))
            .sum();

        let paid_amount = income.paid_amount.unwrap_or(Decimal::ZERO);
        let contract_balance = paid_amount - total_paid;

        contracts.push(BalanceEntry {
            income_contract: IncomeContractSummary {
                id: income.id.as_string(),
                number: income.contract_number.clone(),
                client: income.client.clone(),
                amount: income.contract_amount,
                paid: paid_amount,
            },
            expense_contracts: related
                .iter()
                .map(|exp| ExpenseContractSummary {
                    id: exp.id.as_string(),
                    number: exp.contract_number.clone(),
                    amount: exp.contract_amount,
                    paid: exp.payment_loesk.unwrap_or(Decimal::ZERO),
                })
                .collect(),
            total_expense,
            total_paid,
            balance: contract_balance,
        });

        total_balance += contract_balance;
    }

    BalanceReport {
        contracts,
        total_balance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use contracts::domain::a001_income_contract::aggregate::IncomeContractId;
    use contracts::domain::a002_expense_contract::aggregate::ExpenseContractId;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn plan(contract: ExpenseContractId, d: NaiveDate, amount: &str) -> CalPlan {
        CalPlan::new_for_insert(contract, d, Some(dec(amount)))
    }

    fn cost_item(amount: &str) -> CostItem {
        CostItem::new_for_insert(
            ExpenseContractId::new_v4(),
            date(2024, 2, 15),
            "ИП Петров".into(),
            "Работы".into(),
            "Монтажные работы".into(),
            dec(amount),
        )
    }

    fn income(number: &str, amount: &str, paid: Option<&str>) -> IncomeContract {
        IncomeContract::new_for_insert(
            number.into(),
            date(2024, 1, 15),
            "ООО \"Ромашка\"".into(),
            dec(amount),
            paid.map(dec),
        )
    }

    fn expense(
        number: &str,
        funding: IncomeContractId,
        amount: &str,
        paid: Option<&str>,
    ) -> ExpenseContract {
        let mut contract = ExpenseContract::new_for_insert(
            number.into(),
            "ремонтная программа".into(),
            date(2024, 1, 10),
            date(2024, 6, 10),
            "Строительство офисного здания".into(),
            "ООО \"СтройМонтаж\"".into(),
            dec(amount),
            None,
            funding,
            false,
        );
        contract.payment_loesk = paid.map(dec);
        contract
    }

    #[test]
    fn advance_amount_is_linear_in_percentage() {
        assert_eq!(
            advance_amount(dec("2500000.00"), Some(dec("50.00"))),
            dec("1250000.00")
        );
        assert_eq!(
            advance_amount(dec("3200000.00"), Some(dec("10.00"))),
            dec("320000.00")
        );
        // Вне диапазона 0-100 не отбрасывается, а масштабируется
        assert_eq!(advance_amount(dec("1000"), Some(dec("150"))), dec("1500"));
    }

    #[test]
    fn advance_amount_without_percentage_is_zero() {
        assert_eq!(advance_amount(dec("2500000.00"), None), Decimal::ZERO);
        assert_eq!(
            advance_amount(dec("2500000.00"), Some(Decimal::ZERO)),
            Decimal::ZERO
        );
    }

    #[test]
    fn contractor_costs_total_sums_all_items() {
        let items = vec![cost_item("800000.00"), cost_item("400000.00")];
        assert_eq!(contractor_costs_total(&items), dec("1200000.00"));
    }

    #[test]
    fn contractor_costs_total_empty_is_zero() {
        assert_eq!(contractor_costs_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn contractor_costs_total_is_order_independent() {
        let a = vec![cost_item("100.10"), cost_item("200.20"), cost_item("300.30")];
        let b = vec![cost_item("300.30"), cost_item("100.10"), cost_item("200.20")];
        assert_eq!(contractor_costs_total(&a), contractor_costs_total(&b));
    }

    #[test]
    fn balance_subtracts_costs_from_payment() {
        assert_eq!(
            balance(Some(dec("1800000.00")), dec("1200000.00")),
            dec("600000.00")
        );
    }

    #[test]
    fn balance_with_missing_payment_goes_negative() {
        // Перерасход: затраты есть, оплаты не было
        assert_eq!(balance(None, dec("500.00")), dec("-500.00"));
    }

    #[test]
    fn remaining_funding_subtracts_payment() {
        assert_eq!(
            remaining_funding(dec("2500000.00"), Some(dec("1800000.00"))),
            dec("700000.00")
        );
        assert_eq!(
            remaining_funding(dec("2500000.00"), None),
            dec("2500000.00")
        );
    }

    #[test]
    fn closed_works_total_sums_acts() {
        let contract = ExpenseContractId::new_v4();
        let works = vec![
            ClosedWork::new_for_insert(contract, "КС-1".into(), date(2024, 2, 1), dec("150000.00")),
            ClosedWork::new_for_insert(contract, "КС-2".into(), date(2024, 3, 1), dec("250000.00")),
        ];
        assert_eq!(closed_works_total(&works), dec("400000.00"));
        assert_eq!(closed_works_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn calendar_buckets_split_three_months() {
        let contract = ExpenseContractId::new_v4();
        let plans = vec![
            plan(contract, date(2024, 3, 1), "300000"),
            plan(contract, date(2024, 4, 1), "400000"),
            plan(contract, date(2024, 5, 1), "350000"),
        ];
        let reference = Utc.with_ymd_and_hms(2024, 3, 14, 12, 0, 0).unwrap();

        let buckets = calendar_plan_buckets(&plans, reference);
        assert_eq!(buckets.current_month, dec("300000"));
        assert_eq!(buckets.next_month_1, dec("400000"));
        assert_eq!(buckets.next_month_2, dec("350000"));
        assert_eq!(buckets.three_month_total, dec("1050000"));
        assert_eq!(buckets.month_names.current_month, "March 2024");
        assert_eq!(buckets.month_names.next_month_1, "April 2024");
        assert_eq!(buckets.month_names.next_month_2, "May 2024");
    }

    #[test]
    fn calendar_buckets_ignore_entries_outside_window() {
        let contract = ExpenseContractId::new_v4();
        let plans = vec![
            plan(contract, date(2024, 1, 1), "999999"),
            plan(contract, date(2024, 7, 1), "111111"),
            plan(contract, date(2024, 3, 1), "300000"),
        ];
        let reference = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();

        let buckets = calendar_plan_buckets(&plans, reference);
        assert_eq!(buckets.current_month, dec("300000"));
        assert_eq!(buckets.next_month_1, Decimal::ZERO);
        assert_eq!(buckets.next_month_2, Decimal::ZERO);
        assert_eq!(buckets.three_month_total, dec("300000"));
    }

    #[test]
    fn calendar_buckets_truncate_mid_month_dates() {
        // Дата не первым числом всё равно попадает в корзину своего месяца
        let contract = ExpenseContractId::new_v4();
        let plans = vec![
            plan(contract, date(2024, 3, 17), "100"),
            plan(contract, date(2024, 4, 30), "200"),
        ];
        let reference = Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap();

        let buckets = calendar_plan_buckets(&plans, reference);
        assert_eq!(buckets.current_month, dec("100"));
        assert_eq!(buckets.next_month_1, dec("200"));
    }

    #[test]
    fn calendar_buckets_skip_rows_without_amount() {
        let contract = ExpenseContractId::new_v4();
        let plans = vec![
            CalPlan::new_for_insert(contract, date(2024, 3, 1), None),
            plan(contract, date(2024, 3, 1), "500"),
        ];
        let reference = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();

        let buckets = calendar_plan_buckets(&plans, reference);
        assert_eq!(buckets.current_month, dec("500"));
    }

    #[test]
    fn calendar_buckets_handle_year_rollover() {
        // Декабрь: следующие корзины уходят в январь и февраль следующего года
        let contract = ExpenseContractId::new_v4();
        let plans = vec![
            plan(contract, date(2024, 12, 1), "100"),
            plan(contract, date(2025, 1, 1), "200"),
            plan(contract, date(2025, 2, 1), "300"),
        ];
        let reference = Utc.with_ymd_and_hms(2024, 12, 15, 0, 0, 0).unwrap();

        let buckets = calendar_plan_buckets(&plans, reference);
        assert_eq!(buckets.current_month, dec("100"));
        assert_eq!(buckets.next_month_1, dec("200"));
        assert_eq!(buckets.next_month_2, dec("300"));
        assert_eq!(buckets.month_names.next_month_1, "January 2025");
    }

    #[test]
    fn balance_rollup_totals_per_income_contract() {
        let income_a = income("ДГ-001-24", "5000000.00", Some("5000000.00"));
        let exp_1 = expense("РД-001-24", income_a.id, "2500000.00", Some("1800000.00"));
        let exp_2 = expense("РД-002-24", income_a.id, "1800000.00", Some("1200000.00"));

        let report = balance_rollup(&[income_a.clone()], &[exp_1, exp_2]);

        assert_eq!(report.contracts.len(), 1);
        let entry = &report.contracts[0];
        assert_eq!(entry.expense_contracts.len(), 2);
        assert_eq!(entry.total_expense, dec("4300000.00"));
        assert_eq!(entry.total_paid, dec("3000000.00"));
        assert_eq!(entry.balance, dec("2000000.00"));
        assert_eq!(report.total_balance, dec("2000000.00"));
    }

    #[test]
    fn balance_rollup_grand_total_sums_entries() {
        let income_a = income("ДГ-001-24", "5000000.00", Some("5000000.00"));
        let income_b = income("ДГ-002-24", "3000000.00", Some("3000000.00"));
        let exp_a = expense("РД-001-24", income_a.id, "2500000.00", Some("1800000.00"));
        let exp_b = expense("РД-003-24", income_b.id, "3200000.00", Some("2000000.00"));

        let report = balance_rollup(&[income_a, income_b], &[exp_a, exp_b]);

        assert_eq!(report.contracts.len(), 2);
        assert_eq!(report.contracts[0].balance, dec("3200000.00"));
        assert_eq!(report.contracts[1].balance, dec("1000000.00"));
        assert_eq!(report.total_balance, dec("4200000.00"));
    }

    #[test]
    fn balance_rollup_treats_missing_paid_as_zero() {
        let income_a = income("ДГ-001-24", "5000000.00", None);
        let exp = expense("РД-001-24", income_a.id, "1000000.00", None);

        let report = balance_rollup(&[income_a], &[exp]);

        let entry = &report.contracts[0];
        assert_eq!(entry.income_contract.paid, Decimal::ZERO);
        assert_eq!(entry.total_paid, Decimal::ZERO);
        assert_eq!(entry.balance, Decimal::ZERO);
    }

    #[test]
    fn balance_rollup_skips_soft_deleted_rows() {
        let income_a = income("ДГ-001-24", "5000000.00", Some("5000000.00"));
        let mut income_deleted = income("ДГ-002-24", "3000000.00", Some("3000000.00"));
        income_deleted.metadata.mark_deleted();

        let exp_live = expense("РД-001-24", income_a.id, "2500000.00", Some("1800000.00"));
        let mut exp_deleted = expense("РД-002-24", income_a.id, "999999.00", Some("999999.00"));
        exp_deleted.metadata.mark_deleted();

        let report = balance_rollup(&[income_a, income_deleted], &[exp_live, exp_deleted]);

        assert_eq!(report.contracts.len(), 1);
        assert_eq!(report.contracts[0].expense_contracts.len(), 1);
        assert_eq!(report.contracts[0].total_paid, dec("1800000.00"));
    }

    #[test]
    fn rollup_is_idempotent() {
        let income_a = income("ДГ-001-24", "5000000.00", Some("4000000.00"));
        let exp = expense("РД-001-24", income_a.id, "2500000.00", Some("1800000.00"));

        let first = balance_rollup(std::slice::from_ref(&income_a), std::slice::from_ref(&exp));
        let second = balance_rollup(&[income_a], &[exp]);
        assert_eq!(first, second);
    }
}
