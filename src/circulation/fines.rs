use chrono::NaiveDateTime;
use rust_decimal::Decimal;

// whole days elapsed past the due date, truncating partial days
pub(crate) fn overdue_days(now: NaiveDateTime, due_at: NaiveDateTime) -> i64 {
    (now - due_at).num_days().max(0)
}

pub(crate) fn fine_for(now: NaiveDateTime, due_at: NaiveDateTime, rate_per_day: Decimal) -> Decimal {
    (Decimal::from(overdue_days(now, due_at)) * rate_per_day).round_dp(2)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;
    use crate::circulation::fines::{fine_for, overdue_days};

    #[tokio::test]
    async fn test_should_charge_nothing_before_due() {
        let now = Utc::now().naive_utc();
        let due_at = now + Duration::days(3);
        assert_eq!(0, overdue_days(now, due_at));
        assert_eq!(dec!(0.00), fine_for(now, due_at, dec!(1.00)));
    }

    #[tokio::test]
    async fn test_should_truncate_partial_days() {
        let now = Utc::now().naive_utc();
        let due_at = now - Duration::hours(47);
        assert_eq!(1, overdue_days(now, due_at));
        assert_eq!(dec!(5.00), fine_for(now, due_at, dec!(5.00)));
    }

    #[tokio::test]
    async fn test_should_multiply_days_by_rate() {
        let now = Utc::now().naive_utc();
        let due_at = now - Duration::days(4);
        assert_eq!(4, overdue_days(now, due_at));
        assert_eq!(dec!(10.00), fine_for(now, due_at, dec!(2.50)));
    }

    #[tokio::test]
    async fn test_should_round_to_cents() {
        let now = Utc::now().naive_utc();
        let due_at = now - Duration::days(3);
        assert_eq!(dec!(1.00), fine_for(now, due_at, dec!(0.333)));
    }
}
