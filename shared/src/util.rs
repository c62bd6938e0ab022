use chrono::{DateTime, FixedOffset, NaiveDate, Offset, TimeZone, Utc};

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Fixed business time zone from a whole-hour UTC offset.
///
/// Offsets outside ±23 h fall back to UTC.
pub fn business_offset(hours: i32) -> FixedOffset {
    FixedOffset::east_opt(hours.saturating_mul(3600)).unwrap_or_else(|| Utc.fix())
}

/// Calendar date in the business time zone for a millisecond timestamp
pub fn business_date(millis: i64, offset: FixedOffset) -> NaiveDate {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .with_timezone(&offset)
        .date_naive()
}

/// Today's date in the business time zone
pub fn business_today(offset: FixedOffset) -> NaiveDate {
    business_date(now_millis(), offset)
}

/// Millisecond bounds `[start, end)` covering the inclusive date range
/// `from..=to` in the business time zone. Missing ends are open.
pub fn day_range_millis(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    offset: FixedOffset,
) -> (Option<i64>, Option<i64>) {
    let start_of = |date: NaiveDate| {
        offset
            .from_local_datetime(&date.and_time(chrono::NaiveTime::MIN))
            .single()
            .map(|dt| dt.timestamp_millis())
    };
    let start = from.and_then(start_of);
    let end = to.and_then(|d| d.succ_opt()).and_then(start_of);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wib() -> FixedOffset {
        business_offset(7)
    }

    #[test]
    fn test_business_date_crosses_midnight() {
        // 2024-03-01 18:30 UTC is 2024-03-02 01:30 WIB
        let millis = Utc
            .with_ymd_and_hms(2024, 3, 1, 18, 30, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(
            business_date(millis, wib()),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
        );
        assert_eq!(
            business_date(millis, business_offset(0)),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_out_of_range_offset_is_utc() {
        assert_eq!(business_offset(48).local_minus_utc(), 0);
        assert_eq!(business_offset(-5).local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn test_day_range_millis() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let (start, end) = day_range_millis(Some(day), Some(day), wib());
        let expected_start = Utc
            .with_ymd_and_hms(2024, 3, 1, 17, 0, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(start, Some(expected_start));
        assert_eq!(end, Some(expected_start + 24 * 3600 * 1000));

        assert_eq!(day_range_millis(None, None, wib()), (None, None));
    }
}
