//! Admin endpoints

pub mod audit;
pub mod menu;
pub mod reports;
pub mod sellers;
pub mod transactions;
pub mod users;
pub mod vouchers;

use axum::response::{IntoResponse, Response};
use chrono::{FixedOffset, NaiveDate};
use http::header;
use shared::error::{AppError, ErrorCode};

/// Resolve an inclusive business-date range to `[start, end)` millis
pub(crate) fn date_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    offset: FixedOffset,
) -> Result<(Option<i64>, Option<i64>), AppError> {
    if let (Some(from), Some(to)) = (from, to)
        && from > to
    {
        return Err(AppError::new(ErrorCode::InvalidDateRange)
            .with_detail("from", from.to_string())
            .with_detail("to", to.to_string()));
    }
    Ok(shared::util::day_range_millis(from, to, offset))
}

/// `text/csv` download response
pub(crate) fn csv_response(filename: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wib() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    #[test]
    fn test_date_range_rejects_reversed() {
        let from = NaiveDate::from_ymd_opt(2024, 6, 10);
        let to = NaiveDate::from_ymd_opt(2024, 6, 1);
        let err = date_range(from, to, wib()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidDateRange);
    }

    #[test]
    fn test_date_range_single_day() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1);
        let (start, end) = date_range(day, day, wib()).unwrap();
        assert_eq!(end.unwrap() - start.unwrap(), 24 * 3600 * 1000);
        assert_eq!(date_range(None, None, wib()).unwrap(), (None, None));
    }

    #[test]
    fn test_csv_response_headers() {
        let response = csv_response("vouchers.csv", "code\r\n".into());
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"vouchers.csv\""
        );
    }
}
