/// Date and time formatting shared across the views.
use chrono::{Datelike, Duration, NaiveDate, Utc};

/// Format an ISO date or datetime string as DD/MM/YYYY.
/// "2026-03-15T14:02:26Z" -> "15/03/2026"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}/{}/{}", day, month, year);
        }
    }
    date_str.to_string()
}

/// Format an ISO datetime string as DD/MM/YYYY HH:MM:SS.
pub fn format_datetime(datetime_str: &str) -> String {
    if let Some((date_part, time_part)) = datetime_str.split_once('T') {
        let time = time_part
            .split(['.', 'Z', '+'])
            .next()
            .unwrap_or(time_part);
        return format!("{} {}", format_date(date_part), time);
    }
    datetime_str.to_string()
}

/// Default filter period: the current calendar month, as ISO day strings.
pub fn current_month_range() -> (String, String) {
    let today = Utc::now().date_naive();
    month_range(today)
}

fn month_range(day: NaiveDate) -> (String, String) {
    let year = day.year();
    let month = day.month();
    let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(day);
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .map(|d| d - Duration::days(1))
    .unwrap_or(day);
    (
        start.format("%Y-%m-%d").to_string(),
        end.format("%Y-%m-%d").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2026-03-15"), "15/03/2026");
        assert_eq!(format_date("2026-03-15T14:02:26.123Z"), "15/03/2026");
        assert_eq!(format_date("invalid"), "invalid");
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2026-03-15T14:02:26.123Z"),
            "15/03/2026 14:02:26"
        );
        assert_eq!(
            format_datetime("2026-12-31T23:59:59Z"),
            "31/12/2026 23:59:59"
        );
        assert_eq!(format_datetime("invalid"), "invalid");
    }

    #[test]
    fn test_month_range() {
        let (start, end) = month_range(NaiveDate::from_ymd_opt(2026, 2, 14).unwrap());
        assert_eq!(start, "2026-02-01");
        assert_eq!(end, "2026-02-28");

        let (start, end) = month_range(NaiveDate::from_ymd_opt(2026, 12, 5).unwrap());
        assert_eq!(start, "2026-12-01");
        assert_eq!(end, "2026-12-31");
    }
}
