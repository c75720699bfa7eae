use chrono::NaiveDate;
use spotistat::{error::StatsError, types::Track, utils::*};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_parse_release_date_day_precision() {
    assert_eq!(
        parse_release_date("2019-11-29", Some("day")).unwrap(),
        date(2019, 11, 29)
    );
}

#[test]
fn test_parse_release_date_month_precision() {
    assert_eq!(
        parse_release_date("1987-07", Some("month")).unwrap(),
        date(1987, 7, 1)
    );
}

#[test]
fn test_parse_release_date_year_precision() {
    assert_eq!(parse_release_date("1969", Some("year")).unwrap(), date(1969, 1, 1));
}

#[test]
fn test_parse_release_date_falls_back_when_precision_is_wrong() {
    // precision says day but only a year was supplied
    assert_eq!(parse_release_date("1975", Some("day")).unwrap(), date(1975, 1, 1));
    assert_eq!(parse_release_date("2003-02", None).unwrap(), date(2003, 2, 1));
}

#[test]
fn test_parse_release_date_rejects_garbage() {
    assert!(matches!(
        parse_release_date("0000-00-00", Some("day")),
        Err(StatsError::Ungroupable(_))
    ));
    assert!(parse_release_date("", None).is_err());
    assert!(parse_release_date("soon", Some("year")).is_err());
}

#[test]
fn test_parse_release_date_rejects_year_zero_placeholder() {
    assert!(matches!(
        parse_release_date("0000", Some("year")),
        Err(StatsError::Ungroupable(_))
    ));
    assert!(matches!(
        parse_release_date("0000-01-01", None),
        Err(StatsError::Ungroupable(_))
    ));
    assert_eq!(parse_release_date("0001", Some("year")).unwrap(), date(1, 1, 1));
}

#[test]
fn test_date_round_trips_through_unix() {
    let unix = date_to_unix(date(2000, 1, 2));
    assert_eq!(unix, 946_771_200.0);
    assert_eq!(format_unix_date(unix).as_deref(), Some("02/01/2000"));
    assert_eq!(unix_year(unix), Some(2000));
}

#[test]
fn test_format_duration_ms() {
    assert_eq!(format_duration_ms(0.0), "0s");
    assert_eq!(format_duration_ms(499.0), "0s");
    assert_eq!(format_duration_ms(42_400.0), "42s");
    assert_eq!(format_duration_ms(205_500.0), "3m 26s");
    assert_eq!(format_duration_ms(180_000.0), "3m 0s");
    assert_eq!(format_duration_ms(3_600_000.0), "1h 0m 0s");
    assert_eq!(format_duration_ms(7_384_000.0), "2h 3m 4s");
}

#[test]
fn test_redact_token() {
    assert_eq!(redact_token("BQDabcdefghijkl"), "BQDa…");
    assert_eq!(redact_token("ab"), "ab…");
}

#[test]
fn test_track_derived_strings_are_built_on_decode() {
    let track: Track = serde_json::from_value(serde_json::json!({
        "id": "t1",
        "name": "Get Lucky",
        "artists": [{ "name": "Daft Punk" }, { "name": "Pharrell Williams" }],
        "album": { "release_date": "2013-05", "release_date_precision": "month" }
    }))
    .unwrap();

    assert_eq!(track.artist_names(), "Daft Punk, Pharrell Williams");
    assert_eq!(track.display_name(), "Daft Punk, Pharrell Williams – Get Lucky");
    assert_eq!(track.release_date().unwrap(), date(2013, 5, 1));
    assert!(track.cover_image().is_none());
    assert!(!track.explicit);
}

#[test]
fn test_track_without_release_date_is_ungroupable() {
    let track: Track =
        serde_json::from_value(serde_json::json!({ "id": "t1", "name": "Untitled" })).unwrap();

    assert!(matches!(track.release_date(), Err(StatsError::Ungroupable(_))));
    assert_eq!(track.display_name(), " – Untitled");
}
