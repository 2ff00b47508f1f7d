use chrono::{NaiveDate, TimeZone, Utc};
use taqwim_core::calendar::hijri_to_jdn;
use taqwim_core::{
    get_hijri_date, get_prayer_schedule, CalendarProfile, Coordinates, EngineConfig, HighLatitudeRule, Madhab,
    Prayer, ScheduleSource, TaqwimDateExt, TaqwimError,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_first_of_ramadan_1445() {
    let h = get_hijri_date(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(), &EngineConfig::default());
    assert_eq!(h.ymd(), (1445, 9, 1));
    assert_eq!(h.month_name, "Ramadan");
    assert!(h.is_holiday);
    assert_eq!(h.holiday_name.as_deref(), Some("First Day of Ramadan"));
}

#[test]
fn test_builder_defaults() {
    let config = EngineConfig::builder()
        .hijri_adjustment(2)
        .madhab(Madhab::Hanafi)
        .build()
        .unwrap();

    assert_eq!(config.hijri_adjustment, 2);
    assert_eq!(config.madhab, Madhab::Hanafi);
    assert_eq!(config.high_latitude, HighLatitudeRule::default());
    assert_eq!(config.calendar_profile, CalendarProfile::default());
}

#[test]
fn test_calendar_profile_is_label_only() {
    let date = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();
    let base = get_hijri_date(date, &EngineConfig::default());
    for profile in CalendarProfile::ALL {
        let h = get_hijri_date(date, &EngineConfig::new().calendar_profile(profile));
        assert_eq!(h, base, "{}", profile.label());
    }
}

/// The tabular calendar drifts from Umm al-Qura by a day or two, never more.
#[test]
fn test_tabular_tracks_umm_al_qura() -> anyhow::Result<()> {
    let start = NaiveDate::from_ymd_opt(1950, 1, 1).unwrap();
    for date in start.iter_days().step_by(17).take_while(|d| *d < NaiveDate::from_ymd_opt(2070, 1, 1).unwrap()) {
        let uq = hijri_date::HijriDate::from_gr(
            chrono::Datelike::year(&date) as usize,
            chrono::Datelike::month(&date) as usize,
            chrono::Datelike::day(&date) as usize,
        )
        .map_err(anyhow::Error::msg)?;
        let ours = date.hijri();

        // Compare on the day count so month boundaries do not matter
        let uq_jdn = hijri_to_jdn(uq.year() as u32, uq.month() as u32, 1)? + uq.day() as i64 - 1;
        let our_jdn = hijri_to_jdn(ours.year, ours.month, ours.day)?;
        assert!((uq_jdn - our_jdn).abs() <= 3, "{date}: Umm al-Qura {}/{}/{} vs tabular {ours}", uq.day(), uq.month(), uq.year());
    }
    Ok(())
}

#[test]
fn test_schedule_at_one_pm_in_riyadh() {
    init_tracing();
    let mecca = Coordinates::new(21.4225, 39.8262).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();

    let view = get_prayer_schedule(mecca, chrono_tz::Asia::Riyadh, now, &EngineConfig::default()).unwrap();
    assert_eq!(view.source, ScheduleSource::Local);
    assert_eq!(view.current, Prayer::Dhuhr);
    assert_eq!(view.next, Prayer::Asr);
    assert_eq!(view.countdown().len(), 8);
}

#[test]
fn test_polar_night_is_unavailable_or_consistent() {
    // Tromsø in midwinter: the sun never rises. Either the high-latitude rule
    // yields an ordered day or the caller gets the distinguished error.
    let tromso = Coordinates::new(69.6492, 18.9553).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 12, 21, 11, 0, 0).unwrap();

    match get_prayer_schedule(tromso, chrono_tz::Europe::Oslo, now, &EngineConfig::default()) {
        Ok(view) => assert_eq!(view.instants.iter().filter(|i| i.is_next).count(), 1),
        Err(e) => assert_eq!(e, TaqwimError::Unavailable),
    }
}

#[test]
fn test_invalid_coordinates_fail_fast() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
    let err = get_prayer_schedule(Coordinates::new_unchecked(-91.0, 0.0), chrono_tz::UTC, now, &EngineConfig::default())
        .unwrap_err();
    assert!(err.is_input_error());
}

#[cfg(feature = "async")]
mod remote {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use taqwim_core::{default_remote, FixedClock, HijriService, RemoteConfig, ScheduleResolver};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn timings_body(date: &str) -> serde_json::Value {
        json!({
            "code": 200,
            "status": "OK",
            "data": {
                "timings": {
                    "Fajr": "05:10 (+03)",
                    "Sunrise": "06:31 (+03)",
                    "Dhuhr": "12:20 (+03)",
                    "Asr": "15:35 (+03)",
                    "Maghrib": "17:45 (+03)",
                    "Isha": "19:10 (+03)"
                },
                "date": { "gregorian": { "date": date } }
            }
        })
    }

    fn mecca() -> Coordinates {
        Coordinates::new(21.4225, 39.8262).unwrap()
    }

    fn resolver(server: &MockServer, clock: Arc<FixedClock>) -> ScheduleResolver<taqwim_core::DefaultRemote> {
        let config = RemoteConfig::new(server.uri()).with_timeout(Duration::from_millis(300));
        let remote = default_remote(config, clock.clone()).unwrap();
        ScheduleResolver::new(remote, EngineConfig::default(), clock)
    }

    #[tokio::test]
    async fn test_remote_schedule_and_cache() {
        init_tracing();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/timings/01-01-2024"))
            .respond_with(ResponseTemplate::new(200).set_body_json(timings_body("01-01-2024")))
            .expect(1)
            .mount(&server)
            .await;

        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()));
        let resolver = resolver(&server, clock.clone());

        let view = resolver.resolve_now(mecca(), chrono_tz::Asia::Riyadh).await.unwrap();
        assert_eq!(view.source, ScheduleSource::Remote);
        assert_eq!(view.current, Prayer::Dhuhr);
        assert_eq!(view.next, Prayer::Asr);
        assert_eq!(view.seconds_until_next, 9300);
        assert_eq!(view.countdown(), "02:35:00");

        // Same day inside the TTL: served from cache
        clock.advance(chrono::Duration::hours(5));
        let view = resolver.resolve_now(mecca(), chrono_tz::Asia::Riyadh).await.unwrap();
        assert_eq!(view.source, ScheduleSource::Remote);
        assert_eq!(view.current, Prayer::Maghrib);
        assert_eq!(view.next, Prayer::Isha);
        assert_eq!(view.seconds_until_next, 70 * 60);
    }

    #[tokio::test]
    async fn test_server_error_falls_back_to_local() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()));
        let view = resolver(&server, clock).resolve_now(mecca(), chrono_tz::Asia::Riyadh).await.unwrap();

        assert_eq!(view.source, ScheduleSource::Local);
        assert_eq!(view.instants.len(), 5);
        assert_eq!(view.next, Prayer::Asr);
    }

    #[tokio::test]
    async fn test_hijri_service_falls_back_to_tabular() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": 200, "status": "OK" })))
            .mount(&server)
            .await;

        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 11, 10, 0, 0).unwrap()));
        let remote = default_remote(RemoteConfig::new(server.uri()), clock).unwrap();
        let service = HijriService::new(remote, EngineConfig::default());

        let h = service.get_hijri_date(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()).await;
        assert_eq!(h.ymd(), (1445, 9, 1));
        assert_eq!(h.holiday_name.as_deref(), Some("First Day of Ramadan"));
    }
}
