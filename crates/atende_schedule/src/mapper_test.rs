#[cfg(test)]
mod tests {
    use crate::logic::ScheduleError;
    use crate::mapper::{
        map_schedule_requests, normalize_custom_times, validate, DaySchedule, ScheduleDraft,
        SlotMode,
    };
    use atende_common::naive::LocalNaiveInstant;
    use atende_common::services::ScheduleRecord;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn noon_of(d: NaiveDate) -> NaiveDateTime {
        d.and_time(time(12, 0))
    }

    fn interval_draft(dates: Vec<NaiveDate>) -> ScheduleDraft {
        ScheduleDraft {
            dates,
            mode: SlotMode::Interval {
                start: time(9, 0),
                end: time(17, 0),
            },
            interval_minutes: 30,
            cancellation_policy_days: 1,
            average_value: Some(150.0),
            observation: String::new(),
        }
    }

    #[test]
    fn maps_one_request_per_future_date() {
        let draft = interval_draft(vec![date(2025, 5, 6), date(2025, 5, 7)]);
        let mapped = map_schedule_requests(&draft, noon_of(date(2025, 5, 5))).unwrap();
        assert_eq!(mapped.requests.len(), 2);
        assert!(mapped.skipped_past_dates.is_empty());
        assert_eq!(
            mapped.requests[0].initial_time.to_string(),
            "2025-05-06T09:00:00"
        );
        assert_eq!(
            mapped.requests[0].end_time.to_string(),
            "2025-05-06T17:00:00"
        );
    }

    #[test]
    fn past_dates_are_skipped_and_reported() {
        // Selection of [yesterday, tomorrow] submits only tomorrow.
        let draft = interval_draft(vec![date(2025, 5, 4), date(2025, 5, 6)]);
        let mapped = map_schedule_requests(&draft, noon_of(date(2025, 5, 5))).unwrap();
        assert_eq!(mapped.requests.len(), 1);
        assert_eq!(mapped.requests[0].initial_time.date(), date(2025, 5, 6));
        assert_eq!(mapped.skipped_past_dates, vec![date(2025, 5, 4)]);
    }

    #[test]
    fn todays_date_with_elapsed_start_time_counts_as_past() {
        let draft = interval_draft(vec![date(2025, 5, 5), date(2025, 5, 6)]);
        let mapped = map_schedule_requests(&draft, noon_of(date(2025, 5, 5))).unwrap();
        assert_eq!(mapped.skipped_past_dates, vec![date(2025, 5, 5)]);
    }

    #[test]
    fn all_past_dates_is_a_hard_failure() {
        let draft = interval_draft(vec![date(2025, 5, 3), date(2025, 5, 4)]);
        let result = map_schedule_requests(&draft, noon_of(date(2025, 5, 5)));
        assert!(matches!(result, Err(ScheduleError::AllDatesInPast)));
    }

    #[test]
    fn validation_collects_every_problem() {
        let draft = ScheduleDraft {
            dates: Vec::new(),
            mode: SlotMode::Interval {
                start: time(17, 0),
                end: time(9, 0),
            },
            interval_minutes: 0,
            cancellation_policy_days: 0,
            average_value: None,
            observation: String::new(),
        };
        let messages = validate(&draft);
        assert_eq!(messages.len(), 3);
    }

    #[test]
    fn validation_failure_aborts_the_mapping() {
        let mut draft = interval_draft(vec![date(2025, 5, 6)]);
        draft.mode = SlotMode::Interval {
            start: time(10, 0),
            end: time(10, 0),
        };
        let result = map_schedule_requests(&draft, noon_of(date(2025, 5, 5)));
        assert!(matches!(result, Err(ScheduleError::Validation(_))));
    }

    #[test]
    fn custom_times_are_sorted_and_deduplicated() {
        let normalized =
            normalize_custom_times(&[time(10, 0), time(8, 0), time(10, 0), time(9, 30)]);
        assert_eq!(normalized, vec![time(8, 0), time(9, 30), time(10, 0)]);
    }

    #[test]
    fn free_mode_uses_the_first_custom_time_as_both_markers() {
        let draft = ScheduleDraft {
            dates: vec![date(2025, 5, 6)],
            mode: SlotMode::Custom {
                times: vec![time(14, 0), time(8, 30)],
            },
            interval_minutes: 30,
            cancellation_policy_days: 0,
            average_value: None,
            observation: "encaixes".to_string(),
        };
        let mapped = map_schedule_requests(&draft, noon_of(date(2025, 5, 5))).unwrap();
        let request = &mapped.requests[0];
        assert!(!request.is_controlled);
        assert_eq!(request.initial_time.time(), time(8, 30));
        assert_eq!(request.end_time.time(), time(8, 30));
    }

    #[test]
    fn outbound_wire_format_is_camel_case_and_naive() {
        let draft = interval_draft(vec![date(2025, 5, 6)]);
        let mapped = map_schedule_requests(&draft, noon_of(date(2025, 5, 5))).unwrap();
        let json = serde_json::to_value(&mapped.requests[0]).unwrap();
        assert_eq!(json["initialTime"], "2025-05-06T09:00:00");
        assert_eq!(json["endTime"], "2025-05-06T17:00:00");
        assert_eq!(json["cancellationPolicy"], 1);
        assert_eq!(json["isControlled"], true);
        assert_eq!(json["averageValue"], 150.0);
    }

    #[test]
    fn inbound_mapping_reads_clock_fields_without_shifting() {
        // A backend that echoes the naive string back with a Z suffix must
        // not cause the displayed times to drift.
        let record = ScheduleRecord {
            id: "schedule-1".to_string(),
            initial_time: "2025-05-06T09:00:00Z".parse::<LocalNaiveInstant>().unwrap(),
            end_time: "2025-05-06T17:00:00Z".parse::<LocalNaiveInstant>().unwrap(),
            interval: 30,
            cancellation_policy: 1,
            average_value: None,
            observation: String::new(),
            is_controlled: true,
        };
        let day = DaySchedule::from_record(&record);
        assert_eq!(day.date, date(2025, 5, 6));
        assert_eq!(day.start, time(9, 0));
        assert_eq!(day.end, time(17, 0));
    }

    #[test]
    fn controlled_day_schedule_regenerates_its_slots() {
        let record = ScheduleRecord {
            id: "schedule-1".to_string(),
            initial_time: "2025-05-06T09:00:00".parse::<LocalNaiveInstant>().unwrap(),
            end_time: "2025-05-06T10:30:00".parse::<LocalNaiveInstant>().unwrap(),
            interval: 30,
            cancellation_policy: 0,
            average_value: None,
            observation: String::new(),
            is_controlled: true,
        };
        let day = DaySchedule::from_record(&record);
        assert_eq!(
            day.slots().unwrap(),
            vec![time(9, 0), time(9, 30), time(10, 0)]
        );
    }

    #[test]
    fn free_day_schedule_yields_its_marker_time() {
        let record = ScheduleRecord {
            id: "schedule-2".to_string(),
            initial_time: "2025-05-06T08:30:00".parse::<LocalNaiveInstant>().unwrap(),
            end_time: "2025-05-06T08:30:00".parse::<LocalNaiveInstant>().unwrap(),
            interval: 30,
            cancellation_policy: 0,
            average_value: None,
            observation: String::new(),
            is_controlled: false,
        };
        let day = DaySchedule::from_record(&record);
        assert_eq!(day.slots().unwrap(), vec![time(8, 30)]);
    }
}
