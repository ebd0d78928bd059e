use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, to_string};
use serde_test::{Token, assert_tokens};
use tutoria_core::models::{
    reservation::{
        COURSE_FALLBACK, CreateReservationRequest, Reservation, ReservationStatus,
        STUDENT_FALLBACK, TUTOR_FALLBACK, UpdateReservationRequest,
    },
    timeblock::{CreateTimeBlockRequest, Weekday, WeeklyTimeBlock},
};
use uuid::Uuid;

fn sample_reservation() -> Reservation {
    Reservation {
        id: Uuid::new_v4(),
        private_lesson_id: Uuid::new_v4(),
        tutor_id: Uuid::new_v4(),
        student_id: Uuid::new_v4(),
        status: ReservationStatus::Pending,
        start_time: Utc.with_ymd_and_hms(2026, 8, 24, 12, 20, 0).unwrap(),
        end_time: Utc.with_ymd_and_hms(2026, 8, 24, 13, 30, 0).unwrap(),
        course_name: Some("Matemáticas".to_string()),
        tutor_name: Some("Valentina Páez".to_string()),
        student_name: Some("Camila Rojas".to_string()),
    }
}

#[test]
fn test_reservation_serialization() {
    let reservation = sample_reservation();

    let json = to_string(&reservation).expect("Failed to serialize reservation");
    let deserialized: Reservation = from_str(&json).expect("Failed to deserialize reservation");

    assert_eq!(deserialized.id, reservation.id);
    assert_eq!(deserialized.private_lesson_id, reservation.private_lesson_id);
    assert_eq!(deserialized.tutor_id, reservation.tutor_id);
    assert_eq!(deserialized.student_id, reservation.student_id);
    assert_eq!(deserialized.status, reservation.status);
    assert_eq!(deserialized.start_time, reservation.start_time);
    assert_eq!(deserialized.end_time, reservation.end_time);
    assert_eq!(deserialized.course_name, reservation.course_name);
    assert_eq!(deserialized.tutor_name, reservation.tutor_name);
    assert_eq!(deserialized.student_name, reservation.student_name);
}

#[test]
fn test_reservation_wire_format() {
    // A payload shaped the way the backend sends it: lowercase statuses,
    // RFC 3339 instants, display fields nullable.
    let json = r#"{
        "id": "7a6e1f5c-30f2-4ab0-9d50-1763c5a9b001",
        "private_lesson_id": "7a6e1f5c-30f2-4ab0-9d50-1763c5a9b002",
        "tutor_id": "7a6e1f5c-30f2-4ab0-9d50-1763c5a9b003",
        "student_id": "7a6e1f5c-30f2-4ab0-9d50-1763c5a9b004",
        "status": "accepted",
        "start_time": "2026-08-24T12:20:00Z",
        "end_time": "2026-08-24T13:30:00Z",
        "course_name": null,
        "tutor_name": "Valentina Páez",
        "student_name": null
    }"#;

    let reservation: Reservation = from_str(json).expect("Failed to deserialize wire payload");

    assert_eq!(reservation.status, ReservationStatus::Accepted);
    assert_eq!(
        reservation.start_time,
        Utc.with_ymd_and_hms(2026, 8, 24, 12, 20, 0).unwrap()
    );
    assert_eq!(reservation.course_name, None);
    assert_eq!(reservation.tutor_name.as_deref(), Some("Valentina Páez"));
    assert_eq!(reservation.student_name, None);
}

#[test]
fn test_status_wire_names() {
    assert_tokens(
        &ReservationStatus::Pending,
        &[Token::UnitVariant {
            name: "ReservationStatus",
            variant: "pending",
        }],
    );
    assert_tokens(
        &ReservationStatus::Accepted,
        &[Token::UnitVariant {
            name: "ReservationStatus",
            variant: "accepted",
        }],
    );
    assert_tokens(
        &ReservationStatus::Rejected,
        &[Token::UnitVariant {
            name: "ReservationStatus",
            variant: "rejected",
        }],
    );
}

#[test]
fn test_weekday_wire_names() {
    assert_tokens(
        &Weekday::Monday,
        &[Token::UnitVariant {
            name: "Weekday",
            variant: "Monday",
        }],
    );
    assert_tokens(
        &Weekday::Sunday,
        &[Token::UnitVariant {
            name: "Weekday",
            variant: "Sunday",
        }],
    );
}

#[rstest]
#[case(ReservationStatus::Pending, ReservationStatus::Accepted, true)]
#[case(ReservationStatus::Pending, ReservationStatus::Rejected, true)]
#[case(ReservationStatus::Pending, ReservationStatus::Pending, false)]
#[case(ReservationStatus::Accepted, ReservationStatus::Rejected, false)]
#[case(ReservationStatus::Accepted, ReservationStatus::Pending, false)]
#[case(ReservationStatus::Rejected, ReservationStatus::Accepted, false)]
fn test_status_transitions(
    #[case] from: ReservationStatus,
    #[case] to: ReservationStatus,
    #[case] allowed: bool,
) {
    assert_eq!(from.can_become(to), allowed);
}

#[test]
fn test_status_terminality() {
    assert!(!ReservationStatus::Pending.is_terminal());
    assert!(ReservationStatus::Accepted.is_terminal());
    assert!(ReservationStatus::Rejected.is_terminal());
}

#[test]
fn test_display_fallbacks() {
    let mut reservation = sample_reservation();
    assert_eq!(reservation.course_display(), "Matemáticas");
    assert_eq!(reservation.tutor_display(), "Valentina Páez");
    assert_eq!(reservation.student_display(), "Camila Rojas");

    reservation.course_name = None;
    reservation.tutor_name = None;
    reservation.student_name = None;
    assert_eq!(reservation.course_display(), COURSE_FALLBACK);
    assert_eq!(reservation.tutor_display(), TUTOR_FALLBACK);
    assert_eq!(reservation.student_display(), STUDENT_FALLBACK);
}

#[test]
fn test_update_request_for_status() {
    let reservation = sample_reservation();
    let update = UpdateReservationRequest::for_status(&reservation, ReservationStatus::Rejected);

    assert_eq!(update.private_lesson_id, reservation.private_lesson_id);
    assert_eq!(update.student_id, reservation.student_id);
    assert_eq!(update.status, ReservationStatus::Rejected);
}

#[test]
fn test_create_reservation_request_serialization() {
    let request = CreateReservationRequest {
        private_lesson_id: Uuid::new_v4(),
        tutor_id: Uuid::new_v4(),
        student_id: Uuid::new_v4(),
        start_time: Utc.with_ymd_and_hms(2026, 8, 24, 12, 20, 0).unwrap(),
        end_time: Utc.with_ymd_and_hms(2026, 8, 24, 13, 30, 0).unwrap(),
    };

    let json = to_string(&request).expect("Failed to serialize create reservation request");
    let deserialized: CreateReservationRequest =
        from_str(&json).expect("Failed to deserialize create reservation request");

    assert_eq!(deserialized, request);
}

#[test]
fn test_weekly_time_block_wire_format() {
    // Block hours travel as bare times, the validity window as naive
    // datetimes; neither carries an offset.
    let json = r#"{
        "id": "2be51a77-8c1d-4f60-aa11-90f3c2e4d005",
        "tutor_id": "2be51a77-8c1d-4f60-aa11-90f3c2e4d006",
        "weekday": "Monday",
        "start_hour": "08:20:00",
        "end_hour": "09:30:00",
        "valid_from": "2026-08-01T00:00:00",
        "valid_until": "2026-12-31T23:59:59"
    }"#;

    let block: WeeklyTimeBlock = from_str(json).expect("Failed to deserialize time block");

    assert_eq!(block.weekday, Weekday::Monday);
    assert_eq!(block.start_hour, NaiveTime::from_hms_opt(8, 20, 0).unwrap());
    assert_eq!(block.end_hour, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
    assert_eq!(
        block.valid_from.date(),
        NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()
    );
}

#[test]
fn test_create_time_block_request_serialization() {
    let request = CreateTimeBlockRequest {
        weekday: Weekday::Wednesday,
        start_hour: NaiveTime::from_hms_opt(16, 10, 0).unwrap(),
        end_hour: NaiveTime::from_hms_opt(17, 20, 0).unwrap(),
        valid_from: NaiveDate::from_ymd_opt(2026, 8, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
        valid_until: NaiveDate::from_ymd_opt(2026, 12, 31)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    };

    let json = to_string(&request).expect("Failed to serialize create time block request");
    let deserialized: CreateTimeBlockRequest =
        from_str(&json).expect("Failed to deserialize create time block request");

    assert_eq!(deserialized, request);
}

#[rstest]
// The weekday matches and the date sits inside the window.
#[case(2026, 8, 10, true)]
// Same date as valid_from: the window's time of day is ignored.
#[case(2026, 8, 3, true)]
// Last covered Monday, equal to valid_until's date.
#[case(2026, 8, 31, true)]
// Right weekday, before the window opens.
#[case(2026, 7, 27, false)]
// Right weekday, after the window closes.
#[case(2026, 9, 7, false)]
// Inside the window but the wrong weekday.
#[case(2026, 8, 4, false)]
fn test_block_covers_date(
    #[case] year: i32,
    #[case] month: u32,
    #[case] day: u32,
    #[case] covered: bool,
) {
    let block = WeeklyTimeBlock {
        id: Uuid::new_v4(),
        tutor_id: Uuid::new_v4(),
        weekday: Weekday::Monday,
        start_hour: NaiveTime::from_hms_opt(8, 20, 0).unwrap(),
        end_hour: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        // Midday on a Monday: covers() must still include that Monday.
        valid_from: NaiveDate::from_ymd_opt(2026, 8, 3)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
        valid_until: NaiveDate::from_ymd_opt(2026, 8, 31)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    };

    let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
    assert_eq!(block.covers(date), covered);
}

#[test]
fn test_weekday_round_trip_through_chrono() {
    for day in [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ] {
        assert_eq!(Weekday::from_chrono(day.to_chrono()), day);
    }
    assert_eq!(Weekday::Monday.days_from_monday(), 0);
    assert_eq!(Weekday::Sunday.days_from_monday(), 6);
}
