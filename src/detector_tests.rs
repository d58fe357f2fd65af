use super::*;
use crate::store::CrnRecord;
use chrono::Utc;

fn base_record(is_open: bool, consecutive_closed_checks: u32) -> CrnRecord {
    let mut record = CrnRecord::new_untracked("12345", Utc::now());
    record.is_open = is_open;
    record.consecutive_closed_checks = consecutive_closed_checks;
    record.tracking_users.insert("u1".to_string());
    record
}

fn observation(is_open: bool, seats_remaining: u32, total_seats: u32) -> Observation {
    Observation {
        course_name: "Intro".to_string(),
        course_id: "CS".to_string(),
        course_section: "1301".to_string(),
        is_open,
        seats_remaining,
        total_seats,
        observed_at: Utc::now(),
    }
}

#[test]
fn closed_to_open_is_opened_and_resets_counter() {
    let prev = base_record(false, 7);
    let (transition, next) = detect(prev, &Ok(observation(true, 1, 30)));
    assert_eq!(transition, Transition::Opened);
    assert!(next.is_open);
    assert_eq!(next.consecutive_closed_checks, 0);
    assert!(next.last_status_change.is_some());
    assert!(next.tracking_users.contains("u1"));
}

#[test]
fn open_to_closed_is_closed_and_sets_counter_to_one() {
    let prev = base_record(true, 0);
    let (transition, next) = detect(prev, &Ok(observation(false, 0, 30)));
    assert_eq!(transition, Transition::Closed);
    assert!(!next.is_open);
    assert_eq!(next.consecutive_closed_checks, 1);
}

#[test]
fn unchanged_closed_increments_counter() {
    let prev = base_record(false, 3);
    let (transition, next) = detect(prev, &Ok(observation(false, 0, 30)));
    assert_eq!(transition, Transition::Unchanged);
    assert_eq!(next.consecutive_closed_checks, 4);
}

#[test]
fn unchanged_open_keeps_counter_zero() {
    let prev = base_record(true, 0);
    let (transition, next) = detect(prev, &Ok(observation(true, 5, 30)));
    assert_eq!(transition, Transition::Metadata);
    assert_eq!(next.consecutive_closed_checks, 0);
}

#[test]
fn metadata_only_change_is_reported() {
    let mut prev = base_record(false, 2);
    prev.total_seats = 20;
    let (transition, next) = detect(prev, &Ok(observation(false, 0, 25)));
    assert_eq!(transition, Transition::Metadata);
    assert_eq!(next.total_seats, 25);
}

#[test]
fn fetch_error_is_failed_and_does_not_flip_is_open() {
    let prev = base_record(false, 3);
    let (transition, next) = detect(prev, &Err(FetchError::HttpStatus(503)));
    assert_eq!(transition, Transition::Failed);
    assert!(!next.is_open);
    assert_eq!(next.consecutive_closed_checks, 4);
}

#[test]
fn fetch_error_while_open_does_not_flip_is_open() {
    let prev = base_record(true, 0);
    let (transition, next) = detect(prev, &Err(FetchError::Transport("timeout".to_string())));
    assert_eq!(transition, Transition::Failed);
    assert!(next.is_open);
    assert_eq!(next.consecutive_closed_checks, 1);
}

#[cfg(test)]
mod idempotent_tick {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn repeated_observation_converges_to_unchanged(
            is_open in proptest::bool::ANY,
            seats_remaining in 0u32..300,
            total_seats in 1u32..300,
            starting_closed_checks in 0u32..40,
        ) {
            let obs = observation(is_open, seats_remaining, total_seats);
            let prev = base_record(!is_open, starting_closed_checks);

            // First application may be a real transition (OPENED/CLOSED).
            let (_, once) = detect(prev, &Ok(obs.clone()));
            // From here, repeating the same observation must settle into a
            // fixed point: every further tick reports UNCHANGED and leaves
            // the observed fields untouched.
            let (second_transition, twice) = detect(once, &Ok(obs.clone()));
            let (third_transition, thrice) = detect(twice.clone(), &Ok(obs.clone()));

            prop_assert_eq!(second_transition, Transition::Unchanged);
            prop_assert_eq!(third_transition, Transition::Unchanged);
            prop_assert_eq!(twice.is_open, thrice.is_open);
            prop_assert_eq!(twice.seats_remaining, thrice.seats_remaining);
            prop_assert_eq!(twice.total_seats, thrice.total_seats);
            prop_assert_eq!(twice.consecutive_closed_checks, thrice.consecutive_closed_checks.saturating_sub(u32::from(!is_open)));
        }
    }
}
