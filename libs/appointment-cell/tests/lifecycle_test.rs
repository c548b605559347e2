use assert_matches::assert_matches;

use appointment_cell::models::{AppointmentError, AppointmentStatus};
use appointment_cell::services::lifecycle::AppointmentLifecycleService;

const ALL_STATUSES: [AppointmentStatus; 7] = [
    AppointmentStatus::Booked,
    AppointmentStatus::Confirmed,
    AppointmentStatus::CheckedIn,
    AppointmentStatus::InConsultation,
    AppointmentStatus::Completed,
    AppointmentStatus::Cancelled,
    AppointmentStatus::NoShow,
];

#[test]
fn terminal_statuses_admit_no_transitions() {
    let service = AppointmentLifecycleService::new();
    let terminals = [
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
    ];

    for from in terminals {
        assert!(service.valid_transitions(&from).is_empty());
        for to in ALL_STATUSES {
            assert_matches!(
                service.validate_status_transition(&from, &to),
                Err(AppointmentError::InvalidStatusTransition { .. })
            );
        }
    }
}

#[test]
fn no_op_transitions_are_illegal_for_every_status() {
    let service = AppointmentLifecycleService::new();

    for status in ALL_STATUSES {
        assert_eq!(
            service.validate_status_transition(&status, &status),
            Err(AppointmentError::InvalidStatusTransition {
                from: status,
                to: status,
            })
        );
    }
}

#[test]
fn transition_table_matches_the_workflow() {
    let service = AppointmentLifecycleService::new();

    let expected: [(AppointmentStatus, &[AppointmentStatus]); 7] = [
        (
            AppointmentStatus::Booked,
            &[
                AppointmentStatus::CheckedIn,
                AppointmentStatus::Cancelled,
                AppointmentStatus::NoShow,
            ],
        ),
        (
            AppointmentStatus::Confirmed,
            &[
                AppointmentStatus::CheckedIn,
                AppointmentStatus::Cancelled,
                AppointmentStatus::NoShow,
            ],
        ),
        (
            AppointmentStatus::CheckedIn,
            &[
                AppointmentStatus::InConsultation,
                AppointmentStatus::Cancelled,
            ],
        ),
        (
            AppointmentStatus::InConsultation,
            &[AppointmentStatus::Completed],
        ),
        (AppointmentStatus::Completed, &[]),
        (AppointmentStatus::Cancelled, &[]),
        (AppointmentStatus::NoShow, &[]),
    ];

    for (from, allowed) in expected {
        assert_eq!(service.valid_transitions(&from), allowed, "from {}", from);

        for to in ALL_STATUSES {
            let verdict = service.validate_status_transition(&from, &to);
            if allowed.contains(&to) {
                assert_eq!(verdict, Ok(()), "{} -> {} should be legal", from, to);
            } else {
                assert_eq!(
                    verdict,
                    Err(AppointmentError::InvalidStatusTransition { from, to }),
                    "{} -> {} should be illegal",
                    from,
                    to
                );
            }
        }
    }
}

#[test]
fn completion_requires_passing_through_consultation() {
    let service = AppointmentLifecycleService::new();

    assert!(service
        .validate_status_transition(&AppointmentStatus::Booked, &AppointmentStatus::CheckedIn)
        .is_ok());
    assert!(service
        .validate_status_transition(&AppointmentStatus::Booked, &AppointmentStatus::Completed)
        .is_err());
    assert!(service
        .validate_status_transition(
            &AppointmentStatus::CheckedIn,
            &AppointmentStatus::InConsultation
        )
        .is_ok());
    assert!(service
        .validate_status_transition(
            &AppointmentStatus::CheckedIn,
            &AppointmentStatus::Completed
        )
        .is_err());
    assert!(service
        .validate_status_transition(
            &AppointmentStatus::InConsultation,
            &AppointmentStatus::Cancelled
        )
        .is_err());
}

#[test]
fn confirmed_is_never_a_transition_target() {
    let service = AppointmentLifecycleService::new();

    // Confirmed can only be set by the booking collaborator at creation;
    // the engine must not offer a path into it.
    for from in ALL_STATUSES {
        assert!(!service
            .valid_transitions(&from)
            .contains(&AppointmentStatus::Confirmed));
    }
}

#[test]
fn is_terminal_agrees_with_the_transition_table() {
    let service = AppointmentLifecycleService::new();

    for status in ALL_STATUSES {
        assert_eq!(
            status.is_terminal(),
            service.valid_transitions(&status).is_empty(),
            "terminal flag out of sync for {}",
            status
        );
    }
}

#[test]
fn validation_is_deterministic() {
    let service = AppointmentLifecycleService::new();

    for from in ALL_STATUSES {
        for to in ALL_STATUSES {
            let first = service.validate_status_transition(&from, &to);
            let second = service.validate_status_transition(&from, &to);
            assert_eq!(first, second);
        }
    }
}
