//! # Validity-Window Simulation
//!
//! Expiry boundaries driven deterministically through `ManualClock` - no
//! wall-clock waits. Day-granular windows, second-level checks.

#[cfg(test)]
use super::support::{attested_setup, ALICE, BANK, FP, VERIFIER};
#[cfg(test)]
use kyc_registry::prelude::*;

#[tokio::test]
async fn test_zero_validity_never_expires() {
    let (service, clock) = attested_setup().await;

    service
        .register(ALICE, FP, "ptr123".to_string(), ValidityDays::NEVER)
        .await;
    let record = service.get_record(&ALICE).await.expect("record");
    assert_eq!(record.expires_at, NEVER_EXPIRES);

    clock.advance(100 * 365 * SECONDS_PER_DAY);
    assert!(!service.is_expired(&ALICE).await);
}

#[tokio::test]
async fn test_expiry_boundary_seconds() {
    let (service, clock) = attested_setup().await;
    let start = 1_700_000_000;
    clock.set(start);

    service
        .register(ALICE, FP, "ptr123".to_string(), ValidityDays(30))
        .await;
    let expiry = start + 30 * SECONDS_PER_DAY;

    clock.set(expiry - 1);
    assert!(!service.is_expired(&ALICE).await);

    // The boundary instant itself is still inside the window.
    clock.set(expiry);
    assert!(!service.is_expired(&ALICE).await);

    clock.set(expiry + 1);
    assert!(service.is_expired(&ALICE).await);
}

#[tokio::test]
async fn test_expiry_overrides_standing_grant() {
    let (service, clock) = attested_setup().await;

    service
        .register(ALICE, FP, "ptr123".to_string(), ValidityDays(1))
        .await;
    service.request_access(BANK, ALICE).await.expect("request");
    service.grant_consent(ALICE, BANK).await.expect("grant");
    assert!(service.has_consent(&ALICE, &BANK).await);

    clock.advance(2 * SECONDS_PER_DAY);

    // Never revoked, but the effective read is an absolute denial.
    assert!(!service.has_consent(&ALICE, &BANK).await);
    assert!(service.grants_held_by(&BANK).await.is_empty());

    // New traffic against the lapsed record is refused...
    assert_eq!(
        service.request_access(BANK, ALICE).await.unwrap_err(),
        RegistryError::Expired { subject: ALICE }
    );
    assert_eq!(
        service.grant_consent(ALICE, BANK).await.unwrap_err(),
        RegistryError::Expired { subject: ALICE }
    );

    // ...while revocation still goes through unconditionally.
    service.revoke_consent(ALICE, BANK).await;
    assert!(!service.has_pending_request(&ALICE, &BANK).await);
}

#[tokio::test]
async fn test_reregistration_reopens_a_lapsed_record() {
    let (service, clock) = attested_setup().await;

    service
        .register(ALICE, FP, "ptr123".to_string(), ValidityDays(1))
        .await;
    clock.advance(2 * SECONDS_PER_DAY);
    assert!(service.is_expired(&ALICE).await);

    // A fresh registration restarts the window from the current instant.
    service
        .register(ALICE, FP, "ptr123".to_string(), ValidityDays(1))
        .await;
    assert!(!service.is_expired(&ALICE).await);

    service.request_access(BANK, ALICE).await.expect("request");
    service.grant_consent(ALICE, BANK).await.expect("grant");
    assert!(service.has_consent(&ALICE, &BANK).await);
}

#[tokio::test]
async fn test_attesting_expired_record_does_not_revive_consent() {
    let (service, clock) = attested_setup().await;

    service
        .register(ALICE, FP, "ptr123".to_string(), ValidityDays(1))
        .await;
    service.request_access(BANK, ALICE).await.expect("request");
    service.grant_consent(ALICE, BANK).await.expect("grant");

    clock.advance(2 * SECONDS_PER_DAY);

    // Attestation does not check expiry, so this succeeds...
    service.verify(VERIFIER, ALICE).await.expect("attest expired");
    assert!(service.get_record(&ALICE).await.expect("record").verified);

    // ...but the consent read stays false until re-registration.
    assert!(!service.has_consent(&ALICE, &BANK).await);
}
