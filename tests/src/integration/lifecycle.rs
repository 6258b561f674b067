//! # Full Lifecycle Flow
//!
//! Drives the complete choreography end to end:
//!
//! ```text
//! [Subject] ──register──→ [Registry] ──Registered──→ [Feed]
//! [Verifier] ──verify──→ [Registry] ──Verified──→ [Feed]
//! [Bank] ──request──→ [Registry] ──AccessRequested──→ [Feed]
//! [Subject] ──grant──→ [Registry] ──ConsentGranted──→ [Feed]
//! [Subject] ──revoke──→ [Registry] ──ConsentRevoked──→ [Feed]
//! ```

#[cfg(test)]
use super::support::{attested_setup, init_tracing, random_address, ALICE, BANK, FP, OWNER, VERIFIER};
#[cfg(test)]
use kyc_registry::prelude::*;

#[tokio::test]
async fn test_full_onboarding_and_disclosure_flow() {
    init_tracing();
    let (service, _clock) = attested_setup().await;

    // Subject registers a 365-day record.
    service
        .register(ALICE, FP, "ptr123".to_string(), ValidityDays(365))
        .await;
    let record = service.get_record(&ALICE).await.expect("record");
    assert_eq!(record.fingerprint, FP);
    assert_eq!(record.external_pointer, "ptr123");
    assert!(!record.verified);

    // Trusted verifier attests.
    service.verify(VERIFIER, ALICE).await.expect("attest");
    assert!(service.get_record(&ALICE).await.expect("record").verified);

    // Bank requests, subject grants.
    service.request_access(BANK, ALICE).await.expect("request");
    assert!(service.has_pending_request(&ALICE, &BANK).await);
    assert_eq!(service.pending_requests_for(&ALICE).await, vec![BANK]);

    service.grant_consent(ALICE, BANK).await.expect("grant");
    assert!(service.has_consent(&ALICE, &BANK).await);
    assert_eq!(service.grants_held_by(&BANK).await, vec![ALICE]);

    // Subject revokes: both flags drop at once.
    service.revoke_consent(ALICE, BANK).await;
    assert!(!service.has_consent(&ALICE, &BANK).await);
    assert!(!service.has_pending_request(&ALICE, &BANK).await);
    assert!(service.grants_held_by(&BANK).await.is_empty());
}

#[tokio::test]
async fn test_unauthorized_paths_leave_no_trace() {
    let (service, _clock) = attested_setup().await;
    let stranger = random_address();

    service
        .register(ALICE, FP, "ptr123".to_string(), ValidityDays(365))
        .await;
    let audit_before = service.audit_len().await;

    // Stranger cannot attest.
    assert_eq!(
        service.verify(stranger, ALICE).await.unwrap_err(),
        RegistryError::Unauthorized { caller: stranger }
    );
    assert!(!service.get_record(&ALICE).await.expect("record").verified);

    // Stranger cannot alter the verifier set.
    assert_eq!(
        service.add_verifier(stranger, stranger).await.unwrap_err(),
        RegistryError::Unauthorized { caller: stranger }
    );
    assert!(!service.is_verifier(&stranger).await);

    // Granting without a request is invalid.
    assert_eq!(
        service.grant_consent(ALICE, BANK).await.unwrap_err(),
        RegistryError::InvalidState {
            subject: ALICE,
            counterparty: BANK,
        }
    );

    // None of the rejected calls reached the audit trail.
    assert_eq!(service.audit_len().await, audit_before);
}

#[tokio::test]
async fn test_reregistration_discards_attestation_and_consent_survives() {
    let (service, _clock) = attested_setup().await;

    service
        .register(ALICE, FP, "ptr123".to_string(), ValidityDays(365))
        .await;
    service.verify(VERIFIER, ALICE).await.expect("attest");
    service.request_access(BANK, ALICE).await.expect("request");
    service.grant_consent(ALICE, BANK).await.expect("grant");

    // Fresh registration: verified drops, the stored grant is untouched.
    service
        .register(ALICE, [0x43; 32], "ptr456".to_string(), ValidityDays(30))
        .await;
    let record = service.get_record(&ALICE).await.expect("record");
    assert!(!record.verified);
    assert_eq!(record.external_pointer, "ptr456");
    assert!(service.has_consent(&ALICE, &BANK).await);
}

#[tokio::test]
async fn test_dual_flag_state_survives_the_full_stack() {
    let (service, _clock) = attested_setup().await;

    service
        .register(ALICE, FP, "ptr123".to_string(), ValidityDays(365))
        .await;
    service.request_access(BANK, ALICE).await.expect("request");
    service.grant_consent(ALICE, BANK).await.expect("grant");

    // Granting leaves pending armed; a repeated request keeps the grant.
    assert!(service.has_pending_request(&ALICE, &BANK).await);
    service
        .request_access(BANK, ALICE)
        .await
        .expect("re-request over live grant");
    assert!(service.has_consent(&ALICE, &BANK).await);
    assert!(service.has_pending_request(&ALICE, &BANK).await);
}

#[tokio::test]
async fn test_verifier_removal_does_not_unwind_attestations() {
    let (service, _clock) = attested_setup().await;

    service
        .register(ALICE, FP, "ptr123".to_string(), ValidityDays(365))
        .await;
    service.verify(VERIFIER, ALICE).await.expect("attest");

    service
        .remove_verifier(OWNER, VERIFIER)
        .await
        .expect("remove verifier");
    assert!(!service.is_verifier(&VERIFIER).await);
    assert!(service.get_record(&ALICE).await.expect("record").verified);

    // The demoted verifier can no longer attest anyone else.
    let other = random_address();
    service
        .register(other, FP, "ptr789".to_string(), ValidityDays(365))
        .await;
    assert_eq!(
        service.verify(VERIFIER, other).await.unwrap_err(),
        RegistryError::Unauthorized { caller: VERIFIER }
    );
}

#[tokio::test]
async fn test_many_subjects_stay_isolated() {
    let (service, _clock) = attested_setup().await;

    let subjects: Vec<Address> = (0..8).map(|_| random_address()).collect();
    for subject in &subjects {
        service
            .register(*subject, FP, "ptr".to_string(), ValidityDays(365))
            .await;
        service.request_access(BANK, *subject).await.expect("request");
    }

    // Only the first subject grants.
    service
        .grant_consent(subjects[0], BANK)
        .await
        .expect("grant");

    assert_eq!(service.grants_held_by(&BANK).await, vec![subjects[0]]);
    for subject in &subjects[1..] {
        assert!(!service.has_consent(subject, &BANK).await);
        assert!(service.has_pending_request(subject, &BANK).await);
    }
}
