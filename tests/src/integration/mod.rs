//! Cross-crate integration flows.

pub mod expiry;
pub mod feed;
pub mod lifecycle;

#[cfg(test)]
pub(crate) mod support {
    use kyc_registry::prelude::*;
    use std::sync::Arc;

    /// Install a test subscriber once; repeated calls are no-ops.
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    pub const OWNER: Address = [0x01; 20];
    pub const VERIFIER: Address = [0x0e; 20];
    pub const ALICE: Address = [0xa1; 20];
    pub const BANK: Address = [0xb0; 20];
    pub const FP: Hash = [0x42; 32];

    /// A service with an enrolled third-party verifier, plus its clock.
    pub async fn attested_setup() -> (RegistryService, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::starting_at(1_700_000_000));
        let service = RegistryService::new(OWNER, clock.clone());
        service
            .add_verifier(OWNER, VERIFIER)
            .await
            .expect("enroll verifier");
        (service, clock)
    }

    /// Generate a random address for collision-free test identities.
    pub fn random_address() -> Address {
        use rand::Rng;
        let mut address = [0u8; 20];
        rand::thread_rng().fill(&mut address[..]);
        address
    }
}
