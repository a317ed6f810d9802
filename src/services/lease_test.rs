use super::*;

const TTL: Duration = Duration::from_millis(2_000);

#[test]
fn acquire_on_free_slot_succeeds() {
    let leases = SubmissionLeases::with_ttl(TTL);
    assert!(leases.acquire("sess-a", Uuid::new_v4()).is_ok());
}

#[test]
fn same_owner_reacquires_and_renews() {
    let leases = SubmissionLeases::with_ttl(TTL);
    let owner = Uuid::new_v4();
    let start = Instant::now();

    leases.acquire_at("sess-a", owner, start).unwrap();
    // Renew near expiry...
    let near_expiry = start + TTL - Duration::from_millis(1);
    leases.acquire_at("sess-a", owner, near_expiry).unwrap();

    // ...so a rival is still blocked after the original TTL would have
    // lapsed.
    let rival = Uuid::new_v4();
    let past_original_ttl = start + TTL + Duration::from_millis(500);
    assert!(leases.acquire_at("sess-a", rival, past_original_ttl).is_err());
}

#[test]
fn different_owner_is_blocked_while_held() {
    let leases = SubmissionLeases::with_ttl(TTL);
    let holder = Uuid::new_v4();
    let rival = Uuid::new_v4();
    let now = Instant::now();

    leases.acquire_at("sess-a", holder, now).unwrap();
    let err = leases.acquire_at("sess-a", rival, now).unwrap_err();
    let LeaseError::Held { holder: reported } = err;
    assert_eq!(reported, holder);
}

#[test]
fn expired_lease_can_be_taken_over() {
    let leases = SubmissionLeases::with_ttl(TTL);
    let holder = Uuid::new_v4();
    let rival = Uuid::new_v4();
    let start = Instant::now();

    leases.acquire_at("sess-a", holder, start).unwrap();
    let after_ttl = start + TTL + Duration::from_millis(1);
    assert!(leases.acquire_at("sess-a", rival, after_ttl).is_ok());
}

#[test]
fn release_frees_the_slot() {
    let leases = SubmissionLeases::with_ttl(TTL);
    let holder = Uuid::new_v4();
    let rival = Uuid::new_v4();
    let now = Instant::now();

    leases.acquire_at("sess-a", holder, now).unwrap();
    leases.release("sess-a", holder);
    assert!(leases.acquire_at("sess-a", rival, now).is_ok());
}

#[test]
fn release_by_non_owner_is_ignored() {
    let leases = SubmissionLeases::with_ttl(TTL);
    let holder = Uuid::new_v4();
    let rival = Uuid::new_v4();
    let now = Instant::now();

    leases.acquire_at("sess-a", holder, now).unwrap();
    leases.release("sess-a", rival);
    assert!(leases.acquire_at("sess-a", rival, now).is_err());
}

#[test]
fn sessions_are_independent() {
    let leases = SubmissionLeases::with_ttl(TTL);
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let now = Instant::now();

    leases.acquire_at("sess-a", a, now).unwrap();
    assert!(leases.acquire_at("sess-b", b, now).is_ok());
}
