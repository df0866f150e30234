//! Integration tests for the invitation-reconciliation procedure.

use assert_matches::assert_matches;
use sqlx::PgPool;
use timewheel_db::models::reconciliation::ReconciliationOutcome;
use timewheel_db::models::user::{UpsertUser, User};
use timewheel_db::repositories::reconciliation::Reconciler;
use timewheel_db::repositories::{MemberRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_org(pool: &PgPool, slug: &str) -> i64 {
    let (id,): (i64,) =
        sqlx::query_as("INSERT INTO organizations (name, slug) VALUES ($1, $1) RETURNING id")
            .bind(slug)
            .fetch_one(pool)
            .await
            .expect("organization insert should succeed");
    id
}

async fn create_user(pool: &PgPool, email: &str) -> User {
    UserRepo::upsert_from_identity(
        pool,
        &UpsertUser {
            external_auth_id: format!("ext_{email}"),
            email: email.to_string(),
            full_name: None,
        },
    )
    .await
    .expect("user upsert should succeed")
}

/// Insert an invitation expiring `expires_in_hours` from now (negative for
/// already-expired rows). Returns the invitation id.
async fn create_invitation(
    pool: &PgPool,
    email: &str,
    organization_id: i64,
    role: &str,
    expires_in_hours: i64,
) -> i64 {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO invitations (email, organization_id, role, token, expires_at)
         VALUES ($1, $2, $3, $4, NOW() + make_interval(hours => $5::int))
         RETURNING id",
    )
    .bind(email)
    .bind(organization_id)
    .bind(role)
    .bind(timewheel_core::invitation::generate_token())
    .bind(expires_in_hours)
    .fetch_one(pool)
    .await
    .expect("invitation insert should succeed");
    id
}

async fn membership_count(pool: &PgPool, user_id: i64) -> i64 {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM organization_members WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
            .unwrap();
    count
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// One valid invitation + one run: exactly one membership row, invitation
/// accepted, role promoted, onboarded set.
#[sqlx::test(migrations = "../../db/migrations")]
async fn single_valid_invitation_is_applied(pool: PgPool) {
    let org = create_org(&pool, "org1").await;
    let user = create_user(&pool, "a@x.com").await;
    assert!(!user.onboarded);
    let invitation_id = create_invitation(&pool, "a@x.com", org, "member", 24).await;

    let outcome = Reconciler::reconcile_invitation(&pool, user.id, &user.email)
        .await
        .unwrap();

    assert_matches!(
        outcome,
        ReconciliationOutcome::Applied {
            membership_created: true,
            ..
        }
    );

    let member = MemberRepo::find(&pool, org, user.id)
        .await
        .unwrap()
        .expect("membership row should exist");
    assert_eq!(member.role, "member");
    assert!(member.is_active);
    assert_eq!(membership_count(&pool, user.id).await, 1);

    let (accepted, accepted_at): (bool, Option<chrono::DateTime<chrono::Utc>>) =
        sqlx::query_as("SELECT accepted, accepted_at FROM invitations WHERE id = $1")
            .bind(invitation_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(accepted);
    assert!(accepted_at.is_some());

    let user = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(user.role, "member");
    assert!(user.onboarded);
}

/// No valid invitation: no membership row, onboarded untouched.
#[sqlx::test(migrations = "../../db/migrations")]
async fn no_invitation_leaves_profile_untouched(pool: PgPool) {
    let user = create_user(&pool, "nobody@x.com").await;

    let outcome = Reconciler::reconcile_invitation(&pool, user.id, &user.email)
        .await
        .unwrap();

    assert_matches!(outcome, ReconciliationOutcome::NoInvitation);
    assert_eq!(membership_count(&pool, user.id).await, 0);

    let user = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(!user.onboarded);
}

/// Running the procedure twice does not create a second membership row and
/// does not change accepted_at on the second run.
#[sqlx::test(migrations = "../../db/migrations")]
async fn second_run_is_a_noop(pool: PgPool) {
    let org = create_org(&pool, "org1").await;
    let user = create_user(&pool, "a@x.com").await;
    let invitation_id = create_invitation(&pool, "a@x.com", org, "member", 24).await;

    let first = Reconciler::reconcile_invitation(&pool, user.id, &user.email)
        .await
        .unwrap();
    assert_matches!(first, ReconciliationOutcome::Applied { .. });

    let (accepted_at_first,): (Option<chrono::DateTime<chrono::Utc>>,) =
        sqlx::query_as("SELECT accepted_at FROM invitations WHERE id = $1")
            .bind(invitation_id)
            .fetch_one(&pool)
            .await
            .unwrap();

    let second = Reconciler::reconcile_invitation(&pool, user.id, &user.email)
        .await
        .unwrap();
    assert_matches!(second, ReconciliationOutcome::NoInvitation);

    assert_eq!(membership_count(&pool, user.id).await, 1);

    let (accepted_at_second,): (Option<chrono::DateTime<chrono::Utc>>,) =
        sqlx::query_as("SELECT accepted_at FROM invitations WHERE id = $1")
            .bind(invitation_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(accepted_at_first, accepted_at_second);
}

/// Expired invitations are never matched.
#[sqlx::test(migrations = "../../db/migrations")]
async fn expired_invitation_is_not_matched(pool: PgPool) {
    let org = create_org(&pool, "org1").await;
    let user = create_user(&pool, "late@x.com").await;
    create_invitation(&pool, "late@x.com", org, "member", -1).await;

    let outcome = Reconciler::reconcile_invitation(&pool, user.id, &user.email)
        .await
        .unwrap();

    assert_matches!(outcome, ReconciliationOutcome::NoInvitation);
    assert_eq!(membership_count(&pool, user.id).await, 0);
}

/// With one expired and one valid invitation, only the valid one is
/// matched regardless of creation order.
#[sqlx::test(migrations = "../../db/migrations")]
async fn valid_beats_expired_regardless_of_order(pool: PgPool) {
    let org1 = create_org(&pool, "org1").await;
    let org2 = create_org(&pool, "org2").await;
    let user = create_user(&pool, "a@x.com").await;

    // Valid first, expired second (the expired one is more recent).
    let valid_id = create_invitation(&pool, "a@x.com", org1, "member", 24).await;
    create_invitation(&pool, "a@x.com", org2, "admin", -1).await;

    let outcome = Reconciler::reconcile_invitation(&pool, user.id, &user.email)
        .await
        .unwrap();

    match outcome {
        ReconciliationOutcome::Applied {
            invitation,
            organization_id,
            ..
        } => {
            assert_eq!(invitation.id, valid_id);
            assert_eq!(organization_id, org1);
        }
        other => panic!("expected Applied, got {other:?}"),
    }
}

/// Email matching is case-insensitive.
#[sqlx::test(migrations = "../../db/migrations")]
async fn email_match_ignores_case(pool: PgPool) {
    let org = create_org(&pool, "org1").await;
    let user = create_user(&pool, "a@x.com").await;
    create_invitation(&pool, "A@X.Com", org, "member", 24).await;

    let outcome = Reconciler::reconcile_invitation(&pool, user.id, &user.email)
        .await
        .unwrap();

    assert_matches!(outcome, ReconciliationOutcome::Applied { .. });
}

/// An existing membership row (and its role) wins over the invitation.
#[sqlx::test(migrations = "../../db/migrations")]
async fn existing_membership_role_is_preserved(pool: PgPool) {
    let org = create_org(&pool, "org1").await;
    let user = create_user(&pool, "a@x.com").await;

    sqlx::query(
        "INSERT INTO organization_members (organization_id, user_id, role) VALUES ($1, $2, 'owner')",
    )
    .bind(org)
    .bind(user.id)
    .execute(&pool)
    .await
    .unwrap();

    create_invitation(&pool, "a@x.com", org, "member", 24).await;

    let outcome = Reconciler::reconcile_invitation(&pool, user.id, &user.email)
        .await
        .unwrap();

    assert_matches!(
        outcome,
        ReconciliationOutcome::Applied {
            membership_created: false,
            ..
        }
    );

    let member = MemberRepo::find(&pool, org, user.id).await.unwrap().unwrap();
    assert_eq!(member.role, "owner");
    assert_eq!(membership_count(&pool, user.id).await, 1);
}

/// Two triggers firing at once (callback plus dashboard mount) apply the
/// invitation exactly once; the loser sees it as consumed or gone.
#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_runs_apply_exactly_once(pool: PgPool) {
    let org = create_org(&pool, "org1").await;
    let user = create_user(&pool, "a@x.com").await;
    create_invitation(&pool, "a@x.com", org, "member", 24).await;

    let (first, second) = tokio::join!(
        Reconciler::reconcile_invitation(&pool, user.id, &user.email),
        Reconciler::reconcile_invitation(&pool, user.id, &user.email),
    );
    let outcomes = [first.unwrap(), second.unwrap()];

    let applied = outcomes
        .iter()
        .filter(|o| matches!(o, ReconciliationOutcome::Applied { .. }))
        .count();
    assert_eq!(applied, 1, "exactly one trigger wins: {outcomes:?}");
    assert_eq!(membership_count(&pool, user.id).await, 1);

    let user = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(user.onboarded);
}

/// A run that matches an invitation while another trigger is mid-flight on
/// it observes zero rows on the conditional accept and backs out without
/// any side effects.
#[sqlx::test(migrations = "../../db/migrations")]
async fn in_flight_acceptance_backs_out(pool: PgPool) {
    let org = create_org(&pool, "org1").await;
    let user = create_user(&pool, "a@x.com").await;
    let invitation_id = create_invitation(&pool, "a@x.com", org, "member", 24).await;

    // An uncommitted transaction holds the accepted flip, so the run under
    // test matches the still-pending row, then blocks on the conditional
    // accept until the commit lands.
    let mut tx = pool.begin().await.unwrap();
    sqlx::query("UPDATE invitations SET accepted = true, accepted_at = NOW() WHERE id = $1")
        .bind(invitation_id)
        .execute(&mut *tx)
        .await
        .unwrap();

    let (outcome, _) = tokio::join!(
        Reconciler::reconcile_invitation(&pool, user.id, &user.email),
        async {
            tokio::time::sleep(std::time::Duration::from_millis(200)).await;
            tx.commit().await.unwrap();
        }
    );

    assert_matches!(outcome.unwrap(), ReconciliationOutcome::AlreadyConsumed);
    assert_eq!(membership_count(&pool, user.id).await, 0);

    let user = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(!user.onboarded, "losing run must not promote the profile");
}

/// When several invitations are simultaneously valid, the most recent wins.
#[sqlx::test(migrations = "../../db/migrations")]
async fn most_recent_valid_invitation_wins(pool: PgPool) {
    let org1 = create_org(&pool, "org1").await;
    let org2 = create_org(&pool, "org2").await;
    let user = create_user(&pool, "a@x.com").await;

    let older = create_invitation(&pool, "a@x.com", org1, "member", 24).await;
    // Force distinct created_at ordering.
    sqlx::query("UPDATE invitations SET created_at = created_at - interval '1 hour' WHERE id = $1")
        .bind(older)
        .execute(&pool)
        .await
        .unwrap();
    let newer = create_invitation(&pool, "a@x.com", org2, "admin", 24).await;

    let outcome = Reconciler::reconcile_invitation(&pool, user.id, &user.email)
        .await
        .unwrap();

    match outcome {
        ReconciliationOutcome::Applied { invitation, .. } => assert_eq!(invitation.id, newer),
        other => panic!("expected Applied, got {other:?}"),
    }
}
