#![cfg(all(test, feature = "server"))]

use crate::test_utils::TestContext;
use crate::types::{Availability, RegistrationProfile, Role, ServiceCategory};

fn worker_profile() -> RegistrationProfile {
    RegistrationProfile::Worker {
        full_name: "Ali Ben".to_string(),
        phone: "0612345678".to_string(),
        whatsapp: None,
        experience_years: 5,
        category: ServiceCategory::Electrical,
        availability: Availability::Weekends,
    }
}

fn customer_profile() -> RegistrationProfile {
    RegistrationProfile::Customer {
        full_name: "Sara Amrani".to_string(),
        phone: "0698765432".to_string(),
        city: "Casablanca".to_string(),
        address: "12 Rue des Fleurs".to_string(),
    }
}

#[tokio::test]
async fn worker_sign_up_then_sign_in() {
    let ctx = TestContext::new().await;
    ctx.set_global();

    let session = crate::sign_up(
        "0612345678".to_string(),
        "Passw0rd".to_string(),
        worker_profile(),
    )
    .await
    .expect("sign up");

    assert_eq!(session.user_type, Role::Worker);
    assert_eq!(session.user.full_name, "Ali Ben");
    assert!(!session.token.is_empty());

    let session = crate::sign_in("0612345678".to_string(), "Passw0rd".to_string())
        .await
        .expect("sign in");
    assert_eq!(session.user_type, Role::Worker);
}

#[tokio::test]
async fn customer_sign_up_stores_side_table() {
    let ctx = TestContext::new().await;
    ctx.set_global();

    let session = crate::sign_up(
        "sara@example.com".to_string(),
        "Passw0rd1".to_string(),
        customer_profile(),
    )
    .await
    .expect("sign up");

    let me = crate::auth_me(session.token).await.expect("me");
    assert_eq!(me.user.role, Role::Customer);
    assert_eq!(me.city.as_deref(), Some("Casablanca"));
    assert!(me.category.is_none());
}

#[tokio::test]
async fn duplicate_sign_up_is_rejected() {
    let ctx = TestContext::new().await;
    ctx.set_global();

    crate::sign_up(
        "0612345678".to_string(),
        "Passw0rd".to_string(),
        worker_profile(),
    )
    .await
    .expect("first sign up");

    let err = crate::sign_up(
        "0612345678".to_string(),
        "Passw0rd".to_string(),
        worker_profile(),
    )
    .await
    .expect_err("duplicate must fail");
    assert!(err.to_string().contains("already registered"));
}

#[tokio::test]
async fn sign_in_rejects_wrong_password() {
    let ctx = TestContext::new().await;
    ctx.set_global();

    crate::sign_up(
        "sara@example.com".to_string(),
        "Passw0rd1".to_string(),
        customer_profile(),
    )
    .await
    .expect("sign up");

    let err = crate::sign_in("sara@example.com".to_string(), "Wrong0pass".to_string())
        .await
        .expect_err("wrong password must fail");
    assert!(err.to_string().contains("Invalid login or password"));
}

#[tokio::test]
async fn worker_me_carries_category_and_availability() {
    let ctx = TestContext::new().await;
    ctx.set_global();

    let session = crate::sign_up(
        "0612345678".to_string(),
        "Passw0rd".to_string(),
        worker_profile(),
    )
    .await
    .expect("sign up");

    let me = crate::auth_me(session.token).await.expect("me");
    assert_eq!(me.category, Some(ServiceCategory::Electrical));
    assert_eq!(me.availability, Some(Availability::Weekends));
    assert!(me.city.is_none());
}

#[tokio::test]
async fn auth_me_rejects_garbage_token() {
    let ctx = TestContext::new().await;
    ctx.set_global();

    assert!(crate::auth_me("not.a.token".to_string()).await.is_err());
}
