#![cfg(test)]

use crate::types::{Availability, Role, ServiceCategory};

#[test]
fn role_db_mapping_roundtrips() {
    assert_eq!(Role::from_db(Role::Worker.as_db()), Some(Role::Worker));
    assert_eq!(Role::from_db("admin"), None);
    assert_eq!(Role::Worker.dashboard_route(), "/worker/dashboard");
}

#[test]
fn category_set_is_stable() {
    for category in ServiceCategory::ALL {
        assert_eq!(ServiceCategory::from_db(category.as_db()), Some(category));
    }
    assert_eq!(ServiceCategory::from_db("gardening"), None);
    assert_eq!(ServiceCategory::Ac.label_key(), "services.ac");
}

#[test]
fn availability_db_mapping_roundtrips() {
    assert_eq!(
        Availability::from_db("weekends"),
        Some(Availability::Weekends)
    );
    assert_eq!(Availability::from_db("sundays"), None);
}
