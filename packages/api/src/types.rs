use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// The two account roles the marketplace knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    Worker,
}

impl Role {
    pub fn as_db(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Worker => "worker",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "customer" => Some(Role::Customer),
            "worker" => Some(Role::Worker),
            _ => None,
        }
    }

    /// Route the user lands on after a successful sign-in.
    pub fn dashboard_route(&self) -> &'static str {
        match self {
            Role::Customer => "/customer/dashboard",
            Role::Worker => "/worker/dashboard",
        }
    }
}

/// The fixed set of trades a worker can register under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Electrical,
    Plumbing,
    Carpentry,
    Painting,
    Ac,
    Furniture,
    Cleaning,
    Installation,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 8] = [
        ServiceCategory::Electrical,
        ServiceCategory::Plumbing,
        ServiceCategory::Carpentry,
        ServiceCategory::Painting,
        ServiceCategory::Ac,
        ServiceCategory::Furniture,
        ServiceCategory::Cleaning,
        ServiceCategory::Installation,
    ];

    pub fn as_db(&self) -> &'static str {
        match self {
            ServiceCategory::Electrical => "electrical",
            ServiceCategory::Plumbing => "plumbing",
            ServiceCategory::Carpentry => "carpentry",
            ServiceCategory::Painting => "painting",
            ServiceCategory::Ac => "ac",
            ServiceCategory::Furniture => "furniture",
            ServiceCategory::Cleaning => "cleaning",
            ServiceCategory::Installation => "installation",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_db() == value)
    }

    /// Translation key for the category label, e.g. `services.plumbing`.
    pub fn label_key(&self) -> String {
        format!("services.{}", self.as_db())
    }
}

/// When a worker is available for jobs. The registration wizard offers a
/// binary choice between the two halves of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Weekends,
    Weekdays,
}

impl Availability {
    pub fn as_db(&self) -> &'static str {
        match self {
            Availability::Weekends => "weekends",
            Availability::Weekdays => "weekdays",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "weekends" => Some(Availability::Weekends),
            "weekdays" => Some(Availability::Weekdays),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub login: String,
    pub full_name: String,
    pub phone: String,
    pub role: Role,
    pub created_at: OffsetDateTime,
}

/// Role-specific fields collected by the registration wizard, submitted as
/// one unit on the final step. Tagged by role so a draft can never mix
/// customer and worker shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum RegistrationProfile {
    Customer {
        full_name: String,
        phone: String,
        city: String,
        address: String,
    },
    Worker {
        full_name: String,
        phone: String,
        whatsapp: Option<String>,
        experience_years: i32,
        category: ServiceCategory,
        availability: Availability,
    },
}

impl RegistrationProfile {
    pub fn role(&self) -> Role {
        match self {
            RegistrationProfile::Customer { .. } => Role::Customer,
            RegistrationProfile::Worker { .. } => Role::Worker,
        }
    }

    pub fn full_name(&self) -> &str {
        match self {
            RegistrationProfile::Customer { full_name, .. } => full_name,
            RegistrationProfile::Worker { full_name, .. } => full_name,
        }
    }

    pub fn phone(&self) -> &str {
        match self {
            RegistrationProfile::Customer { phone, .. } => phone,
            RegistrationProfile::Worker { phone, .. } => phone,
        }
    }
}

/// What a successful sign-up or sign-in hands back to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
    pub user_type: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Me {
    pub user: User,
    pub category: Option<ServiceCategory>,
    pub availability: Option<Availability>,
    pub city: Option<String>,
}
