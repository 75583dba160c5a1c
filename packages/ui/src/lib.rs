//! This crate contains all shared UI for the workspace.

mod landing;
pub use landing::{FeaturesSection, Hero, HowItWorksSection};

mod auth;
pub use auth::{
    AuthBootstrap, AuthGate, CustomerRegisterPage, LoginPage, RegisterPage, SignOutButton,
    WorkerRegisterPage,
};

mod dashboard;
pub use dashboard::{CustomerDashboardPage, WorkerDashboardPage};

pub mod wizard;

mod assistant;
pub use assistant::{ChatButton, ChatWidget};

mod theme;
pub use theme::BricolTheme;

mod i18n;
pub use i18n::{
    change_language, set_lang, t, t_with, toggle_language, use_lang, I18nProvider, Lang,
    LanguageSwitcher,
};
