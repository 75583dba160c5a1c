mod home;
pub use home::Home;

mod auth;
pub use auth::{Login, Register, RegisterCustomer, RegisterWorker};

mod dashboard;
pub use dashboard::{CustomerDashboard, WorkerDashboard};
