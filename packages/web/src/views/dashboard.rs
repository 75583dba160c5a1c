use dioxus::prelude::*;

#[component]
pub fn CustomerDashboard() -> Element {
    rsx! {
        ui::CustomerDashboardPage {}
    }
}

#[component]
pub fn WorkerDashboard() -> Element {
    rsx! {
        ui::WorkerDashboardPage {}
    }
}
