use dioxus::prelude::*;

#[component]
pub fn Login() -> Element {
    rsx! {
        ui::LoginPage {}
    }
}

#[component]
pub fn Register(role: Option<String>) -> Element {
    rsx! {
        ui::RegisterPage { role }
    }
}

#[component]
pub fn RegisterWorker() -> Element {
    rsx! {
        ui::WorkerRegisterPage {}
    }
}

#[component]
pub fn RegisterCustomer() -> Element {
    rsx! {
        ui::CustomerRegisterPage {}
    }
}
