use api::types::{Availability, ServiceCategory};
use dioxus::prelude::*;

use crate::wizard::{
    sanitize_digits, sanitize_name, sanitize_phone, CustomerDraft, Submission, WorkerDraft, Wizard,
};

const AUTH_CSS: Asset = asset!("/assets/styling/auth.css");

/// Role chooser. A `type=worker|customer` query parameter skips the choice
/// and drops the visitor straight into the matching wizard.
#[component]
pub fn RegisterPage(role: Option<String>) -> Element {
    let lang = crate::use_lang()();

    match role.as_deref() {
        Some("worker") => return rsx! { WorkerRegisterPage {} },
        Some("customer") => return rsx! { CustomerRegisterPage {} },
        _ => {}
    }

    rsx! {
        document::Link { rel: "stylesheet", href: AUTH_CSS }

        div { class: "auth_card",
            h1 { {crate::t(lang, "registration.createAccount")} }
            p { {crate::t(lang, "registration.signInToContinue")} }

            div { class: "role_cards",
                a { class: "role_card", href: "/register/customer",
                    h3 { {crate::t(lang, "registration.customer")} }
                    p { class: "hint", {crate::t(lang, "registration.customerDetails")} }
                }
                a { class: "role_card", href: "/register/worker",
                    h3 { {crate::t(lang, "registration.worker")} }
                    p { class: "hint", {crate::t(lang, "registration.workerDetails")} }
                }
            }

            p { class: "hint",
                {crate::t(lang, "registration.haveAccount")}
                " "
                a { href: "/login", {crate::t(lang, "common.login")} }
            }
        }
    }
}

fn category_emoji(category: ServiceCategory) -> &'static str {
    match category {
        ServiceCategory::Electrical => "⚡",
        ServiceCategory::Plumbing => "🔧",
        ServiceCategory::Carpentry => "🪚",
        ServiceCategory::Painting => "🎨",
        ServiceCategory::Ac => "❄️",
        ServiceCategory::Furniture => "🛋️",
        ServiceCategory::Cleaning => "🧹",
        ServiceCategory::Installation => "🔩",
    }
}

#[component]
fn StepDots(current: usize, total: usize) -> Element {
    rsx! {
        div { class: "step_dots",
            for i in 0..total {
                span { class: if i <= current { "step_dot active" } else { "step_dot" } }
            }
        }
    }
}

/// Three steps: personal info, specialty, availability. The draft survives
/// back navigation untouched; only advancing validates.
#[component]
pub fn WorkerRegisterPage() -> Element {
    let mut session_token = use_context::<Signal<Option<String>>>();
    let lang = crate::use_lang()();

    let mut draft = use_signal(WorkerDraft::default);
    let mut wizard = use_signal(|| Wizard::new(WorkerDraft::STEPS));
    let mut error = use_signal(|| None::<crate::wizard::ValidationError>);
    let mut busy = use_signal(Submission::default);
    let mut message = use_signal(|| None::<(bool, String)>);

    let mut on_next = move |_| {
        if busy().in_flight() {
            return;
        }
        let step = wizard().step();
        if let Err(e) = draft().validate_step(step) {
            error.set(Some(e));
            return;
        }
        error.set(None);

        if !wizard().is_last() {
            wizard.write().advance();
            return;
        }

        let profile = match draft().to_profile() {
            Ok(p) => p,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };
        if !busy.write().try_begin() {
            return;
        }
        message.set(None);
        spawn(async move {
            let current = draft();
            match api::sign_up(current.login(), current.provisional_password(), profile).await {
                Ok(session) => {
                    super::persist_session(&session.token);
                    session_token.set(Some(session.token.clone()));
                    message.set(Some((false, crate::t(lang, "worker.registrationSuccess"))));
                    super::redirect_after(session.user_type.dashboard_route(), 1200).await;
                }
                Err(err) => {
                    let fallback = crate::t(lang, "worker.registrationError");
                    message.set(Some((true, super::server_error_message(&err, fallback))));
                    busy.write().finish();
                }
            }
        });
    };

    let step = wizard().step();

    rsx! {
        document::Link { rel: "stylesheet", href: AUTH_CSS }

        div { class: "auth_card wizard",
            StepDots { current: step, total: WorkerDraft::STEPS }

            match step {
                0 => rsx! {
                    h2 { {crate::t(lang, "worker.personalInfo")} }
                    label {
                        {crate::t(lang, "worker.fullName")}
                        input {
                            value: "{draft().full_name}",
                            oninput: move |e| draft.write().full_name = sanitize_name(&e.value()),
                        }
                    }
                    label {
                        {crate::t(lang, "worker.phone")}
                        input {
                            r#type: "tel",
                            value: "{draft().phone}",
                            oninput: move |e| draft.write().phone = sanitize_phone(&e.value()),
                        }
                    }
                    label {
                        {crate::t(lang, "worker.whatsapp")}
                        input {
                            r#type: "tel",
                            value: "{draft().whatsapp}",
                            oninput: move |e| draft.write().whatsapp = sanitize_phone(&e.value()),
                        }
                    }
                    label {
                        {crate::t(lang, "worker.experienceYears")}
                        input {
                            inputmode: "numeric",
                            value: "{draft().experience_years}",
                            oninput: move |e| draft.write().experience_years = sanitize_digits(&e.value()),
                        }
                    }
                },
                1 => rsx! {
                    h2 { {crate::t(lang, "worker.specialtyQuestion")} }
                    div { class: "category_grid",
                        for category in ServiceCategory::ALL {
                            button {
                                class: if draft().category == Some(category) { "category_card selected" } else { "category_card" },
                                onclick: move |_| {
                                    draft.write().category = Some(category);
                                    error.set(None);
                                },
                                span { class: "category_emoji", {category_emoji(category)} }
                                span { {crate::t(lang, &category.label_key())} }
                            }
                        }
                    }
                },
                _ => rsx! {
                    h2 { {crate::t(lang, "worker.availabilityQuestion")} }
                    div { class: "role_cards",
                        button {
                            class: if draft().availability == Some(Availability::Weekends) { "role_card selected" } else { "role_card" },
                            onclick: move |_| {
                                draft.write().availability = Some(Availability::Weekends);
                                error.set(None);
                            },
                            {crate::t(lang, "worker.weekends")}
                        }
                        button {
                            class: if draft().availability == Some(Availability::Weekdays) { "role_card selected" } else { "role_card" },
                            onclick: move |_| {
                                draft.write().availability = Some(Availability::Weekdays);
                                error.set(None);
                            },
                            {crate::t(lang, "worker.weekdays")}
                        }
                    }
                },
            }

            if let Some(e) = error() {
                p { class: "error", {crate::t(lang, e.key())} }
            }
            if let Some((is_error, text)) = message() {
                p { class: if is_error { "error" } else { "success" }, {text} }
            }

            div { class: "form_actions",
                if step > 0 {
                    button {
                        class: "btn",
                        disabled: busy().in_flight(),
                        onclick: move |_| {
                            wizard.write().back();
                            error.set(None);
                        },
                        {crate::t(lang, "common.back")}
                    }
                }
                button {
                    class: "btn primary",
                    disabled: busy().in_flight(),
                    onclick: move |e| on_next(e),
                    {
                        if busy().in_flight() {
                            crate::t(lang, "common.submitting")
                        } else if wizard().is_last() {
                            crate::t(lang, "common.submit")
                        } else {
                            crate::t(lang, "common.next")
                        }
                    }
                }
            }
        }
    }
}

/// Two steps: identity, then account and location.
#[component]
pub fn CustomerRegisterPage() -> Element {
    let mut session_token = use_context::<Signal<Option<String>>>();
    let lang = crate::use_lang()();

    let mut draft = use_signal(CustomerDraft::default);
    let mut wizard = use_signal(|| Wizard::new(CustomerDraft::STEPS));
    let mut error = use_signal(|| None::<crate::wizard::ValidationError>);
    let mut busy = use_signal(Submission::default);
    let mut message = use_signal(|| None::<(bool, String)>);

    let mut on_next = move |_| {
        if busy().in_flight() {
            return;
        }
        let step = wizard().step();
        if let Err(e) = draft().validate_step(step) {
            error.set(Some(e));
            return;
        }
        error.set(None);

        if !wizard().is_last() {
            wizard.write().advance();
            return;
        }

        let profile = match draft().to_profile() {
            Ok(p) => p,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };
        if !busy.write().try_begin() {
            return;
        }
        message.set(None);
        spawn(async move {
            let current = draft();
            match api::sign_up(current.login(), current.password.clone(), profile).await {
                Ok(session) => {
                    super::persist_session(&session.token);
                    session_token.set(Some(session.token.clone()));
                    message.set(Some((false, crate::t(lang, "customer.registrationSuccess"))));
                    super::redirect_after(session.user_type.dashboard_route(), 1200).await;
                }
                Err(err) => {
                    let fallback = crate::t(lang, "customer.registrationError");
                    message.set(Some((true, super::server_error_message(&err, fallback))));
                    busy.write().finish();
                }
            }
        });
    };

    let step = wizard().step();

    rsx! {
        document::Link { rel: "stylesheet", href: AUTH_CSS }

        div { class: "auth_card wizard",
            h1 { {crate::t(lang, "registration.customerForm")} }
            StepDots { current: step, total: CustomerDraft::STEPS }

            match step {
                0 => rsx! {
                    h2 { {crate::t(lang, "customer.accountInfo")} }
                    label {
                        {crate::t(lang, "auth.fullName")}
                        input {
                            value: "{draft().full_name}",
                            oninput: move |e| draft.write().full_name = sanitize_name(&e.value()),
                        }
                    }
                    label {
                        {crate::t(lang, "auth.email")}
                        input {
                            r#type: "email",
                            value: "{draft().email}",
                            oninput: move |e| draft.write().email = e.value(),
                        }
                    }
                    label {
                        {crate::t(lang, "auth.phone")}
                        input {
                            r#type: "tel",
                            value: "{draft().phone}",
                            oninput: move |e| draft.write().phone = sanitize_phone(&e.value()),
                        }
                    }
                },
                _ => rsx! {
                    h2 { {crate::t(lang, "customer.locationInfo")} }
                    label {
                        {crate::t(lang, "auth.password")}
                        input {
                            r#type: "password",
                            value: "{draft().password}",
                            oninput: move |e| draft.write().password = e.value(),
                        }
                    }
                    label {
                        {crate::t(lang, "auth.confirmPassword")}
                        input {
                            r#type: "password",
                            value: "{draft().confirm_password}",
                            oninput: move |e| draft.write().confirm_password = e.value(),
                        }
                    }
                    label {
                        {crate::t(lang, "customer.city")}
                        input {
                            value: "{draft().city}",
                            oninput: move |e| draft.write().city = e.value(),
                        }
                    }
                    label {
                        {crate::t(lang, "customer.address")}
                        input {
                            value: "{draft().address}",
                            oninput: move |e| draft.write().address = e.value(),
                        }
                    }
                },
            }

            if let Some(e) = error() {
                p { class: "error", {crate::t(lang, e.key())} }
            }
            if let Some((is_error, text)) = message() {
                p { class: if is_error { "error" } else { "success" }, {text} }
            }

            div { class: "form_actions",
                if step > 0 {
                    button {
                        class: "btn",
                        disabled: busy().in_flight(),
                        onclick: move |_| {
                            wizard.write().back();
                            error.set(None);
                        },
                        {crate::t(lang, "common.back")}
                    }
                }
                button {
                    class: "btn primary",
                    disabled: busy().in_flight(),
                    onclick: move |e| on_next(e),
                    {
                        if busy().in_flight() {
                            crate::t(lang, "common.submitting")
                        } else if wizard().is_last() {
                            crate::t(lang, "common.submit")
                        } else {
                            crate::t(lang, "common.next")
                        }
                    }
                }
            }
        }
    }
}
