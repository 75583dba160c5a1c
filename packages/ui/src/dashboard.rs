use dioxus::prelude::*;

const AUTH_CSS: Asset = asset!("/assets/styling/auth.css");

#[component]
pub fn CustomerDashboardPage() -> Element {
    let session_token = use_context::<Signal<Option<String>>>();
    let token = session_token().unwrap_or_default();
    let lang = crate::use_lang()();

    let me = use_resource(move || {
        let token = token.clone();
        async move {
            if token.trim().is_empty() {
                return Err(ServerFnError::new("Not signed in"));
            }
            api::auth_me(token).await
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: AUTH_CSS }

        crate::AuthGate {
            div { class: "dashboard",
                h1 { {crate::t(lang, "dashboard.customerTitle")} }
                match me() {
                    None => rsx! {
                        p { {crate::t(lang, "common.loading")} }
                    },
                    Some(Err(_)) => rsx! {
                        p { class: "error", {crate::t(lang, "auth.signedOut")} }
                        a { class: "btn", href: "/login", {crate::t(lang, "auth.goToLogin")} }
                    },
                    Some(Ok(me)) => rsx! {
                        p { class: "welcome",
                            {crate::t_with(lang, "dashboard.welcome", &[("name", &me.user.full_name)])}
                        }
                        if let Some(city) = me.city {
                            p { class: "hint", {format!("{}: {city}", crate::t(lang, "customer.city"))} }
                        }
                        p { class: "hint", {crate::t(lang, "dashboard.customerHint")} }
                        crate::SignOutButton {}
                    },
                }
            }
        }

        crate::ChatButton {}
    }
}

#[component]
pub fn WorkerDashboardPage() -> Element {
    let session_token = use_context::<Signal<Option<String>>>();
    let token = session_token().unwrap_or_default();
    let lang = crate::use_lang()();

    let me = use_resource(move || {
        let token = token.clone();
        async move {
            if token.trim().is_empty() {
                return Err(ServerFnError::new("Not signed in"));
            }
            api::auth_me(token).await
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: AUTH_CSS }

        crate::AuthGate {
            div { class: "dashboard",
                h1 { {crate::t(lang, "dashboard.workerTitle")} }
                match me() {
                    None => rsx! {
                        p { {crate::t(lang, "common.loading")} }
                    },
                    Some(Err(_)) => rsx! {
                        p { class: "error", {crate::t(lang, "auth.signedOut")} }
                        a { class: "btn", href: "/login", {crate::t(lang, "auth.goToLogin")} }
                    },
                    Some(Ok(me)) => rsx! {
                        p { class: "welcome",
                            {crate::t_with(lang, "dashboard.welcome", &[("name", &me.user.full_name)])}
                        }
                        if let Some(category) = me.category {
                            p { class: "hint", {crate::t(lang, &category.label_key())} }
                        }
                        if let Some(availability) = me.availability {
                            p { class: "hint",
                                {
                                    match availability {
                                        api::types::Availability::Weekends => crate::t(lang, "worker.weekends"),
                                        api::types::Availability::Weekdays => crate::t(lang, "worker.weekdays"),
                                    }
                                }
                            }
                        }
                        p { class: "hint", {crate::t(lang, "dashboard.workerHint")} }
                        crate::SignOutButton {}
                    },
                }
            }
        }
    }
}
