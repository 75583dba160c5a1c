use api::types::Role;
use dioxus::prelude::*;

use crate::wizard::Submission;

mod register;
pub use register::{CustomerRegisterPage, RegisterPage, WorkerRegisterPage};

const AUTH_CSS: Asset = asset!("/assets/styling/auth.css");

const SESSION_KEY: &str = "bricol_session";

/// Provide a best-effort bootstrap that loads a saved session token (if
/// present) and stores it into the shared `Signal<Option<String>>` context.
///
/// Platforms should provide this context at the app root:
/// `use_context_provider(|| use_signal(|| None::<String>));`
#[component]
pub fn AuthBootstrap() -> Element {
    let mut session_token = use_context::<Signal<Option<String>>>();

    // Runs after mount to avoid SSR/hydration mismatches.
    use_effect(move || {
        spawn(async move {
            if let Ok(v) = document::eval(&format!(
                r#"(function(){{
                    try {{ return localStorage.getItem("{SESSION_KEY}") || ""; }}
                    catch(e) {{ return ""; }}
                }})()"#,
            ))
            .await
            {
                if let Some(saved) = v.as_str() {
                    if !saved.trim().is_empty() {
                        session_token.set(Some(saved.to_string()));
                    }
                }
            }
        });
    });

    rsx! {
        document::Link { rel: "stylesheet", href: AUTH_CSS }
    }
}

#[component]
pub fn AuthGate(children: Element) -> Element {
    let session_token = use_context::<Signal<Option<String>>>();
    let lang = crate::use_lang()();

    if session_token().is_none() {
        return rsx! {
            div { class: "auth_gate",
                h2 { {crate::t(lang, "auth.signInRequired")} }
                p { {crate::t(lang, "auth.signInRequiredBody")} }
                a { class: "btn", href: "/login", {crate::t(lang, "auth.goToLogin")} }
            }
        };
    }

    rsx! {
        {children}
    }
}

#[component]
pub fn SignOutButton() -> Element {
    let mut session_token = use_context::<Signal<Option<String>>>();
    let lang = crate::use_lang()();
    rsx! {
        button {
            class: "btn",
            onclick: move |_| {
                session_token.set(None);
                spawn(async move {
                    let _ = document::eval(&format!(
                            r#"(function(){{ try {{ localStorage.removeItem("{SESSION_KEY}"); }} catch(e) {{}} return ""; }})()"#,
                        ))
                        .await;
                });
            },
            {crate::t(lang, "nav.logout")}
        }
    }
}

/// Role choice first, then credentials. Customers sign in with an email,
/// workers with the phone number they registered with.
#[component]
pub fn LoginPage() -> Element {
    let mut session_token = use_context::<Signal<Option<String>>>();
    let lang = crate::use_lang()();

    let mut role = use_signal(|| None::<Role>);
    let mut login = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut busy = use_signal(Submission::default);
    let mut message = use_signal(|| None::<(bool, String)>);

    let submit = move |_| {
        if !busy.write().try_begin() {
            return;
        }
        message.set(None);
        spawn(async move {
            match api::sign_in(login(), password()).await {
                Ok(session) => {
                    persist_session(&session.token);
                    session_token.set(Some(session.token.clone()));
                    message.set(Some((false, crate::t(lang, "auth.loginSuccess"))));
                    redirect_after(session.user_type.dashboard_route(), 1200).await;
                }
                Err(err) => {
                    let fallback = crate::t(lang, "auth.loginError");
                    message.set(Some((true, server_error_message(&err, fallback))));
                    busy.write().finish();
                }
            }
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: AUTH_CSS }

        div { class: "auth_card",
            h1 { {crate::t(lang, "common.login")} }

            match role() {
                None => rsx! {
                    p { {crate::t(lang, "auth.chooseRole")} }
                    div { class: "role_cards",
                        button {
                            class: "role_card",
                            onclick: move |_| role.set(Some(Role::Customer)),
                            h3 { {crate::t(lang, "auth.customerLogin")} }
                            p { class: "hint", {crate::t(lang, "auth.customerLoginHint")} }
                        }
                        button {
                            class: "role_card",
                            onclick: move |_| role.set(Some(Role::Worker)),
                            h3 { {crate::t(lang, "auth.workerLogin")} }
                            p { class: "hint", {crate::t(lang, "auth.workerLoginHint")} }
                        }
                    }
                    p { class: "hint",
                        {crate::t(lang, "auth.noAccount")}
                        " "
                        a { href: "/register", {crate::t(lang, "auth.createOne")} }
                    }
                },
                Some(active) => rsx! {
                    div { class: "auth_form",
                        label {
                            {
                                if active == Role::Customer {
                                    crate::t(lang, "auth.email")
                                } else {
                                    crate::t(lang, "auth.workerLoginLabel")
                                }
                            }
                            input {
                                r#type: if active == Role::Customer { "email" } else { "tel" },
                                value: "{login}",
                                oninput: move |e| {
                                    if active == Role::Worker {
                                        login.set(crate::wizard::sanitize_phone(&e.value()));
                                    } else {
                                        login.set(e.value());
                                    }
                                },
                            }
                        }
                        label {
                            {crate::t(lang, "auth.password")}
                            input {
                                r#type: "password",
                                value: "{password}",
                                oninput: move |e| password.set(e.value()),
                            }
                        }

                        if let Some((is_error, text)) = message() {
                            p { class: if is_error { "error" } else { "success" }, {text} }
                        }

                        div { class: "form_actions",
                            button {
                                class: "btn",
                                onclick: move |_| {
                                    role.set(None);
                                    message.set(None);
                                },
                                {crate::t(lang, "common.back")}
                            }
                            button {
                                class: "btn primary",
                                disabled: busy().in_flight(),
                                onclick: submit,
                                {
                                    if busy().in_flight() {
                                        crate::t(lang, "common.loading")
                                    } else {
                                        crate::t(lang, "common.login")
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

/// Persist the session token so a reload stays signed in.
pub(crate) fn persist_session(token: &str) {
    let js = format!(
        r#"(function(){{ try {{ localStorage.setItem("{SESSION_KEY}", "{}"); }} catch(e) {{}} return ""; }})()"#,
        js_escape(token)
    );
    spawn(async move {
        let _ = document::eval(&js).await;
    });
}

/// Leave the success message on screen for a beat, then navigate.
pub(crate) async fn redirect_after(route: &str, millis: u32) {
    gloo_timers::future::TimeoutFuture::new(millis).await;
    let _ = document::eval(&format!(
        "window.location.assign('{}')",
        js_escape(route)
    ))
    .await;
}

pub(crate) fn js_escape(s: &str) -> String {
    // Minimal JS string escape for embedding into a quoted string.
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\'', "\\'")
}

/// The server returns targeted messages ("This account is already
/// registered"); show those inline and keep the generic text only for
/// errors that carry no message. The transport may wrap the message in
/// its own lead-in, which gets stripped here.
pub(crate) fn server_error_message(err: &ServerFnError, fallback: String) -> String {
    let raw = err.to_string();
    let msg = raw
        .rsplit("error running server function:")
        .next()
        .unwrap_or("")
        .trim();
    if msg.is_empty() {
        fallback
    } else {
        msg.to_string()
    }
}
