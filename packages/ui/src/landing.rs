use dioxus::prelude::*;

const LANDING_CSS: Asset = asset!("/assets/styling/landing.css");

#[component]
pub fn Hero() -> Element {
    let lang = crate::use_lang()();
    rsx! {
        document::Link { rel: "stylesheet", href: LANDING_CSS }

        div {
            id: "hero",
            div { id: "links",
                h1 { {crate::t(lang, "home.tagline")} }
                p { {crate::t(lang, "home.subtitle")} }

                div { class: "cta_row",
                    a { class: "btn primary", href: "/register/customer", {crate::t(lang, "home.ctaCustomer")} }
                    a { class: "btn", href: "/register/worker", {crate::t(lang, "home.ctaWorker")} }
                }
            }
        }
    }
}

#[component]
pub fn FeaturesSection() -> Element {
    let lang = crate::use_lang()();

    let cards = [
        ("✅", "features.verifiedTitle", "features.verifiedBody"),
        ("⚡", "features.fastTitle", "features.fastBody"),
        ("💰", "features.fairTitle", "features.fairBody"),
    ];

    rsx! {
        document::Link { rel: "stylesheet", href: LANDING_CSS }

        section { class: "features",
            h2 { {crate::t(lang, "features.title")} }
            div { class: "feature_cards",
                for (emoji, title, body) in cards {
                    div { class: "feature_card",
                        span { class: "feature_emoji", {emoji} }
                        h3 { {crate::t(lang, title)} }
                        p { {crate::t(lang, body)} }
                    }
                }
            }
        }
    }
}

#[component]
pub fn HowItWorksSection() -> Element {
    let lang = crate::use_lang()();

    rsx! {
        document::Link { rel: "stylesheet", href: LANDING_CSS }

        section { class: "how_it_works",
            h2 { {crate::t(lang, "howItWorks.title")} }
            ol { class: "steps",
                li { {crate::t(lang, "howItWorks.step1")} }
                li { {crate::t(lang, "howItWorks.step2")} }
                li { {crate::t(lang, "howItWorks.step3")} }
            }
        }
    }
}
