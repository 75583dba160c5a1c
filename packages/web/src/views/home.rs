use dioxus::prelude::*;
use ui::{ChatButton, FeaturesSection, Hero, HowItWorksSection};

#[component]
pub fn Home() -> Element {
    rsx! {
        Hero {}
        FeaturesSection {}
        HowItWorksSection {}
        ChatButton {}
    }
}
