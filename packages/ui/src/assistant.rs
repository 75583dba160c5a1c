//! Scripted diagnosis assistant. There is no model behind it: replies are
//! pure functions of the user's message and the active language, with the
//! variant chosen by an injected picker so tests stay deterministic.

use std::sync::atomic::{AtomicUsize, Ordering};

use api::types::ServiceCategory;
use dioxus::prelude::*;

use crate::i18n::{t, t_with, use_lang, Lang};

const CHAT_CSS: Asset = asset!("/assets/styling/chat.css");

/// Strategy for choosing between equivalent reply variants.
pub trait ReplyPicker {
    fn pick(&self, options: usize) -> usize;
}

/// Round-robins through the variants. Good enough for a scripted bot and
/// it keeps the widget free of a PRNG dependency.
#[derive(Default)]
pub struct RotatingPicker {
    counter: AtomicUsize,
}

impl ReplyPicker for RotatingPicker {
    fn pick(&self, options: usize) -> usize {
        if options == 0 {
            return 0;
        }
        self.counter.fetch_add(1, Ordering::Relaxed) % options
    }
}

/// Always picks the same variant.
pub struct FixedPicker(pub usize);

impl ReplyPicker for FixedPicker {
    fn pick(&self, options: usize) -> usize {
        if options == 0 {
            0
        } else {
            self.0 % options
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosisReply {
    pub text: String,
    pub category: ServiceCategory,
    pub price_min: u32,
    pub price_max: u32,
    pub suggested_workers: u32,
    pub quick_replies: Vec<String>,
}

/// Guess the trade from keywords in any of the three supported languages.
/// Unrecognized descriptions fall back to electrical, the most common
/// request on the platform.
pub fn infer_category(text: &str) -> ServiceCategory {
    let lower = text.to_lowercase();
    let rules: &[(ServiceCategory, &[&str])] = &[
        (
            ServiceCategory::Plumbing,
            &["plumb", "plomb", "fuite", "robinet", "leak", "pipe", "سباكة", "تسرب", "صنبور"],
        ),
        (
            ServiceCategory::Electrical,
            &["electr", "électr", "courant", "prise", "wire", "outlet", "كهرباء", "ضو"],
        ),
        (
            ServiceCategory::Carpentry,
            &["wood", "bois", "menuis", "carpent", "door", "porte", "نجارة", "خشب", "باب"],
        ),
        (
            ServiceCategory::Painting,
            &["paint", "peintur", "mur", "wall", "دهان", "صباغة", "حائط"],
        ),
        (
            ServiceCategory::Ac,
            &["clim", "air cond", "ac ", "froid", "تكييف", "مكيف"],
        ),
        (
            ServiceCategory::Furniture,
            &["moving", "déménag", "meuble", "furniture", "نقل", "أثاث"],
        ),
        (
            ServiceCategory::Cleaning,
            &["clean", "nettoy", "ménage", "تنظيف", "نظافة"],
        ),
        (
            ServiceCategory::Installation,
            &["install", "montage", "mount", "تركيب"],
        ),
    ];

    for (category, keywords) in rules {
        if keywords.iter().any(|k| lower.contains(k)) {
            return *category;
        }
    }
    ServiceCategory::Electrical
}

/// Estimated job cost in dirhams per category.
fn price_range(category: ServiceCategory) -> (u32, u32) {
    match category {
        ServiceCategory::Electrical => (200, 500),
        ServiceCategory::Plumbing => (150, 400),
        ServiceCategory::Carpentry => (250, 700),
        ServiceCategory::Painting => (300, 900),
        ServiceCategory::Ac => (250, 600),
        ServiceCategory::Furniture => (200, 800),
        ServiceCategory::Cleaning => (100, 300),
        ServiceCategory::Installation => (150, 450),
    }
}

fn workers_nearby(category: ServiceCategory) -> u32 {
    match category {
        ServiceCategory::Electrical => 12,
        ServiceCategory::Plumbing => 9,
        ServiceCategory::Carpentry => 6,
        ServiceCategory::Painting => 8,
        ServiceCategory::Ac => 5,
        ServiceCategory::Furniture => 7,
        ServiceCategory::Cleaning => 11,
        ServiceCategory::Installation => 10,
    }
}

const REPLY_TEMPLATES: [&str; 2] = ["ai.diagnosis", "ai.diagnosisAlt"];

/// Build the scripted diagnosis for one user message.
pub fn diagnose(input: &str, lang: Lang, picker: &dyn ReplyPicker) -> DiagnosisReply {
    let category = infer_category(input);
    let (min, max) = price_range(category);
    let workers = workers_nearby(category);
    let template = REPLY_TEMPLATES[picker.pick(REPLY_TEMPLATES.len())];

    let text = t_with(
        lang,
        template,
        &[
            ("category", &t(lang, &category.label_key())),
            ("workers", &workers.to_string()),
            ("min", &min.to_string()),
            ("max", &max.to_string()),
        ],
    );

    DiagnosisReply {
        text,
        category,
        price_min: min,
        price_max: max,
        suggested_workers: workers,
        quick_replies: vec![
            t(lang, "ai.quickShow"),
            t(lang, "ai.quickQuestions"),
            t(lang, "ai.quickPrice"),
        ],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq)]
struct ChatMessage {
    sender: Sender,
    text: String,
    quick_replies: Vec<String>,
}

static WIDGET_PICKER: RotatingPicker = RotatingPicker {
    counter: AtomicUsize::new(0),
};

/// Slide-over chat panel. The typing indicator runs for 1.5s before the
/// scripted reply lands, to feel like someone is answering.
#[component]
pub fn ChatWidget(on_close: EventHandler<()>) -> Element {
    let lang_sig = use_lang();
    let lang = lang_sig();

    let mut messages = use_signal(|| {
        vec![ChatMessage {
            sender: Sender::Bot,
            text: t(lang, "ai.welcome"),
            quick_replies: Vec::new(),
        }]
    });
    let mut input = use_signal(String::new);
    let mut typing = use_signal(|| false);

    let mut send = move |text: String| {
        let trimmed = text.trim().to_string();
        if trimmed.is_empty() || typing() {
            return;
        }
        messages.write().push(ChatMessage {
            sender: Sender::User,
            text: trimmed.clone(),
            quick_replies: Vec::new(),
        });
        input.set(String::new());
        typing.set(true);

        spawn(async move {
            gloo_timers::future::TimeoutFuture::new(1500).await;
            let reply = diagnose(&trimmed, lang, &WIDGET_PICKER);
            messages.write().push(ChatMessage {
                sender: Sender::Bot,
                text: reply.text,
                quick_replies: reply.quick_replies,
            });
            typing.set(false);
        });
    };

    let dir = lang.dir();

    rsx! {
        document::Link { rel: "stylesheet", href: CHAT_CSS }

        div { class: "chat_overlay", dir: "{dir}",
            div { class: "chat_backdrop", onclick: move |_| on_close.call(()) }
            div { class: "chat_panel",
                header { class: "chat_header",
                    div {
                        h2 { {t(lang, "ai.chatTitle")} }
                        p { class: "hint", {t(lang, "ai.chatSubtitle")} }
                    }
                    button { class: "chat_close", onclick: move |_| on_close.call(()), "✕" }
                }

                div { class: "chat_messages",
                    for message in messages() {
                        div {
                            class: if message.sender == Sender::Bot { "chat_bubble bot" } else { "chat_bubble user" },
                            p { {message.text.clone()} }
                            if !message.quick_replies.is_empty() {
                                div { class: "chat_quick_replies",
                                    for reply in message.quick_replies.clone() {
                                        QuickReply { text: reply, on_pick: move |text| send(text) }
                                    }
                                }
                            }
                        }
                    }
                    if typing() {
                        div { class: "chat_bubble bot typing", span {} span {} span {} }
                    }
                }

                div { class: "chat_input_row",
                    input {
                        class: "chat_input",
                        r#type: "text",
                        placeholder: t(lang, "ai.typeHere"),
                        value: "{input}",
                        oninput: move |e| input.set(e.value()),
                        onkeydown: move |e| {
                            if e.key() == Key::Enter {
                                send(input());
                            }
                        },
                    }
                    button {
                        class: "btn primary chat_send",
                        disabled: typing(),
                        onclick: move |_| send(input()),
                        "➤"
                    }
                }
            }
        }
    }
}

#[component]
fn QuickReply(text: String, on_pick: EventHandler<String>) -> Element {
    let value = text.clone();
    rsx! {
        button {
            class: "chat_quick_reply",
            onclick: move |_| on_pick.call(value.clone()),
            {text}
        }
    }
}

/// Floating launcher in the corner of every page.
#[component]
pub fn ChatButton() -> Element {
    let lang_sig = use_lang();
    let lang = lang_sig();
    let mut open = use_signal(|| false);

    rsx! {
        document::Link { rel: "stylesheet", href: CHAT_CSS }

        button {
            class: "chat_launcher",
            onclick: move |_| open.set(true),
            "💬 "
            {t(lang, "ai.chatTitle")}
        }

        if open() {
            ChatWidget { on_close: move |_| open.set(false) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_inference_spans_languages() {
        assert_eq!(infer_category("ma prise ne marche plus"), ServiceCategory::Electrical);
        assert_eq!(infer_category("the kitchen pipe is leaking"), ServiceCategory::Plumbing);
        assert_eq!(infer_category("عندي تسرب في الحمام"), ServiceCategory::Plumbing);
        assert_eq!(infer_category("باب الخشب مكسور"), ServiceCategory::Carpentry);
    }

    #[test]
    fn unknown_descriptions_default_to_electrical() {
        assert_eq!(infer_category("???"), ServiceCategory::Electrical);
    }

    #[test]
    fn diagnosis_is_fully_localized() {
        let reply = diagnose("fuite sous l'évier", Lang::Fr, &FixedPicker(0));
        assert_eq!(reply.category, ServiceCategory::Plumbing);
        assert!(reply.text.contains("Plomberie"));
        assert!(reply.text.contains(&reply.suggested_workers.to_string()));
        assert!(!reply.text.contains('{'));
        assert_eq!(reply.quick_replies.len(), 3);
    }

    #[test]
    fn picker_chooses_the_variant() {
        let a = diagnose("leak", Lang::En, &FixedPicker(0));
        let b = diagnose("leak", Lang::En, &FixedPicker(1));
        assert_ne!(a.text, b.text);
        // Same diagnosis either way, only the phrasing differs.
        assert_eq!(a.category, b.category);
        assert_eq!((a.price_min, a.price_max), (b.price_min, b.price_max));
    }

    #[test]
    fn rotating_picker_cycles() {
        let picker = RotatingPicker::default();
        assert_eq!(picker.pick(2), 0);
        assert_eq!(picker.pick(2), 1);
        assert_eq!(picker.pick(2), 0);
        assert_eq!(picker.pick(0), 0);
    }
}
