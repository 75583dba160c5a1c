use std::sync::OnceLock;

use dioxus::prelude::*;
use serde_json::Value;

const STORAGE_KEY: &str = "bricol_lang";

static EN_TABLE: OnceLock<Value> = OnceLock::new();
static FR_TABLE: OnceLock<Value> = OnceLock::new();
static AR_TABLE: OnceLock<Value> = OnceLock::new();

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    En,
    Fr,
    Ar,
}

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Fr => "fr",
            Lang::Ar => "ar",
        }
    }

    /// Exact language codes only. Unknown codes return `None` so callers
    /// can keep the current language instead of silently resetting it.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "en" => Some(Lang::En),
            "fr" => Some(Lang::Fr),
            "ar" => Some(Lang::Ar),
            _ => None,
        }
    }

    /// Loose match for browser locales like "fr-FR" or "ar-MA".
    /// Anything unrecognized lands on English.
    pub fn from_locale(locale: &str) -> Self {
        let lower = locale.to_ascii_lowercase();
        if lower.starts_with("ar") {
            Lang::Ar
        } else if lower.starts_with("fr") {
            Lang::Fr
        } else {
            Lang::En
        }
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Lang::Ar)
    }

    pub fn dir(self) -> &'static str {
        if self.is_rtl() {
            "rtl"
        } else {
            "ltr"
        }
    }

    /// Cycle order used by the language switcher: en → fr → ar → en.
    pub fn next(self) -> Self {
        match self {
            Lang::En => Lang::Fr,
            Lang::Fr => Lang::Ar,
            Lang::Ar => Lang::En,
        }
    }
}

fn table(lang: Lang) -> &'static Value {
    let (cell, src) = match lang {
        Lang::En => (&EN_TABLE, include_str!("translations/en.json")),
        Lang::Fr => (&FR_TABLE, include_str!("translations/fr.json")),
        Lang::Ar => (&AR_TABLE, include_str!("translations/ar.json")),
    };
    cell.get_or_init(|| serde_json::from_str(src).unwrap_or(Value::Null))
}

/// Walk a nested JSON object with a dotted key like "errors.invalidPhone".
fn walk<'a>(root: &'a Value, key: &str) -> Option<&'a str> {
    let mut node = root;
    for part in key.split('.') {
        node = node.get(part)?;
    }
    node.as_str()
}

/// Translate a key for a given language. Falls back to English if the
/// language is missing the key, and to the key itself if English is too.
pub fn t(lang: Lang, key: &str) -> String {
    if let Some(s) = walk(table(lang), key) {
        return s.to_string();
    }
    if let Some(s) = walk(table(Lang::En), key) {
        return s.to_string();
    }
    key.to_string()
}

/// Translate and substitute `{name}`-style placeholders. Placeholders
/// without a matching parameter are left in place.
pub fn t_with(lang: Lang, key: &str, params: &[(&str, &str)]) -> String {
    let mut out = t(lang, key);
    for (name, value) in params {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}

/// Provide `Signal<Lang>` to the component tree, defaulting to English.
#[component]
pub fn I18nProvider(children: Element) -> Element {
    let mut lang = use_signal(|| Lang::En);
    use_context_provider(|| lang);

    // Best-effort: load from localStorage or browser language after mount.
    use_effect(move || {
        spawn(async move {
            let js = format!(
                r#"
                (function(){{
                  try {{
                    const saved = localStorage.getItem("{STORAGE_KEY}");
                    if(saved && typeof saved === "string" && saved.length > 0) return "saved:" + saved;
                  }} catch(e) {{}}
                  try {{ return "locale:" + (navigator.language || "en"); }} catch(e) {{}}
                  return "locale:en";
                }})()
                "#
            );
            if let Ok(v) = document::eval(&js).await {
                if let Some(code) = v.as_str() {
                    let next = match code.split_once(':') {
                        Some(("saved", code)) => Lang::from_code(code),
                        Some(("locale", locale)) => Some(Lang::from_locale(locale)),
                        _ => None,
                    };
                    if let Some(next) = next {
                        lang.set(next);
                        apply_document_lang(next);
                    }
                }
            }
        });
    });

    rsx! { {children} }
}

pub fn use_lang() -> Signal<Lang> {
    if let Some(sig) = try_use_context::<Signal<Lang>>() {
        return sig;
    }

    // Fallback for SSR or mis-ordered providers to avoid panics in production.
    eprintln!("startup: missing I18nProvider context, using local Lang::En signal");
    use_signal(|| Lang::En)
}

pub fn set_lang(lang: Lang) {
    let mut s = use_lang();
    s.set(lang);
    persist_lang(lang);
    apply_document_lang(lang);
}

/// Switch language by code. Unknown codes are ignored.
pub fn change_language(code: &str) {
    if let Some(lang) = Lang::from_code(code) {
        set_lang(lang);
    }
}

/// Advance to the next language in the en → fr → ar cycle.
pub fn toggle_language() {
    let current = use_lang()();
    set_lang(current.next());
}

fn persist_lang(lang: Lang) {
    spawn(async move {
        let _ = document::eval(&format!(
            r#"(function(){{ try {{ localStorage.setItem("{STORAGE_KEY}","{}"); }} catch(e) {{}} return ""; }})()"#,
            lang.code()
        ))
        .await;
    });
}

/// Mirror the active language onto the document so CSS and the browser
/// pick up direction and font choices: `<html lang dir>` plus a
/// `lang-xx` class on `<body>`.
fn apply_document_lang(lang: Lang) {
    spawn(async move {
        let _ = document::eval(&format!(
            r#"
            (function(){{
              try {{
                document.documentElement.setAttribute("lang", "{code}");
                document.documentElement.setAttribute("dir", "{dir}");
                var kept = document.body.className
                  .split(" ")
                  .filter(function(c){{ return c.indexOf("lang-") !== 0 && c.length > 0; }});
                kept.push("lang-{code}");
                document.body.className = kept.join(" ");
              }} catch(e) {{}}
              return "";
            }})()
            "#,
            code = lang.code(),
            dir = lang.dir()
        ))
        .await;
    });
}

/// Single cycling button: shows the current language code, clicking moves
/// to the next one.
#[component]
pub fn LanguageSwitcher() -> Element {
    let lang_sig = use_lang();
    let lang = lang_sig();

    rsx! {
        button {
            class: "btn lang_switcher",
            title: t(lang, "lang.label"),
            onclick: move |_| toggle_language(),
            "🌐 "
            span { class: "lang_code", {lang.code().to_uppercase()} }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_nested_keys() {
        assert_eq!(t(Lang::En, "errors.invalidPhone"), "Enter a valid phone number (8 to 15 digits)");
        assert_eq!(t(Lang::Fr, "common.back"), "Retour");
        assert_eq!(t(Lang::Ar, "common.back"), "رجوع");
    }

    #[test]
    fn falls_back_to_english_then_key() {
        // Missing everywhere returns the key itself.
        assert_eq!(t(Lang::Fr, "missing.key"), "missing.key");
        assert_eq!(t(Lang::Ar, "nosuch"), "nosuch");
    }

    #[test]
    fn substitutes_parameters() {
        let s = t_with(Lang::En, "dashboard.welcome", &[("name", "Yassine")]);
        assert_eq!(s, "Welcome back, Yassine!");
    }

    #[test]
    fn leaves_unmatched_placeholders_in_place() {
        let s = t_with(Lang::En, "dashboard.welcome", &[("nope", "x")]);
        assert_eq!(s, "Welcome back, {name}!");
    }

    #[test]
    fn diagnosis_fills_all_parameters() {
        let s = t_with(
            Lang::Fr,
            "ai.diagnosis",
            &[
                ("category", "Plomberie"),
                ("workers", "12"),
                ("min", "150"),
                ("max", "400"),
            ],
        );
        assert!(s.contains("Plomberie"));
        assert!(s.contains("12"));
        assert!(s.contains("150-400") || s.contains("150") && s.contains("400"));
        assert!(!s.contains('{'));
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert_eq!(Lang::from_code("de"), None);
        assert_eq!(Lang::from_code("fr"), Some(Lang::Fr));
        assert_eq!(Lang::from_code("AR"), Some(Lang::Ar));
    }

    #[test]
    fn locale_prefix_matching() {
        assert_eq!(Lang::from_locale("ar-MA"), Lang::Ar);
        assert_eq!(Lang::from_locale("fr-FR"), Lang::Fr);
        assert_eq!(Lang::from_locale("en-US"), Lang::En);
        assert_eq!(Lang::from_locale("de-DE"), Lang::En);
    }

    #[test]
    fn toggle_cycle_covers_all_languages() {
        assert_eq!(Lang::En.next(), Lang::Fr);
        assert_eq!(Lang::Fr.next(), Lang::Ar);
        assert_eq!(Lang::Ar.next(), Lang::En);
    }

    #[test]
    fn only_arabic_is_rtl() {
        assert!(Lang::Ar.is_rtl());
        assert_eq!(Lang::Ar.dir(), "rtl");
        assert!(!Lang::Fr.is_rtl());
        assert_eq!(Lang::En.dir(), "ltr");
    }

    fn collect_keys(prefix: &str, node: &Value, out: &mut Vec<String>) {
        match node {
            Value::Object(map) => {
                for (k, v) in map {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    collect_keys(&key, v, out);
                }
            }
            _ => out.push(prefix.to_string()),
        }
    }

    #[test]
    fn all_tables_cover_the_english_key_set() {
        let mut keys = Vec::new();
        collect_keys("", table(Lang::En), &mut keys);
        assert!(keys.len() > 80, "english table looks truncated");

        for lang in [Lang::Fr, Lang::Ar] {
            for key in &keys {
                let s = walk(table(lang), key);
                assert!(
                    s.map(|s| !s.is_empty()).unwrap_or(false),
                    "{} missing or empty in {}",
                    key,
                    lang.code()
                );
            }
        }
    }
}
