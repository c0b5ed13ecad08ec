//! Localized strings
//!
//! User-facing text lives in Fluent resources under `locales/`. Lookups fall
//! back to the message key itself so a missing string is visible rather than
//! silently empty.

use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use once_cell::sync::Lazy;
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;

/// English (US) resource, the fallback for every locale
const EN_US: &str = include_str!("../locales/en-US.ftl");

static BUNDLE: Lazy<FluentBundle<FluentResource>> = Lazy::new(|| {
    let langid: LanguageIdentifier = "en-US".parse().unwrap_or_default();
    let mut bundle = FluentBundle::new_concurrent(vec![langid]);
    // Toasts and menu labels are plain strings; bidi isolation marks would
    // leak into host text.
    bundle.set_use_isolating(false);

    let resource = match FluentResource::try_new(EN_US.to_string()) {
        Ok(resource) => resource,
        Err((resource, errors)) => {
            warn!(errors = errors.len(), "en-US resource has parse errors");
            resource
        }
    };
    if let Err(errors) = bundle.add_resource(resource) {
        warn!(errors = errors.len(), "failed to add en-US resource");
    }
    bundle
});

/// Translate a message key
pub fn t(key: &str) -> String {
    translate(key, None)
}

/// Translate a message key with named arguments
pub fn t_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut fluent_args = FluentArgs::new();
    for (name, value) in args {
        fluent_args.set(*name, *value);
    }
    translate(key, Some(&fluent_args))
}

fn translate(key: &str, args: Option<&FluentArgs<'_>>) -> String {
    let Some(message) = BUNDLE.get_message(key) else {
        debug!(key, "missing translation");
        return key.to_string();
    };
    let Some(pattern) = message.value() else {
        return key.to_string();
    };

    let mut errors = Vec::new();
    let value = BUNDLE.format_pattern(pattern, args, &mut errors);
    if !errors.is_empty() {
        debug!(key, errors = errors.len(), "translation formatted with errors");
    }
    value.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_message() {
        assert_eq!(t("menu-set-nickname"), "Set Custom Nickname");
        assert_eq!(t("toast-nickname-removed"), "Nickname removed");
    }

    #[test]
    fn test_message_with_args() {
        assert_eq!(
            t_args("toast-imported", &[("count", "3")]),
            "Imported 3 nicknames"
        );
        assert_eq!(
            t_args("toast-nickname-set", &[("nickname", "Nick")]),
            "Nickname set to \"Nick\""
        );
    }

    #[test]
    fn test_missing_key_falls_back_to_key() {
        assert_eq!(t("no-such-key"), "no-such-key");
    }
}
