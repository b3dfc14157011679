use std::fmt;

/// Strips the helper item and closure suffixes from a path captured by [`function_path!`][crate::function_path].
#[doc(hidden)]
pub const fn strip_function_path(name: &'static str) -> &'static str {
    // `::__f`
    let mut name = name.split_at(name.len() - 5).0;

    // Closures, including the one every async fn body is wrapped in, add `::{{closure}}`.
    while name.len() > 13 && ends_with(name, "::{{closure}}") {
        name = name.split_at(name.len() - 13).0;
    }
    name
}

const fn ends_with(name: &str, suffix: &str) -> bool {
    let name = name.as_bytes();
    let suffix = suffix.as_bytes();
    if suffix.len() > name.len() {
        return false;
    }
    let offset = name.len() - suffix.len();
    let mut index = 0;
    while index < suffix.len() {
        if name[offset + index] != suffix[index] {
            return false;
        }
        index += 1;
    }
    true
}

/// Message parts joined without a separator.
///
/// Each part is rendered with its [`Display`][fmt::Display] implementation.
#[derive(Clone, Copy)]
pub struct Concat<'a>(pub &'a [&'a dyn fmt::Display]);

impl fmt::Display for Concat<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|part| part.fmt(f))
    }
}

impl fmt::Debug for Concat<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Concat").field(&self.to_string()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Concat, strip_function_path};

    #[test]
    fn strips_helper_suffix() {
        assert_eq!(strip_function_path("app::server::handle::__f"), "app::server::handle");
    }

    #[test]
    fn strips_closure_suffixes() {
        assert_eq!(
            strip_function_path("app::run::{{closure}}::{{closure}}::__f"),
            "app::run"
        );
    }

    #[test]
    fn function_path_names_enclosing_function() {
        let path = crate::function_path!();
        assert_eq!(
            path,
            "pipelog::macro_helpers::tests::function_path_names_enclosing_function"
        );
    }

    #[test]
    fn concatenates_without_separator() {
        let parts: [&dyn std::fmt::Display; 4] = [&"Hello ", &"World", &42, &'!'];
        assert_eq!(Concat(&parts).to_string(), "Hello World42!");
        assert_eq!(Concat(&[]).to_string(), "");
    }
}
