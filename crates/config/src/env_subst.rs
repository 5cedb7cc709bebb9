/// Replace `${ENV_VAR}` placeholders in the raw config text.
///
/// Unresolvable variables are left as-is.
pub fn substitute_env(input: &str) -> String {
    substitute_env_with(input, |name| std::env::var(name).ok())
}

/// Replace `${ENV_VAR}` placeholders using a custom lookup function.
pub(crate) fn substitute_env_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            // Unterminated placeholder, copy the tail verbatim.
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        match lookup(name).filter(|_| !name.is_empty()) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[start..start + 2 + end + 1]),
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "BOT_TOKEN" => Some("123:ABC".to_string()),
            "COBALT_HOST" => Some("cobalt.local".to_string()),
            _ => None,
        }
    }

    #[test]
    fn substitutes_known_vars() {
        assert_eq!(
            substitute_env_with("token = \"${BOT_TOKEN}\"", lookup),
            "token = \"123:ABC\""
        );
        assert_eq!(
            substitute_env_with("https://${COBALT_HOST}/${COBALT_HOST}", lookup),
            "https://cobalt.local/cobalt.local"
        );
    }

    #[test]
    fn leaves_unknown_and_empty_names() {
        assert_eq!(substitute_env_with("${NOPE}", lookup), "${NOPE}");
        assert_eq!(substitute_env_with("a${}b", lookup), "a${}b");
    }

    #[test]
    fn unterminated_placeholder_is_literal() {
        assert_eq!(
            substitute_env_with("x=${BOT_TOKEN", lookup),
            "x=${BOT_TOKEN"
        );
    }

    #[test]
    fn no_placeholders() {
        assert_eq!(substitute_env("plain text"), "plain text");
    }
}
