use crate::core::env::Environment;

/// Expands `$NAME` environment references in a token list.
///
/// A token that starts with `$` is treated as a whole-token reference: if
/// the variable is defined the token becomes its value verbatim (no
/// re-tokenization), otherwise the token is kept as-is, `$` included. Any
/// other token has every embedded `$<name>` occurrence replaced.
///
/// Embedded substitution is a single left-to-right pass that matches the
/// longest defined variable name at each `$`, so when one name is a prefix
/// of another (`HOME` / `HOMEPATH`) the longer name wins, and substituted
/// values are never expanded again. The output always has exactly as many
/// tokens as the input.
pub fn expand_tokens(tokens: &[String], env: &dyn Environment) -> Vec<String> {
    let mut vars = env.vars();
    vars.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    tokens
        .iter()
        .map(|token| expand_token(token, env, &vars))
        .collect()
}

fn expand_token(token: &str, env: &dyn Environment, vars: &[(String, String)]) -> String {
    if let Some(name) = token.strip_prefix('$') {
        return match env.var(name) {
            Some(value) => value,
            None => token.to_string(),
        };
    }

    if !token.contains('$') {
        return token.to_string();
    }

    // `vars` is sorted longest-name-first, so the first match is the
    // longest one.
    let mut result = String::with_capacity(token.len());
    let mut rest = token;
    while let Some(pos) = rest.find('$') {
        result.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        match vars
            .iter()
            .find(|(name, _)| !name.is_empty() && after.starts_with(name.as_str()))
        {
            Some((name, value)) => {
                result.push_str(value);
                rest = &after[name.len()..];
            }
            None => {
                result.push('$');
                rest = after;
            }
        }
    }
    result.push_str(rest);
    result
}
