//! Line parser: splits raw input into a command name and arguments.
//!
//! A token that starts with `"` or `'` runs to the next matching quote that
//! is followed by whitespace or the end of the line. Without such a closing
//! quote the opening quote is kept as a literal character and the token
//! ends at the next whitespace.

/// A command name plus its positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInvocation {
    pub name: String,
    pub args: Vec<String>,
}

impl ParsedInvocation {
    /// Borrow the arguments as `&str` for [`Command::execute`](crate::Command::execute).
    pub fn arg_refs(&self) -> Vec<&str> {
        self.args.iter().map(String::as_str).collect()
    }
}

/// Parse one input line. Returns `None` for blank input.
pub fn parse(raw: &str) -> Option<ParsedInvocation> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (name, rest) = match trimmed.find(char::is_whitespace) {
        Some(i) => trimmed.split_at(i),
        None => (trimmed, ""),
    };

    Some(ParsedInvocation {
        name: name.to_string(),
        args: tokenize(rest),
    })
}

/// Split an argument string into tokens, honoring quoted spans.
///
/// Empty quoted spans (`""`, `''`) produce no token.
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = input.trim_start();
    while !rest.is_empty() {
        let (token, remainder) = next_token(rest);
        if let Some(token) = token {
            tokens.push(token);
        }
        rest = remainder.trim_start();
    }
    tokens
}

/// Take one token off the front of `input`, which must not start with
/// whitespace. Returns the token (if non-empty) and the unconsumed text.
fn next_token(input: &str) -> (Option<String>, &str) {
    if let Some(quote) = input.chars().next().filter(|c| *c == '"' || *c == '\'')
        && let Some(close) = find_closing_quote(input, quote)
    {
        let width = quote.len_utf8();
        let inner = &input[width..close];
        let rest = &input[close + width..];
        return ((!inner.is_empty()).then(|| inner.to_string()), rest);
    }

    let end = input.find(char::is_whitespace).unwrap_or(input.len());
    (Some(input[..end].to_string()), &input[end..])
}

/// Byte offset of the first `quote` after the opening one that sits on a
/// token boundary.
fn find_closing_quote(input: &str, quote: char) -> Option<usize> {
    let width = quote.len_utf8();
    input[width..]
        .char_indices()
        .map(|(i, c)| (i + width, c))
        .filter(|&(_, c)| c == quote)
        .find(|&(i, _)| {
            input[i + width..]
                .chars()
                .next()
                .is_none_or(char::is_whitespace)
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        parse(line).expect("non-blank line").args
    }

    #[test]
    fn quoted_argument_is_one_token() {
        let inv = parse("say \"hello world\" now").unwrap();
        assert_eq!(inv.name, "say");
        assert_eq!(inv.args, vec!["hello world", "now"]);
    }

    #[test]
    fn surrounding_whitespace_trimmed() {
        let inv = parse("  jump   ").unwrap();
        assert_eq!(inv.name, "jump");
        assert!(inv.args.is_empty());
    }

    #[test]
    fn blank_input_is_none() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   \t\n "), None);
    }

    #[test]
    fn unterminated_quote_is_literal() {
        let inv = parse("echo 'unterminated").unwrap();
        assert_eq!(inv.name, "echo");
        assert_eq!(inv.args, vec!["'unterminated"]);
    }

    #[test]
    fn unterminated_quote_ends_at_whitespace() {
        assert_eq!(args("echo \"a b c"), vec!["\"a", "b", "c"]);
    }

    #[test]
    fn single_quotes() {
        assert_eq!(args("say 'one two' three"), vec!["one two", "three"]);
    }

    #[test]
    fn close_quote_must_sit_on_boundary() {
        assert_eq!(args("say 'it's fine' ok"), vec!["it's fine", "ok"]);
    }

    #[test]
    fn quote_followed_by_text_is_literal() {
        assert_eq!(args("say \"a\"b c"), vec!["\"a\"b", "c"]);
    }

    #[test]
    fn mismatched_quote_kinds_do_not_close() {
        assert_eq!(args("say \"a b' c"), vec!["\"a", "b'", "c"]);
    }

    #[test]
    fn empty_quoted_span_dropped() {
        assert_eq!(args("say \"\" x ''"), vec!["x"]);
    }

    #[test]
    fn quote_in_middle_of_token_is_literal() {
        assert_eq!(args("say don't stop"), vec!["don't", "stop"]);
    }

    #[test]
    fn tabs_and_newlines_separate() {
        assert_eq!(args("say a\tb\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn quoted_span_keeps_inner_whitespace() {
        assert_eq!(args("say \"  padded  \""), vec!["  padded  "]);
    }

    #[test]
    fn name_keeps_case() {
        assert_eq!(parse("HeLp x").unwrap().name, "HeLp");
    }

    #[test]
    fn name_can_contain_quotes() {
        let inv = parse("\"odd\" arg").unwrap();
        assert_eq!(inv.name, "\"odd\"");
        assert_eq!(inv.args, vec!["arg"]);
    }

    #[test]
    fn many_arguments() {
        let line = format!("cmd {}", (0..500).map(|i| i.to_string()).collect::<Vec<_>>().join(" "));
        assert_eq!(args(&line).len(), 500);
    }

    #[test]
    fn unicode_arguments() {
        assert_eq!(args("say «héllo» \"wörld ✓\""), vec!["«héllo»", "wörld ✓"]);
    }

    #[test]
    fn arg_refs_borrow_in_order() {
        let inv = parse("a b c").unwrap();
        assert_eq!(inv.arg_refs(), vec!["b", "c"]);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn unquoted_words_round_trip(words in proptest::collection::vec("[a-z0-9_.-]{1,8}", 1..10)) {
                let line = words.join("   ");
                let inv = parse(&line).unwrap();
                prop_assert_eq!(&inv.name, &words[0]);
                prop_assert_eq!(&inv.args[..], &words[1..]);
            }

            #[test]
            fn tokens_never_empty(line in "[a-z '\" ]{0,40}") {
                if let Some(inv) = parse(&line) {
                    prop_assert!(!inv.name.is_empty());
                    prop_assert!(inv.args.iter().all(|a| !a.is_empty()));
                }
            }

            #[test]
            fn quoted_phrase_is_single_arg(phrase in "[a-z]{1,5}( [a-z]{1,5}){0,4}") {
                let inv = parse(&format!("say \"{phrase}\"")).unwrap();
                prop_assert_eq!(inv.args, vec![phrase]);
            }
        }
    }
}
