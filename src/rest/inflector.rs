//! English inflections used to derive resource paths and association targets.
//!
//! Resource declarations rely on naming conventions: `BlogApi::Article` lives
//! at `/articles`, a `has_many :articles` on `BlogApi::Category` points at
//! `BlogApi::Article` and filters with `by_category`. These functions produce
//! exactly those names. They follow the ActiveSupport rule set (suffix rules,
//! irregulars and uncountables), so names match APIs built on that convention.
//!
//! # Example
//!
//! ```rust
//! use pragma_client::rest::inflector;
//!
//! assert_eq!(inflector::underscore("BlogPost"), "blog_post");
//! assert_eq!(inflector::pluralize("category"), "categories");
//! assert_eq!(inflector::singularize("people"), "person");
//! assert_eq!(inflector::classify("blog_posts"), "BlogPost");
//! assert_eq!(inflector::demodulize("BlogApi::Article"), "Article");
//! ```

/// Separator between namespace segments in a resource name.
pub const NAMESPACE_SEPARATOR: &str = "::";

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
];

/// `(singular, plural)` pairs that no suffix rule covers.
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("zombie", "zombies"),
];

#[derive(Clone, Copy)]
enum Guard {
    Always,
    WholeWord,
    NotAfter(&'static str),
}

/// Replaces the last `strip` bytes of a word ending in `suffix` with `append`.
struct Rule {
    suffix: &'static str,
    strip: usize,
    append: &'static str,
    guard: Guard,
}

const fn rule(suffix: &'static str, strip: usize, append: &'static str) -> Rule {
    Rule {
        suffix,
        strip,
        append,
        guard: Guard::Always,
    }
}

const fn word(suffix: &'static str, strip: usize, append: &'static str) -> Rule {
    Rule {
        suffix,
        strip,
        append,
        guard: Guard::WholeWord,
    }
}

const fn not_after(
    suffix: &'static str,
    strip: usize,
    append: &'static str,
    chars: &'static str,
) -> Rule {
    Rule {
        suffix,
        strip,
        append,
        guard: Guard::NotAfter(chars),
    }
}

// Highest priority first.
const PLURAL_RULES: &[Rule] = &[
    rule("quiz", 0, "zes"),
    word("oxen", 0, ""),
    word("ox", 0, "en"),
    word("mice", 0, ""),
    word("lice", 0, ""),
    word("mouse", 4, "ice"),
    word("louse", 4, "ice"),
    rule("matrix", 2, "ices"),
    rule("vertex", 2, "ices"),
    rule("index", 2, "ices"),
    rule("x", 0, "es"),
    rule("ch", 0, "es"),
    rule("ss", 0, "es"),
    rule("sh", 0, "es"),
    rule("quy", 1, "ies"),
    not_after("y", 1, "ies", "aeiouy"),
    rule("hive", 0, "s"),
    not_after("fe", 2, "ves", "f"),
    rule("lf", 1, "ves"),
    rule("rf", 1, "ves"),
    rule("sis", 2, "es"),
    rule("ta", 0, ""),
    rule("ia", 0, ""),
    rule("tum", 2, "a"),
    rule("ium", 2, "a"),
    rule("buffalo", 0, "es"),
    rule("tomato", 0, "es"),
    rule("bus", 0, "es"),
    rule("alias", 0, "es"),
    rule("status", 0, "es"),
    rule("octopi", 0, ""),
    rule("viri", 0, ""),
    rule("octopus", 2, "i"),
    rule("virus", 2, "i"),
    word("axis", 2, "es"),
    word("testis", 2, "es"),
    rule("s", 0, ""),
    rule("", 0, "s"),
];

// Highest priority first.
const SINGULAR_RULES: &[Rule] = &[
    rule("databases", 1, ""),
    rule("quizzes", 3, ""),
    rule("matrices", 4, "ix"),
    rule("vertices", 4, "ex"),
    rule("indices", 4, "ex"),
    word("oxen", 2, ""),
    rule("aliases", 2, ""),
    rule("statuses", 2, ""),
    rule("alias", 0, ""),
    rule("status", 0, ""),
    rule("octopi", 1, "us"),
    rule("viri", 1, "us"),
    rule("octopus", 0, ""),
    rule("virus", 0, ""),
    word("axes", 2, "is"),
    word("axis", 0, ""),
    rule("crises", 2, "is"),
    rule("crisis", 0, ""),
    rule("testes", 2, "is"),
    rule("testis", 0, ""),
    rule("shoes", 1, ""),
    rule("oes", 2, ""),
    rule("buses", 2, ""),
    rule("bus", 0, ""),
    word("mice", 3, "ouse"),
    word("lice", 3, "ouse"),
    rule("xes", 2, ""),
    rule("ches", 2, ""),
    rule("sses", 2, ""),
    rule("shes", 2, ""),
    rule("movies", 1, ""),
    rule("series", 0, ""),
    rule("quies", 3, "y"),
    not_after("ies", 3, "y", "aeiouy"),
    rule("lves", 3, "f"),
    rule("rves", 3, "f"),
    rule("tives", 1, ""),
    rule("hives", 1, ""),
    not_after("ves", 3, "fe", "f"),
    rule("analyses", 2, "is"),
    rule("analysis", 0, ""),
    rule("bases", 2, "is"),
    rule("basis", 0, ""),
    rule("diagnoses", 2, "is"),
    rule("diagnosis", 0, ""),
    rule("parentheses", 2, "is"),
    rule("parenthesis", 0, ""),
    rule("prognoses", 2, "is"),
    rule("prognosis", 0, ""),
    rule("synopses", 2, "is"),
    rule("synopsis", 0, ""),
    rule("theses", 2, "is"),
    rule("thesis", 0, ""),
    rule("ta", 1, "um"),
    rule("ia", 1, "um"),
    rule("news", 0, ""),
    rule("ss", 0, ""),
    rule("s", 1, ""),
];

impl Rule {
    fn apply(&self, word: &str, lower: &str) -> Option<String> {
        let stem_len = lower.len().checked_sub(self.suffix.len())?;
        if !lower.ends_with(self.suffix) {
            return None;
        }
        let guarded = match self.guard {
            Guard::Always => true,
            Guard::WholeWord => stem_len == 0,
            Guard::NotAfter(chars) => lower[..stem_len]
                .chars()
                .next_back()
                .is_some_and(|c| !chars.contains(c)),
        };
        if !guarded {
            return None;
        }
        let keep = word.len() - self.strip;
        Some(format!("{}{}", &word[..keep], self.append))
    }
}

fn is_uncountable(lower: &str) -> bool {
    UNCOUNTABLE.iter().any(|u| {
        lower.strip_suffix(u).is_some_and(|rest| {
            rest.chars()
                .next_back()
                .map_or(true, |c| !(c.is_alphanumeric() || c == '_'))
        })
    })
}

/// Replaces an irregular ending, so `salesperson` becomes `salespeople`.
/// The first letter of the ending keeps its case.
fn replace_irregular(word: &str, lower: &str, from: &str, to: &str) -> Option<String> {
    let start = lower.len().checked_sub(from.len())?;
    if !lower.ends_with(from) {
        return None;
    }
    let first_upper = word[start..].chars().next().is_some_and(char::is_uppercase);
    let mut replacement = to.to_string();
    if first_upper {
        replacement = capitalize_first(&replacement);
    }
    Some(format!("{}{replacement}", &word[..start]))
}

fn inflect(word: &str, rules: &[Rule], plural: bool) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lower = word.to_ascii_lowercase();
    if is_uncountable(&lower) {
        return word.to_string();
    }

    for &(singular, plural_form) in IRREGULAR {
        let (from, to) = if plural {
            (singular, plural_form)
        } else {
            (plural_form, singular)
        };
        if let Some(done) = replace_irregular(word, &lower, to, to) {
            return done;
        }
        if let Some(done) = replace_irregular(word, &lower, from, to) {
            return done;
        }
    }

    rules
        .iter()
        .find_map(|rule| rule.apply(word, &lower))
        .unwrap_or_else(|| word.to_string())
}

/// Returns the plural form of a word (`category` -> `categories`).
#[must_use]
pub fn pluralize(word: &str) -> String {
    inflect(word, PLURAL_RULES, true)
}

/// Returns the singular form of a word (`categories` -> `category`).
#[must_use]
pub fn singularize(word: &str) -> String {
    inflect(word, SINGULAR_RULES, false)
}

/// Strips the namespace from a type path (`BlogApi::Article` -> `Article`).
#[must_use]
pub fn demodulize(path: &str) -> &str {
    path.rsplit_once(NAMESPACE_SEPARATOR)
        .map_or(path, |(_, name)| name)
}

/// Converts a camel-cased name to snake case (`BlogPost` -> `blog_post`).
///
/// Acronyms are kept together (`HTMLParser` -> `html_parser`), `::` becomes
/// `/` and `-` becomes `_`.
#[must_use]
pub fn underscore(name: &str) -> String {
    let chars: Vec<char> = name.replace(NAMESPACE_SEPARATOR, "/").chars().collect();
    let mut result = String::with_capacity(chars.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            let after_word = prev.is_ascii_lowercase() || prev.is_ascii_digit();
            let ends_acronym = (prev.is_ascii_uppercase() || prev.is_ascii_digit()) && next_is_lower;
            if after_word || ends_acronym {
                result.push('_');
            }
        }
        result.push(if c == '-' { '_' } else { c.to_ascii_lowercase() });
    }

    result
}

/// Converts a snake-cased name to upper camel case (`blog_post` -> `BlogPost`).
///
/// `/` becomes `::`. Each segment after a separator is capitalized with the
/// rest of its leading word lowercased.
#[must_use]
pub fn camelize(term: &str) -> String {
    let mut result = String::with_capacity(term.len());

    for (path_index, path) in term.split('/').enumerate() {
        if path_index > 0 {
            result.push_str(NAMESPACE_SEPARATOR);
        }
        for (segment_index, segment) in path.split('_').enumerate() {
            if path_index == 0 && segment_index == 0 {
                result.push_str(&capitalize_run(segment, |c| {
                    c.is_ascii_lowercase() || c.is_ascii_digit()
                }));
            } else {
                result.push_str(&capitalize_run(segment, char::is_ascii_alphanumeric));
            }
        }
    }

    result
}

/// Converts a plural property or table name to a type name (`articles` -> `Article`).
#[must_use]
pub fn classify(name: &str) -> String {
    let name = name.rsplit_once('.').map_or(name, |(_, last)| last);
    camelize(&singularize(name))
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Capitalizes the leading run of characters matching `in_run`, leaving the rest.
fn capitalize_run(segment: &str, in_run: impl Fn(&char) -> bool) -> String {
    let run_len: usize = segment
        .chars()
        .take_while(|c| in_run(c))
        .map(char::len_utf8)
        .sum();
    let (run, rest) = segment.split_at(run_len);
    format!("{}{rest}", capitalize_first(&run.to_ascii_lowercase()))
}
