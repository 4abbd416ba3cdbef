//! Function argument lists.
//!
//! Tag files store a member's signature as plain text (`(int a, char *b) const`).
//! [`ArgumentList::parse`] splits that text into typed [`Argument`]s so imported
//! members can be matched against natively parsed ones.

/// A single formal argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Argument {
    pub ty: String,
    pub name: String,
    /// Array suffix including brackets (`[4]`).
    pub array: String,
    pub default_value: String,
}

impl Argument {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Ordered list of arguments plus the qualifiers trailing the parameter list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentList {
    args: Vec<Argument>,
    const_specifier: bool,
    volatile_specifier: bool,
    pure_specifier: bool,
}

const BUILTIN_TYPE_WORDS: &[&str] = &[
    "const", "volatile", "void", "bool", "char", "short", "int", "long", "signed", "unsigned",
    "float", "double", "auto", "struct", "class", "union", "enum", "typename",
];

impl ArgumentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an argument list such as `(const char *s, int n = 0) const`.
    ///
    /// Text without a parenthesised list yields an empty list; `()` and
    /// `(void)` yield an empty list as well.
    pub fn parse(text: &str) -> Self {
        let mut list = Self::new();

        let Some(open) = text.find('(') else {
            return list;
        };
        let body = &text[open + 1..];

        let mut nesting = Nesting::default();
        let mut segment_start = 0;
        let mut segments = Vec::new();
        let mut close = None;
        for (pos, c) in body.char_indices() {
            match c {
                ')' if nesting.brackets == 0 => {
                    segments.push(&body[segment_start..pos]);
                    close = Some(pos);
                    break;
                }
                ',' if nesting.is_top_level() => {
                    segments.push(&body[segment_start..pos]);
                    segment_start = pos + 1;
                    nesting = Nesting::default();
                }
                _ => nesting.step(c),
            }
        }

        let Some(close) = close else {
            return list;
        };

        let trailer = &body[close + 1..];
        list.const_specifier = trailer.split_whitespace().any(|w| w == "const");
        list.volatile_specifier = trailer.split_whitespace().any(|w| w == "volatile");
        list.pure_specifier = trailer
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .ends_with("=0");

        if let [only] = segments.as_slice() {
            let only = only.trim();
            if only.is_empty() || only == "void" {
                return list;
            }
        }

        list.args = segments.into_iter().map(parse_argument).collect();
        list
    }

    pub fn push(&mut self, arg: Argument) {
        self.args.push(arg);
    }

    pub fn args(&self) -> &[Argument] {
        &self.args
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn is_const(&self) -> bool {
        self.const_specifier
    }

    pub fn is_volatile(&self) -> bool {
        self.volatile_specifier
    }

    pub fn is_pure(&self) -> bool {
        self.pure_specifier
    }
}

impl FromIterator<Argument> for ArgumentList {
    fn from_iter<I: IntoIterator<Item = Argument>>(iter: I) -> Self {
        Self {
            args: iter.into_iter().collect(),
            ..Self::default()
        }
    }
}

fn parse_argument(segment: &str) -> Argument {
    let mut decl = segment.trim();
    let mut arg = Argument::default();

    if let Some(eq) = top_level_find(decl, '=') {
        arg.default_value = decl[eq + 1..].trim().to_string();
        decl = decl[..eq].trim_end();
    }

    if decl.ends_with(']') {
        if let Some(bracket) = top_level_find(decl, '[') {
            arg.array = decl[bracket..].to_string();
            decl = decl[..bracket].trim_end();
        }
    }

    let ident_start = decl
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_alphanumeric() || *c == '_')
        .last()
        .map(|(pos, _)| pos);

    match ident_start {
        Some(pos) => {
            let ident = &decl[pos..];
            let ty = decl[..pos].trim_end();
            let is_name = !ty.is_empty()
                && !ty.ends_with(':')
                && !BUILTIN_TYPE_WORDS.contains(&ident)
                && !ident.starts_with(|c: char| c.is_ascii_digit());
            if is_name {
                arg.ty = ty.to_string();
                arg.name = ident.to_string();
            } else {
                arg.ty = decl.to_string();
            }
        }
        None => arg.ty = decl.to_string(),
    }

    arg
}

/// Bracket nesting within one declaration.
///
/// `<` opens a template argument list only outside other brackets and before
/// the default value, so `a < b` in `(bool f = a < b, int n)` does not nest.
#[derive(Debug, Default)]
struct Nesting {
    brackets: usize,
    angles: usize,
    in_default: bool,
}

impl Nesting {
    fn is_top_level(&self) -> bool {
        self.brackets == 0 && self.angles == 0
    }

    fn step(&mut self, c: char) {
        match c {
            '(' | '[' | '{' => self.brackets += 1,
            ')' | ']' | '}' => self.brackets = self.brackets.saturating_sub(1),
            '<' if self.brackets == 0 && !self.in_default => self.angles += 1,
            '>' if self.brackets == 0 && self.angles > 0 => self.angles -= 1,
            '=' if self.is_top_level() => self.in_default = true,
            _ => {}
        }
    }
}

/// Byte offset of the first `needle` outside any bracket pair.
fn top_level_find(text: &str, needle: char) -> Option<usize> {
    let mut nesting = Nesting::default();
    for (pos, c) in text.char_indices() {
        if c == needle && nesting.is_top_level() {
            return Some(pos);
        }
        nesting.step(c);
    }
    None
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn prop_named_int_arguments_keep_order(
            names in prop::collection::vec("[a-z][a-z0-9_]{0,8}", 1..6)
        ) {
            let names: Vec<String> = names
                .into_iter()
                .filter(|n| !BUILTIN_TYPE_WORDS.contains(&n.as_str()))
                .collect();
            prop_assume!(!names.is_empty());

            let text = format!(
                "({})",
                names.iter().map(|n| format!("int {n}")).collect::<Vec<_>>().join(", ")
            );
            let list = ArgumentList::parse(&text);

            let parsed: Vec<&str> = list.args().iter().map(|a| a.name.as_str()).collect();
            prop_assert_eq!(parsed, names.iter().map(String::as_str).collect::<Vec<_>>());
            prop_assert!(list.args().iter().all(|a| a.ty == "int"));
        }
    }

    #[test]
    fn test_parse_empty_lists() {
        assert!(ArgumentList::parse("()").is_empty());
        assert!(ArgumentList::parse("( void )").is_empty());
        assert!(ArgumentList::parse("").is_empty());
    }

    #[test]
    fn test_parse_named_arguments() {
        let list = ArgumentList::parse("(const char *s, int n)");

        assert_eq!(list.len(), 2);
        assert_eq!(list.args()[0], Argument::new("const char *", "s"));
        assert_eq!(list.args()[1], Argument::new("int", "n"));
    }

    #[test]
    fn test_parse_unnamed_and_scoped_types() {
        let list = ArgumentList::parse("(unsigned int, std::string)");

        assert_eq!(list.args()[0].ty, "unsigned int");
        assert!(list.args()[0].name.is_empty());
        assert_eq!(list.args()[1].ty, "std::string");
        assert!(list.args()[1].name.is_empty());
    }

    #[test]
    fn test_parse_defaults_arrays_and_templates() {
        let list = ArgumentList::parse("(std::map<int, char> m, int buf[4], bool flag = true)");

        assert_eq!(list.len(), 3);
        assert_eq!(list.args()[0].ty, "std::map<int, char>");
        assert_eq!(list.args()[0].name, "m");
        assert_eq!(list.args()[1].array, "[4]");
        assert_eq!(list.args()[1].name, "buf");
        assert_eq!(list.args()[2].default_value, "true");
        assert_eq!(list.args()[2].name, "flag");
    }

    #[test]
    fn test_parse_comparisons_in_defaults() {
        let list = ArgumentList::parse("(bool less = a < b, int c, bool f = (x > y), char d)");

        assert_eq!(list.len(), 4);
        assert_eq!(list.args()[0].name, "less");
        assert_eq!(list.args()[0].default_value, "a < b");
        assert_eq!(list.args()[1], Argument::new("int", "c"));
        assert_eq!(list.args()[2].default_value, "(x > y)");
        assert_eq!(list.args()[3], Argument::new("char", "d"));
    }

    #[test]
    fn test_parse_function_type_template_argument() {
        let list = ArgumentList::parse("(std::function<void(int, char)> cb, int n) const");

        assert_eq!(list.len(), 2);
        assert_eq!(list.args()[0].ty, "std::function<void(int, char)>");
        assert_eq!(list.args()[0].name, "cb");
        assert_eq!(list.args()[1], Argument::new("int", "n"));
        assert!(list.is_const());
    }

    #[test]
    fn test_parse_trailing_qualifiers() {
        let list = ArgumentList::parse("(int a) const volatile = 0");

        assert!(list.is_const());
        assert!(list.is_volatile());
        assert!(list.is_pure());
    }
}
