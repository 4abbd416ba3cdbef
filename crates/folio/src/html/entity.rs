//! HTML output for entity and command symbols found in comments.

/// Named entities emitted unchanged.
const NAMED_ENTITIES: &[&str] = &[
    "copy", "trade", "reg", "lt", "gt", "amp", "quot", "lsquo", "rsquo", "ldquo", "rdquo",
    "ndash", "mdash", "nbsp", "hellip", "laquo", "raquo", "iexcl", "cent", "pound", "curren",
    "yen", "brvbar", "sect", "uml", "ordf", "not", "shy", "macr", "deg", "plusmn", "sup1",
    "sup2", "sup3", "acute", "micro", "para", "middot", "cedil", "ordm", "frac14", "frac12",
    "frac34", "iquest", "times", "divide", "szlig", "Auml", "auml", "Ouml", "ouml", "Uuml",
    "uuml", "Euml", "euml", "Iuml", "iuml", "Yuml", "yuml", "Aacute", "aacute", "Eacute",
    "eacute", "Iacute", "iacute", "Oacute", "oacute", "Uacute", "uacute", "Yacute", "yacute",
    "Agrave", "agrave", "Egrave", "egrave", "Igrave", "igrave", "Ograve", "ograve", "Ugrave",
    "ugrave", "Acirc", "acirc", "Ecirc", "ecirc", "Icirc", "icirc", "Ocirc", "ocirc", "Ucirc",
    "ucirc", "Atilde", "atilde", "Ntilde", "ntilde", "Otilde", "otilde", "Aring", "aring",
    "AElig", "aelig", "Ccedil", "ccedil", "Oslash", "oslash", "ETH", "eth", "THORN", "thorn",
    "Alpha", "alpha", "Beta", "beta", "Gamma", "gamma", "Delta", "delta", "Epsilon", "epsilon",
    "Zeta", "zeta", "Eta", "eta", "Theta", "theta", "Iota", "iota", "Kappa", "kappa", "Lambda",
    "lambda", "Mu", "mu", "Nu", "nu", "Xi", "xi", "Omicron", "omicron", "Pi", "pi", "Rho", "rho",
    "Sigma", "sigma", "sigmaf", "Tau", "tau", "Upsilon", "upsilon", "Phi", "phi", "Chi", "chi",
    "Psi", "psi", "Omega", "omega", "thetasym", "upsih", "piv", "bull", "prime", "Prime",
    "oline", "frasl", "weierp", "image", "real", "alefsym", "larr", "uarr", "rarr", "darr",
    "harr", "crarr", "lArr", "uArr", "rArr", "dArr", "hArr", "forall", "part", "exist",
    "empty", "nabla", "isin", "notin", "ni", "prod", "sum", "minus", "lowast", "radic", "prop",
    "infin", "ang", "and", "or", "cap", "cup", "int", "there4", "sim", "cong", "asymp", "ne",
    "equiv", "le", "ge", "sub", "sup", "nsub", "sube", "supe", "oplus", "otimes", "perp",
    "sdot", "lceil", "rceil", "lfloor", "rfloor", "lang", "rang", "loz", "spades", "clubs",
    "hearts", "diams", "OElig", "oelig", "Scaron", "scaron", "circ", "tilde", "ensp", "emsp",
    "thinsp", "zwnj", "zwj", "lrm", "rlm", "sbquo", "bdquo", "dagger", "Dagger", "permil",
    "lsaquo", "rsaquo", "euro",
];

/// HTML text for a symbol as written in the comment, or `None` when it has
/// no HTML rendering.
///
/// Named and numeric character references pass through unchanged. Escaped
/// command characters (`\@`, `\&`, `\<`, ...) become the character they
/// protect, escaped where HTML needs it.
pub fn html_entity(symbol: &str) -> Option<&str> {
    if let Some(body) = symbol.strip_prefix('&').and_then(|s| s.strip_suffix(';')) {
        return match body {
            "apos" => Some("'"),
            _ if is_numeric_reference(body) => Some(symbol),
            _ if NAMED_ENTITIES.contains(&body) => Some(symbol),
            _ => None,
        };
    }

    let html = match symbol {
        "\\@" => "@",
        "\\\\" => "\\",
        "\\&" => "&amp;",
        "\\$" => "$",
        "\\#" => "#",
        "\\<" => "&lt;",
        "\\>" => "&gt;",
        "\\%" => "%",
        "\\\"" => "&quot;",
        "\\." => ".",
        "\\::" => "::",
        "\\|" => "|",
        "\\--" => "&ndash;",
        "\\---" => "&mdash;",
        _ => return None,
    };
    Some(html)
}

fn is_numeric_reference(body: &str) -> bool {
    let Some(number) = body.strip_prefix('#') else {
        return false;
    };
    match number.strip_prefix(['x', 'X']) {
        Some(hex) => !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()),
    }
}
